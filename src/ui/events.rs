use crate::core::SeedError;
use crate::data::UserRecord;

/// Events delivered to the UI loop from background tasks
#[derive(Debug)]
pub enum AppEvent {
    /// First-run seed fetch finished
    SeedLoaded(Result<Vec<UserRecord>, SeedError>),
}

/// Which screen has the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    AddUser,
}

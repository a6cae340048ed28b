pub mod config;
pub mod core;
pub mod data;
pub mod form;
pub mod ui;
pub mod util;

pub use config::Config;
pub use crate::core::{SeedSource, ThemeMode, ToastKind, Toasts, UserStore};
pub use data::{AppStateStore, Database, StateStorage, UserRecord};
pub use form::{AddUserWizard, DraftForm, Field, WizardStep};
pub use ui::App;

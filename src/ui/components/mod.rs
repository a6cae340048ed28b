mod confirmation_dialog;
mod dialog;
mod palette;
mod search_bar;
mod text_input;
mod toast_stack;
mod user_table;
mod wizard_view;

pub use confirmation_dialog::{ConfirmationDialog, ConfirmationDialogState};
pub use dialog::{DialogFrame, InstructionBar};
pub use palette::Palette;
pub use search_bar::{SearchBar, SEARCH_PLACEHOLDER};
pub use text_input::TextInputState;
pub use toast_stack::ToastStack;
pub use user_table::{TableContent, UserTable};
pub use wizard_view::{WizardView, WizardViewState};

//! Add-user form: draft state, validation rules and the step wizard

mod draft;
mod validation;
mod wizard;

pub use draft::{DraftForm, Field, PLACEHOLDER_PHONE};
pub use validation::{validate, validate_fields};
pub use wizard::{
    AddUserWizard, SubmitError, WizardStep, SUBMIT_FAILURE_MESSAGE, SUBMIT_SUCCESS_MESSAGE,
};

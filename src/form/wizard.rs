//! Three-step add-user wizard
//!
//! `BasicInfo -> AddressInfo -> Review`, strictly linear. Moving forward is
//! gated on validating the current step's fields; moving back never is. The
//! raw draft is written to the `userFormData` key after every edit so a
//! restart resumes with the same input.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use thiserror::Error;

use super::draft::{DraftForm, Field};
use super::validation::{validate, validate_fields};
use crate::core::{StoreError, Toasts, UserStore};
use crate::data::{keys, read_json, write_json, StateStorage, UserRecord};

pub const SUBMIT_SUCCESS_MESSAGE: &str = "User added successfully!";
pub const SUBMIT_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    #[default]
    BasicInfo,
    AddressInfo,
    Review,
}

impl WizardStep {
    pub const COUNT: usize = 3;

    /// 1-based position, for the progress bar
    pub fn number(&self) -> usize {
        match self {
            WizardStep::BasicInfo => 1,
            WizardStep::AddressInfo => 2,
            WizardStep::Review => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::BasicInfo => "Basic Information",
            WizardStep::AddressInfo => "Address Information",
            WizardStep::Review => "Review Information",
        }
    }

    /// Editable fields shown on this step
    pub fn fields(&self) -> &'static [Field] {
        match self {
            WizardStep::BasicInfo => &[Field::Name, Field::Email],
            WizardStep::AddressInfo => &[Field::Street, Field::City, Field::Zip],
            WizardStep::Review => &[],
        }
    }

    fn next(self) -> Option<Self> {
        match self {
            WizardStep::BasicInfo => Some(WizardStep::AddressInfo),
            WizardStep::AddressInfo => Some(WizardStep::Review),
            WizardStep::Review => None,
        }
    }

    fn prev(self) -> Option<Self> {
        match self {
            WizardStep::BasicInfo => None,
            WizardStep::AddressInfo => Some(WizardStep::BasicInfo),
            WizardStep::Review => Some(WizardStep::AddressInfo),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Submit is only available on the review step")]
    NotOnReview,
    #[error("{0} field(s) failed validation")]
    Invalid(usize),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct AddUserWizard {
    storage: Arc<dyn StateStorage>,
    step: WizardStep,
    draft: DraftForm,
    touched: HashSet<Field>,
    errors: BTreeMap<Field, String>,
}

impl AddUserWizard {
    /// Start on the first step, resuming any persisted draft
    pub fn load(storage: Arc<dyn StateStorage>) -> Self {
        let draft = match read_json::<DraftForm>(storage.as_ref(), keys::USER_FORM_DATA) {
            Ok(Some(draft)) => draft,
            Ok(None) => DraftForm::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable form draft");
                DraftForm::default()
            }
        };

        Self {
            storage,
            step: WizardStep::BasicInfo,
            draft,
            touched: HashSet::new(),
            errors: BTreeMap::new(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &DraftForm {
        &self.draft
    }

    pub fn errors(&self) -> &BTreeMap<Field, String> {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    /// Record an edit; touched fields are re-validated live
    pub fn update_field(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set(field, value);

        if self.touched.contains(&field) {
            self.check_field(field);
        }

        self.persist_draft();
    }

    /// Field lost focus: mark it touched and validate it
    pub fn blur(&mut self, field: Field) {
        self.touched.insert(field);
        self.check_field(field);
    }

    /// Advance one step if the current step validates; returns whether it moved
    pub fn next(&mut self) -> bool {
        let Some(next) = self.step.next() else {
            return false;
        };
        if !self.validate_step(self.step) {
            return false;
        }
        self.step = next;
        true
    }

    /// Go back one step without validating; returns whether it moved
    pub fn back(&mut self) -> bool {
        match self.step.prev() {
            Some(prev) => {
                self.step = prev;
                true
            }
            None => false,
        }
    }

    /// Store the drafted user and clear the draft.
    ///
    /// Emits the success or failure toast itself. On `Ok` the caller should
    /// leave the wizard; on `Err` the wizard stays where it is.
    pub fn submit(
        &mut self,
        store: &mut UserStore,
        toasts: &mut Toasts,
    ) -> Result<UserRecord, SubmitError> {
        if self.step != WizardStep::Review {
            return Err(SubmitError::NotOnReview);
        }
        if !self.validate_step(WizardStep::AddressInfo) {
            return Err(SubmitError::Invalid(self.errors.len()));
        }

        match store.add(self.draft.to_new_user()) {
            Ok(user) => {
                self.clear_draft();
                toasts.success(SUBMIT_SUCCESS_MESSAGE);
                Ok(user)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to add user");
                toasts.failure(SUBMIT_FAILURE_MESSAGE);
                Err(e.into())
            }
        }
    }

    /// Validate a step's fields, replacing the error map with the result
    fn validate_step(&mut self, step: WizardStep) -> bool {
        self.errors = validate_fields(&self.draft, step.fields());
        self.errors.is_empty()
    }

    fn check_field(&mut self, field: Field) {
        match validate(field, self.draft.get(field)) {
            Some(msg) => {
                self.errors.insert(field, msg);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    fn persist_draft(&self) {
        if let Err(e) = write_json(self.storage.as_ref(), keys::USER_FORM_DATA, &self.draft) {
            tracing::error!(error = %e, "Failed to save form draft");
        }
    }

    fn clear_draft(&mut self) {
        if let Err(e) = self.storage.remove(keys::USER_FORM_DATA) {
            tracing::error!(error = %e, "Failed to clear form draft");
        }
        self.draft = DraftForm::default();
        self.touched.clear();
        self.errors.clear();
        self.step = WizardStep::BasicInfo;
    }
}

impl std::fmt::Debug for AddUserWizard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddUserWizard")
            .field("step", &self.step)
            .field("draft", &self.draft)
            .field("errors", &self.errors)
            .finish()
    }
}

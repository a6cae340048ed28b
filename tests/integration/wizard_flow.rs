//! Add-user wizard driven end to end against real storage

use userdeck::core::{ToastKind, Toasts, UserStore};
use userdeck::data::{keys, read_json};
use userdeck::form::{
    AddUserWizard, DraftForm, Field, SubmitError, WizardStep, SUBMIT_FAILURE_MESSAGE,
    SUBMIT_SUCCESS_MESSAGE,
};

use super::common::fixtures::{FailingSeed, TestStorage};

fn fill(wizard: &mut AddUserWizard, values: &[(Field, &str)]) {
    for (field, value) in values {
        wizard.update_field(*field, *value);
        wizard.blur(*field);
    }
}

fn fill_valid(wizard: &mut AddUserWizard) {
    fill(
        wizard,
        &[(Field::Name, "Ann Lee"), (Field::Email, "ann@example.com")],
    );
    assert!(wizard.next());
    fill(
        wizard,
        &[
            (Field::Street, "123 Main Street"),
            (Field::City, "Springfield"),
            (Field::Zip, "12345"),
        ],
    );
    assert!(wizard.next());
}

#[tokio::test]
async fn test_full_wizard_adds_user_and_clears_draft() {
    let env = TestStorage::new();
    let mut store = UserStore::new(env.storage.clone());
    store.initialize(&FailingSeed).await;
    let mut toasts = Toasts::default();
    let mut wizard = AddUserWizard::load(env.storage.clone());

    fill_valid(&mut wizard);
    assert_eq!(wizard.step(), WizardStep::Review);

    let added = wizard.submit(&mut store, &mut toasts).unwrap();

    assert_eq!(store.len(), 1);
    let stored = store.get(added.id).unwrap();
    assert_eq!(stored.name, "Ann Lee");
    assert_eq!(stored.email, "ann@example.com");
    assert_eq!(stored.phone, "N/A");
    assert_eq!(stored.address.street.as_deref(), Some("123 Main Street"));
    assert_eq!(stored.address.city, "Springfield");
    assert_eq!(stored.address.zipcode.as_deref(), Some("12345"));

    let draft: Option<DraftForm> = read_json(env.storage.as_ref(), keys::USER_FORM_DATA).unwrap();
    assert!(draft.map_or(true, |d| d.is_blank()));
    assert_eq!(wizard.step(), WizardStep::BasicInfo);

    let toast = toasts.visible().last().unwrap();
    assert_eq!(toast.kind, ToastKind::Success);
    assert_eq!(toast.message, SUBMIT_SUCCESS_MESSAGE);

    // The new record survives a restart
    let mut restarted = UserStore::new(env.reopen());
    restarted.restore();
    assert_eq!(restarted.get(added.id).map(|u| u.name.as_str()), Some("Ann Lee"));
}

#[test]
fn test_invalid_email_blocks_first_step() {
    let env = TestStorage::new();
    let mut wizard = AddUserWizard::load(env.storage.clone());

    fill(
        &mut wizard,
        &[(Field::Name, "Ann Lee"), (Field::Email, "not-an-email")],
    );

    assert!(!wizard.next());
    assert_eq!(wizard.step(), WizardStep::BasicInfo);
    assert!(wizard.error(Field::Email).is_some());
    assert!(wizard.error(Field::Name).is_none());
}

#[test]
fn test_draft_resumes_after_restart() {
    let env = TestStorage::new();
    {
        let mut wizard = AddUserWizard::load(env.storage.clone());
        wizard.update_field(Field::Name, "Ann");
        wizard.update_field(Field::City, "Springfield");
    }

    let wizard = AddUserWizard::load(env.reopen());

    assert_eq!(wizard.step(), WizardStep::BasicInfo);
    assert_eq!(wizard.draft().name, "Ann");
    assert_eq!(wizard.draft().city, "Springfield");
    assert!(wizard.errors().is_empty());
}

#[test]
fn test_submit_while_loading_keeps_draft() {
    let env = TestStorage::new();
    // Never initialized, so the store is still loading
    let mut store = UserStore::new(env.storage.clone());
    let mut toasts = Toasts::default();
    let mut wizard = AddUserWizard::load(env.storage.clone());
    fill_valid(&mut wizard);

    let result = wizard.submit(&mut store, &mut toasts);

    assert!(matches!(result, Err(SubmitError::Store(_))));
    assert_eq!(wizard.step(), WizardStep::Review);
    assert_eq!(wizard.draft().name, "Ann Lee");
    let toast = toasts.visible().last().unwrap();
    assert_eq!(toast.kind, ToastKind::Failure);
    assert_eq!(toast.message, SUBMIT_FAILURE_MESSAGE);
}

//! Integration tests for the signup wizard workflow.
//!
//! Drives the wizard through the complete chain of operations:
//! credentials, profile, the timed advance into verification, PIN entry,
//! resend, and the terminal verified step.

use std::time::{Duration, Instant};

use trendwave::wizard::{
    CredentialsInput, ProfileInput, Step, Wizard, WizardError, ADVANCE_DELAY,
};

fn credentials() -> CredentialsInput {
    CredentialsInput {
        username: "chidi".to_string(),
        email: "chidi@example.com".to_string(),
        password: "Str0ngPass".to_string(),
        password_confirm: "Str0ngPass".to_string(),
    }
}

fn profile() -> ProfileInput {
    ProfileInput {
        gender: Some("Male".to_string()),
        country: Some("Nigeria".to_string()),
        state: Some("Oyo".to_string()),
        city: Some("Ibadan".to_string()),
    }
}

#[test]
fn full_signup_flow_reaches_verified() {
    let mut wizard = Wizard::new();
    assert_eq!(wizard.step(), Step::Credentials);

    // Step 1: valid credentials advance.
    wizard.submit_credentials(&credentials()).unwrap();
    assert_eq!(wizard.step(), Step::Profile);

    // Step 2: submit, server accepts, timed advance fires.
    let payload = wizard.begin_register(&profile()).unwrap();
    assert_eq!(payload.email, "chidi@example.com");
    let now = Instant::now();
    wizard.register_succeeded("token-1".to_string(), now);
    assert_eq!(wizard.step(), Step::Profile);
    assert!(wizard.tick(now + ADVANCE_DELAY));
    assert_eq!(wizard.step(), Step::Verification);

    // Step 3: complete PIN, server verifies.
    for c in "905314".chars() {
        wizard.enter_pin_digit(c);
    }
    let verify = wizard.begin_verify().unwrap();
    assert_eq!(verify.signup_token, "token-1");
    assert_eq!(verify.entered_code, 905_314);
    wizard.verify_succeeded();

    assert_eq!(wizard.step(), Step::Verified);
}

#[test]
fn rejected_submissions_never_leave_their_step() {
    let mut wizard = Wizard::new();

    // Blank field, bad email, weak password, mismatch.
    let blank = CredentialsInput {
        email: String::new(),
        ..credentials()
    };
    assert!(wizard.submit_credentials(&blank).is_err());

    let bad_email = CredentialsInput {
        email: "nope".to_string(),
        ..credentials()
    };
    assert_eq!(
        wizard.submit_credentials(&bad_email),
        Err(WizardError::InvalidEmail)
    );

    let weak = CredentialsInput {
        password: "abc".to_string(),
        password_confirm: "abc".to_string(),
        ..credentials()
    };
    assert_eq!(
        wizard.submit_credentials(&weak),
        Err(WizardError::WeakPassword)
    );
    assert_eq!(wizard.step(), Step::Credentials);

    // Step 2 rejects a missing select without going in flight.
    wizard.submit_credentials(&credentials()).unwrap();
    let no_city = ProfileInput {
        city: None,
        ..profile()
    };
    assert_eq!(
        wizard.begin_register(&no_city).unwrap_err(),
        WizardError::MissingCity
    );
    assert_eq!(wizard.step(), Step::Profile);
    assert!(!wizard.register_in_flight());
}

#[test]
fn server_rejection_keeps_the_wizard_recoverable() {
    let mut wizard = Wizard::new();
    wizard.submit_credentials(&credentials()).unwrap();

    // First attempt fails server-side.
    wizard.begin_register(&profile()).unwrap();
    wizard.register_failed();
    assert_eq!(wizard.step(), Step::Profile);

    // Resubmission works and reaches verification.
    wizard.begin_register(&profile()).unwrap();
    let now = Instant::now();
    wizard.register_succeeded("token-2".to_string(), now);
    wizard.tick(now + ADVANCE_DELAY);
    assert_eq!(wizard.step(), Step::Verification);

    // Wrong code: rejected, digits intact, retry allowed.
    for c in "111111".chars() {
        wizard.enter_pin_digit(c);
    }
    wizard.begin_verify().unwrap();
    wizard.verify_failed();
    assert_eq!(wizard.step(), Step::Verification);
    assert!(wizard.pin().unwrap().is_complete());
    assert!(wizard.begin_verify().is_ok());
}

#[test]
fn the_advance_waits_the_full_pause() {
    let mut wizard = Wizard::new();
    wizard.submit_credentials(&credentials()).unwrap();
    wizard.begin_register(&profile()).unwrap();

    let now = Instant::now();
    wizard.register_succeeded("T".to_string(), now);

    assert!(!wizard.tick(now));
    assert!(!wizard.tick(now + Duration::from_secs(1)));
    assert!(!wizard.tick(now + Duration::from_secs(2)));
    assert_eq!(wizard.step(), Step::Profile);

    assert!(wizard.tick(now + Duration::from_secs(3)));
    assert_eq!(wizard.step(), Step::Verification);
}

#[test]
fn resend_resets_the_pin_and_notice_is_one_shot() {
    let mut wizard = Wizard::new();
    wizard.submit_credentials(&credentials()).unwrap();
    wizard.begin_register(&profile()).unwrap();
    let now = Instant::now();
    wizard.register_succeeded("T".to_string(), now);
    wizard.tick(now + ADVANCE_DELAY);

    for c in "123".chars() {
        wizard.enter_pin_digit(c);
    }

    let token = wizard.begin_resend().unwrap();
    assert_eq!(token, "T");
    wizard.resend_succeeded(None);

    assert!(wizard.pin().unwrap().digits().iter().all(Option::is_none));
    assert!(wizard.resend_notice());

    wizard.enter_pin_digit('7');
    assert!(!wizard.resend_notice());
}

#[test]
fn back_navigation_walks_the_cursor_without_losing_forms() {
    let mut wizard = Wizard::new();
    wizard.submit_credentials(&credentials()).unwrap();
    wizard.begin_register(&profile()).unwrap();
    let now = Instant::now();
    wizard.register_succeeded("T".to_string(), now);
    wizard.tick(now + ADVANCE_DELAY);
    assert_eq!(wizard.step(), Step::Verification);

    assert!(wizard.go_back());
    assert_eq!(wizard.step(), Step::Profile);
    assert!(wizard.go_back());
    assert_eq!(wizard.step(), Step::Credentials);
    assert!(!wizard.go_back());

    // Forward again: the captured credentials are still there.
    let payload = wizard.begin_register(&profile());
    // Still on step 1, so the profile submit is rejected.
    assert_eq!(payload.unwrap_err(), WizardError::WrongStep);

    wizard.submit_credentials(&credentials()).unwrap();
    let payload = wizard.begin_register(&profile()).unwrap();
    assert_eq!(payload.username, "chidi");
}

#[test]
fn duplicate_submits_are_rejected_while_in_flight() {
    let mut wizard = Wizard::new();
    wizard.submit_credentials(&credentials()).unwrap();

    wizard.begin_register(&profile()).unwrap();
    assert_eq!(
        wizard.begin_register(&profile()).unwrap_err(),
        WizardError::Busy
    );

    let now = Instant::now();
    wizard.register_succeeded("T".to_string(), now);
    wizard.tick(now + ADVANCE_DELAY);
    for c in "246802".chars() {
        wizard.enter_pin_digit(c);
    }
    wizard.begin_verify().unwrap();
    assert_eq!(wizard.begin_verify().unwrap_err(), WizardError::Busy);

    wizard.verify_failed();
    wizard.begin_resend().unwrap();
    assert_eq!(wizard.begin_resend().unwrap_err(), WizardError::Busy);
}

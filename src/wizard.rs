//! Signup wizard state machine.
//!
//! Four sequential steps: credentials, profile, email verification, done.
//! The wizard owns the step cursor, the validated form data, the signup
//! token handed back by the account service, and the PIN entry state. It
//! performs no I/O itself; screens feed it events and drive the remote
//! calls, reporting outcomes back through the `*_succeeded` / `*_failed`
//! methods. In-flight flags reject re-entrant submissions, and the timed
//! 2 -> 3 advance is a deadline checked from the poll loop rather than a
//! detached timer, so it dies with the wizard.

use std::time::{Duration, Instant};

use crate::validate::{is_strong_password, is_valid_email};

/// Pause between a successful registration and showing the PIN entry.
pub const ADVANCE_DELAY: Duration = Duration::from_secs(3);

/// Number of digits in the email verification code.
pub const PIN_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Step 1: username, email, password, confirmation.
    Credentials,
    /// Step 2: gender and location selects.
    Profile,
    /// Step 3: 6-digit PIN entry.
    Verification,
    /// Step 4: terminal, account confirmed.
    Verified,
}

impl Step {
    /// 1-based position for the step indicator.
    pub fn number(self) -> u8 {
        match self {
            Step::Credentials => 1,
            Step::Profile => 2,
            Step::Verification => 3,
            Step::Verified => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("Please fill all fields")]
    MissingFields,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Please enter a strong password")]
    WeakPassword,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Please select a gender.")]
    MissingGender,
    #[error("Please select a country.")]
    MissingCountry,
    #[error("Please select a state.")]
    MissingState,
    #[error("Please select a city.")]
    MissingCity,
    #[error("Please enter the complete 6-digit code")]
    PinIncomplete,
    #[error("A request is already in progress")]
    Busy,
    #[error("This action is not available right now")]
    WrongStep,
}

/// Step-1 fields, captured after validation passes.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Raw step-1 input, as read from the form.
#[derive(Debug, Clone, Default)]
pub struct CredentialsInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Raw step-2 input. `None` means the select was never chosen.
#[derive(Debug, Clone, Default)]
pub struct ProfileInput {
    pub gender: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
}

/// Everything the account service needs to register the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterPayload {
    pub username: String,
    pub email: String,
    pub password: String,
    pub gender: String,
    pub country: String,
    pub state: String,
    pub city: String,
}

/// Everything the account service needs to verify the email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyPayload {
    pub signup_token: String,
    pub entered_code: u32,
}

/// Six single-digit boxes with a moving focus cursor.
///
/// Typing a digit fills the focused box and moves focus right (unless on
/// the last box). Backspace clears the focused box if it holds a digit,
/// otherwise it moves focus left.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinCode {
    digits: [Option<char>; PIN_LEN],
    active: usize,
}

impl PinCode {
    pub fn digits(&self) -> &[Option<char>; PIN_LEN] {
        &self.digits
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn is_complete(&self) -> bool {
        self.digits.iter().all(Option::is_some)
    }

    pub fn clear(&mut self) {
        self.digits = [None; PIN_LEN];
        self.active = 0;
    }

    /// Parse the six digits as a single integer. `None` until complete.
    pub fn code(&self) -> Option<u32> {
        if !self.is_complete() {
            return None;
        }
        Some(
            self.digits
                .iter()
                .filter_map(|d| d.and_then(|c| c.to_digit(10)))
                .fold(0, |acc, d| acc * 10 + d),
        )
    }

    /// Returns true if the digit was accepted.
    pub fn enter(&mut self, c: char) -> bool {
        if !c.is_ascii_digit() {
            return false;
        }
        self.digits[self.active] = Some(c);
        if self.active + 1 < PIN_LEN {
            self.active += 1;
        }
        true
    }

    pub fn backspace(&mut self) {
        if self.digits[self.active].is_some() {
            self.digits[self.active] = None;
        } else if self.active > 0 {
            self.active -= 1;
            self.digits[self.active] = None;
        }
    }

    pub fn move_left(&mut self) {
        self.active = self.active.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.active + 1 < PIN_LEN {
            self.active += 1;
        }
    }
}

/// Step-3 state, created when registration succeeds.
#[derive(Debug, Clone)]
pub struct Verification {
    signup_token: String,
    pin: PinCode,
    /// One-shot "code resent" notice, cleared by the next PIN edit.
    resend_notice: bool,
}

#[derive(Debug)]
pub struct Wizard {
    step: Step,
    credentials: Option<Credentials>,
    verification: Option<Verification>,
    /// When set, the wizard moves 2 -> 3 once this instant passes.
    advance_at: Option<Instant>,
    register_in_flight: bool,
    verify_in_flight: bool,
    resend_in_flight: bool,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            step: Step::Credentials,
            credentials: None,
            verification: None,
            advance_at: None,
            register_in_flight: false,
            verify_in_flight: false,
            resend_in_flight: false,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn register_in_flight(&self) -> bool {
        self.register_in_flight
    }

    pub fn verify_in_flight(&self) -> bool {
        self.verify_in_flight
    }

    pub fn resend_in_flight(&self) -> bool {
        self.resend_in_flight
    }

    pub fn pin(&self) -> Option<&PinCode> {
        self.verification.as_ref().map(|v| &v.pin)
    }

    pub fn resend_notice(&self) -> bool {
        self.verification.as_ref().is_some_and(|v| v.resend_notice)
    }

    /// Whether the wizard is waiting out the post-registration pause.
    pub fn advance_pending(&self) -> bool {
        self.advance_at.is_some()
    }

    /// Validate step 1 and move to step 2.
    pub fn submit_credentials(&mut self, input: &CredentialsInput) -> Result<(), WizardError> {
        if self.step != Step::Credentials {
            return Err(WizardError::WrongStep);
        }
        let username = input.username.trim();
        let email = input.email.trim();
        if username.is_empty()
            || email.is_empty()
            || input.password.is_empty()
            || input.password_confirm.is_empty()
        {
            return Err(WizardError::MissingFields);
        }
        if !is_valid_email(email) {
            return Err(WizardError::InvalidEmail);
        }
        if !is_strong_password(&input.password) {
            return Err(WizardError::WeakPassword);
        }
        if input.password != input.password_confirm {
            return Err(WizardError::PasswordMismatch);
        }
        self.credentials = Some(Credentials {
            username: username.to_string(),
            email: email.to_string(),
            password: input.password.clone(),
        });
        self.step = Step::Profile;
        Ok(())
    }

    /// Validate step 2 and hand back the payload for the register call.
    /// Marks the register call in flight.
    pub fn begin_register(&mut self, input: &ProfileInput) -> Result<RegisterPayload, WizardError> {
        if self.step != Step::Profile {
            return Err(WizardError::WrongStep);
        }
        if self.register_in_flight {
            return Err(WizardError::Busy);
        }
        let gender = input.gender.clone().ok_or(WizardError::MissingGender)?;
        let country = input.country.clone().ok_or(WizardError::MissingCountry)?;
        let state = input.state.clone().ok_or(WizardError::MissingState)?;
        let city = input.city.clone().ok_or(WizardError::MissingCity)?;
        let credentials = self
            .credentials
            .clone()
            .ok_or(WizardError::WrongStep)?;

        self.register_in_flight = true;
        Ok(RegisterPayload {
            username: credentials.username,
            email: credentials.email,
            password: credentials.password,
            gender,
            country,
            state,
            city,
        })
    }

    /// Registration succeeded: keep the token and schedule the timed
    /// advance to the verification step.
    pub fn register_succeeded(&mut self, signup_token: String, now: Instant) {
        self.register_in_flight = false;
        if self.step != Step::Profile {
            return;
        }
        self.verification = Some(Verification {
            signup_token,
            pin: PinCode::default(),
            resend_notice: false,
        });
        self.advance_at = Some(now + ADVANCE_DELAY);
    }

    pub fn register_failed(&mut self) {
        self.register_in_flight = false;
    }

    /// Poll the timed advance. Returns true when the wizard just moved
    /// to the verification step.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.advance_at {
            Some(at) if self.step == Step::Profile && now >= at => {
                self.advance_at = None;
                self.step = Step::Verification;
                true
            }
            _ => false,
        }
    }

    /// Validate the PIN and hand back the payload for the verify call.
    /// Marks the verify call in flight.
    pub fn begin_verify(&mut self) -> Result<VerifyPayload, WizardError> {
        if self.step != Step::Verification {
            return Err(WizardError::WrongStep);
        }
        if self.verify_in_flight {
            return Err(WizardError::Busy);
        }
        let verification = self.verification.as_ref().ok_or(WizardError::WrongStep)?;
        let entered_code = verification.pin.code().ok_or(WizardError::PinIncomplete)?;
        self.verify_in_flight = true;
        Ok(VerifyPayload {
            signup_token: verification.signup_token.clone(),
            entered_code,
        })
    }

    pub fn verify_succeeded(&mut self) {
        self.verify_in_flight = false;
        if self.step == Step::Verification {
            self.step = Step::Verified;
        }
    }

    /// Verification rejected. The entered digits are kept so the user
    /// can correct them.
    pub fn verify_failed(&mut self) {
        self.verify_in_flight = false;
    }

    /// Hand back the token for the resend call and mark it in flight.
    pub fn begin_resend(&mut self) -> Result<String, WizardError> {
        if self.step != Step::Verification {
            return Err(WizardError::WrongStep);
        }
        if self.resend_in_flight {
            return Err(WizardError::Busy);
        }
        let verification = self.verification.as_ref().ok_or(WizardError::WrongStep)?;
        self.resend_in_flight = true;
        Ok(verification.signup_token.clone())
    }

    /// A fresh code was mailed. Clears the PIN boxes and raises the
    /// one-shot notice. The server may rotate the token.
    pub fn resend_succeeded(&mut self, new_token: Option<String>) {
        self.resend_in_flight = false;
        if let Some(v) = self.verification.as_mut() {
            v.pin.clear();
            v.resend_notice = true;
            if let Some(token) = new_token {
                v.signup_token = token;
            }
        }
    }

    pub fn resend_failed(&mut self) {
        self.resend_in_flight = false;
    }

    /// Type a digit into the PIN. Any edit clears the resend notice.
    pub fn enter_pin_digit(&mut self, c: char) {
        if self.step != Step::Verification {
            return;
        }
        if let Some(v) = self.verification.as_mut() {
            if v.pin.enter(c) {
                v.resend_notice = false;
            }
        }
    }

    /// Erase from the PIN. Any edit clears the resend notice.
    pub fn erase_pin_digit(&mut self) {
        if self.step != Step::Verification {
            return;
        }
        if let Some(v) = self.verification.as_mut() {
            v.pin.backspace();
            v.resend_notice = false;
        }
    }

    pub fn move_pin_focus_left(&mut self) {
        if let Some(v) = self.verification.as_mut() {
            v.pin.move_left();
        }
    }

    pub fn move_pin_focus_right(&mut self) {
        if let Some(v) = self.verification.as_mut() {
            v.pin.move_right();
        }
    }

    /// Move the cursor back one step. Form data is kept. A pending
    /// timed advance is cancelled so it cannot fire against the wrong
    /// step. Returns false when back is not available.
    pub fn go_back(&mut self) -> bool {
        match self.step {
            Step::Profile => {
                self.advance_at = None;
                self.step = Step::Credentials;
                true
            }
            Step::Verification => {
                self.step = Step::Profile;
                true
            }
            Step::Credentials | Step::Verified => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_credentials() -> CredentialsInput {
        CredentialsInput {
            username: "amara".into(),
            email: "amara@example.com".into(),
            password: "Sup3rSecret".into(),
            password_confirm: "Sup3rSecret".into(),
        }
    }

    fn valid_profile() -> ProfileInput {
        ProfileInput {
            gender: Some("Female".into()),
            country: Some("Nigeria".into()),
            state: Some("Lagos".into()),
            city: Some("Ikeja".into()),
        }
    }

    fn wizard_at_profile() -> Wizard {
        let mut w = Wizard::new();
        w.submit_credentials(&valid_credentials()).unwrap();
        w
    }

    fn wizard_at_verification(token: &str) -> Wizard {
        let mut w = wizard_at_profile();
        w.begin_register(&valid_profile()).unwrap();
        let now = Instant::now();
        w.register_succeeded(token.into(), now);
        assert!(w.tick(now + ADVANCE_DELAY));
        w
    }

    #[test]
    fn blank_credentials_stay_on_step_one() {
        for field in ["username", "email", "password", "confirm"] {
            let mut input = valid_credentials();
            match field {
                "username" => input.username.clear(),
                "email" => input.email.clear(),
                "password" => input.password.clear(),
                _ => input.password_confirm.clear(),
            }
            let mut w = Wizard::new();
            assert_eq!(
                w.submit_credentials(&input),
                Err(WizardError::MissingFields)
            );
            assert_eq!(w.step(), Step::Credentials);
        }
    }

    #[test]
    fn bad_email_weak_password_and_mismatch_are_rejected() {
        let mut w = Wizard::new();

        let mut input = valid_credentials();
        input.email = "not-an-email".into();
        assert_eq!(w.submit_credentials(&input), Err(WizardError::InvalidEmail));

        let mut input = valid_credentials();
        input.password = "short".into();
        input.password_confirm = "short".into();
        assert_eq!(w.submit_credentials(&input), Err(WizardError::WeakPassword));

        let mut input = valid_credentials();
        input.password_confirm = "Sup3rSecreT".into();
        assert_eq!(
            w.submit_credentials(&input),
            Err(WizardError::PasswordMismatch)
        );
        assert_eq!(w.step(), Step::Credentials);
    }

    #[test]
    fn valid_credentials_advance_to_profile() {
        let mut w = Wizard::new();
        assert!(w.submit_credentials(&valid_credentials()).is_ok());
        assert_eq!(w.step(), Step::Profile);
    }

    #[test]
    fn unselected_profile_fields_are_rejected() {
        let mut w = wizard_at_profile();
        let mut input = valid_profile();
        input.state = None;
        assert_eq!(
            w.begin_register(&input).unwrap_err(),
            WizardError::MissingState
        );
        assert_eq!(w.step(), Step::Profile);
        assert!(!w.register_in_flight());
    }

    #[test]
    fn register_payload_carries_all_fields() {
        let mut w = wizard_at_profile();
        let payload = w.begin_register(&valid_profile()).unwrap();
        assert_eq!(payload.username, "amara");
        assert_eq!(payload.email, "amara@example.com");
        assert_eq!(payload.gender, "Female");
        assert_eq!(payload.country, "Nigeria");
        assert_eq!(payload.state, "Lagos");
        assert_eq!(payload.city, "Ikeja");
        assert!(w.register_in_flight());
    }

    #[test]
    fn duplicate_register_submission_is_rejected() {
        let mut w = wizard_at_profile();
        w.begin_register(&valid_profile()).unwrap();
        assert_eq!(
            w.begin_register(&valid_profile()).unwrap_err(),
            WizardError::Busy
        );
    }

    #[test]
    fn registration_advances_only_after_the_delay() {
        let mut w = wizard_at_profile();
        w.begin_register(&valid_profile()).unwrap();
        let now = Instant::now();
        w.register_succeeded("T1".into(), now);

        assert_eq!(w.step(), Step::Profile);
        assert!(!w.tick(now + Duration::from_millis(2_900)));
        assert_eq!(w.step(), Step::Profile);

        assert!(w.tick(now + ADVANCE_DELAY));
        assert_eq!(w.step(), Step::Verification);

        for c in "123456".chars() {
            w.enter_pin_digit(c);
        }
        assert_eq!(w.begin_verify().unwrap().signup_token, "T1");
    }

    #[test]
    fn register_failure_stays_on_profile_without_token() {
        let mut w = wizard_at_profile();
        w.begin_register(&valid_profile()).unwrap();
        w.register_failed();
        assert_eq!(w.step(), Step::Profile);
        assert!(!w.register_in_flight());
        assert!(!w.tick(Instant::now() + ADVANCE_DELAY));
        assert!(w.pin().is_none());
    }

    #[test]
    fn back_during_the_pause_cancels_the_advance() {
        let mut w = wizard_at_profile();
        w.begin_register(&valid_profile()).unwrap();
        let now = Instant::now();
        w.register_succeeded("T1".into(), now);
        assert!(w.go_back());
        assert_eq!(w.step(), Step::Credentials);
        assert!(!w.tick(now + ADVANCE_DELAY));
        assert_eq!(w.step(), Step::Credentials);
    }

    #[test]
    fn complete_pin_verifies_and_terminates() {
        let mut w = wizard_at_verification("T1");
        for c in "123456".chars() {
            w.enter_pin_digit(c);
        }
        let payload = w.begin_verify().unwrap();
        assert_eq!(payload.entered_code, 123_456);
        w.verify_succeeded();
        assert_eq!(w.step(), Step::Verified);

        // Terminal: no further transitions or edits.
        assert!(!w.go_back());
        w.enter_pin_digit('9');
        assert_eq!(w.begin_verify().unwrap_err(), WizardError::WrongStep);
        assert_eq!(w.step(), Step::Verified);
    }

    #[test]
    fn incomplete_pin_cannot_be_submitted() {
        let mut w = wizard_at_verification("T1");
        for c in "12345".chars() {
            w.enter_pin_digit(c);
        }
        assert_eq!(w.begin_verify().unwrap_err(), WizardError::PinIncomplete);
        assert!(!w.verify_in_flight());
    }

    #[test]
    fn verify_failure_keeps_the_digits() {
        let mut w = wizard_at_verification("T1");
        for c in "123456".chars() {
            w.enter_pin_digit(c);
        }
        w.begin_verify().unwrap();
        w.verify_failed();
        assert_eq!(w.step(), Step::Verification);
        assert!(w.pin().unwrap().is_complete());
    }

    #[test]
    fn resend_clears_digits_and_raises_one_shot_notice() {
        let mut w = wizard_at_verification("T1");
        for c in "123456".chars() {
            w.enter_pin_digit(c);
        }
        let token = w.begin_resend().unwrap();
        assert_eq!(token, "T1");
        w.resend_succeeded(None);

        let pin = w.pin().unwrap();
        assert!(pin.digits().iter().all(Option::is_none));
        assert_eq!(pin.active(), 0);
        assert!(w.resend_notice());

        // Next edit clears the notice.
        w.enter_pin_digit('4');
        assert!(!w.resend_notice());
    }

    #[test]
    fn resend_may_rotate_the_token() {
        let mut w = wizard_at_verification("T1");
        w.begin_resend().unwrap();
        w.resend_succeeded(Some("T2".into()));
        for c in "654321".chars() {
            w.enter_pin_digit(c);
        }
        assert_eq!(w.begin_verify().unwrap().signup_token, "T2");
    }

    #[test]
    fn pin_focus_moves_forward_on_entry_and_back_on_empty_erase() {
        let mut pin = PinCode::default();
        pin.enter('1');
        pin.enter('2');
        assert_eq!(pin.active(), 2);
        pin.enter('7');
        assert_eq!(pin.active(), 3);
        assert_eq!(pin.digits()[2], Some('7'));

        // Box 3 is empty, so erasing moves focus back to box 2.
        pin.backspace();
        assert_eq!(pin.active(), 2);
        assert_eq!(pin.digits()[2], None);
    }

    #[test]
    fn pin_last_box_keeps_focus_and_rejects_non_digits() {
        let mut pin = PinCode::default();
        for c in "123456".chars() {
            pin.enter(c);
        }
        assert_eq!(pin.active(), PIN_LEN - 1);
        assert!(!pin.enter('x'));
        assert_eq!(pin.code(), Some(123_456));
    }

    #[test]
    fn back_navigation_keeps_form_data() {
        let mut w = wizard_at_verification("T1");
        w.enter_pin_digit('9');
        assert!(w.go_back());
        assert_eq!(w.step(), Step::Profile);
        assert!(w.go_back());
        assert_eq!(w.step(), Step::Credentials);
        assert!(!w.go_back());

        // Step forward again without losing the captured credentials.
        let mut w = wizard_at_verification("T1");
        w.go_back();
        let payload = w.begin_register(&valid_profile()).unwrap();
        assert_eq!(payload.username, "amara");
    }
}

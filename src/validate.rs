//! Client-side input validation for the signup and login forms.
//!
//! Validation failures never reach the network: the wizard refuses to
//! advance and surfaces the message locally.

/// Check that a string looks like an email address.
///
/// Deliberately loose: the server is authoritative, this only catches
/// obvious typos before a round trip.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    // Domain needs at least one dot with content on both sides
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.len() >= 2,
        None => false,
    }
}

/// Password strength policy: at least 8 characters with an uppercase
/// letter, a lowercase letter, and a digit.
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

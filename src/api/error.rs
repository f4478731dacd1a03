use reqwest::{Response, StatusCode};
use serde::Deserialize;
use tracing::error;

/// Fallback text when the server gave us nothing usable.
pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";

/// Errors from the account and location services.
///
/// `Service` carries the server's own message and is shown to the user
/// verbatim. `Transport` and `Malformed` collapse to a generic message:
/// connection refusals and parse failures are logged, not displayed.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-success status and (usually) a message
    #[error("service error ({status}): {message}")]
    Service { status: StatusCode, message: String },

    /// The request never completed (DNS, connect, timeout)
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered 2xx but the body didn't match the expected shape
    #[error("malformed response: {0}")]
    Malformed(#[source] reqwest::Error),
}

/// Error body shape used by the backend for every failed call.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiError {
    /// The single line surfaced to the user as a toast: the server's own
    /// message, else the transport error text, else a generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            Self::Service { message, .. } => message.clone(),
            Self::Transport(e) => format!("Request failed: {e}"),
            Self::Malformed(_) => GENERIC_ERROR.to_string(),
        }
    }

    /// Map a completed response into `Ok(response)` or a `Service` error
    /// built from the body's `message` field.
    pub async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(ErrorBody { message: Some(m) }) if !m.is_empty() => m,
            _ => GENERIC_ERROR.to_string(),
        };
        error!("API call failed ({}): {}", status, message);
        Err(ApiError::Service { status, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_message_is_surfaced_verbatim() {
        let err = ApiError::Service {
            status: StatusCode::CONFLICT,
            message: "Email already registered".to_string(),
        };
        assert_eq!(err.user_message(), "Email already registered");
    }

    #[test]
    fn error_body_tolerates_missing_message() {
        let body: ErrorBody = serde_json::from_str("{\"status\": \"failed\"}").unwrap();
        assert!(body.message.is_none());

        let body: ErrorBody =
            serde_json::from_str("{\"message\": \"Invalid code\"}").unwrap();
        assert_eq!(body.message.as_deref(), Some("Invalid code"));
    }
}

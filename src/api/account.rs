use crate::api::error::ApiError;
use crate::api::endpoint;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Account service client: registration, email verification, login.
#[derive(Debug, Clone)]
pub struct AccountClient {
    http: Client,
    base_url: String,
}

/// Body for `POST /signup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub gender: String,
    pub local_government: String,
    pub country: String,
    pub state: String,
}

/// Successful `POST /signup` response.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub signup_token: String,
}

#[derive(Debug, Serialize)]
struct VerifyEmailRequest<'a> {
    signup_token: &'a str,
    entered_code: u32,
}

#[derive(Debug, Serialize)]
struct ResendCodeRequest<'a> {
    signup_token: &'a str,
}

/// Successful `POST /resend-code` response. The server may rotate the
/// signup token; when it does, the new one replaces the stored token.
#[derive(Debug, Clone, Deserialize)]
pub struct ResendResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub signup_token: Option<String>,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email_username: &'a str,
    password: &'a str,
}

/// Successful `POST /login` response.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
}

impl AccountClient {
    /// Create a client against the given API base URL.
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Register a new account. On success the server emails a 6-digit code
    /// and returns the signup token that correlates the verification step.
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
        let url = endpoint(&self.base_url, "/signup");
        info!("POST {} (username: {})", url, request.username);

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(ApiError::Transport)?;

        let response = ApiError::check(response).await?;
        let parsed: RegisterResponse = response.json().await.map_err(ApiError::Malformed)?;
        info!("register accepted: {}", parsed.message);
        Ok(parsed)
    }

    /// Submit the entered 6-digit code for the pending registration.
    pub async fn verify_email(&self, signup_token: &str, entered_code: u32) -> Result<(), ApiError> {
        let url = endpoint(&self.base_url, "/verify-email");
        info!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .json(&VerifyEmailRequest {
                signup_token,
                entered_code,
            })
            .send()
            .await
            .map_err(ApiError::Transport)?;

        ApiError::check(response).await?;
        info!("email verified");
        Ok(())
    }

    /// Ask the server to email a fresh verification code.
    pub async fn resend_code(&self, signup_token: &str) -> Result<ResendResponse, ApiError> {
        let url = endpoint(&self.base_url, "/resend-code");
        info!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .json(&ResendCodeRequest { signup_token })
            .send()
            .await
            .map_err(ApiError::Transport)?;

        let response = ApiError::check(response).await?;
        let parsed: ResendResponse = response.json().await.map_err(ApiError::Malformed)?;
        Ok(parsed)
    }

    /// Log in with an email address or username.
    pub async fn login(&self, email_username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let url = endpoint(&self.base_url, "/login");
        info!("POST {} ({})", url, email_username);

        let response = self
            .http
            .post(&url)
            .json(&LoginRequest {
                email_username,
                password,
            })
            .send()
            .await
            .map_err(ApiError::Transport)?;

        let response = ApiError::check(response).await?;
        let parsed: LoginResponse = response.json().await.map_err(ApiError::Malformed)?;
        Ok(parsed)
    }
}

//! Async wrappers around the account and location clients.
//!
//! Screens never await anything. Each call here spawns the request on
//! the shared tokio runtime and returns a [`CallHandle`] holding a
//! oneshot receiver; the screen polls it with `try_recv` from the event
//! loop tick. Failures are logged here and collapsed to the single
//! user-facing message the toast shows, so screens only deal in
//! `Result<T, String>`.

use tokio::sync::oneshot;
use tracing::warn;

use crate::api::error::GENERIC_ERROR;
use crate::api::{AccountClient, LocationClient, RegisterRequest};
use crate::wizard::{RegisterPayload, VerifyPayload};

/// Handle for polling an in-flight remote call without blocking.
pub struct CallHandle<T> {
    receiver: oneshot::Receiver<Result<T, String>>,
}

impl<T> CallHandle<T> {
    fn spawn<F>(runtime: &tokio::runtime::Runtime, fut: F) -> Self
    where
        F: std::future::Future<Output = Result<T, String>> + Send + 'static,
        T: Send + 'static,
    {
        let (sender, receiver) = oneshot::channel();
        runtime.spawn(async move {
            let _ = sender.send(fut.await);
        });
        Self { receiver }
    }

    /// Try to receive the result without blocking. `None` while the
    /// call is still in flight.
    pub fn try_recv(&mut self) -> Option<Result<T, String>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => {
                warn!("Call channel closed unexpectedly");
                Some(Err(GENERIC_ERROR.to_string()))
            }
        }
    }
}

/// What the signup screen needs from a successful registration.
#[derive(Debug, Clone)]
pub struct RegisterOutcome {
    pub message: String,
    pub signup_token: String,
}

/// Account service calls used by the signup and login screens.
pub struct AccountService;

impl AccountService {
    pub fn register(
        runtime: &tokio::runtime::Runtime,
        client: AccountClient,
        payload: RegisterPayload,
    ) -> CallHandle<RegisterOutcome> {
        let request = RegisterRequest {
            username: payload.username,
            email: payload.email,
            password: payload.password,
            gender: payload.gender,
            local_government: payload.city,
            country: payload.country,
            state: payload.state,
        };
        CallHandle::spawn(runtime, async move {
            match client.register(&request).await {
                Ok(response) => Ok(RegisterOutcome {
                    message: response.message,
                    signup_token: response.signup_token,
                }),
                Err(e) => {
                    warn!("Registration failed: {}", e);
                    Err(e.user_message())
                }
            }
        })
    }

    pub fn verify_email(
        runtime: &tokio::runtime::Runtime,
        client: AccountClient,
        payload: VerifyPayload,
    ) -> CallHandle<()> {
        CallHandle::spawn(runtime, async move {
            client
                .verify_email(&payload.signup_token, payload.entered_code)
                .await
                .map_err(|e| {
                    warn!("Email verification failed: {}", e);
                    e.user_message()
                })
        })
    }

    /// Resend the verification code. Resolves to the rotated signup
    /// token when the server issues one.
    pub fn resend_code(
        runtime: &tokio::runtime::Runtime,
        client: AccountClient,
        signup_token: String,
    ) -> CallHandle<Option<String>> {
        CallHandle::spawn(runtime, async move {
            match client.resend_code(&signup_token).await {
                Ok(response) => Ok(response.signup_token),
                Err(e) => {
                    warn!("Resend code failed: {}", e);
                    Err(e.user_message())
                }
            }
        })
    }

    pub fn login(
        runtime: &tokio::runtime::Runtime,
        client: AccountClient,
        email_username: String,
        password: String,
    ) -> CallHandle<Option<String>> {
        CallHandle::spawn(runtime, async move {
            match client.login(&email_username, &password).await {
                Ok(response) => Ok(response.message),
                Err(e) => {
                    warn!("Login failed: {}", e);
                    Err(e.user_message())
                }
            }
        })
    }
}

/// Location service calls feeding the cascading selects.
pub struct LocationService;

impl LocationService {
    pub fn countries(
        runtime: &tokio::runtime::Runtime,
        client: LocationClient,
    ) -> CallHandle<Vec<String>> {
        CallHandle::spawn(runtime, async move {
            client.countries().await.map_err(|e| {
                warn!("Country lookup failed: {}", e);
                e.user_message()
            })
        })
    }

    pub fn states(
        runtime: &tokio::runtime::Runtime,
        client: LocationClient,
        country: String,
    ) -> CallHandle<Vec<String>> {
        CallHandle::spawn(runtime, async move {
            client.states(&country).await.map_err(|e| {
                warn!("State lookup failed: {}", e);
                e.user_message()
            })
        })
    }

    pub fn locals(
        runtime: &tokio::runtime::Runtime,
        client: LocationClient,
        state: String,
    ) -> CallHandle<Vec<String>> {
        CallHandle::spawn(runtime, async move {
            client.locals(&state).await.map_err(|e| {
                warn!("City lookup failed: {}", e);
                e.user_message()
            })
        })
    }
}

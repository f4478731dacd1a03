//! HTTP clients for the Trendwave backend.
//!
//! Two collaborators live behind the same base URL:
//! - the account service (`/signup`, `/verify-email`, `/resend-code`, `/login`)
//! - the location service (`/countries`, `/states`, `/states/lga/{state}`)
//!
//! Both share one reqwest client with a cookie jar so that the CSRF cookie
//! set by the server is available to the location calls.

pub mod account;
pub mod error;
pub mod location;

pub use account::{AccountClient, LoginResponse, RegisterRequest, RegisterResponse, ResendResponse};
pub use error::ApiError;
pub use location::LocationClient;

use anyhow::{Context, Result};
use reqwest::cookie::Jar;
use reqwest::Client;
use std::sync::Arc;

/// Build the shared HTTP client and its cookie jar.
///
/// The jar is returned separately because the location client reads the
/// `csrf_access_token` cookie out of it to build the CSRF header.
pub fn build_http_client() -> Result<(Client, Arc<Jar>)> {
    let jar = Arc::new(Jar::default());
    let client = Client::builder()
        .cookie_provider(Arc::clone(&jar))
        .user_agent(concat!("trendwave/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;
    Ok((client, jar))
}

/// Join a base URL and a path without doubling slashes.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

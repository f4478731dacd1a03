use crate::api::endpoint;
use crate::api::error::ApiError;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Name of the cookie carrying the CSRF token for location lookups.
const CSRF_COOKIE: &str = "csrf_access_token";

/// Header the server expects the CSRF token in.
const CSRF_HEADER: &str = "X-CSRF-TOKEN";

/// Location service client: cascading country → state → LGA lookups.
#[derive(Debug, Clone)]
pub struct LocationClient {
    http: Client,
    base_url: String,
    jar: Arc<Jar>,
}

#[derive(Debug, Deserialize)]
struct NamedEntry {
    name: String,
}

#[derive(Debug, Deserialize)]
struct CountriesResponse {
    countries: Vec<NamedEntry>,
}

#[derive(Debug, Deserialize)]
struct StatesResponse {
    states: Vec<NamedEntry>,
}

#[derive(Debug, Deserialize)]
struct LocalsResponse {
    state_lga: Vec<String>,
}

impl LocationClient {
    /// Create a client against the given API base URL. The jar is the one
    /// the shared HTTP client stores its cookies in.
    pub fn new(http: Client, base_url: impl Into<String>, jar: Arc<Jar>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            jar,
        }
    }

    /// All known countries.
    pub async fn countries(&self) -> Result<Vec<String>, ApiError> {
        let url = endpoint(&self.base_url, "/countries");
        let parsed: CountriesResponse = self.get_json(&url).await?;
        Ok(parsed.countries.into_iter().map(|c| c.name).collect())
    }

    /// States of the given country.
    pub async fn states(&self, country: &str) -> Result<Vec<String>, ApiError> {
        let url = format!("{}?country={}", endpoint(&self.base_url, "/states"), country);
        let parsed: StatesResponse = self.get_json(&url).await?;
        Ok(parsed.states.into_iter().map(|s| s.name).collect())
    }

    /// Local government areas (cities) of the given state.
    pub async fn locals(&self, state: &str) -> Result<Vec<String>, ApiError> {
        let url = endpoint(&self.base_url, &format!("/states/lga/{state}"));
        let parsed: LocalsResponse = self.get_json(&url).await?;
        Ok(parsed.state_lga)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        info!("GET {}", url);
        let mut request = self.http.get(url);
        if let Some(token) = self.csrf_token() {
            request = request.header(CSRF_HEADER, token);
        } else {
            debug!("no {} cookie present, sending without CSRF header", CSRF_COOKIE);
        }

        let response = request.send().await.map_err(ApiError::Transport)?;
        let response = ApiError::check(response).await?;
        response.json().await.map_err(ApiError::Malformed)
    }

    /// Read the CSRF token out of the cookie jar, if the server set one.
    fn csrf_token(&self) -> Option<String> {
        let url = self.base_url.parse().ok()?;
        let header = self.jar.cookies(&url)?;
        let cookies = header.to_str().ok()?;
        cookies.split("; ").find_map(|pair| {
            pair.strip_prefix(CSRF_COOKIE)
                .and_then(|rest| rest.strip_prefix('='))
                .map(ToString::to_string)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_jar(jar: Arc<Jar>) -> LocationClient {
        LocationClient::new(Client::new(), "https://api.test/api", jar)
    }

    #[test]
    fn csrf_token_absent_without_cookie() {
        let client = client_with_jar(Arc::new(Jar::default()));
        assert!(client.csrf_token().is_none());
    }

    #[test]
    fn csrf_token_read_from_jar() {
        let jar = Arc::new(Jar::default());
        let url = "https://api.test/api".parse().unwrap();
        jar.add_cookie_str("csrf_access_token=abc123; Path=/", &url);
        jar.add_cookie_str("other=zzz; Path=/", &url);

        let client = client_with_jar(jar);
        assert_eq!(client.csrf_token().as_deref(), Some("abc123"));
    }

    #[test]
    fn response_shapes_deserialize() {
        let countries: CountriesResponse =
            serde_json::from_str("{\"countries\": [{\"name\": \"Nigeria\"}]}").unwrap();
        assert_eq!(countries.countries[0].name, "Nigeria");

        let states: StatesResponse =
            serde_json::from_str("{\"states\": [{\"name\": \"Lagos\"}]}").unwrap();
        assert_eq!(states.states[0].name, "Lagos");

        let locals: LocalsResponse =
            serde_json::from_str("{\"state_lga\": [\"Ikeja\", \"Epe\"]}").unwrap();
        assert_eq!(locals.state_lga, vec!["Ikeja", "Epe"]);
    }
}

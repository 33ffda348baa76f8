//! dbt Cloud HTTP Client
//!
//! A small, type-safe client for the dbt Cloud v2 REST API, covering the
//! read-only endpoints the run watcher needs.
//!
//! # Example
//!
//! ```no_run
//! use dbtwatch_client::CloudClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), dbtwatch_client::ClientError> {
//!     let client = CloudClient::new("https://cloud.getdbt.com", 42, "dbt-token");
//!
//!     let handle = client.most_recent_run(123).await?;
//!     println!("Most recent run: {}", handle.run_id);
//!     Ok(())
//! }
//! ```

pub mod error;
mod runs;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::{Client, header};
use serde::de::DeserializeOwned;

/// HTTP client for the dbt Cloud v2 API
///
/// All requests are scoped to one account: the base URL is
/// `<host>/api/v2/accounts/<account_id>` and every call carries the account's
/// token in the `Authorization` header.
#[derive(Clone)]
pub struct CloudClient {
    /// Account-scoped API base URL
    base_url: String,
    /// Pre-built `Authorization` header value
    auth_header: String,
    /// HTTP client instance
    client: Client,
}

impl CloudClient {
    /// Create a new client for one dbt Cloud account
    ///
    /// # Arguments
    /// * `host` - The cloud host (e.g., "https://cloud.getdbt.com")
    /// * `account_id` - The account the watched job belongs to
    /// * `token` - API token used as the bearer credential
    ///
    /// # Example
    /// ```
    /// use dbtwatch_client::CloudClient;
    ///
    /// let client = CloudClient::new("https://cloud.getdbt.com", 42, "dbt-token");
    /// ```
    pub fn new(host: impl Into<String>, account_id: u64, token: &str) -> Self {
        Self::with_client(host, account_id, token, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use dbtwatch_client::CloudClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = CloudClient::with_client("https://cloud.getdbt.com", 42, "dbt-token", http_client);
    /// ```
    pub fn with_client(
        host: impl Into<String>,
        account_id: u64,
        token: &str,
        client: Client,
    ) -> Self {
        let host = host.into();
        Self {
            base_url: format!(
                "{}/api/v2/accounts/{}",
                host.trim_end_matches('/'),
                account_id
            ),
            auth_header: format!("Token {token}"),
            client,
        }
    }

    /// Get the account-scoped base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start an authenticated GET request
    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header(header::AUTHORIZATION, self.auth_header.as_str())
    }

    /// Handle an API response and deserialize JSON
    ///
    /// Checks the status code and returns an appropriate error if the request
    /// failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

impl std::fmt::Debug for CloudClient {
    // Never print the credential
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudClient")
            .field("base_url", &self.base_url)
            .field("auth_header", &"<redacted>")
            .finish_non_exhaustive()
    }
}

//! HTTP client wrapper for the org's REST query endpoint

use crate::config::OrgConnection;
use crate::error::{CliError, CliResult};
use crate::models::QueryResponse;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Client for read-only SOQL queries against a single org
pub struct OrgClient {
    client: Client,
    connection: OrgConnection,
    api_version: String,
}

impl OrgClient {
    /// Create a new client for the given org connection
    pub fn new(
        connection: OrgConnection,
        api_version: impl Into<String>,
        timeout_secs: u64,
    ) -> CliResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| CliError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            connection,
            api_version: api_version.into(),
        })
    }

    /// The API version queries run against
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    fn query_url(&self) -> String {
        format!(
            "{}/services/data/v{}/query",
            self.connection.instance_url.trim_end_matches('/'),
            self.api_version
        )
    }

    /// Execute a SOQL query and deserialize the result set.
    ///
    /// Any failure is surfaced as-is; there are no retries and no partial
    /// results.
    pub async fn query<T: DeserializeOwned>(&self, soql: &str) -> CliResult<QueryResponse<T>> {
        let response = self
            .client
            .get(self.query_url())
            .query(&[("q", soql)])
            .bearer_auth(&self.connection.access_token)
            .send()
            .await?;

        if response.status().is_success() {
            response.json().await.map_err(Into::into)
        } else if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            Err(CliError::InvalidSession)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(CliError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            })
        }
    }
}

/// Error payload entry returned by the REST API
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    #[serde(rename = "errorCode")]
    error_code: Option<String>,
}

/// Extract a readable message from the REST error body.
///
/// The API returns `[{"message": ..., "errorCode": ...}]`; anything else is
/// passed through verbatim.
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<Vec<ApiErrorBody>>(body) {
        Ok(errors) if !errors.is_empty() => errors
            .into_iter()
            .map(|e| match e.error_code {
                Some(code) => format!("{} ({})", e.message, code),
                None => e.message,
            })
            .collect::<Vec<_>>()
            .join("; "),
        _ => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_connection() -> OrgConnection {
        OrgConnection {
            instance_url: "https://example.my.salesforce.com/".to_string(),
            access_token: "00D-token".to_string(),
        }
    }

    #[test]
    fn test_query_url_strips_trailing_slash() {
        let client = OrgClient::new(test_connection(), "43.0", 5).unwrap();
        assert_eq!(
            client.query_url(),
            "https://example.my.salesforce.com/services/data/v43.0/query"
        );
    }

    #[test]
    fn test_api_error_message_structured() {
        let body = r#"[{"message": "Session expired", "errorCode": "INVALID_SESSION_ID"}]"#;
        assert_eq!(
            api_error_message(body),
            "Session expired (INVALID_SESSION_ID)"
        );
    }

    #[test]
    fn test_api_error_message_multiple() {
        let body = r#"[{"message": "a", "errorCode": "X"}, {"message": "b", "errorCode": "Y"}]"#;
        assert_eq!(api_error_message(body), "a (X); b (Y)");
    }

    #[test]
    fn test_api_error_message_plain_text_passthrough() {
        assert_eq!(api_error_message("gateway timeout"), "gateway timeout");
    }

    #[test]
    fn test_api_error_message_empty_array_passthrough() {
        assert_eq!(api_error_message("[]"), "[]");
    }
}

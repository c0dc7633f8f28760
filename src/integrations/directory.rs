use crate::config::DirectoryConfig;
use crate::error::{AppError, Result};
use crate::models::UserProfile;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// Client for the external identity directory.
#[derive(Clone)]
pub struct DirectoryClient {
    client: Client,
    config: DirectoryConfig,
}

impl DirectoryClient {
    pub fn new(config: DirectoryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Look up the newest user profile matching an email address.
    ///
    /// Returns `Ok(None)` when the directory has no record for the email.
    pub async fn find_user(&self, email: &str) -> Result<Option<UserProfile>> {
        let url = format!("{}{}", self.config.base_url, self.config.search_path);
        debug!(email = email, url = %url, "Searching identity directory");

        let payload = json!({
            "request": {
                "filters": {
                    "email": email.to_lowercase()
                },
                "limit": 1,
                "sort_by": { "createdDate": "desc" }
            }
        });

        let mut request = self.client.post(&url).json(&payload);
        if let Some(api_key) = &self.config.api_key {
            request = request.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Integration {
                integration_source: "directory".to_string(),
                message: format!("User search failed: {} - {}", status, body),
            });
        }

        let body: Value = response.json().await?;
        let content = &body["result"]["response"]["content"];

        let Some(document) = content.as_array().and_then(|docs| docs.first()) else {
            return Ok(None);
        };

        Ok(Some(profile_from_document(document)))
    }
}

fn profile_from_document(document: &Value) -> UserProfile {
    UserProfile {
        id: document["id"]
            .as_str()
            .or_else(|| document["userId"].as_str())
            .unwrap_or_default()
            .to_string(),
        email: document["email"].as_str().map(str::to_string),
        first_name: document["firstName"].as_str().map(str::to_string),
        last_name: document["lastName"].as_str().map(str::to_string),
        raw: document.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(base_url: String) -> DirectoryConfig {
        DirectoryConfig {
            base_url,
            search_path: "/private/user/v1/search".to_string(),
            api_key: Some("api-key".to_string()),
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn test_find_user_returns_first_match() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/private/user/v1/search")
            .match_header("Authorization", "Bearer api-key")
            .with_status(200)
            .with_body(
                r#"{"result": {"response": {"content": [
                    {"id": "u-42", "email": "user@example.com", "firstName": "Ada"}
                ]}}}"#,
            )
            .create_async()
            .await;

        let client = DirectoryClient::new(test_config(server.url())).unwrap();
        let profile = client.find_user("User@Example.com").await.unwrap().unwrap();

        assert_eq!(profile.id, "u-42");
        assert_eq!(profile.first_name.as_deref(), Some("Ada"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_find_user_empty_content_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/private/user/v1/search")
            .with_status(200)
            .with_body(r#"{"result": {"response": {"content": []}}}"#)
            .create_async()
            .await;

        let client = DirectoryClient::new(test_config(server.url())).unwrap();
        let profile = client.find_user("nobody@example.com").await.unwrap();

        assert!(profile.is_none());
    }

    #[tokio::test]
    async fn test_find_user_upstream_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/private/user/v1/search")
            .with_status(500)
            .with_body("directory unavailable")
            .create_async()
            .await;

        let client = DirectoryClient::new(test_config(server.url())).unwrap();
        let err = client.find_user("user@example.com").await.unwrap_err();

        assert!(matches!(err, AppError::Integration { .. }));
    }
}

use crate::config::HelpdeskConfig;
use crate::error::{AppError, Result};
use crate::models::TicketDetails;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

/// Credentials for one ticket request: an OAuth access token, a forwarded
/// browser cookie, or both.
#[derive(Debug, Clone, Default)]
pub struct HelpdeskAuth {
    pub access_token: Option<String>,
    pub cookie: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: String,
}

/// Client for the third-party helpdesk API.
#[derive(Clone)]
pub struct HelpdeskClient {
    client: Client,
    config: HelpdeskConfig,
}

impl HelpdeskClient {
    pub fn new(config: HelpdeskConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Exchange the configured refresh token for a fresh access token.
    pub async fn refresh_access_token(&self) -> Result<String> {
        let refresh_token = self.config.refresh_token.as_deref().ok_or_else(|| {
            AppError::Configuration("Helpdesk refresh token is not configured".to_string())
        })?;
        let client_id = self.config.client_id.as_deref().unwrap_or_default();
        let client_secret = self.config.client_secret.as_deref().unwrap_or_default();

        let url = format!("{}/oauth/v2/token", self.config.accounts_url);
        let params = [
            ("refresh_token", refresh_token),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("grant_type", "refresh_token"),
        ];

        let response = self.client.post(&url).form(&params).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Integration {
                integration_source: "helpdesk".to_string(),
                message: format!("Token refresh failed: {} - {}", status, body),
            });
        }

        let token: TokenResponse = response.json().await?;
        info!("Refreshed helpdesk access token");
        Ok(token.access_token)
    }

    /// Fetch a ticket record by id.
    pub async fn get_ticket(&self, ticket_id: &str, auth: &HelpdeskAuth) -> Result<TicketDetails> {
        let url = format!("{}/api/v1/tickets/{}", self.config.base_url, ticket_id);
        debug!(ticket_id = ticket_id, url = %url, "Fetching ticket details");

        let mut request = self.client.get(&url).header("orgId", &self.config.org_id);

        if let Some(token) = &auth.access_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        if let Some(cookie) = &auth.cookie {
            request = request.header("Cookie", cookie);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("Ticket {} not found", ticket_id)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Integration {
                integration_source: "helpdesk".to_string(),
                message: format!("Failed to fetch ticket {}: {} - {}", ticket_id, status, body),
            });
        }

        let ticket = response.json::<TicketDetails>().await?;
        Ok(ticket)
    }
}

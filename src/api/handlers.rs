use crate::api::AppState;
use crate::error::Result;
use crate::integrations::HelpdeskAuth;
use crate::models::{TicketClassification, TicketText, UserProfile};
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

/// Header carrying forwarded helpdesk session cookies
const HELPDESK_COOKIES_HEADER: &str = "x-helpdesk-cookies";

/// Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Classify raw ticket text without touching the helpdesk API.
pub async fn classify_ticket(
    State(state): State<AppState>,
    Json(request): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>> {
    request.validate()?;

    let text = TicketText {
        subject: request.subject,
        description: request.description,
    };

    let prediction = state.predictor.classify(&text);
    if prediction.is_none() {
        warn!("Classification produced no result");
    }

    Ok(Json(ClassifyResponse { prediction }))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ClassifyRequest {
    #[validate(length(max = 2000))]
    pub subject: Option<String>,

    #[validate(length(max = 65536))]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    /// `null` when either label dimension produced no usable prediction
    pub prediction: Option<TicketClassification>,
}

/// Full triage for one ticket: fetch it from the helpdesk, classify its
/// text, and look up the submitting user in the identity directory.
pub async fn triage_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<TriageResponse>> {
    let request_id = Uuid::new_v4();

    let cookie = headers
        .get(HELPDESK_COOKIES_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let auth = HelpdeskAuth {
        access_token: None,
        cookie,
    };

    let ticket = state.helpdesk.get_ticket(&ticket_id, &auth).await?;
    info!(request_id = %request_id, ticket_id = %ticket_id, "Fetched ticket details");

    let prediction = state.predictor.classify(&ticket.text());

    let user = match ticket.email.as_deref() {
        Some(email) => state.directory.find_user(email).await?,
        None => {
            warn!(
                request_id = %request_id,
                ticket_id = %ticket_id,
                "Ticket has no submitter email, skipping user lookup"
            );
            None
        }
    };

    Ok(Json(TriageResponse {
        ticket_id: ticket.id,
        prediction,
        user_id: user.as_ref().map(|u| u.id.clone()),
        user,
        triaged_at: Utc::now(),
    }))
}

#[derive(Debug, Serialize)]
pub struct TriageResponse {
    pub ticket_id: String,

    /// `null` when either label dimension produced no usable prediction
    pub prediction: Option<TicketClassification>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,

    pub triaged_at: DateTime<Utc>,
}

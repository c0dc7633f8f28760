use serde::{Deserialize, Serialize};

/// Free-text input for classification: subject and description of a ticket.
///
/// Both fields are optional; absent fields are treated as empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketText {
    pub subject: Option<String>,
    pub description: Option<String>,
}

impl TicketText {
    pub fn new(subject: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            subject: Some(subject.into()),
            description: Some(description.into()),
        }
    }

    /// Concatenate subject and description with a single separating space.
    pub fn combined(&self) -> String {
        format!(
            "{} {}",
            self.subject.as_deref().unwrap_or(""),
            self.description.as_deref().unwrap_or("")
        )
    }
}

/// Ticket record as returned by the helpdesk API.
///
/// Only the fields the triage flow needs are modeled; the upstream payload
/// carries many more.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketDetails {
    pub id: String,

    #[serde(default)]
    pub subject: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Email of the submitting user, used for the directory lookup
    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub created_time: Option<String>,
}

impl TicketDetails {
    pub fn text(&self) -> TicketText {
        TicketText {
            subject: self.subject.clone(),
            description: self.description.clone(),
        }
    }
}

/// Decoded classification result for one ticket: one label per dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketClassification {
    pub classification: String,
    pub category: String,
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// User profile record from the identity directory.
///
/// The directory returns a loosely structured document; the id and email are
/// lifted out and the remainder is kept verbatim for the response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    /// Full directory document as returned by the search API
    #[serde(default)]
    pub raw: Value,
}

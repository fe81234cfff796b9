//! Authenticated session value type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::User;

/// A server-issued session binding a user, a bearer token, and an expiry.
///
/// Identity is the `id` field alone: two sessions with the same id compare
/// equal regardless of the other fields. Consumers always receive copies;
/// the live value is owned by the [`SessionHolder`](crate::auth::SessionHolder).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub user: User,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    /// Some sign-in response shapes omit this; it defaults to the moment
    /// the payload was decoded, which for a fresh sign-in is accurate
    /// enough for display purposes.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Set by the sessions listing to mark the session backing the call
    #[serde(default)]
    pub is_current: bool,
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Session {}

impl Session {
    /// Whether the session has expired.
    ///
    /// True iff `expires_at` is strictly before now; a session expiring at
    /// exactly the evaluation instant is still valid. There is no implicit
    /// refresh.
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}

//! Request context carrying the authenticated user and session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context for the current authenticated request.
///
/// Extracted by the API layer and passed into service methods so that
/// every operation knows *who* is acting and from *which* session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The current session ID.
    pub session_id: Uuid,
    /// The username (convenience field for logging).
    pub username: String,
    /// Whether the user has administrator privileges.
    pub is_admin: bool,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, session_id: Uuid, username: String, is_admin: bool) -> Self {
        Self {
            user_id,
            session_id,
            username,
            is_admin,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the current user may act on the given user's data.
    pub fn can_act_for(&self, user_id: Uuid) -> bool {
        self.is_admin || self.user_id == user_id
    }
}

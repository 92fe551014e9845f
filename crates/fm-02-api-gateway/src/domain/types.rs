//! Wire types for the REST API.

use serde::{Deserialize, Serialize};
use shared_types::User;

/// Response envelope shared by every endpoint.
///
/// ```json
/// {"success": true, "data": {...}}
/// {"success": false, "error_message": "user not found: a@b.c"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error_message: None,
        }
    }

    /// Success without a payload
    pub fn done() -> Self {
        Self {
            success: true,
            data: None,
            error_message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error_message: Some(message.into()),
        }
    }
}

// ── Requests ────────────────────────────────────────────────────────────────

/// `POST /user/create`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// `POST /friend/create` and `POST /friend/common`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendsRequest {
    pub friends: Vec<String>,
}

/// `POST /friend/list`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailRequest {
    pub email: String,
}

/// `POST /friend/subscribe`, `/friend/unsubscribe`, `/friend/block`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationRequest {
    pub requestor: String,
    pub target: String,
}

/// `POST /friend/recipients`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipientsRequest {
    pub sender: String,
    #[serde(default)]
    pub text: String,
}

// ── Responses ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: u64,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.0,
            email: user.email,
            name: user.name,
        }
    }
}

/// Friend list with its size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendListResponse {
    pub friends: Vec<String>,
    pub count: usize,
}

impl FriendListResponse {
    pub fn new(friends: Vec<String>) -> Self {
        let count = friends.len();
        Self { friends, count }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientsResponse {
    pub recipients: Vec<String>,
}

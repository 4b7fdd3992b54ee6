//! Request and response bodies for the auth endpoints.

use serde::{Deserialize, Serialize};
use session_token::{Principal, Role};
use utoipa::ToSchema;

/// Principal role as it appears on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RoleParam {
    Attendee,
    Organizer,
}

impl From<RoleParam> for Role {
    fn from(role: RoleParam) -> Self {
        match role {
            RoleParam::Attendee => Self::Attendee,
            RoleParam::Organizer => Self::Organizer,
        }
    }
}

impl From<Role> for RoleParam {
    fn from(role: Role) -> Self {
        match role {
            Role::Attendee => Self::Attendee,
            Role::Organizer => Self::Organizer,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    /// Defaults to `attendee` when omitted.
    #[serde(default)]
    pub role: Option<RoleParam>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub role: RoleParam,
}

impl From<&Principal> for UserResponse {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.id.clone(),
            username: principal.username.clone(),
            role: principal.role.into(),
        }
    }
}

/// Issued-credential response for login, registration, and refresh.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(rename = "accessToken")]
    pub access_token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RefreshResponse {
    pub success: bool,
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub user: UserResponse,
}

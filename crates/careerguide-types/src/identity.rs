//! Caller identity types.
//!
//! The request boundary hands raw credentials to an identity resolver and
//! gets back either an external identity or a reason for rejecting the call.

use serde::{Deserialize, Serialize};

/// Identity asserted by the external identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalIdentity {
    /// Stable subject id; becomes the local user's `auth_id`.
    pub subject: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

/// Credentials lifted off an incoming request, transport-agnostic.
#[derive(Debug, Clone, Default)]
pub struct RequestCredentials {
    /// Token from an `Authorization: Bearer ...` header.
    pub bearer_token: Option<String>,
    /// Identity headers set by an authenticating reverse proxy.
    pub forwarded_subject: Option<String>,
    pub forwarded_email: Option<String>,
    pub forwarded_name: Option<String>,
}

/// Result of resolving a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallerResolution {
    Authenticated(ExternalIdentity),
    Unauthenticated(String),
}

/// Claims carried by a signed bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Expiry as unix seconds. Tokens without it never expire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl From<TokenClaims> for ExternalIdentity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            subject: claims.sub,
            email: claims.email,
            name: claims.name,
        }
    }
}

//! Gateway-injected identity headers extractor.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use pantry_domain::id::UserId;
use pantry_domain::user::UserRole;

pub const USER_ID_HEADER: &str = "x-pantry-user-id";
pub const USER_ROLE_HEADER: &str = "x-pantry-user-role";

/// User identity injected by the gateway via `x-pantry-user-id` and `x-pantry-user-role` headers.
///
/// As a plain extractor it returns 401 if either header is absent or malformed.
/// As `Option<IdentityHeaders>` it yields `None` for anonymous requests (no
/// user-id header) and still rejects malformed headers with 401.
/// Role enforcement (403) is done by handlers after extraction.
#[derive(Debug, Clone)]
pub struct IdentityHeaders {
    pub user_id: Uuid,
    pub user_role: u8,
}

impl IdentityHeaders {
    pub fn id(&self) -> UserId {
        UserId(self.user_id)
    }

    /// Unknown role values are treated as the least privileged role.
    pub fn role(&self) -> UserRole {
        UserRole::from_u8(self.user_role).unwrap_or(UserRole::Normal)
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok())
}

fn parse_identity(parts: &Parts) -> Result<IdentityHeaders, StatusCode> {
    let user_id = header(parts, USER_ID_HEADER)
        .and_then(|s| s.parse::<Uuid>().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;
    let user_role = header(parts, USER_ROLE_HEADER)
        .and_then(|s| s.parse::<u8>().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;
    Ok(IdentityHeaders { user_id, user_role })
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // Extract synchronously and return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = parse_identity(parts);
        if identity.is_err() {
            tracing::debug!(uri = %parts.uri, "rejecting request without identity headers");
        }
        async move { identity }
    }
}

impl<S> OptionalFromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Option<Self>, Self::Rejection>> + Send {
        let identity = if parts.headers.contains_key(USER_ID_HEADER) {
            parse_identity(parts).map(Some)
        } else {
            Ok(None)
        };
        async move { identity }
    }
}

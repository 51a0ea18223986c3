//! Mock auth helpers for integration tests.
//!
//! Services behind the gateway receive `x-pantry-user-id` + `x-pantry-user-role` headers
//! injected by the gateway. In tests, `MockAuth` produces these headers directly
//! so no real gateway is needed.

use http::{HeaderMap, HeaderName, HeaderValue};
use uuid::Uuid;

use pantry_auth_types::identity::{USER_ID_HEADER, USER_ROLE_HEADER};
use pantry_domain::id::UserId;
use pantry_domain::user::UserRole;

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub user_id: Uuid,
    pub user_role: UserRole,
}

impl MockAuth {
    pub fn new(user_id: Uuid, user_role: UserRole) -> Self {
        Self { user_id, user_role }
    }

    /// A fresh normal user.
    pub fn user() -> Self {
        Self::new(Uuid::now_v7(), UserRole::Normal)
    }

    /// A trusted backend allowed to provision accounts.
    pub fn service() -> Self {
        Self::new(Uuid::now_v7(), UserRole::Service)
    }

    pub fn id(&self) -> UserId {
        UserId(self.user_id)
    }

    /// Return headers as if the gateway injected them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            HeaderName::from_static(USER_ID_HEADER),
            HeaderValue::from_str(&self.user_id.to_string()).unwrap(),
        );
        map.insert(
            HeaderName::from_static(USER_ROLE_HEADER),
            HeaderValue::from(u16::from(self.user_role.as_u8())),
        );
        map
    }
}

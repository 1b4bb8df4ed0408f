//! # auth-adapters
//! campus-hub/crates/auth-adapters/src/lib.rs
//! Implementations of the `IdentityProvider` port. Authentication itself
//! (credentials, sessions) lives outside this workspace; these adapters
//! only answer "who is acting right now".

use async_trait::async_trait;
use domains::models::{Role, UserProfile};
use domains::traits::IdentityProvider;
use tracing::debug;
use uuid::Uuid;

/// Namespace for deriving stable user ids from email addresses, so the same
/// account maps to the same `owner_id` across runs and machines.
const USER_ID_NAMESPACE: Uuid = Uuid::from_u128(0x5f0c7e2a_94d1_4b6e_a7d3_92c81f64b0a9);

/// Derives the `owner_id` for an account from its email address (UUID v5).
pub fn user_id_for_email(email: &str) -> Uuid {
    Uuid::new_v5(&USER_ID_NAMESPACE, email.trim().to_lowercase().as_bytes())
}

/// A fixed session identity: whoever was handed in at construction is the
/// acting user for the process lifetime. `signed_out()` models the
/// unauthenticated state.
pub struct StaticIdentity {
    user: Option<UserProfile>,
}

impl StaticIdentity {
    pub fn signed_in(user: UserProfile) -> Self {
        debug!(user = %user.email, "static identity established");
        Self { user: Some(user) }
    }

    pub fn signed_out() -> Self {
        Self { user: None }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn current_user(&self) -> Option<UserProfile> {
        self.user.clone()
    }
}

/// Builder for a profile whose id is derived from the email, for wiring a
/// configured account into `StaticIdentity`.
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    email: String,
    full_name: String,
    role: Role,
    roll_no: Option<String>,
    course: Option<String>,
    phone: Option<String>,
}

impl ProfileBuilder {
    pub fn new(email: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            full_name: full_name.into(),
            role: Role::Student,
            roll_no: None,
            course: None,
            phone: None,
        }
    }

    pub fn role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn roll_no(mut self, roll_no: impl Into<String>) -> Self {
        self.roll_no = Some(roll_no.into());
        self
    }

    pub fn course(mut self, course: impl Into<String>) -> Self {
        self.course = Some(course.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn build(self) -> UserProfile {
        UserProfile {
            id: user_id_for_email(&self.email),
            email: self.email,
            full_name: self.full_name,
            role: self.role,
            roll_no: self.roll_no,
            course: self.course,
            phone: self.phone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn signed_out_identity_yields_no_user() {
        let identity = StaticIdentity::signed_out();
        assert!(identity.current_user().await.is_none());
    }

    #[tokio::test]
    async fn same_email_derives_the_same_id() {
        let a = ProfileBuilder::new("dev@campus.test", "Dev One").build();
        let b = ProfileBuilder::new("Dev@Campus.test ", "Dev Two").build();
        assert_eq!(a.id, b.id);

        let identity = StaticIdentity::signed_in(a.clone());
        let current = identity.current_user().await.unwrap();
        assert_eq!(current.id, a.id);
    }
}

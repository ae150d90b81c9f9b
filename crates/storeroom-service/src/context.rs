//! Caller identity passed explicitly into every service call.

use storeroom_auth::Claims;
use storeroom_core::types::UserId;

/// Who is making the current request.
///
/// Resolved by the HTTP layer from the `Authorization` header. A request
/// without credentials is `Anonymous`; a request with an invalid token never
/// reaches the services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthContext {
    /// No credentials were presented.
    Anonymous,
    /// A user authenticated by a valid access token.
    User {
        /// The authenticated user's ID.
        user_id: UserId,
        /// The user's login, used as the tenant identity of their bookings.
        login: String,
    },
}

impl AuthContext {
    /// Context for an authenticated user.
    pub fn user(user_id: UserId, login: impl Into<String>) -> Self {
        Self::User {
            user_id,
            login: login.into(),
        }
    }

    /// Login of the caller, if authenticated.
    pub fn login(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::User { login, .. } => Some(login),
        }
    }

    /// Whether no credentials were presented.
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }
}

impl From<&Claims> for AuthContext {
    fn from(claims: &Claims) -> Self {
        Self::user(claims.sub, claims.login.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_has_no_identity() {
        let ctx = AuthContext::Anonymous;
        assert!(ctx.is_anonymous());
        assert_eq!(ctx.login(), None);
    }

    #[test]
    fn test_user_identity() {
        let id = UserId::new();
        let ctx = AuthContext::user(id, "bob");
        assert!(!ctx.is_anonymous());
        assert_eq!(ctx.login(), Some("bob"));
        assert_eq!(
            ctx,
            AuthContext::User {
                user_id: id,
                login: "bob".to_string()
            }
        );
    }
}

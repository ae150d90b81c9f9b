//! User registration, login, and logout.

use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use storeroom_auth::{Claims, IssuedToken, JwtDecoder, JwtEncoder, PasswordHasher};
use storeroom_core::error::AppError;
use storeroom_core::result::AppResult;
use storeroom_database::UserStore;
use storeroom_entity::user::{CreateUser, User};

use crate::context::AuthContext;

/// Same message for unknown login and wrong password.
const INVALID_CREDENTIALS: &str = "Invalid login or password";

/// Outcome of a successful login.
#[derive(Debug, Clone)]
pub struct LoginSession {
    /// The authenticated user.
    pub user: User,
    /// The access token issued for this login.
    pub token: IssuedToken,
}

/// Handles account lifecycle and token verification.
#[derive(Clone)]
pub struct AccountService {
    /// Registered users.
    users: Arc<dyn UserStore>,
    /// Password hasher.
    hasher: PasswordHasher,
    /// Access token issuer.
    encoder: JwtEncoder,
    /// Access token verifier and revocation list.
    decoder: JwtDecoder,
}

impl fmt::Debug for AccountService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountService")
            .field("encoder", &self.encoder)
            .field("decoder", &self.decoder)
            .finish_non_exhaustive()
    }
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: PasswordHasher,
        encoder: JwtEncoder,
        decoder: JwtDecoder,
    ) -> Self {
        Self {
            users,
            hasher,
            encoder,
            decoder,
        }
    }

    /// Registers a new user.
    ///
    /// Only non-empty login and password are required.
    pub async fn register(&self, login: &str, password: &str) -> AppResult<User> {
        let login = login.trim();
        if login.is_empty() {
            return Err(AppError::validation("Login must not be empty"));
        }
        if password.is_empty() {
            return Err(AppError::validation("Password must not be empty"));
        }

        let password_hash = self.hasher.hash_password(password)?;
        let user = self
            .users
            .create(CreateUser {
                login: login.to_string(),
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, login = %user.login, "User registered");
        Ok(user)
    }

    /// Verifies credentials and issues an access token.
    pub async fn login(&self, login: &str, password: &str) -> AppResult<LoginSession> {
        let Some(user) = self.users.find_by_login(login.trim()).await? else {
            warn!(login = %login, "Login failed: unknown user");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(login = %user.login, "Login failed: wrong password");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        let token = self.encoder.issue(user.id, &user.login)?;
        info!(user_id = %user.id, login = %user.login, jti = %token.token_id, "User logged in");
        Ok(LoginSession { user, token })
    }

    /// Validates an access token.
    pub fn authenticate(&self, token: &str) -> AppResult<Claims> {
        self.decoder.decode_access_token(token)
    }

    /// Revokes the token described by `claims`.
    pub fn logout(&self, claims: &Claims) {
        self.decoder.revoke(claims);
        info!(user_id = %claims.sub, login = %claims.login, "User logged out");
    }

    /// The caller's own account.
    pub async fn me(&self, ctx: &AuthContext) -> AppResult<User> {
        let login = ctx
            .login()
            .ok_or_else(|| AppError::authentication("Authentication required"))?;
        self.users
            .find_by_login(login)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User '{login}' not found")))
    }

    /// Logins of every registered user.
    pub async fn list_logins(&self) -> AppResult<Vec<String>> {
        self.users.list_logins().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storeroom_core::config::AuthConfig;
    use storeroom_core::error::ErrorKind;
    use storeroom_database::MemoryUserStore;

    fn service() -> AccountService {
        let config = AuthConfig::default();
        AccountService::new(
            Arc::new(MemoryUserStore::new()),
            PasswordHasher::new(),
            JwtEncoder::new(&config),
            JwtDecoder::new(&config),
        )
    }

    #[tokio::test]
    async fn test_register_login_and_me() {
        let service = service();
        let user = service.register(" bob ", "hunter2").await.expect("register");
        assert_eq!(user.login, "bob");
        assert_ne!(user.password_hash, "hunter2");

        let session = service.login("bob", "hunter2").await.expect("login");
        assert_eq!(session.user.id, user.id);

        let claims = service
            .authenticate(&session.token.access_token)
            .expect("valid token");
        let ctx = AuthContext::from(&claims);
        assert_eq!(ctx.login(), Some("bob"));
        assert_eq!(service.me(&ctx).await.expect("me").id, user.id);
    }

    #[tokio::test]
    async fn test_register_rejects_empty_fields() {
        let service = service();
        let err = service.register("   ", "pw").await.expect_err("empty login");
        assert_eq!(err.kind, ErrorKind::Validation);
        let err = service.register("bob", "").await.expect_err("empty password");
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(service.list_logins().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let service = service();
        service.register("bob", "a").await.expect("register");
        let err = service.register("bob", "b").await.expect_err("duplicate");
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_bad_credentials_share_a_message() {
        let service = service();
        service.register("bob", "right").await.expect("register");

        let wrong = service.login("bob", "wrong").await.expect_err("wrong password");
        let unknown = service.login("nobody", "right").await.expect_err("unknown");
        assert_eq!(wrong.kind, ErrorKind::Authentication);
        assert_eq!(wrong.message, unknown.message);
    }

    #[tokio::test]
    async fn test_logout_revokes_token() {
        let service = service();
        service.register("bob", "pw").await.expect("register");
        let session = service.login("bob", "pw").await.expect("login");
        let claims = service
            .authenticate(&session.token.access_token)
            .expect("valid");

        service.logout(&claims);
        let err = service
            .authenticate(&session.token.access_token)
            .expect_err("revoked");
        assert_eq!(err.kind, ErrorKind::Authentication);

        let fresh = service.login("bob", "pw").await.expect("login again");
        service
            .authenticate(&fresh.token.access_token)
            .expect("new token valid");
    }

    #[tokio::test]
    async fn test_me_requires_identity() {
        let err = service()
            .me(&AuthContext::Anonymous)
            .await
            .expect_err("anonymous");
        assert_eq!(err.kind, ErrorKind::Authentication);
    }
}

//! Authentication service.
//!
//! Registration, credential checks, and session cookies. Users only ever
//! leave this module as [`PublicUser`], so neither a plaintext password nor
//! a hash crosses its boundary.

use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::{debug, error, info, warn};

use crate::auth::password::{hash_password, verify_password, PasswordError};
use crate::auth::token::SessionTokens;
use crate::db::{NewUser, PublicUser, StoreError, UserStore};
use crate::error::{ServiceError, ServiceResult};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "Authentication";

/// Cookie that clears the session.
pub const LOGOUT_COOKIE: &str = "Authentication=; HttpOnly; Path=/; Max-Age=0";

/// Registration input.
#[derive(Clone)]
pub struct RegistrationRequest {
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Plaintext password.
    pub password: String,
}

impl RegistrationRequest {
    /// Create a new registration request.
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Orchestrates the user store, the password hasher and session tokens.
///
/// Holds no per-request state; collaborators are passed in at construction.
#[derive(Clone)]
pub struct AuthenticationService {
    users: Arc<dyn UserStore>,
    tokens: SessionTokens,
}

impl AuthenticationService {
    /// Create a new authentication service.
    pub fn new(users: Arc<dyn UserStore>, tokens: SessionTokens) -> Self {
        Self { users, tokens }
    }

    /// Register a new user.
    ///
    /// Hashes the password, stores the user with the hash, and returns the
    /// stored record without its credential. A taken email yields
    /// [`ServiceError::DuplicateUser`]; any other store failure is logged
    /// and reported as [`ServiceError::InternalFailure`].
    pub async fn register(&self, request: RegistrationRequest) -> ServiceResult<PublicUser> {
        let RegistrationRequest {
            email,
            name,
            password,
        } = request;

        let password_hash = hash_blocking(password).await?;
        let new_user = NewUser::new(email, name, password_hash);

        match self.users.create(&new_user).await {
            Ok(user) => {
                info!(user_id = user.id, email = %user.email, "New user registered");
                Ok(user.scrub())
            }
            Err(StoreError::Duplicate(_)) => {
                debug!(email = %new_user.email, "Registration rejected: email taken");
                Err(ServiceError::DuplicateUser)
            }
            Err(e) => {
                error!(error = %e, "User creation failed");
                Err(ServiceError::InternalFailure)
            }
        }
    }

    /// Check an email and password pair.
    ///
    /// An unknown email and a wrong password both produce
    /// [`ServiceError::InvalidCredentials`]. For an unknown email the
    /// password is still checked against a dummy hash, so both paths do
    /// one bcrypt verification.
    pub async fn authenticate(&self, email: &str, password: &str) -> ServiceResult<PublicUser> {
        let user = self.users.find_by_email(email).await.map_err(|e| {
            error!(error = %e, "User lookup failed");
            ServiceError::InternalFailure
        })?;

        let Some(user) = user else {
            verify_dummy_blocking(password.to_owned()).await?;
            debug!("Login failed: credentials rejected");
            return Err(ServiceError::InvalidCredentials);
        };

        if !verify_blocking(password.to_owned(), user.password.clone()).await? {
            debug!("Login failed: credentials rejected");
            return Err(ServiceError::InvalidCredentials);
        }

        info!(user_id = user.id, "User logged in");
        Ok(user.scrub())
    }

    /// Compute the dummy hash up front, so the first log-in with an unknown
    /// email costs the same as any other.
    pub async fn warm_up(&self) -> ServiceResult<()> {
        tokio::task::spawn_blocking(dummy_hash)
            .await
            .map_err(|e| {
                error!(error = %e, "Password hashing task failed");
                ServiceError::InternalFailure
            })?
            .map(|_| ())
            .map_err(|e| {
                error!(error = %e, "Dummy password hash unavailable");
                ServiceError::InternalFailure
            })
    }

    /// Build the `Set-Cookie` value carrying a fresh session token.
    pub fn issue_session_cookie(&self, user_id: i64) -> ServiceResult<String> {
        let token = self.tokens.sign(user_id).map_err(|e| {
            error!(error = %e, "Failed to sign session token");
            ServiceError::InternalFailure
        })?;

        Ok(format!(
            "{SESSION_COOKIE}={token}; HttpOnly; Path=/; Max-Age={}",
            self.tokens.expiration_secs()
        ))
    }

    /// Build the `Set-Cookie` value that ends the session.
    pub fn logout_cookie(&self) -> String {
        LOGOUT_COOKIE.to_string()
    }

    /// Resolve a session token to the user it was issued for.
    ///
    /// A bad or expired token, or one whose user no longer exists, is
    /// [`ServiceError::InvalidCredentials`].
    pub async fn user_from_token(&self, token: &str) -> ServiceResult<PublicUser> {
        let payload = self
            .tokens
            .verify(token)
            .map_err(|_| ServiceError::InvalidCredentials)?;

        match self.users.find_by_id(payload.user_id).await {
            Ok(Some(user)) => Ok(user.scrub()),
            Ok(None) => {
                warn!(user_id = payload.user_id, "Session token for unknown user");
                Err(ServiceError::InvalidCredentials)
            }
            Err(e) => {
                error!(error = %e, "User lookup failed");
                Err(ServiceError::InternalFailure)
            }
        }
    }

    /// Get a user by ID.
    pub async fn get_user(&self, id: i64) -> ServiceResult<PublicUser> {
        match self.users.find_by_id(id).await {
            Ok(Some(user)) => Ok(user.scrub()),
            Ok(None) => Err(ServiceError::NotFound("User")),
            Err(e) => {
                error!(error = %e, "User lookup failed");
                Err(ServiceError::InternalFailure)
            }
        }
    }
}

/// Hash used when the email is unknown. Computed once, on a blocking thread.
fn dummy_hash() -> Result<&'static str, PasswordError> {
    static DUMMY_HASH: OnceLock<String> = OnceLock::new();
    if let Some(hash) = DUMMY_HASH.get() {
        return Ok(hash.as_str());
    }
    let hash = hash_password("inkpost-dummy-password")?;
    Ok(DUMMY_HASH.get_or_init(|| hash).as_str())
}

/// Burn one verification against the dummy hash.
async fn verify_dummy_blocking(password: String) -> ServiceResult<()> {
    let outcome = tokio::task::spawn_blocking(move || {
        let hash = dummy_hash()?;
        verify_password(&password, hash)
    })
    .await
    .map_err(|e| {
        error!(error = %e, "Password verification task failed");
        ServiceError::InternalFailure
    })?;

    outcome.map(|_| ()).map_err(|e| {
        error!(error = %e, "Dummy password hash unavailable");
        ServiceError::InternalFailure
    })
}

async fn hash_blocking(password: String) -> ServiceResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| {
            error!(error = %e, "Password hashing task failed");
            ServiceError::InternalFailure
        })?
        .map_err(|e| {
            error!(error = %e, "Password hashing failed");
            ServiceError::InternalFailure
        })
}

/// Returns whether the password matches. An unreadable stored hash counts
/// as a mismatch.
async fn verify_blocking(password: String, hash: String) -> ServiceResult<bool> {
    let outcome = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| {
            error!(error = %e, "Password verification task failed");
            ServiceError::InternalFailure
        })?;

    match outcome {
        Ok(matches) => Ok(matches),
        Err(e) => {
            warn!(error = %e, "Stored password hash could not be read");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::db::{StoreResult, User, UserRepository};
    use crate::Database;

    const SECRET: &str = "test-secret";

    async fn setup_service() -> AuthenticationService {
        let db = Database::open_in_memory().await.unwrap();
        let users = Arc::new(UserRepository::new(db.pool().clone()));
        AuthenticationService::new(users, SessionTokens::new(SECRET, 3600))
    }

    /// Store whose every call fails with a backend error.
    struct BrokenStore;

    #[async_trait]
    impl UserStore for BrokenStore {
        async fn find_by_id(&self, _id: i64) -> StoreResult<Option<User>> {
            Err(StoreError::Database("connection reset".to_string()))
        }

        async fn find_by_email(&self, _email: &str) -> StoreResult<Option<User>> {
            Err(StoreError::Database("connection reset".to_string()))
        }

        async fn create(&self, _new_user: &NewUser) -> StoreResult<User> {
            Err(StoreError::Database("disk I/O error".to_string()))
        }
    }

    fn broken_service() -> AuthenticationService {
        AuthenticationService::new(Arc::new(BrokenStore), SessionTokens::new(SECRET, 3600))
    }

    #[tokio::test]
    async fn test_register_returns_scrubbed_user() {
        let service = setup_service().await;

        let user = service
            .register(RegistrationRequest::new("ada@example.com", "Ada", "password123"))
            .await
            .unwrap();

        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.name, "Ada");
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_plaintext() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool().clone());
        let service =
            AuthenticationService::new(Arc::new(repo.clone()), SessionTokens::new(SECRET, 60));

        service
            .register(RegistrationRequest::new("ada@example.com", "Ada", "password123"))
            .await
            .unwrap();

        let stored = repo.find_by_email("ada@example.com").await.unwrap().unwrap();
        assert_ne!(stored.password, "password123");
        assert!(verify_password("password123", &stored.password).unwrap());
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let service = setup_service().await;

        service
            .register(RegistrationRequest::new("ada@example.com", "Ada", "password123"))
            .await
            .unwrap();
        let result = service
            .register(RegistrationRequest::new("ada@example.com", "Other", "password456"))
            .await;

        assert_eq!(result, Err(ServiceError::DuplicateUser));
    }

    #[tokio::test]
    async fn test_register_concurrent_duplicates() {
        let service = setup_service().await;

        let first = service.register(RegistrationRequest::new("race@example.com", "A", "pw-one"));
        let second = service.register(RegistrationRequest::new("race@example.com", "B", "pw-two"));
        let (a, b) = tokio::join!(first, second);

        let outcomes = [a, b];
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(outcomes
            .iter()
            .any(|r| r == &Err(ServiceError::DuplicateUser)));
    }

    #[tokio::test]
    async fn test_register_store_failure_is_internal() {
        let result = broken_service()
            .register(RegistrationRequest::new("ada@example.com", "Ada", "password123"))
            .await;

        assert_eq!(result, Err(ServiceError::InternalFailure));
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let service = setup_service().await;
        let registered = service
            .register(RegistrationRequest::new("ada@example.com", "Ada", "password123"))
            .await
            .unwrap();

        let user = service
            .authenticate("ada@example.com", "password123")
            .await
            .unwrap();

        assert_eq!(user, registered);
    }

    #[tokio::test]
    async fn test_authenticate_failures_are_indistinguishable() {
        let service = setup_service().await;
        service
            .register(RegistrationRequest::new("ada@example.com", "Ada", "password123"))
            .await
            .unwrap();

        let wrong_password = service
            .authenticate("ada@example.com", "wrong")
            .await
            .unwrap_err();
        let unknown_email = service
            .authenticate("nobody@example.com", "password123")
            .await
            .unwrap_err();

        assert_eq!(wrong_password, ServiceError::InvalidCredentials);
        assert_eq!(wrong_password, unknown_email);
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_authenticate_store_failure_is_internal() {
        let result = broken_service()
            .authenticate("ada@example.com", "password123")
            .await;

        assert_eq!(result, Err(ServiceError::InternalFailure));
    }

    #[tokio::test]
    async fn test_issue_session_cookie_format() {
        let service = setup_service().await;

        let cookie = service.issue_session_cookie(42).unwrap();

        let token = cookie
            .strip_prefix("Authentication=")
            .and_then(|rest| rest.strip_suffix("; HttpOnly; Path=/; Max-Age=3600"))
            .unwrap();
        assert!(!token.is_empty());
        assert!(!token.contains(';'));
    }

    #[tokio::test]
    async fn test_issue_session_cookie_overflowing_expiration() {
        let db = Database::open_in_memory().await.unwrap();
        let users = Arc::new(UserRepository::new(db.pool().clone()));
        let service = AuthenticationService::new(users, SessionTokens::new(SECRET, u64::MAX));

        assert_eq!(
            service.issue_session_cookie(1),
            Err(ServiceError::InternalFailure)
        );
    }

    #[tokio::test]
    async fn test_warm_up_prepares_dummy_hash() {
        let service = setup_service().await;

        service.warm_up().await.unwrap();

        let hash = dummy_hash().unwrap();
        assert!(hash.starts_with("$2b$10$"));
        assert!(!verify_password("password123", hash).unwrap());
    }

    #[tokio::test]
    async fn test_logout_cookie_exact() {
        let service = setup_service().await;
        assert_eq!(
            service.logout_cookie(),
            "Authentication=; HttpOnly; Path=/; Max-Age=0"
        );
    }

    #[tokio::test]
    async fn test_user_from_token() {
        let service = setup_service().await;
        let user = service
            .register(RegistrationRequest::new("ada@example.com", "Ada", "password123"))
            .await
            .unwrap();

        let token = SessionTokens::new(SECRET, 3600).sign(user.id).unwrap();
        assert_eq!(service.user_from_token(&token).await.unwrap(), user);

        let orphan = SessionTokens::new(SECRET, 3600).sign(999).unwrap();
        assert_eq!(
            service.user_from_token(&orphan).await,
            Err(ServiceError::InvalidCredentials)
        );

        let forged = SessionTokens::new("other-secret", 3600)
            .sign(user.id)
            .unwrap();
        assert_eq!(
            service.user_from_token(&forged).await,
            Err(ServiceError::InvalidCredentials)
        );
    }

    #[tokio::test]
    async fn test_get_user() {
        let service = setup_service().await;
        let user = service
            .register(RegistrationRequest::new("ada@example.com", "Ada", "password123"))
            .await
            .unwrap();

        assert_eq!(service.get_user(user.id).await.unwrap(), user);
        assert_eq!(
            service.get_user(999).await,
            Err(ServiceError::NotFound("User"))
        );
    }

    #[test]
    fn test_registration_request_debug_redacts_password() {
        let request = RegistrationRequest::new("ada@example.com", "Ada", "hunter22");
        assert!(!format!("{request:?}").contains("hunter22"));
    }
}

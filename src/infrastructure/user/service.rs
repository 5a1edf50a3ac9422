//! User service implementing the registration workflow

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info};

use crate::domain::user::{registration_schema, NewUser, RegisterUser, User, UserFilter, UserRepository};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Message returned when the email is already registered
pub const USER_EXISTS_MESSAGE: &str = "User already exists";

/// Message returned when the password could not be hashed
pub const HASH_FAILED_MESSAGE: &str = "Failed to hash password";

/// Message returned when the user could not be looked up or stored
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create user";

/// User service for registration
#[derive(Debug)]
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> UserService<R, H>
where
    R: UserRepository,
    H: PasswordHasher + 'static,
{
    /// Create a new user service
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Register a user from a raw request body.
    ///
    /// Validates, hashes the password, rejects a taken email and stores the
    /// user. Internal failures are logged here and surfaced only as a generic
    /// [`DomainError::Internal`].
    #[tracing::instrument(skip_all, name = "services.users.register")]
    pub async fn register(&self, raw: &Value) -> Result<User, DomainError> {
        let request: RegisterUser = registration_schema()
            .parse(raw)
            .map_err(DomainError::invalid_request)?;

        let password_hash = self.hash_password(request.password).await?;

        match self
            .repository
            .find_one(&UserFilter::email(&request.email))
            .await
        {
            Ok(None) => {}
            Ok(Some(existing)) => {
                debug!(user_id = %existing.id(), "email already registered");
                return Err(DomainError::conflict(USER_EXISTS_MESSAGE));
            }
            Err(e) => {
                error!(error = %e, "failed to look up user by email");
                return Err(DomainError::internal(CREATE_FAILED_MESSAGE));
            }
        }

        let user = NewUser::new(request.email, password_hash, request.name);

        match self.repository.insert_one(user).await {
            Ok(user) => {
                info!(user_id = %user.id(), "user registered");
                Ok(user)
            }
            // Lost a race with a concurrent registration for the same email
            Err(DomainError::Conflict { message }) => {
                debug!(reason = %message, "insert rejected by unique constraint");
                Err(DomainError::conflict(USER_EXISTS_MESSAGE))
            }
            Err(e) => {
                error!(error = %e, "failed to create user");
                Err(DomainError::internal(CREATE_FAILED_MESSAGE))
            }
        }
    }

    /// Check that the user store is reachable
    pub async fn ping(&self) -> Result<(), DomainError> {
        self.repository.ping().await
    }

    async fn hash_password(&self, password: String) -> Result<String, DomainError> {
        let hasher = Arc::clone(&self.hasher);

        match tokio::task::spawn_blocking(move || hasher.hash(&password)).await {
            Ok(Ok(hash)) => Ok(hash),
            Ok(Err(e)) => {
                error!(error = %e, "failed to hash password");
                Err(DomainError::internal(HASH_FAILED_MESSAGE))
            }
            Err(e) => {
                error!(error = %e, "password hashing task failed");
                Err(DomainError::internal(HASH_FAILED_MESSAGE))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::MockUserRepository;
    use crate::infrastructure::user::password::tests::fast_hasher;
    use crate::infrastructure::user::password::Argon2Hasher;
    use serde_json::json;

    #[derive(Debug)]
    struct FailingHasher;

    impl PasswordHasher for FailingHasher {
        fn hash(&self, _password: &str) -> Result<String, DomainError> {
            Err(DomainError::internal("salt generation failed"))
        }

        fn verify(&self, _password: &str, _hash: &str) -> bool {
            false
        }
    }

    fn create_service() -> (Arc<MockUserRepository>, UserService<MockUserRepository, Argon2Hasher>) {
        let repository = Arc::new(MockUserRepository::new());
        let service = UserService::new(Arc::clone(&repository), Arc::new(fast_hasher()));
        (repository, service)
    }

    fn valid_request() -> Value {
        json!({"email": "a@b.com", "password": "password1", "name": "Al"})
    }

    #[tokio::test]
    async fn test_register_user() {
        let (_, service) = create_service();

        let user = service.register(&valid_request()).await.unwrap();

        assert_eq!(user.email(), "a@b.com");
        assert_eq!(user.name(), "Al");
        assert!(!user.is_admin());
        assert_ne!(user.password_hash(), "password1");
        assert!(fast_hasher().verify("password1", user.password_hash()));
    }

    #[tokio::test]
    async fn test_register_stores_trimmed_values() {
        let (repository, service) = create_service();

        let user = service
            .register(&json!({"email": " a@b.com ", "password": " password1 ", "name": " Al "}))
            .await
            .unwrap();

        assert_eq!(user.email(), "a@b.com");
        assert_eq!(user.name(), "Al");
        assert!(fast_hasher().verify("password1", user.password_hash()));
        let stored = repository
            .find_one(&UserFilter::email("a@b.com"))
            .await
            .unwrap();
        assert_eq!(stored.unwrap().name(), "Al");
    }

    #[tokio::test]
    async fn test_register_ignores_admin_flag() {
        let (_, service) = create_service();

        let user = service
            .register(&json!({
                "email": "a@b.com",
                "password": "password1",
                "name": "Al",
                "isAdmin": true
            }))
            .await
            .unwrap();

        assert!(!user.is_admin());
    }

    #[tokio::test]
    async fn test_register_invalid_request() {
        let (repository, service) = create_service();

        let result = service
            .register(&json!({"email": "not-an-email", "password": "password1", "name": "Al"}))
            .await;

        match result {
            Err(DomainError::InvalidRequest(errors)) => {
                assert!(errors.field("email").is_some());
            }
            other => panic!("expected invalid request, got {:?}", other),
        }
        assert_eq!(repository.len().await, 0);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let (repository, service) = create_service();

        service.register(&valid_request()).await.unwrap();
        let result = service.register(&valid_request()).await;

        match result {
            Err(DomainError::Conflict { message }) => assert_eq!(message, USER_EXISTS_MESSAGE),
            other => panic!("expected conflict, got {:?}", other),
        }
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn test_register_race_resolved_by_insert_conflict() {
        let (repository, service) = create_service();

        service.register(&valid_request()).await.unwrap();
        repository.set_lookup_misses(true).await;

        let result = service.register(&valid_request()).await;

        match result {
            Err(DomainError::Conflict { message }) => assert_eq!(message, USER_EXISTS_MESSAGE),
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_lookup_failure_is_internal() {
        let (repository, service) = create_service();
        repository.set_find_fails(true).await;

        let result = service.register(&valid_request()).await;

        match result {
            Err(DomainError::Internal { message }) => assert_eq!(message, CREATE_FAILED_MESSAGE),
            other => panic!("expected internal error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_insert_failure_is_internal() {
        let (repository, service) = create_service();
        repository.set_insert_fails(true).await;

        let result = service.register(&valid_request()).await;

        match result {
            Err(DomainError::Internal { message }) => assert_eq!(message, CREATE_FAILED_MESSAGE),
            other => panic!("expected internal error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_hash_failure_is_internal() {
        let repository = Arc::new(MockUserRepository::new());
        let service = UserService::new(Arc::clone(&repository), Arc::new(FailingHasher));

        let result = service.register(&valid_request()).await;

        match result {
            Err(DomainError::Internal { message }) => assert_eq!(message, HASH_FAILED_MESSAGE),
            other => panic!("expected internal error, got {:?}", other),
        }
        assert_eq!(repository.len().await, 0);
    }

    #[tokio::test]
    async fn test_ping() {
        let (repository, service) = create_service();
        assert!(service.ping().await.is_ok());

        repository.set_find_fails(true).await;
        assert!(service.ping().await.is_err());
    }
}

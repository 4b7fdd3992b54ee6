//! User-record lookup boundary.
//!
//! The session subsystem does not own persistence: user records come from a
//! [`UserDirectory`] implementation provided by the embedder. The bundled
//! [`InMemoryDirectory`] backs the dev server and tests.

use async_trait::async_trait;
use session_token::Role;
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;
use ulid::Ulid;

/// A user record as the directory exposes it: identity and role, nothing
/// about credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("username is already taken")]
    DuplicateUsername,
    #[error("user directory unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolve credentials to a user record.
    ///
    /// Returns `Ok(None)` when the user is unknown OR the password does not
    /// match; callers cannot distinguish the two.
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserRecord>, DirectoryError>;

    async fn create(&self, user: NewUser) -> Result<UserRecord, DirectoryError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>, DirectoryError>;
}

struct StoredUser {
    record: UserRecord,
    password: String,
}

/// In-memory directory keyed by username. Credential checks compare the
/// stored value directly; hashing policy belongs to the embedder's real
/// directory.
#[derive(Default)]
pub struct InMemoryDirectory {
    users: RwLock<HashMap<String, StoredUser>>,
}

impl InMemoryDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, StoredUser>>, DirectoryError> {
        self.users
            .read()
            .map_err(|_| DirectoryError::Unavailable("user directory lock poisoned".to_string()))
    }
}

#[async_trait]
impl UserDirectory for InMemoryDirectory {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserRecord>, DirectoryError> {
        let users = self.read()?;
        Ok(users
            .get(username)
            .filter(|user| user.password == password)
            .map(|user| user.record.clone()))
    }

    async fn create(&self, user: NewUser) -> Result<UserRecord, DirectoryError> {
        let mut users = self.users.write().map_err(|_| {
            DirectoryError::Unavailable("user directory lock poisoned".to_string())
        })?;

        if users.contains_key(&user.username) {
            return Err(DirectoryError::DuplicateUsername);
        }

        let record = UserRecord {
            id: Ulid::new().to_string(),
            username: user.username.clone(),
            role: user.role,
        };
        users.insert(
            user.username,
            StoredUser {
                record: record.clone(),
                password: user.password,
            },
        );

        Ok(record)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>, DirectoryError> {
        let users = self.read()?;
        Ok(users
            .values()
            .find(|user| user.record.id == id)
            .map(|user| user.record.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, role: Role) -> NewUser {
        NewUser {
            username: username.to_string(),
            password: "hunter2".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn create_then_authenticate() -> Result<(), DirectoryError> {
        let directory = InMemoryDirectory::new();
        let record = directory.create(new_user("ada", Role::Organizer)).await?;
        assert_eq!(record.username, "ada");
        assert_eq!(record.role, Role::Organizer);

        let found = directory.authenticate("ada", "hunter2").await?;
        assert_eq!(found, Some(record.clone()));

        let by_id = directory.find_by_id(&record.id).await?;
        assert_eq!(by_id, Some(record));
        Ok(())
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_look_identical() -> Result<(), DirectoryError> {
        let directory = InMemoryDirectory::new();
        directory.create(new_user("ada", Role::Attendee)).await?;

        assert_eq!(directory.authenticate("ada", "wrong").await?, None);
        assert_eq!(directory.authenticate("ghost", "hunter2").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() -> Result<(), DirectoryError> {
        let directory = InMemoryDirectory::new();
        directory.create(new_user("ada", Role::Attendee)).await?;

        let result = directory.create(new_user("ada", Role::Organizer)).await;
        assert!(matches!(result, Err(DirectoryError::DuplicateUsername)));
        Ok(())
    }
}

//! Document storage for accounts and tasks.
//!
//! Handlers talk to the store only through the [`UserStore`] and
//! [`TaskStore`] traits. Every operation touches a single document; nothing
//! here needs a transaction.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Task, TaskStatus, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique field (the account email) is already taken.
    #[error("{0} already exists")]
    Conflict(String),

    #[error("Storage backend failure: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> StoreError {
        match &error {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::Conflict("Email".into())
            }
            _ => StoreError::Backend(error.to_string()),
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with [`StoreError::Conflict`] if the email is already registered.
    async fn insert_user(&self, user: &User) -> Result<(), StoreError>;

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Replaces the stored account. Returns `false` if it no longer exists.
    async fn update_user(&self, user: &User) -> Result<bool, StoreError>;

    /// Removes the account together with the tasks it owns.
    async fn delete_user(&self, id: Uuid) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn insert_task(&self, task: &Task) -> Result<(), StoreError>;

    async fn find_task(&self, id: Uuid) -> Result<Option<Task>, StoreError>;

    /// Tasks owned by `user_id`, newest first, optionally narrowed by status.
    async fn list_tasks(
        &self,
        user_id: Uuid,
        status: Option<TaskStatus>,
    ) -> Result<Vec<Task>, StoreError>;

    async fn update_task(&self, task: &Task) -> Result<bool, StoreError>;

    async fn delete_task(&self, id: Uuid) -> Result<bool, StoreError>;
}

/// Everything the HTTP layer needs from a backend.
pub trait Store: UserStore + TaskStore {}

impl<T: UserStore + TaskStore> Store for T {}

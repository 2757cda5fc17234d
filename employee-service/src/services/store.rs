use crate::models::{Employee, PartialEmployee};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("employee not found")]
    NotFound,

    #[error("inserted employee {0} could not be read back")]
    MissingInsertedRecord(String),

    #[error("{0}")]
    Database(anyhow::Error),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Database(anyhow::Error::new(err))
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidArgument(msg) => AppError::bad_request(msg),
            StoreError::NotFound => AppError::not_found("Employee not found"),
            StoreError::MissingInsertedRecord(_) => AppError::DatabaseError(anyhow::anyhow!(err)),
            StoreError::Database(e) => AppError::DatabaseError(e),
        }
    }
}

/// Collection-scoped access to employee records.
///
/// Every call is a single round trip to the backing store, except `insert`
/// which writes and then reads the new record back.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Every employee, in store-native order.
    async fn list_all(&self) -> Result<Vec<Employee>, StoreError>;

    /// Inserts `draft` with its `id` discarded and returns the stored record.
    async fn insert(&self, draft: Employee) -> Result<Employee, StoreError>;

    /// Sets the present fields of `patch` on the employee `id` and returns
    /// the applied fields.
    async fn update(
        &self,
        id: ObjectId,
        patch: PartialEmployee,
    ) -> Result<PartialEmployee, StoreError>;

    /// Removes at most one employee; returns how many were removed.
    async fn delete(&self, id: ObjectId) -> Result<u64, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

use crate::models::{Employee, PartialEmployee};
use crate::services::metrics::record_store_operation;
use crate::services::store::{EmployeeStore, StoreError};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::ClientOptions,
    Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;
use std::time::Duration;

pub const EMPLOYEES_COLLECTION: &str = "employees";

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    pub async fn connect(
        uri: &str,
        database: &str,
        connect_timeout: Duration,
    ) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let mut options = ClientOptions::parse(uri).await.map_err(|e| {
            tracing::error!("Invalid MongoDB connection string {}: {}", uri, e);
            AppError::from(e)
        })?;
        options.app_name = Some("employee-service".to_string());
        options.connect_timeout = Some(connect_timeout);
        options.server_selection_timeout = Some(connect_timeout);

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub fn employees(&self) -> Collection<Employee> {
        self.db.collection(EMPLOYEES_COLLECTION)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    async fn find_all(&self) -> Result<Vec<Employee>, StoreError> {
        let cursor = self.employees().find(doc! {}, None).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert_and_fetch(&self, mut draft: Employee) -> Result<Employee, StoreError> {
        draft.id = None;

        let result = self.employees().insert_one(&draft, None).await?;
        let inserted_id = result.inserted_id;

        self.employees()
            .find_one(doc! { "_id": inserted_id.clone() }, None)
            .await?
            .ok_or_else(|| StoreError::MissingInsertedRecord(inserted_id.to_string()))
    }

    async fn set_fields(
        &self,
        id: ObjectId,
        patch: PartialEmployee,
    ) -> Result<PartialEmployee, StoreError> {
        if patch.is_empty() {
            return Err(StoreError::InvalidArgument(
                "No updatable fields provided".to_string(),
            ));
        }

        let result = self
            .employees()
            .update_one(
                doc! { "_id": id },
                doc! { "$set": patch.to_set_document() },
                None,
            )
            .await?;

        if result.matched_count == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(patch)
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<u64, StoreError> {
        let result = self.employees().delete_one(doc! { "_id": id }, None).await?;
        Ok(result.deleted_count)
    }
}

#[async_trait]
impl EmployeeStore for MongoDb {
    async fn list_all(&self) -> Result<Vec<Employee>, StoreError> {
        let result = self.find_all().await;
        record_store_operation("list", &result);
        result
    }

    async fn insert(&self, draft: Employee) -> Result<Employee, StoreError> {
        let result = self.insert_and_fetch(draft).await;
        record_store_operation("insert", &result);
        result
    }

    async fn update(
        &self,
        id: ObjectId,
        patch: PartialEmployee,
    ) -> Result<PartialEmployee, StoreError> {
        let result = self.set_fields(id, patch).await;
        record_store_operation("update", &result);
        result
    }

    async fn delete(&self, id: ObjectId) -> Result<u64, StoreError> {
        let result = self.delete_by_id(id).await;
        record_store_operation("delete", &result);
        result
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await?;
        Ok(())
    }
}

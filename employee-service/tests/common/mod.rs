#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use employee_service::config::{EmployeeConfig, MongoConfig};
use employee_service::models::{Employee, PartialEmployee};
use employee_service::services::{EmployeeStore, MongoDb, StoreError};
use employee_service::startup::{build_router, AppState, Application};
use http_body_util::BodyExt;
use mongodb::bson::oid::ObjectId;
use service_core::config::Config as CoreConfig;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;

/// In-process `EmployeeStore` that counts every call, so tests can assert
/// when the store was never reached.
#[derive(Default)]
pub struct InMemoryStore {
    employees: Mutex<Vec<Employee>>,
    calls: AtomicUsize,
    failure: Option<String>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A store whose every call fails with a database error carrying `message`.
    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            failure: Some(message.to_string()),
            ..Default::default()
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn get(&self, id: ObjectId) -> Option<Employee> {
        self.employees
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == Some(id))
            .cloned()
    }

    pub fn seed(&self, mut employee: Employee) -> ObjectId {
        let id = ObjectId::new();
        employee.id = Some(id);
        self.employees.lock().unwrap().push(employee);
        id
    }

    fn enter(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(message) => Err(StoreError::Database(anyhow::anyhow!(message.clone()))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl EmployeeStore for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<Employee>, StoreError> {
        self.enter()?;
        Ok(self.employees.lock().unwrap().clone())
    }

    async fn insert(&self, mut draft: Employee) -> Result<Employee, StoreError> {
        self.enter()?;
        draft.id = Some(ObjectId::new());
        self.employees.lock().unwrap().push(draft.clone());
        Ok(draft)
    }

    async fn update(
        &self,
        id: ObjectId,
        patch: PartialEmployee,
    ) -> Result<PartialEmployee, StoreError> {
        self.enter()?;
        if patch.is_empty() {
            return Err(StoreError::InvalidArgument(
                "No updatable fields provided".to_string(),
            ));
        }
        let mut employees = self.employees.lock().unwrap();
        let employee = employees
            .iter_mut()
            .find(|e| e.id == Some(id))
            .ok_or(StoreError::NotFound)?;
        patch.apply_to(employee);
        Ok(patch)
    }

    async fn delete(&self, id: ObjectId) -> Result<u64, StoreError> {
        self.enter()?;
        let mut employees = self.employees.lock().unwrap();
        let before = employees.len();
        employees.retain(|e| e.id != Some(id));
        Ok((before - employees.len()) as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.enter()
    }
}

pub fn router(store: Arc<InMemoryStore>) -> Router {
    build_router(AppState::new(store))
}

/// Sends one request through the router and returns the status and JSON body
/// (`Null` when the body is empty).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// The service running against a real MongoDB, on a random port, with a
/// database of its own.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: MongoDb,
    pub db_name: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let db_name = format!("employee_test_{}", Uuid::new_v4());
        let config = EmployeeConfig {
            common: CoreConfig { port: 0 },
            mongodb: MongoConfig {
                uri: std::env::var("TEST_MONGODB_URI")
                    .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
                database: db_name.clone(),
                connect_timeout_secs: 5,
            },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept connections
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            db,
            db_name,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn cleanup(&self) {
        let _ = self.db.client().database(&self.db_name).drop(None).await;
    }
}

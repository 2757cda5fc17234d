use crate::models::employee::null_as_default;
use crate::models::{Employee, PartialEmployee};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// POST /employee body.
///
/// Decoding is lenient: absent or `null` fields default to their zero values
/// and any client-supplied `id` is dropped, since identifiers are assigned by
/// the store.
#[derive(Debug, Default, Deserialize)]
pub struct CreateEmployeeRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub salary: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub age: f64,
}

impl From<CreateEmployeeRequest> for Employee {
    fn from(req: CreateEmployeeRequest) -> Self {
        Employee::new(req.name, req.salary, req.age)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeResponse {
    pub id: String,
    pub name: String,
    pub salary: f64,
    pub age: f64,
}

impl EmployeeResponse {
    /// PUT /employee/:id reply: the path id with the applied fields overlaid
    /// on zero values. The stored document is not re-read.
    pub fn echo_update(id: ObjectId, applied: &PartialEmployee) -> Self {
        let mut echoed = Employee::new(String::new(), 0.0, 0.0);
        echoed.id = Some(id);
        applied.apply_to(&mut echoed);
        Self::from(echoed)
    }
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            name: employee.name,
            salary: employee.salary,
            age: employee.age,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteEmployeeResponse {
    pub message: String,
    pub deleted_count: u64,
}

impl DeleteEmployeeResponse {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            message: "Record Deleted".to_string(),
            deleted_count,
        }
    }
}

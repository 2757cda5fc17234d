pub mod employees;

pub use employees::{CreateEmployeeRequest, DeleteEmployeeResponse, EmployeeResponse};

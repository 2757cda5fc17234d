//! `/employee` endpoints: one store call per request, translated straight
//! into a status code and JSON body.

use crate::dtos::{CreateEmployeeRequest, DeleteEmployeeResponse, EmployeeResponse};
use crate::middleware::{EmployeeId, JsonBody};
use crate::models::{Employee, PartialEmployee};
use crate::services::StoreError;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, Json};
use service_core::error::AppError;

/// GET /employee
pub async fn list_employees(
    State(state): State<AppState>,
) -> Result<Json<Vec<EmployeeResponse>>, AppError> {
    let employees = state.store.list_all().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to list employees");
        AppError::from(e)
    })?;

    Ok(Json(
        employees.into_iter().map(EmployeeResponse::from).collect(),
    ))
}

/// POST /employee
pub async fn create_employee(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<EmployeeResponse>), AppError> {
    let created = state
        .store
        .insert(Employee::from(req))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to create employee");
            AppError::from(e)
        })?;

    tracing::info!(employee_id = ?created.id, "Employee created");

    Ok((StatusCode::CREATED, Json(EmployeeResponse::from(created))))
}

/// PUT /employee/:id
///
/// A missing employee is reported as 400, not 404, unlike DELETE. The reply
/// is the full employee shape: sent fields overlaid on zero values, not the
/// stored record.
pub async fn update_employee(
    State(state): State<AppState>,
    EmployeeId(id): EmployeeId,
    JsonBody(patch): JsonBody<PartialEmployee>,
) -> Result<Json<EmployeeResponse>, AppError> {
    let applied = state.store.update(id, patch).await.map_err(|e| match e {
        StoreError::NotFound => AppError::bad_request(format!("No employee with id {}", id)),
        StoreError::InvalidArgument(_) => AppError::from(e),
        other => {
            tracing::error!(employee_id = %id, error = %other, "Failed to update employee");
            AppError::OpaqueDatabaseError(anyhow::Error::new(other))
        }
    })?;

    tracing::info!(employee_id = %id, "Employee updated");

    Ok(Json(EmployeeResponse::echo_update(id, &applied)))
}

/// DELETE /employee/:id
pub async fn delete_employee(
    State(state): State<AppState>,
    EmployeeId(id): EmployeeId,
) -> Result<Json<DeleteEmployeeResponse>, AppError> {
    let deleted_count = state.store.delete(id).await.map_err(|e| {
        tracing::error!(employee_id = %id, error = %e, "Failed to delete employee");
        AppError::OpaqueDatabaseError(anyhow::Error::new(e))
    })?;

    if deleted_count < 1 {
        return Err(AppError::not_found("Employee not found"));
    }

    tracing::info!(employee_id = %id, "Employee deleted");

    Ok(Json(DeleteEmployeeResponse::new(deleted_count)))
}

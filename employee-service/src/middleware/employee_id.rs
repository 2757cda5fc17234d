use axum::async_trait;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;

/// `:id` path segment decoded as a store identifier (24 hex characters).
///
/// Rejects with 400 before any handler code, and so before the store, runs.
#[derive(Debug, Clone, Copy)]
pub struct EmployeeId(pub ObjectId);

#[async_trait]
impl<S> FromRequestParts<S> for EmployeeId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::bad_request(format!("Invalid path: {}", e)))?;

        let id = parse_employee_id(&raw)?;
        tracing::Span::current().record("employee_id", raw.as_str());

        Ok(EmployeeId(id))
    }
}

pub fn parse_employee_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw)
        .map_err(|_| AppError::bad_request(format!("Invalid employee id: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_24_hex_characters() {
        let id = parse_employee_id("65f0c0ffee0000000000beef").unwrap();
        assert_eq!(id.to_hex(), "65f0c0ffee0000000000beef");
    }

    #[test]
    fn rejects_wrong_length_and_non_hex() {
        for raw in ["", "123", "65f0c0ffee0000000000beefaa", "zzf0c0ffee0000000000beef"] {
            assert!(parse_employee_id(raw).is_err(), "{raw} should be rejected");
        }
    }
}

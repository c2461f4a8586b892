//! Customer Routes
//!
//! - POST /customers - Validate and store a customer

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::booking::Customer;
use crate::form::FormRecord;

/// POST /customers
///
/// Applies the customer form's rules again; on success the stored record,
/// including its new id, is returned.
pub async fn create_customer(
    State(state): State<Arc<AppState>>,
    Json(customer): Json<Customer>,
) -> ApiResult<(StatusCode, Json<Customer>)> {
    let report = state
        .customer_validator
        .validate_all(|field| customer.field(field).to_string());

    if !report.is_valid() {
        return Err(ApiError::Validation(report.messages()));
    }

    let saved = state.store.add_customer(customer).await;
    tracing::info!(customer_id = ?saved.id, "Customer created");

    Ok((StatusCode::CREATED, Json(saved)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn state() -> Arc<AppState> {
        Arc::new(AppState::new(&Config::default()).unwrap())
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let state = state();
        let (status, Json(saved)) = create_customer(
            State(Arc::clone(&state)),
            Json(Customer::new("Ashley", "Smith", "1234567890")),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(saved.id, Some(crate::booking::RecordId::Number(1)));
        assert_eq!(state.store.customer_count().await, 1);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_customer() {
        let state = state();
        let err = create_customer(
            State(Arc::clone(&state)),
            Json(Customer::new("", "Smith", "12ab")),
        )
        .await
        .unwrap_err();

        match err {
            ApiError::Validation(messages) => {
                assert_eq!(messages["firstName"], "First name is required");
                assert_eq!(messages["phoneNumber"], "Phone number must contain only digits");
                assert!(!messages.contains_key("lastName"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(state.store.customer_count().await, 0);
    }
}

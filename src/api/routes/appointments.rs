//! Appointment Routes
//!
//! - POST /appointments - Book an appointment for a stored customer
//! - GET /appointments/:from-:to - Appointments in a time range, customers embedded

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Local;
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::booking::{Appointment, ScheduledAppointment};
use crate::form::FormRecord;

/// POST /appointments
pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    Json(appointment): Json<Appointment>,
) -> ApiResult<(StatusCode, Json<Appointment>)> {
    let report = state
        .appointment_validator
        .validate_all(|field| appointment.field(field).to_string());

    if !report.is_valid() {
        return Err(ApiError::Validation(report.messages()));
    }

    if appointment.starts_at.is_none() {
        return Err(ApiError::BadRequest("startsAt is required".to_string()));
    }

    let customer_id = appointment
        .customer
        .clone()
        .ok_or_else(|| ApiError::BadRequest("customer is required".to_string()))?;

    if state.store.customer(&customer_id).await.is_none() {
        return Err(ApiError::NotFound(format!("Customer {}", customer_id)));
    }

    let saved = state
        .store
        .add_appointment(appointment, &state.salon, Local::now())
        .await?;
    tracing::info!(
        appointment_id = ?saved.id,
        customer_id = %customer_id,
        starts_at = ?saved.starts_at,
        "Appointment booked"
    );

    Ok((StatusCode::CREATED, Json(saved)))
}

/// GET /appointments/:from-:to
///
/// Both bounds are epoch milliseconds and inclusive.
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    Path(range): Path<String>,
) -> ApiResult<Json<Vec<ScheduledAppointment>>> {
    let (from, to) = parse_range(&range)?;
    Ok(Json(state.store.appointments_between(from, to).await))
}

/// Either bound may be negative, so the separator is the first `-` that
/// follows a digit.
fn parse_range(range: &str) -> ApiResult<(i64, i64)> {
    let invalid = || ApiError::BadRequest(format!("Invalid range '{}', expected <from>-<to>", range));

    let split = range
        .char_indices()
        .skip(1)
        .find(|&(i, c)| c == '-' && range[..i].ends_with(|p: char| p.is_ascii_digit()))
        .map(|(i, _)| i)
        .ok_or_else(invalid)?;

    let from: i64 = range[..split].parse().map_err(|_| invalid())?;
    let to: i64 = range[split + 1..].parse().map_err(|_| invalid())?;

    if from > to {
        return Err(invalid());
    }
    Ok((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::schedule::local_millis;
    use crate::booking::{Customer, RecordId};
    use crate::config::Config;
    use chrono::Days;

    async fn state_with_customer() -> (Arc<AppState>, RecordId) {
        let state = Arc::new(AppState::new(&Config::default()).unwrap());
        let customer = state
            .store
            .add_customer(Customer::new("Ashley", "Smith", "1234567890"))
            .await;
        let id = customer.id.unwrap();
        (state, id)
    }

    /// 10:00 tomorrow, inside the default opening hours
    fn tomorrow_at_ten() -> i64 {
        let tomorrow = Local::now().date_naive().checked_add_days(Days::new(1)).unwrap();
        local_millis(tomorrow, 10, 0).unwrap()
    }

    fn booking(customer: RecordId) -> Appointment {
        Appointment {
            service: "Cut".to_string(),
            stylist: "Jo".to_string(),
            starts_at: Some(tomorrow_at_ten()),
            ..Appointment::for_customer(customer)
        }
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("100-200").unwrap(), (100, 200));
        assert!(parse_range("100").is_err());
        assert!(parse_range("a-b").is_err());
        assert!(parse_range("200-100").is_err());
        assert!(parse_range("-").is_err());
        assert!(parse_range("100-").is_err());
    }

    #[test]
    fn test_parse_range_before_epoch() {
        assert_eq!(parse_range("-86400000--1").unwrap(), (-86_400_000, -1));
        assert_eq!(parse_range("-3600000-3600000").unwrap(), (-3_600_000, 3_600_000));
        assert!(parse_range("--1-5").is_err());
    }

    #[tokio::test]
    async fn test_create_appointment() {
        let (state, id) = state_with_customer().await;

        let (status, Json(saved)) =
            create_appointment(State(Arc::clone(&state)), Json(booking(id)))
                .await
                .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(saved.id, Some(RecordId::Number(1)));
        assert_eq!(state.store.appointments().await.len(), 1);
    }

    #[tokio::test]
    async fn test_create_requires_service() {
        let (state, id) = state_with_customer().await;
        let appointment = Appointment {
            service: String::new(),
            ..booking(id)
        };

        let err = create_appointment(State(state), Json(appointment))
            .await
            .unwrap_err();

        match err {
            ApiError::Validation(messages) => {
                assert_eq!(messages["service"], "Service is required");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_requires_start_time() {
        let (state, id) = state_with_customer().await;
        let appointment = Appointment {
            starts_at: None,
            ..booking(id)
        };

        let err = create_appointment(State(state), Json(appointment))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_customer() {
        let (state, id) = state_with_customer().await;

        let unknown = RecordId::Number(id.as_number().unwrap() + 1);
        let err = create_appointment(State(Arc::clone(&state)), Json(booking(unknown)))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err = create_appointment(State(state), Json(booking(RecordId::Text("c-1".to_string()))))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_appointments_in_range() {
        let (state, id) = state_with_customer().await;
        create_appointment(State(Arc::clone(&state)), Json(booking(id)))
            .await
            .unwrap();

        let ten = tomorrow_at_ten();
        let Json(day) = list_appointments(
            State(Arc::clone(&state)),
            Path(format!("{}-{}", ten - 1_000, ten + 1_000)),
        )
        .await
        .unwrap();
        assert_eq!(day.len(), 1);
        assert_eq!(day[0].customer.first_name, "Ashley");

        let Json(later) = list_appointments(State(state), Path(format!("{}-{}", ten + 1, ten + 5_000)))
            .await
            .unwrap();
        assert!(later.is_empty());
    }
}

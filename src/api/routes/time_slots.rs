//! Time Slot Routes
//!
//! - GET /availableTimeSlots - Free 30-minute slots for the coming week

use axum::{extract::State, Json};
use chrono::Local;
use std::sync::Arc;

use crate::api::state::AppState;
use crate::booking::schedule::available_time_slots;
use crate::booking::AvailableTimeSlot;

/// GET /availableTimeSlots
pub async fn available(State(state): State<Arc<AppState>>) -> Json<Vec<AvailableTimeSlot>> {
    let now = Local::now();
    let booked = state.store.appointments().await;

    let slots = available_time_slots(
        &state.salon,
        now.date_naive(),
        &booked,
        now.timestamp_millis(),
    );
    tracing::debug!(count = slots.len(), "Computed available time slots");

    Json(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::schedule::local_millis;
    use crate::booking::{Appointment, Customer};
    use crate::config::Config;
    use chrono::Days;

    #[tokio::test]
    async fn test_booked_stylist_not_offered() {
        let state = Arc::new(AppState::new(&Config::default()).unwrap());
        let customer = state
            .store
            .add_customer(Customer::new("Ashley", "Smith", "1234567890"))
            .await;

        let tomorrow = Local::now().date_naive().checked_add_days(Days::new(1)).unwrap();
        let starts_at = local_millis(tomorrow, 10, 0).unwrap();
        let booking = Appointment {
            service: "Cut".to_string(),
            stylist: "Jo".to_string(),
            starts_at: Some(starts_at),
            customer: customer.id,
            ..Appointment::default()
        };
        state
            .store
            .add_appointment(booking, &state.salon, Local::now())
            .await
            .unwrap();

        let Json(slots) = available(State(state)).await;
        let slot = slots.iter().find(|s| s.starts_at == starts_at).unwrap();

        assert!(!slot.offers("Jo"));
        assert!(slot.offers("Ashley"));
    }
}

//! In-memory record directory for the development server

use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::error::{ApiError, ApiResult};
use crate::booking::schedule::{available_time_slots, is_slot_start};
use crate::booking::{Appointment, Customer, RecordId, ScheduledAppointment};
use crate::config::SalonConfig;

/// Customers and appointments, lost on restart
pub struct Directory {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    customers: BTreeMap<u64, Customer>,
    appointments: Vec<Appointment>,
    next_customer_id: u64,
    next_appointment_id: u64,
}

impl Inner {
    fn customer(&self, id: &RecordId) -> Option<&Customer> {
        id.as_number().and_then(|n| self.customers.get(&n))
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}

impl Directory {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Store a customer under a fresh id
    pub async fn add_customer(&self, mut customer: Customer) -> Customer {
        let mut inner = self.inner.write().await;
        inner.next_customer_id += 1;
        let id = inner.next_customer_id;

        customer.id = Some(RecordId::Number(id));
        inner.customers.insert(id, customer.clone());
        customer
    }

    /// Ids handed out by this directory are numeric; any other id is unknown
    pub async fn customer(&self, id: &RecordId) -> Option<Customer> {
        self.inner.read().await.customer(id).cloned()
    }

    pub async fn customer_count(&self) -> usize {
        self.inner.read().await.customers.len()
    }

    /// Store an appointment in a slot currently offered for its stylist.
    ///
    /// Uses the same occupancy rule as the slot listing: a booking without a
    /// stylist needs one free stylist and then holds the whole slot.
    pub async fn add_appointment(
        &self,
        mut appointment: Appointment,
        salon: &SalonConfig,
        now: DateTime<Local>,
    ) -> ApiResult<Appointment> {
        let starts_at = appointment
            .starts_at
            .ok_or_else(|| ApiError::BadRequest("startsAt is required".to_string()))?;

        let mut inner = self.inner.write().await;
        let today = now.date_naive();
        let not_before = now.timestamp_millis();

        let slots = available_time_slots(salon, today, &inner.appointments, not_before);
        let Some(slot) = slots.iter().find(|s| s.starts_at == starts_at) else {
            return Err(if is_slot_start(salon, today, not_before, starts_at) {
                ApiError::Conflict("No stylist is free at that time".to_string())
            } else {
                ApiError::BadRequest(format!("{} is not an offered time slot", starts_at))
            });
        };

        let stylist = appointment.stylist.as_str();
        if !slot.offers(stylist) {
            return Err(if salon.stylists.iter().any(|s| s == stylist) {
                ApiError::Conflict(format!("{} is already booked at that time", stylist))
            } else {
                ApiError::BadRequest(format!("Unknown stylist: {}", stylist))
            });
        }

        inner.next_appointment_id += 1;
        appointment.id = Some(RecordId::Number(inner.next_appointment_id));
        inner.appointments.push(appointment.clone());
        Ok(appointment)
    }

    /// Every stored appointment
    pub async fn appointments(&self) -> Vec<Appointment> {
        self.inner.read().await.appointments.clone()
    }

    /// Appointments starting within `[from, to]`, customer embedded, by start time
    pub async fn appointments_between(&self, from: i64, to: i64) -> Vec<ScheduledAppointment> {
        let inner = self.inner.read().await;

        let mut scheduled: Vec<ScheduledAppointment> = inner
            .appointments
            .iter()
            .filter_map(|a| {
                let starts_at = a.starts_at.filter(|t| (from..=to).contains(t))?;
                let customer = a
                    .customer
                    .as_ref()
                    .and_then(|id| inner.customer(id).cloned())
                    .unwrap_or_default();

                Some(ScheduledAppointment {
                    starts_at,
                    customer,
                    service: a.service.clone(),
                    stylist: a.stylist.clone(),
                    notes: a.notes.clone(),
                })
            })
            .collect();

        scheduled.sort_by_key(|a| a.starts_at);
        scheduled
    }
}

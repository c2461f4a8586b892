//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use super::store::Directory;
use crate::booking::{Appointment, AppointmentField, Customer, CustomerField};
use crate::config::{Config, ConfigError, SalonConfig};
use crate::form::{FormRecord, Validator};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// In-memory customers and appointments
    pub store: Arc<Directory>,
    /// Same rules the customer form applies client-side
    pub customer_validator: Arc<Validator<CustomerField>>,
    pub appointment_validator: Arc<Validator<AppointmentField>>,
    /// Opening hours and stylists used to compute free slots
    pub salon: Arc<SalonConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            store: Arc::new(Directory::new()),
            customer_validator: Arc::new(Customer::validator(&config.validation)?),
            appointment_validator: Arc::new(Appointment::validator(&config.validation)?),
            salon: Arc::new(config.salon.clone()),
            start_time: Instant::now(),
        })
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

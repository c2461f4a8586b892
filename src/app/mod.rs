//! Booking App
//!
//! Building blocks of the three views and the flow between them:
//!
//! ```text
//! DayView --[Add customer and appointment]--> AddCustomer
//! AddCustomer --[customer saved]--> AddAppointment (customer = saved id)
//! AddAppointment --[appointment saved]--> DayView
//! ```
//!
//! [`AppContext`] makes the forms and loads what each view shows; the
//! `appointments-ui` crate draws the views and routes between them.

pub mod appointment_form;
pub mod day_view;

pub use appointment_form::{load_time_slots, AppointmentForm, TIME_SLOTS_PATH};
pub use day_view::{day_bounds, day_path, load_day, AppointmentsDayView, NO_APPOINTMENTS_MESSAGE};

use chrono::{Local, NaiveDate};
use std::sync::Arc;

use crate::booking::{
    Appointment, AppointmentField, AvailableTimeSlot, Customer, CustomerField, RecordId,
};
use crate::client::Transport;
use crate::config::{Config, ConfigError, SalonConfig};
use crate::form::{Form, FormRecord, SubmissionController, Validator};

pub const ADD_CUSTOMER_AND_APPOINTMENT: &str = "Add customer and appointment";

/// Everything the views share: salon settings, validators and the
/// controller every form submits through
#[derive(Clone)]
pub struct AppContext {
    salon: Arc<SalonConfig>,
    controller: SubmissionController,
    customer_validator: Validator<CustomerField>,
    appointment_validator: Validator<AppointmentField>,
    today: NaiveDate,
}

impl AppContext {
    pub fn new(config: &Config, transport: Arc<dyn Transport>) -> Result<Self, ConfigError> {
        Ok(Self {
            salon: Arc::new(config.salon.clone()),
            controller: SubmissionController::new(transport),
            customer_validator: Customer::validator(&config.validation)?,
            appointment_validator: Appointment::validator(&config.validation)?,
            today: Local::now().date_naive(),
        })
    }

    /// Builder method: the day shown by the day view
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn controller(&self) -> &SubmissionController {
        &self.controller
    }

    fn transport(&self) -> &dyn Transport {
        self.controller.transport().as_ref()
    }

    /// Blank customer form
    pub fn customer_form(&self) -> Form<Customer> {
        Form::new(
            Customer::default(),
            self.customer_validator.clone(),
            self.controller.clone(),
        )
    }

    /// Blank appointment form for a saved customer
    pub fn appointment_form(&self, customer: Option<RecordId>) -> AppointmentForm {
        let original = Appointment {
            customer,
            ..Appointment::default()
        };

        AppointmentForm::new(
            original,
            self.appointment_validator.clone(),
            &self.salon,
            self.controller.clone(),
        )
    }

    /// Bookable slots; empty when they cannot be loaded
    pub async fn time_slots(&self) -> Vec<AvailableTimeSlot> {
        match load_time_slots(self.transport()).await {
            Ok(slots) => slots,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load available time slots");
                Vec::new()
            }
        }
    }

    /// Today's appointments; an empty day when they cannot be loaded
    pub async fn day(&self) -> AppointmentsDayView {
        match load_day(self.transport(), self.today).await {
            Ok(view) => view,
            Err(e) => {
                tracing::warn!(error = %e, date = %self.today, "Failed to load appointments");
                AppointmentsDayView::default()
            }
        }
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("today", &self.today)
            .finish_non_exhaustive()
    }
}

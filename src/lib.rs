//! # Appointments
//!
//! Customer and appointment booking front end: editable forms with
//! per-field validation, accessible error display, and submission to a
//! REST backend.
//!
//! ## Modules
//!
//! - [`form`]: Form state, validation, presentation models and submission
//! - [`booking`]: Customer and appointment records, salon schedule
//! - [`client`]: Transport seam, HTTP client and test stub
//! - [`app`]: Day view, appointment form and the context the views share
//! - [`api`]: In-memory development server with Axum
//!
//! The views themselves are Leptos components in the `appointments-ui`
//! crate of this workspace.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use appointments::booking::{Customer, CustomerField};
//! use appointments::client::HttpTransport;
//! use appointments::config::Config;
//! use appointments::form::{Form, FormRecord, SubmissionController, SubmissionOutcome};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let transport = Arc::new(HttpTransport::new(&config.client)?);
//!
//!     let mut form = Form::new(
//!         Customer::default(),
//!         Customer::validator(&config.validation)?,
//!         SubmissionController::new(transport),
//!     );
//!
//!     form.change(CustomerField::FirstName, "Ashley");
//!     form.change(CustomerField::LastName, "Smith");
//!     form.change(CustomerField::PhoneNumber, "1234567890");
//!
//!     if let SubmissionOutcome::Saved(customer) = form.submit().await {
//!         println!("Saved customer {:?}", customer.id);
//!     } else {
//!         for field in form.view().fields {
//!             println!("{}: {}", field.label, field.error.text());
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod app;
pub mod booking;
pub mod client;
pub mod config;
pub mod form;
pub mod logging;

// Re-export top-level types for convenience
pub use form::{
    Editable, Form, FormField, FormRecord, FormState, FormStatus, FormView, SubmissionController,
    SubmissionOutcome, ValidationResult, Validator,
};

pub use booking::{
    Appointment, AvailableTimeSlot, Customer, CustomerField, RecordId, ScheduledAppointment,
};

pub use client::{HttpTransport, Request, Response, StubTransport, Transport, TransportError};

pub use app::{AppContext, AppointmentForm, AppointmentsDayView};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig};

//! UI Components
//!
//! One component per view of the booking app.

pub mod appointment_form;
pub mod customer_form;
pub mod day_view;
pub mod form;

pub use appointment_form::AppointmentForm;
pub use customer_form::CustomerForm;
pub use day_view::AppointmentsDayView;

//! Appointments UI
//!
//! Leptos views of the booking app: the customer form, the appointment form
//! with its time-slot picker, the appointments day view, and the [`App`]
//! that routes between them. Form state, validation and submission live in
//! the `appointments` crate; these components only draw it and forward DOM
//! events to it.
//!
//! Views are rendered on the server (`leptos` with `ssr`), so every
//! component can be checked as HTML in a plain test.

pub mod app;
pub mod components;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use app::App;
pub use components::{AppointmentForm, AppointmentsDayView, CustomerForm};
pub use state::{BookingState, Screen};

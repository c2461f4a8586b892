//! State Management
//!
//! Reactive state shared by the booking app's views.

pub mod booking;

pub use booking::{BookingState, Screen};

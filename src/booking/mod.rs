//! Booking domain records
//!
//! - [`Customer`]: edited by the customer form, posted to `/customers`
//! - [`Appointment`]: edited by the appointment form, posted to `/appointments`
//! - [`ScheduledAppointment`]: a day-view entry with its customer embedded
//! - [`AvailableTimeSlot`]: a bookable slot offered by the server
//! - [`RecordId`]: server-assigned id, numeric or text

mod appointment;
mod customer;
mod id;
pub mod schedule;

pub use appointment::{
    format_time_of_day, Appointment, AppointmentField, AvailableTimeSlot, ScheduledAppointment,
};
pub use customer::{Customer, CustomerField};
pub use id::RecordId;

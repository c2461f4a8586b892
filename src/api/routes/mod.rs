//! API Routes
//!
//! Route handlers organized by resource.

pub mod appointments;
pub mod customers;
pub mod health;
pub mod time_slots;

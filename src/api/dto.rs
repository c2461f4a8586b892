//! Data Transfer Objects
//!
//! Response types for endpoints that do not return a booking record directly.
//! Customers and appointments travel as their `booking` types.

use serde::{Deserialize, Serialize};

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: healthy
    pub status: String,
    /// Number of stored customers
    pub customers: usize,
    /// Number of stored appointments
    pub appointments: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}

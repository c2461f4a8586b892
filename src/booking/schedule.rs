//! Salon schedule: which half-hour slots are bookable and by whom
//!
//! The development server answers `GET /availableTimeSlots` and checks
//! `POST /appointments` with the same occupancy rule, so a slot it offers
//! can always be booked and a booking it accepts was always offered.

use chrono::{Days, Local, NaiveDate, TimeZone};

use super::{Appointment, AvailableTimeSlot};
use crate::config::SalonConfig;

/// Number of days offered, starting today
pub const BOOKING_WINDOW_DAYS: u64 = 7;

const SLOT_MINUTES: [u32; 2] = [0, 30];

impl Appointment {
    /// Whether this booking holds `stylist` at `starts_at`. A booking
    /// without a stylist holds every stylist of its slot.
    pub fn holds(&self, starts_at: i64, stylist: &str) -> bool {
        self.starts_at == Some(starts_at) && (self.stylist.is_empty() || self.stylist == stylist)
    }
}

/// Stylists of the salon not held by any booking at `starts_at`
pub fn free_stylists(salon: &SalonConfig, booked: &[Appointment], starts_at: i64) -> Vec<String> {
    salon
        .stylists
        .iter()
        .filter(|stylist| !booked.iter().any(|a| a.holds(starts_at, stylist)))
        .cloned()
        .collect()
}

/// Every half hour from opening until closing for the booking window.
///
/// A slot lists its free stylists. Slots that start before `not_before`
/// or have no stylist left are dropped.
pub fn available_time_slots(
    salon: &SalonConfig,
    today: NaiveDate,
    booked: &[Appointment],
    not_before: i64,
) -> Vec<AvailableTimeSlot> {
    slot_starts(salon, today, not_before)
        .filter_map(|starts_at| {
            let stylists = free_stylists(salon, booked, starts_at);
            (!stylists.is_empty()).then_some(AvailableTimeSlot { starts_at, stylists })
        })
        .collect()
}

/// Whether `starts_at` is a slot start of the window, booked or not
pub fn is_slot_start(salon: &SalonConfig, today: NaiveDate, not_before: i64, starts_at: i64) -> bool {
    slot_starts(salon, today, not_before).any(|t| t == starts_at)
}

fn slot_starts(salon: &SalonConfig, today: NaiveDate, not_before: i64) -> impl Iterator<Item = i64> {
    let (opens_at, closes_at) = (salon.opens_at, salon.closes_at);

    (0..BOOKING_WINDOW_DAYS)
        .map_while(move |offset| today.checked_add_days(Days::new(offset)))
        .flat_map(move |day| {
            (opens_at..closes_at).flat_map(move |hour| {
                SLOT_MINUTES
                    .into_iter()
                    .filter_map(move |minute| local_millis(day, hour, minute))
            })
        })
        .filter(move |&starts_at| starts_at >= not_before)
}

/// Epoch milliseconds of a local wall-clock time
pub fn local_millis(day: NaiveDate, hour: u32, minute: u32) -> Option<i64> {
    let naive = day.and_hms_opt(hour, minute, 0)?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp_millis())
}

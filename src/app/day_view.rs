//! Appointments day view and its loader

use chrono::{Days, Local, NaiveDate, TimeZone};

use crate::booking::ScheduledAppointment;
use crate::client::{get_json, Transport, TransportError};

pub const NO_APPOINTMENTS_MESSAGE: &str = "There are no appointments scheduled for today.";

/// One day's appointments with a selected entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentsDayView {
    appointments: Vec<ScheduledAppointment>,
    selected: usize,
}

impl AppointmentsDayView {
    /// Appointments are ordered by start time; the first is selected
    pub fn new(mut appointments: Vec<ScheduledAppointment>) -> Self {
        appointments.sort_by_key(|a| a.starts_at);
        Self {
            appointments,
            selected: 0,
        }
    }

    pub fn appointments(&self) -> &[ScheduledAppointment] {
        &self.appointments
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    /// Select the appointment at `index`; out-of-range indexes are ignored
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.appointments.len() {
            self.selected = index;
            true
        } else {
            false
        }
    }

    pub fn selected(&self) -> Option<&ScheduledAppointment> {
        self.appointments.get(self.selected)
    }

    pub fn is_selected(&self, index: usize) -> bool {
        index == self.selected && index < self.appointments.len()
    }
}

/// First and last millisecond of a local calendar day
pub fn day_bounds(date: NaiveDate) -> Option<(i64, i64)> {
    let start = Local
        .from_local_datetime(&date.and_hms_opt(0, 0, 0)?)
        .earliest()?;
    let next = date.checked_add_days(Days::new(1))?;
    let end = Local
        .from_local_datetime(&next.and_hms_opt(0, 0, 0)?)
        .earliest()?;

    Some((start.timestamp_millis(), end.timestamp_millis() - 1))
}

/// Resource path listing the appointments of one day
pub fn day_path(date: NaiveDate) -> Result<String, TransportError> {
    let (from, to) = day_bounds(date)
        .ok_or_else(|| TransportError::InvalidUrl(format!("no local midnight on {}", date)))?;
    Ok(format!("/appointments/{}-{}", from, to))
}

/// `GET /appointments/<from>-<to>` for one day
pub async fn load_day(
    transport: &dyn Transport,
    date: NaiveDate,
) -> Result<AppointmentsDayView, TransportError> {
    let path = day_path(date)?;
    let appointments: Vec<ScheduledAppointment> = get_json(transport, &path).await?;

    tracing::debug!(date = %date, count = appointments.len(), "Loaded day view");
    Ok(AppointmentsDayView::new(appointments))
}

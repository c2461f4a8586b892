//! Appointment records

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

use super::{Customer, RecordId};
use crate::config::{ConfigError, ValidationConfig};
use crate::form::{FormField, FormRecord, Rule, Validator};

/// An appointment as booked by the appointment form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub stylist: String,
    /// Start time, epoch milliseconds
    #[serde(default)]
    pub starts_at: Option<i64>,
    /// Id of the customer the appointment is for
    #[serde(default)]
    pub customer: Option<RecordId>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

impl Appointment {
    /// Blank appointment for an existing customer
    pub fn for_customer(customer: impl Into<RecordId>) -> Self {
        Self {
            customer: Some(customer.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AppointmentField {
    Service,
    Stylist,
}

impl FormField for AppointmentField {
    const ALL: &'static [Self] = &[AppointmentField::Service, AppointmentField::Stylist];

    fn name(self) -> &'static str {
        match self {
            AppointmentField::Service => "service",
            AppointmentField::Stylist => "stylist",
        }
    }

    fn label(self) -> &'static str {
        match self {
            AppointmentField::Service => "Salon service",
            AppointmentField::Stylist => "Stylist",
        }
    }
}

impl FormRecord for Appointment {
    type Field = AppointmentField;

    const RESOURCE: &'static str = "/appointments";
    const FORM_ID: &'static str = "appointment";

    fn field(&self, field: AppointmentField) -> &str {
        match field {
            AppointmentField::Service => &self.service,
            AppointmentField::Stylist => &self.stylist,
        }
    }

    fn field_mut(&mut self, field: AppointmentField) -> &mut String {
        match field {
            AppointmentField::Service => &mut self.service,
            AppointmentField::Stylist => &mut self.stylist,
        }
    }

    fn validator(_config: &ValidationConfig) -> Result<Validator<AppointmentField>, ConfigError> {
        Ok(Validator::new().rule(AppointmentField::Service, Rule::required("Service is required")))
    }
}

/// An appointment as listed in the day view, with its customer embedded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledAppointment {
    pub starts_at: i64,
    #[serde(default)]
    pub customer: Customer,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub stylist: String,
    #[serde(default)]
    pub notes: String,
}

impl ScheduledAppointment {
    /// Local start time as `HH:MM`
    pub fn time_of_day(&self) -> String {
        format_time_of_day(self.starts_at)
    }
}

/// A bookable slot offered by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableTimeSlot {
    pub starts_at: i64,
    /// Stylists free in this slot; empty means any
    #[serde(default)]
    pub stylists: Vec<String>,
}

impl AvailableTimeSlot {
    pub fn offers(&self, stylist: &str) -> bool {
        stylist.is_empty() || self.stylists.is_empty() || self.stylists.iter().any(|s| s == stylist)
    }

    /// Local weekday, date and time, e.g. `Mon 19 09:30`
    pub fn label(&self) -> String {
        Local
            .timestamp_millis_opt(self.starts_at)
            .single()
            .map(|dt| dt.format("%a %d %H:%M").to_string())
            .unwrap_or_default()
    }
}

/// Format epoch milliseconds as local `HH:MM`
pub fn format_time_of_day(millis: i64) -> String {
    Local
        .timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_millis(hour: u32, minute: u32) -> i64 {
        Local
            .with_ymd_and_hms(2026, 10, 19, hour, minute, 0)
            .single()
            .unwrap()
            .timestamp_millis()
    }

    #[test]
    fn test_appointment_body_shape() {
        let appointment = Appointment {
            service: "Cut".to_string(),
            stylist: "Jo".to_string(),
            starts_at: Some(1_700_000_000_000),
            ..Appointment::for_customer(123_u64)
        };

        assert_eq!(
            serde_json::to_value(&appointment).unwrap(),
            serde_json::json!({
                "service": "Cut",
                "stylist": "Jo",
                "startsAt": 1_700_000_000_000_i64,
                "customer": 123
            })
        );
    }

    #[test]
    fn test_service_required() {
        let validator = Appointment::validator(&ValidationConfig::default()).unwrap();
        assert_eq!(
            validator.validate(AppointmentField::Service, "").message(),
            Some("Service is required")
        );
        assert!(validator.validate(AppointmentField::Stylist, "").is_valid());
    }

    #[test]
    fn test_time_of_day() {
        let appointment = ScheduledAppointment {
            starts_at: local_millis(12, 0),
            customer: Customer::new("Ashley", "", ""),
            service: String::new(),
            stylist: String::new(),
            notes: String::new(),
        };
        assert_eq!(appointment.time_of_day(), "12:00");
        assert_eq!(format_time_of_day(local_millis(13, 30)), "13:30");
    }

    #[test]
    fn test_slot_offers_stylist() {
        let slot = AvailableTimeSlot {
            starts_at: 0,
            stylists: vec!["Ashley".to_string()],
        };
        assert!(slot.offers("Ashley"));
        assert!(slot.offers(""));
        assert!(!slot.offers("Jo"));
    }

    #[test]
    fn test_slot_label() {
        let slot = AvailableTimeSlot {
            starts_at: local_millis(9, 30),
            stylists: Vec::new(),
        };
        assert_eq!(slot.label(), "Mon 19 09:30");
    }

    #[test]
    fn test_text_customer_reference() {
        let appointment: Appointment =
            serde_json::from_str(r#"{"service": "Cut", "customer": "cus_9f2"}"#).unwrap();
        assert_eq!(appointment.customer, Some(RecordId::Text("cus_9f2".to_string())));
    }
}

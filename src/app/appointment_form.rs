//! Appointment form: service/stylist selects plus a time-slot picker
//!
//! The chosen start time is always one of the slots offered for the
//! chosen stylist. Changing the stylist, or reloading the slots, drops a
//! start time that is no longer offered.

use crate::booking::{Appointment, AppointmentField, AvailableTimeSlot};
use crate::client::{get_json, Transport, TransportError};
use crate::config::SalonConfig;
use crate::form::{
    Editable, Form, FormField, PendingSubmit, SubmissionController, SubmissionOutcome, UnknownField,
    Validator,
};

pub const TIME_SLOTS_PATH: &str = "/availableTimeSlots";

#[derive(Debug)]
pub struct AppointmentForm {
    form: Form<Appointment>,
    time_slots: Vec<AvailableTimeSlot>,
}

impl AppointmentForm {
    pub fn new(
        original: Appointment,
        validator: Validator<AppointmentField>,
        salon: &SalonConfig,
        controller: SubmissionController,
    ) -> Self {
        let mut form = Form::new(original, validator, controller);
        form.state_mut()
            .set_options(AppointmentField::Service, salon.services.clone());
        form.state_mut()
            .set_options(AppointmentField::Stylist, salon.stylists.clone());

        Self {
            form,
            time_slots: Vec::new(),
        }
    }

    pub fn set_time_slots(&mut self, mut slots: Vec<AvailableTimeSlot>) {
        slots.sort_by_key(|s| s.starts_at);
        self.time_slots = slots;
        self.drop_unoffered_start();
    }

    pub fn time_slots(&self) -> &[AvailableTimeSlot] {
        &self.time_slots
    }

    /// Slots offered for the currently chosen stylist
    pub fn visible_time_slots(&self) -> impl Iterator<Item = &AvailableTimeSlot> {
        let stylist = self.form.record().stylist.clone();
        self.time_slots.iter().filter(move |slot| slot.offers(&stylist))
    }

    /// Choose a start time among the slots visible for the chosen stylist
    pub fn select_time_slot(&mut self, starts_at: i64) -> bool {
        if self.visible_time_slots().any(|slot| slot.starts_at == starts_at) {
            self.form.state_mut().record_mut().starts_at = Some(starts_at);
            true
        } else {
            false
        }
    }

    /// Change event for a select box
    pub fn change(&mut self, field: AppointmentField, value: impl Into<String>) {
        self.form.change(field, value);
        if field == AppointmentField::Stylist {
            self.drop_unoffered_start();
        }
    }

    pub fn change_named(&mut self, name: &str, value: impl Into<String>) -> Result<(), UnknownField> {
        let field =
            AppointmentField::from_name(name).ok_or_else(|| UnknownField(name.to_string()))?;
        self.change(field, value);
        Ok(())
    }

    fn drop_unoffered_start(&mut self) {
        let Some(starts_at) = self.record().starts_at else {
            return;
        };

        if !self.visible_time_slots().any(|slot| slot.starts_at == starts_at) {
            tracing::debug!(
                starts_at,
                stylist = %self.record().stylist,
                "Chosen start time not offered any more"
            );
            self.form.state_mut().record_mut().starts_at = None;
        }
    }

    pub fn form(&self) -> &Form<Appointment> {
        &self.form
    }

    pub fn record(&self) -> &Appointment {
        self.form.record()
    }

    pub async fn submit(&mut self) -> SubmissionOutcome<Appointment> {
        self.form.submit().await
    }
}

impl Editable for AppointmentForm {
    type Record = Appointment;

    fn form(&self) -> &Form<Appointment> {
        &self.form
    }

    fn change_named(&mut self, name: &str, value: String) -> Result<(), UnknownField> {
        AppointmentForm::change_named(self, name, value)
    }

    fn blur_named(&mut self, name: &str) -> Result<(), UnknownField> {
        self.form.blur_named(name)
    }

    fn begin_submit(&mut self) -> Option<PendingSubmit<Appointment>> {
        self.form.begin_submit()
    }

    fn finish_submit(
        &mut self,
        result: Result<Appointment, TransportError>,
    ) -> SubmissionOutcome<Appointment> {
        self.form.finish_submit(result)
    }
}

/// `GET /availableTimeSlots`
pub async fn load_time_slots(
    transport: &dyn Transport,
) -> Result<Vec<AvailableTimeSlot>, TransportError> {
    get_json(transport, TIME_SLOTS_PATH).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{Response, StubTransport};
    use crate::config::ValidationConfig;
    use crate::form::FormRecord;
    use std::sync::Arc;

    fn appointment_form(transport: Arc<StubTransport>) -> AppointmentForm {
        AppointmentForm::new(
            Appointment::for_customer(123_u64),
            Appointment::validator(&ValidationConfig::default()).unwrap(),
            &SalonConfig::default(),
            SubmissionController::new(transport),
        )
    }

    fn slot(starts_at: i64, stylists: &[&str]) -> AvailableTimeSlot {
        AvailableTimeSlot {
            starts_at,
            stylists: stylists.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_service_and_stylist_are_selects() {
        let form = appointment_form(Arc::new(StubTransport::new()));
        let view = form.form().view();

        let service = view.field("service").unwrap();
        assert_eq!(service.input_type(), "select");
        assert!(service.options.as_ref().unwrap().contains(&"Cut & color".to_string()));
        let stylist = view.field("stylist").unwrap();
        assert!(stylist.options.as_ref().unwrap().contains(&"Sam".to_string()));
    }

    #[test]
    fn test_only_offered_slots_can_be_selected() {
        let mut form = appointment_form(Arc::new(StubTransport::new()));
        form.set_time_slots(vec![slot(2_000, &[]), slot(1_000, &[])]);

        assert!(!form.select_time_slot(3_000));
        assert!(form.select_time_slot(1_000));
        assert_eq!(form.record().starts_at, Some(1_000));
        assert_eq!(form.time_slots()[0].starts_at, 1_000);
    }

    #[test]
    fn test_slots_filtered_by_stylist() {
        let mut form = appointment_form(Arc::new(StubTransport::new()));
        form.set_time_slots(vec![slot(1_000, &["Ashley"]), slot(2_000, &["Jo"])]);

        form.change(AppointmentField::Stylist, "Jo");

        let visible: Vec<_> = form.visible_time_slots().map(|s| s.starts_at).collect();
        assert_eq!(visible, vec![2_000]);
    }

    #[test]
    fn test_slot_hidden_for_stylist_cannot_be_selected() {
        let mut form = appointment_form(Arc::new(StubTransport::new()));
        form.set_time_slots(vec![slot(1_000, &["Ashley"]), slot(2_000, &["Jo"])]);
        form.change(AppointmentField::Stylist, "Jo");

        assert!(!form.select_time_slot(1_000));
        assert_eq!(form.record().starts_at, None);
    }

    #[test]
    fn test_changing_stylist_drops_unoffered_start() {
        let mut form = appointment_form(Arc::new(StubTransport::new()));
        form.set_time_slots(vec![slot(1_000, &["Ashley"]), slot(2_000, &["Ashley", "Jo"])]);

        assert!(form.select_time_slot(1_000));
        form.change(AppointmentField::Stylist, "Jo");
        assert_eq!(form.record().starts_at, None);

        assert!(form.select_time_slot(2_000));
        form.change_named("stylist", "Ashley").unwrap();
        assert_eq!(form.record().starts_at, Some(2_000));
    }

    #[test]
    fn test_changing_service_keeps_start() {
        let mut form = appointment_form(Arc::new(StubTransport::new()));
        form.set_time_slots(vec![slot(1_000, &["Ashley"])]);
        form.change(AppointmentField::Stylist, "Ashley");
        assert!(form.select_time_slot(1_000));

        Editable::change_named(&mut form, "service", "Cut".to_string()).unwrap();

        assert_eq!(form.record().starts_at, Some(1_000));
        assert_eq!(form.record().service, "Cut");
        assert!(form.change_named("startsAt", "1000").is_err());
    }

    #[test]
    fn test_reloaded_slots_drop_vanished_start() {
        let mut form = appointment_form(Arc::new(StubTransport::new()));
        form.set_time_slots(vec![slot(1_000, &[])]);
        assert!(form.select_time_slot(1_000));

        form.set_time_slots(vec![slot(2_000, &[])]);

        assert_eq!(form.record().starts_at, None);
    }

    #[tokio::test]
    async fn test_load_time_slots_request() {
        let transport = Arc::new(StubTransport::new());
        transport.push_response(Response::new(500, Vec::new()));

        assert!(load_time_slots(transport.as_ref()).await.is_err());
        assert_eq!(transport.last_request().unwrap().path, TIME_SLOTS_PATH);
    }

    #[tokio::test]
    async fn test_submit_posts_appointment_with_customer() {
        let transport = Arc::new(StubTransport::new());
        let mut form = appointment_form(Arc::clone(&transport));
        form.set_time_slots(vec![slot(1_000, &[])]);

        form.change(AppointmentField::Service, "Cut");
        form.select_time_slot(1_000);
        let outcome = form.submit().await;

        assert!(outcome.is_saved());
        let request = transport.last_request().unwrap();
        assert_eq!(request.path, "/appointments");
        let body: serde_json::Value = request.body_json().unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "service": "Cut",
                "stylist": "",
                "startsAt": 1_000,
                "customer": 123
            })
        );
    }

    #[tokio::test]
    async fn test_missing_service_blocks_submit() {
        let transport = Arc::new(StubTransport::new());
        let mut form = appointment_form(Arc::clone(&transport));

        let outcome = form.submit().await;

        assert_eq!(outcome, SubmissionOutcome::NotSubmitted);
        assert_eq!(transport.request_count(), 0);
        assert_eq!(
            form.form().view().error_container("serviceError").unwrap().text(),
            "Service is required"
        );
    }
}

//! Booking App State
//!
//! Reactive state behind the three screens, using Leptos signals.

use leptos::*;

use appointments::app::{AppContext, AppointmentForm, AppointmentsDayView};
use appointments::booking::{AvailableTimeSlot, Customer, RecordId};
use appointments::form::Form;

/// Which view the app shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    DayView,
    AddCustomer,
    AddAppointment,
}

/// Signals for every screen plus the context that builds their forms
#[derive(Clone, Copy)]
pub struct BookingState {
    pub screen: RwSignal<Screen>,
    pub day: RwSignal<AppointmentsDayView>,
    pub customer_form: RwSignal<Form<Customer>>,
    pub appointment_form: RwSignal<AppointmentForm>,
    context: StoredValue<AppContext>,
}

impl BookingState {
    /// Start on the day view showing `day`
    pub fn new(context: AppContext, day: AppointmentsDayView) -> Self {
        Self {
            screen: create_rw_signal(Screen::DayView),
            day: create_rw_signal(day),
            customer_form: create_rw_signal(context.customer_form()),
            appointment_form: create_rw_signal(context.appointment_form(None)),
            context: store_value(context),
        }
    }

    /// Menu action: a blank customer form replaces the day view
    pub fn begin_adding_customer_and_appointment(self) {
        let blank = self.context.with_value(AppContext::customer_form);
        self.customer_form.set(blank);
        self.screen.set(Screen::AddCustomer);
    }

    /// Show a blank appointment form for `customer`
    pub fn open_appointment_form(self, customer: Option<RecordId>) {
        let form = self.context.with_value(|context| context.appointment_form(customer));
        self.appointment_form.set(form);
        self.screen.set(Screen::AddAppointment);
    }

    pub fn set_time_slots(self, slots: Vec<AvailableTimeSlot>) {
        self.appointment_form.update(|form| form.set_time_slots(slots));
    }

    /// The customer form saved: book an appointment for that customer
    pub async fn customer_saved(self, customer: Customer) {
        if customer.id.is_none() {
            tracing::warn!(customer = %customer.full_name(), "Saved customer has no id");
        }

        let context = self.context.get_value();
        self.open_appointment_form(customer.id);
        self.set_time_slots(context.time_slots().await);
    }

    /// The appointment form saved: back to a freshly loaded day view
    pub async fn appointment_saved(self) {
        let context = self.context.get_value();
        self.screen.set(Screen::DayView);
        self.day.set(context.day().await);
    }
}

//! App Root Component
//!
//! Switches between the day view, the customer form and the appointment form.

use leptos::*;

use appointments::app::ADD_CUSTOMER_AND_APPOINTMENT;
use appointments::booking::{Appointment, Customer};

use crate::components::{AppointmentForm, AppointmentsDayView, CustomerForm};
use crate::state::{BookingState, Screen};

/// Root application component
#[component]
pub fn App(state: BookingState) -> impl IntoView {
    view! {
        <div id="app">
            {move || match state.screen.get() {
                Screen::DayView => view! {
                    <menu>
                        <li>
                            <button
                                type="button"
                                on:click=move |_| state.begin_adding_customer_and_appointment()
                            >
                                {ADD_CUSTOMER_AND_APPOINTMENT}
                            </button>
                        </li>
                    </menu>
                    <AppointmentsDayView day=state.day />
                }
                .into_view(),

                Screen::AddCustomer => view! {
                    <CustomerForm
                        form=state.customer_form
                        on_save=move |customer: Customer| spawn_local(state.customer_saved(customer))
                    />
                }
                .into_view(),

                Screen::AddAppointment => view! {
                    <AppointmentForm
                        form=state.appointment_form
                        on_save=move |_: Appointment| spawn_local(state.appointment_saved())
                    />
                }
                .into_view(),
            }}
        </div>
    }
}

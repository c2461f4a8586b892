//! Appointment Form Component
//!
//! Service and stylist selects plus a table of radio buttons, one per time
//! slot offered for the chosen stylist.

use leptos::*;

use appointments::app::AppointmentForm as AppointmentFormState;
use appointments::booking::{Appointment, AvailableTimeSlot};
use appointments::form::SubmissionOutcome;

use super::form::{record_form, submit};

pub const NO_TIME_SLOTS_MESSAGE: &str = "No time slots are available.";

/// Book-appointment form; `on_save` receives the stored appointment
#[component]
pub fn AppointmentForm(
    form: RwSignal<AppointmentFormState>,
    #[prop(into)] on_save: Callback<Appointment>,
) -> impl IntoView {
    let on_submit = Callback::new(move |()| {
        spawn_local(async move {
            if let SubmissionOutcome::Saved(appointment) = submit(form).await {
                on_save.call(appointment);
            }
        });
    });

    record_form(form, on_submit, view! { <TimeSlotTable form=form /> }.into_view())
}

#[component]
fn TimeSlotTable(form: RwSignal<AppointmentFormState>) -> impl IntoView {
    let slots = create_memo(move |_| {
        form.with(|f| f.visible_time_slots().cloned().collect::<Vec<_>>())
    });

    view! {
        <table id="timeSlots">
            <tbody>
                {move || {
                    let slots = slots.get();
                    if slots.is_empty() {
                        view! { <tr><td>{NO_TIME_SLOTS_MESSAGE}</td></tr> }.into_view()
                    } else {
                        slots
                            .into_iter()
                            .map(|slot| TimeSlotOption(TimeSlotOptionProps::builder().form(form).slot(slot).build()))
                            .collect_view()
                    }
                }}
            </tbody>
        </table>
    }
}

#[component]
fn TimeSlotOption(form: RwSignal<AppointmentFormState>, slot: AvailableTimeSlot) -> impl IntoView {
    let starts_at = slot.starts_at;
    let id = format!("startsAt-{}", starts_at);
    let chosen = move || form.with(|f| f.record().starts_at == Some(starts_at));

    view! {
        <tr>
            <td>
                <input
                    type="radio"
                    name="startsAt"
                    id=id.clone()
                    value=starts_at.to_string()
                    checked=chosen
                    prop:checked=chosen
                    on:change=move |_| {
                        form.update(|f| {
                            if !f.select_time_slot(starts_at) {
                                tracing::warn!(starts_at, "Time slot is no longer offered");
                            }
                        })
                    }
                />
                <label for=id>{slot.label()}</label>
            </td>
        </tr>
    }
}

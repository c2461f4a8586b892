//! Appointments Day View Component
//!
//! Start times of the day's appointments as buttons, with the details of
//! the selected one.

use leptos::*;

use appointments::app::{AppointmentsDayView as DaySchedule, NO_APPOINTMENTS_MESSAGE};
use appointments::booking::ScheduledAppointment;

#[component]
pub fn AppointmentsDayView(day: RwSignal<DaySchedule>) -> impl IntoView {
    let times = create_memo(move |_| {
        day.with(|d| {
            d.appointments()
                .iter()
                .map(ScheduledAppointment::time_of_day)
                .collect::<Vec<_>>()
        })
    });

    view! {
        <div id="appointmentsDayView">
            <ol>
                {move || {
                    times
                        .get()
                        .into_iter()
                        .enumerate()
                        .map(|(index, time)| view! {
                            <li>
                                <button
                                    type="button"
                                    class:toggled=move || day.with(|d| d.is_selected(index))
                                    on:click=move |_| day.update(|d| {
                                        d.select(index);
                                    })
                                >
                                    {time}
                                </button>
                            </li>
                        })
                        .collect_view()
                }}
            </ol>
            {move || match day.with(|d| d.selected().cloned()) {
                Some(appointment) => view! { <AppointmentDetails appointment=appointment /> }.into_view(),
                None => view! { <p>{NO_APPOINTMENTS_MESSAGE}</p> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn AppointmentDetails(appointment: ScheduledAppointment) -> impl IntoView {
    let heading = format!("Today's appointment at {}", appointment.time_of_day());
    let rows = [
        ("Customer", appointment.customer.full_name()),
        ("Phone number", appointment.customer.phone_number),
        ("Stylist", appointment.stylist),
        ("Service", appointment.service),
        ("Notes", appointment.notes),
    ];

    view! {
        <section id="appointmentDetails">
            <h3>{heading}</h3>
            <table>
                <tbody>
                    {rows
                        .into_iter()
                        .map(|(label, value)| view! {
                            <tr>
                                <th>{label}</th>
                                <td>{value}</td>
                            </tr>
                        })
                        .collect_view()}
                </tbody>
            </table>
        </section>
    }
}

//! Customer Form Component

use leptos::*;

use appointments::booking::Customer;
use appointments::form::{Form, SubmissionOutcome};

use super::form::{record_form, submit};

/// Add-customer form; `on_save` receives the customer as stored by the server
#[component]
pub fn CustomerForm(
    form: RwSignal<Form<Customer>>,
    #[prop(into)] on_save: Callback<Customer>,
) -> impl IntoView {
    let on_submit = Callback::new(move |()| {
        spawn_local(async move {
            if let SubmissionOutcome::Saved(customer) = submit(form).await {
                on_save.call(customer);
            }
        });
    });

    record_form(form, on_submit, ().into_view())
}

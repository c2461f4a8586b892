//! Form markup shared by the customer and appointment forms
//!
//! Every field gets a `<label for>`, an input (or a select when the field
//! has options) pointing at its error container through
//! `aria-describedby`, and the container itself. The containers and the
//! form alert are drawn in every status, empty when there is nothing to
//! report.

use leptos::*;

use appointments::form::{Editable, FieldView, FormView, SubmissionOutcome, UnknownField};

/// Draw an editable record as a `<form>`. `extra` goes after the fields.
pub fn record_form<E: Editable>(form: RwSignal<E>, on_submit: Callback<()>, extra: View) -> View {
    let model = create_memo(move |_| form.with(|f| f.form().view()));
    let FormView { id, fields, .. } = model.get_untracked();

    view! {
        <form
            id=id
            on:submit=move |ev| {
                ev.prevent_default();
                on_submit.call(());
            }
        >
            {fields.into_iter().map(|field| field_input(form, model, field)).collect_view()}
            {extra}
            <p role="alert">{move || model.with(|m| m.alert.text().to_string())}</p>
            <input
                type="submit"
                value=move || model.with(|m| m.submit_caption().to_string())
                disabled=move || model.with(FormView::is_submitting)
            />
        </form>
    }
    .into_view()
}

fn field_input<E: Editable>(form: RwSignal<E>, model: Memo<FormView>, field: FieldView) -> View {
    let name = store_value(field.name.clone());
    let current_value = move || {
        name.with_value(|n| model.with(|m| m.field(n).map(|f| f.value.clone())))
            .unwrap_or_default()
    };
    let message = move || {
        name.with_value(|n| model.with(|m| m.field(n).map(|f| f.error.text().to_string())))
            .unwrap_or_default()
    };

    let control = match field.options {
        None => view! {
            <input
                type="text"
                id=field.id.clone()
                name=field.name.clone()
                value=current_value
                prop:value=current_value
                aria-describedby=field.described_by.clone()
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    edit(form, name, move |f, n| f.change_named(n, value));
                }
                on:blur=move |_| edit(form, name, |f, n| f.blur_named(n))
            />
        }
        .into_view(),

        Some(options) => view! {
            <select
                id=field.id.clone()
                name=field.name.clone()
                prop:value=current_value
                aria-describedby=field.described_by.clone()
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    edit(form, name, move |f, n| f.change_named(n, value));
                }
                on:blur=move |_| edit(form, name, |f, n| f.blur_named(n))
            >
                <option value="" selected=move || current_value().is_empty()></option>
                {options
                    .into_iter()
                    .map(|option| {
                        let choice = option.clone();
                        view! {
                            <option value=option.clone() selected=move || current_value() == choice>
                                {option}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        }
        .into_view(),
    };

    view! {
        <label for=field.id>{field.label}</label>
        {control}
        <p id=field.error.id.unwrap_or_default() role="alert">{message}</p>
    }
    .into_view()
}

/// Apply one DOM event addressed by field name
fn edit<E: Editable>(
    form: RwSignal<E>,
    name: StoredValue<String>,
    event: impl FnOnce(&mut E, &str) -> Result<(), UnknownField>,
) {
    name.with_value(|n| {
        form.update(|f| {
            if let Err(e) = event(f, n) {
                tracing::warn!(error = %e, "Ignored form event");
            }
        })
    });
}

/// Validate, post and apply the response to the form in `form`.
///
/// The signal is only borrowed while the request is built and while the
/// response is applied, never across the await.
pub async fn submit<E: Editable>(form: RwSignal<E>) -> SubmissionOutcome<E::Record> {
    let Some(pending) = form.try_update(|f| f.begin_submit()).flatten() else {
        return SubmissionOutcome::NotSubmitted;
    };
    let Some(controller) = form.try_with_untracked(|f| f.form().controller().clone()) else {
        return SubmissionOutcome::Failed;
    };

    let result = controller.send(&pending).await;

    form.try_update(move |f| f.finish_submit(result))
        .unwrap_or_else(|| {
            tracing::debug!("Form closed before its save completed");
            SubmissionOutcome::Failed
        })
}

//! Form Engine
//!
//! Headless state for editing one record: field values, per-field
//! validation, the accessible error display and submission to the server.
//!
//! # Lifecycle
//!
//! ```text
//! Editing -> Validating -> Editing (errors shown)
//!                       -> Submitting -> Saved
//!                                     -> Failed (alert shown, still editable)
//! ```
//!
//! Validating is synchronous, so it is never observable between calls.
//!
//! # Example
//!
//! ```rust,ignore
//! use appointments::booking::{Customer, CustomerField};
//! use appointments::form::{Form, FormRecord, SubmissionController, SubmissionOutcome};
//!
//! let validator = Customer::validator(&config.validation)?;
//! let mut form = Form::new(Customer::default(), validator, controller)
//!     .on_save(|saved| println!("saved {:?}", saved.id));
//!
//! form.change(CustomerField::FirstName, "Ashley");
//! form.blur(CustomerField::FirstName);
//!
//! if let SubmissionOutcome::Saved(customer) = form.submit().await {
//!     // hand off to the next view
//! }
//! ```

pub mod render;
pub mod state;
pub mod submit;
pub mod validation;

pub use render::{Alert, FieldView, FormView, SAVE_FAILED_MESSAGE};
pub use state::{FormState, FormStatus, PendingSubmit};
pub use submit::{SubmissionController, SubmissionOutcome};
pub use validation::{Rule, ValidationReport, ValidationResult, Validator};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::hash::Hash;
use thiserror::Error;

use crate::client::TransportError;
use crate::config::{ConfigError, ValidationConfig};

/// One member of a record's closed set of editable fields
pub trait FormField: Copy + Eq + Ord + Hash + fmt::Debug + Send + Sync + 'static {
    /// Every field, in display order
    const ALL: &'static [Self];

    /// Wire and DOM name, e.g. `firstName`
    fn name(self) -> &'static str;

    /// Human-readable label
    fn label(self) -> &'static str;

    /// Id of the element holding this field's validation message
    fn error_id(self) -> String {
        format!("{}Error", self.name())
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.name() == name)
    }
}

/// A record that can be edited by a [`Form`] and posted to the server
pub trait FormRecord:
    Clone + Default + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    type Field: FormField;

    /// Resource path the record is posted to
    const RESOURCE: &'static str;

    /// Id of the rendered `<form>` element
    const FORM_ID: &'static str;

    /// Caption of the submit button
    const SUBMIT_LABEL: &'static str = "Add";

    fn field(&self, field: Self::Field) -> &str;

    fn field_mut(&mut self, field: Self::Field) -> &mut String;

    /// Rules for this record type under the given configuration
    fn validator(config: &ValidationConfig) -> Result<Validator<Self::Field>, ConfigError>;
}

/// A field name outside the record's declared set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown field: {0}")]
pub struct UnknownField(pub String);

type SaveCallback<R> = Box<dyn FnMut(R) + Send>;

/// A form instance: editable state plus the caller's save continuation
pub struct Form<R: FormRecord> {
    state: FormState<R>,
    controller: SubmissionController,
    on_save: Option<SaveCallback<R>>,
}

impl<R: FormRecord> Form<R> {
    /// Create a form seeded from `original`
    pub fn new(original: R, validator: Validator<R::Field>, controller: SubmissionController) -> Self {
        Self {
            state: FormState::new(original, validator),
            controller,
            on_save: None,
        }
    }

    /// Builder method: continuation invoked with the saved record
    pub fn on_save(mut self, callback: impl FnMut(R) + Send + 'static) -> Self {
        self.on_save = Some(Box::new(callback));
        self
    }

    pub fn state(&self) -> &FormState<R> {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut FormState<R> {
        &mut self.state
    }

    pub fn record(&self) -> &R {
        self.state.record()
    }

    pub fn controller(&self) -> &SubmissionController {
        &self.controller
    }

    /// Change event for one field
    pub fn change(&mut self, field: R::Field, value: impl Into<String>) {
        self.state.set_field(field, value);
    }

    /// Change event addressed by DOM name
    pub fn change_named(&mut self, name: &str, value: impl Into<String>) -> Result<(), UnknownField> {
        self.state.set_named(name, value)
    }

    /// Blur event for one field
    pub fn blur(&mut self, field: R::Field) {
        self.state.blur(field);
    }

    pub fn blur_named(&mut self, name: &str) -> Result<(), UnknownField> {
        self.state.blur_named(name)
    }

    /// Validate, post and hand the saved record to the continuation
    pub async fn submit(&mut self) -> SubmissionOutcome<R> {
        let outcome = self.controller.submit(&mut self.state).await;
        self.notify(&outcome);
        outcome
    }

    /// First half of a submit whose request is sent by the caller
    pub fn begin_submit(&mut self) -> Option<PendingSubmit<R>> {
        self.state.begin_submit()
    }

    /// Second half of a split submit: apply the response and notify
    pub fn finish_submit(&mut self, result: Result<R, TransportError>) -> SubmissionOutcome<R> {
        let outcome = self.state.finish_submit(result);
        self.notify(&outcome);
        outcome
    }

    fn notify(&mut self, outcome: &SubmissionOutcome<R>) {
        if let SubmissionOutcome::Saved(saved) = outcome {
            if let Some(callback) = self.on_save.as_mut() {
                callback(saved.clone());
            }
        }
    }

    pub fn view(&self) -> FormView {
        self.state.view()
    }
}

/// A [`Form`], possibly wrapped with extra state, driven by DOM events.
///
/// Event handlers cannot hold a borrow across the request, so submitting
/// goes through [`Editable::begin_submit`], the controller's `send`, then
/// [`Editable::finish_submit`].
pub trait Editable: 'static {
    type Record: FormRecord;

    fn form(&self) -> &Form<Self::Record>;

    fn change_named(&mut self, name: &str, value: String) -> Result<(), UnknownField>;

    fn blur_named(&mut self, name: &str) -> Result<(), UnknownField>;

    fn begin_submit(&mut self) -> Option<PendingSubmit<Self::Record>>;

    fn finish_submit(
        &mut self,
        result: Result<Self::Record, TransportError>,
    ) -> SubmissionOutcome<Self::Record>;
}

impl<R: FormRecord> Editable for Form<R> {
    type Record = R;

    fn form(&self) -> &Form<R> {
        self
    }

    fn change_named(&mut self, name: &str, value: String) -> Result<(), UnknownField> {
        Form::change_named(self, name, value)
    }

    fn blur_named(&mut self, name: &str) -> Result<(), UnknownField> {
        Form::blur_named(self, name)
    }

    fn begin_submit(&mut self) -> Option<PendingSubmit<R>> {
        Form::begin_submit(self)
    }

    fn finish_submit(&mut self, result: Result<R, TransportError>) -> SubmissionOutcome<R> {
        Form::finish_submit(self, result)
    }
}

impl<R: FormRecord> fmt::Debug for Form<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("state", &self.state)
            .field("has_on_save", &self.on_save.is_some())
            .finish()
    }
}

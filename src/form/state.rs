//! Form state
//!
//! Owned, mutable state for one form instance. Every UI event (change, blur,
//! submit) is a method call; the only I/O happens between
//! [`FormState::begin_submit`] and [`FormState::finish_submit`].

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::render::{Alert, FieldView, FormView, SAVE_FAILED_MESSAGE};
use super::submit::SubmissionOutcome;
use super::validation::{ValidationResult, Validator};
use super::{FormField, FormRecord, UnknownField};
use crate::client::TransportError;

/// Where the form is in its submit lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Editing,
    Submitting,
    Saved,
    /// Last save attempt failed; the generic alert is shown
    Failed,
}

/// A validated snapshot waiting to be sent
#[derive(Debug, Clone)]
pub struct PendingSubmit<R: FormRecord> {
    pub record: R,
}

pub struct FormState<R: FormRecord> {
    record: R,
    validator: Validator<R::Field>,
    /// Fields blurred at least once, or all fields after a submit attempt
    touched: BTreeSet<R::Field>,
    results: BTreeMap<R::Field, ValidationResult>,
    options: BTreeMap<R::Field, Vec<String>>,
    status: FormStatus,
    in_flight: usize,
}

impl<R: FormRecord> FormState<R> {
    pub fn new(original: R, validator: Validator<R::Field>) -> Self {
        Self {
            record: original,
            validator,
            touched: BTreeSet::new(),
            results: BTreeMap::new(),
            options: BTreeMap::new(),
            status: FormStatus::Editing,
            in_flight: 0,
        }
    }

    pub fn record(&self) -> &R {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut R {
        &mut self.record
    }

    /// Current value of a field
    pub fn field(&self, field: R::Field) -> &str {
        self.record.field(field)
    }

    /// Replace exactly one field, leaving the others untouched
    pub fn set_field(&mut self, field: R::Field, value: impl Into<String>) {
        *self.record.field_mut(field) = value.into();

        // Errors already on screen track the value as it is edited
        if self.touched.contains(&field) {
            self.revalidate(field);
        }
    }

    /// Replace a field addressed by its DOM name
    pub fn set_named(&mut self, name: &str, value: impl Into<String>) -> Result<(), UnknownField> {
        let field = R::Field::from_name(name).ok_or_else(|| UnknownField(name.to_string()))?;
        self.set_field(field, value);
        Ok(())
    }

    /// The field lost focus
    pub fn blur(&mut self, field: R::Field) {
        self.touched.insert(field);
        self.revalidate(field);
    }

    pub fn blur_named(&mut self, name: &str) -> Result<(), UnknownField> {
        let field = R::Field::from_name(name).ok_or_else(|| UnknownField(name.to_string()))?;
        self.blur(field);
        Ok(())
    }

    fn revalidate(&mut self, field: R::Field) {
        let result = self.validator.validate(field, self.record.field(field));
        self.results.insert(field, result);
    }

    /// Visible result for a field; untouched fields always read as valid
    pub fn result(&self, field: R::Field) -> ValidationResult {
        if !self.touched.contains(&field) {
            return ValidationResult::Valid;
        }
        self.results.get(&field).cloned().unwrap_or_default()
    }

    pub fn is_touched(&self, field: R::Field) -> bool {
        self.touched.contains(&field)
    }

    pub fn has_errors(&self) -> bool {
        R::Field::ALL.iter().any(|&field| !self.result(field).is_valid())
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    /// Number of posted snapshots whose response has not been applied yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Choices offered for a field rendered as a select box
    pub fn set_options(&mut self, field: R::Field, options: Vec<String>) {
        self.options.insert(field, options);
    }

    pub fn options(&self, field: R::Field) -> Option<&[String]> {
        self.options.get(&field).map(Vec::as_slice)
    }

    /// Run every rule. On success the form moves to Submitting and the
    /// snapshot to send is returned; otherwise every error is shown.
    pub fn begin_submit(&mut self) -> Option<PendingSubmit<R>> {
        let report = self
            .validator
            .validate_all(|field| self.record.field(field).to_string());

        for (field, result) in report.iter() {
            self.touched.insert(field);
            self.results.insert(field, result.clone());
        }

        if !report.is_valid() {
            tracing::debug!(
                form = R::FORM_ID,
                invalid = ?report.invalid_fields(),
                "Submission blocked by validation"
            );
            return None;
        }

        if self.in_flight > 0 {
            tracing::warn!(
                form = R::FORM_ID,
                in_flight = self.in_flight,
                "Submitting while an earlier save is unresolved; the last response applied wins"
            );
        }

        self.in_flight += 1;
        self.status = FormStatus::Submitting;

        Some(PendingSubmit {
            record: self.record.clone(),
        })
    }

    /// Apply the result of a sent snapshot
    pub fn finish_submit(&mut self, result: Result<R, TransportError>) -> SubmissionOutcome<R> {
        self.in_flight = self.in_flight.saturating_sub(1);

        match result {
            Ok(saved) => {
                tracing::info!(form = R::FORM_ID, "Record saved");
                self.status = FormStatus::Saved;
                SubmissionOutcome::Saved(saved)
            }
            Err(e) => {
                tracing::warn!(form = R::FORM_ID, error = %e, "Save failed");
                self.status = FormStatus::Failed;
                SubmissionOutcome::Failed
            }
        }
    }

    /// Presentation model of the current state
    pub fn view(&self) -> FormView {
        let fields = R::Field::ALL
            .iter()
            .map(|&field| {
                let error_id = field.error_id();
                FieldView {
                    id: field.name().to_string(),
                    name: field.name().to_string(),
                    label: field.label().to_string(),
                    value: self.record.field(field).to_string(),
                    described_by: error_id.clone(),
                    options: self.options(field).map(<[String]>::to_vec),
                    error: Alert {
                        id: Some(error_id),
                        message: self.result(field).message().map(str::to_string),
                    },
                }
            })
            .collect();

        let alert = Alert {
            id: None,
            message: (self.status == FormStatus::Failed).then(|| SAVE_FAILED_MESSAGE.to_string()),
        };

        FormView {
            id: R::FORM_ID.to_string(),
            status: self.status,
            alert,
            fields,
            submit_label: R::SUBMIT_LABEL.to_string(),
        }
    }
}

impl<R: FormRecord> fmt::Debug for FormState<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormState")
            .field("record", &self.record)
            .field("touched", &self.touched)
            .field("status", &self.status)
            .field("in_flight", &self.in_flight)
            .finish()
    }
}

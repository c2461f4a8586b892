//! Presentation models
//!
//! What a form looks like, independent of how it is drawn. Every input is
//! labelled by id and points at its error container through
//! `aria-describedby`. Every container exists in every status, empty when
//! the field is valid, so the layout does not shift.

use super::state::FormStatus;

/// Generic message shown when a save fails
pub const SAVE_FAILED_MESSAGE: &str = "An error occurred during save";

/// An always-present `role="alert"` region
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Alert {
    pub id: Option<String>,
    pub message: Option<String>,
}

impl Alert {
    pub fn role(&self) -> &'static str {
        "alert"
    }

    /// Text content; empty when there is nothing to report
    pub fn text(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }
}

/// One labelled input with its error container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub id: String,
    pub name: String,
    pub label: String,
    pub value: String,
    pub described_by: String,
    /// Present when the field is a select box
    pub options: Option<Vec<String>>,
    pub error: Alert,
}

impl FieldView {
    pub fn input_type(&self) -> &'static str {
        if self.options.is_some() {
            "select"
        } else {
            "text"
        }
    }
}

/// Presentation model of a whole form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub id: String,
    pub status: FormStatus,
    /// Form-level save failure region
    pub alert: Alert,
    pub fields: Vec<FieldView>,
    pub submit_label: String,
}

impl FormView {
    pub fn field(&self, name: &str) -> Option<&FieldView> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Error container by element id, e.g. `firstNameError`
    pub fn error_container(&self, id: &str) -> Option<&Alert> {
        self.fields
            .iter()
            .map(|f| &f.error)
            .find(|alert| alert.id.as_deref() == Some(id))
    }

    pub fn is_submitting(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    /// Caption of the submit button in the current status
    pub fn submit_caption(&self) -> &str {
        if self.is_submitting() {
            "Saving..."
        } else {
            &self.submit_label
        }
    }
}

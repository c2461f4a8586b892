//! Field validation
//!
//! Validation is pure and synchronous: a [`Validator`] maps a field's current
//! value to a [`ValidationResult`] and never touches the network. Failures are
//! data, not errors.

use regex::Regex;
use std::collections::BTreeMap;

use super::FormField;

/// Verdict for a single field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValidationResult {
    #[default]
    Valid,
    Invalid(String),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Error message, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(message) => Some(message),
        }
    }
}

/// A single check applied to a field value
#[derive(Debug, Clone)]
pub enum Rule {
    /// Value must be non-empty after trimming
    Required { message: String },
    /// Non-empty values must match the pattern
    Pattern { pattern: Regex, message: String },
}

impl Rule {
    pub fn required(message: impl Into<String>) -> Self {
        Rule::Required {
            message: message.into(),
        }
    }

    pub fn pattern(pattern: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Rule::Pattern {
            pattern: Regex::new(pattern)?,
            message: message.into(),
        })
    }

    pub fn check(&self, value: &str) -> ValidationResult {
        match self {
            Rule::Required { message } => {
                if value.trim().is_empty() {
                    ValidationResult::Invalid(message.clone())
                } else {
                    ValidationResult::Valid
                }
            }
            // Blank values are left to `Required`
            Rule::Pattern { pattern, message } => {
                if value.is_empty() || pattern.is_match(value) {
                    ValidationResult::Valid
                } else {
                    ValidationResult::Invalid(message.clone())
                }
            }
        }
    }
}

/// Rule set for the fields of one record type
#[derive(Debug, Clone)]
pub struct Validator<F: FormField> {
    rules: BTreeMap<F, Vec<Rule>>,
}

impl<F: FormField> Default for Validator<F> {
    fn default() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }
}

impl<F: FormField> Validator<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: append a rule for a field
    pub fn rule(mut self, field: F, rule: Rule) -> Self {
        self.rules.entry(field).or_default().push(rule);
        self
    }

    /// Rules declared for a field, in check order
    pub fn rules_for(&self, field: F) -> &[Rule] {
        self.rules.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Validate one field. The first failing rule wins.
    pub fn validate(&self, field: F, value: &str) -> ValidationResult {
        self.rules_for(field)
            .iter()
            .map(|rule| rule.check(value))
            .find(|result| !result.is_valid())
            .unwrap_or_default()
    }

    /// Validate every declared field of a record in one pass
    pub fn validate_all(&self, value_of: impl Fn(F) -> String) -> ValidationReport<F> {
        let results = F::ALL
            .iter()
            .map(|&field| (field, self.validate(field, &value_of(field))))
            .collect();

        ValidationReport { results }
    }
}

/// Results of validating every field of a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport<F: FormField> {
    results: BTreeMap<F, ValidationResult>,
}

impl<F: FormField> ValidationReport<F> {
    pub fn is_valid(&self) -> bool {
        self.results.values().all(ValidationResult::is_valid)
    }

    pub fn invalid_fields(&self) -> Vec<F> {
        self.results
            .iter()
            .filter(|(_, result)| !result.is_valid())
            .map(|(field, _)| *field)
            .collect()
    }

    /// Error messages keyed by field name
    pub fn messages(&self) -> BTreeMap<&'static str, String> {
        self.results
            .iter()
            .filter_map(|(field, result)| {
                result.message().map(|m| (field.name(), m.to_string()))
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &ValidationResult)> {
        self.results.iter().map(|(field, result)| (*field, result))
    }
}

//! Customer record

use serde::{Deserialize, Serialize};

use super::RecordId;
use crate::config::{ConfigError, ValidationConfig};
use crate::form::{FormField, FormRecord, Rule, Validator};

/// A salon customer as edited by the customer form and stored by the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Assigned by the server on save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone_number: String,
}

impl Customer {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone_number: phone_number.into(),
        }
    }

    /// Builder method: set the server id
    pub fn with_id(mut self, id: impl Into<RecordId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CustomerField {
    FirstName,
    LastName,
    PhoneNumber,
}

impl FormField for CustomerField {
    const ALL: &'static [Self] = &[
        CustomerField::FirstName,
        CustomerField::LastName,
        CustomerField::PhoneNumber,
    ];

    fn name(self) -> &'static str {
        match self {
            CustomerField::FirstName => "firstName",
            CustomerField::LastName => "lastName",
            CustomerField::PhoneNumber => "phoneNumber",
        }
    }

    fn label(self) -> &'static str {
        match self {
            CustomerField::FirstName => "First name",
            CustomerField::LastName => "Last name",
            CustomerField::PhoneNumber => "Phone number",
        }
    }
}

impl FormRecord for Customer {
    type Field = CustomerField;

    const RESOURCE: &'static str = "/customers";
    const FORM_ID: &'static str = "customer";

    fn field(&self, field: CustomerField) -> &str {
        match field {
            CustomerField::FirstName => &self.first_name,
            CustomerField::LastName => &self.last_name,
            CustomerField::PhoneNumber => &self.phone_number,
        }
    }

    fn field_mut(&mut self, field: CustomerField) -> &mut String {
        match field {
            CustomerField::FirstName => &mut self.first_name,
            CustomerField::LastName => &mut self.last_name,
            CustomerField::PhoneNumber => &mut self.phone_number,
        }
    }

    fn validator(config: &ValidationConfig) -> Result<Validator<CustomerField>, ConfigError> {
        let mut validator = Validator::new()
            .rule(CustomerField::FirstName, Rule::required("First name is required"));

        if config.require_last_name {
            validator = validator.rule(CustomerField::LastName, Rule::required("Last name is required"));
        }

        if config.require_phone_number {
            validator = validator.rule(
                CustomerField::PhoneNumber,
                Rule::required("Phone number is required"),
            );
        }

        // An empty pattern disables the rule
        if let Some(pattern) = config.phone_pattern.as_deref().filter(|p| !p.is_empty()) {
            let rule = Rule::pattern(pattern, "Phone number must contain only digits").map_err(|e| {
                ConfigError::InvalidPattern {
                    field: "phone_pattern",
                    error: e.to_string(),
                }
            })?;
            validator = validator.rule(CustomerField::PhoneNumber, rule);
        }

        Ok(validator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case_without_id() {
        let customer = Customer::new("Ashley", "Smith", "1234567890");
        assert_eq!(
            serde_json::to_value(&customer).unwrap(),
            serde_json::json!({
                "firstName": "Ashley",
                "lastName": "Smith",
                "phoneNumber": "1234567890"
            })
        );
    }

    #[test]
    fn test_deserializes_partial_record() {
        let customer: Customer = serde_json::from_str(r#"{"id": 123}"#).unwrap();
        assert_eq!(customer, Customer::default().with_id(123_u64));
    }

    #[test]
    fn test_string_id_round_trips() {
        let customer: Customer =
            serde_json::from_str(r#"{"id": "c-42", "firstName": "Ashley"}"#).unwrap();

        assert_eq!(customer.id, Some(RecordId::Text("c-42".to_string())));
        assert_eq!(serde_json::to_value(&customer).unwrap()["id"], "c-42");
    }

    #[test]
    fn test_full_name() {
        assert_eq!(Customer::new("Ashley", "Smith", "").full_name(), "Ashley Smith");
        assert_eq!(Customer::new("Jordan", "", "").full_name(), "Jordan");
    }

    #[test]
    fn test_invalid_phone_pattern_config() {
        let config = ValidationConfig {
            phone_pattern: Some("([0-9".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            Customer::validator(&config),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_empty_pattern_disables_rule() {
        let config = ValidationConfig {
            phone_pattern: Some(String::new()),
            ..Default::default()
        };
        let validator = Customer::validator(&config).unwrap();
        assert!(validator.validate(CustomerField::PhoneNumber, "+44 20").is_valid());
    }
}

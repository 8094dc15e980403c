use serde::Deserialize;
use validator::Validate;

use super::common_dto::deserialize_present;
use crate::utils::validation::validate_not_empty;

// Request para crear un cliente
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 1, max = 100), custom = "validate_not_empty")]
    pub name: String,

    #[validate(length(min = 1, max = 32), custom = "validate_not_empty")]
    pub nik: String,

    #[validate(length(min = 1, max = 20), custom = "validate_not_empty")]
    pub phone_number: String,

    #[validate(range(min = 1))]
    pub membership_id: Option<i32>,
}

/// Patch parcial de un cliente.
///
/// Cada campo ausente conserva el valor actual. `membership_id` admite
/// `null` explícito para quitar la membresía.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CustomerPatch {
    #[validate(length(min = 1, max = 100), custom = "validate_not_empty")]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 32), custom = "validate_not_empty")]
    pub nik: Option<String>,

    #[validate(length(min = 1, max = 20), custom = "validate_not_empty")]
    pub phone_number: Option<String>,

    #[serde(default, deserialize_with = "deserialize_present")]
    pub membership_id: Option<Option<i32>>,
}

impl CustomerPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.nik.is_none()
            && self.phone_number.is_none()
            && self.membership_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_distinguishes_absent_and_null() {
        let patch: CustomerPatch = serde_json::from_str(r#"{"name": "Budi"}"#).unwrap();
        assert_eq!(patch.name.as_deref(), Some("Budi"));
        assert_eq!(patch.membership_id, None);

        let patch: CustomerPatch = serde_json::from_str(r#"{"membership_id": null}"#).unwrap();
        assert_eq!(patch.membership_id, Some(None));
        assert!(!patch.is_empty());

        let patch: CustomerPatch = serde_json::from_str(r#"{"membership_id": 2}"#).unwrap();
        assert_eq!(patch.membership_id, Some(Some(2)));
    }

    #[test]
    fn test_empty_patch() {
        let patch: CustomerPatch = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_create_validation() {
        let request = CreateCustomerRequest {
            name: "".to_string(),
            nik: "3201".to_string(),
            phone_number: "0812".to_string(),
            membership_id: Some(0),
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("membership_id"));
        assert!(!fields.contains_key("nik"));
    }

    #[test]
    fn test_blank_fields_rejected() {
        let request = CreateCustomerRequest {
            name: "   ".to_string(),
            nik: "\t".to_string(),
            phone_number: "0812".to_string(),
            membership_id: None,
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("nik"));
        assert!(!fields.contains_key("phone_number"));

        let patch: CustomerPatch = serde_json::from_str(r#"{"phone_number": "  "}"#).unwrap();
        let errors = patch.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("phone_number"));

        let patch: CustomerPatch = serde_json::from_str(r#"{"name": "Budi"}"#).unwrap();
        assert!(patch.validate().is_ok());
    }
}

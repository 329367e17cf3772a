//! Customer profiles and registration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CustomerId, PhoneError, PhoneNumber};

/// A registered customer.
///
/// Customers are created once at registration and never updated; there is
/// no edit operation anywhere in the system. `registered_at` is assigned by
/// the database and immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub full_name: String,
    /// Login key. Not unique: duplicates are allowed and login resolves to
    /// the earliest registration.
    pub phone_number: PhoneNumber,
    pub shop_name: Option<String>,
    /// Free-text delivery address.
    pub delivery_location: String,
    pub registered_at: DateTime<Utc>,
}

/// Registration payload for a new customer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewCustomer {
    pub full_name: String,
    pub phone_number: String,
    #[serde(default)]
    pub shop_name: Option<String>,
    pub delivery_location: String,
}

/// Errors rejecting a registration payload.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RegistrationError {
    /// Full name is missing or blank.
    #[error("full name is required")]
    MissingFullName,
    /// Delivery location is missing or blank.
    #[error("delivery location is required")]
    MissingDeliveryLocation,
    /// Phone number failed validation.
    #[error("invalid phone number: {0}")]
    InvalidPhone(#[from] PhoneError),
}

impl NewCustomer {
    /// Validate the payload, returning the parsed phone number.
    ///
    /// Blank-after-trim names and locations are rejected; an empty shop
    /// name is normalized to `None`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError`] when a required field is blank or the
    /// phone number does not parse.
    pub fn validate(&self) -> Result<PhoneNumber, RegistrationError> {
        if self.full_name.trim().is_empty() {
            return Err(RegistrationError::MissingFullName);
        }
        if self.delivery_location.trim().is_empty() {
            return Err(RegistrationError::MissingDeliveryLocation);
        }
        Ok(PhoneNumber::parse(&self.phone_number)?)
    }

    /// Shop name with empty strings normalized to `None`.
    #[must_use]
    pub fn normalized_shop_name(&self) -> Option<&str> {
        self.shop_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn payload() -> NewCustomer {
        NewCustomer {
            full_name: "Asha Traders".to_owned(),
            phone_number: "9830012345".to_owned(),
            shop_name: Some("Asha General Store".to_owned()),
            delivery_location: "12 Canal Road, Howrah".to_owned(),
        }
    }

    #[test]
    fn test_valid_payload() {
        let phone = payload().validate().unwrap();
        assert_eq!(phone.as_str(), "9830012345");
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut p = payload();
        p.full_name = "   ".to_owned();
        assert!(matches!(
            p.validate(),
            Err(RegistrationError::MissingFullName)
        ));
    }

    #[test]
    fn test_blank_location_rejected() {
        let mut p = payload();
        p.delivery_location = String::new();
        assert!(matches!(
            p.validate(),
            Err(RegistrationError::MissingDeliveryLocation)
        ));
    }

    #[test]
    fn test_bad_phone_rejected() {
        let mut p = payload();
        p.phone_number = "not a phone".to_owned();
        assert!(matches!(
            p.validate(),
            Err(RegistrationError::InvalidPhone(_))
        ));
    }

    #[test]
    fn test_shop_name_normalization() {
        let mut p = payload();
        assert_eq!(p.normalized_shop_name(), Some("Asha General Store"));

        p.shop_name = Some("  ".to_owned());
        assert_eq!(p.normalized_shop_name(), None);

        p.shop_name = None;
        assert_eq!(p.normalized_shop_name(), None);
    }

    #[test]
    fn test_shop_name_defaults_when_absent_in_json() {
        let json = r#"{
            "full_name": "Asha Traders",
            "phone_number": "9830012345",
            "delivery_location": "12 Canal Road"
        }"#;
        let p: NewCustomer = serde_json::from_str(json).unwrap();
        assert_eq!(p.shop_name, None);
    }
}

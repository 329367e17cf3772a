//! Phone number type.
//!
//! Phone numbers double as the customer login key, so they get a validated
//! newtype rather than a bare `String`. Note that the schema does NOT
//! declare them unique: two customers may share a number, and login resolves
//! to the earliest registration.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("phone number must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character that is not a digit, space, dash,
    /// or a leading `+`.
    #[error("phone number contains invalid character '{0}'")]
    InvalidCharacter(char),
    /// The input contains too few digits to be a dialable number.
    #[error("phone number must contain at least {min} digits")]
    TooFewDigits {
        /// Minimum number of digits required.
        min: usize,
    },
}

/// A customer phone number.
///
/// ## Constraints
///
/// - Length: 1-20 characters
/// - Digits, spaces, and dashes, with an optional leading `+`
/// - At least 6 digits overall
///
/// Formatting characters are preserved as entered; comparisons are on the
/// stored string.
///
/// ## Examples
///
/// ```
/// use kirana_core::PhoneNumber;
///
/// assert!(PhoneNumber::parse("+91 98300 12345").is_ok());
/// assert!(PhoneNumber::parse("033-2455-1234").is_ok());
///
/// assert!(PhoneNumber::parse("").is_err());          // empty
/// assert!(PhoneNumber::parse("call me").is_err());   // letters
/// assert!(PhoneNumber::parse("123").is_err());       // too short
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Maximum length of a phone number.
    pub const MAX_LENGTH: usize = 20;

    /// Minimum number of digits required.
    pub const MIN_DIGITS: usize = 6;

    /// Parse a `PhoneNumber` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Is longer than 20 characters
    /// - Contains characters other than digits, spaces, dashes, or a
    ///   leading `+`
    /// - Contains fewer than 6 digits
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        if s.is_empty() {
            return Err(PhoneError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(PhoneError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        for (i, c) in s.chars().enumerate() {
            let valid = c.is_ascii_digit() || c == ' ' || c == '-' || (c == '+' && i == 0);
            if !valid {
                return Err(PhoneError::InvalidCharacter(c));
            }
        }

        let digits = s.chars().filter(char::is_ascii_digit).count();
        if digits < Self::MIN_DIGITS {
            return Err(PhoneError::TooFewDigits {
                min: Self::MIN_DIGITS,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `PhoneNumber` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PhoneNumber {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for PhoneNumber {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for PhoneNumber {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for PhoneNumber {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_numbers() {
        assert!(PhoneNumber::parse("9830012345").is_ok());
        assert!(PhoneNumber::parse("+919830012345").is_ok());
        assert!(PhoneNumber::parse("+91 98300 12345").is_ok());
        assert!(PhoneNumber::parse("033-2455-1234").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(PhoneNumber::parse(""), Err(PhoneError::Empty)));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "9".repeat(21);
        assert!(matches!(
            PhoneNumber::parse(&long),
            Err(PhoneError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_letters_rejected() {
        assert!(matches!(
            PhoneNumber::parse("call me maybe"),
            Err(PhoneError::InvalidCharacter(_))
        ));
    }

    #[test]
    fn test_parse_plus_only_allowed_at_start() {
        assert!(PhoneNumber::parse("+9830012345").is_ok());
        assert!(matches!(
            PhoneNumber::parse("98+30012345"),
            Err(PhoneError::InvalidCharacter('+'))
        ));
    }

    #[test]
    fn test_parse_too_few_digits() {
        assert!(matches!(
            PhoneNumber::parse("12-34"),
            Err(PhoneError::TooFewDigits { .. })
        ));
    }

    #[test]
    fn test_formatting_preserved() {
        let phone = PhoneNumber::parse("+91 98300 12345").unwrap();
        assert_eq!(phone.as_str(), "+91 98300 12345");
        assert_eq!(format!("{phone}"), "+91 98300 12345");
    }

    #[test]
    fn test_serde_roundtrip() {
        let phone = PhoneNumber::parse("9830012345").unwrap();
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"9830012345\"");

        let parsed: PhoneNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, phone);
    }
}

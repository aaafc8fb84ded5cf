//! Mobile number type.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Errors that can occur when parsing a [`MobileNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MobileNumberError {
    /// The input string is empty.
    #[error("mobile number cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("mobile number must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains something other than digits (and a leading `+`).
    #[error("mobile number may only contain digits and a leading '+'")]
    InvalidCharacter,
}

/// A mobile number, the login identity of a shop user.
///
/// ## Constraints
///
/// - Length: 1-15 characters (the backend's column width)
/// - Digits only, optionally prefixed with a single `+`
/// - Surrounding whitespace is trimmed
///
/// These constraints apply to [`MobileNumber::parse`], which guards user
/// input. Deserialization only trims: the backend stores numbers as free
/// text, so a stored `"+91-98765 43210"` must still load.
///
/// ## Examples
///
/// ```
/// use shopfront_core::MobileNumber;
///
/// assert!(MobileNumber::parse("9999999999").is_ok());
/// assert!(MobileNumber::parse("+919999999999").is_ok());
///
/// assert!(MobileNumber::parse("").is_err());
/// assert!(MobileNumber::parse("99-99").is_err());
/// ```
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
#[serde(into = "String")]
pub struct MobileNumber(String);

impl MobileNumber {
    /// Maximum length of a mobile number accepted by the backend.
    pub const MAX_LENGTH: usize = 15;

    /// Parse a `MobileNumber` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 15 characters,
    /// or contains anything other than digits and a leading `+`.
    pub fn parse(s: &str) -> Result<Self, MobileNumberError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MobileNumberError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(MobileNumberError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        let digits = s.strip_prefix('+').unwrap_or(s);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(MobileNumberError::InvalidCharacter);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the mobile number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `MobileNumber` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for MobileNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for MobileNumber {
    type Err = MobileNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for MobileNumber {
    type Error = MobileNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl<'de> Deserialize<'de> for MobileNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self(raw.trim().to_owned()))
    }
}

impl From<MobileNumber> for String {
    fn from(value: MobileNumber) -> Self {
        value.0
    }
}

impl AsRef<str> for MobileNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

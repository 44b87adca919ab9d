//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (e.g., positive identifiers,
//! normalized/validated email, E.164 phones) so that once a value reaches the
//! domain layer it can be treated as trusted.
use std::ops::Deref;

use phonenumber::{Mode, parse};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::ValidateEmail;

/// Maximum length of a client code.
pub const CLIENT_CODE_MAX_LEN: usize = 32;
/// Maximum length of a postal code.
pub const POSTAL_CODE_MAX_LEN: usize = 16;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Phone number did not meet expected format.
    #[error("invalid phone number")]
    InvalidPhone,
    /// Country code is not a two-letter ISO code.
    #[error("invalid country code")]
    InvalidCountryCode,
    /// Tax identifier contains characters other than digits.
    #[error("invalid tax id")]
    InvalidTaxId,
}

/// Normalizes and validates an email string.
fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(ClientId, "Unique identifier for a client.");
id_newtype!(AddressId, "Unique identifier for a client address.");
id_newtype!(PhoneId, "Unique identifier for a client phone.");
id_newtype!(ContactId, "Unique identifier for a client contact person.");
id_newtype!(ClientTypeId, "Identifier of a client type catalog entry.");
id_newtype!(AddressTypeId, "Identifier of an address type catalog entry.");
id_newtype!(PhoneTypeId, "Identifier of a phone type catalog entry.");

/// Generates the accessor and conversion boilerplate shared by string wrappers.
macro_rules! string_wrapper_impls {
    ($name:ident) => {
        impl $name {
            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }
}

string_wrapper_impls!(NonEmptyString);

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        string_wrapper_impls!($name);
    };
}

non_empty_string_newtype!(ClientName, "Client name wrapper enforcing non-empty values.");
non_empty_string_newtype!(
    ContactName,
    "Contact person name wrapper enforcing non-empty values."
);
non_empty_string_newtype!(
    ContactPosition,
    "Job title of a contact person, trimmed and non-empty."
);
non_empty_string_newtype!(Street, "Street line of an address.");
non_empty_string_newtype!(City, "City of an address.");
non_empty_string_newtype!(
    PhoneExtension,
    "Internal extension dialed after the phone number."
);

/// Lower-cased and validated email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_email(email)?;
        Ok(Self(normalized))
    }
}

string_wrapper_impls!(Email);

/// Upper-cased business code identifying a client.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClientCode(String);

impl ClientCode {
    /// Trims, upper-cases and checks the allowed alphabet.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let code = NonEmptyString::new(value)?.into_inner().to_uppercase();
        if code.chars().count() > CLIENT_CODE_MAX_LEN {
            return Err(TypeConstraintError::InvalidValue(format!(
                "client code longer than {CLIENT_CODE_MAX_LEN} characters"
            )));
        }
        if !code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-' || c == '_')
        {
            return Err(TypeConstraintError::InvalidValue(
                "client code may contain only letters, digits, '-' and '_'".to_string(),
            ));
        }
        Ok(Self(code))
    }
}

string_wrapper_impls!(ClientCode);

/// Tax identification number stored as digits only.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TaxId(String);

impl TaxId {
    /// Strips spaces and dashes and ensures only digits remain.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let digits: String = NonEmptyString::new(value)?
            .into_inner()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(TypeConstraintError::InvalidTaxId);
        }
        Ok(Self(digits))
    }
}

string_wrapper_impls!(TaxId);

/// ISO 3166-1 alpha-2 country code.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CountryCode(String);

impl CountryCode {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let code = value.into().trim().to_uppercase();
        if code.len() == 2 && code.chars().all(|c| c.is_ascii_uppercase()) {
            Ok(Self(code))
        } else {
            Err(TypeConstraintError::InvalidCountryCode)
        }
    }
}

string_wrapper_impls!(CountryCode);

/// Postal code kept verbatim apart from trimming.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PostalCode(String);

impl PostalCode {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let code = NonEmptyString::new(value)?.into_inner();
        if code.chars().count() > POSTAL_CODE_MAX_LEN {
            return Err(TypeConstraintError::InvalidValue(format!(
                "postal code longer than {POSTAL_CODE_MAX_LEN} characters"
            )));
        }
        Ok(Self(code))
    }
}

string_wrapper_impls!(PostalCode);

/// Free-form notes with any markup sanitized away.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Notes(String);

impl Notes {
    /// Sanitizes and trims the value. Empty notes are allowed.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let sanitized = ammonia::clean(&value.into());
        Ok(Self(sanitized.trim().to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

string_wrapper_impls!(Notes);

/// Normalizes a phone number string to E.164 format.
pub fn normalize_phone_to_e164(value: &str) -> Result<String, TypeConstraintError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    let parsed = parse(None, trimmed).map_err(|_| TypeConstraintError::InvalidPhone)?;
    Ok(parsed.format().mode(Mode::E164).to_string())
}

/// Normalized phone number wrapper (expected E.164).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Constructs a phone number ensuring it is valid and normalizes to E.164 format.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_phone_to_e164(&value.into())?;
        Ok(Self(normalized))
    }
}

string_wrapper_impls!(PhoneNumber);

/// Turns an optional raw string into `None` when blank, otherwise applies `ctor`.
pub fn optional<T, F>(value: Option<String>, ctor: F) -> Result<Option<T>, TypeConstraintError>
where
    F: FnOnce(String) -> Result<T, TypeConstraintError>,
{
    match value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(v) => ctor(v).map(Some),
        None => Ok(None),
    }
}

//! Contact data models.
//!
//! Two layers of types: [`CandidateRecord`] holds untrusted substrings lifted
//! straight out of OCR text, while [`ContactRecord`] holds only values that
//! went through the sanitizer. [`SafeText`] and [`PhoneNumber`] have private
//! fields, so a trusted field cannot be built any other way.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::card::sanitize::{clean_text, is_clean_text, normalize_phone};

/// Maximum length, in characters, of a trusted text field.
pub const MAX_TEXT_FIELD_CHARS: usize = 100;

/// Untrusted field candidates produced by one extraction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CandidateRecord {
    /// Person name candidate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Email address candidate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Phone number candidate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Company name candidate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

impl CandidateRecord {
    /// Check if no field produced a candidate.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none() && self.company.is_none()
    }
}

/// Sanitized free text: no `< > " ' &`, trimmed, non-empty, at most
/// [`MAX_TEXT_FIELD_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SafeText(String);

impl SafeText {
    /// Sanitize an untrusted value. Returns `None` when nothing usable remains.
    pub fn sanitize(raw: &str) -> Option<Self> {
        clean_text(raw, MAX_TEXT_FIELD_CHARS).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for SafeText {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_clean_text(&value, MAX_TEXT_FIELD_CHARS) {
            Ok(Self(value))
        } else {
            Err(format!("untrusted text value {:?}", value))
        }
    }
}

impl From<SafeText> for String {
    fn from(text: SafeText) -> Self {
        text.0
    }
}

impl AsRef<str> for SafeText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SafeText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalized phone number: optional leading `+` and 7-15 characters total
/// that pass the phone validity rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Normalize and validate an untrusted value.
    pub fn parse(raw: &str) -> Option<Self> {
        normalize_phone(raw).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the number carries an international `+` prefix.
    pub fn is_international(&self) -> bool {
        self.0.starts_with('+')
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match Self::parse(&value) {
            Some(phone) if phone.0 == value => Ok(phone),
            _ => Err(format!("invalid phone value {:?}", value)),
        }
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A contact record with trusted fields only.
///
/// Every field is optional and independent; a record with nothing set is a
/// valid outcome of processing a card that yielded no usable text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    /// Person name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<SafeText>,

    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<SafeText>,

    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<PhoneNumber>,

    /// Company name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<SafeText>,
}

impl ContactRecord {
    /// Check if no field is set.
    pub fn is_empty(&self) -> bool {
        self.field_count() == 0
    }

    /// Number of fields that are set.
    pub fn field_count(&self) -> usize {
        [
            self.name.is_some(),
            self.email.is_some(),
            self.phone.is_some(),
            self.company.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_ref().map(SafeText::as_str)
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_ref().map(SafeText::as_str)
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_ref().map(PhoneNumber::as_str)
    }

    pub fn company(&self) -> Option<&str> {
        self.company.as_ref().map(SafeText::as_str)
    }
}

/// Identity assigned by the contact store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(pub u64);

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredContact {
    /// Store-assigned identity.
    pub id: ContactId,

    /// When the record was persisted.
    pub created_at: DateTime<Utc>,

    /// The sanitized fields.
    #[serde(flatten)]
    pub contact: ContactRecord,
}

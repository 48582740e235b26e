//! Rule-based field extractors for business cards.

pub mod company;
pub mod email;
pub mod patterns;
pub mod phone;

pub use company::{contains_company_keyword, CompanyExtractor};
pub use email::{extract_email, EmailExtractor};
pub use phone::{extract_phone, is_phone_shaped, is_valid_phone, PhoneExtractor};
pub use patterns::*;

/// Trait for single-line field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from one normalized line.
    fn extract(&self, line: &str) -> Option<Self::Output>;

    /// Whether the line looks like this field at all, before any limit or
    /// validity check.
    fn matches(&self, line: &str) -> bool;
}

//! Common regex patterns for business card extraction.
//!
//! Compiled once per process and shared read-only across calls.

use lazy_static::lazy_static;
use regex::{Regex, RegexSet};

/// Substrings (matched case-insensitively) that mark a line as a company name.
pub const COMPANY_KEYWORDS: [&str; 15] = [
    "inc",
    "corp",
    "company",
    "ltd",
    "llc",
    "gmbh",
    "co",
    "group",
    "enterprises",
    "technologies",
    "solutions",
    "consulting",
    "services",
    "corporation",
    "limited",
];

/// Characters removed from a line before phone digit-run matching.
pub const PHONE_NOISE: [char; 5] = [' ', '-', '(', ')', '.'];

/// Separators allowed between groups of a formatted phone number.
pub const PHONE_GROUP_SEPARATORS: [char; 3] = [' ', '-', '.'];

lazy_static! {
    // Email pattern (local@domain.tld)
    pub static ref EMAIL: Regex = Regex::new(
        r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b"
    ).unwrap();

    // Plain run of 7-15 digits, keeping an international prefix
    pub static ref PHONE_DIGIT_RUN: Regex = Regex::new(
        r"\+?\b[0-9]{7,15}\b"
    ).unwrap();

    // International format: optional +, non-zero lead digit, 6-14 more digits
    pub static ref PHONE_INTERNATIONAL: Regex = Regex::new(
        r"\+?[1-9][0-9]{6,14}"
    ).unwrap();

    // Grouped format: 415-555-0100, 415.555.01000, 415 5550100
    pub static ref PHONE_GROUPED: Regex = Regex::new(
        r"\b[0-9]{3}[-. ]?[0-9]{3}[-. ]?[0-9]{4,5}\b"
    ).unwrap();

    // Final shape of a normalized phone number
    pub static ref PHONE_SHAPE: Regex = Regex::new(
        r"^\+?[0-9]+$"
    ).unwrap();

    // Shapes that are never accepted as a phone number
    pub static ref PHONE_REJECTED: RegexSet = RegexSet::new([
        r"^[0-9]{1,6}$", // too short
        r"^0+$",         // all zeros
        r"^1+$",         // all ones
        r"^1234567",     // sequential
        r"^999",         // test numbers
        r"^000",
    ]).unwrap();
}

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::fmt;

use crate::error::ValidationError;

lazy_static! {
    // 10 digits, leading 6-9
    static ref PHONE_PATTERN: Regex = Regex::new(r"^[6-9]\d{9}$").unwrap();
}

/// A phone number that passed local validation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if PHONE_PATTERN.is_match(input) {
            Ok(Self(input.to_string()))
        } else {
            Err(ValidationError::InvalidPhoneNumber)
        }
    }

    /// Keep only digits and cap at 10, the way the input field filters keystrokes
    pub fn sanitize_input(raw: &str) -> String {
        raw.chars().filter(char::is_ascii_digit).take(10).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

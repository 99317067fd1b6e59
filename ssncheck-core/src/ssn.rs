// SPDX-FileCopyrightText: 2026 Ssncheck Contributors
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! SSN parsing and decomposition
//!
//! An SSN is parsed by discarding every non-digit character from the raw
//! input; the remainder must be exactly nine digits. The parsed value is
//! immutable and keeps the canonical digit string alongside the numeric
//! area/group/serial decomposition, so re-extracting the digits of an
//! accepted SSN always reproduces the string used for lookups.

use std::fmt;

use thiserror::Error;

/// Number of digits in a Social Security Number.
pub const SSN_DIGITS: usize = 9;

/// Errors from SSN parsing.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SsnParseError {
    /// The input did not contain exactly nine digits.
    #[error("Must be 9 digits")]
    NotNineDigits,
}

/// A parsed Social Security Number.
///
/// Derived from the raw input once, never mutated. Range comparisons use
/// the integer value of each part; the zero-padded [`area_key`](Self::area_key)
/// exists only for High Group List lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ssn {
    digits: String,
    area: u16,
    group: u8,
    serial: u16,
}

impl Ssn {
    /// Parses an SSN from a raw string.
    ///
    /// Non-digit characters (dashes, spaces, etc.) are discarded before the
    /// length check, so `"494-08-9675"` and `"494089675"` parse identically.
    pub fn parse(raw: &str) -> Result<Self, SsnParseError> {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() != SSN_DIGITS {
            return Err(SsnParseError::NotNineDigits);
        }

        Ok(Ssn {
            area: digits_value(&digits[..3]) as u16,
            group: digits_value(&digits[3..5]) as u8,
            serial: digits_value(&digits[5..9]) as u16,
            digits,
        })
    }

    /// Returns the canonical nine-digit string.
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Returns the area number (digits 1-3) as an integer.
    pub fn area(&self) -> u16 {
        self.area
    }

    /// Returns the zero-padded three-digit area code used as the High Group
    /// List lookup key.
    pub fn area_key(&self) -> &str {
        &self.digits[..3]
    }

    /// Returns the group number (digits 4-5) as an integer.
    pub fn group(&self) -> u8 {
        self.group
    }

    /// Returns the serial number (digits 6-9) as an integer.
    pub fn serial(&self) -> u16 {
        self.serial
    }
}

impl fmt::Display for Ssn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

/// Integer value of a string of ASCII digits.
fn digits_value(s: &str) -> u32 {
    s.bytes().fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
}

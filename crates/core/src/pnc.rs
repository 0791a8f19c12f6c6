//! Police National Computer (PNC) number canonicalisation.
//!
//! A PNC number is written `YY/NNNNNNNC` or `YYYY/NNNNNNNC`: a year, a serial number and a
//! single check letter. The same number is commonly recorded with or without the century
//! and with or without leading zeros on the serial, so searches match on canonical forms:
//!
//! - short: `YY/<serial without leading zeros><CHECK>`, e.g. `12/394773H`
//! - long: `YYYY/<serial without leading zeros><CHECK>`, e.g. `2012/394773H`
//!
//! Values that do not have this shape produce no canonical forms.

use crate::constants::PNC_CENTURY_PIVOT;

/// A parsed PNC number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PncNumber {
    year: u16,
    serial: String,
    check: char,
}

impl PncNumber {
    /// Parse a raw PNC value. Surrounding whitespace is ignored and the check letter may be
    /// either case.
    pub fn parse(raw: &str) -> Option<Self> {
        let (year, rest) = raw.trim().split_once('/')?;

        if !(year.len() == 2 || year.len() == 4) || !year.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let year: u16 = year.parse().ok()?;
        let year = if year < 100 {
            expand_two_digit_year(year)
        } else {
            year
        };

        let check = rest.chars().last()?;
        if !check.is_ascii_alphabetic() {
            return None;
        }
        let serial = &rest[..rest.len() - 1];
        if serial.is_empty() || !serial.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let serial = match serial.trim_start_matches('0') {
            "" => "0",
            trimmed => trimmed,
        };

        Some(Self {
            year,
            serial: serial.to_string(),
            check: check.to_ascii_uppercase(),
        })
    }

    pub fn short_form(&self) -> String {
        format!("{:02}/{}{}", self.year % 100, self.serial, self.check)
    }

    pub fn long_form(&self) -> String {
        format!("{:04}/{}{}", self.year, self.serial, self.check)
    }
}

fn expand_two_digit_year(year: u16) -> u16 {
    if year <= PNC_CENTURY_PIVOT {
        2000 + year
    } else {
        1900 + year
    }
}

/// Canonical short form of a raw PNC value, or `None` if it is not a PNC number.
pub fn canonical_short(raw: &str) -> Option<String> {
    PncNumber::parse(raw).map(|pnc| pnc.short_form())
}

/// Canonical long form of a raw PNC value, or `None` if it is not a PNC number.
pub fn canonical_long(raw: &str) -> Option<String> {
    PncNumber::parse(raw).map(|pnc| pnc.long_form())
}

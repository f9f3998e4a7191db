//! Card expiry date
//!
//! An expiry is a calendar month. The only accepted textual form is `MM/YY`,
//! and the two-digit year always lands in 2000-2099.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Month and year a card expires in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpiryDate {
    year: i32,
    month: u32,
}

impl ExpiryDate {
    /// Build from a month (1-12) and a four-digit year
    pub fn new(month: u32, year: i32) -> Result<Self, ExpiryParseError> {
        if !(1..=12).contains(&month) {
            return Err(ExpiryParseError::InvalidMonth(month));
        }
        if !(2000..=2099).contains(&year) {
            return Err(ExpiryParseError::InvalidYear(year));
        }
        Ok(Self { year, month })
    }

    /// Parse `MM/YY`
    ///
    /// # Examples
    /// ```
    /// use card_services::models::ExpiryDate;
    /// let expiry = ExpiryDate::parse("09/27").unwrap();
    /// assert_eq!((expiry.month(), expiry.year()), (9, 2027));
    /// assert!(ExpiryDate::parse("13/25").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ExpiryParseError> {
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 5
            && bytes[2] == b'/'
            && bytes[..2].iter().all(u8::is_ascii_digit)
            && bytes[3..].iter().all(u8::is_ascii_digit);
        if !well_formed {
            return Err(ExpiryParseError::InvalidFormat(s.to_string()));
        }

        // Both halves are two ASCII digits, so these cannot fail
        let month: u32 = s[..2]
            .parse()
            .map_err(|_| ExpiryParseError::InvalidFormat(s.to_string()))?;
        let yy: i32 = s[3..]
            .parse()
            .map_err(|_| ExpiryParseError::InvalidFormat(s.to_string()))?;

        // No century window: "60" is 2060, never 1960
        Self::new(month, 2000 + yy)
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// A card stays valid through the last day of its expiry month
    pub fn is_expired_on(&self, date: NaiveDate) -> bool {
        (date.year(), date.month()) > (self.year, self.month)
    }
}

impl fmt::Display for ExpiryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.year % 100)
    }
}

impl FromStr for ExpiryDate {
    type Err = ExpiryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ExpiryDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ExpiryDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Why an expiry string was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpiryParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    InvalidYear(i32),
}

impl fmt::Display for ExpiryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => {
                write!(f, "Invalid expiry date '{}'. Please use MM/YY format", s)
            }
            Self::InvalidMonth(m) => write!(f, "Invalid expiry month {} (expected 01-12)", m),
            Self::InvalidYear(y) => write!(f, "Invalid expiry year {}", y),
        }
    }
}

impl std::error::Error for ExpiryParseError {}

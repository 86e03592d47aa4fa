use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::{id::Id, time::Timestamp};

/// Normalized IATA-style location code, e.g. `RUH` or `JED`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IataCode(String);

#[derive(Debug, Error)]
#[error("Invalid IATA code")]
pub struct IataCodeParseError;

impl IataCode {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for IataCode {
    type Err = IataCodeParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        let len_ok = (2..=10).contains(&normalized.len());
        if !len_ok || !normalized.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(IataCodeParseError);
        }
        Ok(Self(normalized))
    }
}

impl From<IataCode> for String {
    fn from(from: IataCode) -> Self {
        from.0
    }
}

impl fmt::Display for IataCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Airport {
    pub id: Id,
    pub name: String,
    pub code: IataCode,
    pub city: String,
    pub country: String,
    pub created_at: Timestamp,
}

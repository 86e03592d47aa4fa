use std::{fmt, str::FromStr};

use uuid::Uuid;

use crate::{email::EmailAddress, id::Id, time::Timestamp};

/// Opaque capability giving a passenger read access to their own
/// flight timeline without authentication. Unique and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackingToken(String);

impl TrackingToken {
    pub fn new() -> Self {
        Uuid::new_v4().into()
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for TrackingToken {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for TrackingToken {
    fn from(from: Uuid) -> Self {
        Self(from.as_simple().to_string())
    }
}

impl From<String> for TrackingToken {
    fn from(from: String) -> Self {
        Self(from)
    }
}

impl From<TrackingToken> for String {
    fn from(from: TrackingToken) -> Self {
        from.0
    }
}

impl FromStr for TrackingToken {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_owned()))
    }
}

impl fmt::Display for TrackingToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
pub enum Language {
    #[default]
    #[strum(serialize = "en")]
    English,
    #[strum(serialize = "ar")]
    Arabic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passenger {
    pub id: Id,
    pub full_name: String,
    pub email: EmailAddress,
    pub phone: Option<String>,
    pub language: Language,
    pub tracking_token: TrackingToken,
}

/// A passenger on a flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: Id,
    pub passenger_id: Id,
    pub flight_id: Id,
    pub seat: Option<String>,
    pub booking_ref: String,
    pub created_at: Timestamp,
}

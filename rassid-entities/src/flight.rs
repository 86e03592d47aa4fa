use std::fmt;

use crate::{airport::IataCode, id::Id, time::Timestamp};

/// Flight lifecycle status as reported by operators or the data provider.
///
/// Unrecognized provider values are preserved verbatim in `Other` instead
/// of being dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlightStatus {
    Scheduled,
    Active,
    Boarding,
    Delayed,
    Departed,
    Landed,
    Cancelled,
    Diverted,
    Incident,
    Other(String),
}

impl FlightStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Active => "active",
            Self::Boarding => "boarding",
            Self::Delayed => "delayed",
            Self::Departed => "departed",
            Self::Landed => "landed",
            Self::Cancelled => "cancelled",
            Self::Diverted => "diverted",
            Self::Incident => "incident",
            Self::Other(other) => other.as_str(),
        }
    }
}

impl From<&str> for FlightStatus {
    fn from(from: &str) -> Self {
        match from.trim().to_lowercase().as_str() {
            "scheduled" => Self::Scheduled,
            "active" => Self::Active,
            "boarding" => Self::Boarding,
            "delayed" => Self::Delayed,
            "departed" => Self::Departed,
            "landed" => Self::Landed,
            "cancelled" => Self::Cancelled,
            "diverted" => Self::Diverted,
            "incident" => Self::Incident,
            _ => Self::Other(from.trim().to_owned()),
        }
    }
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flight {
    pub id: Id,
    /// Natural key for ingestion upserts, e.g. `SV123`.
    pub flight_number: String,
    pub airline_code: String,
    pub status: FlightStatus,
    pub scheduled_departure: Timestamp,
    pub scheduled_arrival: Timestamp,
    pub origin_airport_id: Id,
    pub destination_airport_id: Id,
    /// Excluded from automated ingestion overwrites.
    pub protected: bool,
    pub updated_at: Timestamp,
}

/// Append-only audit record, one row per observed status transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightStatusChange {
    pub id: Id,
    pub flight_id: Id,
    pub old_status: FlightStatus,
    pub new_status: FlightStatus,
    pub changed_at: Timestamp,
}

/// Audit record of one ingestion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightImportLog {
    pub id: Id,
    pub provider: String,
    pub airport_code: Option<IataCode>,
    pub raw_payload: String,
    pub imported_count: u32,
    pub fetched_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_round_trip() {
        assert_eq!(FlightStatus::from("scheduled"), FlightStatus::Scheduled);
        assert_eq!(FlightStatus::from(" Delayed "), FlightStatus::Delayed);
        assert_eq!(FlightStatus::Cancelled.to_string(), "cancelled");
    }

    #[test]
    fn unknown_status_is_preserved() {
        let status = FlightStatus::from("taxiing");
        assert_eq!(status, FlightStatus::Other("taxiing".to_string()));
        assert_eq!(status.to_string(), "taxiing");
    }
}

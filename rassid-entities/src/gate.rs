use crate::{id::Id, time::Timestamp};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateAssignment {
    pub id: Id,
    pub flight_id: Id,
    pub gate: String,
    pub terminal: String,
    pub boarding_open_at: Timestamp,
    pub boarding_close_at: Timestamp,
    pub assigned_at: Timestamp,
    /// Set when the flight is reassigned to another gate.
    pub released_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum BoardingPhase {
    PreOpen,
    Boarding,
    Closed,
    Unknown,
}

impl GateAssignment {
    pub fn boarding_phase(&self, now: Timestamp) -> BoardingPhase {
        if now < self.boarding_open_at {
            BoardingPhase::PreOpen
        } else if now < self.boarding_close_at {
            BoardingPhase::Boarding
        } else {
            BoardingPhase::Closed
        }
    }

    /// Seconds until the next phase boundary, clamped to zero.
    pub fn boarding_countdown_secs(&self, now: Timestamp) -> i64 {
        let until = match self.boarding_phase(now) {
            BoardingPhase::PreOpen => self.boarding_open_at,
            BoardingPhase::Boarding => self.boarding_close_at,
            BoardingPhase::Closed | BoardingPhase::Unknown => return 0,
        };
        (until - now).whole_seconds().max(0)
    }
}

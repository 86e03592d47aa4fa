use crate::{id::Id, time::Timestamp};

/// Deduplication marker for passenger notifications.
///
/// One row per `(booking, event key)` pair; inserting an existing pair is
/// a no-op, which makes replayed status transitions and overlapping
/// reminder sweeps send nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentNotification {
    pub booking_id: Id,
    pub event_key: String,
    pub sent_at: Timestamp,
}

/// Event keys are derived from the triggering record so that the same
/// change never produces two different keys.
pub mod event_key {
    use crate::id::Id;

    pub fn status_change(history_id: &Id) -> String {
        format!("status_change:{history_id}")
    }

    pub fn gate_assigned(assignment_id: &Id) -> String {
        format!("gate_assigned:{assignment_id}")
    }

    pub fn booking_confirmation(booking_id: &Id) -> String {
        format!("booking_confirmation:{booking_id}")
    }

    pub fn departure_reminder(flight_id: &Id) -> String {
        format!("departure_reminder:{flight_id}")
    }
}

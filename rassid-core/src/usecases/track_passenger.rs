use super::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineEvent {
    StatusChanged {
        from: FlightStatus,
        to: FlightStatus,
    },
    GateAssigned {
        gate: String,
        terminal: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    pub happened_at: Timestamp,
    pub event: TimelineEvent,
}

/// Everything the public tracking page shows for one token.
#[derive(Debug)]
pub struct PassengerTrackingView {
    pub passenger: Passenger,
    pub booking: Booking,
    pub flight: Flight,
    pub gate: Option<GateAssignment>,
    pub boarding_phase: BoardingPhase,
    /// Seconds until the boarding window opens or closes, zero once
    /// closed or without gate data.
    pub countdown_secs: i64,
    /// Status and gate events merged, most recent first.
    pub timeline: Vec<TimelineEntry>,
}

/// Resolves a tracking token to the passenger's most recent booking
/// and reconstructs the flight's event timeline.
pub fn track_passenger<R>(repo: &R, token: &TrackingToken) -> Result<PassengerTrackingView>
where
    R: PassengerRepo + BookingRepo + FlightRepo + GateRepo,
{
    let passenger = repo.get_passenger_by_token(token)?;
    let booking = repo
        .bookings_of_passenger(&passenger.id)?
        .into_iter()
        .max_by_key(|booking| booking.created_at)
        .ok_or(crate::repositories::Error::NotFound)?;
    let flight = repo.get_flight(&booking.flight_id)?;

    let mut timeline = Vec::new();
    for change in repo.flight_status_history(&flight.id)? {
        timeline.push(TimelineEntry {
            happened_at: change.changed_at,
            event: TimelineEvent::StatusChanged {
                from: change.old_status,
                to: change.new_status,
            },
        });
    }
    for assignment in repo.gate_history_of_flight(&flight.id)? {
        timeline.push(TimelineEntry {
            happened_at: assignment.assigned_at,
            event: TimelineEvent::GateAssigned {
                gate: assignment.gate,
                terminal: assignment.terminal,
            },
        });
    }
    timeline.sort_by_key(|entry| std::cmp::Reverse(entry.happened_at));

    let gate = repo.current_gate_of_flight(&flight.id)?;
    let now = Timestamp::now();
    let (boarding_phase, countdown_secs) = match &gate {
        Some(gate) => (gate.boarding_phase(now), gate.boarding_countdown_secs(now)),
        None => (BoardingPhase::Unknown, 0),
    };

    Ok(PassengerTrackingView {
        passenger,
        booking,
        flight,
        gate,
        boarding_phase,
        countdown_secs,
        timeline,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::tests::*;
    use time::Duration;

    #[test]
    fn timeline_merges_status_and_gate_events_most_recent_first() {
        let db = MockDb::default();
        let airport = stored_airport(&db, "RUH");
        let flight = stored_flight(&db, "SV123", &airport.id);
        let passenger = stored_passenger(&db, "aziz@mail.sa", Language::Arabic, &flight.id);

        db.status_changes.borrow_mut().push(FlightStatusChange {
            id: Id::new(),
            flight_id: flight.id.clone(),
            old_status: FlightStatus::Scheduled,
            new_status: FlightStatus::Boarding,
            changed_at: Timestamp::from_secs(100),
        });
        db.gate_assignments.borrow_mut().push(GateAssignment {
            id: Id::new(),
            flight_id: flight.id.clone(),
            gate: "B7".into(),
            terminal: "T1".into(),
            boarding_open_at: Timestamp::from_secs(150),
            boarding_close_at: Timestamp::from_secs(400),
            assigned_at: Timestamp::from_secs(200),
            released_at: None,
        });

        let view = track_passenger(&db, &passenger.tracking_token).unwrap();
        assert_eq!(view.flight.flight_number, "SV123");
        assert_eq!(view.timeline.len(), 2);
        assert_eq!(
            view.timeline[0].event,
            TimelineEvent::GateAssigned {
                gate: "B7".into(),
                terminal: "T1".into(),
            }
        );
        assert_eq!(view.timeline[0].happened_at, Timestamp::from_secs(200));
        assert!(matches!(
            view.timeline[1].event,
            TimelineEvent::StatusChanged { .. }
        ));
    }

    #[test]
    fn boarding_phase_without_gate_data_is_unknown() {
        let db = MockDb::default();
        let airport = stored_airport(&db, "RUH");
        let flight = stored_flight(&db, "SV123", &airport.id);
        let passenger = stored_passenger(&db, "aziz@mail.sa", Language::Arabic, &flight.id);

        let view = track_passenger(&db, &passenger.tracking_token).unwrap();
        assert_eq!(view.boarding_phase, BoardingPhase::Unknown);
        assert_eq!(view.countdown_secs, 0);
    }

    #[test]
    fn the_most_recent_booking_wins() {
        let db = MockDb::default();
        let airport = stored_airport(&db, "RUH");
        let old_flight = stored_flight(&db, "SV100", &airport.id);
        let passenger = stored_passenger(&db, "aziz@mail.sa", Language::Arabic, &old_flight.id);

        let new_flight = stored_flight(&db, "SV200", &airport.id);
        db.bookings.borrow_mut().push(Booking {
            id: Id::new(),
            passenger_id: passenger.id.clone(),
            flight_id: new_flight.id.clone(),
            seat: None,
            booking_ref: "REF2".into(),
            created_at: Timestamp::now() + Duration::seconds(10),
        });

        let view = track_passenger(&db, &passenger.tracking_token).unwrap();
        assert_eq!(view.flight.flight_number, "SV200");
    }

    #[test]
    fn unknown_tokens_are_not_found() {
        let db = MockDb::default();
        assert!(matches!(
            track_passenger(&db, &TrackingToken::new()),
            Err(Error::Repo(RepoError::NotFound))
        ));
    }
}

use super::prelude::*;
use crate::usecases;

#[derive(Debug, Clone)]
pub struct NewGateAssignment {
    pub gate: String,
    pub terminal: String,
    pub boarding_open_at: Timestamp,
    pub boarding_close_at: Timestamp,
}

/// Assigns a gate to a flight, releasing the previous assignment.
/// The history of released assignments is kept for the timeline.
pub fn assign_gate<R>(
    repo: &R,
    operator: &User,
    flight_id: &Id,
    new: NewGateAssignment,
) -> Result<GateAssignment>
where
    R: FlightRepo + GateRepo,
{
    let flight = repo.get_flight(flight_id)?;
    usecases::authorize_flight_edit(operator, &flight)?;

    let NewGateAssignment {
        gate,
        terminal,
        boarding_open_at,
        boarding_close_at,
    } = new;
    let gate = gate.trim().to_owned();
    let terminal = terminal.trim().to_owned();
    if gate.is_empty() || terminal.is_empty() {
        return Err(Error::Title);
    }
    if boarding_close_at <= boarding_open_at {
        return Err(Error::BoardingWindow);
    }

    let now = Timestamp::now();
    if let Some(mut current) = repo.current_gate_of_flight(flight_id)? {
        current.released_at = Some(now);
        repo.update_gate_assignment(&current)?;
    }

    let assignment = GateAssignment {
        id: Id::new(),
        flight_id: flight.id.clone(),
        gate,
        terminal,
        boarding_open_at,
        boarding_close_at,
        assigned_at: now,
        released_at: None,
    };
    repo.create_gate_assignment(&assignment)?;
    Ok(assignment)
}

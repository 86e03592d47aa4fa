use super::prelude::*;
use crate::usecases;

#[derive(Debug, Clone, Default)]
pub struct FlightUpdate {
    pub status: Option<FlightStatus>,
    pub scheduled_departure: Option<Timestamp>,
    pub scheduled_arrival: Option<Timestamp>,
    pub protected: Option<bool>,
}

#[derive(Debug)]
pub struct UpdatedFlight {
    pub flight: Flight,
    /// Present iff the status actually changed.
    pub status_change: Option<FlightStatusChange>,
}

/// Manual edit by an operator of the origin airport.
pub fn update_flight<R>(
    repo: &R,
    operator: &User,
    flight_id: &Id,
    update: FlightUpdate,
) -> Result<UpdatedFlight>
where
    R: FlightRepo,
{
    let mut flight = repo.get_flight(flight_id)?;
    usecases::authorize_flight_edit(operator, &flight)?;

    let FlightUpdate {
        status,
        scheduled_departure,
        scheduled_arrival,
        protected,
    } = update;

    let status_change = match status {
        Some(status) => record_status_change(repo, &mut flight, status)?,
        None => None,
    };
    if let Some(scheduled_departure) = scheduled_departure {
        flight.scheduled_departure = scheduled_departure;
    }
    if let Some(scheduled_arrival) = scheduled_arrival {
        flight.scheduled_arrival = scheduled_arrival;
    }
    if let Some(protected) = protected {
        flight.protected = protected;
    }
    flight.updated_at = Timestamp::now();
    repo.update_flight(&flight)?;
    Ok(UpdatedFlight {
        flight,
        status_change,
    })
}

/// Diffs old vs. new status at write time. Unchanged status writes
/// no audit row.
pub(crate) fn record_status_change<R>(
    repo: &R,
    flight: &mut Flight,
    new_status: FlightStatus,
) -> Result<Option<FlightStatusChange>>
where
    R: FlightRepo,
{
    if flight.status == new_status {
        return Ok(None);
    }
    let change = FlightStatusChange {
        id: Id::new(),
        flight_id: flight.id.clone(),
        old_status: flight.status.clone(),
        new_status: new_status.clone(),
        changed_at: Timestamp::now(),
    };
    repo.create_flight_status_change(&change)?;
    flight.status = new_status;
    Ok(Some(change))
}

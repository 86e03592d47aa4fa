use std::collections::HashSet;

use super::prelude::*;
use crate::usecases;

#[derive(Debug, Clone, Default)]
pub struct FlightQuery {
    pub status: Option<FlightStatus>,
    pub destination: Option<Id>,
    /// Matches flight number or airline code, case-insensitive.
    pub text: Option<String>,
    pub departs_min: Option<Timestamp>, // lower bound (inclusive)
    pub departs_max: Option<Timestamp>, // upper bound (exclusive)
}

impl FlightQuery {
    fn matches(&self, flight: &Flight) -> bool {
        if let Some(status) = &self.status {
            if flight.status != *status {
                return false;
            }
        }
        if let Some(destination) = &self.destination {
            if flight.destination_airport_id != *destination {
                return false;
            }
        }
        if let Some(text) = &self.text {
            let needle = text.trim().to_lowercase();
            if !needle.is_empty()
                && !flight.flight_number.to_lowercase().contains(&needle)
                && !flight.airline_code.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if let Some(min) = self.departs_min {
            if flight.scheduled_departure < min {
                return false;
            }
        }
        if let Some(max) = self.departs_max {
            if flight.scheduled_departure >= max {
                return false;
            }
        }
        true
    }
}

/// Public departure board. Only flights departing from an airport
/// with a live subscription are visible to visitors.
pub fn query_public_flights<R>(repo: &R, query: &FlightQuery) -> Result<Vec<Flight>>
where
    R: FlightRepo + SubscriptionRepo,
{
    let now = Timestamp::now();
    let managed: HashSet<Id> = repo
        .all_subscriptions()?
        .into_iter()
        .filter(|subscription| subscription.is_active(now))
        .map(|subscription| subscription.airport_id)
        .collect();
    let mut flights: Vec<_> = repo
        .all_flights()?
        .into_iter()
        .filter(|flight| managed.contains(&flight.origin_airport_id))
        .filter(|flight| query.matches(flight))
        .collect();
    sort_by_departure(&mut flights);
    Ok(flights)
}

/// Arrivals and departures of one airport, for its staff.
pub fn query_airport_flights<R>(
    repo: &R,
    user: &User,
    airport_id: &Id,
    query: &FlightQuery,
) -> Result<Vec<Flight>>
where
    R: FlightRepo,
{
    usecases::authorize_role(user, Role::Operator)?;
    usecases::authorize_airport_member(user, airport_id)?;
    let mut flights: Vec<_> = repo
        .flights_of_airport(airport_id)?
        .into_iter()
        .filter(|flight| query.matches(flight))
        .collect();
    sort_by_departure(&mut flights);
    Ok(flights)
}

fn sort_by_departure(flights: &mut [Flight]) {
    flights.sort_by_key(|flight| flight.scheduled_departure);
}

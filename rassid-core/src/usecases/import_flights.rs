use super::prelude::*;
use crate::{gateways::flight_data::FetchedFlight, usecases::update_flight::record_status_change};

#[derive(Debug, Default)]
pub struct ImportedFlights {
    pub created: u32,
    pub updated: u32,
    pub skipped_protected: u32,
    /// Status transitions observed during the upsert, for fan-out.
    pub status_changes: Vec<(Flight, FlightStatusChange)>,
}

impl ImportedFlights {
    pub fn imported_count(&self) -> u32 {
        self.created + self.updated
    }
}

/// Upserts provider records into the registry, keyed by flight
/// number. Flights flagged as protected are never overwritten.
pub fn import_flights<R>(repo: &R, records: Vec<FetchedFlight>) -> Result<ImportedFlights>
where
    R: FlightRepo + AirportRepo,
{
    let mut outcome = ImportedFlights::default();
    for record in records {
        let origin = ensure_airport(repo, &record.origin)?;
        let destination = ensure_airport(repo, &record.destination)?;
        match repo.try_get_flight_by_number(&record.flight_number)? {
            Some(mut flight) => {
                if flight.protected {
                    outcome.skipped_protected += 1;
                    continue;
                }
                let change = record_status_change(repo, &mut flight, record.status)?;
                flight.airline_code = record.airline_code;
                flight.scheduled_departure = record.scheduled_departure;
                flight.scheduled_arrival = record.scheduled_arrival;
                flight.origin_airport_id = origin.id;
                flight.destination_airport_id = destination.id;
                flight.updated_at = Timestamp::now();
                repo.update_flight(&flight)?;
                if let Some(change) = change {
                    outcome.status_changes.push((flight.clone(), change));
                }
                outcome.updated += 1;
            }
            None => {
                let flight = Flight {
                    id: Id::new(),
                    flight_number: record.flight_number,
                    airline_code: record.airline_code,
                    status: record.status,
                    scheduled_departure: record.scheduled_departure,
                    scheduled_arrival: record.scheduled_arrival,
                    origin_airport_id: origin.id,
                    destination_airport_id: destination.id,
                    protected: false,
                    updated_at: Timestamp::now(),
                };
                repo.create_flight(&flight)?;
                outcome.created += 1;
            }
        }
    }
    Ok(outcome)
}

/// Placeholder airports carry the code as their name until staff
/// fill in the details.
fn ensure_airport<R>(repo: &R, code: &IataCode) -> Result<Airport>
where
    R: AirportRepo,
{
    if let Some(airport) = repo.try_get_airport_by_code(code)? {
        return Ok(airport);
    }
    let airport = Airport {
        id: Id::new(),
        name: code.as_str().to_owned(),
        code: code.clone(),
        city: String::new(),
        country: String::new(),
        created_at: Timestamp::now(),
    };
    repo.create_airport(&airport)?;
    Ok(airport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::tests::*;

    fn record(flight_number: &str, status: FlightStatus) -> FetchedFlight {
        FetchedFlight {
            flight_number: flight_number.into(),
            airline_code: "SV".into(),
            status,
            scheduled_departure: Timestamp::from_secs(10_000),
            scheduled_arrival: Timestamp::from_secs(20_000),
            origin: "RUH".parse().unwrap(),
            destination: "JED".parse().unwrap(),
        }
    }

    #[test]
    fn first_import_creates_flights_and_placeholder_airports() {
        let db = MockDb::default();
        let outcome = import_flights(
            &db,
            vec![
                record("SV123", FlightStatus::Scheduled),
                record("SV124", FlightStatus::Scheduled),
            ],
        )
        .unwrap();
        assert_eq!(outcome.created, 2);
        assert_eq!(outcome.updated, 0);
        assert_eq!(outcome.imported_count(), 2);
        assert!(outcome.status_changes.is_empty());
        // both endpoints materialized exactly once
        assert_eq!(db.airports.borrow().len(), 2);
        assert_eq!(db.airports.borrow()[0].name, "RUH");
    }

    #[test]
    fn reimport_diffs_the_status() {
        let db = MockDb::default();
        import_flights(&db, vec![record("SV123", FlightStatus::Scheduled)]).unwrap();
        let outcome = import_flights(&db, vec![record("SV123", FlightStatus::Delayed)]).unwrap();
        assert_eq!(outcome.created, 0);
        assert_eq!(outcome.updated, 1);
        assert_eq!(outcome.status_changes.len(), 1);
        let (flight, change) = &outcome.status_changes[0];
        assert_eq!(flight.flight_number, "SV123");
        assert_eq!(change.old_status, FlightStatus::Scheduled);
        assert_eq!(change.new_status, FlightStatus::Delayed);
        assert_eq!(db.flights.borrow().len(), 1);
    }

    #[test]
    fn protected_flights_are_skipped() {
        let db = MockDb::default();
        import_flights(&db, vec![record("SV123", FlightStatus::Scheduled)]).unwrap();
        db.flights.borrow_mut()[0].protected = true;

        let outcome = import_flights(&db, vec![record("SV123", FlightStatus::Cancelled)]).unwrap();
        assert_eq!(outcome.skipped_protected, 1);
        assert_eq!(outcome.imported_count(), 0);
        assert_eq!(db.flights.borrow()[0].status, FlightStatus::Scheduled);
        assert!(db.status_changes.borrow().is_empty());
    }
}

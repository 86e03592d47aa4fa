use rassid_core::{
    gateways::{email::EmailGateway, flight_data::FlightDataGateway},
    usecases::PassengerEmailFormatter,
};

use super::*;

/// Pulls the current schedule from the provider and upserts it into
/// the registry, keeping an audit log entry per run. Passengers of
/// flights whose status changed are notified afterwards.
pub fn import_flights<D, G, F>(
    connections: &sqlite::Connections,
    flight_data: &D,
    email_gateway: &G,
    formatter: &F,
    airport: Option<&IataCode>,
) -> Result<FlightImportLog>
where
    D: FlightDataGateway,
    G: EmailGateway,
    F: PassengerEmailFormatter,
{
    // The provider round-trip stays outside the transaction.
    let fetched = flight_data.fetch_flights(airport)?;

    let (log, outcome) = connections.exclusive()?.transaction(|conn| {
        let outcome = usecases::import_flights(conn, fetched.records).map_err(|err| {
            warn!("Unable to import the fetched flights: {}", err);
            err
        })?;
        let log = FlightImportLog {
            id: Id::new(),
            provider: flight_data.provider_name().to_owned(),
            airport_code: airport.cloned(),
            raw_payload: fetched.raw_payload,
            imported_count: outcome.imported_count(),
            fetched_at: Timestamp::now(),
        };
        conn.create_flight_import_log(&log)?;
        Ok::<_, usecases::Error>((log, outcome))
    })?;

    info!(
        "Imported {} flights from {} ({} protected flights skipped)",
        log.imported_count, log.provider, outcome.skipped_protected
    );
    for (flight, change) in outcome.status_changes {
        if let Err(err) =
            update_flight::notify_status_change(connections, email_gateway, formatter, &flight, change)
        {
            error!(
                "Failed to notify passengers of flight {}: {}",
                flight.flight_number, err
            );
        }
    }
    Ok(log)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::super::tests::prelude::*;

    #[derive(Default)]
    struct FakeFlightDataGw {
        records: RefCell<Vec<FetchedFlight>>,
    }

    impl FlightDataGateway for FakeFlightDataGw {
        fn provider_name(&self) -> &str {
            "testfeed"
        }

        fn fetch_flights(
            &self,
            _airport: Option<&IataCode>,
        ) -> std::result::Result<FetchedFlights, FlightDataError> {
            Ok(FetchedFlights {
                records: self.records.borrow().clone(),
                raw_payload: "[]".into(),
            })
        }
    }

    fn record(flight_number: &str, status: FlightStatus) -> FetchedFlight {
        let departure = Timestamp::now() + time::Duration::hours(6);
        FetchedFlight {
            flight_number: flight_number.into(),
            airline_code: "SV".into(),
            status,
            scheduled_departure: departure,
            scheduled_arrival: departure + time::Duration::hours(2),
            origin: "RUH".parse().unwrap(),
            destination: "JED".parse().unwrap(),
        }
    }

    fn import(fixture: &BackendFixture, feed: &FakeFlightDataGw) -> super::Result<FlightImportLog> {
        super::import_flights(
            &fixture.db_connections,
            feed,
            &fixture.email_gateway,
            &MarkerFormatter,
            None,
        )
    }

    #[test]
    fn imports_are_upserts_with_an_audit_trail() {
        let fixture = BackendFixture::new();
        let feed = FakeFlightDataGw::default();
        *feed.records.borrow_mut() = vec![
            record("SV123", FlightStatus::Scheduled),
            record("SV124", FlightStatus::Scheduled),
        ];

        let log = import(&fixture, &feed).unwrap();
        assert_eq!(log.imported_count, 2);
        assert_eq!(log.provider, "testfeed");
        let last = fixture
            .db_connections
            .shared()
            .unwrap()
            .last_flight_import_log()
            .unwrap()
            .unwrap();
        assert_eq!(last.id, log.id);
        assert!(fixture
            .db_connections
            .shared()
            .unwrap()
            .try_get_flight_by_number("SV123")
            .unwrap()
            .is_some());

        // the second run updates in place
        let log = import(&fixture, &feed).unwrap();
        assert_eq!(log.imported_count, 2);
    }

    #[test]
    fn provider_status_changes_reach_the_passengers() {
        let fixture = BackendFixture::new();
        let feed = FakeFlightDataGw::default();
        *feed.records.borrow_mut() = vec![record("SV123", FlightStatus::Scheduled)];
        import(&fixture, &feed).unwrap();

        let flight = fixture
            .db_connections
            .shared()
            .unwrap()
            .try_get_flight_by_number("SV123")
            .unwrap()
            .unwrap();
        fixture.book_passenger(&flight.id, "aziz@mail.sa", Language::Arabic);

        *feed.records.borrow_mut() = vec![record("SV123", FlightStatus::Delayed)];
        import(&fixture, &feed).unwrap();

        let sent = fixture.email_gateway.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].1.subject.contains("status:delayed"));
    }

    #[test]
    fn protected_flights_survive_the_import() {
        let fixture = BackendFixture::new();
        let feed = FakeFlightDataGw::default();
        *feed.records.borrow_mut() = vec![record("SV123", FlightStatus::Scheduled)];
        import(&fixture, &feed).unwrap();

        let mut flight = fixture
            .db_connections
            .shared()
            .unwrap()
            .try_get_flight_by_number("SV123")
            .unwrap()
            .unwrap();
        flight.protected = true;
        fixture
            .db_connections
            .exclusive()
            .unwrap()
            .update_flight(&flight)
            .unwrap();

        *feed.records.borrow_mut() = vec![record("SV123", FlightStatus::Cancelled)];
        let log = import(&fixture, &feed).unwrap();
        assert_eq!(log.imported_count, 0);

        let unchanged = fixture
            .db_connections
            .shared()
            .unwrap()
            .get_flight(&flight.id)
            .unwrap();
        assert_eq!(unchanged.status, FlightStatus::Scheduled);
        assert!(fixture.email_gateway.sent.borrow().is_empty());
    }
}

use time::Duration;

use super::prelude::*;
use crate::{
    gateways::email::EmailGateway,
    usecases::notify_booked_passengers::{
        notify_booked_passengers, PassengerEmailFormatter, PassengerEvent,
    },
};

/// Reminds passengers of departures within the window. The ledger
/// key is per booking and flight, so overlapping sweeps cannot
/// double-send.
pub fn send_departure_reminders<R, G, F>(
    repo: &R,
    email_gateway: &G,
    formatter: &F,
    window: Duration,
) -> Result<usize>
where
    R: FlightRepo + BookingRepo + PassengerRepo + NotificationLogRepo,
    G: EmailGateway,
    F: PassengerEmailFormatter,
{
    let now = Timestamp::now();
    let horizon = now + window;
    let upcoming: Vec<_> = repo
        .all_flights()?
        .into_iter()
        .filter(|flight| flight.status != FlightStatus::Cancelled)
        .filter(|flight| flight.scheduled_departure > now && flight.scheduled_departure <= horizon)
        .collect();

    let mut delivered = 0;
    for flight in upcoming {
        delivered += notify_booked_passengers(
            repo,
            email_gateway,
            formatter,
            &flight,
            PassengerEvent::DepartureReminder,
        )?;
    }
    Ok(delivered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::tests::*;

    #[test]
    fn overlapping_sweeps_send_once() {
        let db = MockDb::default();
        let airport = stored_airport(&db, "RUH");
        let mut flight = stored_flight(&db, "SV123", &airport.id);
        flight.scheduled_departure = Timestamp::now() + Duration::hours(2);
        db.flights.borrow_mut()[0] = flight.clone();
        stored_passenger(&db, "aziz@mail.sa", Language::Arabic, &flight.id);

        let gateway = MockEmailGateway::default();
        let window = Duration::hours(24);
        assert_eq!(
            send_departure_reminders(&db, &gateway, &TestFormatter, window).unwrap(),
            1
        );
        assert_eq!(
            send_departure_reminders(&db, &gateway, &TestFormatter, window).unwrap(),
            0
        );
        assert_eq!(gateway.sent.borrow().len(), 1);
    }

    #[test]
    fn cancelled_and_distant_departures_are_ignored() {
        let db = MockDb::default();
        let airport = stored_airport(&db, "RUH");

        let mut cancelled = stored_flight(&db, "SV1", &airport.id);
        cancelled.scheduled_departure = Timestamp::now() + Duration::hours(2);
        cancelled.status = FlightStatus::Cancelled;
        db.flights.borrow_mut()[0] = cancelled.clone();
        stored_passenger(&db, "a@mail.sa", Language::English, &cancelled.id);

        let mut distant = stored_flight(&db, "SV2", &airport.id);
        distant.scheduled_departure = Timestamp::now() + Duration::days(7);
        db.flights.borrow_mut()[1] = distant.clone();
        stored_passenger(&db, "b@mail.sa", Language::English, &distant.id);

        let gateway = MockEmailGateway::default();
        assert_eq!(
            send_departure_reminders(&db, &gateway, &TestFormatter, Duration::hours(24)).unwrap(),
            0
        );
        assert!(gateway.sent.borrow().is_empty());
    }
}

use rassid_core::{
    gateways::email::EmailGateway,
    usecases::{PassengerEmailFormatter, PassengerEvent},
};

use super::*;

/// Books a passenger onto a flight and mails the confirmation with
/// the tracking link.
pub fn create_booking<G, F>(
    connections: &sqlite::Connections,
    email_gateway: &G,
    formatter: &F,
    operator: &User,
    flight_id: &Id,
    new: usecases::NewBooking,
) -> Result<(Booking, Passenger)>
where
    G: EmailGateway,
    F: PassengerEmailFormatter,
{
    let (booking, passenger) = connections.exclusive()?.transaction(|conn| {
        usecases::create_booking(conn, operator, flight_id, new).map_err(|err| {
            warn!("Unable to book a passenger on flight {}: {}", flight_id, err);
            err
        })
    })?;

    if let Err(err) = send_confirmation(connections, email_gateway, formatter, &booking) {
        error!(
            "Failed to send the confirmation for booking {}: {}",
            booking.id, err
        );
    }
    Ok((booking, passenger))
}

fn send_confirmation<G, F>(
    connections: &sqlite::Connections,
    email_gateway: &G,
    formatter: &F,
    booking: &Booking,
) -> Result<usize>
where
    G: EmailGateway,
    F: PassengerEmailFormatter,
{
    let flight = connections.shared()?.get_flight(&booking.flight_id)?;
    // The ledger skips every booking that already got its
    // confirmation, so only the fresh one is mailed.
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::notify_booked_passengers(
            conn,
            email_gateway,
            formatter,
            &flight,
            PassengerEvent::BookingConfirmed,
        )
    })?)
}

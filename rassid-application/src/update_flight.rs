use rassid_core::{
    gateways::email::EmailGateway,
    usecases::{PassengerEmailFormatter, PassengerEvent},
};

use super::*;

/// Manual flight edit by an operator. A status change fans out to
/// the booked passengers once the edit has committed.
pub fn update_flight<G, F>(
    connections: &sqlite::Connections,
    email_gateway: &G,
    formatter: &F,
    operator: &User,
    flight_id: &Id,
    update: usecases::FlightUpdate,
) -> Result<Flight>
where
    G: EmailGateway,
    F: PassengerEmailFormatter,
{
    let updated = connections.exclusive()?.transaction(|conn| {
        usecases::update_flight(conn, operator, flight_id, update).map_err(|err| {
            warn!("Unable to update flight {}: {}", flight_id, err);
            err
        })
    })?;

    let usecases::UpdatedFlight {
        flight,
        status_change,
    } = updated;
    if let Some(change) = status_change {
        if let Err(err) = notify_status_change(connections, email_gateway, formatter, &flight, change)
        {
            error!(
                "Failed to notify passengers of flight {}: {}",
                flight.flight_number, err
            );
        }
    }
    Ok(flight)
}

/// Fans a committed status change out to everyone booked on the
/// flight. Shared with the provider import.
pub(crate) fn notify_status_change<G, F>(
    connections: &sqlite::Connections,
    email_gateway: &G,
    formatter: &F,
    flight: &Flight,
    change: FlightStatusChange,
) -> Result<usize>
where
    G: EmailGateway,
    F: PassengerEmailFormatter,
{
    let delivered = connections.exclusive()?.transaction(|conn| {
        usecases::notify_booked_passengers(
            conn,
            email_gateway,
            formatter,
            flight,
            PassengerEvent::StatusChanged { change },
        )
    })?;
    info!(
        "Notified {} passengers about the status of flight {}",
        delivered, flight.flight_number
    );
    Ok(delivered)
}

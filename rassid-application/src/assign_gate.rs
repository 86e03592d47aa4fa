use rassid_core::{
    gateways::email::EmailGateway,
    usecases::{PassengerEmailFormatter, PassengerEvent},
};

use super::*;

/// Assigns a gate to a flight and tells the booked passengers where
/// to go.
pub fn assign_gate<G, F>(
    connections: &sqlite::Connections,
    email_gateway: &G,
    formatter: &F,
    operator: &User,
    flight_id: &Id,
    new: usecases::NewGateAssignment,
) -> Result<GateAssignment>
where
    G: EmailGateway,
    F: PassengerEmailFormatter,
{
    let assignment = connections.exclusive()?.transaction(|conn| {
        usecases::assign_gate(conn, operator, flight_id, new).map_err(|err| {
            warn!("Unable to assign a gate to flight {}: {}", flight_id, err);
            err
        })
    })?;

    if let Err(err) = notify_gate_assigned(connections, email_gateway, formatter, &assignment) {
        error!(
            "Failed to notify passengers of flight {}: {}",
            assignment.flight_id, err
        );
    }
    Ok(assignment)
}

fn notify_gate_assigned<G, F>(
    connections: &sqlite::Connections,
    email_gateway: &G,
    formatter: &F,
    assignment: &GateAssignment,
) -> Result<usize>
where
    G: EmailGateway,
    F: PassengerEmailFormatter,
{
    let flight = connections.shared()?.get_flight(&assignment.flight_id)?;
    let delivered = connections.exclusive()?.transaction(|conn| {
        usecases::notify_booked_passengers(
            conn,
            email_gateway,
            formatter,
            &flight,
            PassengerEvent::GateAssigned {
                assignment: assignment.clone(),
            },
        )
    })?;
    info!(
        "Notified {} passengers about the gate of flight {}",
        delivered, flight.flight_number
    );
    Ok(delivered)
}

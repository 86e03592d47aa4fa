use time::Duration;

use rassid_core::{gateways::email::EmailGateway, usecases::PassengerEmailFormatter};

use super::*;

/// Mails departure reminders for flights leaving within the window.
/// Triggered periodically by the scheduler.
pub fn send_departure_reminders<G, F>(
    connections: &sqlite::Connections,
    email_gateway: &G,
    formatter: &F,
    window: Duration,
) -> Result<usize>
where
    G: EmailGateway,
    F: PassengerEmailFormatter,
{
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::send_departure_reminders(conn, email_gateway, formatter, window).map_err(|err| {
            warn!("Failed to send departure reminders: {}", err);
            err
        })
    })?)
}

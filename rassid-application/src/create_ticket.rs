use super::*;

pub fn create_ticket(
    connections: &sqlite::Connections,
    creator: &User,
    new: usecases::NewTicket,
) -> Result<Ticket> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::create_ticket(conn, creator, new).map_err(|err| {
            warn!("Unable to create a ticket: {}", err);
            err
        })
    })?)
}

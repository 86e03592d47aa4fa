use rassid_core::gateways::notify::{NotificationEvent, NotificationGateway};

use super::*;

/// Hands an open ticket over to the platform and notifies its admins.
pub fn escalate_ticket(
    connections: &sqlite::Connections,
    notify: &dyn NotificationGateway,
    actor: &User,
    ticket_id: &Id,
) -> Result<Ticket> {
    let ticket = connections.exclusive()?.transaction(|conn| {
        usecases::escalate_ticket(conn, actor, ticket_id).map_err(|err| {
            warn!("Unable to escalate ticket {}: {}", ticket_id, err);
            err
        })
    })?;

    if let Err(err) = notify_platform_admins(connections, notify, &ticket) {
        error!(
            "Failed to send notifications for escalated ticket {}: {}",
            ticket.id, err
        );
    }
    Ok(ticket)
}

fn notify_platform_admins(
    connections: &sqlite::Connections,
    notify: &dyn NotificationGateway,
    ticket: &Ticket,
) -> Result<()> {
    let (airport, admin_addresses) = {
        let db = connections.shared()?;
        (
            db.get_airport(&ticket.airport_id)?,
            notifications::platform_admin_addresses(&db)?,
        )
    };
    notifications::send_and_log(
        connections,
        notify,
        NotificationEvent::TicketEscalated {
            ticket,
            airport: &airport,
            admin_addresses: &admin_addresses,
        },
    );
    Ok(())
}

pub fn close_ticket(
    connections: &sqlite::Connections,
    actor: &User,
    ticket_id: &Id,
) -> Result<Ticket> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::close_ticket(conn, actor, ticket_id).map_err(|err| {
            warn!("Unable to close ticket {}: {}", ticket_id, err);
            err
        })
    })?)
}

pub fn reject_ticket(
    connections: &sqlite::Connections,
    actor: &User,
    ticket_id: &Id,
) -> Result<Ticket> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::reject_ticket(conn, actor, ticket_id).map_err(|err| {
            warn!("Unable to reject ticket {}: {}", ticket_id, err);
            err
        })
    })?)
}

pub fn reopen_ticket(
    connections: &sqlite::Connections,
    actor: &User,
    ticket_id: &Id,
) -> Result<Ticket> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::reopen_ticket(conn, actor, ticket_id).map_err(|err| {
            warn!("Unable to reopen ticket {}: {}", ticket_id, err);
            err
        })
    })?)
}

use super::prelude::*;
use crate::usecases;

/// Escalates an open ticket to the platform. Airport admins may only
/// escalate tickets of their own airport.
pub fn escalate_ticket<R>(repo: &R, actor: &User, ticket_id: &Id) -> Result<Ticket>
where
    R: TicketRepo,
{
    let ticket = get_administered_ticket(repo, actor, ticket_id)?;
    transition(repo, ticket, TicketStatus::Escalated)
}

/// Closing is reserved for the platform since only escalated tickets
/// can be closed at all.
pub fn close_ticket<R>(repo: &R, actor: &User, ticket_id: &Id) -> Result<Ticket>
where
    R: TicketRepo,
{
    usecases::authorize_role(actor, Role::PlatformAdmin)?;
    let ticket = repo.get_ticket(ticket_id)?;
    transition(repo, ticket, TicketStatus::Closed)
}

pub fn reject_ticket<R>(repo: &R, actor: &User, ticket_id: &Id) -> Result<Ticket>
where
    R: TicketRepo,
{
    let ticket = get_administered_ticket(repo, actor, ticket_id)?;
    // Escalated tickets have left the airport's hands.
    if ticket.status == TicketStatus::Escalated {
        usecases::authorize_role(actor, Role::PlatformAdmin)?;
    }
    transition(repo, ticket, TicketStatus::Rejected)
}

pub fn reopen_ticket<R>(repo: &R, actor: &User, ticket_id: &Id) -> Result<Ticket>
where
    R: TicketRepo,
{
    usecases::authorize_role(actor, Role::PlatformAdmin)?;
    let ticket = repo.get_ticket(ticket_id)?;
    transition(repo, ticket, TicketStatus::Open)
}

fn transition<R>(repo: &R, mut ticket: Ticket, to: TicketStatus) -> Result<Ticket>
where
    R: TicketRepo,
{
    ticket.status = ticket.status.transition_to(to)?;
    ticket.updated_at = Timestamp::now();
    repo.update_ticket(&ticket)?;
    Ok(ticket)
}

/// Operators may never transition tickets, not even their own.
fn get_administered_ticket<R>(repo: &R, actor: &User, ticket_id: &Id) -> Result<Ticket>
where
    R: TicketRepo,
{
    usecases::authorize_role(actor, Role::AirportAdmin)?;
    let ticket = repo.get_ticket(ticket_id)?;
    usecases::authorize_airport_member(actor, &ticket.airport_id)?;
    Ok(ticket)
}

use super::prelude::*;
use crate::usecases;

/// The tickets the actor is allowed to see: operators their own,
/// airport admins their airport's, the platform everything.
pub fn query_tickets<R>(repo: &R, actor: &User) -> Result<Vec<Ticket>>
where
    R: TicketRepo,
{
    let mut tickets = match actor.role {
        Role::Guest => return Err(Error::Unauthorized),
        Role::Operator => {
            let airport_id = actor.airport_id.as_ref().ok_or(Error::Forbidden)?;
            repo.tickets_of_airport(airport_id)?
                .into_iter()
                .filter(|ticket| ticket.created_by == actor.id)
                .collect()
        }
        Role::AirportAdmin => {
            let airport_id = actor.airport_id.as_ref().ok_or(Error::Forbidden)?;
            repo.tickets_of_airport(airport_id)?
        }
        Role::PlatformAdmin => repo.all_tickets()?,
    };
    tickets.sort_by_key(|ticket| std::cmp::Reverse(ticket.updated_at));
    Ok(tickets)
}

pub fn get_ticket_with_comments<R>(
    repo: &R,
    actor: &User,
    ticket_id: &Id,
) -> Result<(Ticket, Vec<TicketComment>)>
where
    R: TicketRepo,
{
    let ticket = get_visible_ticket(repo, actor, ticket_id)?;
    let mut comments = repo.comments_of_ticket(&ticket.id)?;
    comments.sort_by_key(|comment| comment.created_at);
    Ok((ticket, comments))
}

/// Read access: the creator, admins of the ticket's airport and the
/// platform.
pub fn get_visible_ticket<R>(repo: &R, actor: &User, ticket_id: &Id) -> Result<Ticket>
where
    R: TicketRepo,
{
    let ticket = repo.get_ticket(ticket_id)?;
    if actor.role == Role::PlatformAdmin {
        return Ok(ticket);
    }
    if actor.role == Role::AirportAdmin && actor.is_scoped_to(&ticket.airport_id) {
        return Ok(ticket);
    }
    if actor.role == Role::Operator && ticket.created_by == actor.id {
        return Ok(ticket);
    }
    Err(Error::Forbidden)
}

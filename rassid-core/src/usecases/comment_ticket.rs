use super::prelude::*;
use crate::usecases;

pub fn comment_ticket<R>(
    repo: &R,
    author: &User,
    ticket_id: &Id,
    body: String,
) -> Result<TicketComment>
where
    R: TicketRepo,
{
    let ticket = usecases::get_visible_ticket(repo, author, ticket_id)?;
    if ticket.status.is_closed() {
        return Err(Error::TicketClosed);
    }
    let body = body.trim().to_owned();
    if body.is_empty() {
        return Err(Error::EmptyComment);
    }
    let comment = TicketComment {
        id: Id::new(),
        ticket_id: ticket.id.clone(),
        author_id: author.id.clone(),
        body,
        created_at: Timestamp::now(),
    };
    repo.create_ticket_comment(&comment)?;

    let mut ticket = ticket;
    ticket.updated_at = comment.created_at;
    repo.update_ticket(&ticket)?;
    Ok(comment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::tests::*;

    #[test]
    fn the_thread_is_open_until_the_ticket_closes() {
        let db = MockDb::default();
        let airport = stored_airport(&db, "RUH");
        let operator = stored_user(
            &db,
            Role::Operator,
            Some(airport.id.clone()),
            "ops@ruh.sa",
            "secret1",
        );
        let ticket = stored_ticket(&db, &airport.id, &operator.id);

        let comment =
            comment_ticket(&db, &operator, &ticket.id, "  still broken  ".into()).unwrap();
        assert_eq!(comment.body, "still broken");
        assert!(matches!(
            comment_ticket(&db, &operator, &ticket.id, "  ".into()),
            Err(Error::EmptyComment)
        ));

        db.tickets.borrow_mut()[0].status = TicketStatus::Closed;
        assert!(matches!(
            comment_ticket(&db, &operator, &ticket.id, "too late".into()),
            Err(Error::TicketClosed)
        ));
        assert_eq!(db.ticket_comments.borrow().len(), 1);
    }

    #[test]
    fn strangers_cannot_join_the_thread() {
        let db = MockDb::default();
        let airport = stored_airport(&db, "RUH");
        let operator = stored_user(
            &db,
            Role::Operator,
            Some(airport.id.clone()),
            "ops@ruh.sa",
            "secret1",
        );
        let colleague = stored_user(
            &db,
            Role::Operator,
            Some(airport.id.clone()),
            "ops2@ruh.sa",
            "secret1",
        );
        let ticket = stored_ticket(&db, &airport.id, &operator.id);
        // another operator of the same airport is not the creator
        assert!(matches!(
            comment_ticket(&db, &colleague, &ticket.id, "me too".into()),
            Err(Error::Forbidden)
        ));
    }
}

use super::prelude::*;
use crate::usecases;

#[derive(Debug, Clone)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub category: TicketCategory,
    pub priority: TicketPriority,
}

pub fn create_ticket<R>(repo: &R, creator: &User, new: NewTicket) -> Result<Ticket>
where
    R: TicketRepo,
{
    usecases::authorize_role(creator, Role::Operator)?;
    // Tickets always belong to the creator's airport.
    let airport_id = creator.airport_id.clone().ok_or(Error::Forbidden)?;

    let NewTicket {
        title,
        description,
        category,
        priority,
    } = new;
    let title = title.trim().to_owned();
    if title.is_empty() {
        return Err(Error::Title);
    }

    let now = Timestamp::now();
    let ticket = Ticket {
        id: Id::new(),
        airport_id,
        created_by: creator.id.clone(),
        assigned_to: None,
        title,
        description,
        category,
        priority,
        status: TicketStatus::Open,
        created_at: now,
        updated_at: now,
    };
    repo.create_ticket(&ticket)?;
    Ok(ticket)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::tests::*;

    #[test]
    fn operators_raise_tickets_for_their_airport() {
        let db = MockDb::default();
        let airport = stored_airport(&db, "RUH");
        let operator = stored_user(
            &db,
            Role::Operator,
            Some(airport.id.clone()),
            "ops@ruh.sa",
            "secret1",
        );
        let new = NewTicket {
            title: "SMS provider rejects our sender id".into(),
            description: "All boarding alerts bounce since this morning.".into(),
            category: TicketCategory::Sms,
            priority: TicketPriority::High,
        };
        let ticket = create_ticket(&db, &operator, new).unwrap();
        assert_eq!(ticket.airport_id, airport.id);
        assert_eq!(ticket.status, TicketStatus::Open);
        assert_eq!(ticket.created_by, operator.id);
    }

    #[test]
    fn blank_titles_and_platform_accounts_are_rejected() {
        let db = MockDb::default();
        let airport = stored_airport(&db, "RUH");
        let operator = stored_user(
            &db,
            Role::Operator,
            Some(airport.id.clone()),
            "ops@ruh.sa",
            "secret1",
        );
        let blank = NewTicket {
            title: "  ".into(),
            description: String::new(),
            category: TicketCategory::Other,
            priority: TicketPriority::Low,
        };
        assert!(matches!(
            create_ticket(&db, &operator, blank),
            Err(Error::Title)
        ));

        let admin = stored_user(&db, Role::PlatformAdmin, None, "root@rassid.sa", "secret1");
        let new = NewTicket {
            title: "No airport".into(),
            description: String::new(),
            category: TicketCategory::System,
            priority: TicketPriority::Low,
        };
        assert!(matches!(
            create_ticket(&db, &admin, new),
            Err(Error::Forbidden)
        ));
        assert!(db.tickets.borrow().is_empty());
    }
}

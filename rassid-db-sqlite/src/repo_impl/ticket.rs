use super::*;

impl<'a> TicketRepo for DbReadOnly<'a> {
    fn create_ticket(&self, _ticket: &Ticket) -> Result<()> {
        unreachable!();
    }
    fn update_ticket(&self, _ticket: &Ticket) -> Result<()> {
        unreachable!();
    }

    fn get_ticket(&self, id: &Id) -> Result<Ticket> {
        get_ticket(&mut self.conn.borrow_mut(), id)
    }
    fn all_tickets(&self) -> Result<Vec<Ticket>> {
        all_tickets(&mut self.conn.borrow_mut())
    }
    fn tickets_of_airport(&self, airport_id: &Id) -> Result<Vec<Ticket>> {
        tickets_of_airport(&mut self.conn.borrow_mut(), airport_id)
    }

    fn create_ticket_comment(&self, _comment: &TicketComment) -> Result<()> {
        unreachable!();
    }
    fn comments_of_ticket(&self, ticket_id: &Id) -> Result<Vec<TicketComment>> {
        comments_of_ticket(&mut self.conn.borrow_mut(), ticket_id)
    }
}

impl<'a> TicketRepo for DbReadWrite<'a> {
    fn create_ticket(&self, ticket: &Ticket) -> Result<()> {
        create_ticket(&mut self.conn.borrow_mut(), ticket)
    }
    fn update_ticket(&self, ticket: &Ticket) -> Result<()> {
        update_ticket(&mut self.conn.borrow_mut(), ticket)
    }

    fn get_ticket(&self, id: &Id) -> Result<Ticket> {
        get_ticket(&mut self.conn.borrow_mut(), id)
    }
    fn all_tickets(&self) -> Result<Vec<Ticket>> {
        all_tickets(&mut self.conn.borrow_mut())
    }
    fn tickets_of_airport(&self, airport_id: &Id) -> Result<Vec<Ticket>> {
        tickets_of_airport(&mut self.conn.borrow_mut(), airport_id)
    }

    fn create_ticket_comment(&self, comment: &TicketComment) -> Result<()> {
        create_ticket_comment(&mut self.conn.borrow_mut(), comment)
    }
    fn comments_of_ticket(&self, ticket_id: &Id) -> Result<Vec<TicketComment>> {
        comments_of_ticket(&mut self.conn.borrow_mut(), ticket_id)
    }
}

impl<'a> TicketRepo for DbConnection<'a> {
    fn create_ticket(&self, ticket: &Ticket) -> Result<()> {
        create_ticket(&mut self.conn.borrow_mut(), ticket)
    }
    fn update_ticket(&self, ticket: &Ticket) -> Result<()> {
        update_ticket(&mut self.conn.borrow_mut(), ticket)
    }

    fn get_ticket(&self, id: &Id) -> Result<Ticket> {
        get_ticket(&mut self.conn.borrow_mut(), id)
    }
    fn all_tickets(&self) -> Result<Vec<Ticket>> {
        all_tickets(&mut self.conn.borrow_mut())
    }
    fn tickets_of_airport(&self, airport_id: &Id) -> Result<Vec<Ticket>> {
        tickets_of_airport(&mut self.conn.borrow_mut(), airport_id)
    }

    fn create_ticket_comment(&self, comment: &TicketComment) -> Result<()> {
        create_ticket_comment(&mut self.conn.borrow_mut(), comment)
    }
    fn comments_of_ticket(&self, ticket_id: &Id) -> Result<Vec<TicketComment>> {
        comments_of_ticket(&mut self.conn.borrow_mut(), ticket_id)
    }
}

fn load_ticket(entity: models::TicketEntity) -> Result<Ticket> {
    let models::TicketEntity {
        id,
        airport_id,
        created_by,
        assigned_to,
        title,
        description,
        category,
        priority,
        status,
        created_at,
        updated_at,
    } = entity;
    Ok(Ticket {
        id: id.into(),
        airport_id: airport_id.into(),
        created_by: created_by.into(),
        assigned_to: assigned_to.map(Into::into),
        title,
        description,
        category: parse_stored(&category, "ticket category")?,
        priority: parse_stored(&priority, "ticket priority")?,
        status: parse_stored(&status, "ticket status")?,
        created_at: Timestamp::from_secs(created_at),
        updated_at: Timestamp::from_secs(updated_at),
    })
}

fn load_ticket_comment(entity: models::TicketCommentEntity) -> TicketComment {
    let models::TicketCommentEntity {
        id,
        ticket_id,
        author_id,
        body,
        created_at,
    } = entity;
    TicketComment {
        id: id.into(),
        ticket_id: ticket_id.into(),
        author_id: author_id.into(),
        body,
        created_at: Timestamp::from_secs(created_at),
    }
}

fn create_ticket(conn: &mut SqliteConnection, ticket: &Ticket) -> Result<()> {
    let new_ticket = models::NewTicket::from(ticket);
    diesel::insert_into(schema::tickets::table)
        .values(&new_ticket)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_ticket(conn: &mut SqliteConnection, ticket: &Ticket) -> Result<()> {
    use schema::tickets::dsl;
    let new_ticket = models::NewTicket::from(ticket);
    diesel::update(dsl::tickets.filter(dsl::id.eq(new_ticket.id)))
        .set(&new_ticket)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_ticket(conn: &mut SqliteConnection, id: &Id) -> Result<Ticket> {
    use schema::tickets::dsl;
    load_ticket(
        dsl::tickets
            .filter(dsl::id.eq(id.as_str()))
            .first::<models::TicketEntity>(conn)
            .map_err(from_diesel_err)?,
    )
}

fn all_tickets(conn: &mut SqliteConnection) -> Result<Vec<Ticket>> {
    use schema::tickets::dsl;
    dsl::tickets
        .order_by(dsl::created_at.desc())
        .load::<models::TicketEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_ticket)
        .collect()
}

fn tickets_of_airport(conn: &mut SqliteConnection, airport_id: &Id) -> Result<Vec<Ticket>> {
    use schema::tickets::dsl;
    dsl::tickets
        .filter(dsl::airport_id.eq(airport_id.as_str()))
        .order_by(dsl::created_at.desc())
        .load::<models::TicketEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_ticket)
        .collect()
}

fn create_ticket_comment(conn: &mut SqliteConnection, comment: &TicketComment) -> Result<()> {
    let new_comment = models::NewTicketComment::from(comment);
    diesel::insert_into(schema::ticket_comments::table)
        .values(&new_comment)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn comments_of_ticket(conn: &mut SqliteConnection, ticket_id: &Id) -> Result<Vec<TicketComment>> {
    use schema::ticket_comments::dsl;
    Ok(dsl::ticket_comments
        .filter(dsl::ticket_id.eq(ticket_id.as_str()))
        .order_by(dsl::created_at.asc())
        .load::<models::TicketCommentEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_ticket_comment)
        .collect())
}

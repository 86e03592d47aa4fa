use super::*;

impl<'a> ContactMessageRepo for DbReadOnly<'a> {
    fn create_contact_message(&self, _message: &ContactMessage) -> Result<()> {
        unreachable!();
    }
    fn update_contact_message(&self, _message: &ContactMessage) -> Result<()> {
        unreachable!();
    }
    fn all_contact_messages(&self) -> Result<Vec<ContactMessage>> {
        all_contact_messages(&mut self.conn.borrow_mut())
    }
    fn get_contact_message(&self, id: &Id) -> Result<ContactMessage> {
        get_contact_message(&mut self.conn.borrow_mut(), id)
    }
}

impl<'a> ContactMessageRepo for DbReadWrite<'a> {
    fn create_contact_message(&self, message: &ContactMessage) -> Result<()> {
        create_contact_message(&mut self.conn.borrow_mut(), message)
    }
    fn update_contact_message(&self, message: &ContactMessage) -> Result<()> {
        update_contact_message(&mut self.conn.borrow_mut(), message)
    }
    fn all_contact_messages(&self) -> Result<Vec<ContactMessage>> {
        all_contact_messages(&mut self.conn.borrow_mut())
    }
    fn get_contact_message(&self, id: &Id) -> Result<ContactMessage> {
        get_contact_message(&mut self.conn.borrow_mut(), id)
    }
}

impl<'a> ContactMessageRepo for DbConnection<'a> {
    fn create_contact_message(&self, message: &ContactMessage) -> Result<()> {
        create_contact_message(&mut self.conn.borrow_mut(), message)
    }
    fn update_contact_message(&self, message: &ContactMessage) -> Result<()> {
        update_contact_message(&mut self.conn.borrow_mut(), message)
    }
    fn all_contact_messages(&self) -> Result<Vec<ContactMessage>> {
        all_contact_messages(&mut self.conn.borrow_mut())
    }
    fn get_contact_message(&self, id: &Id) -> Result<ContactMessage> {
        get_contact_message(&mut self.conn.borrow_mut(), id)
    }
}

fn load_contact_message(entity: models::ContactMessageEntity) -> ContactMessage {
    let models::ContactMessageEntity {
        id,
        first_name,
        last_name,
        email,
        subject,
        message,
        resolved,
        created_at,
    } = entity;
    ContactMessage {
        id: id.into(),
        first_name,
        last_name,
        email: EmailAddress::new_unchecked(email),
        subject,
        message,
        resolved,
        created_at: Timestamp::from_secs(created_at),
    }
}

fn create_contact_message(conn: &mut SqliteConnection, message: &ContactMessage) -> Result<()> {
    let new_message = models::NewContactMessage::from(message);
    diesel::insert_into(schema::contact_messages::table)
        .values(&new_message)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_contact_message(conn: &mut SqliteConnection, message: &ContactMessage) -> Result<()> {
    use schema::contact_messages::dsl;
    let new_message = models::NewContactMessage::from(message);
    diesel::update(dsl::contact_messages.filter(dsl::id.eq(new_message.id)))
        .set(&new_message)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn all_contact_messages(conn: &mut SqliteConnection) -> Result<Vec<ContactMessage>> {
    use schema::contact_messages::dsl;
    Ok(dsl::contact_messages
        .order_by(dsl::created_at.desc())
        .load::<models::ContactMessageEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_contact_message)
        .collect())
}

fn get_contact_message(conn: &mut SqliteConnection, id: &Id) -> Result<ContactMessage> {
    use schema::contact_messages::dsl;
    Ok(load_contact_message(
        dsl::contact_messages
            .filter(dsl::id.eq(id.as_str()))
            .first::<models::ContactMessageEntity>(conn)
            .map_err(from_diesel_err)?,
    ))
}

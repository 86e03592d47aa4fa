use super::*;

impl<'a> PassengerRepo for DbReadOnly<'a> {
    fn create_passenger(&self, _passenger: &Passenger) -> Result<()> {
        unreachable!();
    }

    fn get_passenger(&self, id: &Id) -> Result<Passenger> {
        get_passenger(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_passenger_by_email(&self, email: &EmailAddress) -> Result<Option<Passenger>> {
        try_get_passenger_by_email(&mut self.conn.borrow_mut(), email)
    }
    fn get_passenger_by_token(&self, token: &TrackingToken) -> Result<Passenger> {
        get_passenger_by_token(&mut self.conn.borrow_mut(), token)
    }
}

impl<'a> PassengerRepo for DbReadWrite<'a> {
    fn create_passenger(&self, passenger: &Passenger) -> Result<()> {
        create_passenger(&mut self.conn.borrow_mut(), passenger)
    }

    fn get_passenger(&self, id: &Id) -> Result<Passenger> {
        get_passenger(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_passenger_by_email(&self, email: &EmailAddress) -> Result<Option<Passenger>> {
        try_get_passenger_by_email(&mut self.conn.borrow_mut(), email)
    }
    fn get_passenger_by_token(&self, token: &TrackingToken) -> Result<Passenger> {
        get_passenger_by_token(&mut self.conn.borrow_mut(), token)
    }
}

impl<'a> PassengerRepo for DbConnection<'a> {
    fn create_passenger(&self, passenger: &Passenger) -> Result<()> {
        create_passenger(&mut self.conn.borrow_mut(), passenger)
    }

    fn get_passenger(&self, id: &Id) -> Result<Passenger> {
        get_passenger(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_passenger_by_email(&self, email: &EmailAddress) -> Result<Option<Passenger>> {
        try_get_passenger_by_email(&mut self.conn.borrow_mut(), email)
    }
    fn get_passenger_by_token(&self, token: &TrackingToken) -> Result<Passenger> {
        get_passenger_by_token(&mut self.conn.borrow_mut(), token)
    }
}

fn load_passenger(entity: models::PassengerEntity) -> Result<Passenger> {
    let models::PassengerEntity {
        id,
        full_name,
        email,
        phone,
        language,
        tracking_token,
    } = entity;
    Ok(Passenger {
        id: id.into(),
        full_name,
        email: EmailAddress::new_unchecked(email),
        phone,
        language: parse_stored(&language, "passenger language")?,
        tracking_token: tracking_token.into(),
    })
}

fn create_passenger(conn: &mut SqliteConnection, passenger: &Passenger) -> Result<()> {
    let new_passenger = models::NewPassenger::from(passenger);
    diesel::insert_into(schema::passengers::table)
        .values(&new_passenger)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_passenger(conn: &mut SqliteConnection, id: &Id) -> Result<Passenger> {
    use schema::passengers::dsl;
    load_passenger(
        dsl::passengers
            .filter(dsl::id.eq(id.as_str()))
            .first::<models::PassengerEntity>(conn)
            .map_err(from_diesel_err)?,
    )
}

fn try_get_passenger_by_email(
    conn: &mut SqliteConnection,
    email: &EmailAddress,
) -> Result<Option<Passenger>> {
    use schema::passengers::dsl;
    dsl::passengers
        .filter(dsl::email.eq(email.as_str()))
        .first::<models::PassengerEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(load_passenger)
        .transpose()
}

fn get_passenger_by_token(conn: &mut SqliteConnection, token: &TrackingToken) -> Result<Passenger> {
    use schema::passengers::dsl;
    load_passenger(
        dsl::passengers
            .filter(dsl::tracking_token.eq(token.as_str()))
            .first::<models::PassengerEntity>(conn)
            .map_err(from_diesel_err)?,
    )
}

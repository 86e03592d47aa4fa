use super::*;

impl<'a> AirportRepo for DbReadOnly<'a> {
    fn create_airport(&self, _airport: &Airport) -> Result<()> {
        unreachable!();
    }
    fn update_airport(&self, _airport: &Airport) -> Result<()> {
        unreachable!();
    }

    fn get_airport(&self, id: &Id) -> Result<Airport> {
        get_airport(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_airport_by_code(&self, code: &IataCode) -> Result<Option<Airport>> {
        try_get_airport_by_code(&mut self.conn.borrow_mut(), code)
    }
    fn all_airports(&self) -> Result<Vec<Airport>> {
        all_airports(&mut self.conn.borrow_mut())
    }
    fn count_airports(&self) -> Result<usize> {
        count_airports(&mut self.conn.borrow_mut())
    }
}

impl<'a> AirportRepo for DbReadWrite<'a> {
    fn create_airport(&self, airport: &Airport) -> Result<()> {
        create_airport(&mut self.conn.borrow_mut(), airport)
    }
    fn update_airport(&self, airport: &Airport) -> Result<()> {
        update_airport(&mut self.conn.borrow_mut(), airport)
    }

    fn get_airport(&self, id: &Id) -> Result<Airport> {
        get_airport(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_airport_by_code(&self, code: &IataCode) -> Result<Option<Airport>> {
        try_get_airport_by_code(&mut self.conn.borrow_mut(), code)
    }
    fn all_airports(&self) -> Result<Vec<Airport>> {
        all_airports(&mut self.conn.borrow_mut())
    }
    fn count_airports(&self) -> Result<usize> {
        count_airports(&mut self.conn.borrow_mut())
    }
}

impl<'a> AirportRepo for DbConnection<'a> {
    fn create_airport(&self, airport: &Airport) -> Result<()> {
        create_airport(&mut self.conn.borrow_mut(), airport)
    }
    fn update_airport(&self, airport: &Airport) -> Result<()> {
        update_airport(&mut self.conn.borrow_mut(), airport)
    }

    fn get_airport(&self, id: &Id) -> Result<Airport> {
        get_airport(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_airport_by_code(&self, code: &IataCode) -> Result<Option<Airport>> {
        try_get_airport_by_code(&mut self.conn.borrow_mut(), code)
    }
    fn all_airports(&self) -> Result<Vec<Airport>> {
        all_airports(&mut self.conn.borrow_mut())
    }
    fn count_airports(&self) -> Result<usize> {
        count_airports(&mut self.conn.borrow_mut())
    }
}

fn load_airport(entity: models::AirportEntity) -> Result<Airport> {
    let models::AirportEntity {
        id,
        name,
        code,
        city,
        country,
        created_at,
    } = entity;
    Ok(Airport {
        id: id.into(),
        name,
        code: parse_stored(&code, "airport code")?,
        city,
        country,
        created_at: Timestamp::from_secs(created_at),
    })
}

fn create_airport(conn: &mut SqliteConnection, airport: &Airport) -> Result<()> {
    let new_airport = models::NewAirport::from(airport);
    diesel::insert_into(schema::airports::table)
        .values(&new_airport)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_airport(conn: &mut SqliteConnection, airport: &Airport) -> Result<()> {
    use schema::airports::dsl;
    let new_airport = models::NewAirport::from(airport);
    diesel::update(dsl::airports.filter(dsl::id.eq(new_airport.id)))
        .set(&new_airport)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_airport(conn: &mut SqliteConnection, id: &Id) -> Result<Airport> {
    use schema::airports::dsl;
    load_airport(
        dsl::airports
            .filter(dsl::id.eq(id.as_str()))
            .first::<models::AirportEntity>(conn)
            .map_err(from_diesel_err)?,
    )
}

fn try_get_airport_by_code(
    conn: &mut SqliteConnection,
    code: &IataCode,
) -> Result<Option<Airport>> {
    use schema::airports::dsl;
    dsl::airports
        .filter(dsl::code.eq(code.as_str()))
        .first::<models::AirportEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(load_airport)
        .transpose()
}

fn all_airports(conn: &mut SqliteConnection) -> Result<Vec<Airport>> {
    use schema::airports::dsl;
    dsl::airports
        .load::<models::AirportEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_airport)
        .collect()
}

fn count_airports(conn: &mut SqliteConnection) -> Result<usize> {
    use schema::airports::dsl;
    Ok(dsl::airports
        .select(diesel::dsl::count(dsl::id))
        .first::<i64>(conn)
        .map_err(from_diesel_err)? as usize)
}

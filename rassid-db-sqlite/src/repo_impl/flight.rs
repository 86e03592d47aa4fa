use super::*;

impl<'a> FlightRepo for DbReadOnly<'a> {
    fn create_flight(&self, _flight: &Flight) -> Result<()> {
        unreachable!();
    }
    fn update_flight(&self, _flight: &Flight) -> Result<()> {
        unreachable!();
    }

    fn get_flight(&self, id: &Id) -> Result<Flight> {
        get_flight(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_flight_by_number(&self, flight_number: &str) -> Result<Option<Flight>> {
        try_get_flight_by_number(&mut self.conn.borrow_mut(), flight_number)
    }
    fn all_flights(&self) -> Result<Vec<Flight>> {
        all_flights(&mut self.conn.borrow_mut())
    }
    fn flights_of_airport(&self, airport_id: &Id) -> Result<Vec<Flight>> {
        flights_of_airport(&mut self.conn.borrow_mut(), airport_id)
    }
    fn count_flights(&self) -> Result<usize> {
        count_flights(&mut self.conn.borrow_mut())
    }

    fn create_flight_status_change(&self, _change: &FlightStatusChange) -> Result<()> {
        unreachable!();
    }
    fn flight_status_history(&self, flight_id: &Id) -> Result<Vec<FlightStatusChange>> {
        flight_status_history(&mut self.conn.borrow_mut(), flight_id)
    }
}

impl<'a> FlightRepo for DbReadWrite<'a> {
    fn create_flight(&self, flight: &Flight) -> Result<()> {
        create_flight(&mut self.conn.borrow_mut(), flight)
    }
    fn update_flight(&self, flight: &Flight) -> Result<()> {
        update_flight(&mut self.conn.borrow_mut(), flight)
    }

    fn get_flight(&self, id: &Id) -> Result<Flight> {
        get_flight(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_flight_by_number(&self, flight_number: &str) -> Result<Option<Flight>> {
        try_get_flight_by_number(&mut self.conn.borrow_mut(), flight_number)
    }
    fn all_flights(&self) -> Result<Vec<Flight>> {
        all_flights(&mut self.conn.borrow_mut())
    }
    fn flights_of_airport(&self, airport_id: &Id) -> Result<Vec<Flight>> {
        flights_of_airport(&mut self.conn.borrow_mut(), airport_id)
    }
    fn count_flights(&self) -> Result<usize> {
        count_flights(&mut self.conn.borrow_mut())
    }

    fn create_flight_status_change(&self, change: &FlightStatusChange) -> Result<()> {
        create_flight_status_change(&mut self.conn.borrow_mut(), change)
    }
    fn flight_status_history(&self, flight_id: &Id) -> Result<Vec<FlightStatusChange>> {
        flight_status_history(&mut self.conn.borrow_mut(), flight_id)
    }
}

impl<'a> FlightRepo for DbConnection<'a> {
    fn create_flight(&self, flight: &Flight) -> Result<()> {
        create_flight(&mut self.conn.borrow_mut(), flight)
    }
    fn update_flight(&self, flight: &Flight) -> Result<()> {
        update_flight(&mut self.conn.borrow_mut(), flight)
    }

    fn get_flight(&self, id: &Id) -> Result<Flight> {
        get_flight(&mut self.conn.borrow_mut(), id)
    }
    fn try_get_flight_by_number(&self, flight_number: &str) -> Result<Option<Flight>> {
        try_get_flight_by_number(&mut self.conn.borrow_mut(), flight_number)
    }
    fn all_flights(&self) -> Result<Vec<Flight>> {
        all_flights(&mut self.conn.borrow_mut())
    }
    fn flights_of_airport(&self, airport_id: &Id) -> Result<Vec<Flight>> {
        flights_of_airport(&mut self.conn.borrow_mut(), airport_id)
    }
    fn count_flights(&self) -> Result<usize> {
        count_flights(&mut self.conn.borrow_mut())
    }

    fn create_flight_status_change(&self, change: &FlightStatusChange) -> Result<()> {
        create_flight_status_change(&mut self.conn.borrow_mut(), change)
    }
    fn flight_status_history(&self, flight_id: &Id) -> Result<Vec<FlightStatusChange>> {
        flight_status_history(&mut self.conn.borrow_mut(), flight_id)
    }
}

fn load_flight(entity: models::FlightEntity) -> Flight {
    let models::FlightEntity {
        id,
        flight_number,
        airline_code,
        status,
        scheduled_departure,
        scheduled_arrival,
        origin_airport_id,
        destination_airport_id,
        protected,
        updated_at,
    } = entity;
    Flight {
        id: id.into(),
        flight_number,
        airline_code,
        status: status.as_str().into(),
        scheduled_departure: Timestamp::from_secs(scheduled_departure),
        scheduled_arrival: Timestamp::from_secs(scheduled_arrival),
        origin_airport_id: origin_airport_id.into(),
        destination_airport_id: destination_airport_id.into(),
        protected,
        updated_at: Timestamp::from_secs(updated_at),
    }
}

fn load_flight_status_change(entity: models::FlightStatusChangeEntity) -> FlightStatusChange {
    let models::FlightStatusChangeEntity {
        id,
        flight_id,
        old_status,
        new_status,
        changed_at,
    } = entity;
    FlightStatusChange {
        id: id.into(),
        flight_id: flight_id.into(),
        old_status: old_status.as_str().into(),
        new_status: new_status.as_str().into(),
        changed_at: Timestamp::from_secs(changed_at),
    }
}

fn create_flight(conn: &mut SqliteConnection, flight: &Flight) -> Result<()> {
    let new_flight = models::NewFlight::from(flight);
    diesel::insert_into(schema::flights::table)
        .values(&new_flight)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_flight(conn: &mut SqliteConnection, flight: &Flight) -> Result<()> {
    use schema::flights::dsl;
    let new_flight = models::NewFlight::from(flight);
    diesel::update(dsl::flights.filter(dsl::id.eq(new_flight.id)))
        .set(&new_flight)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_flight(conn: &mut SqliteConnection, id: &Id) -> Result<Flight> {
    use schema::flights::dsl;
    Ok(load_flight(
        dsl::flights
            .filter(dsl::id.eq(id.as_str()))
            .first::<models::FlightEntity>(conn)
            .map_err(from_diesel_err)?,
    ))
}

fn try_get_flight_by_number(
    conn: &mut SqliteConnection,
    flight_number: &str,
) -> Result<Option<Flight>> {
    use schema::flights::dsl;
    Ok(dsl::flights
        .filter(dsl::flight_number.eq(flight_number))
        .first::<models::FlightEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(load_flight))
}

fn all_flights(conn: &mut SqliteConnection) -> Result<Vec<Flight>> {
    use schema::flights::dsl;
    Ok(dsl::flights
        .order_by(dsl::scheduled_departure.asc())
        .load::<models::FlightEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_flight)
        .collect())
}

fn flights_of_airport(conn: &mut SqliteConnection, airport_id: &Id) -> Result<Vec<Flight>> {
    use schema::flights::dsl;
    Ok(dsl::flights
        .filter(
            dsl::origin_airport_id
                .eq(airport_id.as_str())
                .or(dsl::destination_airport_id.eq(airport_id.as_str())),
        )
        .order_by(dsl::scheduled_departure.asc())
        .load::<models::FlightEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_flight)
        .collect())
}

fn count_flights(conn: &mut SqliteConnection) -> Result<usize> {
    use schema::flights::dsl;
    Ok(dsl::flights
        .select(diesel::dsl::count(dsl::id))
        .first::<i64>(conn)
        .map_err(from_diesel_err)? as usize)
}

fn create_flight_status_change(
    conn: &mut SqliteConnection,
    change: &FlightStatusChange,
) -> Result<()> {
    let new_change = models::NewFlightStatusChange::from(change);
    diesel::insert_into(schema::flight_status_changes::table)
        .values(&new_change)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn flight_status_history(
    conn: &mut SqliteConnection,
    flight_id: &Id,
) -> Result<Vec<FlightStatusChange>> {
    use schema::flight_status_changes::dsl;
    Ok(dsl::flight_status_changes
        .filter(dsl::flight_id.eq(flight_id.as_str()))
        .order_by(dsl::changed_at.asc())
        .load::<models::FlightStatusChangeEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_flight_status_change)
        .collect())
}

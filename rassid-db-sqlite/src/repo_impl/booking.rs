use super::*;

impl<'a> BookingRepo for DbReadOnly<'a> {
    fn create_booking(&self, _booking: &Booking) -> Result<()> {
        unreachable!();
    }

    fn get_booking(&self, id: &Id) -> Result<Booking> {
        get_booking(&mut self.conn.borrow_mut(), id)
    }
    fn bookings_of_flight(&self, flight_id: &Id) -> Result<Vec<Booking>> {
        bookings_of_flight(&mut self.conn.borrow_mut(), flight_id)
    }
    fn bookings_of_passenger(&self, passenger_id: &Id) -> Result<Vec<Booking>> {
        bookings_of_passenger(&mut self.conn.borrow_mut(), passenger_id)
    }
}

impl<'a> BookingRepo for DbReadWrite<'a> {
    fn create_booking(&self, booking: &Booking) -> Result<()> {
        create_booking(&mut self.conn.borrow_mut(), booking)
    }

    fn get_booking(&self, id: &Id) -> Result<Booking> {
        get_booking(&mut self.conn.borrow_mut(), id)
    }
    fn bookings_of_flight(&self, flight_id: &Id) -> Result<Vec<Booking>> {
        bookings_of_flight(&mut self.conn.borrow_mut(), flight_id)
    }
    fn bookings_of_passenger(&self, passenger_id: &Id) -> Result<Vec<Booking>> {
        bookings_of_passenger(&mut self.conn.borrow_mut(), passenger_id)
    }
}

impl<'a> BookingRepo for DbConnection<'a> {
    fn create_booking(&self, booking: &Booking) -> Result<()> {
        create_booking(&mut self.conn.borrow_mut(), booking)
    }

    fn get_booking(&self, id: &Id) -> Result<Booking> {
        get_booking(&mut self.conn.borrow_mut(), id)
    }
    fn bookings_of_flight(&self, flight_id: &Id) -> Result<Vec<Booking>> {
        bookings_of_flight(&mut self.conn.borrow_mut(), flight_id)
    }
    fn bookings_of_passenger(&self, passenger_id: &Id) -> Result<Vec<Booking>> {
        bookings_of_passenger(&mut self.conn.borrow_mut(), passenger_id)
    }
}

fn load_booking(entity: models::BookingEntity) -> Booking {
    let models::BookingEntity {
        id,
        passenger_id,
        flight_id,
        seat,
        booking_ref,
        created_at,
    } = entity;
    Booking {
        id: id.into(),
        passenger_id: passenger_id.into(),
        flight_id: flight_id.into(),
        seat,
        booking_ref,
        created_at: Timestamp::from_secs(created_at),
    }
}

fn create_booking(conn: &mut SqliteConnection, booking: &Booking) -> Result<()> {
    let new_booking = models::NewBooking::from(booking);
    diesel::insert_into(schema::bookings::table)
        .values(&new_booking)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_booking(conn: &mut SqliteConnection, id: &Id) -> Result<Booking> {
    use schema::bookings::dsl;
    Ok(load_booking(
        dsl::bookings
            .filter(dsl::id.eq(id.as_str()))
            .first::<models::BookingEntity>(conn)
            .map_err(from_diesel_err)?,
    ))
}

fn bookings_of_flight(conn: &mut SqliteConnection, flight_id: &Id) -> Result<Vec<Booking>> {
    use schema::bookings::dsl;
    Ok(dsl::bookings
        .filter(dsl::flight_id.eq(flight_id.as_str()))
        .load::<models::BookingEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_booking)
        .collect())
}

fn bookings_of_passenger(conn: &mut SqliteConnection, passenger_id: &Id) -> Result<Vec<Booking>> {
    use schema::bookings::dsl;
    Ok(dsl::bookings
        .filter(dsl::passenger_id.eq(passenger_id.as_str()))
        .load::<models::BookingEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_booking)
        .collect())
}

use super::*;

fn flight_query(
    status: Option<&str>,
    destination: Option<&str>,
    text: Option<&str>,
    departs_min: Option<i64>,
    departs_max: Option<i64>,
) -> usecases::FlightQuery {
    usecases::FlightQuery {
        status: status.map(Into::into),
        destination: destination.map(Into::into),
        text: text.map(ToOwned::to_owned),
        departs_min: departs_min.map(Timestamp::from_secs),
        departs_max: departs_max.map(Timestamp::from_secs),
    }
}

/// The public departure board.
#[get(
    "/flights?<status>&<destination>&<text>&<departs_min>&<departs_max>",
    format = "application/json"
)]
pub fn get_flights(
    db: sqlite::Connections,
    status: Option<&str>,
    destination: Option<&str>,
    text: Option<&str>,
    departs_min: Option<i64>,
    departs_max: Option<i64>,
) -> Result<Vec<json::Flight>> {
    let query = flight_query(status, destination, text, departs_min, departs_max);
    let flights = usecases::query_public_flights(&db.shared()?, &query)?;
    Ok(Json(flights.into_iter().map(Into::into).collect()))
}

#[get(
    "/airports/<id>/flights?<status>&<destination>&<text>&<departs_min>&<departs_max>",
    format = "application/json"
)]
pub fn get_airport_flights(
    db: sqlite::Connections,
    auth: Auth,
    id: &str,
    status: Option<&str>,
    destination: Option<&str>,
    text: Option<&str>,
    departs_min: Option<i64>,
    departs_max: Option<i64>,
) -> Result<Vec<json::Flight>> {
    let db = db.shared()?;
    let user = auth.user_with_min_role(&db, Role::Operator)?;
    let query = flight_query(status, destination, text, departs_min, departs_max);
    let flights = usecases::query_airport_flights(&db, &user, &Id::from(id), &query)?;
    Ok(Json(flights.into_iter().map(Into::into).collect()))
}

#[put("/flights/<id>/status", format = "application/json", data = "<data>")]
pub fn put_flight_status(
    db: sqlite::Connections,
    email: &State<EmailGw>,
    passenger_mail: &State<PassengerMail>,
    auth: Auth,
    id: &str,
    data: JsonResult<json::UpdateFlightStatus>,
) -> Result<json::Flight> {
    let operator = auth.user_with_min_role(&db.shared()?, Role::Operator)?;
    let update = from_json::flight_update(data?.into_inner());
    let flight = flows::update_flight(
        &db,
        email.inner(),
        passenger_mail.inner(),
        &operator,
        &Id::from(id),
        update,
    )?;
    Ok(Json(flight.into()))
}

#[post("/flights/<id>/gate", format = "application/json", data = "<data>")]
pub fn post_gate_assignment(
    db: sqlite::Connections,
    email: &State<EmailGw>,
    passenger_mail: &State<PassengerMail>,
    auth: Auth,
    id: &str,
    data: JsonResult<json::NewGateAssignment>,
) -> Result<json::GateAssignment> {
    let operator = auth.user_with_min_role(&db.shared()?, Role::Operator)?;
    let new = from_json::new_gate_assignment(data?.into_inner());
    let assignment = flows::assign_gate(
        &db,
        email.inner(),
        passenger_mail.inner(),
        &operator,
        &Id::from(id),
        new,
    )?;
    Ok(Json(assignment.into()))
}

#[post("/flights/<id>/bookings", format = "application/json", data = "<data>")]
pub fn post_booking(
    db: sqlite::Connections,
    email: &State<EmailGw>,
    passenger_mail: &State<PassengerMail>,
    auth: Auth,
    id: &str,
    data: JsonResult<json::NewBooking>,
) -> Result<json::Booking> {
    let operator = auth.user_with_min_role(&db.shared()?, Role::Operator)?;
    let new = from_json::new_booking(data?.into_inner());
    let (booking, _passenger) = flows::create_booking(
        &db,
        email.inner(),
        passenger_mail.inner(),
        &operator,
        &Id::from(id),
        new,
    )?;
    Ok(Json(booking.into()))
}

/// Manually triggered provider import, optionally restricted to one
/// airport. Returns the number of imported flights.
#[post("/flights/sync?<airport>", format = "application/json")]
pub fn post_flights_sync(
    db: sqlite::Connections,
    flight_data: &State<FlightData>,
    email: &State<EmailGw>,
    passenger_mail: &State<PassengerMail>,
    auth: Auth,
    airport: Option<&str>,
) -> Result<u32> {
    auth.user_with_min_role(&db.shared()?, Role::PlatformAdmin)?;
    let airport = airport
        .map(|code| code.parse::<IataCode>())
        .transpose()
        .map_err(|_| AppError::from(ParameterError::AirportCode))?;
    let log = flows::import_flights(
        &db,
        flight_data.inner(),
        email.inner(),
        passenger_mail.inner(),
        airport.as_ref(),
    )?;
    Ok(Json(log.imported_count))
}

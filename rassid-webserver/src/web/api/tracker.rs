use super::*;

/// The public tracking view behind the emailed capability link.
#[get("/tracker/<token>", format = "application/json")]
pub fn get_tracked_booking(db: sqlite::Connections, token: &str) -> Result<json::TrackedBooking> {
    let token = TrackingToken::from(token.to_owned());
    let view = usecases::track_passenger(&db.shared()?, &token)?;
    Ok(Json(to_json::tracked_booking(view)))
}

/// Indoor position of the currently assigned gate, if the maps
/// provider knows the terminal.
#[get("/tracker/<token>/gate-location", format = "application/json")]
pub fn get_gate_location(
    db: sqlite::Connections,
    indoor_map: &State<IndoorMap>,
    token: &str,
) -> Result<Option<json::GateLocation>> {
    let token = TrackingToken::from(token.to_owned());
    let (airport_code, gate) = {
        let db = db.shared()?;
        let view = usecases::track_passenger(&db, &token)?;
        let airport = db.get_airport(&view.flight.origin_airport_id)?;
        (airport.code, view.gate)
    };
    let location = gate.and_then(|gate| {
        indoor_map
            .locate_gate(&airport_code, &gate.terminal, &gate.gate)
            .map(to_json::gate_location)
    });
    Ok(Json(location))
}

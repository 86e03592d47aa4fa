use super::prelude::*;
use crate::{usecases, util::validate};

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub language: Language,
    pub seat: Option<String>,
    pub booking_ref: String,
}

/// Links a passenger to a flight. Passengers are keyed by their
/// email address and keep their tracking token across bookings.
pub fn create_booking<R>(
    repo: &R,
    operator: &User,
    flight_id: &Id,
    new: NewBooking,
) -> Result<(Booking, Passenger)>
where
    R: FlightRepo + PassengerRepo + BookingRepo,
{
    let flight = repo.get_flight(flight_id)?;
    usecases::authorize_flight_edit(operator, &flight)?;

    let NewBooking {
        full_name,
        email,
        phone,
        language,
        seat,
        booking_ref,
    } = new;
    if full_name.trim().is_empty() {
        return Err(Error::Title);
    }
    if booking_ref.trim().is_empty() {
        return Err(Error::BookingRef);
    }
    if !validate::is_valid_email(&email) {
        return Err(Error::EmailAddress);
    }
    let email = email.parse::<EmailAddress>()?;

    let passenger = match repo.try_get_passenger_by_email(&email)? {
        Some(passenger) => passenger,
        None => {
            let passenger = Passenger {
                id: Id::new(),
                full_name: full_name.trim().to_owned(),
                email,
                phone,
                language,
                tracking_token: TrackingToken::new(),
            };
            repo.create_passenger(&passenger)?;
            passenger
        }
    };

    let booking = Booking {
        id: Id::new(),
        passenger_id: passenger.id.clone(),
        flight_id: flight.id.clone(),
        seat,
        booking_ref: booking_ref.trim().to_owned(),
        created_at: Timestamp::now(),
    };
    repo.create_booking(&booking)?;
    Ok((booking, passenger))
}

mod activate_subscription;
mod approve_subscription_request;
mod assign_gate;
mod authorize;
mod cancel_subscription_request;
mod comment_ticket;
mod create_booking;
mod create_ticket;
mod employees;
mod error;
mod import_flights;
mod login;
mod notify_booked_passengers;
mod prepare_checkout;
mod query_flights;
mod query_tickets;
mod reject_subscription_request;
mod renew_subscription;
mod send_departure_reminders;
mod stats;
mod submit_contact_message;
mod submit_subscription_request;
mod track_passenger;
mod transition_ticket;
mod update_flight;

#[cfg(test)]
pub mod tests;

type Result<T> = std::result::Result<T, Error>;

pub use self::{
    activate_subscription::*, approve_subscription_request::*, assign_gate::*, authorize::*,
    cancel_subscription_request::*, comment_ticket::*, create_booking::*, create_ticket::*,
    employees::*, error::Error, import_flights::*, login::*, notify_booked_passengers::*,
    prepare_checkout::*, query_flights::*, query_tickets::*, reject_subscription_request::*,
    renew_subscription::*, send_departure_reminders::*, stats::*, submit_contact_message::*,
    submit_subscription_request::*, track_passenger::*, transition_ticket::*, update_flight::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{db::*, entities::*, repositories::*};
}
use self::prelude::*;

pub fn get_user<R>(repo: &R, session_user: &User, user_id: &Id) -> Result<User>
where
    R: UserRepo,
{
    let user = repo.get_user(user_id)?;
    if session_user.role < Role::PlatformAdmin && session_user.id != user.id {
        return Err(Error::Forbidden);
    }
    Ok(user)
}

//! Transactional flows on top of the usecase layer.
//!
//! Each flow opens the database connections it needs, runs the
//! business logic in a transaction and triggers notifications after
//! the transaction committed. A failed notification never rolls back
//! a committed flow.

#[macro_use]
extern crate log;

mod approve_subscription_request;
mod assign_gate;
mod comment_ticket;
mod create_booking;
mod create_platform_admin;
mod create_ticket;
mod employees;
mod import_flights;
mod reject_subscription_request;
mod renew_subscription;
mod send_departure_reminders;
mod submit_contact_message;
mod submit_subscription_request;
mod subscription_checkout;
mod transition_ticket;
mod update_flight;

pub mod prelude {
    pub use super::{
        approve_subscription_request::*, assign_gate::*, comment_ticket::*, create_booking::*,
        create_platform_admin::*, create_ticket::*, employees::*, import_flights::*,
        reject_subscription_request::*, renew_subscription::*, send_departure_reminders::*,
        submit_contact_message::*, submit_subscription_request::*, subscription_checkout::*,
        transition_ticket::*, update_flight::*,
    };
}

pub mod error;

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use rassid_core::{db::*, entities::*, repositories::*, usecases};

pub(crate) mod notifications;

#[cfg(test)]
pub(crate) mod tests;

pub(crate) mod sqlite {
    pub use rassid_db_sqlite::Connections;
}

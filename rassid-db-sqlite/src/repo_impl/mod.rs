// NOTE:
// All timestamps with the `_at` postfix are stored
// as unix timestamp in seconds.

use std::str::FromStr;

use anyhow::anyhow;
use diesel::{
    self,
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
};
use num_traits::{FromPrimitive, ToPrimitive};

use rassid_core::{
    entities::*,
    repositories::{self as repo, *},
};

use super::*;

mod airport;
mod booking;
mod contact_message;
mod flight;
mod flight_import_log;
mod gate;
mod notification_log;
mod passenger;
mod payment;
mod subscription;
mod subscription_request;
mod ticket;
mod user;

type Result<T> = std::result::Result<T, repo::Error>;

pub fn from_diesel_err(err: DieselError) -> repo::Error {
    match err {
        DieselError::NotFound => repo::Error::NotFound,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            repo::Error::AlreadyExists
        }
        _ => repo::Error::Other(err.into()),
    }
}

fn load_role(role: i16) -> Result<Role> {
    Role::from_i16(role).ok_or_else(|| anyhow!("Invalid user role: {role}").into())
}

// Enum and address columns are only ever written from validated
// entities, so an unparsable value indicates a corrupted database.
fn parse_stored<T: FromStr>(value: &str, what: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| anyhow!("Invalid {what}: {value}").into())
}

use num_derive::{FromPrimitive, ToPrimitive};

use crate::{email::EmailAddress, id::Id, password::Password, time::Timestamp};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id         : Id,
    pub email      : EmailAddress,
    pub password   : Password,
    pub role       : Role,
    /// Airport the account belongs to.
    /// Mandatory for operators and airport admins,
    /// always absent for platform admins.
    pub airport_id : Option<Id>,
    pub created_at : Timestamp,
}

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, FromPrimitive, ToPrimitive)]
pub enum Role {
    Guest         = 0,
    Operator      = 1,
    AirportAdmin  = 2,
    PlatformAdmin = 3,
}

impl Default for Role {
    fn default() -> Role {
        Role::Guest
    }
}

impl User {
    /// Staff accounts are scoped to exactly one airport.
    pub fn is_scoped_to(&self, airport_id: &Id) -> bool {
        self.airport_id.as_ref() == Some(airport_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_are_ordered_by_privilege() {
        assert!(Role::Guest < Role::Operator);
        assert!(Role::Operator < Role::AirportAdmin);
        assert!(Role::AirportAdmin < Role::PlatformAdmin);
    }
}

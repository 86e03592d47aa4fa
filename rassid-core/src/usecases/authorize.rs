use super::prelude::*;

pub fn authorize_user_by_email<R>(
    repo: &R,
    email: &EmailAddress,
    min_required_role: Role,
) -> Result<User>
where
    R: UserRepo,
{
    let user = repo.try_get_user_by_email(email)?.ok_or(Error::Forbidden)?;
    authorize_role(&user, min_required_role)?;
    Ok(user)
}

pub fn authorize_role(user: &User, min_required_role: Role) -> Result<()> {
    if user.role < min_required_role {
        return Err(Error::Forbidden);
    }
    Ok(())
}

/// Platform admins pass unconditionally, staff only for their own airport.
pub fn authorize_airport_member(user: &User, airport_id: &Id) -> Result<()> {
    if user.role == Role::PlatformAdmin {
        return Ok(());
    }
    if user.role >= Role::Operator && user.is_scoped_to(airport_id) {
        return Ok(());
    }
    Err(Error::Forbidden)
}

/// Flights are owned by their origin airport.
pub fn authorize_flight_edit(user: &User, flight: &Flight) -> Result<()> {
    authorize_role(user, Role::Operator)?;
    authorize_airport_member(user, &flight.origin_airport_id)
}

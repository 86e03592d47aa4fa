use super::prelude::*;

/// Checks the credentials and refuses staff of airports whose
/// subscription has lapsed. Platform admins are never locked out.
pub fn login_with_email_and_password<R>(repo: &R, email: &str, password: &str) -> Result<User>
where
    R: UserRepo + SubscriptionRepo,
{
    let email: EmailAddress = email.parse().map_err(|_| Error::Credentials)?;
    let Some(user) = repo.try_get_user_by_email(&email)? else {
        return Err(Error::Credentials);
    };
    if !user.password.verify(password) {
        return Err(Error::Credentials);
    }
    if let Some(airport_id) = &user.airport_id {
        let active = repo
            .try_get_subscription_by_airport(airport_id)?
            .map(|subscription| subscription.is_active(Timestamp::now()))
            .unwrap_or(false);
        if !active {
            return Err(Error::SubscriptionExpired);
        }
    }
    Ok(user)
}

use super::prelude::*;
use crate::util::validate;

#[derive(Debug, Clone)]
pub struct NewSubscriptionRequest {
    pub airport_name: String,
    pub airport_code: String,
    pub city: String,
    pub country: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub plan: SubscriptionPlan,
    pub license_file: String,
    pub commercial_record_file: Option<String>,
}

/// Files a new onboarding request submitted through the public form.
pub fn submit_subscription_request<R>(
    repo: &R,
    new: NewSubscriptionRequest,
) -> Result<SubscriptionRequest>
where
    R: SubscriptionRequestRepo,
{
    let NewSubscriptionRequest {
        airport_name,
        airport_code,
        city,
        country,
        contact_email,
        contact_phone,
        plan,
        license_file,
        commercial_record_file,
    } = new;

    if airport_name.trim().is_empty() {
        return Err(Error::Title);
    }
    let code = airport_code.parse::<IataCode>()?;
    if !validate::is_valid_email(&contact_email) {
        return Err(Error::EmailAddress);
    }
    let contact_email = contact_email.parse::<EmailAddress>()?;
    let contact_phone = contact_phone.trim().to_owned();
    if !validate::is_valid_saudi_mobile(&contact_phone) {
        return Err(Error::Phone);
    }
    if license_file.trim().is_empty() {
        return Err(Error::Title);
    }

    let request = SubscriptionRequest {
        id: Id::new(),
        airport: PendingAirport {
            name: airport_name.trim().to_owned(),
            code,
            city: city.trim().to_owned(),
            country: country.trim().to_owned(),
        },
        contact_email,
        contact_phone,
        plan,
        license_file,
        commercial_record_file,
        status: RequestStatus::Pending,
        rejection_reason: None,
        created_at: Timestamp::now(),
    };
    repo.create_subscription_request(&request)?;
    Ok(request)
}

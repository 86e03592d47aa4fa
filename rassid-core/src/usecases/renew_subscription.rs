use super::prelude::*;
use crate::usecases;

/// Files a renewal for the admin's own airport. The request starts
/// out as `approved_pending_payment` and reuses the previously
/// uploaded license, so it routes straight to checkout and from
/// there through the regular payment pipeline.
pub fn request_subscription_renewal<R>(
    repo: &R,
    admin: &User,
    plan: SubscriptionPlan,
) -> Result<SubscriptionRequest>
where
    R: SubscriptionRequestRepo + AirportRepo,
{
    usecases::authorize_role(admin, Role::AirportAdmin)?;
    let airport_id = admin.airport_id.as_ref().ok_or(Error::Forbidden)?;
    let airport = repo.get_airport(airport_id)?;

    let previous = repo
        .all_subscription_requests()?
        .into_iter()
        .filter(|request| {
            request.airport.code == airport.code && request.status == RequestStatus::Approved
        })
        .max_by_key(|request| request.created_at);
    let Some(previous) = previous else {
        return Err(Error::Repo(crate::repositories::Error::NotFound));
    };

    let request = SubscriptionRequest {
        id: Id::new(),
        airport: PendingAirport {
            name: airport.name.clone(),
            code: airport.code.clone(),
            city: airport.city.clone(),
            country: airport.country.clone(),
        },
        contact_email: admin.email.clone(),
        contact_phone: previous.contact_phone.clone(),
        plan,
        license_file: previous.license_file.clone(),
        commercial_record_file: previous.commercial_record_file.clone(),
        status: RequestStatus::ApprovedPendingPayment,
        rejection_reason: None,
        created_at: Timestamp::now(),
    };
    repo.create_subscription_request(&request)?;
    Ok(request)
}

use super::prelude::*;
use crate::usecases;

pub fn reject_subscription_request<R>(
    repo: &R,
    admin: &User,
    request_id: &Id,
    reason: Option<String>,
) -> Result<SubscriptionRequest>
where
    R: SubscriptionRequestRepo,
{
    usecases::authorize_role(admin, Role::PlatformAdmin)?;
    let mut request = repo.get_subscription_request(request_id)?;
    request.status = request.status.transition_to(RequestStatus::Rejected)?;
    request.rejection_reason = reason.filter(|reason| !reason.trim().is_empty());
    repo.update_subscription_request(&request)?;
    Ok(request)
}

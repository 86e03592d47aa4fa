use super::prelude::*;

/// Self-service cancellation by the original requester, only while
/// the request is still open. Stored as a rejection with a canned
/// reason so the history keeps a single terminal failure state.
pub fn cancel_subscription_request<R>(
    repo: &R,
    request_id: &Id,
    contact_email: &EmailAddress,
) -> Result<SubscriptionRequest>
where
    R: SubscriptionRequestRepo,
{
    let mut request = repo.get_subscription_request(request_id)?;
    if request.contact_email != *contact_email {
        return Err(Error::Forbidden);
    }
    request.status = request.status.transition_to(RequestStatus::Rejected)?;
    request.rejection_reason = Some("Cancelled by the requester".to_owned());
    repo.update_subscription_request(&request)?;
    Ok(request)
}

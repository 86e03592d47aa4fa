use rassid_core::gateways::notify::{NotificationEvent, NotificationGateway};

use super::*;

/// Rejects an open request. The applicant is told about the outcome
/// whether or not a reason was given.
pub fn reject_subscription_request(
    connections: &sqlite::Connections,
    notify: &dyn NotificationGateway,
    admin: &User,
    request_id: &Id,
    reason: Option<String>,
) -> Result<SubscriptionRequest> {
    let request = connections.exclusive()?.transaction(|conn| {
        usecases::reject_subscription_request(conn, admin, request_id, reason).map_err(|err| {
            warn!(
                "Unable to reject subscription request {}: {}",
                request_id, err
            );
            err
        })
    })?;

    notifications::send_and_log(
        connections,
        notify,
        NotificationEvent::SubscriptionRejected {
            request: &request,
            reason: request.rejection_reason.as_deref().unwrap_or("Not specified"),
        },
    );
    Ok(request)
}

/// Self service cancellation from the requester's status page. No
/// email for a decision the requester made themselves.
pub fn cancel_subscription_request(
    connections: &sqlite::Connections,
    request_id: &Id,
    contact_email: &EmailAddress,
) -> Result<SubscriptionRequest> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::cancel_subscription_request(conn, request_id, contact_email).map_err(|err| {
            warn!(
                "Unable to cancel subscription request {}: {}",
                request_id, err
            );
            err
        })
    })?)
}

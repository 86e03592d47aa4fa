use rassid_core::gateways::notify::{NotificationEvent, NotificationGateway};

use super::*;

/// Files a renewal for the admin's own airport. Renewals skip the
/// review queue and go straight to checkout.
pub fn request_subscription_renewal(
    connections: &sqlite::Connections,
    notify: &dyn NotificationGateway,
    admin: &User,
    plan: SubscriptionPlan,
    checkout_base_url: &str,
) -> Result<SubscriptionRequest> {
    let request = connections.exclusive()?.transaction(|conn| {
        usecases::request_subscription_renewal(conn, admin, plan).map_err(|err| {
            warn!("Unable to file a renewal for {}: {}", admin.email, err);
            err
        })
    })?;

    let checkout_url = approve_subscription_request::checkout_url(checkout_base_url, &request);
    notifications::send_and_log(
        connections,
        notify,
        NotificationEvent::SubscriptionAwaitingPayment {
            request: &request,
            checkout_url: &checkout_url,
        },
    );
    Ok(request)
}

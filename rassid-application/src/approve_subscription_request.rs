use rassid_core::gateways::notify::{NotificationEvent, NotificationGateway};

use super::*;

/// Approves a pending request and mails the checkout link to the
/// applicant. The tenant is only provisioned after the payment.
pub fn approve_subscription_request(
    connections: &sqlite::Connections,
    notify: &dyn NotificationGateway,
    admin: &User,
    request_id: &Id,
    checkout_base_url: &str,
) -> Result<SubscriptionRequest> {
    let request = connections.exclusive()?.transaction(|conn| {
        usecases::approve_awaiting_payment(conn, admin, request_id).map_err(|err| {
            warn!(
                "Unable to approve subscription request {}: {}",
                request_id, err
            );
            err
        })
    })?;

    let checkout_url = checkout_url(checkout_base_url, &request);
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

/// Immediate activation without a payment step, for airports that
/// are onboarded out of band.
pub fn activate_subscription_directly(
    connections: &sqlite::Connections,
    notify: &dyn NotificationGateway,
    admin: &User,
    request_id: &Id,
) -> Result<usecases::Activation> {
    let activation = connections.exclusive()?.transaction(|conn| {
        usecases::activate_subscription_directly(conn, admin, request_id).map_err(|err| {
            warn!(
                "Unable to activate subscription request {}: {}",
                request_id, err
            );
            err
        })
    })?;

    notifications::send_and_log(
        connections,
        notify,
        NotificationEvent::SubscriptionActivated {
            request: &activation.request,
            subscription: &activation.subscription,
            credentials: activation.credentials.as_ref(),
        },
    );
    Ok(activation)
}

/// The applicant facing checkout page for a request.
pub(crate) fn checkout_url(base_url: &str, request: &SubscriptionRequest) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), request.id)
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    const CHECKOUT_BASE: &str = "https://rassid.example/subscribe/checkout";

    fn approve(
        fixture: &BackendFixture,
        admin: &User,
        request_id: &Id,
    ) -> super::Result<SubscriptionRequest> {
        super::approve_subscription_request(
            &fixture.db_connections,
            &fixture.notify,
            admin,
            request_id,
            CHECKOUT_BASE,
        )
    }

    #[test]
    fn approval_issues_a_checkout_link() {
        let fixture = BackendFixture::new();
        let admin = fixture.create_user(Role::PlatformAdmin, None, "root@rassid.sa", "secret1");
        let request = fixture.submit_request("RUH");

        let approved = approve(&fixture, &admin, &request.id).unwrap();
        assert_eq!(approved.status, RequestStatus::ApprovedPendingPayment);
        assert_eq!(
            fixture.notify.events.borrow().as_slice(),
            &[
                NotificationType::RequestReceived,
                NotificationType::CheckoutIssued
            ]
        );
    }

    #[test]
    fn a_second_approval_resends_the_checkout_link() {
        let fixture = BackendFixture::new();
        let admin = fixture.create_user(Role::PlatformAdmin, None, "root@rassid.sa", "secret1");
        let request = fixture.submit_request("RUH");

        approve(&fixture, &admin, &request.id).unwrap();
        let reapproved = approve(&fixture, &admin, &request.id).unwrap();
        assert_eq!(reapproved.status, RequestStatus::ApprovedPendingPayment);
        assert_eq!(
            fixture.notify.events.borrow().as_slice(),
            &[
                NotificationType::RequestReceived,
                NotificationType::CheckoutIssued,
                NotificationType::CheckoutIssued
            ]
        );
    }

    #[test]
    fn airport_staff_cannot_approve() {
        let fixture = BackendFixture::new();
        let (_, airport_admin) = fixture.default_tenant();
        let request = fixture.submit_request("JED");

        assert!(matches!(
            approve(&fixture, &airport_admin, &request.id),
            Err(AppError::Business(BError::Parameter(
                usecases::Error::Forbidden
            )))
        ));
        let stored = fixture
            .db_connections
            .shared()
            .unwrap()
            .get_subscription_request(&request.id)
            .unwrap();
        assert_eq!(stored.status, RequestStatus::Pending);
    }

    #[test]
    fn direct_activation_provisions_the_tenant() {
        let fixture = BackendFixture::new();
        let admin = fixture.create_user(Role::PlatformAdmin, None, "root@rassid.sa", "secret1");
        let request = fixture.submit_request("RUH");

        let activation = super::activate_subscription_directly(
            &fixture.db_connections,
            &fixture.notify,
            &admin,
            &request.id,
        )
        .unwrap();
        assert_eq!(activation.request.status, RequestStatus::Approved);
        assert_eq!(activation.airport.code.as_str(), "RUH");
        let credentials = activation.credentials.expect("fresh tenant credentials");

        // the provisioned admin account can sign in right away
        let user = usecases::login_with_email_and_password(
            &fixture.db_connections.shared().unwrap(),
            credentials.email.as_str(),
            &credentials.password,
        )
        .unwrap();
        assert_eq!(user.role, Role::AirportAdmin);
        assert_eq!(user.airport_id.as_ref(), Some(&activation.airport.id));
        assert_eq!(
            fixture.notify.events.borrow().last(),
            Some(&NotificationType::SubscriptionActivated)
        );
    }
}

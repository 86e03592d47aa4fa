use rassid_core::gateways::{
    notify::{NotificationEvent, NotificationGateway},
    payment::{CheckoutSession, PaymentGateway, PaymentStatus},
};

use super::*;

/// Where to send the applicant who opened the checkout page.
#[derive(Debug)]
pub enum CheckoutStart {
    /// Off to the provider's hosted checkout page.
    Redirect(CheckoutSession),
    /// Nothing left to pay, the sign in page is the right place.
    AlreadyApproved,
}

/// Opens a checkout session at the payment provider for a request
/// that awaits payment.
pub fn begin_checkout(
    connections: &sqlite::Connections,
    payment_gateway: &dyn PaymentGateway,
    request_id: &Id,
) -> Result<CheckoutStart> {
    let preparation = usecases::prepare_checkout(&connections.shared()?, request_id)?;
    match preparation {
        usecases::CheckoutPreparation::Ready {
            request,
            amount_usd_cents,
        } => {
            let session = payment_gateway.create_checkout_session(&request, amount_usd_cents)?;
            info!(
                "Opened checkout session {} for subscription request {}",
                session.session_id, request.id
            );
            Ok(CheckoutStart::Redirect(session))
        }
        usecases::CheckoutPreparation::AlreadyApproved => Ok(CheckoutStart::AlreadyApproved),
    }
}

/// Activates or renews the subscription once the provider confirms
/// the payment. Client redirects claiming success are never trusted.
pub fn confirm_subscription_payment(
    connections: &sqlite::Connections,
    notify: &dyn NotificationGateway,
    payment_gateway: &dyn PaymentGateway,
    request_id: &Id,
    session_id: &str,
) -> Result<usecases::Activation> {
    match payment_gateway.verify_session(session_id)? {
        PaymentStatus::Completed => (),
        PaymentStatus::Pending | PaymentStatus::Failed => {
            warn!(
                "Rejecting unpaid checkout session {} for subscription request {}",
                session_id, request_id
            );
            return Err(usecases::Error::PaymentIncomplete.into());
        }
    }

    let activation = connections.exclusive()?.transaction(|conn| {
        usecases::activate_paid_subscription(conn, request_id, session_id).map_err(|err| {
            warn!(
                "Unable to activate paid subscription request {}: {}",
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

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    fn confirm(
        fixture: &BackendFixture,
        request_id: &Id,
        session_id: &str,
    ) -> super::Result<usecases::Activation> {
        super::confirm_subscription_payment(
            &fixture.db_connections,
            &fixture.notify,
            &fixture.payment_gateway,
            request_id,
            session_id,
        )
    }

    #[test]
    fn pending_requests_have_no_checkout() {
        let fixture = BackendFixture::new();
        let request = fixture.submit_request("RUH");

        assert!(matches!(
            super::begin_checkout(&fixture.db_connections, &fixture.payment_gateway, &request.id),
            Err(AppError::Business(BError::Parameter(
                usecases::Error::NotAwaitingPayment
            )))
        ));
        assert!(fixture.payment_gateway.sessions.borrow().is_empty());
    }

    #[test]
    fn unpaid_sessions_never_activate() {
        let fixture = BackendFixture::new();
        let admin = fixture.create_user(Role::PlatformAdmin, None, "root@rassid.sa", "secret1");
        let request = fixture.submit_request("RUH");
        flows::approve_subscription_request(
            &fixture.db_connections,
            &fixture.notify,
            &admin,
            &request.id,
            "https://rassid.example/subscribe/checkout",
        )
        .unwrap();
        let session_id = match super::begin_checkout(
            &fixture.db_connections,
            &fixture.payment_gateway,
            &request.id,
        )
        .unwrap()
        {
            super::CheckoutStart::Redirect(session) => session.session_id,
            super::CheckoutStart::AlreadyApproved => panic!("nothing was paid yet"),
        };

        *fixture.payment_gateway.verdict.borrow_mut() = PaymentStatus::Pending;
        assert!(matches!(
            confirm(&fixture, &request.id, &session_id),
            Err(AppError::Business(BError::Parameter(
                usecases::Error::PaymentIncomplete
            )))
        ));

        // the request still awaits its payment
        let stored = fixture
            .db_connections
            .shared()
            .unwrap()
            .get_subscription_request(&request.id)
            .unwrap();
        assert_eq!(stored.status, RequestStatus::ApprovedPendingPayment);
        assert!(fixture
            .db_connections
            .shared()
            .unwrap()
            .all_subscriptions()
            .unwrap()
            .is_empty());

        // once the provider reports the payment the activation goes through
        *fixture.payment_gateway.verdict.borrow_mut() = PaymentStatus::Completed;
        let activation = confirm(&fixture, &request.id, &session_id).unwrap();
        assert_eq!(activation.request.status, RequestStatus::Approved);
        let payments = fixture
            .db_connections
            .shared()
            .unwrap()
            .payments_of_request(&request.id)
            .unwrap();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].provider_session, session_id);
    }
}

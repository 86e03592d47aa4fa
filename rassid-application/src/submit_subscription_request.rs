use rassid_core::gateways::notify::{NotificationEvent, NotificationGateway};

use super::*;

/// Files an onboarding request coming in through the public form and
/// notifies the platform side.
pub fn submit_subscription_request(
    connections: &sqlite::Connections,
    notify: &dyn NotificationGateway,
    new: usecases::NewSubscriptionRequest,
) -> Result<SubscriptionRequest> {
    let request = connections.exclusive()?.transaction(|conn| {
        usecases::submit_subscription_request(conn, new).map_err(|err| {
            warn!("Unable to file a subscription request: {}", err);
            err
        })
    })?;

    if let Err(err) = notify_platform_admins(connections, notify, &request) {
        error!(
            "Failed to send notifications for subscription request {}: {}",
            request.id, err
        );
    }

    Ok(request)
}

fn notify_platform_admins(
    connections: &sqlite::Connections,
    notify: &dyn NotificationGateway,
    request: &SubscriptionRequest,
) -> Result<()> {
    let admin_addresses = notifications::platform_admin_addresses(&connections.shared()?)?;
    notifications::send_and_log(
        connections,
        notify,
        NotificationEvent::SubscriptionRequestReceived {
            request,
            admin_addresses: &admin_addresses,
        },
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    fn submit(
        fixture: &BackendFixture,
        new: usecases::NewSubscriptionRequest,
    ) -> super::Result<SubscriptionRequest> {
        super::submit_subscription_request(&fixture.db_connections, &fixture.notify, new)
    }

    #[test]
    fn file_a_request_and_notify_the_platform() {
        let fixture = BackendFixture::new();
        fixture.create_user(Role::PlatformAdmin, None, "root@rassid.sa", "secret1");

        let request = submit(&fixture, default_request_form("RUH")).unwrap();
        assert_eq!(request.status, RequestStatus::Pending);

        let stored = fixture
            .db_connections
            .shared()
            .unwrap()
            .get_subscription_request(&request.id)
            .unwrap();
        assert_eq!(stored.airport.code.as_str(), "RUH");
        assert_eq!(
            fixture.notify.events.borrow().as_slice(),
            &[NotificationType::RequestReceived]
        );
        // the attempted delivery went onto the email log
        let log = fixture
            .db_connections
            .shared()
            .unwrap()
            .all_email_log_entries()
            .unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].status, DeliveryStatus::Sent);
    }

    #[test]
    fn invalid_forms_are_rolled_back_and_stay_silent() {
        let fixture = BackendFixture::new();
        fixture.create_user(Role::PlatformAdmin, None, "root@rassid.sa", "secret1");

        let mut form = default_request_form("RUH");
        form.contact_phone = "12345".into();
        assert!(submit(&fixture, form).is_err());

        let stored = fixture
            .db_connections
            .shared()
            .unwrap()
            .all_subscription_requests()
            .unwrap();
        assert!(stored.is_empty());
        assert!(fixture.notify.events.borrow().is_empty());
    }
}

use rassid_core::gateways::notify::{NotificationEvent, NotificationGateway};

use super::*;

/// Files a message from the public contact form and forwards it to
/// the platform admins.
pub fn submit_contact_message(
    connections: &sqlite::Connections,
    notify: &dyn NotificationGateway,
    new: usecases::NewContactMessage,
) -> Result<ContactMessage> {
    let message = connections.exclusive()?.transaction(|conn| {
        usecases::submit_contact_message(conn, new).map_err(|err| {
            warn!("Unable to file a contact message: {}", err);
            err
        })
    })?;

    if let Err(err) = notify_platform_admins(connections, notify, &message) {
        error!(
            "Failed to forward contact message {}: {}",
            message.id, err
        );
    }
    Ok(message)
}

fn notify_platform_admins(
    connections: &sqlite::Connections,
    notify: &dyn NotificationGateway,
    message: &ContactMessage,
) -> Result<()> {
    let admin_addresses = notifications::platform_admin_addresses(&connections.shared()?)?;
    notifications::send_and_log(
        connections,
        notify,
        NotificationEvent::ContactMessageReceived {
            message,
            admin_addresses: &admin_addresses,
        },
    );
    Ok(())
}

pub fn resolve_contact_message(
    connections: &sqlite::Connections,
    admin: &User,
    id: &Id,
) -> Result<ContactMessage> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::resolve_contact_message(conn, admin, id).map_err(|err| {
            warn!("Unable to resolve contact message {}: {}", id, err);
            err
        })
    })?)
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    fn message_form() -> usecases::NewContactMessage {
        usecases::NewContactMessage {
            first_name: "Nora".into(),
            last_name: "Alqahtani".into(),
            email: "nora@mail.sa".into(),
            subject: "Pricing question".into(),
            message: "Is there a trial period?".into(),
        }
    }

    #[test]
    fn messages_are_forwarded_to_the_platform() {
        let fixture = BackendFixture::new();
        fixture.create_user(Role::PlatformAdmin, None, "root@rassid.sa", "secret1");

        let message =
            super::submit_contact_message(&fixture.db_connections, &fixture.notify, message_form())
                .unwrap();
        assert!(!message.resolved);
        assert_eq!(
            fixture.notify.events.borrow().as_slice(),
            &[NotificationType::ContactMessageReceived]
        );
        let log = fixture
            .db_connections
            .shared()
            .unwrap()
            .all_email_log_entries()
            .unwrap();
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn resolution_is_platform_only() {
        let fixture = BackendFixture::new();
        let (_, airport_admin) = fixture.default_tenant();
        let platform = fixture.create_user(Role::PlatformAdmin, None, "root@rassid.sa", "secret1");
        let message =
            super::submit_contact_message(&fixture.db_connections, &fixture.notify, message_form())
                .unwrap();

        assert!(matches!(
            super::resolve_contact_message(&fixture.db_connections, &airport_admin, &message.id),
            Err(AppError::Business(BError::Parameter(
                usecases::Error::Forbidden
            )))
        ));
        let resolved =
            super::resolve_contact_message(&fixture.db_connections, &platform, &message.id)
                .unwrap();
        assert!(resolved.resolved);
    }
}

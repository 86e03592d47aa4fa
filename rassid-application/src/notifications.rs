use rassid_core::gateways::notify::{DeliveryReceipt, NotificationEvent, NotificationGateway};

use super::*;

/// Addresses of all platform side accounts, for admin facing events.
pub(crate) fn platform_admin_addresses<R>(repo: &R) -> Result<Vec<EmailAddress>>
where
    R: UserRepo,
{
    Ok(repo
        .get_users_by_role(Role::PlatformAdmin)?
        .into_iter()
        .map(|user| user.email)
        .collect())
}

/// Hands an event over to the notification gateway and files one
/// email log entry per attempted delivery. Everything here is best
/// effort: the flow that raised the event has already committed.
pub(crate) fn send_and_log(
    connections: &sqlite::Connections,
    notify: &dyn NotificationGateway,
    event: NotificationEvent<'_>,
) {
    let receipts = notify.notify(event);
    if receipts.is_empty() {
        return;
    }
    let db = match connections.exclusive() {
        Ok(db) => db,
        Err(err) => {
            warn!("Unable to record {} delivery receipts: {}", receipts.len(), err);
            return;
        }
    };
    for receipt in receipts {
        let DeliveryReceipt {
            recipient,
            subject,
            error,
        } = receipt;
        let entry = EmailLogEntry {
            id: Id::new(),
            recipient,
            subject,
            status: if error.is_none() {
                DeliveryStatus::Sent
            } else {
                DeliveryStatus::Failed
            },
            error,
            created_at: Timestamp::now(),
        };
        if let Err(err) = db.log_email(&entry) {
            warn!(
                "Unable to write the email log entry for {}: {}",
                entry.recipient, err
            );
        }
    }
}

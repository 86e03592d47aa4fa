use std::{collections::HashSet, slice, sync::Arc};

use rassid_core::gateways::notify::{
    DeliveryReceipt, NotificationEvent, NotificationGateway, NotificationType,
};
use rassid_entities::email::*;

use crate::{email::EmailGateway, user_communication};

/// Every notification kind switched on, the production default.
pub fn all_notification_types() -> HashSet<NotificationType> {
    use NotificationType::*;
    [
        RequestReceived,
        CheckoutIssued,
        SubscriptionActivated,
        SubscriptionRejected,
        CredentialsIssued,
        TicketEscalated,
        ContactMessageReceived,
    ]
    .into_iter()
    .collect()
}

#[derive(Clone)]
pub struct Notify {
    email_gw: Arc<dyn EmailGateway + Send + Sync + 'static>,
    notify_on: HashSet<NotificationType>,
}

impl Notify {
    pub fn new<G>(gw: G, notify_on: HashSet<NotificationType>) -> Self
    where
        G: EmailGateway + Send + Sync + 'static,
    {
        Self {
            email_gw: Arc::new(gw),
            notify_on,
        }
    }

    fn skip(&self, ev: &NotificationEvent) -> bool {
        !self.notify_on.contains(&ev.kind())
    }

    fn send_each(
        &self,
        recipients: &[EmailAddress],
        content: &EmailContent,
    ) -> Vec<DeliveryReceipt> {
        recipients
            .iter()
            .map(|recipient| {
                let error = self
                    .email_gw
                    .compose_and_send(slice::from_ref(recipient), content)
                    .err();
                if let Some(err) = &error {
                    log::warn!("Could not notify {}: {}", recipient, err);
                }
                DeliveryReceipt {
                    recipient: recipient.clone(),
                    subject: content.subject.clone(),
                    error: error.map(|err| err.to_string()),
                }
            })
            .collect()
    }
}

impl NotificationGateway for Notify {
    fn notify(&self, event: NotificationEvent) -> Vec<DeliveryReceipt> {
        use NotificationEvent as E;
        if self.skip(&event) {
            return Vec::new();
        }
        match event {
            E::SubscriptionRequestReceived {
                request,
                admin_addresses,
            } => {
                let content = user_communication::request_received_email(request);
                log::info!(
                    "Sending e-mails to {} recipients after subscription request {} was received",
                    admin_addresses.len(),
                    request.id,
                );
                self.send_each(admin_addresses, &content)
            }
            E::SubscriptionAwaitingPayment {
                request,
                checkout_url,
            } => {
                let content = user_communication::checkout_email(request, checkout_url);
                log::info!(
                    "Sending checkout e-mail to the applicant of request {}",
                    request.id,
                );
                self.send_each(slice::from_ref(&request.contact_email), &content)
            }
            E::SubscriptionActivated {
                request,
                subscription,
                credentials,
            } => {
                let content = user_communication::subscription_activated_email(
                    request,
                    subscription,
                    credentials,
                );
                log::info!(
                    "Sending activation e-mail to the applicant of request {}",
                    request.id,
                );
                self.send_each(slice::from_ref(&request.contact_email), &content)
            }
            E::SubscriptionRejected { request, reason } => {
                let content = user_communication::subscription_rejected_email(request, reason);
                log::info!(
                    "Sending rejection e-mail to the applicant of request {}",
                    request.id,
                );
                self.send_each(slice::from_ref(&request.contact_email), &content)
            }
            E::EmployeeInvited {
                airport,
                credentials,
            } => {
                let content = user_communication::employee_invited_email(airport, credentials);
                log::info!(
                    "Sending account e-mail to new employee {} of airport {}",
                    credentials.email,
                    airport.code,
                );
                self.send_each(slice::from_ref(&credentials.email), &content)
            }
            E::TicketEscalated {
                ticket,
                airport,
                admin_addresses,
            } => {
                let content = user_communication::ticket_escalated_email(ticket, airport);
                log::info!(
                    "Sending e-mails to {} recipients after ticket {} was escalated",
                    admin_addresses.len(),
                    ticket.id,
                );
                self.send_each(admin_addresses, &content)
            }
            E::ContactMessageReceived {
                message,
                admin_addresses,
            } => {
                let content = user_communication::contact_message_email(message);
                log::info!(
                    "Sending e-mails to {} recipients after contact message {} was received",
                    admin_addresses.len(),
                    message.id,
                );
                self.send_each(admin_addresses, &content)
            }
        }
    }
}

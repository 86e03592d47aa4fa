use crate::entities::*;

/// Kinds of outbound staff and applicant notifications.
/// Used to switch notifications on and off per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    RequestReceived,
    CheckoutIssued,
    SubscriptionActivated,
    SubscriptionRejected,
    CredentialsIssued,
    TicketEscalated,
    ContactMessageReceived,
}

/// Login data for a freshly provisioned account. The clear text
/// password only lives until the notification has been handed over.
#[derive(Debug)]
pub struct IssuedCredentials {
    pub email: EmailAddress,
    pub password: String,
}

#[derive(Debug)]
pub enum NotificationEvent<'a> {
    SubscriptionRequestReceived {
        request: &'a SubscriptionRequest,
        admin_addresses: &'a [EmailAddress],
    },
    SubscriptionAwaitingPayment {
        request: &'a SubscriptionRequest,
        checkout_url: &'a str,
    },
    SubscriptionActivated {
        request: &'a SubscriptionRequest,
        subscription: &'a AirportSubscription,
        /// Only set on first activation, never on renewal.
        credentials: Option<&'a IssuedCredentials>,
    },
    SubscriptionRejected {
        request: &'a SubscriptionRequest,
        reason: &'a str,
    },
    EmployeeInvited {
        airport: &'a Airport,
        credentials: &'a IssuedCredentials,
    },
    TicketEscalated {
        ticket: &'a Ticket,
        airport: &'a Airport,
        admin_addresses: &'a [EmailAddress],
    },
    ContactMessageReceived {
        message: &'a ContactMessage,
        admin_addresses: &'a [EmailAddress],
    },
}

impl NotificationEvent<'_> {
    pub const fn kind(&self) -> NotificationType {
        use NotificationEvent as E;
        match self {
            E::SubscriptionRequestReceived { .. } => NotificationType::RequestReceived,
            E::SubscriptionAwaitingPayment { .. } => NotificationType::CheckoutIssued,
            E::SubscriptionActivated { .. } => NotificationType::SubscriptionActivated,
            E::SubscriptionRejected { .. } => NotificationType::SubscriptionRejected,
            E::EmployeeInvited { .. } => NotificationType::CredentialsIssued,
            E::TicketEscalated { .. } => NotificationType::TicketEscalated,
            E::ContactMessageReceived { .. } => NotificationType::ContactMessageReceived,
        }
    }
}

/// Outcome of one attempted send, for the delivery ledger.
#[derive(Debug, Clone)]
pub struct DeliveryReceipt {
    pub recipient: EmailAddress,
    pub subject: String,
    pub error: Option<String>,
}

pub trait NotificationGateway {
    /// Composes and sends all emails the event asks for, one receipt
    /// per attempted send. Delivery failures are reported, never raised.
    fn notify(&self, event: NotificationEvent) -> Vec<DeliveryReceipt>;
}

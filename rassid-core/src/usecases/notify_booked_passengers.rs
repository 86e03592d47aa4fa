use super::prelude::*;
use crate::gateways::email::{EmailGateway, EmailSendError};

/// What happened to a flight, from the passenger's point of view.
#[derive(Debug, Clone)]
pub enum PassengerEvent {
    StatusChanged { change: FlightStatusChange },
    GateAssigned { assignment: GateAssignment },
    BookingConfirmed,
    DepartureReminder,
}

impl PassengerEvent {
    /// Ledger key, unique per booking and observed event. Replaying
    /// the same event can therefore never double-send.
    pub fn dedup_key(&self, booking: &Booking) -> String {
        match self {
            Self::StatusChanged { change } => event_key::status_change(&change.id),
            Self::GateAssigned { assignment } => event_key::gate_assigned(&assignment.id),
            Self::BookingConfirmed => event_key::booking_confirmation(&booking.id),
            Self::DepartureReminder => event_key::departure_reminder(&booking.flight_id),
        }
    }
}

#[derive(Debug)]
pub struct PassengerNotification {
    pub passenger: Passenger,
    pub booking: Booking,
    pub flight: Flight,
    pub event: PassengerEvent,
}

/// Renders subject and body in the passenger's preferred language,
/// including the durable tracking link.
pub trait PassengerEmailFormatter {
    fn format_email(&self, notification: &PassengerNotification) -> EmailContent;
}

/// Emails every passenger booked on the flight about the event,
/// skipping passengers the ledger already knows about. Returns the
/// number of messages handed over to the gateway.
pub fn notify_booked_passengers<R, G, F>(
    repo: &R,
    email_gateway: &G,
    formatter: &F,
    flight: &Flight,
    event: PassengerEvent,
) -> Result<usize>
where
    R: BookingRepo + PassengerRepo + NotificationLogRepo,
    G: EmailGateway,
    F: PassengerEmailFormatter,
{
    let pending = find_pending_notifications(repo, flight, event)?;
    let emails = create_emails(formatter, pending);
    let outcomes = send_emails(email_gateway, emails);
    Ok(save_outcomes(repo, outcomes))
}

fn find_pending_notifications<R>(
    repo: &R,
    flight: &Flight,
    event: PassengerEvent,
) -> Result<Vec<PassengerNotification>>
where
    R: BookingRepo + PassengerRepo + NotificationLogRepo,
{
    let mut pending = Vec::new();
    for booking in repo.bookings_of_flight(&flight.id)? {
        let key = event.dedup_key(&booking);
        if !sending_is_needed(repo, &booking, &key) {
            continue;
        }
        let passenger = match repo.get_passenger(&booking.passenger_id) {
            Ok(passenger) => passenger,
            Err(err) => {
                log::warn!("Skipping booking {} without passenger: {}", booking.id, err);
                continue;
            }
        };
        pending.push(PassengerNotification {
            passenger,
            booking,
            flight: flight.clone(),
            event: event.clone(),
        });
    }
    Ok(pending)
}

fn sending_is_needed<R>(repo: &R, booking: &Booking, key: &str) -> bool
where
    R: NotificationLogRepo,
{
    match repo.find_sent_notification(&booking.id, key) {
        Ok(None) => true,
        Ok(Some(_)) => false,
        Err(err) => {
            log::warn!(
                "Unable to look up sent notifications for booking {}: {}",
                booking.id,
                err
            );
            false
        }
    }
}

fn create_emails<F>(
    formatter: &F,
    pending: Vec<PassengerNotification>,
) -> Vec<(PassengerNotification, EmailContent)>
where
    F: PassengerEmailFormatter,
{
    pending
        .into_iter()
        .map(|notification| {
            let email = formatter.format_email(&notification);
            (notification, email)
        })
        .collect()
}

struct SendOutcome {
    notification: PassengerNotification,
    email: EmailContent,
    sent_at: Timestamp,
    error: Option<EmailSendError>,
}

fn send_emails<G>(
    email_gateway: &G,
    emails: Vec<(PassengerNotification, EmailContent)>,
) -> Vec<SendOutcome>
where
    G: EmailGateway,
{
    emails
        .into_iter()
        .map(|(notification, email)| {
            let sent_at = Timestamp::now();
            // One bad address must not block the rest of the fan-out.
            let error = email_gateway
                .compose_and_send(std::slice::from_ref(&notification.passenger.email), &email)
                .err();
            if let Some(err) = &error {
                log::warn!("Could not notify {}: {}", notification.passenger.email, err);
            }
            SendOutcome {
                notification,
                email,
                sent_at,
                error,
            }
        })
        .collect()
}

fn save_outcomes<R>(repo: &R, outcomes: Vec<SendOutcome>) -> usize
where
    R: NotificationLogRepo,
{
    let mut delivered = 0;
    for outcome in outcomes {
        let SendOutcome {
            notification,
            email,
            sent_at,
            error,
        } = outcome;
        let entry = EmailLogEntry {
            id: Id::new(),
            recipient: notification.passenger.email.clone(),
            subject: email.subject,
            status: if error.is_none() {
                DeliveryStatus::Sent
            } else {
                DeliveryStatus::Failed
            },
            error: error.as_ref().map(ToString::to_string),
            created_at: sent_at,
        };
        if let Err(err) = repo.log_email(&entry) {
            log::warn!("Unable to write email log entry: {}", err);
        }
        if error.is_some() {
            // no ledger marker, the next trigger retries
            continue;
        }
        let key = notification.event.dedup_key(&notification.booking);
        if let Err(err) = repo.save_sent_notification(&notification.booking.id, &key, sent_at) {
            log::warn!(
                "Unable to record notification for booking {}: {}",
                notification.booking.id,
                err
            );
        }
        delivered += 1;
    }
    delivered
}

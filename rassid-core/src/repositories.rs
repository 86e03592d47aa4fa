// Low-level database access traits.
// Each repository is responsible for a single entity and
// its relationships. Related entities are only referenced
// by their id and never modified or loaded by another
// repository.

use crate::entities::*;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("The object already exists")]
    AlreadyExists,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

pub trait UserRepo {
    fn create_user(&self, user: &User) -> Result<()>;
    fn update_user(&self, user: &User) -> Result<()>;
    fn delete_user(&self, id: &Id) -> Result<()>;

    fn all_users(&self) -> Result<Vec<User>>;
    fn get_user(&self, id: &Id) -> Result<User>;
    fn get_user_by_email(&self, email: &EmailAddress) -> Result<User>;
    fn try_get_user_by_email(&self, email: &EmailAddress) -> Result<Option<User>>;

    fn get_users_by_airport(&self, airport_id: &Id) -> Result<Vec<User>>;
    fn get_users_by_role(&self, role: Role) -> Result<Vec<User>>;

    fn count_users_by_airport(&self, airport_id: &Id) -> Result<usize> {
        Ok(self.get_users_by_airport(airport_id)?.len())
    }
}

pub trait AirportRepo {
    fn create_airport(&self, airport: &Airport) -> Result<()>;
    fn update_airport(&self, airport: &Airport) -> Result<()>;

    fn get_airport(&self, id: &Id) -> Result<Airport>;
    fn try_get_airport_by_code(&self, code: &IataCode) -> Result<Option<Airport>>;
    fn all_airports(&self) -> Result<Vec<Airport>>;
    fn count_airports(&self) -> Result<usize>;
}

pub trait SubscriptionRequestRepo {
    fn create_subscription_request(&self, request: &SubscriptionRequest) -> Result<()>;
    fn update_subscription_request(&self, request: &SubscriptionRequest) -> Result<()>;

    fn get_subscription_request(&self, id: &Id) -> Result<SubscriptionRequest>;
    fn all_subscription_requests(&self) -> Result<Vec<SubscriptionRequest>>;
    fn subscription_requests_by_status(
        &self,
        status: RequestStatus,
    ) -> Result<Vec<SubscriptionRequest>>;
}

pub trait SubscriptionRepo {
    fn create_subscription(&self, subscription: &AirportSubscription) -> Result<()>;
    fn update_subscription(&self, subscription: &AirportSubscription) -> Result<()>;

    fn get_subscription(&self, id: &Id) -> Result<AirportSubscription>;
    fn try_get_subscription_by_airport(
        &self,
        airport_id: &Id,
    ) -> Result<Option<AirportSubscription>>;
    fn all_subscriptions(&self) -> Result<Vec<AirportSubscription>>;
}

pub trait FlightRepo {
    fn create_flight(&self, flight: &Flight) -> Result<()>;
    fn update_flight(&self, flight: &Flight) -> Result<()>;

    fn get_flight(&self, id: &Id) -> Result<Flight>;
    fn try_get_flight_by_number(&self, flight_number: &str) -> Result<Option<Flight>>;
    fn all_flights(&self) -> Result<Vec<Flight>>;
    // Arrivals and departures of one airport
    fn flights_of_airport(&self, airport_id: &Id) -> Result<Vec<Flight>>;
    fn count_flights(&self) -> Result<usize>;

    // Append-only status audit trail
    fn create_flight_status_change(&self, change: &FlightStatusChange) -> Result<()>;
    fn flight_status_history(&self, flight_id: &Id) -> Result<Vec<FlightStatusChange>>;
}

pub trait FlightImportLogRepo {
    fn create_flight_import_log(&self, log: &FlightImportLog) -> Result<()>;
    fn last_flight_import_log(&self) -> Result<Option<FlightImportLog>>;
}

pub trait GateRepo {
    fn create_gate_assignment(&self, assignment: &GateAssignment) -> Result<()>;
    fn update_gate_assignment(&self, assignment: &GateAssignment) -> Result<()>;

    // The assignment that has not been released yet
    fn current_gate_of_flight(&self, flight_id: &Id) -> Result<Option<GateAssignment>>;
    fn gate_history_of_flight(&self, flight_id: &Id) -> Result<Vec<GateAssignment>>;
}

pub trait PassengerRepo {
    fn create_passenger(&self, passenger: &Passenger) -> Result<()>;

    fn get_passenger(&self, id: &Id) -> Result<Passenger>;
    fn try_get_passenger_by_email(&self, email: &EmailAddress) -> Result<Option<Passenger>>;
    fn get_passenger_by_token(&self, token: &TrackingToken) -> Result<Passenger>;
}

pub trait BookingRepo {
    fn create_booking(&self, booking: &Booking) -> Result<()>;

    fn get_booking(&self, id: &Id) -> Result<Booking>;
    fn bookings_of_flight(&self, flight_id: &Id) -> Result<Vec<Booking>>;
    fn bookings_of_passenger(&self, passenger_id: &Id) -> Result<Vec<Booking>>;
}

pub trait TicketRepo {
    fn create_ticket(&self, ticket: &Ticket) -> Result<()>;
    fn update_ticket(&self, ticket: &Ticket) -> Result<()>;

    fn get_ticket(&self, id: &Id) -> Result<Ticket>;
    fn all_tickets(&self) -> Result<Vec<Ticket>>;
    fn tickets_of_airport(&self, airport_id: &Id) -> Result<Vec<Ticket>>;

    fn create_ticket_comment(&self, comment: &TicketComment) -> Result<()>;
    fn comments_of_ticket(&self, ticket_id: &Id) -> Result<Vec<TicketComment>>;
}

pub trait PaymentRepo {
    fn create_payment(&self, payment: &PaymentRecord) -> Result<()>;
    fn payments_of_request(&self, request_id: &Id) -> Result<Vec<PaymentRecord>>;
}

pub trait NotificationLogRepo {
    // Must not fail on duplicates, i.e. insert-or-ignore semantics
    fn save_sent_notification(
        &self,
        booking_id: &Id,
        event_key: &str,
        sent_at: Timestamp,
    ) -> Result<()>;
    fn find_sent_notification(&self, booking_id: &Id, event_key: &str)
        -> Result<Option<Timestamp>>;

    fn log_email(&self, entry: &EmailLogEntry) -> Result<()>;
    fn all_email_log_entries(&self) -> Result<Vec<EmailLogEntry>>;
}

pub trait ContactMessageRepo {
    fn create_contact_message(&self, message: &ContactMessage) -> Result<()>;
    fn update_contact_message(&self, message: &ContactMessage) -> Result<()>;
    fn all_contact_messages(&self) -> Result<Vec<ContactMessage>>;
    fn get_contact_message(&self, id: &Id) -> Result<ContactMessage>;
}

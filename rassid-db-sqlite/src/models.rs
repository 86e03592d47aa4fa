#![allow(clippy::extra_unused_lifetimes)]

// NOTE:
// All timestamps with the `_at` postfix are stored
// as unix timestamp in seconds.

use num_traits::ToPrimitive as _;
use rassid_core::entities::*;

use super::schema::*;

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = users)]
pub struct NewUser<'a> {
    pub id: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub role: i16,
    pub airport_id: Option<&'a str>,
    pub created_at: i64,
}

impl<'a> From<&'a User> for NewUser<'a> {
    fn from(from: &'a User) -> Self {
        let User {
            id,
            email,
            password,
            role,
            airport_id,
            created_at,
        } = from;
        Self {
            id: id.as_str(),
            email: email.as_str(),
            password: password.as_ref(),
            role: role.to_i16().expect("user role primitive"),
            airport_id: airport_id.as_ref().map(Id::as_str),
            created_at: created_at.as_secs(),
        }
    }
}

#[derive(Queryable)]
pub struct UserEntity {
    pub id: String,
    pub email: String,
    pub password: String,
    pub role: i16,
    pub airport_id: Option<String>,
    pub created_at: i64,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = airports)]
pub struct NewAirport<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub code: &'a str,
    pub city: &'a str,
    pub country: &'a str,
    pub created_at: i64,
}

impl<'a> From<&'a Airport> for NewAirport<'a> {
    fn from(from: &'a Airport) -> Self {
        let Airport {
            id,
            name,
            code,
            city,
            country,
            created_at,
        } = from;
        Self {
            id: id.as_str(),
            name,
            code: code.as_str(),
            city,
            country,
            created_at: created_at.as_secs(),
        }
    }
}

#[derive(Queryable)]
pub struct AirportEntity {
    pub id: String,
    pub name: String,
    pub code: String,
    pub city: String,
    pub country: String,
    pub created_at: i64,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = subscription_requests)]
pub struct NewSubscriptionRequest<'a> {
    pub id: &'a str,
    pub airport_name: &'a str,
    pub airport_code: &'a str,
    pub city: &'a str,
    pub country: &'a str,
    pub contact_email: &'a str,
    pub contact_phone: &'a str,
    pub plan: String,
    pub license_file: &'a str,
    pub commercial_record_file: Option<&'a str>,
    pub status: String,
    pub rejection_reason: Option<&'a str>,
    pub created_at: i64,
}

impl<'a> From<&'a SubscriptionRequest> for NewSubscriptionRequest<'a> {
    fn from(from: &'a SubscriptionRequest) -> Self {
        let SubscriptionRequest {
            id,
            airport,
            contact_email,
            contact_phone,
            plan,
            license_file,
            commercial_record_file,
            status,
            rejection_reason,
            created_at,
        } = from;
        Self {
            id: id.as_str(),
            airport_name: &airport.name,
            airport_code: airport.code.as_str(),
            city: &airport.city,
            country: &airport.country,
            contact_email: contact_email.as_str(),
            contact_phone,
            plan: plan.to_string(),
            license_file,
            commercial_record_file: commercial_record_file.as_deref(),
            status: status.to_string(),
            rejection_reason: rejection_reason.as_deref(),
            created_at: created_at.as_secs(),
        }
    }
}

#[derive(Queryable)]
pub struct SubscriptionRequestEntity {
    pub id: String,
    pub airport_name: String,
    pub airport_code: String,
    pub city: String,
    pub country: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub plan: String,
    pub license_file: String,
    pub commercial_record_file: Option<String>,
    pub status: String,
    pub rejection_reason: Option<String>,
    pub created_at: i64,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = subscriptions)]
pub struct NewSubscription<'a> {
    pub id: &'a str,
    pub airport_id: &'a str,
    pub plan: String,
    pub start_at: i64,
    pub expire_at: i64,
    pub max_employees: i64,
    pub status: String,
}

impl<'a> From<&'a AirportSubscription> for NewSubscription<'a> {
    fn from(from: &'a AirportSubscription) -> Self {
        let AirportSubscription {
            id,
            airport_id,
            plan,
            start_at,
            expire_at,
            max_employees,
            status,
        } = from;
        Self {
            id: id.as_str(),
            airport_id: airport_id.as_str(),
            plan: plan.to_string(),
            start_at: start_at.as_secs(),
            expire_at: expire_at.as_secs(),
            max_employees: i64::from(*max_employees),
            status: status.to_string(),
        }
    }
}

#[derive(Queryable)]
pub struct SubscriptionEntity {
    pub id: String,
    pub airport_id: String,
    pub plan: String,
    pub start_at: i64,
    pub expire_at: i64,
    pub max_employees: i64,
    pub status: String,
}

#[derive(Insertable)]
#[diesel(table_name = payments)]
pub struct NewPayment<'a> {
    pub id: &'a str,
    pub request_id: &'a str,
    pub plan: String,
    pub amount_usd_cents: i64,
    pub provider_session: &'a str,
    pub paid_at: i64,
}

impl<'a> From<&'a PaymentRecord> for NewPayment<'a> {
    fn from(from: &'a PaymentRecord) -> Self {
        let PaymentRecord {
            id,
            request_id,
            plan,
            amount_usd_cents,
            provider_session,
            paid_at,
        } = from;
        Self {
            id: id.as_str(),
            request_id: request_id.as_str(),
            plan: plan.to_string(),
            amount_usd_cents: *amount_usd_cents,
            provider_session,
            paid_at: paid_at.as_secs(),
        }
    }
}

#[derive(Queryable)]
pub struct PaymentEntity {
    pub id: String,
    pub request_id: String,
    pub plan: String,
    pub amount_usd_cents: i64,
    pub provider_session: String,
    pub paid_at: i64,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = flights)]
pub struct NewFlight<'a> {
    pub id: &'a str,
    pub flight_number: &'a str,
    pub airline_code: &'a str,
    pub status: &'a str,
    pub scheduled_departure: i64,
    pub scheduled_arrival: i64,
    pub origin_airport_id: &'a str,
    pub destination_airport_id: &'a str,
    pub protected: bool,
    pub updated_at: i64,
}

impl<'a> From<&'a Flight> for NewFlight<'a> {
    fn from(from: &'a Flight) -> Self {
        let Flight {
            id,
            flight_number,
            airline_code,
            status,
            scheduled_departure,
            scheduled_arrival,
            origin_airport_id,
            destination_airport_id,
            protected,
            updated_at,
        } = from;
        Self {
            id: id.as_str(),
            flight_number,
            airline_code,
            status: status.as_str(),
            scheduled_departure: scheduled_departure.as_secs(),
            scheduled_arrival: scheduled_arrival.as_secs(),
            origin_airport_id: origin_airport_id.as_str(),
            destination_airport_id: destination_airport_id.as_str(),
            protected: *protected,
            updated_at: updated_at.as_secs(),
        }
    }
}

#[derive(Queryable)]
pub struct FlightEntity {
    pub id: String,
    pub flight_number: String,
    pub airline_code: String,
    pub status: String,
    pub scheduled_departure: i64,
    pub scheduled_arrival: i64,
    pub origin_airport_id: String,
    pub destination_airport_id: String,
    pub protected: bool,
    pub updated_at: i64,
}

#[derive(Insertable)]
#[diesel(table_name = flight_status_changes)]
pub struct NewFlightStatusChange<'a> {
    pub id: &'a str,
    pub flight_id: &'a str,
    pub old_status: &'a str,
    pub new_status: &'a str,
    pub changed_at: i64,
}

impl<'a> From<&'a FlightStatusChange> for NewFlightStatusChange<'a> {
    fn from(from: &'a FlightStatusChange) -> Self {
        let FlightStatusChange {
            id,
            flight_id,
            old_status,
            new_status,
            changed_at,
        } = from;
        Self {
            id: id.as_str(),
            flight_id: flight_id.as_str(),
            old_status: old_status.as_str(),
            new_status: new_status.as_str(),
            changed_at: changed_at.as_secs(),
        }
    }
}

#[derive(Queryable)]
pub struct FlightStatusChangeEntity {
    pub id: String,
    pub flight_id: String,
    pub old_status: String,
    pub new_status: String,
    pub changed_at: i64,
}

#[derive(Insertable)]
#[diesel(table_name = flight_import_logs)]
pub struct NewFlightImportLog<'a> {
    pub id: &'a str,
    pub provider: &'a str,
    pub airport_code: Option<&'a str>,
    pub raw_payload: &'a str,
    pub imported_count: i64,
    pub fetched_at: i64,
}

impl<'a> From<&'a FlightImportLog> for NewFlightImportLog<'a> {
    fn from(from: &'a FlightImportLog) -> Self {
        let FlightImportLog {
            id,
            provider,
            airport_code,
            raw_payload,
            imported_count,
            fetched_at,
        } = from;
        Self {
            id: id.as_str(),
            provider,
            airport_code: airport_code.as_ref().map(IataCode::as_str),
            raw_payload,
            imported_count: i64::from(*imported_count),
            fetched_at: fetched_at.as_secs(),
        }
    }
}

#[derive(Queryable)]
pub struct FlightImportLogEntity {
    pub id: String,
    pub provider: String,
    pub airport_code: Option<String>,
    pub raw_payload: String,
    pub imported_count: i64,
    pub fetched_at: i64,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = gate_assignments)]
pub struct NewGateAssignment<'a> {
    pub id: &'a str,
    pub flight_id: &'a str,
    pub gate: &'a str,
    pub terminal: &'a str,
    pub boarding_open_at: i64,
    pub boarding_close_at: i64,
    pub assigned_at: i64,
    pub released_at: Option<i64>,
}

impl<'a> From<&'a GateAssignment> for NewGateAssignment<'a> {
    fn from(from: &'a GateAssignment) -> Self {
        let GateAssignment {
            id,
            flight_id,
            gate,
            terminal,
            boarding_open_at,
            boarding_close_at,
            assigned_at,
            released_at,
        } = from;
        Self {
            id: id.as_str(),
            flight_id: flight_id.as_str(),
            gate,
            terminal,
            boarding_open_at: boarding_open_at.as_secs(),
            boarding_close_at: boarding_close_at.as_secs(),
            assigned_at: assigned_at.as_secs(),
            released_at: released_at.map(Timestamp::as_secs),
        }
    }
}

#[derive(Queryable)]
pub struct GateAssignmentEntity {
    pub id: String,
    pub flight_id: String,
    pub gate: String,
    pub terminal: String,
    pub boarding_open_at: i64,
    pub boarding_close_at: i64,
    pub assigned_at: i64,
    pub released_at: Option<i64>,
}

#[derive(Insertable)]
#[diesel(table_name = passengers)]
pub struct NewPassenger<'a> {
    pub id: &'a str,
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub language: String,
    pub tracking_token: &'a str,
}

impl<'a> From<&'a Passenger> for NewPassenger<'a> {
    fn from(from: &'a Passenger) -> Self {
        let Passenger {
            id,
            full_name,
            email,
            phone,
            language,
            tracking_token,
        } = from;
        Self {
            id: id.as_str(),
            full_name,
            email: email.as_str(),
            phone: phone.as_deref(),
            language: language.to_string(),
            tracking_token: tracking_token.as_str(),
        }
    }
}

#[derive(Queryable)]
pub struct PassengerEntity {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub language: String,
    pub tracking_token: String,
}

#[derive(Insertable)]
#[diesel(table_name = bookings)]
pub struct NewBooking<'a> {
    pub id: &'a str,
    pub passenger_id: &'a str,
    pub flight_id: &'a str,
    pub seat: Option<&'a str>,
    pub booking_ref: &'a str,
    pub created_at: i64,
}

impl<'a> From<&'a Booking> for NewBooking<'a> {
    fn from(from: &'a Booking) -> Self {
        let Booking {
            id,
            passenger_id,
            flight_id,
            seat,
            booking_ref,
            created_at,
        } = from;
        Self {
            id: id.as_str(),
            passenger_id: passenger_id.as_str(),
            flight_id: flight_id.as_str(),
            seat: seat.as_deref(),
            booking_ref,
            created_at: created_at.as_secs(),
        }
    }
}

#[derive(Queryable)]
pub struct BookingEntity {
    pub id: String,
    pub passenger_id: String,
    pub flight_id: String,
    pub seat: Option<String>,
    pub booking_ref: String,
    pub created_at: i64,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = tickets)]
pub struct NewTicket<'a> {
    pub id: &'a str,
    pub airport_id: &'a str,
    pub created_by: &'a str,
    pub assigned_to: Option<&'a str>,
    pub title: &'a str,
    pub description: &'a str,
    pub category: String,
    pub priority: String,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl<'a> From<&'a Ticket> for NewTicket<'a> {
    fn from(from: &'a Ticket) -> Self {
        let Ticket {
            id,
            airport_id,
            created_by,
            assigned_to,
            title,
            description,
            category,
            priority,
            status,
            created_at,
            updated_at,
        } = from;
        Self {
            id: id.as_str(),
            airport_id: airport_id.as_str(),
            created_by: created_by.as_str(),
            assigned_to: assigned_to.as_ref().map(Id::as_str),
            title,
            description,
            category: category.to_string(),
            priority: priority.to_string(),
            status: status.to_string(),
            created_at: created_at.as_secs(),
            updated_at: updated_at.as_secs(),
        }
    }
}

#[derive(Queryable)]
pub struct TicketEntity {
    pub id: String,
    pub airport_id: String,
    pub created_by: String,
    pub assigned_to: Option<String>,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: String,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Insertable)]
#[diesel(table_name = ticket_comments)]
pub struct NewTicketComment<'a> {
    pub id: &'a str,
    pub ticket_id: &'a str,
    pub author_id: &'a str,
    pub body: &'a str,
    pub created_at: i64,
}

impl<'a> From<&'a TicketComment> for NewTicketComment<'a> {
    fn from(from: &'a TicketComment) -> Self {
        let TicketComment {
            id,
            ticket_id,
            author_id,
            body,
            created_at,
        } = from;
        Self {
            id: id.as_str(),
            ticket_id: ticket_id.as_str(),
            author_id: author_id.as_str(),
            body,
            created_at: created_at.as_secs(),
        }
    }
}

#[derive(Queryable)]
pub struct TicketCommentEntity {
    pub id: String,
    pub ticket_id: String,
    pub author_id: String,
    pub body: String,
    pub created_at: i64,
}

#[derive(Insertable)]
#[diesel(table_name = sent_notifications)]
pub struct NewSentNotification<'a> {
    pub booking_id: &'a str,
    pub event_key: &'a str,
    pub sent_at: i64,
}

#[derive(Queryable)]
pub struct SentNotificationEntity {
    pub booking_id: String,
    pub event_key: String,
    pub sent_at: i64,
}

#[derive(Insertable)]
#[diesel(table_name = email_log)]
pub struct NewEmailLogEntry<'a> {
    pub id: &'a str,
    pub recipient: &'a str,
    pub subject: &'a str,
    pub status: String,
    pub error: Option<&'a str>,
    pub created_at: i64,
}

impl<'a> From<&'a EmailLogEntry> for NewEmailLogEntry<'a> {
    fn from(from: &'a EmailLogEntry) -> Self {
        let EmailLogEntry {
            id,
            recipient,
            subject,
            status,
            error,
            created_at,
        } = from;
        Self {
            id: id.as_str(),
            recipient: recipient.as_str(),
            subject,
            status: status.to_string(),
            error: error.as_deref(),
            created_at: created_at.as_secs(),
        }
    }
}

#[derive(Queryable)]
pub struct EmailLogEntryEntity {
    pub id: String,
    pub recipient: String,
    pub subject: String,
    pub status: String,
    pub error: Option<String>,
    pub created_at: i64,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = contact_messages)]
pub struct NewContactMessage<'a> {
    pub id: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub subject: &'a str,
    pub message: &'a str,
    pub resolved: bool,
    pub created_at: i64,
}

impl<'a> From<&'a ContactMessage> for NewContactMessage<'a> {
    fn from(from: &'a ContactMessage) -> Self {
        let ContactMessage {
            id,
            first_name,
            last_name,
            email,
            subject,
            message,
            resolved,
            created_at,
        } = from;
        Self {
            id: id.as_str(),
            first_name,
            last_name,
            email: email.as_str(),
            subject,
            message,
            resolved: *resolved,
            created_at: created_at.as_secs(),
        }
    }
}

#[derive(Queryable)]
pub struct ContactMessageEntity {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub resolved: bool,
    pub created_at: i64,
}

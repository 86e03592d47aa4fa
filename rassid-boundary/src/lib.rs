use serde::{Deserialize, Serialize};

#[cfg(feature = "entity-conversions")]
mod conv;
#[cfg(feature = "entity-conversions")]
pub use conv::ConversionError;

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct SubscriptionRequest {
    pub id                     : String,
    pub airport_name           : String,
    pub airport_code           : String,
    pub city                   : String,
    pub country                : String,
    pub contact_email          : String,
    pub contact_phone          : String,
    pub plan                   : SubscriptionPlan,
    pub license_file           : String,
    pub commercial_record_file : Option<String>,
    pub status                 : RequestStatus,
    pub rejection_reason       : Option<String>,
    pub created_at             : i64,
}

/// Submission form for a new airport subscription request. The
/// uploaded documents arrive separately and are referenced by their
/// stored file names.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct NewSubscriptionRequest {
    pub airport_name: String,
    pub airport_code: String,
    pub city: String,
    pub country: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub plan: SubscriptionPlan,
    pub license_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commercial_record_file: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(
    feature = "extra-derive",
    derive(Debug, Clone, Copy, PartialEq, Eq, Hash)
)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    ApprovedPendingPayment,
    Approved,
    Rejected,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(
    feature = "extra-derive",
    derive(Debug, Clone, Copy, PartialEq, Eq, Hash)
)]
pub enum SubscriptionPlan {
    #[serde(rename = "1_year")]
    OneYear,
    #[serde(rename = "3_years")]
    ThreeYears,
    #[serde(rename = "5_years")]
    FiveYears,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(
    feature = "extra-derive",
    derive(Debug, Clone, Copy, PartialEq, Eq, Hash)
)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Suspended,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Airport {
    pub id: String,
    pub name: String,
    pub code: String,
    pub city: String,
    pub country: String,
    pub created_at: i64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct AirportSubscription {
    pub id: String,
    pub airport_id: String,
    pub plan: SubscriptionPlan,
    pub start_at: i64,
    pub expire_at: i64,
    pub max_employees: u32,
    pub status: SubscriptionStatus,
}

/// What the applicant owes before their subscription becomes active.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct CheckoutDetails {
    pub request_id: String,
    pub airport_name: String,
    pub plan: SubscriptionPlan,
    pub amount_usd_cents: i64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct ConfirmPayment {
    pub provider_session: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct RejectRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct PaymentRecord {
    pub id: String,
    pub request_id: String,
    pub plan: SubscriptionPlan,
    pub amount_usd_cents: i64,
    pub provider_session: String,
    pub paid_at: i64,
}

/// Flight statuses travel as free-form labels so that provider feeds
/// with vendor-specific states survive a round trip unchanged.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Flight {
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

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct FlightStatusChange {
    pub id: String,
    pub flight_id: String,
    pub old_status: String,
    pub new_status: String,
    pub changed_at: i64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct UpdateFlightStatus {
    pub status: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct GateAssignment {
    pub id: String,
    pub flight_id: String,
    pub gate: String,
    pub terminal: String,
    pub boarding_open_at: i64,
    pub boarding_close_at: i64,
    pub assigned_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released_at: Option<i64>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct NewGateAssignment {
    pub gate: String,
    pub terminal: String,
    pub boarding_open_at: i64,
    pub boarding_close_at: i64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(
    feature = "extra-derive",
    derive(Debug, Clone, Copy, PartialEq, Eq, Hash)
)]
#[serde(rename_all = "snake_case")]
pub enum BoardingPhase {
    PreOpen,
    Boarding,
    Closed,
    Unknown,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(
    feature = "extra-derive",
    derive(Debug, Clone, Copy, PartialEq, Eq, Hash)
)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ar")]
    Arabic,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Booking {
    pub id: String,
    pub passenger_id: String,
    pub flight_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seat: Option<String>,
    pub booking_ref: String,
    pub created_at: i64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct NewBooking {
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seat: Option<String>,
    pub booking_ref: String,
}

/// Everything the public tracking page shows for one token.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct TrackedBooking {
    pub passenger_name: String,
    pub language: Language,
    pub booking_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seat: Option<String>,
    pub flight: Flight,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gate: Option<GateAssignment>,
    pub boarding_phase: BoardingPhase,
    pub countdown_secs: i64,
    pub timeline: Vec<TimelineEntry>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct TimelineEntry {
    pub happened_at: i64,
    #[serde(flatten)]
    pub event: TimelineEvent,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimelineEvent {
    StatusChanged { from: String, to: String },
    GateAssigned { gate: String, terminal: String },
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Ticket {
    pub id: String,
    pub airport_id: String,
    pub created_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    pub title: String,
    pub description: String,
    pub category: TicketCategory,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub category: TicketCategory,
    pub priority: TicketPriority,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(
    feature = "extra-derive",
    derive(Debug, Clone, Copy, PartialEq, Eq, Hash)
)]
#[serde(rename_all = "lowercase")]
pub enum TicketCategory {
    Api,
    Sms,
    System,
    Other,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(
    feature = "extra-derive",
    derive(Debug, Clone, Copy, PartialEq, Eq, Hash)
)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    High,
    Medium,
    Low,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(
    feature = "extra-derive",
    derive(Debug, Clone, Copy, PartialEq, Eq, Hash)
)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Open,
    Escalated,
    Closed,
    Rejected,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct TicketComment {
    pub id: String,
    pub ticket_id: String,
    pub author_id: String,
    pub body: String,
    pub created_at: i64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct NewTicketComment {
    pub body: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airport_id: Option<String>,
    pub created_at: i64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(
    feature = "extra-derive",
    derive(Debug, Clone, Copy, PartialEq, Eq, Hash)
)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Guest,
    Operator,
    AirportAdmin,
    PlatformAdmin,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct NewEmployee {
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

/// Partial update of a staff account. Absent fields are untouched.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct UpdateEmployee {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct NewContactMessage {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct ContactMessage {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub resolved: bool,
    pub created_at: i64,
}

/// Indoor position of a gate, relayed from the maps provider.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct GateLocation {
    pub building: String,
    pub floor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_url: Option<String>,
}

/// Structured error response of the JSON API.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Error {
    pub http_status: u16,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, Copy, PartialEq, Eq))]
pub struct PlatformStats {
    pub airports: u64,
    pub active_subscriptions: u64,
    pub pending_requests: u64,
    pub flights: u64,
    pub open_tickets: u64,
    pub escalated_tickets: u64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct AirportStats {
    pub employees: u64,
    pub flights: u64,
    pub open_tickets: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription: Option<AirportSubscription>,
}

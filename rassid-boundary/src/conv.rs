use super::*;
use rassid_entities as e;

/// A received payload failed to parse into its domain representation.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error(transparent)]
    EmailAddress(#[from] e::email::EmailAddressParseError),
    #[error(transparent)]
    AirportCode(#[from] e::airport::IataCodeParseError),
}

impl From<e::request::SubscriptionRequest> for SubscriptionRequest {
    fn from(from: e::request::SubscriptionRequest) -> Self {
        let e::request::SubscriptionRequest {
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
        let e::request::PendingAirport {
            name,
            code,
            city,
            country,
        } = airport;
        Self {
            id: id.into(),
            airport_name: name,
            airport_code: code.as_str().to_owned(),
            city,
            country,
            contact_email: contact_email.into_string(),
            contact_phone,
            plan: plan.into(),
            license_file,
            commercial_record_file,
            status: status.into(),
            rejection_reason,
            created_at: created_at.as_secs(),
        }
    }
}

impl TryFrom<SubscriptionRequest> for e::request::SubscriptionRequest {
    type Error = ConversionError;

    fn try_from(from: SubscriptionRequest) -> Result<Self, Self::Error> {
        let SubscriptionRequest {
            id,
            airport_name,
            airport_code,
            city,
            country,
            contact_email,
            contact_phone,
            plan,
            license_file,
            commercial_record_file,
            status,
            rejection_reason,
            created_at,
        } = from;
        Ok(Self {
            id: id.into(),
            airport: e::request::PendingAirport {
                name: airport_name,
                code: airport_code.parse()?,
                city,
                country,
            },
            contact_email: contact_email.parse()?,
            contact_phone,
            plan: plan.into(),
            license_file,
            commercial_record_file,
            status: status.into(),
            rejection_reason,
            created_at: e::time::Timestamp::from_secs(created_at),
        })
    }
}

impl From<e::request::RequestStatus> for RequestStatus {
    fn from(from: e::request::RequestStatus) -> Self {
        use e::request::RequestStatus::*;
        match from {
            Pending => RequestStatus::Pending,
            ApprovedPendingPayment => RequestStatus::ApprovedPendingPayment,
            Approved => RequestStatus::Approved,
            Rejected => RequestStatus::Rejected,
        }
    }
}

impl From<RequestStatus> for e::request::RequestStatus {
    fn from(from: RequestStatus) -> Self {
        use e::request::RequestStatus::*;
        match from {
            RequestStatus::Pending => Pending,
            RequestStatus::ApprovedPendingPayment => ApprovedPendingPayment,
            RequestStatus::Approved => Approved,
            RequestStatus::Rejected => Rejected,
        }
    }
}

impl From<e::subscription::SubscriptionPlan> for SubscriptionPlan {
    fn from(from: e::subscription::SubscriptionPlan) -> Self {
        use e::subscription::SubscriptionPlan::*;
        match from {
            OneYear => SubscriptionPlan::OneYear,
            ThreeYears => SubscriptionPlan::ThreeYears,
            FiveYears => SubscriptionPlan::FiveYears,
        }
    }
}

impl From<SubscriptionPlan> for e::subscription::SubscriptionPlan {
    fn from(from: SubscriptionPlan) -> Self {
        use e::subscription::SubscriptionPlan::*;
        match from {
            SubscriptionPlan::OneYear => OneYear,
            SubscriptionPlan::ThreeYears => ThreeYears,
            SubscriptionPlan::FiveYears => FiveYears,
        }
    }
}

impl From<e::subscription::SubscriptionStatus> for SubscriptionStatus {
    fn from(from: e::subscription::SubscriptionStatus) -> Self {
        use e::subscription::SubscriptionStatus::*;
        match from {
            Active => SubscriptionStatus::Active,
            Suspended => SubscriptionStatus::Suspended,
        }
    }
}

impl From<SubscriptionStatus> for e::subscription::SubscriptionStatus {
    fn from(from: SubscriptionStatus) -> Self {
        use e::subscription::SubscriptionStatus::*;
        match from {
            SubscriptionStatus::Active => Active,
            SubscriptionStatus::Suspended => Suspended,
        }
    }
}

impl From<e::airport::Airport> for Airport {
    fn from(from: e::airport::Airport) -> Self {
        let e::airport::Airport {
            id,
            name,
            code,
            city,
            country,
            created_at,
        } = from;
        Self {
            id: id.into(),
            name,
            code: code.as_str().to_owned(),
            city,
            country,
            created_at: created_at.as_secs(),
        }
    }
}

impl TryFrom<Airport> for e::airport::Airport {
    type Error = e::airport::IataCodeParseError;

    fn try_from(from: Airport) -> Result<Self, Self::Error> {
        let Airport {
            id,
            name,
            code,
            city,
            country,
            created_at,
        } = from;
        Ok(Self {
            id: id.into(),
            name,
            code: code.parse()?,
            city,
            country,
            created_at: e::time::Timestamp::from_secs(created_at),
        })
    }
}

impl From<e::subscription::AirportSubscription> for AirportSubscription {
    fn from(from: e::subscription::AirportSubscription) -> Self {
        let e::subscription::AirportSubscription {
            id,
            airport_id,
            plan,
            start_at,
            expire_at,
            max_employees,
            status,
        } = from;
        Self {
            id: id.into(),
            airport_id: airport_id.into(),
            plan: plan.into(),
            start_at: start_at.as_secs(),
            expire_at: expire_at.as_secs(),
            max_employees,
            status: status.into(),
        }
    }
}

impl From<e::payment::PaymentRecord> for PaymentRecord {
    fn from(from: e::payment::PaymentRecord) -> Self {
        let e::payment::PaymentRecord {
            id,
            request_id,
            plan,
            amount_usd_cents,
            provider_session,
            paid_at,
        } = from;
        Self {
            id: id.into(),
            request_id: request_id.into(),
            plan: plan.into(),
            amount_usd_cents,
            provider_session,
            paid_at: paid_at.as_secs(),
        }
    }
}

impl From<e::flight::Flight> for Flight {
    fn from(from: e::flight::Flight) -> Self {
        let e::flight::Flight {
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
            id: id.into(),
            flight_number,
            airline_code,
            status: status.to_string(),
            scheduled_departure: scheduled_departure.as_secs(),
            scheduled_arrival: scheduled_arrival.as_secs(),
            origin_airport_id: origin_airport_id.into(),
            destination_airport_id: destination_airport_id.into(),
            protected,
            updated_at: updated_at.as_secs(),
        }
    }
}

impl From<e::flight::FlightStatusChange> for FlightStatusChange {
    fn from(from: e::flight::FlightStatusChange) -> Self {
        let e::flight::FlightStatusChange {
            id,
            flight_id,
            old_status,
            new_status,
            changed_at,
        } = from;
        Self {
            id: id.into(),
            flight_id: flight_id.into(),
            old_status: old_status.to_string(),
            new_status: new_status.to_string(),
            changed_at: changed_at.as_secs(),
        }
    }
}

impl From<e::gate::GateAssignment> for GateAssignment {
    fn from(from: e::gate::GateAssignment) -> Self {
        let e::gate::GateAssignment {
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
            id: id.into(),
            flight_id: flight_id.into(),
            gate,
            terminal,
            boarding_open_at: boarding_open_at.as_secs(),
            boarding_close_at: boarding_close_at.as_secs(),
            assigned_at: assigned_at.as_secs(),
            released_at: released_at.map(e::time::Timestamp::as_secs),
        }
    }
}

impl From<e::gate::BoardingPhase> for BoardingPhase {
    fn from(from: e::gate::BoardingPhase) -> Self {
        use e::gate::BoardingPhase::*;
        match from {
            PreOpen => BoardingPhase::PreOpen,
            Boarding => BoardingPhase::Boarding,
            Closed => BoardingPhase::Closed,
            Unknown => BoardingPhase::Unknown,
        }
    }
}

impl From<BoardingPhase> for e::gate::BoardingPhase {
    fn from(from: BoardingPhase) -> Self {
        use e::gate::BoardingPhase::*;
        match from {
            BoardingPhase::PreOpen => PreOpen,
            BoardingPhase::Boarding => Boarding,
            BoardingPhase::Closed => Closed,
            BoardingPhase::Unknown => Unknown,
        }
    }
}

impl From<e::passenger::Language> for Language {
    fn from(from: e::passenger::Language) -> Self {
        use e::passenger::Language::*;
        match from {
            English => Language::English,
            Arabic => Language::Arabic,
        }
    }
}

impl From<Language> for e::passenger::Language {
    fn from(from: Language) -> Self {
        use e::passenger::Language::*;
        match from {
            Language::English => English,
            Language::Arabic => Arabic,
        }
    }
}

impl From<e::passenger::Booking> for Booking {
    fn from(from: e::passenger::Booking) -> Self {
        let e::passenger::Booking {
            id,
            passenger_id,
            flight_id,
            seat,
            booking_ref,
            created_at,
        } = from;
        Self {
            id: id.into(),
            passenger_id: passenger_id.into(),
            flight_id: flight_id.into(),
            seat,
            booking_ref,
            created_at: created_at.as_secs(),
        }
    }
}

impl From<e::ticket::Ticket> for Ticket {
    fn from(from: e::ticket::Ticket) -> Self {
        let e::ticket::Ticket {
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
            id: id.into(),
            airport_id: airport_id.into(),
            created_by: created_by.into(),
            assigned_to: assigned_to.map(Into::into),
            title,
            description,
            category: category.into(),
            priority: priority.into(),
            status: status.into(),
            created_at: created_at.as_secs(),
            updated_at: updated_at.as_secs(),
        }
    }
}

impl From<e::ticket::TicketCategory> for TicketCategory {
    fn from(from: e::ticket::TicketCategory) -> Self {
        use e::ticket::TicketCategory::*;
        match from {
            Api => TicketCategory::Api,
            Sms => TicketCategory::Sms,
            System => TicketCategory::System,
            Other => TicketCategory::Other,
        }
    }
}

impl From<TicketCategory> for e::ticket::TicketCategory {
    fn from(from: TicketCategory) -> Self {
        use e::ticket::TicketCategory::*;
        match from {
            TicketCategory::Api => Api,
            TicketCategory::Sms => Sms,
            TicketCategory::System => System,
            TicketCategory::Other => Other,
        }
    }
}

impl From<e::ticket::TicketPriority> for TicketPriority {
    fn from(from: e::ticket::TicketPriority) -> Self {
        use e::ticket::TicketPriority::*;
        match from {
            High => TicketPriority::High,
            Medium => TicketPriority::Medium,
            Low => TicketPriority::Low,
        }
    }
}

impl From<TicketPriority> for e::ticket::TicketPriority {
    fn from(from: TicketPriority) -> Self {
        use e::ticket::TicketPriority::*;
        match from {
            TicketPriority::High => High,
            TicketPriority::Medium => Medium,
            TicketPriority::Low => Low,
        }
    }
}

impl From<e::ticket::TicketStatus> for TicketStatus {
    fn from(from: e::ticket::TicketStatus) -> Self {
        use e::ticket::TicketStatus::*;
        match from {
            Open => TicketStatus::Open,
            Escalated => TicketStatus::Escalated,
            Closed => TicketStatus::Closed,
            Rejected => TicketStatus::Rejected,
        }
    }
}

impl From<TicketStatus> for e::ticket::TicketStatus {
    fn from(from: TicketStatus) -> Self {
        use e::ticket::TicketStatus::*;
        match from {
            TicketStatus::Open => Open,
            TicketStatus::Escalated => Escalated,
            TicketStatus::Closed => Closed,
            TicketStatus::Rejected => Rejected,
        }
    }
}

impl From<e::ticket::TicketComment> for TicketComment {
    fn from(from: e::ticket::TicketComment) -> Self {
        let e::ticket::TicketComment {
            id,
            ticket_id,
            author_id,
            body,
            created_at,
        } = from;
        Self {
            id: id.into(),
            ticket_id: ticket_id.into(),
            author_id: author_id.into(),
            body,
            created_at: created_at.as_secs(),
        }
    }
}

impl From<e::user::User> for User {
    fn from(from: e::user::User) -> Self {
        let e::user::User {
            id,
            email,
            password: _password,
            role,
            airport_id,
            created_at,
        } = from;
        Self {
            id: id.into(),
            email: email.into_string(),
            role: role.into(),
            airport_id: airport_id.map(Into::into),
            created_at: created_at.as_secs(),
        }
    }
}

impl From<e::user::Role> for UserRole {
    fn from(from: e::user::Role) -> Self {
        use e::user::Role::*;
        match from {
            Guest => UserRole::Guest,
            Operator => UserRole::Operator,
            AirportAdmin => UserRole::AirportAdmin,
            PlatformAdmin => UserRole::PlatformAdmin,
        }
    }
}

impl From<UserRole> for e::user::Role {
    fn from(from: UserRole) -> Self {
        use e::user::Role::*;
        match from {
            UserRole::Guest => Guest,
            UserRole::Operator => Operator,
            UserRole::AirportAdmin => AirportAdmin,
            UserRole::PlatformAdmin => PlatformAdmin,
        }
    }
}

impl From<e::contact::ContactMessage> for ContactMessage {
    fn from(from: e::contact::ContactMessage) -> Self {
        let e::contact::ContactMessage {
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
            id: id.into(),
            first_name,
            last_name,
            email: email.into_string(),
            subject,
            message,
            resolved,
            created_at: created_at.as_secs(),
        }
    }
}

pub use rassid_boundary::*;

use std::ops::Not;

use rassid_core::{entities as e, usecases};

pub mod from_json {
    //! JSON -> Entity

    use super::*;

    // NOTE:
    // We cannot impl From<T> here, because the JSON structs
    // and the usecase structs both are outside this crate.

    pub fn new_subscription_request(r: NewSubscriptionRequest) -> usecases::NewSubscriptionRequest {
        let NewSubscriptionRequest {
            airport_name,
            airport_code,
            city,
            country,
            contact_email,
            contact_phone,
            plan,
            license_file,
            commercial_record_file,
        } = r;
        usecases::NewSubscriptionRequest {
            airport_name,
            airport_code,
            city,
            country,
            contact_email,
            contact_phone,
            plan: plan.into(),
            license_file,
            commercial_record_file,
        }
    }

    pub fn new_booking(b: NewBooking) -> usecases::NewBooking {
        let NewBooking {
            full_name,
            email,
            phone,
            language,
            seat,
            booking_ref,
        } = b;
        usecases::NewBooking {
            full_name,
            email,
            phone,
            language: language.into(),
            seat,
            booking_ref,
        }
    }

    pub fn new_gate_assignment(g: NewGateAssignment) -> usecases::NewGateAssignment {
        let NewGateAssignment {
            gate,
            terminal,
            boarding_open_at,
            boarding_close_at,
        } = g;
        usecases::NewGateAssignment {
            gate,
            terminal,
            boarding_open_at: e::Timestamp::from_secs(boarding_open_at),
            boarding_close_at: e::Timestamp::from_secs(boarding_close_at),
        }
    }

    pub fn new_ticket(t: NewTicket) -> usecases::NewTicket {
        let NewTicket {
            title,
            description,
            category,
            priority,
        } = t;
        usecases::NewTicket {
            title,
            description,
            category: category.into(),
            priority: priority.into(),
        }
    }

    pub fn new_employee(n: NewEmployee) -> usecases::NewEmployee {
        let NewEmployee {
            email,
            password,
            role,
        } = n;
        usecases::NewEmployee {
            email,
            password: password.is_empty().not().then_some(password),
            role: role.into(),
        }
    }

    pub fn employee_update(u: UpdateEmployee) -> usecases::EmployeeUpdate {
        let UpdateEmployee { role, password } = u;
        usecases::EmployeeUpdate {
            role: role.map(Into::into),
            password,
        }
    }

    pub fn new_contact_message(m: NewContactMessage) -> usecases::NewContactMessage {
        let NewContactMessage {
            first_name,
            last_name,
            email,
            subject,
            message,
        } = m;
        usecases::NewContactMessage {
            first_name,
            last_name,
            email,
            subject,
            message,
        }
    }

    pub fn flight_update(u: UpdateFlightStatus) -> usecases::FlightUpdate {
        usecases::FlightUpdate {
            status: Some(u.status.as_str().into()),
            ..Default::default()
        }
    }
}

pub mod to_json {
    //! Entity -> JSON

    use super::*;

    pub fn tracked_booking(view: usecases::PassengerTrackingView) -> TrackedBooking {
        let usecases::PassengerTrackingView {
            passenger,
            booking,
            flight,
            gate,
            boarding_phase,
            countdown_secs,
            timeline,
        } = view;
        TrackedBooking {
            passenger_name: passenger.full_name,
            language: passenger.language.into(),
            booking_ref: booking.booking_ref,
            seat: booking.seat,
            flight: flight.into(),
            gate: gate.map(Into::into),
            boarding_phase: boarding_phase.into(),
            countdown_secs,
            timeline: timeline.into_iter().map(timeline_entry).collect(),
        }
    }

    pub fn timeline_entry(entry: usecases::TimelineEntry) -> TimelineEntry {
        let usecases::TimelineEntry { happened_at, event } = entry;
        let event = match event {
            usecases::TimelineEvent::StatusChanged { from, to } => TimelineEvent::StatusChanged {
                from: from.to_string(),
                to: to.to_string(),
            },
            usecases::TimelineEvent::GateAssigned { gate, terminal } => {
                TimelineEvent::GateAssigned { gate, terminal }
            }
        };
        TimelineEntry {
            happened_at: happened_at.as_secs(),
            event,
        }
    }

    pub fn platform_stats(stats: usecases::PlatformStats) -> PlatformStats {
        let usecases::PlatformStats {
            airports,
            active_subscriptions,
            pending_requests,
            flights,
            open_tickets,
            escalated_tickets,
        } = stats;
        PlatformStats {
            airports: airports as u64,
            active_subscriptions: active_subscriptions as u64,
            pending_requests: pending_requests as u64,
            flights: flights as u64,
            open_tickets: open_tickets as u64,
            escalated_tickets: escalated_tickets as u64,
        }
    }

    pub fn airport_stats(stats: usecases::AirportStats) -> AirportStats {
        let usecases::AirportStats {
            employees,
            flights,
            open_tickets,
            subscription,
        } = stats;
        AirportStats {
            employees: employees as u64,
            flights: flights as u64,
            open_tickets: open_tickets as u64,
            subscription: subscription.map(Into::into),
        }
    }

    pub fn gate_location(location: rassid_core::gateways::indoor_map::GateLocation) -> GateLocation {
        let rassid_core::gateways::indoor_map::GateLocation {
            building,
            floor,
            map_url,
        } = location;
        GateLocation {
            building,
            floor,
            map_url,
        }
    }

    pub fn checkout_details(request: e::SubscriptionRequest, amount_usd_cents: i64) -> CheckoutDetails {
        CheckoutDetails {
            request_id: request.id.into(),
            airport_name: request.airport.name,
            plan: request.plan.into(),
            amount_usd_cents,
        }
    }
}

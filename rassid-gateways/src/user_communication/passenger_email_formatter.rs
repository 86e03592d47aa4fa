use askama::Template;
use rassid_core::usecases::{PassengerEmailFormatter, PassengerEvent, PassengerNotification};
use rassid_entities::{
    email::EmailContent,
    passenger::{Language, Passenger},
};

use super::{format_date_time, format_time_of_day};

/// Renders passenger mail in the passenger's preferred language,
/// always closing with the durable tracking link.
pub struct PassengerFormatter {
    tracking_base_url: String,
}

impl PassengerFormatter {
    pub fn new(tracking_base_url: impl Into<String>) -> Self {
        Self {
            tracking_base_url: tracking_base_url.into(),
        }
    }

    fn tracking_url(&self, passenger: &Passenger) -> String {
        format!(
            "{}/{}",
            self.tracking_base_url.trim_end_matches('/'),
            passenger.tracking_token
        )
    }
}

fn subject_flight_update(flight_number: &str, language: Language) -> String {
    match language {
        Language::English => format!("Flight Update {}", flight_number),
        Language::Arabic => format!("تحديث الرحلة {}", flight_number),
    }
}

fn subject_booking_confirmation(language: Language) -> String {
    match language {
        Language::English => "Booking Confirmation - Rassid".to_owned(),
        Language::Arabic => "تأكيد الحجز - راصد".to_owned(),
    }
}

fn subject_departure_reminder(flight_number: &str, language: Language) -> String {
    match language {
        Language::English => format!("Departure Reminder {}", flight_number),
        Language::Arabic => format!("تذكير بالمغادرة {}", flight_number),
    }
}

impl PassengerEmailFormatter for PassengerFormatter {
    fn format_email(&self, notification: &PassengerNotification) -> EmailContent {
        let PassengerNotification {
            passenger,
            booking,
            flight,
            event,
        } = notification;
        let language = passenger.language;
        let passenger_name = &passenger.full_name;
        let flight_number = &flight.flight_number;
        let tracking_url = &self.tracking_url(passenger);
        let (subject, body) = match event {
            PassengerEvent::StatusChanged { change } => {
                let new_status = &change.new_status.to_string();
                let body = match language {
                    Language::English => FlightStatusBodyEnTemplate {
                        passenger_name,
                        flight_number,
                        new_status,
                        tracking_url,
                    }
                    .render(),
                    Language::Arabic => FlightStatusBodyArTemplate {
                        passenger_name,
                        flight_number,
                        new_status,
                        tracking_url,
                    }
                    .render(),
                };
                (subject_flight_update(flight_number, language), body.unwrap())
            }
            PassengerEvent::GateAssigned { assignment } => {
                let gate = &assignment.gate;
                let terminal = &assignment.terminal;
                let boarding_time = &format_time_of_day(assignment.boarding_open_at);
                let body = match language {
                    Language::English => GateUpdateBodyEnTemplate {
                        passenger_name,
                        flight_number,
                        gate,
                        terminal,
                        boarding_time,
                        tracking_url,
                    }
                    .render(),
                    Language::Arabic => GateUpdateBodyArTemplate {
                        passenger_name,
                        flight_number,
                        gate,
                        terminal,
                        boarding_time,
                        tracking_url,
                    }
                    .render(),
                };
                (subject_flight_update(flight_number, language), body.unwrap())
            }
            PassengerEvent::BookingConfirmed => {
                let booking_ref = &booking.booking_ref;
                let departure_time = &format_date_time(flight.scheduled_departure);
                let body = match language {
                    Language::English => BookingConfirmationBodyEnTemplate {
                        passenger_name,
                        flight_number,
                        booking_ref,
                        departure_time,
                        tracking_url,
                    }
                    .render(),
                    Language::Arabic => BookingConfirmationBodyArTemplate {
                        passenger_name,
                        flight_number,
                        booking_ref,
                        departure_time,
                        tracking_url,
                    }
                    .render(),
                };
                (subject_booking_confirmation(language), body.unwrap())
            }
            PassengerEvent::DepartureReminder => {
                let departure_time = &format_date_time(flight.scheduled_departure);
                let body = match language {
                    Language::English => DepartureReminderBodyEnTemplate {
                        passenger_name,
                        flight_number,
                        departure_time,
                        tracking_url,
                    }
                    .render(),
                    Language::Arabic => DepartureReminderBodyArTemplate {
                        passenger_name,
                        flight_number,
                        departure_time,
                        tracking_url,
                    }
                    .render(),
                };
                (
                    subject_departure_reminder(flight_number, language),
                    body.unwrap(),
                )
            }
        };
        EmailContent { subject, body }
    }
}

#[derive(Template)]
#[template(path = "email_flight_status/body_EN.txt")]
struct FlightStatusBodyEnTemplate<'a> {
    passenger_name: &'a str,
    flight_number: &'a str,
    new_status: &'a str,
    tracking_url: &'a str,
}

#[derive(Template)]
#[template(path = "email_flight_status/body_AR.txt")]
struct FlightStatusBodyArTemplate<'a> {
    passenger_name: &'a str,
    flight_number: &'a str,
    new_status: &'a str,
    tracking_url: &'a str,
}

#[derive(Template)]
#[template(path = "email_gate_update/body_EN.txt")]
struct GateUpdateBodyEnTemplate<'a> {
    passenger_name: &'a str,
    flight_number: &'a str,
    gate: &'a str,
    terminal: &'a str,
    boarding_time: &'a str,
    tracking_url: &'a str,
}

#[derive(Template)]
#[template(path = "email_gate_update/body_AR.txt")]
struct GateUpdateBodyArTemplate<'a> {
    passenger_name: &'a str,
    flight_number: &'a str,
    gate: &'a str,
    terminal: &'a str,
    boarding_time: &'a str,
    tracking_url: &'a str,
}

#[derive(Template)]
#[template(path = "email_booking_confirmation/body_EN.txt")]
struct BookingConfirmationBodyEnTemplate<'a> {
    passenger_name: &'a str,
    flight_number: &'a str,
    booking_ref: &'a str,
    departure_time: &'a str,
    tracking_url: &'a str,
}

#[derive(Template)]
#[template(path = "email_booking_confirmation/body_AR.txt")]
struct BookingConfirmationBodyArTemplate<'a> {
    passenger_name: &'a str,
    flight_number: &'a str,
    booking_ref: &'a str,
    departure_time: &'a str,
    tracking_url: &'a str,
}

#[derive(Template)]
#[template(path = "email_departure_reminder/body_EN.txt")]
struct DepartureReminderBodyEnTemplate<'a> {
    passenger_name: &'a str,
    flight_number: &'a str,
    departure_time: &'a str,
    tracking_url: &'a str,
}

#[derive(Template)]
#[template(path = "email_departure_reminder/body_AR.txt")]
struct DepartureReminderBodyArTemplate<'a> {
    passenger_name: &'a str,
    flight_number: &'a str,
    departure_time: &'a str,
    tracking_url: &'a str,
}

#[cfg(test)]
mod tests {
    use rassid_entities::{email::EmailAddress, flight::*, gate::GateAssignment, id::Id, passenger::*, time::Timestamp};

    use super::*;

    fn new_flight() -> Flight {
        Flight {
            id: Id::new(),
            flight_number: "SV123".into(),
            airline_code: "SV".into(),
            status: FlightStatus::Scheduled,
            scheduled_departure: Timestamp::from_secs(1_735_725_600),
            scheduled_arrival: Timestamp::from_secs(1_735_740_000),
            origin_airport_id: Id::new(),
            destination_airport_id: Id::new(),
            protected: false,
            updated_at: Timestamp::now(),
        }
    }

    fn new_notification(language: Language, event: PassengerEvent) -> PassengerNotification {
        let flight = new_flight();
        let passenger = Passenger {
            id: Id::new(),
            full_name: "<name>".into(),
            email: EmailAddress::new_unchecked("passenger@example.com".into()),
            phone: None,
            language,
            tracking_token: "tok123".parse().unwrap(),
        };
        let booking = Booking {
            id: Id::new(),
            passenger_id: passenger.id.clone(),
            flight_id: flight.id.clone(),
            seat: Some("12A".into()),
            booking_ref: "<ref>".into(),
            created_at: Timestamp::now(),
        };
        PassengerNotification {
            passenger,
            booking,
            flight,
            event,
        }
    }

    fn status_change(flight: &Flight) -> PassengerEvent {
        PassengerEvent::StatusChanged {
            change: FlightStatusChange {
                id: Id::new(),
                flight_id: flight.id.clone(),
                old_status: FlightStatus::Scheduled,
                new_status: FlightStatus::Delayed,
                changed_at: Timestamp::now(),
            },
        }
    }

    #[test]
    fn status_update_carries_new_status_and_tracking_link() {
        let formatter = PassengerFormatter::new("https://rassid.example.com/track/");
        let notification = new_notification(Language::English, PassengerEvent::BookingConfirmed);
        let event = status_change(&notification.flight);
        let notification = PassengerNotification {
            event,
            ..notification
        };
        let email = formatter.format_email(&notification);
        assert_eq!(email.subject, "Flight Update SV123");
        assert!(email.body.contains("delayed"));
        // no double slash even with a trailing slash in the base url
        assert!(email
            .body
            .contains("https://rassid.example.com/track/tok123"));
        assert!(!email.body.contains("track//tok123"));
    }

    #[test]
    fn arabic_passengers_get_arabic_mail() {
        let formatter = PassengerFormatter::new("https://rassid.example.com/track");
        let notification = new_notification(Language::Arabic, PassengerEvent::BookingConfirmed);
        let event = status_change(&notification.flight);
        let notification = PassengerNotification {
            event,
            ..notification
        };
        let email = formatter.format_email(&notification);
        assert_eq!(email.subject, "تحديث الرحلة SV123");
        assert!(email.body.contains("عزيزي"));
        assert!(email.body.contains("https://rassid.example.com/track/tok123"));
    }

    #[test]
    fn gate_update_includes_gate_terminal_and_boarding_time() {
        let formatter = PassengerFormatter::new("https://rassid.example.com/track");
        let notification = new_notification(Language::English, PassengerEvent::BookingConfirmed);
        let event = PassengerEvent::GateAssigned {
            assignment: GateAssignment {
                id: Id::new(),
                flight_id: notification.flight.id.clone(),
                gate: "B7".into(),
                terminal: "T1".into(),
                // 2025-01-01 09:20:00 UTC
                boarding_open_at: Timestamp::from_secs(1_735_723_200),
                boarding_close_at: Timestamp::from_secs(1_735_725_000),
                assigned_at: Timestamp::now(),
                released_at: None,
            },
        };
        let notification = PassengerNotification {
            event,
            ..notification
        };
        let email = formatter.format_email(&notification);
        assert!(email.body.contains("B7"));
        assert!(email.body.contains("T1"));
        assert!(email.body.contains("09:20"));
    }

    #[test]
    fn booking_confirmation_and_reminder_mention_the_departure() {
        let formatter = PassengerFormatter::new("https://rassid.example.com/track");
        let confirmation =
            formatter.format_email(&new_notification(Language::English, PassengerEvent::BookingConfirmed));
        assert_eq!(confirmation.subject, "Booking Confirmation - Rassid");
        assert!(confirmation.body.contains("<ref>"));
        assert!(confirmation.body.contains("2025-01-01 10:00:00"));

        let reminder =
            formatter.format_email(&new_notification(Language::Arabic, PassengerEvent::DepartureReminder));
        assert_eq!(reminder.subject, "تذكير بالمغادرة SV123");
        assert!(reminder.body.contains("2025-01-01 10:00:00"));
    }
}

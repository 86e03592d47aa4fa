
pub mod prelude {

    use std::cell::RefCell;

    use time::Duration;

    pub use rassid_core::{
        db::*,
        entities::*,
        gateways::{
            email::{EmailGateway, EmailSendError},
            flight_data::{FetchedFlight, FetchedFlights, FlightDataError, FlightDataGateway},
            notify::{DeliveryReceipt, NotificationEvent, NotificationGateway, NotificationType},
            payment::{CheckoutSession, PaymentGateway, PaymentGatewayError, PaymentStatus},
        },
        repositories::{Error as RepoError, *},
        usecases,
        usecases::{PassengerEmailFormatter, PassengerEvent, PassengerNotification},
    };

    pub mod sqlite {
        pub use super::super::super::sqlite::*;
    }

    pub use crate::{
        error::{AppError, BError},
        prelude as flows,
    };

    /// Records raised events and returns one synthetic receipt per
    /// event, so flows that log deliveries can be observed.
    #[derive(Default)]
    pub struct FakeNotifyGw {
        pub events: RefCell<Vec<NotificationType>>,
    }

    impl NotificationGateway for FakeNotifyGw {
        fn notify(&self, event: NotificationEvent) -> Vec<DeliveryReceipt> {
            let kind = event.kind();
            self.events.borrow_mut().push(kind);
            vec![DeliveryReceipt {
                recipient: "mailbox@rassid.example".parse().unwrap(),
                subject: format!("{kind:?}"),
                error: None,
            }]
        }
    }

    /// Captures passenger mail instead of sending it.
    #[derive(Default)]
    pub struct FakeEmailGw {
        pub sent: RefCell<Vec<(EmailAddress, EmailContent)>>,
    }

    impl EmailGateway for FakeEmailGw {
        fn compose_and_send(
            &self,
            recipients: &[EmailAddress],
            email: &EmailContent,
        ) -> std::result::Result<(), EmailSendError> {
            for recipient in recipients {
                self.sent
                    .borrow_mut()
                    .push((recipient.clone(), email.clone()));
            }
            Ok(())
        }
    }

    /// Makes language and event kind visible in the subject line.
    pub struct MarkerFormatter;

    impl PassengerEmailFormatter for MarkerFormatter {
        fn format_email(&self, notification: &PassengerNotification) -> EmailContent {
            let tag = match &notification.event {
                PassengerEvent::StatusChanged { change } => {
                    format!("status:{}", change.new_status)
                }
                PassengerEvent::GateAssigned { assignment } => {
                    format!("gate:{}", assignment.gate)
                }
                PassengerEvent::BookingConfirmed => "booking".to_owned(),
                PassengerEvent::DepartureReminder => "reminder".to_owned(),
            };
            EmailContent {
                subject: format!(
                    "[{}] {} {}",
                    notification.passenger.language, notification.flight.flight_number, tag
                ),
                body: format!("/track/{}", notification.passenger.tracking_token),
            }
        }
    }

    /// Issues predictable session ids and answers every verification
    /// with the configured verdict.
    pub struct FakePaymentGw {
        pub verdict: RefCell<PaymentStatus>,
        pub sessions: RefCell<Vec<String>>,
    }

    impl Default for FakePaymentGw {
        fn default() -> Self {
            Self {
                verdict: RefCell::new(PaymentStatus::Completed),
                sessions: RefCell::new(Vec::new()),
            }
        }
    }

    impl PaymentGateway for FakePaymentGw {
        fn create_checkout_session(
            &self,
            request: &SubscriptionRequest,
            amount_usd_cents: i64,
        ) -> std::result::Result<CheckoutSession, PaymentGatewayError> {
            let session_id = format!("sess-{}", request.id);
            self.sessions.borrow_mut().push(session_id.clone());
            Ok(CheckoutSession {
                checkout_url: format!(
                    "https://pay.example/checkout/{session_id}?amount={amount_usd_cents}"
                ),
                session_id,
            })
        }

        fn verify_session(
            &self,
            session_id: &str,
        ) -> std::result::Result<PaymentStatus, PaymentGatewayError> {
            if !self.sessions.borrow().iter().any(|s| s == session_id) {
                return Err(PaymentGatewayError::SessionNotFound);
            }
            Ok(*self.verdict.borrow())
        }
    }

    pub fn default_request_form(code: &str) -> usecases::NewSubscriptionRequest {
        usecases::NewSubscriptionRequest {
            airport_name: format!("{code} International Airport"),
            airport_code: code.into(),
            city: "Riyadh".into(),
            country: "Saudi Arabia".into(),
            contact_email: format!("contact@{}.example", code.to_lowercase()),
            contact_phone: "0512345678".into(),
            plan: SubscriptionPlan::OneYear,
            license_file: "license.pdf".into(),
            commercial_record_file: None,
        }
    }

    pub struct BackendFixture {
        pub db_connections: sqlite::Connections,
        pub notify: FakeNotifyGw,
        pub email_gateway: FakeEmailGw,
        pub payment_gateway: FakePaymentGw,
    }

    impl BackendFixture {
        pub fn new() -> Self {
            let _ = env_logger::builder().is_test(true).try_init();
            let db_connections = sqlite::Connections::init(":memory:", 1).unwrap();
            rassid_db_sqlite::run_embedded_database_migrations(db_connections.exclusive().unwrap());
            Self {
                db_connections,
                notify: FakeNotifyGw::default(),
                email_gateway: FakeEmailGw::default(),
                payment_gateway: FakePaymentGw::default(),
            }
        }

        pub fn create_user(
            &self,
            role: Role,
            airport_id: Option<&Id>,
            email: &str,
            password: &str,
        ) -> User {
            let user = User {
                id: Id::new(),
                email: email.parse().unwrap(),
                password: password.parse().unwrap(),
                role,
                airport_id: airport_id.cloned(),
                created_at: Timestamp::now(),
            };
            self.db_connections
                .exclusive()
                .unwrap()
                .create_user(&user)
                .unwrap();
            user
        }

        pub fn create_airport(&self, code: &str) -> Airport {
            let code: IataCode = code.parse().unwrap();
            let airport = Airport {
                id: Id::new(),
                name: format!("{code} International Airport"),
                code,
                city: "Riyadh".into(),
                country: "Saudi Arabia".into(),
                created_at: Timestamp::now(),
            };
            self.db_connections
                .exclusive()
                .unwrap()
                .create_airport(&airport)
                .unwrap();
            airport
        }

        pub fn create_active_subscription(&self, airport_id: &Id) -> AirportSubscription {
            let now = Timestamp::now();
            let subscription = AirportSubscription {
                id: Id::new(),
                airport_id: airport_id.clone(),
                plan: SubscriptionPlan::OneYear,
                start_at: now,
                expire_at: now + Duration::days(365),
                max_employees: DEFAULT_MAX_EMPLOYEES,
                status: SubscriptionStatus::Active,
            };
            self.db_connections
                .exclusive()
                .unwrap()
                .create_subscription(&subscription)
                .unwrap();
            subscription
        }

        /// A provisioned airport with its admin account.
        pub fn default_tenant(&self) -> (Airport, User) {
            let airport = self.create_airport("RUH");
            self.create_active_subscription(&airport.id);
            let admin = self.create_user(
                Role::AirportAdmin,
                Some(&airport.id),
                "admin@ruh.sa",
                "secret1",
            );
            (airport, admin)
        }

        pub fn create_flight(&self, number: &str, origin: &Id, destination: &Id) -> Flight {
            let now = Timestamp::now();
            let flight = Flight {
                id: Id::new(),
                flight_number: number.to_owned(),
                airline_code: number.chars().take(2).collect(),
                status: FlightStatus::Scheduled,
                scheduled_departure: now + Duration::hours(6),
                scheduled_arrival: now + Duration::hours(8),
                origin_airport_id: origin.clone(),
                destination_airport_id: destination.clone(),
                protected: false,
                updated_at: now,
            };
            self.db_connections
                .exclusive()
                .unwrap()
                .create_flight(&flight)
                .unwrap();
            flight
        }

        pub fn submit_request(&self, code: &str) -> SubscriptionRequest {
            flows::submit_subscription_request(
                &self.db_connections,
                &self.notify,
                default_request_form(code),
            )
            .unwrap()
        }

        /// Creates the passenger together with a booking on the flight.
        pub fn book_passenger(&self, flight_id: &Id, email: &str, language: Language) -> Passenger {
            let full_name = email.split('@').next().unwrap_or("passenger").to_owned();
            let passenger = Passenger {
                id: Id::new(),
                full_name,
                email: email.parse().unwrap(),
                phone: None,
                language,
                tracking_token: TrackingToken::new(),
            };
            let booking = Booking {
                id: Id::new(),
                passenger_id: passenger.id.clone(),
                flight_id: flight_id.clone(),
                seat: None,
                booking_ref: format!("REF-{}", passenger.id),
                created_at: Timestamp::now(),
            };
            let db = self.db_connections.exclusive().unwrap();
            db.create_passenger(&passenger).unwrap();
            db.create_booking(&booking).unwrap();
            passenger
        }

        pub fn create_ticket(&self, creator: &User) -> Ticket {
            let new = usecases::NewTicket {
                title: "Departure board frozen".into(),
                description: "The T1 departure board has not refreshed since 06:00.".into(),
                category: TicketCategory::System,
                priority: TicketPriority::Medium,
            };
            flows::create_ticket(&self.db_connections, creator, new).unwrap()
        }
    }
}

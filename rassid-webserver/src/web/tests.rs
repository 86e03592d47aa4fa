use std::sync::{Arc, Mutex};

use rocket::{config::Config as RocketCfg, local::blocking::Client, Route};

use crate::web::{self, sqlite, Cfg};
use rassid_core::{
    entities::*,
    repositories::*,
    gateways::{
        email::{EmailGateway, EmailSendError},
        flight_data::{FetchedFlight, FetchedFlights, FlightDataError, FlightDataGateway},
        indoor_map::{GateLocation, IndoorMapGateway},
        notify::{DeliveryReceipt, NotificationEvent, NotificationGateway, NotificationType},
        payment::{CheckoutSession, PaymentGateway, PaymentGatewayError, PaymentStatus},
    },
    usecases::{PassengerEmailFormatter, PassengerEvent, PassengerNotification},
};

pub mod prelude {
    pub const DUMMY_VERSION: &str = "3.2.1";

    pub use rocket::{
        http::{ContentType, Cookie, Status},
        local::blocking::{Client, LocalResponse},
    };

    pub use super::{rocket_test_setup, GatewayProbe, TestFixture};

    pub use rassid_core::{
        entities::*,
        gateways::{notify::NotificationType, payment::PaymentStatus},
        repositories::*,
    };
}

pub const CHECKOUT_BASE_URL: &str = "https://rassid.example/subscribe/checkout";

/// Records raised events and returns one synthetic receipt per
/// event, so flows that log deliveries can be observed.
#[derive(Default, Clone)]
pub struct FakeNotifyGw {
    pub events: Arc<Mutex<Vec<NotificationType>>>,
}

impl NotificationGateway for FakeNotifyGw {
    fn notify(&self, event: NotificationEvent) -> Vec<DeliveryReceipt> {
        let kind = event.kind();
        self.events.lock().unwrap().push(kind);
        vec![DeliveryReceipt {
            recipient: "mailbox@rassid.example".parse().unwrap(),
            subject: format!("{kind:?}"),
            error: None,
        }]
    }
}

/// Captures passenger mail instead of sending it.
#[derive(Default, Clone)]
pub struct FakeEmailGw {
    pub sent: Arc<Mutex<Vec<(EmailAddress, EmailContent)>>>,
}

impl EmailGateway for FakeEmailGw {
    fn compose_and_send(
        &self,
        recipients: &[EmailAddress],
        email: &EmailContent,
    ) -> Result<(), EmailSendError> {
        let mut sent = self.sent.lock().unwrap();
        for recipient in recipients {
            sent.push((recipient.clone(), email.clone()));
        }
        Ok(())
    }
}

/// Makes language and event kind visible in the subject line.
pub struct MarkerFormatter;

impl PassengerEmailFormatter for MarkerFormatter {
    fn format_email(&self, notification: &PassengerNotification) -> EmailContent {
        let tag = match &notification.event {
            PassengerEvent::StatusChanged { change } => format!("status:{}", change.new_status),
            PassengerEvent::GateAssigned { assignment } => format!("gate:{}", assignment.gate),
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
#[derive(Clone)]
pub struct FakePaymentGw {
    pub verdict: Arc<Mutex<PaymentStatus>>,
    pub sessions: Arc<Mutex<Vec<String>>>,
}

impl Default for FakePaymentGw {
    fn default() -> Self {
        Self {
            verdict: Arc::new(Mutex::new(PaymentStatus::Completed)),
            sessions: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl PaymentGateway for FakePaymentGw {
    fn create_checkout_session(
        &self,
        request: &SubscriptionRequest,
        amount_usd_cents: i64,
    ) -> Result<CheckoutSession, PaymentGatewayError> {
        let session_id = format!("sess-{}", request.id);
        self.sessions.lock().unwrap().push(session_id.clone());
        Ok(CheckoutSession {
            checkout_url: format!(
                "https://pay.example/checkout/{session_id}?amount={amount_usd_cents}"
            ),
            session_id,
        })
    }

    fn verify_session(&self, session_id: &str) -> Result<PaymentStatus, PaymentGatewayError> {
        if !self.sessions.lock().unwrap().iter().any(|s| s == session_id) {
            return Err(PaymentGatewayError::SessionNotFound);
        }
        Ok(*self.verdict.lock().unwrap())
    }
}

#[derive(Default, Clone)]
pub struct FakeFlightDataGw {
    pub records: Arc<Mutex<Vec<FetchedFlight>>>,
}

impl FlightDataGateway for FakeFlightDataGw {
    fn provider_name(&self) -> &str {
        "testfeed"
    }

    fn fetch_flights(&self, _: Option<&IataCode>) -> Result<FetchedFlights, FlightDataError> {
        Ok(FetchedFlights {
            records: self.records.lock().unwrap().clone(),
            raw_payload: "[]".to_owned(),
        })
    }
}

/// Knows one building per terminal, which is enough for the proxy.
pub struct FakeIndoorMapGw;

impl IndoorMapGateway for FakeIndoorMapGw {
    fn locate_gate(&self, _: &IataCode, terminal: &str, _: &str) -> Option<GateLocation> {
        Some(GateLocation {
            building: format!("{terminal} Concourse"),
            floor: "2".to_owned(),
            map_url: None,
        })
    }
}

/// Shared handles into the fake gateways of a running test instance.
pub struct GatewayProbe {
    pub notify_events: Arc<Mutex<Vec<NotificationType>>>,
    pub emails_sent: Arc<Mutex<Vec<(EmailAddress, EmailContent)>>>,
    pub payment_verdict: Arc<Mutex<PaymentStatus>>,
    pub payment_sessions: Arc<Mutex<Vec<String>>>,
    pub flight_records: Arc<Mutex<Vec<FetchedFlight>>>,
}

pub fn rocket_test_setup(
    mounts: Vec<(&'static str, Vec<Route>)>,
) -> (Client, sqlite::Connections, GatewayProbe) {
    let _ = env_logger::builder().is_test(true).try_init();
    let connections = rassid_db_sqlite::Connections::init(":memory:", 1).unwrap();
    rassid_db_sqlite::run_embedded_database_migrations(connections.exclusive().unwrap());
    let db = sqlite::Connections::from(connections);

    let notify = FakeNotifyGw::default();
    let email = FakeEmailGw::default();
    let payment = FakePaymentGw::default();
    let flight_data = FakeFlightDataGw::default();
    let probe = GatewayProbe {
        notify_events: Arc::clone(&notify.events),
        emails_sent: Arc::clone(&email.sent),
        payment_verdict: Arc::clone(&payment.verdict),
        payment_sessions: Arc::clone(&payment.sessions),
        flight_records: Arc::clone(&flight_data.records),
    };
    let gateways = web::Gateways {
        notify: Box::new(notify),
        email: Box::new(email),
        passenger_mail: Box::new(MarkerFormatter),
        payment: Box::new(payment),
        flight_data: Box::new(flight_data),
        indoor_map: Box::new(FakeIndoorMapGw),
    };
    let options = web::InstanceOptions {
        mounts,
        rocket_cfg: Some(RocketCfg::debug_default()),
        cfg: Cfg {
            checkout_base_url: CHECKOUT_BASE_URL.to_owned(),
        },
        version: prelude::DUMMY_VERSION,
    };
    let rocket = web::rocket_instance(options, db.clone(), gateways);
    let client = Client::tracked(rocket).unwrap();
    (client, db, probe)
}

/// Seeds entities directly through the database pool, bypassing the
/// HTTP surface under test.
pub struct TestFixture {
    pub client: Client,
    pub db: sqlite::Connections,
    pub probe: GatewayProbe,
}

impl TestFixture {
    pub fn new(mounts: Vec<(&'static str, Vec<Route>)>) -> Self {
        let (client, db, probe) = rocket_test_setup(mounts);
        Self { client, db, probe }
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
        self.db.exclusive().unwrap().create_user(&user).unwrap();
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
        self.db
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
            expire_at: now + time::Duration::days(365),
            max_employees: DEFAULT_MAX_EMPLOYEES,
            status: SubscriptionStatus::Active,
        };
        self.db
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
            scheduled_departure: now + time::Duration::hours(6),
            scheduled_arrival: now + time::Duration::hours(8),
            origin_airport_id: origin.clone(),
            destination_airport_id: destination.clone(),
            protected: false,
            updated_at: now,
        };
        self.db.exclusive().unwrap().create_flight(&flight).unwrap();
        flight
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
        let db = self.db.exclusive().unwrap();
        db.create_passenger(&passenger).unwrap();
        db.create_booking(&booking).unwrap();
        passenger
    }
}

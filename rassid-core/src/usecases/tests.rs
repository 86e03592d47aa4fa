// In-memory stand-in for the database, shared by all usecase tests.

use std::{cell::RefCell, collections::HashSet};

use time::Duration;

use super::prelude::*;
use crate::{
    gateways::email::{EmailGateway, EmailSendError},
    usecases::{NewSubscriptionRequest, PassengerEmailFormatter, PassengerNotification},
};

pub use crate::repositories::Error as RepoError;

type RepoResult<T> = std::result::Result<T, RepoError>;

trait Identifiable {
    fn id(&self) -> &Id;
}

macro_rules! identifiable {
    ($($entity:ty),+ $(,)?) => {
        $(impl Identifiable for $entity {
            fn id(&self) -> &Id {
                &self.id
            }
        })+
    };
}

identifiable!(
    User,
    Airport,
    SubscriptionRequest,
    AirportSubscription,
    Flight,
    GateAssignment,
    Passenger,
    Booking,
    Ticket,
    ContactMessage,
);

fn get<T: Clone + Identifiable>(objects: &[T], id: &Id) -> RepoResult<T> {
    objects
        .iter()
        .find(|object| object.id() == id)
        .cloned()
        .ok_or(RepoError::NotFound)
}

fn create<T: Clone + Identifiable>(objects: &mut Vec<T>, object: &T) -> RepoResult<()> {
    if objects.iter().any(|existing| existing.id() == object.id()) {
        return Err(RepoError::AlreadyExists);
    }
    objects.push(object.clone());
    Ok(())
}

fn update<T: Clone + Identifiable>(objects: &mut [T], object: &T) -> RepoResult<()> {
    let position = objects
        .iter()
        .position(|existing| existing.id() == object.id())
        .ok_or(RepoError::NotFound)?;
    objects[position] = object.clone();
    Ok(())
}

fn delete<T: Identifiable>(objects: &mut Vec<T>, id: &Id) -> RepoResult<()> {
    let position = objects
        .iter()
        .position(|existing| existing.id() == id)
        .ok_or(RepoError::NotFound)?;
    objects.remove(position);
    Ok(())
}

#[derive(Debug, Default)]
pub struct MockDb {
    pub users: RefCell<Vec<User>>,
    pub airports: RefCell<Vec<Airport>>,
    pub subscription_requests: RefCell<Vec<SubscriptionRequest>>,
    pub subscriptions: RefCell<Vec<AirportSubscription>>,
    pub flights: RefCell<Vec<Flight>>,
    pub status_changes: RefCell<Vec<FlightStatusChange>>,
    pub import_logs: RefCell<Vec<FlightImportLog>>,
    pub gate_assignments: RefCell<Vec<GateAssignment>>,
    pub passengers: RefCell<Vec<Passenger>>,
    pub bookings: RefCell<Vec<Booking>>,
    pub tickets: RefCell<Vec<Ticket>>,
    pub ticket_comments: RefCell<Vec<TicketComment>>,
    pub payments: RefCell<Vec<PaymentRecord>>,
    pub sent_notifications: RefCell<Vec<SentNotification>>,
    pub email_log: RefCell<Vec<EmailLogEntry>>,
    pub contact_messages: RefCell<Vec<ContactMessage>>,
}

impl UserRepo for MockDb {
    fn create_user(&self, user: &User) -> RepoResult<()> {
        create(&mut self.users.borrow_mut(), user)
    }
    fn update_user(&self, user: &User) -> RepoResult<()> {
        update(&mut self.users.borrow_mut(), user)
    }
    fn delete_user(&self, id: &Id) -> RepoResult<()> {
        delete(&mut self.users.borrow_mut(), id)
    }
    fn all_users(&self) -> RepoResult<Vec<User>> {
        Ok(self.users.borrow().clone())
    }
    fn get_user(&self, id: &Id) -> RepoResult<User> {
        get(&self.users.borrow(), id)
    }
    fn get_user_by_email(&self, email: &EmailAddress) -> RepoResult<User> {
        self.try_get_user_by_email(email)?.ok_or(RepoError::NotFound)
    }
    fn try_get_user_by_email(&self, email: &EmailAddress) -> RepoResult<Option<User>> {
        Ok(self
            .users
            .borrow()
            .iter()
            .find(|user| user.email == *email)
            .cloned())
    }
    fn get_users_by_airport(&self, airport_id: &Id) -> RepoResult<Vec<User>> {
        Ok(self
            .users
            .borrow()
            .iter()
            .filter(|user| user.is_scoped_to(airport_id))
            .cloned()
            .collect())
    }
    fn get_users_by_role(&self, role: Role) -> RepoResult<Vec<User>> {
        Ok(self
            .users
            .borrow()
            .iter()
            .filter(|user| user.role == role)
            .cloned()
            .collect())
    }
}

impl AirportRepo for MockDb {
    fn create_airport(&self, airport: &Airport) -> RepoResult<()> {
        create(&mut self.airports.borrow_mut(), airport)
    }
    fn update_airport(&self, airport: &Airport) -> RepoResult<()> {
        update(&mut self.airports.borrow_mut(), airport)
    }
    fn get_airport(&self, id: &Id) -> RepoResult<Airport> {
        get(&self.airports.borrow(), id)
    }
    fn try_get_airport_by_code(&self, code: &IataCode) -> RepoResult<Option<Airport>> {
        Ok(self
            .airports
            .borrow()
            .iter()
            .find(|airport| airport.code == *code)
            .cloned())
    }
    fn all_airports(&self) -> RepoResult<Vec<Airport>> {
        Ok(self.airports.borrow().clone())
    }
    fn count_airports(&self) -> RepoResult<usize> {
        Ok(self.airports.borrow().len())
    }
}

impl SubscriptionRequestRepo for MockDb {
    fn create_subscription_request(&self, request: &SubscriptionRequest) -> RepoResult<()> {
        create(&mut self.subscription_requests.borrow_mut(), request)
    }
    fn update_subscription_request(&self, request: &SubscriptionRequest) -> RepoResult<()> {
        update(&mut self.subscription_requests.borrow_mut(), request)
    }
    fn get_subscription_request(&self, id: &Id) -> RepoResult<SubscriptionRequest> {
        get(&self.subscription_requests.borrow(), id)
    }
    fn all_subscription_requests(&self) -> RepoResult<Vec<SubscriptionRequest>> {
        Ok(self.subscription_requests.borrow().clone())
    }
    fn subscription_requests_by_status(
        &self,
        status: RequestStatus,
    ) -> RepoResult<Vec<SubscriptionRequest>> {
        Ok(self
            .subscription_requests
            .borrow()
            .iter()
            .filter(|request| request.status == status)
            .cloned()
            .collect())
    }
}

impl SubscriptionRepo for MockDb {
    fn create_subscription(&self, subscription: &AirportSubscription) -> RepoResult<()> {
        create(&mut self.subscriptions.borrow_mut(), subscription)
    }
    fn update_subscription(&self, subscription: &AirportSubscription) -> RepoResult<()> {
        update(&mut self.subscriptions.borrow_mut(), subscription)
    }
    fn get_subscription(&self, id: &Id) -> RepoResult<AirportSubscription> {
        get(&self.subscriptions.borrow(), id)
    }
    fn try_get_subscription_by_airport(
        &self,
        airport_id: &Id,
    ) -> RepoResult<Option<AirportSubscription>> {
        Ok(self
            .subscriptions
            .borrow()
            .iter()
            .filter(|subscription| subscription.airport_id == *airport_id)
            .max_by_key(|subscription| {
                (
                    subscription.status == SubscriptionStatus::Active,
                    subscription.expire_at,
                )
            })
            .cloned())
    }
    fn all_subscriptions(&self) -> RepoResult<Vec<AirportSubscription>> {
        Ok(self.subscriptions.borrow().clone())
    }
}

impl FlightRepo for MockDb {
    fn create_flight(&self, flight: &Flight) -> RepoResult<()> {
        create(&mut self.flights.borrow_mut(), flight)
    }
    fn update_flight(&self, flight: &Flight) -> RepoResult<()> {
        update(&mut self.flights.borrow_mut(), flight)
    }
    fn get_flight(&self, id: &Id) -> RepoResult<Flight> {
        get(&self.flights.borrow(), id)
    }
    fn try_get_flight_by_number(&self, flight_number: &str) -> RepoResult<Option<Flight>> {
        Ok(self
            .flights
            .borrow()
            .iter()
            .find(|flight| flight.flight_number == flight_number)
            .cloned())
    }
    fn all_flights(&self) -> RepoResult<Vec<Flight>> {
        Ok(self.flights.borrow().clone())
    }
    fn flights_of_airport(&self, airport_id: &Id) -> RepoResult<Vec<Flight>> {
        Ok(self
            .flights
            .borrow()
            .iter()
            .filter(|flight| {
                flight.origin_airport_id == *airport_id
                    || flight.destination_airport_id == *airport_id
            })
            .cloned()
            .collect())
    }
    fn count_flights(&self) -> RepoResult<usize> {
        Ok(self.flights.borrow().len())
    }
    fn create_flight_status_change(&self, change: &FlightStatusChange) -> RepoResult<()> {
        self.status_changes.borrow_mut().push(change.clone());
        Ok(())
    }
    fn flight_status_history(&self, flight_id: &Id) -> RepoResult<Vec<FlightStatusChange>> {
        Ok(self
            .status_changes
            .borrow()
            .iter()
            .filter(|change| change.flight_id == *flight_id)
            .cloned()
            .collect())
    }
}

impl FlightImportLogRepo for MockDb {
    fn create_flight_import_log(&self, log: &FlightImportLog) -> RepoResult<()> {
        self.import_logs.borrow_mut().push(log.clone());
        Ok(())
    }
    fn last_flight_import_log(&self) -> RepoResult<Option<FlightImportLog>> {
        Ok(self.import_logs.borrow().last().cloned())
    }
}

impl GateRepo for MockDb {
    fn create_gate_assignment(&self, assignment: &GateAssignment) -> RepoResult<()> {
        create(&mut self.gate_assignments.borrow_mut(), assignment)
    }
    fn update_gate_assignment(&self, assignment: &GateAssignment) -> RepoResult<()> {
        update(&mut self.gate_assignments.borrow_mut(), assignment)
    }
    fn current_gate_of_flight(&self, flight_id: &Id) -> RepoResult<Option<GateAssignment>> {
        Ok(self
            .gate_assignments
            .borrow()
            .iter()
            .filter(|assignment| {
                assignment.flight_id == *flight_id && assignment.released_at.is_none()
            })
            .max_by_key(|assignment| assignment.assigned_at)
            .cloned())
    }
    fn gate_history_of_flight(&self, flight_id: &Id) -> RepoResult<Vec<GateAssignment>> {
        Ok(self
            .gate_assignments
            .borrow()
            .iter()
            .filter(|assignment| assignment.flight_id == *flight_id)
            .cloned()
            .collect())
    }
}

impl PassengerRepo for MockDb {
    fn create_passenger(&self, passenger: &Passenger) -> RepoResult<()> {
        create(&mut self.passengers.borrow_mut(), passenger)
    }
    fn get_passenger(&self, id: &Id) -> RepoResult<Passenger> {
        get(&self.passengers.borrow(), id)
    }
    fn try_get_passenger_by_email(&self, email: &EmailAddress) -> RepoResult<Option<Passenger>> {
        Ok(self
            .passengers
            .borrow()
            .iter()
            .find(|passenger| passenger.email == *email)
            .cloned())
    }
    fn get_passenger_by_token(&self, token: &TrackingToken) -> RepoResult<Passenger> {
        self.passengers
            .borrow()
            .iter()
            .find(|passenger| passenger.tracking_token == *token)
            .cloned()
            .ok_or(RepoError::NotFound)
    }
}

impl BookingRepo for MockDb {
    fn create_booking(&self, booking: &Booking) -> RepoResult<()> {
        create(&mut self.bookings.borrow_mut(), booking)
    }
    fn get_booking(&self, id: &Id) -> RepoResult<Booking> {
        get(&self.bookings.borrow(), id)
    }
    fn bookings_of_flight(&self, flight_id: &Id) -> RepoResult<Vec<Booking>> {
        Ok(self
            .bookings
            .borrow()
            .iter()
            .filter(|booking| booking.flight_id == *flight_id)
            .cloned()
            .collect())
    }
    fn bookings_of_passenger(&self, passenger_id: &Id) -> RepoResult<Vec<Booking>> {
        Ok(self
            .bookings
            .borrow()
            .iter()
            .filter(|booking| booking.passenger_id == *passenger_id)
            .cloned()
            .collect())
    }
}

impl TicketRepo for MockDb {
    fn create_ticket(&self, ticket: &Ticket) -> RepoResult<()> {
        create(&mut self.tickets.borrow_mut(), ticket)
    }
    fn update_ticket(&self, ticket: &Ticket) -> RepoResult<()> {
        update(&mut self.tickets.borrow_mut(), ticket)
    }
    fn get_ticket(&self, id: &Id) -> RepoResult<Ticket> {
        get(&self.tickets.borrow(), id)
    }
    fn all_tickets(&self) -> RepoResult<Vec<Ticket>> {
        Ok(self.tickets.borrow().clone())
    }
    fn tickets_of_airport(&self, airport_id: &Id) -> RepoResult<Vec<Ticket>> {
        Ok(self
            .tickets
            .borrow()
            .iter()
            .filter(|ticket| ticket.airport_id == *airport_id)
            .cloned()
            .collect())
    }
    fn create_ticket_comment(&self, comment: &TicketComment) -> RepoResult<()> {
        self.ticket_comments.borrow_mut().push(comment.clone());
        Ok(())
    }
    fn comments_of_ticket(&self, ticket_id: &Id) -> RepoResult<Vec<TicketComment>> {
        Ok(self
            .ticket_comments
            .borrow()
            .iter()
            .filter(|comment| comment.ticket_id == *ticket_id)
            .cloned()
            .collect())
    }
}

impl PaymentRepo for MockDb {
    fn create_payment(&self, payment: &PaymentRecord) -> RepoResult<()> {
        self.payments.borrow_mut().push(payment.clone());
        Ok(())
    }
    fn payments_of_request(&self, request_id: &Id) -> RepoResult<Vec<PaymentRecord>> {
        Ok(self
            .payments
            .borrow()
            .iter()
            .filter(|payment| payment.request_id == *request_id)
            .cloned()
            .collect())
    }
}

impl NotificationLogRepo for MockDb {
    fn save_sent_notification(
        &self,
        booking_id: &Id,
        event_key: &str,
        sent_at: Timestamp,
    ) -> RepoResult<()> {
        let mut sent = self.sent_notifications.borrow_mut();
        let exists = sent
            .iter()
            .any(|marker| marker.booking_id == *booking_id && marker.event_key == event_key);
        if !exists {
            sent.push(SentNotification {
                booking_id: booking_id.clone(),
                event_key: event_key.to_owned(),
                sent_at,
            });
        }
        Ok(())
    }
    fn find_sent_notification(
        &self,
        booking_id: &Id,
        event_key: &str,
    ) -> RepoResult<Option<Timestamp>> {
        Ok(self
            .sent_notifications
            .borrow()
            .iter()
            .find(|marker| marker.booking_id == *booking_id && marker.event_key == event_key)
            .map(|marker| marker.sent_at))
    }
    fn log_email(&self, entry: &EmailLogEntry) -> RepoResult<()> {
        self.email_log.borrow_mut().push(entry.clone());
        Ok(())
    }
    fn all_email_log_entries(&self) -> RepoResult<Vec<EmailLogEntry>> {
        Ok(self.email_log.borrow().clone())
    }
}

impl ContactMessageRepo for MockDb {
    fn create_contact_message(&self, message: &ContactMessage) -> RepoResult<()> {
        create(&mut self.contact_messages.borrow_mut(), message)
    }
    fn update_contact_message(&self, message: &ContactMessage) -> RepoResult<()> {
        update(&mut self.contact_messages.borrow_mut(), message)
    }
    fn all_contact_messages(&self) -> RepoResult<Vec<ContactMessage>> {
        Ok(self.contact_messages.borrow().clone())
    }
    fn get_contact_message(&self, id: &Id) -> RepoResult<ContactMessage> {
        get(&self.contact_messages.borrow(), id)
    }
}

/// Captures outgoing mail instead of sending it. Addresses listed in
/// `failing` simulate an unreachable mailbox.
#[derive(Default)]
pub struct MockEmailGateway {
    pub sent: RefCell<Vec<(EmailAddress, EmailContent)>>,
    pub failing: RefCell<HashSet<String>>,
}

impl EmailGateway for MockEmailGateway {
    fn compose_and_send(
        &self,
        recipients: &[EmailAddress],
        email: &EmailContent,
    ) -> std::result::Result<(), EmailSendError> {
        for recipient in recipients {
            if self.failing.borrow().contains(recipient.as_str()) {
                return Err(anyhow::anyhow!("mailbox unavailable: {recipient}").into());
            }
            self.sent
                .borrow_mut()
                .push((recipient.clone(), email.clone()));
        }
        Ok(())
    }
}

/// Minimal formatter that makes the chosen language visible in the
/// subject line.
pub struct TestFormatter;

impl PassengerEmailFormatter for TestFormatter {
    fn format_email(&self, notification: &PassengerNotification) -> EmailContent {
        EmailContent {
            subject: format!(
                "[{}] {}",
                notification.passenger.language, notification.flight.flight_number
            ),
            body: format!("/track/{}", notification.passenger.tracking_token),
        }
    }
}

pub fn new_user(role: Role, airport_id: Option<Id>) -> User {
    User {
        id: Id::new(),
        email: format!("user-{}@rassid.example", Id::new())
            .parse()
            .unwrap(),
        // never verified, so an unhashed marker is good enough
        password: Password::from("unhashed".to_owned()),
        role,
        airport_id,
        created_at: Timestamp::now(),
    }
}

pub fn stored_user(
    db: &MockDb,
    role: Role,
    airport_id: Option<Id>,
    email: &str,
    password: &str,
) -> User {
    let user = User {
        id: Id::new(),
        email: email.parse().unwrap(),
        password: password.parse().unwrap(),
        role,
        airport_id,
        created_at: Timestamp::now(),
    };
    db.create_user(&user).unwrap();
    user
}

pub fn stored_airport(db: &MockDb, code: &str) -> Airport {
    let code: IataCode = code.parse().unwrap();
    let airport = Airport {
        id: Id::new(),
        name: code.as_str().to_owned(),
        code,
        city: "Riyadh".into(),
        country: "Saudi Arabia".into(),
        created_at: Timestamp::now(),
    };
    db.create_airport(&airport).unwrap();
    airport
}

pub fn new_flight(number: &str, origin: &Id, destination: &Id) -> Flight {
    let now = Timestamp::now();
    Flight {
        id: Id::new(),
        flight_number: number.to_owned(),
        airline_code: number.chars().take(2).collect(),
        status: FlightStatus::Scheduled,
        scheduled_departure: now + Duration::days(3),
        scheduled_arrival: now + Duration::days(3) + Duration::hours(2),
        origin_airport_id: origin.clone(),
        destination_airport_id: destination.clone(),
        protected: false,
        updated_at: now,
    }
}

pub fn stored_flight(db: &MockDb, number: &str, airport_id: &Id) -> Flight {
    let flight = new_flight(number, airport_id, &Id::new());
    db.create_flight(&flight).unwrap();
    flight
}

pub fn new_request_form(code: &str) -> NewSubscriptionRequest {
    NewSubscriptionRequest {
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

pub fn stored_request(db: &MockDb, code: &str, status: RequestStatus) -> SubscriptionRequest {
    let code: IataCode = code.parse().unwrap();
    let request = SubscriptionRequest {
        id: Id::new(),
        airport: PendingAirport {
            name: format!("{code} International Airport"),
            code: code.clone(),
            city: "Riyadh".into(),
            country: "Saudi Arabia".into(),
        },
        contact_email: format!("contact@{}.example", code.as_str().to_lowercase())
            .parse()
            .unwrap(),
        contact_phone: "0512345678".into(),
        plan: SubscriptionPlan::OneYear,
        license_file: "license.pdf".into(),
        commercial_record_file: None,
        status,
        rejection_reason: None,
        created_at: Timestamp::now(),
    };
    db.create_subscription_request(&request).unwrap();
    request
}

pub fn active_subscription(airport_id: &Id) -> AirportSubscription {
    let now = Timestamp::now();
    AirportSubscription {
        id: Id::new(),
        airport_id: airport_id.clone(),
        plan: SubscriptionPlan::OneYear,
        start_at: now - Duration::days(30),
        expire_at: now + Duration::days(30),
        max_employees: DEFAULT_MAX_EMPLOYEES,
        status: SubscriptionStatus::Active,
    }
}

pub fn expired_subscription(airport_id: &Id) -> AirportSubscription {
    let now = Timestamp::now();
    AirportSubscription {
        id: Id::new(),
        airport_id: airport_id.clone(),
        plan: SubscriptionPlan::OneYear,
        start_at: now - Duration::days(400),
        expire_at: now - Duration::days(35),
        max_employees: DEFAULT_MAX_EMPLOYEES,
        status: SubscriptionStatus::Active,
    }
}

pub fn stored_ticket(db: &MockDb, airport_id: &Id, creator_id: &Id) -> Ticket {
    let now = Timestamp::now();
    let ticket = Ticket {
        id: Id::new(),
        airport_id: airport_id.clone(),
        created_by: creator_id.clone(),
        assigned_to: None,
        title: "Departure board frozen".into(),
        description: "The T1 departure board has not refreshed since 06:00.".into(),
        category: TicketCategory::System,
        priority: TicketPriority::Medium,
        status: TicketStatus::Open,
        created_at: now,
        updated_at: now,
    };
    db.create_ticket(&ticket).unwrap();
    ticket
}

/// Creates the passenger together with a booking on the flight.
pub fn stored_passenger(
    db: &MockDb,
    email: &str,
    language: Language,
    flight_id: &Id,
) -> Passenger {
    let full_name = email.split('@').next().unwrap_or("passenger").to_owned();
    let passenger = Passenger {
        id: Id::new(),
        full_name,
        email: email.parse().unwrap(),
        phone: None,
        language,
        tracking_token: TrackingToken::new(),
    };
    db.create_passenger(&passenger).unwrap();
    let booking = Booking {
        id: Id::new(),
        passenger_id: passenger.id.clone(),
        flight_id: flight_id.clone(),
        seat: None,
        booking_ref: format!("REF{}", db.bookings.borrow().len() + 1),
        created_at: Timestamp::now(),
    };
    db.create_booking(&booking).unwrap();
    passenger
}

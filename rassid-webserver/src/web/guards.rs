use core::ops::Deref;

use rocket::{
    self,
    http::Status,
    outcome::try_outcome,
    request::{FromRequest, Outcome, Request},
};

use rassid_application::error::AppError;
use rassid_core::{
    entities::*,
    gateways::{
        email::{EmailGateway, EmailSendError},
        flight_data::{FetchedFlights, FlightDataError, FlightDataGateway},
        indoor_map::IndoorMapGateway,
        notify::NotificationGateway,
        payment::PaymentGateway,
    },
    repositories::UserRepo,
    usecases,
    usecases::{Error as ParameterError, PassengerEmailFormatter, PassengerNotification},
};

pub const COOKIE_EMAIL_KEY: &str = "rassid-user-email";

type Result<T> = std::result::Result<T, AppError>;

/// The session information attached to a request, if any.
#[derive(Debug)]
pub struct Auth {
    account_email: Option<String>,
}

impl Auth {
    pub fn account_email(&self) -> Result<&str> {
        self.account_email
            .as_deref()
            .ok_or_else(|| ParameterError::Unauthorized.into())
    }

    pub fn user_with_min_role<R>(&self, repo: &R, min_required_role: Role) -> Result<User>
    where
        R: UserRepo,
    {
        let email = self.account_email()?.parse::<EmailAddress>().map_err(|_| {
            AppError::from(ParameterError::Unauthorized)
        })?;
        Ok(usecases::authorize_user_by_email(
            repo,
            &email,
            min_required_role,
        )?)
    }

    fn account_email_from_cookie(request: &Request) -> Option<String> {
        request
            .cookies()
            .get_private(COOKIE_EMAIL_KEY)
            .map(|cookie| cookie.value().to_owned())
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Auth {
    type Error = ();
    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let account_email = Self::account_email_from_cookie(request);
        Outcome::Success(Self { account_email })
    }
}

/// Refuses the request outright when no session cookie is present.
#[derive(Debug)]
pub struct Account(String);

impl Account {
    pub fn email(&self) -> &str {
        &self.0
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Account {
    type Error = ();
    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let auth = try_outcome!(Auth::from_request(request).await);
        match auth.account_email() {
            Ok(email) => Outcome::Success(Account(email.to_owned())),
            _ => Outcome::Error((Status::Unauthorized, ())),
        }
    }
}

pub struct Version(pub &'static str);

pub struct Notify(pub Box<dyn NotificationGateway + Send + Sync>);

impl Deref for Notify {
    type Target = dyn NotificationGateway;
    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

pub struct Payment(pub Box<dyn PaymentGateway + Send + Sync>);

impl Deref for Payment {
    type Target = dyn PaymentGateway;
    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

pub struct FlightData(pub Box<dyn FlightDataGateway + Send + Sync>);

impl FlightDataGateway for FlightData {
    fn provider_name(&self) -> &str {
        self.0.provider_name()
    }

    fn fetch_flights(
        &self,
        airport: Option<&IataCode>,
    ) -> std::result::Result<FetchedFlights, FlightDataError> {
        self.0.fetch_flights(airport)
    }
}

pub struct IndoorMap(pub Box<dyn IndoorMapGateway + Send + Sync>);

impl Deref for IndoorMap {
    type Target = dyn IndoorMapGateway;
    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

// The passenger fan-out flows are generic over their gateways, so
// the boxed trait objects are wrapped in types that implement the
// traits themselves.

pub struct EmailGw(pub Box<dyn EmailGateway + Send + Sync>);

impl EmailGateway for EmailGw {
    fn compose_and_send(
        &self,
        recipients: &[EmailAddress],
        email: &EmailContent,
    ) -> std::result::Result<(), EmailSendError> {
        self.0.compose_and_send(recipients, email)
    }
}

pub struct PassengerMail(pub Box<dyn PassengerEmailFormatter + Send + Sync>);

impl PassengerEmailFormatter for PassengerMail {
    fn format_email(&self, notification: &PassengerNotification) -> EmailContent {
        self.0.format_email(notification)
    }
}

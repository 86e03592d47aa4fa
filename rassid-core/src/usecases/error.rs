use crate::repositories;
use rassid_entities::{
    airport::IataCodeParseError,
    email::EmailAddressParseError,
    password,
    request::InvalidRequestTransition,
    ticket::InvalidTicketTransition,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The title must not be empty")]
    Title,
    #[error("Invalid email address")]
    EmailAddress,
    #[error("Invalid phone nr")]
    Phone,
    #[error("Invalid airport code")]
    AirportCode,
    #[error("Invalid password")]
    Password,
    #[error("Invalid credentials")]
    Credentials,
    #[error("Empty comment")]
    EmptyComment,
    #[error("The booking reference must not be empty")]
    BookingRef,
    #[error("The boarding window is invalid")]
    BoardingWindow,
    #[error("The user already exists")]
    UserExists,
    #[error("The user does not exist")]
    UserDoesNotExist,
    #[error("This is not allowed without auth")]
    Unauthorized,
    #[error("This is not allowed")]
    Forbidden,
    #[error("The subscription has expired")]
    SubscriptionExpired,
    #[error("The employee limit of the subscription is reached")]
    EmployeeLimit,
    #[error("Own accounts cannot be removed or demoted")]
    OwnAccount,
    #[error("The request is not awaiting payment")]
    NotAwaitingPayment,
    #[error("The payment has not been completed")]
    PaymentIncomplete,
    #[error("The ticket is closed")]
    TicketClosed,
    #[error(transparent)]
    RequestTransition(#[from] InvalidRequestTransition),
    #[error(transparent)]
    TicketTransition(#[from] InvalidTicketTransition),
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

impl From<password::ParseError> for Error {
    fn from(_: password::ParseError) -> Self {
        Self::Password
    }
}

impl From<EmailAddressParseError> for Error {
    fn from(_: EmailAddressParseError) -> Self {
        Self::EmailAddress
    }
}

impl From<IataCodeParseError> for Error {
    fn from(_: IataCodeParseError) -> Self {
        Self::AirportCode
    }
}

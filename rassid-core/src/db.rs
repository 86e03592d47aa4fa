use crate::repositories::*;

/// Everything a request handler may need behind a single object.
pub trait Db:
    UserRepo
    + AirportRepo
    + SubscriptionRequestRepo
    + SubscriptionRepo
    + FlightRepo
    + FlightImportLogRepo
    + GateRepo
    + PassengerRepo
    + BookingRepo
    + TicketRepo
    + PaymentRepo
    + NotificationLogRepo
    + ContactMessageRepo
{
}

impl<T> Db for T where
    T: UserRepo
        + AirportRepo
        + SubscriptionRequestRepo
        + SubscriptionRepo
        + FlightRepo
        + FlightImportLogRepo
        + GateRepo
        + PassengerRepo
        + BookingRepo
        + TicketRepo
        + PaymentRepo
        + NotificationLogRepo
        + ContactMessageRepo
{
}

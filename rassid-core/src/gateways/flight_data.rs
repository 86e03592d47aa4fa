use crate::entities::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlightDataError {
    #[error("The flight data provider is unreachable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// One flight record as normalized from a provider response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedFlight {
    pub flight_number: String,
    pub airline_code: String,
    pub status: FlightStatus,
    pub scheduled_departure: Timestamp,
    pub scheduled_arrival: Timestamp,
    pub origin: IataCode,
    pub destination: IataCode,
}

#[derive(Debug, Clone)]
pub struct FetchedFlights {
    pub records: Vec<FetchedFlight>,
    /// Response body as received, kept for the import audit log.
    pub raw_payload: String,
}

pub trait FlightDataGateway {
    fn provider_name(&self) -> &str;

    /// Fetches the current schedule, optionally restricted to
    /// flights touching one airport.
    fn fetch_flights(&self, airport: Option<&IataCode>) -> Result<FetchedFlights, FlightDataError>;
}

use anyhow::anyhow;
use rassid_entities::{airport::IataCode, flight::FlightStatus, time::Timestamp};
use serde::Deserialize;
use time::{
    format_description::{well_known::Rfc3339, FormatItem},
    macros::format_description,
    OffsetDateTime, PrimitiveDateTime,
};

pub use rassid_core::gateways::flight_data::{
    FetchedFlight, FetchedFlights, FlightDataError, FlightDataGateway,
};

/// Client for the aviationstack flight schedule API.
///
/// Provider records are best-effort: any record without a flight
/// number, route or schedule is skipped, never invented.
#[derive(Debug, Clone)]
pub struct AviationstackGateway {
    pub api_url: String,
    pub api_key: String,
    pub page_limit: u32,
}

#[derive(Debug, Deserialize)]
struct FlightsResponse {
    #[serde(default)]
    data: Vec<FlightRecord>,
}

#[derive(Debug, Deserialize)]
struct FlightRecord {
    flight_status: Option<String>,
    departure: Option<Endpoint>,
    arrival: Option<Endpoint>,
    airline: Option<Carrier>,
    flight: Option<FlightIdent>,
}

#[derive(Debug, Deserialize)]
struct Endpoint {
    iata: Option<String>,
    scheduled: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Carrier {
    iata: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FlightIdent {
    iata: Option<String>,
}

const NAIVE_FORMAT: &[FormatItem] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

fn parse_provider_time(scheduled: &str) -> Option<Timestamp> {
    if let Ok(at) = OffsetDateTime::parse(scheduled, &Rfc3339) {
        return Some(at.into());
    }
    // some provider plans deliver naive times, read them as UTC
    PrimitiveDateTime::parse(scheduled, NAIVE_FORMAT)
        .ok()
        .map(|at| at.assume_utc().into())
}

fn normalize_record(record: FlightRecord) -> Option<FetchedFlight> {
    let FlightRecord {
        flight_status,
        departure,
        arrival,
        airline,
        flight,
    } = record;
    let flight_number = flight.and_then(|f| f.iata)?;
    let departure = departure?;
    let arrival = arrival?;
    let origin = departure.iata.as_deref()?.parse().ok()?;
    let destination = arrival.iata.as_deref()?.parse().ok()?;
    let scheduled_departure = parse_provider_time(departure.scheduled.as_deref()?)?;
    let scheduled_arrival = parse_provider_time(arrival.scheduled.as_deref()?)?;
    let airline_code = airline.and_then(|a| a.iata).unwrap_or_default();
    let status = FlightStatus::from(flight_status.as_deref().unwrap_or("scheduled"));
    Some(FetchedFlight {
        flight_number,
        airline_code,
        status,
        scheduled_departure,
        scheduled_arrival,
        origin,
        destination,
    })
}

impl FlightDataGateway for AviationstackGateway {
    fn provider_name(&self) -> &str {
        "aviationstack"
    }

    fn fetch_flights(&self, airport: Option<&IataCode>) -> Result<FetchedFlights, FlightDataError> {
        let mut params = vec![
            ("access_key", self.api_key.clone()),
            ("limit", self.page_limit.to_string()),
        ];
        if let Some(airport) = airport {
            params.push(("dep_iata", airport.as_str().to_owned()));
        }
        let response = reqwest::blocking::Client::new()
            .get(&self.api_url)
            .query(&params)
            .send()
            .map_err(|err| FlightDataError::Unavailable(err.to_string()))?;
        if !response.status().is_success() {
            return Err(FlightDataError::Unavailable(format!(
                "HTTP {}",
                response.status()
            )));
        }
        let raw_payload = response
            .text()
            .map_err(|err| FlightDataError::Unavailable(err.to_string()))?;
        let parsed: FlightsResponse = serde_json::from_str(&raw_payload)
            .map_err(|err| anyhow!("Unparsable provider payload: {err}"))?;
        let total = parsed.data.len();
        let records: Vec<_> = parsed
            .data
            .into_iter()
            .filter_map(normalize_record)
            .collect();
        if records.len() < total {
            log::debug!(
                "Skipped {} incomplete provider records",
                total - records.len()
            );
        }
        Ok(FetchedFlights {
            records,
            raw_payload,
        })
    }
}

#[macro_use]
extern crate log;

use rassid_core::{
    gateways::{
        email::EmailGateway, flight_data::FlightDataGateway, indoor_map::IndoorMapGateway,
        notify::NotificationGateway, payment::PaymentGateway,
    },
    usecases::PassengerEmailFormatter,
};
use rassid_db_sqlite::Connections;

mod adapters;
mod web;

pub use web::Cfg;

pub struct Gateways {
    pub notify: Box<dyn NotificationGateway + Send + Sync>,
    pub email: Box<dyn EmailGateway + Send + Sync>,
    pub passenger_mail: Box<dyn PassengerEmailFormatter + Send + Sync>,
    pub payment: Box<dyn PaymentGateway + Send + Sync>,
    pub flight_data: Box<dyn FlightDataGateway + Send + Sync>,
    pub indoor_map: Box<dyn IndoorMapGateway + Send + Sync>,
}

pub async fn run(connections: Connections, cfg: Cfg, gateways: Gateways, version: &'static str) {
    let Gateways {
        notify,
        email,
        passenger_mail,
        payment,
        flight_data,
        indoor_map,
    } = gateways;
    let gateways = web::Gateways {
        notify,
        email,
        passenger_mail,
        payment,
        flight_data,
        indoor_map,
    };
    web::run(connections.into(), cfg, gateways, version).await;
}

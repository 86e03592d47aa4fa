use rassid_core::{
    gateways::{
        email::EmailGateway, flight_data::FlightDataGateway, indoor_map::IndoorMapGateway,
        notify::NotificationGateway, payment::PaymentGateway,
    },
    usecases::PassengerEmailFormatter,
};
use rocket::{config::Config as RocketCfg, Rocket, Route};

pub mod api;
#[cfg(feature = "frontend")]
mod frontend;
mod guards;
mod sqlite;

#[cfg(test)]
pub mod tests;

/// Deployment specific knobs of the web layer.
#[derive(Debug, Clone)]
pub struct Cfg {
    /// Base URL of the hosted checkout page that is mailed to
    /// applicants, without the trailing request id.
    pub checkout_base_url: String,
}

pub(crate) struct InstanceOptions {
    mounts: Vec<(&'static str, Vec<Route>)>,
    rocket_cfg: Option<RocketCfg>,
    cfg: Cfg,
    version: &'static str,
}

pub(crate) struct Gateways {
    pub notify: Box<dyn NotificationGateway + Send + Sync>,
    pub email: Box<dyn EmailGateway + Send + Sync>,
    pub passenger_mail: Box<dyn PassengerEmailFormatter + Send + Sync>,
    pub payment: Box<dyn PaymentGateway + Send + Sync>,
    pub flight_data: Box<dyn FlightDataGateway + Send + Sync>,
    pub indoor_map: Box<dyn IndoorMapGateway + Send + Sync>,
}

pub(crate) fn rocket_instance(
    options: InstanceOptions,
    db: sqlite::Connections,
    gateways: Gateways,
) -> Rocket<rocket::Build> {
    let InstanceOptions {
        mounts,
        rocket_cfg,
        cfg,
        version,
    } = options;
    let Gateways {
        notify,
        email,
        passenger_mail,
        payment,
        flight_data,
        indoor_map,
    } = gateways;

    info!("Initialization finished");

    let r = match rocket_cfg {
        Some(cfg) => rocket::custom(cfg),
        None => rocket::build(),
    };

    let mut instance = r
        .manage(db)
        .manage(guards::Notify(notify))
        .manage(guards::EmailGw(email))
        .manage(guards::PassengerMail(passenger_mail))
        .manage(guards::Payment(payment))
        .manage(guards::FlightData(flight_data))
        .manage(guards::IndoorMap(indoor_map))
        .manage(cfg)
        .manage(guards::Version(version));

    for (m, r) in mounts {
        instance = instance.mount(m, r);
    }
    instance
}

#[cfg(not(feature = "frontend"))]
fn mounts() -> Vec<(&'static str, Vec<Route>)> {
    vec![("/api", api::routes())]
}

#[cfg(feature = "frontend")]
fn mounts() -> Vec<(&'static str, Vec<Route>)> {
    vec![("/api", api::routes()), ("/", frontend::routes())]
}

pub async fn run(db: sqlite::Connections, cfg: Cfg, gateways: Gateways, version: &'static str) {
    let options = InstanceOptions {
        mounts: mounts(),
        rocket_cfg: None,
        cfg,
        version,
    };
    let instance = rocket_instance(options, db, gateways);
    if let Err(err) = instance.launch().await {
        log::error!("Unable to run web server: {err}");
    }
}

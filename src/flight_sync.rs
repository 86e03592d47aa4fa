use std::sync::Arc;

use rassid_application::prelude::import_flights;
use rassid_db_sqlite::Connections;
use rassid_gateways::user_communication::PassengerFormatter;

use crate::{config, gateways};

/// Periodically pulls the provider schedule for all managed airports.
pub async fn run(
    connections: Connections,
    cfg: config::FlightData,
    email_cfg: Option<config::EmailGateway>,
    tracking_base_url: String,
) {
    let Some(gateway_cfg) = cfg.gateway else {
        info!("No flight data provider configured: periodic flight sync is disabled");
        return;
    };
    let flight_data = Arc::new(gateways::flight_data_gateway(gateway_cfg));
    let email_gw = match gateways::email_gateway(email_cfg) {
        Ok(gw) => Arc::new(gw),
        Err(err) => {
            error!("Unable to set up the e-mail gateway for the flight sync: {err}");
            return;
        }
    };
    let formatter = Arc::new(PassengerFormatter::new(tracking_base_url));

    let mut interval = tokio::time::interval(cfg.sync_interval);
    loop {
        interval.tick().await;

        let connections = connections.clone();
        let flight_data = Arc::clone(&flight_data);
        let email_gw = Arc::clone(&email_gw);
        let formatter = Arc::clone(&formatter);
        let result = tokio::task::spawn_blocking(move || {
            import_flights(&connections, &*flight_data, &*email_gw, &*formatter, None)
        })
        .await;

        match result {
            Ok(Ok(log)) => {
                debug!(
                    "Flight sync finished: {} flights from {}",
                    log.imported_count, log.provider
                );
            }
            Ok(Err(err)) => warn!("Flight sync failed: {err}"),
            Err(err) => error!("Flight sync task aborted: {err}"),
        }
    }
}

use std::sync::Arc;

use rassid_application::prelude::send_departure_reminders;
use rassid_db_sqlite::Connections;
use rassid_gateways::user_communication::PassengerFormatter;

use crate::{config, gateways};

/// Periodically mails reminders for flights departing within the
/// configured lead window.
pub async fn run(
    connections: Connections,
    cfg: config::Reminders,
    email_cfg: Option<config::EmailGateway>,
    tracking_base_url: String,
) {
    let email_gw = match gateways::email_gateway(email_cfg) {
        Ok(gw) => Arc::new(gw),
        Err(err) => {
            error!("Unable to set up the e-mail gateway for departure reminders: {err}");
            return;
        }
    };
    let formatter = Arc::new(PassengerFormatter::new(tracking_base_url));
    let window = match time::Duration::try_from(cfg.lead_window) {
        Ok(window) => window,
        Err(err) => {
            error!("Invalid reminder lead window: {err}");
            return;
        }
    };

    let mut interval = tokio::time::interval(cfg.task_interval_time);
    loop {
        interval.tick().await;

        let connections = connections.clone();
        let email_gw = Arc::clone(&email_gw);
        let formatter = Arc::clone(&formatter);
        let result = tokio::task::spawn_blocking(move || {
            send_departure_reminders(&connections, &*email_gw, &*formatter, window)
        })
        .await;

        match result {
            Ok(Ok(sent)) if sent > 0 => info!("Sent {sent} departure reminders"),
            Ok(Ok(_)) => {}
            Ok(Err(err)) => warn!("Departure reminders could not be sent: {err}"),
            Err(err) => error!("Departure reminder task aborted: {err}"),
        }
    }
}

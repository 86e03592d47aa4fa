use std::{env, path::PathBuf};

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

use rassid_application::prelude as flows;
use rassid_db_sqlite::{run_embedded_database_migrations, Connections};
use rassid_entities::airport::IataCode;
use rassid_webserver::{Cfg, Gateways};

use crate::{config, departure_reminder, flight_sync, gateways};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "rassid", version, about = "Airport operations portal")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run database migrations, then serve the portal.
    Run,
    /// Create the first platform admin account.
    CreateSuperuser {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Fetch the current flight schedule once and exit.
    SyncFlights {
        /// Restrict the run to flights touching one airport.
        #[arg(long, value_name = "IATA_CODE")]
        airport: Option<String>,
    },
}

pub async fn run() -> Result<()> {
    let args = Args::parse();
    let config = config::Config::try_load_from_file_or_default(args.config.as_deref())?;

    let connections = Connections::init(
        &config.db.connection_sqlite,
        config.db.connection_pool_size,
    )?;

    match args.command {
        Command::Run => run_server(config, connections).await,
        Command::CreateSuperuser { email, password } => {
            let user = flows::create_platform_admin(&connections, &email, &password)?;
            println!("Created platform admin {}", user.email);
            Ok(())
        }
        Command::SyncFlights { airport } => sync_flights(config, connections, airport),
    }
}

async fn run_server(config: config::Config, connections: Connections) -> Result<()> {
    run_embedded_database_migrations(connections.exclusive()?);

    // Rocket picks up its listener settings from the environment.
    env::set_var("ROCKET_ADDRESS", &config.webserver.address);
    env::set_var("ROCKET_PORT", config.webserver.port.to_string());
    if let Some(secret_key) = &config.webserver.secret_key {
        env::set_var("ROCKET_SECRET_KEY", secret_key);
    }

    let web_gateways = Gateways {
        notify: gateways::notification_gateway(config.email.gateway.clone(), &config.subscription)?,
        email: gateways::email_gateway(config.email.gateway.clone())?.into_inner(),
        passenger_mail: Box::new(gateways::passenger_formatter(&config.webserver)),
        payment: gateways::payment_gateway(
            config.payment.gateway.clone(),
            config.webserver.payment_confirm_base_url(),
        ),
        flight_data: match config.flight_data.gateway.clone() {
            Some(cfg) => Box::new(gateways::flight_data_gateway(cfg)),
            None => Box::new(gateways::NoFlightData),
        },
        indoor_map: gateways::indoor_map_gateway(&config.map),
    };

    tokio::spawn(flight_sync::run(
        connections.clone(),
        config.flight_data,
        config.email.gateway.clone(),
        config.webserver.tracking_base_url(),
    ));
    tokio::spawn(departure_reminder::run(
        connections.clone(),
        config.reminders,
        config.email.gateway.clone(),
        config.webserver.tracking_base_url(),
    ));

    let web_cfg = Cfg {
        checkout_base_url: config.webserver.checkout_base_url(),
    };
    rassid_webserver::run(connections, web_cfg, web_gateways, VERSION).await;
    Ok(())
}

fn sync_flights(
    config: config::Config,
    connections: Connections,
    airport: Option<String>,
) -> Result<()> {
    let Some(gateway_cfg) = config.flight_data.gateway else {
        return Err(anyhow!("No flight data provider is configured"));
    };
    let airport = airport
        .map(|code| code.parse::<IataCode>())
        .transpose()
        .map_err(|err| anyhow!("Invalid airport code: {err}"))?;

    let flight_data = gateways::flight_data_gateway(gateway_cfg);
    let email_gw = gateways::email_gateway(config.email.gateway)?;
    let formatter = gateways::passenger_formatter(&config.webserver);

    let log = flows::import_flights(
        &connections,
        &flight_data,
        &email_gw,
        &formatter,
        airport.as_ref(),
    )?;
    println!(
        "Imported {} flights from {}",
        log.imported_count, log.provider
    );
    Ok(())
}

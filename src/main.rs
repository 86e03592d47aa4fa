#[macro_use]
extern crate log;

mod cli;
mod config;
mod departure_reminder;
mod flight_sync;
mod gateways;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    if let Err(err) = cli::run().await {
        error!("{err:#}");
        std::process::exit(1);
    }
}

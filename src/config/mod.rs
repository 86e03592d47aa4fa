use anyhow::{anyhow, Result};
use rassid_entities::{airport::IataCode, email::EmailAddress};
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "rassid.toml";

const ENV_NAME_DB_URL: &str = "DATABASE_URL";
const ENV_NAME_MAILGUN_API_KEY: &str = "MAILGUN_API_KEY";
const ENV_NAME_PAYMENT_API_KEY: &str = "PAYMENT_API_KEY";
const ENV_NAME_FLIGHT_DATA_API_KEY: &str = "FLIGHT_DATA_API_KEY";

const DEFAULT_MAILGUN_API_BASE_URL: &str = "https://api.eu.mailgun.net/v3";
const DEFAULT_AVIATIONSTACK_API_URL: &str = "https://api.aviationstack.com/v1/flights";
const DEFAULT_AVIATIONSTACK_PAGE_LIMIT: u32 = 100;
const DEFAULT_PAYMENT_CURRENCY: &str = "USD";

pub struct Config {
    pub db: Db,
    pub webserver: WebServer,
    pub email: Email,
    pub payment: Payment,
    pub flight_data: FlightData,
    pub reminders: Reminders,
    pub map: Map,
    pub subscription: Subscription,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    // Secrets prefer the environment over the config file.
    fn apply_env_overrides(&mut self) {
        if let Ok(db_url) = env::var(ENV_NAME_DB_URL) {
            self.db.connection_sqlite = db_url;
        }
        if let Ok(api_key) = env::var(ENV_NAME_MAILGUN_API_KEY) {
            if let Some(EmailGateway::Mailgun {
                api_key: configured,
                ..
            }) = &mut self.email.gateway
            {
                *configured = api_key;
            }
        }
        if let Ok(api_key) = env::var(ENV_NAME_PAYMENT_API_KEY) {
            if let PaymentGateway::Http {
                api_key: configured,
                ..
            } = &mut self.payment.gateway
            {
                *configured = api_key;
            }
        }
        if let Ok(api_key) = env::var(ENV_NAME_FLIGHT_DATA_API_KEY) {
            if let Some(FlightDataGateway::Aviationstack {
                api_key: configured,
                ..
            }) = &mut self.flight_data.gateway
            {
                *configured = api_key;
            }
        }
    }
}

pub struct Db {
    /// SQLite connection
    pub connection_sqlite: String,
    pub connection_pool_size: u32,
}

pub struct WebServer {
    pub address: String,
    pub port: u16,
    pub secret_key: Option<String>,
    /// Externally visible base URL without a trailing slash.
    pub public_url: String,
}

impl WebServer {
    pub fn checkout_base_url(&self) -> String {
        format!("{}/subscribe/checkout", self.public_url)
    }

    pub fn tracking_base_url(&self) -> String {
        format!("{}/track", self.public_url)
    }

    pub fn payment_confirm_base_url(&self) -> String {
        format!("{}/subscribe/confirm", self.public_url)
    }
}

pub struct Email {
    pub gateway: Option<EmailGateway>,
}

#[derive(Clone)]
pub enum EmailGateway {
    Mailgun {
        api_key: String,
        api_base_url: String,
        domain: String,
        sender_address: EmailAddress,
    },
    Sendmail {
        sender_address: EmailAddress,
    },
    /// For local testing purposes
    EmailToJsonFile {
        /// File system directory for writing emails into JSON files.
        dir: PathBuf,
    },
}

pub struct Payment {
    pub gateway: PaymentGateway,
}

#[derive(Clone)]
pub enum PaymentGateway {
    Http {
        api_url: String,
        api_key: String,
        currency: String,
    },
    /// Checkout without a provider; every session verifies as completed.
    Manual,
}

pub struct FlightData {
    pub gateway: Option<FlightDataGateway>,
    pub sync_interval: Duration,
}

#[derive(Clone)]
pub enum FlightDataGateway {
    Aviationstack {
        api_url: String,
        api_key: String,
        page_limit: u32,
    },
}

#[derive(Clone)]
pub struct Reminders {
    pub task_interval_time: Duration,
    /// How far ahead of the scheduled departure a reminder is due.
    pub lead_window: Duration,
}

pub struct Map {
    pub viewer_url: Option<String>,
    pub entries: Vec<TerminalEntry>,
}

pub struct TerminalEntry {
    pub airport: IataCode,
    pub terminal: String,
    pub building: String,
    pub floor: String,
}

pub struct Subscription {
    /// Standing recipient of platform notifications, independent of
    /// the platform admin accounts in the database.
    pub admin_notification_address: Option<EmailAddress>,
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            db,
            webserver,
            email,
            payment,
            flight_data,
            reminders,
            map,
            subscription,
            gateway,
        } = from;

        let raw::Db {
            connection_sqlite,
            connection_pool_size,
        } = db.unwrap_or_default();

        let db = Db {
            connection_sqlite,
            connection_pool_size,
        };

        let raw::WebServer {
            address,
            port,
            secret_key,
            public_url,
        } = webserver.unwrap_or_default();

        let webserver = WebServer {
            address,
            port,
            secret_key,
            public_url: public_url.trim_end_matches('/').to_string(),
        };

        let gateway = gateway.unwrap_or_default();

        let email_gateway = match email.unwrap_or_default().gateway {
            Some(gw_name) => {
                let gw = match gw_name {
                    raw::EmailGateway::Mailgun => {
                        let raw::MailGun {
                            api_key,
                            domain,
                            sender_address,
                            api_base_url,
                        } = gateway
                            .mailgun
                            .clone()
                            .ok_or_else(|| anyhow!("Missing 'mailgun' gateway configuration"))?;
                        let sender_address = sender_address.parse()?;
                        let api_base_url =
                            api_base_url.unwrap_or_else(|| DEFAULT_MAILGUN_API_BASE_URL.to_string());
                        log::info!("Use Mailgun gateway");
                        EmailGateway::Mailgun {
                            api_key,
                            api_base_url,
                            domain,
                            sender_address,
                        }
                    }
                    raw::EmailGateway::Sendmail => {
                        let raw::Sendmail { sender_address } = gateway
                            .sendmail
                            .clone()
                            .ok_or_else(|| anyhow!("Missing 'sendmail' gateway configuration"))?;
                        let sender_address = sender_address.parse()?;
                        EmailGateway::Sendmail { sender_address }
                    }
                    raw::EmailGateway::EmailToJsonFile => {
                        let raw::EmailToJsonFile { dir } =
                            gateway.email_to_json_file.clone().ok_or_else(|| {
                                anyhow!("Missing 'email-to-json-file' gateway configuration")
                            })?;
                        log::info!("Use JSON file email gateway ({})", dir.display());
                        EmailGateway::EmailToJsonFile { dir }
                    }
                };
                Some(gw)
            }
            None => None,
        };

        let email = Email {
            gateway: email_gateway,
        };

        let payment_gateway = match payment.unwrap_or_default().gateway {
            Some(raw::PaymentGateway::Http) => {
                let raw::HttpPayment {
                    api_url,
                    api_key,
                    currency,
                } = gateway
                    .http_payment
                    .clone()
                    .ok_or_else(|| anyhow!("Missing 'http' payment gateway configuration"))?;
                log::info!("Use hosted checkout payment gateway");
                PaymentGateway::Http {
                    api_url,
                    api_key,
                    currency: currency.unwrap_or_else(|| DEFAULT_PAYMENT_CURRENCY.to_string()),
                }
            }
            Some(raw::PaymentGateway::Manual) | None => PaymentGateway::Manual,
        };

        let payment = Payment {
            gateway: payment_gateway,
        };

        let raw::FlightData {
            gateway: flight_data_gateway,
            sync_interval,
        } = flight_data.unwrap_or_default();

        let flight_data_gateway = match flight_data_gateway {
            Some(raw::FlightDataGateway::Aviationstack) => {
                let raw::Aviationstack {
                    api_url,
                    api_key,
                    page_limit,
                } = gateway
                    .aviationstack
                    .clone()
                    .ok_or_else(|| anyhow!("Missing 'aviationstack' gateway configuration"))?;
                Some(FlightDataGateway::Aviationstack {
                    api_url: api_url.unwrap_or_else(|| DEFAULT_AVIATIONSTACK_API_URL.to_string()),
                    api_key,
                    page_limit: page_limit.unwrap_or(DEFAULT_AVIATIONSTACK_PAGE_LIMIT),
                })
            }
            None => None,
        };

        let flight_data = FlightData {
            gateway: flight_data_gateway,
            sync_interval: sync_interval.ok_or_else(|| anyhow!("Flight data sync interval"))?,
        };

        let raw::Reminders {
            task_interval_time,
            lead_window,
        } = reminders.unwrap_or_default();

        let reminders = Reminders {
            task_interval_time: task_interval_time
                .ok_or_else(|| anyhow!("Reminder task interval"))?,
            lead_window: lead_window.ok_or_else(|| anyhow!("Reminder lead window"))?,
        };

        let raw::Map { viewer_url, entries } = map.unwrap_or_default();

        let entries = entries
            .into_iter()
            .map(|entry| {
                let raw::MapEntry {
                    airport,
                    terminal,
                    building,
                    floor,
                } = entry;
                Ok(TerminalEntry {
                    airport: airport.parse()?,
                    terminal,
                    building,
                    floor,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let map = Map {
            viewer_url,
            entries,
        };

        let admin_notification_address = subscription
            .unwrap_or_default()
            .admin_notification_address
            .map(|addr| addr.parse())
            .transpose()?;

        let subscription = Subscription {
            admin_notification_address,
        };

        Ok(Self {
            db,
            webserver,
            email,
            payment,
            flight_data,
            reminders,
            map,
            subscription,
        })
    }
}

use duration_str::deserialize_option_duration;
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

const DEFAULT_CONFIG_FILE: &str = include_str!("rassid.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub db: Option<Db>,
    pub webserver: Option<WebServer>,
    pub email: Option<Email>,
    pub payment: Option<Payment>,
    pub flight_data: Option<FlightData>,
    pub reminders: Option<Reminders>,
    pub map: Option<Map>,
    pub subscription: Option<Subscription>,
    pub gateway: Option<Gateway>,
}

impl Default for Config {
    fn default() -> Self {
        let cfg: Self = toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration");
        cfg
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Db {
    pub connection_sqlite: String,
    pub connection_pool_size: u32,
}

impl Default for Db {
    fn default() -> Self {
        Config::default().db.expect("DB configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WebServer {
    pub address: String,
    pub port: u16,
    pub secret_key: Option<String>,
    pub public_url: String,
}

impl Default for WebServer {
    fn default() -> Self {
        Config::default().webserver.expect("Webserver configuration")
    }
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Email {
    pub gateway: Option<EmailGateway>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmailGateway {
    Mailgun,
    Sendmail,
    EmailToJsonFile,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Payment {
    pub gateway: Option<PaymentGateway>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentGateway {
    Http,
    Manual,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FlightData {
    pub gateway: Option<FlightDataGateway>,
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub sync_interval: Option<Duration>,
}

impl Default for FlightData {
    fn default() -> Self {
        Config::default()
            .flight_data
            .expect("Flight data configuration")
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlightDataGateway {
    Aviationstack,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Reminders {
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub task_interval_time: Option<Duration>,
    #[serde(default, deserialize_with = "deserialize_option_duration")]
    pub lead_window: Option<Duration>,
}

impl Default for Reminders {
    fn default() -> Self {
        Config::default().reminders.expect("Reminders configuration")
    }
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Map {
    pub viewer_url: Option<String>,
    #[serde(default)]
    pub entries: Vec<MapEntry>,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MapEntry {
    pub airport: String,
    pub terminal: String,
    pub building: String,
    pub floor: String,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Subscription {
    pub admin_notification_address: Option<String>,
}

#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Gateway {
    pub mailgun: Option<MailGun>,
    pub sendmail: Option<Sendmail>,
    pub email_to_json_file: Option<EmailToJsonFile>,
    pub http_payment: Option<HttpPayment>,
    pub aviationstack: Option<Aviationstack>,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MailGun {
    pub api_key: String,
    pub domain: String,
    pub sender_address: String,
    pub api_base_url: Option<String>,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Sendmail {
    pub sender_address: String,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EmailToJsonFile {
    pub dir: PathBuf,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HttpPayment {
    pub api_url: String,
    pub api_key: String,
    pub currency: Option<String>,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Aviationstack {
    pub api_url: Option<String>,
    pub api_key: String,
    pub page_limit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_config_from_file() {
        let cfg: Config = toml::from_str(DEFAULT_CONFIG_FILE).unwrap();
        assert!(cfg.db.is_some());
        assert!(cfg.webserver.is_some());
        assert!(cfg.payment.is_some());
        assert!(cfg.flight_data.is_some());
        assert!(cfg.reminders.is_some());
    }

    #[test]
    fn default_reminders_config() {
        let cfg = Reminders::default();
        assert!(cfg.task_interval_time.is_some());
        assert!(cfg.lead_window.is_some());
    }

    #[test]
    fn parse_gateway_sections() {
        let cfg: Config = toml::from_str(
            r#"
            [email]
            gateway = "mailgun"

            [payment]
            gateway = "http"

            [flight-data]
            gateway = "aviationstack"
            sync-interval = "15m"

            [gateway.mailgun]
            api-key = "key-x"
            domain = "mg.rassid.example"
            sender-address = "noreply@rassid.example"

            [gateway.http-payment]
            api-url = "https://pay.example/api"
            api-key = "key-y"

            [gateway.aviationstack]
            api-key = "key-z"

            [map]
            entries = [
                { airport = "RUH", terminal = "T1", building = "Terminal 1", floor = "2" },
            ]
            "#,
        )
        .unwrap();
        let gateway = cfg.gateway.unwrap();
        assert!(gateway.mailgun.is_some());
        assert!(gateway.http_payment.is_some());
        assert!(gateway.aviationstack.is_some());
        assert_eq!(cfg.map.unwrap().entries.len(), 1);
        assert_eq!(
            cfg.flight_data.unwrap().sync_interval.unwrap(),
            Duration::from_secs(15 * 60)
        );
    }
}

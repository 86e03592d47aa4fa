use anyhow::Result;

use rassid_core::gateways::{
    email::{EmailGateway, EmailSendError},
    flight_data::{FetchedFlights, FlightDataError, FlightDataGateway},
    indoor_map::IndoorMapGateway,
    notify::{DeliveryReceipt, NotificationEvent, NotificationGateway},
    payment::PaymentGateway,
};
use rassid_entities::{airport::IataCode, email::*};
use rassid_gateways::{
    email::{Mailgun, SendToJsonFile, Sendmail},
    flight_data::AviationstackGateway,
    indoor_map::{StaticIndoorMap, TerminalLocation},
    notify::{all_notification_types, Notify},
    payment::{HttpPaymentGateway, ManualPaymentGateway},
    user_communication::PassengerFormatter,
};

use crate::config;

pub fn email_gateway(cfg: Option<config::EmailGateway>) -> Result<EmailGw> {
    let gw = match cfg {
        Some(config::EmailGateway::Mailgun {
            api_key,
            api_base_url,
            domain,
            sender_address,
        }) => EmailGw::new(Mailgun {
            api_key,
            api_base_url,
            domain,
            from_email: sender_address,
        }),
        Some(config::EmailGateway::Sendmail { sender_address }) => {
            EmailGw::new(Sendmail::new(sender_address))
        }
        Some(config::EmailGateway::EmailToJsonFile { dir }) => {
            EmailGw::new(SendToJsonFile::try_new(dir)?)
        }
        None => {
            log::warn!("No e-mail gateway configured: outgoing e-mails are dropped");
            EmailGw::new(DummyMailGw)
        }
    };
    Ok(gw)
}

pub fn notification_gateway(
    email_cfg: Option<config::EmailGateway>,
    subscription_cfg: &config::Subscription,
) -> Result<Box<dyn NotificationGateway + Send + Sync>> {
    let notify = Notify::new(email_gateway(email_cfg)?, all_notification_types());
    let gw: Box<dyn NotificationGateway + Send + Sync> =
        match &subscription_cfg.admin_notification_address {
            Some(address) => Box::new(CcStandingInbox {
                inner: notify,
                inbox: address.clone(),
            }),
            None => Box::new(notify),
        };
    Ok(gw)
}

pub fn payment_gateway(
    cfg: config::PaymentGateway,
    confirm_base_url: String,
) -> Box<dyn PaymentGateway + Send + Sync> {
    match cfg {
        config::PaymentGateway::Http {
            api_url,
            api_key,
            currency,
        } => Box::new(HttpPaymentGateway {
            api_url,
            api_key,
            currency,
        }),
        config::PaymentGateway::Manual => {
            log::warn!("No payment provider configured: checkouts auto-complete");
            Box::new(ManualPaymentGateway {
                confirm_base_url,
            })
        }
    }
}

pub fn flight_data_gateway(cfg: config::FlightDataGateway) -> AviationstackGateway {
    match cfg {
        config::FlightDataGateway::Aviationstack {
            api_url,
            api_key,
            page_limit,
        } => AviationstackGateway {
            api_url,
            api_key,
            page_limit,
        },
    }
}

pub fn indoor_map_gateway(cfg: &config::Map) -> Box<dyn IndoorMapGateway + Send + Sync> {
    Box::new(StaticIndoorMap {
        map_viewer_url: cfg.viewer_url.clone(),
        entries: cfg
            .entries
            .iter()
            .map(|entry| TerminalLocation {
                airport: entry.airport.clone(),
                terminal: entry.terminal.clone(),
                building: entry.building.clone(),
                floor: entry.floor.clone(),
            })
            .collect(),
    })
}

pub fn passenger_formatter(webserver_cfg: &config::WebServer) -> PassengerFormatter {
    PassengerFormatter::new(webserver_cfg.tracking_base_url())
}

struct DummyMailGw;

impl EmailGateway for DummyMailGw {
    fn compose_and_send(
        &self,
        _recipients: &[EmailAddress],
        _email: &EmailContent,
    ) -> std::result::Result<(), EmailSendError> {
        log::debug!("Cannot send e-mails because no e-mail gateway was configured");
        Ok(())
    }
}

pub struct EmailGw(Box<dyn EmailGateway + Send + Sync + 'static>);

impl EmailGw {
    pub fn new<G>(gw: G) -> Self
    where
        G: EmailGateway + Send + Sync + 'static,
    {
        Self(Box::new(gw))
    }

    pub fn into_inner(self) -> Box<dyn EmailGateway + Send + Sync + 'static> {
        self.0
    }
}

impl EmailGateway for EmailGw {
    fn compose_and_send(
        &self,
        recipients: &[EmailAddress],
        email: &EmailContent,
    ) -> std::result::Result<(), EmailSendError> {
        self.0.compose_and_send(recipients, email)
    }
}

/// Copies platform notifications to a standing inbox from the
/// configuration, so a fresh deployment is reachable before the first
/// platform admin account exists.
struct CcStandingInbox {
    inner: Notify,
    inbox: EmailAddress,
}

impl CcStandingInbox {
    fn merged(&self, addresses: &[EmailAddress]) -> Vec<EmailAddress> {
        let mut all = addresses.to_vec();
        if !all.contains(&self.inbox) {
            all.push(self.inbox.clone());
        }
        all
    }
}

impl NotificationGateway for CcStandingInbox {
    fn notify(&self, event: NotificationEvent) -> Vec<DeliveryReceipt> {
        use NotificationEvent as E;
        match event {
            E::SubscriptionRequestReceived {
                request,
                admin_addresses,
            } => {
                let all = self.merged(admin_addresses);
                self.inner.notify(E::SubscriptionRequestReceived {
                    request,
                    admin_addresses: &all,
                })
            }
            E::TicketEscalated {
                ticket,
                airport,
                admin_addresses,
            } => {
                let all = self.merged(admin_addresses);
                self.inner.notify(E::TicketEscalated {
                    ticket,
                    airport,
                    admin_addresses: &all,
                })
            }
            E::ContactMessageReceived {
                message,
                admin_addresses,
            } => {
                let all = self.merged(admin_addresses);
                self.inner.notify(E::ContactMessageReceived {
                    message,
                    admin_addresses: &all,
                })
            }
            other => self.inner.notify(other),
        }
    }
}

/// Stand-in for deployments without a flight data provider. The
/// periodic sync is disabled, but the manual trigger stays routable.
pub struct NoFlightData;

impl FlightDataGateway for NoFlightData {
    fn provider_name(&self) -> &str {
        "none"
    }

    fn fetch_flights(
        &self,
        _airport: Option<&IataCode>,
    ) -> std::result::Result<FetchedFlights, FlightDataError> {
        Err(FlightDataError::Unavailable(
            "No flight data provider is configured".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::slice;

    use super::*;
    use rassid_entities::{
        id::Id,
        request::{PendingAirport, RequestStatus, SubscriptionRequest},
        subscription::SubscriptionPlan,
        time::Timestamp,
    };

    fn dummy_request() -> SubscriptionRequest {
        SubscriptionRequest {
            id: Id::new(),
            airport: PendingAirport {
                name: "King Khalid International".into(),
                code: "RUH".parse().unwrap(),
                city: "Riyadh".into(),
                country: "Saudi Arabia".into(),
            },
            contact_email: "applicant@ruh.sa".parse().unwrap(),
            contact_phone: "+966500000000".into(),
            plan: SubscriptionPlan::OneYear,
            license_file: "license.pdf".into(),
            commercial_record_file: None,
            status: RequestStatus::Pending,
            rejection_reason: None,
            created_at: Timestamp::now(),
        }
    }

    #[test]
    fn the_standing_inbox_is_added_once() {
        let request = dummy_request();
        let inbox: EmailAddress = "ops@rassid.example".parse().unwrap();
        let cc = CcStandingInbox {
            inner: Notify::new(DummyMailGw, all_notification_types()),
            inbox: inbox.clone(),
        };
        // Already present in the admin list, so no duplicate send.
        let receipts = cc.notify(NotificationEvent::SubscriptionRequestReceived {
            request: &request,
            admin_addresses: slice::from_ref(&inbox),
        });
        assert_eq!(receipts.len(), 1);

        let receipts = cc.notify(NotificationEvent::SubscriptionRequestReceived {
            request: &request,
            admin_addresses: &[],
        });
        assert_eq!(receipts.len(), 1);
        assert_eq!(receipts[0].recipient, inbox);
    }
}

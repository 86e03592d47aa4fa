use anyhow::anyhow;
use rassid_entities::request::SubscriptionRequest;
use serde::{Deserialize, Serialize};

use super::{CheckoutSession, PaymentGateway, PaymentGatewayError, PaymentStatus};

/// Client for a hosted-checkout payment provider.
///
/// The provider keeps the authoritative session state. Creating a
/// session returns the URL the applicant is redirected to, verifying
/// a session asks the provider for its verdict.
#[derive(Debug, Clone)]
pub struct HttpPaymentGateway {
    pub api_url: String,
    pub api_key: String,
    pub currency: String,
}

#[derive(Debug, Serialize)]
struct NewSessionRequest<'a> {
    amount: i64,
    currency: &'a str,
    reference: &'a str,
    description: String,
}

#[derive(Debug, Deserialize)]
struct CreatedSession {
    id: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct SessionState {
    status: String,
}

impl PaymentGateway for HttpPaymentGateway {
    fn create_checkout_session(
        &self,
        request: &SubscriptionRequest,
        amount_usd_cents: i64,
    ) -> Result<CheckoutSession, PaymentGatewayError> {
        // TODO: use url::Url
        let url = format!("{}/sessions", self.api_url);
        let new_session = NewSessionRequest {
            amount: amount_usd_cents,
            currency: &self.currency,
            reference: request.id.as_str(),
            description: format!("Rassid subscription for {}", request.airport.name),
        };
        let response = reqwest::blocking::Client::new()
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&new_session)
            .send()
            .map_err(anyhow::Error::from)?;
        if !response.status().is_success() {
            return Err(anyhow!(
                "Checkout session was not created: HTTP {}",
                response.status()
            )
            .into());
        }
        let created: CreatedSession = response.json().map_err(anyhow::Error::from)?;
        log::debug!(
            "Created checkout session {} for request {}",
            created.id,
            request.id
        );
        Ok(CheckoutSession {
            session_id: created.id,
            checkout_url: created.url,
        })
    }

    fn verify_session(&self, session_id: &str) -> Result<PaymentStatus, PaymentGatewayError> {
        let url = format!("{}/sessions/{}", self.api_url, session_id);
        let response = reqwest::blocking::Client::new()
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .map_err(anyhow::Error::from)?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(PaymentGatewayError::SessionNotFound);
        }
        if !response.status().is_success() {
            return Err(anyhow!("Unable to verify session: HTTP {}", response.status()).into());
        }
        let state: SessionState = response.json().map_err(anyhow::Error::from)?;
        Ok(session_status(&state.status))
    }
}

fn session_status(status: &str) -> PaymentStatus {
    match status {
        "paid" | "complete" | "completed" => PaymentStatus::Completed,
        "failed" | "expired" | "canceled" => PaymentStatus::Failed,
        _ => PaymentStatus::Pending,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_status_mapping() {
        assert_eq!(session_status("paid"), PaymentStatus::Completed);
        assert_eq!(session_status("completed"), PaymentStatus::Completed);
        assert_eq!(session_status("expired"), PaymentStatus::Failed);
        assert_eq!(session_status("canceled"), PaymentStatus::Failed);
        assert_eq!(session_status("open"), PaymentStatus::Pending);
    }
}

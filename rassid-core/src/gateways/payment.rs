use crate::entities::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaymentGatewayError {
    #[error("The checkout session could not be found")]
    SessionNotFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Hosted checkout session created at the provider.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    pub session_id: String,
    pub checkout_url: String,
}

/// Provider-side state of a session. Client redirects claiming
/// success are never trusted, only this verdict counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Completed,
    Pending,
    Failed,
}

pub trait PaymentGateway {
    fn create_checkout_session(
        &self,
        request: &SubscriptionRequest,
        amount_usd_cents: i64,
    ) -> Result<CheckoutSession, PaymentGatewayError>;

    fn verify_session(&self, session_id: &str) -> Result<PaymentStatus, PaymentGatewayError>;
}

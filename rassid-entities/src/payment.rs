use crate::{id::Id, subscription::SubscriptionPlan, time::Timestamp};

/// Ledger entry for one confirmed license payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRecord {
    pub id: Id,
    pub request_id: Id,
    pub plan: SubscriptionPlan,
    pub amount_usd_cents: i64,
    /// Session identifier issued by the payment provider.
    pub provider_session: String,
    pub paid_at: Timestamp,
}

use thiserror::Error;

use crate::{
    airport::IataCode, email::EmailAddress, id::Id, subscription::SubscriptionPlan,
    time::Timestamp,
};

/// Denormalized airport snapshot carried by a subscription request.
///
/// The canonical airport may not exist yet at request time; the snapshot
/// is reconciled with the registry (matched by code) only at activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAirport {
    pub name: String,
    pub code: IataCode,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    ApprovedPendingPayment,
    Approved,
    Rejected,
}

#[derive(Debug, Error)]
#[error("Illegal subscription request transition: {from} -> {to}")]
pub struct InvalidRequestTransition {
    pub from: RequestStatus,
    pub to: RequestStatus,
}

impl RequestStatus {
    /// Open requests can still be decided or cancelled.
    pub fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::ApprovedPendingPayment)
    }

    /// The only legal moves:
    /// `pending -> approved_pending_payment -> approved`, a direct
    /// `pending -> approved`, and `rejected` from any open state.
    /// `approved_pending_payment` may be re-entered, so a repeated
    /// approval re-issues the checkout link instead of failing.
    /// `approved` and `rejected` are terminal.
    pub fn transition_to(self, to: Self) -> Result<Self, InvalidRequestTransition> {
        use RequestStatus::*;
        let legal = matches!(
            (self, to),
            (Pending, ApprovedPendingPayment)
                | (ApprovedPendingPayment, ApprovedPendingPayment)
                | (Pending, Approved)
                | (ApprovedPendingPayment, Approved)
                | (Pending, Rejected)
                | (ApprovedPendingPayment, Rejected)
        );
        if legal {
            Ok(to)
        } else {
            Err(InvalidRequestTransition { from: self, to })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionRequest {
    pub id: Id,
    pub airport: PendingAirport,
    pub contact_email: EmailAddress,
    pub contact_phone: String,
    pub plan: SubscriptionPlan,
    /// Stored file name of the uploaded official license.
    pub license_file: String,
    pub commercial_record_file: Option<String>,
    pub status: RequestStatus,
    pub rejection_reason: Option<String>,
    pub created_at: Timestamp,
}

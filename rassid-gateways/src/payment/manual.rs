use rassid_entities::request::SubscriptionRequest;

use super::{CheckoutSession, PaymentGateway, PaymentGatewayError, PaymentStatus};

/// Offline fallback for deployments without a payment provider.
///
/// Every session verifies as completed, so confirming a payment
/// activates the subscription immediately. The checkout URL points at
/// the portal's own confirmation page.
#[derive(Debug, Clone)]
pub struct ManualPaymentGateway {
    pub confirm_base_url: String,
}

impl PaymentGateway for ManualPaymentGateway {
    fn create_checkout_session(
        &self,
        request: &SubscriptionRequest,
        _amount_usd_cents: i64,
    ) -> Result<CheckoutSession, PaymentGatewayError> {
        Ok(CheckoutSession {
            session_id: format!("manual-{}", request.id),
            checkout_url: format!(
                "{}/{}",
                self.confirm_base_url.trim_end_matches('/'),
                request.id
            ),
        })
    }

    fn verify_session(&self, _session_id: &str) -> Result<PaymentStatus, PaymentGatewayError> {
        Ok(PaymentStatus::Completed)
    }
}

#[cfg(test)]
mod tests {
    use rassid_entities::{
        email::EmailAddress,
        request::{PendingAirport, RequestStatus},
        subscription::SubscriptionPlan,
        time::Timestamp,
    };

    use super::*;

    #[test]
    fn manual_sessions_always_verify_as_completed() {
        let gw = ManualPaymentGateway {
            confirm_base_url: "https://rassid.example.com/payments/confirm/".into(),
        };
        let request = SubscriptionRequest {
            id: "req1".into(),
            airport: PendingAirport {
                name: "King Khalid International".into(),
                code: "RUH".parse().unwrap(),
                city: "Riyadh".into(),
                country: "Saudi Arabia".into(),
            },
            contact_email: EmailAddress::new_unchecked("ops@ruh.example".into()),
            contact_phone: "+966-11-0000000".into(),
            plan: SubscriptionPlan::OneYear,
            license_file: "license.pdf".into(),
            commercial_record_file: None,
            status: RequestStatus::Pending,
            rejection_reason: None,
            created_at: Timestamp::now(),
        };
        let session = gw
            .create_checkout_session(&request, request.plan.price_usd_cents())
            .unwrap();
        assert_eq!(session.session_id, "manual-req1");
        assert_eq!(
            session.checkout_url,
            "https://rassid.example.com/payments/confirm/req1"
        );
        assert_eq!(
            gw.verify_session(&session.session_id).unwrap(),
            PaymentStatus::Completed
        );
    }
}

use super::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutPreparation {
    /// The request awaits payment for the given amount.
    Ready {
        request: SubscriptionRequest,
        amount_usd_cents: i64,
    },
    /// Already paid for, the applicant should sign in instead.
    AlreadyApproved,
}

pub fn prepare_checkout<R>(repo: &R, request_id: &Id) -> Result<CheckoutPreparation>
where
    R: SubscriptionRequestRepo,
{
    let request = repo.get_subscription_request(request_id)?;
    match request.status {
        RequestStatus::ApprovedPendingPayment => {
            let amount_usd_cents = request.plan.price_usd_cents();
            Ok(CheckoutPreparation::Ready {
                request,
                amount_usd_cents,
            })
        }
        RequestStatus::Approved => Ok(CheckoutPreparation::AlreadyApproved),
        RequestStatus::Pending | RequestStatus::Rejected => Err(Error::NotAwaitingPayment),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::tests::*;

    #[test]
    fn checkout_amounts_follow_the_plan() {
        let db = MockDb::default();
        let mut request = stored_request(&db, "RUH", RequestStatus::ApprovedPendingPayment);
        request.plan = SubscriptionPlan::FiveYears;
        db.subscription_requests.borrow_mut()[0] = request.clone();

        match prepare_checkout(&db, &request.id).unwrap() {
            CheckoutPreparation::Ready {
                amount_usd_cents, ..
            } => assert_eq!(amount_usd_cents, 2_000_000),
            other => panic!("unexpected preparation: {other:?}"),
        }
    }

    #[test]
    fn undecided_and_rejected_requests_cannot_check_out() {
        let db = MockDb::default();
        for status in [RequestStatus::Pending, RequestStatus::Rejected] {
            let request = stored_request(&db, "RUH", status);
            assert!(matches!(
                prepare_checkout(&db, &request.id),
                Err(Error::NotAwaitingPayment)
            ));
        }
    }

    #[test]
    fn approved_requests_route_to_login() {
        let db = MockDb::default();
        let request = stored_request(&db, "RUH", RequestStatus::Approved);
        assert_eq!(
            prepare_checkout(&db, &request.id).unwrap(),
            CheckoutPreparation::AlreadyApproved
        );
    }
}

use super::prelude::*;
use crate::usecases;

/// Approves a request and parks it until the applicant has paid.
/// The airport, account and subscription are only provisioned after
/// payment confirmation.
pub fn approve_awaiting_payment<R>(repo: &R, admin: &User, request_id: &Id) -> Result<SubscriptionRequest>
where
    R: SubscriptionRequestRepo + UserRepo,
{
    usecases::authorize_role(admin, Role::PlatformAdmin)?;
    let mut request = repo.get_subscription_request(request_id)?;
    // Renewals bypass the approval step, so an already registered
    // contact address always indicates a mistaken approval.
    if repo.try_get_user_by_email(&request.contact_email)?.is_some() {
        return Err(Error::UserExists);
    }
    request.status = request
        .status
        .transition_to(RequestStatus::ApprovedPendingPayment)?;
    repo.update_subscription_request(&request)?;
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::tests::*;

    #[test]
    fn park_a_pending_request_for_payment() {
        let db = MockDb::default();
        let admin = stored_user(&db, Role::PlatformAdmin, None, "root@rassid.sa", "secret1");
        let request = stored_request(&db, "RUH", RequestStatus::Pending);

        let approved = approve_awaiting_payment(&db, &admin, &request.id).unwrap();
        assert_eq!(approved.status, RequestStatus::ApprovedPendingPayment);
        assert_eq!(
            db.subscription_requests.borrow()[0].status,
            RequestStatus::ApprovedPendingPayment
        );
    }

    #[test]
    fn approving_a_parked_request_again_is_tolerated() {
        let db = MockDb::default();
        let admin = stored_user(&db, Role::PlatformAdmin, None, "root@rassid.sa", "secret1");
        let request = stored_request(&db, "RUH", RequestStatus::ApprovedPendingPayment);

        // The applicant gets the checkout link once more, nothing else
        // changes.
        let approved = approve_awaiting_payment(&db, &admin, &request.id).unwrap();
        assert_eq!(approved.status, RequestStatus::ApprovedPendingPayment);
        assert_eq!(
            db.subscription_requests.borrow()[0].status,
            RequestStatus::ApprovedPendingPayment
        );
    }

    #[test]
    fn decided_requests_cannot_be_approved_again() {
        let db = MockDb::default();
        let admin = stored_user(&db, Role::PlatformAdmin, None, "root@rassid.sa", "secret1");
        for status in [RequestStatus::Approved, RequestStatus::Rejected] {
            let request = stored_request(&db, "JED", status);
            assert!(matches!(
                approve_awaiting_payment(&db, &admin, &request.id),
                Err(Error::RequestTransition(_))
            ));
        }
    }

    #[test]
    fn registered_contacts_cannot_be_approved() {
        let db = MockDb::default();
        let admin = stored_user(&db, Role::PlatformAdmin, None, "root@rassid.sa", "secret1");
        let request = stored_request(&db, "RUH", RequestStatus::Pending);
        stored_user(
            &db,
            Role::AirportAdmin,
            Some(Id::new()),
            request.contact_email.as_str(),
            "secret1",
        );
        assert!(matches!(
            approve_awaiting_payment(&db, &admin, &request.id),
            Err(Error::UserExists)
        ));
        assert_eq!(
            db.subscription_requests.borrow()[0].status,
            RequestStatus::Pending
        );
    }

    #[test]
    fn only_platform_admins_may_approve() {
        let db = MockDb::default();
        let admin = stored_user(
            &db,
            Role::AirportAdmin,
            Some(Id::new()),
            "admin@ruh.sa",
            "secret1",
        );
        let request = stored_request(&db, "RUH", RequestStatus::Pending);
        assert!(matches!(
            approve_awaiting_payment(&db, &admin, &request.id),
            Err(Error::Forbidden)
        ));
    }
}

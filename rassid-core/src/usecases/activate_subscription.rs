use super::prelude::*;
use crate::{gateways::notify::IssuedCredentials, usecases};

/// Everything that came out of an activation, for follow-up
/// notifications.
#[derive(Debug)]
pub struct Activation {
    pub request: SubscriptionRequest,
    pub airport: Airport,
    pub subscription: AirportSubscription,
    /// Only present when a fresh admin account was provisioned.
    pub credentials: Option<IssuedCredentials>,
}

/// Direct activation by a platform admin, without a payment step.
///
/// Must run inside a single transaction: a half-provisioned tenant
/// (airport without account, account without subscription) is worse
/// than a failed approval.
pub fn activate_subscription_directly<R>(
    repo: &R,
    admin: &User,
    request_id: &Id,
) -> Result<Activation>
where
    R: SubscriptionRequestRepo + UserRepo + AirportRepo + SubscriptionRepo,
{
    usecases::authorize_role(admin, Role::PlatformAdmin)?;
    let mut request = repo.get_subscription_request(request_id)?;
    request.status = request.status.transition_to(RequestStatus::Approved)?;
    let (airport, subscription, credentials) = provision_new_tenant(repo, &request)?;
    repo.update_subscription_request(&request)?;
    Ok(Activation {
        request,
        airport,
        subscription,
        credentials,
    })
}

/// Activation or renewal after a verified payment. The caller is
/// responsible for verifying the payment session with the provider
/// and for wrapping this call in a transaction.
///
/// The status transition doubles as the replay guard: a second
/// confirmation of the same request hits the terminal `approved`
/// state and fails before touching any other row.
pub fn activate_paid_subscription<R>(
    repo: &R,
    request_id: &Id,
    provider_session: &str,
) -> Result<Activation>
where
    R: SubscriptionRequestRepo + UserRepo + AirportRepo + SubscriptionRepo + PaymentRepo,
{
    let mut request = repo.get_subscription_request(request_id)?;
    request.status = request.status.transition_to(RequestStatus::Approved)?;

    // One handler for both branches, keyed by whether the contact
    // address already owns an account.
    let (airport, subscription, credentials) =
        match repo.try_get_user_by_email(&request.contact_email)? {
            Some(user) => renew_tenant(repo, &request, &user)?,
            None => provision_new_tenant(repo, &request)?,
        };

    repo.create_payment(&PaymentRecord {
        id: Id::new(),
        request_id: request.id.clone(),
        plan: request.plan,
        amount_usd_cents: request.plan.price_usd_cents(),
        provider_session: provider_session.to_owned(),
        paid_at: Timestamp::now(),
    })?;
    repo.update_subscription_request(&request)?;
    Ok(Activation {
        request,
        airport,
        subscription,
        credentials,
    })
}

type Provisioned = (Airport, AirportSubscription, Option<IssuedCredentials>);

/// First activation: reuse or create the airport, provision the
/// admin account and open a fresh subscription window.
fn provision_new_tenant<R>(repo: &R, request: &SubscriptionRequest) -> Result<Provisioned>
where
    R: UserRepo + AirportRepo + SubscriptionRepo,
{
    let airport = match repo.try_get_airport_by_code(&request.airport.code)? {
        Some(airport) => airport,
        None => {
            let airport = Airport {
                id: Id::new(),
                name: request.airport.name.clone(),
                code: request.airport.code.clone(),
                city: request.airport.city.clone(),
                country: request.airport.country.clone(),
                created_at: Timestamp::now(),
            };
            repo.create_airport(&airport)?;
            airport
        }
    };

    if repo.try_get_user_by_email(&request.contact_email)?.is_some() {
        return Err(Error::UserExists);
    }
    let password = usecases::employees::generate_password()?;
    let user = User {
        id: Id::new(),
        email: request.contact_email.clone(),
        password: password.parse::<Password>()?,
        role: Role::AirportAdmin,
        airport_id: Some(airport.id.clone()),
        created_at: Timestamp::now(),
    };
    repo.create_user(&user)?;

    let now = Timestamp::now();
    let subscription = AirportSubscription {
        id: Id::new(),
        airport_id: airport.id.clone(),
        plan: request.plan,
        start_at: now,
        expire_at: now + request.plan.validity(),
        max_employees: DEFAULT_MAX_EMPLOYEES,
        status: SubscriptionStatus::Active,
    };
    repo.create_subscription(&subscription)?;

    let credentials = IssuedCredentials {
        email: user.email,
        password,
    };
    Ok((airport, subscription, Some(credentials)))
}

/// Renewal: extend the latest subscription in place. A live window
/// is extended from its current expiry, a lapsed one restarts now.
fn renew_tenant<R>(repo: &R, request: &SubscriptionRequest, user: &User) -> Result<Provisioned>
where
    R: AirportRepo + SubscriptionRepo,
{
    // Platform admins have no airport that could be renewed.
    let airport_id = user.airport_id.as_ref().ok_or(Error::Forbidden)?;
    let airport = repo.get_airport(airport_id)?;
    let now = Timestamp::now();
    let subscription = match repo.try_get_subscription_by_airport(airport_id)? {
        Some(mut subscription) => {
            let base = if subscription.is_active(now) {
                subscription.expire_at
            } else {
                now
            };
            subscription.expire_at = base + request.plan.validity();
            subscription.plan = request.plan;
            repo.update_subscription(&subscription)?;
            subscription
        }
        None => {
            let subscription = AirportSubscription {
                id: Id::new(),
                airport_id: airport.id.clone(),
                plan: request.plan,
                start_at: now,
                expire_at: now + request.plan.validity(),
                max_employees: DEFAULT_MAX_EMPLOYEES,
                status: SubscriptionStatus::Active,
            };
            repo.create_subscription(&subscription)?;
            subscription
        }
    };
    Ok((airport, subscription, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::tests::*;
    use time::Duration;

    #[test]
    fn direct_activation_provisions_the_tenant() {
        let db = MockDb::default();
        let admin = stored_user(&db, Role::PlatformAdmin, None, "root@rassid.sa", "secret1");
        let request = stored_request(&db, "RUH", RequestStatus::Pending);

        let activation = activate_subscription_directly(&db, &admin, &request.id).unwrap();

        assert_eq!(activation.request.status, RequestStatus::Approved);
        assert_eq!(activation.airport.code.as_str(), "RUH");
        let credentials = activation.credentials.unwrap();
        assert_eq!(credentials.email, request.contact_email);

        let users = db.users.borrow();
        let account = users
            .iter()
            .find(|u| u.email == request.contact_email)
            .unwrap();
        assert_eq!(account.role, Role::AirportAdmin);
        assert_eq!(account.airport_id.as_ref(), Some(&activation.airport.id));
        assert!(account.password.verify(&credentials.password));

        let expected = activation.subscription.start_at + Duration::days(365);
        assert_eq!(activation.subscription.expire_at, expected);
        assert!(db.payments.borrow().is_empty());
    }

    #[test]
    fn paid_activation_provisions_and_records_the_payment() {
        let db = MockDb::default();
        let request = stored_request(&db, "RUH", RequestStatus::ApprovedPendingPayment);

        let activation = activate_paid_subscription(&db, &request.id, "sess_1").unwrap();

        assert_eq!(activation.request.status, RequestStatus::Approved);
        assert!(activation.credentials.is_some());
        assert_eq!(db.airports.borrow().len(), 1);
        assert_eq!(db.users.borrow().len(), 1);
        assert_eq!(db.subscriptions.borrow().len(), 1);

        let payments = db.payments.borrow();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].provider_session, "sess_1");
        assert_eq!(payments[0].amount_usd_cents, 500_000);
    }

    #[test]
    fn confirmation_replay_is_refused() {
        let db = MockDb::default();
        let request = stored_request(&db, "RUH", RequestStatus::ApprovedPendingPayment);
        activate_paid_subscription(&db, &request.id, "sess_1").unwrap();

        assert!(matches!(
            activate_paid_subscription(&db, &request.id, "sess_1"),
            Err(Error::RequestTransition(_))
        ));
        // nothing was duplicated
        assert_eq!(db.users.borrow().len(), 1);
        assert_eq!(db.subscriptions.borrow().len(), 1);
        assert_eq!(db.payments.borrow().len(), 1);
    }

    #[test]
    fn renewal_extends_a_live_subscription_from_its_expiry() {
        let db = MockDb::default();
        let airport = stored_airport(&db, "RUH");
        let admin = stored_user(
            &db,
            Role::AirportAdmin,
            Some(airport.id.clone()),
            "admin@ruh.sa",
            "secret1",
        );
        let mut subscription = active_subscription(&airport.id);
        let old_expiry = subscription.expire_at;
        subscription.plan = SubscriptionPlan::OneYear;
        db.subscriptions.borrow_mut().push(subscription);

        let mut request = stored_request(&db, "RUH", RequestStatus::ApprovedPendingPayment);
        request.contact_email = admin.email.clone();
        request.plan = SubscriptionPlan::ThreeYears;
        db.subscription_requests.borrow_mut()[0] = request.clone();

        let activation = activate_paid_subscription(&db, &request.id, "sess_2").unwrap();

        // extended from the old expiry, not from now
        assert_eq!(
            activation.subscription.expire_at,
            old_expiry + Duration::days(1095)
        );
        assert_eq!(activation.subscription.plan, SubscriptionPlan::ThreeYears);
        // no second account and no credentials email
        assert!(activation.credentials.is_none());
        assert_eq!(db.users.borrow().len(), 1);
        assert_eq!(db.subscriptions.borrow().len(), 1);
        assert_eq!(db.payments.borrow().len(), 1);
    }

    #[test]
    fn renewal_of_a_lapsed_subscription_restarts_now() {
        let db = MockDb::default();
        let airport = stored_airport(&db, "RUH");
        let admin = stored_user(
            &db,
            Role::AirportAdmin,
            Some(airport.id.clone()),
            "admin@ruh.sa",
            "secret1",
        );
        db.subscriptions
            .borrow_mut()
            .push(expired_subscription(&airport.id));

        let mut request = stored_request(&db, "RUH", RequestStatus::ApprovedPendingPayment);
        request.contact_email = admin.email.clone();
        db.subscription_requests.borrow_mut()[0] = request.clone();

        let before = Timestamp::now();
        let activation = activate_paid_subscription(&db, &request.id, "sess_3").unwrap();
        let after = Timestamp::now();

        let expire_at = activation.subscription.expire_at;
        assert!(expire_at >= before + Duration::days(365));
        assert!(expire_at <= after + Duration::days(365));
    }
}

use super::*;
use rassid_core::usecases::CheckoutPreparation;

#[post("/subscriptions/requests", format = "application/json", data = "<new>")]
pub fn post_subscription_request(
    db: sqlite::Connections,
    notify: &State<Notify>,
    new: JsonResult<json::NewSubscriptionRequest>,
) -> Result<json::SubscriptionRequest> {
    let new = from_json::new_subscription_request(new?.into_inner());
    let request = flows::submit_subscription_request(&db, &*notify.0, new)?;
    Ok(Json(request.into()))
}

#[get("/subscriptions/requests?<status>", format = "application/json")]
pub fn get_subscription_requests(
    db: sqlite::Connections,
    auth: Auth,
    status: Option<&str>,
) -> Result<Vec<json::SubscriptionRequest>> {
    let db = db.shared()?;
    auth.user_with_min_role(&db, Role::PlatformAdmin)?;
    let requests = match status {
        Some(status) => {
            let status = status
                .parse::<RequestStatus>()
                .map_err(|err| ApiError::OtherWithStatus(err.into(), Status::BadRequest))?;
            db.subscription_requests_by_status(status)?
        }
        None => db.all_subscription_requests()?,
    };
    Ok(Json(requests.into_iter().map(Into::into).collect()))
}

// The request id acts as a capability: the status page is reachable
// for everyone who received the submission confirmation.
#[get("/subscriptions/requests/<id>", format = "application/json")]
pub fn get_subscription_request(
    db: sqlite::Connections,
    id: &str,
) -> Result<json::SubscriptionRequest> {
    let request = db.shared()?.get_subscription_request(&Id::from(id))?;
    Ok(Json(request.into()))
}

#[post("/subscriptions/requests/<id>/cancel?<email>", format = "application/json")]
pub fn post_cancel_request(
    db: sqlite::Connections,
    id: &str,
    email: &str,
) -> Result<json::SubscriptionRequest> {
    let email = email.parse::<EmailAddress>()?;
    let request = flows::cancel_subscription_request(&db, &Id::from(id), &email)?;
    Ok(Json(request.into()))
}

#[post("/subscriptions/requests/<id>/approve", format = "application/json")]
pub fn post_approve_request(
    db: sqlite::Connections,
    notify: &State<Notify>,
    cfg: &State<Cfg>,
    auth: Auth,
    id: &str,
) -> Result<json::SubscriptionRequest> {
    let admin = auth.user_with_min_role(&db.shared()?, Role::PlatformAdmin)?;
    let request = flows::approve_subscription_request(
        &db,
        &*notify.0,
        &admin,
        &Id::from(id),
        &cfg.checkout_base_url,
    )?;
    Ok(Json(request.into()))
}

#[post(
    "/subscriptions/requests/<id>/reject",
    format = "application/json",
    data = "<data>"
)]
pub fn post_reject_request(
    db: sqlite::Connections,
    notify: &State<Notify>,
    auth: Auth,
    id: &str,
    data: JsonResult<json::RejectRequest>,
) -> Result<json::SubscriptionRequest> {
    let admin = auth.user_with_min_role(&db.shared()?, Role::PlatformAdmin)?;
    let reason = data?.into_inner().reason;
    let request = flows::reject_subscription_request(&db, &*notify.0, &admin, &Id::from(id), reason)?;
    Ok(Json(request.into()))
}

/// Activation without a payment, for out-of-band onboardings.
#[post("/subscriptions/requests/<id>/activate", format = "application/json")]
pub fn post_activate_request(
    db: sqlite::Connections,
    notify: &State<Notify>,
    auth: Auth,
    id: &str,
) -> Result<json::SubscriptionRequest> {
    let admin = auth.user_with_min_role(&db.shared()?, Role::PlatformAdmin)?;
    let activation = flows::activate_subscription_directly(&db, &*notify.0, &admin, &Id::from(id))?;
    Ok(Json(activation.request.into()))
}

#[get("/subscriptions/requests/<id>/checkout", format = "application/json")]
pub fn get_checkout(db: sqlite::Connections, id: &str) -> Result<json::CheckoutDetails> {
    match usecases::prepare_checkout(&db.shared()?, &Id::from(id))? {
        CheckoutPreparation::Ready {
            request,
            amount_usd_cents,
        } => Ok(Json(to_json::checkout_details(request, amount_usd_cents))),
        CheckoutPreparation::AlreadyApproved => {
            Err(ParameterError::NotAwaitingPayment.into())
        }
    }
}

/// Opens a session at the payment provider. `None` means there is
/// nothing left to pay.
#[post("/subscriptions/requests/<id>/checkout", format = "application/json")]
pub fn post_checkout(
    db: sqlite::Connections,
    payment: &State<Payment>,
    id: &str,
) -> Result<Option<String>> {
    let url = match flows::begin_checkout(&db, &*payment.0, &Id::from(id))? {
        flows::CheckoutStart::Redirect(session) => Some(session.checkout_url),
        flows::CheckoutStart::AlreadyApproved => None,
    };
    Ok(Json(url))
}

#[post(
    "/subscriptions/requests/<id>/confirm-payment",
    format = "application/json",
    data = "<data>"
)]
pub fn post_confirm_payment(
    db: sqlite::Connections,
    notify: &State<Notify>,
    payment: &State<Payment>,
    id: &str,
    data: JsonResult<json::ConfirmPayment>,
) -> Result<json::SubscriptionRequest> {
    let session = data?.into_inner().provider_session;
    let activation = flows::confirm_subscription_payment(
        &db,
        &*notify.0,
        &*payment.0,
        &Id::from(id),
        &session,
    )?;
    Ok(Json(activation.request.into()))
}

#[post("/subscriptions/renew", format = "application/json", data = "<plan>")]
pub fn post_renew_subscription(
    db: sqlite::Connections,
    notify: &State<Notify>,
    cfg: &State<Cfg>,
    auth: Auth,
    plan: JsonResult<json::SubscriptionPlan>,
) -> Result<json::SubscriptionRequest> {
    let admin = auth.user_with_min_role(&db.shared()?, Role::AirportAdmin)?;
    let plan = plan?.into_inner().into();
    let request =
        flows::request_subscription_renewal(&db, &*notify.0, &admin, plan, &cfg.checkout_base_url)?;
    Ok(Json(request.into()))
}

use maud::Markup;
use num_traits::FromPrimitive;
use rocket::{
    self,
    form::Form,
    get, post,
    request::FlashMessage,
    response::{content::RawCss, Flash, Redirect},
    routes, FromForm, Route, State,
};

use crate::web::{api::ApiError, guards::*, sqlite, Cfg};
use rassid_application::prelude as flows;
use rassid_core::{entities::*, repositories::*, usecases, usecases::Error as ParameterError};

mod login;
mod view;


const MAIN_CSS: &str = include_str!("main.css");

type Result<T> = std::result::Result<T, ApiError>;

#[get("/?<q>")]
pub fn get_index(db: sqlite::Connections, auth: Auth, q: Option<&str>) -> Result<Markup> {
    let email = auth.account_email().ok().map(ToOwned::to_owned);
    let db = db.shared()?;
    let query = usecases::FlightQuery {
        text: q.map(ToOwned::to_owned),
        ..Default::default()
    };
    let flights = usecases::query_public_flights(&db, &query)?;
    let airports = db.all_airports()?;
    let rows = flights
        .into_iter()
        .filter_map(|flight| {
            let code_of = |id: &Id| {
                airports
                    .iter()
                    .find(|airport| airport.id == *id)
                    .map(|airport| airport.code.clone())
            };
            let origin = code_of(&flight.origin_airport_id)?;
            let destination = code_of(&flight.destination_airport_id)?;
            Some(view::FlightRow {
                flight,
                origin,
                destination,
            })
        })
        .collect::<Vec<_>>();
    Ok(view::index(email.as_deref(), q, &rows))
}

#[get("/pricing")]
pub fn get_pricing(auth: Auth) -> Markup {
    view::pricing(auth.account_email().ok())
}

#[get("/subscribe")]
pub fn get_subscribe(flash: Option<FlashMessage>) -> Markup {
    view::subscribe(flash)
}

#[derive(FromForm)]
pub struct SubscribeForm<'r> {
    airport_name: &'r str,
    airport_code: &'r str,
    city: &'r str,
    country: &'r str,
    contact_email: &'r str,
    contact_phone: &'r str,
    plan: &'r str,
    license_file: &'r str,
    commercial_record_file: Option<&'r str>,
}

#[allow(clippy::result_large_err)]
#[post("/subscribe", data = "<form>")]
pub fn post_subscribe(
    db: sqlite::Connections,
    notify: &State<Notify>,
    form: Form<SubscribeForm>,
) -> std::result::Result<Redirect, Flash<Redirect>> {
    let form = form.into_inner();
    let Ok(plan) = form.plan.parse::<SubscriptionPlan>() else {
        return Err(Flash::error(
            Redirect::to("/subscribe"),
            "Please pick one of the offered plans.",
        ));
    };
    let new = usecases::NewSubscriptionRequest {
        airport_name: form.airport_name.to_owned(),
        airport_code: form.airport_code.to_owned(),
        city: form.city.to_owned(),
        country: form.country.to_owned(),
        contact_email: form.contact_email.to_owned(),
        contact_phone: form.contact_phone.to_owned(),
        plan,
        license_file: form.license_file.to_owned(),
        commercial_record_file: form
            .commercial_record_file
            .filter(|file| !file.is_empty())
            .map(ToOwned::to_owned),
    };
    match flows::submit_subscription_request(&db, &*notify.0, new) {
        Ok(request) => Ok(Redirect::to(format!("/subscribe/status/{}", request.id))),
        Err(_) => Err(Flash::error(
            Redirect::to("/subscribe"),
            "The request could not be filed. Please check your details.",
        )),
    }
}

#[get("/subscribe/status/<id>")]
pub fn get_request_status(
    db: sqlite::Connections,
    flash: Option<FlashMessage>,
    id: &str,
) -> Result<Markup> {
    let request = db.shared()?.get_subscription_request(&Id::from(id))?;
    Ok(view::request_status(flash, &request))
}

#[derive(FromForm)]
pub struct CancelForm<'r> {
    email: &'r str,
}

#[allow(clippy::result_large_err)]
#[post("/subscribe/status/<id>/cancel", data = "<form>")]
pub fn post_cancel_request(
    db: sqlite::Connections,
    id: &str,
    form: Form<CancelForm>,
) -> std::result::Result<Redirect, Flash<Redirect>> {
    let status_url = format!("/subscribe/status/{id}");
    let Ok(email) = form.email.parse::<EmailAddress>() else {
        return Err(Flash::error(
            Redirect::to(status_url.clone()),
            "Invalid email address.",
        ));
    };
    match flows::cancel_subscription_request(&db, &Id::from(id), &email) {
        Ok(_) => Ok(Redirect::to(status_url)),
        Err(_) => Err(Flash::error(
            Redirect::to(status_url),
            "The request could not be withdrawn. Does the email match the contact email?",
        )),
    }
}

/// Hands the applicant over to the payment provider. This is the
/// page the emailed checkout link points at.
#[get("/subscribe/checkout/<id>")]
pub fn get_checkout(
    db: sqlite::Connections,
    payment: &State<Payment>,
    id: &str,
) -> Result<Redirect> {
    match flows::begin_checkout(&db, &*payment.0, &Id::from(id))? {
        flows::CheckoutStart::Redirect(session) => Ok(Redirect::to(session.checkout_url)),
        flows::CheckoutStart::AlreadyApproved => Ok(Redirect::to("/login")),
    }
}

/// Return URL of the payment provider. The session is verified
/// against the provider before anything is activated.
#[get("/subscribe/confirm/<id>?<session>")]
pub fn get_payment_confirm(
    db: sqlite::Connections,
    notify: &State<Notify>,
    payment: &State<Payment>,
    id: &str,
    session: &str,
) -> Result<Markup> {
    let activation =
        flows::confirm_subscription_payment(&db, &*notify.0, &*payment.0, &Id::from(id), session)?;
    Ok(view::payment_success(&activation.request))
}

#[get("/contact")]
pub fn get_contact(flash: Option<FlashMessage>) -> Markup {
    view::contact(flash)
}

#[derive(FromForm)]
pub struct ContactForm<'r> {
    first_name: &'r str,
    last_name: &'r str,
    email: &'r str,
    subject: &'r str,
    message: &'r str,
}

#[allow(clippy::result_large_err)]
#[post("/contact", data = "<form>")]
pub fn post_contact(
    db: sqlite::Connections,
    notify: &State<Notify>,
    form: Form<ContactForm>,
) -> std::result::Result<Flash<Redirect>, Flash<Redirect>> {
    let form = form.into_inner();
    let new = usecases::NewContactMessage {
        first_name: form.first_name.to_owned(),
        last_name: form.last_name.to_owned(),
        email: form.email.to_owned(),
        subject: form.subject.to_owned(),
        message: form.message.to_owned(),
    };
    match flows::submit_contact_message(&db, &*notify.0, new) {
        Ok(_) => Ok(Flash::success(
            Redirect::to("/contact"),
            "Thank you, we will get back to you.",
        )),
        Err(_) => Err(Flash::error(
            Redirect::to("/contact"),
            "The message could not be sent. Please check your details.",
        )),
    }
}

/// The passenger-facing page behind the emailed tracking link.
#[get("/track/<token>")]
pub fn get_track(
    db: sqlite::Connections,
    indoor_map: &State<IndoorMap>,
    token: &str,
) -> Result<Markup> {
    let token = TrackingToken::from(token.to_owned());
    let (tracking, airport_code) = {
        let db = db.shared()?;
        let tracking = usecases::track_passenger(&db, &token)?;
        let airport = db.get_airport(&tracking.flight.origin_airport_id)?;
        (tracking, airport.code)
    };
    let location = tracking
        .gate
        .as_ref()
        .and_then(|gate| indoor_map.locate_gate(&airport_code, &gate.terminal, &gate.gate));
    Ok(view::track(&tracking, location.as_ref()))
}

#[get("/dashboard")]
pub fn get_dashboard(
    db: sqlite::Connections,
    account: Account,
    flash: Option<FlashMessage>,
) -> Result<Markup> {
    let db = db.shared()?;
    let email = account.email().parse::<EmailAddress>()?;
    let user = usecases::authorize_user_by_email(&db, &email, Role::Operator)?;
    if user.role == Role::PlatformAdmin {
        let stats = usecases::platform_stats(&db, &user)?;
        let pending = db.subscription_requests_by_status(RequestStatus::Pending)?;
        return Ok(view::dashboard_platform(
            account.email(),
            flash,
            &stats,
            &pending,
        ));
    }
    let airport_id = user.airport_id.clone().ok_or(ParameterError::Forbidden)?;
    let airport = db.get_airport(&airport_id)?;
    let stats = usecases::airport_stats(&db, &user, &airport_id)?;
    let flights = usecases::query_airport_flights(
        &db,
        &user,
        &airport_id,
        &usecases::FlightQuery::default(),
    )?;
    let tickets = usecases::query_tickets(&db, &user)?;
    Ok(view::dashboard_airport(
        account.email(),
        flash,
        &airport,
        user.role >= Role::AirportAdmin,
        &stats,
        &flights,
        &tickets,
    ))
}

#[allow(clippy::result_large_err)]
#[post("/dashboard/requests/<id>/approve")]
pub fn post_approve_request(
    db: sqlite::Connections,
    notify: &State<Notify>,
    cfg: &State<Cfg>,
    account: Account,
    id: &str,
) -> std::result::Result<Redirect, Flash<Redirect>> {
    let admin = platform_admin(&db, &account)
        .map_err(|_| Flash::error(Redirect::to("/dashboard"), "Not permitted."))?;
    match flows::approve_subscription_request(
        &db,
        &*notify.0,
        &admin,
        &Id::from(id),
        &cfg.checkout_base_url,
    ) {
        Ok(_) => Ok(Redirect::to("/dashboard")),
        Err(_) => Err(Flash::error(
            Redirect::to("/dashboard"),
            "The request could not be approved.",
        )),
    }
}

#[derive(FromForm)]
pub struct RejectForm<'r> {
    reason: &'r str,
}

#[allow(clippy::result_large_err)]
#[post("/dashboard/requests/<id>/reject", data = "<form>")]
pub fn post_reject_request(
    db: sqlite::Connections,
    notify: &State<Notify>,
    account: Account,
    id: &str,
    form: Form<RejectForm>,
) -> std::result::Result<Redirect, Flash<Redirect>> {
    let admin = platform_admin(&db, &account)
        .map_err(|_| Flash::error(Redirect::to("/dashboard"), "Not permitted."))?;
    let reason = Some(form.reason)
        .filter(|reason| !reason.is_empty())
        .map(ToOwned::to_owned);
    match flows::reject_subscription_request(&db, &*notify.0, &admin, &Id::from(id), reason) {
        Ok(_) => Ok(Redirect::to("/dashboard")),
        Err(_) => Err(Flash::error(
            Redirect::to("/dashboard"),
            "The request could not be rejected.",
        )),
    }
}

#[get("/dashboard/employees")]
pub fn get_employees(
    db: sqlite::Connections,
    account: Account,
    flash: Option<FlashMessage>,
) -> Result<Markup> {
    let db = db.shared()?;
    let admin = airport_admin_of(&db, &account)?;
    let airport_id = admin.airport_id.clone().ok_or(ParameterError::Forbidden)?;
    let employees = usecases::list_employees(&db, &admin, &airport_id)?;
    Ok(view::employees(account.email(), flash, &employees))
}

#[derive(FromForm)]
pub struct NewEmployeeForm<'r> {
    email: &'r str,
    password: &'r str,
    role: u8,
}

#[allow(clippy::result_large_err)]
#[post("/dashboard/employees", data = "<form>")]
pub fn post_employee(
    db: sqlite::Connections,
    notify: &State<Notify>,
    account: Account,
    form: Form<NewEmployeeForm>,
) -> std::result::Result<Redirect, Flash<Redirect>> {
    let employees_url = "/dashboard/employees";
    let admin = match db.shared() {
        Ok(shared) => airport_admin_of(&shared, &account)
            .map_err(|_| Flash::error(Redirect::to(employees_url), "Not permitted."))?,
        Err(_) => {
            return Err(Flash::error(
                Redirect::to(employees_url),
                "Not permitted.",
            ))
        }
    };
    let Some(role) = Role::from_u8(form.role).filter(|role| *role != Role::PlatformAdmin) else {
        return Err(Flash::error(Redirect::to(employees_url), "Invalid role."));
    };
    let new = usecases::NewEmployee {
        email: form.email.to_owned(),
        password: Some(form.password)
            .filter(|password| !password.is_empty())
            .map(ToOwned::to_owned),
        role,
    };
    match flows::add_employee(&db, &*notify.0, &admin, new) {
        Ok(_) => Ok(Redirect::to(employees_url)),
        Err(_) => Err(Flash::error(
            Redirect::to(employees_url),
            "The account could not be created.",
        )),
    }
}

#[allow(clippy::result_large_err)]
#[post("/dashboard/employees/<id>/delete")]
pub fn post_delete_employee(
    db: sqlite::Connections,
    account: Account,
    id: &str,
) -> std::result::Result<Redirect, Flash<Redirect>> {
    let employees_url = "/dashboard/employees";
    let admin = match db.shared() {
        Ok(shared) => airport_admin_of(&shared, &account)
            .map_err(|_| Flash::error(Redirect::to(employees_url), "Not permitted."))?,
        Err(_) => {
            return Err(Flash::error(
                Redirect::to(employees_url),
                "Not permitted.",
            ))
        }
    };
    match flows::delete_employee(&db, &admin, &Id::from(id)) {
        Ok(_) => Ok(Redirect::to(employees_url)),
        Err(_) => Err(Flash::error(
            Redirect::to(employees_url),
            "The account could not be removed.",
        )),
    }
}

fn platform_admin(db: &sqlite::Connections, account: &Account) -> Result<User> {
    let db = db.shared()?;
    let email = account.email().parse::<EmailAddress>()?;
    Ok(usecases::authorize_user_by_email(
        &db,
        &email,
        Role::PlatformAdmin,
    )?)
}

fn airport_admin_of<R: UserRepo>(db: &R, account: &Account) -> Result<User> {
    let email = account.email().parse::<EmailAddress>()?;
    Ok(usecases::authorize_user_by_email(
        db,
        &email,
        Role::AirportAdmin,
    )?)
}

#[get("/main.css")]
pub fn get_main_css() -> RawCss<&'static str> {
    RawCss(MAIN_CSS)
}

pub fn routes() -> Vec<Route> {
    routes![
        get_index,
        get_pricing,
        get_subscribe,
        post_subscribe,
        get_request_status,
        post_cancel_request,
        get_checkout,
        get_payment_confirm,
        get_contact,
        post_contact,
        get_track,
        get_dashboard,
        post_approve_request,
        post_reject_request,
        get_employees,
        post_employee,
        post_delete_employee,
        get_main_css,
        login::get_login,
        login::post_login,
        login::post_logout,
    ]
}

use std::{fmt::Display, result};

use rocket::{
    self, delete, get,
    http::{Cookie, CookieJar, SameSite, Status},
    post, put,
    response::{self, Responder},
    routes,
    serde::json::{Error as JsonError, Json},
    Route, State,
};

use super::{guards::*, sqlite, Cfg};
use crate::adapters::json::{self, from_json, to_json};
use rassid_application::{error::AppError, prelude as flows};
use rassid_core::{entities::*, repositories::*, usecases, usecases::Error as ParameterError};

mod contact;
mod employees;
mod error;
mod flights;
mod requests;
mod stats;
mod tickets;
mod tracker;
mod users;
mod util;

pub use self::error::Error as ApiError;


type Result<T> = result::Result<Json<T>, ApiError>;
type JsonResult<'a, T> = result::Result<Json<T>, JsonError<'a>>;
type StatusResult = result::Result<Status, ApiError>;

pub fn routes() -> Vec<Route> {
    routes![
        // ---   users   --- //
        users::post_login,
        users::post_logout,
        users::get_current_user,
        // ---   subscription requests   --- //
        requests::post_subscription_request,
        requests::get_subscription_requests,
        requests::get_subscription_request,
        requests::post_cancel_request,
        requests::post_approve_request,
        requests::post_reject_request,
        requests::post_activate_request,
        requests::get_checkout,
        requests::post_checkout,
        requests::post_confirm_payment,
        requests::post_renew_subscription,
        // ---   flights   --- //
        flights::get_flights,
        flights::get_airport_flights,
        flights::put_flight_status,
        flights::post_gate_assignment,
        flights::post_booking,
        flights::post_flights_sync,
        // ---   passenger tracking   --- //
        tracker::get_tracked_booking,
        tracker::get_gate_location,
        // ---   tickets   --- //
        tickets::get_tickets,
        tickets::post_ticket,
        tickets::get_ticket,
        tickets::get_ticket_comments,
        tickets::post_ticket_comment,
        tickets::post_escalate_ticket,
        tickets::post_close_ticket,
        tickets::post_reject_ticket,
        tickets::post_reopen_ticket,
        // ---   employees   --- //
        employees::get_employees,
        employees::post_employee,
        employees::put_employee,
        employees::delete_employee,
        // ---   stats   --- //
        stats::get_platform_stats,
        stats::get_airport_stats,
        // ---   contact   --- //
        contact::post_contact_message,
        contact::get_contact_messages,
        contact::post_resolve_contact_message,
        util::get_version,
    ]
}

fn json_error_response<'r, 'o: 'r, E: Display>(
    req: &'r rocket::Request<'_>,
    err: &E,
    status: Status,
) -> response::Result<'o> {
    let message = err.to_string();
    let boundary_error = json::Error {
        http_status: status.code,
        message,
    };
    Json(boundary_error).respond_to(req).map(|mut res| {
        res.set_status(status);
        res
    })
}

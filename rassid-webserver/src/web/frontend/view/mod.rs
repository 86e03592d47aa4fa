use maud::{html, Markup};
use rocket::request::FlashMessage;
use time::{macros::format_description, OffsetDateTime};

use rassid_core::{entities::*, gateways::indoor_map::GateLocation, usecases};

mod page;

use page::*;

/// A departure board row with the airport ids already resolved.
pub struct FlightRow {
    pub flight: Flight,
    pub origin: IataCode,
    pub destination: IataCode,
}

const PLANS: [SubscriptionPlan; 3] = [
    SubscriptionPlan::OneYear,
    SubscriptionPlan::ThreeYears,
    SubscriptionPlan::FiveYears,
];

fn format_timestamp(ts: Timestamp) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute] UTC");
    OffsetDateTime::from_unix_timestamp(ts.as_secs())
        .ok()
        .and_then(|dt| dt.format(&format).ok())
        .unwrap_or_default()
}

fn plan_label(plan: SubscriptionPlan) -> &'static str {
    match plan {
        SubscriptionPlan::OneYear => "1 year",
        SubscriptionPlan::ThreeYears => "3 years",
        SubscriptionPlan::FiveYears => "5 years",
    }
}

fn usd(cents: i64) -> String {
    format!("{}.{:02} USD", cents / 100, cents % 100)
}

pub fn index(email: Option<&str>, search_term: Option<&str>, rows: &[FlightRow]) -> Markup {
    page(
        "Rassid Departures",
        email,
        None,
        html! {
            div class="search" {
                h1 { "Departures" }
                (flight_search_form(search_term))
            }
            div class="results" {
                @if rows.is_empty() {
                    p { "No matching flights on the board right now." }
                } @else {
                    table class="board" {
                        thead {
                            tr {
                                th { "Flight" }
                                th { "From" }
                                th { "To" }
                                th { "Departure" }
                                th { "Status" }
                            }
                        }
                        tbody {
                            @for row in rows {
                                tr {
                                    td { (row.flight.flight_number) }
                                    td { (row.origin) }
                                    td { (row.destination) }
                                    td { (format_timestamp(row.flight.scheduled_departure)) }
                                    td class=(format!("status {}", row.flight.status)) {
                                        (row.flight.status)
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

fn flight_search_form(search_term: Option<&str>) -> Markup {
    html! {
        div class="search-form" {
            form action="/" method="GET" {
                input
                    type="text"
                    name="q"
                    value=(search_term.unwrap_or(""))
                    size=(30)
                    maxlength=(50)
                    placeholder="flight number or airline";
                input class="btn" type="submit" value="search";
            }
        }
    }
}

pub fn pricing(email: Option<&str>) -> Markup {
    page(
        "Rassid Pricing",
        email,
        None,
        html! {
            main {
                h1 { "Plans" }
                p { "Every plan covers the full portal for one airport." }
                table {
                    thead {
                        tr {
                            th { "Plan" }
                            th { "License fee" }
                        }
                    }
                    tbody {
                        @for plan in PLANS {
                            tr {
                                td { (plan_label(plan)) }
                                td { (usd(plan.price_usd_cents())) }
                            }
                        }
                    }
                }
                a class="btn" href="/subscribe" { "Request a subscription" }
            }
        },
    )
}

pub fn subscribe(flash: Option<FlashMessage>) -> Markup {
    page(
        "Request a Subscription",
        None,
        flash,
        html! {
            main {
                h1 { "Request a subscription" }
                form action="/subscribe" method="POST" {
                    fieldset {
                        legend { "Airport" }
                        label { "Name" input type="text" name="airport_name" required; }
                        label { "IATA code" input type="text" name="airport_code" maxlength="3" required; }
                        label { "City" input type="text" name="city" required; }
                        label { "Country" input type="text" name="country" required; }
                    }
                    fieldset {
                        legend { "Contact" }
                        label { "Email" input type="email" name="contact_email" required; }
                        label { "Phone" input type="text" name="contact_phone" required; }
                    }
                    fieldset {
                        legend { "License" }
                        label { "Plan"
                            select name="plan" required {
                                @for plan in PLANS {
                                    option value=(plan) { (plan_label(plan)) }
                                }
                            }
                        }
                        label { "Operating license" input type="text" name="license_file" required; }
                        label { "Commercial record (optional)"
                            input type="text" name="commercial_record_file";
                        }
                    }
                    input class="btn" type="submit" value="submit request";
                }
            }
        },
    )
}

pub fn request_status(flash: Option<FlashMessage>, request: &SubscriptionRequest) -> Markup {
    page(
        "Subscription Request",
        None,
        flash,
        html! {
            main {
                h1 { (request.airport.name) }
                p { "Request " code { (request.id) } }
                p class=(format!("status {}", request.status)) { (request.status) }
                @match request.status {
                    RequestStatus::Pending => {
                        p { "Our team is reviewing your documents. You will be notified by email." }
                        (cancel_form(&request.id))
                    }
                    RequestStatus::ApprovedPendingPayment => {
                        p { "Your request has been approved. Complete the payment to activate the portal." }
                        a class="btn" href=(format!("/subscribe/checkout/{}", request.id)) {
                            "Proceed to payment"
                        }
                        (cancel_form(&request.id))
                    }
                    RequestStatus::Approved => {
                        p { "Your subscription is active. Check your inbox for the login credentials." }
                        a href="/login" { "Sign in" }
                    }
                    RequestStatus::Rejected => {
                        @if let Some(ref reason) = request.rejection_reason {
                            p { "The request was declined: " (reason) }
                        } @else {
                            p { "The request was declined." }
                        }
                    }
                }
            }
        },
    )
}

fn cancel_form(request_id: &Id) -> Markup {
    html! {
        form class="cancel" action=(format!("/subscribe/status/{request_id}/cancel")) method="POST" {
            label { "Contact email" input type="email" name="email" required; }
            input type="submit" value="withdraw request";
        }
    }
}

pub fn payment_success(request: &SubscriptionRequest) -> Markup {
    page(
        "Payment Received",
        None,
        None,
        html! {
            main {
                h1 { "Payment received" }
                p {
                    "The subscription for " b { (request.airport.name) }
                    " is now active. Login credentials are on their way to "
                    (request.contact_email) "."
                }
                a class="btn" href="/login" { "Sign in" }
            }
        },
    )
}

pub fn contact(flash: Option<FlashMessage>) -> Markup {
    page(
        "Contact",
        None,
        flash,
        html! {
            main {
                h1 { "Contact the platform team" }
                form action="/contact" method="POST" {
                    label { "First name" input type="text" name="first_name" required; }
                    label { "Last name" input type="text" name="last_name" required; }
                    label { "Email" input type="email" name="email" required; }
                    label { "Subject" input type="text" name="subject" required; }
                    label { "Message" textarea name="message" rows="6" required {} }
                    input class="btn" type="submit" value="send";
                }
            }
        },
    )
}

pub fn track(
    view: &usecases::PassengerTrackingView,
    location: Option<&GateLocation>,
) -> Markup {
    let flight = &view.flight;
    page(
        &format!("Flight {}", flight.flight_number),
        None,
        None,
        html! {
            main class="tracker" {
                h1 { (flight.flight_number) }
                p { "Hello " (view.passenger.full_name) ", booking " code { (view.booking.booking_ref) } }
                p class=(format!("status {}", flight.status)) { (flight.status) }
                p { "Departure " (format_timestamp(flight.scheduled_departure)) }
                @if let Some(seat) = &view.booking.seat {
                    p { "Seat " (seat) }
                }
                @if let Some(gate) = &view.gate {
                    div class="gate" {
                        p { "Gate " b { (gate.gate) } " in terminal " (gate.terminal) }
                        p { "Boarding: " (format!("{:?}", view.boarding_phase)) }
                        @if view.countdown_secs > 0 {
                            p { (format!("{} minutes remaining", view.countdown_secs / 60)) }
                        }
                        @if let Some(location) = location {
                            p {
                                "Find it in " (location.building) ", floor " (location.floor) "."
                                @if let Some(url) = &location.map_url {
                                    " " a href=(url) { "Open the map" }
                                }
                            }
                        }
                    }
                } @else {
                    p { "No gate has been assigned yet." }
                }
                h2 { "Timeline" }
                @if view.timeline.is_empty() {
                    p { "Nothing has happened yet." }
                } @else {
                    ul class="timeline" {
                        @for entry in &view.timeline {
                            li {
                                span class="when" { (format_timestamp(entry.happened_at)) }
                                @match &entry.event {
                                    usecases::TimelineEvent::StatusChanged { from, to } => {
                                        (format!(" status changed from {from} to {to}"))
                                    }
                                    usecases::TimelineEvent::GateAssigned { gate, terminal } => {
                                        (format!(" gate {gate} assigned in terminal {terminal}"))
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn login(flash: Option<FlashMessage>) -> Markup {
    page(
        "Login",
        None,
        flash,
        html! {
            main class="login" {
                h1 { "Staff login" }
                form action="login" method="POST" {
                    label { "Email" input type="email" name="email" required; }
                    label { "Password" input type="password" name="password" required; }
                    input class="btn" type="submit" value="login";
                }
            }
        },
    )
}

pub fn dashboard_platform(
    email: &str,
    flash: Option<FlashMessage>,
    stats: &usecases::PlatformStats,
    pending: &[SubscriptionRequest],
) -> Markup {
    page(
        "Platform Dashboard",
        Some(email),
        flash,
        html! {
            main class="dashboard" {
                h1 { "Platform" }
                table class="stats" {
                    tr { th { "Airports" } td { (stats.airports) } }
                    tr { th { "Active subscriptions" } td { (stats.active_subscriptions) } }
                    tr { th { "Pending requests" } td { (stats.pending_requests) } }
                    tr { th { "Flights" } td { (stats.flights) } }
                    tr { th { "Open tickets" } td { (stats.open_tickets) } }
                    tr { th { "Escalated tickets" } td { (stats.escalated_tickets) } }
                }
                h2 { "Pending subscription requests" }
                @if pending.is_empty() {
                    p { "Nothing awaits a review." }
                } @else {
                    table {
                        thead {
                            tr {
                                th { "Airport" }
                                th { "Code" }
                                th { "Contact" }
                                th { "Plan" }
                                th { "Submitted" }
                                th { "Review" }
                            }
                        }
                        tbody {
                            @for request in pending {
                                tr {
                                    td { (request.airport.name) }
                                    td { (request.airport.code) }
                                    td { (request.contact_email) }
                                    td { (plan_label(request.plan)) }
                                    td { (format_timestamp(request.created_at)) }
                                    td {
                                        form class="inline" action=(format!("/dashboard/requests/{}/approve", request.id)) method="POST" {
                                            input type="submit" value="approve";
                                        }
                                        form class="inline" action=(format!("/dashboard/requests/{}/reject", request.id)) method="POST" {
                                            input type="text" name="reason" placeholder="reason";
                                            input type="submit" value="reject";
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn dashboard_airport(
    email: &str,
    flash: Option<FlashMessage>,
    airport: &Airport,
    is_admin: bool,
    stats: &usecases::AirportStats,
    flights: &[Flight],
    tickets: &[Ticket],
) -> Markup {
    page(
        &format!("{} Dashboard", airport.code),
        Some(email),
        flash,
        html! {
            main class="dashboard" {
                h1 { (airport.name) }
                table class="stats" {
                    tr { th { "Employees" } td { (stats.employees) } }
                    tr { th { "Flights" } td { (stats.flights) } }
                    tr { th { "Open tickets" } td { (stats.open_tickets) } }
                    @if let Some(subscription) = &stats.subscription {
                        tr {
                            th { "Subscription" }
                            td {
                                (plan_label(subscription.plan))
                                " until "
                                (format_timestamp(subscription.expire_at))
                            }
                        }
                    }
                }
                @if is_admin {
                    nav class="admin" {
                        a href="/dashboard/employees" { "manage employees" }
                    }
                }
                h2 { "Flights" }
                @if flights.is_empty() {
                    p { "No flights are on record." }
                } @else {
                    table {
                        thead {
                            tr {
                                th { "Flight" }
                                th { "Departure" }
                                th { "Status" }
                            }
                        }
                        tbody {
                            @for flight in flights {
                                tr {
                                    td { (flight.flight_number) }
                                    td { (format_timestamp(flight.scheduled_departure)) }
                                    td { (flight.status) }
                                }
                            }
                        }
                    }
                }
                h2 { "Tickets" }
                @if tickets.is_empty() {
                    p { "No tickets." }
                } @else {
                    table {
                        thead {
                            tr {
                                th { "Title" }
                                th { "Category" }
                                th { "Priority" }
                                th { "Status" }
                                th { "Updated" }
                            }
                        }
                        tbody {
                            @for ticket in tickets {
                                tr {
                                    td { (ticket.title) }
                                    td { (ticket.category) }
                                    td { (ticket.priority) }
                                    td { (ticket.status) }
                                    td { (format_timestamp(ticket.updated_at)) }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn employees(
    email: &str,
    flash: Option<FlashMessage>,
    employees: &[User],
) -> Markup {
    page(
        "Employees",
        Some(email),
        flash,
        html! {
            main {
                h1 { "Employees" }
                table {
                    thead {
                        tr {
                            th { "Email" }
                            th { "Role" }
                            th { "Since" }
                            th {}
                        }
                    }
                    tbody {
                        @for employee in employees {
                            tr {
                                td { (employee.email) }
                                td { (format!("{:?}", employee.role)) }
                                td { (format_timestamp(employee.created_at)) }
                                td {
                                    @if employee.email.as_str() != email {
                                        form class="inline" action=(format!("/dashboard/employees/{}/delete", employee.id)) method="POST" {
                                            input type="submit" value="remove";
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                h2 { "Add an employee" }
                form action="/dashboard/employees" method="POST" {
                    label { "Email" input type="email" name="email" required; }
                    label { "Password (generated when empty)"
                        input type="password" name="password";
                    }
                    label { "Role"
                        select name="role" required {
                            option value="1" { "Operator" }
                            option value="2" { "AirportAdmin" }
                        }
                    }
                    input class="btn" type="submit" value="add";
                }
            }
        },
    )
}

use askama::Template;
use rassid_core::gateways::notify::IssuedCredentials;
use rassid_entities::{
    airport::*, contact::*, email::*, request::*, subscription::*, ticket::*, time::*,
};
use time::{format_description::FormatItem, macros::format_description, OffsetDateTime};

mod passenger_email_formatter;
pub use passenger_email_formatter::*;

const DATE_TIME_FORMAT: &[FormatItem] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

const TIME_FORMAT: &[FormatItem] = format_description!("[hour]:[minute]");

fn format_date_time(at: Timestamp) -> String {
    OffsetDateTime::try_from(at)
        .ok()
        .and_then(|dt| dt.format(DATE_TIME_FORMAT).ok())
        .unwrap_or_else(|| at.to_string())
}

fn format_time_of_day(at: Timestamp) -> String {
    OffsetDateTime::try_from(at)
        .ok()
        .and_then(|dt| dt.format(TIME_FORMAT).ok())
        .unwrap_or_else(|| at.to_string())
}

fn format_usd(cents: i64) -> String {
    format!("{}.{:02} USD", cents / 100, cents % 100)
}

fn plan_label(plan: SubscriptionPlan) -> &'static str {
    match plan {
        SubscriptionPlan::OneYear => "1 year",
        SubscriptionPlan::ThreeYears => "3 years",
        SubscriptionPlan::FiveYears => "5 years",
    }
}

fn subject_request_received(airport_name: &str) -> String {
    format!("Rassid - new subscription request: {}", airport_name)
}

fn subject_ticket_escalated(ticket_title: &str) -> String {
    format!("Rassid - ticket escalated: {}", ticket_title)
}

fn subject_contact_message(message_subject: &str) -> String {
    format!("Rassid - new contact message: {}", message_subject)
}

#[derive(Template)]
#[template(path = "email_request_received/body_EN.txt")]
struct RequestReceivedBodyTemplate<'a> {
    airport_name: &'a str,
    airport_code: &'a str,
    city: &'a str,
    country: &'a str,
    contact_email: &'a str,
    contact_phone: &'a str,
    plan: &'a str,
    id: &'a str,
}

pub fn request_received_email(request: &SubscriptionRequest) -> EmailContent {
    let subject = subject_request_received(&request.airport.name);
    let body = RequestReceivedBodyTemplate {
        airport_name: &request.airport.name,
        airport_code: request.airport.code.as_str(),
        city: &request.airport.city,
        country: &request.airport.country,
        contact_email: request.contact_email.as_str(),
        contact_phone: &request.contact_phone,
        plan: plan_label(request.plan),
        id: request.id.as_str(),
    }
    .render()
    .unwrap();
    EmailContent { subject, body }
}

#[derive(Template)]
#[template(path = "email_checkout/body_EN.txt")]
struct CheckoutBodyTemplate<'a> {
    airport_name: &'a str,
    plan: &'a str,
    amount: &'a str,
    checkout_url: &'a str,
}

pub fn checkout_email(request: &SubscriptionRequest, checkout_url: &str) -> EmailContent {
    let subject = "Rassid - complete your subscription payment".to_owned();
    let amount = &format_usd(request.plan.price_usd_cents());
    let body = CheckoutBodyTemplate {
        airport_name: &request.airport.name,
        plan: plan_label(request.plan),
        amount,
        checkout_url,
    }
    .render()
    .unwrap();
    EmailContent { subject, body }
}

#[derive(Template)]
#[template(path = "email_subscription_activated/body_EN.txt")]
struct SubscriptionActivatedBodyTemplate<'a> {
    airport_name: &'a str,
    plan: &'a str,
    expires: &'a str,
    max_employees: u32,
    credentials: Option<&'a IssuedCredentials>,
}

pub fn subscription_activated_email(
    request: &SubscriptionRequest,
    subscription: &AirportSubscription,
    credentials: Option<&IssuedCredentials>,
) -> EmailContent {
    let subject = "Rassid - your subscription is active".to_owned();
    let expires = &format_date_time(subscription.expire_at);
    let body = SubscriptionActivatedBodyTemplate {
        airport_name: &request.airport.name,
        plan: plan_label(subscription.plan),
        expires,
        max_employees: subscription.max_employees,
        credentials,
    }
    .render()
    .unwrap();
    EmailContent { subject, body }
}

#[derive(Template)]
#[template(path = "email_subscription_rejected/body_EN.txt")]
struct SubscriptionRejectedBodyTemplate<'a> {
    airport_name: &'a str,
    reason: &'a str,
}

pub fn subscription_rejected_email(request: &SubscriptionRequest, reason: &str) -> EmailContent {
    let subject = "Rassid - your subscription request was rejected".to_owned();
    let body = SubscriptionRejectedBodyTemplate {
        airport_name: &request.airport.name,
        reason,
    }
    .render()
    .unwrap();
    EmailContent { subject, body }
}

#[derive(Template)]
#[template(path = "email_employee_invited/body_EN.txt")]
struct EmployeeInvitedBodyTemplate<'a> {
    airport_name: &'a str,
    email: &'a str,
    password: &'a str,
}

pub fn employee_invited_email(airport: &Airport, credentials: &IssuedCredentials) -> EmailContent {
    let subject = "Rassid - your staff account".to_owned();
    let body = EmployeeInvitedBodyTemplate {
        airport_name: &airport.name,
        email: credentials.email.as_str(),
        password: &credentials.password,
    }
    .render()
    .unwrap();
    EmailContent { subject, body }
}

#[derive(Template)]
#[template(path = "email_ticket_escalated/body_EN.txt")]
struct TicketEscalatedBodyTemplate<'a> {
    title: &'a str,
    airport_name: &'a str,
    category: &'a str,
    priority: &'a str,
    description: &'a str,
    id: &'a str,
}

pub fn ticket_escalated_email(ticket: &Ticket, airport: &Airport) -> EmailContent {
    let subject = subject_ticket_escalated(&ticket.title);
    let category = &ticket.category.to_string();
    let priority = &ticket.priority.to_string();
    let body = TicketEscalatedBodyTemplate {
        title: &ticket.title,
        airport_name: &airport.name,
        category,
        priority,
        description: &ticket.description,
        id: ticket.id.as_str(),
    }
    .render()
    .unwrap();
    EmailContent { subject, body }
}

#[derive(Template)]
#[template(path = "email_contact_message/body_EN.txt")]
struct ContactMessageBodyTemplate<'a> {
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
}

pub fn contact_message_email(message: &ContactMessage) -> EmailContent {
    let subject = subject_contact_message(&message.subject);
    let body = ContactMessageBodyTemplate {
        first_name: &message.first_name,
        last_name: &message.last_name,
        email: message.email.as_str(),
        subject: &message.subject,
        message: &message.message,
    }
    .render()
    .unwrap();
    EmailContent { subject, body }
}

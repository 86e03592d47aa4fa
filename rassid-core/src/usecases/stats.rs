use super::prelude::*;
use crate::usecases;

/// Headline numbers for the platform dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlatformStats {
    pub airports: usize,
    pub active_subscriptions: usize,
    pub pending_requests: usize,
    pub flights: usize,
    pub open_tickets: usize,
    pub escalated_tickets: usize,
}

pub fn platform_stats<R>(repo: &R, admin: &User) -> Result<PlatformStats>
where
    R: AirportRepo + SubscriptionRepo + SubscriptionRequestRepo + FlightRepo + TicketRepo,
{
    usecases::authorize_role(admin, Role::PlatformAdmin)?;
    let now = Timestamp::now();
    let active_subscriptions = repo
        .all_subscriptions()?
        .iter()
        .filter(|subscription| subscription.is_active(now))
        .count();
    let pending_requests = repo
        .subscription_requests_by_status(RequestStatus::Pending)?
        .len();
    let mut open_tickets = 0;
    let mut escalated_tickets = 0;
    for ticket in repo.all_tickets()? {
        match ticket.status {
            TicketStatus::Open => open_tickets += 1,
            TicketStatus::Escalated => escalated_tickets += 1,
            TicketStatus::Closed | TicketStatus::Rejected => (),
        }
    }
    Ok(PlatformStats {
        airports: repo.count_airports()?,
        active_subscriptions,
        pending_requests,
        flights: repo.count_flights()?,
        open_tickets,
        escalated_tickets,
    })
}

/// Headline numbers for one airport's dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct AirportStats {
    pub employees: usize,
    pub flights: usize,
    pub open_tickets: usize,
    /// The latest subscription of the airport, expired or not.
    pub subscription: Option<AirportSubscription>,
}

pub fn airport_stats<R>(repo: &R, user: &User, airport_id: &Id) -> Result<AirportStats>
where
    R: UserRepo + SubscriptionRepo + FlightRepo + TicketRepo,
{
    usecases::authorize_role(user, Role::Operator)?;
    usecases::authorize_airport_member(user, airport_id)?;
    let open_tickets = repo
        .tickets_of_airport(airport_id)?
        .iter()
        .filter(|ticket| !ticket.status.is_closed())
        .count();
    Ok(AirportStats {
        employees: repo.count_users_by_airport(airport_id)?,
        flights: repo.flights_of_airport(airport_id)?.len(),
        open_tickets,
        subscription: repo.try_get_subscription_by_airport(airport_id)?,
    })
}

use time::Duration;

use crate::{id::Id, time::Timestamp};

/// Licensing periods offered to airports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString, strum::EnumIter)]
pub enum SubscriptionPlan {
    #[strum(serialize = "1_year")]
    OneYear,
    #[strum(serialize = "3_years")]
    ThreeYears,
    #[strum(serialize = "5_years")]
    FiveYears,
}

impl SubscriptionPlan {
    pub const fn validity(self) -> Duration {
        match self {
            Self::OneYear => Duration::days(365),
            Self::ThreeYears => Duration::days(1095),
            Self::FiveYears => Duration::days(1825),
        }
    }

    /// Flat license fee in USD cents.
    pub const fn price_usd_cents(self) -> i64 {
        match self {
            Self::OneYear => 500_000,
            Self::ThreeYears => 1_350_000,
            Self::FiveYears => 2_000_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Suspended,
}

pub const DEFAULT_MAX_EMPLOYEES: u32 = 10;

/// One licensing period of an airport. Renewals extend `expire_at`
/// in place, plan changes replace `plan`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirportSubscription {
    pub id: Id,
    pub airport_id: Id,
    pub plan: SubscriptionPlan,
    pub start_at: Timestamp,
    pub expire_at: Timestamp,
    pub max_employees: u32,
    pub status: SubscriptionStatus,
}

impl AirportSubscription {
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expire_at <= now
    }

    pub fn is_active(&self, now: Timestamp) -> bool {
        self.status == SubscriptionStatus::Active && !self.is_expired(now)
    }
}

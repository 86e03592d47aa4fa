use thiserror::Error;

use crate::{id::Id, time::Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
pub enum TicketCategory {
    #[strum(serialize = "API")]
    Api,
    #[strum(serialize = "SMS")]
    Sms,
    System,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
pub enum TicketPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
pub enum TicketStatus {
    Open,
    Escalated,
    Closed,
    Rejected,
}

#[derive(Debug, Error)]
#[error("Illegal ticket transition: {from} -> {to}")]
pub struct InvalidTicketTransition {
    pub from: TicketStatus,
    pub to: TicketStatus,
}

impl TicketStatus {
    pub fn is_closed(self) -> bool {
        matches!(self, Self::Closed | Self::Rejected)
    }

    /// `Open -> Escalated -> Closed`, rejection from any non-closed
    /// state, and an explicit reopen from `Rejected`.
    pub fn transition_to(self, to: Self) -> Result<Self, InvalidTicketTransition> {
        use TicketStatus::*;
        let legal = matches!(
            (self, to),
            (Open, Escalated)
                | (Open, Rejected)
                | (Escalated, Closed)
                | (Escalated, Rejected)
                | (Rejected, Open)
        );
        if legal {
            Ok(to)
        } else {
            Err(InvalidTicketTransition { from: self, to })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub id: Id,
    pub airport_id: Id,
    pub created_by: Id,
    pub assigned_to: Option<Id>,
    pub title: String,
    pub description: String,
    pub category: TicketCategory,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketComment {
    pub id: Id,
    pub ticket_id: Id,
    pub author_id: Id,
    pub body: String,
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escalation_path() {
        use TicketStatus::*;
        assert_eq!(Open.transition_to(Escalated).unwrap(), Escalated);
        assert_eq!(Escalated.transition_to(Closed).unwrap(), Closed);
        assert_eq!(Open.transition_to(Rejected).unwrap(), Rejected);
        assert_eq!(Escalated.transition_to(Rejected).unwrap(), Rejected);
    }

    #[test]
    fn closed_is_terminal_reject_can_reopen() {
        use TicketStatus::*;
        for to in [Open, Escalated, Closed, Rejected] {
            assert!(Closed.transition_to(to).is_err());
        }
        assert_eq!(Rejected.transition_to(Open).unwrap(), Open);
        assert!(Open.transition_to(Closed).is_err());
    }

    #[test]
    fn category_labels_match_wire_values() {
        assert_eq!(TicketCategory::Api.to_string(), "API");
        assert_eq!("SMS".parse::<TicketCategory>().unwrap(), TicketCategory::Sms);
        assert_eq!(TicketCategory::System.to_string(), "System");
        assert_eq!(TicketPriority::Medium.to_string(), "Medium");
    }
}

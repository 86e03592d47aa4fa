use crate::{email::EmailAddress, id::Id, time::Timestamp};

/// Message submitted through the public contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub id: Id,
    pub first_name: String,
    pub last_name: String,
    pub email: EmailAddress,
    pub subject: String,
    pub message: String,
    pub resolved: bool,
    pub created_at: Timestamp,
}

use crate::entities::*;
use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct EmailSendError(#[from] anyhow::Error);

pub trait EmailGateway {
    // TODO: Make this async
    fn compose_and_send(
        &self,
        recipients: &[EmailAddress],
        email: &EmailContent,
    ) -> Result<(), EmailSendError>;
}

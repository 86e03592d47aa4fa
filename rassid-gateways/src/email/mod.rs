pub use rassid_core::gateways::email::{EmailGateway, EmailSendError};

mod mailgun;
mod send_to_json_file;
mod sendmail;

pub use self::{mailgun::Mailgun, send_to_json_file::SendToJsonFile, sendmail::Sendmail};

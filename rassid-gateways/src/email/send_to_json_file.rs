use std::{io, path::Path};

use jfs::Store;
use serde::{Deserialize, Serialize};

use rassid_entities::{email::*, time::Timestamp};

use super::{EmailGateway, EmailSendError};

/// A dummy email gateway for local development: every message is
/// written into a JSON file instead of being delivered.
pub struct SendToJsonFile {
    json_store: Store,
}

impl SendToJsonFile {
    pub fn try_new<P: AsRef<Path>>(directory: P) -> io::Result<Self> {
        let json_store = Store::new(directory)?;
        Ok(Self { json_store })
    }

    pub fn path(&self) -> &Path {
        self.json_store.path()
    }
}

#[derive(Debug, Deserialize, Serialize)]
struct JsonEmail {
    to: String,
    subject: String,
    body: String,
}

impl JsonEmail {
    fn new(to: &EmailAddress, content: &EmailContent) -> Self {
        let subject = content.subject.to_owned();
        let body = content.body.to_owned();
        let to = to.as_str().to_owned();
        Self { to, subject, body }
    }
}

impl EmailGateway for SendToJsonFile {
    fn compose_and_send(
        &self,
        recipients: &[EmailAddress],
        content: &EmailContent,
    ) -> Result<(), EmailSendError> {
        for to in recipients {
            let now = Timestamp::now().as_secs();
            let key = format!("{now}-{to}");
            let email = JsonEmail::new(to, content);
            if let Err(err) = self.json_store.save_with_id(&email, &key) {
                log::warn!("Unable to save email in JSON file: {err}");
            }
        }
        Ok(())
    }
}

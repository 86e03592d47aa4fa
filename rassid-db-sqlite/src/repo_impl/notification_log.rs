use super::*;

impl<'a> NotificationLogRepo for DbReadOnly<'a> {
    fn save_sent_notification(
        &self,
        _booking_id: &Id,
        _event_key: &str,
        _sent_at: Timestamp,
    ) -> Result<()> {
        unreachable!();
    }
    fn find_sent_notification(
        &self,
        booking_id: &Id,
        event_key: &str,
    ) -> Result<Option<Timestamp>> {
        find_sent_notification(&mut self.conn.borrow_mut(), booking_id, event_key)
    }

    fn log_email(&self, _entry: &EmailLogEntry) -> Result<()> {
        unreachable!();
    }
    fn all_email_log_entries(&self) -> Result<Vec<EmailLogEntry>> {
        all_email_log_entries(&mut self.conn.borrow_mut())
    }
}

impl<'a> NotificationLogRepo for DbReadWrite<'a> {
    fn save_sent_notification(
        &self,
        booking_id: &Id,
        event_key: &str,
        sent_at: Timestamp,
    ) -> Result<()> {
        save_sent_notification(&mut self.conn.borrow_mut(), booking_id, event_key, sent_at)
    }
    fn find_sent_notification(
        &self,
        booking_id: &Id,
        event_key: &str,
    ) -> Result<Option<Timestamp>> {
        find_sent_notification(&mut self.conn.borrow_mut(), booking_id, event_key)
    }

    fn log_email(&self, entry: &EmailLogEntry) -> Result<()> {
        log_email(&mut self.conn.borrow_mut(), entry)
    }
    fn all_email_log_entries(&self) -> Result<Vec<EmailLogEntry>> {
        all_email_log_entries(&mut self.conn.borrow_mut())
    }
}

impl<'a> NotificationLogRepo for DbConnection<'a> {
    fn save_sent_notification(
        &self,
        booking_id: &Id,
        event_key: &str,
        sent_at: Timestamp,
    ) -> Result<()> {
        save_sent_notification(&mut self.conn.borrow_mut(), booking_id, event_key, sent_at)
    }
    fn find_sent_notification(
        &self,
        booking_id: &Id,
        event_key: &str,
    ) -> Result<Option<Timestamp>> {
        find_sent_notification(&mut self.conn.borrow_mut(), booking_id, event_key)
    }

    fn log_email(&self, entry: &EmailLogEntry) -> Result<()> {
        log_email(&mut self.conn.borrow_mut(), entry)
    }
    fn all_email_log_entries(&self) -> Result<Vec<EmailLogEntry>> {
        all_email_log_entries(&mut self.conn.borrow_mut())
    }
}

fn save_sent_notification(
    conn: &mut SqliteConnection,
    booking_id: &Id,
    event_key: &str,
    sent_at: Timestamp,
) -> Result<()> {
    let insertable = models::NewSentNotification {
        booking_id: booking_id.as_str(),
        event_key,
        sent_at: sent_at.as_secs(),
    };
    // Replays of already delivered events must not fail.
    diesel::insert_or_ignore_into(schema::sent_notifications::table)
        .values(&insertable)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn find_sent_notification(
    conn: &mut SqliteConnection,
    booking_id: &Id,
    event_key: &str,
) -> Result<Option<Timestamp>> {
    use schema::sent_notifications::dsl;
    Ok(dsl::sent_notifications
        .filter(dsl::booking_id.eq(booking_id.as_str()))
        .filter(dsl::event_key.eq(event_key))
        .first::<models::SentNotificationEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(|entity| Timestamp::from_secs(entity.sent_at)))
}

fn load_email_log_entry(entity: models::EmailLogEntryEntity) -> Result<EmailLogEntry> {
    let models::EmailLogEntryEntity {
        id,
        recipient,
        subject,
        status,
        error,
        created_at,
    } = entity;
    Ok(EmailLogEntry {
        id: id.into(),
        recipient: EmailAddress::new_unchecked(recipient),
        subject,
        status: parse_stored(&status, "delivery status")?,
        error,
        created_at: Timestamp::from_secs(created_at),
    })
}

fn log_email(conn: &mut SqliteConnection, entry: &EmailLogEntry) -> Result<()> {
    let new_entry = models::NewEmailLogEntry::from(entry);
    diesel::insert_into(schema::email_log::table)
        .values(&new_entry)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn all_email_log_entries(conn: &mut SqliteConnection) -> Result<Vec<EmailLogEntry>> {
    use schema::email_log::dsl;
    dsl::email_log
        .order_by(dsl::created_at.asc())
        .load::<models::EmailLogEntryEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(load_email_log_entry)
        .collect()
}

use super::prelude::*;
use crate::{usecases, util::validate};

#[derive(Debug, Clone)]
pub struct NewContactMessage {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

pub fn submit_contact_message<R>(repo: &R, new: NewContactMessage) -> Result<ContactMessage>
where
    R: ContactMessageRepo,
{
    let NewContactMessage {
        first_name,
        last_name,
        email,
        subject,
        message,
    } = new;
    if !validate::is_valid_email(&email) {
        return Err(Error::EmailAddress);
    }
    let email = email.parse::<EmailAddress>()?;
    if subject.trim().is_empty() || message.trim().is_empty() {
        return Err(Error::Title);
    }
    let contact_message = ContactMessage {
        id: Id::new(),
        first_name: first_name.trim().to_owned(),
        last_name: last_name.trim().to_owned(),
        email,
        subject: subject.trim().to_owned(),
        message,
        resolved: false,
        created_at: Timestamp::now(),
    };
    repo.create_contact_message(&contact_message)?;
    Ok(contact_message)
}

pub fn resolve_contact_message<R>(repo: &R, admin: &User, id: &Id) -> Result<ContactMessage>
where
    R: ContactMessageRepo,
{
    usecases::authorize_role(admin, Role::PlatformAdmin)?;
    let mut message = repo.get_contact_message(id)?;
    message.resolved = true;
    repo.update_contact_message(&message)?;
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::tests::*;

    #[test]
    fn submit_and_resolve() {
        let db = MockDb::default();
        let new = NewContactMessage {
            first_name: "Nora".into(),
            last_name: "Alqahtani".into(),
            email: "nora@mail.sa".into(),
            subject: "Pricing question".into(),
            message: "Is there a trial period?".into(),
        };
        let message = submit_contact_message(&db, new).unwrap();
        assert!(!message.resolved);

        let admin = stored_user(&db, Role::PlatformAdmin, None, "root@rassid.sa", "secret1");
        let resolved = resolve_contact_message(&db, &admin, &message.id).unwrap();
        assert!(resolved.resolved);
    }

    #[test]
    fn empty_subjects_are_rejected() {
        let db = MockDb::default();
        let new = NewContactMessage {
            first_name: "Nora".into(),
            last_name: "Alqahtani".into(),
            email: "nora@mail.sa".into(),
            subject: " ".into(),
            message: "hello".into(),
        };
        assert!(matches!(
            submit_contact_message(&db, new),
            Err(Error::Title)
        ));
    }
}

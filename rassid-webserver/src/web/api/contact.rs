use super::*;

#[post("/contact", format = "application/json", data = "<new>")]
pub fn post_contact_message(
    db: sqlite::Connections,
    notify: &State<Notify>,
    new: JsonResult<json::NewContactMessage>,
) -> Result<json::ContactMessage> {
    let new = from_json::new_contact_message(new?.into_inner());
    let message = flows::submit_contact_message(&db, &*notify.0, new)?;
    Ok(Json(message.into()))
}

#[get("/contact", format = "application/json")]
pub fn get_contact_messages(
    db: sqlite::Connections,
    auth: Auth,
) -> Result<Vec<json::ContactMessage>> {
    let db = db.shared()?;
    auth.user_with_min_role(&db, Role::PlatformAdmin)?;
    let messages = db.all_contact_messages()?;
    Ok(Json(messages.into_iter().map(Into::into).collect()))
}

#[post("/contact/<id>/resolve", format = "application/json")]
pub fn post_resolve_contact_message(
    db: sqlite::Connections,
    auth: Auth,
    id: &str,
) -> Result<json::ContactMessage> {
    let admin = auth.user_with_min_role(&db.shared()?, Role::PlatformAdmin)?;
    let message = flows::resolve_contact_message(&db, &admin, &Id::from(id))?;
    Ok(Json(message.into()))
}

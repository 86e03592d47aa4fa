use super::*;

#[get("/tickets", format = "application/json")]
pub fn get_tickets(db: sqlite::Connections, auth: Auth) -> Result<Vec<json::Ticket>> {
    let db = db.shared()?;
    let actor = auth.user_with_min_role(&db, Role::Operator)?;
    let tickets = usecases::query_tickets(&db, &actor)?;
    Ok(Json(tickets.into_iter().map(Into::into).collect()))
}

#[post("/tickets", format = "application/json", data = "<new>")]
pub fn post_ticket(
    db: sqlite::Connections,
    auth: Auth,
    new: JsonResult<json::NewTicket>,
) -> Result<json::Ticket> {
    let creator = auth.user_with_min_role(&db.shared()?, Role::Operator)?;
    let new = from_json::new_ticket(new?.into_inner());
    let ticket = flows::create_ticket(&db, &creator, new)?;
    Ok(Json(ticket.into()))
}

#[get("/tickets/<id>", format = "application/json")]
pub fn get_ticket(db: sqlite::Connections, auth: Auth, id: &str) -> Result<json::Ticket> {
    let db = db.shared()?;
    let actor = auth.user_with_min_role(&db, Role::Operator)?;
    let ticket = usecases::get_visible_ticket(&db, &actor, &Id::from(id))?;
    Ok(Json(ticket.into()))
}

#[get("/tickets/<id>/comments", format = "application/json")]
pub fn get_ticket_comments(
    db: sqlite::Connections,
    auth: Auth,
    id: &str,
) -> Result<Vec<json::TicketComment>> {
    let db = db.shared()?;
    let actor = auth.user_with_min_role(&db, Role::Operator)?;
    let (_, comments) = usecases::get_ticket_with_comments(&db, &actor, &Id::from(id))?;
    Ok(Json(comments.into_iter().map(Into::into).collect()))
}

#[post("/tickets/<id>/comments", format = "application/json", data = "<data>")]
pub fn post_ticket_comment(
    db: sqlite::Connections,
    auth: Auth,
    id: &str,
    data: JsonResult<json::NewTicketComment>,
) -> Result<json::TicketComment> {
    let author = auth.user_with_min_role(&db.shared()?, Role::Operator)?;
    let body = data?.into_inner().body;
    let comment = flows::comment_ticket(&db, &author, &Id::from(id), body)?;
    Ok(Json(comment.into()))
}

#[post("/tickets/<id>/escalate", format = "application/json")]
pub fn post_escalate_ticket(
    db: sqlite::Connections,
    notify: &State<Notify>,
    auth: Auth,
    id: &str,
) -> Result<json::Ticket> {
    let actor = auth.user_with_min_role(&db.shared()?, Role::AirportAdmin)?;
    let ticket = flows::escalate_ticket(&db, &*notify.0, &actor, &Id::from(id))?;
    Ok(Json(ticket.into()))
}

#[post("/tickets/<id>/close", format = "application/json")]
pub fn post_close_ticket(db: sqlite::Connections, auth: Auth, id: &str) -> Result<json::Ticket> {
    let actor = auth.user_with_min_role(&db.shared()?, Role::Operator)?;
    let ticket = flows::close_ticket(&db, &actor, &Id::from(id))?;
    Ok(Json(ticket.into()))
}

#[post("/tickets/<id>/reject", format = "application/json")]
pub fn post_reject_ticket(db: sqlite::Connections, auth: Auth, id: &str) -> Result<json::Ticket> {
    let actor = auth.user_with_min_role(&db.shared()?, Role::AirportAdmin)?;
    let ticket = flows::reject_ticket(&db, &actor, &Id::from(id))?;
    Ok(Json(ticket.into()))
}

#[post("/tickets/<id>/reopen", format = "application/json")]
pub fn post_reopen_ticket(db: sqlite::Connections, auth: Auth, id: &str) -> Result<json::Ticket> {
    let actor = auth.user_with_min_role(&db.shared()?, Role::Operator)?;
    let ticket = flows::reopen_ticket(&db, &actor, &Id::from(id))?;
    Ok(Json(ticket.into()))
}

use super::*;

#[get("/employees", format = "application/json")]
pub fn get_employees(db: sqlite::Connections, auth: Auth) -> Result<Vec<json::User>> {
    let db = db.shared()?;
    let admin = auth.user_with_min_role(&db, Role::AirportAdmin)?;
    let airport_id = admin
        .airport_id
        .clone()
        .ok_or(ParameterError::Forbidden)?;
    let employees = usecases::list_employees(&db, &admin, &airport_id)?;
    Ok(Json(employees.into_iter().map(Into::into).collect()))
}

#[post("/employees", format = "application/json", data = "<new>")]
pub fn post_employee(
    db: sqlite::Connections,
    notify: &State<Notify>,
    auth: Auth,
    new: JsonResult<json::NewEmployee>,
) -> Result<json::User> {
    let admin = auth.user_with_min_role(&db.shared()?, Role::AirportAdmin)?;
    let new = from_json::new_employee(new?.into_inner());
    let employee = flows::add_employee(&db, &*notify.0, &admin, new)?;
    Ok(Json(employee.into()))
}

#[put("/employees/<id>", format = "application/json", data = "<update>")]
pub fn put_employee(
    db: sqlite::Connections,
    auth: Auth,
    id: &str,
    update: JsonResult<json::UpdateEmployee>,
) -> Result<json::User> {
    let admin = auth.user_with_min_role(&db.shared()?, Role::AirportAdmin)?;
    let update = from_json::employee_update(update?.into_inner());
    let employee = flows::update_employee(&db, &admin, &Id::from(id), update)?;
    Ok(Json(employee.into()))
}

#[delete("/employees/<id>", format = "application/json")]
pub fn delete_employee(db: sqlite::Connections, auth: Auth, id: &str) -> StatusResult {
    let admin = auth.user_with_min_role(&db.shared()?, Role::AirportAdmin)?;
    flows::delete_employee(&db, &admin, &Id::from(id))?;
    Ok(Status::NoContent)
}

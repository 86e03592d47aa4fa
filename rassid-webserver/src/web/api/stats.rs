use super::*;

#[get("/stats/platform", format = "application/json")]
pub fn get_platform_stats(db: sqlite::Connections, auth: Auth) -> Result<json::PlatformStats> {
    let db = db.shared()?;
    let admin = auth.user_with_min_role(&db, Role::PlatformAdmin)?;
    let stats = usecases::platform_stats(&db, &admin)?;
    Ok(Json(to_json::platform_stats(stats)))
}

#[get("/airports/<id>/stats", format = "application/json")]
pub fn get_airport_stats(
    db: sqlite::Connections,
    auth: Auth,
    id: &str,
) -> Result<json::AirportStats> {
    let db = db.shared()?;
    let user = auth.user_with_min_role(&db, Role::Operator)?;
    let stats = usecases::airport_stats(&db, &user, &Id::from(id))?;
    Ok(Json(to_json::airport_stats(stats)))
}

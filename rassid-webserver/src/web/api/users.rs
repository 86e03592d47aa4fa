use super::*;

#[post("/login", format = "application/json", data = "<login>")]
pub fn post_login(
    db: sqlite::Connections,
    cookies: &CookieJar<'_>,
    login: JsonResult<json::Credentials>,
) -> Result<json::User> {
    let login = login?.into_inner();
    let user =
        usecases::login_with_email_and_password(&db.shared()?, &login.email, &login.password)
            .map_err(|err| {
                debug!("Login with email '{}' failed: {}", login.email, err);
                err
            })?;
    cookies.add_private(
        Cookie::build((COOKIE_EMAIL_KEY, login.email))
            .http_only(true)
            .same_site(SameSite::Lax),
    );
    Ok(Json(user.into()))
}

#[post("/logout", format = "application/json")]
pub fn post_logout(cookies: &CookieJar<'_>) -> Json<()> {
    cookies.remove_private(COOKIE_EMAIL_KEY);
    Json(())
}

#[get("/users/current", format = "application/json")]
pub fn get_current_user(db: sqlite::Connections, account: Account) -> Result<json::User> {
    let db = db.shared()?;
    let email = account.email().parse::<EmailAddress>()?;
    let user = db.get_user_by_email(&email)?;
    Ok(Json(user.into()))
}

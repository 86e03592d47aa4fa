use maud::Markup;
use rocket::{
    self,
    form::Form,
    get,
    http::{Cookie, CookieJar, SameSite},
    post,
    request::FlashMessage,
    response::{Flash, Redirect},
    FromForm,
};

use super::{super::guards::*, view};
use crate::web::sqlite::Connections;
use rassid_core::usecases;

#[derive(FromForm)]
pub struct LoginCredentials<'r> {
    pub(crate) email: &'r str,
    pub(crate) password: &'r str,
}

#[allow(clippy::result_large_err)]
#[get("/login")]
pub fn get_login(
    account: Option<Account>,
    flash: Option<FlashMessage>,
) -> std::result::Result<Markup, Redirect> {
    if account.is_some() {
        Err(Redirect::to("/dashboard"))
    } else {
        Ok(view::login(flash))
    }
}

#[allow(clippy::result_large_err)]
#[post("/login", data = "<credentials>")]
pub fn post_login(
    db: Connections,
    credentials: Form<LoginCredentials>,
    cookies: &CookieJar<'_>,
) -> std::result::Result<Redirect, Flash<Redirect>> {
    let Ok(db) = db.shared() else {
        return Err(Flash::error(
            Redirect::to("/login"),
            "We are so sorry! An internal server error has occurred. Please try again later.",
        ));
    };
    match usecases::login_with_email_and_password(&db, credentials.email, credentials.password) {
        Err(_) => Err(Flash::error(
            Redirect::to("/login"),
            "Invalid email or password.",
        )),
        Ok(user) => {
            cookies.add_private(
                Cookie::build((COOKIE_EMAIL_KEY, user.email.to_string()))
                    .http_only(true)
                    .same_site(SameSite::Lax),
            );
            Ok(Redirect::to("/dashboard"))
        }
    }
}

#[post("/logout")]
pub fn post_logout(cookies: &CookieJar<'_>) -> Flash<Redirect> {
    cookies.remove_private(COOKIE_EMAIL_KEY);
    Flash::success(Redirect::to("/"), "You have successfully logged out.")
}

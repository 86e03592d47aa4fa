use maud::{html, Markup, DOCTYPE};
use rocket::request::FlashMessage;

const MAIN_CSS_URL: &str = "/main.css";

pub fn page(
    title: &str,
    email: Option<&str>,
    flash: Option<FlashMessage>,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        head {
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1, shrink-to-fit=no";
            title {(title)}
            link rel="stylesheet" href=(MAIN_CSS_URL);
        }
        body {
            (flash_msg(flash))
            (header(email))
            (content)
        }
    }
}

fn flash_msg(flash: Option<FlashMessage>) -> Markup {
    html! {
        @if let Some(msg) = flash {
            div class=(format!("flash {}", msg.kind())) {
                (msg.message())
            }
        }
    }
}

fn header(email: Option<&str>) -> Markup {
    html! {
    header {
        a class="brand" href="/" { "Rassid" }
        @if let Some(email) = email {
            div class="msg" { "You are logged in as " span class="email" { (email) } }
            nav {
                a href="/" { "departures" }
                a href="/dashboard" { "dashboard" }
                form class="logout" action="/logout" method="POST" {
                    input type="submit" value="logout";
                }
            }
        }
        @ else {
            nav {
                a href="/" { "departures" }
                a href="/pricing" { "pricing" }
                a href="/subscribe" { "subscribe" }
                a href="/contact" { "contact" }
                a href="/login" { "login" }
            }
        }
    }
    }
}

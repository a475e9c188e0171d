use rocket::form::Form;
use rocket::http::{Cookie, CookieJar};
use rocket::response::Redirect;
use rocket::serde::json::Json;
use rocket::State;

use crate::guard::{
    check_credentials, AdminSession, CheckCredentialsResult, SessionStore, SESSION_COOKIE,
};
use crate::handler::listing_redirect;
use crate::model::request::auth_requests::LoginRequest;
use crate::model::response::BasicMessage;
use crate::repository::credentials_file;

/// the login surface unauthenticated admin requests get redirected to
#[get("/login?<message>")]
pub fn login_page(message: Option<String>) -> Json<BasicMessage> {
    // `message` carries the outcome of a previous attempt; display only
    let _ = message;
    BasicMessage::new("Log in by POSTing form fields `username` and `password` to /admin/login")
}

#[post("/login", data = "<credentials>")]
pub fn login(
    credentials: Form<LoginRequest>,
    cookies: &CookieJar<'_>,
    sessions: &State<SessionStore>,
) -> Redirect {
    let credentials = credentials.into_inner();
    match check_credentials(
        &credentials_file(),
        &credentials.username,
        &credentials.password,
    ) {
        CheckCredentialsResult::Valid => {
            let token = sessions.create();
            cookies.add(Cookie::build((SESSION_COOKIE, token)).http_only(true));
            log::info!("Operator '{}' logged in", credentials.username);
            listing_redirect("", "logged-in")
        }
        CheckCredentialsResult::Invalid => {
            log::warn!("Rejected login attempt for '{}'", credentials.username);
            Redirect::to(uri!(
                "/admin",
                login_page(message = Some("bad-credentials".to_string()))
            ))
        }
        CheckCredentialsResult::Unavailable => Redirect::to(uri!(
            "/admin",
            login_page(message = Some("credentials-unavailable".to_string()))
        )),
    }
}

#[post("/logout")]
pub fn logout(
    session: AdminSession,
    cookies: &CookieJar<'_>,
    sessions: &State<SessionStore>,
) -> Redirect {
    sessions.revoke(&session.token);
    cookies.remove(SESSION_COOKIE);
    Redirect::to(uri!(
        "/admin",
        login_page(message = Some("logged-out".to_string()))
    ))
}

/// admin routes reject unauthenticated requests with a 401; this turns that
/// into the login redirect the surface contract asks for
#[catch(401)]
pub fn unauthorized_to_login() -> Redirect {
    Redirect::to("/admin/login")
}

use rocket::response::Redirect;

pub mod auth_handler;
pub mod file_handler;
pub mod folder_handler;
pub mod public_handler;

/// every mutating admin action lands back on the listing of some folder,
/// with the outcome carried as a query signal
pub fn listing_redirect(path: &str, message: &str) -> Redirect {
    Redirect::to(uri!(
        "/admin",
        folder_handler::list_folder(
            path = Some(path.to_string()),
            message = Some(message.to_string())
        )
    ))
}

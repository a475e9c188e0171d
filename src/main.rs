#[macro_use]
extern crate rocket;

use std::fs;
use std::path::Path;
use std::time::Duration;

use rocket::data::ByteUnit;
use rocket::{Build, Rocket};
use sha2::{Digest, Sha256};

use handler::auth_handler::{login, login_page, logout, unauthorized_to_login};
use handler::file_handler::{delete_file, upload_file};
use handler::folder_handler::{create_folder, delete_folder, list_folder};
use handler::public_handler::serve_file;

use crate::config::FILEDROP_CONFIG;
use crate::guard::SessionStore;
use crate::repository::MetadataStore;
use crate::service::file_service;

mod config;
mod guard;
mod handler;
mod logging;
mod model;
mod repository;
mod service;
#[cfg(test)]
mod test;

#[cfg(not(test))]
pub fn temp_dir() -> String {
    String::from("./.filedrop_temp")
}

#[cfg(test)]
pub fn temp_dir() -> String {
    format!("./.{}_temp", test::current_thread_name())
}

#[launch]
fn rocket() -> Rocket<Build> {
    let app_config = FILEDROP_CONFIG.clone();
    logging::init(&app_config.logging.level);
    let store = MetadataStore::open();
    // startup provisioning failures are fatal by design
    fs::create_dir_all(store.upload_root()).unwrap();
    if let Some(parent) = repository::metadata_file().parent() {
        if parent != Path::new("") {
            fs::create_dir_all(parent).unwrap();
        }
    }
    // a corrupt metadata file must stop the launch, never be masked by an
    // empty default that would discard every existing entry
    if let Err(e) = store.load() {
        panic!("Cannot start with an unreadable metadata file: {e:?}");
    }
    if !repository::credentials_file().exists() {
        log::warn!("No credentials file found; every admin login will be rejected");
    }
    if let Err(e) = file_service::reconcile(&store) {
        panic!("Startup reconciliation failed: {e:?}");
    }
    let temp = temp_dir();
    fs::remove_dir_all(Path::new(&temp))
        .or(Ok::<(), ()>(()))
        .unwrap();
    fs::create_dir_all(Path::new(&temp)).unwrap();
    let secret_key = format!(
        "{:x}",
        Sha256::digest(app_config.auth.session_secret.as_bytes())
    );
    let figment = rocket::Config::figment()
        .merge(("port", app_config.server.port))
        .merge(("secret_key", secret_key))
        .merge(("temp_dir", temp))
        .merge((
            "limits.file",
            ByteUnit::Byte(app_config.server.upload_limit_bytes),
        ))
        .merge((
            "limits.data-form",
            ByteUnit::Byte(app_config.server.upload_limit_bytes + 4096),
        ));
    rocket::custom(figment)
        .manage(store)
        .manage(SessionStore::new(Duration::from_secs(
            app_config.auth.session_ttl_minutes * 60,
        )))
        .mount(
            "/admin",
            routes![
                login_page,
                login,
                logout,
                list_folder,
                create_folder,
                delete_folder,
                upload_file,
                delete_file
            ],
        )
        .mount("/f", routes![serve_file])
        .register("/admin", catchers![unauthorized_to_login])
}

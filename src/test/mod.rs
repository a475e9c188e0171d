use std::fs;

use rocket::http::ContentType;
use rocket::local::blocking::Client;

use crate::guard::hash_credentials;
use crate::repository::{credentials_file, metadata_file, upload_root};

mod auth_handler_tests;

/// the tests in this module share the filesystem, so every scratch path is
/// derived from the current thread name; this keeps parallel test runs from
/// stepping on each other's upload trees
pub fn current_thread_name() -> String {
    let current_thread = std::thread::current();
    current_thread
        .name()
        .unwrap_or("unnamed")
        .replace("::", "_")
}

/// writes a single-record credentials file for this test thread
pub fn write_credentials(username: &str, password: &str) {
    let contents = format!(
        r#"[{{"username":"{username}","passwordHash":"{}"}}]"#,
        hash_credentials(username, password)
    );
    fs::write(credentials_file(), contents).unwrap();
}

/// removes every scratch file this test thread may have produced
pub fn cleanup() {
    fs::remove_file(metadata_file()).unwrap_or(());
    fs::remove_file(credentials_file()).unwrap_or(());
    fs::remove_dir_all(upload_root()).unwrap_or(());
    fs::remove_dir_all(crate::temp_dir()).unwrap_or(());
}

pub fn client() -> Client {
    cleanup();
    Client::tracked(crate::rocket()).expect("Valid Rocket Instance")
}

/// logs in as `admin`/`secret`; the tracked client keeps the session cookie
pub fn login(client: &Client) {
    write_credentials("admin", "secret");
    let res = client
        .post(uri!("/admin/login"))
        .header(ContentType::Form)
        .body("username=admin&password=secret")
        .dispatch();
    assert!(res.status().code < 400, "login failed during test setup");
}

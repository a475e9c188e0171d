use rocket::http::{ContentType, Status};

use crate::test::*;

#[test]
fn listing_without_session_redirects_to_login() {
    let client = client();
    let res = client.get(uri!("/admin/folder")).dispatch();
    assert_eq!(Status::SeeOther, res.status());
    assert_eq!(Some("/admin/login"), res.headers().get_one("Location"));
    cleanup();
}

#[test]
fn login_with_bad_credentials_redirects_back_to_login() {
    let client = client();
    write_credentials("admin", "secret");
    let res = client
        .post(uri!("/admin/login"))
        .header(ContentType::Form)
        .body("username=admin&password=wrong")
        .dispatch();
    assert_eq!(Status::SeeOther, res.status());
    let location = res.headers().get_one("Location").unwrap();
    assert!(location.starts_with("/admin/login"));
    assert!(location.contains("bad-credentials"));
    // the failed attempt must not have produced a usable session
    let res = client.get(uri!("/admin/folder")).dispatch();
    assert_eq!(Status::SeeOther, res.status());
    cleanup();
}

#[test]
fn login_without_credentials_file_is_rejected() {
    let client = client();
    let res = client
        .post(uri!("/admin/login"))
        .header(ContentType::Form)
        .body("username=admin&password=secret")
        .dispatch();
    let location = res.headers().get_one("Location").unwrap();
    assert!(location.contains("credentials-unavailable"));
    cleanup();
}

#[test]
fn login_grants_access_to_the_admin_listing() {
    let client = client();
    login(&client);
    let res = client.get(uri!("/admin/folder")).dispatch();
    assert_eq!(Status::Ok, res.status());
    cleanup();
}

#[test]
fn logout_invalidates_the_session() {
    let client = client();
    login(&client);
    let res = client.post(uri!("/admin/logout")).dispatch();
    assert_eq!(Status::SeeOther, res.status());
    let res = client.get(uri!("/admin/folder")).dispatch();
    assert_eq!(Status::SeeOther, res.status());
    assert_eq!(Some("/admin/login"), res.headers().get_one("Location"));
    cleanup();
}

#[test]
fn public_prefix_needs_no_session() {
    let client = client();
    // unknown file: a plain 404, never a login redirect
    let res = client.get("/f/nope.txt").dispatch();
    assert_eq!(Status::NotFound, res.status());
    cleanup();
}

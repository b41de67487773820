use rocket::http::{ContentType, Header, Status};
use rocket::local::blocking::Client;

use crate::build_rocket;
use crate::model::repository::Role;
use crate::repository::Db;
use crate::test::{
    cleanup, create_file_db_entry, create_user_db_entry, refresh_db, refresh_store, yesterday,
    AUTH,
};

/// admin:password
static ADMIN_AUTH: &str = "Basic YWRtaW46cGFzc3dvcmQ=";

fn client() -> (Client, Db) {
    let db = refresh_db();
    let store = refresh_store();
    let client =
        Client::tracked(build_rocket(db.clone(), store.clone())).expect("Valid Rocket Instance");
    (client, db)
}

#[test]
fn cleanup_endpoint_reports_the_deleted_count() {
    let (client, db) = client();
    create_file_db_entry("old.txt", None, None, Some(yesterday()), &db);
    create_file_db_entry("older.txt", None, None, Some(yesterday()), &db);
    create_file_db_entry("keep.txt", None, None, None, &db);
    let res = client.get(uri!("/cron/cleanup")).dispatch();
    assert_eq!(Status::Ok, res.status());
    let body = res.into_string().unwrap();
    assert!(body.contains(r#""deletedCount":2"#));
    assert!(body.contains(r#""success":true"#));
    // nothing left to sweep
    let res = client.get(uri!("/cron/cleanup")).dispatch();
    assert!(res.into_string().unwrap().contains(r#""deletedCount":0"#));
    cleanup();
}

#[test]
fn health_endpoint_reports_healthy() {
    let (client, _db) = client();
    let res = client.get(uri!("/api/health")).dispatch();
    assert_eq!(Status::Ok, res.status());
    let body = res.into_string().unwrap();
    assert!(body.contains(r#""status":"healthy""#));
    assert!(body.contains("timestamp"));
    cleanup();
}

#[test]
fn settings_start_with_the_seeded_defaults() {
    let (client, _db) = client();
    let res = client.get(uri!("/api/settings")).dispatch();
    assert_eq!(Status::Ok, res.status());
    assert!(res.into_string().unwrap().contains("File Uploader"));
    cleanup();
}

#[test]
fn updating_settings_requires_an_admin() {
    let (client, db) = client();
    create_user_db_entry("username", "password", Role::User, &db);
    create_user_db_entry("admin", "password", Role::Admin, &db);
    let body = r#"{"siteName":"Renamed","logoUrl":null}"#;
    let res = client
        .put(uri!("/api/settings"))
        .header(ContentType::JSON)
        .body(body)
        .dispatch();
    assert_eq!(Status::Unauthorized, res.status());
    let res = client
        .put(uri!("/api/settings"))
        .header(ContentType::JSON)
        .header(Header::new("Authorization", AUTH))
        .body(body)
        .dispatch();
    assert_eq!(Status::Forbidden, res.status());
    let res = client
        .put(uri!("/api/settings"))
        .header(ContentType::JSON)
        .header(Header::new("Authorization", ADMIN_AUTH))
        .body(body)
        .dispatch();
    assert_eq!(Status::Ok, res.status());
    let res = client.get(uri!("/api/settings")).dispatch();
    assert!(res.into_string().unwrap().contains("Renamed"));
    cleanup();
}

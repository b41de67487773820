use std::io::{Cursor, Read};

use rocket::http::{ContentType, Header, Status};
use rocket::local::blocking::Client;

use crate::build_rocket;
use crate::model::repository::Role;
use crate::model::response::file_responses::UploadedFilesResponse;
use crate::model::response::share_responses::CreatedShareResponse;
use crate::repository::Db;
use crate::test::{cleanup, create_user_db_entry, get_file, refresh_db, refresh_store, AUTH};

fn client() -> (Client, Db) {
    let db = refresh_db();
    let store = refresh_store();
    let client =
        Client::tracked(build_rocket(db.clone(), store.clone())).expect("Valid Rocket Instance");
    (client, db)
}

/// hand-rolled multipart body with one text part per passed file name
fn multipart_body(file_names: &[&str]) -> (ContentType, String) {
    let mut body = String::new();
    for name in file_names {
        body.push_str("--BOUNDARY\r\n");
        body.push_str(
            format!(
                "Content-Disposition: form-data; name=\"files\"; filename=\"{name}\"\r\n\
                 Content-Type: text/plain\r\n\r\nhello world\r\n"
            )
            .as_str(),
        );
    }
    body.push_str("--BOUNDARY--\r\n");
    let content_type =
        ContentType::parse_flexible("multipart/form-data; boundary=BOUNDARY").unwrap();
    (content_type, body)
}

fn upload(client: &Client, file_names: &[&str], auth: Option<&'static str>) -> UploadedFilesResponse {
    let (content_type, body) = multipart_body(file_names);
    let mut request = client.post(uri!("/files")).header(content_type).body(body);
    if let Some(auth) = auth {
        request = request.header(Header::new("Authorization", auth));
    }
    let res = request.dispatch();
    assert_eq!(Status::Created, res.status());
    res.into_json::<UploadedFilesResponse>().unwrap()
}

#[test]
fn guest_uploads_expire() {
    let (client, _db) = client();
    let uploaded = upload(&client, &["hello.txt"], None);
    assert_eq!(1, uploaded.files.len());
    assert_eq!("hello.txt", uploaded.files[0].name);
    assert!(uploaded.files[0].expires_at.is_some());
    cleanup();
}

#[test]
fn authenticated_uploads_do_not_expire() {
    let (client, db) = client();
    create_user_db_entry("username", "password", Role::User, &db);
    let uploaded = upload(&client, &["hello.txt"], Some(AUTH));
    assert_eq!(None, uploaded.files[0].expires_at);
    cleanup();
}

#[test]
fn guests_may_not_upload_too_many_files_at_once() {
    let (client, _db) = client();
    let names = ["a.txt", "b.txt", "c.txt", "d.txt", "e.txt", "f.txt"];
    let (content_type, body) = multipart_body(&names);
    let res = client
        .post(uri!("/files"))
        .header(content_type)
        .body(body)
        .dispatch();
    assert_eq!(Status::BadRequest, res.status());
    cleanup();
}

#[test]
fn uploaded_files_can_be_downloaded() {
    let (client, _db) = client();
    let uploaded = upload(&client, &["hello.txt"], None);
    let id = uploaded.files[0].id.as_str();
    let res = client.get(format!("/files/{id}/download")).dispatch();
    assert_eq!(Status::Ok, res.status());
    let disposition = res.headers().get_one("Content-Disposition").unwrap();
    assert!(disposition.contains("hello.txt"));
    assert_eq!("hello world", res.into_string().unwrap());
    cleanup();
}

#[test]
fn protected_share_gates_the_download() {
    let (client, _db) = client();
    let uploaded = upload(&client, &["hello.txt"], None);
    let id = uploaded.files[0].id.as_str();
    let res = client
        .post(uri!("/share"))
        .header(ContentType::JSON)
        .body(format!(
            r#"{{"type":"file","isGlobal":true,"fileIds":["{id}"],"password":"secret"}}"#
        ))
        .dispatch();
    assert_eq!(Status::Created, res.status());
    let created = res.into_json::<CreatedShareResponse>().unwrap();
    let token = created.share_url.rsplit('/').next().unwrap();
    let locked = client.get(format!("/files/{id}/download")).dispatch();
    assert_eq!(Status::Unauthorized, locked.status());
    let auth = client
        .post(format!("/share/{token}/auth"))
        .header(ContentType::JSON)
        .body(r#"{"password":"secret"}"#)
        .dispatch();
    assert_eq!(Status::Ok, auth.status());
    let unlocked = client.get(format!("/files/{id}/download")).dispatch();
    assert_eq!(Status::Ok, unlocked.status());
    cleanup();
}

#[test]
fn bulk_download_returns_a_zip_of_the_requested_files() {
    let (client, db) = client();
    let uploaded = upload(&client, &["a.txt", "b.txt"], None);
    let ids: Vec<&str> = uploaded.files.iter().map(|f| f.id.as_str()).collect();
    let res = client
        .post(uri!("/files/download"))
        .header(ContentType::JSON)
        .body(format!(r#"{{"fileIds":["{}","{}"]}}"#, ids[0], ids[1]))
        .dispatch();
    assert_eq!(Status::Ok, res.status());
    assert_eq!(Some(ContentType::ZIP), res.content_type());
    let disposition = res.headers().get_one("Content-Disposition").unwrap();
    assert!(disposition.contains("files.zip"));
    let bytes = res.into_bytes().unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    assert_eq!(2, archive.len());
    let mut content = String::new();
    archive.by_name("a.txt").unwrap().read_to_string(&mut content).unwrap();
    assert_eq!("hello world", content);
    // every archived file counts as a download
    assert_eq!(1, get_file(ids[0], &db).download_count);
    assert_eq!(1, get_file(ids[1], &db).download_count);
    cleanup();
}

#[test]
fn bulk_download_is_scoped_to_the_requesters_files() {
    let (client, db) = client();
    create_user_db_entry("username", "password", Role::User, &db);
    let owned = upload(&client, &["mine.txt"], Some(AUTH));
    let guest = upload(&client, &["anon.txt"], None);
    let owned_id = owned.files[0].id.as_str();
    let guest_id = guest.files[0].id.as_str();
    // a signed-in caller only gets their own files back, even when they ask
    // for more
    let res = client
        .post(uri!("/files/download"))
        .header(ContentType::JSON)
        .header(Header::new("Authorization", AUTH))
        .body(format!(r#"{{"fileIds":["{owned_id}","{guest_id}"]}}"#))
        .dispatch();
    assert_eq!(Status::Ok, res.status());
    let mut archive = zip::ZipArchive::new(Cursor::new(res.into_bytes().unwrap())).unwrap();
    assert_eq!(1, archive.len());
    assert!(archive.by_name("mine.txt").is_ok());
    // an anonymous caller cannot pull owned files at all
    let res = client
        .post(uri!("/files/download"))
        .header(ContentType::JSON)
        .body(format!(r#"{{"fileIds":["{owned_id}"]}}"#))
        .dispatch();
    assert_eq!(Status::NotFound, res.status());
    cleanup();
}

#[test]
fn bulk_download_of_unknown_ids_is_not_found() {
    let (client, _db) = client();
    let res = client
        .post(uri!("/files/download"))
        .header(ContentType::JSON)
        .body(r#"{"fileIds":["missing"]}"#)
        .dispatch();
    assert_eq!(Status::NotFound, res.status());
    cleanup();
}

#[test]
fn uploaded_files_can_be_deleted() {
    let (client, _db) = client();
    let uploaded = upload(&client, &["hello.txt"], None);
    let id = uploaded.files[0].id.as_str();
    let res = client.delete(format!("/files/{id}")).dispatch();
    assert_eq!(Status::NoContent, res.status());
    let res = client.get(format!("/files/{id}/download")).dispatch();
    assert_eq!(Status::NotFound, res.status());
    cleanup();
}

#[test]
fn guests_can_list_their_uploads_by_id() {
    let (client, _db) = client();
    let uploaded = upload(&client, &["a.txt", "b.txt"], None);
    let ids = uploaded
        .files
        .iter()
        .map(|f| f.id.as_str())
        .collect::<Vec<&str>>()
        .join(",");
    let res = client.get(format!("/files/guest?ids={ids}")).dispatch();
    assert_eq!(Status::Ok, res.status());
    let listed = res.into_json::<UploadedFilesResponse>().unwrap();
    assert_eq!(2, listed.files.len());
    cleanup();
}

#[test]
fn moving_files_requires_credentials() {
    let (client, _db) = client();
    let res = client
        .post(uri!("/files/move"))
        .header(ContentType::JSON)
        .body(r#"{"fileIds":["x"],"folderId":null}"#)
        .dispatch();
    assert_eq!(Status::Unauthorized, res.status());
    cleanup();
}

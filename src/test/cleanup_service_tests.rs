use crate::service::cleanup_service;
use crate::test::{
    cleanup, create_file_db_entry, file_exists, refresh_db, refresh_store, tomorrow, yesterday,
};

#[test]
fn sweep_removes_expired_rows_and_blobs() {
    let db = refresh_db();
    let store = refresh_store();
    let expired = create_file_db_entry("old.txt", None, None, Some(yesterday()), &db);
    let missing_blob = create_file_db_entry("gone.txt", None, None, Some(yesterday()), &db);
    let live = create_file_db_entry("new.txt", None, None, Some(tomorrow()), &db);
    let forever = create_file_db_entry("keep.txt", None, None, None, &db);
    store.write(expired.path.as_str(), b"stale").unwrap();
    store.write(live.path.as_str(), b"fresh").unwrap();
    let deleted = cleanup_service::sweep_expired(&db, &store).unwrap();
    assert_eq!(2, deleted);
    assert!(!file_exists(expired.id.as_str(), &db));
    assert!(!file_exists(missing_blob.id.as_str(), &db));
    assert!(file_exists(live.id.as_str(), &db));
    assert!(file_exists(forever.id.as_str(), &db));
    assert!(store.open(expired.path.as_str()).is_err());
    assert!(store.open(live.path.as_str()).is_ok());
    cleanup();
}

#[test]
fn sweep_is_idempotent() {
    let db = refresh_db();
    let store = refresh_store();
    let expired = create_file_db_entry("old.txt", None, None, Some(yesterday()), &db);
    store.write(expired.path.as_str(), b"stale").unwrap();
    assert_eq!(1, cleanup_service::sweep_expired(&db, &store).unwrap());
    assert_eq!(0, cleanup_service::sweep_expired(&db, &store).unwrap());
    cleanup();
}

#[test]
fn sweep_with_nothing_expired_does_nothing() {
    let db = refresh_db();
    let store = refresh_store();
    create_file_db_entry("keep.txt", None, None, None, &db);
    assert_eq!(0, cleanup_service::sweep_expired(&db, &store).unwrap());
    cleanup();
}

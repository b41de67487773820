#[macro_use]
extern crate rocket;

use rocket::{Build, Rocket};

use handler::{
    admin_handler::{get_all_files, get_stats},
    api_handler::{cleanup_expired_files, get_settings, health_check, update_settings},
    file_handler::{
        delete_file, download_file, download_files, get_guest_files, move_files, upload_files,
    },
    folder_handler::{create_folder, delete_folder, get_folder, get_folders, update_folder},
    share_handler::{authenticate_share, create_share, get_share},
    user_handler::{create_user, delete_user, get_users},
};

use crate::config::UPLOAD_SERVER_CONFIG;
use crate::repository::Db;
use crate::storage::FileStore;

mod config;
mod guard;
mod handler;
mod model;
mod repository;
mod service;
mod storage;
#[cfg(test)]
mod test;

fn setup_logger() {
    let result = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {message}",
                humantime::format_rfc3339_seconds(std::time::SystemTime::now()),
                record.level(),
                record.target(),
            ))
        })
        .level(log::LevelFilter::Info)
        .chain(std::io::stdout())
        .apply();
    if let Err(e) = result {
        eprintln!("Failed to initialize logger: {e}");
    }
}

/// assembles the rocket instance against explicit store handles, so tests can
/// point it at their own database file and upload directory
pub fn build_rocket(db: Db, store: FileStore) -> Rocket<Build> {
    rocket::build()
        .manage(db)
        .manage(store)
        .mount("/api", routes![health_check, get_settings, update_settings])
        .mount(
            "/files",
            routes![
                upload_files,
                download_file,
                download_files,
                delete_file,
                move_files,
                get_guest_files
            ],
        )
        .mount(
            "/folders",
            routes![create_folder, get_folders, get_folder, update_folder, delete_folder],
        )
        .mount("/share", routes![create_share, authenticate_share, get_share])
        .mount("/cron", routes![cleanup_expired_files])
        .mount(
            "/admin",
            routes![create_user, get_users, delete_user, get_all_files, get_stats],
        )
}

#[launch]
fn rocket() -> Rocket<Build> {
    setup_logger();
    let db = Db::new(UPLOAD_SERVER_CONFIG.database.location.as_str());
    db.initialize().unwrap();
    let store = FileStore::new(UPLOAD_SERVER_CONFIG.storage.location.as_str());
    store.init().unwrap();
    build_rocket(db, store)
}

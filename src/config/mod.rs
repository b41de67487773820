use config::{Config, ConfigError};
use once_cell::sync::Lazy;
use rocket::form::validate::Contains;
use rocket::serde::Deserialize;

#[derive(Deserialize, Clone)]
pub struct ServerConfig {
    /// public base URL used when building share links
    #[serde(rename = "appurl")]
    pub app_url: String,
    /// controls the `secure` attribute on share-authorization cookies
    pub production: bool,
}

#[derive(Deserialize, Clone)]
pub struct DbConfig {
    pub location: String,
}

#[derive(Deserialize, Clone)]
pub struct StorageConfig {
    /// directory uploaded blobs are written to
    pub location: String,
}

/// upload limits; guests get the small numbers
#[derive(Deserialize, Clone)]
pub struct UploadConfig {
    #[serde(rename = "guestmaxfiles")]
    pub guest_max_files: u32,
    #[serde(rename = "guestmaxsizebytes")]
    pub guest_max_size_bytes: u64,
    #[serde(rename = "usermaxfiles")]
    pub user_max_files: u32,
    #[serde(rename = "usermaxsizebytes")]
    pub user_max_size_bytes: u64,
    /// guest uploads expire this many days after upload
    #[serde(rename = "guestexpirydays")]
    pub guest_expiry_days: f64,
}

/// config properties for the whole of this application
#[derive(Deserialize, Clone)]
pub struct UploadServerConfig {
    pub server: ServerConfig,
    pub database: DbConfig,
    pub storage: StorageConfig,
    pub uploads: UploadConfig,
}

/// Parses the config file located at ./UploadServer.toml, if it exists.
/// If this fails to parse the file, the application will panic
pub fn parse_config() -> UploadServerConfig {
    let builder = Config::builder()
        .add_source(config::File::with_name("./UploadServer.toml"))
        .build();
    // some errors are fine, such as not found
    if let Err(ConfigError::Foreign(e)) = builder {
        let message = e.to_string();
        if message.contains("not found") {
            log::warn!("No config file found. Continuing startup...");
            return CONFIG_DEFAULT.clone();
        }
        panic!("Failed to parse config file. Exception is {e}");
        // basically everything else is unrecoverable, though
    } else if let Err(e) = builder {
        log::error!("Failed to parse config file. Exception is {e}");
        panic!("Failed to parse config file. Exception is {e}");
    }
    let settings = builder.unwrap();
    settings
        .try_deserialize()
        .unwrap_or(CONFIG_DEFAULT.clone())
}

/// global variable for config, that way it doesn't need to be repeatedly parsed
pub static UPLOAD_SERVER_CONFIG: Lazy<UploadServerConfig> = Lazy::new(parse_config);
static CONFIG_DEFAULT: Lazy<UploadServerConfig> = Lazy::new(|| UploadServerConfig {
    server: ServerConfig {
        app_url: "http://localhost:8000".to_string(),
        production: false,
    },
    database: DbConfig {
        location: "./db.sqlite".to_string(),
    },
    storage: StorageConfig {
        location: "./uploads".to_string(),
    },
    uploads: UploadConfig {
        guest_max_files: 5,
        guest_max_size_bytes: 100 * 1024 * 1024,
        user_max_files: 10,
        user_max_size_bytes: 4 * 1024 * 1024 * 1024,
        guest_expiry_days: 7.0,
    },
});

use chrono::NaiveDateTime;

/// the role column on a user row. Guests never have a row; uploads made
/// without credentials simply carry a null owner reference
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Role {
    Admin,
    User,
    Guest,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
            Role::Guest => "GUEST",
        }
    }

    /// parses the database representation of a role, defaulting to USER for
    /// anything the CHECK constraint should have rejected
    pub fn from_db(value: &str) -> Role {
        match value {
            "ADMIN" => Role::Admin,
            "GUEST" => Role::Guest,
            _ => Role::User,
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    /// argon2 PHC string, never the plain password
    pub password: String,
    pub email: Option<String>,
    pub role: Role,
    pub created_at: NaiveDateTime,
}

/// one uploaded blob. `name` is the display name; `path` is the opaque
/// on-disk identifier chosen at upload time
#[derive(Debug, PartialEq, Clone)]
pub struct FileRecord {
    pub id: String,
    pub name: String,
    pub path: String,
    pub size: u64,
    pub mime_type: Option<String>,
    /// `None` means guest-owned or orphaned
    pub user_id: Option<String>,
    /// `None` means the file sits at the root
    pub folder_id: Option<String>,
    pub download_count: u32,
    /// unique across files _and_ folders when set
    pub share_url: Option<String>,
    /// a set password hash implies a set share_url
    pub share_password: Option<String>,
    /// `None` means the file never expires
    pub expires_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Folder {
    pub id: String,
    /// unique per owner
    pub name: String,
    pub user_id: String,
    pub share_url: Option<String>,
    pub share_password: Option<String>,
    pub created_at: NaiveDateTime,
}

/// the singleton configuration row
#[derive(Debug, PartialEq, Clone)]
pub struct Settings {
    pub site_name: String,
    pub logo_url: Option<String>,
}

/// owner columns joined onto a file row for the admin listing. Guest
/// uploads have no owner at all
#[derive(Debug, PartialEq, Clone)]
pub struct FileOwner {
    pub username: String,
    pub email: Option<String>,
}

/// byte totals over the files created within one reporting period
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct UsageTotals {
    pub uploaded_bytes: u64,
    pub downloaded_bytes: u64,
}

/// the three periods the admin dashboard reports on
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct UsageReport {
    pub today: UsageTotals,
    pub week: UsageTotals,
    pub month: UsageTotals,
}

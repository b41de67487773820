#[derive(PartialEq, Debug)]
pub enum GetSettingsError {
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum UpdateSettingsError {
    DbFailure,
}

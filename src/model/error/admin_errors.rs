#[derive(PartialEq, Debug)]
pub enum GetAllFilesError {
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum GetStatsError {
    DbFailure,
}

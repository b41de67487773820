#[derive(PartialEq, Debug)]
pub enum CreateUserError {
    /// username or email already taken
    AlreadyExists,
    /// the password could not be hashed
    HashFailure,
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum DeleteUserError {
    NotFound,
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum GetUsersError {
    DbFailure,
}

/// failure modes for the token generator's bounded retry loop
#[derive(PartialEq, Debug)]
pub enum TokenError {
    /// the retry budget was used up without finding a free token
    Exhausted,
    /// the existence check could not be executed
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum CreateShareError {
    /// the target is absent _or_ the requester does not own it; deliberately
    /// conflated so responses never reveal which
    NotFoundOrForbidden,
    /// a bulk guest share matched zero eligible files
    NoValidFiles,
    /// token generation ran out of attempts
    TokenExhausted,
    /// the database failed to apply the share
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum ShareAuthError {
    /// no live file or folder carries this token
    NotFound,
    /// the share has no password, so there is nothing to authenticate
    NoPasswordRequired,
    InvalidPassword,
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum GetShareError {
    NotFound,
    /// the share is password protected and the visitor has not unlocked it
    Unauthorized,
    DbFailure,
}

#[derive(PartialEq, Debug)]
pub enum SweepError {
    /// the expired-file query itself failed; per-file failures are only logged
    DbFailure,
}

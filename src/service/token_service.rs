use rand::distributions::Alphanumeric;
use rand::Rng;
use rusqlite::Connection;
use uuid::Uuid;

use crate::model::error::share_errors::TokenError;
use crate::repository::share_repository;

/// upper bound on collision retries before giving up on a share token
pub const MAX_TOKEN_ATTEMPTS: u8 = 10;
const SHARE_TOKEN_LENGTH: usize = 24;

/// opaque primary key for new rows. The id space is large enough that no
/// existence check is needed; the primary key constraint is the backstop
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn random_token<R: Rng>(rng: &mut R) -> String {
    (0..SHARE_TOKEN_LENGTH)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect()
}

/// draws candidate share tokens until `exists` reports one as free, bounded
/// at [MAX_TOKEN_ATTEMPTS] draws. Randomness and the existence check are both
/// injected, so the retry behavior can be tested without a database
pub fn generate_token_with<R, F>(rng: &mut R, mut exists: F) -> Result<String, TokenError>
where
    R: Rng,
    F: FnMut(&str) -> Result<bool, rusqlite::Error>,
{
    for _ in 0..MAX_TOKEN_ATTEMPTS {
        let token = random_token(rng);
        match exists(token.as_str()) {
            Ok(false) => return Ok(token),
            Ok(true) => log::warn!("share token collision; drawing another"),
            Err(e) => {
                log::error!(
                    "Failed to check share token for collisions. Nested exception is {e:?}"
                );
                return Err(TokenError::DbFailure);
            }
        }
    }
    Err(TokenError::Exhausted)
}

/// draws a token that is free across the combined file + folder token space
pub fn generate_unique_share_token(con: &Connection) -> Result<String, TokenError> {
    generate_token_with(&mut rand::thread_rng(), |token| {
        share_repository::token_exists(token, con)
    })
}

#[cfg(test)]
mod generate_token_with_tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn returns_first_free_token() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut attempts = 0;
        let token = generate_token_with(&mut rng, |_| {
            attempts += 1;
            Ok(false)
        })
        .unwrap();
        assert_eq!(1, attempts);
        assert_eq!(SHARE_TOKEN_LENGTH, token.len());
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn retries_past_collisions() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut attempts = 0;
        let token = generate_token_with(&mut rng, |_| {
            attempts += 1;
            Ok(attempts <= 3)
        })
        .unwrap();
        assert_eq!(4, attempts);
        assert_eq!(SHARE_TOKEN_LENGTH, token.len());
    }

    #[test]
    fn gives_up_after_the_attempt_budget() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut attempts = 0;
        let result = generate_token_with(&mut rng, |_| {
            attempts += 1;
            Ok(true)
        });
        assert_eq!(Err(TokenError::Exhausted), result);
        assert_eq!(MAX_TOKEN_ATTEMPTS as u32, attempts);
    }

    #[test]
    fn surfaces_a_failed_existence_check() {
        let mut rng = StdRng::seed_from_u64(42);
        let result =
            generate_token_with(&mut rng, |_| Err(rusqlite::Error::QueryReturnedNoRows));
        assert_eq!(Err(TokenError::DbFailure), result);
    }

    #[test]
    fn successive_draws_differ() {
        let mut rng = StdRng::seed_from_u64(42);
        let first = generate_token_with(&mut rng, |_| Ok(false)).unwrap();
        let second = generate_token_with(&mut rng, |_| Ok(false)).unwrap();
        assert_ne!(first, second);
    }
}

#[cfg(test)]
mod generate_id_tests {
    use super::*;

    #[test]
    fn ids_are_url_safe_and_distinct() {
        let first = generate_id();
        let second = generate_id();
        assert_ne!(first, second);
        assert_eq!(32, first.len());
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
    }
}

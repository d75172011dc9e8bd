//! Credential resolution at the program boundary.
//!
//! Explicit values win; missing or empty ones fall back to the
//! `WHOOP_USERNAME` / `WHOOP_PASSWORD` environment variables. Library crates
//! never read the environment themselves.

use tracing::debug;
use whoopdata_fetch::Credentials;

use crate::error::StoreError;

/// Environment variable holding the account email.
pub const USERNAME_ENV: &str = "WHOOP_USERNAME";

/// Environment variable holding the account password.
pub const PASSWORD_ENV: &str = "WHOOP_PASSWORD";

/// Resolves credentials from explicit values, then the process environment.
///
/// # Errors
///
/// Returns [`StoreError::CredentialsMissing`] if either value is unavailable.
pub fn resolve_credentials(
    username: Option<&str>,
    password: Option<&str>,
) -> Result<Credentials, StoreError> {
    resolve_credentials_with(username, password, |key| std::env::var(key).ok())
}

/// Resolves credentials using a custom environment lookup.
///
/// # Errors
///
/// Returns [`StoreError::CredentialsMissing`] if either value is unavailable.
pub fn resolve_credentials_with<F>(
    username: Option<&str>,
    password: Option<&str>,
    lookup: F,
) -> Result<Credentials, StoreError>
where
    F: Fn(&str) -> Option<String>,
{
    let resolve = |explicit: Option<&str>, key: &str| {
        explicit
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .or_else(|| {
                debug!(var = key, "Falling back to environment");
                lookup(key)
            })
            .filter(|v| !v.is_empty())
    };

    let username = resolve(username, USERNAME_ENV);
    let password = resolve(password, PASSWORD_ENV);

    Credentials::from_parts(username, password).map_err(|_| StoreError::CredentialsMissing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_explicit_values_win() {
        let creds = resolve_credentials_with(
            Some("cli@example.com"),
            Some("pw"),
            env(&[(USERNAME_ENV, "env@example.com"), (PASSWORD_ENV, "envpw")]),
        )
        .unwrap();

        assert_eq!(creds.username(), "cli@example.com");
    }

    #[test]
    fn test_environment_fallback() {
        let creds = resolve_credentials_with(
            None,
            None,
            env(&[(USERNAME_ENV, "env@example.com"), (PASSWORD_ENV, "envpw")]),
        )
        .unwrap();

        assert_eq!(creds.username(), "env@example.com");
    }

    #[test]
    fn test_mixed_sources() {
        let creds =
            resolve_credentials_with(Some("cli@example.com"), None, env(&[(PASSWORD_ENV, "envpw")]))
                .unwrap();

        assert_eq!(creds.username(), "cli@example.com");
    }

    #[test]
    fn test_empty_explicit_value_falls_back() {
        let creds = resolve_credentials_with(
            Some(""),
            Some("pw"),
            env(&[(USERNAME_ENV, "env@example.com")]),
        )
        .unwrap();

        assert_eq!(creds.username(), "env@example.com");
    }

    #[test]
    fn test_missing_password() {
        let result =
            resolve_credentials_with(Some("cli@example.com"), None, env(&[]));
        assert!(matches!(result, Err(StoreError::CredentialsMissing)));
    }

    #[test]
    fn test_empty_env_value_counts_as_missing() {
        let result = resolve_credentials_with(
            None,
            None,
            env(&[(USERNAME_ENV, ""), (PASSWORD_ENV, "pw")]),
        );
        assert!(result.unwrap_err().is_credentials_missing());
    }
}

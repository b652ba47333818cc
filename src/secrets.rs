use serde::{Deserialize, Serialize};

pub const API_KEY_VAR: &str = "TWITTER_API_KEY";
pub const API_SECRET_VAR: &str = "TWITTER_API_SECRET";
pub const ACCESS_TOKEN_VAR: &str = "TWITTER_ACCESS_TOKEN";
pub const ACCESS_TOKEN_SECRET_VAR: &str = "TWITTER_ACCESS_TOKEN_SECRET";

/// The four Twitter credentials. Loaded from the environment (a `.env`
/// file in the working directory is read at startup); nothing is stored
/// on disk by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwitterCredentials {
    pub api_key: String,
    pub api_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl TwitterCredentials {
    /// Read all four credentials from the environment. A missing or empty
    /// variable is an error naming the variable, surfaced at first use of
    /// the tweet source rather than at startup.
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            api_key: required_var(API_KEY_VAR)?,
            api_secret: required_var(API_SECRET_VAR)?,
            access_token: required_var(ACCESS_TOKEN_VAR)?,
            access_token_secret: required_var(ACCESS_TOKEN_SECRET_VAR)?,
        })
    }
}

fn required_var(name: &str) -> Result<String, String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(format!(
            "Twitter credentials not configured: {} is not set",
            name
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment mutation is process-wide, so every phase lives in one
    // test to avoid interleaving with a parallel test run.
    #[test]
    fn from_env_requires_all_four_variables() {
        for var in [
            API_KEY_VAR,
            API_SECRET_VAR,
            ACCESS_TOKEN_VAR,
            ACCESS_TOKEN_SECRET_VAR,
        ] {
            std::env::remove_var(var);
        }
        let err = TwitterCredentials::from_env().unwrap_err();
        assert!(err.contains(API_KEY_VAR));

        std::env::set_var(API_KEY_VAR, "key");
        std::env::set_var(API_SECRET_VAR, "secret");
        std::env::set_var(ACCESS_TOKEN_VAR, "token");
        let err = TwitterCredentials::from_env().unwrap_err();
        assert!(err.contains(ACCESS_TOKEN_SECRET_VAR));

        std::env::set_var(ACCESS_TOKEN_SECRET_VAR, "token-secret");
        let creds = TwitterCredentials::from_env().unwrap();
        assert_eq!(creds.api_key, "key");
        assert_eq!(creds.access_token_secret, "token-secret");

        // Whitespace-only values count as missing
        std::env::set_var(API_SECRET_VAR, "   ");
        let err = TwitterCredentials::from_env().unwrap_err();
        assert!(err.contains(API_SECRET_VAR));

        for var in [
            API_KEY_VAR,
            API_SECRET_VAR,
            ACCESS_TOKEN_VAR,
            ACCESS_TOKEN_SECRET_VAR,
        ] {
            std::env::remove_var(var);
        }
    }
}

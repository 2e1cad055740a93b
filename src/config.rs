use std::time::Duration;

use crate::error::ConfigError;

pub const SUPABASE_URL_VAR: &str = "LISTING_DESK_SUPABASE_URL";
pub const SUPABASE_KEY_VAR: &str = "LISTING_DESK_SUPABASE_ANON_KEY";
pub const MEDIA_BUCKET_VAR: &str = "LISTING_DESK_MEDIA_BUCKET";
pub const TIMEOUT_VAR: &str = "LISTING_DESK_TIMEOUT_SECS";

const DEFAULT_MEDIA_BUCKET: &str = "marketplace";
/// Collaborator timeout when `LISTING_DESK_TIMEOUT_SECS` is unset
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct Config {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub media_bucket: String,
    pub request_timeout: Duration,
}

impl Config {
    /// Read settings from the process environment, after loading `.env`
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let supabase_url = read(SUPABASE_URL_VAR).ok_or(ConfigError::Missing(SUPABASE_URL_VAR))?;
        let supabase_anon_key =
            read(SUPABASE_KEY_VAR).ok_or(ConfigError::Missing(SUPABASE_KEY_VAR))?;
        let media_bucket =
            read(MEDIA_BUCKET_VAR).unwrap_or_else(|| DEFAULT_MEDIA_BUCKET.to_string());

        let request_timeout = match read(TIMEOUT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::Invalid {
                    name: TIMEOUT_VAR,
                    value: raw,
                })?,
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        Ok(Self {
            supabase_url,
            supabase_anon_key,
            media_bucket,
            request_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_optional_vars_are_unset() {
        let config = Config::from_lookup(lookup(&[
            (SUPABASE_URL_VAR, "https://project.supabase.co"),
            (SUPABASE_KEY_VAR, "anon"),
        ]))
        .unwrap();

        assert_eq!(config.media_bucket, "marketplace");
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(DEFAULT_REQUEST_TIMEOUT, Duration::from_secs(30));
    }

    #[test]
    fn blank_required_var_is_missing() {
        let err = Config::from_lookup(lookup(&[
            (SUPABASE_URL_VAR, "https://project.supabase.co"),
            (SUPABASE_KEY_VAR, "  "),
        ]))
        .unwrap_err();

        assert!(matches!(err, ConfigError::Missing(SUPABASE_KEY_VAR)));
    }

    #[test]
    fn timeout_must_be_a_positive_number() {
        let base = [
            (SUPABASE_URL_VAR, "https://project.supabase.co"),
            (SUPABASE_KEY_VAR, "anon"),
        ];
        for bad in ["0", "soon"] {
            let mut pairs = base.to_vec();
            pairs.push((TIMEOUT_VAR, bad));
            assert!(matches!(
                Config::from_lookup(lookup(&pairs)),
                Err(ConfigError::Invalid { .. })
            ));
        }

        let mut pairs = base.to_vec();
        pairs.push((TIMEOUT_VAR, "5"));
        pairs.push((MEDIA_BUCKET_VAR, "listing-media"));
        let config = Config::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.media_bucket, "listing-media");
    }
}

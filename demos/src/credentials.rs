use std::env;
use std::path::Path;

/// Default location of mounted secrets in hosted environments.
pub const DEFAULT_SECRETS_DIR: &str = "/run/secrets";

const ENV_KEYS: [&str; 2] = ["GOOGLE_API_KEY", "GEMINI_API_KEY"];

#[derive(Debug, thiserror::Error)]
#[error(
    "No API key found. Set the GOOGLE_API_KEY environment variable (or put it in a .env file).\n\
     You can get an API key from: https://aistudio.google.com/app/apikey"
)]
pub struct MissingApiKey;

/// Resolve the Gemini API key.
///
/// Precedence: `GOOGLE_API_KEY` in the environment, then `GEMINI_API_KEY`,
/// then a mounted secret file at `/run/secrets/GOOGLE_API_KEY`. Values
/// loaded from a `.env` file arrive through the environment (the binaries
/// call `dotenvy::dotenv()` without overriding existing variables), so an
/// explicitly exported variable always wins over `.env`.
pub fn resolve_api_key() -> Result<String, MissingApiKey> {
    resolve_from(|name| env::var(name).ok(), Path::new(DEFAULT_SECRETS_DIR))
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn resolve_from(
    lookup: impl Fn(&str) -> Option<String>,
    secrets_dir: &Path,
) -> Result<String, MissingApiKey> {
    for name in ENV_KEYS {
        if let Some(key) = lookup(name).and_then(non_empty) {
            tracing::debug!(source = name, "API key resolved from environment");
            return Ok(key);
        }
    }

    let secret_path = secrets_dir.join("GOOGLE_API_KEY");
    if let Ok(contents) = std::fs::read_to_string(&secret_path) {
        if let Some(key) = non_empty(contents) {
            tracing::debug!(path = %secret_path.display(), "API key resolved from secret file");
            return Ok(key);
        }
    }

    Err(MissingApiKey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;

    fn lookup_in<'a>(map: &'a HashMap<&'a str, &'a str>) -> impl Fn(&str) -> Option<String> + 'a {
        |name| map.get(name).map(|v| v.to_string())
    }

    #[test]
    fn test_env_var_wins() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("GOOGLE_API_KEY"), "from-secret").unwrap();
        let vars = HashMap::from([("GOOGLE_API_KEY", "from-env")]);
        let key = resolve_from(lookup_in(&vars), dir.path()).unwrap();
        assert_eq!(key, "from-env");
    }

    #[test]
    fn test_gemini_key_is_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let vars = HashMap::from([("GEMINI_API_KEY", "gemini-key")]);
        let key = resolve_from(lookup_in(&vars), dir.path()).unwrap();
        assert_eq!(key, "gemini-key");
    }

    #[test]
    fn test_secret_file_used_last() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("GOOGLE_API_KEY"), "secret-key\n").unwrap();
        let vars = HashMap::new();
        let key = resolve_from(lookup_in(&vars), dir.path()).unwrap();
        assert_eq!(key, "secret-key");
    }

    #[test]
    fn test_empty_values_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let vars = HashMap::from([("GOOGLE_API_KEY", "  ")]);
        let result = resolve_from(lookup_in(&vars), dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_key_has_readable_message() {
        let dir = tempfile::tempdir().unwrap();
        let vars = HashMap::new();
        let err = resolve_from(lookup_in(&vars), dir.path()).unwrap_err();
        assert!(err.to_string().contains("GOOGLE_API_KEY"));
        assert!(err.to_string().contains("aistudio.google.com"));
    }
}

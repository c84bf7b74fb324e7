use crate::session::Session;
use crate::{Error, Result};
use regex::Regex;
use std::sync::OnceLock;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{+[^{}]*\}+").expect("invalid regex pattern"))
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

fn value_to_string(value: &serde_json::Value) -> String {
    // Strings are injected raw; Display would add JSON quotes.
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn replace_match(session: &Session, match_str: &str) -> Result<String> {
    let var_name = match_str.trim_matches(|c| c == '{' || c == '}').trim();

    let (var_name, optional) = match var_name.strip_suffix('?') {
        Some(name) => (name, true),
        None => (var_name, false),
    };

    if !is_identifier(var_name) {
        // Not a state variable, keep the braces as literal text.
        return Ok(match_str.to_string());
    }

    match session.state_value(var_name) {
        Some(value) => Ok(value_to_string(&value)),
        None if optional => Ok(String::new()),
        None => Err(Error::Agent(format!("state variable '{}' not found", var_name))),
    }
}

/// Injects session state values into an instruction template.
///
/// Supported placeholder syntax:
/// - `{var_name}` - required state variable, errors if missing
/// - `{var_name?}` - optional, empty string if missing
///
/// Anything between braces that is not a valid identifier is left as-is.
pub fn inject_state(session: &Session, template: &str) -> Result<String> {
    let regex = placeholder_regex();
    let mut result = String::with_capacity(template.len());
    let mut last_end = 0;

    for found in regex.find_iter(template) {
        result.push_str(&template[last_end..found.start()]);
        result.push_str(&replace_match(session, found.as_str())?);
        last_end = found.end();
    }
    result.push_str(&template[last_end..]);

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session() -> Session {
        let session = Session::new("app", "user1", "s1");
        session.set_state_value("blog_outline", json!("1. intro\n2. body"));
        session.set_state_value("count", json!(3));
        session
    }

    #[test]
    fn test_inject_string_without_quotes() {
        let out = inject_state(&session(), "Follow this outline: {blog_outline}").unwrap();
        assert_eq!(out, "Follow this outline: 1. intro\n2. body");
    }

    #[test]
    fn test_inject_number() {
        let out = inject_state(&session(), "{count} points").unwrap();
        assert_eq!(out, "3 points");
    }

    #[test]
    fn test_missing_required_errors() {
        let err = inject_state(&session(), "{missing}").unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_missing_optional_is_empty() {
        let out = inject_state(&session(), "a{missing?}b").unwrap();
        assert_eq!(out, "ab");
    }

    #[test]
    fn test_non_identifier_left_as_literal() {
        let out = inject_state(&session(), "json: {\"k\": 1}").unwrap();
        assert_eq!(out, "json: {\"k\": 1}");
    }

    #[test]
    fn test_no_placeholders() {
        let out = inject_state(&session(), "plain text").unwrap();
        assert_eq!(out, "plain text");
    }
}

use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};

use crate::error::{AppError, Context, Result};

/// Build the request headers: `Accept: application/json` plus configured extras.
///
/// Extra header values may reference environment variables as `${NAME}`.
pub fn build_headers(extra: &BTreeMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    map.insert(ACCEPT, HeaderValue::from_static("application/json"));

    for (key, value) in extra {
        let name = HeaderName::from_bytes(key.as_bytes())
            .with_context(|| format!("Invalid header name: {}", key))?;
        let expanded = expand_env_vars(value)?;
        let header_value = HeaderValue::from_str(&expanded)
            .with_context(|| format!("Invalid header value for {}", key))?;
        map.insert(name, header_value);
    }
    Ok(map)
}

pub fn expand_env_vars(value: &str) -> Result<String> {
    expand_with(value, |name| std::env::var(name).ok())
}

fn expand_with<F>(value: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut name = String::new();
            let mut closed = false;
            for next in chars.by_ref() {
                if next == '}' {
                    closed = true;
                    break;
                }
                name.push(next);
            }

            if !closed {
                return Err(AppError::message(
                    "Unterminated environment placeholder in header",
                ));
            }
            if name.is_empty() {
                return Err(AppError::message(
                    "Encountered empty environment placeholder in header",
                ));
            }

            let value = lookup(&name).ok_or_else(|| {
                AppError::message(format!(
                    "Environment variable {} required by request header is not set",
                    name
                ))
            })?;
            result.push_str(&value);
        } else {
            result.push(ch);
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        (name == "BRAPI_TOKEN").then(|| "secret".to_string())
    }

    #[test]
    fn always_requests_json() {
        let headers = build_headers(&BTreeMap::new()).unwrap();
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn expands_placeholders() {
        let value = expand_with("Bearer ${BRAPI_TOKEN}", lookup).unwrap();
        assert_eq!(value, "Bearer secret");
        assert_eq!(expand_with("plain $value", lookup).unwrap(), "plain $value");
    }

    #[test]
    fn rejects_missing_or_malformed_placeholders() {
        let err = expand_with("Bearer ${OTHER}", lookup).unwrap_err();
        assert!(err.to_string().contains("OTHER"), "unexpected error: {err}");
        assert!(expand_with("Bearer ${BRAPI_TOKEN", lookup).is_err());
        assert!(expand_with("Bearer ${}", lookup).is_err());
    }

    #[test]
    fn rejects_invalid_header_names() {
        let extra = BTreeMap::from([("bad header".to_string(), "x".to_string())]);
        let err = build_headers(&extra).unwrap_err();
        assert!(err.to_string().contains("Invalid header name"));
    }
}

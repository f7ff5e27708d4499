use reqwest::header::HeaderName;

use crate::error::{AppError, Result};
use crate::table::Locale;

use super::RawConfig;

/// Check every field and report all problems at once.
pub fn validate_raw_config(raw: &RawConfig) -> Result<()> {
    let mut issues = Vec::new();

    validate_endpoint(&raw.endpoint, &mut issues);

    if raw.revalidate_secs == 0 {
        issues.push("revalidate_secs must be greater than zero".to_string());
    }
    if raw.timeout_secs == 0 {
        issues.push("timeout_secs must be greater than zero".to_string());
    }
    if raw.snapshots_dir.trim().is_empty() {
        issues.push("snapshots_dir must not be empty".to_string());
    }
    if raw.log_file.trim().is_empty() {
        issues.push("log_file must not be empty".to_string());
    }
    if Locale::parse(&raw.locale).is_none() {
        issues.push(format!(
            "locale `{}` is not supported (use pt-BR or en-US)",
            raw.locale
        ));
    }

    for name in raw.headers.keys() {
        if HeaderName::from_bytes(name.as_bytes()).is_err() {
            issues.push(format!("headers contains an invalid header name `{name}`"));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(AppError::message(format!(
            "Invalid configuration: {}",
            issues.join("; ")
        )))
    }
}

fn validate_endpoint(endpoint: &str, issues: &mut Vec<String>) {
    let endpoint = endpoint.trim();
    if endpoint.is_empty() {
        issues.push("endpoint must not be empty".to_string());
    } else if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        issues.push(format!("endpoint `{endpoint}` must use http or https"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn accepts_builtin_defaults() {
        validate_raw_config(&RawConfig::default()).expect("defaults should be valid");
    }

    #[test]
    fn reports_every_issue_together() {
        let raw = RawConfig {
            endpoint: "ftp://brapi.dev".to_string(),
            revalidate_secs: 0,
            timeout_secs: 0,
            locale: "fr-FR".to_string(),
            headers: BTreeMap::from([("bad header".to_string(), "x".to_string())]),
            ..RawConfig::default()
        };

        let message = validate_raw_config(&raw)
            .expect_err("validation should fail")
            .to_string();
        for expected in ["http or https", "revalidate_secs", "timeout_secs", "fr-FR", "bad header"] {
            assert!(message.contains(expected), "missing `{expected}` in: {message}");
        }
    }

    #[test]
    fn rejects_empty_endpoint() {
        let raw = RawConfig {
            endpoint: "  ".to_string(),
            ..RawConfig::default()
        };
        let err = validate_raw_config(&raw).expect_err("validation should fail");
        assert!(err.to_string().contains("endpoint must not be empty"));
    }
}

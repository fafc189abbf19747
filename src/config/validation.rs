//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, expire window within (0, one day])
//! - Check node URLs parse and end in `/` so path joins stay under them
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SdkConfig → Result<(), Vec<ValidationError>>

use url::Url;

use crate::config::schema::SdkConfig;

/// Longest accepted `$expire` window: one day.
pub const MAX_EXPIRE_SECS: u64 = 86_400;

/// A single semantic problem in a config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn validate_config(config: &SdkConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.node_selection.timeout_ms == 0 {
        errors.push(ValidationError::new("node_selection.timeout_ms", "must be greater than 0"));
    }
    if config.node_selection.status_path.starts_with('/') {
        errors.push(ValidationError::new(
            "node_selection.status_path",
            "must be relative to the node url",
        ));
    }
    if config.transactions.expire_secs == 0 {
        errors.push(ValidationError::new("transactions.expire_secs", "must be greater than 0"));
    } else if config.transactions.expire_secs > MAX_EXPIRE_SECS {
        errors.push(ValidationError::new(
            "transactions.expire_secs",
            format!("must be at most {}", MAX_EXPIRE_SECS),
        ));
    }
    if config.client.request_timeout_secs == 0 {
        errors.push(ValidationError::new("client.request_timeout_secs", "must be greater than 0"));
    }
    if matches!(&config.client.api_secret, Some(secret) if secret.is_empty()) {
        errors.push(ValidationError::new("client.api_secret", "may not be empty when set"));
    }

    for (i, node) in config.node_selection.nodes.iter().enumerate() {
        for (name, value) in [("node_url", &node.node_url), ("minigate_url", &node.minigate_url)] {
            let field = format!("node_selection.nodes[{}].{}", i, name);
            match Url::parse(value) {
                Ok(url) if !matches!(url.scheme(), "http" | "https") => {
                    errors.push(ValidationError::new(field, "scheme must be http or https"));
                }
                Ok(_) if !value.ends_with('/') => {
                    errors.push(ValidationError::new(field, "must end with '/'"));
                }
                Ok(_) => {}
                Err(e) => errors.push(ValidationError::new(field, e.to_string())),
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::nodes::AcNode;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&SdkConfig::default()).is_ok());
    }

    #[test]
    fn test_expire_window_bounds() {
        let mut config = SdkConfig::default();
        config.transactions.expire_secs = MAX_EXPIRE_SECS;
        assert!(validate_config(&config).is_ok());

        for too_long in [MAX_EXPIRE_SECS + 1, 1_000_000_000_000_000, u64::MAX] {
            config.transactions.expire_secs = too_long;
            let errors = validate_config(&config).unwrap_err();
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, "transactions.expire_secs");
        }
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = SdkConfig::default();
        config.node_selection.timeout_ms = 0;
        config.transactions.expire_secs = 0;
        config.node_selection.nodes = vec![
            AcNode::new("https://ok.example/", "not a url"),
            AcNode::new("ftp://x.example/", "https://x.example"),
        ];

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "node_selection.timeout_ms",
                "transactions.expire_secs",
                "node_selection.nodes[0].node_url",
                "node_selection.nodes[1].node_url",
                "node_selection.nodes[1].minigate_url",
            ]
        );
    }
}

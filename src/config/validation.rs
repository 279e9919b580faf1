//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, limits and log settings
//! - Detect conflicting listeners
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ApiConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::ApiConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("observability.metrics_address must differ from listener.bind_address ({0})")]
    AddressConflict(String),

    #[error("security.max_body_size must be greater than zero")]
    ZeroBodyLimit,

    #[error("observability.log_level: '{0}' is not a valid filter directive")]
    InvalidLogLevel(String),

    #[error("store.seed_path must not be empty")]
    EmptySeedPath,
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ApiConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let bind = parse_addr("listener.bind_address", &config.listener.bind_address, &mut errors);

    if config.observability.metrics_enabled {
        let metrics = parse_addr(
            "observability.metrics_address",
            &config.observability.metrics_address,
            &mut errors,
        );
        if let (Some(bind), Some(metrics)) = (bind, metrics) {
            if bind == metrics {
                errors.push(ValidationError::AddressConflict(bind.to_string()));
            }
        }
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if EnvFilter::try_new(&config.observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(config.observability.log_level.clone()));
    }

    if matches!(config.store.seed_path.as_deref(), Some(p) if p.trim().is_empty()) {
        errors.push(ValidationError::EmptySeedPath);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn parse_addr(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) -> Option<SocketAddr> {
    match value.parse() {
        Ok(addr) => Some(addr),
        Err(_) => {
            errors.push(ValidationError::InvalidAddress {
                field,
                value: value.to_string(),
            });
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&ApiConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ApiConfig::default();
        config.listener.bind_address = "localhost".to_string();
        config.security.max_body_size = 0;
        config.store.seed_path = Some(" ".to_string());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(matches!(errors[0], ValidationError::InvalidAddress { field: "listener.bind_address", .. }));
        assert!(errors.contains(&ValidationError::ZeroBodyLimit));
        assert!(errors.contains(&ValidationError::EmptySeedPath));
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = ApiConfig::default();
        config.observability.metrics_address = "nope".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidAddress { field: "observability.metrics_address", .. }));

        config.observability.metrics_address = config.listener.bind_address.clone();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::AddressConflict(_)));
    }

    #[test]
    fn test_log_level_directive() {
        let mut config = ApiConfig::default();
        config.observability.log_level = "mflix_api=debug,tower_http=info".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.log_level = "mflix_api=loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidLogLevel(_)));
    }
}

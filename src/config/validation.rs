//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (pool size > 0, addresses parse)
//! - Ensure the escalator verb cannot shadow a standard method
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::Method;

use crate::config::schema::ServerConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    BindAddress(String),
    #[error("observability.metrics_address '{0}' is not a socket address")]
    MetricsAddress(String),
    #[error("database.path must not be empty")]
    EmptyDatabasePath,
    #[error("database.max_connections must be greater than zero")]
    ZeroConnections,
    #[error("routing.escalator_verb '{0}' is not a valid method token")]
    InvalidVerb(String),
    #[error("routing.escalator_verb '{0}' is a standard method")]
    StandardVerb(String),
    #[error("routing.health_check_path '{0}' must start with '/'")]
    InvalidPath(String),
    #[error("limits.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,
}

const STANDARD_METHODS: [Method; 9] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::HEAD,
    Method::OPTIONS,
    Method::CONNECT,
    Method::PATCH,
    Method::TRACE,
];

/// Check a loaded configuration, collecting every problem found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.database.path.trim().is_empty() {
        errors.push(ValidationError::EmptyDatabasePath);
    }
    if config.database.max_connections == 0 {
        errors.push(ValidationError::ZeroConnections);
    }

    let verb = &config.routing.escalator_verb;
    match Method::from_bytes(verb.as_bytes()) {
        Ok(method) if STANDARD_METHODS.contains(&method) => {
            errors.push(ValidationError::StandardVerb(verb.clone()));
        }
        Ok(_) if !verb.is_empty() => {}
        _ => errors.push(ValidationError::InvalidVerb(verb.clone())),
    }

    if !config.routing.health_check_path.starts_with('/') {
        errors.push(ValidationError::InvalidPath(
            config.routing.health_check_path.clone(),
        ));
    }

    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
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

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&ServerConfig::default()), Ok(()));
    }

    #[test]
    fn test_standard_verb_rejected() {
        let mut config = ServerConfig::default();
        config.routing.escalator_verb = "DELETE".into();

        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::StandardVerb("DELETE".into())])
        );
    }

    #[test]
    fn test_invalid_verb_token_rejected() {
        let mut config = ServerConfig::default();
        config.routing.escalator_verb = "GO AT".into();
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::InvalidVerb("GO AT".into())])
        );

        config.routing.escalator_verb = String::new();
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::InvalidVerb(String::new())])
        );
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ServerConfig::default();
        config.listener.bind_address = "localhost".into();
        config.database.path = " ".into();
        config.database.max_connections = 0;
        config.routing.health_check_path = "health".into();
        config.limits.max_body_bytes = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::EmptyDatabasePath));
        assert!(errors.contains(&ValidationError::InvalidPath("health".into())));
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = ServerConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::MetricsAddress("nowhere".into())])
        );
    }
}

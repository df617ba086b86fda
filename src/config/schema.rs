//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Backing store settings.
    pub database: DatabaseConfig,

    /// Dispatch settings (distinguished verb, health-check path).
    pub routing: RoutingConfig,

    /// Escalator behaviour.
    pub escalator: EscalatorConfig,

    /// Request limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// SQLite store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path of the database file. The escalator deletes this file.
    pub path: String,

    /// Pool size.
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "./database.db".to_string(),
            max_connections: 5,
        }
    }
}

/// Dispatch configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Non-standard method token routed to the escalator.
    pub escalator_verb: String,

    /// Path shared by the GET health check and the escalator.
    pub health_check_path: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            escalator_verb: "GOAT".to_string(),
            health_check_path: "/api/health-check".to_string(),
        }
    }
}

/// How the invocation counter handles concurrent increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CounterDiscipline {
    /// Atomic read-modify-write. No increment is lost.
    #[default]
    Serialized,
    /// Separate load and store. Concurrent calls may observe the same count.
    Racy,
}

/// Escalator configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EscalatorConfig {
    /// Counter synchronization discipline.
    pub counter: CounterDiscipline,

    /// Delay before a scheduled termination fires, in milliseconds.
    pub termination_delay_ms: u64,
}

impl Default for EscalatorConfig {
    fn default() -> Self {
        Self {
            counter: CounterDiscipline::Serialized,
            termination_delay_ms: 1000,
        }
    }
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 1024 * 1024, // 1MB
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

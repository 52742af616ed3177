//! Configuration file support for vuln-relay.
//!
//! Provides YAML-based configuration through `vuln-relay.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::Context;
use reqwest::Url;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::scan_orchestration::services::chunker::{
    DeliveryLimits, DEFAULT_ERROR_QUEUE_CAPACITY, DEFAULT_MAX_BODY_SIZE, DEFAULT_MAX_IN_FLIGHT,
};
use crate::shared::{Result, ScanError};

const CONFIG_FILENAME: &str = "vuln-relay.config.yml";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const MAX_REQUEST_TIMEOUT_SECS: u64 = 600;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    pub platform: PlatformConfig,
    pub delivery: DeliveryConfig,
    pub logging: LoggingConfig,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Where and on whose behalf results are reported.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PlatformConfig {
    /// Base URL receiving scan reports and status events
    pub event_receiver_url: String,
    /// Base URL of the tenant API (exception policies)
    pub api_url: String,
    pub tenant_id: String,
    pub cluster_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    pub max_body_size: usize,
    pub max_in_flight: usize,
    pub error_queue_capacity: usize,
    pub request_timeout_secs: u64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            error_queue_capacity: DEFAULT_ERROR_QUEUE_CAPACITY,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl DeliveryConfig {
    pub fn limits(&self) -> DeliveryLimits {
        DeliveryLimits {
            max_body_size: self.max_body_size,
            max_in_flight: self.max_in_flight,
            error_queue_capacity: self.error_queue_capacity,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `vuln_relay=debug`
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Json,
        }
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ServiceConfig> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\nHint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ServiceConfig = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\nHint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ServiceConfig>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
pub fn validate_config(config: &ServiceConfig) -> Result<()> {
    validate_url("platform.event_receiver_url", &config.platform.event_receiver_url)?;
    validate_url("platform.api_url", &config.platform.api_url)?;

    let delivery = &config.delivery;
    if delivery.max_body_size == 0 {
        return Err(invalid("delivery.max_body_size", "must be greater than 0"));
    }
    if delivery.max_in_flight == 0 {
        return Err(invalid("delivery.max_in_flight", "must be at least 1"));
    }
    if delivery.error_queue_capacity == 0 {
        return Err(invalid("delivery.error_queue_capacity", "must be at least 1"));
    }
    if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&delivery.request_timeout_secs) {
        return Err(invalid(
            "delivery.request_timeout_secs",
            &format!("must be between 1 and {}", MAX_REQUEST_TIMEOUT_SECS),
        ));
    }
    if config.logging.level.trim().is_empty() {
        return Err(invalid("logging.level", "must not be empty"));
    }
    Ok(())
}

fn validate_url(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, "is required"));
    }
    let url = Url::parse(value).map_err(|e| invalid(field, &format!("is not a valid URL ({})", e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(
            field,
            &format!("must use http or https, found '{}'", other),
        )),
    }
}

fn invalid(field: &str, reason: &str) -> anyhow::Error {
    ScanError::InvalidConfig {
        field: field.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ServiceConfig) {
    for key in config.unknown_fields.keys() {
        tracing::warn!(field = %key, "unknown config field will be ignored");
    }
}

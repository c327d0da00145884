//! Configuration validation for eosl-inventory.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, BehaviorConfig, ChangeLogConfig, InventoryConfig, OutputConfig, TuiConfig};
use crate::reports::ReportFormat;

/// Inclusive bounds for the nearing window.
pub const NEARING_DAYS_RANGE: std::ops::RangeInclusive<u32> = 1..=3650;

/// Theme names the dashboard understands.
pub const VALID_THEMES: &[&str] = &["dark", "light", "high-contrast"];

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.inventory.validate());
        errors.extend(self.change_log.validate());
        errors.extend(self.output.validate());
        errors.extend(self.behavior.validate());
        errors.extend(self.tui.validate());
        errors
    }
}

impl Validatable for InventoryConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !NEARING_DAYS_RANGE.contains(&self.nearing_days) {
            errors.push(ConfigError::new(
                "inventory.nearing_days",
                format!(
                    "Nearing window must be between {} and {} days, got {}",
                    NEARING_DAYS_RANGE.start(),
                    NEARING_DAYS_RANGE.end(),
                    self.nearing_days
                ),
            ));
        }
        if let Some(ref path) = self.path {
            if path.as_os_str().is_empty() {
                errors.push(ConfigError::new("inventory.path", "Path must not be empty"));
            }
        }
        errors
    }
}

impl Validatable for ChangeLogConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.path.as_os_str().is_empty() {
            errors.push(ConfigError::new("change_log.path", "Path must not be empty"));
        }
        if self.actor.trim().is_empty() {
            errors.push(ConfigError::new("change_log.actor", "Actor must not be blank"));
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError::new(
                        "output.file",
                        format!("Parent directory does not exist: {}", parent.display()),
                    ));
                }
            }
            if self.format == ReportFormat::Tui {
                errors.push(ConfigError::new(
                    "output.format",
                    "The dashboard cannot be written to a file",
                ));
            }
        }

        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}

impl Validatable for TuiConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !VALID_THEMES.contains(&self.theme.as_str()) {
            errors.push(ConfigError::new(
                "tui.theme",
                format!(
                    "Invalid theme '{}'. Valid options: {}",
                    self.theme,
                    VALID_THEMES.join(", ")
                ),
            ));
        }

        if !(10..=5000).contains(&self.tick_rate_ms) {
            errors.push(ConfigError::new(
                "tui.tick_rate_ms",
                format!("Tick rate must be between 10 and 5000 ms, got {}", self.tick_rate_ms),
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_nearing_days_bounds() {
        let mut config = InventoryConfig::default();
        config.nearing_days = 0;
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "inventory.nearing_days");

        config.nearing_days = 3650;
        assert!(config.is_valid());
        config.nearing_days = 3651;
        assert!(!config.is_valid());
        config.nearing_days = 1;
        assert!(config.is_valid());
    }

    #[test]
    fn test_blank_actor_rejected() {
        let config = ChangeLogConfig {
            actor: "  ".to_string(),
            ..Default::default()
        };
        let errors = config.validate();
        assert_eq!(errors[0].field, "change_log.actor");
    }

    #[test]
    fn test_invalid_theme() {
        let config = TuiConfig {
            theme: "neon".to_string(),
            ..Default::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("high-contrast"));
    }

    #[test]
    fn test_output_file_missing_parent() {
        let config = OutputConfig {
            file: Some(PathBuf::from("/nonexistent/dir/out.json")),
            ..Default::default()
        };
        assert!(!config.is_valid());
    }

    #[test]
    fn test_app_config_collects_all_errors() {
        let mut config = AppConfig::default();
        config.inventory.nearing_days = 0;
        config.tui.theme = "neon".to_string();
        assert_eq!(config.validate().len(), 2);
        assert_eq!(
            config.validate()[0].to_string(),
            "inventory.nearing_days: Nearing window must be between 1 and 3650 days, got 0"
        );
    }
}

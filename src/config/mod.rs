//! Configuration module for eosl-inventory.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for the nearing window
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust
//! use eosl_inventory::config::{AppConfig, ConfigPreset, Validatable};
//!
//! let config = AppConfig::builder()
//!     .nearing_days(120)
//!     .actor("alice")
//!     .build();
//! assert!(config.is_valid());
//!
//! let strict = AppConfig::from_preset(ConfigPreset::Strict);
//! assert_eq!(strict.inventory.nearing_days, 30);
//! ```
//!
//! # Configuration File
//!
//! Place a `.eosl-inventory.yaml` file in your working directory or
//! `~/.config/eosl-inventory/`:
//!
//! ```yaml
//! inventory:
//!   path: servers.csv
//!   nearing_days: 120
//! change_log:
//!   path: change_log.csv
//!   actor: alice
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::ConfigPreset;
pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, ChangeLogConfig, ContactConfig, ExportConfig,
    IntimateConfig, IntimateTarget, InventoryConfig, LogConfig, OutputConfig, TicketConfig,
    TuiConfig, ViewConfig,
};
pub use validation::{ConfigError, Validatable, NEARING_DAYS_RANGE, VALID_THEMES};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    user_config_dir, ConfigFileError, CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// The schema documents every option accepted in `.eosl-inventory.yaml`
/// and can be used by editors for validation and autocompletion.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

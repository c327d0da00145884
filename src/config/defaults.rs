//! Named configuration presets for eosl-inventory.

use super::types::{AppConfig, InventoryConfig};

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common planning horizons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ConfigPreset {
    /// 90-day nearing window
    #[default]
    Standard,
    /// 180-day window for long procurement cycles
    Conservative,
    /// 30-day window, only imminent expiries are flagged
    Strict,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Conservative => "conservative",
            Self::Strict => "strict",
        }
    }

    /// Nearing window of this preset.
    #[must_use]
    pub const fn nearing_days(&self) -> u32 {
        match self {
            Self::Standard => 90,
            Self::Conservative => 180,
            Self::Strict => 30,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Standard => "Flag servers within 90 days of EOSL",
            Self::Conservative => "Flag servers within 180 days of EOSL",
            Self::Strict => "Flag servers within 30 days of EOSL",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Standard, Self::Conservative, Self::Strict]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        Self {
            inventory: InventoryConfig {
                nearing_days: preset.nearing_days(),
                ..InventoryConfig::default()
            },
            ..Self::default()
        }
    }
}

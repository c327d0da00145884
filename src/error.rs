//! Unified error types for eosl-inventory.
//!
//! Library code returns [`InventoryError`]; the binary and the command
//! handlers wrap it in `anyhow` with additional context.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for eosl-inventory operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum InventoryError {
    /// Errors while reading the inventory CSV
    #[error("Failed to load inventory: {context}")]
    Load {
        context: String,
        #[source]
        source: LoadErrorKind,
    },

    /// Errors while reading or appending to the change log
    #[error("Change log operation failed: {context}")]
    ChangeLog {
        context: String,
        #[source]
        source: ChangeLogErrorKind,
    },

    /// Errors while writing an export
    #[error("Export failed: {context}")]
    Export {
        context: String,
        #[source]
        source: ExportErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific load error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LoadErrorKind {
    #[error("Inventory file not found")]
    NotFound,

    #[error("Inventory file has no header row")]
    EmptyFile,

    #[error("Missing required column: {column}")]
    MissingColumn { column: String },

    #[error("Malformed CSV: {0}")]
    Csv(String),
}

/// Specific change log error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ChangeLogErrorKind {
    #[error("Malformed change log row: {0}")]
    Csv(String),

    #[error("Could not append entry: {0}")]
    Write(String),
}

/// Specific export error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ExportErrorKind {
    #[error("CSV writer failed: {0}")]
    Csv(String),

    #[error("JSON serialization failed: {0}")]
    JsonSerialization(String),

    #[error("Output format not supported for this operation: {0}")]
    UnsupportedFormat(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for eosl-inventory operations
pub type Result<T> = std::result::Result<T, InventoryError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl InventoryError {
    /// Create a load error with context
    pub fn load(context: impl Into<String>, source: LoadErrorKind) -> Self {
        Self::Load {
            context: context.into(),
            source,
        }
    }

    /// Create a load error for a missing column
    pub fn missing_column(column: impl Into<String>, path: impl Into<String>) -> Self {
        Self::load(
            format!("reading header of {}", path.into()),
            LoadErrorKind::MissingColumn {
                column: column.into(),
            },
        )
    }

    /// Create a change log error
    pub fn change_log(context: impl Into<String>, source: ChangeLogErrorKind) -> Self {
        Self::ChangeLog {
            context: context.into(),
            source,
        }
    }

    /// Create an export error
    pub fn export(context: impl Into<String>, source: ExportErrorKind) -> Self {
        Self::Export {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Message including every source in the chain, for one-line reports.
    #[must_use]
    pub fn full_message(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            let text = err.to_string();
            if !message.contains(&text) {
                message = format!("{message}: {text}");
            }
            source = err.source();
        }
        message
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for InventoryError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for InventoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::export(
            "JSON serialization",
            ExportErrorKind::JsonSerialization(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are prepended to the existing context, so an error
/// raised deep inside the loader reads `"outer: inner: cause"`.
///
/// # Example
///
/// ```ignore
/// use eosl_inventory::error::ErrorContext;
///
/// let store = ChangeLogStore::open(&path);
/// store
///     .append(&entry)
///     .with_context(|| format!("marking {} intimated", entry.hostname))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<InventoryError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: InventoryError, new_ctx: &str) -> InventoryError {
    match err {
        InventoryError::Load {
            context: existing,
            source,
        } => InventoryError::Load {
            context: chain_context(new_ctx, &existing),
            source,
        },
        InventoryError::ChangeLog {
            context: existing,
            source,
        } => InventoryError::ChangeLog {
            context: chain_context(new_ctx, &existing),
            source,
        },
        InventoryError::Export {
            context: existing,
            source,
        } => InventoryError::Export {
            context: chain_context(new_ctx, &existing),
            source,
        },
        InventoryError::Io {
            path,
            message,
            source,
        } => InventoryError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        InventoryError::Config(msg) => InventoryError::Config(chain_context(new_ctx, &msg)),
        InventoryError::Validation(msg) => {
            InventoryError::Validation(chain_context(new_ctx, &msg))
        }
    }
}

/// Chain two context strings as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to an error with context from a closure.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| InventoryError::Validation(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| InventoryError::Validation(f().into()))
    }
}

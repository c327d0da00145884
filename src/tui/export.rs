//! Timestamped CSV exports written from the dashboard.

use crate::error::{ErrorContext, Result};
use crate::pipeline::{timestamped_path, Snapshot};
use crate::reports::{write_export, ExportKind};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Result of an export operation
#[derive(Debug)]
pub struct ExportResult {
    pub path: PathBuf,
    pub rows: usize,
}

impl ExportResult {
    /// Status bar text for this export.
    pub fn message(&self, kind: ExportKind) -> String {
        if self.rows == 0 {
            format!("No rows to export; wrote header-only {}", self.path.display())
        } else {
            format!("Exported {} {} row(s) to {}", self.rows, kind.label(), self.path.display())
        }
    }
}

/// Write the visible rows of `snapshot` to `<dir>/<stem>_<timestamp>.csv`.
pub fn export_visible(kind: ExportKind, snapshot: &Snapshot, dir: &Path) -> Result<ExportResult> {
    let path = timestamped_path(dir, kind.file_stem());
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    let rows = write_export(kind, snapshot.filtered(), &mut writer, snapshot.today)?;
    writer.flush()?;
    tracing::debug!("Dashboard export: {} row(s) to {}", rows, path.display());
    Ok(ExportResult { path, rows })
}

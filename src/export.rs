// src/export.rs

//! Persists parsed result sets under `<root>/<city>/<model>/<scenario>.csv`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{NetunoBatchError, Result};
use crate::results::ResultSet;

/// Writes result sets into the destination layout. Constructed once against
/// the export root for the whole batch.
#[derive(Debug, Clone)]
pub struct Exporter {
    root: PathBuf,
}

impl Exporter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Destination file for one (city, model, scenario) key.
    pub fn result_path(&self, city: &str, model: &str, scenario: &str) -> PathBuf {
        self.root
            .join(city)
            .join(model)
            .join(format!("{scenario}.csv"))
    }

    /// Write `records` under the key's deterministic path, creating
    /// intermediate directories as needed. Re-exporting the same key within
    /// one batch overwrites the previous file.
    pub fn save_results(
        &self,
        city: &str,
        model: &str,
        scenario: &str,
        records: &ResultSet,
    ) -> Result<PathBuf> {
        let path = self.result_path(city, model, scenario);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(NetunoBatchError::ExportWrite)?;
        }

        let mut out = String::new();
        out.push_str(&records.columns.join(";"));
        out.push('\n');
        for row in &records.rows {
            out.push_str(&row.date);
            for value in &row.values {
                out.push(';');
                out.push_str(&value.to_string());
            }
            out.push('\n');
        }

        fs::write(&path, out).map_err(NetunoBatchError::ExportWrite)?;
        debug!(path = %path.display(), rows = records.rows.len(), "exported results");
        Ok(path)
    }
}

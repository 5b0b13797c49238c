// src/meta.rs

//! Input file metadata.
//!
//! Precipitation files follow `<city>_<model>_<scenario>.csv`, e.g.
//! `Florianopolis_HadGEM2-ES_rcp45.csv`: exactly two underscores, all three
//! tokens non-empty. Hyphens and dots inside tokens are fine.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::errors::{NetunoBatchError, Result};

static FILE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<city>[^_]+)_(?<model>[^_]+)_(?<scenario>[^_]+)$")
        .expect("file name convention regex is valid")
});

/// One precipitation input file and the identifiers derived from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    pub city: String,
    pub model: String,
    pub scenario: String,
}

impl InputFile {
    /// Derive (city, model, scenario) from the file name. Pure; reads
    /// nothing but the name.
    pub fn from_path(path: &Path) -> Result<Self> {
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| NetunoBatchError::UnparsableFileName(path.to_path_buf()))?;

        let caps = FILE_NAME_RE
            .captures(stem)
            .ok_or_else(|| NetunoBatchError::UnparsableFileName(path.to_path_buf()))?;

        Ok(Self {
            path: path.to_path_buf(),
            city: caps["city"].to_string(),
            model: caps["model"].to_string(),
            scenario: caps["scenario"].to_string(),
        })
    }
}

// src/results.rs

//! Parses the CSV artifact Netuno writes after a run.
//!
//! Netuno exports use `;` separators and Brazilian decimal commas; values
//! are normalized to plain `f64` here. The first column is the date, every
//! further column a simulated series. The source artifact is never mutated;
//! its lifecycle belongs to the driver.

use std::fs;
use std::path::Path;

use crate::errors::{NetunoBatchError, Result};

/// Structured results of one simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    /// Column names from the header row, date column included.
    pub columns: Vec<String>,
    pub rows: Vec<ResultRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub date: String,
    pub values: Vec<f64>,
}

pub fn parse_results(path: &Path) -> Result<ResultSet> {
    let contents = fs::read_to_string(path).map_err(|err| NetunoBatchError::ResultParse {
        path: path.to_path_buf(),
        reason: format!("reading artifact: {err}"),
    })?;

    let parse_error = |reason: String| NetunoBatchError::ResultParse {
        path: path.to_path_buf(),
        reason,
    };

    let mut lines = contents.lines().enumerate();

    let (_, header) = lines
        .find(|(_, line)| !line.trim().is_empty())
        .ok_or_else(|| parse_error("artifact is empty".to_string()))?;
    let columns: Vec<String> = header.split(';').map(|col| col.trim().to_string()).collect();
    if columns.len() < 2 {
        return Err(parse_error(
            "header must name a date column and at least one value column".to_string(),
        ));
    }

    let mut rows = Vec::new();
    for (idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = line.split(';');
        let date = fields
            .next()
            .map(|field| field.trim().to_string())
            .unwrap_or_default();

        let mut values = Vec::with_capacity(columns.len() - 1);
        for field in fields {
            let value = parse_value(field)
                .map_err(|reason| parse_error(format!("line {}: {reason}", idx + 1)))?;
            values.push(value);
        }
        if values.len() != columns.len() - 1 {
            return Err(parse_error(format!(
                "line {}: expected {} value fields, found {}",
                idx + 1,
                columns.len() - 1,
                values.len()
            )));
        }
        rows.push(ResultRow { date, values });
    }

    if rows.is_empty() {
        return Err(parse_error("artifact has no data rows".to_string()));
    }

    Ok(ResultSet { columns, rows })
}

fn parse_value(raw: &str) -> std::result::Result<f64, String> {
    let normalized = raw.trim().replace(',', ".");
    normalized
        .parse::<f64>()
        .map_err(|_| format!("not a number: {raw:?}"))
}

// src/export/logic.rs

use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::VacationExport;
use crate::models::VacationRequest;
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;
use std::collections::HashMap;
use tracing::debug;

/// High level export of a vacation list.
pub struct ExportLogic;

impl ExportLogic {
    /// Write `rows` (already narrowed by visibility and filters) to `file`.
    ///
    /// `file` must be absolute once `~` is expanded. Returns the number of
    /// rows written; an empty list writes nothing.
    pub fn export(
        rows: &[&VacationRequest],
        names: &HashMap<i64, String>,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<usize> {
        let path = expand_tilde(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        if rows.is_empty() {
            warning("No vacation requests match the selected filters.");
            return Ok(0);
        }

        ensure_writable(&path, force)?;

        let data: Vec<VacationExport> = rows
            .iter()
            .map(|v| VacationExport::from_request(v, names))
            .collect();
        debug!(rows = data.len(), format = format.as_str(), "exporting");

        match format {
            ExportFormat::Csv => export_csv(&data, &path)?,
            ExportFormat::Json => export_json(&data, &path)?,
        }

        Ok(data.len())
    }
}

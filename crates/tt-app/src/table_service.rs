//! Table requests: load CSV, classify the grid, interpolate or mesh.

use std::path::Path;

use serde::Serialize;
use tracing::debug;
use tt_tables::{
    CsvTable, GridDecision, InterpolationTable, Interpolated, Interpolator, MeshGrid, build,
};

use crate::error::{AppError, AppResult};
use crate::request::{InterpolationRequest, MeshRequest, TableSelection};

/// Rows shown by a preview when no count is given.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Header and leading rows of a CSV file, for picking the x, y and value columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePreview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total_rows: usize,
}

pub fn preview_table(path: &Path, rows: usize) -> AppResult<TablePreview> {
    let csv = CsvTable::from_path(path)?;
    Ok(TablePreview {
        columns: csv.headers().to_vec(),
        rows: csv.head(rows).to_vec(),
        total_rows: csv.len(),
    })
}

/// Load the CSV and pivot the selected value column.
pub fn load_decision(selection: &TableSelection) -> AppResult<(InterpolationTable, GridDecision)> {
    let csv = CsvTable::from_path(&selection.csv)?;
    let table = InterpolationTable::from_csv(&csv, &selection.x, &selection.y)?;
    let decision = build(&table, &selection.value)?;
    debug!(
        path = %selection.csv.display(),
        rows = table.len(),
        shape = ?decision.shape(),
        "table loaded"
    );
    Ok((table, decision))
}

/// Interpolation outcome together with the point it was evaluated at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterpolationResponse {
    pub column: String,
    pub x_label: String,
    pub y_label: String,
    pub x: f64,
    pub y: f64,
    /// True when the point came from the column medians.
    pub default_point: bool,
    #[serde(flatten)]
    pub result: Interpolated,
}

pub fn run_interpolation(request: &InterpolationRequest) -> AppResult<InterpolationResponse> {
    let (table, decision) = load_decision(&request.table)?;
    let ([x, y], default_point) = match request.at {
        Some(point) => (point, false),
        None => {
            let (mx, my) = table.median_point().ok_or_else(|| {
                AppError::InvalidInput("table has no rows to take a median from".to_string())
            })?;
            ([mx, my], true)
        }
    };

    let result = tt_tables::interpolate(&decision, x, y, request.method)?;
    Ok(InterpolationResponse {
        column: decision.column().to_string(),
        x_label: decision.x_label().to_string(),
        y_label: decision.y_label().to_string(),
        x,
        y,
        default_point,
        result,
    })
}

pub fn run_mesh(request: &MeshRequest) -> AppResult<MeshGrid> {
    let (_, decision) = load_decision(&request.table)?;
    match request.resample {
        None => Ok(decision.to_mesh_grid()),
        Some(r) => {
            let interp = Interpolator::from_decision(&decision)?;
            Ok(interp.resample(&decision, r.nx, r.ny, r.method)?)
        }
    }
}

//! Grid-shape decision: does a value column fill the full x × y product?

use serde::Serialize;

use crate::error::TableResult;
use crate::table::InterpolationTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GridShape {
    /// Every (x, y) cell of the distinct-coordinate product holds a value.
    Regular,
    /// Gaps or irregular placement; use scattered interpolation.
    Scattered,
}

/// A sample with a numeric value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

/// Pivoted view of one value column plus its shape classification.
#[derive(Debug, Clone, PartialEq)]
pub struct GridDecision {
    x_label: String,
    y_label: String,
    column: String,
    shape: GridShape,
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Row-major `xs.len() × ys.len()`; duplicates averaged.
    cells: Vec<Option<f64>>,
    samples: Vec<Sample>,
}

/// Pivot `value_column` onto the sorted distinct coordinates and classify the result.
///
/// Only a missing column is an error: blank or non-numeric cells make the
/// table scattered instead.
pub fn build(table: &InterpolationTable, value_column: &str) -> TableResult<GridDecision> {
    let idx = table.value_index(value_column)?;
    let xs = table.distinct_x();
    let ys = table.distinct_y();

    let mut sums = vec![0.0; xs.len() * ys.len()];
    let mut counts = vec![0usize; xs.len() * ys.len()];
    let mut samples = Vec::with_capacity(table.len());

    for row in table.rows() {
        let Some(value) = row.values[idx] else {
            continue;
        };
        samples.push(Sample {
            x: row.x,
            y: row.y,
            value,
        });
        if let (Some(i), Some(j)) = (position(&xs, row.x), position(&ys, row.y)) {
            sums[i * ys.len() + j] += value;
            counts[i * ys.len() + j] += 1;
        }
    }

    let cells: Vec<Option<f64>> = sums
        .iter()
        .zip(&counts)
        .map(|(&sum, &n)| (n > 0).then(|| sum / n as f64))
        .collect();

    let shape = if !cells.is_empty() && cells.iter().all(Option::is_some) {
        GridShape::Regular
    } else {
        GridShape::Scattered
    };

    Ok(GridDecision {
        x_label: table.x_label().to_string(),
        y_label: table.y_label().to_string(),
        column: value_column.to_string(),
        shape,
        xs,
        ys,
        cells,
        samples,
    })
}

fn position(sorted: &[f64], v: f64) -> Option<usize> {
    sorted.binary_search_by(|a| a.total_cmp(&v)).ok()
}

impl GridDecision {
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn is_regular(&self) -> bool {
        self.shape == GridShape::Regular
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    pub fn cell(&self, i: usize, j: usize) -> Option<f64> {
        if i >= self.xs.len() || j >= self.ys.len() {
            return None;
        }
        self.cells[i * self.ys.len() + j]
    }

    /// Filled grid values, row-major; `None` unless the shape is regular.
    pub fn grid_values(&self) -> Option<Vec<f64>> {
        if !self.is_regular() {
            return None;
        }
        self.cells.iter().copied().collect()
    }

    /// Raw samples that carry a value, in table order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// The pivoted matrix for plotting; rows follow `xs`, columns follow `ys`.
    pub fn to_mesh_grid(&self) -> MeshGrid {
        MeshGrid {
            x_label: self.x_label.clone(),
            y_label: self.y_label.clone(),
            value_label: self.column.clone(),
            xs: self.xs.clone(),
            ys: self.ys.clone(),
            z: self
                .cells
                .chunks(self.ys.len().max(1))
                .take(self.xs.len())
                .map(<[Option<f64>]>::to_vec)
                .collect(),
        }
    }
}

/// Pivoted value matrix ready for a pseudocolor plot. Gaps are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshGrid {
    pub x_label: String,
    pub y_label: String,
    pub value_label: String,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub z: Vec<Vec<Option<f64>>>,
}

impl MeshGrid {
    /// (min, max) over populated cells.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.z
            .iter()
            .flatten()
            .flatten()
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Matrix as CSV: first column is x, header row lists y values.
    pub fn to_csv(&self) -> String {
        let mut out = format!("{}\\{}", self.x_label, self.y_label);
        for y in &self.ys {
            out.push_str(&format!(",{}", y));
        }
        out.push('\n');
        for (x, row) in self.xs.iter().zip(&self.z) {
            out.push_str(&x.to_string());
            for cell in row {
                match cell {
                    Some(v) => out.push_str(&format!(",{}", v)),
                    None => out.push(','),
                }
            }
            out.push('\n');
        }
        out
    }
}

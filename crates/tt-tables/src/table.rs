//! Interpolation tables: x/y coordinates plus one or more value columns.

use tracing::warn;
use tt_core::numeric::{median, sorted_distinct};

use crate::csv::CsvTable;
use crate::error::{TableError, TableResult};

/// One sample row. Values are `None` where the source cell was blank or non-numeric.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub x: f64,
    pub y: f64,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterpolationTable {
    x_label: String,
    y_label: String,
    value_labels: Vec<String>,
    rows: Vec<TableRow>,
}

impl InterpolationTable {
    pub fn new(
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        value_labels: Vec<String>,
        rows: Vec<TableRow>,
    ) -> TableResult<Self> {
        if value_labels.is_empty() {
            return Err(TableError::InvalidSelection {
                what: "at least one value column is required".to_string(),
            });
        }
        if let Some(bad) = rows.iter().find(|r| r.values.len() != value_labels.len()) {
            return Err(TableError::InvalidSelection {
                what: format!(
                    "row at ({}, {}) has {} values, expected {}",
                    bad.x,
                    bad.y,
                    bad.values.len(),
                    value_labels.len()
                ),
            });
        }
        if let Some(bad) = rows.iter().find(|r| !r.x.is_finite() || !r.y.is_finite()) {
            return Err(TableError::InvalidSelection {
                what: format!("non-finite coordinates ({}, {})", bad.x, bad.y),
            });
        }

        Ok(Self {
            x_label: x_label.into(),
            y_label: y_label.into(),
            value_labels,
            rows,
        })
    }

    /// Select x and y columns from a CSV table; every other column becomes a value column.
    ///
    /// Rows whose x or y cell is not a finite number are skipped.
    pub fn from_csv(csv: &CsvTable, x_col: &str, y_col: &str) -> TableResult<Self> {
        if x_col == y_col {
            return Err(TableError::InvalidSelection {
                what: format!("x and y must be different columns (both '{}')", x_col),
            });
        }
        let xs = csv.numeric_column(x_col)?;
        let ys = csv.numeric_column(y_col)?;

        let value_labels: Vec<String> = csv
            .headers()
            .iter()
            .filter(|h| h.as_str() != x_col && h.as_str() != y_col)
            .cloned()
            .collect();
        let value_columns = value_labels
            .iter()
            .map(|label| csv.numeric_column(label))
            .collect::<TableResult<Vec<_>>>()?;

        let mut rows = Vec::with_capacity(csv.len());
        let mut skipped = 0usize;
        for (i, (x, y)) in xs.into_iter().zip(ys).enumerate() {
            match (x, y) {
                (Some(x), Some(y)) => rows.push(TableRow {
                    x,
                    y,
                    values: value_columns.iter().map(|col| col[i]).collect(),
                }),
                _ => skipped += 1,
            }
        }
        if skipped > 0 {
            warn!(skipped, x_col, y_col, "rows without numeric coordinates skipped");
        }

        Self::new(x_col, y_col, value_labels, rows)
    }

    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    pub fn value_labels(&self) -> &[String] {
        &self.value_labels
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn value_index(&self, column: &str) -> TableResult<usize> {
        self.value_labels
            .iter()
            .position(|l| l == column)
            .ok_or_else(|| TableError::MissingColumn {
                column: column.to_string(),
            })
    }

    /// Sorted distinct x coordinates.
    pub fn distinct_x(&self) -> Vec<f64> {
        sorted_distinct(self.rows.iter().map(|r| r.x))
    }

    /// Sorted distinct y coordinates.
    pub fn distinct_y(&self) -> Vec<f64> {
        sorted_distinct(self.rows.iter().map(|r| r.y))
    }

    /// Median (x, y), the default query point.
    pub fn median_point(&self) -> Option<(f64, f64)> {
        Some((
            median(self.rows.iter().map(|r| r.x))?,
            median(self.rows.iter().map(|r| r.y))?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "T,P,h,s\n300,100,1,10\n300,200,2,20\n310,100,3,\n310,200,4,40\nbad,100,5,50\n";

    #[test]
    fn from_csv_selects_value_columns() {
        let csv = CsvTable::parse(CSV).unwrap();
        let table = InterpolationTable::from_csv(&csv, "T", "P").unwrap();
        assert_eq!(table.value_labels(), ["h", "s"]);
        assert_eq!(table.len(), 4);
        assert_eq!(table.rows()[2].values, vec![Some(3.0), None]);
        assert_eq!(table.distinct_x(), vec![300.0, 310.0]);
        assert_eq!(table.distinct_y(), vec![100.0, 200.0]);
        assert_eq!(table.value_index("s").unwrap(), 1);
    }

    #[test]
    fn any_column_can_be_an_axis() {
        let csv = CsvTable::parse(CSV).unwrap();
        let table = InterpolationTable::from_csv(&csv, "h", "T").unwrap();
        assert_eq!(table.value_labels(), ["P", "s"]);
    }

    #[test]
    fn same_axis_twice_is_rejected() {
        let csv = CsvTable::parse(CSV).unwrap();
        assert!(matches!(
            InterpolationTable::from_csv(&csv, "T", "T"),
            Err(TableError::InvalidSelection { .. })
        ));
    }

    #[test]
    fn two_column_csv_has_no_values() {
        let csv = CsvTable::parse("x,y\n1,2\n").unwrap();
        assert!(InterpolationTable::from_csv(&csv, "x", "y").is_err());
    }

    #[test]
    fn median_point() {
        let csv = CsvTable::parse(CSV).unwrap();
        let table = InterpolationTable::from_csv(&csv, "T", "P").unwrap();
        assert_eq!(table.median_point(), Some((305.0, 150.0)));
    }
}

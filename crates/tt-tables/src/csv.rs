//! Minimal comma-separated table reader.
//!
//! First non-empty line is the header. Fields may be double-quoted; a doubled
//! quote inside a quoted field is a literal quote.

use std::fs;
use std::path::Path;

use crate::error::{TableError, TableResult};

#[derive(Debug, Clone, PartialEq)]
pub struct CsvTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn parse(text: &str) -> TableResult<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim_end_matches('\r')))
            .filter(|(_, line)| !line.trim().is_empty());

        let (header_line, header) = lines.next().ok_or(TableError::Parse {
            line: 1,
            message: "missing header row".to_string(),
        })?;
        let headers: Vec<String> = split_record(header, header_line)?
            .into_iter()
            .map(|h| h.trim().to_string())
            .collect();

        for (i, name) in headers.iter().enumerate() {
            if name.is_empty() {
                return Err(TableError::Parse {
                    line: header_line,
                    message: format!("empty column name at position {}", i + 1),
                });
            }
            if headers[..i].contains(name) {
                return Err(TableError::Parse {
                    line: header_line,
                    message: format!("duplicate column name '{}'", name),
                });
            }
        }

        let mut rows = Vec::new();
        for (line_no, line) in lines {
            let fields = split_record(line, line_no)?;
            if fields.len() != headers.len() {
                return Err(TableError::Parse {
                    line: line_no,
                    message: format!(
                        "expected {} fields, found {}",
                        headers.len(),
                        fields.len()
                    ),
                });
            }
            rows.push(fields);
        }

        Ok(Self { headers, rows })
    }

    pub fn from_path(path: &Path) -> TableResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> TableResult<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| TableError::MissingColumn {
                column: name.to_string(),
            })
    }

    /// Cells of one column read as numbers; blanks and non-numeric text become `None`.
    pub fn numeric_column(&self, name: &str) -> TableResult<Vec<Option<f64>>> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| parse_cell(&row[idx])).collect())
    }

    /// First `n` rows, for previews.
    pub fn head(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..n.min(self.rows.len())]
    }
}

/// Parse a single cell; only finite numbers count.
pub fn parse_cell(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn split_record(line: &str, line_no: usize) -> TableResult<Vec<String>> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(TableError::Parse {
            line: line_no,
            message: "unterminated quoted field".to_string(),
        });
    }
    fields.push(field);
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_table() {
        let table = CsvTable::parse("T,P,h\n300,1e5,112.0\n310,1e5,154.0\n").unwrap();
        assert_eq!(table.headers(), ["T", "P", "h"]);
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.numeric_column("h").unwrap(),
            vec![Some(112.0), Some(154.0)]
        );
    }

    #[test]
    fn quoted_fields_and_crlf() {
        let table = CsvTable::parse("\u{feff}\"T (K)\",\"P, kPa\",v\r\n1,\"2\",\"a \"\"b\"\"\"\r\n").unwrap();
        assert_eq!(table.headers(), ["T (K)", "P, kPa", "v"]);
        assert_eq!(table.head(1)[0][2], "a \"b\"");
    }

    #[test]
    fn non_numeric_cells_are_none() {
        let table = CsvTable::parse("x,y,v\n1,2,\n1,3,n/a\n1,4,inf\n").unwrap();
        assert_eq!(table.numeric_column("v").unwrap(), vec![None, None, None]);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = CsvTable::parse("x,y,v\n1,2\n").unwrap_err();
        assert!(matches!(err, TableError::Parse { line: 2, .. }));
    }

    #[test]
    fn duplicate_headers_are_rejected() {
        assert!(CsvTable::parse("x,x,v\n1,2,3\n").is_err());
    }

    #[test]
    fn missing_column() {
        let table = CsvTable::parse("x,y,v\n").unwrap();
        assert!(table.is_empty());
        assert!(matches!(
            table.numeric_column("z"),
            Err(TableError::MissingColumn { .. })
        ));
    }
}

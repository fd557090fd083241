//! tt-tables: two-dimensional table interpolation for termotables.
//!
//! Provides:
//! - CSV loading and x/y/value column selection
//! - Grid-shape decision (regular product grid vs scattered samples)
//! - Regular-grid interpolation (nearest, bilinear, bicubic spline)
//! - Scattered interpolation over a Delaunay triangulation
//! - Mesh grids and shaded text rendering for plotting
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use tt_tables::{CsvTable, InterpMethod, InterpolationTable, build, interpolate};
//!
//! let csv = CsvTable::from_path(Path::new("table.csv")).unwrap();
//! let table = InterpolationTable::from_csv(&csv, "T", "P").unwrap();
//! let decision = build(&table, "rho").unwrap();
//! let r = interpolate(&decision, 350.0, 2.0e5, InterpMethod::Linear).unwrap();
//! println!("rho = {} ({:?})", r.value, r.shape);
//! ```

pub mod csv;
pub mod delaunay;
pub mod error;
pub mod grid;
pub mod heatmap;
pub mod interpolate;
pub mod method;
pub mod regular;
pub mod scattered;
pub mod table;

pub use csv::CsvTable;
pub use delaunay::Triangulation;
pub use error::{TableError, TableResult};
pub use grid::{GridDecision, GridShape, MeshGrid, Sample, build};
pub use heatmap::render_ascii;
pub use interpolate::{Interpolated, Interpolator, MAX_RESAMPLE_NODES, interpolate};
pub use method::InterpMethod;
pub use regular::RegularGridInterpolator;
pub use scattered::ScatteredInterpolator;
pub use table::{InterpolationTable, TableRow};

//! Interpolation dispatch over a grid-shape decision.

use serde::Serialize;
use tracing::debug;

use crate::error::{TableError, TableResult};
use crate::grid::{GridDecision, GridShape, MeshGrid};
use crate::method::InterpMethod;
use crate::regular::RegularGridInterpolator;
use crate::scattered::ScatteredInterpolator;

/// Upper bound on `nx * ny` for [`Interpolator::resample`].
pub const MAX_RESAMPLE_NODES: usize = 1_000_000;

/// Outcome of one interpolation query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interpolated {
    pub value: f64,
    pub method: InterpMethod,
    pub shape: GridShape,
    /// False when the query lies outside the grid rectangle / convex hull.
    pub in_domain: bool,
}

/// Interpolator prepared from a [`GridDecision`], reusable across queries.
#[derive(Debug)]
pub enum Interpolator {
    Regular(RegularGridInterpolator),
    Scattered(ScatteredInterpolator),
}

impl Interpolator {
    /// A regular grid with a single node on either axis is a line, not a
    /// rectangle; it goes down the scattered path, where `nearest` still works.
    pub fn from_decision(decision: &GridDecision) -> TableResult<Self> {
        match decision.grid_values() {
            Some(values) if decision.xs().len() >= 2 && decision.ys().len() >= 2 => {
                Ok(Self::Regular(RegularGridInterpolator::new(
                    decision.xs().to_vec(),
                    decision.ys().to_vec(),
                    values,
                )?))
            }
            _ => Ok(Self::Scattered(ScatteredInterpolator::new(
                decision.samples(),
            )?)),
        }
    }

    /// Path actually taken, which may differ from the decision for one-node axes.
    pub fn shape(&self) -> GridShape {
        match self {
            Self::Regular(_) => GridShape::Regular,
            Self::Scattered(_) => GridShape::Scattered,
        }
    }

    pub fn contains(&self, qx: f64, qy: f64) -> bool {
        match self {
            Self::Regular(g) => g.contains(qx, qy),
            Self::Scattered(s) => s.contains(qx, qy),
        }
    }

    pub fn interpolate(&self, qx: f64, qy: f64, method: InterpMethod) -> TableResult<Interpolated> {
        if !qx.is_finite() || !qy.is_finite() {
            return Err(TableError::failed(format!(
                "query point ({}, {}) must be finite",
                qx, qy
            )));
        }
        let value = match self {
            Self::Regular(g) => g.interpolate(qx, qy, method)?,
            Self::Scattered(s) => s.interpolate(qx, qy, method)?,
        };
        Ok(Interpolated {
            value,
            method,
            shape: self.shape(),
            in_domain: self.contains(qx, qy),
        })
    }

    /// Evaluate on an evenly spaced `nx × ny` lattice spanning `xs` × `ys` bounds.
    ///
    /// At most [`MAX_RESAMPLE_NODES`] lattice points are allowed.
    pub fn resample(
        &self,
        decision: &GridDecision,
        nx: usize,
        ny: usize,
        method: InterpMethod,
    ) -> TableResult<MeshGrid> {
        if nx < 2 || ny < 2 {
            return Err(TableError::failed("resampling needs at least 2 points per axis"));
        }
        if nx.checked_mul(ny).is_none_or(|n| n > MAX_RESAMPLE_NODES) {
            return Err(TableError::failed(format!(
                "resampling {}x{} exceeds the limit of {} points",
                nx, ny, MAX_RESAMPLE_NODES
            )));
        }
        let (Some(xs), Some(ys)) = (
            linspace(decision.xs(), nx),
            linspace(decision.ys(), ny),
        ) else {
            return Err(TableError::failed("table has no samples to resample"));
        };

        let mut z = Vec::with_capacity(nx);
        for &x in &xs {
            let mut row = Vec::with_capacity(ny);
            for &y in &ys {
                let v = self.interpolate(x, y, method)?.value;
                row.push(v.is_finite().then_some(v));
            }
            z.push(row);
        }

        Ok(MeshGrid {
            x_label: decision.x_label().to_string(),
            y_label: decision.y_label().to_string(),
            value_label: decision.column().to_string(),
            xs,
            ys,
            z,
        })
    }
}

fn linspace(axis: &[f64], n: usize) -> Option<Vec<f64>> {
    let (lo, hi) = (*axis.first()?, *axis.last()?);
    let step = (hi - lo) / (n - 1) as f64;
    Some((0..n).map(|i| if i + 1 == n { hi } else { lo + step * i as f64 }).collect())
}

/// Interpolate one value column at `(qx, qy)`.
///
/// Regular tables go through the rectilinear path, everything else through
/// the triangulated scattered path.
pub fn interpolate(
    decision: &GridDecision,
    qx: f64,
    qy: f64,
    method: InterpMethod,
) -> TableResult<Interpolated> {
    debug!(
        column = decision.column(),
        shape = ?decision.shape(),
        %method,
        qx,
        qy,
        "interpolate"
    );
    Interpolator::from_decision(decision)?.interpolate(qx, qy, method)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::build;
    use crate::table::{InterpolationTable, TableRow};

    fn table(points: &[(f64, f64, f64)]) -> InterpolationTable {
        InterpolationTable::new(
            "x",
            "y",
            vec!["v".to_string()],
            points
                .iter()
                .map(|&(x, y, v)| TableRow {
                    x,
                    y,
                    values: vec![Some(v)],
                })
                .collect(),
        )
        .unwrap()
    }

    fn square() -> GridDecision {
        build(
            &table(&[(1.0, 1.0, 1.0), (1.0, 2.0, 2.0), (2.0, 1.0, 3.0), (2.0, 2.0, 4.0)]),
            "v",
        )
        .unwrap()
    }

    #[test]
    fn regular_dispatch() {
        let r = interpolate(&square(), 1.5, 1.5, InterpMethod::Linear).unwrap();
        assert_eq!(r.shape, GridShape::Regular);
        assert!(r.in_domain);
        assert!((r.value - 2.5).abs() < 1e-12);
    }

    #[test]
    fn scattered_dispatch() {
        let d = build(&table(&[(1.0, 1.0, 1.0), (1.0, 2.0, 2.0), (2.0, 1.0, 3.0)]), "v").unwrap();
        let r = interpolate(&d, 1.25, 1.25, InterpMethod::Linear).unwrap();
        assert_eq!(r.shape, GridShape::Scattered);
        assert!((r.value - 1.75).abs() < 1e-12);

        let out = interpolate(&d, 2.0, 2.0, InterpMethod::Linear).unwrap();
        assert!(!out.in_domain);
        assert!(out.value.is_nan());
    }

    #[test]
    fn regular_outside_follows_the_same_policy() {
        let d = square();
        let lin = interpolate(&d, 3.0, 1.0, InterpMethod::Linear).unwrap();
        assert!(lin.value.is_nan() && !lin.in_domain);
        let near = interpolate(&d, 3.0, 1.0, InterpMethod::Nearest).unwrap();
        assert_eq!(near.value, 3.0);
    }

    #[test]
    fn single_row_grid_uses_nearest_sample() {
        let d = build(&table(&[(1.0, 1.0, 5.0), (1.0, 2.0, 6.0)]), "v").unwrap();
        assert!(d.is_regular());
        let r = interpolate(&d, 1.0, 1.9, InterpMethod::Nearest).unwrap();
        assert_eq!(r.value, 6.0);
        assert!(interpolate(&d, 1.0, 1.5, InterpMethod::Linear).is_err());
    }

    #[test]
    fn non_finite_query() {
        assert!(interpolate(&square(), f64::NAN, 1.0, InterpMethod::Linear).is_err());
    }

    #[test]
    fn resample_covers_bounds() {
        let d = square();
        let mesh = Interpolator::from_decision(&d)
            .unwrap()
            .resample(&d, 3, 5, InterpMethod::Linear)
            .unwrap();
        assert_eq!(mesh.xs, vec![1.0, 1.5, 2.0]);
        assert_eq!(mesh.ys.len(), 5);
        assert_eq!(mesh.z[2][4], Some(4.0));
        assert_eq!(mesh.value_range(), Some((1.0, 4.0)));
    }

    #[test]
    fn oversized_resample_is_rejected() {
        let d = square();
        let interp = Interpolator::from_decision(&d).unwrap();
        for (nx, ny) in [(usize::MAX, 2), (100_000, 100_000), (MAX_RESAMPLE_NODES, 2)] {
            assert!(matches!(
                interp.resample(&d, nx, ny, InterpMethod::Linear),
                Err(TableError::InterpolationFailed { .. })
            ));
        }
        let mesh = interp.resample(&d, 200, 300, InterpMethod::Nearest).unwrap();
        assert_eq!((mesh.z.len(), mesh.z[0].len()), (200, 300));
    }
}

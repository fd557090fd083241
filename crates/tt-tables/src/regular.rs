//! Interpolation on a complete rectilinear grid.
//!
//! `linear` and `nearest` go through `ninterp`; `cubic` is a tensor-product
//! natural spline evaluated here.
//!
//! Natural end conditions (zero second derivative at the first and last
//! node) differ from scipy's not-a-knot cubic, so `cubic` values in the
//! outermost cells deviate slightly from scipy's.

use std::fmt;

use ndarray::{Array1, Array2};
use ninterp::interpolator::Extrapolate;
use ninterp::prelude::{Interp2DOwned, Interpolator as _};
use ninterp::strategy::enums::Strategy2DEnum;

use crate::error::{TableError, TableResult};
use crate::method::InterpMethod;

/// Values on the full product `xs × ys`, stored row-major (x outer).
pub struct RegularGridInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    values: Vec<f64>,
    /// Bilinear inside the rectangle, NaN outside.
    linear: Interp2DOwned<f64, Strategy2DEnum>,
    /// Nearest node; queries outside are clamped onto the rectangle first.
    nearest: Interp2DOwned<f64, Strategy2DEnum>,
}

impl fmt::Debug for RegularGridInterpolator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegularGridInterpolator")
            .field("xs", &self.xs)
            .field("ys", &self.ys)
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}

impl RegularGridInterpolator {
    /// Needs at least two strictly increasing nodes per axis.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>, values: Vec<f64>) -> TableResult<Self> {
        for (name, axis) in [("x", &xs), ("y", &ys)] {
            if axis.len() < 2 {
                return Err(TableError::failed(format!(
                    "{} axis needs at least 2 distinct values, got {}",
                    name,
                    axis.len()
                )));
            }
            if axis.windows(2).any(|w| !(w[0] < w[1])) {
                return Err(TableError::failed(format!(
                    "{} axis must be strictly increasing",
                    name
                )));
            }
        }
        if values.len() != xs.len() * ys.len() {
            return Err(TableError::failed(format!(
                "grid has {} values, expected {} × {}",
                values.len(),
                xs.len(),
                ys.len()
            )));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(TableError::failed("grid values must be finite"));
        }

        let build = |strategy: Strategy2DEnum, extrapolate: Extrapolate<f64>| {
            let f_xy = Array2::from_shape_vec((xs.len(), ys.len()), values.clone())
                .map_err(|e| TableError::failed(e.to_string()))?;
            Interp2DOwned::new(
                Array1::from(xs.clone()),
                Array1::from(ys.clone()),
                f_xy,
                strategy,
                extrapolate,
            )
            .map_err(|e| TableError::failed(e.to_string()))
        };
        let linear = build(ninterp::strategy::Linear.into(), Extrapolate::Fill(f64::NAN))?;
        let nearest = build(ninterp::strategy::Nearest.into(), Extrapolate::Clamp)?;

        Ok(Self {
            xs,
            ys,
            values,
            linear,
            nearest,
        })
    }

    /// Whether `(qx, qy)` lies inside the grid rectangle (edges included).
    pub fn contains(&self, qx: f64, qy: f64) -> bool {
        let (x0, x1) = (self.xs[0], self.xs[self.xs.len() - 1]);
        let (y0, y1) = (self.ys[0], self.ys[self.ys.len() - 1]);
        (x0..=x1).contains(&qx) && (y0..=y1).contains(&qy)
    }

    /// Interpolate at `(qx, qy)`.
    ///
    /// Outside the grid rectangle `linear` and `cubic` give NaN and `nearest`
    /// gives the closest node.
    pub fn interpolate(&self, qx: f64, qy: f64, method: InterpMethod) -> TableResult<f64> {
        if !qx.is_finite() || !qy.is_finite() {
            return Err(TableError::failed("query point must be finite"));
        }
        match method {
            InterpMethod::Linear => self.call(&self.linear, qx, qy),
            InterpMethod::Nearest => self.call(&self.nearest, qx, qy),
            InterpMethod::Cubic => {
                if self.xs.len() < 4 || self.ys.len() < 4 {
                    return Err(TableError::failed(format!(
                        "cubic interpolation needs at least 4 points per axis, grid is {} × {}",
                        self.xs.len(),
                        self.ys.len()
                    )));
                }
                if !self.contains(qx, qy) {
                    return Ok(f64::NAN);
                }
                Ok(self.bicubic(qx, qy))
            }
        }
    }

    fn call(
        &self,
        interp: &Interp2DOwned<f64, Strategy2DEnum>,
        qx: f64,
        qy: f64,
    ) -> TableResult<f64> {
        interp
            .interpolate(&[qx, qy])
            .map_err(|e| TableError::failed(e.to_string()))
    }

    fn bicubic(&self, qx: f64, qy: f64) -> f64 {
        let ny = self.ys.len();
        let column: Vec<f64> = self
            .values
            .chunks(ny)
            .map(|row| natural_spline(&self.ys, row, qy))
            .collect();
        natural_spline(&self.xs, &column, qx)
    }
}

/// Cell `i` with `axis[i] <= q <= axis[i + 1]` and the fractional position in it.
///
/// Requires at least two nodes; queries beyond the ends use the end cells.
fn interval(axis: &[f64], q: f64) -> (usize, f64) {
    let below = axis.partition_point(|&a| a <= q);
    let i = below.saturating_sub(1).min(axis.len() - 2);
    let t = (q - axis[i]) / (axis[i + 1] - axis[i]);
    (i, t)
}

/// Natural cubic spline through `(xs, ys)` evaluated at `q`.
fn natural_spline(xs: &[f64], ys: &[f64], q: f64) -> f64 {
    let n = xs.len();
    let m = spline_second_derivatives(xs, ys);
    let (i, _) = interval(xs, q);
    let h = xs[i + 1] - xs[i];
    let a = (xs[i + 1] - q) / h;
    let b = (q - xs[i]) / h;

    debug_assert_eq!(m.len(), n);
    a * ys[i]
        + b * ys[i + 1]
        + ((a * a * a - a) * m[i] + (b * b * b - b) * m[i + 1]) * h * h / 6.0
}

/// Second derivatives of the natural spline (zero at both ends), via the Thomas algorithm.
fn spline_second_derivatives(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let mut m = vec![0.0; n];
    if n < 3 {
        return m;
    }

    let mut diag = vec![0.0; n];
    let mut rhs = vec![0.0; n];
    for i in 1..n - 1 {
        let h0 = xs[i] - xs[i - 1];
        let h1 = xs[i + 1] - xs[i];
        diag[i] = 2.0 * (h0 + h1);
        rhs[i] = 6.0 * ((ys[i + 1] - ys[i]) / h1 - (ys[i] - ys[i - 1]) / h0);
    }

    // Forward sweep over the interior unknowns m[1..n-1].
    for i in 2..n - 1 {
        let lower = xs[i] - xs[i - 1];
        let w = lower / diag[i - 1];
        diag[i] -= w * lower;
        rhs[i] -= w * rhs[i - 1];
    }
    for i in (1..n - 1).rev() {
        let upper = xs[i + 1] - xs[i];
        m[i] = (rhs[i] - upper * m[i + 1]) / diag[i];
    }
    m
}

//! Interpolation over irregularly placed samples.
//!
//! `nearest` measures plain Euclidean distance in data coordinates, so the
//! axis with the larger magnitude dominates (pascal over kelvin). The
//! triangulation behind `linear` and `cubic` is built on coordinates rescaled
//! to the unit square, where both axes weigh equally.

use crate::delaunay::Triangulation;
use crate::error::{TableError, TableResult};
use crate::grid::Sample;
use crate::method::InterpMethod;

/// Affine map from data coordinates to the unit square of the sample bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Frame {
    x0: f64,
    sx: f64,
    y0: f64,
    sy: f64,
}

impl Frame {
    fn fit(samples: &[Sample]) -> Self {
        let (mut x0, mut x1) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut y0, mut y1) = (f64::INFINITY, f64::NEG_INFINITY);
        for s in samples {
            x0 = x0.min(s.x);
            x1 = x1.max(s.x);
            y0 = y0.min(s.y);
            y1 = y1.max(s.y);
        }
        let span = |lo: f64, hi: f64| if hi > lo { hi - lo } else { 1.0 };
        Self {
            x0,
            sx: span(x0, x1),
            y0,
            sy: span(y0, y1),
        }
    }

    fn apply(&self, x: f64, y: f64) -> [f64; 2] {
        [(x - self.x0) / self.sx, (y - self.y0) / self.sy]
    }
}

#[derive(Debug, Clone)]
pub struct ScatteredInterpolator {
    frame: Frame,
    /// Sample locations in data coordinates.
    raw: Vec<[f64; 2]>,
    /// Sample locations in the unit-square frame.
    points: Vec<[f64; 2]>,
    values: Vec<f64>,
    triangulation: Option<Triangulation>,
    gradients: Vec<[f64; 2]>,
}

impl ScatteredInterpolator {
    /// Build from samples; samples sharing coordinates are averaged.
    ///
    /// Fewer than three non-collinear samples still allow `nearest`.
    pub fn new(samples: &[Sample]) -> TableResult<Self> {
        let merged = merge_duplicates(samples);
        if merged.is_empty() {
            return Err(TableError::failed("no numeric samples to interpolate"));
        }

        let frame = Frame::fit(&merged);
        let raw: Vec<[f64; 2]> = merged.iter().map(|s| [s.x, s.y]).collect();
        let points: Vec<[f64; 2]> = raw.iter().map(|p| frame.apply(p[0], p[1])).collect();
        let values: Vec<f64> = merged.iter().map(|s| s.value).collect();

        let triangulation = Triangulation::new(points.clone()).ok();
        let gradients = match &triangulation {
            Some(tri) => estimate_gradients(tri, &values),
            None => Vec::new(),
        };

        Ok(Self {
            frame,
            raw,
            points,
            values,
            triangulation,
            gradients,
        })
    }

    /// Number of distinct sample locations.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether `(qx, qy)` lies in the convex hull of the samples.
    pub fn contains(&self, qx: f64, qy: f64) -> bool {
        self.triangulation
            .as_ref()
            .is_some_and(|tri| tri.locate(self.frame.apply(qx, qy)).is_some())
    }

    /// Interpolate at `(qx, qy)`.
    ///
    /// Outside the convex hull `linear` and `cubic` give NaN and `nearest`
    /// gives the closest sample.
    pub fn interpolate(&self, qx: f64, qy: f64, method: InterpMethod) -> TableResult<f64> {
        if !qx.is_finite() || !qy.is_finite() {
            return Err(TableError::failed("query point must be finite"));
        }
        if method == InterpMethod::Nearest {
            return Ok(self.nearest([qx, qy]));
        }
        let q = self.frame.apply(qx, qy);

        let tri = self.triangulation.as_ref().ok_or_else(|| {
            TableError::failed(format!(
                "{} interpolation needs at least 3 non-collinear samples",
                method
            ))
        })?;
        let Some((idx, w)) = tri.locate(q) else {
            return Ok(f64::NAN);
        };
        let t = tri.triangles()[idx];

        Ok(match method {
            InterpMethod::Linear => {
                w[0] * self.values[t[0]] + w[1] * self.values[t[1]] + w[2] * self.values[t[2]]
            }
            _ => self.cubic_patch(t, w),
        })
    }

    /// Value of the closest sample in data coordinates; ties go to the first in (x, y) order.
    fn nearest(&self, q: [f64; 2]) -> f64 {
        let dist2 = |p: &[f64; 2]| (p[0] - q[0]).powi(2) + (p[1] - q[1]).powi(2);
        let (best, _) = self
            .raw
            .iter()
            .enumerate()
            .fold((0, f64::INFINITY), |(bi, bd), (i, p)| {
                let d = dist2(p);
                if d < bd { (i, d) } else { (bi, bd) }
            });
        self.values[best]
    }

    /// Cubic Bézier triangle from vertex values and gradients.
    fn cubic_patch(&self, t: [usize; 3], w: [f64; 3]) -> f64 {
        let p = t.map(|i| self.points[i]);
        let f = t.map(|i| self.values[i]);
        let g = t.map(|i| self.gradients[i]);

        // Control point one third of the way from vertex i towards vertex j.
        let edge = |i: usize, j: usize| {
            let d = [p[j][0] - p[i][0], p[j][1] - p[i][1]];
            f[i] + (g[i][0] * d[0] + g[i][1] * d[1]) / 3.0
        };
        let b210 = edge(0, 1);
        let b201 = edge(0, 2);
        let b120 = edge(1, 0);
        let b021 = edge(1, 2);
        let b102 = edge(2, 0);
        let b012 = edge(2, 1);
        let e = (b210 + b201 + b120 + b021 + b102 + b012) / 6.0;
        let v = (f[0] + f[1] + f[2]) / 3.0;
        let b111 = e + (e - v) / 2.0;

        let [u, s, r] = w;
        f[0] * u * u * u
            + f[1] * s * s * s
            + f[2] * r * r * r
            + 3.0 * (b210 * u * u * s + b201 * u * u * r + b120 * u * s * s)
            + 3.0 * (b021 * s * s * r + b102 * u * r * r + b012 * s * r * r)
            + 6.0 * b111 * u * s * r
    }
}

fn merge_duplicates(samples: &[Sample]) -> Vec<Sample> {
    let mut sorted: Vec<Sample> = samples
        .iter()
        .copied()
        .filter(|s| s.x.is_finite() && s.y.is_finite() && s.value.is_finite())
        .collect();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));

    let mut merged: Vec<Sample> = Vec::with_capacity(sorted.len());
    let mut count = 0usize;
    for s in sorted {
        match merged.last_mut() {
            Some(last) if last.x == s.x && last.y == s.y => {
                count += 1;
                last.value += (s.value - last.value) / count as f64;
            }
            _ => {
                merged.push(s);
                count = 1;
            }
        }
    }
    merged
}

/// Least-squares gradient at each vertex from its triangulation neighbors.
fn estimate_gradients(tri: &Triangulation, values: &[f64]) -> Vec<[f64; 2]> {
    let points = tri.points();
    tri.vertex_neighbors()
        .iter()
        .enumerate()
        .map(|(i, nb)| {
            let (mut sxx, mut sxy, mut syy, mut sxf, mut syf) = (0.0, 0.0, 0.0, 0.0, 0.0);
            for &j in nb {
                let dx = points[j][0] - points[i][0];
                let dy = points[j][1] - points[i][1];
                let df = values[j] - values[i];
                sxx += dx * dx;
                sxy += dx * dy;
                syy += dy * dy;
                sxf += dx * df;
                syf += dy * df;
            }
            let det = sxx * syy - sxy * sxy;
            if det.abs() <= 1e-14 * (sxx * syy).max(f64::MIN_POSITIVE) {
                return [0.0, 0.0];
            }
            [(syy * sxf - sxy * syf) / det, (sxx * syf - sxy * sxf) / det]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(x: f64, y: f64, value: f64) -> Sample {
        Sample { x, y, value }
    }

    fn plane(x: f64, y: f64) -> f64 {
        3.0 * x - 0.002 * y + 7.0
    }

    /// Irregular cloud over x ∈ [300, 400] K, y ∈ [1e5, 5e5] Pa.
    fn cloud() -> Vec<Sample> {
        let coords = [
            (300.0, 1.0e5),
            (400.0, 1.0e5),
            (300.0, 5.0e5),
            (400.0, 5.0e5),
            (330.0, 2.2e5),
            (370.0, 3.9e5),
            (355.0, 1.4e5),
            (310.0, 4.1e5),
            (385.0, 2.6e5),
        ];
        coords.iter().map(|&(x, y)| s(x, y, plane(x, y))).collect()
    }

    #[test]
    fn linear_and_cubic_reproduce_planes() {
        let interp = ScatteredInterpolator::new(&cloud()).unwrap();
        for method in [InterpMethod::Linear, InterpMethod::Cubic] {
            let v = interp.interpolate(342.0, 3.3e5, method).unwrap();
            assert!((v - plane(342.0, 3.3e5)).abs() < 1e-6, "{method}: {v}");
        }
    }

    #[test]
    fn exact_at_samples() {
        let interp = ScatteredInterpolator::new(&cloud()).unwrap();
        for method in InterpMethod::ALL {
            let v = interp.interpolate(370.0, 3.9e5, method).unwrap();
            assert!((v - plane(370.0, 3.9e5)).abs() < 1e-9, "{method}");
        }
    }

    #[test]
    fn outside_hull() {
        let interp = ScatteredInterpolator::new(&cloud()).unwrap();
        assert!(!interp.contains(450.0, 2.0e5));
        assert!(interp.interpolate(450.0, 2.0e5, InterpMethod::Linear).unwrap().is_nan());
        assert!(interp.interpolate(450.0, 2.0e5, InterpMethod::Cubic).unwrap().is_nan());
        let nearest = interp.interpolate(450.0, 1.0e5, InterpMethod::Nearest).unwrap();
        assert_eq!(nearest, plane(400.0, 1.0e5));
    }

    #[test]
    fn three_corners_of_a_square() {
        let samples = [s(1.0, 1.0, 1.0), s(1.0, 2.0, 2.0), s(2.0, 1.0, 3.0)];
        let interp = ScatteredInterpolator::new(&samples).unwrap();
        // inside the triangle: v = 1 + 2(x-1) + (y-1)
        let v = interp.interpolate(1.25, 1.25, InterpMethod::Linear).unwrap();
        assert!((v - 1.75).abs() < 1e-12);
        // missing corner lies outside the hull
        assert!(interp.interpolate(2.0, 2.0, InterpMethod::Linear).unwrap().is_nan());
    }

    #[test]
    fn duplicates_are_averaged() {
        let samples = [s(0.0, 0.0, 1.0), s(0.0, 0.0, 3.0), s(1.0, 0.0, 5.0)];
        let interp = ScatteredInterpolator::new(&samples).unwrap();
        assert_eq!(interp.len(), 2);
        assert_eq!(interp.interpolate(0.1, 0.0, InterpMethod::Nearest).unwrap(), 2.0);
    }

    #[test]
    fn collinear_samples_only_support_nearest() {
        let samples = [s(0.0, 0.0, 1.0), s(1.0, 1.0, 2.0), s(2.0, 2.0, 3.0)];
        let interp = ScatteredInterpolator::new(&samples).unwrap();
        assert_eq!(interp.interpolate(1.9, 2.1, InterpMethod::Nearest).unwrap(), 3.0);
        assert!(matches!(
            interp.interpolate(1.0, 1.0, InterpMethod::Linear),
            Err(TableError::InterpolationFailed { .. })
        ));
    }

    #[test]
    fn nearest_uses_data_coordinates() {
        // In data units the pressure gap dominates: (300, 1.0e5) is 2.0e4 away,
        // (400, 1.6e5) is 4.0e4 away.
        let samples = [
            s(300.0, 1.0e5, 1.0),
            s(400.0, 1.6e5, 2.0),
            s(300.0, 5.0e5, 3.0),
        ];
        let interp = ScatteredInterpolator::new(&samples).unwrap();
        assert_eq!(interp.interpolate(395.0, 1.2e5, InterpMethod::Nearest).unwrap(), 1.0);
        assert_eq!(interp.interpolate(395.0, 1.5e5, InterpMethod::Nearest).unwrap(), 2.0);
    }

    #[test]
    fn no_samples_is_an_error() {
        assert!(ScatteredInterpolator::new(&[]).is_err());
    }
}

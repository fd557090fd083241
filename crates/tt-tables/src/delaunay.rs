//! Delaunay triangulation (Bowyer–Watson) for scattered samples.
//!
//! Points are expected distinct and roughly within the unit square; the
//! super-triangle is sized for that.

use std::collections::HashMap;

use crate::error::{TableError, TableResult};

/// Circumradius of the enclosing super-triangle, in unit-square coordinates.
const SUPER_RADIUS: f64 = 1.0e3;

/// Barycentric slack when locating a point on a shared edge.
const LOCATE_EPS: f64 = 1.0e-10;

#[derive(Debug, Clone, PartialEq)]
pub struct Triangulation {
    points: Vec<[f64; 2]>,
    /// Counter-clockwise vertex triples.
    triangles: Vec<[usize; 3]>,
}

impl Triangulation {
    pub fn new(points: Vec<[f64; 2]>) -> TableResult<Self> {
        let n = points.len();
        if n < 3 {
            return Err(TableError::failed(format!(
                "triangulation needs at least 3 samples, found {}",
                n
            )));
        }
        if is_collinear(&points) {
            return Err(TableError::failed("samples are collinear"));
        }

        let mut all = points.clone();
        for k in 0..3 {
            let theta = std::f64::consts::FRAC_PI_2 + k as f64 * 2.0 * std::f64::consts::FRAC_PI_3;
            all.push([
                0.5 + SUPER_RADIUS * theta.cos(),
                0.5 + SUPER_RADIUS * theta.sin(),
            ]);
        }

        let mut triangles: Vec<[usize; 3]> = vec![[n, n + 1, n + 2]];
        for p in 0..n {
            let q = all[p];
            let (bad, good): (Vec<[usize; 3]>, Vec<[usize; 3]>) = triangles
                .into_iter()
                .partition(|t| in_circumcircle(&all, t, q));

            let mut edge_count: HashMap<(usize, usize), usize> = HashMap::new();
            for t in &bad {
                for (a, b) in edges(t) {
                    *edge_count.entry((a.min(b), a.max(b))).or_default() += 1;
                }
            }

            triangles = good;
            for t in &bad {
                for (a, b) in edges(t) {
                    if edge_count[&(a.min(b), a.max(b))] != 1 {
                        continue;
                    }
                    let o = orient(all[a], all[b], q);
                    if o > 0.0 {
                        triangles.push([a, b, p]);
                    } else if o < 0.0 {
                        triangles.push([b, a, p]);
                    }
                }
            }
        }

        triangles.retain(|t| t.iter().all(|&v| v < n));
        Ok(Self { points, triangles })
    }

    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }

    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// Triangle containing `q` and the barycentric weights of its vertices.
    pub fn locate(&self, q: [f64; 2]) -> Option<(usize, [f64; 3])> {
        self.triangles.iter().enumerate().find_map(|(idx, t)| {
            let w = barycentric(
                self.points[t[0]],
                self.points[t[1]],
                self.points[t[2]],
                q,
            )?;
            w.iter().all(|&l| l >= -LOCATE_EPS).then_some((idx, w))
        })
    }

    /// Vertices sharing a triangle edge with each vertex.
    pub fn vertex_neighbors(&self) -> Vec<Vec<usize>> {
        let mut neighbors = vec![Vec::new(); self.points.len()];
        for t in &self.triangles {
            for (a, b) in edges(t) {
                if !neighbors[a].contains(&b) {
                    neighbors[a].push(b);
                }
                if !neighbors[b].contains(&a) {
                    neighbors[b].push(a);
                }
            }
        }
        neighbors
    }
}

fn edges(t: &[usize; 3]) -> [(usize, usize); 3] {
    [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])]
}

/// Twice the signed area of (a, b, c); positive when counter-clockwise.
fn orient(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}

fn in_circumcircle(points: &[[f64; 2]], t: &[usize; 3], d: [f64; 2]) -> bool {
    let [a, b, c] = [points[t[0]], points[t[1]], points[t[2]]];
    let (adx, ady) = (a[0] - d[0], a[1] - d[1]);
    let (bdx, bdy) = (b[0] - d[0], b[1] - d[1]);
    let (cdx, cdy) = (c[0] - d[0], c[1] - d[1]);
    let alift = adx * adx + ady * ady;
    let blift = bdx * bdx + bdy * bdy;
    let clift = cdx * cdx + cdy * cdy;

    let det = adx * (bdy * clift - blift * cdy) - ady * (bdx * clift - blift * cdx)
        + alift * (bdx * cdy - bdy * cdx);
    det > 0.0
}

fn barycentric(a: [f64; 2], b: [f64; 2], c: [f64; 2], q: [f64; 2]) -> Option<[f64; 3]> {
    let det = (b[1] - c[1]) * (a[0] - c[0]) + (c[0] - b[0]) * (a[1] - c[1]);
    if det.abs() < 1e-300 {
        return None;
    }
    let l1 = ((b[1] - c[1]) * (q[0] - c[0]) + (c[0] - b[0]) * (q[1] - c[1])) / det;
    let l2 = ((c[1] - a[1]) * (q[0] - c[0]) + (a[0] - c[0]) * (q[1] - c[1])) / det;
    Some([l1, l2, 1.0 - l1 - l2])
}

fn is_collinear(points: &[[f64; 2]]) -> bool {
    let p0 = points[0];
    let dist2 = |p: &[f64; 2]| (p[0] - p0[0]).powi(2) + (p[1] - p0[1]).powi(2);
    let Some(p1) = points
        .iter()
        .copied()
        .max_by(|a, b| dist2(a).total_cmp(&dist2(b)))
    else {
        return true;
    };
    let span = dist2(&p1).sqrt();
    if span == 0.0 {
        return true;
    }
    points
        .iter()
        .all(|&p| (orient(p0, p1, p) / span).abs() <= 1e-12 * span.max(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_grid(n: usize) -> Vec<[f64; 2]> {
        let step = 1.0 / (n - 1) as f64;
        (0..n)
            .flat_map(|i| (0..n).map(move |j| [i as f64 * step, j as f64 * step]))
            .collect()
    }

    fn total_area(tri: &Triangulation) -> f64 {
        tri.triangles()
            .iter()
            .map(|t| 0.5 * orient(tri.points()[t[0]], tri.points()[t[1]], tri.points()[t[2]]))
            .sum()
    }

    #[test]
    fn single_triangle() {
        let tri = Triangulation::new(vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]).unwrap();
        assert_eq!(tri.triangles().len(), 1);
        assert!((total_area(&tri) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn grid_is_covered() {
        let tri = Triangulation::new(unit_grid(5)).unwrap();
        // 4x4 cells, two triangles each
        assert_eq!(tri.triangles().len(), 32);
        assert!((total_area(&tri) - 1.0).abs() < 1e-9);
        for t in tri.triangles() {
            assert!(orient(tri.points()[t[0]], tri.points()[t[1]], tri.points()[t[2]]) > 0.0);
        }
    }

    #[test]
    fn locate_inside_and_outside() {
        let tri = Triangulation::new(unit_grid(3)).unwrap();
        let (_, w) = tri.locate([0.3, 0.6]).unwrap();
        assert!((w.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(tri.locate([1.0, 1.0]).is_some());
        assert!(tri.locate([1.01, 0.5]).is_none());
    }

    #[test]
    fn collinear_points_are_rejected() {
        let err = Triangulation::new(vec![[0.0, 0.0], [0.5, 0.5], [1.0, 1.0]]).unwrap_err();
        assert!(matches!(err, TableError::InterpolationFailed { .. }));
        assert!(Triangulation::new(vec![[0.0, 0.0], [1.0, 1.0]]).is_err());
    }

    #[test]
    fn neighbors_are_symmetric() {
        let tri = Triangulation::new(unit_grid(3)).unwrap();
        let nb = tri.vertex_neighbors();
        for (a, list) in nb.iter().enumerate() {
            for &b in list {
                assert!(nb[b].contains(&a));
            }
        }
        // center of a 3x3 grid touches every other node or at least the 4 axis neighbors
        assert!(nb[4].len() >= 4);
    }
}

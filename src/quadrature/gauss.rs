//! Gauss-Legendre rules on the unit interval and on the panel parameter domain
use crate::quadrature::types::NumericalQuadratureDefinition;
use std::f64::consts::PI;

/// Legendre polynomial `P_n(x)` and its derivative
fn legendre(n: usize, x: f64) -> (f64, f64) {
    let mut p0 = 1.0;
    let mut p1 = x;
    for k in 2..=n {
        let k = k as f64;
        let p2 = ((2.0 * k - 1.0) * x * p1 - (k - 1.0) * p0) / k;
        p0 = p1;
        p1 = p2;
    }
    let n = n as f64;
    (p1, n * (x * p1 - p0) / (x * x - 1.0))
}

/// Gauss-Legendre rule with `npoints` points on `[0, 1]`
pub fn gauss_legendre(npoints: usize) -> NumericalQuadratureDefinition {
    assert!(npoints > 0, "a Gauss rule needs at least one point");
    let mut points = Vec::with_capacity(npoints);
    let mut weights = Vec::with_capacity(npoints);

    if npoints == 1 {
        points.push(0.5);
        weights.push(1.0);
    } else {
        for i in 0..npoints {
            let mut x = (PI * (i as f64 + 0.75) / (npoints as f64 + 0.5)).cos();
            for _ in 0..100 {
                let (p, dp) = legendre(npoints, x);
                let dx = p / dp;
                x -= dx;
                if dx.abs() < 1e-15 {
                    break;
                }
            }
            let (_, dp) = legendre(npoints, x);
            points.push(0.5 * (1.0 + x));
            weights.push(1.0 / ((1.0 - x * x) * dp * dp));
        }
    }

    NumericalQuadratureDefinition {
        dim: 1,
        npoints,
        weights,
        points,
    }
}

/// Collapsed tensor rule on the triangle `0 <= b <= a <= 1`.
///
/// Uses `npoints` Gauss points in each direction and the map `b = a t`.
/// The weights sum to `1/2`.
pub fn collapsed_triangle_rule(npoints: usize) -> NumericalQuadratureDefinition {
    let line = gauss_legendre(npoints);
    let mut points = Vec::with_capacity(2 * npoints * npoints);
    let mut weights = Vec::with_capacity(npoints * npoints);
    for (a, wa) in line.points.iter().zip(&line.weights) {
        for (t, wt) in line.points.iter().zip(&line.weights) {
            points.push(*a);
            points.push(a * t);
            weights.push(wa * wt * a);
        }
    }
    NumericalQuadratureDefinition {
        dim: 2,
        npoints: npoints * npoints,
        weights,
        points,
    }
}

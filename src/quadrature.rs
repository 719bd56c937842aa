//! Numerical quadrature used to verify the closed-form panel integrals
//!
//! Nothing on the assembly path depends on this module.
mod gauss;
mod types;

pub use gauss::{collapsed_triangle_rule, gauss_legendre};
pub use types::NumericalQuadratureDefinition;

use crate::kernel::base_cases::GeometryData;
use itertools::izip;

/// Integrate `alpha^k R^{-q}` over `[0, 1]` along a side, where
/// `R^2 = (x_dot + alpha ell)^2 + c2`.
pub fn line_integral(
    x_dot: f64,
    ell: f64,
    c2: f64,
    k: i32,
    q: i32,
    rule: &NumericalQuadratureDefinition,
) -> f64 {
    rule.points
        .iter()
        .zip(&rule.weights)
        .map(|(alpha, w)| {
            let rsq = (x_dot + alpha * ell).powi(2) + c2;
            w * alpha.powi(k) * rsq.powf(-0.5 * q as f64)
        })
        .sum()
}

/// Integrate `a^m b^n R^{-q}` over `0 <= b <= a <= 1`.
///
/// `R^2 = |x0 + a ell1 vhat + b ell2 what|^2 + eps^2` is expanded in terms of
/// the projections of `x0` and the regularized distance `r0` to the first
/// vertex.
#[allow(clippy::too_many_arguments)]
pub fn parameter_domain_integral(
    x0_dot_v: f64,
    x0_dot_w: f64,
    v_dot_w: f64,
    ell1: f64,
    ell2: f64,
    r0: f64,
    (m, n, q): (usize, usize, usize),
    rule: &NumericalQuadratureDefinition,
) -> f64 {
    debug_assert_eq!(rule.dim, 2);
    izip!(rule.points.chunks_exact(2), &rule.weights)
        .map(|(ab, w)| {
            let (a, b) = (ab[0], ab[1]);
            let rsq = (x0_dot_v + a * ell1).powi(2)
                + (x0_dot_w + b * ell2).powi(2)
                + 2.0 * ell1 * ell2 * a * b * v_dot_w
                + r0 * r0
                - x0_dot_v * x0_dot_v
                - x0_dot_w * x0_dot_w;
            w * a.powi(m as i32) * b.powi(n as i32) * rsq.powf(-0.5 * q as f64)
        })
        .sum()
}

/// Integrate `a^m b^n R^{-q}` over a panel for one field point of a geometry batch
pub fn panel_integral(
    geometry: &GeometryData<f64>,
    point: usize,
    m: usize,
    n: usize,
    q: usize,
    rule: &NumericalQuadratureDefinition,
) -> f64 {
    parameter_domain_integral(
        geometry.x0_dot_v[point],
        geometry.x0_dot_w[point],
        geometry.v_dot_w,
        geometry.ell1,
        geometry.ell2,
        geometry.r0[point],
        (m, n, q),
        rule,
    )
}

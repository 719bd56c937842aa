//! Closed-form line integrals along one side of a panel
//!
//! A side of length `L` is parametrised as `x0 + t v` for `t` in `[0, L]`,
//! where `x0` is the field point relative to the start vertex of the side.
//! The squared regularized distance along the side is
//! `R(t)^2 = (x0.v + t)^2 + (x0.n)^2 + gamma^2`.
use crate::types::{cast, RealScalar};

/// Projections of one field point onto one side of a panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideProjection<T: RealScalar> {
    /// Field point minus start vertex, projected onto the side direction
    pub x0_dot_v: T,
    /// Field point minus start vertex, projected onto the in-plane side normal
    pub x0_dot_n: T,
    /// Regularized distance from the field point to the plane of the panel
    pub gamma: T,
    /// Length of the side
    pub length: T,
}

impl<T: RealScalar> SideProjection<T> {
    /// `(x0.n)^2 + gamma^2`
    fn offset_squared(&self) -> T {
        self.x0_dot_n * self.x0_dot_n + self.gamma * self.gamma
    }

    /// Regularized distances at the start and at the end of the side
    fn end_distances(&self) -> (T, T) {
        let c2 = self.offset_squared();
        let x1_dot_v = self.x0_dot_v + self.length;
        (
            (self.x0_dot_v * self.x0_dot_v + c2).sqrt(),
            (x1_dot_v * x1_dot_v + c2).sqrt(),
        )
    }
}

/// Regularized distance to the plane of a panel.
///
/// `x0_squared - x0_dot_n^2 - x0_dot_v^2` is the squared distance to the
/// plane; cancellation can make it slightly negative, so it is clamped to
/// zero below machine epsilon.
pub fn regularized_distance<T: RealScalar>(
    x0_squared: T,
    x0_dot_n: T,
    x0_dot_v: T,
    regularization: T,
) -> T {
    let mut r2_proj = x0_squared - x0_dot_n * x0_dot_n - x0_dot_v * x0_dot_v;
    if r2_proj < T::epsilon() {
        r2_proj = T::zero();
    }
    (r2_proj + regularization * regularization).sqrt()
}

/// `ln(u + r)` where `r = sqrt(u^2 + c2)`, without cancellation for negative `u`
fn log_shift<T: RealScalar>(u: T, r: T, c2: T) -> T {
    if u >= T::zero() {
        (u + r).ln()
    } else {
        (c2 / (r - u)).ln()
    }
}

/// Line integral `S_{0,1} = (1/L) int_0^L R^{-1} dt`.
///
/// Equal to `(artanh(x1.v / R1) - artanh(x0.v / R0)) / L`, evaluated through
/// the logarithmic form of `artanh`.
pub fn s0p1<T: RealScalar>(side: &SideProjection<T>) -> T {
    let c2 = side.offset_squared();
    let (r0, r1) = side.end_distances();
    let x1_dot_v = side.x0_dot_v + side.length;
    (log_shift(x1_dot_v, r1, c2) - log_shift(side.x0_dot_v, r0, c2)) / side.length
}

/// Line integral `S_{0,-1} = (1/L) int_0^L R dt`.
pub fn s0m1<T: RealScalar>(side: &SideProjection<T>) -> T {
    let c2 = side.offset_squared();
    let (r0, r1) = side.end_distances();
    let x1_dot_v = side.x0_dot_v + side.length;
    let two = cast::<T>(2.0);
    ((x1_dot_v * r1 + c2 * log_shift(x1_dot_v, r1, c2))
        - (side.x0_dot_v * r0 + c2 * log_shift(side.x0_dot_v, r0, c2)))
        / (two * side.length)
}

/// Contribution of a side to the contour integral for `T_{0,0,1}`.
///
/// Zero when the field point lies in the normal plane of the side.
pub fn t001_side<T: RealScalar>(s0p1: T, x0_dot_n: T, length: T) -> T {
    if x0_dot_n.abs() < T::epsilon() {
        T::zero()
    } else {
        -length * x0_dot_n * s0p1
    }
}

/// Tangents of the half angles subtended by the two ends of a side
fn half_angle_tangents<T: RealScalar>(p: T, q: T) -> (T, T) {
    let half = cast::<T>(0.5);
    let angle = |x: T| {
        let c = (T::one() / ((x * x) / (q * q) + T::one()).sqrt()).min(T::one());
        (c.acos() * half).tan()
    };
    (angle(p), angle(T::one() + p))
}

/// Contribution of a side to the contour integral for `T_{0,0,3}`.
///
/// The result still has to be divided by `gamma` once all three sides are
/// summed. Two analytic branches are used depending on whether
/// `p = x0.v / L` lies in `(-1, 0)`. The contribution is zero when the field
/// point lies in the normal plane of the side and at the removable
/// singularity `gamma = L q`, where `q = sqrt((x0.n)^2 + gamma^2) / L`.
pub fn t003_side<T: RealScalar>(side: &SideProjection<T>) -> T {
    let eps = T::epsilon();
    if side.x0_dot_n.abs() <= eps {
        return T::zero();
    }
    let length = side.length;
    let p = side.x0_dot_v / length;
    let q = side.offset_squared().sqrt() / length;

    let ellq = length * q;
    let one_plus = T::one() + side.gamma / ellq;
    let one_minus = T::one() - side.gamma / ellq;
    // one_minus >= 0 holds exactly; tiny or negative values only come from rounding
    if one_minus < eps {
        return T::zero();
    }

    let (r1, r2) = half_angle_tangents(p, q);
    let sqrt_plus_minus = (one_plus / one_minus).sqrt();
    let sqrt_minus_plus = (one_minus / one_plus).sqrt();
    let two = cast::<T>(2.0);

    let prefactor =
        -side.x0_dot_n / length * two / (q * one_plus) * sqrt_plus_minus;

    if -T::one() < p && p < T::zero() {
        prefactor * ((r1 * sqrt_minus_plus).atan() + (r2 * sqrt_minus_plus).atan())
    } else {
        let sign = if T::one() + p > T::zero() {
            T::one()
        } else {
            -T::one()
        };
        sign * prefactor * ((r2 * sqrt_minus_plus).atan() - (r1 * sqrt_minus_plus).atan())
    }
}

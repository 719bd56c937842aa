//! Recursive evaluation of the panel integrals `T_{m,n,q}`
//!
//! With the panel parametrised as `y0 - a l1 vhat - b l2 what` over
//! `0 <= b <= a <= 1`, the integrals are
//! `T_{m,n,q}(x) = int a^m b^n R^{-q} da db` where `R` is the regularized
//! distance between `x` and the point of the panel. Integration by parts in
//! `a` and `b` gives two coupled relations which are solved for `T_{m+1,n,q}`
//! and `T_{m,n+1,q}`. The boundary terms of the integration by parts are the
//! coefficients `A_{m,n,q-2}` and `B_{m,n,q-2}`, built from line integrals
//! along the three sides.
//!
//! Only `q = 1` and `q = 3` with `m + n <= 3` are needed, so the recursion is
//! unrolled into a fixed sequence of steps.
use crate::kernel::base_cases::{BaseCases, GeometryData};
use crate::types::{cast, RealScalar};
use itertools::izip;
use std::ops::Index;

/// Index triples `(m, n, q)` of the integrals held by an [`IntegralTable`]
pub const INTEGRAL_INDICES: [(usize, usize, usize); 13] = [
    (0, 0, 1),
    (1, 0, 1),
    (0, 1, 1),
    (0, 0, 3),
    (1, 0, 3),
    (0, 1, 3),
    (2, 0, 3),
    (1, 1, 3),
    (0, 2, 3),
    (3, 0, 3),
    (2, 1, 3),
    (1, 2, 3),
    (0, 3, 3),
];

fn slot(m: usize, n: usize, q: usize) -> Option<usize> {
    INTEGRAL_INDICES
        .iter()
        .position(|&index| index == (m, n, q))
}

/// Inputs shared by the two recursion operators for one step `(m, n, q)`
pub struct RecursionStep<'a, T: RealScalar> {
    /// Current indices `(m, n, q)`
    pub index: (usize, usize, usize),
    /// `A_{m,n,q-2}`
    pub a: &'a [T],
    /// `B_{m,n,q-2}`
    pub b: &'a [T],
    /// `T_{m-1,n,q-2}`; only read when `m > 0`
    pub t_m_minus: Option<&'a [T]>,
    /// `T_{m,n-1,q-2}`; only read when `n > 0`
    pub t_n_minus: Option<&'a [T]>,
    /// `T_{m,n,q}`
    pub t: &'a [T],
}

impl<'a, T: RealScalar> RecursionStep<'a, T> {
    fn lower_order(&self, point: usize) -> (T, T) {
        let (m, n, _) = self.index;
        debug_assert!(m == 0 || self.t_m_minus.is_some());
        debug_assert!(n == 0 || self.t_n_minus.is_some());
        let t_m = match self.t_m_minus {
            Some(values) if m > 0 => values[point],
            _ => T::zero(),
        };
        let t_n = match self.t_n_minus {
            Some(values) if n > 0 => values[point],
            _ => T::zero(),
        };
        (t_m, t_n)
    }

    fn denominators(&self, geometry: &GeometryData<T>) -> (T, T, T) {
        let v_dot_w = geometry.v_dot_w;
        let det = v_dot_w * v_dot_w - T::one();
        debug_assert!(det < T::zero(), "degenerate panel in recursion");
        let q_minus_2 = cast::<T>(self.index.2 as f64 - 2.0);
        (det, q_minus_2, v_dot_w)
    }
}

/// Raise the first index: `T_{m+1,n,q}` from a recursion step
pub fn increment_m<T: RealScalar>(step: &RecursionStep<T>, geometry: &GeometryData<T>) -> Vec<T> {
    let (m, n, _) = step.index;
    let (det, q_minus_2, v_dot_w) = step.denominators(geometry);
    let ell1 = geometry.ell1;
    let ell2 = geometry.ell2;
    let m = cast::<T>(m as f64);
    let n = cast::<T>(n as f64);

    izip!(
        step.a,
        step.b,
        step.t,
        &geometry.x0_dot_v,
        &geometry.x0_dot_w
    )
    .enumerate()
    .map(|(point, (&a, &b, &t, &x0_dot_v, &x0_dot_w))| {
        let (t_m, t_n) = step.lower_order(point);
        (a / (ell1 * ell1 * q_minus_2) - v_dot_w * b / (ell1 * ell2 * q_minus_2)
            - m / (ell1 * ell1 * q_minus_2) * t_m
            + v_dot_w * n / (ell1 * ell2 * q_minus_2) * t_n
            + (x0_dot_v - v_dot_w * x0_dot_w) / ell1 * t)
            / det
    })
    .collect()
}

/// Raise the second index: `T_{m,n+1,q}` from a recursion step
pub fn increment_n<T: RealScalar>(step: &RecursionStep<T>, geometry: &GeometryData<T>) -> Vec<T> {
    let (m, n, _) = step.index;
    let (det, q_minus_2, v_dot_w) = step.denominators(geometry);
    let ell1 = geometry.ell1;
    let ell2 = geometry.ell2;
    let m = cast::<T>(m as f64);
    let n = cast::<T>(n as f64);

    izip!(
        step.a,
        step.b,
        step.t,
        &geometry.x0_dot_v,
        &geometry.x0_dot_w
    )
    .enumerate()
    .map(|(point, (&a, &b, &t, &x0_dot_v, &x0_dot_w))| {
        let (t_m, t_n) = step.lower_order(point);
        (b / (ell2 * ell2 * q_minus_2) - v_dot_w * a / (ell1 * ell2 * q_minus_2)
            - n / (ell2 * ell2 * q_minus_2) * t_n
            + v_dot_w * m / (ell1 * ell2 * q_minus_2) * t_m
            + (x0_dot_w - v_dot_w * x0_dot_v) / ell2 * t)
            / det
    })
    .collect()
}

/// First and second moments `int_0^1 alpha^k R^{-1} d alpha`, `k = 1, 2`, along a side.
///
/// `r_start` and `r_end` are the regularized distances to the two ends of
/// the side, `x_dot` the projection of the field point (relative to the
/// start vertex) onto the side direction, and `s_plus`, `s_minus` the line
/// integrals `S_{0,1}` and `S_{0,-1}` of the side.
pub fn line_moments<T: RealScalar>(
    r_start: T,
    r_end: T,
    x_dot: T,
    ell: T,
    s_plus: T,
    s_minus: T,
) -> (T, T) {
    let ell2 = ell * ell;
    let first = (r_end - r_start - ell * x_dot * s_plus) / ell2;
    let second = (r_end - s_minus - ell * x_dot * first) / ell2;
    (first, second)
}

/// Boundary coefficients `A_{m,n,1}` and `B_{m,n,1}` used by the `q = 3` steps
#[derive(Debug, Clone)]
pub struct AbCoefficients<T: RealScalar> {
    /// `A_{0,0,1}`
    pub a001: Vec<T>,
    /// `B_{0,0,1}`
    pub b001: Vec<T>,
    /// `A_{1,0,1}`
    pub a101: Vec<T>,
    /// `A_{0,1,1}`
    pub a011: Vec<T>,
    /// `A_{2,0,1}`
    pub a201: Vec<T>,
    /// `A_{0,2,1}`
    pub a021: Vec<T>,
    /// `B_{1,0,1}`
    pub b101: Vec<T>,
    /// `B_{0,1,1}`
    pub b011: Vec<T>,
    /// `B_{2,0,1}`
    pub b201: Vec<T>,
    /// `B_{0,2,1}`
    pub b021: Vec<T>,
}

impl<T: RealScalar> AbCoefficients<T> {
    /// Build the coefficients from the side line integrals
    pub fn compute(base: &BaseCases<T>, geometry: &GeometryData<T>) -> Self {
        let npts = geometry.number_of_points();
        let mut out = Self {
            a001: Vec::with_capacity(npts),
            b001: Vec::with_capacity(npts),
            a101: Vec::with_capacity(npts),
            a011: Vec::with_capacity(npts),
            a201: Vec::with_capacity(npts),
            a021: Vec::with_capacity(npts),
            b101: Vec::with_capacity(npts),
            b011: Vec::with_capacity(npts),
            b201: Vec::with_capacity(npts),
            b021: Vec::with_capacity(npts),
        };
        let two = cast::<T>(2.0);

        for i in 0..npts {
            let (e1_1, e1_2) = line_moments(
                geometry.r0[i],
                geometry.r1[i],
                geometry.x0_dot_v[i],
                geometry.ell1,
                base.s_plus[0][i],
                base.s_minus[0][i],
            );
            let (e2_1, e2_2) = line_moments(
                geometry.r1[i],
                geometry.r2[i],
                geometry.x1_dot_w[i],
                geometry.ell2,
                base.s_plus[1][i],
                base.s_minus[1][i],
            );
            let (d_1, d_2) = line_moments(
                geometry.r2[i],
                geometry.r0[i],
                geometry.x2_dot_d[i],
                geometry.ell3,
                base.s_plus[2][i],
                base.s_minus[2][i],
            );
            let e1_0 = base.s_plus[0][i];
            let e2_0 = base.s_plus[1][i];
            let d_0 = base.s_plus[2][i];

            let a001 = e2_0 - d_0;
            out.a001.push(a001);
            out.b001.push(-e1_0 + d_0);
            out.a101.push(a001 + d_1);
            out.a201.push(a001 + two * d_1 - d_2);
            out.a011.push(e2_1 - d_0 + d_1);
            out.a021.push(e2_2 - d_0 + two * d_1 - d_2);
            out.b101.push(-e1_1 + d_0 - d_1);
            out.b201.push(-e1_2 + d_0 - two * d_1 + d_2);
            out.b011.push(d_0 - d_1);
            out.b021.push(d_0 - two * d_1 + d_2);
        }
        out
    }
}

/// The integrals `T_{m,n,q}` of one panel for a batch of field points.
///
/// Indexing with `(m, n, q)` returns the values for every field point and
/// panics for a triple that is not in [`INTEGRAL_INDICES`].
#[derive(Debug, Clone)]
pub struct IntegralTable<T: RealScalar> {
    values: Vec<Vec<T>>,
}

impl<T: RealScalar> IntegralTable<T> {
    /// Run the recursion from the base cases
    pub fn compute(base: &BaseCases<T>, geometry: &GeometryData<T>) -> Self {
        let t001 = &base.t001;
        let t003 = &base.t003;

        // q = 1 from the S_{0,-1} line integrals
        let a00m1 = izip!(&base.s_minus[1], &base.s_minus[2])
            .map(|(&e2, &d)| e2 - d)
            .collect::<Vec<_>>();
        let b00m1 = izip!(&base.s_minus[0], &base.s_minus[2])
            .map(|(&e1, &d)| d - e1)
            .collect::<Vec<_>>();
        let step = RecursionStep {
            index: (0, 0, 1),
            a: &a00m1,
            b: &b00m1,
            t_m_minus: None,
            t_n_minus: None,
            t: t001,
        };
        let t101 = increment_m(&step, geometry);
        let t011 = increment_n(&step, geometry);

        let ab = AbCoefficients::compute(base, geometry);

        // q = 3, m + n = 1
        let step = RecursionStep {
            index: (0, 0, 3),
            a: &ab.a001,
            b: &ab.b001,
            t_m_minus: None,
            t_n_minus: None,
            t: t003,
        };
        let t103 = increment_m(&step, geometry);
        let t013 = increment_n(&step, geometry);

        // m + n = 2
        let step = RecursionStep {
            index: (1, 0, 3),
            a: &ab.a101,
            b: &ab.b101,
            t_m_minus: Some(t001),
            t_n_minus: None,
            t: &t103,
        };
        let t203 = increment_m(&step, geometry);
        let t113 = increment_n(&step, geometry);
        let step = RecursionStep {
            index: (0, 1, 3),
            a: &ab.a011,
            b: &ab.b011,
            t_m_minus: None,
            t_n_minus: Some(t001),
            t: &t013,
        };
        let t023 = increment_n(&step, geometry);

        // m + n = 3
        let step = RecursionStep {
            index: (2, 0, 3),
            a: &ab.a201,
            b: &ab.b201,
            t_m_minus: Some(&t101),
            t_n_minus: None,
            t: &t203,
        };
        let t303 = increment_m(&step, geometry);
        let t213 = increment_n(&step, geometry);
        let step = RecursionStep {
            index: (0, 2, 3),
            a: &ab.a021,
            b: &ab.b021,
            t_m_minus: None,
            t_n_minus: Some(&t011),
            t: &t023,
        };
        let t033 = increment_n(&step, geometry);
        let t123 = increment_m(&step, geometry);

        Self {
            values: vec![
                t001.clone(),
                t101,
                t011,
                t003.clone(),
                t103,
                t013,
                t203,
                t113,
                t023,
                t303,
                t213,
                t123,
                t033,
            ],
        }
    }

    /// Values of `T_{m,n,q}`, if the table holds this triple
    pub fn get(&self, m: usize, n: usize, q: usize) -> Option<&[T]> {
        slot(m, n, q).map(|s| self.values[s].as_slice())
    }

    /// Number of field points
    pub fn number_of_points(&self) -> usize {
        self.values[0].len()
    }
}

impl<T: RealScalar> Index<(usize, usize, usize)> for IntegralTable<T> {
    type Output = [T];

    fn index(&self, (m, n, q): (usize, usize, usize)) -> &[T] {
        match self.get(m, n, q) {
            Some(values) => values,
            None => panic!("T_{{{m},{n},{q}}} is not part of the integral table"),
        }
    }
}

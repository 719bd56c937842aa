//! Base cases of the panel integral recursion
use crate::grid::{dot, sub, Panel};
use crate::kernel::line_integrals::{
    regularized_distance, s0m1, s0p1, t001_side, t003_side, SideProjection,
};
use crate::types::RealScalar;

/// Geometric quantities of one panel relative to a batch of field points.
///
/// Per-point quantities are stored as arrays indexed like the field points.
/// Side `e1` runs from vertex 0 with direction `vhat`, side `e2` from vertex 1
/// with direction `what`, and side `d` from vertex 2 back to vertex 0.
#[derive(Debug, Clone)]
pub struct GeometryData<T: RealScalar> {
    /// Field point minus vertex 0
    pub x0: Vec<[T; 3]>,
    /// Direction of side `e1`
    pub vhat: [T; 3],
    /// Direction of side `e2`
    pub what: [T; 3],
    /// `vhat . what`
    pub v_dot_w: T,
    /// `(x - y0) . vhat`
    pub x0_dot_v: Vec<T>,
    /// `(x - y0) . what`
    pub x0_dot_w: Vec<T>,
    /// `(x - y1) . what`
    pub x1_dot_w: Vec<T>,
    /// `(x - y2) . dhat`
    pub x2_dot_d: Vec<T>,
    /// Regularized distance to vertex 0
    pub r0: Vec<T>,
    /// Regularized distance to vertex 1
    pub r1: Vec<T>,
    /// Regularized distance to vertex 2
    pub r2: Vec<T>,
    /// Length of side `e1`
    pub ell1: T,
    /// Length of side `e2`
    pub ell2: T,
    /// Length of side `d`
    pub ell3: T,
    /// Twice the panel area
    pub bh: T,
}

impl<T: RealScalar> GeometryData<T> {
    /// Number of field points
    pub fn number_of_points(&self) -> usize {
        self.x0.len()
    }
}

/// Base-case integrals of one panel for a batch of field points
#[derive(Debug, Clone)]
pub struct BaseCases<T: RealScalar> {
    /// `T_{0,0,1}`
    pub t001: Vec<T>,
    /// `T_{0,0,3}`
    pub t003: Vec<T>,
    /// `S_{0,1}` along `e1`, `e2` and `d`
    pub s_plus: [Vec<T>; 3],
    /// `S_{0,-1}` along `e1`, `e2` and `d`
    pub s_minus: [Vec<T>; 3],
}

/// Evaluate the base-case integrals `T_{0,0,1}`, `T_{0,0,3}` and the side
/// line integrals for every field point.
pub fn compute_base_cases<T: RealScalar>(
    panel: &Panel<T>,
    points: &[[T; 3]],
    regularization: T,
) -> (BaseCases<T>, GeometryData<T>) {
    let npts = points.len();
    let vertices = panel.vertices();
    let directions = panel.directions();
    let normals = panel.side_normals();
    let lengths = panel.lengths();
    let eps2 = regularization * regularization;

    let new_array = || Vec::with_capacity(npts);
    let mut t001 = new_array();
    let mut t003 = new_array();
    let mut s_plus = [new_array(), new_array(), new_array()];
    let mut s_minus = [new_array(), new_array(), new_array()];

    let mut x0 = Vec::with_capacity(npts);
    let mut x0_dot_w = new_array();
    let mut side_dots = [new_array(), new_array(), new_array()];
    let mut distances = [new_array(), new_array(), new_array()];

    for point in points {
        let mut gamma = T::zero();
        let mut sum001 = T::zero();
        let mut sum003 = T::zero();

        for side in 0..3 {
            let x0i = sub(point, &vertices[side]);
            let x0i_squared = dot(&x0i, &x0i);
            let x0_dot_n = dot(&x0i, &normals[side]);
            let x0_dot_v = dot(&x0i, &directions[side]);

            if side == 0 {
                gamma = regularized_distance(x0i_squared, x0_dot_n, x0_dot_v, regularization);
                x0_dot_w.push(dot(&x0i, &directions[1]));
                x0.push(x0i);
            }

            let projection = SideProjection {
                x0_dot_v,
                x0_dot_n,
                gamma,
                length: lengths[side],
            };
            let plus = s0p1(&projection);
            sum003 += t003_side(&projection);
            sum001 += t001_side(plus, x0_dot_n, lengths[side]);

            s_plus[side].push(plus);
            s_minus[side].push(s0m1(&projection));
            side_dots[side].push(x0_dot_v);
            distances[side].push((x0i_squared + eps2).sqrt());
        }

        let value003 = sum003 / gamma;
        t001.push((sum001 - gamma * gamma * value003) / panel.bh());
        t003.push(value003 / panel.bh());
    }

    let [x0_dot_v, x1_dot_w, x2_dot_d] = side_dots;
    let [r0, r1, r2] = distances;

    (
        BaseCases {
            t001,
            t003,
            s_plus,
            s_minus,
        },
        GeometryData {
            x0,
            vhat: directions[0],
            what: directions[1],
            v_dot_w: panel.v_dot_w(),
            x0_dot_v,
            x0_dot_w,
            x1_dot_w,
            x2_dot_d,
            r0,
            r1,
            r2,
            ell1: lengths[0],
            ell2: lengths[1],
            ell3: lengths[2],
            bh: panel.bh(),
        },
    )
}

//! Contraction of the panel integrals into 3x3 vertex blocks
//!
//! The regularized Stokeslet is
//! `S(r) = I (R^{-1} + eps^2 R^{-3}) + r r^T R^{-3}` with `R^2 = |r|^2 + eps^2`.
//! On a panel `r = x0 + a l1 vhat + b l2 what`, so integrating `S` against a
//! monomial in `(a, b)` expands into integrals `T_{m,n,q}` weighting a fixed
//! set of tensors. The linear hat functions of the three vertices are
//! `1 - a`, `a - b` and `b`, which makes the vertex blocks telescoping
//! differences of the same expansion shifted by one degree.
use crate::kernel::base_cases::GeometryData;
use crate::kernel::recursion::IntegralTable;
use crate::types::RealScalar;
use std::ops::Sub;

/// A 3x3 block
pub type Block<T> = [[T; 3]; 3];

/// Scalar weights of the tensors in the expansion of the Stokeslet
#[derive(Debug, Clone, Copy)]
struct Weights<T: RealScalar> {
    identity: T,
    vv: T,
    ww: T,
    vw: T,
    x0v: T,
    x0w: T,
    x0x0: T,
}

impl<T: RealScalar> Weights<T> {
    /// Expansion weighted by `a^m b^n` for field point `point`
    fn shifted(
        table: &IntegralTable<T>,
        geometry: &GeometryData<T>,
        eps2: T,
        (m, n): (usize, usize),
        point: usize,
    ) -> Self {
        let t = |dm: usize, dn: usize, q: usize| table[(m + dm, n + dn, q)][point];
        let ell1 = geometry.ell1;
        let ell2 = geometry.ell2;
        Self {
            identity: t(0, 0, 1) + eps2 * t(0, 0, 3),
            vv: ell1 * ell1 * t(2, 0, 3),
            ww: ell2 * ell2 * t(0, 2, 3),
            vw: ell1 * ell2 * t(1, 1, 3),
            x0v: ell1 * t(1, 0, 3),
            x0w: ell2 * t(0, 1, 3),
            x0x0: t(0, 0, 3),
        }
    }

    fn block(&self, vhat: &[T; 3], what: &[T; 3], x0: &[T; 3]) -> Block<T> {
        let mut block = [[T::zero(); 3]; 3];
        for i in 0..3 {
            block[i][i] = self.identity;
        }
        add_outer(&mut block, self.vv, vhat);
        add_outer(&mut block, self.ww, what);
        add_symmetric(&mut block, self.vw, vhat, what);
        add_symmetric(&mut block, self.x0v, vhat, x0);
        add_symmetric(&mut block, self.x0w, what, x0);
        add_outer(&mut block, self.x0x0, x0);
        block
    }
}

impl<T: RealScalar> Sub for Weights<T> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            identity: self.identity - other.identity,
            vv: self.vv - other.vv,
            ww: self.ww - other.ww,
            vw: self.vw - other.vw,
            x0v: self.x0v - other.x0v,
            x0w: self.x0w - other.x0w,
            x0x0: self.x0x0 - other.x0x0,
        }
    }
}

/// `block += s u u^T`
fn add_outer<T: RealScalar>(block: &mut Block<T>, s: T, u: &[T; 3]) {
    for i in 0..3 {
        for j in 0..3 {
            block[i][j] += s * u[i] * u[j];
        }
    }
}

/// `block += s (u r^T + r u^T)`
fn add_symmetric<T: RealScalar>(block: &mut Block<T>, s: T, u: &[T; 3], r: &[T; 3]) {
    for i in 0..3 {
        for j in 0..3 {
            block[i][j] += s * (u[i] * r[j] + u[j] * r[i]);
        }
    }
}

/// The three vertex blocks of a panel for every field point
#[derive(Debug, Clone)]
pub struct PanelBlocks<T: RealScalar> {
    blocks: [Vec<Block<T>>; 3],
}

impl<T: RealScalar> PanelBlocks<T> {
    /// Blocks of local vertex `vertex` for all field points
    pub fn vertex(&self, vertex: usize) -> &[Block<T>] {
        &self.blocks[vertex]
    }

    /// Number of field points
    pub fn number_of_points(&self) -> usize {
        self.blocks[0].len()
    }

    /// Sum of the three vertex blocks at a field point
    pub fn sum(&self, point: usize) -> Block<T> {
        let mut out = [[T::zero(); 3]; 3];
        for blocks in &self.blocks {
            for i in 0..3 {
                for j in 0..3 {
                    out[i][j] += blocks[point][i][j];
                }
            }
        }
        out
    }
}

/// Build the vertex blocks of a panel from its integral table.
///
/// The blocks are not yet scaled by `bh / (8 pi mu)`.
pub fn compute_blocks<T: RealScalar>(
    geometry: &GeometryData<T>,
    table: &IntegralTable<T>,
    regularization: T,
) -> PanelBlocks<T> {
    let eps2 = regularization * regularization;
    let npts = geometry.number_of_points();
    let mut blocks = [
        Vec::with_capacity(npts),
        Vec::with_capacity(npts),
        Vec::with_capacity(npts),
    ];

    for (point, x0) in geometry.x0.iter().enumerate() {
        let full = Weights::shifted(table, geometry, eps2, (0, 0), point);
        let a = Weights::shifted(table, geometry, eps2, (1, 0), point);
        let b = Weights::shifted(table, geometry, eps2, (0, 1), point);

        blocks[0].push((full - a).block(&geometry.vhat, &geometry.what, x0));
        blocks[1].push((a - b).block(&geometry.vhat, &geometry.what, x0));
        blocks[2].push(b.block(&geometry.vhat, &geometry.what, x0));
    }

    PanelBlocks { blocks }
}

/// Integral of the undivided regularized Stokeslet over a panel for every field point
pub fn panel_kernel<T: RealScalar>(
    geometry: &GeometryData<T>,
    table: &IntegralTable<T>,
    regularization: T,
) -> Vec<Block<T>> {
    let eps2 = regularization * regularization;
    geometry
        .x0
        .iter()
        .enumerate()
        .map(|(point, x0)| {
            Weights::shifted(table, geometry, eps2, (0, 0), point).block(
                &geometry.vhat,
                &geometry.what,
                x0,
            )
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::grid::Panel;
    use crate::kernel::base_cases::compute_base_cases;
    use crate::kernel::panel_blocks;
    use crate::quadrature::collapsed_triangle_rule;
    use approx::*;
    use paste::paste;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_points<T: RealScalar>(npts: usize, seed: u64) -> Vec<[T; 3]> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..npts)
            .map(|_| {
                [0; 3].map(|_| num::cast::<f64, T>(rng.gen_range(-2.0..2.0)).unwrap())
            })
            .collect()
    }

    fn panel<T: RealScalar>() -> Panel<T> {
        let c = |x: f64| num::cast::<f64, T>(x).unwrap();
        Panel::new(
            [
                [c(0.0), c(0.0), c(0.0)],
                [c(1.0), c(0.1), c(0.2)],
                [c(0.2), c(1.1), c(-0.1)],
            ],
            [0, 1, 2],
        )
        .unwrap()
    }

    macro_rules! test_blocks {
        ($($scalar:ident, $tol:expr),+) => {
        $(
            paste! {

                #[test]
                fn [<test_blocks_are_symmetric_ $scalar>]() {
                    let panel = panel::<$scalar>();
                    let points = random_points::<$scalar>(20, 2);
                    let blocks = panel_blocks(&panel, &points, 0.1 as $scalar);
                    assert_eq!(blocks.number_of_points(), points.len());
                    for vertex in 0..3 {
                        for block in blocks.vertex(vertex) {
                            for i in 0..3 {
                                for j in 0..3 {
                                    assert_relative_eq!(
                                        block[i][j],
                                        block[j][i],
                                        max_relative = $tol,
                                        epsilon = $tol
                                    );
                                }
                            }
                        }
                    }
                }

            }
        )*
        };
    }

    test_blocks!(f32, 1e-4, f64, 1e-12);

    /// Direct quadrature of the Stokeslet weighted by `weight(a, b)`
    fn quadrature_block(
        geometry: &GeometryData<f64>,
        x0: &[f64; 3],
        regularization: f64,
        weight: impl Fn(f64, f64) -> f64,
    ) -> Block<f64> {
        let rule = collapsed_triangle_rule(40);
        let eps2 = regularization * regularization;
        let mut out = [[0.0; 3]; 3];
        for (k, w) in rule.weights.iter().enumerate() {
            let a = rule.points[2 * k];
            let b = rule.points[2 * k + 1];
            let r = [0usize, 1, 2].map(|i| {
                x0[i] + a * geometry.ell1 * geometry.vhat[i] + b * geometry.ell2 * geometry.what[i]
            });
            let rsq = r.iter().map(|x| x * x).sum::<f64>() + eps2;
            let rinv = 1.0 / rsq.sqrt();
            let rinv3 = rinv / rsq;
            let hat = weight(a, b);
            for i in 0..3 {
                for j in 0..3 {
                    let delta = if i == j { 1.0 } else { 0.0 };
                    out[i][j] += w * hat * (delta * (rinv + eps2 * rinv3) + r[i] * r[j] * rinv3);
                }
            }
        }
        out
    }

    fn assert_blocks_close(actual: &Block<f64>, expected: &Block<f64>) {
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(
                    actual[i][j],
                    expected[i][j],
                    max_relative = 1e-7,
                    epsilon = 1e-10
                );
            }
        }
    }

    #[test]
    fn test_blocks_match_quadrature() {
        let panel = panel::<f64>();
        let points = [[0.4, 0.4, 0.7], [1.5, -0.5, -0.6]];
        let regularization = 0.1;
        let (base, geometry) = compute_base_cases(&panel, &points, regularization);
        let table = IntegralTable::compute(&base, &geometry);
        let blocks = compute_blocks(&geometry, &table, regularization);

        let hats: [fn(f64, f64) -> f64; 3] = [|a, _| 1.0 - a, |a, b| a - b, |_, b| b];
        for (point, x0) in geometry.x0.iter().enumerate() {
            for (vertex, hat) in hats.iter().enumerate() {
                let expected = quadrature_block(&geometry, x0, regularization, hat);
                assert_blocks_close(&blocks.vertex(vertex)[point], &expected);
            }
        }
    }

    #[test]
    fn test_vertex_blocks_sum_to_panel_integral() {
        let panel = panel::<f64>();
        let points = [[0.3, 0.5, -0.6], [-0.8, 0.2, 0.4], [0.6, 1.4, 0.9]];
        let regularization = 0.05;
        let (base, geometry) = compute_base_cases(&panel, &points, regularization);
        let table = IntegralTable::compute(&base, &geometry);
        let blocks = compute_blocks(&geometry, &table, regularization);
        let kernel = panel_kernel(&geometry, &table, regularization);

        for (point, x0) in geometry.x0.iter().enumerate() {
            let expected = quadrature_block(&geometry, x0, regularization, |_, _| 1.0);
            assert_blocks_close(&blocks.sum(point), &expected);
            assert_blocks_close(&kernel[point], &expected);
        }
    }
}

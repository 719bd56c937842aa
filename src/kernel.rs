//! Closed-form evaluation of regularized Stokeslet panel integrals
//!
//! For each panel the computation runs in three stages: the base-case
//! integrals and side line integrals ([`base_cases`]), the recursion up to
//! total degree three ([`recursion`]), and the contraction into one 3x3
//! block per panel vertex ([`blocks`]).
pub mod base_cases;
pub mod blocks;
pub mod line_integrals;
pub mod recursion;

use crate::grid::Panel;
use crate::types::RealScalar;
use base_cases::compute_base_cases;
use blocks::{compute_blocks, PanelBlocks};
use recursion::IntegralTable;

/// Evaluate the three vertex blocks of a panel for a batch of field points.
///
/// The blocks are not scaled by the panel area or the viscosity.
pub fn panel_blocks<T: RealScalar>(
    panel: &Panel<T>,
    points: &[[T; 3]],
    regularization: T,
) -> PanelBlocks<T> {
    let (base, geometry) = compute_base_cases(panel, points, regularization);
    let table = IntegralTable::compute(&base, &geometry);
    compute_blocks(&geometry, &table, regularization)
}

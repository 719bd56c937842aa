//! Post-processing of solved force densities
use crate::grid::TriangleSurface;
use crate::types::{cast, RealScalar, Result, StokesletError};
use nalgebra::{DMatrix, DVector};

/// Total force exerted on a surface by a piecewise linear force density.
///
/// `forces` holds the stacked vertex force densities `[F0x, F0y, F0z, F1x, ...]`.
/// Each panel contributes the mean of its three vertex values times its area.
pub fn total_force<T: RealScalar>(surface: &TriangleSurface<T>, forces: &[T]) -> Result<[T; 3]> {
    check_length(3 * surface.number_of_vertices(), forces.len())?;
    let third = cast::<T>(1.0 / 3.0);
    let half = cast::<T>(0.5);

    let mut total = [T::zero(); 3];
    for panel in surface.panels() {
        let weight = third * half * panel.bh();
        for (component, value) in total.iter_mut().enumerate() {
            *value += weight
                * panel
                    .indices()
                    .iter()
                    .map(|index| forces[3 * index + component])
                    .sum::<T>();
        }
    }
    Ok(total)
}

/// Drag on a sphere of radius `radius` translating with unit speed, `6 pi mu r`
pub fn stokes_drag<T: RealScalar>(viscosity: T, radius: T) -> T {
    cast::<T>(6.0) * T::PI() * viscosity * radius
}

/// Velocities `U = A F` at the field points of an assembled operator
pub fn evaluate_velocity<T: RealScalar>(matrix: &DMatrix<T>, forces: &[T]) -> Result<Vec<T>> {
    check_length(matrix.ncols(), forces.len())?;
    let velocity = matrix * DVector::from_column_slice(forces);
    Ok(velocity.iter().copied().collect())
}

fn check_length(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(StokesletError::ForceLength { expected, actual })
    }
}

//! Regularized Stokeslet operator assembly
mod dense;

pub use dense::StokesletAssembler;

use crate::types::{cast, to_f64, RealScalar, Result, StokesletError};

/// Options for a Stokeslet assembler
#[derive(Debug, Clone)]
pub struct AssemblerOptions<T: RealScalar> {
    /// Regularization length of the Stokeslet
    regularization: T,
    /// Dynamic viscosity of the fluid
    viscosity: T,
    /// Maximum number of panels sent to the parallel kernel evaluation at once
    batch_size: usize,
}

impl<T: RealScalar> Default for AssemblerOptions<T> {
    fn default() -> Self {
        Self {
            regularization: cast(1e-6),
            viscosity: T::one(),
            batch_size: 128,
        }
    }
}

impl<T: RealScalar> AssemblerOptions<T> {
    /// Create options with the given regularization and viscosity
    pub fn new(regularization: T, viscosity: T) -> Result<Self> {
        let mut options = Self::default();
        options.set_regularization(regularization)?;
        options.set_viscosity(viscosity)?;
        Ok(options)
    }

    /// Regularization length
    pub fn regularization(&self) -> T {
        self.regularization
    }

    /// Viscosity
    pub fn viscosity(&self) -> T {
        self.viscosity
    }

    /// Batch size
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Set the regularization length. Must be positive and finite.
    pub fn set_regularization(&mut self, regularization: T) -> Result<()> {
        self.regularization = positive("regularization", regularization)?;
        Ok(())
    }

    /// Set the viscosity. Must be positive and finite.
    pub fn set_viscosity(&mut self, viscosity: T) -> Result<()> {
        self.viscosity = positive("viscosity", viscosity)?;
        Ok(())
    }

    /// Set the batch size
    pub fn set_batch_size(&mut self, batch_size: usize) -> Result<()> {
        if batch_size == 0 {
            return Err(StokesletError::InvalidParameter {
                name: "batch_size",
                value: 0.0,
            });
        }
        self.batch_size = batch_size;
        Ok(())
    }

    /// Scale applied to the blocks of a panel with twice-area `bh`
    pub(crate) fn panel_scale(&self, bh: T) -> T {
        bh / (cast::<T>(8.0) * T::PI() * self.viscosity)
    }
}

fn positive<T: RealScalar>(name: &'static str, value: T) -> Result<T> {
    if value > T::zero() && value.is_finite() {
        Ok(value)
    } else {
        Err(StokesletError::InvalidParameter {
            name,
            value: to_f64(value),
        })
    }
}

//! Regularized Stokeslet boundary integrals on triangulated surfaces
//!
//! The velocity induced at a set of field points by a piecewise linear force
//! density on a flat-panel surface is assembled into a dense matrix. All
//! panel integrals are evaluated in closed form.
#![cfg_attr(feature = "strict", deny(warnings))]
#![warn(missing_docs)]

pub mod assembly;
pub mod grid;
pub mod kernel;
pub mod postprocess;
pub mod quadrature;
pub mod shapes;
pub mod types;

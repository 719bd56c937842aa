//! Type definitions.

/// Definition of a numerical quadrature rule.
#[derive(Debug, Clone)]
pub struct NumericalQuadratureDefinition {
    /// The dimension d of a single point.
    pub dim: usize,

    /// The number of points of the quadrature rule.
    pub npoints: usize,

    /// The weights of the quadrature rule.
    pub weights: Vec<f64>,
    /// The point coordinates of the quadrature rule.
    ///
    /// A single point has the coordinates p_1, ..., p_d. The vector points
    /// stores all points in consecutive order, so the first point starts at
    /// position zero, the second point at position d, and so on.
    pub points: Vec<f64>,
}

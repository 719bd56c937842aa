//! Types specific to regstokes

/// Real scalar type used throughout the crate
pub trait RealScalar:
    num::Float
    + num::traits::FloatConst
    + num::traits::NumAssign
    + nalgebra::Scalar
    + std::iter::Sum
    + Send
    + Sync
{
}

impl<T> RealScalar for T where
    T: num::Float
        + num::traits::FloatConst
        + num::traits::NumAssign
        + nalgebra::Scalar
        + std::iter::Sum
        + Send
        + Sync
{
}

/// Error type
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum StokesletError {
    /// A side of a panel has zero, negative or non-finite length
    #[error("side {side} has invalid length {length}")]
    DegenerateSide {
        /// Local index of the side
        side: usize,
        /// Offending length
        length: f64,
    },
    /// The first two side directions of a panel are (nearly) parallel
    #[error("side directions are parallel (v.w = {dot})")]
    ParallelSides {
        /// Dot product of the first two side directions
        dot: f64,
    },
    /// The twice-area measure of a panel is not positive
    #[error("panel has non-positive area measure bh = {bh}")]
    NonPositiveArea {
        /// Offending value of `bh`
        bh: f64,
    },
    /// A side direction supplied in a descriptor is not a unit vector
    #[error("direction of side {side} is not a unit vector")]
    NonUnitDirection {
        /// Local index of the side
        side: usize,
    },
    /// A side normal supplied in a descriptor is not the unit in-plane normal of its side
    #[error("normal of side {side} is not the in-plane unit normal of the side")]
    InconsistentSideNormal {
        /// Local index of the side
        side: usize,
    },
    /// The vertices of a descriptor do not match its side directions and lengths
    #[error("vertices do not match direction and length of side {side}")]
    InconsistentVertices {
        /// Local index of the side
        side: usize,
    },
    /// A panel refers to a vertex that does not exist
    #[error("vertex index {index} out of range for {nvertices} vertices")]
    VertexIndexOutOfRange {
        /// Offending index
        index: usize,
        /// Number of vertices in the surface
        nvertices: usize,
    },
    /// Error raised while building a particular panel of a surface
    #[error("panel {panel}: {source}")]
    InvalidPanel {
        /// Index of the panel in the surface
        panel: usize,
        /// Underlying error
        #[source]
        source: Box<StokesletError>,
    },
    /// A scalar parameter is outside its valid range
    #[error("invalid value {value} for parameter `{name}`")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
    },
    /// An output matrix has the wrong shape
    #[error("matrix has shape {actual:?}, expected {expected:?}")]
    ShapeMismatch {
        /// Required shape
        expected: [usize; 2],
        /// Supplied shape
        actual: [usize; 2],
    },
    /// A stacked force vector has the wrong length
    #[error("force vector has length {actual}, expected {expected}")]
    ForceLength {
        /// Required length
        expected: usize,
        /// Supplied length
        actual: usize,
    },
}

impl StokesletError {
    /// Attach the index of the panel that produced this error
    pub fn in_panel(self, panel: usize) -> Self {
        Self::InvalidPanel {
            panel,
            source: Box::new(self),
        }
    }
}

/// Result type
pub type Result<T> = std::result::Result<T, StokesletError>;

/// Convert a real scalar to `f64` for error reporting
pub(crate) fn to_f64<T: RealScalar>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Cast an `f64` constant to a real scalar
pub(crate) fn cast<T: RealScalar>(value: f64) -> T {
    num::cast::<f64, T>(value).unwrap()
}

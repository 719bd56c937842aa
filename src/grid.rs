//! Panels and triangulated surfaces
mod panel;
mod surface;

pub use panel::{Panel, PanelDescriptor};
pub use surface::TriangleSurface;

use crate::types::RealScalar;

pub(crate) fn sub<T: RealScalar>(a: &[T; 3], b: &[T; 3]) -> [T; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub(crate) fn dot<T: RealScalar>(a: &[T; 3], b: &[T; 3]) -> T {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub(crate) fn cross<T: RealScalar>(a: &[T; 3], b: &[T; 3]) -> [T; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub(crate) fn norm<T: RealScalar>(a: &[T; 3]) -> T {
    dot(a, a).sqrt()
}

pub(crate) fn scale<T: RealScalar>(a: &[T; 3], s: T) -> [T; 3] {
    [a[0] * s, a[1] * s, a[2] * s]
}

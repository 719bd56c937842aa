//! Flat triangular panel
use crate::grid::{cross, dot, norm, scale, sub};
use crate::types::{cast, to_f64, RealScalar, Result, StokesletError};
use log::warn;

/// Precomputed geometric record of a triangular panel.
///
/// This is the raw form in which a mesh generator hands panels over. It is
/// converted into a [`Panel`] with `Panel::try_from`, which checks that the
/// record describes a non-degenerate triangle.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelDescriptor<T: RealScalar> {
    /// The three vertices, ordered consistently with the outward normal
    pub vertices: [[T; 3]; 3],
    /// Unit direction of each side. Side `i` starts at vertex `i` and
    /// `directions[i]` points from its end back towards vertex `i`.
    pub directions: [[T; 3]; 3],
    /// Length of each side
    pub lengths: [T; 3],
    /// Unit in-plane normal of each side
    pub side_normals: [[T; 3]; 3],
    /// Twice the area of the panel
    pub bh: T,
    /// Global indices of the three vertices
    pub indices: [usize; 3],
}

/// A validated flat triangular panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel<T: RealScalar> {
    vertices: [[T; 3]; 3],
    directions: [[T; 3]; 3],
    lengths: [T; 3],
    side_normals: [[T; 3]; 3],
    plane_normal: [T; 3],
    bh: T,
    indices: [usize; 3],
}

/// `|v.w|` above which a panel is reported as nearly degenerate
const NEARLY_PARALLEL: f64 = 0.999;

fn parallel_tolerance<T: RealScalar>() -> T {
    cast::<T>(100.0) * T::epsilon()
}

fn check_length<T: RealScalar>(side: usize, length: T) -> Result<()> {
    if length.is_finite() && length > T::zero() {
        Ok(())
    } else {
        Err(StokesletError::DegenerateSide {
            side,
            length: to_f64(length),
        })
    }
}

fn check_sides<T: RealScalar>(v_dot_w: T) -> Result<()> {
    if !v_dot_w.is_finite() || T::one() - v_dot_w.abs() <= parallel_tolerance() {
        return Err(StokesletError::ParallelSides {
            dot: to_f64(v_dot_w),
        });
    }
    if v_dot_w.abs() > cast(NEARLY_PARALLEL) {
        warn!("Panel is nearly degenerate: v.w = {}", to_f64(v_dot_w));
    }
    Ok(())
}

fn check_bh<T: RealScalar>(bh: T) -> Result<()> {
    if bh.is_finite() && bh > T::zero() {
        Ok(())
    } else {
        Err(StokesletError::NonPositiveArea { bh: to_f64(bh) })
    }
}

impl<T: RealScalar> Panel<T> {
    /// Create a panel from three ordered vertices and their global indices.
    pub fn new(vertices: [[T; 3]; 3], indices: [usize; 3]) -> Result<Self> {
        let edges = [
            sub(&vertices[0], &vertices[1]),
            sub(&vertices[1], &vertices[2]),
            sub(&vertices[2], &vertices[0]),
        ];
        let mut lengths = [T::zero(); 3];
        let mut directions = [[T::zero(); 3]; 3];
        for (side, edge) in edges.iter().enumerate() {
            lengths[side] = norm(edge);
            check_length(side, lengths[side])?;
            directions[side] = scale(edge, T::one() / lengths[side]);
        }
        check_sides(dot(&directions[0], &directions[1]))?;

        let normal = cross(&directions[0], &directions[1]);
        let normal_length = norm(&normal);
        if normal_length <= parallel_tolerance() {
            return Err(StokesletError::ParallelSides {
                dot: to_f64(dot(&directions[0], &directions[1])),
            });
        }
        let plane_normal = scale(&normal, T::one() / normal_length);
        let side_normals = [
            cross(&plane_normal, &directions[0]),
            cross(&plane_normal, &directions[1]),
            cross(&plane_normal, &directions[2]),
        ];

        let bh = lengths[0] * lengths[1] * dot(&directions[1], &side_normals[0]);
        check_bh(bh)?;

        Ok(Self {
            vertices,
            directions,
            lengths,
            side_normals,
            plane_normal,
            bh,
            indices,
        })
    }

    /// Vertices
    pub fn vertices(&self) -> &[[T; 3]; 3] {
        &self.vertices
    }
    /// Unit side directions
    pub fn directions(&self) -> &[[T; 3]; 3] {
        &self.directions
    }
    /// Side lengths
    pub fn lengths(&self) -> &[T; 3] {
        &self.lengths
    }
    /// Unit in-plane side normals
    pub fn side_normals(&self) -> &[[T; 3]; 3] {
        &self.side_normals
    }
    /// Unit normal to the plane of the panel
    pub fn plane_normal(&self) -> &[T; 3] {
        &self.plane_normal
    }
    /// Twice the area of the panel
    pub fn bh(&self) -> T {
        self.bh
    }
    /// Area of the panel
    pub fn area(&self) -> T {
        self.bh / cast(2.0)
    }
    /// Global vertex indices
    pub fn indices(&self) -> &[usize; 3] {
        &self.indices
    }
    /// Dot product of the first two side directions
    pub fn v_dot_w(&self) -> T {
        dot(&self.directions[0], &self.directions[1])
    }
}

impl<T: RealScalar> TryFrom<PanelDescriptor<T>> for Panel<T> {
    type Error = StokesletError;

    fn try_from(descriptor: PanelDescriptor<T>) -> Result<Self> {
        let unit_tolerance = T::epsilon().sqrt();
        for side in 0..3 {
            check_length(side, descriptor.lengths[side])?;
            if (norm(&descriptor.directions[side]) - T::one()).abs() > unit_tolerance {
                return Err(StokesletError::NonUnitDirection { side });
            }
        }
        check_sides(dot(&descriptor.directions[0], &descriptor.directions[1]))?;
        check_bh(descriptor.bh)?;

        let normal = cross(&descriptor.directions[0], &descriptor.directions[1]);
        let plane_normal = scale(&normal, T::one() / norm(&normal));

        for side in 0..3 {
            let direction = &descriptor.directions[side];
            let side_normal = &descriptor.side_normals[side];
            let expected = cross(&plane_normal, direction);
            if (norm(side_normal) - T::one()).abs() > unit_tolerance
                || dot(side_normal, direction).abs() > unit_tolerance
                || norm(&sub(side_normal, &expected)) > unit_tolerance
            {
                return Err(StokesletError::InconsistentSideNormal { side });
            }

            let length = descriptor.lengths[side];
            let edge = sub(&descriptor.vertices[side], &descriptor.vertices[(side + 1) % 3]);
            if norm(&sub(&edge, &scale(direction, length))) > unit_tolerance * length {
                return Err(StokesletError::InconsistentVertices { side });
            }
        }

        Ok(Self {
            vertices: descriptor.vertices,
            directions: descriptor.directions,
            lengths: descriptor.lengths,
            side_normals: descriptor.side_normals,
            plane_normal,
            bh: descriptor.bh,
            indices: descriptor.indices,
        })
    }
}

impl<T: RealScalar> From<&Panel<T>> for PanelDescriptor<T> {
    fn from(panel: &Panel<T>) -> Self {
        Self {
            vertices: panel.vertices,
            directions: panel.directions,
            lengths: panel.lengths,
            side_normals: panel.side_normals,
            bh: panel.bh,
            indices: panel.indices,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::*;

    fn reference_panel() -> Panel<f64> {
        Panel::new(
            [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            [0, 1, 2],
        )
        .unwrap()
    }

    #[test]
    fn test_reference_panel_geometry() {
        let panel = reference_panel();
        assert_relative_eq!(panel.bh(), 1.0, epsilon = 1e-14);
        assert_relative_eq!(panel.area(), 0.5, epsilon = 1e-14);
        assert_relative_eq!(panel.lengths()[0], 1.0);
        assert_relative_eq!(panel.lengths()[1], f64::sqrt(2.0));
        assert_relative_eq!(panel.lengths()[2], 1.0);
        assert_relative_eq!(panel.directions()[0][0], -1.0);

        // Plane normal is a unit vector orthogonal to every side
        assert_relative_eq!(norm(panel.plane_normal()), 1.0, epsilon = 1e-14);
        for side in 0..3 {
            assert_abs_diff_eq!(
                dot(panel.plane_normal(), &panel.directions()[side]),
                0.0,
                epsilon = 1e-14
            );
            assert_abs_diff_eq!(
                dot(&panel.side_normals()[side], &panel.directions()[side]),
                0.0,
                epsilon = 1e-14
            );
        }
    }

    #[test]
    fn test_bh_is_twice_area_for_any_ordering() {
        let a = [0.3, -0.2, 1.0];
        let b = [1.4, 0.5, 0.2];
        let c = [-0.1, 0.9, 0.7];
        let area = 0.5 * norm(&cross(&sub(&b, &a), &sub(&c, &a)));
        for vertices in [[a, b, c], [b, c, a], [c, b, a]] {
            let panel = Panel::new(vertices, [0, 1, 2]).unwrap();
            assert_relative_eq!(panel.bh(), 2.0 * area, max_relative = 1e-13);
        }
    }

    #[test]
    fn test_degenerate_panels_are_rejected() {
        let repeated = Panel::new(
            [[0.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            [0, 1, 2],
        );
        assert!(matches!(
            repeated,
            Err(StokesletError::DegenerateSide { side: 0, .. })
        ));

        let collinear = Panel::new(
            [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]],
            [0, 1, 2],
        );
        assert!(matches!(
            collinear,
            Err(StokesletError::ParallelSides { .. })
        ));
    }

    #[test]
    fn test_descriptor_round_trip() {
        let panel = reference_panel();
        let descriptor = PanelDescriptor::from(&panel);
        let rebuilt = Panel::try_from(descriptor).unwrap();
        assert_eq!(rebuilt, panel);
    }

    #[test]
    fn test_descriptor_validation() {
        let panel = reference_panel();

        let mut descriptor = PanelDescriptor::from(&panel);
        descriptor.lengths[2] = 0.0;
        assert!(matches!(
            Panel::try_from(descriptor),
            Err(StokesletError::DegenerateSide { side: 2, .. })
        ));

        let mut descriptor = PanelDescriptor::from(&panel);
        descriptor.directions[1] = [2.0, 0.0, 0.0];
        assert_eq!(
            Panel::try_from(descriptor),
            Err(StokesletError::NonUnitDirection { side: 1 })
        );

        let mut descriptor = PanelDescriptor::from(&panel);
        descriptor.directions[1] = descriptor.directions[0];
        assert!(matches!(
            Panel::try_from(descriptor),
            Err(StokesletError::ParallelSides { .. })
        ));

        let mut descriptor = PanelDescriptor::from(&panel);
        descriptor.side_normals = [[0.0; 3]; 3];
        assert_eq!(
            Panel::try_from(descriptor),
            Err(StokesletError::InconsistentSideNormal { side: 0 })
        );

        // Inward normals have unit length and are orthogonal to their sides
        let mut descriptor = PanelDescriptor::from(&panel);
        descriptor.side_normals = descriptor.side_normals.map(|n| n.map(|x| -x));
        assert_eq!(
            Panel::try_from(descriptor),
            Err(StokesletError::InconsistentSideNormal { side: 0 })
        );

        let mut descriptor = PanelDescriptor::from(&panel);
        descriptor.side_normals[2] = descriptor.side_normals[1];
        assert_eq!(
            Panel::try_from(descriptor),
            Err(StokesletError::InconsistentSideNormal { side: 2 })
        );

        let mut descriptor = PanelDescriptor::from(&panel);
        descriptor.vertices[2] = [0.0, 5.0, 0.0];
        assert_eq!(
            Panel::try_from(descriptor),
            Err(StokesletError::InconsistentVertices { side: 1 })
        );

        let mut descriptor = PanelDescriptor::from(&panel);
        descriptor.vertices = descriptor.vertices.map(|v| [v[0] + 1.0, v[1] - 2.0, v[2]]);
        assert!(Panel::try_from(descriptor).is_ok());

        let mut descriptor = PanelDescriptor::from(&panel);
        descriptor.bh = -1.0;
        assert_eq!(
            Panel::try_from(descriptor),
            Err(StokesletError::NonPositiveArea { bh: -1.0 })
        );
    }
}

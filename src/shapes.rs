//! Definition of test shapes.

use std::collections::HashMap;

use crate::grid::{cross, dot, norm, sub, TriangleSurface};
use crate::types::{cast, to_f64, RealScalar, Result, StokesletError};
use log::warn;

/// Faces of the icosahedron, ordered with outward normals
const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

fn icosahedron_vertices<T: RealScalar>() -> [[T; 3]; 12] {
    let zero = T::zero();
    let one = T::one();
    let phi = (one + cast::<T>(5.0).sqrt()) / cast::<T>(2.0);
    [
        [-one, phi, zero],
        [one, phi, zero],
        [-one, -phi, zero],
        [one, -phi, zero],
        [zero, -one, phi],
        [zero, one, phi],
        [zero, -one, -phi],
        [zero, one, -phi],
        [phi, zero, -one],
        [phi, zero, one],
        [-phi, zero, -one],
        [-phi, zero, one],
    ]
}

/// Number of vertices, edges and faces of an icosahedral sphere with subdivision factor `factor`
pub fn icosphere_size(factor: usize) -> (usize, usize, usize) {
    (
        10 * factor * factor + 2,
        30 * factor * factor,
        20 * factor * factor,
    )
}

/// Create a regular icosahedral sphere
///
/// Each face of the icosahedron is split into `factor^2` triangles on a regular
/// barycentric grid. All points are then projected onto the sphere of radius
/// `radius` centred at the origin. Points on shared edges and corners appear
/// only once, and every triangle is ordered so that its normal points outwards.
pub fn regular_icosphere<T: RealScalar>(
    factor: usize,
    radius: T,
) -> Result<TriangleSurface<T>> {
    if factor == 0 {
        return Err(StokesletError::InvalidParameter {
            name: "factor",
            value: 0.0,
        });
    }
    if !(radius > T::zero() && radius.is_finite()) {
        return Err(StokesletError::InvalidParameter {
            name: "radius",
            value: to_f64(radius),
        });
    }

    let corners = icosahedron_vertices::<T>();
    let (npoints, _, ncells) = icosphere_size(factor);
    let mut points = Vec::<[T; 3]>::with_capacity(npoints);
    let mut cells = Vec::with_capacity(ncells);

    // Points are identified by their barycentric weights on the icosahedron corners
    let mut point_ids = HashMap::<Vec<(usize, usize)>, usize>::new();
    let inv_factor = T::one() / cast::<T>(factor as f64);

    for face in &ICOSAHEDRON_FACES {
        let mut id = |i: usize, j: usize| {
            let mut key = [(face[0], factor - i - j), (face[1], i), (face[2], j)]
                .into_iter()
                .filter(|(_, weight)| *weight > 0)
                .collect::<Vec<_>>();
            key.sort_unstable();
            *point_ids.entry(key).or_insert_with_key(|key| {
                let mut pt = [T::zero(); 3];
                for (corner, weight) in key {
                    let w = cast::<T>(*weight as f64) * inv_factor;
                    for (p, c) in pt.iter_mut().zip(&corners[*corner]) {
                        *p += w * *c;
                    }
                }
                let scale = radius / norm(&pt);
                points.push(pt.map(|x| x * scale));
                points.len() - 1
            })
        };

        for i in 0..factor {
            for j in 0..(factor - i) {
                cells.push([id(i, j), id(i + 1, j), id(i, j + 1)]);
                if i + j + 1 < factor {
                    cells.push([id(i + 1, j), id(i + 1, j + 1), id(i, j + 1)]);
                }
            }
        }
    }

    for (index, cell) in cells.iter_mut().enumerate() {
        let [p0, p1, p2] = cell.map(|i| points[i]);
        let normal = cross(&sub(&p0, &p1), &sub(&p1, &p2));
        if dot(&normal, &p0) < T::zero() {
            warn!("Flipping inward oriented panel {index} of icosahedral sphere");
            cell.swap(0, 2);
        }
    }

    TriangleSurface::new(&points, &cells)
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::*;
    use paste::paste;
    use std::collections::HashSet;

    #[test]
    fn test_icosphere_size() {
        assert_eq!(icosphere_size(1), (12, 30, 20));
        assert_eq!(icosphere_size(6), (362, 1080, 720));
    }

    macro_rules! test_icosphere {
        ($($factor:literal),+) => {
        $(
            paste! {

                #[test]
                fn [<test_icosphere_ $factor>]() {
                    let radius = 1.5;
                    let surface = regular_icosphere::<f64>($factor, radius).unwrap();
                    let (nvertices, nedges, npanels) = icosphere_size($factor);
                    assert_eq!(surface.number_of_vertices(), nvertices);
                    assert_eq!(surface.number_of_panels(), npanels);

                    for p in surface.points() {
                        assert_relative_eq!(norm(p), radius, max_relative = 1e-14);
                    }

                    let mut edges = HashSet::new();
                    for cell in surface.cells() {
                        for k in 0..3 {
                            let (a, b) = (cell[k], cell[(k + 1) % 3]);
                            edges.insert((a.min(b), a.max(b)));
                        }
                    }
                    assert_eq!(edges.len(), nedges);

                    for panel in surface.panels() {
                        let [p0, p1, p2] = *panel.vertices();
                        let normal = cross(&sub(&p0, &p1), &sub(&p1, &p2));
                        assert!(dot(&normal, &p0) > 0.0);
                    }

                    let sphere_area = 4.0 * std::f64::consts::PI * radius * radius;
                    assert!(surface.area() < sphere_area);
                }

            }
        )*
        };
    }

    test_icosphere!(1, 2, 3, 6);

    #[test]
    fn test_icosphere_area_converges() {
        let sphere_area = 4.0 * std::f64::consts::PI;
        let coarse = regular_icosphere::<f64>(4, 1.0).unwrap().area();
        let fine = regular_icosphere::<f64>(8, 1.0).unwrap().area();
        assert!((sphere_area - fine) < (sphere_area - coarse));
        assert_relative_eq!(fine, sphere_area, max_relative = 1e-2);
    }

    #[test]
    fn test_invalid_icosphere() {
        assert!(regular_icosphere::<f64>(0, 1.0).is_err());
        assert!(regular_icosphere::<f32>(2, -1.0).is_err());
    }
}

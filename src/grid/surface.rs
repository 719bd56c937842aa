//! Triangulated surface
use crate::grid::Panel;
use crate::types::{RealScalar, Result, StokesletError};

/// A surface made of flat triangular panels sharing a global vertex numbering.
#[derive(Debug, Clone)]
pub struct TriangleSurface<T: RealScalar> {
    points: Vec<[T; 3]>,
    panels: Vec<Panel<T>>,
}

impl<T: RealScalar> TriangleSurface<T> {
    /// Create a surface from vertex coordinates and triangles given by vertex indices.
    ///
    /// Each triangle must be ordered consistently with the outward normal.
    pub fn new(points: &[[T; 3]], cells: &[[usize; 3]]) -> Result<Self> {
        let nvertices = points.len();
        let panels = cells
            .iter()
            .enumerate()
            .map(|(panel_index, cell)| {
                check_indices(cell, nvertices).map_err(|e| e.in_panel(panel_index))?;
                Panel::new(
                    [points[cell[0]], points[cell[1]], points[cell[2]]],
                    *cell,
                )
                .map_err(|e| e.in_panel(panel_index))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            points: points.to_vec(),
            panels,
        })
    }

    /// Create a surface from panels that have already been built.
    pub fn from_panels(points: &[[T; 3]], panels: Vec<Panel<T>>) -> Result<Self> {
        for (panel_index, panel) in panels.iter().enumerate() {
            check_indices(panel.indices(), points.len()).map_err(|e| e.in_panel(panel_index))?;
        }
        Ok(Self {
            points: points.to_vec(),
            panels,
        })
    }

    /// Vertex coordinates
    pub fn points(&self) -> &[[T; 3]] {
        &self.points
    }

    /// Panels
    pub fn panels(&self) -> &[Panel<T>] {
        &self.panels
    }

    /// Number of vertices
    pub fn number_of_vertices(&self) -> usize {
        self.points.len()
    }

    /// Number of panels
    pub fn number_of_panels(&self) -> usize {
        self.panels.len()
    }

    /// Total area of the surface
    pub fn area(&self) -> T {
        self.panels.iter().map(|p| p.area()).sum()
    }

    /// Vertex indices of every panel
    pub fn cells(&self) -> Vec<[usize; 3]> {
        self.panels.iter().map(|p| *p.indices()).collect()
    }
}

fn check_indices(cell: &[usize; 3], nvertices: usize) -> Result<()> {
    match cell.iter().find(|&&index| index >= nvertices) {
        Some(&index) => Err(StokesletError::VertexIndexOutOfRange { index, nvertices }),
        None => Ok(()),
    }
}

//! Dense assembly of the Stokeslet operator
use crate::assembly::AssemblerOptions;
use crate::grid::TriangleSurface;
use crate::kernel::{blocks::PanelBlocks, panel_blocks};
use crate::types::{RealScalar, Result, StokesletError};
use log::{debug, info};
use nalgebra::DMatrix;
use rayon::prelude::*;

/// Assembler for the regularized Stokeslet operator.
///
/// The assembled matrix `A` has shape `(3M, 3V)` for `M` field points and a
/// surface with `V` vertices. It maps the stacked vertex forces
/// `[F0x, F0y, F0z, F1x, ...]` to the stacked velocities at the field points.
#[derive(Debug, Clone, Default)]
pub struct StokesletAssembler<T: RealScalar> {
    options: AssemblerOptions<T>,
}

impl<T: RealScalar> StokesletAssembler<T> {
    /// Create a new assembler
    pub fn new(options: AssemblerOptions<T>) -> Self {
        Self { options }
    }

    /// Get assembler options
    pub fn options(&self) -> &AssemblerOptions<T> {
        &self.options
    }

    /// Get mutable assembler options
    pub fn options_mut(&mut self) -> &mut AssemblerOptions<T> {
        &mut self.options
    }

    /// Assemble the operator into a new dense matrix
    pub fn assemble(&self, surface: &TriangleSurface<T>, points: &[[T; 3]]) -> DMatrix<T> {
        let mut output = DMatrix::zeros(3 * points.len(), 3 * surface.number_of_vertices());
        self.assemble_batches(&mut output, surface, points);
        output
    }

    /// Add the operator to an existing dense matrix
    pub fn assemble_into_dense(
        &self,
        output: &mut DMatrix<T>,
        surface: &TriangleSurface<T>,
        points: &[[T; 3]],
    ) -> Result<()> {
        let expected = [3 * points.len(), 3 * surface.number_of_vertices()];
        let actual = [output.nrows(), output.ncols()];
        if expected != actual {
            return Err(StokesletError::ShapeMismatch { expected, actual });
        }
        self.assemble_batches(output, surface, points);
        Ok(())
    }

    fn assemble_batches(
        &self,
        output: &mut DMatrix<T>,
        surface: &TriangleSurface<T>,
        points: &[[T; 3]],
    ) {
        let regularization = self.options.regularization();
        let panels = surface.panels();
        info!(
            "Assembling Stokeslet operator: {} panels, {} field points, {}x{} matrix",
            panels.len(),
            points.len(),
            output.nrows(),
            output.ncols()
        );

        for (batch_index, batch) in panels.chunks(self.options.batch_size()).enumerate() {
            let blocks = batch
                .par_iter()
                .map(|panel| panel_blocks(panel, points, regularization))
                .collect::<Vec<_>>();

            for (panel, panel_blocks) in batch.iter().zip(&blocks) {
                scatter_panel(
                    output,
                    panel_blocks,
                    panel.indices(),
                    self.options.panel_scale(panel.bh()),
                );
            }
            debug!(
                "Assembled batch {batch_index} ({} panels)",
                batch.len()
            );
        }
        info!("Finished assembling Stokeslet operator");
    }
}

/// Add the transposed, scaled vertex blocks of one panel to the columns of its vertices
fn scatter_panel<T: RealScalar>(
    output: &mut DMatrix<T>,
    blocks: &PanelBlocks<T>,
    indices: &[usize; 3],
    scale: T,
) {
    for (vertex, index) in indices.iter().enumerate() {
        for (point, block) in blocks.vertex(vertex).iter().enumerate() {
            for (r, row) in block.iter().enumerate() {
                for (c, entry) in row.iter().enumerate() {
                    output[(3 * point + c, 3 * index + r)] += scale * *entry;
                }
            }
        }
    }
}

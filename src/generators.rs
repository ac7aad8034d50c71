use log::{debug, trace};
use petgraph::unionfind::UnionFind;
use rand::Rng;

use crate::cells::{WallSide, WallState};
use crate::grid_traits::{GridError, MazeGrid};
use crate::units::{CellIndex, SideIndex};

/// Random picks allowed per accepted union, as a multiple of the cell count, before a debug build gives up.
/// Reaching it means the grid's navigation is not symmetric or leaves cells unreachable.
const PICKS_PER_CELL_CAP: usize = 1024;

/// Bookkeeping from one run of a generator.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct GenerationReport {
    /// Walls opened, one per union of two groups of cells.
    pub unions: usize,
    /// Random (cell, side) picks thrown away because they were on the boundary or would have made a loop.
    pub rejected_picks: usize,
}

/// Carve a perfect maze into any grid with a randomised Kruskal algorithm.
///
/// All walls are closed first. Then, `cells_count - 1` times, a random side of a random cell is picked until one
/// is found whose neighbour is not already connected to it; that wall is opened and the two groups of cells
/// joined. Every union removes one group, so the open walls end up as a spanning tree of the cells: connected,
/// no loops and exactly one route between any two cells.
///
/// The picking loop has no bound of its own. It terminates for any grid whose `navigate` is symmetric and
/// connects every cell; a debug assertion flags grids that do not.
pub fn random_kruskal<G, R>(grid: &mut G, rng: &mut R) -> Result<GenerationReport, GridError>
    where G: MazeGrid + ?Sized,
          R: Rng + ?Sized
{
    grid.set_all_walls(WallState::Closed);

    let cells_count = grid.cells_count();
    if let Some(index) = grid.cells().iter().position(|cell| cell.sides_count() == 0) {
        return Err(GridError::CellWithoutSides(CellIndex(index)));
    }

    // Each cell starts in a group of its own
    let mut groups = UnionFind::<usize>::new(cells_count);
    let mut report = GenerationReport::default();
    let picks_cap = cells_count.saturating_mul(PICKS_PER_CELL_CAP);

    for _ in 1..cells_count {
        let mut picks = 0usize;
        loop {
            picks += 1;
            debug_assert!(picks <= picks_cap,
                          "no joinable wall found after {} picks, grid navigation is inconsistent",
                          picks);

            let index_a = rng.gen_range(0..cells_count);
            let sides_count = grid.cell(CellIndex(index_a))?.sides_count();
            let side_a = WallSide {
                cell: CellIndex(index_a),
                side: SideIndex(rng.gen_range(0..sides_count)),
            };

            let side_b = match grid.navigate(side_a)? {
                Some(side_b) => side_b,
                None => {
                    report.rejected_picks += 1;
                    continue;
                }
            };
            let index_b = side_b.cell.0;

            // Attach the group of the later cell to the group of the earlier one
            let (earlier, later) = if index_a < index_b {
                (index_a, index_b)
            } else {
                (index_b, index_a)
            };
            if !groups.union(earlier, later) {
                // Already connected, opening this wall would make a loop
                report.rejected_picks += 1;
                continue;
            }

            grid.set_wall(side_a, WallState::Open)?;
            grid.set_wall(side_b, WallState::Open)?;
            report.unions += 1;
            trace!("opened wall between cell {} (side {}) and cell {} (side {})",
                   index_a,
                   side_a.side.0,
                   index_b,
                   side_b.side.0);
            break;
        }
    }

    debug!("random kruskal over {} cells: {} walls opened, {} picks rejected",
           cells_count,
           report.unions,
           report.rejected_picks);

    Ok(report)
}

use std::fmt::Write;

use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};

use crate::cells::WallSide;
use crate::grid_traits::MazeGrid;
use crate::units::{EdgesCount, NodesCount, SideIndex};
use crate::utils::{self, FnvHashSet};

/// An open wall between two cells, named by both of its sides with `from < to`.
#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug)]
pub struct Passage {
    pub from: WallSide,
    pub to: WallSide,
}

/// Every open wall of the grid, each counted once, in cell index order.
///
/// A wall only counts when both of its sides are open. Open sides on the grid boundary lead nowhere and are
/// skipped.
pub fn open_passages<G: MazeGrid + ?Sized>(grid: &G) -> Vec<Passage> {
    let mut passages = vec![];
    for (index, cell) in grid.cells().iter().enumerate() {
        for side in 0..cell.sides_count() {
            let from = WallSide::new(index, side);
            if !cell.is_open(SideIndex(side)) {
                continue;
            }
            if let Ok(Some(to)) = grid.navigate(from) {
                let both_open = grid.cell(to.cell).map_or(false, |other| other.is_open(to.side));
                if both_open && from < to {
                    passages.push(Passage { from, to });
                }
            }
        }
    }
    passages
}

pub fn open_passage_set<G: MazeGrid + ?Sized>(grid: &G) -> FnvHashSet<Passage> {
    let passages = open_passages(grid);
    let mut set = utils::fnv_hashset(passages.len());
    set.extend(passages);
    set
}

/// Size of the graph of cells (nodes) and open walls (edges).
pub fn graph_size<G: MazeGrid + ?Sized>(grid: &G) -> (NodesCount, EdgesCount) {
    (NodesCount(grid.cells_count()), EdgesCount(open_passages(grid).len()))
}

/// An undirected graph with a node per cell, node index == cell index, and an edge per open wall.
pub fn passage_graph<G: MazeGrid + ?Sized>(grid: &G) -> UnGraph<(), ()> {
    let passages = open_passages(grid);
    let mut graph = UnGraph::with_capacity(grid.cells_count(), passages.len());
    for _ in 0..grid.cells_count() {
        graph.add_node(());
    }
    for passage in &passages {
        graph.add_edge(NodeIndex::new(passage.from.cell.0),
                       NodeIndex::new(passage.to.cell.0),
                       ());
    }
    graph
}

/// Do the open walls connect every cell with exactly one route between any two cells?
pub fn is_spanning_tree<G: MazeGrid + ?Sized>(grid: &G) -> bool {
    let cells_count = grid.cells_count();
    if cells_count == 0 {
        return true;
    }
    let graph = passage_graph(grid);
    // n - 1 edges on a connected graph leaves no room for a cycle
    graph.edge_count() == cells_count - 1 && connected_components(&graph) == 1
}

/// The maze as a text edge list.
/// Line 1: n(#vertices) m(#edges). Line 2+: an edge between two vertices, using 1-based vertex indices.
pub fn edge_list<G: MazeGrid + ?Sized>(grid: &G) -> String {
    let (NodesCount(vertices_count), EdgesCount(edges_count)) = graph_size(grid);
    let mut graph_data = String::new();
    let _ = writeln!(graph_data, "{} {}", vertices_count, edges_count);
    for passage in open_passages(grid) {
        let _ = writeln!(graph_data, "{} {}", passage.from.cell.0 + 1, passage.to.cell.0 + 1);
    }
    graph_data
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::cells::{SquareSide, WallState};
    use crate::squaregrid::SquareGrid;
    use crate::units::{ColumnLength, RowLength};

    fn grid(w: usize, h: usize) -> SquareGrid {
        SquareGrid::new(RowLength(w), ColumnLength(h)).expect("small grid dimensions")
    }

    fn open(g: &mut SquareGrid, cell: usize, side: SquareSide) {
        g.set_passage(WallSide::new(cell, side as usize), WallState::Open).unwrap();
    }

    #[test]
    fn closed_grid_has_no_passages() {
        let g = grid(3, 3);
        assert!(open_passages(&g).is_empty());
        assert!(!is_spanning_tree(&g));
        assert_eq!(graph_size(&g), (NodesCount(9), EdgesCount(0)));
    }

    #[test]
    fn passages_are_counted_once() {
        let mut g = grid(2, 2);
        open(&mut g, 0, SquareSide::Right);
        open(&mut g, 3, SquareSide::Up);
        assert_eq!(open_passages(&g),
                   vec![Passage {
                            from: WallSide::new(0, SquareSide::Right as usize),
                            to: WallSide::new(1, SquareSide::Left as usize),
                        },
                        Passage {
                            from: WallSide::new(1, SquareSide::Down as usize),
                            to: WallSide::new(3, SquareSide::Up as usize),
                        }]);
        assert_eq!(open_passage_set(&g).len(), 2);
    }

    #[test]
    fn half_open_and_boundary_walls_are_not_passages() {
        let mut g = grid(2, 1);
        g.set_wall(WallSide::new(0, SquareSide::Right as usize), WallState::Open).unwrap();
        g.set_wall(WallSide::new(1, SquareSide::Right as usize), WallState::Open).unwrap();
        assert!(open_passages(&g).is_empty());
    }

    #[test]
    fn spanning_tree_detection() {
        let mut g = grid(2, 2);
        open(&mut g, 0, SquareSide::Right);
        open(&mut g, 0, SquareSide::Down);
        assert!(!is_spanning_tree(&g));

        open(&mut g, 1, SquareSide::Down);
        assert!(is_spanning_tree(&g));

        // Closing the loop
        open(&mut g, 2, SquareSide::Right);
        assert!(!is_spanning_tree(&g));
        assert!(petgraph::algo::is_cyclic_undirected(&passage_graph(&g)));
    }

    #[test]
    fn trivial_grids_are_spanning_trees() {
        assert!(is_spanning_tree(&grid(0, 0)));
        assert!(is_spanning_tree(&grid(1, 1)));
    }

    #[test]
    fn edge_list_uses_one_based_indices() {
        let mut g = grid(3, 1);
        open(&mut g, 0, SquareSide::Right);
        open(&mut g, 2, SquareSide::Left);
        assert_eq!(edge_list(&g), "3 2\n1 2\n2 3\n");
    }
}

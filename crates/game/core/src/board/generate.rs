//! Procedural board generation.
//!
//! 1. Percolation: each grid cell links right and down, each with p = 0.5.
//! 2. Repair: isolated cells link right, else down.
//! 3. Hub wiring: the hub links each top-row cell with p = 0.5, falling
//!    back to the first grid node.
//! 4. Stitching: cells still unreachable from the hub are joined to a
//!    reachable lattice neighbour until the whole board is connected.
//! 5. Task placement: shuffled catalog entries go to shuffled grid cells,
//!    one each; entries beyond the grid size are dropped.

use super::BoardGraph;
use crate::env::{RngOracle, RngStream, context};
use crate::state::{NodeId, TaskDefinition};

/// Generates a connected board for `rows × cols` cells (each clamped to at least 1).
///
/// Deterministic for a given `game_seed` and oracle.
pub fn generate(
    rows: u16,
    cols: u16,
    catalog: &[TaskDefinition],
    game_seed: u64,
    rng: &dyn RngOracle,
) -> BoardGraph {
    let rows = rows.max(1);
    let cols = cols.max(1);
    let mut board = BoardGraph::unlinked(rows, cols);

    percolate(&mut board, &mut RngStream::new(rng, game_seed, context::BOARD_EDGES));
    repair_isolated(&mut board);
    wire_hub(&mut board, &mut RngStream::new(rng, game_seed, context::BOARD_HUB));
    stitch_components(&mut board);
    place_tasks(
        &mut board,
        catalog,
        &mut RngStream::new(rng, game_seed, context::TASK_SHUFFLE),
        &mut RngStream::new(rng, game_seed, context::TASK_PLACEMENT),
    );

    board
}

fn percolate(board: &mut BoardGraph, stream: &mut RngStream<'_>) {
    let (rows, cols) = (board.rows(), board.cols());
    for row in 0..rows {
        for col in 0..cols {
            let here = NodeId::grid(row, col, cols);
            if col + 1 < cols && stream.coin() {
                board.link(here, NodeId::grid(row, col + 1, cols));
            }
            if row + 1 < rows && stream.coin() {
                board.link(here, NodeId::grid(row + 1, col, cols));
            }
        }
    }
}

fn repair_isolated(board: &mut BoardGraph) {
    let (rows, cols) = (board.rows(), board.cols());
    for row in 0..rows {
        for col in 0..cols {
            let here = NodeId::grid(row, col, cols);
            if board.degree(here) > 0 {
                continue;
            }
            if col + 1 < cols {
                board.link(here, NodeId::grid(row, col + 1, cols));
            } else if row + 1 < rows {
                board.link(here, NodeId::grid(row + 1, col, cols));
            }
        }
    }
}

fn wire_hub(board: &mut BoardGraph, stream: &mut RngStream<'_>) {
    let cols = board.cols();
    let mut linked = false;
    for col in 0..cols {
        if stream.coin() {
            linked |= board.link(NodeId::HUB, NodeId::grid(0, col, cols));
        }
    }
    if !linked {
        board.link(NodeId::HUB, NodeId::grid(0, 0, cols));
    }
}

fn stitch_components(board: &mut BoardGraph) {
    loop {
        let reachable = board.reachable_from(NodeId::HUB);
        if reachable.len() == board.len() {
            return;
        }

        // First unreachable cell (ascending id) bordering the reachable region.
        let bridge = (1..board.len() as u32)
            .map(NodeId)
            .filter(|id| !reachable.contains(id))
            .find_map(|id| {
                board
                    .lattice_neighbors(id)
                    .into_iter()
                    .find(|n| reachable.contains(n))
                    .map(|n| (id, n))
            });

        match bridge {
            Some((orphan, anchor)) => {
                board.link(orphan, anchor);
            }
            // Unreachable: the lattice is connected and the hub touches row 0.
            None => return,
        }
    }
}

fn place_tasks(
    board: &mut BoardGraph,
    catalog: &[TaskDefinition],
    shuffle: &mut RngStream<'_>,
    placement: &mut RngStream<'_>,
) {
    let mut tasks: Vec<&TaskDefinition> = catalog.iter().collect();
    shuffle.shuffle(&mut tasks);

    let mut cells: Vec<NodeId> = (1..board.len() as u32).map(NodeId).collect();
    placement.shuffle(&mut cells);

    for (cell, definition) in cells.into_iter().zip(tasks) {
        board.place_task(cell, definition.clone());
    }
}

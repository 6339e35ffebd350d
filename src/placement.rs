use rand::Rng;

use crate::grid::{Cell, Grid, Position};

/// Converts a fraction of the empty cells into walls.
///
/// Each empty cell independently becomes a wall with probability `density`.
/// Cells already holding the snake (or anything else) are never touched, so
/// the seed body always survives placement. Runs once per game; walls are
/// fixed afterwards.
pub fn scatter_walls<R: Rng + ?Sized>(rng: &mut R, grid: &mut Grid, density: f64) {
    if density <= 0.0 {
        return;
    }

    for position in grid.positions_of(Cell::Empty) {
        if rng.gen_bool(density) {
            grid.set(position, Cell::Wall);
        }
    }
}

/// Places one food on a uniformly random empty cell and returns where.
///
/// Returns `None` without mutating the grid when no empty cell remains,
/// which only happens once the snake plus walls cover the whole board.
pub fn spawn_food<R: Rng + ?Sized>(rng: &mut R, grid: &mut Grid) -> Option<Position> {
    let candidates = grid.positions_of(Cell::Empty);
    if candidates.is_empty() {
        return None;
    }

    let position = candidates[rng.gen_range(0..candidates.len())];
    grid.set(position, Cell::Food);
    Some(position)
}

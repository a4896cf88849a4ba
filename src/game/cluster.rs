//! Cluster detection - finding and popping matching bubbles.
//!
//! A landed bubble joins the region of same-colored bubbles it touches.
//! When that region holds enough bubbles, the whole region pops.

use bevy::prelude::*;

use super::{
    controller::{BubbleLanded, Landing},
    grid::{BubbleGrid, GridPos},
};
use crate::AppSystems;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Update, log_landings.in_set(AppSystems::Update));
}

/// Pop the region containing `start` if it is at least `min_size` cells.
///
/// Returns the cells that were cleared, empty when nothing popped.
pub fn pop_cluster(grid: &mut BubbleGrid, start: GridPos, min_size: usize) -> Vec<GridPos> {
    let Some(color) = grid.get(start) else {
        return Vec::new();
    };

    let cluster = grid.find_connected_region(start, color);
    if cluster.len() < min_size {
        return Vec::new();
    }

    for &pos in &cluster {
        grid.set(pos, None);
    }
    cluster
}

/// Report what each landing did.
fn log_landings(mut landed: MessageReader<BubbleLanded>) {
    for BubbleLanded(landing) in landed.read() {
        match landing {
            Landing::Placed { cell, color, popped } if !popped.is_empty() => {
                info!(
                    "Popped cluster of {} {:?} bubbles at {}",
                    popped.len(),
                    color,
                    cell
                );
            }
            Landing::Placed { cell, color, .. } => {
                debug!("{:?} bubble stuck at {}", color, cell);
            }
            Landing::Lost { color } => {
                debug!("{:?} shot was lost", color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::bubble::BubbleColor;

    fn grid_with(cells: &[(i32, i32, BubbleColor)]) -> BubbleGrid {
        let mut grid = BubbleGrid::new(6, 16, 20.0);
        for &(row, col, color) in cells {
            grid.set(GridPos::new(row, col), Some(color));
        }
        grid
    }

    #[test]
    fn test_three_in_a_row_pops() {
        use BubbleColor::*;
        let mut grid = grid_with(&[(0, 0, Red), (0, 1, Red), (0, 2, Red), (1, 0, Blue)]);
        let popped = pop_cluster(&mut grid, GridPos::new(0, 2), 3);
        assert_eq!(popped.len(), 3);
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.get(GridPos::new(1, 0)), Some(Blue));
    }

    #[test]
    fn test_pair_stays() {
        use BubbleColor::*;
        let mut grid = grid_with(&[(0, 0, Red), (0, 1, Red), (0, 2, Green)]);
        let before = grid.clone();
        assert!(pop_cluster(&mut grid, GridPos::new(0, 1), 3).is_empty());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_pop_leaves_other_cells_untouched() {
        use BubbleColor::*;
        let mut grid = grid_with(&[
            (0, 0, Yellow),
            (1, 0, Yellow),
            (2, 0, Yellow),
            (0, 1, Blue),
            (1, 1, Yellow),
            (3, 1, Yellow),
        ]);
        let popped = pop_cluster(&mut grid, GridPos::new(2, 0), 3);
        assert_eq!(popped.len(), 4);
        assert_eq!(grid.get(GridPos::new(0, 1)), Some(Blue));
        assert_eq!(grid.get(GridPos::new(3, 1)), Some(Yellow));
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn test_empty_start_pops_nothing() {
        let mut grid = grid_with(&[]);
        assert!(pop_cluster(&mut grid, GridPos::new(0, 0), 3).is_empty());
    }
}

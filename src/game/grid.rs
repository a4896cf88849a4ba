//! The rectangular grid that holds all stationary bubbles.
//!
//! Dense storage: one `Option<BubbleColor>` per cell, row-major. Cell `(row, col)`
//! is drawn as a circle centered at `(col * 2R + R, row * 2R + R)` in screen space.

use bevy::prelude::*;
use rand::Rng;
use std::collections::{HashSet, VecDeque};

use super::bubble::BubbleColor;

/// A cell index on the grid.
///
/// Signed so that unchecked position mapping can point outside the grid.
/// Use [`BubbleGrid::contains`] or [`BubbleGrid::clamp`] before treating it as a real cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub struct GridPos {
    pub row: i32,
    pub col: i32,
}

impl GridPos {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The 4 orthogonal neighbors: down, left, right, up.
    ///
    /// Down comes first so searches from a cell prefer the space under it,
    /// which is where a projectile arrives from.
    pub fn neighbors(&self) -> [GridPos; 4] {
        [
            GridPos::new(self.row + 1, self.col),
            GridPos::new(self.row, self.col - 1),
            GridPos::new(self.row, self.col + 1),
            GridPos::new(self.row - 1, self.col),
        ]
    }
}

impl std::fmt::Display for GridPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The grid of bubbles.
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleGrid {
    rows: usize,
    cols: usize,
    bubble_radius: f32,
    cells: Vec<Option<BubbleColor>>,
}

impl BubbleGrid {
    /// Create an empty grid.
    pub fn new(rows: usize, cols: usize, bubble_radius: f32) -> Self {
        Self {
            rows,
            cols,
            bubble_radius,
            cells: vec![None; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn diameter(&self) -> f32 {
        self.bubble_radius * 2.0
    }

    /// Check if a cell index lies inside the grid.
    pub fn contains(&self, pos: GridPos) -> bool {
        pos.row >= 0
            && (pos.row as usize) < self.rows
            && pos.col >= 0
            && (pos.col as usize) < self.cols
    }

    /// Pull a cell index onto the nearest edge cell.
    pub fn clamp(&self, pos: GridPos) -> GridPos {
        GridPos::new(
            pos.row.clamp(0, self.rows as i32 - 1),
            pos.col.clamp(0, self.cols as i32 - 1),
        )
    }

    fn index(&self, pos: GridPos) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.row as usize * self.cols + pos.col as usize)
    }

    /// Map a screen position to the cell containing it.
    ///
    /// Not bounds-checked: positions off the grid give indices off the grid.
    pub fn position_to_cell(&self, pos: Vec2) -> GridPos {
        let d = self.diameter();
        GridPos::new((pos.y / d).floor() as i32, (pos.x / d).floor() as i32)
    }

    /// Screen position of a cell's center.
    pub fn cell_center(&self, pos: GridPos) -> Vec2 {
        let d = self.diameter();
        Vec2::new(
            pos.col as f32 * d + self.bubble_radius,
            pos.row as f32 * d + self.bubble_radius,
        )
    }

    /// Get the bubble at a cell, if any. Cells off the grid read as empty.
    pub fn get(&self, pos: GridPos) -> Option<BubbleColor> {
        self.index(pos).and_then(|i| self.cells[i])
    }

    /// Check if a cell is occupied.
    pub fn is_occupied(&self, pos: GridPos) -> bool {
        self.get(pos).is_some()
    }

    /// Write a cell unconditionally.
    ///
    /// Returns the previous occupant. Writes off the grid are dropped.
    pub fn set(&mut self, pos: GridPos, color: Option<BubbleColor>) -> Option<BubbleColor> {
        let Some(i) = self.index(pos) else {
            warn!("Ignoring write to off-grid cell {}", pos);
            return None;
        };
        std::mem::replace(&mut self.cells[i], color)
    }

    /// Clear all bubbles from the grid.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Get the number of bubbles in the grid.
    pub fn len(&self) -> usize {
        self.occupied().count()
    }

    /// Check if the grid is empty.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Iterate over all occupied cells in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (GridPos, BubbleColor)> + '_ {
        let cols = self.cols;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.map(|color| (GridPos::new((i / cols) as i32, (i % cols) as i32), color))
        })
    }

    /// Fill the top `rows` rows with independently random colors.
    pub fn fill_top_rows<R: Rng + ?Sized>(&mut self, rows: usize, rng: &mut R) {
        for row in 0..rows.min(self.rows) {
            for col in 0..self.cols {
                let pos = GridPos::new(row as i32, col as i32);
                self.set(pos, Some(BubbleColor::random_with(rng)));
            }
        }
    }

    /// Find every cell connected to `start` through 4-adjacent cells of `color`.
    ///
    /// Iterative depth-first flood fill. Returns an empty region when `start`
    /// is empty, off the grid, or holds another color.
    pub fn find_connected_region(&self, start: GridPos, color: BubbleColor) -> Vec<GridPos> {
        let mut region = Vec::new();
        if self.get(start) != Some(color) {
            return region;
        }

        let mut visited = HashSet::new();
        let mut stack = vec![start];
        visited.insert(start);

        while let Some(pos) = stack.pop() {
            region.push(pos);
            for neighbor in pos.neighbors() {
                if self.get(neighbor) == Some(color) && visited.insert(neighbor) {
                    stack.push(neighbor);
                }
            }
        }

        region
    }

    /// Find the closest empty cell to `target`, searching outward in rings.
    ///
    /// `target` is clamped onto the grid first. Returns `None` when every cell is occupied.
    pub fn nearest_empty_cell(&self, target: GridPos) -> Option<GridPos> {
        let start = self.clamp(target);
        let mut checked = HashSet::new();
        let mut queue = VecDeque::new();
        checked.insert(start);
        queue.push_back(start);

        while let Some(pos) = queue.pop_front() {
            if !self.is_occupied(pos) {
                return Some(pos);
            }
            for neighbor in pos.neighbors() {
                if self.contains(neighbor) && checked.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        None
    }
}

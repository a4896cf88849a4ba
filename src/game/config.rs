//! Playfield dimensions and tuning values.
//!
//! Everything is fixed at compile time; [`GameConfig`] only gathers the
//! constants so the controller can carry them around as one value.

use bevy::prelude::*;

/// Window width in logical pixels.
pub const SCREEN_WIDTH: u32 = 640;

/// Window height in logical pixels.
pub const SCREEN_HEIGHT: u32 = 720;

/// Radius of every bubble in pixels.
pub const BUBBLE_RADIUS: f32 = 20.0;

/// Number of grid rows.
pub const GRID_ROWS: usize = 6;

/// Rows filled with random bubbles when a game starts.
pub const INITIAL_ROWS: usize = 3;

/// Projectile speed in pixels per tick.
pub const PROJECTILE_SPEED: f32 = 10.0;

/// A flying projectile at or above this y lands against the ceiling.
pub const CEILING_Y: f32 = 60.0;

/// Distance of the launch point above the bottom edge.
pub const LAUNCH_OFFSET: f32 = 50.0;

/// Minimum region size that pops.
pub const MIN_CLUSTER_SIZE: usize = 3;

/// Simulation ticks per second.
pub const TICK_RATE_HZ: f64 = 60.0;

/// Tuning values for one game.
///
/// Coordinates are screen-space: origin at the top-left corner, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct GameConfig {
    pub width: f32,
    pub height: f32,
    pub bubble_radius: f32,
    pub rows: usize,
    pub initial_rows: usize,
    /// Pixels travelled per tick.
    pub speed: f32,
    pub ceiling_y: f32,
    pub launch_offset: f32,
    pub min_cluster_size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH as f32,
            height: SCREEN_HEIGHT as f32,
            bubble_radius: BUBBLE_RADIUS,
            rows: GRID_ROWS,
            initial_rows: INITIAL_ROWS,
            speed: PROJECTILE_SPEED,
            ceiling_y: CEILING_Y,
            launch_offset: LAUNCH_OFFSET,
            min_cluster_size: MIN_CLUSTER_SIZE,
        }
    }
}

impl GameConfig {
    pub fn bubble_diameter(&self) -> f32 {
        self.bubble_radius * 2.0
    }

    /// Columns that fit side by side across the screen.
    pub fn cols(&self) -> usize {
        (self.width / self.bubble_diameter()) as usize
    }

    /// Where every new projectile waits to be fired.
    pub fn launch_point(&self) -> Vec2 {
        Vec2::new((self.width / 2.0).floor(), self.height - self.launch_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = GameConfig::default();
        assert_eq!(config.cols(), 16);
        assert_eq!(config.launch_point(), Vec2::new(320.0, 670.0));
    }
}

//! Projectile - the bubble being shot.
//!
//! The projectile travels in a straight line at a fixed number of pixels per
//! tick, bouncing off the side walls, until the controller decides it landed.

use bevy::prelude::*;
use std::f32::consts::PI;

use super::bubble::BubbleColor;

/// The single live projectile, waiting at the launch point or in flight.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct Projectile {
    /// Center in screen coordinates.
    pub position: Vec2,
    pub color: BubbleColor,
    /// Direction of travel in radians; y grows downward, so `-PI / 2` is straight up.
    pub angle: f32,
    pub in_flight: bool,
}

impl Projectile {
    /// A projectile resting at `position`, ready to be fired.
    pub fn new(position: Vec2, color: BubbleColor) -> Self {
        Self {
            position,
            color,
            angle: 0.0,
            in_flight: false,
        }
    }

    /// Start moving along `angle`.
    pub fn launch(&mut self, angle: f32) {
        self.angle = angle;
        self.in_flight = true;
    }

    /// Displacement applied by one tick.
    pub fn velocity(&self, speed: f32) -> Vec2 {
        Vec2::from_angle(self.angle) * speed
    }

    /// Advance one tick, then bounce off the side walls.
    ///
    /// The wall test runs on the moved position, so the edge may sit past a
    /// wall for one tick before the reflected angle carries it back.
    pub fn tick(&mut self, speed: f32, width: f32, radius: f32) {
        self.position += self.velocity(speed);

        if self.position.x - radius <= 0.0 || self.position.x + radius >= width {
            self.angle = PI - self.angle;
        }
    }
}

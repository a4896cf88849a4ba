//! Bubble colors - the palette every grid cell and projectile draws from.
//!
//! Two bubbles match when their colors are equal, nothing else matters.

use bevy::prelude::*;
use rand::{Rng, seq::IndexedRandom};

pub(super) fn plugin(app: &mut App) {
    app.register_type::<BubbleColor>();
}

/// The different bubble colors.
/// Five colors keeps three-in-a-row reachable without making it trivial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Default)]
pub enum BubbleColor {
    #[default]
    Red,
    Green,
    Blue,
    Yellow,
    Pink,
}

impl BubbleColor {
    /// Get all possible bubble colors.
    pub const ALL: [BubbleColor; 5] = [
        BubbleColor::Red,
        BubbleColor::Green,
        BubbleColor::Blue,
        BubbleColor::Yellow,
        BubbleColor::Pink,
    ];

    /// Get the actual color for rendering.
    pub fn to_color(self) -> Color {
        match self {
            BubbleColor::Red => Color::srgb_u8(255, 0, 0),
            BubbleColor::Green => Color::srgb_u8(0, 255, 0),
            BubbleColor::Blue => Color::srgb_u8(0, 150, 255),
            BubbleColor::Yellow => Color::srgb_u8(255, 255, 0),
            BubbleColor::Pink => Color::srgb_u8(255, 105, 180),
        }
    }

    /// Position of this color in [`BubbleColor::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Get a random bubble color from the given generator.
    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        *Self::ALL.choose(rng).unwrap_or(&BubbleColor::Red)
    }
}

use bevy::prelude::*;

/// Dark grey behind the playfield
pub const BACKGROUND: Color = Color::srgb(0.118, 0.118, 0.118);

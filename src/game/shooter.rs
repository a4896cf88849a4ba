//! Shooter input - the player aims and fires with the mouse.
//!
//! A left click fires the waiting bubble toward the cursor. The window is the
//! playfield, so the cursor position is already in game coordinates.

use bevy::{prelude::*, window::PrimaryWindow};

use super::controller::FireAt;
use crate::AppSystems;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Update, handle_fire_input.in_set(AppSystems::RecordInput));
}

/// Turn a left click into a fire request at the cursor.
fn handle_fire_input(
    mouse_input: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut fire_requests: MessageWriter<FireAt>,
) {
    if !mouse_input.just_pressed(MouseButton::Left) {
        return;
    }

    let Ok(window) = window_query.single() else {
        return;
    };

    // Logical pixels, origin top-left, y down.
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    fire_requests.write(FireAt(cursor));
}

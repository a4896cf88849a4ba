//! Debug visualization for the bubble grid.
//!
//! Toggle with the 'D' key.
//! Shows:
//! - Circle outlines for every cell, occupied ones highlighted
//! - The ceiling line where shots stick to the top row
//! - The side walls the projectile bounces off
//! - The projectile's heading while it flies

use bevy::{color::palettes::css, input::common_conditions::input_just_pressed, prelude::*};

use super::{
    controller::{BubbleGame, ShotPhase},
    grid::GridPos,
    render::screen_to_world,
};

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<DebugGridVisible>();

    app.add_systems(
        Update,
        toggle_debug.run_if(input_just_pressed(KeyCode::KeyD)),
    );

    app.add_systems(Update, draw_debug_grid.run_if(debug_visible));
}

/// Resource to track if debug visualization is visible.
#[derive(Resource, Default)]
pub struct DebugGridVisible(pub bool);

fn debug_visible(debug: Res<DebugGridVisible>) -> bool {
    debug.0
}

fn toggle_debug(mut debug: ResMut<DebugGridVisible>) {
    debug.0 = !debug.0;
    let state = if debug.0 { "ON" } else { "OFF" };
    info!("Debug grid: {}", state);
}

/// Draw the debug overlay using Bevy's Gizmos.
fn draw_debug_grid(mut gizmos: Gizmos, game: Res<BubbleGame>) {
    let config = &game.config;
    let grid = &game.grid;
    let to_world = |pos: Vec2| screen_to_world(pos, config.width, config.height);

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let pos = GridPos::new(row as i32, col as i32);
            let color = if grid.is_occupied(pos) {
                css::LIMEGREEN.with_alpha(0.5)
            } else if row == 0 {
                css::GOLD.with_alpha(0.3)
            } else {
                css::WHITE.with_alpha(0.15)
            };
            gizmos.circle_2d(
                Isometry2d::from_translation(to_world(grid.cell_center(pos))),
                config.bubble_radius,
                color,
            );
        }
    }

    // Ceiling threshold
    gizmos.line_2d(
        to_world(Vec2::new(0.0, config.ceiling_y)),
        to_world(Vec2::new(config.width, config.ceiling_y)),
        css::INDIAN_RED.with_alpha(0.6),
    );

    // Bounce walls sit one radius in from each edge
    let wall_color = css::ORANGE.with_alpha(0.8);
    for x in [config.bubble_radius, config.width - config.bubble_radius] {
        gizmos.line_2d(
            to_world(Vec2::new(x, 0.0)),
            to_world(Vec2::new(x, config.height)),
            wall_color,
        );
    }

    if game.phase() == ShotPhase::Flying {
        let projectile = &game.projectile;
        let ahead = projectile.position + projectile.velocity(config.speed) * 5.0;
        gizmos.line_2d(
            to_world(projectile.position),
            to_world(ahead),
            css::AQUA.with_alpha(0.8),
        );
    }
}

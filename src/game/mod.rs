//! The main game module for the bubble shooter.
//!
//! This module contains all the gameplay logic including:
//! - Rectangular bubble grid and flood-fill matching
//! - Projectile motion and wall bounces
//! - The controller that lands shots and reloads
//! - Mouse input and circle rendering

mod bubble;
mod cluster;
pub mod config;
mod controller;
mod debug;
mod grid;
mod projectile;
mod render;
mod shooter;

use bevy::prelude::*;

pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        bubble::plugin,
        controller::plugin,
        cluster::plugin,
        shooter::plugin,
        render::plugin,
        debug::plugin,
    ));
}

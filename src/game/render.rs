//! Drawing the grid and the projectile.
//!
//! Every grid cell owns one circle entity, spawned once and shown or hidden
//! to mirror the grid. The projectile has its own circle drawn above them.

use bevy::prelude::*;

use super::{bubble::BubbleColor, controller::BubbleGame, grid::GridPos};
use crate::AppSystems;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, (load_bubble_assets, spawn_visuals).chain());
    app.add_systems(
        Update,
        (sync_cell_visuals, sync_projectile_visual).after(AppSystems::Update),
    );
}

/// Shared mesh and one material per palette color.
#[derive(Resource)]
pub struct BubbleAssets {
    pub circle: Handle<Mesh>,
    pub materials: [Handle<ColorMaterial>; 5],
}

impl BubbleAssets {
    pub fn material(&self, color: BubbleColor) -> Handle<ColorMaterial> {
        self.materials[color.index()].clone()
    }
}

/// A circle mirroring one grid cell.
#[derive(Component, Debug, Clone, Copy)]
struct CellVisual(GridPos);

/// The circle following the live projectile.
#[derive(Component, Debug)]
struct ProjectileVisual;

/// Convert a screen position (top-left origin, y down) to world space
/// (centered origin, y up) for a playfield of the given size.
pub fn screen_to_world(pos: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(pos.x - width / 2.0, height / 2.0 - pos.y)
}

fn load_bubble_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    game: Res<BubbleGame>,
) {
    commands.insert_resource(BubbleAssets {
        circle: meshes.add(Circle::new(game.config.bubble_radius)),
        materials: BubbleColor::ALL
            .map(|color| materials.add(ColorMaterial::from_color(color.to_color()))),
    });
}

/// Spawn one hidden circle per grid cell plus the projectile circle.
fn spawn_visuals(mut commands: Commands, assets: Res<BubbleAssets>, game: Res<BubbleGame>) {
    let config = &game.config;
    let grid = &game.grid;

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let pos = GridPos::new(row as i32, col as i32);
            let world = screen_to_world(grid.cell_center(pos), config.width, config.height);
            commands.spawn((
                Name::new(format!("Cell {}", pos)),
                CellVisual(pos),
                Mesh2d(assets.circle.clone()),
                MeshMaterial2d(assets.material(BubbleColor::default())),
                Transform::from_translation(world.extend(0.0)),
                Visibility::Hidden,
            ));
        }
    }

    let projectile = &game.projectile;
    let world = screen_to_world(projectile.position, config.width, config.height);
    commands.spawn((
        Name::new("Projectile"),
        ProjectileVisual,
        Mesh2d(assets.circle.clone()),
        MeshMaterial2d(assets.material(projectile.color)),
        Transform::from_translation(world.extend(5.0)),
    ));

    info!("Spawned {} cell visuals", grid.rows() * grid.cols());
}

/// Show occupied cells in their color, hide empty ones.
fn sync_cell_visuals(
    game: Res<BubbleGame>,
    assets: Res<BubbleAssets>,
    mut query: Query<(&CellVisual, &mut Visibility, &mut MeshMaterial2d<ColorMaterial>)>,
) {
    if !game.is_changed() {
        return;
    }

    for (CellVisual(pos), mut visibility, mut material) in &mut query {
        match game.grid.get(*pos) {
            Some(color) => {
                let handle = assets.material(color);
                if material.0 != handle {
                    material.0 = handle;
                }
                visibility.set_if_neq(Visibility::Inherited);
            }
            None => {
                visibility.set_if_neq(Visibility::Hidden);
            }
        }
    }
}

/// Move the projectile circle and recolor it after a reload.
fn sync_projectile_visual(
    game: Res<BubbleGame>,
    assets: Res<BubbleAssets>,
    mut query: Query<(&mut Transform, &mut MeshMaterial2d<ColorMaterial>), With<ProjectileVisual>>,
) {
    let Ok((mut transform, mut material)) = query.single_mut() else {
        return;
    };

    let config = &game.config;
    let world = screen_to_world(game.projectile.position, config.width, config.height);
    transform.translation = world.extend(transform.translation.z);

    let handle = assets.material(game.projectile.color);
    if material.0 != handle {
        material.0 = handle;
    }
}

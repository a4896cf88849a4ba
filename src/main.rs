// Support configuring Bevy lints within code.
#![cfg_attr(bevy_lint, feature(register_tool), register_tool(bevy))]
// Disable console on Windows for non-dev builds.
#![cfg_attr(not(feature = "dev"), windows_subsystem = "windows")]

mod game;
mod theme;

use bevy::{input::common_conditions::input_just_pressed, prelude::*, window::WindowResolution};

use game::config::{SCREEN_HEIGHT, SCREEN_WIDTH, TICK_RATE_HZ};

fn main() -> AppExit {
    App::new().add_plugins(AppPlugin).run()
}

pub struct AppPlugin;

impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        // Add Bevy plugins.
        app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Window {
                title: "Bubble Shooter Game".to_string(),
                resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                resizable: false,
                ..default()
            }
            .into(),
            ..default()
        }));

        // The projectile moves a fixed distance per tick.
        app.insert_resource(Time::<Fixed>::from_hz(TICK_RATE_HZ));

        // Add other plugins.
        app.add_plugins((game::plugin, theme::plugin));

        // Order new `AppSystems` variants by adding them here:
        app.configure_sets(
            Update,
            (AppSystems::RecordInput, AppSystems::Update).chain(),
        );

        // Spawn the main camera.
        app.add_systems(Startup, spawn_camera);

        app.add_systems(
            Update,
            exit_app
                .in_set(AppSystems::RecordInput)
                .run_if(input_just_pressed(KeyCode::Escape)),
        );
    }
}

/// High-level groupings of systems for the app in the `Update` schedule.
/// When adding a new variant, make sure to order it in the `configure_sets`
/// call above.
#[derive(SystemSet, Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
enum AppSystems {
    /// Record player input.
    RecordInput,
    /// Do everything else (consider splitting this into further variants).
    Update,
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((Name::new("Camera"), Camera2d));
}

fn exit_app(mut app_exit: MessageWriter<AppExit>) {
    info!("Quit requested");
    app_exit.write(AppExit::Success);
}

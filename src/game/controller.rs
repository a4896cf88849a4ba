//! The game controller - owns the grid and the live projectile.
//!
//! One [`BubbleGame`] resource holds all game state. Fire requests arrive as
//! [`FireAt`] messages; the projectile advances once per fixed tick and every
//! landing is announced with a [`BubbleLanded`] message.

use bevy::prelude::*;

use super::{
    bubble::BubbleColor,
    cluster::pop_cluster,
    config::GameConfig,
    grid::{BubbleGrid, GridPos},
    projectile::Projectile,
};
use crate::AppSystems;

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<BubbleGame>();
    app.register_type::<ShotPhase>();
    app.add_message::<FireAt>();
    app.add_message::<BubbleLanded>();

    app.add_systems(Update, apply_fire_requests.in_set(AppSystems::Update));
    app.add_systems(FixedUpdate, advance_shot);
}

/// Message asking to fire toward a screen position.
#[derive(Message, Debug, Clone, Copy)]
pub struct FireAt(pub Vec2);

/// Message sent after every landing.
#[derive(Message, Debug, Clone)]
pub struct BubbleLanded(pub Landing);

/// Whether the player can fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ShotPhase {
    /// Projectile resting at the launch point.
    Aiming,
    /// Projectile moving.
    Flying,
}

/// What happened to a shot that stopped flying.
#[derive(Debug, Clone, PartialEq)]
pub enum Landing {
    /// The bubble stuck to `cell`; `popped` lists the cells cleared by the match.
    Placed {
        cell: GridPos,
        color: BubbleColor,
        popped: Vec<GridPos>,
    },
    /// The bubble left the playfield or found no free cell.
    Lost { color: BubbleColor },
}

/// All state of a running game.
#[derive(Resource, Debug, Clone)]
pub struct BubbleGame {
    pub config: GameConfig,
    pub grid: BubbleGrid,
    pub projectile: Projectile,
}

impl Default for BubbleGame {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl BubbleGame {
    /// Start a game: seed the top rows and load the first projectile.
    pub fn new(config: GameConfig) -> Self {
        let mut rng = rand::rng();
        let mut grid = BubbleGrid::new(config.rows, config.cols(), config.bubble_radius);
        grid.fill_top_rows(config.initial_rows, &mut rng);
        info!(
            "New game on a {}x{} grid with {} bubbles",
            grid.rows(),
            grid.cols(),
            grid.len()
        );

        Self {
            projectile: Projectile::new(config.launch_point(), BubbleColor::random_with(&mut rng)),
            config,
            grid,
        }
    }

    pub fn phase(&self) -> ShotPhase {
        if self.projectile.in_flight {
            ShotPhase::Flying
        } else {
            ShotPhase::Aiming
        }
    }

    /// Fire the waiting projectile toward `target`.
    ///
    /// Returns false and changes nothing while a shot is already flying.
    pub fn aim_at(&mut self, target: Vec2) -> bool {
        if self.phase() == ShotPhase::Flying {
            return false;
        }

        let delta = target - self.projectile.position;
        let angle = delta.y.atan2(delta.x);
        self.projectile.launch(angle);
        info!(
            "Fired {:?} bubble toward {:?} (angle {:.3})",
            self.projectile.color, target, angle
        );
        true
    }

    /// Advance one fixed tick.
    ///
    /// Returns the landing when the flying projectile stopped this tick.
    pub fn step(&mut self) -> Option<Landing> {
        if self.phase() != ShotPhase::Flying {
            return None;
        }

        let config = self.config;
        self.projectile
            .tick(config.speed, config.width, config.bubble_radius);

        let landing = if self.projectile.position.y - config.bubble_radius > config.height {
            warn!(
                "Projectile left the bottom of the screen at {:?}",
                self.projectile.position
            );
            Some(Landing::Lost {
                color: self.projectile.color,
            })
        } else {
            self.landing_target().map(|target| self.land(target))
        };

        if landing.is_some() {
            self.reload();
        }
        landing
    }

    /// The cell the projectile should stick to this tick, if it stops at all.
    fn landing_target(&self) -> Option<GridPos> {
        let pos = self.projectile.position;
        let cell = self.grid.position_to_cell(pos);

        // Rows under the grid are open space; the launch point sits there.
        let off_grid = cell.row < 0 || cell.col < 0 || cell.col as usize >= self.grid.cols();
        let hit_bubble = self.grid.is_occupied(cell);
        let hit_ceiling = pos.y <= self.config.ceiling_y;

        if !(off_grid || hit_bubble || hit_ceiling) {
            return None;
        }

        let mut target = self.grid.clamp(cell);
        if hit_ceiling && !hit_bubble {
            target.row = 0;
        }
        Some(target)
    }

    /// Snap the projectile into the grid at `target` and resolve matches.
    fn land(&mut self, target: GridPos) -> Landing {
        let color = self.projectile.color;

        let cell = if self.grid.is_occupied(target) {
            let Some(free) = self.grid.nearest_empty_cell(target) else {
                warn!("No free cell left for {:?} bubble", color);
                return Landing::Lost { color };
            };
            debug!("Cell {} is taken, redirecting to {}", target, free);
            free
        } else {
            target
        };

        self.projectile.position = self.grid.cell_center(cell);
        self.grid.set(cell, Some(color));
        let popped = pop_cluster(&mut self.grid, cell, self.config.min_cluster_size);

        info!("Bubble landed at {} with color {:?}", cell, color);
        if !popped.is_empty() && self.grid.is_empty() {
            info!("Board cleared!");
        }
        Landing::Placed { cell, color, popped }
    }

    /// Replace the projectile with a fresh one at the launch point.
    fn reload(&mut self) {
        let color = BubbleColor::random_with(&mut rand::rng());
        self.projectile = Projectile::new(self.config.launch_point(), color);
        debug!("Reloaded with {:?}", self.projectile.color);
    }
}

/// Launch the waiting projectile; later requests in the same frame are ignored.
fn apply_fire_requests(mut game: ResMut<BubbleGame>, mut requests: MessageReader<FireAt>) {
    for FireAt(target) in requests.read() {
        if !game.aim_at(*target) {
            debug!("Ignoring fire request while a shot is in flight");
        }
    }
}

/// Move the projectile one tick and announce landings.
fn advance_shot(mut game: ResMut<BubbleGame>, mut landed: MessageWriter<BubbleLanded>) {
    if let Some(landing) = game.step() {
        landed.write(BubbleLanded(landing));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::message::Messages;
    use std::f32::consts::FRAC_PI_2;

    fn empty_game() -> BubbleGame {
        let mut game = BubbleGame::default();
        game.grid.clear();
        game
    }

    fn fly_until_landed(game: &mut BubbleGame) -> Landing {
        for _ in 0..1000 {
            if let Some(landing) = game.step() {
                return landing;
            }
        }
        panic!("projectile never landed");
    }

    #[test]
    fn test_new_game_layout() {
        let game = BubbleGame::default();
        assert_eq!(game.grid.len(), 3 * 16);
        assert_eq!(game.phase(), ShotPhase::Aiming);
        assert_eq!(game.projectile.position, Vec2::new(320.0, 670.0));
    }

    #[test]
    fn test_aim_points_at_target() {
        let mut game = empty_game();
        assert!(game.aim_at(Vec2::new(420.0, 570.0)));
        assert!((game.projectile.angle + std::f32::consts::FRAC_PI_4).abs() < 1e-5);
        assert_eq!(game.phase(), ShotPhase::Flying);
    }

    #[test]
    fn test_aim_ignored_while_flying() {
        let mut game = empty_game();
        game.aim_at(Vec2::new(320.0, 0.0));
        let angle = game.projectile.angle;
        assert!(!game.aim_at(Vec2::new(0.0, 0.0)));
        assert_eq!(game.projectile.angle, angle);
    }

    #[test]
    fn test_step_while_aiming_does_nothing() {
        let mut game = empty_game();
        let before = game.projectile.clone();
        assert_eq!(game.step(), None);
        assert_eq!(game.projectile, before);
    }

    #[test]
    fn test_straight_shot_sticks_to_ceiling() {
        let mut game = empty_game();
        game.projectile.color = BubbleColor::Yellow;
        game.projectile.launch(-FRAC_PI_2);

        let landing = fly_until_landed(&mut game);
        let cell = GridPos::new(0, 8);
        assert_eq!(
            landing,
            Landing::Placed {
                cell,
                color: BubbleColor::Yellow,
                popped: Vec::new(),
            }
        );
        assert_eq!(game.grid.get(cell), Some(BubbleColor::Yellow));
        assert_eq!(game.grid.len(), 1);
        assert_eq!(game.projectile.position, Vec2::new(320.0, 670.0));
        assert_eq!(game.phase(), ShotPhase::Aiming);
    }

    #[test]
    fn test_fourth_bubble_pops_row() {
        let mut game = empty_game();
        for col in 0..3 {
            game.grid.set(GridPos::new(0, col), Some(BubbleColor::Red));
        }
        game.grid.set(GridPos::new(0, 4), Some(BubbleColor::Blue));

        // Fire straight up from under column 3.
        let start = game.grid.cell_center(GridPos::new(14, 3));
        game.projectile = Projectile::new(start, BubbleColor::Red);
        game.projectile.launch(-FRAC_PI_2);

        let Landing::Placed { cell, popped, .. } = fly_until_landed(&mut game) else {
            panic!("shot should land");
        };
        assert_eq!(cell, GridPos::new(0, 3));
        assert_eq!(popped.len(), 4);
        for col in 0..4 {
            assert_eq!(game.grid.get(GridPos::new(0, col)), None);
        }
        assert_eq!(game.grid.get(GridPos::new(0, 4)), Some(BubbleColor::Blue));
    }

    #[test]
    fn test_pair_does_not_pop() {
        let mut game = empty_game();
        game.grid.set(GridPos::new(0, 8), Some(BubbleColor::Green));
        game.projectile.color = BubbleColor::Green;
        game.projectile.launch(-FRAC_PI_2);

        let Landing::Placed { cell, popped, .. } = fly_until_landed(&mut game) else {
            panic!("shot should land");
        };
        assert_eq!(cell, GridPos::new(1, 8));
        assert!(popped.is_empty());
        assert_eq!(game.grid.len(), 2);
    }

    #[test]
    fn test_hitting_bubble_settles_below_it() {
        let mut game = empty_game();
        game.grid.set(GridPos::new(2, 8), Some(BubbleColor::Blue));
        game.projectile.color = BubbleColor::Pink;
        game.projectile.launch(-FRAC_PI_2);

        let landing = fly_until_landed(&mut game);
        assert!(matches!(landing, Landing::Placed { cell, .. } if cell == GridPos::new(3, 8)));
        assert_eq!(game.grid.get(GridPos::new(2, 8)), Some(BubbleColor::Blue));
        assert_eq!(game.grid.get(GridPos::new(3, 8)), Some(BubbleColor::Pink));
    }

    #[test]
    fn test_landing_never_overwrites() {
        let mut game = BubbleGame::default();
        let before = game.grid.len();
        game.projectile.launch(-FRAC_PI_2);

        let landing = fly_until_landed(&mut game);
        let Landing::Placed { popped, .. } = landing else {
            panic!("shot should land");
        };
        assert_eq!(game.grid.len() + popped.len(), before + 1);
    }

    #[test]
    fn test_downward_shot_is_lost() {
        let mut game = empty_game();
        let color = game.projectile.color;
        game.projectile.launch(FRAC_PI_2);

        assert_eq!(fly_until_landed(&mut game), Landing::Lost { color });
        assert!(game.grid.is_empty());
        assert_eq!(game.phase(), ShotPhase::Aiming);
    }

    #[test]
    fn test_edge_landing_redirects_off_taken_cell() {
        let mut game = empty_game();
        game.grid.set(GridPos::new(3, 15), Some(BubbleColor::Blue));
        game.projectile = Projectile::new(Vec2::new(645.0, 130.0), BubbleColor::Red);
        game.projectile.launch(0.0);

        let landing = game.step();
        assert!(matches!(
            landing,
            Some(Landing::Placed { cell, .. }) if cell == GridPos::new(4, 15)
        ));
        assert_eq!(game.grid.get(GridPos::new(3, 15)), Some(BubbleColor::Blue));
        assert_eq!(game.grid.get(GridPos::new(4, 15)), Some(BubbleColor::Red));
        assert_eq!(game.grid.len(), 2);
    }

    #[test]
    fn test_full_grid_loses_shot() {
        let mut game = empty_game();
        let colors = [BubbleColor::Red, BubbleColor::Blue];
        for row in 0..6 {
            for col in 0..16 {
                game.grid.set(GridPos::new(row, col), Some(colors[((row + col) % 2) as usize]));
            }
        }
        game.projectile.color = BubbleColor::Green;
        game.projectile.launch(-FRAC_PI_2);

        assert_eq!(
            fly_until_landed(&mut game),
            Landing::Lost {
                color: BubbleColor::Green
            }
        );
        assert_eq!(game.grid.len(), 96);
    }

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(plugin);
        app.world_mut().resource_mut::<BubbleGame>().grid.clear();
        app
    }

    #[test]
    fn test_fire_message_launches_projectile() {
        let mut app = test_app();
        app.world_mut().write_message(FireAt(Vec2::new(320.0, 0.0)));
        app.update();

        let game = app.world().resource::<BubbleGame>();
        assert_eq!(game.phase(), ShotPhase::Flying);
        assert!((game.projectile.angle + FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_fixed_tick_lands_and_reports() {
        let mut app = test_app();
        app.world_mut().write_message(FireAt(Vec2::new(320.0, 0.0)));
        app.update();

        for _ in 0..100 {
            app.world_mut().run_schedule(FixedUpdate);
        }

        let game = app.world().resource::<BubbleGame>();
        assert_eq!(game.phase(), ShotPhase::Aiming);
        assert!(game.grid.is_occupied(GridPos::new(0, 8)));

        let messages = app.world().resource::<Messages<BubbleLanded>>();
        let mut cursor = messages.get_cursor();
        let landed: Vec<_> = cursor.read(messages).collect();
        assert_eq!(landed.len(), 1);
    }
}

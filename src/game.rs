use bevy::prelude::*;
use rand::Rng;

use crate::app_state::AppState;
use crate::combat::{Combat, EnemyPhase};
use crate::config::GameConfig;
use crate::enemy::{Enemy, SpawnSide};
use crate::geometry::HitRect;
use crate::player::{Facing, MoveIntent, Player};

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        // Input and the gameplay tick always finish before anything reads
        // the result, so sprites, text and sound never lag a frame behind.
        app.configure_sets(
            Update,
            (GameSet::Tick, GameSet::Present)
                .chain()
                .run_if(in_state(AppState::Playing)),
        )
        .init_resource::<LastTick>()
        .add_systems(OnEnter(AppState::Playing), setup_game_state)
        .add_systems(Update, game_tick_system.in_set(GameSet::Tick));
    }
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameSet {
    /// Reads input and advances [`GameState`] once.
    Tick,
    /// Everything that mirrors [`GameState`] onto the screen and speakers.
    Present,
}

/// Everything the player can do in one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub movement: MoveIntent,
    /// Attack key went down this tick.
    pub attack_pressed: bool,
    /// Confirm key went down this tick.
    pub confirm_pressed: bool,
}

impl TickInput {
    pub fn from_keys(keys: &ButtonInput<KeyCode>) -> Self {
        let movement = if keys.pressed(KeyCode::ArrowLeft) {
            MoveIntent::Left
        } else if keys.pressed(KeyCode::ArrowRight) {
            MoveIntent::Right
        } else {
            MoveIntent::None
        };

        TickInput {
            movement,
            attack_pressed: keys.just_pressed(KeyCode::Space),
            confirm_pressed: keys.just_pressed(KeyCode::Enter),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SoundCue {
    Slash,
    Disappear,
}

/// Side effects of one tick, consumed by the presentation systems.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub sounds: Vec<SoundCue>,
    /// Damage reaction drawn over the enemy, flipped toward the player's facing.
    pub damage_overlay: Option<Facing>,
    pub enemy_defeated: bool,
    pub won: bool,
    pub reset: bool,
}

#[derive(Resource, Default)]
pub struct LastTick(pub TickReport);

/// All mutable gameplay state. Owned by the app and advanced by
/// [`GameState::tick`] once per rendered frame.
#[derive(Resource, Clone, Debug)]
pub struct GameState {
    config: GameConfig,
    player: Player,
    enemy: Enemy,
    combat: Combat,
    won: bool,
}

impl GameState {
    pub fn new(config: GameConfig, rng: &mut impl Rng) -> Self {
        GameState {
            player: Player::new(&config),
            enemy: Enemy::spawn(SpawnSide::random(rng), &config),
            combat: Combat::new(&config),
            won: false,
            config,
        }
    }

    /// Advances the whole game by one tick.
    ///
    /// Once the goal is reached nothing moves until the confirm key brings
    /// everything back to its starting values.
    pub fn tick(&mut self, input: TickInput, rng: &mut impl Rng) -> TickReport {
        let mut report = TickReport::default();

        if self.won {
            if input.confirm_pressed {
                self.reset(rng);
                report.reset = true;
            }
            return report;
        }

        // The swing that can land this tick is the one already in progress
        let player_rect = self.player_rect();
        self.enemy.advance(self.player.pos());
        let colliding = player_rect.intersects(&self.enemy_rect());

        let outcome = self.combat.advance_phase();
        if outcome.died {
            report.sounds.push(SoundCue::Disappear);
        }
        if outcome.defeated {
            report.enemy_defeated = true;
            info!("Enemy defeated ({}/{})", self.combat.kills(), self.config.goal);
        }

        if self.player.is_attacking() && colliding && self.player.is_facing(self.enemy.pos().x) {
            if self.combat.strike() {
                debug!("Hit landed, enemy hp {}", self.combat.hp());
            }
            if self.config.retrigger_damage_reaction {
                self.combat.advance_damage_overlay();
                report.damage_overlay = Some(self.player.facing());
            }
        }

        if input.attack_pressed && self.player.try_start_attack() {
            report.sounds.push(SoundCue::Slash);
        }
        self.player.update(input.movement);

        if self.combat.kills() >= self.config.goal {
            self.won = true;
            report.won = true;
            info!("Goal of {} kills reached", self.config.goal);
        }

        report
    }

    /// Back to a fresh game; the enemy walks in from a random side.
    pub fn reset(&mut self, rng: &mut impl Rng) {
        self.player = Player::new(&self.config);
        self.enemy = Enemy::spawn(SpawnSide::random(rng), &self.config);
        self.combat = Combat::new(&self.config);
        self.won = false;
        info!("Game reset");
    }

    pub fn player_rect(&self) -> HitRect {
        self.player.hit_rect(&self.config)
    }

    pub fn enemy_rect(&self) -> HitRect {
        self.enemy.hit_rect(&self.config.enemy_body)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn combat(&self) -> &Combat {
        &self.combat
    }

    pub fn is_won(&self) -> bool {
        self.won
    }
}

fn setup_game_state(mut commands: Commands, config: Res<GameConfig>) {
    let mut rng = rand::thread_rng();
    commands.insert_resource(GameState::new(config.clone(), &mut rng));
}

fn game_tick_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut state: ResMut<GameState>,
    mut last_tick: ResMut<LastTick>,
) {
    let mut rng = rand::thread_rng();
    last_tick.0 = state.tick(TickInput::from_keys(&keys), &mut rng);
}

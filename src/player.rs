use bevy::prelude::*;

use crate::animation::{SheetId, SpriteAnimator};
use crate::config::{GameConfig, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::geometry::HitRect;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn is_left(self) -> bool {
        self == Facing::Left
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlayerAction {
    #[default]
    Idle,
    Moving,
    Attacking,
}

/// Directional input for one tick. Left wins when both keys are held.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MoveIntent {
    #[default]
    None,
    Left,
    Right,
}

#[derive(Clone, Debug)]
pub struct Player {
    pos: Vec2,
    facing: Facing,
    action: PlayerAction,
    speed: f32,
    walk: SpriteAnimator,
    attack: SpriteAnimator,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Player {
            pos: Self::spawn_point(config),
            facing: Facing::Right,
            action: PlayerAction::Idle,
            speed: config.player_speed,
            walk: SpriteAnimator::from_spec(&config.sheets.player_walk),
            attack: SpriteAnimator::from_spec(&config.sheets.player_attack),
        }
    }

    /// Horizontally centered, feet on the ground line.
    pub fn spawn_point(config: &GameConfig) -> Vec2 {
        Vec2::new(
            (WINDOW_WIDTH / 2.0).floor(),
            WINDOW_HEIGHT - config.ground_height - config.sheets.player_walk.frame_height as f32,
        )
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn action(&self) -> PlayerAction {
        self.action
    }

    pub fn is_attacking(&self) -> bool {
        self.action == PlayerAction::Attacking
    }

    /// The blade while swinging, the body otherwise.
    pub fn hit_rect(&self, config: &GameConfig) -> HitRect {
        let offset = match (self.action, self.facing) {
            (PlayerAction::Attacking, Facing::Left) => &config.player_attack_left,
            (PlayerAction::Attacking, Facing::Right) => &config.player_attack_right,
            _ => &config.player_body,
        };
        HitRect::offset_from(self.pos, offset)
    }

    /// Whether `x` lies strictly on the side the player is facing.
    pub fn is_facing(&self, x: f32) -> bool {
        match self.facing {
            Facing::Left => x < self.pos.x,
            Facing::Right => x > self.pos.x,
        }
    }

    /// Starts a swing from the first attack frame. Does nothing mid-swing.
    pub fn try_start_attack(&mut self) -> bool {
        if self.is_attacking() {
            return false;
        }

        self.attack.restart();
        self.action = PlayerAction::Attacking;
        true
    }

    pub fn update(&mut self, intent: MoveIntent) {
        if self.is_attacking() {
            // Movement input is ignored until the swing is over
            self.attack.advance();
            if self.attack.is_finished() {
                self.action = PlayerAction::Idle;
            }
            return;
        }

        match intent {
            MoveIntent::Left => {
                self.pos.x -= self.speed;
                self.facing = Facing::Left;
                self.action = PlayerAction::Moving;
            }
            MoveIntent::Right => {
                self.pos.x += self.speed;
                self.facing = Facing::Right;
                self.action = PlayerAction::Moving;
            }
            MoveIntent::None => self.action = PlayerAction::Idle,
        }

        // Idle and moving share the walk cycle
        self.walk.advance();
    }

    /// Sheet and counters to draw this tick.
    pub fn current_frame(&self) -> (SheetId, &SpriteAnimator) {
        if self.is_attacking() {
            (SheetId::PlayerAttack, &self.attack)
        } else {
            (SheetId::PlayerWalk, &self.walk)
        }
    }

    pub fn attack_animator(&self) -> &SpriteAnimator {
        &self.attack
    }
}

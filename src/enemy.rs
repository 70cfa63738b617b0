use bevy::prelude::*;
use rand::Rng;

use crate::animation::SpriteAnimator;
use crate::config::{GameConfig, WINDOW_WIDTH};
use crate::geometry::{HitRect, RectOffset};

/// Which edge of the window the enemy walks in from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpawnSide {
    Left,
    Right,
}

impl SpawnSide {
    pub fn random(rng: &mut impl Rng) -> Self {
        if rng.gen_bool(0.5) {
            SpawnSide::Left
        } else {
            SpawnSide::Right
        }
    }

    /// Screen x of the enemy's drawn left edge for this side.
    pub fn x(self, config: &GameConfig) -> f32 {
        match self {
            SpawnSide::Left => 0.0,
            SpawnSide::Right => {
                WINDOW_WIDTH - config.sheets.enemy_walk.drawn_size(config.enemy_scale).x
            }
        }
    }
}

/// The single enemy. It only ever walks along its ground line toward a target.
#[derive(Clone, Debug)]
pub struct Enemy {
    animator: SpriteAnimator,
    pos: Vec2,
    speed: f32,
}

impl Enemy {
    pub fn new(animator: SpriteAnimator, x: f32, ground_y: f32, speed: f32) -> Self {
        Enemy {
            animator,
            pos: Vec2::new(x, ground_y),
            speed,
        }
    }

    pub fn spawn(side: SpawnSide, config: &GameConfig) -> Self {
        Self::new(
            SpriteAnimator::from_spec(&config.sheets.enemy_walk),
            side.x(config),
            config.enemy_ground_y,
            config.enemy_speed,
        )
    }

    /// Steps toward `target` on the x axis and advances the walk cycle.
    pub fn advance(&mut self, target: Vec2) {
        let direction = if target.x - self.pos.x > 0.0 { 1.0 } else { -1.0 };
        self.pos.x += direction * self.speed;
        self.animator.advance();
    }

    /// The walk sprite faces right; flip it when the target is behind.
    pub fn is_mirrored(&self, target: Vec2) -> bool {
        target.x < self.pos.x
    }

    pub fn hit_rect(&self, offset: &RectOffset) -> HitRect {
        HitRect::offset_from(self.pos, offset)
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn animator(&self) -> &SpriteAnimator {
        &self.animator
    }
}

impl PartialEq for Enemy {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn enemy_at(x: f32, speed: f32) -> Enemy {
        Enemy::new(SpriteAnimator::new(9, 11), x, 340.0, speed)
    }

    #[test]
    fn moves_toward_target() {
        for (start, target) in [(0.0, 400.0), (600.0, 100.0), (300.0, 300.4)] {
            let mut enemy = enemy_at(start, 0.5);
            let target = Vec2::new(target, 0.0);
            let before = (target.x - enemy.pos().x).abs();

            enemy.advance(target);

            let after = (target.x - enemy.pos().x).abs();
            assert!(after < before, "{} -> {} should close in", start, target.x);
        }
    }

    #[test]
    fn never_overshoots_by_more_than_speed() {
        let mut enemy = enemy_at(0.0, 0.75);
        let target = Vec2::new(10.0, 0.0);

        for _ in 0..100 {
            let before = (enemy.pos().x - target.x).abs();
            enemy.advance(target);
            let after = (enemy.pos().x - target.x).abs();

            // Either closes in by a full step or lands within one step past it
            assert!((after - (before - 0.75).abs()).abs() < 1e-4);
            assert!(after <= before.max(0.75));
        }
    }

    #[test]
    fn stays_on_ground_line() {
        let mut enemy = enemy_at(0.0, 2.0);
        for _ in 0..10 {
            enemy.advance(Vec2::new(500.0, 0.0));
        }

        assert_eq!(enemy.pos(), Vec2::new(20.0, 340.0));
        assert_eq!(enemy.animator().frame_index(), 0);
    }

    #[test]
    fn faces_the_target() {
        let enemy = enemy_at(300.0, 0.5);

        assert!(enemy.is_mirrored(Vec2::new(100.0, 0.0)));
        assert!(!enemy.is_mirrored(Vec2::new(500.0, 0.0)));
    }

    #[test]
    fn equality_is_by_position() {
        let mut a = enemy_at(50.0, 0.5);
        let b = Enemy::new(SpriteAnimator::new(2, 1), 50.0, 340.0, 9.0);
        assert_eq!(a, b);

        a.advance(Vec2::ZERO);
        assert_ne!(a, b);
    }

    #[test]
    fn spawns_on_either_edge() {
        let config = GameConfig::default();
        let right_x = WINDOW_WIDTH - 64.0 * 3.0;
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let enemy = Enemy::spawn(SpawnSide::random(&mut rng), &config);
            assert!(enemy.pos().x == 0.0 || enemy.pos().x == right_x);
            assert_eq!(enemy.pos().y, config.enemy_ground_y);
        }
    }

    #[test]
    fn hit_rect_follows_position() {
        let enemy = enemy_at(100.0, 0.5);
        let rect = enemy.hit_rect(&GameConfig::default().enemy_body);

        assert_eq!(rect, HitRect::new(180.0, 380.0, 30.0, 50.0));
    }
}

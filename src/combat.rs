use crate::animation::{SheetId, SpriteAnimator};
use crate::config::GameConfig;

/// The enemy's reaction to being hit.
///
/// `Dead` is only entered at zero hp and ends with a full heal, so hp and
/// phase can never disagree.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum EnemyPhase {
    #[default]
    Normal,
    Damaged,
    Dead,
}

/// What the reaction machine did this tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PhaseOutcome {
    pub died: bool,
    pub defeated: bool,
}

#[derive(Clone, Debug)]
pub struct Combat {
    hp: u32,
    max_hp: u32,
    phase: EnemyPhase,
    kills: u32,
    damage: SpriteAnimator,
    death: SpriteAnimator,
}

impl Combat {
    pub fn new(config: &GameConfig) -> Self {
        Combat {
            hp: config.enemy_max_hp,
            max_hp: config.enemy_max_hp,
            phase: EnemyPhase::Normal,
            kills: 0,
            damage: SpriteAnimator::from_spec(&config.sheets.enemy_damage),
            death: SpriteAnimator::from_spec(&config.sheets.enemy_death),
        }
    }

    /// Runs the reaction machine for one tick.
    ///
    /// Zero hp always wins over a running damage reaction. A finished death
    /// heals the enemy back to full and counts the kill.
    pub fn advance_phase(&mut self) -> PhaseOutcome {
        let mut outcome = PhaseOutcome::default();

        if self.hp == 0 && self.phase != EnemyPhase::Dead {
            self.phase = EnemyPhase::Dead;
            self.death.restart();
            outcome.died = true;
        }

        match self.phase {
            EnemyPhase::Dead => {
                self.death.advance();
                if self.death.is_finished() {
                    self.hp = self.max_hp;
                    self.phase = EnemyPhase::Normal;
                    self.kills += 1;
                    outcome.defeated = true;
                }
            }
            EnemyPhase::Damaged => {
                self.damage.advance();
                if self.damage.is_finished() {
                    self.phase = EnemyPhase::Normal;
                }
            }
            EnemyPhase::Normal => {}
        }

        outcome
    }

    /// Lands a hit. Only a calm enemy takes damage; returns whether it did.
    pub fn strike(&mut self) -> bool {
        if self.phase != EnemyPhase::Normal || self.hp == 0 {
            return false;
        }

        self.hp -= 1;
        self.phase = EnemyPhase::Damaged;
        self.damage.restart();
        true
    }

    /// Extra step of the damage reaction for the hit overlay.
    pub fn advance_damage_overlay(&mut self) {
        self.damage.advance();
    }

    /// Sheet and counters for the enemy's reaction, or `None` while it walks.
    pub fn reaction_frame(&self) -> Option<(SheetId, &SpriteAnimator)> {
        match self.phase {
            EnemyPhase::Normal => None,
            EnemyPhase::Damaged => Some((SheetId::EnemyDamage, &self.damage)),
            EnemyPhase::Dead => Some((SheetId::EnemyDeath, &self.death)),
        }
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn phase(&self) -> EnemyPhase {
        self.phase
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn damage_animator(&self) -> &SpriteAnimator {
        &self.damage
    }

    pub fn death_animator(&self) -> &SpriteAnimator {
        &self.death
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Ticks until the damage reaction is over.
    fn recover(combat: &mut Combat) {
        let ticks = combat.damage_animator().ticks_per_cycle();
        for _ in 0..ticks {
            if combat.phase() != EnemyPhase::Damaged {
                return;
            }
            combat.advance_phase();
        }
    }

    #[test]
    fn strike_only_lands_on_calm_enemy() {
        let mut combat = Combat::new(&GameConfig::default());

        assert!(combat.strike());
        assert_eq!(combat.hp(), 2);
        assert_eq!(combat.phase(), EnemyPhase::Damaged);

        assert!(!combat.strike());
        assert_eq!(combat.hp(), 2);
    }

    #[test]
    fn damage_reaction_plays_one_cycle() {
        let mut combat = Combat::new(&GameConfig::default());
        combat.strike();

        let ticks = combat.damage_animator().ticks_per_cycle() - 1;
        for _ in 0..ticks - 1 {
            combat.advance_phase();
            assert_eq!(combat.phase(), EnemyPhase::Damaged);
        }

        combat.advance_phase();
        assert_eq!(combat.phase(), EnemyPhase::Normal);
        assert_eq!(combat.hp(), 2);
    }

    #[test]
    fn zero_hp_dies_then_respawns() {
        let mut combat = Combat::new(&GameConfig::default());

        for _ in 0..2 {
            combat.strike();
            recover(&mut combat);
        }
        assert!(combat.strike());
        assert_eq!(combat.hp(), 0);

        // Death overrides the running damage reaction
        let outcome = combat.advance_phase();
        assert!(outcome.died);
        assert_eq!(combat.phase(), EnemyPhase::Dead);
        assert!(!combat.strike());
        assert_eq!(combat.hp(), 0);

        let ticks = combat.death_animator().ticks_per_cycle() - 1;
        for _ in 1..ticks - 1 {
            let outcome = combat.advance_phase();
            assert!(!outcome.died && !outcome.defeated);
            assert_eq!(combat.phase(), EnemyPhase::Dead);
        }

        let outcome = combat.advance_phase();
        assert!(outcome.defeated);
        assert_eq!(combat.phase(), EnemyPhase::Normal);
        assert_eq!(combat.hp(), 3);
        assert_eq!(combat.kills(), 1);
    }

    #[test]
    fn reaction_frames_follow_phase() {
        let mut combat = Combat::new(&GameConfig::default());
        assert!(combat.reaction_frame().is_none());

        combat.strike();
        assert_eq!(combat.reaction_frame().map(|(id, _)| id), Some(SheetId::EnemyDamage));
    }
}

use bevy::prelude::*;
use bevy::asset::UntypedAssetId;

use crate::config::{GameConfig, SheetSpec};

pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_sprite_sheets);
    }
}

/// Every sprite sheet the demo draws from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SheetId {
    PlayerWalk,
    PlayerAttack,
    EnemyWalk,
    EnemyDamage,
    EnemyDeath,
}

impl SheetId {
    pub const ALL: [SheetId; 5] = [
        SheetId::PlayerWalk,
        SheetId::PlayerAttack,
        SheetId::EnemyWalk,
        SheetId::EnemyDamage,
        SheetId::EnemyDeath,
    ];
}

/// Frame counter for one sprite sheet.
///
/// Holds no handle to the sheet itself: every actor owns its own counters
/// and looks the shared image up in [`SpriteSheets`] when drawing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpriteAnimator {
    frame_count: usize,
    ticks_per_frame: u32,
    frame_index: usize,
    tick_counter: u32,
}

impl SpriteAnimator {
    pub fn new(frame_count: usize, ticks_per_frame: u32) -> Self {
        SpriteAnimator {
            frame_count: frame_count.max(1),
            ticks_per_frame: ticks_per_frame.max(1),
            frame_index: 0,
            tick_counter: 0,
        }
    }

    pub fn from_spec(spec: &SheetSpec) -> Self {
        Self::new(spec.frames, spec.ticks_per_frame)
    }

    /// Moves one tick forward, stepping to the next frame (and wrapping to
    /// the first) once the current one has been shown `ticks_per_frame` times.
    pub fn advance(&mut self) {
        self.tick_counter += 1;

        if self.tick_counter >= self.ticks_per_frame {
            self.tick_counter = 0;
            self.frame_index = (self.frame_index + 1) % self.frame_count;
        }
    }

    /// True while the last frame is on its final tick, i.e. the next
    /// [`advance`](Self::advance) wraps back to frame 0.
    ///
    /// This holds on exactly one tick per cycle and is not latched: callers
    /// must check it right after advancing.
    pub fn is_finished(&self) -> bool {
        self.frame_index == self.frame_count - 1 && self.tick_counter == self.ticks_per_frame - 1
    }

    pub fn restart(&mut self) {
        self.frame_index = 0;
        self.tick_counter = 0;
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn tick_counter(&self) -> u32 {
        self.tick_counter
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Ticks needed to play every frame once.
    pub fn ticks_per_cycle(&self) -> u32 {
        self.frame_count as u32 * self.ticks_per_frame
    }
}

#[derive(Clone, Debug)]
pub struct SheetHandles {
    pub image: Handle<Image>,
    pub layout: Handle<TextureAtlasLayout>,
}

/// Shared, read-only sprite sheets. Loaded once so actors never load the
/// same image twice.
#[derive(Resource)]
pub struct SpriteSheets {
    pub player_walk: SheetHandles,
    pub player_attack: SheetHandles,
    pub enemy_walk: SheetHandles,
    pub enemy_damage: SheetHandles,
    pub enemy_death: SheetHandles,
}

impl SpriteSheets {
    pub fn get(&self, id: SheetId) -> &SheetHandles {
        match id {
            SheetId::PlayerWalk => &self.player_walk,
            SheetId::PlayerAttack => &self.player_attack,
            SheetId::EnemyWalk => &self.enemy_walk,
            SheetId::EnemyDamage => &self.enemy_damage,
            SheetId::EnemyDeath => &self.enemy_death,
        }
    }

    /// A sprite showing the first frame of `id`.
    pub fn sprite(&self, id: SheetId) -> Sprite {
        let handles = self.get(id);
        Sprite::from_atlas_image(
            handles.image.clone(),
            TextureAtlas {
                layout: handles.layout.clone(),
                index: 0,
            },
        )
    }

    pub fn image_ids(&self) -> impl Iterator<Item = UntypedAssetId> + '_ {
        SheetId::ALL
            .into_iter()
            .map(|id| self.get(id).image.id().untyped())
    }
}

/// Points `sprite` at the animator's current frame on sheet `id`.
pub fn apply_frame(
    sprite: &mut Sprite,
    sheets: &SpriteSheets,
    id: SheetId,
    animator: &SpriteAnimator,
    mirrored: bool,
) {
    let handles = sheets.get(id);
    if sprite.image != handles.image {
        sprite.image = handles.image.clone();
    }

    if let Some(atlas) = sprite.texture_atlas.as_mut() {
        if atlas.layout != handles.layout {
            atlas.layout = handles.layout.clone();
        }
        atlas.index = animator.frame_index();
    } else {
        sprite.texture_atlas = Some(TextureAtlas {
            layout: handles.layout.clone(),
            index: animator.frame_index(),
        });
    }

    sprite.flip_x = mirrored;
}

pub fn load_sprite_sheets(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut texture_atlas_layouts: ResMut<Assets<TextureAtlasLayout>>,
    config: Res<GameConfig>,
) {
    // Every sheet is a single row of equal-width frames
    let mut load = |id: SheetId| {
        let spec = config.sheets.get(id);
        SheetHandles {
            image: asset_server.load(spec.path.clone()),
            layout: texture_atlas_layouts.add(TextureAtlasLayout::from_grid(
                UVec2::new(spec.frame_width, spec.frame_height),
                spec.frames as u32,
                1,
                None,
                None,
            )),
        }
    };

    let sheets = SpriteSheets {
        player_walk: load(SheetId::PlayerWalk),
        player_attack: load(SheetId::PlayerAttack),
        enemy_walk: load(SheetId::EnemyWalk),
        enemy_damage: load(SheetId::EnemyDamage),
        enemy_death: load(SheetId::EnemyDeath),
    };

    commands.insert_resource(sheets);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_index_stays_in_range() {
        for (frames, ticks) in [(1, 1), (4, 1), (8, 11), (11, 3)] {
            let mut animator = SpriteAnimator::new(frames, ticks);
            for _ in 0..500 {
                animator.advance();
                assert!(animator.frame_index() < frames);
            }
        }
    }

    #[test]
    fn full_cycle_returns_to_first_frame() {
        let mut animator = SpriteAnimator::new(9, 11);

        for _ in 0..animator.ticks_per_cycle() {
            animator.advance();
        }

        assert_eq!(animator.frame_index(), 0);
        assert_eq!(animator.tick_counter(), 0);
    }

    #[test]
    fn steps_frame_every_ticks_per_frame() {
        let mut animator = SpriteAnimator::new(4, 3);

        animator.advance();
        animator.advance();
        assert_eq!(animator.frame_index(), 0);

        animator.advance();
        assert_eq!(animator.frame_index(), 1);
    }

    #[test]
    fn finished_once_per_cycle() {
        let mut animator = SpriteAnimator::new(4, 11);
        let cycle = animator.ticks_per_cycle();

        let mut finished_ticks = Vec::new();
        for tick in 1..=cycle * 3 {
            animator.advance();
            if animator.is_finished() {
                finished_ticks.push(tick);
            }
        }

        // The tick right before each wrap
        assert_eq!(finished_ticks, vec![cycle - 1, 2 * cycle - 1, 3 * cycle - 1]);
    }

    #[test]
    fn finished_right_before_wrap() {
        let mut animator = SpriteAnimator::new(3, 2);
        while !animator.is_finished() {
            animator.advance();
        }

        assert_eq!(animator.frame_index(), 2);
        animator.advance();
        assert_eq!(animator.frame_index(), 0);
        assert!(!animator.is_finished());
    }

    #[test]
    fn restart_goes_back_to_first_frame() {
        let mut animator = SpriteAnimator::new(5, 2);
        for _ in 0..7 {
            animator.advance();
        }
        assert_ne!(animator.frame_index(), 0);

        animator.restart();
        assert_eq!(animator.frame_index(), 0);
        assert_eq!(animator.tick_counter(), 0);
    }

    #[test]
    fn zero_sizes_are_clamped() {
        let mut animator = SpriteAnimator::new(0, 0);
        animator.advance();

        assert_eq!(animator.frame_count(), 1);
        assert_eq!(animator.frame_index(), 0);
        assert!(animator.is_finished());
    }
}

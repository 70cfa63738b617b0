use bevy::math::Isometry2d;
use bevy::prelude::*;
use bevy::sprite::SpriteImageMode;

use crate::animation::{apply_frame, SheetId, SpriteSheets};
use crate::app_state::AppState;
use crate::assets::SceneAssets;
use crate::config::{GameConfig, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::game::{GameSet, GameState, LastTick};
use crate::geometry::{screen_to_world, HitRect};

pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera)
            .add_systems(OnEnter(AppState::Playing), spawn_scene)
            .add_systems(
                Update,
                (
                    sync_player_sprite,
                    sync_enemy_sprite,
                    sync_damage_overlay,
                    draw_hitboxes.run_if(|config: Res<GameConfig>| config.show_hitboxes),
                )
                    .in_set(GameSet::Present),
            );
    }
}

#[derive(Component)]
struct PlayerSprite;

#[derive(Component)]
struct EnemySprite;

/// Second copy of the damage reaction, drawn on top of the enemy while a
/// swing keeps connecting.
#[derive(Component)]
struct DamageOverlay;

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn spawn_scene(
    mut commands: Commands,
    scene: Res<SceneAssets>,
    sheets: Res<SpriteSheets>,
    config: Res<GameConfig>,
) {
    commands.spawn((
        Sprite {
            image: scene.background.clone(),
            custom_size: Some(Vec2::new(WINDOW_WIDTH, WINDOW_HEIGHT)),
            image_mode: SpriteImageMode::Tiled {
                tile_x: true,
                tile_y: true,
                stretch_value: config.background_scale,
            },
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, -10.0),
    ));

    commands.spawn((
        EnemySprite,
        sheets.sprite(SheetId::EnemyWalk),
        Transform::from_xyz(0.0, 0.0, 1.0),
    ));

    commands.spawn((
        DamageOverlay,
        sheets.sprite(SheetId::EnemyDamage),
        Transform::from_xyz(0.0, 0.0, 1.5),
        Visibility::Hidden,
    ));

    commands.spawn((
        PlayerSprite,
        sheets.sprite(SheetId::PlayerWalk),
        Transform::from_xyz(0.0, 0.0, 2.0),
    ));
}

/// Places a sprite so its drawn top-left corner sits at `top_left` on screen.
fn place(transform: &mut Transform, config: &GameConfig, id: SheetId, top_left: Vec2, scale: f32) {
    let center = screen_to_world(top_left, config.sheets.get(id).drawn_size(scale));
    transform.translation.x = center.x;
    transform.translation.y = center.y;
    transform.scale = Vec3::new(scale, scale, 1.0);
}

fn sync_player_sprite(
    state: Res<GameState>,
    sheets: Res<SpriteSheets>,
    mut query: Query<(&mut Sprite, &mut Transform), With<PlayerSprite>>,
) {
    let player = state.player();
    let config = state.config();
    let (id, animator) = player.current_frame();

    for (mut sprite, mut transform) in &mut query {
        apply_frame(&mut sprite, &sheets, id, animator, player.facing().is_left());
        place(&mut transform, config, id, player.pos(), config.player_scale);
    }
}

fn sync_enemy_sprite(
    state: Res<GameState>,
    sheets: Res<SpriteSheets>,
    mut query: Query<(&mut Sprite, &mut Transform), With<EnemySprite>>,
) {
    let enemy = state.enemy();
    let config = state.config();

    // Reactions are drawn as authored; only the walk turns toward the player
    let (id, animator, mirrored) = match state.combat().reaction_frame() {
        Some((id, animator)) => (id, animator, false),
        None => (
            SheetId::EnemyWalk,
            enemy.animator(),
            enemy.is_mirrored(state.player().pos()),
        ),
    };

    for (mut sprite, mut transform) in &mut query {
        apply_frame(&mut sprite, &sheets, id, animator, mirrored);
        place(&mut transform, config, id, enemy.pos(), config.enemy_scale);
    }
}

fn sync_damage_overlay(
    state: Res<GameState>,
    last_tick: Res<LastTick>,
    sheets: Res<SpriteSheets>,
    mut query: Query<(&mut Sprite, &mut Transform, &mut Visibility), With<DamageOverlay>>,
) {
    let config = state.config();

    for (mut sprite, mut transform, mut visibility) in &mut query {
        let Some(facing) = last_tick.0.damage_overlay else {
            *visibility = Visibility::Hidden;
            continue;
        };

        apply_frame(
            &mut sprite,
            &sheets,
            SheetId::EnemyDamage,
            state.combat().damage_animator(),
            facing.is_left(),
        );
        place(
            &mut transform,
            config,
            SheetId::EnemyDamage,
            state.enemy().pos(),
            config.enemy_scale,
        );
        *visibility = Visibility::Visible;
    }
}

fn draw_hitboxes(mut gizmos: Gizmos, state: Res<GameState>) {
    let mut outline = |rect: HitRect, color: Color| {
        let center = screen_to_world(rect.min, rect.size);
        gizmos.rect_2d(Isometry2d::from_translation(center), rect.size, color);
    };

    outline(state.player_rect(), Color::srgba(0.0, 1.0, 0.0, 0.5));
    outline(state.enemy_rect(), Color::srgba(1.0, 0.0, 0.0, 0.5));
}

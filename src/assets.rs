//! Loading gate: holds the app in [`AppState::Loading`] until every asset is
//! in memory, and shuts it down if any of them is missing.

use bevy::asset::{LoadState, UntypedAssetId};
use bevy::prelude::*;

use crate::animation::SpriteSheets;
use crate::app_state::AppState;
use crate::audio::GameAudio;
use crate::config::GameConfig;

pub struct LoadingPlugin;

impl Plugin for LoadingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_scene_assets).add_systems(
            Update,
            check_assets_system.run_if(in_state(AppState::Loading)),
        );
    }
}

/// Everything drawn that is not a sprite sheet.
#[derive(Resource)]
pub struct SceneAssets {
    pub font: Handle<Font>,
    pub background: Handle<Image>,
}

fn load_scene_assets(mut commands: Commands, asset_server: Res<AssetServer>, config: Res<GameConfig>) {
    commands.insert_resource(SceneAssets {
        font: asset_server.load(config.assets.font.clone()),
        background: asset_server.load(config.assets.background.clone()),
    });
}

fn check_assets_system(
    asset_server: Res<AssetServer>,
    sheets: Res<SpriteSheets>,
    audio: Res<GameAudio>,
    scene: Res<SceneAssets>,
    mut next_state: ResMut<NextState<AppState>>,
    mut exit: MessageWriter<AppExit>,
) {
    let ids: Vec<UntypedAssetId> = sheets
        .image_ids()
        .chain(audio.ids())
        .chain([scene.font.id().untyped(), scene.background.id().untyped()])
        .collect();

    // There is no fallback rendering, so one missing file ends the game
    for id in &ids {
        if let LoadState::Failed(err) = asset_server.load_state(*id) {
            error!("Failed to load asset: {}", err);
            exit.write(AppExit::error());
            return;
        }
    }

    if ids.iter().all(|id| asset_server.is_loaded_with_dependencies(*id)) {
        info!("All {} assets loaded", ids.len());
        next_state.set(AppState::Playing);
    }
}

use bevy::prelude::*;
use bevy::asset::UntypedAssetId;

use crate::config::GameConfig;
use crate::game::{GameSet, LastTick, SoundCue};

pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_audio)
            .add_systems(Update, play_sound_cues.in_set(GameSet::Present));
    }
}

#[derive(Resource)]
pub struct GameAudio {
    /// Played when a swing starts.
    pub slash: Handle<AudioSource>,
    /// Played when the enemy starts dying.
    pub disappear: Handle<AudioSource>,
}

impl GameAudio {
    pub fn get(&self, cue: SoundCue) -> &Handle<AudioSource> {
        match cue {
            SoundCue::Slash => &self.slash,
            SoundCue::Disappear => &self.disappear,
        }
    }

    pub fn ids(&self) -> [UntypedAssetId; 2] {
        [self.slash.id().untyped(), self.disappear.id().untyped()]
    }
}

pub fn setup_audio(mut commands: Commands, asset_server: Res<AssetServer>, config: Res<GameConfig>) {
    commands.insert_resource(GameAudio {
        slash: asset_server.load(config.assets.slash_sound.clone()),
        disappear: asset_server.load(config.assets.disappear_sound.clone()),
    });
}

/// Fire-and-forget: each cue gets its own player entity that despawns
/// when the clip ends.
fn play_sound_cues(mut commands: Commands, audio: Res<GameAudio>, last_tick: Res<LastTick>) {
    for cue in &last_tick.0.sounds {
        commands.spawn((
            AudioPlayer::new(audio.get(*cue).clone()),
            PlaybackSettings::DESPAWN,
        ));
    }
}

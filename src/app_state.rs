use bevy::prelude::*;

/// Top-level app phase. Gameplay only starts once every asset is in memory.
#[derive(States, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AppState {
    #[default]
    Loading,
    Playing,
}

use bevy::prelude::*;
use bevy::window::WindowResolution;

use slash_demo::{
    animation::AnimationPlugin,
    app_state::AppState,
    assets::LoadingPlugin,
    audio::GameAudioPlugin,
    config::{ConfigPlugin, WINDOW_HEIGHT, WINDOW_WIDTH},
    game::GamePlugin,
    hud::HudPlugin,
    render::RenderPlugin,
};

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "slash-demo".to_string(),
                        resolution: WindowResolution::new(WINDOW_WIDTH as u32, WINDOW_HEIGHT as u32),
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                })
                // Pixel art: no smoothing between texels
                .set(ImagePlugin::default_nearest()),
        )
        .init_state::<AppState>()
        .add_plugins((
            ConfigPlugin,
            AnimationPlugin,
            GameAudioPlugin,
            LoadingPlugin,
            GamePlugin,
            RenderPlugin,
            HudPlugin,
        ))
        .run();
}

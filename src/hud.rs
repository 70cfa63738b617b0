use bevy::prelude::*;

use crate::app_state::AppState;
use crate::assets::SceneAssets;
use crate::game::{GameSet, GameState};

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Playing), spawn_hud).add_systems(
            Update,
            (update_hud_text, update_win_prompt).in_set(GameSet::Present),
        );
    }
}

const HUD_FONT_SIZE: f32 = 24.0;
const WIN_MESSAGE: &str = "Game Clear!\n Press Enter Key";

/// One counter line in the top-left corner.
#[derive(Component, Copy, Clone, Debug, PartialEq, Eq)]
pub enum HudLine {
    Goal,
    Kills,
    EnemyHp,
}

impl HudLine {
    const ALL: [(HudLine, f32); 3] = [
        (HudLine::Goal, 10.0),
        (HudLine::Kills, 46.0),
        (HudLine::EnemyHp, 80.0),
    ];

    pub fn text(self, state: &GameState) -> String {
        match self {
            HudLine::Goal => format!("Goal:{}", state.config().goal),
            HudLine::Kills => format!("Kill:{}", state.combat().kills()),
            HudLine::EnemyHp => format!("enHP:{}", state.combat().hp()),
        }
    }
}

#[derive(Component)]
struct WinPrompt;

fn spawn_hud(mut commands: Commands, scene: Res<SceneAssets>) {
    let font = TextFont {
        font: scene.font.clone(),
        font_size: HUD_FONT_SIZE,
        ..default()
    };

    for (line, top) in HudLine::ALL {
        commands.spawn((
            line,
            Text::new(""),
            font.clone(),
            TextColor(Color::srgb(0.5, 1.0, 0.5)),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(top),
                ..default()
            },
        ));
    }

    commands.spawn((
        WinPrompt,
        Text::new(WIN_MESSAGE),
        font,
        TextColor(Color::srgb(1.0, 0.5, 0.5)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(400.0),
            top: Val::Px(250.0),
            ..default()
        },
        Visibility::Hidden,
    ));
}

fn update_hud_text(state: Res<GameState>, mut query: Query<(&HudLine, &mut Text)>) {
    for (line, mut text) in &mut query {
        let value = line.text(&state);
        if text.0 != value {
            text.0 = value;
        }
    }
}

fn update_win_prompt(state: Res<GameState>, mut query: Query<&mut Visibility, With<WinPrompt>>) {
    for mut visibility in &mut query {
        *visibility = if state.is_won() {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn lines_show_current_counters() {
        let mut rng = StdRng::seed_from_u64(3);
        let state = GameState::new(GameConfig::default(), &mut rng);

        assert_eq!(HudLine::Goal.text(&state), "Goal:10");
        assert_eq!(HudLine::Kills.text(&state), "Kill:0");
        assert_eq!(HudLine::EnemyHp.text(&state), "enHP:3");
    }
}

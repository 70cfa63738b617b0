use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animation::SheetId;
use crate::geometry::RectOffset;

pub const WINDOW_WIDTH: f32 = 873.0;
pub const WINDOW_HEIGHT: f32 = 525.0;

/// File looked up in the working directory before the per-user config dir.
const LOCAL_CONFIG_FILE: &str = "slash-demo.ron";
const APP_DIR: &str = "slash-demo";

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_game_config);
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config file: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Tuning values for the whole demo.
///
/// Every field falls back to its default when missing from the file, so a
/// config only needs to name what it changes:
///
/// ```ron
/// (goal: 3, show_hitboxes: true)
/// ```
#[derive(Resource, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Kills needed to clear the game.
    pub goal: u32,
    pub enemy_max_hp: u32,
    /// Pixels per tick.
    pub player_speed: f32,
    /// Pixels per tick.
    pub enemy_speed: f32,
    pub player_scale: f32,
    pub enemy_scale: f32,
    pub background_scale: f32,
    /// Distance between the bottom of the window and the player's feet.
    pub ground_height: f32,
    /// Screen y of the enemy's top edge. Enemies never leave this line.
    pub enemy_ground_y: f32,
    pub player_attack_left: RectOffset,
    pub player_attack_right: RectOffset,
    pub player_body: RectOffset,
    pub enemy_body: RectOffset,
    /// Replay the damage reaction on every tick a hit connects, even while
    /// the enemy is already reacting.
    pub retrigger_damage_reaction: bool,
    /// Draw hit rectangles over the sprites.
    pub show_hitboxes: bool,
    pub sheets: SheetsConfig,
    pub assets: AssetPaths,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            goal: 10,
            enemy_max_hp: 3,
            player_speed: 4.0,
            enemy_speed: 0.5,
            player_scale: 2.0,
            enemy_scale: 3.0,
            background_scale: 3.0,
            ground_height: 150.0,
            enemy_ground_y: 340.0,
            player_attack_left: RectOffset::new(100.0, 100.0, 60.0, 25.0),
            player_attack_right: RectOffset::new(170.0, 100.0, 60.0, 25.0),
            player_body: RectOffset::new(150.0, 60.0, 35.0, 50.0),
            enemy_body: RectOffset::new(80.0, 40.0, 30.0, 50.0),
            retrigger_damage_reaction: true,
            show_hitboxes: false,
            sheets: SheetsConfig::default(),
            assets: AssetPaths::default(),
        }
    }
}

/// One horizontal strip of equal-width frames.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SheetSpec {
    pub path: String,
    pub frame_width: u32,
    pub frame_height: u32,
    pub frames: usize,
    /// How many ticks each frame stays on screen.
    pub ticks_per_frame: u32,
}

impl SheetSpec {
    fn new(path: &str, frame_width: u32, frame_height: u32, frames: usize, ticks: u32) -> Self {
        Self {
            path: path.to_string(),
            frame_width,
            frame_height,
            frames,
            ticks_per_frame: ticks,
        }
    }

    /// Size of one frame once drawn at `scale`.
    pub fn drawn_size(&self, scale: f32) -> Vec2 {
        Vec2::new(self.frame_width as f32, self.frame_height as f32) * scale
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SheetsConfig {
    pub player_walk: SheetSpec,
    pub player_attack: SheetSpec,
    pub enemy_walk: SheetSpec,
    pub enemy_damage: SheetSpec,
    pub enemy_death: SheetSpec,
}

impl SheetsConfig {
    pub fn get(&self, id: SheetId) -> &SheetSpec {
        match id {
            SheetId::PlayerWalk => &self.player_walk,
            SheetId::PlayerAttack => &self.player_attack,
            SheetId::EnemyWalk => &self.enemy_walk,
            SheetId::EnemyDamage => &self.enemy_damage,
            SheetId::EnemyDeath => &self.enemy_death,
        }
    }
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            player_walk: SheetSpec::new("textures/player_walk.png", 120, 80, 8, 11),
            player_attack: SheetSpec::new("textures/player_attack.png", 120, 80, 11, 3),
            enemy_walk: SheetSpec::new("textures/enemy_walk.png", 64, 48, 9, 11),
            enemy_damage: SheetSpec::new("textures/enemy_damage.png", 64, 48, 4, 11),
            enemy_death: SheetSpec::new("textures/enemy_death.png", 64, 48, 8, 11),
        }
    }
}

/// Paths relative to the `assets/` folder.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AssetPaths {
    pub font: String,
    pub background: String,
    pub slash_sound: String,
    pub disappear_sound: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            font: "fonts/x14y24pxHeadUpDaisy.ttf".to_string(),
            background: "textures/ground.png".to_string(),
            slash_sound: "audio/se_hit_004.wav".to_string(),
            disappear_sound: "audio/disappear02.mp3".to_string(),
        }
    }
}

impl GameConfig {
    pub fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str::<GameConfig>(contents)?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Reads the first config file found, or falls back to defaults.
    ///
    /// A broken file is logged and ignored rather than stopping the game.
    pub fn load_or_default() -> Self {
        for path in search_paths() {
            if !path.exists() {
                continue;
            }

            return match Self::load_from(&path) {
                Ok(config) => {
                    info!("Loaded config from {:?}", path);
                    config
                }
                Err(e) => {
                    error!("Failed to load config {:?}: {}. Using defaults.", path, e);
                    Self::default()
                }
            };
        }

        info!("No config file found. Using defaults.");
        Self::default()
    }
}

fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join(APP_DIR).join("config.ron"));
    }
    paths
}

fn load_game_config(mut commands: Commands) {
    commands.insert_resource(GameConfig::load_or_default());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = GameConfig::from_ron_str("(goal: 3, show_hitboxes: true)").unwrap();

        assert_eq!(config.goal, 3);
        assert!(config.show_hitboxes);
        assert_eq!(config.enemy_max_hp, 3);
        assert_eq!(config.sheets, SheetsConfig::default());
    }

    #[test]
    fn nested_override() {
        let config = GameConfig::from_ron_str(
            "(enemy_body: (x: 1.0, y: 2.0, width: 3.0, height: 4.0))",
        )
        .unwrap();

        assert_eq!(config.enemy_body, RectOffset::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(config.player_body, GameConfig::default().player_body);
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let result = GameConfig::from_ron_str("(goal: \"ten\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = GameConfig::load_from(Path::new("definitely/not/here.ron"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn sheet_lookup() {
        let sheets = SheetsConfig::default();
        assert_eq!(sheets.get(SheetId::PlayerAttack).frames, 11);
        assert_eq!(sheets.get(SheetId::EnemyDeath).frames, 8);
        assert_eq!(
            sheets.get(SheetId::EnemyWalk).drawn_size(3.0),
            Vec2::new(192.0, 144.0)
        );
    }
}

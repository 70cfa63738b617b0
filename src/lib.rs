// lib.rs - Public API for the game crate.
// Gameplay logic lives in plain types (player, enemy, combat, game) so it can
// be tested without an App; the rest is Bevy plugins that feed it input and
// draw its state.

pub mod animation;
pub mod app_state;
pub mod assets;
pub mod audio;
pub mod combat;
pub mod config;
pub mod enemy;
pub mod game;
pub mod geometry;
pub mod hud;
pub mod player;
pub mod render;

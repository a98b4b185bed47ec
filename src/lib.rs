//! Questfall game library crate.

pub mod app;
pub mod asset;
pub mod audio;
pub mod constants;
pub mod direction;
pub mod error;
pub mod events;
pub mod game;
pub mod ruleset;
pub mod systems;
pub mod texture;

//! Centralized error types for the game.
//!
//! Presentation-layer faults (missing assets, failed draws, rejected audio
//! playback) are always non-fatal: systems report them as events, the error
//! log system records them, and the simulation keeps running.

use std::io;

use bevy_ecs::event::Event;

/// Main error type for the game.
///
/// This is the primary error type that should be used in public APIs.
/// It derives `Event` so ECS systems can report failures through an
/// `EventWriter<GameError>` instead of aborting the frame.
#[derive(thiserror::Error, Debug, Event)]
pub enum GameError {
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),

    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Asset not found: {0}")]
    NotFound(String),
}

/// Errors related to texture operations.
#[derive(thiserror::Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture: {0}")]
    LoadFailed(String),

    #[error("Rendering failed: {0}")]
    RenderFailed(String),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;

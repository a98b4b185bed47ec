//! Enum-indexed sprite table with per-sprite readiness.
//!
//! Replaces string-keyed image lookup with a typed table: every drawable
//! asset has a `SpriteId`, and a missing or failed load simply leaves its
//! slot empty. Render code polls `SpriteStore::get` each frame and falls
//! back to procedural shapes when a slot is empty, so the game is visually
//! complete with zero assets present.

use std::collections::HashMap;

use sdl2::image::LoadTexture;
use sdl2::render::{Texture, TextureCreator};
use sdl2::video::WindowContext;
use tracing::{debug, warn};

use crate::asset::asset_path;
use crate::direction::Direction;

/// Which character family a sprite belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Player,
    Enemy,
}

impl SpriteKind {
    pub fn name(self) -> &'static str {
        match self {
            SpriteKind::Player => "player",
            SpriteKind::Enemy => "enemy",
        }
    }
}

/// Identifier for every image-backed draw in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Idle { kind: SpriteKind, facing: Direction },
    /// `frame` is 0 or 1, the two walk-cycle poses.
    Walk { kind: SpriteKind, facing: Direction, frame: u8 },
    Background,
    HealthBarFrame,
    HealthBarFill,
    HpLabel,
    ScoreLabel,
    ScoreFrame,
    GameBorder,
    GameOverFrame,
    /// `0..3`, the torch flame cycle.
    TorchFlame(u8),
}

impl SpriteId {
    /// Selects the idle or walk sprite for a character.
    pub fn character(kind: SpriteKind, facing: Direction, walk_frame: Option<u8>) -> Self {
        match walk_frame {
            Some(frame) => SpriteId::Walk { kind, facing, frame },
            None => SpriteId::Idle { kind, facing },
        }
    }

    /// File name per the `<entity>-<state>-<direction>[-frame].png` convention.
    pub fn file_name(self) -> String {
        match self {
            SpriteId::Idle { kind, facing } => format!("{}-idle-{}.png", kind.name(), facing.name()),
            SpriteId::Walk { kind, facing, frame } => {
                format!("{}-walk-{}-{}.png", kind.name(), facing.name(), frame + 1)
            }
            SpriteId::Background => "game-background.png".to_string(),
            SpriteId::HealthBarFrame => "health-bar-frame.png".to_string(),
            SpriteId::HealthBarFill => "health-bar-fill.png".to_string(),
            SpriteId::HpLabel => "hp-label.png".to_string(),
            SpriteId::ScoreLabel => "score-label.png".to_string(),
            SpriteId::ScoreFrame => "score-frame.png".to_string(),
            SpriteId::GameBorder => "game-border.png".to_string(),
            SpriteId::GameOverFrame => "game-over-frame.png".to_string(),
            SpriteId::TorchFlame(frame) => format!("torch-flame-{}.png", frame + 1),
        }
    }

    /// Every sprite the store attempts to load at startup.
    pub fn all() -> Vec<SpriteId> {
        let mut ids = Vec::with_capacity(35);
        for kind in [SpriteKind::Player, SpriteKind::Enemy] {
            for facing in Direction::DIRECTIONS {
                ids.push(SpriteId::Idle { kind, facing });
                for frame in 0..2 {
                    ids.push(SpriteId::Walk { kind, facing, frame });
                }
            }
        }
        ids.extend([
            SpriteId::Background,
            SpriteId::HealthBarFrame,
            SpriteId::HealthBarFill,
            SpriteId::HpLabel,
            SpriteId::ScoreLabel,
            SpriteId::ScoreFrame,
            SpriteId::GameBorder,
            SpriteId::GameOverFrame,
        ]);
        for frame in 0..3 {
            ids.push(SpriteId::TorchFlame(frame));
        }
        ids
    }
}

/// Texture table populated once at startup. SDL textures are not `Send`,
/// so the store lives in the world as a non-send resource.
pub struct SpriteStore {
    textures: HashMap<SpriteId, Texture>,
}

impl SpriteStore {
    /// Attempts to load every known sprite. Failures are logged and leave
    /// the slot empty; they never abort startup.
    pub fn load(texture_creator: &TextureCreator<WindowContext>) -> Self {
        let mut textures = HashMap::new();

        for id in SpriteId::all() {
            let path = asset_path(&id.file_name());
            match texture_creator.load_texture(&path) {
                Ok(texture) => {
                    textures.insert(id, texture);
                }
                Err(e) => {
                    warn!(sprite = ?id, path = %path.display(), error = %e, "Sprite failed to load, using fallback");
                }
            }
        }

        debug!(loaded = textures.len(), total = SpriteId::all().len(), "Created sprite store");
        Self { textures }
    }

    /// Empty store; every draw falls back to procedural shapes.
    pub fn empty() -> Self {
        Self {
            textures: HashMap::new(),
        }
    }

    /// Non-blocking readiness poll for a single sprite.
    pub fn get(&self, id: SpriteId) -> Option<&Texture> {
        self.textures.get(&id)
    }

    pub fn loaded_count(&self) -> usize {
        self.textures.len()
    }
}

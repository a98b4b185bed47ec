//! Asset path resolution.
//!
//! Assets are loaded from the filesystem at startup and every load is allowed
//! to fail: the renderer substitutes procedural fallbacks for missing sprites
//! and the audio layer degrades to silence. Sprite files follow the
//! `<entity>-<state>-<direction>[-frame].png` naming convention.

use std::path::{Path, PathBuf};

/// Sound effects, one file each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    /// Played on each player attack.
    Sword,
    /// Played when gameplay begins.
    Fanfare,
}

impl Sound {
    pub const ALL: [Sound; 2] = [Sound::Sword, Sound::Fanfare];

    pub fn file_name(self) -> &'static str {
        match self {
            Sound::Sword => "sword.mp3",
            Sound::Fanfare => "quest.mp3",
        }
    }
}

/// Base directory for all game assets, overridable for packaged installs.
pub fn assets_dir() -> PathBuf {
    std::env::var_os("QUESTFALL_ASSETS")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("assets"))
}

pub fn asset_path(file_name: &str) -> PathBuf {
    assets_dir().join(Path::new(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_file_names() {
        assert_eq!(Sound::Sword.file_name(), "sword.mp3");
        assert_eq!(Sound::Fanfare.file_name(), "quest.mp3");
    }

    #[test]
    fn test_asset_path_joins_dir() {
        std::env::remove_var("QUESTFALL_ASSETS");
        assert_eq!(asset_path("sword.mp3"), PathBuf::from("assets/sword.mp3"));
    }
}

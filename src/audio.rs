//! This module handles audio playback for the game.
//!
//! Every failure path here is non-fatal: if the mixer cannot be opened or a
//! sound file is missing, the subsystem marks itself disabled (or skips the
//! sound) and the game continues silently.

use std::collections::HashMap;

use sdl2::mixer::{self, Chunk, InitFlag, DEFAULT_FORMAT};

use crate::asset::{asset_path, Sound};

const CHANNELS: i32 = 4;
const VOLUME: i32 = 32;

/// The audio system for the game: initializes the mixer, loads the
/// single-shot sound effects, and plays them on request.
#[allow(dead_code)]
pub struct Audio {
    mixer_context: Option<mixer::Sdl2MixerContext>,
    sounds: HashMap<Sound, Chunk>,
    muted: bool,
}

impl Default for Audio {
    fn default() -> Self {
        Self::new()
    }
}

impl Audio {
    /// Creates a new `Audio` instance. Never fails; on mixer or asset
    /// errors the instance degrades to a disabled or partial state.
    pub fn new() -> Self {
        let frequency = 44100;
        let chunk_size = 256;

        if let Err(e) = mixer::open_audio(frequency, DEFAULT_FORMAT, 1, chunk_size) {
            tracing::warn!(error = %e, "Failed to open audio device, sound disabled");
            return Self {
                mixer_context: None,
                sounds: HashMap::new(),
                muted: false,
            };
        }
        mixer::allocate_channels(CHANNELS);
        for i in 0..CHANNELS {
            mixer::Channel(i).set_volume(VOLUME);
        }

        let mixer_context = match mixer::init(InitFlag::MP3) {
            Ok(context) => Some(context),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to initialize mixer, sound disabled");
                None
            }
        };

        let mut sounds = HashMap::new();
        if mixer_context.is_some() {
            for sound in Sound::ALL {
                let path = asset_path(sound.file_name());
                match Chunk::from_file(&path) {
                    Ok(chunk) => {
                        sounds.insert(sound, chunk);
                    }
                    Err(e) => {
                        tracing::warn!(?sound, path = %path.display(), error = %e, "Sound failed to load");
                    }
                }
            }
        }

        Audio {
            mixer_context,
            sounds,
            muted: false,
        }
    }

    /// Plays a single-shot sound effect. Playback rejection is logged and
    /// swallowed.
    pub fn play(&mut self, sound: Sound) {
        if self.is_disabled() || self.muted {
            return;
        }
        if let Some(chunk) = self.sounds.get(&sound) {
            match mixer::Channel(-1).play(chunk, 0) {
                Ok(channel) => {
                    tracing::trace!(?sound, ?channel, "Playing sound");
                }
                Err(e) => {
                    tracing::warn!(?sound, error = %e, "Could not play sound");
                }
            }
        }
    }

    /// Instantly mute or unmute all channels.
    pub fn set_mute(&mut self, mute: bool) {
        let volume = if mute { 0 } else { VOLUME };
        for i in 0..CHANNELS {
            mixer::Channel(i).set_volume(volume);
        }
        self.muted = mute;
    }

    /// Returns `true` if the audio is muted.
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Returns `true` if the mixer never came up.
    pub fn is_disabled(&self) -> bool {
        self.mixer_context.is_none()
    }
}

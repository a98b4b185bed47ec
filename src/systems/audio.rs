//! Audio playback system and its world-side state.
//!
//! Simulation systems only emit [`AudioEvent`]s; the actual mixer calls are
//! confined here, against the non-send [`AudioResource`]. This keeps the
//! gameplay systems runnable in a headless world.

use bevy_ecs::{
    event::{Event, EventReader},
    resource::Resource,
    system::{NonSendMut, Res},
};

use crate::asset::Sound;
use crate::audio::Audio;

/// Send-safe mute flag, toggled by the control system.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct AudioState {
    pub muted: bool,
}

/// A request for the audio backend.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    Play(Sound),
}

/// Non-send wrapper around the SDL mixer handle.
pub struct AudioResource(pub Audio);

pub fn audio_system(
    mut audio: NonSendMut<AudioResource>,
    state: Res<AudioState>,
    mut events: EventReader<AudioEvent>,
) {
    if state.muted != audio.0.is_muted() {
        audio.0.set_mute(state.muted);
        tracing::debug!(muted = state.muted, "Audio mute changed");
    }

    for event in events.read() {
        match event {
            AudioEvent::Play(sound) => audio.0.play(*sound),
        }
    }
}

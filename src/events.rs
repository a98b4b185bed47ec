//! Commands produced by the input layer and frame events emitted by the
//! simulation. Presentation systems (audio, HUD) subscribe to the frame
//! events rather than being called from the core.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::direction::Direction;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameCommand {
    Move(Direction),
    Attack,
    Restart,
    MuteAudio,
    Exit,
}

#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    Command(GameCommand),
    /// An enemy's health crossed zero from a player hit.
    EnemyDefeated { at: Vec2 },
    /// The player took a burst of contact damage.
    PlayerHit { damage: f32 },
    /// The player's health reached zero while the game was running.
    PlayerDefeated { score: u32 },
}

impl From<GameCommand> for GameEvent {
    fn from(command: GameCommand) -> Self {
        GameEvent::Command(command)
    }
}

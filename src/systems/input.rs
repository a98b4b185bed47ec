//! Raw input handling: keyboard bindings and the virtual touch controls.
//!
//! `input_system` is the only system that touches the SDL event pump. It
//! drains platform events into [`GameEvent`]s and updates the held-key and
//! touch state; everything downstream is SDL-free and testable.

use std::collections::{HashMap, HashSet};

use bevy_ecs::{
    event::EventWriter,
    resource::Resource,
    system::{NonSendMut, Res, ResMut},
};
use glam::Vec2;
use sdl2::{event::Event, keyboard::Keycode, EventPump};

use crate::constants::{ATTACK_BUTTON_CENTER, ATTACK_BUTTON_RADIUS, CANVAS_SIZE, JOYSTICK_DEADZONE};
use crate::direction::Direction;
use crate::events::{GameCommand, GameEvent};
use crate::ruleset::Ruleset;

/// Keyboard mapping plus the set of currently held keys.
#[derive(Resource, Debug)]
pub struct Bindings {
    movement: HashMap<Keycode, Direction>,
    commands: HashMap<Keycode, GameCommand>,
    pressed: HashSet<Keycode>,
}

impl Default for Bindings {
    fn default() -> Self {
        let movement = HashMap::from([
            (Keycode::W, Direction::Up),
            (Keycode::Up, Direction::Up),
            (Keycode::S, Direction::Down),
            (Keycode::Down, Direction::Down),
            (Keycode::A, Direction::Left),
            (Keycode::Left, Direction::Left),
            (Keycode::D, Direction::Right),
            (Keycode::Right, Direction::Right),
        ]);
        let commands = HashMap::from([
            (Keycode::Space, GameCommand::Attack),
            (Keycode::Return, GameCommand::Attack),
            (Keycode::R, GameCommand::Restart),
            (Keycode::M, GameCommand::MuteAudio),
            (Keycode::Escape, GameCommand::Exit),
            (Keycode::Q, GameCommand::Exit),
        ]);
        Self {
            movement,
            commands,
            pressed: HashSet::new(),
        }
    }
}

impl Bindings {
    pub fn press(&mut self, key: Keycode) {
        if self.movement.contains_key(&key) {
            self.pressed.insert(key);
        }
    }

    pub fn release(&mut self, key: Keycode) {
        self.pressed.remove(&key);
    }

    pub fn command(&self, key: Keycode) -> Option<GameCommand> {
        self.commands.get(&key).copied()
    }

    /// The movement direction implied by the held keys. Exclusive: when
    /// several directions are held, the first in up, down, left, right
    /// order wins, no diagonals.
    pub fn held_direction(&self) -> Option<Direction> {
        for direction in Direction::DIRECTIONS {
            if self
                .pressed
                .iter()
                .any(|key| self.movement.get(key) == Some(&direction))
            {
                return Some(direction);
            }
        }
        None
    }
}

/// Live state of the virtual joystick, when a finger holds it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoystickTouch {
    pub finger_id: i64,
    /// Where the finger first landed. The stick measures against this.
    pub anchor: Vec2,
    pub current: Vec2,
}

/// Touch control state for the mobile-style preset.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct TouchState {
    pub joystick: Option<JoystickTouch>,
}

impl TouchState {
    /// Movement implied by the joystick, or `None` inside the dead zone.
    /// The vector is normalized (diagonals allowed) while the reported
    /// facing collapses to the dominant axis.
    pub fn movement(&self) -> Option<(Vec2, Direction)> {
        let touch = self.joystick?;
        let displacement = touch.current - touch.anchor;
        if displacement.length() <= JOYSTICK_DEADZONE {
            return None;
        }
        let facing = Direction::from_dominant_axis(displacement)?;
        Some((displacement.normalize(), facing))
    }

    /// Stick displacement clamped to the joystick radius, for rendering.
    pub fn stick_offset(&self) -> Vec2 {
        match self.joystick {
            Some(touch) => {
                let displacement = touch.current - touch.anchor;
                displacement.clamp_length_max(crate::constants::JOYSTICK_RADIUS)
            }
            None => Vec2::ZERO,
        }
    }
}

/// Whether a touch lands on the on-screen attack button.
pub fn attack_button_contains(point: Vec2) -> bool {
    point.distance(ATTACK_BUTTON_CENTER) <= ATTACK_BUTTON_RADIUS
}

/// Converts SDL's normalized finger coordinates to canvas space.
fn finger_position(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y) * CANVAS_SIZE
}

pub fn input_system(
    mut event_pump: NonSendMut<&'static mut EventPump>,
    mut bindings: ResMut<Bindings>,
    mut touch: ResMut<TouchState>,
    rules: Res<Ruleset>,
    mut events: EventWriter<GameEvent>,
) {
    for event in event_pump.poll_iter() {
        match event {
            Event::Quit { .. } => {
                events.write(GameCommand::Exit.into());
            }
            Event::KeyDown {
                keycode: Some(key),
                repeat: false,
                ..
            } => {
                bindings.press(key);
                if let Some(command) = bindings.command(key) {
                    events.write(command.into());
                }
            }
            Event::KeyUp {
                keycode: Some(key), ..
            } => {
                bindings.release(key);
            }
            Event::FingerDown { finger_id, x, y, .. } if rules.touch_controls => {
                let position = finger_position(x, y);
                if attack_button_contains(position) {
                    events.write(GameCommand::Attack.into());
                } else if touch.joystick.is_none() {
                    touch.joystick = Some(JoystickTouch {
                        finger_id,
                        anchor: position,
                        current: position,
                    });
                }
            }
            Event::FingerMotion { finger_id, x, y, .. } if rules.touch_controls => {
                if let Some(stick) = touch.joystick.as_mut() {
                    if stick.finger_id == finger_id {
                        stick.current = finger_position(x, y);
                    }
                }
            }
            Event::FingerUp { finger_id, .. } if rules.touch_controls => {
                if touch.joystick.is_some_and(|stick| stick.finger_id == finger_id) {
                    touch.joystick = None;
                }
            }
            _ => {}
        }
    }

    if let Some(direction) = bindings.held_direction() {
        events.write(GameCommand::Move(direction).into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_held_direction_priority() {
        let mut bindings = Bindings::default();
        bindings.press(Keycode::A);
        assert_eq!(bindings.held_direction(), Some(Direction::Left));

        // Up wins over left regardless of press order.
        bindings.press(Keycode::W);
        assert_eq!(bindings.held_direction(), Some(Direction::Up));

        bindings.release(Keycode::W);
        assert_eq!(bindings.held_direction(), Some(Direction::Left));
        bindings.release(Keycode::A);
        assert_eq!(bindings.held_direction(), None);
    }

    #[test]
    fn test_down_wins_over_horizontal() {
        let mut bindings = Bindings::default();
        bindings.press(Keycode::Right);
        bindings.press(Keycode::S);
        assert_eq!(bindings.held_direction(), Some(Direction::Down));
    }

    #[test]
    fn test_non_movement_keys_do_not_join_pressed_set() {
        let mut bindings = Bindings::default();
        bindings.press(Keycode::Space);
        assert_eq!(bindings.held_direction(), None);
        assert_eq!(bindings.command(Keycode::Space), Some(GameCommand::Attack));
    }

    #[test]
    fn test_joystick_dead_zone() {
        let mut touch = TouchState::default();
        touch.joystick = Some(JoystickTouch {
            finger_id: 1,
            anchor: Vec2::new(100.0, 400.0),
            current: Vec2::new(106.0, 404.0),
        });
        assert_eq!(touch.movement(), None);

        touch.joystick = Some(JoystickTouch {
            finger_id: 1,
            anchor: Vec2::new(100.0, 400.0),
            current: Vec2::new(130.0, 400.0),
        });
        let (vector, facing) = touch.movement().unwrap();
        assert_eq!(facing, Direction::Right);
        assert!((vector - Vec2::X).length() < 1e-6);
    }

    #[test]
    fn test_joystick_diagonal_moves_diagonally_but_faces_dominant_axis() {
        let touch = TouchState {
            joystick: Some(JoystickTouch {
                finger_id: 1,
                anchor: Vec2::ZERO,
                current: Vec2::new(30.0, 20.0),
            }),
        };
        let (vector, facing) = touch.movement().unwrap();
        assert_eq!(facing, Direction::Right);
        assert!(vector.x > 0.0 && vector.y > 0.0);
        assert!((vector.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_attack_button_region() {
        assert!(attack_button_contains(ATTACK_BUTTON_CENTER));
        assert!(attack_button_contains(
            ATTACK_BUTTON_CENTER + Vec2::new(ATTACK_BUTTON_RADIUS, 0.0)
        ));
        assert!(!attack_button_contains(
            ATTACK_BUTTON_CENTER + Vec2::new(ATTACK_BUTTON_RADIUS + 1.0, 0.0)
        ));
    }
}

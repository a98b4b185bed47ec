//! World rendering: background, characters, the slash arc, and the touch
//! overlay.
//!
//! Every draw degrades gracefully. A sprite that failed to load falls back
//! to a flat-colored shape, so the game is fully playable with an empty
//! assets directory. Draw failures are reported as [`GameError`] events and
//! never abort the frame.

use bevy_ecs::{
    event::EventWriter,
    query::{With, Without},
    system::{NonSend, NonSendMut, Query, Res},
};
use glam::Vec2;
use sdl2::gfx::primitives::DrawRenderer;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{BlendMode, Canvas};
use sdl2::video::Window;

use crate::constants::{CANVAS_SIZE, SLASH_DISTANCE, SLASH_HALF_SWEEP, SLASH_RADIUS};
use crate::direction::Direction;
use crate::error::{GameError, TextureError};
use crate::ruleset::Ruleset;
use crate::systems::components::{
    AttackState, BodySize, Enemy, Facing, HitFlash, Invulnerability, Motion, PlayerControlled, Position,
    WalkAnimation,
};
use crate::systems::input::TouchState;
use crate::texture::sprite::{SpriteId, SpriteKind, SpriteStore};

const GRASS: Color = Color::RGB(45, 74, 43);
const GRASS_GRID: Color = Color::RGB(58, 90, 56);
const GRID_STEP: u32 = 40;
const PLAYER_FALLBACK: Color = Color::RGB(65, 105, 225);
const ENEMY_FALLBACK: Color = Color::RGB(139, 0, 0);
const FACING_MARK: Color = Color::RGB(255, 215, 0);

pub(crate) fn report(errors: &mut EventWriter<GameError>, result: Result<(), String>) {
    if let Err(e) = result {
        errors.write(TextureError::RenderFailed(e).into());
    }
}

fn body_rect(position: Vec2, size: f32) -> Rect {
    Rect::from_center(
        sdl2::rect::Point::new(position.x as i32, position.y as i32),
        size as u32,
        size as u32,
    )
}

fn draw_background(
    canvas: &mut Canvas<Window>,
    sprites: &SpriteStore,
    errors: &mut EventWriter<GameError>,
) {
    if let Some(texture) = sprites.get(SpriteId::Background) {
        report(errors, canvas.copy(texture, None, None));
        return;
    }

    canvas.set_draw_color(GRASS);
    canvas.clear();
    canvas.set_draw_color(GRASS_GRID);
    let (width, height) = (CANVAS_SIZE.x as i32, CANVAS_SIZE.y as i32);
    for x in (0..=width).step_by(GRID_STEP as usize) {
        report(errors, canvas.draw_line((x, 0), (x, height)));
    }
    for y in (0..=height).step_by(GRID_STEP as usize) {
        report(errors, canvas.draw_line((0, y), (width, y)));
    }
}

/// Draws one character, preferring its sprite and falling back to a flat
/// square with a facing mark.
#[allow(clippy::too_many_arguments)]
fn draw_character(
    canvas: &mut Canvas<Window>,
    sprites: &SpriteStore,
    errors: &mut EventWriter<GameError>,
    kind: SpriteKind,
    position: Vec2,
    facing: Direction,
    motion: Motion,
    walk: &WalkAnimation,
    size: f32,
    fallback: Color,
) {
    let rect = body_rect(position, size);
    let walk_frame = match motion {
        Motion::Moving => Some(walk.frame),
        Motion::Idle => None,
    };
    let id = SpriteId::character(kind, facing, walk_frame);

    // A missing walk frame degrades to the idle pose before the flat shape.
    let texture = sprites.get(id).or_else(|| sprites.get(SpriteId::Idle { kind, facing }));
    if let Some(texture) = texture {
        report(errors, canvas.copy(texture, None, rect));
        return;
    }

    canvas.set_draw_color(fallback);
    report(errors, canvas.fill_rect(rect));

    let mark_center = position + facing.offset() * (size / 2.0 - 6.0);
    let mark = body_rect(mark_center, 10.0);
    canvas.set_draw_color(FACING_MARK);
    report(errors, canvas.fill_rect(mark));
}

/// The slash: a thick arc centered on the facing direction, fading as the
/// swing progresses.
fn draw_slash(
    canvas: &mut Canvas<Window>,
    position: Vec2,
    facing: Direction,
    progress: f32,
    errors: &mut EventWriter<GameError>,
) {
    let center = position + facing.offset() * SLASH_DISTANCE;
    let base = facing.angle_degrees();
    let start = (base - SLASH_HALF_SWEEP) as i16;
    let end = (base + SLASH_HALF_SWEEP) as i16;
    let alpha = (255.0 * (1.0 - progress * 0.6)) as u8;
    let color = Color::RGBA(240, 240, 240, alpha);

    // Concentric arcs approximate a stroked arc with thickness.
    let (cx, cy) = (center.x as i16, center.y as i16);
    for radius in (SLASH_RADIUS as i16 - 7)..=(SLASH_RADIUS as i16 + 6) {
        report(errors, canvas.arc(cx, cy, radius, start, end, color));
    }
}

fn draw_touch_overlay(
    canvas: &mut Canvas<Window>,
    touch: &TouchState,
    errors: &mut EventWriter<GameError>,
) {
    use crate::constants::{ATTACK_BUTTON_CENTER, ATTACK_BUTTON_RADIUS, JOYSTICK_RADIUS};

    if let Some(stick) = touch.joystick {
        let (ax, ay) = (stick.anchor.x as i16, stick.anchor.y as i16);
        report(
            errors,
            canvas.filled_circle(ax, ay, JOYSTICK_RADIUS as i16, Color::RGBA(255, 255, 255, 48)),
        );
        report(
            errors,
            canvas.circle(ax, ay, JOYSTICK_RADIUS as i16, Color::RGBA(255, 255, 255, 120)),
        );
        let knob = stick.anchor + touch.stick_offset();
        report(
            errors,
            canvas.filled_circle(knob.x as i16, knob.y as i16, 16, Color::RGBA(255, 255, 255, 160)),
        );
    }

    let (bx, by) = (ATTACK_BUTTON_CENTER.x as i16, ATTACK_BUTTON_CENTER.y as i16);
    report(
        errors,
        canvas.filled_circle(bx, by, ATTACK_BUTTON_RADIUS as i16, Color::RGBA(200, 60, 60, 96)),
    );
    report(
        errors,
        canvas.circle(bx, by, ATTACK_BUTTON_RADIUS as i16, Color::RGBA(255, 255, 255, 160)),
    );
    report(errors, canvas.string(bx - 4, by - 4, "A", Color::RGBA(255, 255, 255, 220)));
}

#[allow(clippy::type_complexity)]
pub fn render_system(
    mut canvas: NonSendMut<&'static mut Canvas<Window>>,
    sprites: NonSend<SpriteStore>,
    rules: Res<Ruleset>,
    touch: Res<TouchState>,
    players: Query<
        (
            &Position,
            &Facing,
            &Motion,
            &WalkAnimation,
            &BodySize,
            &AttackState,
            &Invulnerability,
        ),
        With<PlayerControlled>,
    >,
    enemies: Query<
        (&Position, &Facing, &Motion, &WalkAnimation, &BodySize, &HitFlash),
        (With<Enemy>, Without<PlayerControlled>),
    >,
    mut errors: EventWriter<GameError>,
) {
    let mut canvas: &mut Canvas<Window> = &mut **canvas;
    canvas.set_blend_mode(BlendMode::Blend);
    canvas.set_draw_color(Color::BLACK);
    canvas.clear();

    draw_background(&mut canvas, &sprites, &mut errors);

    for (position, facing, motion, walk, body, flash) in enemies.iter() {
        draw_character(
            &mut canvas,
            &sprites,
            &mut errors,
            SpriteKind::Enemy,
            position.0,
            facing.0,
            *motion,
            walk,
            body.0,
            ENEMY_FALLBACK,
        );
        if flash.is_active() {
            canvas.set_draw_color(Color::RGBA(255, 255, 255, 180));
            report(&mut errors, canvas.fill_rect(body_rect(position.0, body.0)));
        }
    }

    for (position, facing, motion, walk, body, attack, invulnerability) in players.iter() {
        if invulnerability.flicker_visible() {
            draw_character(
                &mut canvas,
                &sprites,
                &mut errors,
                SpriteKind::Player,
                position.0,
                facing.0,
                *motion,
                walk,
                body.0,
                PLAYER_FALLBACK,
            );
        }
        if attack.attacking {
            draw_slash(&mut canvas, position.0, facing.0, attack.progress(&rules), &mut errors);
        }
    }

    if rules.touch_controls {
        draw_touch_overlay(&mut canvas, &touch, &mut errors);
    }
}

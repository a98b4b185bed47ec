//! HUD overlay: torches, health bar, score, border, and the intro and
//! game-over panels.
//!
//! Like the world renderer, every element has a procedural fallback drawn
//! with line primitives and the built-in 8x8 font, so the HUD is complete
//! without any image assets.

use bevy_ecs::{
    event::EventWriter,
    query::With,
    resource::Resource,
    system::{NonSend, NonSendMut, Query, Res, ResMut},
};
use sdl2::gfx::primitives::DrawRenderer;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

use crate::constants::{CANVAS_SIZE, INTRO_FADE, TORCH_FRAME_DELAY};
use crate::error::GameError;
use crate::systems::components::{DeltaTime, Health, PlayerControlled, Score};
use crate::systems::render::report;
use crate::systems::stage::GameStage;
use crate::texture::sprite::{SpriteId, SpriteStore};

const GOLD: Color = Color::RGB(212, 175, 55);
const HEALTH_RED: Color = Color::RGB(200, 40, 40);
const PANEL_DARK: Color = Color::RGBA(0, 0, 0, 200);

const TORCH_FRAMES: u8 = 3;

fn health_bar_area() -> Rect {
    Rect::new(80, 105, 200, 20)
}

/// Flame cycle shared by the two HUD torches.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct TorchAnimation {
    pub frame: u8,
    pub timer: f32,
}

/// Draws `text` with the built-in 8x8 font, centered on `x`.
fn string_centered(
    canvas: &mut Canvas<Window>,
    x: i32,
    y: i32,
    text: &str,
    color: Color,
    errors: &mut EventWriter<GameError>,
) {
    let left = x - (text.len() as i32 * 8) / 2;
    report(errors, canvas.string(left as i16, y as i16, text, color));
}

fn draw_torches(
    canvas: &mut Canvas<Window>,
    sprites: &SpriteStore,
    frame: u8,
    errors: &mut EventWriter<GameError>,
) {
    // Torches are sprite-only; there is no procedural stand-in worth having.
    let Some(texture) = sprites.get(SpriteId::TorchFlame(frame)) else {
        return;
    };
    let width = CANVAS_SIZE.x as i32;
    for x in [30, width - 90] {
        report(errors, canvas.copy(texture, None, Rect::new(x, 10, 60, 80)));
    }
}

fn draw_health_bar(
    canvas: &mut Canvas<Window>,
    sprites: &SpriteStore,
    health: &Health,
    errors: &mut EventWriter<GameError>,
) {
    if let Some(texture) = sprites.get(SpriteId::HpLabel) {
        report(errors, canvas.copy(texture, None, Rect::new(20, 100, 40, 30)));
    } else {
        report(errors, canvas.string(25, 112, "HP", HEALTH_RED));
    }

    let bar = health_bar_area();
    let fraction = (health.displayed() / health.max).clamp(0.0, 1.0);
    let filled = (bar.width() as f32 * fraction) as u32;
    if filled > 0 {
        let dst = Rect::new(bar.x(), bar.y(), filled, bar.height());
        if let Some(texture) = sprites.get(SpriteId::HealthBarFill) {
            // Clip the source so the fill empties left to right instead of
            // squashing.
            let query = texture.query();
            let src = Rect::new(0, 0, ((query.width as f32) * fraction).max(1.0) as u32, query.height);
            report(errors, canvas.copy(texture, src, dst));
        } else {
            canvas.set_draw_color(HEALTH_RED);
            report(errors, canvas.fill_rect(dst));
        }
    }

    if let Some(texture) = sprites.get(SpriteId::HealthBarFrame) {
        report(errors, canvas.copy(texture, None, Rect::new(70, 100, 220, 30)));
    } else {
        canvas.set_draw_color(GOLD);
        report(errors, canvas.draw_rect(Rect::new(75, 102, 210, 26)));
    }

    let label = format!("{}/{}", health.displayed().ceil() as i32, health.max as i32);
    report(errors, canvas.string(300, 110, &label, Color::WHITE));
}

fn draw_score(
    canvas: &mut Canvas<Window>,
    sprites: &SpriteStore,
    score: u32,
    errors: &mut EventWriter<GameError>,
) {
    if let Some(texture) = sprites.get(SpriteId::ScoreLabel) {
        report(errors, canvas.copy(texture, None, Rect::new(20, 145, 80, 30)));
    } else {
        report(errors, canvas.string(25, 155, "SCORE", GOLD));
    }

    if let Some(texture) = sprites.get(SpriteId::ScoreFrame) {
        report(errors, canvas.copy(texture, None, Rect::new(110, 145, 150, 40)));
    } else {
        canvas.set_draw_color(GOLD);
        report(errors, canvas.draw_rect(Rect::new(110, 145, 150, 40)));
    }

    string_centered(canvas, 185, 160, &score.to_string(), Color::WHITE, errors);
}

fn draw_intro_panel(
    canvas: &mut Canvas<Window>,
    remaining: f32,
    errors: &mut EventWriter<GameError>,
) {
    // The panel fades out over the last second.
    let opacity = (remaining / INTRO_FADE).clamp(0.0, 1.0);
    let alpha = (PANEL_DARK.a as f32 * opacity) as u8;
    canvas.set_draw_color(Color::RGBA(0, 0, 0, alpha));
    report(errors, canvas.fill_rect(Rect::new(0, 0, CANVAS_SIZE.x as u32, CANVAS_SIZE.y as u32)));

    let cx = CANVAS_SIZE.x as i32 / 2;
    let text_alpha = (255.0 * opacity) as u8;
    string_centered(canvas, cx, 220, "QUESTFALL", Color::RGBA(212, 175, 55, text_alpha), errors);
    string_centered(
        canvas,
        cx,
        260,
        "A LONE KNIGHT AGAINST THE HORDE",
        Color::RGBA(255, 255, 255, text_alpha),
        errors,
    );
    string_centered(
        canvas,
        cx,
        320,
        "PRESS SPACE TO BEGIN",
        Color::RGBA(200, 200, 200, text_alpha),
        errors,
    );
}

fn draw_game_over_panel(
    canvas: &mut Canvas<Window>,
    sprites: &SpriteStore,
    score: u32,
    errors: &mut EventWriter<GameError>,
) {
    let cx = CANVAS_SIZE.x as i32 / 2;
    let cy = CANVAS_SIZE.y as i32 / 2;
    let panel = Rect::new(cx - 200, cy - 150, 400, 300);

    if let Some(texture) = sprites.get(SpriteId::GameOverFrame) {
        report(errors, canvas.copy(texture, None, panel));
    } else {
        canvas.set_draw_color(PANEL_DARK);
        report(errors, canvas.fill_rect(panel));
        canvas.set_draw_color(GOLD);
        report(errors, canvas.draw_rect(panel));
    }

    string_centered(canvas, cx, cy - 60, "GAME OVER", HEALTH_RED, errors);
    string_centered(canvas, cx, cy, &format!("FINAL SCORE {score}"), Color::WHITE, errors);
    string_centered(canvas, cx, cy + 60, "PRESS R TO RESTART", Color::RGB(200, 200, 200), errors);
}

#[allow(clippy::too_many_arguments)]
pub fn hud_render_system(
    mut canvas: NonSendMut<&'static mut Canvas<Window>>,
    sprites: NonSend<SpriteStore>,
    stage: Res<GameStage>,
    time: Res<DeltaTime>,
    score: Res<Score>,
    mut torch: ResMut<TorchAnimation>,
    players: Query<&Health, With<PlayerControlled>>,
    mut errors: EventWriter<GameError>,
) {
    let mut canvas: &mut Canvas<Window> = &mut **canvas;

    torch.timer += time.0;
    if torch.timer >= TORCH_FRAME_DELAY {
        torch.timer = 0.0;
        torch.frame = (torch.frame + 1) % TORCH_FRAMES;
    }

    draw_torches(&mut canvas, &sprites, torch.frame, &mut errors);
    if let Ok(health) = players.single() {
        draw_health_bar(&mut canvas, &sprites, health, &mut errors);
    }
    draw_score(&mut canvas, &sprites, score.0, &mut errors);

    if let Some(texture) = sprites.get(SpriteId::GameBorder) {
        report(&mut errors, canvas.copy(texture, None, None));
    }

    match *stage {
        GameStage::Intro { remaining } => draw_intro_panel(&mut canvas, remaining, &mut errors),
        GameStage::GameOver => draw_game_over_panel(&mut canvas, &sprites, score.0, &mut errors),
        GameStage::Playing => {}
    }
}

/// Flips the frame to the screen. Runs last.
pub fn present_system(mut canvas: NonSendMut<&'static mut Canvas<Window>>) {
    canvas.present();
}

//! SDL bootstrap and the fixed-rate frame loop.

use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use sdl2::image::{InitFlag, Sdl2ImageContext};
use sdl2::AudioSubsystem;

use crate::constants::{CANVAS_SIZE, LOOP_TIME};
use crate::game::Game;

pub struct App {
    game: Game,
    /// Wall-clock origin for the frame clock.
    start: Instant,
    last_tick: Instant,
    // Held so SDL_image and the audio subsystem stay initialized for the
    // life of the app.
    _image_context: Sdl2ImageContext,
    _audio_subsystem: AudioSubsystem,
}

impl App {
    /// Initializes SDL, the window, and the game world.
    ///
    /// The canvas, texture creator, and event pump are SDL-thread-bound and
    /// must outlive the world that borrows them, so they are leaked once
    /// here and live for the rest of the process.
    pub fn new() -> Result<App> {
        let sdl_context = sdl2::init().map_err(|e| anyhow!(e)).context("SDL init failed")?;
        let video_subsystem = sdl_context.video().map_err(|e| anyhow!(e))?;
        let image_context = sdl2::image::init(InitFlag::PNG).map_err(|e| anyhow!(e))?;
        let audio_subsystem = sdl_context.audio().map_err(|e| anyhow!(e))?;

        let window = video_subsystem
            .window("Questfall", CANVAS_SIZE.x as u32, CANVAS_SIZE.y as u32)
            .position_centered()
            .resizable()
            .build()
            .context("Window creation failed")?;

        let mut canvas = window.into_canvas().accelerated().build().context("Canvas creation failed")?;
        canvas
            .set_logical_size(CANVAS_SIZE.x as u32, CANVAS_SIZE.y as u32)
            .context("Could not set logical size")?;

        let canvas = Box::leak(Box::new(canvas));
        let texture_creator = Box::leak(Box::new(canvas.texture_creator()));
        let event_pump = Box::leak(Box::new(sdl_context.event_pump().map_err(|e| anyhow!(e))?));

        let game = Game::new(canvas, texture_creator, event_pump)?;
        let now = Instant::now();
        Ok(App {
            game,
            start: now,
            last_tick: now,
            _image_context: image_context,
            _audio_subsystem: audio_subsystem,
        })
    }

    /// Runs one frame, then sleeps off the remainder of the frame budget.
    /// Returns `false` once the game requests exit.
    pub fn run(&mut self) -> bool {
        let frame_start = Instant::now();
        let delta = frame_start.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = frame_start;
        let clock = frame_start.duration_since(self.start).as_secs_f64();

        let exit = self.game.tick(delta, clock);

        let elapsed = frame_start.elapsed();
        if let Some(remaining) = LOOP_TIME.checked_sub(elapsed) {
            spin_sleep::sleep(remaining);
        } else {
            tracing::trace!(?elapsed, "Frame over budget");
        }

        !exit
    }
}

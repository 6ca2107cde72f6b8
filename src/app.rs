//! Game orchestrator
//!
//! `App` owns the simulation and everything around it: input edge detection,
//! the random source, the audio sink and the best-score store. The host only
//! forwards device events, calls `update` once per frame and hands a surface
//! to `render`.

use crate::audio::{AudioSink, Mixer, SoundCue};
use crate::config::GameConfig;
use crate::highscores::BestScore;
use crate::persistence::ScoreStore;
use crate::platform::{Frame, InputSource};
use crate::renderer::{Surface, draw_scene};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, RandomSource, SeededRandom, TickInput, Viewport, tick};

pub struct App {
    state: GameState,
    input: InputSource,
    rng: Box<dyn RandomSource>,
    audio: Box<dyn AudioSink>,
    best: BestScore,
    settings: Settings,
}

impl App {
    pub fn new(
        mut config: GameConfig,
        viewport: Viewport,
        seed: u64,
        mut audio: Box<dyn AudioSink>,
        store: Box<dyn ScoreStore>,
        settings: Settings,
    ) -> Self {
        if settings.reduced_motion {
            config.menu.hover_amplitude = 0.0;
        }
        warn_if_short(&config, viewport);

        audio.set_mixer(Mixer::from_settings(&settings));
        let best = BestScore::load(store);
        let state = GameState::new(config, viewport, best.get());
        log::info!(
            "Game created: {}x{} seed {}",
            viewport.width,
            viewport.height,
            seed
        );

        Self {
            state,
            input: InputSource::default(),
            rng: Box::new(SeededRandom::new(seed)),
            audio,
            best,
            settings,
        }
    }

    /// Swap the random source (scripted runs)
    pub fn with_random(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn best_score(&self) -> u32 {
        self.best.get()
    }

    /// Device events go here
    pub fn input_mut(&mut self) -> &mut InputSource {
        &mut self.input
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        log::debug!("Viewport resized to {}x{}", width, height);
        let viewport = Viewport::new(width, height);
        warn_if_short(&self.state.config, viewport);
        self.state.resize(viewport);
    }

    /// Replace the player's preferences, push the new volume to the audio
    /// backend and persist them
    pub fn apply_settings(&mut self, settings: Settings) {
        self.audio.set_mixer(Mixer::from_settings(&settings));
        settings.save();
        self.settings = settings;
    }

    pub fn toggle_mute(&mut self) {
        let settings = Settings {
            muted: !self.settings.muted,
            ..self.settings.clone()
        };
        log::info!("Sound {}", if settings.muted { "off" } else { "on" });
        self.apply_settings(settings);
    }

    /// Forward a user gesture to the audio backend
    pub fn unlock_audio(&mut self) {
        self.audio.resume();
    }

    /// Advance one frame
    pub fn update(&mut self, dt: f32) {
        let dt = dt.clamp(0.0, self.state.config.max_frame_dt);
        let input = TickInput {
            activate: self.input.poll_activate_pulse(),
        };

        tick(&mut self.state, &input, dt, self.rng.as_mut());
        self.input.commit();

        for event in self.state.drain_events() {
            match event {
                GameEvent::Flap => self.audio.play(SoundCue::Jump),
                GameEvent::Score { .. } => self.audio.play(SoundCue::Score),
                GameEvent::Crash { score, new_best } => {
                    self.audio.play(SoundCue::Crash);
                    if new_best {
                        self.best.record(score);
                    }
                }
            }
        }
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        draw_scene(surface, &self.state, &self.settings);
    }
}

/// Obstacles pin to their minimum height below this
fn warn_if_short(config: &GameConfig, viewport: Viewport) {
    let min = config.min_play_height();
    if viewport.height < min {
        log::warn!(
            "Play area {} is shorter than {}; obstacle heights are clamped",
            viewport.height,
            min
        );
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("mode", &self.state.mode)
            .field("score", &self.state.score)
            .field("best", &self.best)
            .finish()
    }
}

/// Headless frame target: the app plus a recording surface
pub struct HeadlessFrame<'a> {
    pub app: &'a mut App,
    pub surface: &'a mut crate::renderer::RecordingSurface,
}

impl Frame for HeadlessFrame<'_> {
    fn update(&mut self, dt: f32) {
        self.app.update(dt);
    }

    fn render(&mut self) {
        self.surface.reset();
        self.app.render(&mut *self.surface);
    }
}

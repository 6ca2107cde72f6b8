//! Scene composition: background, obstacles, flyer, particles, overlay

use glam::Vec2;

use super::{Surface, TextStyle, Transform, with_transform};
use crate::color::Color;
use crate::settings::Settings;
use crate::sim::{Flyer, GameMode, GameState, ObstaclePair, ParticlePool};

const SKY_TOP: Color = Color::hex(0x87CEEB);
const SKY_BOTTOM: Color = Color::hex(0xE0F7FA);
/// Horizontal bands used to fake the vertical sky gradient
const SKY_BANDS: usize = 16;

const PIPE: Color = Color::hex(0x75DA8B);
const PIPE_CAP: Color = Color::hex(0x5AC572);
const CAP_HEIGHT: f32 = 20.0;
/// Cap overhang on each side of the pipe
const CAP_LIP: f32 = 2.0;

const BIRD_BODY: Color = Color::GOLD;
const BIRD_BEAK: Color = Color::hex(0xFF4500);

/// Draw one frame of `state`
pub fn draw_scene<S: Surface + ?Sized>(surface: &mut S, state: &GameState, settings: &Settings) {
    let size = surface.size();
    surface.clear();

    draw_sky(surface, size);
    for pair in state.obstacles.pairs() {
        draw_pipe(surface, pair, size.y);
    }
    draw_flyer(surface, &state.flyer);
    if settings.particles {
        draw_particles(surface, &state.particles);
    }
    draw_overlay(surface, state, size);
}

fn draw_sky<S: Surface + ?Sized>(surface: &mut S, size: Vec2) {
    let band = size.y / SKY_BANDS as f32;
    for i in 0..SKY_BANDS {
        let t = i as f32 / (SKY_BANDS - 1) as f32;
        // Overlap by one unit to avoid seams between bands
        surface.fill_rect(
            Vec2::new(0.0, i as f32 * band),
            Vec2::new(size.x, band + 1.0),
            SKY_TOP.mix(SKY_BOTTOM, t),
        );
    }
}

fn draw_pipe<S: Surface + ?Sized>(surface: &mut S, pair: &ObstaclePair, floor: f32) {
    let cap_width = pair.width + 2.0 * CAP_LIP;

    // Top section with its cap hanging at the gap
    surface.fill_rect(Vec2::new(pair.x, 0.0), Vec2::new(pair.width, pair.top_height), PIPE);
    surface.fill_rect(
        Vec2::new(pair.x - CAP_LIP, pair.top_height - CAP_HEIGHT),
        Vec2::new(cap_width, CAP_HEIGHT),
        PIPE_CAP,
    );

    // Bottom section down to the floor
    surface.fill_rect(
        Vec2::new(pair.x, pair.bottom_y),
        Vec2::new(pair.width, (floor - pair.bottom_y).max(0.0)),
        PIPE,
    );
    surface.fill_rect(
        Vec2::new(pair.x - CAP_LIP, pair.bottom_y),
        Vec2::new(cap_width, CAP_HEIGHT),
        PIPE_CAP,
    );
}

/// Flyer in its own frame: origin at the body center, +x toward the beak
fn draw_flyer<S: Surface + ?Sized>(surface: &mut S, flyer: &Flyer) {
    let radius = flyer.radius;
    with_transform(surface, Transform::new(flyer.pos, flyer.rotation), |s| {
        s.fill_circle(Vec2::ZERO, radius, BIRD_BODY);
        // Eye and pupil
        s.fill_circle(Vec2::new(8.0, -8.0), 8.0, Color::WHITE);
        s.fill_circle(Vec2::new(10.0, -8.0), 3.0, Color::BLACK);
        // Wing
        s.fill_ellipse(Vec2::new(-5.0, 5.0), Vec2::new(12.0, 8.0), Color::WHITE);
        // Beak
        s.fill_polygon(
            &[Vec2::new(10.0, 0.0), Vec2::new(25.0, 5.0), Vec2::new(10.0, 10.0)],
            BIRD_BEAK,
        );
    });
}

fn draw_particles<S: Surface + ?Sized>(surface: &mut S, particles: &ParticlePool) {
    for p in particles.iter() {
        surface.fill_circle(p.pos, p.size, p.color.with_alpha(p.life));
    }
}

fn draw_overlay<S: Surface + ?Sized>(surface: &mut S, state: &GameState, size: Vec2) {
    let center_x = size.x / 2.0;
    let title = TextStyle::new(40.0).bold().outlined(Color::BLACK, 3.0);

    match state.mode {
        GameMode::Menu => {
            dim(surface, size, 0.3);
            surface.text("FLAPPY BIRD", Vec2::new(center_x, size.y / 3.0), &title);
            surface.text(
                "Tap / Space to Flap",
                Vec2::new(center_x, size.y / 2.0),
                &TextStyle::new(20.0),
            );
        }
        GameMode::Playing => {
            let style = TextStyle::new(50.0).bold().outlined(Color::BLACK, 3.0);
            surface.text(&state.score.to_string(), Vec2::new(center_x, 80.0), &style);
        }
        GameMode::GameOver => {
            dim(surface, size, 0.5);
            surface.text("GAME OVER", Vec2::new(center_x, size.y / 3.0), &title);

            let body = TextStyle::new(30.0);
            let mid = size.y / 2.0;
            surface.text(
                &format!("Score: {}", state.score),
                Vec2::new(center_x, mid),
                &body,
            );
            surface.text(
                &format!("Best: {}", state.best_score),
                Vec2::new(center_x, mid + 50.0),
                &body,
            );
            surface.text(
                "Tap to Retry",
                Vec2::new(center_x, mid + 120.0),
                &TextStyle::new(20.0),
            );
        }
    }
}

fn dim<S: Surface + ?Sized>(surface: &mut S, size: Vec2, alpha: f32) {
    surface.fill_rect(Vec2::ZERO, size, Color::BLACK.with_alpha(alpha));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::renderer::{DrawCommand, RecordingSurface};
    use crate::sim::{ScriptedRandom, Viewport, die, start_game};

    fn setup() -> (GameState, RecordingSurface) {
        let state = GameState::new(GameConfig::default(), Viewport::new(800.0, 600.0), 3);
        let surface = RecordingSurface::new(Vec2::new(800.0, 600.0));
        (state, surface)
    }

    #[test]
    fn test_menu_overlay() {
        let (state, mut surface) = setup();
        draw_scene(&mut surface, &state, &Settings::default());

        assert_eq!(surface.commands()[0], DrawCommand::Clear);
        assert_eq!(surface.texts(), vec!["FLAPPY BIRD", "Tap / Space to Flap"]);
        assert_eq!(surface.depth(), 0);
    }

    #[test]
    fn test_playing_shows_score_and_pipes() {
        let (mut state, mut surface) = setup();
        start_game(&mut state);
        state.score = 4;
        state
            .obstacles
            .insert(ObstaclePair::new(300.0, 100.0, 180.0, 60.0));
        draw_scene(&mut surface, &state, &Settings::default());

        assert_eq!(surface.texts(), vec!["4"]);
        let bottom = surface.commands().iter().any(|c| {
            matches!(c, DrawCommand::Rect { pos, size, color }
                if *pos == Vec2::new(300.0, 280.0) && *size == Vec2::new(60.0, 320.0) && *color == PIPE)
        });
        assert!(bottom, "bottom section reaches the floor");
    }

    #[test]
    fn test_game_over_overlay() {
        let (mut state, mut surface) = setup();
        start_game(&mut state);
        state.score = 7;
        die(&mut state);
        draw_scene(&mut surface, &state, &Settings::default());

        assert_eq!(
            surface.texts(),
            vec!["GAME OVER", "Score: 7", "Best: 7", "Tap to Retry"]
        );
    }

    #[test]
    fn test_flyer_drawn_in_local_frame() {
        let (mut state, mut surface) = setup();
        state.flyer.rotation = 0.5;
        draw_scene(&mut surface, &state, &Settings::default());

        let push = surface
            .commands()
            .iter()
            .position(|c| matches!(c, DrawCommand::PushTransform(t) if t.rotate == 0.5))
            .expect("flyer transform");
        assert!(matches!(
            surface.commands()[push + 1],
            DrawCommand::Circle { center, radius, .. } if center == Vec2::ZERO && radius == 20.0
        ));
    }

    #[test]
    fn test_particles_fade_and_can_be_hidden() {
        let (mut state, mut surface) = setup();
        let mut rng = ScriptedRandom::constant(0.5);
        state
            .particles
            .emit(Vec2::new(50.0, 50.0), 2, Color::GOLD, &mut rng);
        state.particles.update(0.125);

        draw_scene(&mut surface, &state, &Settings::default());
        let faded = surface
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { color, .. } if *color == Color::GOLD.with_alpha(0.75)))
            .count();
        assert_eq!(faded, 2);

        surface.reset();
        let hidden = Settings {
            particles: false,
            ..Settings::default()
        };
        draw_scene(&mut surface, &state, &hidden);
        assert!(!surface.commands().iter().any(
            |c| matches!(c, DrawCommand::Circle { color, .. } if color.a < 1.0)
        ));
    }
}

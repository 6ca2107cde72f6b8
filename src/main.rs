//! Flappy entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, EventTarget, Gamepad, GamepadButton, HtmlCanvasElement, KeyboardEvent,
        VisibilityState, Window,
    };

    use flappy::audio::{Mixer, WebAudio};
    use flappy::persistence::LocalStorageStore;
    use flappy::platform::{Frame, GameLoop, PlatformError};
    use flappy::renderer::{CanvasSurface, Surface};
    use flappy::sim::Viewport;
    use flappy::{App, GameConfig, Settings};

    const CANVAS_ID: &str = "canvas";
    /// Toggles sound; not a flap key
    const MUTE_KEY: &str = "KeyM";

    /// What one animation frame drives
    struct Runner {
        app: App,
        surface: CanvasSurface,
    }

    impl Frame for Runner {
        fn update(&mut self, dt: f32) {
            self.app.update(dt);
        }

        fn render(&mut self) {
            self.app.render(&mut self.surface);
        }
    }

    /// Game instance shared by every browser callback
    struct Game {
        runner: Runner,
        game_loop: GameLoop,
        /// Pending requestAnimationFrame handle
        raf_id: Option<i32>,
    }

    type Shared = Rc<RefCell<Game>>;

    pub fn run() -> Result<(), PlatformError> {
        log::info!("Flappy starting...");

        let window = web_sys::window().ok_or(PlatformError::NoWindow)?;
        let document = window.document().ok_or(PlatformError::NoDocument)?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| PlatformError::NoCanvas(CANVAS_ID.to_string()))?
            .dyn_into()
            .map_err(|_| PlatformError::NoCanvas(CANVAS_ID.to_string()))?;

        let surface = CanvasSurface::from_canvas(canvas)?;
        let size = surface.size();

        let settings = Settings::load();
        let audio = WebAudio::new(Mixer::from_settings(&settings));
        let seed = js_sys::Date::now() as u64;
        let app = App::new(
            GameConfig::default(),
            Viewport::new(size.x, size.y),
            seed,
            Box::new(audio),
            Box::new(LocalStorageStore::default()),
            settings,
        );
        log::info!("Game initialized with seed: {}", seed);

        let game: Shared = Rc::new(RefCell::new(Game {
            runner: Runner { app, surface },
            game_loop: GameLoop::default(),
            raf_id: None,
        }));

        setup_input_handlers(&window, &game)?;
        setup_resize(&window, &game)?;
        setup_visibility(&window, &document, &game)?;

        start_loop(&window, &game);
        log::info!("Flappy running!");
        Ok(())
    }

    /// Register a listener for the lifetime of the page
    fn listen<F>(target: &EventTarget, kind: &str, handler: F) -> Result<(), PlatformError>
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_input_handlers(window: &Window, game: &Shared) -> Result<(), PlatformError> {
        let canvas = game.borrow().runner.surface.canvas().clone();

        // Keyboard (bound keys are swallowed so Space does not scroll)
        {
            let game = game.clone();
            listen(window, "keydown", move |event| {
                let Some(key) = event.dyn_ref::<KeyboardEvent>() else { return };
                let code = key.code();
                let mut g = game.borrow_mut();
                g.runner.app.unlock_audio();
                if code == MUTE_KEY {
                    if !key.repeat() {
                        g.runner.app.toggle_mute();
                    }
                    event.prevent_default();
                } else if g.runner.app.input_mut().key_down(&code) {
                    event.prevent_default();
                }
            })?;
        }
        {
            let game = game.clone();
            listen(window, "keyup", move |event| {
                let Some(key) = event.dyn_ref::<KeyboardEvent>() else { return };
                if game.borrow_mut().runner.app.input_mut().key_up(&key.code()) {
                    event.prevent_default();
                }
            })?;
        }

        // Mouse: press on the canvas, release anywhere
        {
            let game = game.clone();
            listen(&canvas, "mousedown", move |_event| {
                let mut g = game.borrow_mut();
                g.runner.app.unlock_audio();
                g.runner.app.input_mut().pointer_down();
            })?;
        }
        {
            let game = game.clone();
            listen(window, "mouseup", move |_event| {
                game.borrow_mut().runner.app.input_mut().pointer_up();
            })?;
        }

        // Touch shares the pointer level; default prevented to stop the
        // synthetic mouse events and double-tap zoom
        {
            let game = game.clone();
            listen(&canvas, "touchstart", move |event| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.runner.app.unlock_audio();
                g.runner.app.input_mut().pointer_down();
            })?;
        }
        for kind in ["touchend", "touchcancel"] {
            let game = game.clone();
            listen(&canvas, kind, move |event| {
                event.prevent_default();
                game.borrow_mut().runner.app.input_mut().pointer_up();
            })?;
        }

        Ok(())
    }

    fn setup_resize(window: &Window, game: &Shared) -> Result<(), PlatformError> {
        let game = game.clone();
        listen(window, "resize", move |_event| {
            let mut g = game.borrow_mut();
            let size = g.runner.surface.fit_to_client();
            g.runner.app.resize(size.x, size.y);
        })
    }

    /// Stop the loop while the tab is hidden so the first frame back is not
    /// one huge step
    fn setup_visibility(window: &Window, document: &Document, game: &Shared) -> Result<(), PlatformError> {
        let game = game.clone();
        let window = window.clone();
        let doc = document.clone();
        listen(document, "visibilitychange", move |_event| {
            if doc.visibility_state() == VisibilityState::Hidden {
                stop_loop(&window, &game);
                log::info!("Paused (tab hidden)");
            } else {
                start_loop(&window, &game);
                log::info!("Resumed");
            }
        })
    }

    fn now_ms(window: &Window) -> f64 {
        window
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn start_loop(window: &Window, game: &Shared) {
        let started = game.borrow_mut().game_loop.start(now_ms(window));
        if started {
            request_animation_frame(window, game);
        }
    }

    fn stop_loop(window: &Window, game: &Shared) {
        let mut g = game.borrow_mut();
        g.game_loop.stop();
        if let Some(id) = g.raf_id.take() {
            let _ = window.cancel_animation_frame(id);
        }
    }

    fn request_animation_frame(window: &Window, game: &Shared) {
        let token = game.borrow().game_loop.token();
        let frame_game = game.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(frame_game, token, time);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => game.borrow_mut().raf_id = Some(id),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(game: Shared, token: u64, time: f64) {
        let Some(window) = web_sys::window() else { return };
        {
            let mut g = game.borrow_mut();
            g.raf_id = None;

            let pressed = gamepad_pressed(&window);
            g.runner.app.input_mut().sample_gamepad(pressed);

            let Game {
                runner, game_loop, ..
            } = &mut *g;
            if !game_loop.run_frame(token, time, runner) {
                // Stale callback from before a stop/restart
                return;
            }
        }

        request_animation_frame(&window, &game);
    }

    /// Button 0 of the first connected gamepad
    fn gamepad_pressed(window: &Window) -> bool {
        let Ok(pads) = window.navigator().get_gamepads() else {
            return false;
        };
        pads.iter()
            .find_map(|pad| pad.dyn_into::<Gamepad>().ok())
            .and_then(|pad| pad.buttons().get(0).dyn_into::<GamepadButton>().ok())
            .is_some_and(|button| button.pressed())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

    wasm_game::run().map_err(|e| {
        log::error!("Startup failed: {}", e);
        JsValue::from_str(&e.to_string())
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flappy (native) starting...");
    log::info!("The playable build targets the browser - run with `trunk serve` for the web version");

    let config = match std::env::args().nth(1) {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Bad config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => flappy::GameConfig::default(),
    };

    let score = headless::autopilot(config, 60.0);
    println!("Autopilot scored {}", score);
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config(path: &str) -> Result<flappy::GameConfig, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(flappy::GameConfig::from_json(&json)?)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted run without a window: fixed 60 Hz frames, a simple flap policy
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use flappy::app::HeadlessFrame;
    use flappy::audio::SilentAudio;
    use flappy::consts::TARGET_HZ;
    use flappy::persistence::MemoryStore;
    use flappy::platform::GameLoop;
    use flappy::renderer::RecordingSurface;
    use flappy::sim::{GameMode, GameState, Viewport};
    use flappy::{App, GameConfig, Settings, Vec2};

    const WIDTH: f32 = 800.0;
    const HEIGHT: f32 = 600.0;

    /// Play until the first crash or `seconds` of game time; returns the score
    pub fn autopilot(config: GameConfig, seconds: f32) -> u32 {
        let mut app = App::new(
            config,
            Viewport::new(WIDTH, HEIGHT),
            0xF1A9,
            Box::new(SilentAudio),
            Box::new(MemoryStore::new()),
            Settings::default(),
        );
        let mut surface = RecordingSurface::new(Vec2::new(WIDTH, HEIGHT));
        let mut game_loop = GameLoop::default();

        let frame_ms = 1000.0 / TARGET_HZ as f64;
        let mut now = 0.0;
        game_loop.start(now);
        let token = game_loop.token();

        let frames = (seconds * TARGET_HZ) as u32;
        for _ in 0..frames {
            // Release every frame so the next press is a fresh edge
            app.input_mut().pointer_up();
            if wants_flap(app.state()) {
                app.input_mut().pointer_down();
            }

            now += frame_ms;
            let mut frame = HeadlessFrame {
                app: &mut app,
                surface: &mut surface,
            };
            game_loop.run_frame(token, now, &mut frame);

            if app.state().mode == GameMode::GameOver {
                break;
            }
        }

        log::info!(
            "Autopilot finished: score {} after {} draw calls in the last frame",
            app.state().score,
            surface.commands().len()
        );
        app.state().score
    }

    /// Flap when falling below the next gap's center
    fn wants_flap(state: &GameState) -> bool {
        match state.mode {
            GameMode::Menu => true,
            GameMode::GameOver => false,
            GameMode::Playing => {
                let flyer = &state.flyer;
                let target = state
                    .obstacles
                    .pairs()
                    .iter()
                    .find(|p| p.right() > flyer.pos.x - flyer.radius)
                    .map(|p| p.gap_center().y + p.gap() * 0.2)
                    .unwrap_or(state.viewport.height / 2.0);
                flyer.vel.y > 0.0 && flyer.pos.y > target
            }
        }
    }
}

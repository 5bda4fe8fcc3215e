//! Fruit Tree entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};

    use fruit_tree::audio::AudioManager;
    use fruit_tree::consts::*;
    use fruit_tree::renderer::{CanvasRenderer, DisplayList, build_frame};
    use fruit_tree::sim::{SceneState, Viewport, tick};
    use fruit_tree::Settings;

    /// Game instance holding all state
    struct Game {
        scene: SceneState,
        renderer: CanvasRenderer,
        audio: AudioManager,
        frame: DisplayList,
        accumulator: f64,
        last_time: f64,
        /// Simulation clock (seconds). Drives sway and the regrow timer; it
        /// lags wall-clock time when frames exceed `MAX_SUBSTEPS` steps.
        sim_time: f64,
        audio_unlocked: bool,
    }

    impl Game {
        /// Run simulation ticks
        fn update(&mut self, dt: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.sim_time += SIM_DT;
                tick(&mut self.scene, self.sim_time);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            self.play_events();
        }

        /// Forward scene events to the audio system
        fn play_events(&mut self) {
            for event in self.scene.drain_events() {
                if let Some(cue) = event.sound_cue() {
                    self.audio.play(cue);
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            build_frame(&self.scene, &mut self.frame);
            self.renderer.render(&self.frame);
        }

        fn pointer_down(&mut self, x: f32, y: f32) {
            if !self.audio_unlocked {
                self.audio.resume();
                self.audio_unlocked = true;
            }
            self.scene.pointer_down(Vec2::new(x, y));
            self.play_events();
        }
    }

    /// Size the canvas backing store to the CSS size times DPR
    fn fit_canvas(canvas: &HtmlCanvasElement) -> (Viewport, f64) {
        let window = web_sys::window().expect("no window");
        let dpr = window.device_pixel_ratio();
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        canvas.set_width((w * dpr) as u32);
        canvas.set_height((h * dpr) as u32);
        (Viewport::new(w as f32, h as f32), dpr)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Fruit Tree starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let settings = Settings::load();
        let mut tuning = settings.tuning.clone();
        if !settings.particles {
            tuning.particles_per_tap = 0;
        }

        let (viewport, dpr) = fit_canvas(&canvas);
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let scene = SceneState::new(viewport, settings.fruit_count, tuning, seed);
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            scene,
            renderer: CanvasRenderer::new(ctx, dpr),
            audio: AudioManager::new(settings.effective_volume()),
            frame: DisplayList::new(),
            accumulator: 0.0,
            last_time: 0.0,
            sim_time: 0.0,
            audio_unlocked: false,
        }));

        setup_input_handlers(&canvas, game.clone());
        setup_resize_handler(&canvas, game.clone());
        setup_reset_button(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Fruit Tree running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse / pen
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .pointer_down(event.offset_x() as f32, event.offset_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch: every new finger is its own tap
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                // Also suppresses the emulated mousedown
                event.prevent_default();
                let rect = canvas_clone.get_bounding_client_rect();
                let touches = event.changed_touches();
                let mut g = game.borrow_mut();
                for i in 0..touches.length() {
                    if let Some(touch) = touches.get(i) {
                        let x = touch.client_x() as f32 - rect.left() as f32;
                        let y = touch.client_y() as f32 - rect.top() as f32;
                        g.pointer_down(x, y);
                    }
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (viewport, dpr) = fit_canvas(&canvas);
            let mut g = game.borrow_mut();
            g.renderer.scale = dpr;
            g.scene.resize(viewport);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_reset_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("reset-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().scene.reset();
                log::info!("Tree reset by button");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                (time - g.last_time) / 1000.0
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Fruit Tree (native) starting...");
    log::info!("Native mode runs a headless demo - use `trunk serve` for the web version");

    let config_path = std::env::args().nth(1);
    let settings = fruit_tree::Settings::load_or_default(config_path.as_deref());
    headless_demo(&settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Knock every fruit down, let them settle, and wait out the regrow timer
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo(settings: &fruit_tree::Settings) {
    use fruit_tree::audio::AudioManager;
    use fruit_tree::consts::SIM_DT;
    use fruit_tree::renderer::{DisplayList, build_frame};
    use fruit_tree::sim::{SceneEvent, SceneState, Viewport, tick};

    let seed = settings.seed.unwrap_or(0x5eed);
    let mut scene = SceneState::new(
        Viewport::new(800.0, 600.0),
        settings.fruit_count,
        settings.tuning.clone(),
        seed,
    );
    let audio = AudioManager::new(settings.effective_volume());
    let mut frame = DisplayList::new();
    // Only count regrowth after the first batch
    scene.events.clear();

    let targets: Vec<_> = scene.fruits.iter().map(|f| f.pos).collect();
    for target in targets {
        scene.pointer_down(target);
    }

    let mut now = 0.0;
    let mut bounces = 0;
    let mut regrown = false;
    // Regrow delay plus a little slack for the fall
    let max_ticks = ((settings.tuning.reset_delay + 2.0) / SIM_DT) as usize;
    for _ in 0..max_ticks {
        now += SIM_DT;
        tick(&mut scene, now);
        for event in scene.drain_events() {
            match event {
                SceneEvent::Bounce { .. } => bounces += 1,
                SceneEvent::Reset { kind, count } => {
                    log::info!("Regrew {} {:?} at t={:.2}s", count, kind, now);
                    regrown = true;
                }
                _ => {}
            }
            if let Some(cue) = event.sound_cue() {
                audio.play(cue);
            }
        }
        if regrown {
            break;
        }
    }

    build_frame(&scene, &mut frame);
    log::info!(
        "Demo finished: {} audible bounces, regrown={}, {} draw commands in last frame",
        bounces,
        regrown,
        frame.len()
    );
}

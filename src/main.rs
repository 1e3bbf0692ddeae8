//! Kart Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

    use kart_dash::audio::AudioManager;
    use kart_dash::consts::*;
    use kart_dash::platform::{AcceleratePulse, TouchSteer, control_for_key};
    use kart_dash::renderer::{RenderState, build_scene};
    use kart_dash::sim::{GamePhase, GameState, Hud, TickInput, tick};
    use kart_dash::{Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        render_state: Option<RenderState>,
        audio: AudioManager,
        accumulator: f32,
        last_time: f64,
        start_time: f64,
        input: TickInput,
        touch: TouchSteer,
        pulse: AcceleratePulse,
        /// Last HUD pushed to the DOM
        shown_hud: Option<Hud>,
    }

    impl Game {
        fn new(tuning: Tuning, settings: Settings, seed: u64) -> Self {
            let mut state = GameState::with_tuning(tuning, seed);
            state.music_enabled = settings.music_enabled;
            let audio = AudioManager::new(&settings, seed);
            Self {
                state,
                settings,
                render_state: None,
                audio,
                accumulator: 0.0,
                last_time: 0.0,
                start_time: js_sys::Date::now(),
                input: TickInput::default(),
                touch: TouchSteer::default(),
                pulse: AcceleratePulse::default(),
                shown_hud: None,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, now: f64) {
            self.pulse.update(now, &mut self.input.controls);

            let dt = dt.min(MAX_FRAME_DT);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.start = false;
                self.input.pause = false;
                self.input.restart = false;
                self.input.toggle_music = false;

                if input.restart {
                    self.accumulator = 0.0;
                }
            }

            for event in self.state.drain_events() {
                self.audio.handle(event);
            }
        }

        /// Render the current frame
        fn render(&mut self, now: f64) {
            let elapsed = ((now - self.start_time) / 1000.0) as f32;
            if let Some(ref mut render_state) = self.render_state {
                let vertices = build_scene(&self.state, &self.settings, elapsed);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, document: &Document) {
            let hud = self.state.hud();
            if self.shown_hud.as_ref() == Some(&hud) {
                return;
            }

            set_text(document, "score", &hud.score.to_string());
            set_text(document, "speed", &hud.speed.to_string());
            set_text(document, "distance", &hud.distance.to_string());
            set_text(document, "pauseBtn", if hud.paused { "Resume" } else { "Pause" });
            set_text(
                document,
                "musicBtn",
                if hud.music_enabled { "Music: On" } else { "Music: Off" },
            );

            if let Some(final_score) = hud.final_score {
                set_text(document, "finalScore", &final_score.to_string());
            }
            set_display(document, "gameOver", hud.game_over);

            self.shown_hud = Some(hud);
        }

        /// Release every held control
        fn release_controls(&mut self) {
            self.input.controls.clear();
            self.touch = TouchSteer::default();
            self.pulse = AcceleratePulse::default();
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_display(document: &Document, id: &str, visible: bool) {
        let Some(el) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        let _ = el
            .style()
            .set_property("display", if visible { "block" } else { "none" });
    }

    /// Text of an optional inline JSON `<script>` element
    fn inline_json(document: &Document, id: &str) -> Option<String> {
        document
            .get_element_by_id(id)?
            .text_content()
            .filter(|s| !s.trim().is_empty())
    }

    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = inline_json(document, "tuning") else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning overrides: {}", e);
                Tuning::default()
            }
        }
    }

    fn load_settings(document: &Document) -> Settings {
        inline_json(document, "settings")
            .and_then(|json| match serde_json::from_str(&json) {
                Ok(settings) => Some(settings),
                Err(e) => {
                    log::warn!("Ignoring settings overrides: {}", e);
                    None
                }
            })
            .unwrap_or_default()
    }

    fn js_err(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_err)?;

        log::info!("Kart Dash starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no gameCanvas element")?
            .dyn_into()?;

        let tuning = load_tuning(&document);
        let settings = load_settings(&document);
        let canvas_size = (tuning.canvas_width, tuning.canvas_height);

        // Backing store at device resolution, scene in logical pixels
        let dpr = window.device_pixel_ratio();
        let width = (tuning.canvas_width as f64 * dpr) as u32;
        let height = (tuning.canvas_height as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(tuning, settings, seed)));

        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(js_err)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(js_err)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, canvas_size)
            .await
            .map_err(js_err)?;
        game.borrow_mut().render_state = Some(render_state);

        setup_buttons(&document, game.clone());
        setup_keyboard(&window, game.clone());
        setup_touch(&canvas, game.clone());
        setup_auto_pause(&window, game.clone());

        request_animation_frame(game);

        log::info!("Kart Dash running!");
        Ok(())
    }

    fn on_click(document: &Document, id: &str, game: Rc<RefCell<Game>>, action: fn(&mut Game)) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Missing button #{}", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let mut g = game.borrow_mut();
            // Browsers only allow audio after a user gesture
            g.audio.resume();
            action(&mut g);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        on_click(document, "startBtn", game.clone(), |g| g.input.start = true);
        on_click(document, "pauseBtn", game.clone(), |g| g.input.pause = true);
        on_click(document, "restartBtn", game.clone(), |g| g.input.restart = true);
        on_click(document, "playAgainBtn", game.clone(), |g| g.input.restart = true);
        on_click(document, "musicBtn", game, |g| g.input.toggle_music = true);
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let code = event.code();
                if let Some(control) = control_for_key(&code) {
                    event.prevent_default();
                    g.input.controls.set(control, true);
                    return;
                }
                match code.as_str() {
                    "KeyP" | "Escape" => g.input.pause = true,
                    "KeyI" => {
                        g.input.autopilot = !g.input.autopilot;
                        log::info!("Autopilot: {}", g.input.autopilot);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(control) = control_for_key(&event.code()) {
                    game.borrow_mut().input.controls.set(control, false);
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn first_touch_x(event: &TouchEvent) -> Option<f32> {
        event.touches().get(0).map(|t| t.client_x() as f32)
    }

    fn setup_touch(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(x) = first_touch_x(&event) {
                    game.borrow_mut().touch.begin(x);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(x) = first_touch_x(&event) {
                    let g = &mut *game.borrow_mut();
                    g.touch.moved(x, &mut g.input.controls);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let g = &mut *game.borrow_mut();
                g.touch.end(&mut g.input.controls);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let g = &mut *game.borrow_mut();
                g.pulse.trigger(js_sys::Date::now(), &mut g.input.controls);
            });
            let _ = canvas
                .add_event_listener_with_callback("dblclick", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            let mut g = game.borrow_mut();
            // Keys released while unfocused never send keyup
            g.release_controls();
            if g.settings.auto_pause_on_blur && g.state.phase == GamePhase::Running {
                g.input.pause = true;
                log::info!("Auto-paused (window blur)");
            }
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            let now = js_sys::Date::now();
            g.update(dt, now);
            g.render(now);
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Kart Dash failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use kart_dash::Tuning;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Kart Dash (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - run with `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading tuning file {path}"))?;
            Tuning::from_json(&json).with_context(|| format!("loading tuning from {path}"))?
        }
        None => Tuning::default(),
    };
    let seed = args
        .next()
        .map(|s| s.parse::<u64>())
        .transpose()
        .context("seed must be an unsigned integer")?
        .unwrap_or(42);

    let hud = demo_run(tuning, seed);
    println!("{}", serde_json::to_string_pretty(&hud)?);
    Ok(())
}

/// Let the autopilot drive for up to two simulated minutes
#[cfg(not(target_arch = "wasm32"))]
fn demo_run(tuning: kart_dash::Tuning, seed: u64) -> kart_dash::sim::Hud {
    use kart_dash::sim::{GameEvent, GameState, TickInput, tick};

    const DEMO_TICKS: u64 = 60 * 120;

    let mut state = GameState::with_tuning(tuning, seed);
    let mut input = TickInput {
        start: true,
        autopilot: true,
        ..Default::default()
    };

    let mut coins = 0;
    for t in 0..DEMO_TICKS {
        tick(&mut state, &input);
        input.start = false;

        for event in state.drain_events() {
            match event {
                GameEvent::CoinCollected => coins += 1,
                GameEvent::Crash => log::info!("Crashed after {} ticks", t + 1),
                GameEvent::MusicStart | GameEvent::MusicStop => log::debug!("{:?}", event),
            }
        }
        if state.is_game_over() {
            break;
        }
        if (t + 1) % 600 == 0 {
            let hud = state.hud();
            log::info!(
                "t={}s score={} speed={} distance={}",
                (t + 1) / 60,
                hud.score,
                hud.speed,
                hud.distance
            );
        }
    }

    log::info!("Demo finished: {} coins collected", coins);
    state.hud()
}

#[cfg(target_arch = "wasm32")]
fn main() {}

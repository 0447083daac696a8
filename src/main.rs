//! Sky High Flyer entry point
//!
//! Native builds run the autopilot headless and log the results; wasm32
//! builds hook the game to the page and hand snapshots to a JS renderer.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{KeyboardEvent, MouseEvent};

    use sky_high_flyer::input::Key;
    use sky_high_flyer::sim::{GameStatus, LoopControl, Tuning};
    use sky_high_flyer::{Game, Settings};

    // Drawing lives in the page; it receives one JSON snapshot per frame
    #[wasm_bindgen(inline_js = "
        export function render_snapshot(json) {
            const hook = window.skyHighFlyerRender;
            if (typeof hook === 'function') {
                hook(JSON.parse(json));
            }
        }
    ")]
    extern "C" {
        fn render_snapshot(json: &str);
    }

    struct Host {
        game: Game,
        /// Pending requestAnimationFrame handle
        frame_handle: Option<i32>,
    }

    type Shared = Rc<RefCell<Host>>;

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Sky High Flyer starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let host = Rc::new(RefCell::new(Host {
            game: Game::new(Settings::default(), Tuning::default()),
            frame_handle: None,
        }));

        setup_input_handlers(host.clone());
        setup_start_buttons(host.clone());

        present(&host.borrow().game);
        log::info!("Sky High Flyer ready");
    }

    fn start_run(host: &Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let now = window
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now);

        let mut h = host.borrow_mut();
        if !h.game.start(now) {
            return;
        }
        // A stale frame from the previous run must not tick the new one
        if let Some(handle) = h.frame_handle.take() {
            let _ = window.cancel_animation_frame(handle);
        }
        set_overlay("start-screen", false);
        set_overlay("game-over", false);
        drop(h);

        request_animation_frame(host.clone());
    }

    fn request_animation_frame(host: Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let slot = host.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(host, time);
        });
        if let Ok(handle) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            slot.borrow_mut().frame_handle = Some(handle);
        }
        closure.forget();
    }

    fn game_loop(host: Shared, time: f64) {
        let control = {
            let mut h = host.borrow_mut();
            h.frame_handle = None;
            let control = h.game.frame(time);
            present(&h.game);
            control
        };

        if control == LoopControl::Continue {
            request_animation_frame(host);
        }
    }

    /// Push the frame to the renderer hook and the DOM HUD
    fn present(game: &Game) {
        let snapshot = game.snapshot();
        match snapshot.to_json() {
            Ok(json) => render_snapshot(&json),
            Err(e) => log::warn!("snapshot encode failed: {}", e),
        }

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
            el.set_text_content(Some(&snapshot.score.to_string()));
        }
        if let Some(el) = document.query_selector("#hud-best .hud-value").ok().flatten() {
            el.set_text_content(Some(&snapshot.high_score.to_string()));
        }
        if let Some(el) = document.get_element_by_id("hud-score") {
            let class = if snapshot.danger_rising {
                "hud-item danger"
            } else {
                "hud-item"
            };
            let _ = el.set_attribute("class", class);
        }
        if snapshot.status == GameStatus::GameOver {
            if let Some(el) = document.get_element_by_id("final-score") {
                el.set_text_content(Some(&snapshot.score.to_string()));
            }
            set_overlay("game-over", true);
        }
    }

    fn set_overlay(id: &str, visible: bool) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "overlay" } else { "overlay hidden" });
        }
    }

    fn setup_input_handlers(host: Shared) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        // Arrow keys (held state)
        for (event_name, held) in [("keydown", true), ("keyup", false)] {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom_key(&event.key()) {
                    event.prevent_default();
                    let mut h = host.borrow_mut();
                    let game = &mut h.game;
                    if held {
                        game.key_down(key);
                    } else {
                        game.key_up(key);
                    }
                }
            });
            let _ = document
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer, relative to the play area
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let Some(area) = web_sys::window()
                    .and_then(|w| w.document())
                    .and_then(|d| d.get_element_by_id("game-area"))
                else {
                    return;
                };
                let top = area.get_bounding_client_rect().top();
                let y = (event.client_y() as f64 - top) as f32;
                host.borrow_mut().game.pointer_moved(y);
            });
            let _ = document
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // M toggles mute, I toggles the demo pilot
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut h = host.borrow_mut();
                let game = &mut h.game;
                match event.key().as_str() {
                    "m" | "M" => game.toggle_mute(),
                    "i" | "I" => {
                        game.autopilot = !game.autopilot;
                        log::info!("Idle mode: {}", game.autopilot);
                    }
                    _ => {}
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_buttons(host: Shared) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for id in ["start-btn", "restart-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let host = host.clone();
                let closure = Closure::<dyn FnMut()>::new(move || {
                    start_run(&host);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use sky_high_flyer::platform::{FrameScheduler, RealtimeScheduler, SteppingScheduler};
    use sky_high_flyer::sim::Tuning;
    use sky_high_flyer::{Game, Settings};

    env_logger::init();
    log::info!("Sky High Flyer (native) starting...");

    let tuning = match std::env::var("SKY_HIGH_FLYER_TUNING") {
        Ok(json) => match Tuning::from_json(&json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("invalid SKY_HIGH_FLYER_TUNING ({}), using defaults", e);
                Tuning::default()
            }
        },
        Err(_) => Tuning::default(),
    };
    let settings = match std::env::var("SKY_HIGH_FLYER_SETTINGS") {
        Ok(json) => match Settings::from_json(&json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("invalid SKY_HIGH_FLYER_SETTINGS ({}), using defaults", e);
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    };
    if let Ok(json) = tuning.to_json() {
        log::debug!("tuning: {}", json);
    }
    if let Ok(json) = settings.to_json() {
        log::debug!("settings: {}", json);
    }
    let realtime = std::env::var("SKY_HIGH_FLYER_REALTIME").is_ok_and(|v| v == "1");
    let runs: u32 = std::env::var("SKY_HIGH_FLYER_RUNS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3);

    // Cap each run at ten simulated minutes
    const MAX_FRAMES: u64 = 60 * 60 * 10;

    let mut game = Game::new(settings, tuning);
    game.autopilot = true;

    let mut clock_ms = 0.0;
    for run in 1..=runs {
        let mut scheduler: Box<dyn FrameScheduler> = if realtime {
            Box::new(RealtimeScheduler::new(sky_high_flyer::consts::NOMINAL_FPS, MAX_FRAMES))
        } else {
            Box::new(SteppingScheduler::at_60hz(clock_ms, MAX_FRAMES))
        };
        let start_ms = if realtime { 0.0 } else { clock_ms };
        if !game.start(start_ms) {
            break;
        }

        let frames = game.run(scheduler.as_mut());
        clock_ms += frames as f64 * 1000.0 / sky_high_flyer::consts::NOMINAL_FPS as f64;
        log::info!(
            "demo run {}: score {} in {} frames ({} boosts)",
            run,
            game.state.score,
            frames,
            game.state.boosts_collected
        );

        if game.state.is_playing() {
            log::info!("demo run {} hit the frame cap", run);
            break;
        }
    }

    for (i, entry) in game.leaderboard.entries.iter().enumerate() {
        log::info!(
            "#{:>2} {:>5} pts  {:>6} ticks  {} boosts",
            i + 1,
            entry.score,
            entry.ticks,
            entry.boosts
        );
    }
    match game.leaderboard.top_score() {
        Some(best) => log::info!("best score: {}", best),
        None => log::info!("no scoring runs"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

//! Flappy Buddy entry point
//!
//! In the browser this wires the game loop to requestAnimationFrame, DOM input
//! and a DOM renderer. Natively it runs a headless autopilot demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, KeyboardEvent};

    use flappy_buddy::audio::{ChimePlayer, play_score_cues};
    use flappy_buddy::input::{InputSource, activation_for_key};
    use flappy_buddy::viewport::bottom_pipe_height;
    use flappy_buddy::{FrameId, FrameScheduler, GameLoop, LoopEvent, Snapshot, Tuning, Viewport};

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    /// requestAnimationFrame-backed scheduler
    struct RafScheduler {
        callback: FrameCallback,
        handle: Option<i32>,
        frame: Option<FrameId>,
    }

    impl RafScheduler {
        /// The pending request just fired; hand back the frame it was for
        fn fired(&mut self) -> Option<FrameId> {
            self.handle = None;
            self.frame.take()
        }
    }

    impl FrameScheduler for RafScheduler {
        fn request_frame(&mut self, id: FrameId) {
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Some(callback) = self.callback.borrow().as_ref() {
                match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                    Ok(handle) => {
                        self.handle = Some(handle);
                        self.frame = Some(id);
                    }
                    Err(e) => log::warn!("requestAnimationFrame failed: {:?}", e),
                }
            }
        }

        fn cancel_frame(&mut self) {
            self.frame = None;
            if let (Some(handle), Some(window)) = (self.handle.take(), web_sys::window()) {
                let _ = window.cancel_animation_frame(handle);
            }
        }
    }

    /// DOM nodes the renderer updates each frame
    struct View {
        buddy: Element,
        pipes: Element,
        score: Element,
        overlay: Element,
    }

    impl View {
        fn build(document: &Document) -> Result<Self, JsValue> {
            let body = document.body().ok_or("no body")?;
            body.set_attribute(
                "style",
                "margin:0;width:100vw;height:100vh;overflow:hidden;position:relative;\
                 background:linear-gradient(to bottom, #87CEEB, #ffffff);user-select:none;",
            )?;

            let title = document.create_element("div")?;
            title.set_attribute(
                "style",
                "position:absolute;top:16px;left:50%;transform:translateX(-50%);\
                 font:700 28px sans-serif;color:#ff4081;z-index:50;",
            )?;
            title.set_text_content(Some("Sentient Flappy Buddy"));

            let score = document.create_element("div")?;
            score.set_attribute(
                "style",
                "position:absolute;top:80px;left:50%;transform:translateX(-50%);\
                 font:700 28px sans-serif;color:#222;z-index:30;",
            )?;

            let pipes = document.create_element("div")?;
            let buddy = document.create_element("div")?;

            let overlay = document.create_element("div")?;
            overlay.set_inner_html(
                "GAME OVER<div style=\"font-size:24px;margin-top:12px;color:#333\">\
                 (Press Space or click to play again)</div>",
            );

            for el in [&title, &score, &pipes, &buddy, &overlay] {
                body.append_child(el)?;
            }

            Ok(Self {
                buddy,
                pipes,
                score,
                overlay,
            })
        }

        fn render(&self, snap: &Snapshot, tuning: &Tuning, viewport: Option<Viewport>) {
            let _ = self.buddy.set_attribute(
                "style",
                &format!(
                    "position:absolute;left:{}px;top:{}px;width:{}px;height:{}px;\
                     border-radius:50%;background:#ffd54f;box-shadow:inset -8px -8px 0 #f9a825;\
                     transform:rotate({}deg);transition:transform 60ms linear;z-index:40;",
                    tuning.buddy_x,
                    snap.buddy_y.round(),
                    tuning.buddy_width,
                    tuning.buddy_height,
                    snap.tilt_deg
                ),
            );

            let style = format!(
                "position:absolute;width:{}px;background:#ff80cb;z-index:20;",
                tuning.pipe_width
            );
            let mut html = String::new();
            for pipe in &snap.pipes {
                let bottom = bottom_pipe_height(pipe.gap_top, tuning.pipe_gap, viewport).max(0.0);
                html.push_str(&format!(
                    "<div style=\"{style}left:{x}px;top:0;height:{top}px\"></div>\
                     <div style=\"{style}left:{x}px;top:{gap_bottom}px;height:{bottom}px\"></div>",
                    style = style,
                    x = pipe.x,
                    top = pipe.gap_top,
                    gap_bottom = pipe.gap_top + tuning.pipe_gap,
                    bottom = bottom,
                ));
            }
            self.pipes.set_inner_html(&html);

            self.score
                .set_text_content(Some(&format!("Score: {}", snap.score)));

            let overlay_style = if snap.game_over {
                "position:absolute;top:50%;left:50%;transform:translate(-50%,-50%);\
                 z-index:60;text-align:center;color:red;font:800 36px sans-serif;"
            } else {
                "display:none;"
            };
            let _ = self.overlay.set_attribute("style", overlay_style);
        }
    }

    /// Game instance holding all state
    struct Game {
        game_loop: GameLoop<Pcg32, RafScheduler>,
        chime: ChimePlayer,
        view: View,
    }

    impl Game {
        /// Feed one event through the loop, then draw the committed state
        fn handle(&mut self, event: LoopEvent) {
            let viewport = measure_viewport();
            let events = self.game_loop.dispatch(event, viewport);
            play_score_cues(&mut self.chime, &events);
            self.view
                .render(&self.game_loop.snapshot(), self.game_loop.tuning(), viewport);
        }
    }

    /// Current window size; `None` when the browser cannot report it
    fn measure_viewport() -> Option<Viewport> {
        let window = web_sys::window()?;
        let width = window.inner_width().ok()?.as_f64()?;
        let height = window.inner_height().ok()?.as_f64()?;
        Some(Viewport::new(width as f32, height as f32))
    }

    /// Read tuning overrides from `<script id="tuning" type="application/json">`
    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
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

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flappy Buddy starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let tuning = load_tuning(&document);
        let view = View::build(&document).expect("Failed to build view");

        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);

        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let game = Rc::new(RefCell::new(Game {
            game_loop: GameLoop::new(
                tuning,
                Pcg32::seed_from_u64(seed),
                RafScheduler {
                    callback: callback.clone(),
                    handle: None,
                    frame: None,
                },
            ),
            chime: ChimePlayer::new(),
            view,
        }));

        {
            let game = game.clone();
            *callback.borrow_mut() = Some(Closure::new(move |_time: f64| {
                let mut g = game.borrow_mut();
                if let Some(id) = g.game_loop.scheduler_mut().fired() {
                    g.handle(LoopEvent::Frame(id));
                }
            }));
        }

        setup_input_handlers(game.clone());

        game.borrow_mut().handle(LoopEvent::Reset);

        log::info!("Flappy Buddy running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(source) = activation_for_key(&event.code()) {
                    event.prevent_default();
                    activate(&game, source);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                activate(&game, InputSource::Pointer);
            });
            let _ = window
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::TouchEvent| {
                // Suppress the synthesized mousedown that would activate twice
                event.prevent_default();
                activate(&game, InputSource::Touch);
            });
            // Window-level touch listeners default to passive, which ignores prevent_default
            let options = web_sys::AddEventListenerOptions::new();
            options.set_passive(false);
            let _ = window.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }
    }

    fn activate(game: &Rc<RefCell<Game>>, source: InputSource) {
        let mut g = game.borrow_mut();
        // Browsers only allow audio after a user gesture
        g.chime.resume();
        g.handle(LoopEvent::Activate(source));
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use flappy_buddy::audio::{CueError, CuePlayer, play_score_cues};
    use flappy_buddy::input::InputSource;
    use flappy_buddy::sim::autopilot;
    use flappy_buddy::{GameLoop, LoopEvent, ManualScheduler, Tuning, Viewport};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Headless stand-in for the chime
    struct LogCue;

    impl CuePlayer for LogCue {
        fn restart(&mut self) -> Result<(), CueError> {
            log::debug!("ting");
            Ok(())
        }
    }

    env_logger::init();
    log::info!("Flappy Buddy (native) starting...");
    log::info!("Native mode runs a headless demo - build for wasm32 to play");

    // flappy-buddy [seed] [max_frames]
    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(42);
    let max_frames: u64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(10_000);

    let viewport = Viewport::new(1280.0, 720.0);
    let mut game = GameLoop::new(
        Tuning::default(),
        Pcg32::seed_from_u64(seed),
        ManualScheduler::new(),
    );
    let mut cue = LogCue;

    game.dispatch(LoopEvent::Reset, Some(viewport));
    let mut frames = 0;
    while frames < max_frames {
        let Some(id) = game.scheduler_mut().fire() else {
            break;
        };
        if autopilot::should_jump(game.state(), game.tuning(), viewport.height) {
            game.push(LoopEvent::Activate(InputSource::Keyboard));
        }
        let events = game.dispatch(LoopEvent::Frame(id), Some(viewport));
        play_score_cues(&mut cue, &events);
        frames += 1;
    }

    log::info!(
        "Demo finished after {} frames with score {}",
        frames,
        game.state().score
    );
    println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
    Ok(())
}

//! Brick Breaker entry point
//!
//! Browser builds render to a 2D canvas and drive the game from
//! `requestAnimationFrame`. Native builds run a headless autopilot game,
//! which is handy for soak-testing the simulation.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent};

    use brick_breaker::Settings;
    use brick_breaker::platform::input::{is_game_key, key_event};
    use brick_breaker::platform::{FrameDriver, Hud, RenderSurface};
    use brick_breaker::renderer::{DrawCommand, css_color};
    use brick_breaker::sim::{InputEvent, MessageKind};

    type Game = FrameDriver<DomHud, CanvasSurface>;

    /// Score, lives and banner text in DOM elements
    struct DomHud {
        document: Document,
    }

    impl DomHud {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_message(&self, text: &str, class_suffix: &str) {
            if let Some(el) = self.document.get_element_by_id("message") {
                el.set_text_content(Some(text));
                let class = if class_suffix.is_empty() {
                    "message".to_string()
                } else {
                    format!("message {}", class_suffix)
                };
                if let Err(e) = el.set_attribute("class", &class) {
                    log::warn!("Failed to set message class: {:?}", e);
                }
            }
        }
    }

    impl Hud for DomHud {
        fn on_score_changed(&mut self, score: u32) {
            self.set_text("score", &score.to_string());
        }

        fn on_lives_changed(&mut self, lives: u8) {
            self.set_text("lives", &lives.to_string());
        }

        fn show_message(&mut self, text: &str, kind: MessageKind) {
            self.set_message(text, kind.class_name());
        }

        fn clear_message(&mut self) {
            self.set_message("", "");
        }
    }

    /// Canvas 2D render surface
    struct CanvasSurface {
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
    }

    impl RenderSurface for CanvasSurface {
        fn size(&self) -> (f32, f32) {
            (self.canvas.width() as f32, self.canvas.height() as f32)
        }

        fn present(&mut self, scene: &[DrawCommand]) {
            let (width, height) = self.size();
            for command in scene {
                match command {
                    DrawCommand::Clear { color } => {
                        self.ctx.set_fill_style_str(&css_color(*color));
                        self.ctx.fill_rect(0.0, 0.0, width as f64, height as f64);
                    }
                    DrawCommand::Rect {
                        rect,
                        fill,
                        outline,
                    } => {
                        let (x, y) = (rect.x as f64, rect.y as f64);
                        let (w, h) = (rect.w as f64, rect.h as f64);
                        self.ctx.set_fill_style_str(&css_color(*fill));
                        self.ctx.fill_rect(x, y, w, h);
                        if let Some((color, line_width)) = outline {
                            self.ctx.set_stroke_style_str(&css_color(*color));
                            self.ctx.set_line_width(*line_width as f64);
                            self.ctx.stroke_rect(x, y, w, h);
                        }
                    }
                    DrawCommand::Circle {
                        center,
                        radius,
                        fill,
                    } => {
                        self.ctx.begin_path();
                        let _ = self.ctx.arc(
                            center.x as f64,
                            center.y as f64,
                            *radius as f64,
                            0.0,
                            std::f64::consts::TAU,
                        );
                        self.ctx.set_fill_style_str(&css_color(*fill));
                        self.ctx.fill();
                        self.ctx.close_path();
                    }
                }
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Brick Breaker starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("missing #gameCanvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let hud = DomHud {
            document: document.clone(),
        };
        let surface = CanvasSurface { canvas, ctx };
        let driver = FrameDriver::new(Settings::default(), seed, hud, surface).map_err(|e| {
            log::error!("Invalid settings: {}", e);
            JsValue::from_str(&e.to_string())
        })?;
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(driver));
        setup_input_handlers(&document, game.clone())?;
        setup_start_button(&document, game.clone());
        request_animation_frame(game);

        log::info!("Brick Breaker running!");
        Ok(())
    }

    fn setup_input_handlers(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if is_game_key(&key) {
                    event.prevent_default();
                }
                if let Some(input) = key_event(&key, pressed) {
                    game.borrow_mut().handle_input(input);
                }
            });
            document
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_start_button(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(btn) = document.get_element_by_id("startButton") else {
            log::warn!("No #startButton, keyboard only");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            game.borrow_mut().handle_input(InputEvent::Confirm);
        });
        let hooked =
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        if let Err(e) = hooked {
            log::warn!("Failed to hook up #startButton: {:?}", e);
            return;
        }
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, stopping game loop");
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use brick_breaker::platform::hud::LogHud;
    use brick_breaker::platform::{Autopilot, FrameDriver, RenderSurface};
    use brick_breaker::renderer::DrawCommand;
    use brick_breaker::sim::GameState;
    use brick_breaker::{Settings, SettingsError};

    /// Surface that only counts frames
    struct HeadlessSurface {
        size: (f32, f32),
        frames: u64,
    }

    impl RenderSurface for HeadlessSurface {
        fn size(&self) -> (f32, f32) {
            self.size
        }

        fn present(&mut self, _scene: &[DrawCommand]) {
            self.frames += 1;
        }
    }

    /// Command line options:
    /// `[--settings PATH] [--seed N] [--frames N] [--loop] [--json]`
    struct Options {
        settings: Option<String>,
        seed: u64,
        frames: u64,
        /// Keep playing new games until the frame budget runs out
        repeat: bool,
        json: bool,
    }

    fn parse_args() -> Result<Options, String> {
        let mut options = Options {
            settings: std::env::var("BRICK_BREAKER_SETTINGS").ok(),
            seed: 1,
            frames: 60 * 60 * 10,
            repeat: false,
            json: false,
        };
        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--settings" => options.settings = args.next(),
                "--seed" => {
                    options.seed = args
                        .next()
                        .and_then(|v| v.parse().ok())
                        .ok_or("--seed needs a number")?;
                }
                "--frames" => {
                    options.frames = args
                        .next()
                        .and_then(|v| v.parse().ok())
                        .ok_or("--frames needs a number")?;
                }
                "--loop" => options.repeat = true,
                "--json" => options.json = true,
                other => return Err(format!("unknown argument `{}`", other)),
            }
        }
        Ok(options)
    }

    fn load_settings(path: Option<&str>) -> Result<Settings, SettingsError> {
        match path {
            Some(path) => Settings::load(path),
            None => Ok(Settings::default()),
        }
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let options = parse_args()?;
        let settings = load_settings(options.settings.as_deref())?;
        let surface = HeadlessSurface {
            size: (settings.playfield.width, settings.playfield.height),
            frames: 0,
        };
        let mut driver = FrameDriver::new(settings, options.seed, LogHud::default(), surface)?;
        let pilot = Autopilot {
            restart: options.repeat,
            ..Autopilot::default()
        };
        let mut games = 1u32;

        log::info!("Running {} frames with seed {}", options.frames, options.seed);
        for _ in 0..options.frames {
            let finished = driver.context().state.is_terminal();
            for input in pilot.plan(driver.context()) {
                driver.handle_input(input);
            }
            if finished && !driver.context().state.is_terminal() {
                games += 1;
                log::info!("Starting game {}", games);
            }
            driver.frame();
            if !options.repeat && driver.context().state.is_terminal() {
                break;
            }
        }

        let ctx = driver.context();
        log::info!(
            "Finished after {} frames and {} game(s): {:?}, score {}/{}, lives {}, {} bricks left",
            driver.surface().frames,
            games,
            ctx.state,
            ctx.score,
            ctx.bricks.total_points(),
            ctx.lives,
            ctx.bricks.alive_count()
        );
        if options.json {
            println!("{}", serde_json::to_string_pretty(&ctx.snapshot())?);
        } else {
            let outcome = match ctx.state {
                GameState::Win => "cleared the board",
                GameState::GameOver => "ran out of lives",
                _ => "stopped",
            };
            println!("Autopilot {}: score {}", outcome, ctx.score);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Brick Breaker (native) starting...");
    if let Err(e) = native::run() {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

//! Birthday Wish entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_card {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use birthday_wish::audio::AudioManager;
    use birthday_wish::frame_delta;
    use birthday_wish::platform::ViewportTracker;
    use birthday_wish::platform::dom::{self, CardDom, InputSink};
    use birthday_wish::platform::viewport::ResizeSubscription;
    use birthday_wish::renderer::OverlayRenderState;
    use birthday_wish::sim::{CardInput, CardSession, tick};
    use birthday_wish::{CardConfig, CardView, Viewport};

    /// Canvas the confetti overlay is drawn into
    const OVERLAY_ID: &str = "confetti-canvas";

    /// Card instance holding all session state
    struct Card {
        config: CardConfig,
        session: CardSession,
        /// Clicks received since the last frame
        pending: Vec<CardInput>,
        viewport: ViewportTracker,
        resize: Option<ResizeSubscription>,
        dom: Option<CardDom>,
        canvas: Option<HtmlCanvasElement>,
        render_state: Option<OverlayRenderState>,
        /// Overlay needs one more draw (to clear the last pieces)
        overlay_dirty: bool,
        audio: AudioManager,
        last_time: f64,
    }

    impl Card {
        fn new(config: CardConfig, seed: u64) -> Self {
            let audio = AudioManager::new(config.sound);
            Self {
                session: CardSession::new(&config, seed),
                config,
                pending: Vec::new(),
                viewport: ViewportTracker::default(),
                resize: None,
                dom: None,
                canvas: None,
                render_state: None,
                overlay_dirty: false,
                audio,
                last_time: 0.0,
            }
        }

        fn view(&self) -> CardView {
            CardView::from_state(&self.session.state, &self.config)
        }

        /// Apply queued clicks and advance timers
        fn update(&mut self, dt: f32) {
            self.sync_viewport();

            let inputs = std::mem::take(&mut self.pending);
            let events = tick(&mut self.session, &inputs, dt);
            for event in &events {
                log::info!("{:?}", event);
            }
            self.audio.play_events(&events);
        }

        fn sync_viewport(&mut self) {
            if !self.viewport.take_changed() {
                return;
            }
            let viewport = self.viewport.current();
            self.session.set_viewport(viewport);

            if let Some(canvas) = &self.canvas {
                let (w, h) = size_canvas(canvas, viewport);
                if let Some(rs) = self.render_state.as_mut() {
                    rs.resize(w, h, viewport);
                }
            }
        }

        /// Render the DOM card and the confetti overlay
        fn render(&mut self) {
            let view = self.view();
            if let Some(dom) = self.dom.as_mut() {
                if let Err(e) = dom.render(&view) {
                    log::warn!("Card render failed: {:?}", e);
                }
            }

            if let Some(canvas) = &self.canvas {
                let class = if view.show_confetti { "" } else { "hidden" };
                canvas.set_class_name(class);
            }

            let pieces = self.session.confetti.pieces();
            let on_screen = !pieces.is_empty();
            if !on_screen && !self.overlay_dirty {
                return;
            }
            if let Some(rs) = self.render_state.as_mut() {
                match rs.render(pieces) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        rs.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
            self.overlay_dirty = on_screen;
        }
    }

    /// Size the canvas backing store for `viewport` at the device pixel ratio
    fn size_canvas(canvas: &HtmlCanvasElement, viewport: Viewport) -> (u32, u32) {
        let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
        let width = (viewport.width as f64 * dpr).max(1.0) as u32;
        let height = (viewport.height as f64 * dpr).max(1.0) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        (width, height)
    }

    /// Set up WebGPU on the overlay canvas; `None` if the browser can't
    async fn init_overlay(
        canvas: &HtmlCanvasElement,
        viewport: Viewport,
        palette: Vec<[f32; 4]>,
    ) -> Option<OverlayRenderState> {
        let (width, height) = size_canvas(canvas, viewport);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| log::warn!("Failed to create surface: {}", e))
            .ok()?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| log::warn!("No GPU adapter: {}", e))
            .ok()?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        OverlayRenderState::new(surface, &adapter, width, height, viewport, palette)
            .await
            .map_err(|e| log::warn!("Failed to create device: {}", e))
            .ok()
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Birthday Wish starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let config_json = dom::read_config_attribute(&document);
        let config = CardConfig::from_json_or_default(config_json.as_deref());
        let seed = config
            .confetti_seed
            .unwrap_or_else(|| js_sys::Date::now() as u64);

        let card = Rc::new(RefCell::new(Card::new(config, seed)));
        log::info!("Card initialized with confetti seed: {}", seed);

        // Viewport observer: registered now, released on pagehide
        let resize = {
            let weak: Weak<RefCell<Card>> = Rc::downgrade(&card);
            ResizeSubscription::register(move |viewport| {
                if let Some(card) = weak.upgrade() {
                    card.borrow_mut().viewport.update(viewport);
                }
            })?
        };
        card.borrow_mut().resize = Some(resize);
        setup_teardown(&window, Rc::downgrade(&card))?;

        // DOM card
        let sink: InputSink = {
            let weak = Rc::downgrade(&card);
            Rc::new(move |input: CardInput| {
                if let Some(card) = weak.upgrade() {
                    card.borrow_mut().pending.push(input);
                }
            })
        };
        let view = card.borrow().view();
        let card_dom = CardDom::mount(&document, &view, sink)?;
        card.borrow_mut().dom = Some(card_dom);

        // Confetti overlay (optional)
        let canvas = document
            .get_element_by_id(OVERLAY_ID)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
        if let Some(canvas) = canvas {
            let (viewport, palette) = {
                let c = card.borrow();
                (c.viewport.current(), c.config.confetti_rgba())
            };
            let render_state = init_overlay(&canvas, viewport, palette).await;
            if render_state.is_none() {
                log::warn!("WebGPU unavailable - confetti disabled");
            }
            let mut c = card.borrow_mut();
            c.render_state = render_state;
            c.canvas = Some(canvas);
        } else {
            log::warn!("No #{} canvas - confetti disabled", OVERLAY_ID);
        }

        if let Some(loading) = document.get_element_by_id("loading") {
            loading.set_class_name("hidden");
        }

        request_animation_frame(card);

        log::info!("Birthday Wish running!");
        Ok(())
    }

    /// Drop the resize subscription when the page goes away
    fn setup_teardown(window: &web_sys::Window, card: Weak<RefCell<Card>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Some(card) = card.upgrade() {
                card.borrow_mut().resize.take();
            }
        });
        window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(card: Rc<RefCell<Card>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame_loop(card, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(card: Rc<RefCell<Card>>, time: f64) {
        {
            let mut c = card.borrow_mut();

            let dt = frame_delta(c.last_time, time);
            c.last_time = time;

            c.update(dt);
            c.render();
        }

        request_animation_frame(card);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_card::run().await {
        log::error!("Birthday Wish failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Birthday Wish (native) starting...");
    log::info!("The card itself runs in the browser - run with `trunk serve` for the web version");

    println!("\nPlaying the card headlessly...");
    headless::play_by_hand();
    headless::celebrate();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drives a session without a browser, at a fixed 60 fps
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use birthday_wish::consts::REFERENCE_FPS;
    use birthday_wish::sim::{CardEvent, CardInput, CardSession, tick};
    use birthday_wish::{CardConfig, CardView, Viewport};

    const FRAME: f32 = 1.0 / REFERENCE_FPS;
    const SEED: u64 = 0x5EED;

    fn session(config: &CardConfig) -> CardSession {
        let mut session = CardSession::new(config, config.confetti_seed.unwrap_or(SEED));
        session.set_viewport(Viewport::new(1280.0, 720.0));
        session
    }

    /// Frames until the confetti burst has fully fallen off screen
    fn run_confetti(session: &mut CardSession) -> u32 {
        let mut frames = 0;
        while !session.confetti.is_finished() && frames < 60 * 60 {
            tick(session, &[], FRAME);
            frames += 1;
        }
        frames
    }

    pub fn play_by_hand() {
        let config = CardConfig::default();
        let mut session = session(&config);

        let clicks: Vec<CardInput> = (0..config.total_candles)
            .map(CardInput::LightCandle)
            .chain((0..config.total_balloons).map(CardInput::PopBalloon))
            .collect();
        for (n, input) in clicks.iter().enumerate() {
            let events = tick(&mut session, &[*input], FRAME);
            if events.contains(&CardEvent::CompletionEffectShown) {
                println!("✓ Completion effect after click {}", n + 1);
            }
        }

        let view = CardView::from_state(&session.state, &config);
        println!("  {}", view.progress);
        let frames = run_confetti(&mut session);
        println!(
            "✓ {} confetti pieces fell in {:.1}s",
            session.confetti.emitted(),
            frames as f32 * FRAME
        );
    }

    pub fn celebrate() {
        let config = CardConfig::default();
        let mut session = session(&config);

        tick(&mut session, &[CardInput::Celebrate], 0.0);
        println!(
            "✓ Celebrate: confetti {} with {} balloons popped",
            if session.state.show_completion_effect() { "on" } else { "off" },
            session.state.balloons_popped()
        );

        let mut frames = 0u32;
        while session.sequencer.is_running() {
            for event in tick(&mut session, &[], FRAME) {
                if let CardEvent::CandleLit { index, auto: true } = event {
                    println!("  candle {} lit at {:.2}s", index, frames as f32 * FRAME);
                }
            }
            frames += 1;
        }
        println!(
            "✓ Sequence finished: {}/{} candles",
            session.state.candles_lit(),
            session.state.total_candles()
        );
    }
}

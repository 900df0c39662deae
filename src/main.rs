//! Folio Deck entry point
//!
//! Handles platform-specific initialization: wires page events to the deck,
//! runs the background loop, and hosts the blaster mini-game.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, Document, HtmlCanvasElement, HtmlElement, KeyboardEvent,
        MouseEvent, TouchEvent,
    };

    use folio_deck::consts::BLASTER_DT;
    use folio_deck::platform::canvas::BackgroundPainter;
    use folio_deck::platform::dom::{DomRenderer, read_layout};
    use folio_deck::platform::now_ms;
    use folio_deck::renderer::{SceneRenderer, build_scene};
    use folio_deck::sim::{BlasterGame, ParticleField, default_labels, screen_to_ndc};
    use folio_deck::{Deck, Settings};

    type SharedDeck = Rc<RefCell<Deck<DomRenderer>>>;

    fn window() -> Result<web_sys::Window, JsValue> {
        web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
    }

    fn document() -> Result<Document, JsValue> {
        window()?
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))
    }

    fn viewport() -> (f32, f32) {
        let Ok(window) = window() else {
            return (0.0, 0.0);
        };
        let dim = |v: Result<JsValue, JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
        };
        (dim(window.inner_width()), dim(window.inner_height()))
    }

    fn listen(
        target: &web_sys::EventTarget,
        event: &str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Background
    // ------------------------------------------------------------------

    struct Background {
        field: ParticleField,
        painter: BackgroundPainter,
        settings: Settings,
    }

    impl Background {
        fn reseed(&mut self) {
            let (w, h) = viewport();
            self.painter.resize(w as u32, h as u32);
            let count = self.settings.particle_count(w);
            self.field.reseed(w, h, count);
        }
    }

    fn setup_background(document: &Document, settings: &Settings) -> Result<(), JsValue> {
        let Some(canvas) = document.get_element_by_id("background-canvas") else {
            log::warn!("#background-canvas not found; background disabled");
            return Ok(());
        };
        let canvas: HtmlCanvasElement = canvas.dyn_into()?;

        let (w, h) = viewport();
        let field = ParticleField::new(w, h, settings.particle_count(w), now_ms() as u64)
            .with_link_distance(settings.link_distance);
        let painter = BackgroundPainter::new(canvas)?;
        painter.resize(w as u32, h as u32);

        let background = Rc::new(RefCell::new(Background {
            field,
            painter,
            settings: settings.clone(),
        }));

        {
            let background = background.clone();
            listen(window()?.as_ref(), "resize", move |_| {
                let mut bg = background.borrow_mut();
                bg.reseed();
                if bg.settings.reduced_motion {
                    bg.painter.paint(&bg.field);
                }
            })?;
        }

        if settings.reduced_motion {
            let bg = background.borrow();
            bg.painter.paint(&bg.field);
            log::info!("Reduced motion: background painted once");
        } else {
            background_frame(background);
        }
        Ok(())
    }

    fn background_frame(background: Rc<RefCell<Background>>) {
        {
            let mut bg = background.borrow_mut();
            bg.field.step();
            bg.painter.paint(&bg.field);
        }
        request_animation_frame(move |_| background_frame(background));
    }

    fn request_animation_frame(callback: impl FnOnce(f64) + 'static) {
        let Ok(window) = window() else { return };
        let closure = Closure::once(callback);
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // ------------------------------------------------------------------
    // Deck
    // ------------------------------------------------------------------

    fn setup_deck(document: &Document, settings: &Settings) -> Result<SharedDeck, JsValue> {
        let layout = read_layout(document)?;
        log::info!(
            "Deck layout: {} sections, cards {:?}",
            layout.section_count(),
            layout.sections().iter().map(|s| s.card_count).collect::<Vec<_>>()
        );
        let renderer = DomRenderer::new(document)?;
        let deck = Rc::new(RefCell::new(Deck::with_threshold(
            layout,
            renderer,
            settings.tap_threshold,
        )));

        let target: &web_sys::EventTarget = document.as_ref();

        // Touch: listeners are non-passive so the page can own the gesture
        {
            let deck = deck.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    deck.borrow_mut()
                        .pointer_down(touch.client_x() as f32, touch.client_y() as f32);
                }
            });
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            target.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &options,
            )?;
            closure.forget();
        }
        {
            let deck = deck.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.changed_touches().get(0) {
                    deck.borrow_mut()
                        .pointer_up(touch.client_x() as f32, touch.client_y() as f32);
                }
            });
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            target.add_event_listener_with_callback_and_add_event_listener_options(
                "touchend",
                closure.as_ref().unchecked_ref(),
                &options,
            )?;
            closure.forget();
        }

        // Mouse, for desktop
        {
            let deck = deck.clone();
            listen(target, "mousedown", move |event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    deck.borrow_mut()
                        .pointer_down(event.client_x() as f32, event.client_y() as f32);
                }
            })?;
        }
        {
            let deck = deck.clone();
            listen(target, "mouseup", move |event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    deck.borrow_mut()
                        .pointer_up(event.client_x() as f32, event.client_y() as f32);
                }
            })?;
        }

        // Keyboard
        {
            let deck = deck.clone();
            listen(target, "keydown", move |event| {
                if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                    deck.borrow_mut().key_down(&event.key());
                }
            })?;
        }

        Ok(deck)
    }

    // ------------------------------------------------------------------
    // Blaster
    // ------------------------------------------------------------------

    struct Blaster {
        game: BlasterGame,
        renderer: Option<SceneRenderer>,
        canvas: Option<HtmlCanvasElement>,
        active: bool,
        /// Bumped on every start so stale frame loops stop
        generation: u32,
        last_time: f64,
        pointer_ndc: glam::Vec2,
    }

    type SharedBlaster = Rc<RefCell<Blaster>>;

    fn set_score_text(score: u64) {
        if let Some(el) = document().ok().and_then(|d| d.get_element_by_id("score")) {
            el.set_text_content(Some(&format!("SCORE: {}", score)));
        }
    }

    fn set_game_ui_visible(document: &Document, visible: bool) {
        if let Some(el) = document.get_element_by_id("game-ui") {
            if let Ok(el) = el.dyn_into::<HtmlElement>() {
                let display = if visible { "block" } else { "none" };
                if let Err(e) = el.style().set_property("display", display) {
                    log::warn!("Failed to toggle #game-ui: {:?}", e);
                }
            }
        }
    }

    fn create_game_canvas(document: &Document) -> Result<HtmlCanvasElement, JsValue> {
        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        canvas.set_id("game-canvas");
        canvas.set_attribute(
            "style",
            "position:fixed; top:0; left:0; width:100vw; height:100vh; z-index:1000;",
        )?;
        let (w, h) = viewport();
        let dpr = window()?.device_pixel_ratio();
        canvas.set_width((w as f64 * dpr) as u32);
        canvas.set_height((h as f64 * dpr) as u32);
        document
            .body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&canvas)?;
        Ok(canvas)
    }

    async fn init_gpu(canvas: HtmlCanvasElement) -> Result<SceneRenderer, JsValue> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let (width, height) = (canvas.width(), canvas.height());
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        SceneRenderer::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    fn start_blaster(blaster: &SharedBlaster, deck: &SharedDeck) -> Result<(), JsValue> {
        let document = document()?;
        let generation = {
            let mut b = blaster.borrow_mut();
            if b.active {
                return Ok(());
            }
            let canvas = create_game_canvas(&document)?;
            let (w, h) = viewport();
            b.game.reset();
            b.game.set_aspect(w, h);
            b.active = true;
            b.generation = b.generation.wrapping_add(1);
            b.last_time = 0.0;
            b.canvas = Some(canvas.clone());

            let generation = b.generation;
            let shared = blaster.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match init_gpu(canvas).await {
                    Ok(renderer) => {
                        let mut b = shared.borrow_mut();
                        if b.active && b.generation == generation {
                            b.renderer = Some(renderer);
                        }
                    }
                    Err(e) => log::error!("Blaster GPU init failed: {:?}", e),
                }
            });
            generation
        };

        deck.borrow_mut().set_enabled(false);
        if let Some(body) = document.body() {
            if let Err(e) = body.class_list().add_1("game-active") {
                log::warn!("Failed to add body class: {:?}", e);
            }
        }
        set_game_ui_visible(&document, true);
        set_score_text(0);

        log::info!("Blaster started");
        let blaster = blaster.clone();
        request_animation_frame(move |time| blaster_frame(blaster, generation, time));
        Ok(())
    }

    fn exit_blaster(blaster: &SharedBlaster, deck: &SharedDeck) {
        let mut b = blaster.borrow_mut();
        if !b.active {
            return;
        }
        b.active = false;
        b.renderer = None;
        if let Some(canvas) = b.canvas.take() {
            canvas.remove();
        }
        b.game.reset();
        drop(b);

        deck.borrow_mut().set_enabled(true);
        if let Ok(document) = document() {
            if let Some(body) = document.body() {
                if let Err(e) = body.class_list().remove_1("game-active") {
                    log::warn!("Failed to remove body class: {:?}", e);
                }
            }
            set_game_ui_visible(&document, false);
        }
        set_score_text(0);
        log::info!("Blaster exited");
    }

    fn blaster_frame(blaster: SharedBlaster, generation: u32, time: f64) {
        {
            let mut b = blaster.borrow_mut();
            if !b.active || b.generation != generation {
                return;
            }

            let dt = if b.last_time > 0.0 {
                ((time - b.last_time) / 1000.0) as f32
            } else {
                BLASTER_DT
            };
            b.last_time = time;
            b.game.advance(dt);

            let vertices = build_scene(&b.game);
            if let Some(ref mut renderer) = b.renderer {
                match renderer.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        renderer.resize(renderer.size.0, renderer.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        request_animation_frame(move |time| blaster_frame(blaster, generation, time));
    }

    fn setup_blaster(
        document: &Document,
        deck: SharedDeck,
        settings: &Settings,
    ) -> Result<(), JsValue> {
        let mut game = BlasterGame::new(now_ms() as u64, default_labels());
        game.respawn_delay_ms = settings.respawn_delay_ms;
        game.points_per_hit = settings.points_per_hit as u64;

        let blaster = Rc::new(RefCell::new(Blaster {
            game,
            renderer: None,
            canvas: None,
            active: false,
            generation: 0,
            last_time: 0.0,
            pointer_ndc: glam::Vec2::ZERO,
        }));

        if let Some(btn) = document.get_element_by_id("start-game-btn") {
            let blaster = blaster.clone();
            let deck = deck.clone();
            listen(btn.as_ref(), "click", move |_| {
                if let Err(e) = start_blaster(&blaster, &deck) {
                    log::error!("Blaster failed to start: {:?}", e);
                }
            })?;
        } else {
            log::warn!("#start-game-btn not found; blaster disabled");
        }

        if let Some(btn) = document.get_element_by_id("exit-game-btn") {
            let blaster = blaster.clone();
            listen(btn.as_ref(), "click", move |_| {
                exit_blaster(&blaster, &deck);
            })?;
        }

        let window = window()?;

        // Crosshair follows the pointer
        {
            let blaster = blaster.clone();
            listen(window.as_ref(), "mousemove", move |event| {
                let mut b = blaster.borrow_mut();
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                if !b.active {
                    return;
                }
                let (x, y) = (event.client_x() as f32, event.client_y() as f32);
                if let Some(crosshair) = document()
                    .ok()
                    .and_then(|d| d.get_element_by_id("crosshair"))
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                {
                    let style = crosshair.style();
                    if let Err(e) = style
                        .set_property("left", &format!("{}px", x))
                        .and_then(|_| style.set_property("top", &format!("{}px", y)))
                    {
                        log::warn!("Failed to move crosshair: {:?}", e);
                    }
                }
                let (w, h) = viewport();
                b.pointer_ndc = screen_to_ndc(x, y, w, h);
            })?;
        }

        // Shoot
        {
            let blaster = blaster.clone();
            listen(window.as_ref(), "click", move |_| {
                let mut b = blaster.borrow_mut();
                if !b.active {
                    return;
                }
                let ndc = b.pointer_ndc;
                if let Some(hit) = b.game.shoot(ndc) {
                    set_score_text(hit.score);
                }
            })?;
        }

        // Resize
        {
            listen(window.as_ref(), "resize", move |_| {
                let mut b = blaster.borrow_mut();
                if !b.active {
                    return;
                }
                let (w, h) = viewport();
                b.game.set_aspect(w, h);
                let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
                let (pw, ph) = ((w as f64 * dpr) as u32, (h as f64 * dpr) as u32);
                if let Some(canvas) = &b.canvas {
                    canvas.set_width(pw);
                    canvas.set_height(ph);
                }
                if let Some(renderer) = b.renderer.as_mut() {
                    renderer.resize(pw, ph);
                }
            })?;
        }

        Ok(())
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Folio Deck starting...");

        let document = document()?;
        let settings = Settings::load();

        setup_background(&document, &settings)?;
        let deck = setup_deck(&document, &settings)?;
        setup_blaster(&document, deck, &settings)?;

        log::info!("Folio Deck running!");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_page::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use folio_deck::nav::SectionLayout;
    use folio_deck::view::LogRenderer;
    use folio_deck::{Deck, DeckLayout, Settings};

    env_logger::init();
    log::info!("Folio Deck (native) starting...");
    log::info!("Native mode only replays a scripted session - serve the wasm build for the page");

    let settings = Settings::load();
    let layout = DeckLayout::new(vec![
        SectionLayout::new("About", 3),
        SectionLayout::new("Experience", 4),
        SectionLayout::new("Contact", 1),
    ]);
    let mut deck = Deck::with_threshold(layout, LogRenderer::default(), settings.tap_threshold);

    // Swipe left, swipe up twice, then a few keys (including rejected ones)
    let swipes = [
        ((400.0, 300.0), (200.0, 310.0)),
        ((300.0, 600.0), (305.0, 400.0)),
        ((300.0, 600.0), (290.0, 450.0)),
    ];
    for ((x0, y0), (x1, y1)) in swipes {
        deck.pointer_down(x0, y0);
        deck.pointer_up(x1, y1);
    }
    for key in ["ArrowRight", "ArrowRight", "ArrowUp", "ArrowLeft", "ArrowLeft", "ArrowLeft"] {
        deck.key_down(key);
    }

    println!(
        "\nFinal position: column {}, rows {:?} ({} renders)",
        deck.state().column(),
        deck.state().rows(),
        deck.renderer().frames
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

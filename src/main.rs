//! Elktrack entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, HtmlInputElement, KeyboardEvent};

    use elktrack::audio::Microphone;
    use elktrack::consts::*;
    use elktrack::grid::{GridGame, Map, SeededOdds};
    use elktrack::platform::LocalStore;
    use elktrack::platform::input::{SceneKey, direction_for_code, scene_key};
    use elktrack::renderer::{CanvasSurface, Sprite};
    use elktrack::settings::{SCALE_RANGE, VPOS_RANGE};
    use elktrack::sim::{AudioTrigger, FrameInput, Scene};
    use elktrack::Settings;

    /// Grid map size in cells
    const GRID_MAP_SIZE: usize = 128;

    /// Elk crossing page state
    struct ElkApp {
        scene: Scene,
        surface: CanvasSurface,
        settings: Settings,
        store: LocalStore,
        microphone: Option<Microphone>,
        /// Key pressed since the last frame
        key_pressed: bool,
    }

    impl ElkApp {
        fn frame(&mut self, time: f64) {
            let mut triggered = std::mem::take(&mut self.key_pressed);
            if let Some(mic) = self.microphone.as_mut() {
                triggered |= mic.triggered(&AudioTrigger::new(self.settings.sensitivity));
            }
            self.scene.tick(
                FrameInput {
                    now_ms: time,
                    triggered,
                },
                &mut self.surface,
                &self.settings,
            );
        }
    }

    /// Grid game page state
    struct GridApp {
        game: GridGame,
        odds: SeededOdds,
        board: Element,
        info: Element,
        cells: Vec<Element>,
    }

    impl GridApp {
        /// Size the viewport to the window and rebuild the cell spans
        fn rebuild(&mut self, document: &Document, css_w: f64, css_h: f64) -> Result<(), JsValue> {
            let cols = (css_w / TILE_PX).floor().max(1.0) as usize;
            let rows = ((css_h / TILE_PX).floor() - 1.0).max(1.0) as usize;
            self.game.resize(cols, rows);
            let vp = self.game.viewport;

            self.board.set_inner_html("");
            self.board.set_attribute(
                "style",
                &format!(
                    "display: grid; font-size: {}px; grid-template-columns: repeat({}, 1fr)",
                    css_w / vp.width as f64,
                    vp.width
                ),
            )?;

            self.cells.clear();
            for _ in 0..vp.width * vp.height {
                let span = document.create_element("span")?;
                span.set_class_name("tile");
                self.board.append_child(&span)?;
                self.cells.push(span);
            }
            Ok(())
        }

        fn frame(&mut self, _time: f64) {
            let width = self.game.viewport.width;
            let mut buf = [0u8; 4];
            for (row, line) in self.game.visible_rows().iter().enumerate() {
                for (col, glyph) in line.chars().enumerate() {
                    if let Some(cell) = self.cells.get(row * width + col) {
                        cell.set_text_content(Some(glyph.encode_utf8(&mut buf)));
                    }
                }
            }
            self.info.set_text_content(Some(&self.game.hud()));
        }
    }

    fn window_size() -> (f64, f64) {
        let Some(window) = web_sys::window() else {
            return (0.0, 0.0);
        };
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        (w, h)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
        let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;

        match body.get_attribute("data-toy").as_deref() {
            Some("grid") => run_grid(&document, &body),
            _ => run_elk(&document, &body),
        }
    }

    fn run_elk(document: &Document, body: &Element) -> Result<(), JsValue> {
        log::info!("Elk crossing starting...");

        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        body.append_child(&canvas)?;

        let mut surface = CanvasSurface::new(canvas)?;
        surface.load_sprite(Sprite::Elk, ELK_WIDTH as u32, ELK_HEIGHT as u32)?;
        let (w, h) = window_size();
        surface.resize(w, h, CANVAS_PIXEL_RATIO);

        let store = LocalStore::open();
        let settings = Settings::load(&store);

        let app = Rc::new(RefCell::new(ElkApp {
            scene: Scene::elk_crossing(),
            surface,
            settings,
            store,
            microphone: None,
            key_pressed: false,
        }));

        setup_sliders(document, body, app.clone())?;
        setup_elk_input(app.clone());
        request_microphone(app.clone());

        request_animation_frame(app, ElkApp::frame);
        log::info!("Elk crossing running!");
        Ok(())
    }

    fn setup_sliders(document: &Document, body: &Element, app: Rc<RefCell<ElkApp>>) -> Result<(), JsValue> {
        let ui = document.create_element("div")?;
        ui.set_attribute(
            "style",
            "position: absolute; top: 0; right: 0; display: flex; flex-direction: column",
        )?;

        let settings = app.borrow().settings.clone();
        {
            let app = app.clone();
            add_slider(document, &ui, "scale", SCALE_RANGE, settings.scale, move |v| {
                let mut a = app.borrow_mut();
                a.settings.set_scale(v);
                let ElkApp { settings, store, .. } = &mut *a;
                settings.save(store);
            })?;
        }
        {
            let app = app.clone();
            add_slider(document, &ui, "vpos", VPOS_RANGE, settings.vpos, move |v| {
                let mut a = app.borrow_mut();
                a.settings.set_vpos(v);
                let ElkApp { settings, store, .. } = &mut *a;
                settings.save(store);
            })?;
        }
        add_slider(
            document,
            &ui,
            "sensitivity",
            (0, u8::MAX as i32),
            settings.sensitivity as i32,
            move |v| {
                let mut a = app.borrow_mut();
                a.settings.set_sensitivity(v.clamp(0, u8::MAX as i32) as u8);
                let ElkApp { settings, store, .. } = &mut *a;
                settings.save(store);
            },
        )?;

        body.append_child(&ui)?;
        Ok(())
    }

    fn add_slider(
        document: &Document,
        ui: &Element,
        label: &str,
        (min, max): (i32, i32),
        value: i32,
        mut on_change: impl FnMut(i32) + 'static,
    ) -> Result<(), JsValue> {
        let label_el = document.create_element("label")?;
        label_el.set_text_content(Some(label));
        label_el.set_attribute("style", "font-family: monospace")?;

        let input: HtmlInputElement = document.create_element("input")?.dyn_into()?;
        input.set_type("range");
        input.set_min(&min.to_string());
        input.set_max(&max.to_string());
        input.set_value(&value.to_string());

        let input_clone = input.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            match input_clone.value().parse::<i32>() {
                Ok(v) => on_change(v),
                Err(e) => log::warn!("Ignoring slider value: {}", e),
            }
        });
        input.set_onchange(Some(closure.as_ref().unchecked_ref()));
        closure.forget();

        ui.append_child(&label_el)?;
        ui.append_child(&input)?;
        Ok(())
    }

    fn setup_elk_input(app: Rc<RefCell<ElkApp>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Escape restarts the crossing; any other key triggers like a loud sound.
        // A key press is a user gesture, so also wake a suspended audio context.
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut app = app.borrow_mut();
                if let Some(mic) = app.microphone.as_ref() {
                    mic.resume();
                }
                match scene_key(&event.key()) {
                    SceneKey::Restart => app.scene.reset(),
                    SceneKey::Trigger => app.key_pressed = true,
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Resize
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let (w, h) = window_size();
                app.borrow().surface.resize(w, h, CANVAS_PIXEL_RATIO);
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_microphone(app: Rc<RefCell<ElkApp>>) {
        wasm_bindgen_futures::spawn_local(async move {
            match Microphone::request().await {
                Ok(mic) => app.borrow_mut().microphone = Some(mic),
                Err(e) => log::warn!("Microphone unavailable - audio trigger disabled: {:?}", e),
            }
        });
    }

    fn run_grid(document: &Document, body: &Element) -> Result<(), JsValue> {
        log::info!("Grid explorer starting...");

        let root = document
            .get_element_by_id("root")
            .unwrap_or_else(|| body.clone());
        let board = document.create_element("div")?;
        let info = document.create_element("div")?;
        root.append_child(&board)?;
        root.append_child(&info)?;

        let seed = js_sys::Date::now() as u64;
        let map = Map::generate(GRID_MAP_SIZE, GRID_MAP_SIZE, &mut rand_pcg::Pcg32::new(seed, 0xa02b_dbf7_bb3c_0a7));
        log::info!("Map generated with seed: {}", seed);

        let app = Rc::new(RefCell::new(GridApp {
            game: GridGame::new(map, 1, 1),
            odds: SeededOdds::new(seed),
            board,
            info,
            cells: Vec::new(),
        }));

        let (w, h) = window_size();
        app.borrow_mut().rebuild(document, w, h)?;
        setup_grid_input(app.clone());

        request_animation_frame(app, GridApp::frame);
        log::info!("Grid explorer running!");
        Ok(())
    }

    fn setup_grid_input(app: Rc<RefCell<GridApp>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Arrow keys
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(direction) = direction_for_code(&event.code()) {
                    event.prevent_default();
                    let mut a = app.borrow_mut();
                    let GridApp { game, odds, .. } = &mut *a;
                    let outcome = game.step(direction, odds);
                    log::debug!("{:?} -> {:?}", direction, outcome);
                }
            });
            let _ = document_add_keydown(&window, &closure);
            closure.forget();
        }

        // Resize
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                    return;
                };
                let (w, h) = window_size();
                if let Err(e) = app.borrow_mut().rebuild(&document, w, h) {
                    log::warn!("Grid rebuild failed: {:?}", e);
                }
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn document_add_keydown(
        window: &web_sys::Window,
        closure: &Closure<dyn FnMut(KeyboardEvent)>,
    ) -> Result<(), JsValue> {
        let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
        document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
    }

    fn request_animation_frame<T: 'static>(app: Rc<RefCell<T>>, frame: fn(&mut T, f64)) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame(&mut app.borrow_mut(), time);
            request_animation_frame(app, frame);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_app::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Elktrack (native) starting...");
    log::info!("The toys need a browser - run with `trunk serve`; showing headless demos instead");

    demo::elk_crossing();
    demo::grid_walk();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use elktrack::Settings;
    use elktrack::consts::ELK_WIDTH;
    use elktrack::grid::{Direction, GridGame, Map, SeededOdds};
    use elktrack::renderer::RecordingSurface;
    use elktrack::sim::{FrameInput, Scene};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    const SEED: u64 = 2024;

    /// 40 simulated seconds at 60 Hz with a clap every 7 seconds and a restart at 30
    pub fn elk_crossing() {
        let mut scene = Scene::elk_crossing();
        let mut surface = RecordingSurface::new(1600.0, 1200.0);
        let settings = Settings::default();

        for frame in 0..40 * 60u32 {
            let now_ms = frame as f64 * 1000.0 / 60.0;
            let triggered = frame % (7 * 60) == 0;
            if frame == 30 * 60 {
                scene.reset();
            }
            scene.tick(FrameInput { now_ms, triggered }, &mut surface, &settings);

            if frame % 60 == 0 {
                if let Some((_, rect)) = surface.sprites().next() {
                    println!("t={:>2}s elk x={:>8.1}", frame / 60, rect.min.x + ELK_WIDTH / 2.0);
                }
            }
        }
    }

    /// Random walk over a generated map
    pub fn grid_walk() {
        let mut rng = Pcg32::seed_from_u64(SEED);
        let map = Map::generate(48, 32, &mut rng);
        let mut game = GridGame::new(map, 24, 12);
        let mut odds = SeededOdds::new(SEED);
        let dirs = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

        for _ in 0..200 {
            let direction = dirs[rng.random_range(0..dirs.len())];
            game.step(direction, &mut odds);
        }

        for row in game.visible_rows() {
            println!("{}", row);
        }
        println!("{}", game.hud());
    }
}

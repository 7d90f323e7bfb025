//! Bouncing Particles entry point
//!
//! In the browser this wires the canvas, pointer and resize events to the
//! simulation and runs it on `requestAnimationFrame`. Natively it steps a
//! headless world and logs what happened.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

    use bouncing_particles::SimConfig;
    use bouncing_particles::renderer::CanvasSurface;
    use bouncing_particles::sim::World;

    /// App instance holding all state
    struct App {
        world: World,
        surface: CanvasSurface,
        canvas: HtmlCanvasElement,
        window: Window,
    }

    impl App {
        /// Run one simulation frame
        fn frame(&mut self) {
            let stats = self.world.frame(&mut self.surface);
            if self.world.frame_count % 600 == 0 {
                log::debug!("Frame {}: {:?}", self.world.frame_count, stats);
            }
        }

        /// Match the canvas to the window and re-seed
        fn resize(&mut self) {
            let (w, h) = window_size(&self.window);
            self.canvas.set_width(w);
            self.canvas.set_height(h);
            self.world.on_resize(w as f32, h as f32);
        }
    }

    fn window_size(window: &Window) -> (u32, u32) {
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        (w as u32, h as u32)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Bouncing Particles starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .query_selector("canvas")
            .ok()
            .flatten()
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (width, height) = window_size(&window);
        canvas.set_width(width);
        canvas.set_height(height);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let config = SimConfig::load();
        let seed = js_sys::Date::now() as u64;
        let world = match World::new(config, width as f32, height as f32, seed) {
            Ok(world) => world,
            Err(e) => {
                log::error!("Bad config ({}), using defaults", e);
                World::new(SimConfig::default(), width as f32, height as f32, seed)
                    .expect("default config is valid")
            }
        };
        log::info!("World initialized with seed: {}", seed);

        let app = Rc::new(RefCell::new(App {
            world,
            surface: CanvasSurface::new(ctx),
            canvas,
            window: window.clone(),
        }));

        setup_input_handlers(&window, app.clone());

        // Start animation loop
        request_animation_frame(&window, app);

        log::info!("Bouncing Particles running!");
    }

    fn setup_input_handlers(window: &Window, app: Rc<RefCell<App>>) {
        // Pointer position in window coordinates
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                app.borrow_mut()
                    .world
                    .on_pointer_move(event.client_x() as f32, event.client_y() as f32);
            });
            let _ = window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Resize - canvas follows the window, particles are re-seeded
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().resize();
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(window: &Window, app: Rc<RefCell<App>>) {
        let closure = Closure::once(move |_time: f64| {
            animation_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn animation_loop(app: Rc<RefCell<App>>) {
        let window = {
            let mut a = app.borrow_mut();
            a.frame();
            a.window.clone()
        };
        request_animation_frame(&window, app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use bouncing_particles::SimConfig;
    use bouncing_particles::renderer::RecordingSurface;
    use bouncing_particles::sim::{FrameStats, World};
    use serde::Serialize;
    use std::time::{SystemTime, UNIX_EPOCH};

    /// Frames stepped by the headless run (10 s at 60 Hz)
    const HEADLESS_FRAMES: u64 = 600;

    #[derive(Serialize)]
    struct Summary {
        seed: u64,
        particles: usize,
        frames: u64,
        total_resolved: u64,
        last_frame: FrameStats,
        last_frame_draw_calls: usize,
    }

    env_logger::init();
    log::info!("Bouncing Particles (native) starting...");
    log::info!("Native mode runs headless - build for wasm32 to see the canvas");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut world = match World::new(SimConfig::load(), 1920.0, 1080.0, seed) {
        Ok(world) => world,
        Err(e) => {
            log::error!("Invalid config: {}", e);
            std::process::exit(1);
        }
    };
    log::info!("World initialized with seed: {}", seed);

    let mut surface = RecordingSurface::new();
    let mut total_resolved = 0u64;
    let mut last_frame = FrameStats::default();
    for _ in 0..HEADLESS_FRAMES {
        last_frame = world.frame(&mut surface);
        total_resolved += u64::from(last_frame.resolved);
    }

    let summary = Summary {
        seed,
        particles: world.particles.len(),
        frames: world.frame_count,
        total_resolved,
        last_frame,
        last_frame_draw_calls: surface.commands.len(),
    };
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize summary: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

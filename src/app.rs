use std::{cell::RefCell, rc::Rc};

use log::{debug, error};
use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
use scene::{Scene, SceneConfig};
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

use crate::{
    callbacks::{on_key_down, on_resize, snapshot, toggle_fullscreen, toggle_running},
    clear_interval,
    draw::CanvasSurface,
    set_interval, window,
};

const CONFIG_ATTRIBUTE: &str = "config";

/// Repeating timer driving the scene. Only one interval is installed at a time.
pub struct Ticker {
    callback: Closure<dyn FnMut()>,
    interval_ms: i32,
    handle: Option<i32>,
}

impl Ticker {
    fn new(callback: Closure<dyn FnMut()>, interval_ms: u32) -> Ticker {
        Ticker {
            callback,
            interval_ms: interval_ms.min(i32::MAX as u32) as i32,
            handle: None,
        }
    }

    pub fn start(&mut self) -> Result<(), JsValue> {
        if self.handle.is_none() {
            self.handle = Some(set_interval(&self.callback, self.interval_ms)?);
        }

        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            clear_interval(handle);
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn config_error(err: impl ToString) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Reads the configuration from `value`, then the canvas' `data-config` attribute, then defaults.
fn resolve_config(canvas: &HtmlCanvasElement, value: JsValue) -> Result<SceneConfig, JsValue> {
    if !value.is_undefined() && !value.is_null() {
        return Ok(serde_wasm_bindgen::from_value(value)?);
    }

    match canvas.dataset().get(CONFIG_ATTRIBUTE) {
        Some(json) => serde_json::from_str(&json).map_err(config_error),
        None => Ok(SceneConfig::default()),
    }
}

/// A fireworks show bound to one canvas.
#[wasm_bindgen]
pub struct Fireworks {
    scene: Rc<RefCell<Scene>>,
    surface: Rc<RefCell<CanvasSurface>>,
    ticker: Rc<RefCell<Ticker>>,
    listening: bool,
}

#[wasm_bindgen]
impl Fireworks {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config: JsValue) -> Result<Fireworks, JsValue> {
        let config = resolve_config(&canvas, config)?;
        let seed = config
            .seed
            .unwrap_or_else(|| (js_sys::Math::random() * u64::MAX as f64) as u64);
        let interval_ms = config.interval_ms;

        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let scene = Scene::new(config, ChaCha8Rng::seed_from_u64(seed)).map_err(config_error)?;
        let scene = Rc::new(RefCell::new(scene));
        let surface = Rc::new(RefCell::new(CanvasSurface::new(canvas, context)));

        on_resize(&surface)?;

        let callback = {
            let scene = scene.clone();
            let surface = surface.clone();

            Closure::<dyn FnMut()>::new(move || {
                let mut surface = surface.borrow_mut();
                scene.borrow_mut().tick(&mut *surface);
            })
        };

        debug!("fireworks created with seed {seed}");

        Ok(Fireworks {
            scene,
            surface,
            ticker: Rc::new(RefCell::new(Ticker::new(callback, interval_ms))),
            listening: false,
        })
    }

    /// Starts the show and wires up the resize and keyboard listeners.
    pub fn run(&mut self) -> Result<(), JsValue> {
        self.scene.borrow_mut().start();
        self.ticker.borrow_mut().start()?;

        if !self.listening {
            self.listen()?;
            self.listening = true;
        }

        Ok(())
    }

    /// Stops the show and removes its timer.
    pub fn stop(&mut self) {
        self.scene.borrow_mut().stop();
        self.ticker.borrow_mut().stop();
    }

    pub fn toggle_running(&mut self) -> Result<bool, JsValue> {
        toggle_running(&self.scene, &self.ticker)
    }

    pub fn is_running(&self) -> bool {
        self.scene.borrow().is_running()
    }

    pub fn resize(&mut self) -> Result<(), JsValue> {
        on_resize(&self.surface)
    }

    pub fn snapshot(&self) -> Result<(), JsValue> {
        snapshot(self.surface.borrow().canvas())
    }

    pub fn toggle_fullscreen(&self) -> Result<(), JsValue> {
        toggle_fullscreen()
    }

    /// Resumes drawing after the canvas context failed.
    pub fn reattach(&mut self) {
        self.scene.borrow_mut().reattach();
    }

    pub fn rocket_count(&self) -> usize {
        self.scene.borrow().rockets().len()
    }

    pub fn explosion_count(&self) -> usize {
        self.scene.borrow().explosions().len()
    }

    fn listen(&self) -> Result<(), JsValue> {
        {
            let surface = Rc::downgrade(&self.surface);
            let closure = Closure::<dyn FnMut(_)>::new(move |_: JsValue| {
                if let Some(surface) = surface.upgrade() {
                    if let Err(err) = on_resize(&surface) {
                        error!("resize failed: {err:?}");
                    }
                }
            });
            window().add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let scene = Rc::downgrade(&self.scene);
            let ticker = Rc::downgrade(&self.ticker);
            let canvas = self.surface.borrow().canvas().clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let (Some(scene), Some(ticker)) = (scene.upgrade(), ticker.upgrade()) {
                    if let Err(err) = on_key_down(&scene, &ticker, &canvas, event) {
                        error!("key handler failed: {err:?}");
                    }
                }
            });
            window().add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }
}

impl Drop for Fireworks {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use wasm_bindgen_test::*;

    use super::*;
    use crate::document;

    wasm_bindgen_test_configure!(run_in_browser);

    fn attached_canvas() -> HtmlCanvasElement {
        let canvas = document()
            .create_element("canvas")
            .unwrap()
            .dyn_into::<HtmlCanvasElement>()
            .unwrap();

        document().body().unwrap().append_child(&canvas).unwrap();

        canvas
    }

    #[wasm_bindgen_test]
    fn stop_clears_the_interval() {
        let mut fireworks = Fireworks::new(attached_canvas(), JsValue::UNDEFINED).unwrap();

        fireworks.run().unwrap();
        assert!(fireworks.is_running());
        assert!(fireworks.ticker.borrow().handle.is_some());

        fireworks.stop();
        assert!(!fireworks.is_running());
        assert!(fireworks.ticker.borrow().handle.is_none());
    }

    #[wasm_bindgen_test]
    fn dropping_the_show_releases_its_timer() {
        let mut fireworks = Fireworks::new(attached_canvas(), JsValue::UNDEFINED).unwrap();

        fireworks.run().unwrap();

        let ticker = Rc::downgrade(&fireworks.ticker);
        let scene = Rc::downgrade(&fireworks.scene);

        drop(fireworks);

        assert!(ticker.upgrade().is_none());
        assert!(scene.upgrade().is_none());
    }
}

mod app;
mod callbacks;
mod draw;

pub use app::Fireworks;

use wasm_bindgen::{prelude::*, JsCast};

fn window() -> web_sys::Window {
    web_sys::window().expect("no global `window` exists")
}

fn document() -> web_sys::Document {
    window()
        .document()
        .expect("should have a document on window")
}

fn set_interval(f: &Closure<dyn FnMut()>, timeout: i32) -> Result<i32, JsValue> {
    window().set_interval_with_callback_and_timeout_and_arguments_0(
        f.as_ref().unchecked_ref(),
        timeout,
    )
}

fn clear_interval(handle: i32) {
    window().clear_interval_with_handle(handle);
}

#[wasm_bindgen(start)]
fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Warn
    };

    console_log::init_with_level(level).map_err(|err| JsValue::from_str(&err.to_string()))?;

    Ok(())
}

use std::{cell::RefCell, rc::Rc};

use log::{debug, warn};
use scene::Scene;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlCanvasElement, HtmlImageElement, KeyboardEvent};

use crate::{app::Ticker, document, draw::CanvasSurface, window};

const SNAPSHOT_TARGET: &str = "The firework screenshot";

/// Sizes the canvas to the page width and the full screen height.
pub fn on_resize(surface: &Rc<RefCell<CanvasSurface>>) -> Result<(), JsValue> {
    let width = document()
        .body()
        .map(|body| body.client_width().max(0) as u32)
        .unwrap_or_default();
    let height = window().screen()?.height()?.max(0) as u32;

    surface.borrow().set_size(width, height);

    debug!("canvas resized to {width}x{height}");

    Ok(())
}

pub fn on_key_down(
    scene: &Rc<RefCell<Scene>>,
    ticker: &Rc<RefCell<Ticker>>,
    canvas: &HtmlCanvasElement,
    event: KeyboardEvent,
) -> Result<(), JsValue> {
    match event.code().as_str() {
        "Space" => {
            toggle_running(scene, ticker)?;
            event.prevent_default();
        }
        "KeyF" => toggle_fullscreen()?,
        "KeyS" => snapshot(canvas)?,
        _ => (),
    };

    Ok(())
}

/// Pauses or resumes the show, removing the timer while paused.
pub fn toggle_running(
    scene: &Rc<RefCell<Scene>>,
    ticker: &Rc<RefCell<Ticker>>,
) -> Result<bool, JsValue> {
    let running = scene.borrow_mut().toggle_running();

    if running {
        ticker.borrow_mut().start()?;
    } else {
        ticker.borrow_mut().stop();
    }

    Ok(running)
}

pub fn toggle_fullscreen() -> Result<(), JsValue> {
    let document = document();

    if document.fullscreen_element().is_some() {
        document.exit_fullscreen();
    } else if let Some(element) = document.document_element() {
        element.request_fullscreen()?;
    }

    Ok(())
}

/// Opens a blank window showing the canvas' current pixels as a PNG.
pub fn snapshot(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let source = canvas.to_data_url_with_type("image/png")?;

    let popup = match window().open_with_url_and_target("about:blank", SNAPSHOT_TARGET)? {
        Some(popup) => popup,
        None => {
            warn!("snapshot window was blocked");
            return Err(JsValue::from_str("snapshot window was blocked"));
        }
    };

    let popup_document = popup
        .document()
        .ok_or_else(|| JsValue::from_str("snapshot window has no document"))?;

    let image = popup_document
        .create_element("img")?
        .dyn_into::<HtmlImageElement>()?;

    image.set_src(&source);

    match popup_document.document_element() {
        Some(root) => {
            root.append_child(&image)?;
        }
        None => return Err(JsValue::from_str("snapshot window has no root element")),
    }

    Ok(())
}

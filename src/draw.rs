use scene::{CompositeMode, FillStyle, RadialGradient, RenderSurface, Rgba, SurfaceError};
use wasm_bindgen::JsValue;
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement};

const SOURCE_OVER: &str = "source-over";
const LIGHTER: &str = "lighter";

fn surface_error(value: JsValue) -> SurfaceError {
    SurfaceError(format!("{value:?}"))
}

/// [`RenderSurface`] backed by a canvas element and its 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, context: CanvasRenderingContext2d) -> CanvasSurface {
        CanvasSurface { canvas, context }
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn set_size(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn gradient(&self, gradient: &RadialGradient) -> Result<CanvasGradient, JsValue> {
        let (x, y) = gradient.center;
        let canvas_gradient = self.context.create_radial_gradient(
            x,
            y,
            gradient.inner_radius,
            x,
            y,
            gradient.outer_radius,
        )?;

        for stop in &gradient.stops {
            canvas_gradient.add_color_stop(stop.offset as f32, &stop.color.to_string())?;
        }

        Ok(canvas_gradient)
    }

    #[allow(deprecated)]
    fn set_fill(&self, style: &FillStyle) -> Result<(), JsValue> {
        match style {
            FillStyle::Solid(color) => self
                .context
                .set_fill_style(&JsValue::from_str(&color.to_string())),
            FillStyle::Radial(gradient) => {
                let canvas_gradient = self.gradient(gradient)?;
                self.context.set_fill_style(&canvas_gradient);
            }
        }

        Ok(())
    }
}

impl RenderSurface for CanvasSurface {
    fn set_composite_mode(&mut self, mode: CompositeMode) -> Result<(), SurfaceError> {
        let operation = match mode {
            CompositeMode::Normal => SOURCE_OVER,
            CompositeMode::Additive => LIGHTER,
        };

        self.context
            .set_global_composite_operation(operation)
            .map_err(surface_error)
    }

    #[allow(deprecated)]
    fn fill_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgba,
    ) -> Result<(), SurfaceError> {
        if !self.canvas.is_connected() {
            return Err(SurfaceError("canvas is detached from the document".to_string()));
        }

        self.context
            .set_fill_style(&JsValue::from_str(&color.to_string()));
        self.context.fill_rect(x, y, width, height);

        Ok(())
    }

    fn fill_circle(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        style: &FillStyle,
    ) -> Result<(), SurfaceError> {
        self.context.begin_path();
        self.context
            .arc(x, y, radius, 0.0, std::f64::consts::PI * 2.0)
            .map_err(surface_error)?;
        self.set_fill(style).map_err(surface_error)?;
        self.context.fill();

        Ok(())
    }

    fn width(&self) -> f64 {
        self.canvas.width() as f64
    }

    fn height(&self) -> f64 {
        self.canvas.height() as f64
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use scene::{ColorStop, Rgb};
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    use super::*;
    use crate::document;

    wasm_bindgen_test_configure!(run_in_browser);

    fn detached_surface() -> CanvasSurface {
        let canvas = document()
            .create_element("canvas")
            .unwrap()
            .dyn_into::<HtmlCanvasElement>()
            .unwrap();
        let context = canvas
            .get_context("2d")
            .unwrap()
            .unwrap()
            .dyn_into::<CanvasRenderingContext2d>()
            .unwrap();

        canvas.set_width(64);
        canvas.set_height(64);

        CanvasSurface::new(canvas, context)
    }

    fn attach(surface: &CanvasSurface) {
        document()
            .body()
            .unwrap()
            .append_child(surface.canvas())
            .unwrap();
    }

    #[wasm_bindgen_test]
    fn fills_radial_gradient_additively() {
        let mut surface = detached_surface();
        let style = FillStyle::Radial(RadialGradient {
            center: (32.0, 32.0),
            inner_radius: 1.0,
            outer_radius: 5.0,
            stops: vec![
                ColorStop::new(0.0, Rgb::WHITE.with_alpha(0.55)),
                ColorStop::new(1.0, Rgb(255, 0, 0).with_alpha(0.03)),
            ],
        });

        attach(&surface);

        surface.set_composite_mode(CompositeMode::Additive).unwrap();
        surface.fill_circle(32.0, 32.0, 21.0, &style).unwrap();

        assert_eq!(surface.context.global_composite_operation().unwrap(), LIGHTER);
        assert_eq!((surface.width(), surface.height()), (64.0, 64.0));
    }

    #[wasm_bindgen_test]
    fn detached_canvas_refuses_to_clear() {
        let mut surface = detached_surface();
        let black = Rgb::BLACK.with_alpha(0.4);

        assert!(surface.fill_rect(0.0, 0.0, 64.0, 64.0, black).is_err());

        attach(&surface);

        assert!(surface.fill_rect(0.0, 0.0, 64.0, 64.0, black).is_ok());
    }
}

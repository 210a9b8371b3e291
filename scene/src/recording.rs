use crate::{CompositeMode, FillStyle, RenderSurface, Rgba, SurfaceError};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Composite(CompositeMode),
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgba,
    },
    FillCircle {
        x: f64,
        y: f64,
        radius: f64,
        style: FillStyle,
    },
}

/// Surface double that remembers every call, optionally failing after `fail_after` of them.
pub struct RecordingSurface {
    pub width: f64,
    pub height: f64,
    pub calls: Vec<Call>,
    pub fail_after: Option<usize>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> RecordingSurface {
        RecordingSurface {
            width,
            height,
            calls: Vec::new(),
            fail_after: None,
        }
    }

    fn record(&mut self, call: Call) -> Result<(), SurfaceError> {
        if let Some(limit) = self.fail_after {
            if self.calls.len() >= limit {
                return Err(SurfaceError("context lost".to_string()));
            }
        }

        self.calls.push(call);

        Ok(())
    }

    pub fn circles(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, Call::FillCircle { .. }))
            .count()
    }
}

impl RenderSurface for RecordingSurface {
    fn set_composite_mode(&mut self, mode: CompositeMode) -> Result<(), SurfaceError> {
        self.record(Call::Composite(mode))
    }

    fn fill_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgba,
    ) -> Result<(), SurfaceError> {
        self.record(Call::FillRect {
            x,
            y,
            width,
            height,
            color,
        })
    }

    fn fill_circle(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        style: &FillStyle,
    ) -> Result<(), SurfaceError> {
        self.record(Call::FillCircle {
            x,
            y,
            radius,
            style: style.clone(),
        })
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }
}

use std::fmt;

use crate::Rgba;

/// Errors raised by a [`RenderSurface`] that can no longer be drawn to.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceError(pub String);

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SurfaceError: {}", self.0)
    }
}

impl std::error::Error for SurfaceError {}

/// Pixel blending rule applied to subsequent fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeMode {
    /// Paint over existing pixels (`source-over`).
    Normal,
    /// Add to existing pixels (`lighter`).
    Additive,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgba,
}

impl ColorStop {
    pub fn new(offset: f64, color: Rgba) -> ColorStop {
        ColorStop { offset, color }
    }
}

/// Two concentric circles sharing a centre, blended through `stops`.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: (f64, f64),
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub stops: Vec<ColorStop>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FillStyle {
    Solid(Rgba),
    Radial(RadialGradient),
}

/// The 2D drawing surface a [`Scene`](crate::Scene) renders into.
pub trait RenderSurface {
    fn set_composite_mode(&mut self, mode: CompositeMode) -> Result<(), SurfaceError>;

    fn fill_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgba,
    ) -> Result<(), SurfaceError>;

    /// Fills a full circle of `radius` around `(x, y)`.
    fn fill_circle(
        &mut self,
        x: f64,
        y: f64,
        radius: f64,
        style: &FillStyle,
    ) -> Result<(), SurfaceError>;

    fn width(&self) -> f64;

    fn height(&self) -> f64;
}

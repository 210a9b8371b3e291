use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque colour, written to the canvas as `rgb(r, g, b)`.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba {
            r: self.0,
            g: self.1,
            b: self.2,
            a: alpha,
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.0, self.1, self.2)
    }
}

/// A translucent colour, written to the canvas as `rgba(r, g, b, a)`.
#[derive(PartialEq, Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl From<Rgb> for Rgba {
    fn from(rgb: Rgb) -> Self {
        rgb.with_alpha(1.0)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Burst colours a cluster may be tinted with.
pub const PALETTE: [Rgb; 9] = [
    Rgb(255, 0, 0),
    Rgb(0, 255, 0),
    Rgb(0, 0, 255),
    Rgb(255, 255, 0),
    Rgb(255, 0, 255),
    Rgb(0, 255, 255),
    Rgb(255, 255, 204),
    Rgb(255, 204, 255),
    Rgb(204, 255, 255),
];

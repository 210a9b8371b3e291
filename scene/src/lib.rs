mod color;
pub use color::*;

mod config;
pub use config::*;

mod particle;
pub use particle::*;

mod scene;
pub use scene::*;

mod surface;
pub use surface::*;

#[cfg(test)]
mod recording;

use log::{debug, trace, warn};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::{
    CompositeMode, ConfigError, Explosion, Particle, RenderSurface, Rocket, SceneConfig,
    SurfaceError,
};

/// A [`Scene`] owns every live rocket and explosion and steps them once per tick.
///
/// Rockets are launched from the bottom edge, burst into a cluster of explosions when their
/// fuse runs out, and each explosion fades away on its own.
pub struct Scene<R: Rng = ChaCha8Rng> {
    config: SceneConfig,
    rng: R,
    rockets: Vec<Rocket>,
    explosions: Vec<Explosion>,
    running: bool,
    surface_lost: bool,
    ticks: u64,
}

impl<R: Rng> Scene<R> {
    /// Instantiates a stopped [`Scene`] with empty collections.
    pub fn new(config: SceneConfig, rng: R) -> Result<Scene<R>, ConfigError> {
        config.validate()?;

        Ok(Scene {
            config,
            rng,
            rockets: Vec::new(),
            explosions: Vec::new(),
            running: false,
            surface_lost: false,
            ticks: 0,
        })
    }

    pub fn start(&mut self) {
        debug!("scene started at tick {}", self.ticks);
        self.running = true;
    }

    pub fn stop(&mut self) {
        debug!("scene stopped at tick {}", self.ticks);
        self.running = false;
    }

    /// Flips between running and paused, returning the new state.
    pub fn toggle_running(&mut self) -> bool {
        if self.running {
            self.stop();
        } else {
            self.start();
        }

        self.running
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether a drawing call has failed, after which ticks do nothing.
    pub fn surface_lost(&self) -> bool {
        self.surface_lost
    }

    /// Resumes ticking after the host has provided a working surface again.
    pub fn reattach(&mut self) {
        self.surface_lost = false;
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn rockets(&self) -> &[Rocket] {
        &self.rockets
    }

    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    pub fn push_rocket(&mut self, rocket: Rocket) {
        self.rockets.push(rocket);
    }

    pub fn push_explosion(&mut self, explosion: Explosion) {
        self.explosions.push(explosion);
    }

    /// Number of ticks that have run to completion.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Steps the simulation once and renders it to `surface`.
    ///
    /// Does nothing while paused or once the surface has been lost. A failing draw call stops
    /// drawing for the rest of the tick, but the particles are still stepped and compacted.
    pub fn tick<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) {
        if !self.running || self.surface_lost {
            return;
        }

        let mut drawn = self.clear(surface);
        let mut bursts = Vec::new();

        for rocket in self.rockets.iter_mut() {
            rocket.advance();

            if drawn.is_ok() {
                drawn = rocket.draw(surface);
            }

            if rocket.is_dead() {
                let index = self.rng.gen_range(0..self.config.palette.len());
                let color = self.config.palette[index];
                let position = rocket.position();

                trace!("burst at {position:?} in {color}");

                for _ in 0..self.config.cluster_size {
                    bursts.push(Explosion::burst(&mut self.rng, position, color));
                }
            }
        }

        for explosion in self.explosions.iter_mut() {
            explosion.advance();

            if drawn.is_ok() {
                drawn = explosion.draw(surface);
            }
        }

        self.explosions.append(&mut bursts);

        let (width, height) = (surface.width(), surface.height());

        for _ in 0..self.config.spawn_per_tick {
            let rocket = Rocket::launch(&mut self.rng, width, height, self.config.rocket_color);
            self.rockets.push(rocket);
        }

        self.rockets.retain(|rocket| !rocket.is_dead());
        self.explosions.retain(|explosion| !explosion.is_dead());

        self.ticks += 1;

        if let Err(err) = drawn {
            warn!("{err}, pausing the scene until a surface is reattached");
            self.surface_lost = true;
        }
    }

    fn clear<S: RenderSurface + ?Sized>(&self, surface: &mut S) -> Result<(), SurfaceError> {
        surface.set_composite_mode(CompositeMode::Normal)?;
        surface.fill_rect(
            0.0,
            0.0,
            surface.width(),
            surface.height(),
            self.config.clear_color,
        )
    }
}

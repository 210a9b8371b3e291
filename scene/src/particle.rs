use rand::Rng;

use crate::{ColorStop, CompositeMode, FillStyle, RadialGradient, RenderSurface, Rgb, SurfaceError};

/// Timing and appearance shared by every [`Particle`].
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    elapsed: u32,
    max_elapsed: u32,
    speed: f64,
    color: Rgb,
}

impl Sprite {
    pub const MIN_SPEED: f64 = 2.0;
    pub const MAX_SPEED: f64 = 5.0;

    pub fn new(color: Rgb, max_elapsed: u32, speed: f64) -> Sprite {
        Sprite {
            elapsed: 0,
            max_elapsed,
            speed,
            color,
        }
    }

    pub fn sample_speed<R: Rng>(rng: &mut R) -> f64 {
        rng.gen_range(Self::MIN_SPEED..Self::MAX_SPEED)
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn is_dead(&self) -> bool {
        self.elapsed >= self.max_elapsed
    }

    fn step(&mut self) {
        self.elapsed = self.elapsed.saturating_add(1);
    }
}

/// A timed, moving, drawable point.
pub trait Particle {
    fn sprite(&self) -> &Sprite;

    fn position(&self) -> (f64, f64);

    /// Moves the particle one tick along its heading and ages it by one.
    fn advance(&mut self);

    fn draw<S: RenderSurface + ?Sized>(&self, surface: &mut S) -> Result<(), SurfaceError>;

    fn is_dead(&self) -> bool {
        self.sprite().is_dead()
    }

    fn elapsed(&self) -> u32 {
        self.sprite().elapsed()
    }
}

/// A shell climbing from the bottom edge until its fuse runs out.
#[derive(Debug, Clone, PartialEq)]
pub struct Rocket {
    sprite: Sprite,
    position: (f64, f64),
    angle: f64,
}

impl Rocket {
    pub const MAX_ELAPSED: u32 = 70;
    pub const RADIUS: f64 = 3.0;
    pub const COLOR: Rgb = Rgb(56, 48, 48);
    /// Vertical gain per tick relative to horizontal drift.
    pub const LIFT: f64 = 9.0;
    pub const MIN_ANGLE: f64 = 240.0;
    pub const MAX_ANGLE: f64 = 310.0;
    /// Horizontal distance kept from either side when launching.
    pub const MARGIN: f64 = 100.0;

    pub fn new(position: (f64, f64), angle: f64, color: Rgb, speed: f64) -> Rocket {
        Rocket {
            sprite: Sprite::new(color, Self::MAX_ELAPSED, speed),
            position,
            angle,
        }
    }

    /// Launches a rocket from the bottom edge of a `width` by `height` surface.
    pub fn launch<R: Rng>(rng: &mut R, width: f64, height: f64, color: Rgb) -> Rocket {
        let speed = Sprite::sample_speed(rng);
        let angle = rng.gen_range(Self::MIN_ANGLE..Self::MAX_ANGLE);
        let x = if width > Self::MARGIN * 2.0 {
            rng.gen_range(Self::MARGIN..width - Self::MARGIN)
        } else {
            width / 2.0
        };

        Rocket::new((x, height), angle, color, speed)
    }

    pub fn with_elapsed(mut self, elapsed: u32) -> Rocket {
        self.sprite.elapsed = elapsed;
        self
    }

    /// Launch heading in degrees.
    pub fn angle(&self) -> f64 {
        self.angle
    }
}

impl Particle for Rocket {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn position(&self) -> (f64, f64) {
        self.position
    }

    fn advance(&mut self) {
        self.sprite.step();

        let angle = self.angle.to_radians();

        self.position.0 += angle.cos();
        self.position.1 += angle.sin() * Self::LIFT;
    }

    fn draw<S: RenderSurface + ?Sized>(&self, surface: &mut S) -> Result<(), SurfaceError> {
        surface.fill_circle(
            self.position.0,
            self.position.1,
            Self::RADIUS,
            &FillStyle::Solid(self.sprite.color.into()),
        )
    }
}

/// One glowing fragment of a burst cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct Explosion {
    sprite: Sprite,
    position: (f64, f64),
    angle: f64,
}

impl Explosion {
    pub const MAX_ELAPSED: u32 = 20;
    pub const CLUSTER_COUNT: usize = 16;
    pub const RADIUS: f64 = 21.0;
    pub const CLUSTER_RADIUS: f64 = 5.0;
    pub const CORE_RADIUS: f64 = 1.0;
    pub const CORE_ALPHA: f64 = 0.55;
    pub const TINT_ALPHA: f64 = 0.03;

    pub fn new(position: (f64, f64), angle: f64, color: Rgb, speed: f64) -> Explosion {
        Explosion {
            sprite: Sprite::new(color, Self::MAX_ELAPSED, speed),
            position,
            angle,
        }
    }

    /// Emits a fragment at `position` with a random heading and speed.
    pub fn burst<R: Rng>(rng: &mut R, position: (f64, f64), color: Rgb) -> Explosion {
        let speed = Sprite::sample_speed(rng);
        let angle = rng.gen_range(0.0..360.0);

        Explosion::new(position, angle, color, speed)
    }

    pub fn with_elapsed(mut self, elapsed: u32) -> Explosion {
        self.sprite.elapsed = elapsed;
        self
    }

    /// Emission heading in degrees.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn gradient(&self) -> RadialGradient {
        RadialGradient {
            center: self.position,
            inner_radius: Self::CORE_RADIUS,
            outer_radius: Self::CLUSTER_RADIUS,
            stops: vec![
                ColorStop::new(0.0, Rgb::WHITE.with_alpha(Self::CORE_ALPHA)),
                ColorStop::new(1.0, self.sprite.color.with_alpha(Self::TINT_ALPHA)),
            ],
        }
    }
}

impl Particle for Explosion {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn position(&self) -> (f64, f64) {
        self.position
    }

    fn advance(&mut self) {
        self.sprite.step();

        let angle = self.angle.to_radians();

        self.position.0 += angle.cos() * self.sprite.speed;
        self.position.1 += angle.sin() * self.sprite.speed;
    }

    fn draw<S: RenderSurface + ?Sized>(&self, surface: &mut S) -> Result<(), SurfaceError> {
        surface.set_composite_mode(CompositeMode::Additive)?;
        surface.fill_circle(
            self.position.0,
            self.position.1,
            Self::RADIUS,
            &FillStyle::Radial(self.gradient()),
        )
    }
}

//! Core state types for the ball simulation.
//!
//! - `Body`    one ball: position, velocity, fixed radius, color, drag flag
//! - `System`  indexed arena owning every body plus the frame counter
//! - `Palette` the fixed set of colors a body can take
//!
//! The body set is created once and never grows or shrinks.

use log::warn;
use nalgebra::Vector2;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::simulation::params::Parameters;

pub type NVec2 = Vector2<f64>;

/// Fixed color palette. Color never feeds back into the physics.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    #[default]
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    White,
}

impl Palette {
    pub const ALL: [Palette; 7] = [
        Palette::Red,
        Palette::Orange,
        Palette::Yellow,
        Palette::Green,
        Palette::Blue,
        Palette::Purple,
        Palette::White,
    ];

    /// Palette entry at `i`, used for number-key selection
    pub fn from_index(i: usize) -> Option<Palette> {
        Self::ALL.get(i).copied()
    }

    /// sRGB components in [0, 1]
    pub fn srgb(self) -> (f32, f32, f32) {
        match self {
            Palette::Red => (0.90, 0.22, 0.21),
            Palette::Orange => (0.98, 0.55, 0.0),
            Palette::Yellow => (0.99, 0.85, 0.21),
            Palette::Green => (0.26, 0.63, 0.28),
            Palette::Blue => (0.12, 0.53, 0.90),
            Palette::Purple => (0.56, 0.14, 0.67),
            Palette::White => (1.0, 1.0, 1.0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub x: NVec2, // position, arena units
    pub v: NVec2, // displacement per step
    radius: f64, // fixed after construction
    color: Palette,
    pub dragging: bool, // held by the pointer, integrator skips it
}

impl Body {
    /// Create a body after validating radius bounds and finiteness.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `radius` is outside `[min_radius, max_radius]`
    ///   or any component is NaN/inf.
    pub fn new(x: NVec2, v: NVec2, radius: f64, color: Palette, params: &Parameters) -> Result<Self> {
        if !radius.is_finite() || radius < params.min_radius || radius > params.max_radius {
            return Err(Error::InvalidParam(format!(
                "radius {radius} outside [{}, {}]",
                params.min_radius, params.max_radius
            )));
        }
        if !x.iter().all(|c| c.is_finite()) {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        if !v.iter().all(|c| c.is_finite()) {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        Ok(Self {
            x,
            v,
            radius,
            color,
            dragging: false,
        })
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// One Euler step with unit time: x += v. Held bodies do not move.
    #[inline]
    pub fn update(&mut self) {
        if !self.dragging {
            self.x += self.v;
        }
    }

    #[inline]
    pub fn color(&self) -> Palette {
        self.color
    }

    pub fn set_color(&mut self, color: Palette) {
        self.color = color;
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.iter().chain(self.v.iter()).all(|c| c.is_finite())
    }

    /// Recover from a non-finite state so one bad frame cannot poison the rest.
    /// Velocity is zeroed, position falls back to `last_x`. Returns true if
    /// anything was repaired.
    pub fn sanitize(&mut self, last_x: NVec2) -> bool {
        if self.is_finite() {
            return false;
        }
        warn!("non-finite body state x={:?} v={:?}, resetting", self.x, self.v);
        if !self.v.iter().all(|c| c.is_finite()) {
            self.v = NVec2::zeros();
        }
        if !self.x.iter().all(|c| c.is_finite()) {
            self.x = last_x;
            self.v = NVec2::zeros();
        }
        true
    }
}

#[derive(Debug, Clone, Default)]
pub struct System {
    bodies: Vec<Body>, // indexed arena of bodies, fixed size
    pub frame: u64, // completed steps
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, frame: 0 }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Mutable access to every body; the set itself cannot grow or shrink
    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

//! Particle field presets
//!
//! Each page variant animates the same kind of field with different
//! physics. A [`FieldConfig`] carries every per-variant constant; the three
//! named presets are available through [`FieldPreset`].

use serde::{Deserialize, Serialize};

/// What happens when a particle reaches the canvas edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BoundaryPolicy {
    /// Bounce: invert the crossing velocity component, scaled by `damping`,
    /// and clamp the position back onto the canvas
    Reflect { damping: f64 },
    /// Leave on one side, come back on the other. Particles may drift up to
    /// `margin` pixels outside the canvas before being moved.
    Wrap { margin: f64 },
}

/// How particles react to the pointer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerResponse {
    Ignore,
    /// Pulled toward the pointer by `(radius - distance) * strength` pixels
    Attract { radius: f64, strength: f64 },
    /// Pushed away from the pointer by `(radius - distance) * strength` pixels
    Repel { radius: f64, strength: f64 },
}

impl PointerResponse {
    pub fn radius(&self) -> Option<f64> {
        match self {
            PointerResponse::Ignore => None,
            PointerResponse::Attract { radius, .. } | PointerResponse::Repel { radius, .. } => {
                Some(*radius)
            }
        }
    }
}

/// Whether the pool is fixed or slowly replaces its particles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PoolLifecycle {
    /// The pool created at mount/resize lives until the next reset
    Fixed,
    /// Particles lose `energy_loss` per frame and are removed once their
    /// energy falls to `retire_below`. New particles appear with probability
    /// `spawn_chance` per frame around the last pointer position, or at a
    /// random point before the pointer has been seen.
    Churning {
        spawn_chance: f64,
        spawn_spread: f64,
        energy_loss: f64,
        retire_below: f64,
    },
}

/// Inclusive `[min, max]` range sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub const fn fixed(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Map a unit sample `t` in `[0, 1)` into the range
    pub fn lerp(&self, t: f64) -> f64 {
        self.min + (self.max - self.min) * t
    }
}

/// Every constant a particle field needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Canvas area (px²) per particle when sizing the pool
    pub area_per_particle: f64,
    /// Hard cap on live particles
    pub max_particles: usize,

    pub size: Range,
    /// Initial velocity components are uniform in `[-speed/2, speed/2]`
    pub speed: f64,
    /// Speed limit applied after random nudges
    pub max_speed: f64,
    pub hue: Range,

    pub initial_energy: Range,
    pub min_energy: f64,
    /// Energy gained per frame inside the pointer radius
    pub energy_gain: f64,
    /// Energy lost per frame outside the pointer radius
    pub energy_decay: f64,

    pub boundary: BoundaryPolicy,
    pub pointer: PointerResponse,
    pub lifecycle: PoolLifecycle,

    /// Amplitude of the sinusoidal drift added to every step
    pub wander: f64,
    /// Per-frame probability of a random velocity nudge
    pub nudge_chance: f64,
    /// Size of a random velocity nudge
    pub nudge: f64,

    /// Maximum trail length; zero disables trails
    pub trail_len: usize,
    /// Particles closer than this are linked; `None` disables links
    pub link_radius: Option<f64>,

    /// Global clock advance per frame
    pub time_step: f64,
    /// Angular speed of the size pulse
    pub pulse_rate: f64,
    /// Glow radius as a multiple of particle size; zero disables the glow
    pub glow_scale: f64,
    /// Multiplier on every alpha value this field draws
    pub opacity: f64,
}

impl FieldConfig {
    /// Pool size for a canvas, proportional to its area and capped
    pub fn pool_size(&self, width: f64, height: f64) -> usize {
        if !(width > 0.0 && height > 0.0) || self.area_per_particle <= 0.0 {
            return 0;
        }
        let by_area = (width * height / self.area_per_particle).floor() as usize;
        by_area.min(self.max_particles)
    }

    pub fn drift() -> Self {
        Self {
            area_per_particle: 20_000.0,
            max_particles: 60,
            size: Range::new(1.0, 4.0),
            speed: 1.0,
            max_speed: 2.0,
            hue: Range::new(30.0, 60.0),
            initial_energy: Range::fixed(1.0),
            min_energy: 0.0,
            energy_gain: 0.01,
            energy_decay: 0.0,
            boundary: BoundaryPolicy::Reflect { damping: 0.8 },
            pointer: PointerResponse::Repel {
                radius: 100.0,
                strength: 0.0025,
            },
            lifecycle: PoolLifecycle::Churning {
                spawn_chance: 0.1,
                spawn_spread: 50.0,
                energy_loss: 0.002,
                retire_below: 0.1,
            },
            wander: 0.0,
            nudge_chance: 0.0,
            nudge: 0.0,
            trail_len: 8,
            link_radius: None,
            time_step: 0.01,
            pulse_rate: 5.0,
            glow_scale: 3.0,
            opacity: 1.0,
        }
    }

    pub fn symbiotic() -> Self {
        Self {
            area_per_particle: 20_000.0,
            max_particles: 25,
            size: Range::new(2.0, 6.0),
            speed: 0.8,
            max_speed: 1.5,
            hue: Range::new(30.0, 60.0),
            initial_energy: Range::new(0.5, 1.0),
            min_energy: 0.5,
            energy_gain: 0.01,
            energy_decay: 0.005,
            boundary: BoundaryPolicy::Wrap { margin: 50.0 },
            pointer: PointerResponse::Attract {
                radius: 200.0,
                strength: 0.003,
            },
            lifecycle: PoolLifecycle::Fixed,
            wander: 0.2,
            nudge_chance: 0.01,
            nudge: 0.2,
            trail_len: 10,
            link_radius: Some(150.0),
            time_step: 0.016,
            pulse_rate: 3.0,
            glow_scale: 8.0,
            opacity: 1.0,
        }
    }

    pub fn ambient() -> Self {
        Self {
            area_per_particle: 40_000.0,
            max_particles: 30,
            size: Range::new(0.5, 2.5),
            speed: 0.2,
            max_speed: 0.2,
            hue: Range::fixed(217.0),
            initial_energy: Range::fixed(1.0),
            min_energy: 1.0,
            energy_gain: 0.0,
            energy_decay: 0.0,
            boundary: BoundaryPolicy::Reflect { damping: 1.0 },
            pointer: PointerResponse::Ignore,
            lifecycle: PoolLifecycle::Fixed,
            wander: 0.0,
            nudge_chance: 0.0,
            nudge: 0.0,
            trail_len: 0,
            link_radius: None,
            time_step: 0.01,
            pulse_rate: 0.0,
            glow_scale: 0.0,
            opacity: 0.1,
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::drift()
    }
}

/// Named field variants served by the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FieldPreset {
    #[default]
    Drift,
    Symbiotic,
    Ambient,
}

impl FieldPreset {
    pub const ALL: [FieldPreset; 3] = [
        FieldPreset::Drift,
        FieldPreset::Symbiotic,
        FieldPreset::Ambient,
    ];

    pub fn config(&self) -> FieldConfig {
        match self {
            FieldPreset::Drift => FieldConfig::drift(),
            FieldPreset::Symbiotic => FieldConfig::symbiotic(),
            FieldPreset::Ambient => FieldConfig::ambient(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldPreset::Drift => "drift",
            FieldPreset::Symbiotic => "symbiotic",
            FieldPreset::Ambient => "ambient",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "drift" => Some(FieldPreset::Drift),
            "symbiotic" => Some(FieldPreset::Symbiotic),
            "ambient" => Some(FieldPreset::Ambient),
            _ => None,
        }
    }

    /// Whether the page should also show the spring cursor overlay
    pub fn wants_cursor_effect(&self) -> bool {
        !matches!(self, FieldPreset::Ambient)
    }
}

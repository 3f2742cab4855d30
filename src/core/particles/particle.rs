use glam::DVec2;
use rand::Rng;
use std::f64::consts::TAU;

use super::config::FieldConfig;
use super::trail::Trail;

/// One point in the field
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: DVec2,
    pub velocity: DVec2,
    /// Base radius, constant for the particle's lifetime
    pub size: f64,
    /// Visual intensity in `[min_energy, 1]`
    pub energy: f64,
    pub hue: f64,
    /// Offset for the pulse and wander oscillators
    pub phase: f64,
    pub trail: Trail,
}

impl Particle {
    /// A particle at a uniformly random point of a `width x height` canvas
    pub fn random<R: Rng>(rng: &mut R, config: &FieldConfig, width: f64, height: f64) -> Self {
        let position = DVec2::new(rng.r#gen::<f64>() * width, rng.r#gen::<f64>() * height);
        Self::spawn_at(rng, config, position)
    }

    /// A particle at `position` with randomised size, velocity and hue
    pub fn spawn_at<R: Rng>(rng: &mut R, config: &FieldConfig, position: DVec2) -> Self {
        let velocity = DVec2::new(
            (rng.r#gen::<f64>() - 0.5) * config.speed,
            (rng.r#gen::<f64>() - 0.5) * config.speed,
        );
        let energy = config
            .initial_energy
            .lerp(rng.r#gen::<f64>())
            .clamp(config.min_energy, 1.0);

        Self {
            position,
            velocity,
            size: config.size.lerp(rng.r#gen::<f64>()),
            energy,
            hue: config.hue.lerp(rng.r#gen::<f64>()),
            phase: rng.r#gen::<f64>() * TAU,
            trail: Trail::new(config.trail_len),
        }
    }

    /// Size multiplier in `[0.6, 1.0]` oscillating with the global clock
    pub fn pulse(&self, time: f64, rate: f64) -> f64 {
        (time * rate + self.phase).sin() * 0.2 + 0.8
    }

    /// Scale velocity down to `max_speed` if it is faster
    pub fn limit_speed(&mut self, max_speed: f64) {
        let speed = self.velocity.length();
        if speed > max_speed && speed > 0.0 {
            self.velocity *= max_speed / speed;
        }
    }

    pub fn distance_to(&self, point: DVec2) -> f64 {
        self.position.distance(point)
    }
}

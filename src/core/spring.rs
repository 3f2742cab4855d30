//! Spring follower for the custom cursor
//!
//! The cursor ring and its halo chase the pointer with damped spring motion
//! rather than snapping to it. Integration is semi-implicit Euler with a
//! clamped time step, so a tab that was in the background does not fling the
//! cursor across the page on its first frame back.

use glam::DVec2;

/// Longest time step integrated in one call (seconds)
pub const MAX_DT: f64 = 1.0 / 30.0;

/// Distance and speed under which the follower snaps onto its target
const REST_EPSILON: f64 = 0.01;

/// Spring constants for a unit mass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    pub stiffness: f64,
    pub damping: f64,
}

impl SpringParams {
    /// The tight ring drawn at the pointer
    pub const RING: SpringParams = SpringParams {
        stiffness: 500.0,
        damping: 28.0,
    };

    /// The soft halo lagging behind the ring
    pub const HALO: SpringParams = SpringParams {
        stiffness: 200.0,
        damping: 20.0,
    };
}

/// A point pulled toward a target by a damped spring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring2 {
    params: SpringParams,
    position: DVec2,
    velocity: DVec2,
    target: DVec2,
}

impl Spring2 {
    pub fn new(params: SpringParams, at: DVec2) -> Self {
        Self {
            params,
            position: at,
            velocity: DVec2::ZERO,
            target: at,
        }
    }

    pub fn set_target(&mut self, target: DVec2) {
        self.target = target;
    }

    pub fn target(&self) -> DVec2 {
        self.target
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn is_at_rest(&self) -> bool {
        self.position == self.target && self.velocity == DVec2::ZERO
    }

    /// Advance by `dt` seconds and return the new position
    pub fn step(&mut self, dt: f64) -> DVec2 {
        let dt = dt.clamp(0.0, MAX_DT);
        if dt == 0.0 {
            return self.position;
        }

        let displacement = self.position - self.target;
        let acceleration =
            -self.params.stiffness * displacement - self.params.damping * self.velocity;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;

        if (self.position - self.target).length() < REST_EPSILON
            && self.velocity.length() < REST_EPSILON
        {
            self.position = self.target;
            self.velocity = DVec2::ZERO;
        }
        self.position
    }
}

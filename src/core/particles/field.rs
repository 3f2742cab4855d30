//! Particle field state and per-frame physics
//!
//! [`ParticleField::step`] advances every particle by one display frame.
//! Drawing lives in [`super::render`] and only reads the field, so the
//! physics can be replayed deterministically in tests from a fixed seed.

use glam::DVec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::config::{BoundaryPolicy, FieldConfig, PointerResponse, PoolLifecycle};
use super::particle::Particle;

/// A pair of particles close enough to be drawn connected
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub from: DVec2,
    pub to: DVec2,
    pub from_hue: f64,
    pub to_hue: f64,
    /// `1 - distance / link_radius`, in `(0, 1]`
    pub strength: f64,
}

/// All particles of one canvas plus the shared inputs they react to
#[derive(Debug, Clone)]
pub struct ParticleField {
    config: FieldConfig,
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    pointer: Option<DVec2>,
    /// Last pointer position seen; survives `clear_pointer`
    last_pointer: Option<DVec2>,
    time: f64,
    rng: SmallRng,
    generation: u64,
}

impl ParticleField {
    /// Create a field and fill its pool for a `width x height` canvas
    pub fn new(config: FieldConfig, width: f64, height: f64, seed: u64) -> Self {
        let mut field = Self {
            config,
            width: 0.0,
            height: 0.0,
            particles: Vec::new(),
            pointer: None,
            last_pointer: None,
            time: 0.0,
            rng: SmallRng::seed_from_u64(seed),
            generation: 0,
        };
        field.reset(width, height);
        field
    }

    /// Discard the pool and rebuild it for new canvas dimensions
    pub fn resize(&mut self, width: f64, height: f64) {
        self.generation += 1;
        self.reset(width, height);
    }

    fn reset(&mut self, width: f64, height: f64) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);

        let count = self.config.pool_size(self.width, self.height);
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            let particle = Particle::random(&mut self.rng, &self.config, self.width, self.height);
            self.particles.push(particle);
        }
    }

    pub fn set_pointer(&mut self, x: f64, y: f64) {
        let point = DVec2::new(x, y);
        self.pointer = Some(point);
        self.last_pointer = Some(point);
    }

    /// Stop pointer forces. Churning pools keep spawning at the last
    /// position seen.
    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    pub fn pointer(&self) -> Option<DVec2> {
        self.pointer
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Global animation clock
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Number of resets since creation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Advance the field by one frame
    pub fn step(&mut self) {
        self.time += self.config.time_step;
        self.replenish();

        let config = &self.config;
        let (width, height, time, pointer) = (self.width, self.height, self.time, self.pointer);
        let rng = &mut self.rng;

        for particle in &mut self.particles {
            integrate(particle, config, time, rng);
            apply_pointer(particle, config, pointer);
            apply_boundary(particle, config.boundary, width, height);
            particle.trail.push(particle.position);
        }

        if let PoolLifecycle::Churning {
            energy_loss,
            retire_below,
            ..
        } = self.config.lifecycle
        {
            let min_energy = self.config.min_energy;
            for particle in &mut self.particles {
                particle.energy = (particle.energy - energy_loss).clamp(min_energy, 1.0);
            }
            self.particles.retain(|p| p.energy > retire_below);
        }
    }

    /// Churning pools gain a particle around the last pointer position, or
    /// anywhere on the canvas if the pointer was never seen
    fn replenish(&mut self) {
        let PoolLifecycle::Churning {
            spawn_chance,
            spawn_spread,
            ..
        } = self.config.lifecycle
        else {
            return;
        };
        if self.particles.len() >= self.config.max_particles || self.width * self.height <= 0.0 {
            return;
        }
        if self.rng.r#gen::<f64>() >= spawn_chance {
            return;
        }

        let anchor = match self.last_pointer {
            Some(point) => point,
            None => DVec2::new(
                self.rng.r#gen::<f64>() * self.width,
                self.rng.r#gen::<f64>() * self.height,
            ),
        };
        let offset = DVec2::new(
            (self.rng.r#gen::<f64>() - 0.5) * spawn_spread,
            (self.rng.r#gen::<f64>() - 0.5) * spawn_spread,
        );
        let position = (anchor + offset).clamp(DVec2::ZERO, DVec2::new(self.width, self.height));
        let mut particle = Particle::spawn_at(&mut self.rng, &self.config, position);
        // Pointer-born particles are a little smaller than the pool.
        particle.size = 0.5 + self.rng.r#gen::<f64>() * 2.0;
        self.particles.push(particle);
    }

    /// Pairs of particles within the link radius, each pair once
    pub fn links(&self) -> Vec<Link> {
        let Some(radius) = self.config.link_radius else {
            return Vec::new();
        };

        let mut links = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let distance = a.position.distance(b.position);
                if distance < radius {
                    links.push(Link {
                        from: a.position,
                        to: b.position,
                        from_hue: a.hue,
                        to_hue: b.hue,
                        strength: 1.0 - distance / radius,
                    });
                }
            }
        }
        links
    }
}

fn integrate<R: Rng>(particle: &mut Particle, config: &FieldConfig, time: f64, rng: &mut R) {
    let wander = if config.wander > 0.0 {
        let angle = time + particle.phase;
        DVec2::new(angle.sin(), angle.cos()) * config.wander
    } else {
        DVec2::ZERO
    };
    particle.position += particle.velocity + wander;

    if config.nudge_chance > 0.0 && rng.r#gen::<f64>() < config.nudge_chance {
        particle.velocity += DVec2::new(
            (rng.r#gen::<f64>() - 0.5) * config.nudge,
            (rng.r#gen::<f64>() - 0.5) * config.nudge,
        );
        particle.limit_speed(config.max_speed);
    }
}

fn apply_pointer(particle: &mut Particle, config: &FieldConfig, pointer: Option<DVec2>) {
    let (radius, strength, sign) = match config.pointer {
        PointerResponse::Ignore => return,
        PointerResponse::Attract { radius, strength } => (radius, strength, 1.0),
        PointerResponse::Repel { radius, strength } => (radius, strength, -1.0),
    };

    let near = pointer.and_then(|pointer| {
        let delta = pointer - particle.position;
        let distance = delta.length();
        (distance < radius).then_some((delta, distance))
    });

    match near {
        Some((delta, distance)) => {
            // Closer particles move further; a particle exactly on the
            // pointer has no direction and stays put.
            let direction = delta.normalize_or_zero();
            particle.position += direction * (radius - distance) * strength * sign;
            particle.energy = (particle.energy + config.energy_gain).min(1.0);
        }
        None => {
            particle.energy = (particle.energy - config.energy_decay).max(config.min_energy);
        }
    }
}

fn apply_boundary(particle: &mut Particle, policy: BoundaryPolicy, width: f64, height: f64) {
    match policy {
        BoundaryPolicy::Reflect { damping } => {
            let p = &mut particle.position;
            let v = &mut particle.velocity;
            if p.x < 0.0 || p.x > width {
                v.x *= -damping;
            }
            if p.y < 0.0 || p.y > height {
                v.y *= -damping;
            }
            p.x = p.x.clamp(0.0, width);
            p.y = p.y.clamp(0.0, height);
        }
        BoundaryPolicy::Wrap { margin } => {
            let p = &mut particle.position;
            if p.x < -margin {
                p.x = width + margin;
            } else if p.x > width + margin {
                p.x = -margin;
            }
            if p.y < -margin {
                p.y = height + margin;
            } else if p.y > height + margin {
                p.y = -margin;
            }
            // Jumping across the canvas would draw a streak through it.
            if p.distance(particle.trail.newest().unwrap_or(*p)) > margin * 2.0 {
                particle.trail.clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::particles::config::{FieldPreset, Range};

    const W: f64 = 1280.0;
    const H: f64 = 720.0;

    fn field(preset: FieldPreset) -> ParticleField {
        ParticleField::new(preset.config(), W, H, 42)
    }

    #[test]
    fn test_initial_pool_size() {
        assert_eq!(field(FieldPreset::Drift).len(), 46);
        assert_eq!(field(FieldPreset::Symbiotic).len(), 25);
        assert_eq!(field(FieldPreset::Ambient).len(), 23);
    }

    #[test]
    fn test_same_seed_same_frames() {
        let mut a = field(FieldPreset::Symbiotic);
        let mut b = field(FieldPreset::Symbiotic);
        for i in 0..120 {
            a.set_pointer(i as f64 * 5.0, 300.0);
            b.set_pointer(i as f64 * 5.0, 300.0);
            a.step();
            b.step();
        }
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_reflect_keeps_particles_on_canvas() {
        let mut f = field(FieldPreset::Drift);
        for frame in 0..2_000 {
            let t = frame as f64 * 0.05;
            f.set_pointer(W / 2.0 + t.cos() * 300.0, H / 2.0 + t.sin() * 200.0);
            f.step();
            for p in f.particles() {
                assert!(p.position.x >= 0.0 && p.position.x <= W, "x={}", p.position.x);
                assert!(p.position.y >= 0.0 && p.position.y <= H, "y={}", p.position.y);
            }
        }
    }

    #[test]
    fn test_reflect_inverts_and_damps_velocity() {
        let mut config = FieldConfig::drift();
        config.lifecycle = PoolLifecycle::Fixed;
        let mut f = ParticleField::new(config, 1000.0, 1000.0, 1);
        let p = &mut f.particles[0];
        p.position = DVec2::new(999.5, 500.0);
        p.velocity = DVec2::new(1.0, 0.0);

        f.step();
        let p = &f.particles()[0];
        assert_eq!(p.position.x, 1000.0);
        assert!((p.velocity.x + 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_wrap_keeps_particles_in_margin_band() {
        let mut f = field(FieldPreset::Symbiotic);
        for frame in 0..3_000 {
            if frame % 500 == 0 {
                f.clear_pointer();
            } else {
                f.set_pointer((frame % 1280) as f64, (frame % 720) as f64);
            }
            f.step();
            for p in f.particles() {
                assert!(p.position.x >= -50.0 && p.position.x <= W + 50.0);
                assert!(p.position.y >= -50.0 && p.position.y <= H + 50.0);
            }
        }
    }

    #[test]
    fn test_wrap_moves_to_opposite_edge() {
        let mut config = FieldConfig::symbiotic();
        config.wander = 0.0;
        config.nudge_chance = 0.0;
        let mut f = ParticleField::new(config, 200.0, 200.0, 9);
        let p = &mut f.particles[0];
        p.position = DVec2::new(-49.5, 100.0);
        p.velocity = DVec2::new(-1.0, 0.0);

        f.step();
        assert_eq!(f.particles()[0].position.x, 250.0);
    }

    #[test]
    fn test_trail_bounded_for_all_presets() {
        for preset in FieldPreset::ALL {
            let mut f = field(preset);
            let cap = f.config().trail_len;
            for frame in 0..300 {
                f.set_pointer(400.0 + frame as f64, 300.0);
                f.step();
                assert!(f.particles().iter().all(|p| p.trail.len() <= cap));
            }
        }
    }

    #[test]
    fn test_energy_stays_within_bounds() {
        for preset in FieldPreset::ALL {
            let mut f = field(preset);
            let min = f.config().min_energy;
            for frame in 0..1_000 {
                if frame < 500 {
                    f.set_pointer(W / 2.0, H / 2.0);
                } else {
                    f.clear_pointer();
                }
                f.step();
                for p in f.particles() {
                    assert!(p.energy >= min && p.energy <= 1.0, "{preset:?}: {}", p.energy);
                }
            }
        }
    }

    #[test]
    fn test_energy_rises_near_pointer_and_decays_away() {
        let mut config = FieldConfig::symbiotic();
        config.wander = 0.0;
        config.nudge_chance = 0.0;
        config.initial_energy = Range::fixed(0.6);
        let mut f = ParticleField::new(config, 1000.0, 1000.0, 5);
        f.particles.truncate(1);
        f.particles[0].position = DVec2::new(500.0, 500.0);
        f.particles[0].velocity = DVec2::ZERO;

        f.set_pointer(550.0, 500.0);
        f.step();
        assert!((f.particles()[0].energy - 0.61).abs() < 1e-9);

        f.set_pointer(0.0, 0.0);
        f.step();
        assert!((f.particles()[0].energy - 0.605).abs() < 1e-9);

        for _ in 0..100 {
            f.step();
        }
        assert_eq!(f.particles()[0].energy, 0.5);
    }

    #[test]
    fn test_attraction_pulls_toward_pointer() {
        let mut config = FieldConfig::symbiotic();
        config.wander = 0.0;
        config.nudge_chance = 0.0;
        let mut f = ParticleField::new(config, 1000.0, 1000.0, 5);
        f.particles.truncate(1);
        f.particles[0].position = DVec2::new(500.0, 500.0);
        f.particles[0].velocity = DVec2::ZERO;

        f.set_pointer(600.0, 500.0);
        f.step();
        // (200 - 100) * 0.003 = 0.3 px toward the pointer
        assert!((f.particles()[0].position.x - 500.3).abs() < 1e-9);
        assert_eq!(f.particles()[0].position.y, 500.0);
    }

    #[test]
    fn test_repulsion_closer_is_stronger() {
        let mut config = FieldConfig::drift();
        config.lifecycle = PoolLifecycle::Fixed;
        let mut f = ParticleField::new(config, 1000.0, 1000.0, 5);
        f.particles.truncate(2);
        f.particles[0].position = DVec2::new(490.0, 500.0);
        f.particles[1].position = DVec2::new(450.0, 500.0);
        for p in &mut f.particles {
            p.velocity = DVec2::ZERO;
        }

        f.set_pointer(500.0, 500.0);
        f.step();
        let near_push = 490.0 - f.particles()[0].position.x;
        let far_push = 450.0 - f.particles()[1].position.x;
        assert!(near_push > far_push);
        assert!(far_push > 0.0);
    }

    #[test]
    fn test_particle_on_pointer_does_not_move() {
        let mut config = FieldConfig::drift();
        config.lifecycle = PoolLifecycle::Fixed;
        let mut f = ParticleField::new(config, 1000.0, 1000.0, 5);
        f.particles.truncate(1);
        f.particles[0].position = DVec2::new(500.0, 500.0);
        f.particles[0].velocity = DVec2::ZERO;

        f.set_pointer(500.0, 500.0);
        f.step();
        assert_eq!(f.particles()[0].position, DVec2::new(500.0, 500.0));
    }

    #[test]
    fn test_churning_pool_respects_cap() {
        let mut f = field(FieldPreset::Drift);
        let cap = f.config().max_particles;
        f.set_pointer(W / 2.0, H / 2.0);
        for _ in 0..5_000 {
            f.step();
            assert!(f.len() <= cap);
        }
    }

    #[test]
    fn test_churning_pool_retires_faded_particles() {
        let mut config = FieldConfig::drift();
        let PoolLifecycle::Churning { spawn_chance, .. } = &mut config.lifecycle else {
            unreachable!("drift churns");
        };
        *spawn_chance = 0.0;
        let mut f = ParticleField::new(config, W, H, 42);
        // 1.0 energy at 0.002 per frame crosses 0.1 after 450 frames
        for _ in 0..460 {
            f.step();
        }
        assert!(f.is_empty());
    }

    /// Mean pool size over `frames` steps
    fn mean_len(f: &mut ParticleField, frames: usize) -> f64 {
        let mut total = 0;
        for _ in 0..frames {
            f.step();
            total += f.len();
        }
        total as f64 / frames as f64
    }

    #[test]
    fn test_churning_pool_is_replenished_after_pointer_leaves() {
        let mut f = field(FieldPreset::Drift);
        let start = f.len();
        f.set_pointer(W / 2.0, H / 2.0);
        for _ in 0..100 {
            f.step();
        }
        f.clear_pointer();
        assert_eq!(f.pointer(), None);

        for _ in 0..2_000 {
            f.step();
        }
        // Spawn chance 0.1 over a 450 frame lifetime settles near 45
        let mean = mean_len(&mut f, 1_000);
        assert!(mean > start as f64 * 0.6, "mean {mean} from {start}");
        assert!(!f.is_empty());
        assert!(f.len() <= f.config().max_particles);
    }

    #[test]
    fn test_churning_pool_is_replenished_without_any_pointer() {
        let mut f = field(FieldPreset::Drift);
        let start = f.len();
        for _ in 0..2_000 {
            f.step();
        }
        let mean = mean_len(&mut f, 1_000);
        assert!(mean > start as f64 * 0.6, "mean {mean} from {start}");
        for p in f.particles() {
            assert!(p.position.x >= 0.0 && p.position.x <= W);
            assert!(p.position.y >= 0.0 && p.position.y <= H);
        }
    }

    #[test]
    fn test_churning_pool_spawns_near_pointer() {
        let mut f = ParticleField::new(FieldConfig::drift(), 0.0, 0.0, 11);
        f.resize(800.0, 800.0);
        f.particles.clear();
        f.set_pointer(400.0, 400.0);
        for _ in 0..200 {
            f.step();
        }
        assert!(!f.is_empty());
        for p in f.particles() {
            assert!(p.size >= 0.5 && p.size <= 2.5);
        }
    }

    #[test]
    fn test_fixed_pool_keeps_count() {
        let mut f = field(FieldPreset::Symbiotic);
        let count = f.len();
        for _ in 0..1_000 {
            f.step();
        }
        assert_eq!(f.len(), count);
    }

    #[test]
    fn test_resize_rebuilds_pool() {
        let mut f = field(FieldPreset::Drift);
        assert_eq!(f.generation(), 0);

        f.resize(400.0, 500.0);
        assert_eq!(f.generation(), 1);
        assert_eq!(f.len(), 10);
        assert_eq!((f.width(), f.height()), (400.0, 500.0));
        for p in f.particles() {
            assert!(p.trail.is_empty());
            assert!(p.position.x <= 400.0 && p.position.y <= 500.0);
        }

        f.resize(10_000.0, 10_000.0);
        assert_eq!(f.len(), f.config().max_particles);

        f.resize(0.0, 0.0);
        assert!(f.is_empty());
        for _ in 0..100 {
            f.step();
        }
        assert!(f.is_empty());
    }

    #[test]
    fn test_links_only_within_radius() {
        let mut config = FieldConfig::symbiotic();
        config.max_particles = 3;
        let mut f = ParticleField::new(config, 1000.0, 1000.0, 2);
        f.particles[0].position = DVec2::new(100.0, 100.0);
        f.particles[1].position = DVec2::new(175.0, 100.0);
        f.particles[2].position = DVec2::new(900.0, 900.0);

        let links = f.links();
        assert_eq!(links.len(), 1);
        assert!((links[0].strength - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_no_links_without_radius() {
        assert!(field(FieldPreset::Drift).links().is_empty());
    }

    #[test]
    fn test_ambient_ignores_pointer() {
        let mut a = field(FieldPreset::Ambient);
        let mut b = field(FieldPreset::Ambient);
        a.set_pointer(W / 2.0, H / 2.0);
        for _ in 0..50 {
            a.step();
            b.step();
        }
        assert_eq!(a.particles(), b.particles());
    }
}

//! Drawing a particle field
//!
//! [`draw_field`] turns the current field state into calls on a [`Painter`].
//! The browser implements `Painter` on top of a 2D canvas context; tests use
//! a recording painter and check the calls instead of pixels.

use glam::DVec2;
use std::fmt;

use super::field::{Link, ParticleField};
use super::particle::Particle;

/// Number of dots travelling along each link
pub const LINK_DOTS: usize = 3;

/// Peak alpha of the newest trail segment
const TRAIL_ALPHA: f64 = 0.3;

/// Colour in HSL space with alpha, rendered as a CSS `hsla()` string
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
    pub alpha: f64,
}

impl Hsla {
    pub fn new(hue: f64, saturation: f64, lightness: f64, alpha: f64) -> Self {
        Self {
            hue,
            saturation,
            lightness,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }
}

impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsla({:.1}, {:.0}%, {:.0}%, {:.3})",
            self.hue, self.saturation, self.lightness, self.alpha
        )
    }
}

/// Minimal drawing surface the field renderer needs
pub trait Painter {
    fn clear(&mut self, width: f64, height: f64);

    /// Filled circle with a radial gradient from `inner` at the centre to
    /// `outer` at `radius`
    fn radial_glow(&mut self, center: DVec2, radius: f64, inner: Hsla, outer: Hsla);

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Hsla);

    fn line(&mut self, from: DVec2, to: DVec2, width: f64, color: Hsla);
}

/// Clear the canvas and draw every particle, trail and link
pub fn draw_field<P: Painter>(field: &ParticleField, painter: &mut P) {
    painter.clear(field.width(), field.height());

    let config = field.config();
    let time = field.time();

    for link in field.links() {
        draw_link(painter, &link, time, config.opacity);
    }

    for particle in field.particles() {
        draw_trail(painter, particle, config.opacity);

        let pulse = if config.pulse_rate > 0.0 {
            particle.pulse(time, config.pulse_rate)
        } else {
            1.0
        };
        let energy = particle.energy;

        if config.glow_scale > 0.0 {
            let radius = particle.size * config.glow_scale * pulse * energy;
            if radius > 0.0 {
                painter.radial_glow(
                    particle.position,
                    radius,
                    Hsla::new(particle.hue, 90.0, 70.0, energy * 0.3 * config.opacity),
                    Hsla::new(particle.hue + 20.0, 80.0, 60.0, 0.0),
                );
            }
        }

        let core = particle.size * pulse;
        painter.fill_circle(
            particle.position,
            core,
            Hsla::new(particle.hue, 90.0, 70.0, energy * config.opacity),
        );
        if config.glow_scale > 0.0 {
            painter.fill_circle(
                particle.position,
                core * 0.6,
                Hsla::new(particle.hue, 100.0, 80.0, energy * 0.8 * config.opacity),
            );
        }
    }
}

/// Trail segments fade in toward the newest point
fn draw_trail<P: Painter>(painter: &mut P, particle: &Particle, opacity: f64) {
    let len = particle.trail.len();
    if len < 2 {
        return;
    }
    let segments = (len - 1) as f64;
    for (i, (from, to)) in particle.trail.segments().enumerate() {
        let t = (i + 1) as f64 / segments;
        painter.line(
            from,
            to,
            particle.size * 0.8 * t,
            Hsla::new(particle.hue, 80.0, 60.0, t * TRAIL_ALPHA * opacity),
        );
    }
}

fn draw_link<P: Painter>(painter: &mut P, link: &Link, time: f64, opacity: f64) {
    let hue = (link.from_hue + link.to_hue) / 2.0;
    painter.line(
        link.from,
        link.to,
        1.5 * link.strength,
        Hsla::new(hue, 80.0, 60.0, 0.3 * link.strength * opacity),
    );

    let delta = link.to - link.from;
    for i in 0..LINK_DOTS {
        let t = ((time * 5.0 + i as f64).sin() + 1.0) / 2.0;
        painter.fill_circle(
            link.from + delta * t,
            2.0,
            Hsla::new(hue, 90.0, 70.0, 0.4 * link.strength * opacity),
        );
    }
}

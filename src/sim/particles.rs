//! Background particle field
//!
//! A few dozen slow dots drifting around the viewport, bouncing off its
//! edges, with faint lines between dots that are close together. Advanced
//! once per animation frame; all units are CSS pixels.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{LINK_ALPHA, LINK_DISTANCE, PALETTE};

/// Max speed per axis (px/frame)
pub const MAX_DRIFT: f32 = 0.25;

/// A single background dot
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    /// Velocity in px/frame
    pub vel: Vec2,
    /// Radius in px
    pub size: f32,
    /// Index into `PALETTE`
    pub color: usize,
}

impl Particle {
    pub fn color_hex(&self) -> &'static str {
        PALETTE[self.color % PALETTE.len()]
    }
}

/// A line between two nearby particles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub from: Vec2,
    pub to: Vec2,
    pub alpha: f32,
}

/// The whole background simulation
#[derive(Debug, Clone)]
pub struct ParticleField {
    pub particles: Vec<Particle>,
    pub width: f32,
    pub height: f32,
    pub link_distance: f32,
    rng: Pcg32,
}

impl ParticleField {
    pub fn new(width: f32, height: f32, count: usize, seed: u64) -> Self {
        let mut field = Self {
            particles: Vec::with_capacity(count),
            width,
            height,
            link_distance: LINK_DISTANCE,
            rng: Pcg32::seed_from_u64(seed),
        };
        field.reseed(width, height, count);
        field
    }

    pub fn with_link_distance(mut self, link_distance: f32) -> Self {
        self.link_distance = link_distance;
        self
    }

    /// Throw away all particles and scatter `count` new ones over the new size
    pub fn reseed(&mut self, width: f32, height: f32, count: usize) {
        self.width = width;
        self.height = height;
        self.particles.clear();

        for _ in 0..count {
            let particle = Particle {
                pos: Vec2::new(
                    self.rng.random::<f32>() * width,
                    self.rng.random::<f32>() * height,
                ),
                vel: Vec2::new(
                    self.rng.random_range(-MAX_DRIFT..MAX_DRIFT),
                    self.rng.random_range(-MAX_DRIFT..MAX_DRIFT),
                ),
                size: self.rng.random_range(1.0..3.0),
                color: self.rng.random_range(0..PALETTE.len()),
            };
            self.particles.push(particle);
        }
    }

    /// Advance one frame
    pub fn step(&mut self) {
        let (w, h) = (self.width, self.height);
        for p in &mut self.particles {
            p.pos += p.vel;

            // Flip after leaving the box; the particle drifts back next frame
            if p.pos.x < 0.0 || p.pos.x > w {
                p.vel.x = -p.vel.x;
            }
            if p.pos.y < 0.0 || p.pos.y > h {
                p.vel.y = -p.vel.y;
            }
        }
    }

    /// Lines between every pair closer than `link_distance`
    pub fn links(&self) -> Vec<Link> {
        let max = self.link_distance;
        let mut links = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let dist = a.pos.distance(b.pos);
                if dist < max {
                    links.push(Link {
                        from: a.pos,
                        to: b.pos,
                        alpha: LINK_ALPHA * (1.0 - dist / max),
                    });
                }
            }
        }
        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_within_viewport() {
        let field = ParticleField::new(800.0, 600.0, 50, 42);
        assert_eq!(field.particles.len(), 50);
        for p in &field.particles {
            assert!(p.pos.x >= 0.0 && p.pos.x <= 800.0);
            assert!(p.pos.y >= 0.0 && p.pos.y <= 600.0);
            assert!(p.vel.x.abs() <= MAX_DRIFT && p.vel.y.abs() <= MAX_DRIFT);
            assert!(p.size >= 1.0 && p.size < 3.0);
            assert!(PALETTE.contains(&p.color_hex()));
        }
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = ParticleField::new(800.0, 600.0, 10, 7);
        let b = ParticleField::new(800.0, 600.0, 10, 7);
        for (pa, pb) in a.particles.iter().zip(&b.particles) {
            assert_eq!(pa.pos, pb.pos);
            assert_eq!(pa.vel, pb.vel);
        }
    }

    #[test]
    fn test_particles_stay_near_viewport() {
        let mut field = ParticleField::new(300.0, 200.0, 25, 3);
        for _ in 0..10_000 {
            field.step();
        }
        let slack = 2.0 * MAX_DRIFT;
        for p in &field.particles {
            assert!(p.pos.x >= -slack && p.pos.x <= 300.0 + slack);
            assert!(p.pos.y >= -slack && p.pos.y <= 200.0 + slack);
        }
    }

    #[test]
    fn test_bounce_off_right_edge() {
        let mut field = ParticleField::new(100.0, 100.0, 0, 1);
        field.particles.push(Particle {
            pos: Vec2::new(99.9, 50.0),
            vel: Vec2::new(0.2, 0.0),
            size: 1.0,
            color: 0,
        });
        field.step();
        assert!(field.particles[0].vel.x < 0.0);
        field.step();
        assert!(field.particles[0].pos.x <= 100.0);
    }

    #[test]
    fn test_links_fade_with_distance() {
        let mut field = ParticleField::new(500.0, 500.0, 0, 1);
        for x in [0.0, 50.0, 300.0] {
            field.particles.push(Particle {
                pos: Vec2::new(x, 0.0),
                vel: Vec2::ZERO,
                size: 1.0,
                color: 0,
            });
        }
        let links = field.links();
        assert_eq!(links.len(), 1);
        assert!((links[0].alpha - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_reseed_replaces_particles() {
        let mut field = ParticleField::new(1280.0, 720.0, 50, 9);
        field.reseed(375.0, 812.0, 25);
        assert_eq!(field.particles.len(), 25);
        assert!(field.particles.iter().all(|p| p.pos.x <= 375.0));
    }
}

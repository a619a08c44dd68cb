//! Procedural debris: a fixed set of particles that gives a sense of motion
//! through empty space.
//!
//! Particles are placed in a chain, each one a noise-scaled jump away from
//! the previous. As the anchor moves, any coordinate that leaves the cube
//! `anchor ± distance` is wrapped to the opposite face and nudged inward by
//! a noise-derived amount, so the field looks unbounded from finite state.

use drift_config::DebrisConfig;
use drift_entity::{DrawSink, Entity, EntityBehavior, FrameContext};
use glam::Vec3;
use noise::{NoiseFn, Perlin};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A single debris particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub location: Vec3,
    pub size: f32,
}

/// Debris particles kept inside a cube around an anchor.
pub struct DebrisField<N = Perlin> {
    entity: Entity,
    particles: Vec<Particle>,
    distance: f32,
    jump: f32,
    noise: N,
}

impl DebrisField<Perlin> {
    /// Generates `count` particles around `anchor` from `seed`.
    pub fn new(anchor: Vec3, count: usize, distance: f32, seed: u64, config: &DebrisConfig) -> Self {
        Self::with_noise(Perlin::new(seed as u32), anchor, count, distance, seed, config)
    }
}

impl<N: NoiseFn<f64, 3>> DebrisField<N> {
    /// Like [`DebrisField::new`] with a caller-supplied noise source.
    pub fn with_noise(
        noise: N,
        anchor: Vec3,
        count: usize,
        distance: f32,
        seed: u64,
        config: &DebrisConfig,
    ) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let jump = config.jump_amount;

        let mut prev = anchor
            + Vec3::new(
                rng.random::<f32>() * 10.0,
                rng.random::<f32>() * 10.0,
                -rng.random::<f32>() * 100.0,
            );

        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            let n = sample(&noise, prev);
            let mut next = prev;
            next.x += signed(&mut rng, n * jump);
            next.y += signed(&mut rng, n * jump);
            // Depth only moves half the time, and only half as far.
            if rng.random::<bool>() {
                next.z += signed(&mut rng, n * jump / 2.0);
            }
            particles.push(Particle {
                location: next,
                size: n.abs() * config.size_scale,
            });
            prev = next;
        }

        let mut entity = Entity::new("debris");
        entity.location = anchor;
        tracing::debug!(count, distance, seed, "debris field generated");

        Self {
            entity,
            particles,
            distance,
            jump,
            noise,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn anchor(&self) -> Vec3 {
        self.entity.location
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Recenters on `anchor` and wraps every coordinate that left the cube.
    ///
    /// Each axis is checked on its own, so a particle may be corrected on one
    /// axis and left alone on the others in the same pass.
    pub fn update_around(&mut self, anchor: Vec3) {
        self.entity.location = anchor;
        let lo = anchor - Vec3::splat(self.distance);
        let hi = anchor + Vec3::splat(self.distance);
        let max_inset = 2.0 * self.distance;

        for particle in &mut self.particles {
            let p = particle.location;
            let inset = (sample(&self.noise, p).abs() * self.jump / 10.0).min(max_inset);
            particle.location = Vec3::new(
                wrap(p.x, lo.x, hi.x, inset),
                wrap(p.y, lo.y, hi.y, inset),
                wrap(p.z, lo.z, hi.z, inset),
            );
        }
    }
}

fn sample<N: NoiseFn<f64, 3>>(noise: &N, at: Vec3) -> f32 {
    noise.get([at.x as f64, at.y as f64, at.z as f64]) as f32
}

fn signed(rng: &mut ChaCha8Rng, amount: f32) -> f32 {
    if rng.random::<bool>() { amount } else { -amount }
}

fn wrap(value: f32, lo: f32, hi: f32, inset: f32) -> f32 {
    if value > hi {
        (lo + inset).min(hi)
    } else if value < lo {
        (hi - inset).max(lo)
    } else {
        value
    }
}

impl<N: NoiseFn<f64, 3>> EntityBehavior for DebrisField<N> {
    fn entity(&self) -> &Entity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    fn update(&mut self, ctx: &mut FrameContext<'_>) {
        self.update_around(ctx.camera.location);
    }

    fn draw(&self, sink: &mut dyn DrawSink) {
        for particle in &self.particles {
            sink.draw_billboard(particle.location, particle.size);
        }
    }
}

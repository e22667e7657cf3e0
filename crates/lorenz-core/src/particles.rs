use rand::Rng;

use crate::constants::{SPAWN_ORIGIN, SPAWN_STEPS};
use crate::math::Vec3;
use crate::trail::TrailBuffer;

/// Positions and trails for every particle slot, allocated once.
///
/// Only the first `active` slots are simulated and drawn; the rest keep
/// their state so raising the count later resumes them.
#[derive(Clone, Debug)]
pub struct ParticleSystem {
    pub positions: Vec<Vec3>,
    pub trails: Vec<TrailBuffer>,
    active: usize,
}

impl ParticleSystem {
    pub fn new<R: Rng + ?Sized>(
        capacity: usize,
        trail_capacity: usize,
        active: usize,
        rng: &mut R,
    ) -> Self {
        let mut system = Self {
            positions: vec![Vec3::ZERO; capacity],
            trails: (0..capacity)
                .map(|_| TrailBuffer::new(trail_capacity))
                .collect(),
            active: active.min(capacity),
        };
        system.reset(rng);
        system
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn active(&self) -> usize {
        self.active
    }

    /// Clamped to capacity.
    pub fn set_active(&mut self, n: usize) {
        self.active = n.min(self.capacity());
    }

    /// Scatter every slot inside the spawn cube and clear all trails.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for (p, trail) in self.positions.iter_mut().zip(self.trails.iter_mut()) {
            *p = spawn_point(rng);
            trail.reset();
        }
    }

    /// Active slots as `(position, trail)` pairs.
    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (&mut Vec3, &mut TrailBuffer)> + '_ {
        let n = self.active;
        self.positions
            .iter_mut()
            .zip(self.trails.iter_mut())
            .take(n)
    }
}

/// A point on the hundredths lattice of the unit cube above [`SPAWN_ORIGIN`].
pub fn spawn_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let steps = SPAWN_STEPS as f64;
    let mut offset = || rng.gen_range(0..SPAWN_STEPS) as f64 / steps;
    Vec3::new(
        offset() + SPAWN_ORIGIN[0],
        offset() + SPAWN_ORIGIN[1],
        offset() + SPAWN_ORIGIN[2],
    )
}

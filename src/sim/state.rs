//! Bodies and the world that owns them
//!
//! All simulation state lives here. A `World` is built once, then mutated
//! only through [`World::step`]; everything it hands out is a read-only view.

use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use super::collision::Separation;
use super::plane::Plane;
use crate::settings::SimConfig;

/// A simulated sphere
///
/// Velocity is not stored: `pos - last_pos` *is* the velocity of the last
/// integration step (Verlet encoding). The wall bounce relies on rewriting
/// `last_pos`, so any refactor introducing an explicit velocity field has to
/// re-derive that math.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Current center
    pub pos: DVec3,
    /// Center one integration step ago
    pub last_pos: DVec3,
    radius: f64,
}

impl Body {
    /// Exit direction used when two centers coincide exactly. A scattered
    /// direction would also resolve the stack; a fixed one keeps the query
    /// pure and repeatable.
    const COINCIDENT_EXIT: DVec3 = DVec3::new(0.0, 0.0, -1.0);

    /// Seeds `last_pos` behind the starting position so the very first
    /// implied velocity is `initial_velocity * 0.1`, non-zero and
    /// deterministic.
    pub fn new(pos: DVec3, initial_velocity: DVec3, diameter: f64) -> Self {
        debug_assert!(diameter > 0.0);
        Self {
            pos,
            last_pos: pos - initial_velocity * 0.1,
            radius: diameter / 2.0,
        }
    }

    /// Sphere radius, constant for the body's lifetime
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn diameter(&self) -> f64 {
        self.radius * 2.0
    }

    /// Velocity implied by the Verlet position pair
    #[inline]
    pub fn vel(&self) -> DVec3 {
        self.pos - self.last_pos
    }

    /// Checks for intersection with `other`.
    ///
    /// If the spheres overlap, returns the depth and the unit direction
    /// along which `self` moves to resolve it (pointing from `other` toward
    /// `self`). Pure query, no side effects.
    pub fn exit_dir(&self, other: &Body) -> Option<Separation> {
        let to_other = other.pos - self.pos;
        let dist = to_other.length();
        let min_dist = self.radius + other.radius;

        if dist >= min_dist {
            return None;
        }

        if dist == 0.0 {
            return Some(Separation {
                depth: self.radius,
                exit_dir: Self::COINCIDENT_EXIT,
            });
        }

        Some(Separation {
            depth: min_dist - dist,
            exit_dir: -to_other / dist,
        })
    }
}

/// The cubic enclosure and every body inside it
#[derive(Debug, Clone)]
pub struct World {
    pub(super) edge_length: f64,
    pub(super) planes: [Plane; 6],
    pub(super) bodies: Vec<Body>,
    pub(super) tick_dt: f64,
    pub(super) target_speed: f64,
}

impl World {
    /// Build the stock scene
    pub fn new() -> Self {
        Self::with_config(&SimConfig::default())
    }

    /// Build a world from explicit settings: six inward-facing planes from
    /// the edge length, bodies packed on a non-overlapping grid.
    pub fn with_config(config: &SimConfig) -> Self {
        let half = config.edge_length / 2.0;
        let planes = [
            Plane::new(DVec3::X * half, -DVec3::X),
            Plane::new(DVec3::X * -half, DVec3::X),
            Plane::new(DVec3::Y * half, -DVec3::Y),
            Plane::new(DVec3::Y * -half, DVec3::Y),
            Plane::new(DVec3::Z * half, -DVec3::Z),
            Plane::new(DVec3::Z * -half, DVec3::Z),
        ];

        let world = Self {
            edge_length: config.edge_length,
            planes,
            bodies: pack_grid(config),
            tick_dt: config.tick_dt,
            target_speed: config.target_speed,
        };
        log::debug!(
            "world built: {} bodies, edge {}",
            world.bodies.len(),
            world.edge_length
        );
        world
    }

    /// Advance the simulation by one tick. The only mutator.
    pub fn step(&mut self) {
        super::tick::step_world(self);
    }

    /// Read-only view of every body, in construction order
    #[inline]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// The six enclosure faces
    #[inline]
    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }

    #[inline]
    pub fn edge_length(&self) -> f64 {
        self.edge_length
    }

    #[inline]
    pub fn tick_dt(&self) -> f64 {
        self.tick_dt
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Pack bodies on a 3D grid strictly inside the enclosure, spaced so no two
/// start overlapping, stopping once the configured count is reached.
fn pack_grid(config: &SimConfig) -> Vec<Body> {
    let cell = config.body_diameter + config.initial_spacing;
    let steps = (config.edge_length / cell - 1.0) as usize;
    let coord = |step: usize| -> f64 {
        -config.edge_length / 2.0 + config.initial_spacing + (step as f64 + 1.0) * cell
    };

    let base_vel = DVec3::from_array(config.initial_velocity);
    let mut rng = config.velocity_seed.map(Pcg64::seed_from_u64);

    let mut bodies = Vec::with_capacity(config.body_count);
    'fill: for x in 0..steps {
        for y in 0..steps {
            for z in 0..steps {
                if bodies.len() == config.body_count {
                    break 'fill;
                }
                let pos = DVec3::new(coord(x), coord(y), coord(z));
                let vel = match rng.as_mut() {
                    Some(rng) => scatter_direction(rng) * base_vel.length(),
                    None => base_vel,
                };
                bodies.push(Body::new(pos, vel, config.body_diameter));
            }
        }
    }

    if bodies.len() < config.body_count {
        log::warn!(
            "grid only fits {} of {} requested bodies",
            bodies.len(),
            config.body_count
        );
    }
    bodies
}

/// Uniform direction on the unit sphere, by rejection from the unit ball
fn scatter_direction(rng: &mut Pcg64) -> DVec3 {
    loop {
        let v = DVec3::new(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
        );
        let len = v.length();
        if len > 1e-3 && len <= 1.0 {
            return v / len;
        }
    }
}

//! Fixed timestep world stepping
//!
//! Advances the world by one tick in three passes, each running to
//! completion over every body before the next begins:
//! wall collisions, then body/body collisions, then integration.

use glam::DVec3;

use super::collision::{self, MIN_TRAVEL};
use super::state::World;

/// Speeds closer than this to the target are left alone by the governor
const SPEED_TOLERANCE: f64 = 1e-7;

/// Advance the world by one tick. Deterministic: same state in, same state
/// out.
pub fn step_world(world: &mut World) {
    resolve_wall_collisions(world);
    resolve_body_collisions(world);
    integrate(world);
}

/// Pass 1: bounce every penetrating body off each face, then clamp.
fn resolve_wall_collisions(world: &mut World) {
    for plane in world.planes.iter() {
        for body in world.bodies.iter_mut() {
            let bounce = collision::bounce_off_plane(plane, body.pos, body.last_pos, body.radius());
            if let Some(bounce) = bounce {
                body.pos = bounce.pos;
                body.last_pos = bounce.last_pos;
            }
        }
    }

    // Backstop: pull back any body the bounce math let through (or that the
    // degenerate-travel guards skipped). Componentwise, surface flush with
    // the faces.
    let half = world.edge_length / 2.0;
    for body in world.bodies.iter_mut() {
        let limit = half - body.radius();
        body.pos = body.pos.clamp(DVec3::splat(-limit), DVec3::splat(limit));
    }
}

/// Pass 2: positional correction for every overlapping pair, one iteration.
///
/// Each body of a pair moves half the penetration depth. Dense clusters can
/// keep residual overlap after a single tick; later ticks work it off.
fn resolve_body_collisions(world: &mut World) {
    for i in 0..world.bodies.len() {
        let (head, tail) = world.bodies.split_at_mut(i + 1);
        let cur = &mut head[i];
        for other in tail.iter_mut() {
            let Some(sep) = cur.exit_dir(other) else {
                continue;
            };
            let half_depth = sep.depth / 2.0;
            cur.pos += sep.exit_dir * half_depth;
            other.pos -= sep.exit_dir * half_depth;
        }
    }
}

/// Pass 3: speed-governed Verlet step.
///
/// The acceleration is purely corrective, driving the implied speed toward
/// the target; a body at rest gets nudged toward the enclosure center so it
/// picks a direction at all.
fn integrate(world: &mut World) {
    let dt = world.tick_dt;
    let target = world.target_speed;

    for body in world.bodies.iter_mut() {
        let vel = body.vel();
        let vel_dist = vel.length();

        let mut acceleration = DVec3::ZERO;
        if (vel_dist - target).abs() > SPEED_TOLERANCE {
            if vel_dist < MIN_TRAVEL {
                acceleration = -body.pos.normalize_or_zero() * target / dt;
            } else {
                acceleration = (target - vel_dist) / dt * (vel / vel_dist);
            }
        }

        body.last_pos = body.pos;
        body.pos += vel + acceleration * dt * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SimConfig;
    use crate::sim::state::Body;
    use proptest::prelude::*;

    fn empty_world() -> World {
        World::with_config(&SimConfig {
            body_count: 0,
            ..Default::default()
        })
    }

    #[test]
    fn test_pair_separation_after_one_pass() {
        let mut world = empty_world();
        world.bodies = vec![
            Body::new(DVec3::new(-0.05, 0.0, 0.0), DVec3::ZERO, 0.2),
            Body::new(DVec3::new(0.05, 0.0, 0.0), DVec3::ZERO, 0.2),
        ];

        resolve_body_collisions(&mut world);

        let [a, b] = &world.bodies[..] else {
            unreachable!()
        };
        let dist = a.pos.distance(b.pos);
        assert!((dist - (a.radius() + b.radius())).abs() < 1e-12);
        // Both moved, symmetrically
        assert!((a.pos.x + b.pos.x).abs() < 1e-12);
    }

    #[test]
    fn test_wall_pass_reverses_velocity() {
        let mut world = empty_world();
        // Penetrating the x = 1 face, moving straight at it
        world.bodies = vec![Body::new(
            DVec3::new(0.85, 0.0, 0.0),
            DVec3::new(0.5, 0.0, 0.0),
            0.4,
        )];

        resolve_wall_collisions(&mut world);

        assert!(world.bodies[0].vel().x < 0.0);
    }

    #[test]
    fn test_clamp_bounds_resting_body() {
        let mut world = empty_world();
        // At rest outside the enclosure: the bounce math can't help, the
        // clamp has to
        let outside = DVec3::new(1.4, -1.7, 0.0);
        world.bodies = vec![Body::new(outside, DVec3::ZERO, 0.2)];

        resolve_wall_collisions(&mut world);

        let limit = world.edge_length() / 2.0 - 0.1;
        let pos = world.bodies[0].pos;
        assert_eq!(pos, DVec3::new(limit, -limit, 0.0));
    }

    #[test]
    fn test_speed_governor_converges() {
        let mut world = empty_world();
        world.bodies = vec![Body::new(
            DVec3::new(0.1, 0.2, -0.1),
            DVec3::new(0.05, 0.05, 0.1),
            0.2,
        )];

        // No walls, no neighbors: integrate alone, like a free body
        for _ in 0..100_000 {
            integrate(&mut world);
        }

        let speed = world.bodies[0].vel().length();
        assert!((speed - 0.006).abs() < 1e-6);
    }

    #[test]
    fn test_resting_body_picks_a_direction() {
        let mut world = empty_world();
        world.bodies = vec![Body::new(DVec3::new(0.5, 0.0, 0.0), DVec3::ZERO, 0.2)];

        integrate(&mut world);

        let vel = world.bodies[0].vel();
        assert!(vel.length() > 0.0);
        // Nudged toward the enclosure center
        assert!(vel.x < 0.0);
    }

    #[test]
    fn test_full_step_keeps_bodies_separated() {
        let mut world = World::new();
        world.step();

        let bodies = world.bodies();
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let dist = bodies[i].pos.distance(bodies[j].pos);
                let min_dist = bodies[i].radius() + bodies[j].radius();
                assert!(
                    dist >= min_dist - 1e-9,
                    "bodies {i} and {j} overlap: {dist} < {min_dist}"
                );
            }
        }
    }

    #[test]
    fn test_full_step_stays_near_clamp_bounds() {
        let mut world = World::new();
        for _ in 0..200 {
            world.step();
        }

        // Integration runs after the clamp, so a tick can leave a body past
        // the bound by at most one step of travel; the next wall pass pulls
        // it back.
        let slack = 0.02;
        let half = world.edge_length() / 2.0;
        for body in world.bodies() {
            let limit = half - body.radius();
            for c in body.pos.to_array() {
                assert!(c.abs() <= limit + slack, "component {c} past {limit}");
            }
        }
    }

    #[test]
    fn test_stepping_is_deterministic() {
        let mut a = World::new();
        let mut b = World::new();

        for _ in 0..50 {
            a.step();
            b.step();
        }

        for (ba, bb) in a.bodies().iter().zip(b.bodies()) {
            assert_eq!(ba.pos, bb.pos);
            assert_eq!(ba.last_pos, bb.last_pos);
        }
    }

    proptest! {
        #[test]
        fn prop_wall_pass_always_ends_in_bounds(
            px in -2.0f64..2.0, py in -2.0f64..2.0, pz in -2.0f64..2.0,
            vx in -0.1f64..0.1, vy in -0.1f64..0.1, vz in -0.1f64..0.1,
        ) {
            let mut world = empty_world();
            let pos = DVec3::new(px, py, pz);
            world.bodies = vec![Body::new(pos, DVec3::new(vx, vy, vz), 0.2)];

            resolve_wall_collisions(&mut world);

            let limit = world.edge_length() / 2.0 - 0.1;
            for c in world.bodies[0].pos.to_array() {
                prop_assert!(c.abs() <= limit + 1e-9);
            }
        }
    }
}

//! Sphere Box entry point
//!
//! Headless driver: builds a world from settings and steps it the way a
//! renderer would, ten sub-steps per frame, reading the body array only
//! between frames.

use std::path::Path;

use sphere_box::consts::SUBSTEPS_PER_FRAME;
use sphere_box::settings::SimConfig;
use sphere_box::sim::World;

fn main() {
    env_logger::init();

    let config = SimConfig::load(Path::new("settings.json"));
    let frames: u64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(600);

    log::info!(
        "Sphere Box starting: {} bodies in a {} cube, {} frames",
        config.body_count,
        config.edge_length,
        frames
    );

    let mut world = World::with_config(&config);

    for frame in 0..frames {
        for _ in 0..SUBSTEPS_PER_FRAME {
            world.step();
        }

        // All sub-steps done; now the frame's read-only pass over the state
        if frame % 60 == 0 {
            let max_speed = world
                .bodies()
                .iter()
                .map(|b| b.vel().length())
                .fold(0.0, f64::max);
            let max_coord = world
                .bodies()
                .iter()
                .map(|b| b.pos.abs().max_element())
                .fold(0.0, f64::max);
            log::info!("frame {frame}: max speed {max_speed:.6}, max |coord| {max_coord:.4}");
        }
    }

    let half = world.edge_length() / 2.0;
    let escaped = world
        .bodies()
        .iter()
        .filter(|b| b.pos.abs().max_element() > half - b.radius() + 1e-9)
        .count();
    log::info!(
        "done after {frames} frames, {} bodies, {escaped} outside the clamp bounds",
        world.bodies().len()
    );
}

//! Sphere Box - bouncing spheres in a closed cubic enclosure
//!
//! Core modules:
//! - `sim`: deterministic simulation (boundary planes, bodies, Verlet stepping)
//! - `settings`: data-driven simulation tuning
//!
//! The simulation is the whole product here; anything that wants to draw it
//! reads the world through its accessors after stepping and never writes back.

pub mod settings;
pub mod sim;

pub use settings::SimConfig;

/// Simulation constants
pub mod consts {
    /// Fixed integration step size
    pub const TICK_DT: f64 = 1e-4;
    /// Simulation sub-steps per observed frame
    pub const SUBSTEPS_PER_FRAME: u32 = 10;

    /// Number of bodies packed into the enclosure
    pub const BODY_COUNT: usize = 40;
    /// Sphere diameter
    pub const BODY_DIAMETER: f64 = 0.2;
    /// Gap between neighboring spheres in the starting grid
    pub const INITIAL_SPACING: f64 = 0.02;

    /// Cube edge length
    pub const EDGE_LENGTH: f64 = 2.0;

    /// Speed the governor drives every body toward
    pub const TARGET_SPEED: f64 = 0.006;
    /// Starting velocity for every body (unless a seed scatters it)
    pub const INITIAL_VELOCITY: [f64; 3] = [0.05, 0.05, 0.1];
}

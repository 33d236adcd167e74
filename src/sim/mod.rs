//! Deterministic simulation module
//!
//! The whole physics kernel lives here. It must stay pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (bodies keep their construction order)
//! - No I/O, rendering, or platform dependencies

pub mod collision;
pub mod plane;
pub mod state;
pub mod tick;

pub use collision::{Separation, WallBounce, bounce_off_plane, reflect};
pub use plane::Plane;
pub use state::{Body, World};
pub use tick::step_world;

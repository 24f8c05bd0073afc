pub mod controls;
pub mod pointer;

pub use controls::{wire_controls, Controls};
pub use pointer::wire_orbit_handlers;

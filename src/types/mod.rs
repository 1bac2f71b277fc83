//! Type definitions

pub mod log_sheet;
pub mod trip;
pub mod waypoint;

pub use log_sheet::*;
pub use trip::*;
pub use waypoint::*;

//! Highway planner library entry points.
//!
//! This crate keeps an ordered registry of stations along a one-dimensional
//! highway, each with a bounded fleet of vehicles, and answers hop-minimal
//! path queries between two stations. Higher-level consumers (the CLI) should
//! only depend on the items exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod config;
pub mod error;
pub mod fleet;
pub mod index;
pub mod planner;
pub mod protocol;
pub mod registry;
pub mod station;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use config::{RegistryConfig, DEFAULT_FLEET_CAPACITY};
pub use error::{Error, Result};
pub use fleet::VehicleFleet;
pub use index::{InvariantViolation, NodeId, StationIndex};
pub use planner::{plan_path, Direction, PathResult, PathSegment};
pub use protocol::{Command, CommandStream, Keyword, Response};
pub use registry::Registry;
pub use station::{Autonomy, Km, Station, StationSnapshot};

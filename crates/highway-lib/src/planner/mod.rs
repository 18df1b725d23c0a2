//! Path planning between two stations.
//!
//! This module provides:
//! - [`Direction`] - Direction of travel along the highway
//! - [`PathSegment`] - Value-copy snapshot of the stations between two endpoints
//! - [`PathResult`] - Outcome of a planning query
//! - [`plan_path`] - Main entry point for computing paths
//!
//! # Strategy Pattern
//!
//! Each direction of travel has its own algorithm, encapsulated in a
//! [`PathStrategy`] implementation and picked by [`select_strategy`].
//!
//! # Example
//!
//! ```
//! use highway_lib::{PathResult, Registry};
//!
//! let mut registry = Registry::default();
//! registry.add_station(0, [5]).unwrap();
//! registry.add_station(5, []).unwrap();
//! assert_eq!(registry.plan_path(0, 5), PathResult::Sequence(vec![0, 5]));
//! ```

mod segment;
mod strategy;

pub use segment::PathSegment;
pub use strategy::{select_strategy, DagRelaxation, GreedyStops, PathAlgorithm, PathStrategy};

use std::fmt;

use tracing::trace;

use crate::error::{Error, Result};
use crate::index::StationIndex;
use crate::station::Km;

/// Direction of travel between two distinct stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards higher positions.
    Ascending,
    /// Towards lower positions.
    Descending,
}

impl Direction {
    /// Direction from `start` to `end`. Equal positions count as ascending.
    pub fn between(start: Km, end: Km) -> Self {
        if end < start {
            Direction::Descending
        } else {
            Direction::Ascending
        }
    }
}

/// Outcome of a planning query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathResult {
    /// Start and end are the same existing station.
    SamePoint(Km),
    /// Positions of every stop in travel order, both endpoints included.
    Sequence(Vec<Km>),
    /// The stations between the endpoints cannot be crossed.
    NoPath,
    /// An endpoint is not a station. Holds the missing position, checking
    /// the start first.
    EndpointNotFound(Km),
}

impl PathResult {
    /// Stops of the path, if one exists.
    pub fn stops(&self) -> Option<&[Km]> {
        match self {
            PathResult::SamePoint(km) => Some(std::slice::from_ref(km)),
            PathResult::Sequence(stops) => Some(stops),
            PathResult::NoPath | PathResult::EndpointNotFound(_) => None,
        }
    }

    /// Number of hops, if a path exists.
    pub fn hop_count(&self) -> Option<usize> {
        self.stops().map(|stops| stops.len().saturating_sub(1))
    }

    /// Convert into the stop list, mapping failures onto library errors.
    pub fn into_result(self, start: Km, end: Km) -> Result<Vec<Km>> {
        match self {
            PathResult::SamePoint(km) => Ok(vec![km]),
            PathResult::Sequence(stops) => Ok(stops),
            PathResult::NoPath => Err(Error::Unreachable { start, end }),
            PathResult::EndpointNotFound(km) => Err(Error::StationNotFound { km }),
        }
    }
}

impl fmt::Display for PathResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stops() {
            Some(stops) => {
                for (position, km) in stops.iter().enumerate() {
                    if position > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{km}")?;
                }
                Ok(())
            }
            None => f.write_str("nessun percorso"),
        }
    }
}

/// Compute the hop-minimal path from `start` to `end` over `index`.
pub fn plan_path(index: &StationIndex, start: Km, end: Km) -> PathResult {
    let Some(start_node) = index.search_node(start) else {
        return PathResult::EndpointNotFound(start);
    };
    let Some(end_node) = index.search_node(end) else {
        return PathResult::EndpointNotFound(end);
    };
    if start == end {
        return PathResult::SamePoint(start);
    }

    let segment = PathSegment::materialize(index, start_node, end_node);
    let strategy = select_strategy(segment.direction());
    trace!(start, end, algorithm = %strategy.algorithm(), "planning path");

    match strategy.find_path(&segment) {
        Some(stops) => PathResult::Sequence(stops),
        None => PathResult::NoPath,
    }
}

/// Hop count of `path`, checking that every hop stays within range.
///
/// Returns `None` when the path is empty or some hop overshoots the best
/// vehicle of the station it departs from.
pub fn validate_hops(index: &StationIndex, path: &[Km]) -> Option<usize> {
    if path.is_empty() {
        return None;
    }
    for hop in path.windows(2) {
        let from = index.search(hop[0])?.snapshot();
        index.search(hop[1])?;
        if hop[0] == hop[1] || !from.reaches(hop[1]) {
            return None;
        }
    }
    Some(path.len() - 1)
}

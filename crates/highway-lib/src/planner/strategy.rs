//! Direction-specific path planning strategies.
//!
//! Reachability differs qualitatively by direction of travel, so each
//! direction gets its own algorithm behind the [`PathStrategy`] trait:
//! - [`GreedyStops`] for ascending segments, where every stop is the
//!   lowest-positioned station that still reaches the next one.
//! - [`DagRelaxation`] for descending segments, a single relaxation pass over
//!   the segment treated as a DAG in index order.

use std::fmt;

use serde::Serialize;

use crate::station::{Km, StationSnapshot};

use super::{Direction, PathSegment};

/// Identifier of a planning algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathAlgorithm {
    /// Backward-verified forward greedy (ascending travel).
    GreedyStops,
    /// Single-pass hop relaxation over a DAG (descending travel).
    DagRelaxation,
}

impl fmt::Display for PathAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            PathAlgorithm::GreedyStops => "greedy_stops",
            PathAlgorithm::DagRelaxation => "dag_relaxation",
        };
        f.write_str(value)
    }
}

/// Trait for hop-minimal planning strategies.
pub trait PathStrategy: Send + Sync {
    /// The algorithm identifier for this strategy.
    fn algorithm(&self) -> PathAlgorithm;

    /// Compute the stops from the first to the last station of `segment`.
    ///
    /// Returns the positions of every stop, both endpoints included, or
    /// `None` when the segment cannot be crossed.
    fn find_path(&self, segment: &PathSegment) -> Option<Vec<Km>>;
}

/// Greedy planner for ascending segments.
///
/// Scans from the segment start for the first station able to reach the
/// current target, makes it a stop and the new target, and repeats until
/// the start itself becomes a stop. Reach only grows with position in this
/// direction, so the lowest station reaching a target is never more hops
/// from the start than any other, and the result is hop-minimal.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyStops;

impl PathStrategy for GreedyStops {
    fn algorithm(&self) -> PathAlgorithm {
        PathAlgorithm::GreedyStops
    }

    fn find_path(&self, segment: &PathSegment) -> Option<Vec<Km>> {
        let stations = segment.stations();
        let destination = stations.last()?;

        let mut stops = vec![false; stations.len()];
        let mut target = stations.len() - 1;
        let mut current = 0;
        while current < target {
            if u64::from(stations[target].km) <= stations[current].forward_reach() {
                stops[current] = true;
                target = current;
                current = 0;
            } else if current + 1 == target {
                return None;
            } else {
                current += 1;
            }
        }

        let mut path: Vec<Km> = stations
            .iter()
            .zip(&stops)
            .filter(|&(_, &stop)| stop)
            .map(|(station, _)| station.km)
            .collect();
        path.push(destination.km);
        Some(path)
    }
}

/// Relaxation planner for descending segments.
///
/// Station `i` links to every later station `j` whose position is within
/// `i`'s backward reach. Links only point forward in the segment, so one
/// pass in index order settles every hop count. When two predecessors tie,
/// the one scanned last (the lower position) is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct DagRelaxation;

impl PathStrategy for DagRelaxation {
    fn algorithm(&self) -> PathAlgorithm {
        PathAlgorithm::DagRelaxation
    }

    fn find_path(&self, segment: &PathSegment) -> Option<Vec<Km>> {
        let stations = segment.stations();
        if stations.is_empty() {
            return None;
        }

        let mut hops: Vec<Option<usize>> = vec![None; stations.len()];
        let mut previous: Vec<Option<usize>> = vec![None; stations.len()];
        hops[0] = Some(0);

        for (current, station) in stations.iter().enumerate() {
            let Some(reached) = hops[current] else {
                continue;
            };
            let candidate = reached + 1;
            for next in within_backward_reach(station, stations, current) {
                if hops[next].map_or(true, |known| candidate <= known) {
                    hops[next] = Some(candidate);
                    previous[next] = Some(current);
                }
            }
        }

        let mut path = Vec::with_capacity(hops[stations.len() - 1]? + 1);
        let mut cursor = stations.len() - 1;
        path.push(stations[cursor].km);
        while cursor > 0 {
            cursor = previous[cursor]?;
            path.push(stations[cursor].km);
        }
        path.reverse();
        Some(path)
    }
}

/// Indices after `current` that a hop from `station` can land on. Positions
/// decrease along a descending segment, so the run ends at the first miss.
fn within_backward_reach<'a>(
    station: &'a StationSnapshot,
    stations: &'a [StationSnapshot],
    current: usize,
) -> impl Iterator<Item = usize> + 'a {
    let floor = station.backward_reach();
    stations[current + 1..]
        .iter()
        .take_while(move |next| next.km >= floor)
        .enumerate()
        .map(move |(offset, _)| current + 1 + offset)
}

/// Select the strategy for a direction of travel.
pub fn select_strategy(direction: Direction) -> Box<dyn PathStrategy> {
    match direction {
        Direction::Ascending => Box::new(GreedyStops),
        Direction::Descending => Box::new(DagRelaxation),
    }
}

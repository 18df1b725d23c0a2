use tracing::trace;

use crate::index::{NodeId, StationIndex};
use crate::station::StationSnapshot;

use super::Direction;

/// Stations between two query endpoints, inclusive, in travel order.
///
/// The segment holds value copies, so it stays valid however the index
/// changes after it was built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    direction: Direction,
    stations: Vec<StationSnapshot>,
}

impl PathSegment {
    /// Walk the index from `start` to `end`, copying every station visited.
    ///
    /// Both handles must come from `index` and be distinct.
    pub fn materialize(index: &StationIndex, start: NodeId, end: NodeId) -> Self {
        let start_km = index.station(start).km();
        let end_km = index.station(end).km();
        let direction = Direction::between(start_km, end_km);

        let mut stations = Vec::new();
        let mut cursor = Some(start);
        while let Some(id) = cursor {
            let station = index.station(id);
            stations.push(station.snapshot());
            if station.km() == end_km {
                break;
            }
            cursor = match direction {
                Direction::Ascending => index.successor(id),
                Direction::Descending => index.predecessor(id),
            };
        }

        trace!(
            start = start_km,
            end = end_km,
            len = stations.len(),
            "materialized path segment"
        );
        Self {
            direction,
            stations,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn stations(&self) -> &[StationSnapshot] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl From<Vec<StationSnapshot>> for PathSegment {
    /// Build a segment from snapshots already in travel order.
    fn from(stations: Vec<StationSnapshot>) -> Self {
        let direction = match (stations.first(), stations.last()) {
            (Some(first), Some(last)) => Direction::between(first.km, last.km),
            _ => Direction::Ascending,
        };
        Self {
            direction,
            stations,
        }
    }
}

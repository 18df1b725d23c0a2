//! Fixture builders shared by the unit tests.

use crate::config::DEFAULT_FLEET_CAPACITY;
use crate::index::StationIndex;
use crate::planner::PathSegment;
use crate::station::{Autonomy, Km, Station, StationSnapshot};

/// Station at `km` holding the given vehicles.
pub fn station(km: Km, vehicles: &[Autonomy]) -> Station {
    let mut station = Station::new(km, DEFAULT_FLEET_CAPACITY);
    for &autonomy in vehicles {
        assert!(station.fleet_mut().insert(autonomy), "fixture fleet full");
    }
    station
}

/// Index with one station per `(km, best autonomy)` pair.
pub fn index_from(stations: &[(Km, Autonomy)]) -> StationIndex {
    let mut index = StationIndex::new();
    for &(km, autonomy) in stations {
        index
            .insert(station(km, &[autonomy]))
            .expect("fixture positions are unique");
    }
    index
}

/// Segment built directly from `(km, best autonomy)` pairs in travel order.
pub fn segment(stations: &[(Km, Autonomy)]) -> PathSegment {
    stations
        .iter()
        .map(|&(km, max_autonomy)| StationSnapshot { km, max_autonomy })
        .collect::<Vec<_>>()
        .into()
}

//! Common test utilities and fixture helpers.
//!
//! Provides registry builders and a brute-force hop oracle used to check the
//! planning strategies against an independent search.

use std::collections::VecDeque;

use highway_lib::{Autonomy, Km, PathResult, Registry, Station};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Registry with one station per `(km, best autonomy)` pair.
#[allow(dead_code)]
pub fn registry_with(stations: &[(Km, Autonomy)]) -> Registry {
    let mut registry = Registry::default();
    for &(km, autonomy) in stations {
        registry
            .add_station(km, [autonomy])
            .expect("fixture positions are unique");
    }
    registry
}

/// Deterministic RNG so failures are reproducible.
#[allow(dead_code)]
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random highway: up to `count` distinct positions below `span`, each with
/// one to three vehicles of autonomy below `max_autonomy`.
#[allow(dead_code)]
pub fn random_registry(rng: &mut StdRng, count: usize, span: Km, max_autonomy: Autonomy) -> Registry {
    let mut registry = Registry::default();
    for _ in 0..count {
        let km = rng.gen_range(0..span);
        let vehicles: Vec<Autonomy> = (0..rng.gen_range(1..=3))
            .map(|_| rng.gen_range(0..max_autonomy))
            .collect();
        let _ = registry.add_station(km, vehicles);
    }
    registry
}

/// Minimum hop count from `start` to `end` by breadth-first search over the
/// stations between them, hopping only towards `end`.
#[allow(dead_code)]
pub fn oracle_hops(registry: &Registry, start: Km, end: Km) -> Option<usize> {
    let (low, high) = (start.min(end), start.max(end));
    let mut segment: Vec<&Station> = registry
        .stations()
        .filter(|station| (low..=high).contains(&station.km()))
        .collect();
    if start > end {
        segment.reverse();
    }
    if segment.first()?.km() != start || segment.last()?.km() != end {
        return None;
    }

    let mut hops = vec![None; segment.len()];
    let mut queue = VecDeque::from([0usize]);
    hops[0] = Some(0usize);
    while let Some(current) = queue.pop_front() {
        let from = segment[current].snapshot();
        let reached = hops[current]?;
        for next in current + 1..segment.len() {
            if hops[next].is_none() && from.reaches(segment[next].km()) {
                hops[next] = Some(reached + 1);
                queue.push_back(next);
            }
        }
    }
    hops[segment.len() - 1]
}

/// Assert that `result` is a valid path from `start` to `end` whose hop count
/// matches the oracle, or that both agree no path exists.
#[allow(dead_code)]
pub fn assert_optimal(registry: &Registry, start: Km, end: Km, result: &PathResult) {
    let expected = oracle_hops(registry, start, end);
    match result.stops() {
        Some(stops) => {
            assert_eq!(stops.first(), Some(&start), "path starts at {start}");
            assert_eq!(stops.last(), Some(&end), "path ends at {end}");
            let hops = highway_lib::planner::validate_hops(registry.index(), stops);
            assert!(hops.is_some(), "every hop in {stops:?} is within range");
            assert_eq!(hops, expected, "hop count for {start} -> {end}: {stops:?}");
        }
        None => assert_eq!(expected, None, "oracle found a path {start} -> {end}"),
    }
}

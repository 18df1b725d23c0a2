//! The station registry: the owned state every command operates on.

use tracing::{debug, warn};

use crate::config::RegistryConfig;
use crate::error::{Error, Result};
use crate::index::{self, StationIndex};
use crate::planner::{plan_path, PathResult};
use crate::station::{Autonomy, Km, Station};

/// Ordered collection of stations along the highway.
///
/// Constructed empty; every station and fleet is released when the registry
/// is cleared or dropped.
#[derive(Debug, Default)]
pub struct Registry {
    config: RegistryConfig,
    index: StationIndex,
}

impl Registry {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            index: StationIndex::new(),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Read-only view of the underlying index.
    pub fn index(&self) -> &StationIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn station(&self, km: Km) -> Option<&Station> {
        self.index.search(km)
    }

    /// Stations in increasing position order.
    pub fn stations(&self) -> index::Iter<'_> {
        self.index.iter()
    }

    /// Open a station at `km` with an initial fleet.
    ///
    /// Vehicles beyond the configured fleet capacity are dropped. Fails with
    /// [`Error::DuplicateStation`] when `km` is taken, without touching the
    /// existing station.
    pub fn add_station(
        &mut self,
        km: Km,
        vehicles: impl IntoIterator<Item = Autonomy>,
    ) -> Result<()> {
        if self.index.contains(km) {
            return Err(Error::DuplicateStation { km });
        }

        let mut station = Station::new(km, self.config.fleet_capacity);
        let mut dropped = 0usize;
        for autonomy in vehicles {
            if !station.fleet_mut().insert(autonomy) {
                dropped += 1;
            }
        }
        if dropped > 0 {
            warn!(
                km,
                dropped,
                capacity = self.config.fleet_capacity,
                "initial fleet exceeds capacity; extra vehicles dropped"
            );
        }

        let vehicles = station.fleet().len();
        self.index.insert(station)?;
        debug!(km, vehicles, "station added");
        Ok(())
    }

    /// Demolish the station at `km` together with its fleet.
    pub fn remove_station(&mut self, km: Km) -> Result<Station> {
        let station = self.index.remove(km)?;
        debug!(km, vehicles = station.fleet().len(), "station removed");
        Ok(station)
    }

    /// Park a vehicle at the station at `km`.
    pub fn add_vehicle(&mut self, km: Km, autonomy: Autonomy) -> Result<()> {
        let station = self
            .index
            .search_mut(km)
            .ok_or(Error::StationNotFound { km })?;
        if !station.fleet_mut().insert(autonomy) {
            return Err(Error::FleetFull {
                km,
                capacity: station.fleet().capacity(),
            });
        }
        debug!(km, autonomy, "vehicle added");
        Ok(())
    }

    /// Scrap one vehicle with the given autonomy from the station at `km`.
    pub fn scrap_vehicle(&mut self, km: Km, autonomy: Autonomy) -> Result<()> {
        let station = self
            .index
            .search_mut(km)
            .ok_or(Error::StationNotFound { km })?;
        if !station.fleet_mut().remove(autonomy) {
            return Err(Error::VehicleNotFound { km, autonomy });
        }
        debug!(km, autonomy, "vehicle scrapped");
        Ok(())
    }

    /// Hop-minimal path between the stations at `start` and `end`.
    pub fn plan_path(&self, start: Km, end: Km) -> PathResult {
        plan_path(&self.index, start, end)
    }

    /// Release every station.
    pub fn clear(&mut self) {
        debug!(stations = self.index.len(), "registry cleared");
        self.index.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_station_reports_duplicates_without_mutation() {
        let mut registry = Registry::default();
        registry.add_station(10, [3, 7]).expect("added");
        let err = registry.add_station(10, [100]).expect_err("duplicate");
        assert!(matches!(err, Error::DuplicateStation { km: 10 }));
        assert_eq!(registry.station(10).map(Station::max_autonomy), Some(7));
    }

    #[test]
    fn initial_vehicles_beyond_capacity_are_dropped() {
        let config = RegistryConfig::with_fleet_capacity(2).expect("valid");
        let mut registry = Registry::new(config);
        registry.add_station(0, [1, 2, 30]).expect("added");
        let station = registry.station(0).expect("present");
        assert_eq!(station.fleet().len(), 2);
        assert_eq!(station.max_autonomy(), 2);
    }

    #[test]
    fn add_vehicle_checks_station_and_capacity() {
        let config = RegistryConfig::with_fleet_capacity(1).expect("valid");
        let mut registry = Registry::new(config);
        assert!(matches!(
            registry.add_vehicle(5, 1),
            Err(Error::StationNotFound { km: 5 })
        ));
        registry.add_station(5, []).expect("added");
        registry.add_vehicle(5, 9).expect("room for one");
        assert!(matches!(
            registry.add_vehicle(5, 10),
            Err(Error::FleetFull { km: 5, capacity: 1 })
        ));
        assert_eq!(registry.station(5).map(Station::max_autonomy), Some(9));
    }

    #[test]
    fn scrap_vehicle_round_trip() {
        let mut registry = Registry::default();
        registry.add_station(1, [10, 20, 5]).expect("added");
        assert_eq!(registry.station(1).map(Station::max_autonomy), Some(20));
        registry.scrap_vehicle(1, 20).expect("present");
        assert_eq!(registry.station(1).map(Station::max_autonomy), Some(10));
        let err = registry.scrap_vehicle(1, 20).expect_err("gone");
        assert!(err.is_not_found());
    }

    #[test]
    fn remove_station_drops_its_fleet() {
        let mut registry = Registry::default();
        registry.add_station(3, [4, 4]).expect("added");
        let removed = registry.remove_station(3).expect("present");
        assert_eq!(removed.fleet().len(), 2);
        assert!(registry.is_empty());
        assert!(matches!(
            registry.remove_station(3),
            Err(Error::StationNotFound { km: 3 })
        ));
    }

    #[test]
    fn clear_empties_registry() {
        let mut registry = Registry::default();
        registry.add_station(1, []).expect("added");
        registry.add_station(2, []).expect("added");
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.stations().count(), 0);
    }
}

use serde::Serialize;

use crate::fleet::VehicleFleet;

/// Position along the highway, in kilometres from its origin.
pub type Km = u32;

/// Maximum travel distance of a vehicle, in kilometres.
pub type Autonomy = u32;

/// A service station: a unique position plus the vehicles parked there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    km: Km,
    fleet: VehicleFleet,
}

impl Station {
    /// Create a station with an empty fleet of the given capacity.
    pub fn new(km: Km, fleet_capacity: usize) -> Self {
        Self {
            km,
            fleet: VehicleFleet::new(fleet_capacity),
        }
    }

    pub fn km(&self) -> Km {
        self.km
    }

    pub fn fleet(&self) -> &VehicleFleet {
        &self.fleet
    }

    pub fn fleet_mut(&mut self) -> &mut VehicleFleet {
        &mut self.fleet
    }

    /// Range of the best vehicle parked here (0 with no vehicles).
    pub fn max_autonomy(&self) -> Autonomy {
        self.fleet.max_autonomy()
    }

    /// Value copy of the data path planning needs.
    pub fn snapshot(&self) -> StationSnapshot {
        StationSnapshot {
            km: self.km,
            max_autonomy: self.max_autonomy(),
        }
    }
}

/// Position and best range of a station at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StationSnapshot {
    pub km: Km,
    pub max_autonomy: Autonomy,
}

impl StationSnapshot {
    /// Furthest position reachable when travelling towards higher km.
    pub fn forward_reach(&self) -> u64 {
        u64::from(self.km) + u64::from(self.max_autonomy)
    }

    /// Closest-to-origin position reachable when travelling towards km 0.
    pub fn backward_reach(&self) -> Km {
        self.km.saturating_sub(self.max_autonomy)
    }

    /// Whether a single hop from this station lands on `target`.
    pub fn reaches(&self, target: Km) -> bool {
        if target >= self.km {
            u64::from(target) <= self.forward_reach()
        } else {
            target >= self.backward_reach()
        }
    }
}

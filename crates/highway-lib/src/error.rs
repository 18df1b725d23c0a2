use thiserror::Error;

use crate::station::{Autonomy, Km};

/// Convenient result alias for the highway library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when adding a station at a position that is already occupied.
    #[error("a station already exists at km {km}")]
    DuplicateStation { km: Km },

    /// Raised when no station exists at the requested position.
    #[error("no station at km {km}")]
    StationNotFound { km: Km },

    /// Raised when scrapping a vehicle the station does not hold.
    #[error("station at km {km} has no vehicle with autonomy {autonomy}")]
    VehicleNotFound { km: Km, autonomy: Autonomy },

    /// Raised when a station's fleet has no room for another vehicle.
    #[error("fleet at km {km} is full ({capacity} vehicles)")]
    FleetFull { km: Km, capacity: usize },

    /// Raised when no hop sequence connects two stations.
    #[error("no path from km {start} to km {end}")]
    Unreachable { start: Km, end: Km },

    /// Raised when a fleet capacity of zero is configured.
    #[error("fleet capacity must be at least 1 (got {capacity})")]
    InvalidFleetCapacity { capacity: usize },

    /// Raised when the command stream contains an unrecognized keyword.
    #[error("unknown command: {keyword}")]
    UnknownCommand { keyword: String },

    /// Raised when the command stream ends before a command's arguments.
    #[error("{command}: missing {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    /// Raised when a command argument is not a valid non-negative integer.
    #[error("{command}: invalid {argument} '{value}'")]
    InvalidArgument {
        command: &'static str,
        argument: &'static str,
        value: String,
    },
}

impl Error {
    /// Whether the error reports a missing station or vehicle.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::StationNotFound { .. } | Error::VehicleNotFound { .. }
        )
    }
}

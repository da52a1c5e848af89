//! Error types for the sensorbar core library.

use std::path::PathBuf;
use thiserror::Error;

use crate::kind::SensorKind;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while locating, reading or rendering a sensor.
#[derive(Error, Debug)]
pub enum Error {
    /// None of the configured or default candidates points at a sensor.
    #[error("No sensor source found for {0} sensor")]
    NoSource(SensorKind),

    /// A sensor file exists (or was chosen) but could not be opened.
    #[error("Can't open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A sensor file was opened but reading from it failed.
    #[error("Can't read from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The sensor file did not contain a base-10 integer.
    #[error("Malformed reading {content:?} from {}", .path.display())]
    Malformed { path: PathBuf, content: String },

    /// The sensor kind cannot be read on this platform.
    #[error("Only temperature sensor reading is supported on this platform, not {0}")]
    Unsupported(SensorKind),

    /// Neither platform sysctl answered for the thermal zone.
    #[error("sysctl hw.acpi.thermal.tz{zone}.temperature and dev.cpu.{zone}.temperature failed")]
    Sysctl { zone: i64 },

    /// Unknown value for the `type` key.
    #[error("Invalid sensor type: {0}")]
    InvalidKind(String),

    /// The selected format string could not be rendered.
    #[error("Invalid format {format:?}: {reason}")]
    Template { format: String, reason: String },
}

impl Error {
    /// Returns true if no sensor could be found at all, as opposed to a
    /// sensor that was found but could not be used.
    pub fn is_missing_source(&self) -> bool {
        matches!(self, Error::NoSource(_))
    }
}

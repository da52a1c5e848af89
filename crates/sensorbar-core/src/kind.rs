//! Sensor kinds.
//!
//! The kind is fixed when a module is built and decides how raw readings are
//! scaled and which tooltip is shown by default.

use crate::{Error, Result};
use std::str::FromStr;

/// What a sensor measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SensorKind {
    /// Temperature in millidegrees Celsius.
    #[default]
    Temperature,
    /// Fan speed, used as reported.
    Fan,
    /// Power in microwatts.
    Power,
}

impl SensorKind {
    /// Converts a raw sysfs value into the kind's primary display unit
    /// (°C, fan units, or Watts).
    pub fn scale(&self, raw: i64) -> f64 {
        match self {
            SensorKind::Temperature => raw as f64 / 1000.0,
            SensorKind::Fan => raw as f64,
            SensorKind::Power => raw as f64 / 1_000_000.0,
        }
    }

    /// Returns the tooltip format used when `tooltip-format` is unset.
    pub fn default_tooltip_format(&self) -> &'static str {
        match self {
            SensorKind::Temperature => "{temperatureC}°C",
            SensorKind::Fan => "{fan} RPM",
            SensorKind::Power => "{power}W",
        }
    }

    /// Returns true if the built-in thermal zone fallback applies.
    pub fn has_thermal_zone(&self) -> bool {
        matches!(self, SensorKind::Temperature)
    }
}

impl FromStr for SensorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "temperature" => Ok(SensorKind::Temperature),
            "fan" => Ok(SensorKind::Fan),
            "power" => Ok(SensorKind::Power),
            _ => Err(Error::InvalidKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for SensorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SensorKind::Temperature => write!(f, "temperature"),
            SensorKind::Fan => write!(f, "fan"),
            SensorKind::Power => write!(f, "power"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale() {
        assert_eq!(SensorKind::Temperature.scale(45123), 45.123);
        assert_eq!(SensorKind::Fan.scale(2400), 2400.0);
        assert_eq!(SensorKind::Power.scale(1_250_000), 1.25);
    }

    #[test]
    fn test_default_tooltip_format() {
        assert_eq!(
            SensorKind::Temperature.default_tooltip_format(),
            "{temperatureC}°C"
        );
        assert_eq!(SensorKind::Fan.default_tooltip_format(), "{fan} RPM");
        assert_eq!(SensorKind::Power.default_tooltip_format(), "{power}W");
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "temperature".parse::<SensorKind>().unwrap(),
            SensorKind::Temperature
        );
        assert_eq!("Fan".parse::<SensorKind>().unwrap(), SensorKind::Fan);
        assert_eq!("power".parse::<SensorKind>().unwrap(), SensorKind::Power);
        assert!(matches!(
            "voltage".parse::<SensorKind>(),
            Err(Error::InvalidKind(_))
        ));
    }

    #[test]
    fn test_display_round_trips() {
        for kind in [SensorKind::Temperature, SensorKind::Fan, SensorKind::Power] {
            assert_eq!(kind.to_string().parse::<SensorKind>().unwrap(), kind);
        }
    }
}

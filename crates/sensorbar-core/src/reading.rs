//! Readings, thresholds and classification.

use crate::config::ModuleConfig;
use crate::kind::SensorKind;

/// A single sample in the kind's primary display unit, before rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    kind: SensorKind,
    value: f64,
}

impl Reading {
    /// Creates a reading from a value already in the display unit.
    pub fn new(kind: SensorKind, value: f64) -> Self {
        Self { kind, value }
    }

    /// Creates a reading from a raw sysfs value.
    pub fn from_raw(kind: SensorKind, raw: i64) -> Self {
        Self::new(kind, kind.scale(raw))
    }

    pub fn kind(&self) -> SensorKind {
        self.kind
    }

    /// Returns the unrounded value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns the integer value used for classification and display.
    ///
    /// Power truncates toward zero, everything else rounds half away
    /// from zero.
    pub fn rounded(&self) -> i64 {
        match self.kind {
            SensorKind::Power => self.value.trunc() as i64,
            SensorKind::Temperature | SensorKind::Fan => self.value.round() as i64,
        }
    }

    /// Returns the placeholder values for this reading. Quantities that do
    /// not belong to the kind are zero.
    pub fn units(&self) -> Units {
        let mut units = Units::default();
        match self.kind {
            SensorKind::Temperature => {
                units.temperature_c = self.rounded();
                units.temperature_f = (self.value * 1.8 + 32.0).round() as i64;
                units.temperature_k = (self.value + 273.15).round() as i64;
            }
            SensorKind::Fan => units.fan = self.rounded(),
            SensorKind::Power => units.power = self.rounded(),
        }
        units
    }
}

/// Derived quantities substituted into format strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Units {
    pub temperature_c: i64,
    pub temperature_f: i64,
    pub temperature_k: i64,
    pub fan: i64,
    pub power: i64,
}

/// Warning and critical levels in the display unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thresholds {
    pub warning: Option<i64>,
    pub critical: Option<i64>,
}

impl Thresholds {
    pub fn new(warning: Option<i64>, critical: Option<i64>) -> Self {
        Self { warning, critical }
    }

    /// Reads `warning-threshold` and `critical-threshold`.
    pub fn from_config(config: &ModuleConfig) -> Self {
        Self::new(
            config.integer("warning-threshold"),
            config.integer("critical-threshold"),
        )
    }

    /// Evaluates both thresholds against a rounded value.
    pub fn classify(&self, value: i64) -> Classification {
        Classification {
            warning: self.warning.is_some_and(|w| value >= w),
            critical: self.critical.is_some_and(|c| value >= c),
        }
    }
}

/// Both threshold flags for one reading.
///
/// Both flags are kept even when the display only shows the higher one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classification {
    pub warning: bool,
    pub critical: bool,
}

impl Classification {
    /// Returns the state shown to the user.
    pub fn state(&self) -> State {
        if self.critical {
            State::Critical
        } else if self.warning {
            State::Warning
        } else {
            State::Normal
        }
    }
}

/// Displayed severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum State {
    #[default]
    Normal,
    Warning,
    Critical,
}

impl State {
    /// Returns the style class for the state, if any.
    pub fn class(&self) -> Option<&'static str> {
        match self {
            State::Normal => None,
            State::Warning => Some("warning"),
            State::Critical => Some("critical"),
        }
    }

    /// Returns the config key of the state's format override.
    pub fn format_key(&self) -> Option<&'static str> {
        match self {
            State::Normal => None,
            State::Warning => Some("format-warning"),
            State::Critical => Some("format-critical"),
        }
    }
}

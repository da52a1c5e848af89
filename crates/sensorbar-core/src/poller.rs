//! Per-tick sampling and classification.

use crate::config::ModuleConfig;
use crate::kind::SensorKind;
use crate::locator::SensorLocator;
use crate::reading::{Classification, Reading, Thresholds};
use crate::source::SensorSource;
use crate::Result;

/// Default poll interval in seconds.
pub const DEFAULT_INTERVAL_SECS: u64 = 10;

/// One classified sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub reading: Reading,
    pub classification: Classification,
}

/// Reads a resolved sensor and classifies the result.
#[derive(Debug, Clone)]
pub struct SensorPoller {
    kind: SensorKind,
    source: SensorSource,
    thresholds: Thresholds,
}

impl SensorPoller {
    /// Creates a poller for an already resolved source.
    pub fn new(kind: SensorKind, source: SensorSource, thresholds: Thresholds) -> Self {
        Self {
            kind,
            source,
            thresholds,
        }
    }

    /// Resolves the source described by `config` and reads the thresholds.
    pub fn from_config(
        locator: &SensorLocator,
        config: &ModuleConfig,
        kind: SensorKind,
    ) -> Result<Self> {
        let source = locator.locate(config, kind)?;
        Ok(Self::new(kind, source, Thresholds::from_config(config)))
    }

    pub fn kind(&self) -> SensorKind {
        self.kind
    }

    pub fn source(&self) -> &SensorSource {
        &self.source
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Reads the sensor once and classifies the rounded value.
    pub fn poll(&self) -> Result<Sample> {
        let reading = self.source.read(self.kind)?;
        let classification = self.thresholds.classify(reading.rounded());
        Ok(Sample {
            reading,
            classification,
        })
    }
}

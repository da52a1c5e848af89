//! Sensor source discovery.
//!
//! A source is resolved once when a module is built. Candidates are tried in
//! a fixed order and the first hit wins:
//!
//! 1. `hwmon-path`: the first configured path that exists.
//! 2. `hwmon-path-abs` + `input-filename`: the first `hwmon*` entry below a
//!    configured directory, joined with the input file name.
//! 3. Temperature only: `/sys/class/thermal/thermal_zone<N>/temp`.
//!
//! On FreeBSD the filesystem is not consulted; temperature zones are queried
//! through sysctl instead.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::ModuleConfig;
use crate::kind::SensorKind;
use crate::source::{self, SensorSource};
use crate::{Error, Result};

/// Default sysfs directory holding `thermal_zone*` entries.
pub const THERMAL_ROOT: &str = "/sys/class/thermal";

/// Name prefix of hwmon device directories.
pub const HWMON_PREFIX: &str = "hwmon";

/// One way of turning configuration hints into a candidate path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// `hwmon-path`, a path or list of paths.
    DirectPath,
    /// `hwmon-path-abs` directories scanned for `hwmon*` children.
    HwmonScan,
    /// Numbered thermal zone, temperature sensors only.
    ThermalZone,
}

impl Strategy {
    /// All strategies, in resolution order.
    pub const ORDER: [Strategy; 3] = [
        Strategy::DirectPath,
        Strategy::HwmonScan,
        Strategy::ThermalZone,
    ];

    /// Returns a candidate path, or None if this strategy does not apply.
    pub fn resolve(
        &self,
        locator: &SensorLocator,
        config: &ModuleConfig,
        kind: SensorKind,
    ) -> Option<PathBuf> {
        match self {
            Strategy::DirectPath => config
                .strings("hwmon-path")
                .into_iter()
                .map(PathBuf::from)
                .find(|path| path.exists()),
            Strategy::HwmonScan => {
                let input = config.string("input-filename")?;
                config
                    .strings("hwmon-path-abs")
                    .into_iter()
                    .map(Path::new)
                    .filter(|dir| dir.is_dir())
                    .find_map(find_hwmon_dir)
                    .map(|hwmon| hwmon.join(input))
            }
            Strategy::ThermalZone => {
                if !kind.has_thermal_zone() {
                    return None;
                }
                let zone = config.integer("thermal-zone").unwrap_or(0);
                Some(locator.thermal_zone_path(zone))
            }
        }
    }
}

/// Returns the first `hwmon*` entry of a directory, in name order.
fn find_hwmon_dir(dir: &Path) -> Option<PathBuf> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)
        .ok()?
        .flatten()
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(HWMON_PREFIX))
        .map(|entry| entry.path())
        .collect();
    entries.sort();
    entries.into_iter().next()
}

/// Resolves the sensor source of a module.
#[derive(Debug, Clone)]
pub struct SensorLocator {
    thermal_root: PathBuf,
}

impl SensorLocator {
    /// Creates a locator for the live system.
    pub fn new() -> Self {
        Self::with_thermal_root(THERMAL_ROOT)
    }

    /// Creates a locator that looks for thermal zones below `root`.
    pub fn with_thermal_root(root: impl Into<PathBuf>) -> Self {
        Self {
            thermal_root: root.into(),
        }
    }

    /// Returns the `temp` file of a numbered thermal zone.
    pub fn thermal_zone_path(&self, zone: i64) -> PathBuf {
        self.thermal_root
            .join(format!("thermal_zone{}", zone))
            .join("temp")
    }

    /// Returns the first candidate path produced by the strategies.
    pub fn find_path(&self, config: &ModuleConfig, kind: SensorKind) -> Option<PathBuf> {
        Strategy::ORDER.iter().find_map(|strategy| {
            let found = strategy.resolve(self, config, kind);
            debug!("{:?} strategy for {} sensor: {:?}", strategy, kind, found);
            found
        })
    }

    /// Resolves and validates the source for a sensor kind.
    ///
    /// The chosen file must open and yield a first line; the line itself is
    /// not parsed here.
    #[cfg(not(target_os = "freebsd"))]
    pub fn locate(&self, config: &ModuleConfig, kind: SensorKind) -> Result<SensorSource> {
        let path = self.find_path(config, kind).ok_or(Error::NoSource(kind))?;
        source::read_first_line(&path)?;
        info!("Using {} sensor at {}", kind, path.display());
        Ok(SensorSource::File(path))
    }

    /// Resolves and validates the source for a sensor kind.
    ///
    /// Only temperature zones can be read through sysctl.
    #[cfg(target_os = "freebsd")]
    pub fn locate(&self, config: &ModuleConfig, kind: SensorKind) -> Result<SensorSource> {
        if kind != SensorKind::Temperature {
            return Err(Error::Unsupported(kind));
        }
        let zone = config.integer("thermal-zone").unwrap_or(0);
        source::sysctl::temperature(zone)?;
        info!("Using {} sensor at sysctl zone {}", kind, zone);
        Ok(SensorSource::Sysctl { zone })
    }
}

impl Default for SensorLocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_direct_path_first_existing() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("temp2_input");
        write(&present, "40000\n");

        let mut config = ModuleConfig::default();
        config.set(
            "hwmon-path",
            vec![
                dir.path().join("temp1_input").to_string_lossy().to_string(),
                present.to_string_lossy().to_string(),
            ],
        );

        let locator = SensorLocator::with_thermal_root(dir.path());
        assert_eq!(
            Strategy::DirectPath.resolve(&locator, &config, SensorKind::Fan),
            Some(present)
        );
    }

    #[test]
    fn test_hwmon_scan_requires_input_filename() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("hwmon3")).unwrap();

        let mut config = ModuleConfig::default();
        config.set("hwmon-path-abs", dir.path().to_string_lossy().to_string());

        let locator = SensorLocator::with_thermal_root(dir.path());
        assert_eq!(
            Strategy::HwmonScan.resolve(&locator, &config, SensorKind::Temperature),
            None
        );

        config.set("input-filename", "temp1_input");
        assert_eq!(
            Strategy::HwmonScan.resolve(&locator, &config, SensorKind::Temperature),
            Some(dir.path().join("hwmon3").join("temp1_input"))
        );
    }

    #[test]
    fn test_hwmon_scan_skips_other_entries() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("device");
        let second = dir.path().join("pci");
        fs::create_dir_all(first.join("power")).unwrap();
        fs::create_dir_all(second.join("hwmon1")).unwrap();
        fs::create_dir_all(second.join("hwmon0")).unwrap();

        let mut config = ModuleConfig::default();
        config.set(
            "hwmon-path-abs",
            vec![
                dir.path().join("missing").to_string_lossy().to_string(),
                first.to_string_lossy().to_string(),
                second.to_string_lossy().to_string(),
            ],
        );
        config.set("input-filename", "fan1_input");

        let locator = SensorLocator::with_thermal_root(dir.path());
        assert_eq!(
            Strategy::HwmonScan.resolve(&locator, &config, SensorKind::Fan),
            Some(second.join("hwmon0").join("fan1_input"))
        );
    }

    #[test]
    fn test_thermal_zone_only_for_temperature() {
        let locator = SensorLocator::with_thermal_root("/thermal");
        let mut config = ModuleConfig::default();
        assert_eq!(
            Strategy::ThermalZone.resolve(&locator, &config, SensorKind::Temperature),
            Some(PathBuf::from("/thermal/thermal_zone0/temp"))
        );

        config.set("thermal-zone", 4);
        assert_eq!(
            Strategy::ThermalZone.resolve(&locator, &config, SensorKind::Temperature),
            Some(PathBuf::from("/thermal/thermal_zone4/temp"))
        );
        assert_eq!(
            Strategy::ThermalZone.resolve(&locator, &config, SensorKind::Power),
            None
        );
    }

    #[test]
    fn test_find_path_order() {
        let dir = tempfile::tempdir().unwrap();
        let direct = dir.path().join("direct_input");
        write(&direct, "1\n");
        write(&dir.path().join("thermal_zone0").join("temp"), "2\n");

        let locator = SensorLocator::with_thermal_root(dir.path());
        let mut config = ModuleConfig::default();
        assert_eq!(
            locator.find_path(&config, SensorKind::Temperature),
            Some(locator.thermal_zone_path(0))
        );

        config.set("hwmon-path", direct.to_string_lossy().to_string());
        assert_eq!(
            locator.find_path(&config, SensorKind::Temperature),
            Some(direct)
        );
    }
}

//! Sensor listing for `--probe`.

use sensorbar_core::source::read_value;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Default sysfs hwmon class directory.
pub const HWMON_ROOT: &str = "/sys/class/hwmon";

/// A sensor input file and its current raw value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub path: PathBuf,
    pub raw: Option<i64>,
}

/// A hwmon device or thermal zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub path: PathBuf,
    /// Contents of `name` (hwmon) or `type` (thermal zone)
    pub name: String,
    pub inputs: Vec<Input>,
}

fn sorted_entries(dir: &Path, prefix: &str) -> Vec<PathBuf> {
    let mut entries: Vec<PathBuf> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .flatten()
            .filter(|entry| entry.file_name().to_string_lossy().starts_with(prefix))
            .map(|entry| entry.path())
            .collect(),
        Err(_) => Vec::new(),
    };
    entries.sort();
    entries
}

fn read_label(path: &Path) -> String {
    fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|_| "unknown".to_string())
}

fn input(path: PathBuf) -> Input {
    let raw = read_value(&path).ok();
    Input { path, raw }
}

/// Lists hwmon devices with their `temp*`, `fan*` and `power*` inputs.
pub fn hwmon_devices(root: &Path) -> Vec<Device> {
    sorted_entries(root, "hwmon")
        .into_iter()
        .map(|dir| {
            let inputs = sorted_entries(&dir, "")
                .into_iter()
                .filter(|file| {
                    let name = file.file_name().unwrap_or_default().to_string_lossy();
                    name.ends_with("_input")
                        && ["temp", "fan", "power"].iter().any(|p| name.starts_with(p))
                })
                .map(input)
                .collect();
            Device {
                name: read_label(&dir.join("name")),
                path: dir,
                inputs,
            }
        })
        .collect()
}

/// Lists thermal zones with their `temp` file.
pub fn thermal_zones(root: &Path) -> Vec<Device> {
    sorted_entries(root, "thermal_zone")
        .into_iter()
        .map(|dir| Device {
            name: read_label(&dir.join("type")),
            inputs: vec![input(dir.join("temp"))],
            path: dir,
        })
        .collect()
}

/// Prints the hwmon and thermal zone listing.
pub fn print(out: &mut impl Write, hwmon_root: &Path, thermal_root: &Path) -> io::Result<()> {
    for (title, devices) in [
        ("hwmon", hwmon_devices(hwmon_root)),
        ("thermal", thermal_zones(thermal_root)),
    ] {
        writeln!(out, "{}:", title)?;
        if devices.is_empty() {
            writeln!(out, "  (none)")?;
        }
        for device in devices {
            writeln!(out, "  {} ({})", device.path.display(), device.name)?;
            for input in device.inputs {
                match input.raw {
                    Some(raw) => writeln!(out, "    {} = {}", input.path.display(), raw)?,
                    None => writeln!(out, "    {} (unreadable)", input.path.display())?,
                }
            }
        }
    }
    Ok(())
}

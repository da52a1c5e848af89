//! Resolved sensor sources and raw reads.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::kind::SensorKind;
use crate::reading::Reading;
use crate::{Error, Result};

/// Where readings come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SensorSource {
    /// Single-line numeric pseudo-file (sysfs hwmon or thermal zone).
    File(PathBuf),
    /// FreeBSD thermal zone queried through sysctl.
    Sysctl { zone: i64 },
}

impl SensorSource {
    /// Takes one sample.
    pub fn read(&self, kind: SensorKind) -> Result<Reading> {
        match self {
            SensorSource::File(path) => Ok(Reading::from_raw(kind, read_value(path)?)),
            SensorSource::Sysctl { zone } => {
                let raw = sysctl::temperature(*zone)?;
                Ok(Reading::new(kind, deci_kelvin_to_celsius(raw)))
            }
        }
    }
}

impl std::fmt::Display for SensorSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SensorSource::File(path) => write!(f, "{}", path.display()),
            SensorSource::Sysctl { zone } => write!(f, "sysctl thermal zone {}", zone),
        }
    }
}

/// Opens a sensor file and reads its first line.
pub(crate) fn read_first_line(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut line = String::new();
    BufReader::new(file)
        .read_line(&mut line)
        .map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(line)
}

/// Reads a base-10 integer from the first line of a sensor file.
pub fn read_value(path: &Path) -> Result<i64> {
    let line = read_first_line(path)?;
    let content = line.trim();
    content.parse().map_err(|_| Error::Malformed {
        path: path.to_path_buf(),
        content: content.to_string(),
    })
}

/// FreeBSD reports temperatures in tenths of a Kelvin.
pub fn deci_kelvin_to_celsius(raw: i64) -> f64 {
    (raw - 2732) as f64 / 10.0
}

#[cfg(target_os = "freebsd")]
pub(crate) mod sysctl {
    use crate::{Error, Result};
    use std::ffi::CString;

    fn read_int(name: &str) -> Option<i64> {
        let name = CString::new(name).ok()?;
        let mut value: libc::c_int = 0;
        let mut size = std::mem::size_of::<libc::c_int>();

        // SAFETY: name is NUL-terminated and value/size describe a valid c_int buffer
        let result = unsafe {
            libc::sysctlbyname(
                name.as_ptr(),
                &mut value as *mut libc::c_int as *mut libc::c_void,
                &mut size,
                std::ptr::null(),
                0,
            )
        };

        (result == 0).then_some(i64::from(value))
    }

    /// Queries the CPU sensor first, then the ACPI thermal zone.
    pub fn temperature(zone: i64) -> Result<i64> {
        read_int(&format!("dev.cpu.{}.temperature", zone))
            .or_else(|| read_int(&format!("hw.acpi.thermal.tz{}.temperature", zone)))
            .ok_or(Error::Sysctl { zone })
    }
}

#[cfg(not(target_os = "freebsd"))]
pub(crate) mod sysctl {
    use crate::{Error, Result};

    /// Sysctl thermal zones only exist on FreeBSD.
    pub fn temperature(zone: i64) -> Result<i64> {
        Err(Error::Sysctl { zone })
    }
}

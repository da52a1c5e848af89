//! sensorbar core library
//!
//! Discovers a hardware sensor (temperature, fan or power), samples it on a
//! timer, classifies the value against warning and critical thresholds and
//! renders status bar label text.

pub mod config;
pub mod error;
pub mod icon;
pub mod kind;
pub mod locator;
pub mod module;
pub mod poller;
pub mod reading;
pub mod render;
pub mod source;
pub mod surface;
pub mod template;
pub mod ticker;

pub use config::ModuleConfig;
pub use error::{Error, Result};
pub use kind::SensorKind;
pub use locator::{SensorLocator, Strategy};
pub use module::SensorModule;
pub use poller::{Sample, SensorPoller, DEFAULT_INTERVAL_SECS};
pub use reading::{Classification, Reading, State, Thresholds, Units};
pub use render::{Rendered, Renderer};
pub use source::SensorSource;
pub use surface::Surface;
pub use ticker::Ticker;

//! A configured sensor label.

use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::config::ModuleConfig;
use crate::kind::SensorKind;
use crate::locator::SensorLocator;
use crate::poller::SensorPoller;
use crate::render::{Rendered, Renderer};
use crate::surface::{Surface, STATE_CLASSES};
use crate::Result;

/// Minimum time between repeated tick error logs.
const ERROR_LOG_INTERVAL: Duration = Duration::from_secs(60);

/// One sensor bound to one label.
///
/// The source and thresholds are fixed at construction. Formats are read
/// from the config on each update.
pub struct SensorModule {
    config: ModuleConfig,
    poller: SensorPoller,
    renderer: Renderer,
    consecutive_errors: u32,
    /// Errors since the last log line
    unlogged_errors: u32,
    last_error_log: Instant,
}

impl SensorModule {
    /// Builds a module against the live system.
    pub fn new(config: ModuleConfig) -> Result<Self> {
        Self::with_locator(config, &SensorLocator::new())
    }

    /// Builds a module, resolving the source with `locator`.
    pub fn with_locator(config: ModuleConfig, locator: &SensorLocator) -> Result<Self> {
        let kind = match config.string("type") {
            Some(kind) => kind.parse()?,
            None => SensorKind::default(),
        };
        let poller = SensorPoller::from_config(locator, &config, kind)?;
        let renderer = Renderer::new(kind, poller.thresholds().critical);

        Ok(Self {
            config,
            poller,
            renderer,
            consecutive_errors: 0,
            unlogged_errors: 0,
            last_error_log: Instant::now(),
        })
    }

    pub fn kind(&self) -> SensorKind {
        self.poller.kind()
    }

    pub fn poller(&self) -> &SensorPoller {
        &self.poller
    }

    pub fn config(&self) -> &ModuleConfig {
        &self.config
    }

    /// Replaces the format mapping. The sensor source and thresholds keep
    /// their construction-time values.
    pub fn set_config(&mut self, config: ModuleConfig) {
        self.config = config;
    }

    /// Samples the sensor and renders it without touching a surface.
    pub fn tick(&self, tooltip: bool) -> Result<Rendered> {
        let sample = self.poller.poll()?;
        debug!(
            "{} sensor read {:.3} ({:?})",
            self.kind(),
            sample.reading.value(),
            sample.classification.state()
        );
        self.renderer
            .render(&self.config, &sample.reading, sample.classification, tooltip)
    }

    /// Runs one tick and applies the result to `surface`.
    ///
    /// Returns false if the tick failed; the surface is left as it was.
    pub fn update(&mut self, surface: &mut impl Surface, tooltip: bool) -> bool {
        let rendered = match self.tick(tooltip) {
            Ok(rendered) => {
                self.consecutive_errors = 0;
                self.unlogged_errors = 0;
                rendered
            }
            Err(e) => {
                self.log_error(&e);
                return false;
            }
        };

        let active = rendered.state().class();
        for class in STATE_CLASSES {
            if active == Some(class) {
                surface.add_class(class);
            } else {
                surface.remove_class(class);
            }
        }

        let Some(text) = rendered.text else {
            surface.hide();
            return true;
        };

        surface.show();
        surface.set_text(&text);
        if let Some(tooltip) = rendered.tooltip {
            surface.set_tooltip(&tooltip);
        }
        true
    }

    fn log_error(&mut self, e: &crate::Error) {
        let first = self.consecutive_errors == 0;
        self.consecutive_errors += 1;
        self.unlogged_errors += 1;
        // Only log once per minute or on first error
        let elapsed = self.last_error_log.elapsed();
        if first || elapsed >= ERROR_LOG_INTERVAL {
            if self.unlogged_errors > 1 {
                warn!(
                    "Sensor error (repeated {} times in {:?}): {}",
                    self.unlogged_errors, elapsed, e
                );
            } else {
                warn!("Sensor error: {}", e);
            }
            self.last_error_log = Instant::now();
            self.unlogged_errors = 0;
        }
    }
}

#[cfg(all(test, not(target_os = "freebsd")))]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs;
    use std::path::Path;

    #[derive(Default)]
    struct RecordingSurface {
        classes: BTreeSet<String>,
        visible: Option<bool>,
        text: Option<String>,
        tooltip: Option<String>,
    }

    impl Surface for RecordingSurface {
        fn add_class(&mut self, class: &str) {
            self.classes.insert(class.to_string());
        }

        fn remove_class(&mut self, class: &str) {
            self.classes.remove(class);
        }

        fn show(&mut self) {
            self.visible = Some(true);
        }

        fn hide(&mut self) {
            self.visible = Some(false);
        }

        fn set_text(&mut self, text: &str) {
            self.text = Some(text.to_string());
        }

        fn set_tooltip(&mut self, text: &str) {
            self.tooltip = Some(text.to_string());
        }
    }

    fn module(path: &Path, extra: &str) -> SensorModule {
        let config = ModuleConfig::from_toml(&format!(
            "hwmon-path = {:?}\n{}",
            path.to_string_lossy(),
            extra
        ))
        .unwrap();
        SensorModule::new(config).unwrap()
    }

    #[test]
    fn test_update_sets_text_and_tooltip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("temp1_input");
        fs::write(&path, "45123\n").unwrap();

        let mut module = module(&path, r#"tooltip-format = "{temperatureF}°F""#);
        let mut surface = RecordingSurface::default();
        assert!(module.update(&mut surface, true));

        assert_eq!(surface.visible, Some(true));
        assert_eq!(surface.text.as_deref(), Some("45°C"));
        assert_eq!(surface.tooltip.as_deref(), Some("113°F"));
        assert!(surface.classes.is_empty());
    }

    #[test]
    fn test_update_without_tooltip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("temp1_input");
        fs::write(&path, "45123\n").unwrap();

        let mut module = module(&path, r#"tooltip-format = "{temperatureF}°F""#);
        let mut surface = RecordingSurface::default();
        assert!(module.update(&mut surface, false));
        assert_eq!(surface.tooltip, None);
    }

    #[test]
    fn test_update_switches_classes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("temp1_input");
        fs::write(&path, "65000\n").unwrap();

        let mut module = module(&path, "warning-threshold = 60\ncritical-threshold = 80");
        let mut surface = RecordingSurface::default();

        module.update(&mut surface, false);
        assert_eq!(surface.classes, BTreeSet::from(["warning".to_string()]));

        fs::write(&path, "85000\n").unwrap();
        module.update(&mut surface, false);
        assert_eq!(surface.classes, BTreeSet::from(["critical".to_string()]));

        fs::write(&path, "20000\n").unwrap();
        module.update(&mut surface, false);
        assert!(surface.classes.is_empty());
    }

    #[test]
    fn test_update_hides_on_empty_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("temp1_input");
        fs::write(&path, "40000\n").unwrap();

        let mut module = module(&path, r#"format = """#);
        let mut surface = RecordingSurface::default();
        assert!(module.update(&mut surface, true));
        assert_eq!(surface.visible, Some(false));
        assert_eq!(surface.text, None);
        assert_eq!(surface.tooltip, None);
    }

    #[test]
    fn test_failed_tick_keeps_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("temp1_input");
        fs::write(&path, "40000\n").unwrap();

        let mut module = module(&path, "");
        let mut surface = RecordingSurface::default();
        assert!(module.update(&mut surface, false));

        fs::write(&path, "not a number\n").unwrap();
        assert!(!module.update(&mut surface, false));
        assert_eq!(surface.text.as_deref(), Some("40°C"));

        fs::remove_file(&path).unwrap();
        assert!(!module.update(&mut surface, false));
        assert_eq!(surface.text.as_deref(), Some("40°C"));
    }

    #[test]
    fn test_error_count_resets_after_each_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("temp1_input");
        fs::write(&path, "40000\n").unwrap();

        let mut module = module(&path, "");
        let mut surface = RecordingSurface::default();
        fs::write(&path, "garbage\n").unwrap();

        // First failure is logged at once
        assert!(!module.update(&mut surface, false));
        assert_eq!(module.consecutive_errors, 1);
        assert_eq!(module.unlogged_errors, 0);

        // Repeats inside the interval are only counted
        module.update(&mut surface, false);
        module.update(&mut surface, false);
        assert_eq!(module.consecutive_errors, 3);
        assert_eq!(module.unlogged_errors, 2);

        // Once the interval has passed the count is logged and restarted
        if let Some(earlier) = Instant::now().checked_sub(ERROR_LOG_INTERVAL) {
            module.last_error_log = earlier;
            module.update(&mut surface, false);
            assert_eq!(module.consecutive_errors, 4);
            assert_eq!(module.unlogged_errors, 0);
        }

        fs::write(&path, "40000\n").unwrap();
        assert!(module.update(&mut surface, false));
        assert_eq!(module.consecutive_errors, 0);
        assert_eq!(module.unlogged_errors, 0);
    }

    #[test]
    fn test_set_config_changes_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fan1_input");
        fs::write(&path, "1500\n").unwrap();

        let mut module = module(&path, r#"type = "fan""#);
        assert_eq!(module.kind(), SensorKind::Fan);
        assert_eq!(module.tick(true).unwrap().tooltip.as_deref(), Some("1500 RPM"));

        let mut config = module.config().clone();
        config.set("format", "{fan} rpm");
        module.set_config(config);
        assert_eq!(module.tick(false).unwrap().text.as_deref(), Some("1500 rpm"));
    }
}

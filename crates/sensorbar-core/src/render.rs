//! Label and tooltip rendering.

use crate::config::ModuleConfig;
use crate::icon;
use crate::kind::SensorKind;
use crate::reading::{Classification, Reading, State};
use crate::template::{self, Arg};
use crate::Result;

/// Output of one render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    /// Both threshold flags of the reading.
    pub classification: Classification,
    /// Label text, or None if the label should be hidden.
    pub text: Option<String>,
    /// Tooltip text, only present when tooltips are enabled and the label
    /// is visible.
    pub tooltip: Option<String>,
}

impl Rendered {
    pub fn state(&self) -> State {
        self.classification.state()
    }

    pub fn is_hidden(&self) -> bool {
        self.text.is_none()
    }
}

/// Turns classified readings into label text.
///
/// Formats are looked up in the module config on every call, so an updated
/// mapping takes effect on the next render.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    kind: SensorKind,
    icon_max: i64,
}

impl Renderer {
    /// Creates a renderer. `critical` scales `{icon}` selection.
    pub fn new(kind: SensorKind, critical: Option<i64>) -> Self {
        Self {
            kind,
            icon_max: critical.unwrap_or(0),
        }
    }

    /// Returns the label format for a state, falling back to `format`.
    pub fn select_format<'a>(&self, config: &'a ModuleConfig, state: State) -> &'a str {
        state
            .format_key()
            .and_then(|key| config.string(key))
            .unwrap_or_else(|| config.format())
    }

    /// Returns the tooltip format, falling back to the kind's default.
    pub fn tooltip_format<'a>(&self, config: &'a ModuleConfig) -> &'a str {
        config
            .string("tooltip-format")
            .unwrap_or_else(|| self.kind.default_tooltip_format())
    }

    /// Renders the label, and the tooltip if `tooltip` is set.
    ///
    /// An empty selected format hides the label; no tooltip is produced
    /// then.
    pub fn render(
        &self,
        config: &ModuleConfig,
        reading: &Reading,
        classification: Classification,
        tooltip: bool,
    ) -> Result<Rendered> {
        let format = self.select_format(config, classification.state());
        if format.is_empty() {
            return Ok(Rendered {
                classification,
                text: None,
                tooltip: None,
            });
        }

        let value = reading.rounded();
        let units = reading.units();
        let icon = icon::select(config, value, "", self.icon_max);
        let args = [
            ("temperatureC", Arg::Int(units.temperature_c)),
            ("temperatureF", Arg::Int(units.temperature_f)),
            ("temperatureK", Arg::Int(units.temperature_k)),
            ("fan", Arg::Int(units.fan)),
            ("power", Arg::Int(units.power)),
            ("icon", Arg::Text(&icon)),
        ];

        let text = template::render(format, &args)?;
        let tooltip = if tooltip {
            Some(template::render(self.tooltip_format(config), &args)?)
        } else {
            None
        };

        Ok(Rendered {
            classification,
            text: Some(text),
            tooltip,
        })
    }
}

//! JSON line output for status bars.
//!
//! Each flush writes one `{"text", "tooltip", "class"}` object, the format
//! waybar and similar bars read from custom modules. A hidden label is sent
//! as empty text.

use sensorbar_core::Surface;
use serde::Serialize;
use std::io::{self, Write};

/// One line of bar output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Output {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub class: Vec<String>,
}

/// Surface that accumulates label state and writes it as JSON.
pub struct JsonSurface<W: Write> {
    writer: W,
    visible: bool,
    text: String,
    tooltip: Option<String>,
    classes: Vec<String>,
}

impl<W: Write> JsonSurface<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            visible: true,
            text: String::new(),
            tooltip: None,
            classes: Vec::new(),
        }
    }

    /// Returns the line the next flush would write.
    pub fn output(&self) -> Output {
        if !self.visible {
            return Output {
                class: self.classes.clone(),
                ..Output::default()
            };
        }
        Output {
            text: self.text.clone(),
            tooltip: self.tooltip.clone(),
            class: self.classes.clone(),
        }
    }

    /// Writes the current state as one line.
    pub fn flush(&mut self) -> io::Result<()> {
        let line = serde_json::to_string(&self.output())?;
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Surface for JsonSurface<W> {
    fn add_class(&mut self, class: &str) {
        if !self.classes.iter().any(|c| c == class) {
            self.classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn set_tooltip(&mut self, text: &str) {
        self.tooltip = Some(text.to_string());
    }
}

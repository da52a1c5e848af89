//! Module configuration mapping.
//!
//! Keys follow the status bar convention (`hwmon-path`, `format-critical`,
//! ...). Values with an unexpected type are treated as unset.

use toml::{Table, Value};

/// Default format when `format` is unset.
pub const DEFAULT_FORMAT: &str = "{temperatureC}°C";

/// String-keyed configuration of a single sensor module.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleConfig {
    table: Table,
}

impl ModuleConfig {
    /// Wraps a parsed TOML table.
    pub fn new(table: Table) -> Self {
        Self { table }
    }

    /// Parses a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        Ok(Self::new(content.parse::<Table>()?))
    }

    /// Returns the raw value for a key.
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.table.get(key)
    }

    /// Returns the value for a key if it is a string.
    pub fn string(&self, key: &str) -> Option<&str> {
        self.value(key).and_then(Value::as_str)
    }

    /// Returns the value for a key if it is an integer.
    pub fn integer(&self, key: &str) -> Option<i64> {
        self.value(key).and_then(Value::as_integer)
    }

    /// Returns the value for a key if it is a boolean.
    pub fn boolean(&self, key: &str) -> Option<bool> {
        self.value(key).and_then(Value::as_bool)
    }

    /// Returns a string-or-list value as a list, in configured order.
    /// Non-string list items are skipped.
    pub fn strings(&self, key: &str) -> Vec<&str> {
        match self.value(key) {
            Some(Value::String(s)) => vec![s.as_str()],
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Sets a key, replacing any previous value.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.table.insert(key.to_string(), value.into());
    }

    /// Returns the base format, falling back to the default.
    pub fn format(&self) -> &str {
        self.string("format").unwrap_or(DEFAULT_FORMAT)
    }
}

impl From<Table> for ModuleConfig {
    fn from(table: Table) -> Self {
        Self::new(table)
    }
}

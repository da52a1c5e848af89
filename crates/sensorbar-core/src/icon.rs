//! Icon selection from `format-icons`.

use toml::Value;

use crate::config::ModuleConfig;

/// Picks the icon for a value.
///
/// `format-icons` may be a single string, a list spread evenly over
/// `0..max`, or a table keyed by `alt` with a `default` entry. A `max` of 0
/// means 100.
pub fn select(config: &ModuleConfig, value: i64, alt: &str, max: i64) -> String {
    let mut icons = match config.value("format-icons") {
        Some(icons) => icons,
        None => return String::new(),
    };

    if let Value::Table(table) = icons {
        icons = match table.get(alt) {
            Some(entry) if !alt.is_empty() && (entry.is_str() || entry.is_array()) => entry,
            _ => match table.get("default") {
                Some(entry) => entry,
                None => return String::new(),
            },
        };
    }

    if let Value::Array(list) = icons {
        if list.is_empty() {
            return String::new();
        }
        let len = list.len() as i64;
        let max = if max == 0 { 100 } else { max };
        let step = (max / len).max(1);
        let index = (value / step).clamp(0, len - 1);
        icons = &list[index as usize];
    }

    icons.as_str().unwrap_or_default().to_string()
}

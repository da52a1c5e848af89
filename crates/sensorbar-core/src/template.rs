//! Format string substitution.
//!
//! Supports the subset of fmt-style syntax used by bar configs: named
//! fields (`{temperatureC}`), escaped braces (`{{`, `}}`) and an optional
//! `[[fill]align][0][width]` spec (`{fan:>5}`, `{icon:*^3}`, `{temperatureC:02}`).

use regex::{Captures, Regex};
use std::sync::OnceLock;

use crate::{Error, Result};

/// Widest padding a format spec may request.
pub const MAX_WIDTH: usize = 256;

/// Escapes, named fields with an optional spec, or a stray brace.
fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\{\{|\}\}|\{(\w*)(?::([^{}]*))?\}|[{}]").expect("Invalid regex")
    })
}

fn spec_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:(.)?([<>^]))?(0)?(\d*)$").expect("Invalid regex"))
}

/// A value that can be substituted into a format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg<'a> {
    Int(i64),
    Text(&'a str),
}

impl Arg<'_> {
    fn default_align(&self) -> Align {
        match self {
            Arg::Int(_) => Align::Right,
            Arg::Text(_) => Align::Left,
        }
    }
}

impl std::fmt::Display for Arg<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arg::Int(value) => write!(f, "{}", value),
            Arg::Text(text) => write!(f, "{}", text),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
}

impl Align {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '<' => Some(Align::Left),
            '>' => Some(Align::Right),
            '^' => Some(Align::Center),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Spec {
    fill: char,
    align: Option<Align>,
    zero: bool,
    width: usize,
}

impl Spec {
    fn parse(spec: &str) -> Option<Self> {
        let caps = spec_regex().captures(spec)?;
        let char_at = |i: usize| caps.get(i).and_then(|m| m.as_str().chars().next());

        let width = match caps.get(4).map(|m| m.as_str()) {
            Some(digits) if !digits.is_empty() => digits.parse().ok()?,
            _ => 0,
        };
        if width > MAX_WIDTH {
            return None;
        }

        Some(Self {
            fill: char_at(1).unwrap_or(' '),
            align: char_at(2).and_then(Align::from_char),
            zero: caps.get(3).is_some(),
            width,
        })
    }

    fn apply(&self, arg: Arg<'_>) -> String {
        let text = arg.to_string();
        let len = text.chars().count();
        if len >= self.width {
            return text;
        }
        let pad = self.width - len;

        // Zero flag pads numbers after the sign, ignoring fill and alignment
        if let (true, Arg::Int(value)) = (self.zero, arg) {
            let digits = value.unsigned_abs().to_string();
            let sign = if value < 0 { "-" } else { "" };
            return format!("{}{}{}", sign, "0".repeat(pad), digits);
        }

        let (left, right) = match self.align.unwrap_or_else(|| arg.default_align()) {
            Align::Left => (0, pad),
            Align::Right => (pad, 0),
            Align::Center => (pad / 2, pad - pad / 2),
        };

        let fill = |n: usize| std::iter::repeat(self.fill).take(n).collect::<String>();
        format!("{}{}{}", fill(left), text, fill(right))
    }
}

/// Substitutes named arguments into a format string.
pub fn render(format: &str, args: &[(&str, Arg<'_>)]) -> Result<String> {
    let fail = |reason: String| Error::Template {
        format: format.to_string(),
        reason,
    };

    let mut out = String::with_capacity(format.len());
    let mut last = 0;

    for caps in token_regex().captures_iter(format) {
        let Some(token) = caps.get(0) else { continue };
        out.push_str(&format[last..token.start()]);
        last = token.end();
        out.push_str(&substitute(&caps, args).map_err(fail)?);
    }
    out.push_str(&format[last..]);

    Ok(out)
}

fn substitute(
    caps: &Captures<'_>,
    args: &[(&str, Arg<'_>)],
) -> std::result::Result<String, String> {
    match &caps[0] {
        "{{" => return Ok("{".to_string()),
        "}}" => return Ok("}".to_string()),
        "{" => return Err("unmatched '{'".to_string()),
        "}" => return Err("unmatched '}'".to_string()),
        _ => {}
    }

    let name = caps.get(1).map_or("", |m| m.as_str());
    let arg = args
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, arg)| *arg)
        .ok_or_else(|| format!("unknown argument '{}'", name))?;

    match caps.get(2) {
        Some(spec) => Spec::parse(spec.as_str())
            .map(|parsed| parsed.apply(arg))
            .ok_or_else(|| format!("invalid format spec '{}'", spec.as_str())),
        None => Ok(arg.to_string()),
    }
}

//! Digital I/O identifiers and values
//!
//! The host passes either a numeric channel or a controller variable name,
//! and either a numeric level or a symbolic value. Both are resolved to the
//! controller's text form here.

use std::fmt;

/// Digital I/O identifier
#[derive(Debug, Clone, PartialEq)]
pub enum IoVar {
    /// Numbered channel, rendered as `OUT[n]` or `IN[n]`
    Index(u32),
    /// Controller variable, rendered verbatim
    Named(String),
}

/// Digital I/O value
#[derive(Debug, Clone, PartialEq)]
pub enum IoValue {
    /// Numeric level: nonzero is `TRUE`, zero is `FALSE`
    Level(f64),
    /// Symbolic value, rendered verbatim
    Named(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Output,
    Input,
}

impl Direction {
    fn bank(self) -> &'static str {
        match self {
            Direction::Output => "OUT",
            Direction::Input => "IN",
        }
    }
}

impl IoVar {
    pub fn render(&self, direction: Direction) -> String {
        match self {
            IoVar::Index(n) => format!("{}[{}]", direction.bank(), n),
            IoVar::Named(name) => name.clone(),
        }
    }
}

impl IoValue {
    pub fn render(&self) -> String {
        match self {
            IoValue::Level(level) if *level != 0.0 => "TRUE".to_string(),
            IoValue::Level(_) => "FALSE".to_string(),
            IoValue::Named(value) => value.clone(),
        }
    }
}

impl From<u32> for IoVar {
    fn from(n: u32) -> Self {
        IoVar::Index(n)
    }
}

impl From<&str> for IoVar {
    fn from(name: &str) -> Self {
        IoVar::Named(name.to_string())
    }
}

impl From<String> for IoVar {
    fn from(name: String) -> Self {
        IoVar::Named(name)
    }
}

impl From<f64> for IoValue {
    fn from(level: f64) -> Self {
        IoValue::Level(level)
    }
}

impl From<i32> for IoValue {
    fn from(level: i32) -> Self {
        IoValue::Level(f64::from(level))
    }
}

impl From<bool> for IoValue {
    fn from(on: bool) -> Self {
        IoValue::Level(if on { 1.0 } else { 0.0 })
    }
}

impl From<&str> for IoValue {
    fn from(value: &str) -> Self {
        IoValue::Named(value.to_string())
    }
}

impl From<String> for IoValue {
    fn from(value: String) -> Self {
        IoValue::Named(value)
    }
}

impl fmt::Display for IoValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

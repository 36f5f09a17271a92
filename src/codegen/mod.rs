//! Program text accumulation
//! Append-only line buffer for the generated program, the diagnostic log,
//! and the joint formatting used by every motion line.

use crate::motion::Joints;

/// Axis letters as the Arctos controller expects them, spacing included
pub const AXIS_LABELS: [&str; 12] = [
    "X ", " Y", " Z ", " A ", " B ", " C ", "F", "H", "I", "J", "K", "L",
];

/// Axis whose rotation sense is opposite on the controller
pub const FLIPPED_AXIS: usize = 4;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgramText {
    pub lines: Vec<String>,
    pending: String,
}

impl ProgramText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a full line; any raw text added before it becomes its prefix.
    pub fn add_line(&mut self, line: &str) {
        let mut full = std::mem::take(&mut self.pending);
        full.push_str(line);
        self.lines.push(full);
    }

    /// Append text without terminating the line
    pub fn add_raw(&mut self, text: &str) {
        self.pending.push_str(text);
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.pending.is_empty()
    }
}

impl std::fmt::Display for ProgramText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        write!(f, "{}", self.pending)
    }
}

/// Messages for the user, shown once the program is saved
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiagnosticLog {
    pub entries: Vec<String>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_log(&mut self, entry: &str) {
        self.entries.push(entry.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Display for DiagnosticLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}

/// Format a joint target, e.g. `X 0.00 Y10.00 Z 20.00 A 0.00 B -45.00 C 0.00`.
///
/// Values beyond the label table are left out; the caller decides whether
/// that is worth a diagnostic.
pub fn joints_to_str(joints: &Joints) -> String {
    joints
        .iter()
        .zip(AXIS_LABELS.iter())
        .enumerate()
        .map(|(i, (value, label))| {
            let value = if i == FLIPPED_AXIS { -value } else { *value };
            format!("{}{:.2}", label, value)
        })
        .collect()
}

/// Shortest decimal form of a number: `250`, `12.5`
pub fn fmt_number(value: f64) -> String {
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lines_are_terminated() {
        let mut out = ProgramText::new();
        out.add_line("F800 (Feedrate)");
        out.add_line("PAUSE");
        assert_eq!(out.to_string(), "F800 (Feedrate)\nPAUSE\n");
    }

    #[test]
    fn test_raw_text_prefixes_next_line() {
        let mut out = ProgramText::new();
        out.add_raw("G90 ");
        assert_eq!(out.to_string(), "G90 ");
        out.add_line("X 0.00");
        out.add_raw("M21");
        assert_eq!(out.lines, vec!["G90 X 0.00".to_string()]);
        assert_eq!(out.to_string(), "G90 X 0.00\nM21");
    }

    #[test]
    fn test_six_axis_format() {
        let joints = Joints::from([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(
            joints_to_str(&joints),
            "X 1.00 Y2.00 Z 3.00 A 4.00 B -5.00 C 6.00"
        );
    }

    #[test]
    fn test_only_fifth_axis_flips() {
        let values = [-12.5, 33.0, -7.25, 90.0, -45.5, 180.0, 1.0];
        let text = joints_to_str(&Joints::from(values));
        let expected: String = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let v = if i == 4 { -v } else { *v };
                format!("{}{:.2}", AXIS_LABELS[i], v)
            })
            .collect();
        assert_eq!(text, expected);
        assert!(text.contains(" B 45.50"));
        assert!(text.contains("X -12.50"));
    }

    #[test]
    fn test_extra_axes_dropped() {
        let joints = Joints::new(vec![0.0; 14]);
        let text = joints_to_str(&joints);
        assert!(text.ends_with("L0.00"));
    }

    #[test]
    fn test_fmt_number() {
        assert_eq!(fmt_number(250.0), "250");
        assert_eq!(fmt_number(12.5), "12.5");
    }

    #[test]
    fn test_log_display() {
        let mut log = DiagnosticLog::new();
        log.add_log("first");
        log.add_log("second");
        assert_eq!(log.to_string(), "first\nsecond\n");
    }
}

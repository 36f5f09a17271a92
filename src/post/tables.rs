//! Fixed translations for named routines and comment markers
//!
//! The Arctos gripper has no routine or message support on the controller,
//! so a handful of well-known names map to hard-coded instruction lines.

/// Routine call (normalized, with parentheses) to controller lines
pub const ROUTINES: &[(&str, &[&str])] = &[
    ("Open()", &["M97 G4P1 B40 T1"]),
    ("Close()", &["M97 G4P1 B0 T1"]),
];

/// Program comment text to controller line
pub const COMMENT_COMMANDS: &[(&str, &str)] = &[
    ("Attach to Gripper V2", "M21"),
    ("Detach from Gripper V2", "M20"),
];

pub fn routine(call: &str) -> Option<&'static [&'static str]> {
    ROUTINES
        .iter()
        .find(|(name, _)| *name == call)
        .map(|(_, lines)| *lines)
}

pub fn comment_command(text: &str) -> Option<&'static str> {
    COMMENT_COMMANDS
        .iter()
        .find(|(marker, _)| *marker == text)
        .map(|(_, line)| *line)
}

/// Normalize a routine name into call form: `Open Gripper` -> `Open_Gripper()`
pub fn call_form(code: &str) -> String {
    let mut call = code.replace(' ', "_");
    if !call.ends_with("()") {
        call.push_str("()");
    }
    call
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_form() {
        assert_eq!(call_form("Open"), "Open()");
        assert_eq!(call_form("Open()"), "Open()");
        assert_eq!(call_form("Home Position"), "Home_Position()");
        assert_eq!(call_form("Set Tool(2)"), "Set_Tool(2)()");
    }

    #[test]
    fn test_routine_lookup() {
        assert_eq!(routine("Open()"), Some(&["M97 G4P1 B40 T1"][..]));
        assert_eq!(routine("Close()"), Some(&["M97 G4P1 B0 T1"][..]));
        assert_eq!(routine("open()"), None);
        assert_eq!(routine("Open"), None);
    }

    #[test]
    fn test_comment_lookup() {
        assert_eq!(comment_command("Attach to Gripper V2"), Some("M21"));
        assert_eq!(comment_command("Detach from Gripper V2"), Some("M20"));
        assert_eq!(comment_command("Attach to Gripper"), None);
    }
}

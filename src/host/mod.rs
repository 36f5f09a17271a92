//! Host UI collaborator
//!
//! Saving a program may need a save-as prompt, a message box for the
//! generation log, and an external application to show the result. The
//! host owns all of these; the post only calls through [`HostUi`].

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

pub trait HostUi {
    /// Ask the user where to save. `None` means the user cancelled.
    fn save_file_dialog(&mut self, folder: &Path, file_name: &str, title: &str)
        -> Option<PathBuf>;

    /// Show a message to the user
    fn show_message(&mut self, message: &str);

    /// Open a saved program, with `app` or the platform default handler
    fn open_file(&mut self, path: &Path, app: Option<&str>) -> io::Result<()>;
}

/// Host without a UI: never prompts, messages go to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessHost;

impl HostUi for HeadlessHost {
    fn save_file_dialog(
        &mut self,
        folder: &Path,
        file_name: &str,
        _title: &str,
    ) -> Option<PathBuf> {
        debug!(folder = %folder.display(), file_name, "no save dialog available");
        None
    }

    fn show_message(&mut self, message: &str) {
        info!("{}", message);
    }

    fn open_file(&mut self, path: &Path, app: Option<&str>) -> io::Result<()> {
        launch(path, app)
    }
}

/// Native dialogs through `rfd`
#[cfg(feature = "dialog")]
#[derive(Debug, Default, Clone, Copy)]
pub struct DialogHost;

#[cfg(feature = "dialog")]
impl HostUi for DialogHost {
    fn save_file_dialog(
        &mut self,
        folder: &Path,
        file_name: &str,
        title: &str,
    ) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new()
            .set_title(title)
            .set_file_name(file_name);
        if folder.is_dir() {
            dialog = dialog.set_directory(folder);
        }
        if let Some(ext) = Path::new(file_name).extension().and_then(|e| e.to_str()) {
            dialog = dialog.add_filter("Robot program", &[ext]);
        }
        dialog.save_file()
    }

    fn show_message(&mut self, message: &str) {
        let _ = rfd::MessageDialog::new()
            .set_title("Arctos post")
            .set_description(message)
            .set_buttons(rfd::MessageButtons::Ok)
            .set_level(rfd::MessageLevel::Info)
            .show();
    }

    fn open_file(&mut self, path: &Path, app: Option<&str>) -> io::Result<()> {
        launch(path, app)
    }
}

/// Spawn a viewer for `path` without waiting on it
pub fn launch(path: &Path, app: Option<&str>) -> io::Result<()> {
    let mut cmd = match app {
        Some(app) => Command::new(app),
        None => default_opener(),
    };
    cmd.arg(path);
    debug!(?cmd, "launching viewer");
    cmd.spawn().map(|_| ())
}

#[cfg(target_os = "windows")]
fn default_opener() -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]);
    cmd
}

#[cfg(target_os = "macos")]
fn default_opener() -> Command {
    Command::new("open")
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn default_opener() -> Command {
    Command::new("xdg-open")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_never_prompts() {
        let mut host = HeadlessHost;
        assert_eq!(
            host.save_file_dialog(Path::new("/tmp"), "Main.gcode", "Save program as..."),
            None
        );
    }

    #[test]
    fn test_missing_viewer_is_an_error() {
        let result = launch(
            Path::new("Main.gcode"),
            Some("/nonexistent/arctos-viewer-binary"),
        );
        assert!(result.is_err());
    }
}

//! Robot post-processors
//!
//! The host drives a post through [`RobotPost`], one call per program event,
//! in the order it chooses. A post turns those calls into controller text,
//! keeps it until the program is saved, and never reorders or validates
//! what it is given.

use crate::codegen::{DiagnosticLog, ProgramText};
use crate::motion::{ConfRlf, Joints, Pose};
use crate::signal::{IoValue, IoVar};
use std::io;
use std::path::{Path, PathBuf};

pub mod arctos;
pub mod tables;

pub use arctos::ArctosPost;

/// Timeout value meaning "wait forever"
pub const NO_TIMEOUT: f64 = -1.0;

/// Pause value meaning "until the operator resumes"
pub const PAUSE_INDEFINITE: f64 = -1.0;

/// What to do with a program once it is written
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ShowResult {
    #[default]
    No,
    /// Open with the platform default application
    Default,
    /// Open with the given application
    Application(String),
}

/// Where a post is in its single-program lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PostState {
    #[default]
    Accumulating,
    Saved(PathBuf),
}

/// Callback contract between the host and a post-processor
pub trait RobotPost {
    /// Post/controller name
    fn name(&self) -> &str;

    /// Program text generated so far
    fn program(&self) -> &ProgramText;

    /// Diagnostics recorded so far
    fn log(&self) -> &DiagnosticLog;

    fn prog_start(&mut self, progname: &str);

    fn prog_finish(&mut self, progname: &str);

    /// Write the program to `folder/<progname>.<ext>`.
    ///
    /// Returns `Ok(None)` when no destination could be resolved; nothing is
    /// written in that case.
    fn prog_save(
        &mut self,
        folder: &Path,
        progname: &str,
        ask_user: bool,
        show_result: ShowResult,
    ) -> io::Result<Option<PathBuf>>;

    fn prog_send_robot(&mut self, robot_ip: &str, remote_path: &str, ftp_user: &str, ftp_pass: &str);

    fn move_j(&mut self, pose: Option<&Pose>, joints: &Joints, conf_rlf: Option<ConfRlf>);

    fn move_l(&mut self, pose: Option<&Pose>, joints: &Joints, conf_rlf: Option<ConfRlf>);

    fn move_c(
        &mut self,
        pose1: Option<&Pose>,
        joints1: &Joints,
        pose2: Option<&Pose>,
        joints2: &Joints,
        conf_rlf_1: Option<ConfRlf>,
        conf_rlf_2: Option<ConfRlf>,
    );

    fn set_frame(&mut self, pose: &Pose, frame_id: Option<i32>, frame_name: Option<&str>);

    fn set_tool(&mut self, pose: &Pose, tool_id: Option<i32>, tool_name: Option<&str>);

    /// Negative `time_ms` pauses until resumed
    fn pause(&mut self, time_ms: f64);

    fn set_speed(&mut self, speed_mms: f64);

    fn set_acceleration(&mut self, accel_mmss: f64);

    fn set_speed_joints(&mut self, speed_degs: f64);

    fn set_acceleration_joints(&mut self, accel_degss: f64);

    fn set_zone_data(&mut self, zone_mm: f64);

    fn set_do(&mut self, io_var: &IoVar, io_value: &IoValue);

    /// Negative `timeout_ms` waits without a timeout
    fn wait_di(&mut self, io_var: &IoVar, io_value: &IoValue, timeout_ms: f64);

    fn run_code(&mut self, code: &str, is_function_call: bool);

    fn run_message(&mut self, message: &str, iscomment: bool);
}

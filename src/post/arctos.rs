//! Arctos post-processor
//!
//! The Arctos controller runs a G-code dialect that only knows joint-space
//! moves. Linear and circular moves are written as joint moves through
//! their waypoints, and the fifth axis turns the opposite way from the
//! robot model, so its sign is inverted on every move.

use crate::codegen::{fmt_number, joints_to_str, DiagnosticLog, ProgramText, AXIS_LABELS};
use crate::config::{PostConfig, UnsupportedPolicy};
use crate::host::{HeadlessHost, HostUi};
use crate::motion::{ConfRlf, Joints, Pose};
use crate::post::{tables, PostState, RobotPost, ShowResult};
use crate::signal::{Direction, IoValue, IoVar};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uom::si::angular_acceleration::{degree_per_second_squared, radian_per_second_squared};
use uom::si::angular_velocity::{degree_per_second, radian_per_second};
use uom::si::f64::{AngularAcceleration, AngularVelocity};

/// Every axis back to zero, six-axis naming regardless of the robot
pub const POSTAMBLE: &str = "G90 X 0 Y 0 Z 0 A 0 B 0 C 0";

/// Motion mode token in front of every joint target
const MOTION_MODE: &str = "G90";

pub struct ArctosPost {
    config: PostConfig,
    text: ProgramText,
    log: DiagnosticLog,
    host: Box<dyn HostUi>,
    joint_speed: Option<AngularVelocity>,
    joint_accel: Option<AngularAcceleration>,
    state: PostState,
}

impl ArctosPost {
    pub fn new(config: PostConfig) -> Self {
        Self {
            config,
            text: ProgramText::new(),
            log: DiagnosticLog::new(),
            host: Box::new(HeadlessHost),
            joint_speed: None,
            joint_accel: None,
            state: PostState::Accumulating,
        }
    }

    pub fn with_host(mut self, host: Box<dyn HostUi>) -> Self {
        self.host = host;
        self
    }

    pub fn robot_name(&self) -> &str {
        &self.config.robot_name
    }

    pub fn axes(&self) -> usize {
        self.config.axes
    }

    pub fn state(&self) -> &PostState {
        &self.state
    }

    /// Last joint speed sent to the controller, in rad/s
    pub fn joint_speed_rads(&self) -> Option<f64> {
        self.joint_speed.map(|v| v.get::<radian_per_second>())
    }

    /// Last joint acceleration sent to the controller, in rad/s²
    pub fn joint_accel_radss(&self) -> Option<f64> {
        self.joint_accel.map(|a| a.get::<radian_per_second_squared>())
    }

    fn add_line(&mut self, line: &str) {
        self.text.add_line(line);
    }

    fn add_log(&mut self, entry: &str) {
        debug!(entry, "diagnostic");
        self.log.add_log(entry);
    }

    fn emit_joint_move(&mut self, joints: &Joints) {
        if joints.len() > AXIS_LABELS.len() {
            self.add_log(&format!(
                "Joint target has {} values, only the first {} are written",
                joints.len(),
                AXIS_LABELS.len()
            ));
        } else if joints.len() != self.config.axes {
            warn!(
                expected = self.config.axes,
                got = joints.len(),
                "joint target length differs from axis count"
            );
        }
        let line = format!("{} {}", MOTION_MODE, joints_to_str(joints));
        self.add_line(&line);
    }

    fn unsupported(&mut self, call: &str, value: &str) {
        match self.config.unsupported {
            UnsupportedPolicy::Ignore => debug!(call, value, "ignored"),
            UnsupportedPolicy::Log => {
                let entry = format!(
                    "{} not supported by {} ({})",
                    call, self.config.robot_name, value
                );
                self.add_log(&entry);
            }
        }
    }

    /// Destination for a save, or `None` when the user cancelled
    fn resolve_destination(&mut self, folder: &Path, file_name: &str, ask_user: bool) -> Option<PathBuf> {
        if ask_user || !folder.is_dir() {
            self.host
                .save_file_dialog(folder, file_name, "Save program as...")
        } else {
            Some(folder.join(file_name))
        }
    }

    fn show(&mut self, path: &Path, show_result: &ShowResult) {
        let app = match show_result {
            ShowResult::No => return,
            ShowResult::Default => self.config.viewer.clone(),
            ShowResult::Application(app) => Some(app.clone()),
        };
        if let Err(e) = self.host.open_file(path, app.as_deref()) {
            warn!(path = %path.display(), error = %e, "could not open saved program");
        }
    }
}

impl Default for ArctosPost {
    fn default() -> Self {
        Self::new(PostConfig::default())
    }
}

impl RobotPost for ArctosPost {
    fn name(&self) -> &str {
        &self.config.post_name
    }

    fn program(&self) -> &ProgramText {
        &self.text
    }

    fn log(&self) -> &DiagnosticLog {
        &self.log
    }

    fn prog_start(&mut self, progname: &str) {
        debug!(progname, robot = %self.config.robot_name, "program start");
        let preamble = self.config.preamble.clone();
        self.add_line(&preamble);
    }

    fn prog_finish(&mut self, progname: &str) {
        debug!(progname, "program finish");
        self.add_line(POSTAMBLE);
    }

    fn prog_save(
        &mut self,
        folder: &Path,
        progname: &str,
        ask_user: bool,
        show_result: ShowResult,
    ) -> io::Result<Option<PathBuf>> {
        let file_name = self.config.file_name(progname);
        let Some(path) = self.resolve_destination(folder, &file_name, ask_user) else {
            info!(folder = %folder.display(), "save cancelled, no destination");
            return Ok(None);
        };

        std::fs::write(&path, self.text.to_string())?;
        info!("SAVED: {}", path.display());
        self.state = PostState::Saved(path.clone());

        self.show(&path, &show_result);

        if !self.log.is_empty() {
            let message = format!("Program generation LOG:\n\n{}", self.log);
            self.host.show_message(&message);
        }

        Ok(Some(path))
    }

    fn prog_send_robot(&mut self, robot_ip: &str, remote_path: &str, ftp_user: &str, _ftp_pass: &str) {
        warn!(robot_ip, remote_path, ftp_user, "sending to the robot is not implemented");
        self.add_log(&format!(
            "Sending program to {} ({}) is not supported, copy the saved file manually",
            robot_ip, remote_path
        ));
    }

    fn move_j(&mut self, pose: Option<&Pose>, joints: &Joints, _conf_rlf: Option<ConfRlf>) {
        if let Some(pose) = pose {
            debug!(%pose, "move_j");
        }
        self.emit_joint_move(joints);
    }

    fn move_l(&mut self, pose: Option<&Pose>, joints: &Joints, _conf_rlf: Option<ConfRlf>) {
        if let Some(pose) = pose {
            debug!(%pose, "move_l");
        }
        self.emit_joint_move(joints);
    }

    fn move_c(
        &mut self,
        _pose1: Option<&Pose>,
        joints1: &Joints,
        _pose2: Option<&Pose>,
        joints2: &Joints,
        _conf_rlf_1: Option<ConfRlf>,
        _conf_rlf_2: Option<ConfRlf>,
    ) {
        self.emit_joint_move(joints1);
        self.emit_joint_move(joints2);
    }

    fn set_frame(&mut self, pose: &Pose, frame_id: Option<i32>, frame_name: Option<&str>) {
        debug!(%pose, ?frame_id, ?frame_name, "set_frame has no controller equivalent");
    }

    fn set_tool(&mut self, pose: &Pose, tool_id: Option<i32>, tool_name: Option<&str>) {
        debug!(%pose, ?tool_id, ?tool_name, "set_tool has no controller equivalent");
    }

    fn pause(&mut self, time_ms: f64) {
        if time_ms < 0.0 {
            self.add_line("PAUSE");
        } else {
            self.add_line(&format!("M30T{}", fmt_number(time_ms)));
        }
    }

    fn set_speed(&mut self, speed_mms: f64) {
        self.unsupported("set_speed", &format!("{} mm/s", fmt_number(speed_mms)));
    }

    fn set_acceleration(&mut self, accel_mmss: f64) {
        self.unsupported("set_acceleration", &format!("{} mm/s2", fmt_number(accel_mmss)));
    }

    fn set_speed_joints(&mut self, speed_degs: f64) {
        let speed = AngularVelocity::new::<degree_per_second>(speed_degs);
        self.joint_speed = Some(speed);
        self.add_line(&format!("M105 {:.3}", speed.get::<radian_per_second>()));
    }

    fn set_acceleration_joints(&mut self, accel_degss: f64) {
        let accel = AngularAcceleration::new::<degree_per_second_squared>(accel_degss);
        self.joint_accel = Some(accel);
        let radss = accel.get::<radian_per_second_squared>().trunc() as i64;
        self.add_line(&format!("M110 {}", radss));
    }

    fn set_zone_data(&mut self, zone_mm: f64) {
        self.unsupported("set_zone_data", &format!("{} mm", fmt_number(zone_mm)));
    }

    fn set_do(&mut self, io_var: &IoVar, io_value: &IoValue) {
        let line = format!("{}={}", io_var.render(Direction::Output), io_value.render());
        self.add_line(&line);
    }

    fn wait_di(&mut self, io_var: &IoVar, io_value: &IoValue, timeout_ms: f64) {
        let var = io_var.render(Direction::Input);
        let value = io_value.render();
        if timeout_ms < 0.0 {
            self.add_line(&format!("WAIT FOR {}=={}", var, value));
        } else {
            self.add_line(&format!("WAIT FOR {}=={} TIMEOUT={:.1}", var, value, timeout_ms));
        }
    }

    fn run_code(&mut self, code: &str, is_function_call: bool) {
        if !is_function_call {
            self.add_line(code);
            return;
        }

        let call = tables::call_form(code);
        match tables::routine(&call) {
            Some(lines) => {
                for line in lines {
                    self.add_line(line);
                }
            }
            None => self.add_line(&call),
        }
    }

    fn run_message(&mut self, message: &str, iscomment: bool) {
        if iscomment {
            match tables::comment_command(message) {
                Some(line) => self.add_line(line),
                None => debug!(message, "comment dropped"),
            }
        } else {
            self.add_log(&format!(
                "Show message on teach pendant not implemented ({})",
                message
            ));
        }
    }
}

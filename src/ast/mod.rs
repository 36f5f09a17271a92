//! Host call script
//! One entry per callback the host makes on a post, in call order

use crate::motion::{ConfRlf, Joints, Pose};
use crate::signal::{IoValue, IoVar};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Script {
    pub calls: Vec<HostCall>,
}

impl Script {
    /// Program name from the first `prog_start`, if any
    pub fn program_name(&self) -> Option<&str> {
        self.calls.iter().find_map(|call| match call {
            HostCall::ProgStart(name) => Some(name.as_str()),
            _ => None,
        })
    }
}

/// Motion target of a move call
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Target {
    pub pose: Option<Pose>,
    pub joints: Joints,
    pub conf: Option<ConfRlf>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    ProgStart(String),
    ProgFinish(String),
    SendRobot {
        robot_ip: String,
        remote_path: String,
        ftp_user: String,
        ftp_pass: String,
    },
    MoveJ(Target),
    MoveL(Target),
    MoveC(Target, Target),
    SetFrame {
        pose: Pose,
        id: Option<i32>,
        name: Option<String>,
    },
    SetTool {
        pose: Pose,
        id: Option<i32>,
        name: Option<String>,
    },
    Pause(f64),           // ms, negative = until resumed
    SetSpeed(f64),        // mm/s
    SetAcceleration(f64), // mm/s²
    SetSpeedJoints(f64),  // deg/s
    SetAccelerationJoints(f64), // deg/s²
    SetZoneData(f64),     // mm
    SetDo(IoVar, IoValue),
    WaitDi {
        var: IoVar,
        value: IoValue,
        timeout_ms: f64,
    },
    RunCode {
        code: String,
        is_function_call: bool,
    },
    RunMessage {
        message: String,
        is_comment: bool,
    },
}

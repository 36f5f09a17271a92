//! Drive a post with a recorded sequence of host calls

use crate::ast::{HostCall, Script};
use crate::post::RobotPost;
use tracing::trace;

/// Issue every call of `script` on `post`, in order
pub fn replay(post: &mut dyn RobotPost, script: &Script) {
    for call in &script.calls {
        dispatch(post, call);
    }
}

pub fn dispatch(post: &mut dyn RobotPost, call: &HostCall) {
    trace!(?call, "host call");
    match call {
        HostCall::ProgStart(name) => post.prog_start(name),
        HostCall::ProgFinish(name) => post.prog_finish(name),
        HostCall::SendRobot {
            robot_ip,
            remote_path,
            ftp_user,
            ftp_pass,
        } => post.prog_send_robot(robot_ip, remote_path, ftp_user, ftp_pass),
        HostCall::MoveJ(t) => post.move_j(t.pose.as_ref(), &t.joints, t.conf),
        HostCall::MoveL(t) => post.move_l(t.pose.as_ref(), &t.joints, t.conf),
        HostCall::MoveC(a, b) => post.move_c(
            a.pose.as_ref(),
            &a.joints,
            b.pose.as_ref(),
            &b.joints,
            a.conf,
            b.conf,
        ),
        HostCall::SetFrame { pose, id, name } => post.set_frame(pose, *id, name.as_deref()),
        HostCall::SetTool { pose, id, name } => post.set_tool(pose, *id, name.as_deref()),
        HostCall::Pause(ms) => post.pause(*ms),
        HostCall::SetSpeed(v) => post.set_speed(*v),
        HostCall::SetAcceleration(v) => post.set_acceleration(*v),
        HostCall::SetSpeedJoints(v) => post.set_speed_joints(*v),
        HostCall::SetAccelerationJoints(v) => post.set_acceleration_joints(*v),
        HostCall::SetZoneData(v) => post.set_zone_data(*v),
        HostCall::SetDo(var, value) => post.set_do(var, value),
        HostCall::WaitDi {
            var,
            value,
            timeout_ms,
        } => post.wait_di(var, value, *timeout_ms),
        HostCall::RunCode {
            code,
            is_function_call,
        } => post.run_code(code, *is_function_call),
        HostCall::RunMessage {
            message,
            is_comment,
        } => post.run_message(message, *is_comment),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_script;
    use crate::post::ArctosPost;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pick_and_place_program() {
        let source = r#"
prog_start PickPlace
set_speed_joints 90
set_acceleration_joints 180
set_speed 250
set_frame pose [0 0 0 0 0 0] id 1 name "Table"
move_j joints [0 0 0 0 0 0]
run_message "Attach to Gripper V2" comment
run_code "Open" call
move_l pose [250 0 200 180 0 0] joints [0 30 60 0 -45 0]
run_code "Close" call
wait_di 2 1 timeout 1000
move_c joints [10 30 60 0 -45 0], joints [20 30 60 0 -45 0]
set_do 1 0
pause 500
run_message "Detach from Gripper V2" comment
prog_finish PickPlace
"#;
        let script = parse_script(source).unwrap();
        let mut post = ArctosPost::default();
        replay(&mut post, &script);

        let expected = "\
F800 (Feedrate)
M105 1.571
M110 3
G90 X 0.00 Y0.00 Z 0.00 A 0.00 B -0.00 C 0.00
M21
M97 G4P1 B40 T1
G90 X 0.00 Y30.00 Z 60.00 A 0.00 B 45.00 C 0.00
M97 G4P1 B0 T1
WAIT FOR IN[2]==TRUE TIMEOUT=1000.0
G90 X 10.00 Y30.00 Z 60.00 A 0.00 B 45.00 C 0.00
G90 X 20.00 Y30.00 Z 60.00 A 0.00 B 45.00 C 0.00
OUT[1]=FALSE
M30T500
M20
G90 X 0 Y 0 Z 0 A 0 B 0 C 0
";
        assert_eq!(post.program().to_string(), expected);
        assert!(post.log().is_empty());
    }

    #[test]
    fn test_runtime_message_goes_to_log() {
        let script = parse_script("run_message \"Load part\"").unwrap();
        let mut post = ArctosPost::default();
        replay(&mut post, &script);
        assert!(post.program().is_empty());
        assert_eq!(post.log().entries.len(), 1);
    }
}

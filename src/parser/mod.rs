//! Recursive descent parser for host call scripts
//! Converts tokens into a list of host calls

use crate::ast::*;
use crate::lexer::{LexerError, Token};
use crate::motion::{ConfRlf, Joints, Pose};
use crate::post::NO_TIMEOUT;
use crate::signal::{IoValue, IoVar};
use logos::Span;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("{0}")]
    Lex(#[from] LexerError),

    #[error("unexpected token: expected {expected}, got {got}")]
    UnexpectedToken {
        expected: String,
        got: String,
        span: Span,
    },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEOF { expected: String, span: Span },

    #[error("{message}")]
    Invalid { message: String, span: Span },
}

impl ParseError {
    /// Byte range of the offending input
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex(e) => e.span.clone(),
            ParseError::UnexpectedToken { span, .. }
            | ParseError::UnexpectedEOF { span, .. }
            | ParseError::Invalid { span, .. } => span.clone(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// Lex and parse a whole script
pub fn parse_script(source: &str) -> Result<Script> {
    let tokens = crate::lexer::lex(source)?;
    Parser::new(tokens, source.len()).parse()
}

pub struct Parser {
    tokens: Vec<(Token, Span)>,
    position: usize,
    end: usize,
}

impl Parser {
    /// `source_len` positions end-of-input errors
    pub fn new(tokens: Vec<(Token, Span)>, source_len: usize) -> Self {
        Self {
            tokens,
            position: 0,
            end: source_len,
        }
    }

    /// Parse the full script
    pub fn parse(&mut self) -> Result<Script> {
        let mut calls = Vec::new();

        loop {
            self.skip_newlines();
            if self.peek().is_none() {
                break;
            }

            calls.push(self.parse_call()?);

            match self.peek() {
                None | Some(Token::Newline) => {}
                Some(_) => return Err(self.unexpected("end of line")),
            }
        }

        Ok(Script { calls })
    }

    fn parse_call(&mut self) -> Result<HostCall> {
        let Some(token) = self.peek().cloned() else {
            return Err(self.unexpected("host call"));
        };

        let call = match token {
            Token::ProgStart => {
                self.advance();
                HostCall::ProgStart(self.expect_text()?)
            }
            Token::ProgFinish => {
                self.advance();
                HostCall::ProgFinish(self.optional_text().unwrap_or_default())
            }
            Token::SendRobot => {
                self.advance();
                HostCall::SendRobot {
                    robot_ip: self.expect_text()?,
                    remote_path: self.expect_text()?,
                    ftp_user: self.expect_text()?,
                    ftp_pass: self.expect_text()?,
                }
            }
            Token::MoveJ => {
                self.advance();
                HostCall::MoveJ(self.parse_target()?)
            }
            Token::MoveL => {
                self.advance();
                HostCall::MoveL(self.parse_target()?)
            }
            Token::MoveC => {
                self.advance();
                let first = self.parse_target()?;
                self.skip_comma();
                let second = self.parse_target()?;
                HostCall::MoveC(first, second)
            }
            Token::SetFrame => {
                self.advance();
                let (pose, id, name) = self.parse_frame_args()?;
                HostCall::SetFrame { pose, id, name }
            }
            Token::SetTool => {
                self.advance();
                let (pose, id, name) = self.parse_frame_args()?;
                HostCall::SetTool { pose, id, name }
            }
            Token::Pause => {
                self.advance();
                HostCall::Pause(self.expect_number()?)
            }
            Token::SetSpeed => {
                self.advance();
                HostCall::SetSpeed(self.expect_number()?)
            }
            Token::SetAcceleration => {
                self.advance();
                HostCall::SetAcceleration(self.expect_number()?)
            }
            Token::SetSpeedJoints => {
                self.advance();
                HostCall::SetSpeedJoints(self.expect_number()?)
            }
            Token::SetAccelerationJoints => {
                self.advance();
                HostCall::SetAccelerationJoints(self.expect_number()?)
            }
            Token::SetZoneData => {
                self.advance();
                HostCall::SetZoneData(self.expect_number()?)
            }
            Token::SetDo => {
                self.advance();
                let var = self.parse_io_var()?;
                let value = self.parse_io_value()?;
                HostCall::SetDo(var, value)
            }
            Token::WaitDi => {
                self.advance();
                let var = self.parse_io_var()?;
                let value = self.parse_io_value()?;
                let timeout_ms = if self.eat(&Token::Timeout) {
                    self.expect_number()?
                } else {
                    NO_TIMEOUT
                };
                HostCall::WaitDi {
                    var,
                    value,
                    timeout_ms,
                }
            }
            Token::RunCode => {
                self.advance();
                let code = self.expect_text()?;
                let is_function_call = self.eat(&Token::Call);
                HostCall::RunCode {
                    code,
                    is_function_call,
                }
            }
            Token::RunMessage => {
                self.advance();
                let message = self.expect_text()?;
                let is_comment = self.eat(&Token::Comment);
                HostCall::RunMessage {
                    message,
                    is_comment,
                }
            }
            _ => return Err(self.unexpected("host call")),
        };

        Ok(call)
    }

    /// `[pose LIST6] joints LIST [conf LIST3]`, keywords in any order
    fn parse_target(&mut self) -> Result<Target> {
        let start = self.current_span();
        let mut target = Target::default();
        let mut has_joints = false;

        loop {
            match self.peek() {
                Some(Token::Pose) => {
                    self.advance();
                    target.pose = Some(self.parse_pose()?);
                }
                Some(Token::Joints) => {
                    self.advance();
                    target.joints = Joints::new(self.expect_list()?);
                    has_joints = true;
                }
                Some(Token::Conf) => {
                    self.advance();
                    let flags = self.expect_fixed_list::<3>("conf")?;
                    target.conf = Some(ConfRlf::from_flags(flags));
                }
                _ => break,
            }
        }

        if !has_joints {
            return Err(ParseError::Invalid {
                message: "move target needs joints".to_string(),
                span: start,
            });
        }
        Ok(target)
    }

    /// `[pose LIST6] [id NUM] [name TEXT]`, keywords in any order
    fn parse_frame_args(&mut self) -> Result<(Pose, Option<i32>, Option<String>)> {
        let mut pose = Pose::identity();
        let mut id = None;
        let mut name = None;

        loop {
            match self.peek() {
                Some(Token::Pose) => {
                    self.advance();
                    pose = self.parse_pose()?;
                }
                Some(Token::Id) => {
                    self.advance();
                    id = Some(self.expect_integer()? as i32);
                }
                Some(Token::Name) => {
                    self.advance();
                    name = Some(self.expect_text()?);
                }
                _ => break,
            }
        }

        Ok((pose, id, name))
    }

    fn parse_pose(&mut self) -> Result<Pose> {
        let xyzrpw = self.expect_fixed_list::<6>("pose")?;
        Ok(Pose::from_xyzrpw(xyzrpw))
    }

    fn parse_io_var(&mut self) -> Result<IoVar> {
        match self.peek() {
            Some(Token::Number(_)) => {
                let span = self.current_span();
                let n = self.expect_integer()?;
                u32::try_from(n).map(IoVar::Index).map_err(|_| ParseError::Invalid {
                    message: format!("I/O channel {} is negative", n),
                    span,
                })
            }
            _ => self.expect_text().map(IoVar::Named),
        }
    }

    fn parse_io_value(&mut self) -> Result<IoValue> {
        match self.peek() {
            Some(Token::Number(_)) => self.expect_number().map(IoValue::Level),
            _ => self.expect_text().map(IoValue::Named),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position).map(|(t, _)| t)
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    /// Consume `expected` if it is next
    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume(&mut self, expected: Token) -> Result<()> {
        if self.eat(&expected) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("{:?}", expected)))
        }
    }

    fn skip_comma(&mut self) {
        self.eat(&Token::Comma);
    }

    fn skip_newlines(&mut self) {
        while self.eat(&Token::Newline) {}
    }

    fn expect_number(&mut self) -> Result<f64> {
        match self.peek() {
            Some(Token::Number(n)) => {
                let val = *n;
                self.advance();
                Ok(val)
            }
            _ => Err(self.unexpected("number")),
        }
    }

    fn expect_integer(&mut self) -> Result<i64> {
        let span = self.current_span();
        let val = self.expect_number()?;
        if val.fract() != 0.0 {
            return Err(ParseError::Invalid {
                message: format!("expected whole number, got {}", val),
                span,
            });
        }
        Ok(val as i64)
    }

    /// Quoted string or bare identifier
    fn expect_text(&mut self) -> Result<String> {
        self.optional_text().ok_or_else(|| self.unexpected("string or identifier"))
    }

    fn optional_text(&mut self) -> Option<String> {
        match self.peek() {
            Some(Token::String(s)) | Some(Token::Identifier(s)) => {
                let val = s.clone();
                self.advance();
                Some(val)
            }
            _ => None,
        }
    }

    /// `[` numbers, optionally comma separated `]`
    fn expect_list(&mut self) -> Result<Vec<f64>> {
        self.consume(Token::LBracket)?;
        let mut values = Vec::new();
        loop {
            match self.peek() {
                Some(Token::RBracket) => {
                    self.advance();
                    return Ok(values);
                }
                Some(Token::Comma) => {
                    self.advance();
                }
                _ => values.push(self.expect_number()?),
            }
        }
    }

    fn expect_fixed_list<const N: usize>(&mut self, what: &str) -> Result<[f64; N]> {
        let span = self.current_span();
        let values = self.expect_list()?;
        <[f64; N]>::try_from(values).map_err(|values| ParseError::Invalid {
            message: format!("{} needs {} values, got {}", what, N, values.len()),
            span: span.start..self.previous_end(),
        })
    }

    fn current_span(&self) -> Span {
        self.tokens
            .get(self.position)
            .map(|(_, span)| span.clone())
            .unwrap_or(self.end..self.end)
    }

    fn previous_end(&self) -> usize {
        self.position
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|(_, span)| span.end)
            .unwrap_or(self.end)
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match self.tokens.get(self.position) {
            Some((token, span)) => ParseError::UnexpectedToken {
                expected: expected.to_string(),
                got: format!("{:?}", token),
                span: span.clone(),
            },
            None => ParseError::UnexpectedEOF {
                expected: expected.to_string(),
                span: self.end..self.end,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn single(input: &str) -> HostCall {
        let script = parse_script(input).expect("parse failed");
        assert_eq!(script.calls.len(), 1);
        script.calls.into_iter().next().unwrap()
    }

    #[test]
    fn test_full_script() {
        let source = r#"
// pick and place
prog_start Main
set_speed_joints 90
move_j joints [0 0 90 0 30 0]
run_code "Open" call
wait_di 3 1 timeout 500
set_do 5 1
pause -1
prog_finish Main
"#;
        let script = parse_script(source).expect("parse failed");
        assert_eq!(script.calls.len(), 8);
        assert_eq!(script.program_name(), Some("Main"));
        assert_eq!(script.calls[1], HostCall::SetSpeedJoints(90.0));
        assert_eq!(script.calls[6], HostCall::Pause(-1.0));
    }

    #[test]
    fn test_move_with_pose_and_conf() {
        let call = single("move_l pose [100, 0, 300, 0, 90, 0] joints [1, 2, 3, 4, 5, 6] conf [0, 1, 0]");
        let HostCall::MoveL(target) = call else {
            panic!("expected move_l");
        };
        assert_eq!(target.joints, Joints::from([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]));
        assert!(target.pose.is_some());
        assert_eq!(
            target.conf,
            Some(ConfRlf {
                rear: false,
                lower: true,
                flip: false
            })
        );
    }

    #[test]
    fn test_move_c_two_targets() {
        let call = single("move_c joints [1 2 3 4 5 6], joints [6 5 4 3 2 1]");
        let HostCall::MoveC(a, b) = call else {
            panic!("expected move_c");
        };
        assert_eq!(a.joints.0[0], 1.0);
        assert_eq!(b.joints.0[0], 6.0);
    }

    #[test]
    fn test_io_forms() {
        assert_eq!(
            single("set_do 5 1"),
            HostCall::SetDo(IoVar::Index(5), IoValue::Level(1.0))
        );
        assert_eq!(
            single("set_do MYVAR \"FALSE\""),
            HostCall::SetDo(IoVar::Named("MYVAR".into()), IoValue::Named("FALSE".into()))
        );
        assert_eq!(
            single("wait_di 3 1"),
            HostCall::WaitDi {
                var: IoVar::Index(3),
                value: IoValue::Level(1.0),
                timeout_ms: NO_TIMEOUT,
            }
        );
    }

    #[test]
    fn test_frame_args_any_order() {
        let call = single("set_tool name \"Gripper\" id 2 pose [0 0 120 0 0 0]");
        let HostCall::SetTool { pose, id, name } = call else {
            panic!("expected set_tool");
        };
        assert_eq!(id, Some(2));
        assert_eq!(name.as_deref(), Some("Gripper"));
        assert_eq!(pose.to_xyzrpw()[2], 120.0);
    }

    #[test]
    fn test_code_and_message_flags() {
        assert_eq!(
            single("run_code \"G28\""),
            HostCall::RunCode {
                code: "G28".into(),
                is_function_call: false
            }
        );
        assert_eq!(
            single("run_message \"Attach to Gripper V2\" comment"),
            HostCall::RunMessage {
                message: "Attach to Gripper V2".into(),
                is_comment: true
            }
        );
    }

    #[test]
    fn test_prog_finish_name_optional() {
        assert_eq!(single("prog_finish"), HostCall::ProgFinish(String::new()));
    }

    #[test]
    fn test_pose_length_error() {
        let source = "move_j pose [1 2 3] joints [0 0 0 0 0 0]";
        let err = parse_script(source).unwrap_err();
        assert!(matches!(err, ParseError::Invalid { .. }));
        assert_eq!(&source[err.span()], "[1 2 3]");
    }

    #[test]
    fn test_missing_joints() {
        let err = parse_script("move_j pose [0 0 0 0 0 0]").unwrap_err();
        assert_eq!(err.to_string(), "move target needs joints");
    }

    #[test]
    fn test_negative_channel() {
        let err = parse_script("set_do -1 1").unwrap_err();
        assert_eq!(err.span(), 7..9);
    }

    #[test]
    fn test_trailing_garbage() {
        let err = parse_script("pause 10 20").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
        assert_eq!(err.span(), 9..11);
    }

    #[test]
    fn test_eof_error() {
        let err = parse_script("set_speed").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEOF { .. }));
        assert_eq!(err.span(), 9..9);
    }
}

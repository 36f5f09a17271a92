use logos::Logos;

/// Tokens for host call scripts
/// One call per line, named after the post callbacks

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\f]+")] // Skip whitespace
#[logos(error = LexerError)]
pub enum Token {
    // Literals
    #[regex(r"-?\d+\.?\d*", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    #[regex(r#""[^"\n]*""#, |lex| lex.slice()[1..lex.slice().len()-1].to_string())]
    String(String),

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Calls - program lifecycle
    #[token("prog_start")]
    ProgStart,

    #[token("prog_finish")]
    ProgFinish,

    #[token("send_robot")]
    SendRobot,

    // Calls - motion
    #[token("move_j")]
    MoveJ,

    #[token("move_l")]
    MoveL,

    #[token("move_c")]
    MoveC,

    #[token("set_frame")]
    SetFrame,

    #[token("set_tool")]
    SetTool,

    // Calls - timing and speed
    #[token("pause")]
    Pause,

    #[token("set_speed")]
    SetSpeed,

    #[token("set_acceleration")]
    SetAcceleration,

    #[token("set_speed_joints")]
    SetSpeedJoints,

    #[token("set_acceleration_joints")]
    SetAccelerationJoints,

    #[token("set_zone_data")]
    SetZoneData,

    // Calls - I/O and code
    #[token("set_do")]
    SetDo,

    #[token("wait_di")]
    WaitDi,

    #[token("run_code")]
    RunCode,

    #[token("run_message")]
    RunMessage,

    // Arguments
    #[token("pose")]
    Pose,

    #[token("joints")]
    Joints,

    #[token("conf")]
    Conf,

    #[token("id")]
    Id,

    #[token("name")]
    Name,

    #[token("timeout")]
    Timeout,

    #[token("call")]
    Call,

    #[token("comment")]
    Comment,

    // Punctuation
    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token(",")]
    Comma,

    #[regex(r"\r?\n")]
    Newline,

    // Comments
    #[regex(r"//[^\n]*", logos::skip)]
    #[regex(r";[^\n]*", logos::skip)]
    LineComment,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LexerError {
    pub span: logos::Span,
}

impl std::fmt::Display for LexerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unrecognized input at {}..{}", self.span.start, self.span.end)
    }
}

impl std::error::Error for LexerError {}

/// Lex the input string into tokens
pub fn lex(input: &str) -> Result<Vec<(Token, logos::Span)>, LexerError> {
    Token::lexer(input)
        .spanned()
        .map(|(result, span)| match result {
            Ok(token) => Ok((token, span)),
            Err(_) => Err(LexerError { span }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token> {
        lex(input).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn test_move_tokens() {
        assert_eq!(kinds("move_j joints [0, -10.5, 20]"), vec![
            Token::MoveJ,
            Token::Joints,
            Token::LBracket,
            Token::Number(0.0),
            Token::Comma,
            Token::Number(-10.5),
            Token::Comma,
            Token::Number(20.0),
            Token::RBracket,
        ]);
    }

    #[test]
    fn test_keywords_win_over_identifiers() {
        assert_eq!(kinds("set_speed set_speed_joints set_speedy"), vec![
            Token::SetSpeed,
            Token::SetSpeedJoints,
            Token::Identifier("set_speedy".to_string()),
        ]);
    }

    #[test]
    fn test_strings_and_comments() {
        let input = "run_message \"Attach to Gripper V2\" comment ; gripper\n// whole line\nset_do MYVAR 0";
        assert_eq!(kinds(input), vec![
            Token::RunMessage,
            Token::String("Attach to Gripper V2".to_string()),
            Token::Comment,
            Token::Newline,
            Token::Newline,
            Token::SetDo,
            Token::Identifier("MYVAR".to_string()),
            Token::Number(0.0),
        ]);
    }

    #[test]
    fn test_bad_character_reports_span() {
        let err = lex("pause 10\npause @").unwrap_err();
        assert_eq!(err.span, 15..16);
    }
}

//! G-code post-processor for the Arctos robot arm
//!
//! A host (offline programming software, or the `arctos-post` CLI replaying
//! a call script) drives a [`post::RobotPost`] one callback at a time. The
//! Arctos post formats each call into its controller dialect and writes the
//! accumulated program on save.

pub mod ast;
pub mod codegen;
pub mod config;
pub mod host;
pub mod lexer;
pub mod motion;
pub mod parser;
pub mod post;
pub mod replay;
pub mod signal;

pub use config::PostConfig;
pub use post::{ArctosPost, RobotPost, ShowResult};

//! # RWX Parser
//!
//! Lexical layer for the line-oriented RWX scene-description format.
//!
//! One statement per line, case-insensitive keywords, whitespace and tab
//! tolerant, `#` starts a comment unless immediately followed by `!`.
//! Lines matching no known statement — or statements with malformed
//! operand counts — are silently skipped: [`parse_line`] returns `None`
//! and the caller moves on.
//!
//! ```rust
//! use rwx_parser::{parse_line, Statement};
//!
//! assert!(matches!(parse_line("ClumpBegin"), Some(Statement::ClumpBegin)));
//! assert!(matches!(
//!     parse_line("  vertex 1 0 -1 uv 0.5 0.5 # lit corner"),
//!     Some(Statement::Vertex { .. })
//! ));
//! assert_eq!(parse_line("thisisnotarwxcommand"), None);
//! ```

pub mod lexer;
pub mod statement;

pub use lexer::strip_comment;
pub use statement::{parse_line, AxisAlignment, Statement};

#[cfg(test)]
mod tests;

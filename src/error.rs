//! Structured error types for each pipeline stage. `InterpreterError::message`
//! is the single place the exact-wording contract lives; every caller that
//! needs user-facing text goes through it rather than `Display` directly.

use thiserror::Error;

/// Parser failures are purely syntactic; the reference only requires *an*
/// error message, not specific wording, so a single free-text variant covers
/// every case the parser can hit.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct ParseError(pub String);

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Runtime failures. Every message here has exact wording that must not be
/// reworded.
#[derive(Debug, Clone, Error)]
pub enum RuntimeError {
    #[error("Identifier can not be found: {name}")]
    IdentifierNotFound { name: String },

    #[error("Variable '{name}' is not mutable")]
    NotMutable { name: String },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Unsupported operation: {left} {op} {right}")]
    UnsupportedOperation {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },

    #[error("Unsupported operation: String * Integer (< 0)")]
    NegativeStringRepeat,

    #[error("Unsupported operation: -{kind}")]
    UnsupportedPrefix { kind: &'static str },

    #[error("Cannot compare {left} with {right}")]
    NotComparable {
        left: &'static str,
        right: &'static str,
    },

    #[error("Unable to perform index operation, found: {target}[{index}]")]
    BadIndexKind {
        target: &'static str,
        index: &'static str,
    },

    #[error("Cannot index into {kind}")]
    NotIndexable { kind: &'static str },

    #[error("Expected a Function, found: {kind}")]
    NotCallable { kind: &'static str },

    #[error("Cannot compose non-function: {kind}")]
    NotComposable { kind: &'static str },

    #[error("Cannot thread into non-function: {kind}")]
    NotThreadable { kind: &'static str },

    #[error("Cannot push to {kind}")]
    CannotPush { kind: &'static str },

    #[error("Cannot assoc to {kind}")]
    CannotAssoc { kind: &'static str },

    #[error("Unexpected argument: {name}({kinds})")]
    UnexpectedArgument { name: &'static str, kinds: String },

    #[error("Unable to include a Dictionary within a Set")]
    DictionaryInSet,

    #[error("Unable to use a Dictionary as a Dictionary key")]
    DictionaryAsKey,
}

/// Top-level failure of a whole pipeline run.
#[derive(Debug, Clone, Error)]
pub enum InterpreterError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl InterpreterError {
    /// The exact text to follow `[Error] ` in `evaluate_program`'s output.
    pub fn message(&self) -> String {
        match self {
            InterpreterError::Parse(e) => e.to_string(),
            InterpreterError::Runtime(e) => e.to_string(),
        }
    }
}

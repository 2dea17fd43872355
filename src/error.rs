//! Centralised error hierarchy for the **Lox interpreter**.
//!
//! Three families never get conflated:
//!
//! * static errors (`Lex`, `Parse`, `Resolve`), which are accumulated and block
//!   interpretation entirely,
//! * runtime errors ([`RuntimeError`]), which unwind the current top-level run,
//! * the internal `return` signal, which lives in the interpreter as
//!   [`Flow`](crate::interpreter::Flow) and never reaches this module.
//!
//! The module **does not** print diagnostics itself.

use std::fmt;
use thiserror::Error;

use log::info;

use crate::token::{Token, TokenType};

/// Canonical error type used throughout the interpreter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoxError {
    /// Lexical (scanner) error with source line information.
    #[error("[line {line}] Error: {message}")]
    Lex {
        /// Human‑readable description.
        message: String,

        /// 1‑based line where the error occurred.
        line: usize,
    },

    /// Syntactic (parser) error.
    #[error("[line {line}] Error{location}: {message}")]
    Parse {
        message: String,
        line: usize,
        /// ` at 'lexeme'` or ` at end`.
        location: String,
    },

    /// Static‑analysis or resolution failure (e.g. early‑binding errors).
    #[error("[line {line}] Error at '{lexeme}': {message}")]
    Resolve {
        message: String,
        line: usize,
        lexeme: String,
    },

    /// Every static error reported for one run, in source order.
    #[error("{}", render_all(.0))]
    Static(Vec<LoxError>),

    /// Runtime evaluation error.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl LoxError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Lex error: line={}, msg={}", line, message);

        LoxError::Lex { message, line }
    }

    /// Helper constructor for the **parser**.
    pub fn parse<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();
        let location = if token.token_type == TokenType::EOF {
            " at end".to_string()
        } else {
            format!(" at '{}'", token.lexeme)
        };

        info!("Creating Parse error: line={}, msg={}", token.line, message);

        LoxError::Parse {
            message,
            line: token.line,
            location,
        }
    }

    /// Helper constructor for the **resolver**.
    pub fn resolve<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Resolve error: line={}, msg={}", token.line, message);

        LoxError::Resolve {
            message,
            line: token.line,
            lexeme: token.lexeme.clone(),
        }
    }

    /// Is this a static (pre-execution) failure?
    pub fn is_static(&self) -> bool {
        matches!(
            self,
            LoxError::Lex { .. }
                | LoxError::Parse { .. }
                | LoxError::Resolve { .. }
                | LoxError::Static(_)
        )
    }
}

fn render_all(errors: &[LoxError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, LoxError>;

/// The category of a [`RuntimeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    UndefinedVariable,
    UndefinedProperty,
    TypeMismatch,
    NotCallable,
    ArityMismatch { expected: usize, got: usize },
    DivisionByZero,
}

impl fmt::Display for RuntimeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeErrorKind::UndefinedVariable => write!(f, "undefined variable"),
            RuntimeErrorKind::UndefinedProperty => write!(f, "undefined property"),
            RuntimeErrorKind::TypeMismatch => write!(f, "type mismatch"),
            RuntimeErrorKind::NotCallable => write!(f, "not callable"),
            RuntimeErrorKind::ArityMismatch { expected, got } => {
                write!(f, "arity mismatch ({} != {})", expected, got)
            }
            RuntimeErrorKind::DivisionByZero => write!(f, "division by zero"),
        }
    }
}

/// A failure raised while evaluating a program.
///
/// Carries the line of the offending token so the host can point at it.
#[derive(Debug, Clone, Error)]
#[error("{message}\n[line {line}]")]
pub struct RuntimeError {
    pub kind: RuntimeErrorKind,
    pub message: String,
    pub line: usize,
    pub lexeme: String,
}

impl RuntimeError {
    pub fn new<S: Into<String>>(kind: RuntimeErrorKind, token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        info!(
            "Creating Runtime error: kind={}, line={}, msg={}",
            kind, token.line, message
        );

        RuntimeError {
            kind,
            message,
            line: token.line,
            lexeme: token.lexeme.clone(),
        }
    }

    pub fn undefined_variable(name: &Token) -> Self {
        Self::new(
            RuntimeErrorKind::UndefinedVariable,
            name,
            format!("Undefined variable '{}'.", name.lexeme),
        )
    }

    pub fn undefined_property(name: &Token) -> Self {
        Self::new(
            RuntimeErrorKind::UndefinedProperty,
            name,
            format!("Undefined property '{}'.", name.lexeme),
        )
    }

    pub fn type_mismatch<S: Into<String>>(token: &Token, msg: S) -> Self {
        Self::new(RuntimeErrorKind::TypeMismatch, token, msg)
    }
}

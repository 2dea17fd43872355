//! One interpreter session: the pipeline from source text to side effects.
//!
//! A session keeps its [`Interpreter`] (and so its globals) alive between
//! calls to [`Lox::run`], which is what the REPL relies on.

use std::io::Write;

use log::{debug, info};

use crate::error::{LoxError, Result};
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::Resolver;
use crate::scanner::Scanner;

pub struct Lox {
    interpreter: Interpreter,
    next_id: usize,
}

impl Default for Lox {
    fn default() -> Self {
        Self::new()
    }
}

impl Lox {
    /// File-mode session printing to stdout.
    pub fn new() -> Self {
        Self::from_interpreter(Interpreter::new())
    }

    /// Interactive session: expression statements echo their value.
    pub fn repl() -> Self {
        let mut interpreter = Interpreter::new();
        interpreter.set_repl(true);
        Self::from_interpreter(interpreter)
    }

    /// File-mode session printing to `out`.
    pub fn with_output(out: Box<dyn Write>) -> Self {
        Self::from_interpreter(Interpreter::with_output(out))
    }

    pub fn from_interpreter(interpreter: Interpreter) -> Self {
        Self {
            interpreter,
            next_id: 0,
        }
    }

    pub fn interpreter(&mut self) -> &mut Interpreter {
        &mut self.interpreter
    }

    /// Scan, parse, resolve and run `source`.
    ///
    /// Scanner and parser problems are reported together; any static error
    /// stops the run before a single statement executes.
    pub fn run(&mut self, source: &str) -> Result<()> {
        info!("Running {} bytes of source", source.len());

        let (tokens, mut errors) = Scanner::new(source).scan_all();

        let mut parser = Parser::with_id_base(tokens, self.next_id);
        let parsed = parser.parse();
        self.next_id = parser.id_watermark();

        let statements = match parsed {
            Ok(statements) if errors.is_empty() => statements,
            Ok(_) => return Err(LoxError::Static(errors)),
            Err(parse_errors) => {
                errors.extend(parse_errors);
                return Err(LoxError::Static(errors));
            }
        };

        debug!("Parsed {} statements", statements.len());

        let locals = Resolver::new()
            .resolve(&statements)
            .map_err(LoxError::Static)?;

        self.interpreter.add_locals(locals);
        self.interpreter.interpret(&statements)?;

        Ok(())
    }
}

#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use rox::error::LoxError;
use rox::lox::Lox;

/// In-memory sink that stays readable after being handed to the interpreter.
#[derive(Clone, Default)]
pub struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl SharedBuf {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A file-mode session whose `print` output lands in the returned buffer.
pub fn session() -> (Lox, SharedBuf) {
    let out = SharedBuf::default();
    (Lox::with_output(Box::new(out.clone())), out)
}

/// Run `source` in a fresh session; returns printed lines and the outcome.
pub fn run(source: &str) -> (Vec<String>, Result<(), LoxError>) {
    let (mut lox, out) = session();
    let result = lox.run(source);
    (out.lines(), result)
}

/// Run `source`, panicking on any error.
pub fn run_ok(source: &str) -> Vec<String> {
    let (lines, result) = run(source);
    if let Err(e) = result {
        panic!("program failed: {}\noutput so far: {:?}", e, lines);
    }
    lines
}

use std::{
    cell::RefCell,
    io::{self, Write},
    rc::Rc,
};

use treelox::{interpreter::Interpreter, parser::Parser, resolver::Resolver, scanner::Scanner};

/// A clonable byte sink; hand one clone to the interpreter as its `print`
/// output and keep another to read what the program wrote.
#[derive(Clone, Default)]
pub struct OutputCapture {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl OutputCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8(self.buf.borrow().clone()).expect("Captured output must be UTF-8.")
    }
}

impl Write for OutputCapture {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs a program through the whole pipeline against a fresh interpreter.
/// Returns the captured `print` output on success, or the first rendered
/// error otherwise.
pub fn run_program(src: &str) -> Result<String, String> {
    let capture = OutputCapture::new();
    let mut interpreter = Interpreter::with_output(Box::new(capture.clone()));

    let (tokens, diagnostics) = Scanner::new(src).scan_tokens();
    if let Some(diagnostic) = diagnostics.iter().next() {
        return Err(diagnostic.to_string());
    }

    let (stmts, errors) = Parser::new(tokens).parse();
    if let Some(error) = errors.first() {
        return Err(error.to_string());
    }

    Resolver::new(&mut interpreter)
        .resolve(&stmts)
        .map_err(|error| error.to_string())?;
    interpreter
        .interpret(&stmts)
        .map_err(|error| error.to_string())?;

    Ok(capture.contents())
}

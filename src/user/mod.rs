use std::{fs, path::Path, process};

use log::debug;

use crate::{interpreter::Interpreter, parser::Parser, resolver::Resolver, scanner::Scanner};

pub mod repl;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Ok,
    CompileError,
    RuntimeError,
}

/// Runs one source unit through the scan → parse → resolve → evaluate
/// pipeline, reporting every error to stderr. Each stage short-circuits the
/// later ones.
pub fn run(src: &str, interpreter: &mut Interpreter) -> RunStatus {
    let (tokens, diagnostics) = Scanner::new(src).scan_tokens();
    if !diagnostics.is_empty() {
        diagnostics.report_all();
        return RunStatus::CompileError;
    }
    debug!("scanned {} tokens", tokens.len());

    let (stmts, errors) = Parser::new(tokens).parse();
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("{}", error);
        }
        return RunStatus::CompileError;
    }
    debug!("parsed {} statements", stmts.len());

    if let Err(error) = Resolver::new(interpreter).resolve(&stmts) {
        eprintln!("{}", error);
        return RunStatus::CompileError;
    }

    if let Err(error) = interpreter.interpret(&stmts) {
        eprintln!("{}", error);
        return RunStatus::RuntimeError;
    }
    RunStatus::Ok
}

/// Runs a script file against a fresh interpreter. Exits the process with
/// the sysexits conventions on failure: 65 for compile errors, 70 for
/// runtime errors.
pub fn run_file(file: impl AsRef<Path>) -> anyhow::Result<()> {
    let src = fs::read_to_string(file)?;
    match run(&src, &mut Interpreter::new()) {
        RunStatus::Ok => Ok(()),
        RunStatus::CompileError => process::exit(65),
        RunStatus::RuntimeError => process::exit(70),
    }
}

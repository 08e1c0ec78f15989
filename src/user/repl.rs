use std::{
    fs,
    io::{self, Write},
};

use crate::{ast, interpreter::Interpreter, parser::Parser, scanner::Scanner, user};

pub struct Repl {
    interpreter: Interpreter,
    show_lex: bool,
    show_ast: bool,
    done: bool,
}

impl Repl {
    pub fn run() -> io::Result<()> {
        Self::new().start()
    }

    fn new() -> Self {
        Self {
            interpreter: Interpreter::new(),
            show_lex: false,
            show_ast: false,
            done: false,
        }
    }

    fn start(mut self) -> io::Result<()> {
        eprintln!("Welcome to treelox. Enter Ctrl+D or `:exit` to exit.\n");

        while !self.done {
            let line = match self.read_line()? {
                Some(line) => line,
                None => break,
            };

            // A line starting with `:` is a REPL command, not source code.
            if let Some(raw_cmd) = line.trim().strip_prefix(':') {
                self.handle_command(raw_cmd);
                continue;
            }

            // If the user asks so, show them some debug information before
            // the line is interpreted or errors are emitted.
            if self.show_lex && !line.trim().is_empty() {
                ast::dbg::print_scanned_tokens(&line);
            }
            if self.show_ast && !line.trim().is_empty() {
                let (tokens, diagnostics) = Scanner::new(&line).scan_tokens();
                if diagnostics.is_empty() {
                    let (stmts, _) = Parser::new(tokens).parse();
                    ast::dbg::print_program_tree(&stmts);
                }
            }

            // Interpreter state (globals, definitions) persists across
            // lines; a failed line leaves its prior side effects in place.
            user::run(&line, &mut self.interpreter);
        }
        Ok(())
    }

    /// Reads one input line. Returns `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            println!();
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn handle_command(&mut self, raw_cmd: &str) {
        let cmd: Vec<_> = raw_cmd.split_ascii_whitespace().collect();
        match *cmd.first().unwrap_or(&"") {
            "exit" => self.done = true,
            "ast" | "tree" => handle_bool_opt!(self.show_ast),
            "lex" => handle_bool_opt!(self.show_lex),
            "load" => match cmd.get(1) {
                Some(file) => match fs::read_to_string(file) {
                    Ok(src) => {
                        user::run(&src, &mut self.interpreter);
                    }
                    Err(error) => eprintln!("{}", error),
                },
                None => eprintln!("Usage: `:load <file>`."),
            },

            "help" => eprintln!(":exit | :lex | :ast | :load | :help"),
            _ => eprintln!("Invalid command. Type `:help` for guidance."),
        }
    }
}

macro_rules! handle_bool_opt {
    ($self:ident . $option:ident) => {{
        $self.$option = !$self.$option;
        let status = if $self.$option { "ON" } else { "OFF" };
        println!("Toggled `{}` option {}.", stringify!($option), status);
    }};
}
use handle_bool_opt;

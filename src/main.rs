use std::{env, process};

use anyhow::Result;

use treelox::user::{self, repl::Repl};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<_> = env::args().skip(1).collect();
    match args.as_slice() {
        [] => Repl::run()?,
        [script] => user::run_file(script)?,
        _ => {
            eprintln!("Usage: treelox [script]");
            process::exit(64);
        }
    }
    Ok(())
}

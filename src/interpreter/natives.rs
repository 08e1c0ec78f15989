use std::{
    io::{self, Read},
    rc::Rc,
    time::{SystemTime, UNIX_EPOCH},
};

use crate::{
    data::{LoxValue, NativeFunction},
    interpreter::{environment::Environment, CFResult},
};

/// Seeds the global environment with the built-in functions.
pub(super) fn install(globals: &Environment) {
    let natives = [
        NativeFunction {
            name: "clock",
            fn_ptr: clock,
            arity: 0,
        },
        NativeFunction {
            name: "char",
            fn_ptr: read_char,
            arity: 0,
        },
        NativeFunction {
            name: "string",
            fn_ptr: read_string,
            arity: 0,
        },
        NativeFunction {
            name: "number",
            fn_ptr: read_number,
            arity: 0,
        },
    ];
    for native in natives {
        globals.define(native.name, LoxValue::NativeFunction(Rc::new(native)));
    }
}

fn clock(_: &[LoxValue]) -> CFResult<LoxValue> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("System clock predates the Unix epoch.");
    Ok(LoxValue::Number(elapsed.as_secs_f64()))
}

/// Reads a single character from stdin; `nil` at end of input.
fn read_char(_: &[LoxValue]) -> CFResult<LoxValue> {
    let mut buf = [0u8; 1];
    match io::stdin().read(&mut buf) {
        Ok(0) | Err(_) => Ok(LoxValue::Nil),
        Ok(_) => Ok(LoxValue::String(char::from(buf[0]).to_string())),
    }
}

/// Reads a line from stdin with the trailing newline stripped; `nil` at end
/// of input.
fn read_string(_: &[LoxValue]) -> CFResult<LoxValue> {
    Ok(read_line().map_or(LoxValue::Nil, LoxValue::String))
}

/// Reads a line from stdin and parses it as a number; `nil` at end of input
/// or if the line is not a number.
fn read_number(_: &[LoxValue]) -> CFResult<LoxValue> {
    let number = read_line().and_then(|line| line.trim().parse::<f64>().ok());
    Ok(number.map_or(LoxValue::Nil, LoxValue::Number))
}

fn read_line() -> Option<String> {
    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => {
            if line.ends_with('\n') {
                line.pop();
                if line.ends_with('\r') {
                    line.pop();
                }
            }
            Some(line)
        }
    }
}

use std::io;

use crate::syntax::ParseError;
use crate::value::Value;

/// render produces the display text of `value` without consuming it.
pub fn render(value: &Value) -> String {
    value.to_string()
}

pub fn print_to(mut out: impl io::Write, value: &Value) -> io::Result<()> {
    write!(&mut out, "{}", value)
}

pub fn println_to(mut out: impl io::Write, value: &Value) -> io::Result<()> {
    print_to(&mut out, value)?;
    writeln!(&mut out)
}

pub fn println_result_to(
    mut out: impl io::Write,
    result: &Result<Value, ParseError>,
) -> io::Result<()> {
    match result {
        Ok(value) => println_to(&mut out, value),
        Err(e) => writeln!(&mut out, "Parse error: {}", e),
    }
}

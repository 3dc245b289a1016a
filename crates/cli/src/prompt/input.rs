use std::io::{self, stdin, stdout, BufRead, Write};

use crossterm::style::Stylize;

/// Prompts on `writer` until a non-blank line is read from `reader`.
///
/// Returns `None` if input ends first.
pub fn read_non_empty<R: BufRead, W: Write>(
    message: &str,
    reader: &mut R,
    writer: &mut W,
) -> io::Result<Option<String>> {
    loop {
        write!(writer, "{} {} ", "?".green(), message.bold())?;
        writer.flush()?;

        let mut input = String::new();
        if reader.read_line(&mut input)? == 0 {
            return Ok(None);
        }

        let value = input.trim();
        if !value.is_empty() {
            return Ok(Some(value.to_string()));
        }
    }
}

/// Prompts for a value on the terminal.
pub fn prompt_value(message: &str) -> io::Result<Option<String>> {
    read_non_empty(message, &mut stdin().lock(), &mut stdout())
}

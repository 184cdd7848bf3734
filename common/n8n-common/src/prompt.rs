//! Confirmation prompt for destructive commands

use std::io::{self, BufRead, Write};

/// Ask a yes/no question on stdout and read the answer from stdin
///
/// Only `y`/`Y` counts as yes.
pub fn confirm(question: &str) -> io::Result<bool> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    confirm_with(&mut stdin.lock(), &mut stdout, question)
}

/// [`confirm`] against arbitrary reader/writer
pub fn confirm_with<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> io::Result<bool> {
    write!(output, "{} [y/N] ", question)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

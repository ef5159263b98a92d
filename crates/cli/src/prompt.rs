//! Line-based interactive prompts for `kyle init` and `kyle config`.

use std::io::{self, BufRead, Write};

/// Asks questions on `output` and reads answers from `input`.
///
/// End of input counts as an empty answer, so every question falls back to
/// its default instead of looping.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Free-form answer; `default` is shown in brackets and returned for an
    /// empty answer.
    pub fn ask(&mut self, question: &str, default: Option<&str>) -> io::Result<String> {
        match default {
            Some(default) => write!(self.output, "  {question} [{default}]: ")?,
            None => write!(self.output, "  {question}: ")?,
        }
        let answer = self.read_answer()?;

        Ok(match default {
            Some(default) if answer.is_empty() => default.to_string(),
            _ => answer,
        })
    }

    pub fn confirm(&mut self, question: &str, default_yes: bool) -> io::Result<bool> {
        let hint = if default_yes { "Y/n" } else { "y/N" };
        write!(self.output, "  {question} [{hint}]: ")?;
        let answer = self.read_answer()?;

        if answer.is_empty() {
            return Ok(default_yes);
        }
        Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
    }

    pub fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    fn read_answer(&mut self) -> io::Result<String> {
        self.output.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}

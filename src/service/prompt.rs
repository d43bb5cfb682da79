use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};

/// Line-oriented interaction with the human operator
pub trait Prompter {
    /// Show a line to the operator
    fn say(&mut self, line: &str) -> Result<()>;

    /// Show `question` and block until the operator enters a line; the newline is stripped
    fn ask(&mut self, question: &str) -> Result<String>;
}

/// Prompter over any reader/writer pair
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// Prompter bound to the process's stdin and stdout
pub type ConsolePrompter = LinePrompter<std::io::StdinLock<'static>, std::io::Stdout>;

impl ConsolePrompter {
    pub fn console() -> Self {
        LinePrompter::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{}", line).context("Failed to write to console")?;
        Ok(())
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question).context("Failed to write to console")?;
        self.output.flush().context("Failed to write to console")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from console")?;
        if read == 0 {
            bail!("Input closed while waiting for an answer");
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

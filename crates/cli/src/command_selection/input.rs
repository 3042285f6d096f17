use std::io::{stdin, stdout, BufRead, StdinLock, Stdout, Write};

use cmd_tags_core::error::Result;
use cmd_tags_core::selection::ChoicePresenter;
use is_terminal::IsTerminal;
use log::debug;

use super::ui::write_menu;

/// Shows numbered menus on a writer and reads one line of input per menu.
pub struct TerminalPresenter<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    colored: bool,
}

impl TerminalPresenter<StdinLock<'static>, Stdout> {
    /// Presenter on stdin and stdout, colored when stdout is a terminal.
    #[must_use]
    pub fn stdio() -> Self {
        let colored = stdout().is_terminal();
        Self::new(stdin().lock(), stdout(), colored)
    }
}

impl<R: BufRead, W: Write> TerminalPresenter<R, W> {
    pub fn new(reader: R, writer: W, colored: bool) -> Self {
        Self {
            reader,
            writer,
            colored,
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> ChoicePresenter for TerminalPresenter<R, W> {
    fn present_choices(&mut self, heading: &str, labels: &[String]) -> Result<String> {
        write_menu(&mut self.writer, heading, labels, self.colored)?;

        // End of input reads as an empty answer, which cancels
        let mut input = String::new();
        let read = self.reader.read_line(&mut input)?;
        if read == 0 {
            debug!("Input closed while waiting for a choice");
            writeln!(self.writer)?;
        }

        Ok(input.trim().to_string())
    }
}

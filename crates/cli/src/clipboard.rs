//! Clipboard support using OSC 52 escape sequences
//!
//! OSC 52 asks the terminal emulator to place text on the system clipboard.
//! It works over SSH and inside terminal multiplexers, and needs no platform
//! clipboard libraries. The format is `\x1b]52;c;<base64 content>\x07`.

use std::io::{self, Stderr, Write};

use base64::{engine::general_purpose::STANDARD, Engine};
use cmd_tags_core::clipboard::Clipboard;
use cmd_tags_core::error::{Error, Result};
use is_terminal::IsTerminal;
use log::debug;

/// Builds the escape sequence that copies `text`.
#[must_use]
pub fn osc52_sequence(text: &str) -> String {
    let encoded = STANDARD.encode(text);

    // BEL terminator, which more terminals accept than ST (\x1b\\)
    format!("\x1b]52;c;{encoded}\x07")
}

/// Writes OSC 52 sequences to a terminal stream.
pub struct Osc52Clipboard<W: Write> {
    writer: W,
    is_terminal: bool,
}

impl Osc52Clipboard<Stderr> {
    /// Uses stderr so that copying does not interfere with piped stdout.
    #[must_use]
    pub fn stderr() -> Self {
        let stderr = io::stderr();
        let is_terminal = stderr.is_terminal();
        Self::new(stderr, is_terminal)
    }
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(writer: W, is_terminal: bool) -> Self {
        Self {
            writer,
            is_terminal,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn set_text(&mut self, text: &str) -> Result<()> {
        if !self.is_terminal {
            return Err(Error::Clipboard(
                "stderr is not attached to a terminal".to_string(),
            ));
        }

        debug!("Copying {} byte(s) with OSC 52", text.len());

        self.writer
            .write_all(osc52_sequence(text).as_bytes())
            .and_then(|()| self.writer.flush())
            .map_err(|e| Error::Clipboard(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_format() {
        assert_eq!(
            osc52_sequence("git status"),
            "\x1b]52;c;Z2l0IHN0YXR1cw==\x07"
        );
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(osc52_sequence(""), "\x1b]52;c;\x07");
    }

    #[test]
    fn test_writes_to_terminal() {
        let mut clipboard = Osc52Clipboard::new(Vec::new(), true);
        clipboard.set_text("git status").unwrap();

        let written = String::from_utf8(clipboard.into_inner()).unwrap();
        assert_eq!(written, osc52_sequence("git status"));
    }

    #[test]
    fn test_not_a_terminal_is_an_error() {
        let mut clipboard = Osc52Clipboard::new(Vec::new(), false);
        let result = clipboard.set_text("git status");

        assert!(matches!(result, Err(Error::Clipboard(_))));
        assert!(clipboard.into_inner().is_empty());
    }
}

use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

use log::{debug, info};

use crate::error::{Error, Result};

/// Lets the user rewrite a piece of text interactively.
pub trait TextEditor {
    /// Returns the edited text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EditorAborted`] if the edit did not complete.
    fn edit_text(&mut self, initial: &str) -> Result<String>;
}

/// Runs an external editor on a temporary file and blocks until it exits.
///
/// The editor command is a program optionally followed by arguments, such as
/// `vim` or `code --wait`; the temporary file path is appended last.
#[derive(Clone, Debug)]
pub struct ExternalEditor {
    command: String,
}

impl ExternalEditor {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    fn build_command(&self) -> Result<Command> {
        let mut parts = self.command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| Error::EditorAborted("no editor command configured".to_string()))?;

        let mut command = Command::new(program);
        command.args(parts);
        Ok(command)
    }
}

impl TextEditor for ExternalEditor {
    fn edit_text(&mut self, initial: &str) -> Result<String> {
        let mut temp_file = tempfile::Builder::new()
            .prefix("cmd-tags-")
            .suffix(".sh")
            .tempfile()?;
        temp_file.write_all(initial.as_bytes())?;
        temp_file.flush()?;

        // The handle is closed here; the file is removed when `temp_path` drops.
        let temp_path = temp_file.into_temp_path();

        let mut command = self.build_command()?;
        command
            .arg(temp_path.as_os_str())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        info!("Opening editor `{}` on `{}`", self.command, temp_path.display());

        let status = command
            .status()
            .map_err(|e| Error::EditorAborted(format!("could not start `{}`: {e}", self.command)))?;

        if !status.success() {
            return Err(Error::EditorAborted(format!(
                "`{}` exited with {status}",
                self.command
            )));
        }

        let edited = fs::read_to_string(&*temp_path).map_err(|e| {
            Error::io_error(
                "edited command".to_string(),
                temp_path.display().to_string(),
                e,
            )
        })?;

        debug!("Editor returned {} byte(s)", edited.len());
        Ok(edited)
    }
}

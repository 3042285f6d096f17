use crate::error::Result;

/// Destination for copied commands.
pub trait Clipboard {
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Clipboard`] if the text could not be
    /// handed to the system clipboard.
    fn set_text(&mut self, text: &str) -> Result<()>;
}

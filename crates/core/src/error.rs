use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("The commands file at `{}` is corrupt and was left untouched: {}", .path, .original)]
    CorruptStore {
        path: String,
        original: serde_yaml::Error,
    },

    #[error("Error writing commands file at `{}`: {}", .path, .original)]
    Serialize {
        path: String,
        original: serde_yaml::Error,
    },

    #[error("Error reading settings file at `{}`: {}", .path, .original)]
    Settings {
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("The commands file at `{}` is in use by another process.", .0)]
    StoreLocked(String),

    #[error("Tag not found: `{}`", .0)]
    TagNotFound(String),

    #[error("Invalid selection `{}`: choose a number from 1 to {}", .input, .count)]
    InvalidSelection { input: String, count: usize },

    #[error("Selection cancelled.")]
    SelectionCancelled,

    #[error("No commands found.")]
    EmptyStore,

    #[error("Editing was aborted, nothing was changed: {}", .0)]
    EditorAborted(String),

    #[error("Could not copy to clipboard: {}", .0)]
    Clipboard(String),

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),
}

impl Error {
    pub fn corrupt_store(path: String, original: serde_yaml::Error) -> Self {
        Self::CorruptStore { path, original }
    }

    pub fn invalid_selection(input: &str, count: usize) -> Self {
        Self::InvalidSelection {
            input: input.to_string(),
            count,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }
}

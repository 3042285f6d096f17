//! Configuration path utilities for cmd-tags.
//!
//! Paths are resolved from command-line arguments first, then the optional
//! settings file, then built-in defaults. Shell expansions like `~` are
//! applied to every path.

use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Default path for the commands file
const DEFAULT_STORE_PATH: &str = "~/.cmd-tags/commands.yml";
/// Default path for the optional settings file
const DEFAULT_SETTINGS_PATH: &str = "~/.cmd-tags/config.yml";

/// Editor used when nothing else is configured
pub const DEFAULT_EDITOR: &str = "vi";

/// Contents of the settings file. Every key is optional.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub store_path: Option<String>,
    pub editor: Option<String>,
}

fn expand(path: &str) -> String {
    shellexpand::tilde(path).to_string()
}

/// Resolves the settings file path.
///
/// # Examples
///
/// ```
/// use cmd_tags_core::config::get_settings_path;
///
/// let custom_path = get_settings_path(&Some("/path/to/config.yml".to_string()));
/// assert_eq!(custom_path, "/path/to/config.yml");
/// ```
pub fn get_settings_path(settings_path_arg: &Option<String>) -> String {
    expand(settings_path_arg.as_deref().unwrap_or(DEFAULT_SETTINGS_PATH))
}

/// Reads the settings file. A missing file yields default settings.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or is not valid
/// settings YAML.
pub fn load_settings(settings_path: &str) -> Result<Settings> {
    if !Path::new(settings_path).exists() {
        debug!("No settings file at `{settings_path}`");
        return Ok(Settings::default());
    }

    let contents = fs::read_to_string(settings_path).map_err(|e| {
        Error::io_error("settings".to_string(), settings_path.to_string(), e)
    })?;

    if contents.trim().is_empty() {
        return Ok(Settings::default());
    }

    serde_yaml::from_str(&contents).map_err(|e| Error::Settings {
        path: settings_path.to_string(),
        original: e,
    })
}

/// Resolves the commands file path.
///
/// Precedence: the command-line argument, then `store_path` from the settings
/// file, then `~/.cmd-tags/commands.yml`.
pub fn get_store_path(store_path_arg: &Option<String>, settings: &Settings) -> String {
    let store_path = store_path_arg
        .as_deref()
        .or(settings.store_path.as_deref())
        .unwrap_or(DEFAULT_STORE_PATH);

    expand(store_path)
}

/// Resolves the editor command.
///
/// Precedence: the command-line argument, then `editor` from the settings
/// file, then `$VISUAL`, then `$EDITOR`, then [`DEFAULT_EDITOR`]. Blank values
/// are skipped. `lookup_env` is normally `|key| std::env::var(key).ok()`.
pub fn get_editor_command(
    editor_arg: &Option<String>,
    settings: &Settings,
    lookup_env: impl Fn(&str) -> Option<String>,
) -> String {
    [editor_arg.clone(), settings.editor.clone()]
        .into_iter()
        .chain(["VISUAL", "EDITOR"].into_iter().map(|key| lookup_env(key)))
        .flatten()
        .find(|editor| !editor.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string())
}

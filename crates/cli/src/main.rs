use std::env;
use std::io::{stdout, Write};
use std::process::ExitCode;

use clap::Parser;
use is_terminal::IsTerminal;
use itertools::Itertools;
use log::{debug, info};

use cmd_tags_cli::cli_args::{Args, Target, Verb};
use cmd_tags_cli::clipboard::Osc52Clipboard;
use cmd_tags_cli::command_selection::{
    write_added, write_edit_outcome, write_groups, TerminalPresenter,
};
use cmd_tags_core::config::{self, Settings};
use cmd_tags_core::editor::ExternalEditor;
use cmd_tags_core::error::{Error, Result};
use cmd_tags_core::file_handling::StoreFile;
use cmd_tags_core::operations;
use cmd_tags_core::search::SearchOptions;
use cmd_tags_core::store::Store;

/// Resolve the settings file and the commands file location
fn initialize_config(args: &Args) -> Result<(Settings, StoreFile)> {
    let settings_path = config::get_settings_path(&args.config_path);
    debug!("Settings path: `{}`", settings_path);
    let settings = config::load_settings(&settings_path)?;

    let store_path = config::get_store_path(&args.store_path, &settings);
    debug!("Commands path: `{}`", store_path);

    Ok((settings, StoreFile::new(store_path)))
}

fn run_verb(
    verb: Verb,
    editor_arg: &Option<String>,
    settings: &Settings,
    store: &mut Store,
    store_file: &StoreFile,
) -> Result<()> {
    let mut stdout = stdout();
    let colored = stdout.is_terminal();

    match verb {
        Verb::Add {
            tag,
            command,
            description,
        } => {
            let entry =
                operations::add(store, store_file, &tag, &command, description.as_deref())?;
            write_added(&mut stdout, &tag, entry, colored)
        }
        Verb::Copy(Target { tag, index }) => {
            let mut presenter = TerminalPresenter::stdio();
            let mut clipboard = Osc52Clipboard::stderr();
            let copied = operations::copy(
                store,
                tag.as_deref(),
                index,
                &mut presenter,
                &mut clipboard,
            )?;
            writeln!(stdout, "Copied to clipboard: {copied}")?;
            Ok(())
        }
        Verb::Edit(Target { tag, index }) => {
            let editor_command =
                config::get_editor_command(editor_arg, settings, |key| env::var(key).ok());
            let mut editor = ExternalEditor::new(editor_command);
            let mut presenter = TerminalPresenter::stdio();
            let outcome = operations::edit(
                store,
                store_file,
                tag.as_deref(),
                index,
                &mut presenter,
                &mut editor,
            )?;
            write_edit_outcome(&mut stdout, &outcome, colored)
        }
        Verb::Remove(Target { tag, index }) => {
            let mut presenter = TerminalPresenter::stdio();
            let (tag, removed) =
                operations::remove(store, store_file, tag.as_deref(), index, &mut presenter)?;
            writeln!(stdout, "Removed from {tag}: {}", removed.command)?;
            if !store.contains_tag(&tag) {
                writeln!(stdout, "Tag `{tag}` has no commands left and was removed.")?;
            }
            Ok(())
        }
        Verb::Search { terms, all, fuzzy } => {
            debug!("Searching for {}", terms.iter().join(", "));
            let options = SearchOptions {
                match_all: all,
                fuzzy,
            };
            let groups = operations::search(store, &terms, options);
            if groups.is_empty() {
                writeln!(stdout, "No matching commands.")?;
                return Ok(());
            }
            write_groups(&mut stdout, groups.into_iter(), colored)
        }
        Verb::List { tag } => {
            let groups = operations::list(store, tag.as_deref())?;
            write_groups(&mut stdout, groups, colored)
        }
    }
}

fn execute() -> Result<()> {
    let args = Args::parse();

    let (settings, store_file) = initialize_config(&args)?;

    // Held until the verb has finished saving
    let _lock = store_file.lock(args.verb.lock_mode())?;
    let mut store = store_file.load()?;

    info!(
        "Loaded {} command(s) from `{}`",
        store.command_count(),
        store_file.path().display()
    );

    run_verb(
        args.verb,
        &args.editor,
        &settings,
        &mut store,
        &store_file,
    )
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::SelectionCancelled) => {
            println!("Nothing selected.");
            ExitCode::SUCCESS
        }
        Err(Error::EmptyStore) => {
            println!("No commands found.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

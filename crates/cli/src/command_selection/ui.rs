use std::fmt::Display;
use std::io::Write;

use crossterm::queue;
use crossterm::style::Color::{DarkCyan, DarkGrey, Green};
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetForegroundColor};

use cmd_tags_core::error::Result;
use cmd_tags_core::operations::EditOutcome;
use cmd_tags_core::search::TagGroup;
use cmd_tags_core::store::CommandEntry;

/// Prompt printed after a numbered menu
pub const CHOICE_PROMPT: &str = "Enter a number (q to cancel): ";

/// Pad a value to match the width of the largest value
fn pad_to_width_of<T: Display>(value: T, max_number: usize) -> String {
    let width = format!("{max_number}").len();
    format!("{:>width$}", value.to_string())
}

fn print_styled<W: Write>(
    writer: &mut W,
    text: &str,
    color: Option<Color>,
    bold: bool,
    colored: bool,
) -> Result<()> {
    if !colored {
        queue!(writer, Print(text))?;
        return Ok(());
    }

    if bold {
        queue!(writer, SetAttribute(Attribute::Bold))?;
    }

    if let Some(color) = color {
        queue!(writer, SetForegroundColor(color))?;
    }

    queue!(writer, Print(text), SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Writes one entry row: `  [n] command  # description`
fn write_entry_row<W: Write>(
    writer: &mut W,
    position: usize,
    count: usize,
    entry: &CommandEntry,
    colored: bool,
) -> Result<()> {
    let index = format!("  [{}] ", pad_to_width_of(position, count));
    print_styled(writer, &index, Some(DarkCyan), false, colored)?;
    print_styled(writer, &entry.command, None, false, colored)?;

    if let Some(description) = &entry.description {
        print_styled(writer, &format!("  # {description}"), Some(DarkGrey), false, colored)?;
    }

    queue!(writer, Print("\n"))?;
    Ok(())
}

/// Writes a numbered menu followed by the choice prompt.
pub fn write_menu<W: Write>(
    writer: &mut W,
    heading: &str,
    labels: &[String],
    colored: bool,
) -> Result<()> {
    print_styled(writer, heading, None, true, colored)?;
    queue!(writer, Print("\n"))?;

    for (i, label) in labels.iter().enumerate() {
        let index = format!("  [{}] ", pad_to_width_of(i + 1, labels.len()));
        print_styled(writer, &index, Some(DarkCyan), false, colored)?;
        queue!(writer, Print(label), Print("\n"))?;
    }

    queue!(writer, Print(CHOICE_PROMPT))?;
    writer.flush()?;
    Ok(())
}

/// Writes tag groups as they are produced. Positions shown are 1-based and
/// can be passed back with `--index`.
pub fn write_groups<'a, W: Write>(
    writer: &mut W,
    groups: impl Iterator<Item = TagGroup<'a>>,
    colored: bool,
) -> Result<()> {
    for (i, group) in groups.enumerate() {
        if i > 0 {
            queue!(writer, Print("\n"))?;
        }

        print_styled(writer, &format!("{}:", group.tag), Some(Green), true, colored)?;
        queue!(writer, Print("\n"))?;

        // Width is taken from the highest position shown so rows line up
        let widest = group.entries.last().map_or(1, |(index, _)| index + 1);
        for (index, entry) in &group.entries {
            write_entry_row(writer, index + 1, widest, entry, colored)?;
        }
    }

    writer.flush()?;
    Ok(())
}

pub fn write_added<W: Write>(
    writer: &mut W,
    tag: &str,
    entry: &CommandEntry,
    colored: bool,
) -> Result<()> {
    queue!(writer, Print("Added to "))?;
    print_styled(writer, tag, Some(Green), true, colored)?;
    queue!(writer, Print(": "), Print(&entry.command), Print("\n"))?;
    writer.flush()?;
    Ok(())
}

pub fn write_edit_outcome<W: Write>(
    writer: &mut W,
    outcome: &EditOutcome,
    colored: bool,
) -> Result<()> {
    match outcome {
        EditOutcome::Updated {
            tag,
            previous,
            command,
        } => {
            queue!(writer, Print("Updated command in "))?;
            print_styled(writer, tag, Some(Green), true, colored)?;
            queue!(writer, Print(":\n"))?;
            print_styled(writer, &format!("  - {previous}\n"), Some(DarkGrey), false, colored)?;
            queue!(writer, Print(format!("  + {command}\n")))?;
        }
        EditOutcome::Unchanged { tag, .. } => {
            queue!(writer, Print("No changes made to the command in "))?;
            print_styled(writer, tag, Some(Green), true, colored)?;
            queue!(writer, Print(".\n"))?;
        }
    }

    writer.flush()?;
    Ok(())
}

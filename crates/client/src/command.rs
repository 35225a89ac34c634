//! Line-oriented command parsing.
//!
//! One line of input maps to one [`Command`]. Leading words select the
//! command, indices are zero-based as printed by the views, and free text
//! (names, cell values) is taken verbatim from the rest of the line so it may
//! contain spaces or be empty.

use std::str::FromStr;

use sheet_core::{ColumnField, SheetStat, WeaponField};
use thiserror::Error;

/// A parsed user command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    /// Print the working sheet.
    Show,
    /// Print the statistics of the working sheet.
    Stats,
    /// List catalogs.
    Catalogs,
    /// List the sheets of the selected catalog.
    Sheets,

    AddCatalog(String),
    RenameCatalog(String),
    RemoveCatalog,
    SelectCatalog(usize),

    SelectSheet(usize),
    NewSheet(String),
    Save,
    Delete,
    Discard,

    Rename(String),
    Stat(SheetStat, String),
    Abilities(String),
    Tag(String),
    Untag(usize),

    AddColumn,
    RemoveColumn(usize),
    Column {
        field: ColumnField,
        column: usize,
        text: String,
    },

    AddWeapon,
    RemoveWeapon(usize),
    WeaponName {
        weapon: usize,
        name: String,
    },
    Weapon {
        field: WeaponField,
        weapon: usize,
        column: usize,
        text: String,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command {0:?}, type `help` for a list")]
    Unknown(String),

    #[error("missing {0}")]
    Missing(&'static str),

    #[error("invalid {what}: {value:?}")]
    Invalid { what: &'static str, value: String },
}

pub const HELP: &str = "\
Catalogs
  catalogs                          list catalogs
  catalog add <name>                create a catalog
  catalog rename <name>             rename the selected catalog
  catalog remove                    delete the selected catalog
  catalog select <i>                switch catalog
Sheets
  sheets                            list sheets of the selected catalog
  select <i>                        select a sheet
  new <name>                        create a sheet
  save | delete | discard           commit, remove or revert the selected sheet
Editing (applies to the draft)
  name <text>                       rename the sheet
  stat <skill|health|speed|model_count> <text>
  abilities <text>
  tag <text> | untag <i>
  column add | column remove <c>
  column <result_break|to_save|to_resist|hardness|enhancements> <c> <text>
  weapon add | weapon remove <w> | weapon name <w> <text>
  weapon <attacks|range|to_hit|damage|enhancements> <w> <c> <text>
Other
  show | stats | help | quit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (word, rest) = split_word(line.trim());
        let command = match word.to_ascii_lowercase().as_str() {
            "" => return Err(CommandError::Empty),
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            "show" => Self::Show,
            "stats" => Self::Stats,
            "catalogs" => Self::Catalogs,
            "sheets" => Self::Sheets,
            "catalog" => parse_catalog(rest)?,
            "select" => Self::SelectSheet(index(rest, "sheet index")?),
            "new" => Self::NewSheet(rest.to_string()),
            "save" => Self::Save,
            "delete" => Self::Delete,
            "discard" => Self::Discard,
            "name" => Self::Rename(rest.to_string()),
            "stat" => {
                let (stat, text) = split_word(rest);
                Self::Stat(field(stat, "stat")?, text.to_string())
            }
            "abilities" => Self::Abilities(rest.to_string()),
            "tag" => Self::Tag(rest.to_string()),
            "untag" => Self::Untag(index(rest, "tag index")?),
            "column" => parse_column(rest)?,
            "weapon" => parse_weapon(rest)?,
            _ => return Err(CommandError::Unknown(word.to_string())),
        };
        Ok(command)
    }
}

fn parse_catalog(rest: &str) -> Result<Command, CommandError> {
    let (action, rest) = split_word(rest);
    match action {
        "add" => Ok(Command::AddCatalog(rest.to_string())),
        "rename" => Ok(Command::RenameCatalog(rest.to_string())),
        "remove" => Ok(Command::RemoveCatalog),
        "select" => Ok(Command::SelectCatalog(index(rest, "catalog index")?)),
        "" => Err(CommandError::Missing("catalog action")),
        other => Err(CommandError::Invalid {
            what: "catalog action",
            value: other.to_string(),
        }),
    }
}

fn parse_column(rest: &str) -> Result<Command, CommandError> {
    let (action, rest) = split_word(rest);
    match action {
        "add" => Ok(Command::AddColumn),
        "remove" => Ok(Command::RemoveColumn(index(rest, "column index")?)),
        "" => Err(CommandError::Missing("column field")),
        name => {
            let (column, text) = split_word(rest);
            Ok(Command::Column {
                field: field(name, "column field")?,
                column: index(column, "column index")?,
                text: text.to_string(),
            })
        }
    }
}

fn parse_weapon(rest: &str) -> Result<Command, CommandError> {
    let (action, rest) = split_word(rest);
    match action {
        "add" => Ok(Command::AddWeapon),
        "remove" => Ok(Command::RemoveWeapon(index(rest, "weapon index")?)),
        "name" => {
            let (weapon, name) = split_word(rest);
            Ok(Command::WeaponName {
                weapon: index(weapon, "weapon index")?,
                name: name.to_string(),
            })
        }
        "" => Err(CommandError::Missing("weapon field")),
        name => {
            let (weapon, rest) = split_word(rest);
            let (column, text) = split_word(rest);
            Ok(Command::Weapon {
                field: field(name, "weapon field")?,
                weapon: index(weapon, "weapon index")?,
                column: index(column, "column index")?,
                text: text.to_string(),
            })
        }
    }
}

/// First whitespace-delimited word and the remainder with leading space removed.
fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (text, ""),
    }
}

fn index(text: &str, what: &'static str) -> Result<usize, CommandError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CommandError::Missing(what));
    }
    text.parse().map_err(|_| CommandError::Invalid {
        what,
        value: text.to_string(),
    })
}

fn field<F: FromStr>(text: &str, what: &'static str) -> Result<F, CommandError> {
    if text.is_empty() {
        return Err(CommandError::Missing(what));
    }
    text.parse().map_err(|_| CommandError::Invalid {
        what,
        value: text.to_string(),
    })
}

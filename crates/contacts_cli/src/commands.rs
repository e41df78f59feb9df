//! Parsing of interactive command lines into view events.

use contacts_core::{ContactStatus, FieldEdit, ViewEvent};

pub const HELP: &str = "\
commands:
  filter [text]          filter by first/last name (empty shows all)
  select <row>           load a grid row into the form
  deselect               clear the grid selection
  add                    start a new contact
  set <field> <value>    field: first_name | last_name | email
  company <name|->       choose a company (`-` clears)
  status <key|->         imported_lead | not_contacted | contacted | customer | closed_lost
  save | delete | close  form actions
  list                   show grid and form
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(ViewEvent),
    /// 1-based grid row.
    SelectRow(usize),
    /// Company name, resolved against the form's choices.
    Company(Option<String>),
    List,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.trim().is_empty() {
        return Ok(None);
    }

    let (name, rest) = match trimmed.split_once(' ') {
        Some((name, rest)) => (name, rest),
        None => (trimmed, ""),
    };

    let command = match name {
        // The filter text is kept exactly as typed.
        "filter" => Command::Event(ViewEvent::FilterCommitted(rest.to_string())),
        "select" => {
            let row = rest
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|row| *row > 0)
                .ok_or_else(|| format!("expected a row number, got `{}`", rest.trim()))?;
            Command::SelectRow(row)
        }
        "deselect" => Command::Event(ViewEvent::SelectionChanged(None)),
        "add" => Command::Event(ViewEvent::AddContact),
        "set" => Command::Event(ViewEvent::FieldEdited(parse_text_edit(rest)?)),
        "company" => match rest.trim() {
            "" => return Err("expected a company name or `-`".to_string()),
            "-" => Command::Company(None),
            name => Command::Company(Some(name.to_string())),
        },
        "status" => {
            let status = match rest.trim() {
                "-" => None,
                key => Some(
                    ContactStatus::from_key(key)
                        .ok_or_else(|| format!("unknown status `{key}`"))?,
                ),
            };
            Command::Event(ViewEvent::FieldEdited(FieldEdit::Status(status)))
        }
        "save" => Command::Event(ViewEvent::Save),
        "delete" => Command::Event(ViewEvent::Delete),
        "close" => Command::Event(ViewEvent::Close),
        "list" => Command::List,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command `{other}`; type `help`")),
    };
    Ok(Some(command))
}

fn parse_text_edit(rest: &str) -> Result<FieldEdit, String> {
    let (field, value) = rest.trim_start().split_once(' ').unwrap_or((rest.trim(), ""));
    let value = value.to_string();
    match field {
        "first_name" => Ok(FieldEdit::FirstName(value)),
        "last_name" => Ok(FieldEdit::LastName(value)),
        "email" => Ok(FieldEdit::Email(value)),
        other => Err(format!(
            "unknown text field `{other}`; expected first_name|last_name|email"
        )),
    }
}

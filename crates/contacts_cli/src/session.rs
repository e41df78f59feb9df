//! Interactive command loop over a [`MainView`].

use crate::commands::{parse_command, Command, HELP};
use crate::render::{render_form, render_grid, render_notifications};
use contacts_core::{ContactRepository, FieldEdit, MainView, ViewEvent};
use log::warn;
use std::io::{BufRead, Write};

/// Reads commands from `input` until `quit` or end of input.
pub fn run_session<R: ContactRepository>(
    view: &mut MainView<R>,
    input: impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    render_grid(view, out)?;
    writeln!(out, "type `help` for commands")?;

    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };

        let event = match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Command::List => {
                render_grid(view, out)?;
                render_form(view, out)?;
                continue;
            }
            Command::SelectRow(row) => match view.grid().rows().get(row - 1) {
                Some(contact) => ViewEvent::SelectionChanged(contact.id),
                None => {
                    writeln!(out, "no row {row}")?;
                    continue;
                }
            },
            Command::Company(None) => ViewEvent::FieldEdited(FieldEdit::Company(None)),
            Command::Company(Some(name)) => {
                let company = view
                    .form()
                    .companies()
                    .iter()
                    .find(|company| company.name.eq_ignore_ascii_case(&name));
                match company {
                    Some(company) => ViewEvent::FieldEdited(FieldEdit::Company(Some(company.id))),
                    None => {
                        let known = view
                            .form()
                            .companies()
                            .iter()
                            .map(|company| company.name.as_str())
                            .collect::<Vec<_>>();
                        writeln!(out, "unknown company `{name}`; known: {}", known.join(", "))?;
                        continue;
                    }
                }
            }
            Command::Event(event) => event,
        };

        let refreshes_grid = matches!(
            event,
            ViewEvent::FilterCommitted(_) | ViewEvent::Save | ViewEvent::Delete
        );
        let shows_form = !matches!(event, ViewEvent::FilterCommitted(_));
        if let Err(err) = view.handle(event) {
            warn!("event=session_command module=cli status=error error={err}");
            writeln!(out, "error: {err}")?;
            continue;
        }

        render_notifications(&view.take_notifications(), out)?;
        if refreshes_grid {
            render_grid(view, out)?;
        }
        if shows_form {
            render_form(view, out)?;
        }
    }
    Ok(())
}

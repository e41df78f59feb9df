//! Plain-text rendering of the grid, form and notifications.

use contacts_core::{ContactField, ContactRepository, MainView, Notification, NotificationKind};
use std::io::{self, Write};

pub fn render_grid<R: ContactRepository>(
    view: &MainView<R>,
    out: &mut impl Write,
) -> io::Result<()> {
    let grid = view.grid();
    let headers = grid.headers();
    let rows = grid
        .rows()
        .iter()
        .map(|contact| (contact.id, grid.render_row(contact)))
        .collect::<Vec<_>>();

    let mut widths = headers
        .iter()
        .map(|header| header.chars().count())
        .collect::<Vec<_>>();
    for (_, cells) in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write!(out, "      ")?;
    write_cells(out, headers.iter().map(|header| header.to_string()), &widths)?;
    for (index, (id, cells)) in rows.into_iter().enumerate() {
        let marker = if id.is_some() && id == grid.selected() {
            '*'
        } else {
            ' '
        };
        write!(out, "{marker}{:>4} ", index + 1)?;
        write_cells(out, cells.into_iter(), &widths)?;
    }
    if grid.rows().is_empty() {
        writeln!(out, "      (no contacts)")?;
    }
    Ok(())
}

pub fn render_form<R: ContactRepository>(
    view: &MainView<R>,
    out: &mut impl Write,
) -> io::Result<()> {
    let form = view.form();
    let title = match view.selection().contact() {
        None => "form (empty)",
        Some(contact) if contact.is_persisted() => "form (editing)",
        Some(_) => "form (new contact)",
    };
    writeln!(out, "{title}")?;
    for field in ContactField::ALL {
        write!(out, "  {:<10} {}", field.label(), form.display_value(field))?;
        match form.error_for(field) {
            Some(message) => writeln!(out, "   <- {message}")?,
            None => writeln!(out)?,
        }
    }
    Ok(())
}

pub fn render_notifications(
    notifications: &[Notification],
    out: &mut impl Write,
) -> io::Result<()> {
    for notification in notifications {
        let prefix = match notification.kind {
            NotificationKind::Success => "ok",
            NotificationKind::Error => "error",
        };
        writeln!(out, "[{prefix}] {}", notification.message)?;
    }
    Ok(())
}

fn write_cells(
    out: &mut impl Write,
    cells: impl Iterator<Item = String>,
    widths: &[usize],
) -> io::Result<()> {
    let line = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ");
    writeln!(out, "{}", line.trim_end())
}

/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Plain-text output of the views.

use crate::views::Fetch;
use crate::views::dashboard::DashboardSnapshot;
use crate::views::list::ListView;
use crate::views::search::{NO_RESULTS, SearchView};
use connector::search::SearchItem;
use connector::{RequestConfig, Resource, User};
use std::fmt::Write;

/// Left-aligned columns separated by two spaces, with a rule under the header.
pub fn table(header: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", line(header));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", line(&rule));
    for row in rows {
        let _ = writeln!(out, "{}", line(row));
    }

    out
}

pub fn list<R: Resource>(view: &ListView<R>) -> String {
    let records = match view.state() {
        Fetch::Loading => return ListView::<R>::loading_message(),
        Fetch::Failed(message) => return message.clone(),
        Fetch::Loaded(records) => records,
    };

    if records.is_empty() {
        return ListView::<R>::empty_message();
    }

    let mut header = vec!["#".to_string(), "ID".to_string()];
    header.extend(ListView::<R>::columns().map(|field| field.label.to_string()));

    let rows: Vec<Vec<String>> = view
        .rows()
        .into_iter()
        .map(|row| {
            let mut cells = vec![
                row.number.to_string(),
                row.record.id().map(|id| id.to_string()).unwrap_or_default(),
            ];
            cells.extend(row.cells);
            cells
        })
        .collect();

    table(&header, &rows).trim_end().to_string()
}

/// One `Label: value` line per field.
pub fn record<R: Resource>(record: &R) -> String {
    let mut out = String::new();

    if let Some(id) = record.id() {
        let _ = writeln!(out, "ID: {}", id);
    }

    for field in R::FIELDS.iter().chain(R::EXTRA_COLUMNS) {
        let _ = writeln!(out, "{}: {}", field.label, record.cell(field.name));
    }

    out.trim_end().to_string()
}

pub fn dashboard(snapshot: &DashboardSnapshot) -> String {
    let mut out = String::new();

    for (label, count) in snapshot.cards() {
        let _ = writeln!(out, "{:<12} {}", label, count);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Task Completion");
    for (name, percent) in snapshot.proportions() {
        let _ = writeln!(out, "{:<12} {:.0}%", name, percent);
    }

    if let Some(error) = &snapshot.error {
        let _ = writeln!(out);
        let _ = writeln!(out, "Error: {}", error);
    }

    out.trim_end().to_string()
}

pub fn search(view: &SearchView) -> String {
    match view.results() {
        Fetch::Loading => "Searching...".to_string(),
        Fetch::Failed(message) => message.clone(),
        Fetch::Loaded(items) if items.is_empty() => NO_RESULTS.to_string(),
        Fetch::Loaded(items) => search_items(items),
    }
}

fn search_items(items: &[SearchItem]) -> String {
    items
        .iter()
        .map(|item| match item.id {
            Some(id) => format!("{}: {}", id, item.name),
            None => item.name.clone(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn profile(config: &RequestConfig, user: &User) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Name: {}", user.display_name());
    let _ = writeln!(out, "Username: {}", user.username);
    let _ = writeln!(out, "Email: {}", user.email);
    let _ = writeln!(out, "Role: {}", user.role);
    if let Some(department) = &user.department {
        let _ = writeln!(out, "Department: {}", department);
    }
    if let Some(joined) = &user.joined {
        let _ = writeln!(out, "Joined: {}", joined);
    }
    if let Some(url) = crate::views::profile::avatar_url(config, user) {
        let _ = writeln!(out, "Avatar: {}", url);
    }

    out.trim_end().to_string()
}

//! Output helpers for the `tftdesc` CLI: pretty JSON and aligned tables.

use std::io::{self, Write};

use serde::Serialize;

/// Print `value` as pretty JSON on stdout.
pub fn output_json<T: Serialize>(value: &T) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let _ = serde_json::to_writer_pretty(&mut handle, value);
    let _ = writeln!(handle);
}

/// Print a table with a header row and a dashed separator.
///
/// Nothing is printed when there are no rows.
pub fn output_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let _ = handle.write_all(format_table(headers, rows).as_bytes());
}

/// Column widths count characters, not bytes, so localized text lines up.
fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let width_of = |s: &str| s.chars().count();

    let mut widths: Vec<usize> = headers.iter().map(|h| width_of(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(width_of(cell));
            }
        }
    }

    let mut out = String::new();
    let mut push_line = |cells: Vec<String>| {
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    };

    push_line(
        headers
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{:<width$}", h, width = widths[i]))
            .collect(),
    );
    push_line(widths.iter().map(|w| "-".repeat(*w)).collect());
    for row in rows {
        push_line(
            row.iter()
                .take(widths.len())
                .enumerate()
                .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
                .collect(),
        );
    }
    out
}

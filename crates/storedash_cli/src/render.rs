use std::io::{self, Write};

use storedash_core::{DashView, Store};

const HEADERS: [&str; 5] = ["ID", "STATUS", "ENGINE", "URL", "CREATED"];

/// Lays out the view as an aligned text table, rows in remote order,
/// followed by the status message when one is set.
pub fn table(view: &DashView) -> String {
    let mut out = String::new();
    if view.stores.is_empty() {
        out.push_str("(no stores)\n");
    } else {
        let rows: Vec<[String; 5]> = view.stores.iter().map(cells).collect();
        let mut widths = HEADERS.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.len());
            }
        }
        push_row(&mut out, &HEADERS.map(String::from), &widths);
        for row in &rows {
            push_row(&mut out, row, &widths);
        }
    }
    if !view.message.is_empty() {
        out.push_str(&view.message);
        out.push('\n');
    }
    out
}

/// Clears the terminal and prints the current table; `watch` calls this on
/// every published view.
pub fn redraw(view: &DashView) {
    let mut stdout = io::stdout();
    let _ = write!(stdout, "\x1b[2J\x1b[H{}", table(view));
    if view.busy {
        let _ = writeln!(stdout, "(refreshing...)");
    }
    let _ = stdout.flush();
}

fn cells(store: &Store) -> [String; 5] {
    [
        store.id.clone(),
        store.status.clone(),
        text_or_dash(store.engine.as_deref()),
        text_or_dash(store.url.as_deref()),
        if store.created_at == 0 {
            "-".to_string()
        } else {
            store.created_at.to_string()
        },
    ]
}

fn text_or_dash(value: Option<&str>) -> String {
    match value {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => "-".to_string(),
    }
}

fn push_row(out: &mut String, row: &[String; 5], widths: &[usize; 5]) {
    for (index, (cell, width)) in row.iter().zip(widths).enumerate() {
        if index > 0 {
            out.push_str("  ");
        }
        if index == row.len() - 1 {
            out.push_str(cell);
        } else {
            out.push_str(&format!("{cell:<width$}"));
        }
    }
    out.push('\n');
}

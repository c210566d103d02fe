//! Plain-text tables for terminal output.

use pb_editor::{EdgeRow, IterationTable, NodeRow};

/// Left-aligned columns separated by two spaces, with a dashed rule under
/// the header.
pub fn render(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(len),
                None => widths.push(len),
            }
        }
    }

    let mut out = padded_line(header.iter().copied(), &widths);
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');
    for row in rows {
        out.push_str(&padded_line(row.iter().map(String::as_str), &widths));
        out.push('\n');
    }
    out
}

fn padded_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(c, &w)| format!("{c:<w$}"))
        .collect();
    padded.join("  ").trim_end().to_string()
}

pub fn nodes(rows: &[NodeRow]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.name.clone(),
                r.x.to_string(),
                r.y.to_string(),
            ]
        })
        .collect();
    render(&["id", "name", "x", "y"], &cells)
}

pub fn edges(rows: &[EdgeRow]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| vec![r.from.clone(), r.to.clone(), format!("{} m", r.w)])
        .collect();
    render(&["from", "to", "w"], &cells)
}

pub fn iterations(table: &IterationTable) -> String {
    let header: Vec<&str> = table.columns.iter().map(String::as_str).collect();
    render(&header, &table.rows)
}

//! Plain-text rendering of a keyboard grid.

use unicode_width::UnicodeWidthStr;

const MIN_CELL_WIDTH: usize = 3;

/// Make whitespace and control labels visible in a terminal.
pub fn visible(label: &str) -> String {
    match label {
        " " => "␣".to_string(),
        "\n" | "\r" | "\r\n" => "⏎".to_string(),
        "\t" => "⇥".to_string(),
        _ => label
            .chars()
            .map(|c| if c.is_control() { '�' } else { c })
            .collect(),
    }
}

/// Center `label` in a cell `width` columns wide.
pub fn pad(label: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(label);
    if w >= width {
        return label.to_string();
    }
    let left = (width - w) / 2;
    let right = width - w - left;
    format!("{}{}{}", " ".repeat(left), label, " ".repeat(right))
}

/// Render rows of labels as a boxed grid, every cell the same width.
pub fn format_grid(rows: &[Vec<String>]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|l| visible(l)).collect())
        .collect();
    let width = cells
        .iter()
        .flatten()
        .map(|c| UnicodeWidthStr::width(c.as_str()))
        .max()
        .unwrap_or(0)
        .max(MIN_CELL_WIDTH);

    let mut out = String::new();
    for row in &cells {
        let line: Vec<String> = row.iter().map(|c| pad(c, width)).collect();
        out.push_str(&format!("|{}|\n", line.join("|")));
    }
    out
}

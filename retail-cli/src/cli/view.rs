//! Plain-text table rendering for view output

/// Render captions and rows as an aligned text table
pub fn render_table(captions: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = captions.iter().map(|c| c.chars().count()).collect();
    for row in rows {
        for (col, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            if col >= widths.len() {
                widths.push(len);
            } else if len > widths[col] {
                widths[col] = len;
            }
        }
    }

    let mut out = String::new();
    push_row(&mut out, captions, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    for (col, width) in widths.iter().enumerate() {
        let cell = cells.get(col).map(String::as_str).unwrap_or("");
        if col > 0 {
            out.push_str("  ");
        }
        out.push_str(&format!("{cell:<width$}"));
    }
    while out.ends_with(' ') {
        out.pop();
    }
    out.push('\n');
}

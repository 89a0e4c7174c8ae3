//! Plain aligned text tables for `--format table`.

/// Narrowest a column is ever squeezed to.
const MIN_COLUMN: usize = 6;

const GAP: &str = "  ";

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Render `rows` under `headers`, one line per row, columns padded to align.
///
/// Missing cells render as `-`. When `max_width` is set, the widest columns are
/// narrowed first and overflowing cells end in `…`.
#[must_use]
pub fn render_entity_table(
    headers: &[&str],
    rows: &[Vec<String>],
    options: TableOptions,
) -> String {
    let widths = column_widths(headers, rows, options.max_width);

    let header_line = join_cells(headers.iter().zip(&widths).map(|(header, &width)| {
        pad(&clip(header, width), width, false)
    }));
    let divider = "-".repeat(header_line.chars().count());
    let mut lines = vec![header_line, divider];

    for row in rows {
        let line = join_cells(widths.iter().enumerate().map(|(index, &width)| {
            let cell = clip(row.get(index).map_or("-", String::as_str), width);
            let right = is_numeric(&cell);
            let padded = pad(&cell, width, right);
            if options.color {
                paint(&padded, &cell)
            } else {
                padded
            }
        }));
        lines.push(line);
    }

    lines.join("\n")
}

fn column_widths(headers: &[&str], rows: &[Vec<String>], max_width: Option<usize>) -> Vec<usize> {
    let floors: Vec<usize> = headers
        .iter()
        .map(|header| header.chars().count().max(MIN_COLUMN))
        .collect();

    let mut widths: Vec<usize> = floors
        .iter()
        .enumerate()
        .map(|(index, &floor)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .fold(floor, usize::max)
        })
        .collect();

    let Some(max_width) = max_width else {
        return widths;
    };
    let gaps = widths.len().saturating_sub(1) * GAP.len();

    while widths.iter().sum::<usize>() + gaps > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(index, width)| **width > floors[*index])
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index);
        match widest {
            Some(index) => widths[index] -= 1,
            None => break,
        }
    }
    widths
}

fn join_cells(cells: impl Iterator<Item = String>) -> String {
    cells.collect::<Vec<_>>().join(GAP)
}

fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut clipped: String = value.chars().take(width.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}

fn pad(value: &str, width: usize, right: bool) -> String {
    if right {
        format!("{value:>width$}")
    } else {
        format!("{value:<width$}")
    }
}

fn is_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.chars().any(|c| c.is_ascii_digit())
        && trimmed.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-')
}

/// Wrap a padded cell in an ANSI color chosen from its content.
fn paint(padded: &str, cell: &str) -> String {
    let code = match cell.trim() {
        "true" | "no errors" => "32",
        "create_entry" | "create_asset" | "process_asset" | "fetch_asset" | "publish_asset"
        | "update_entry" | "publish_entry" => "33",
        status if status.len() == 3 && status.starts_with(['4', '5']) && is_numeric(status) => "31",
        "false" => "31",
        _ => return padded.to_string(),
    };
    format!("\u{1b}[{code}m{padded}\u{1b}[0m")
}

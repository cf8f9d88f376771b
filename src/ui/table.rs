use crate::config::TableConfig;
use crate::extractor::Row;
use console::{pad_str, style, truncate_str, Alignment};

const MAX_AUTO_WIDTH: usize = 40;

#[derive(Debug, Clone, PartialEq)]
pub struct TableColumn {
    pub header: String,
    pub width: usize,
}

impl TableColumn {
    /// Builds the columns for `fields`, using configured widths where present
    /// and sizing the rest to their content.
    pub fn for_fields(fields: &[String], config: &TableConfig, rows: &[Row]) -> Vec<TableColumn> {
        fields
            .iter()
            .enumerate()
            .map(|(index, field)| {
                let header = config.header_for(field);
                let width = match config.column_for(field) {
                    Some(column) => column.width,
                    None => rows
                        .iter()
                        .filter_map(|r| r.values.get(index))
                        .map(|v| console::measure_text_width(v))
                        .chain(std::iter::once(console::measure_text_width(&header)))
                        .max()
                        .unwrap_or(1)
                        .clamp(1, MAX_AUTO_WIDTH),
                };
                TableColumn { header, width }
            })
            .collect()
    }
}

/// Box-drawn table with a heavy header, styled per column.
pub struct TableRenderer {
    use_colors: bool,
    show_header: bool,
}

impl TableRenderer {
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            show_header: true,
        }
    }

    pub fn with_header(mut self, show: bool) -> Self {
        self.show_header = show;
        self
    }

    pub fn render(&self, columns: &[TableColumn], rows: &[Row]) -> String {
        let mut out = String::new();
        if columns.is_empty() {
            return out;
        }

        if self.show_header {
            out.push_str(&border(columns, '┏', '━', '┳', '┓'));
            let headers: Vec<String> = columns
                .iter()
                .map(|c| {
                    let cell = fit(&c.header, c.width);
                    if self.use_colors {
                        style(cell).bold().magenta().to_string()
                    } else {
                        cell
                    }
                })
                .collect();
            out.push_str(&line(&headers, '┃'));
            out.push_str(&border(columns, '┡', '━', '╇', '┩'));
        } else {
            out.push_str(&border(columns, '┌', '─', '┬', '┐'));
        }

        for row in rows {
            let cells: Vec<String> = columns
                .iter()
                .enumerate()
                .map(|(index, column)| {
                    let value = row.values.get(index).map(String::as_str).unwrap_or("");
                    self.paint(index, fit(value, column.width))
                })
                .collect();
            out.push_str(&line(&cells, '│'));
        }

        out.push_str(&border(columns, '└', '─', '┴', '┘'));
        out
    }

    fn paint(&self, column: usize, cell: String) -> String {
        if !self.use_colors {
            return cell;
        }

        match column % 3 {
            0 => style(cell).red().dim().to_string(),
            1 => style(cell).green().to_string(),
            _ => style(cell).yellow().to_string(),
        }
    }
}

/// Pads `value` to `width`, cutting it with an ellipsis only when it is wider.
fn fit(value: &str, width: usize) -> String {
    pad_str(&truncate_str(value, width, "…"), width, Alignment::Left, None).into_owned()
}

fn border(columns: &[TableColumn], left: char, fill: char, join: char, right: char) -> String {
    let segments: Vec<String> = columns
        .iter()
        .map(|c| fill.to_string().repeat(c.width + 2))
        .collect();
    format!("{}{}{}\n", left, segments.join(&join.to_string()), right)
}

fn line(cells: &[String], separator: char) -> String {
    let inner: Vec<String> = cells.iter().map(|c| format!(" {} ", c)).collect();
    format!(
        "{}{}{}\n",
        separator,
        inner.join(&separator.to_string()),
        separator
    )
}

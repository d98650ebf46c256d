use crate::cli::output;

/// Column header plus alignment; widths are computed from the content.
#[derive(Debug, Clone)]
pub struct TableColumn {
    pub header: String,
    pub align_right: bool,
}

impl TableColumn {
    pub fn left(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            align_right: false,
        }
    }

    pub fn right(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            align_right: true,
        }
    }
}

/// Simple table model used for read-only listings.
#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row<S: Into<String>>(&mut self, cells: Vec<S>) {
        self.rows
            .push(cells.into_iter().map(|value| value.into()).collect());
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(index, column)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(index))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(column.header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Renders header, rule and rows as plain padded lines.
    pub fn render_lines(&self) -> Vec<String> {
        let widths = self.widths();
        let format_row = |cells: Vec<&str>| -> String {
            cells
                .iter()
                .zip(self.columns.iter().zip(widths.iter()))
                .map(|(cell, (column, width))| {
                    if column.align_right {
                        format!("{:>width$}", cell, width = width)
                    } else {
                        format!("{:<width$}", cell, width = width)
                    }
                })
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(format_row(
            self.columns.iter().map(|c| c.header.as_str()).collect(),
        ));
        let rule_width = widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 2;
        lines.push("-".repeat(rule_width));
        for row in &self.rows {
            lines.push(format_row(row.iter().map(String::as_str).collect()));
        }
        lines
    }

    pub fn print(&self) {
        for line in self.render_lines() {
            output::info(line);
        }
    }
}

/// Horizontal placement of a cell's text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableColumn {
    pub header: String,
    pub max_width: Option<usize>,
    pub alignment: Alignment,
}

impl TableColumn {
    pub fn left(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            max_width: None,
            alignment: Alignment::Left,
        }
    }

    pub fn right(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            max_width: None,
            alignment: Alignment::Right,
        }
    }

    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }
}

/// A plain-text table. Cells may carry ANSI colour codes; widths ignore them.
pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
    /// Use `-` instead of box-drawing characters for the header rule.
    pub ascii_rule: bool,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            ascii_rule: false,
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let widest = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| visible_width(cell))
                    .fold(visible_width(&column.header), usize::max);
                column.max_width.map_or(widest, |max| widest.min(max))
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let headers: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();
        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(self.render_row(&headers, &widths));
        lines.push(rule(&widths, self.ascii_rule));
        lines.extend(self.rows.iter().map(|row| self.render_row(row, &widths)));
        lines.join("\n")
    }

    fn render_row(&self, row: &[String], widths: &[usize]) -> String {
        self.columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(idx, (column, width))| {
                let text = row.get(idx).map(String::as_str).unwrap_or("");
                pad(text, *width, column.alignment)
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    }
}

fn rule(widths: &[usize], ascii: bool) -> String {
    let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    let ch = if ascii { '-' } else { '─' };
    ch.to_string().repeat(total)
}

fn pad(text: &str, width: usize, alignment: Alignment) -> String {
    let fitted = truncate(text, width);
    let gap = " ".repeat(width.saturating_sub(visible_width(&fitted)));
    match alignment {
        Alignment::Left => format!("{fitted}{gap}"),
        Alignment::Right => format!("{gap}{fitted}"),
    }
}

/// Skips `ESC [ ... final-byte` sequences.
fn skip_ansi(bytes: &[u8], mut idx: usize) -> usize {
    idx += 1;
    if bytes.get(idx) == Some(&b'[') {
        idx += 1;
        while let Some(byte) = bytes.get(idx) {
            idx += 1;
            if (0x40..=0x7E).contains(byte) {
                break;
            }
        }
    }
    idx
}

pub fn visible_width(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut idx = 0;
    let mut width = 0;
    while idx < bytes.len() {
        if bytes[idx] == 0x1b {
            idx = skip_ansi(bytes, idx);
            continue;
        }
        match text.get(idx..).and_then(|rest| rest.chars().next()) {
            Some(ch) => {
                width += 1;
                idx += ch.len_utf8();
            }
            None => break,
        }
    }
    width
}

fn truncate(text: &str, width: usize) -> String {
    if visible_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let keep = width - 1;
    let bytes = text.as_bytes();
    let mut out = String::new();
    let mut idx = 0;
    let mut visible = 0;
    let mut styled = false;
    while idx < bytes.len() && visible < keep {
        if bytes[idx] == 0x1b {
            let end = skip_ansi(bytes, idx);
            out.push_str(&text[idx..end]);
            styled = true;
            idx = end;
            continue;
        }
        match text.get(idx..).and_then(|rest| rest.chars().next()) {
            Some(ch) => {
                out.push(ch);
                visible += 1;
                idx += ch.len_utf8();
            }
            None => break,
        }
    }
    out.push('…');
    if styled {
        out.push_str("\u{1b}[0m");
    }
    out
}

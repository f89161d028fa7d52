//! Table component for percentage breakdowns
//!
//! Renders tabular data with headers, rows, and column alignment.

use crate::action::Action;
use crate::component::Component;
use crate::model::Distribution;
use anyhow::Result;
use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Widest a column may grow before cells are truncated
const MAX_COLUMN_WIDTH: usize = 40;

/// Scrollable table
pub struct TableComponent {
    title: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    scroll: usize,
}

impl Default for TableComponent {
    fn default() -> Self {
        Self::new("Table")
    }
}

impl TableComponent {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            headers: Vec::new(),
            rows: Vec::new(),
            scroll: 0,
        }
    }

    /// Replace the table contents, keeping the scroll position in range
    pub fn set_data(&mut self, headers: Vec<String>, rows: Vec<Vec<String>>) {
        self.headers = headers;
        self.rows = rows;
        self.scroll = self.scroll.min(self.rows.len().saturating_sub(1));
    }

    /// Show a distribution as `column | percentage` rows
    pub fn set_distribution(&mut self, column: &str, dist: &Distribution) {
        let rows = dist
            .iter()
            .map(|(category, pct)| vec![category.to_string(), format!("{:.6}", pct)])
            .collect();
        self.set_data(vec![column.to_string(), "percentage".to_string()], rows);
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn render_lines(&self) -> Vec<Line<'static>> {
        Self::build_table_lines(&self.headers, &self.rows)
    }

    /// Build table lines from headers and rows
    pub fn build_table_lines(headers: &[String], rows: &[Vec<String>]) -> Vec<Line<'static>> {
        if headers.is_empty() {
            return vec![Line::from("No columns")];
        }

        let mut col_widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                if i < col_widths.len() {
                    col_widths[i] = col_widths[i].max(cell.width());
                }
            }
        }
        for width in &mut col_widths {
            *width = (*width).min(MAX_COLUMN_WIDTH);
        }

        let mut lines = Vec::new();

        let header_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        lines.push(row_line(headers, &col_widths, header_style));

        let separator: String = col_widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        lines.push(Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        )));

        if rows.is_empty() {
            lines.push(Line::from(Span::styled(
                "No matching passengers",
                Style::default().fg(Color::Yellow),
            )));
        }
        for row in rows {
            lines.push(row_line(row, &col_widths, Style::default().fg(Color::White)));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Total rows: {}", rows.len()),
            Style::default().fg(Color::Yellow),
        )));

        lines
    }
}

/// Pad or truncate each cell to its column width
fn row_line(cells: &[String], widths: &[usize], style: Style) -> Line<'static> {
    let spans: Vec<Span> = cells
        .iter()
        .enumerate()
        .flat_map(|(i, cell)| {
            let width = widths.get(i).copied().unwrap_or(10);
            vec![
                Span::styled(fit_cell(cell, width), style),
                Span::raw(" │ "),
            ]
        })
        .collect();
    Line::from(spans)
}

fn fit_cell(cell: &str, width: usize) -> String {
    if cell.width() <= width {
        return format!("{}{}", cell, " ".repeat(width - cell.width()));
    }

    let mut out = String::new();
    for c in cell.chars() {
        if out.width() + c.to_string().width() > width.saturating_sub(3) {
            break;
        }
        out.push(c);
    }
    out.push_str("...");
    out
}

impl Component for TableComponent {
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ScrollDown => {
                let max_scroll = self.rows.len().saturating_sub(1);
                if self.scroll < max_scroll {
                    self.scroll += 1;
                }
            }
            Action::ScrollUp => {
                self.scroll = self.scroll.saturating_sub(1);
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let content = self.render_lines();
        let visible_height = area.height.saturating_sub(2) as usize;
        let total = content.len();

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", self.title))
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .scroll((self.scroll as u16, 0));
        frame.render_widget(paragraph, area);

        if total > visible_height {
            let mut scrollbar_state =
                ScrollbarState::new(total.saturating_sub(visible_height)).position(self.scroll);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_distribution_rows() {
        let mut table = TableComponent::new("Ports");
        table.set_distribution(
            "Embarked",
            &vec![(Category::text("C"), 25.0), (Category::text("S"), 75.0)],
        );
        assert_eq!(
            table.rows(),
            &[
                vec!["C".to_string(), "25.000000".to_string()],
                vec!["S".to_string(), "75.000000".to_string()],
            ]
        );
    }

    #[test]
    fn test_empty_table_says_so() {
        let lines = TableComponent::build_table_lines(
            &["Embarked".to_string(), "percentage".to_string()],
            &[],
        );
        assert!(lines.iter().any(|l| line_text(l) == "No matching passengers"));
        assert_eq!(line_text(lines.last().unwrap()), "Total rows: 0");
    }

    #[test]
    fn test_columns_are_aligned() {
        let lines = TableComponent::build_table_lines(
            &["Embarked".to_string(), "percentage".to_string()],
            &[vec!["C".to_string(), "12.5".to_string()]],
        );
        assert_eq!(line_text(&lines[0]), "Embarked │ percentage │ ");
        assert_eq!(line_text(&lines[2]), "C        │ 12.5       │ ");
    }

    #[test]
    fn test_long_cells_are_truncated() {
        assert_eq!(fit_cell("abcdefghij", 6), "abc...");
        assert_eq!(fit_cell("abc", 6), "abc   ");
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut table = TableComponent::new("Ports");
        table.set_data(vec!["a".to_string()], vec![vec!["1".to_string()]; 3]);
        for _ in 0..10 {
            table.update(Action::ScrollDown).unwrap();
        }
        assert_eq!(table.scroll, 2);

        table.set_data(vec!["a".to_string()], vec![vec!["1".to_string()]]);
        assert_eq!(table.scroll, 0);
    }
}

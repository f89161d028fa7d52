//! Port filter dialog component
//!
//! Multiselect of embarkation ports driving the percentage charts.

use crate::action::Action;
use crate::component::Component;
use crate::model::Category;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use std::collections::BTreeSet;

/// Port multiselect dialog
pub struct PortFilterDialog {
    /// Ports in first-appearance order
    pub ports: Vec<Category>,
    /// Ports currently ticked
    pub checked: BTreeSet<Category>,
    pub selected_index: usize,
    pub list_state: ListState,
}

impl Default for PortFilterDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl PortFilterDialog {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            ports: Vec::new(),
            checked: BTreeSet::new(),
            selected_index: 0,
            list_state,
        }
    }

    /// Load the available ports and the active selection
    pub fn set_ports(&mut self, ports: Vec<Category>, checked: &BTreeSet<Category>) {
        self.ports = ports;
        self.checked = checked.clone();
        self.selected_index = 0;
        self.list_state.select(Some(0));
    }

    fn toggle_selected(&mut self) {
        if let Some(port) = self.ports.get(self.selected_index) {
            if !self.checked.remove(port) {
                self.checked.insert(port.clone());
            }
        }
    }

    /// Tick every port, or clear them all when every port is ticked
    fn toggle_all(&mut self) {
        if self.checked.len() == self.ports.len() {
            self.checked.clear();
        } else {
            self.checked = self.ports.iter().cloned().collect();
        }
    }

    fn select_next(&mut self) {
        if self.selected_index + 1 < self.ports.len() {
            self.selected_index += 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
        }
    }
}

impl Component for PortFilterDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('p') => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::SetPorts(self.checked.clone())),
            KeyCode::Char(' ') => {
                self.toggle_selected();
                None
            }
            KeyCode::Char('a') => {
                self.toggle_all();
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                Some(Action::ModalUp)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                Some(Action::ModalDown)
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        frame.render_widget(Clear, area);

        let popup_width = 46u16.min(area.width.saturating_sub(4));
        let popup_height = (self.ports.len() as u16 + 8)
            .max(12)
            .min(area.height.saturating_sub(4));
        let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
        let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
        let popup_area = Rect::new(x, y, popup_width, popup_height);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(3),
            ])
            .split(popup_area);

        let header = Paragraph::new(Line::from(Span::styled(
            format!("{} of {} ports selected", self.checked.len(), self.ports.len()),
            Style::default().fg(Color::Cyan),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Ports of Embarkation ")
                .title_style(
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
        );
        frame.render_widget(header, chunks[0]);

        if self.ports.is_empty() {
            let empty = Paragraph::new(Span::styled(
                "No ports in the dataset",
                Style::default().fg(Color::Yellow),
            ))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
            frame.render_widget(empty, chunks[1]);
        } else {
            let items: Vec<ListItem> = self
                .ports
                .iter()
                .map(|port| {
                    let ticked = self.checked.contains(port);
                    ListItem::new(Line::from(vec![
                        Span::styled(
                            if ticked { "[x] " } else { "[ ] " },
                            Style::default().fg(Color::Green),
                        ),
                        Span::styled(port.to_string(), Style::default().fg(Color::White)),
                    ]))
                })
                .collect();

            let list = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::DarkGray)),
                )
                .highlight_style(
                    Style::default()
                        .bg(Color::Blue)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("▶ ");
            frame.render_stateful_widget(list, chunks[1], &mut self.list_state);
        }

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Space ", Style::default().fg(Color::Cyan)),
            Span::raw("Toggle  "),
            Span::styled(" a ", Style::default().fg(Color::Cyan)),
            Span::raw("All  "),
            Span::styled(" Enter ", Style::default().fg(Color::Yellow)),
            Span::raw("Apply  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Cancel"),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(dialog: &mut PortFilterDialog, code: KeyCode) -> Option<Action> {
        dialog
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn dialog() -> PortFilterDialog {
        let ports = vec![Category::text("S"), Category::text("C"), Category::Missing];
        let checked = ports.iter().cloned().collect();
        let mut dialog = PortFilterDialog::new();
        dialog.set_ports(ports, &checked);
        dialog
    }

    #[test]
    fn test_space_toggles_highlighted_port() {
        let mut dialog = dialog();
        press(&mut dialog, KeyCode::Down);
        press(&mut dialog, KeyCode::Char(' '));

        let expected: BTreeSet<Category> =
            [Category::text("S"), Category::Missing].into_iter().collect();
        assert_eq!(press(&mut dialog, KeyCode::Enter), Some(Action::SetPorts(expected)));
    }

    #[test]
    fn test_toggle_all() {
        let mut dialog = dialog();
        press(&mut dialog, KeyCode::Char('a'));
        assert!(dialog.checked.is_empty());
        assert_eq!(
            press(&mut dialog, KeyCode::Enter),
            Some(Action::SetPorts(BTreeSet::new()))
        );

        press(&mut dialog, KeyCode::Char('a'));
        assert_eq!(dialog.checked.len(), 3);
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let mut dialog = dialog();
        press(&mut dialog, KeyCode::Up);
        assert_eq!(dialog.selected_index, 0);
        for _ in 0..5 {
            press(&mut dialog, KeyCode::Down);
        }
        assert_eq!(dialog.selected_index, 2);
        assert_eq!(press(&mut dialog, KeyCode::Esc), Some(Action::CloseModal));
    }
}

//! Port select dialog component
//!
//! Picks the single port whose class and sex make-up is shown.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::Category;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Single port selector
pub struct PortSelectDialog {
    pub ports: Vec<Category>,
    /// Port currently driving the pies
    pub current: Option<Category>,
    pub selected_index: usize,
    pub list_state: ListState,
}

impl Default for PortSelectDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl PortSelectDialog {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            ports: Vec::new(),
            current: None,
            selected_index: 0,
            list_state,
        }
    }

    /// Load the available ports, highlighting the active one
    pub fn set_ports(&mut self, ports: Vec<Category>, current: Option<&Category>) {
        self.selected_index = current
            .and_then(|c| ports.iter().position(|p| p == c))
            .unwrap_or(0);
        self.current = current.cloned();
        self.ports = ports;
        self.list_state.select(Some(self.selected_index));
    }

    pub fn get_selected_port(&self) -> Option<&Category> {
        self.ports.get(self.selected_index)
    }
}

impl Component for PortSelectDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('o') => Some(Action::CloseModal),
            KeyCode::Enter => match self.get_selected_port() {
                Some(port) => Some(Action::SetPort(port.clone())),
                None => Some(Action::CloseModal),
            },
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected_index > 0 {
                    self.selected_index -= 1;
                    self.list_state.select(Some(self.selected_index));
                }
                Some(Action::ModalUp)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_index + 1 < self.ports.len() {
                    self.selected_index += 1;
                    self.list_state.select(Some(self.selected_index));
                }
                Some(Action::ModalDown)
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 40, (self.ports.len() as u16 + 6).max(9));
        frame.render_widget(Clear, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(popup_area);

        let items: Vec<ListItem> = self
            .ports
            .iter()
            .map(|port| {
                let is_current = self.current.as_ref() == Some(port);
                ListItem::new(Line::from(vec![
                    Span::styled(
                        if is_current { "● " } else { "  " },
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
                    .title(" Port of Embarkation ")
                    .title_style(
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, chunks[0], &mut self.list_state);

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Yellow)),
            Span::raw("Select  "),
            Span::styled(" j/k ", Style::default().fg(Color::Cyan)),
            Span::raw("Navigate  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Cancel"),
        ]))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[1]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(dialog: &mut PortSelectDialog, code: KeyCode) -> Option<Action> {
        dialog
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    #[test]
    fn test_opens_on_current_port() {
        let mut dialog = PortSelectDialog::new();
        let ports = vec![Category::text("S"), Category::text("C"), Category::text("Q")];
        dialog.set_ports(ports, Some(&Category::text("C")));
        assert_eq!(dialog.selected_index, 1);

        press(&mut dialog, KeyCode::Down);
        assert_eq!(
            press(&mut dialog, KeyCode::Enter),
            Some(Action::SetPort(Category::text("Q")))
        );
    }

    #[test]
    fn test_empty_list_closes() {
        let mut dialog = PortSelectDialog::new();
        dialog.set_ports(Vec::new(), None);
        assert_eq!(press(&mut dialog, KeyCode::Enter), Some(Action::CloseModal));
    }
}

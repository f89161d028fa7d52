//! Splash screen component
//!
//! Shows the title image briefly before transitioning to the dashboard.

use crate::action::Action;
use crate::component::Component;
use crate::components::TitleComponent;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

/// Splash screen component
pub struct SplashComponent {
    title: TitleComponent,
    /// When the splash screen was shown
    start_time: Option<Instant>,
    /// Duration to show splash before auto-advancing
    duration: Duration,
    passengers: usize,
}

impl SplashComponent {
    pub fn new(title: TitleComponent, passengers: usize) -> Self {
        Self {
            title,
            start_time: None,
            duration: Duration::from_millis(1500),
            passengers,
        }
    }

    /// Check if splash duration has elapsed
    pub fn is_complete(&self) -> bool {
        self.start_time
            .map(|t| t.elapsed() >= self.duration)
            .unwrap_or(false)
    }
}

impl Component for SplashComponent {
    fn init(&mut self) -> Result<()> {
        self.start_time = Some(Instant::now());
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Any key press skips the splash screen
        match key.code {
            KeyCode::Char('q') => Ok(Some(Action::ForceQuit)),
            _ => Ok(Some(Action::SplashComplete)),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action == Action::Tick && self.is_complete() {
            return Ok(Some(Action::SplashComplete));
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let background = Color::Rgb(0, 0, 0);
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(Style::default().bg(background)), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(60),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        self.title.draw(frame, chunks[1])?;

        let title = Line::from(vec![
            Span::styled(
                "titanic",
                Style::default()
                    .fg(Color::Rgb(0, 139, 139))
                    .bg(background)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "-tui",
                Style::default()
                    .fg(Color::White)
                    .bg(background)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(
            Paragraph::new(title).alignment(Alignment::Center),
            chunks[3],
        );

        let subtitle = Line::from(Span::styled(
            format!("Exploring {} passengers of the RMS Titanic", self.passengers),
            Style::default().fg(Color::DarkGray).bg(background),
        ));
        frame.render_widget(
            Paragraph::new(subtitle).alignment(Alignment::Center),
            chunks[4],
        );

        Ok(())
    }
}

//! Dashboard component - Main application screen
//!
//! Displays the section tabs, the charts for the active section, the input
//! widgets that drive them, and the status/help bars. Owns navigation and
//! text-editing state; the inputs themselves live on the App.

use crate::action::Action;
use crate::component::Component;
use crate::components::charts::{
    render_box_plot, render_count_chart, render_grouped_chart, render_percent_chart,
    render_pie_chart, series_color, BarSeriesGroup,
};
use crate::components::layout::columns;
use crate::components::{calculate_main_layout, TableComponent, TitleComponent};
use crate::model::dashboard::AGE_DOMAIN;
use crate::model::ui::{InputField, Tab};
use crate::model::{AgeBin, AgeSection, Category, DashboardData, DashboardInputs, RangeHandle};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};
use std::collections::BTreeSet;

// ═══════════════════════════════════════════════════════════════════════════════
// Dashboard Component
// ═══════════════════════════════════════════════════════════════════════════════

pub struct DashboardComponent {
    pub active_tab: Tab,

    /// Field being edited and its pending text
    pub editing: Option<(InputField, String)>,

    /// Which age slider handle the arrow keys move
    pub range_handle: RangeHandle,

    /// Embarked percentages for the sex filter
    pub sex_table: TableComponent,
}

impl Default for DashboardComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardComponent {
    pub fn new() -> Self {
        Self {
            active_tab: Tab::Overview,
            editing: None,
            range_handle: RangeHandle::Low,
            sex_table: TableComponent::new("Embarked by sex"),
        }
    }

    /// Begin editing a field, seeded with its current text
    pub fn start_edit(&mut self, field: InputField, current: String) {
        self.active_tab = match field {
            InputField::MinAge => Tab::Ages,
            InputField::Sex => Tab::Sex,
        };
        self.editing = Some((field, current));
    }

    /// Finish editing, handing back the field and its text
    pub fn take_edit(&mut self) -> Option<(InputField, String)> {
        self.editing.take()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    fn edit_keys(key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => Some(Action::CancelEdit),
            KeyCode::Enter => Some(Action::CommitEdit),
            KeyCode::Backspace => Some(Action::EditBackspace),
            KeyCode::Char(c) => Some(Action::EditInput(c)),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for DashboardComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::ForceQuit));
        }
        if self.is_editing() {
            return Ok(Self::edit_keys(key));
        }

        let step = if key.modifiers.contains(KeyModifiers::SHIFT) { 5 } else { 1 };
        let action = match key.code {
            // Navigation
            KeyCode::Tab => Some(Action::NextTab),
            KeyCode::BackTab => Some(Action::PrevTab),
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                Tab::all().get(index).copied().map(Action::SelectTab)
            }
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),

            // Modals
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('p') => Some(Action::OpenPortFilter),
            KeyCode::Char('o') => Some(Action::OpenPortSelect),

            // Inputs
            KeyCode::Char('a') => Some(Action::StartEdit(InputField::MinAge)),
            KeyCode::Char('x') => Some(Action::StartEdit(InputField::Sex)),
            KeyCode::Char('f') => Some(Action::ToggleRangeHandle),
            KeyCode::Left | KeyCode::Char('h') => Some(Action::MoveRangeHandle(-step)),
            KeyCode::Right | KeyCode::Char('l') => Some(Action::MoveRangeHandle(step)),
            KeyCode::Char('H') => Some(Action::MoveRangeHandle(-5)),
            KeyCode::Char('L') => Some(Action::MoveRangeHandle(5)),
            KeyCode::Char('r') => Some(Action::ResetInputs),

            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::NextTab => self.active_tab = self.active_tab.next(),
            Action::PrevTab => self.active_tab = self.active_tab.previous(),
            Action::SelectTab(tab) => self.active_tab = tab,
            Action::ScrollDown | Action::ScrollUp => {
                return self.sex_table.update(action);
            }
            Action::ToggleRangeHandle => {
                self.active_tab = Tab::Ages;
                self.range_handle = self.range_handle.other();
            }
            Action::EditInput(c) => {
                if let Some((field, text)) = self.editing.as_mut() {
                    if field.accepts(c) {
                        text.push(c);
                    }
                }
            }
            Action::EditBackspace => {
                if let Some((_, text)) = self.editing.as_mut() {
                    text.pop();
                }
            }
            Action::CancelEdit => self.editing = None,
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing is done through draw_dashboard_screen which takes full context
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Chart Series
// ═══════════════════════════════════════════════════════════════════════════════

/// Regroup pair counts as bars per first key, one series per second key
pub fn pair_groups(pairs: &[((Category, Category), usize)]) -> (Vec<String>, Vec<BarSeriesGroup>) {
    let series: Vec<Category> = pairs
        .iter()
        .map(|((_, second), _)| second.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let firsts: Vec<Category> = pairs
        .iter()
        .map(|((first, _), _)| first.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let groups = firsts
        .iter()
        .map(|first| BarSeriesGroup {
            label: first.to_string(),
            values: series
                .iter()
                .map(|second| {
                    pairs
                        .iter()
                        .find(|((f, s), _)| f == first && s == second)
                        .map(|(_, count)| *count as u64)
                        .unwrap_or(0)
                })
                .collect(),
        })
        .collect();

    (series.iter().map(|s| s.to_string()).collect(), groups)
}

/// Survivor histogram bars, one series per group
pub fn age_bin_groups(bins: &[AgeBin]) -> (Vec<String>, Vec<BarSeriesGroup>) {
    let series = bins
        .first()
        .map(|bin| bin.survivors.iter().map(|(g, _)| g.to_string()).collect())
        .unwrap_or_default();
    let groups = bins
        .iter()
        .map(|bin| BarSeriesGroup {
            label: bin.label(),
            values: bin.survivors.iter().map(|(_, n)| *n as u64).collect(),
        })
        .collect();
    (series, groups)
}

/// Text track for the age range slider, `width` cells across [`AGE_DOMAIN`]
pub fn slider_track(range: (f64, f64), width: usize) -> String {
    if width < 2 {
        return String::new();
    }
    let span = AGE_DOMAIN.1 - AGE_DOMAIN.0;
    let cell = |v: f64| {
        let ratio = ((v - AGE_DOMAIN.0) / span).clamp(0.0, 1.0);
        (ratio * (width - 1) as f64).round() as usize
    };
    let (lo, hi) = (cell(range.0), cell(range.1));
    (0..width)
        .map(|i| {
            if i == lo || i == hi {
                '●'
            } else if i > lo && i < hi {
                '━'
            } else {
                '─'
            }
        })
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

/// Context needed for rendering the dashboard
pub struct DashboardRenderContext<'a> {
    pub data: &'a DashboardData,
    pub inputs: &'a DashboardInputs,
    /// Where the passengers were loaded from
    pub data_source: &'a str,
    pub status_message: Option<&'a str>,
}

/// Draw the dashboard screen
pub fn draw_dashboard_screen(
    frame: &mut Frame,
    area: Rect,
    dashboard: &mut DashboardComponent,
    title: Option<&mut TitleComponent>,
    ctx: &DashboardRenderContext,
) -> Result<()> {
    let layout = calculate_main_layout(area, ctx.status_message.is_some());

    render_tabs(frame, layout.tabs, dashboard);
    match dashboard.active_tab {
        Tab::Overview => render_overview(frame, layout.content, title, ctx)?,
        Tab::Ports => render_ports(frame, layout.content, ctx),
        Tab::PortDive => render_port_dive(frame, layout.content, ctx),
        Tab::Ages => render_ages(frame, layout.content, dashboard, ctx),
        Tab::Sex => render_sex(frame, layout.content, dashboard, ctx)?,
    }

    if let Some(status_area) = layout.status {
        render_status_bar(frame, status_area, ctx);
    }
    render_help_bar(frame, layout.help, dashboard);

    Ok(())
}

fn render_tabs(frame: &mut Frame, area: Rect, dashboard: &DashboardComponent) {
    let titles: Vec<String> = Tab::all()
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{} {}", i + 1, t.name()))
        .collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::BOTTOM))
        .select(dashboard.active_tab.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

fn render_overview(
    frame: &mut Frame,
    area: Rect,
    title: Option<&mut TitleComponent>,
    ctx: &DashboardRenderContext,
) -> Result<()> {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);
    let top = columns(rows[0], 2);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[1]);

    match title {
        Some(title) => title.draw(frame, top[0])?,
        None => frame.render_widget(
            Paragraph::new(Span::styled(
                "(no title image)",
                Style::default().fg(Color::DarkGray),
            ))
            .block(Block::default().borders(Borders::ALL)),
            top[0],
        ),
    }

    let blurb = vec![
        Line::from(Span::styled(
            "Titanic passengers",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "{} passengers loaded from {}.",
            ctx.data.total, ctx.data_source
        )),
        Line::from(""),
        Line::from(
            "Who embarked where, who survived, and how age and sex shaped \
             the passenger list. Use Tab or 1-5 to move between sections.",
        ),
    ];
    frame.render_widget(
        Paragraph::new(blurb)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            ),
        top[1],
    );

    render_count_chart(frame, bottom[0], "Passengers by sex", &ctx.data.sex_counts);
    let (series, groups) = age_bin_groups(&ctx.data.survival_by_age);
    render_grouped_chart(frame, bottom[1], "Survivors by age", &series, &groups);
    Ok(())
}

fn render_ports(frame: &mut Frame, area: Rect, ctx: &DashboardRenderContext) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let selected: Vec<String> = ctx.inputs.ports.iter().map(|p| p.to_string()).collect();
    let header = Line::from(vec![
        Span::styled("Ports: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            if selected.is_empty() {
                "(none)".to_string()
            } else {
                selected.join(", ")
            },
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("  ({} passengers)", ctx.data.selected_count),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(header).block(Block::default().borders(Borders::ALL).title(" p: choose ")),
        rows[0],
    );

    let charts = columns(rows[1], 3);
    render_percent_chart(frame, charts[0], "Embarked (%)", &ctx.data.embarked);
    render_percent_chart(frame, charts[1], "Survived (%)", &ctx.data.embarked_survived);
    render_percent_chart(frame, charts[2], "Died (%)", &ctx.data.embarked_died);
}

fn render_port_dive(frame: &mut Frame, area: Rect, ctx: &DashboardRenderContext) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let port = ctx
        .inputs
        .port
        .as_ref()
        .map(|p| p.to_string())
        .unwrap_or_else(|| "(none)".to_string());
    let header = Line::from(vec![
        Span::styled("Port: ", Style::default().fg(Color::DarkGray)),
        Span::styled(port, Style::default().fg(Color::Cyan)),
        Span::styled(
            format!("  ({} passengers)", ctx.data.port_count),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(header).block(Block::default().borders(Borders::ALL).title(" o: choose ")),
        rows[0],
    );

    let charts = columns(rows[1], 2);
    render_pie_chart(frame, charts[0], "Class", &ctx.data.port_classes);
    render_pie_chart(frame, charts[1], "Sex", &ctx.data.port_sexes);
}

fn render_age_section(frame: &mut Frame, area: Rect, section: &AgeSection) {
    let charts = columns(area, 2);
    render_box_plot(frame, charts[0], "Age by port", &section.age_boxes);
    let (series, groups) = pair_groups(&section.sex_by_port);
    render_grouped_chart(frame, charts[1], "Sex by port", &series, &groups);
}

fn input_line<'a>(
    field: InputField,
    value: String,
    editing: Option<&'a (InputField, String)>,
    note: String,
) -> Line<'a> {
    let (text, style) = match editing {
        Some((f, pending)) if *f == field => (
            format!("{}▏", pending),
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ),
        _ => (value, Style::default().fg(Color::Cyan)),
    };
    Line::from(vec![
        Span::styled(format!("{}: ", field.label()), Style::default().fg(Color::DarkGray)),
        Span::styled(text, style),
        Span::styled(note, Style::default().fg(Color::DarkGray)),
    ])
}

fn render_ages(
    frame: &mut Frame,
    area: Rect,
    dashboard: &DashboardComponent,
    ctx: &DashboardRenderContext,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Percentage(50),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(area);

    let min_age = input_line(
        InputField::MinAge,
        format!("{}", ctx.inputs.min_age),
        dashboard.editing.as_ref(),
        format!(
            "  older than {} ({} passengers)",
            ctx.inputs.min_age_threshold(),
            ctx.data.min_age.count
        ),
    );
    frame.render_widget(
        Paragraph::new(min_age).block(Block::default().borders(Borders::ALL).title(" a: edit ")),
        rows[0],
    );
    render_age_section(frame, rows[1], &ctx.data.min_age);

    let (lo, hi) = ctx.inputs.age_range;
    let track_width = rows[2].width.saturating_sub(4) as usize;
    let handle_style = |handle: RangeHandle| {
        if handle == dashboard.range_handle {
            Style::default()
                .fg(series_color(0))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::White)
        }
    };
    let slider = vec![
        Line::from(Span::styled(
            format!(" {}", slider_track(ctx.inputs.age_range, track_width)),
            Style::default().fg(series_color(0)),
        )),
        Line::from(vec![
            Span::styled(" between ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{}", lo), handle_style(RangeHandle::Low)),
            Span::styled(" and ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{}", hi), handle_style(RangeHandle::High)),
            Span::styled(
                format!("  ({} passengers)", ctx.data.age_range.count),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(slider).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Age range  f: switch handle  ←/→: move "),
        ),
        rows[2],
    );
    render_age_section(frame, rows[3], &ctx.data.age_range);
}

fn render_sex(
    frame: &mut Frame,
    area: Rect,
    dashboard: &mut DashboardComponent,
    ctx: &DashboardRenderContext,
) -> Result<()> {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let sex = input_line(
        InputField::Sex,
        ctx.inputs.sex.clone(),
        dashboard.editing.as_ref(),
        format!("  ({} passengers)", ctx.data.sex_count),
    );
    frame.render_widget(
        Paragraph::new(sex).block(Block::default().borders(Borders::ALL).title(" x: edit ")),
        rows[0],
    );
    dashboard.sex_table.draw(frame, rows[1])
}

fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &DashboardRenderContext) {
    if let Some(message) = ctx.status_message {
        let style = if message.starts_with("Error") || message.starts_with("Invalid") {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };
        frame.render_widget(Paragraph::new(Span::styled(format!(" {}", message), style)), area);
    }
}

fn render_help_bar(frame: &mut Frame, area: Rect, dashboard: &DashboardComponent) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));
    let spans = if dashboard.is_editing() {
        vec![
            key(" Enter "),
            Span::raw("Apply  "),
            key(" Esc "),
            Span::raw("Discard  "),
            key(" Backspace "),
            Span::raw("Delete"),
        ]
    } else {
        vec![
            key(" Tab "),
            Span::raw("Section  "),
            key(" p/o "),
            Span::raw("Ports  "),
            key(" a "),
            Span::raw("Min age  "),
            key(" ←/→ "),
            Span::raw("Age range  "),
            key(" x "),
            Span::raw("Sex  "),
            key(" r "),
            Span::raw("Reset  "),
            key(" ? "),
            Span::raw("Help  "),
            key(" q "),
            Span::raw("Quit"),
        ]
    };

    let help = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)));
    frame.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(dashboard: &mut DashboardComponent, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        dashboard.handle_key_event(KeyEvent::new(code, modifiers)).unwrap()
    }

    #[test]
    fn test_key_map() {
        let mut dashboard = DashboardComponent::new();
        let none = KeyModifiers::NONE;
        assert_eq!(press(&mut dashboard, KeyCode::Char('3'), none), Some(Action::SelectTab(Tab::PortDive)));
        assert_eq!(press(&mut dashboard, KeyCode::Char('p'), none), Some(Action::OpenPortFilter));
        assert_eq!(press(&mut dashboard, KeyCode::Right, none), Some(Action::MoveRangeHandle(1)));
        assert_eq!(
            press(&mut dashboard, KeyCode::Left, KeyModifiers::SHIFT),
            Some(Action::MoveRangeHandle(-5))
        );
        assert_eq!(
            press(&mut dashboard, KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(Action::ForceQuit)
        );
        assert_eq!(press(&mut dashboard, KeyCode::Char('9'), none), None);
    }

    #[test]
    fn test_editing_captures_keys() {
        let mut dashboard = DashboardComponent::new();
        dashboard.start_edit(InputField::MinAge, "4".to_string());
        assert_eq!(dashboard.active_tab, Tab::Ages);

        let none = KeyModifiers::NONE;
        let typed = press(&mut dashboard, KeyCode::Char('q'), none);
        assert_eq!(typed, Some(Action::EditInput('q')));
        // Letters are rejected by the numeric field
        dashboard.update(Action::EditInput('q')).unwrap();
        dashboard.update(Action::EditInput('2')).unwrap();
        assert_eq!(press(&mut dashboard, KeyCode::Enter, none), Some(Action::CommitEdit));
        assert_eq!(dashboard.take_edit(), Some((InputField::MinAge, "42".to_string())));
        assert!(!dashboard.is_editing());
    }

    #[test]
    fn test_cancel_edit() {
        let mut dashboard = DashboardComponent::new();
        dashboard.start_edit(InputField::Sex, String::new());
        dashboard.update(Action::EditInput('m')).unwrap();
        dashboard.update(Action::EditBackspace).unwrap();
        dashboard.update(Action::CancelEdit).unwrap();
        assert!(dashboard.take_edit().is_none());
    }

    #[test]
    fn test_toggle_handle_switches_to_ages() {
        let mut dashboard = DashboardComponent::new();
        dashboard.update(Action::ToggleRangeHandle).unwrap();
        assert_eq!(dashboard.active_tab, Tab::Ages);
        assert_eq!(dashboard.range_handle, RangeHandle::High);
    }

    #[test]
    fn test_pair_groups_fill_missing_pairs_with_zero() {
        let pairs = vec![
            ((Category::text("female"), Category::text("C")), 2),
            ((Category::text("male"), Category::text("C")), 1),
            ((Category::text("male"), Category::text("S")), 4),
        ];
        let (series, groups) = pair_groups(&pairs);
        assert_eq!(series, vec!["C".to_string(), "S".to_string()]);
        assert_eq!(
            groups,
            vec![
                BarSeriesGroup { label: "female".to_string(), values: vec![2, 0] },
                BarSeriesGroup { label: "male".to_string(), values: vec![1, 4] },
            ]
        );
    }

    #[test]
    fn test_age_bin_groups() {
        let bins = vec![AgeBin {
            lower: 0.0,
            upper: 10.0,
            survivors: vec![(Category::text("female"), 3), (Category::text("male"), 1)],
        }];
        let (series, groups) = age_bin_groups(&bins);
        assert_eq!(series, vec!["female".to_string(), "male".to_string()]);
        assert_eq!(groups[0].label, "0-10");
        assert_eq!(groups[0].values, vec![3, 1]);
    }

    #[test]
    fn test_slider_track() {
        assert_eq!(slider_track((25.0, 75.0), 5), "─●━●─");
        assert_eq!(slider_track((0.0, 100.0), 3), "●━●");
        assert_eq!(slider_track((50.0, 50.0), 3), "─●─");
    }
}

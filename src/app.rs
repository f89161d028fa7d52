//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components.
//! It owns the loaded dataset and the input state, and reruns the dashboard
//! pipeline after every interaction that changes an input.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_dashboard_screen, DashboardComponent, DashboardRenderContext, HelpDialog,
    PortFilterDialog, PortSelectDialog, QuitDialog, SplashComponent, TitleComponent,
};
use crate::config::Config;
use crate::model::modal::{Modal, ModalStack};
use crate::model::ui::{AppMode, InputField};
use crate::model::{Column, DashboardData, DashboardInputs, Dataset};
use crate::services::TitleImage;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Current application mode
    pub mode: AppMode,

    /// Passengers loaded at startup, never modified
    pub dataset: Dataset,

    /// Current value of every input widget
    pub inputs: DashboardInputs,

    /// Series computed from `inputs`
    pub data: DashboardData,

    /// Slider position restored by a reset
    pub default_age_range: (f64, f64),

    /// Where the dataset came from, for display
    pub data_source: String,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub splash: SplashComponent,
    pub dashboard: DashboardComponent,
    pub title: TitleComponent,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
    pub port_filter_dialog: PortFilterDialog,
    pub port_select_dialog: PortSelectDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    /// Create a new App over a loaded dataset and title image
    pub fn new(dataset: Dataset, image: TitleImage, config: &Config) -> App {
        let inputs = DashboardInputs::for_dataset(&dataset, config.age_range);
        let mode = if config.show_splash {
            AppMode::Splash
        } else {
            AppMode::Running
        };

        let mut app = App {
            mode,
            splash: SplashComponent::new(TitleComponent::new(image.clone()), dataset.len()),
            title: TitleComponent::new(image),
            data: DashboardData::default(),
            default_age_range: inputs.age_range,
            data_source: config.data_path.clone(),
            inputs,
            dataset,
            modals: ModalStack::new(),
            should_quit: false,
            status_message: None,
            dashboard: DashboardComponent::new(),
            quit_dialog: QuitDialog,
            help_dialog: HelpDialog::default(),
            port_filter_dialog: PortFilterDialog::new(),
            port_select_dialog: PortSelectDialog::new(),
        };
        app.recompute();
        app
    }

    /// Rerun the whole pipeline for the current inputs
    pub fn recompute(&mut self) {
        self.data = DashboardData::compute(&self.dataset, &self.inputs);
        self.dashboard
            .sex_table
            .set_distribution(Column::Embarked.name(), &self.data.sex_table);
        tracing::debug!(
            ports = self.data.selected_count,
            port = self.data.port_count,
            older = self.data.min_age.count,
            in_range = self.data.age_range.count,
            sex = self.data.sex_count,
            "Recomputed dashboard"
        );
    }

    fn reset_inputs(&mut self) {
        self.inputs = DashboardInputs::for_dataset(&self.dataset, self.default_age_range);
        self.recompute();
        self.status_message = Some("Inputs reset".to_string());
    }

    fn current_text(&self, field: InputField) -> String {
        match field {
            InputField::MinAge => format!("{}", self.inputs.min_age),
            InputField::Sex => self.inputs.sex.clone(),
        }
    }

    /// Apply an edited text input, keeping the old value if it does not parse
    fn commit_edit(&mut self, field: InputField, text: String) {
        match field {
            InputField::MinAge => match text.trim().parse::<f64>() {
                Ok(age) if age.is_finite() => {
                    self.inputs.min_age = age;
                    self.status_message = None;
                }
                _ => {
                    tracing::warn!(input = %text, "Rejected minimum age");
                    self.status_message = Some(format!("Invalid age: '{}'", text));
                    return;
                }
            },
            InputField::Sex => {
                self.inputs.sex = text;
                self.status_message = None;
            }
        }
        self.recompute();
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        self.splash.init()?;
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match self.mode {
            AppMode::Splash => self.splash.handle_key_event(key),
            AppMode::Running => {
                if let Some(modal) = self.modals.top().cloned() {
                    self.handle_modal_key_event(&modal, key)
                } else {
                    self.dashboard.handle_key_event(key)
                }
            }
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                if self.mode == AppMode::Splash {
                    return self.splash.update(action);
                }
            }
            Action::SplashComplete => {
                self.mode = AppMode::Running;
            }
            Action::ForceQuit => {
                self.should_quit = true;
            }
            Action::Resize(_, _) => {}

            // ─────────────────────────────────────────────────────────────────
            // Navigation (delegate to DashboardComponent)
            // ─────────────────────────────────────────────────────────────────
            Action::NextTab
            | Action::PrevTab
            | Action::SelectTab(_)
            | Action::ScrollUp
            | Action::ScrollDown
            | Action::ToggleRangeHandle
            | Action::EditInput(_)
            | Action::EditBackspace
            | Action::CancelEdit => {
                return self.dashboard.update(action);
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::OpenPortFilter => {
                self.port_filter_dialog
                    .set_ports(self.dataset.distinct(Column::Embarked), &self.inputs.ports);
                self.modals.push(Modal::PortFilter);
            }
            Action::OpenPortSelect => {
                self.port_select_dialog.set_ports(
                    self.dataset.distinct(Column::Embarked),
                    self.inputs.port.as_ref(),
                );
                self.modals.push(Modal::PortSelect);
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ModalUp | Action::ModalDown => {}

            // ─────────────────────────────────────────────────────────────────
            // Dashboard Inputs
            // ─────────────────────────────────────────────────────────────────
            Action::SetPorts(ports) => {
                tracing::info!(count = ports.len(), "Port selection changed");
                self.inputs.ports = ports;
                self.modals.pop();
                self.recompute();
            }
            Action::SetPort(port) => {
                tracing::info!(%port, "Selected port changed");
                self.inputs.port = Some(port);
                self.modals.pop();
                self.recompute();
            }
            Action::StartEdit(field) => {
                let current = self.current_text(field);
                self.dashboard.start_edit(field, current);
            }
            Action::CommitEdit => {
                if let Some((field, text)) = self.dashboard.take_edit() {
                    self.commit_edit(field, text);
                }
            }
            Action::MoveRangeHandle(delta) => {
                self.inputs
                    .move_age_handle(self.dashboard.range_handle, f64::from(delta));
                self.recompute();
            }
            Action::ResetInputs => {
                self.reset_inputs();
            }
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        match self.mode {
            AppMode::Splash => self.splash.draw(frame, area)?,
            AppMode::Running => {
                let ctx = DashboardRenderContext {
                    data: &self.data,
                    inputs: &self.inputs,
                    data_source: &self.data_source,
                    status_message: self.status_message.as_deref(),
                };

                draw_dashboard_screen(frame, area, &mut self.dashboard, Some(&mut self.title), &ctx)?;

                if let Some(modal) = self.modals.top().cloned() {
                    self.draw_modal(frame, area, &modal)?;
                }
            }
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::PortFilter => self.port_filter_dialog.handle_key_event(key),
            Modal::PortSelect => self.port_select_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
            Modal::PortFilter => self.port_filter_dialog.draw(frame, area)?,
            Modal::PortSelect => self.port_select_dialog.draw(frame, area)?,
            Modal::Help => self.help_dialog.draw(frame, area)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::dashboard::DEFAULT_AGE_RANGE;
    use crate::model::{Category, Passenger};
    use crossterm::event::{KeyCode, KeyModifiers};
    use image::{Rgb, RgbImage};
    use std::collections::BTreeSet;

    fn passenger(id: i64, sex: &str, age: Option<f64>, embarked: &str, survived: bool) -> Passenger {
        Passenger {
            id,
            sex: sex.to_string(),
            age,
            pclass: 3,
            embarked: Some(embarked.to_string()),
            survived,
        }
    }

    fn app() -> App {
        let dataset = Dataset::new(vec![
            passenger(0, "male", Some(22.0), "S", false),
            passenger(1, "female", Some(38.0), "C", true),
            passenger(2, "female", Some(26.0), "S", true),
            passenger(3, "male", Some(80.0), "Q", false),
        ]);
        let image = TitleImage::from_rgb(RgbImage::from_pixel(4, 4, Rgb([0, 0, 0])));
        let config = Config {
            show_splash: false,
            ..Config::default()
        };
        App::new(dataset, image, &config)
    }

    /// Feed an action and every follow-up through `update`
    fn dispatch(app: &mut App, action: Action) {
        let mut current = Some(action);
        while let Some(a) = current {
            current = app.update(a).unwrap();
        }
    }

    fn key(app: &mut App, code: KeyCode) {
        if let Some(action) = app
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
        {
            dispatch(app, action);
        }
    }

    #[test]
    fn test_initial_state_uses_every_port() {
        let app = app();
        assert_eq!(app.mode, AppMode::Running);
        assert_eq!(app.inputs.ports.len(), 3);
        assert_eq!(app.inputs.port, Some(Category::text("S")));
        assert_eq!(app.inputs.age_range, DEFAULT_AGE_RANGE);
        assert_eq!(app.data.selected_count, 4);
    }

    #[test]
    fn test_set_ports_recomputes_and_closes_dialog() {
        let mut app = app();
        dispatch(&mut app, Action::OpenPortFilter);
        assert_eq!(app.modals.top(), Some(&Modal::PortFilter));

        let ports: BTreeSet<Category> = [Category::text("S")].into_iter().collect();
        dispatch(&mut app, Action::SetPorts(ports));
        assert!(app.modals.is_empty());
        assert_eq!(app.data.embarked, vec![(Category::text("S"), 100.0)]);
    }

    #[test]
    fn test_empty_port_selection_gives_empty_charts() {
        let mut app = app();
        dispatch(&mut app, Action::SetPorts(BTreeSet::new()));
        assert_eq!(app.data.selected_count, 0);
        assert!(app.data.embarked.is_empty());
    }

    #[test]
    fn test_min_age_edit_flow() {
        let mut app = app();
        key(&mut app, KeyCode::Char('a'));
        key(&mut app, KeyCode::Backspace);
        key(&mut app, KeyCode::Char('3'));
        key(&mut app, KeyCode::Char('0'));
        key(&mut app, KeyCode::Enter);

        assert_eq!(app.inputs.min_age, 30.0);
        assert_eq!(app.data.min_age.count, 2);
        assert!(!app.dashboard.is_editing());
    }

    #[test]
    fn test_invalid_min_age_keeps_previous_value() {
        let mut app = app();
        dispatch(&mut app, Action::StartEdit(InputField::MinAge));
        app.dashboard.editing = Some((InputField::MinAge, "-".to_string()));
        dispatch(&mut app, Action::CommitEdit);

        assert_eq!(app.inputs.min_age, 0.0);
        assert!(app
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Invalid")));
    }

    #[test]
    fn test_sex_filter_updates_table() {
        let mut app = app();
        dispatch(&mut app, Action::StartEdit(InputField::Sex));
        for c in "female".chars() {
            dispatch(&mut app, Action::EditInput(c));
        }
        dispatch(&mut app, Action::CommitEdit);

        assert_eq!(app.data.sex_count, 2);
        assert_eq!(app.dashboard.sex_table.rows().len(), 2);
    }

    #[test]
    fn test_range_handles_and_reset() {
        let mut app = app();
        dispatch(&mut app, Action::MoveRangeHandle(-5));
        assert_eq!(app.inputs.age_range, (20.0, 75.0));
        assert_eq!(app.data.age_range.count, 3);

        dispatch(&mut app, Action::ToggleRangeHandle);
        dispatch(&mut app, Action::MoveRangeHandle(10));
        assert_eq!(app.inputs.age_range, (20.0, 85.0));
        assert_eq!(app.data.age_range.count, 4);

        dispatch(&mut app, Action::ResetInputs);
        assert_eq!(app.inputs.age_range, DEFAULT_AGE_RANGE);
    }

    #[test]
    fn test_quit_dialog_flow() {
        let mut app = app();
        key(&mut app, KeyCode::Char('q'));
        assert_eq!(app.modals.top(), Some(&Modal::QuitConfirm));
        key(&mut app, KeyCode::Esc);
        assert!(app.modals.is_empty());
        assert!(!app.should_quit);

        key(&mut app, KeyCode::Char('q'));
        key(&mut app, KeyCode::Char('y'));
        assert!(app.should_quit);
    }
}

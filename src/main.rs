//! titanic-tui - A terminal dashboard for the Titanic passenger manifest
//!
//! This is the main entry point for the titanic-tui application.
//! It uses the Component Architecture pattern from ratatui.

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::Event;
use std::path::PathBuf;
use std::time::Duration;
use titanic_tui::action::Action;
use titanic_tui::app::App;
use titanic_tui::component::Component;
use titanic_tui::config::Config;
use titanic_tui::logging;
use titanic_tui::services::{load_dataset, TitleImage};
use titanic_tui::tui::Tui;

#[derive(Parser)]
#[command(
    name = "titanic-tui",
    about = "Explore the Titanic passenger manifest in the terminal"
)]
struct Cli {
    /// Cleaned passenger CSV. Overrides the config file.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Title image shown on the splash and overview. Overrides the config file.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Go straight to the dashboard.
    #[arg(long, default_value_t = false)]
    no_splash: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    if let Err(err) = run(cli) {
        tracing::error!("{:#}", err);
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load().unwrap_or_default();
    if let Some(data) = cli.data {
        config.data_path = data.to_string_lossy().into_owned();
    }
    if let Some(image) = cli.image {
        config.image_path = image.to_string_lossy().into_owned();
    }
    if cli.no_splash {
        config.show_splash = false;
    }

    // Both assets are loaded before the terminal switches to raw mode
    let dataset = load_dataset(&config.data_path)
        .with_context(|| format!("Failed to load passengers from {}", config.data_path))?;
    let image = TitleImage::load(&config.image_path)
        .with_context(|| format!("Failed to load title image {}", config.image_path))?;

    let mut app = App::new(dataset, image, &config);
    app.init()?;

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(100));
    tui.enter()?;

    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;
    result
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        let mut draw_result = Ok(());
        tui.draw(|frame| {
            let area = frame.area();
            draw_result = app.draw(frame, area);
        })?;
        draw_result.context("Failed to draw the dashboard")?;

        if let Some(event) = tui.next_event()? {
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // An action may produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                tracing::trace!(action = %a, "Dispatching");
                current_action = app.update(a)?;
            }
        } else {
            // No event - send a tick for time-based updates
            let mut current_action = Some(Action::Tick);
            while let Some(a) = current_action {
                current_action = app.update(a)?;
            }
        }
    }

    tracing::info!("Exiting");
    Ok(())
}

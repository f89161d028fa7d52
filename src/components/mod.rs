//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod charts;
pub mod dashboard;
pub mod help_dialog;
pub mod layout;
pub mod port_filter_dialog;
pub mod port_select_dialog;
pub mod quit_dialog;
pub mod splash;
pub mod table;
pub mod title;

pub use dashboard::{draw_dashboard_screen, DashboardComponent, DashboardRenderContext};
pub use help_dialog::HelpDialog;
pub use layout::{calculate_main_layout, centered_popup};
pub use port_filter_dialog::PortFilterDialog;
pub use port_select_dialog::PortSelectDialog;
pub use quit_dialog::QuitDialog;
pub use splash::SplashComponent;
pub use table::TableComponent;
pub use title::TitleComponent;

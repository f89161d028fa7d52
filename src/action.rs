//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use crate::model::ui::{InputField, Tab};
use crate::model::Category;
use std::collections::BTreeSet;
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for time-based updates
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,
    /// Transition from splash to the dashboard
    SplashComplete,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    NextTab,
    PrevTab,
    /// Jump straight to a tab
    SelectTab(Tab),
    /// Scroll the sex table up one line
    ScrollUp,
    /// Scroll the sex table down one line
    ScrollDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    OpenQuitDialog,
    OpenHelp,
    /// Open the port multiselect
    OpenPortFilter,
    /// Open the single port select
    OpenPortSelect,
    /// Close the current modal
    CloseModal,
    /// Navigate up in modal
    ModalUp,
    /// Navigate down in modal
    ModalDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Dashboard Inputs
    // ─────────────────────────────────────────────────────────────────────────
    /// Replace the multiselect port set
    SetPorts(BTreeSet<Category>),
    /// Choose the single port
    SetPort(Category),
    /// Start editing a text input
    StartEdit(InputField),
    /// Type into the input being edited
    EditInput(char),
    /// Remove last character from the input being edited
    EditBackspace,
    /// Apply the edited input
    CommitEdit,
    /// Discard the edit
    CancelEdit,
    /// Switch which age slider handle moves
    ToggleRangeHandle,
    /// Move the active age slider handle by whole years
    MoveRangeHandle(i16),
    /// Restore every input to its default
    ResetInputs,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::SplashComplete => write!(f, "SplashComplete"),
            Action::NextTab => write!(f, "NextTab"),
            Action::PrevTab => write!(f, "PrevTab"),
            Action::SelectTab(tab) => write!(f, "SelectTab({})", tab.name()),
            Action::ScrollUp => write!(f, "ScrollUp"),
            Action::ScrollDown => write!(f, "ScrollDown"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::OpenPortFilter => write!(f, "OpenPortFilter"),
            Action::OpenPortSelect => write!(f, "OpenPortSelect"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ModalUp => write!(f, "ModalUp"),
            Action::ModalDown => write!(f, "ModalDown"),
            Action::SetPorts(ports) => {
                let names: Vec<String> = ports.iter().map(|p| p.to_string()).collect();
                write!(f, "SetPorts([{}])", names.join(", "))
            }
            Action::SetPort(port) => write!(f, "SetPort({})", port),
            Action::StartEdit(field) => write!(f, "StartEdit({:?})", field),
            Action::EditInput(c) => write!(f, "EditInput('{}')", c),
            Action::EditBackspace => write!(f, "EditBackspace"),
            Action::CommitEdit => write!(f, "CommitEdit"),
            Action::CancelEdit => write!(f, "CancelEdit"),
            Action::ToggleRangeHandle => write!(f, "ToggleRangeHandle"),
            Action::MoveRangeHandle(delta) => write!(f, "MoveRangeHandle({})", delta),
            Action::ResetInputs => write!(f, "ResetInputs"),
        }
    }
}

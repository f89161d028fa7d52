//! UI state - presentation enums shared by the app and its components

/// Tab selection in the main UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    Ports,
    PortDive,
    Ages,
    Sex,
}

impl Tab {
    pub fn all() -> Vec<Tab> {
        vec![Tab::Overview, Tab::Ports, Tab::PortDive, Tab::Ages, Tab::Sex]
    }

    pub fn name(&self) -> &str {
        match self {
            Tab::Overview => "Overview",
            Tab::Ports => "Ports",
            Tab::PortDive => "Port Dive",
            Tab::Ages => "Ages",
            Tab::Sex => "Sex",
        }
    }

    pub fn index(&self) -> usize {
        Tab::all().iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> Tab {
        let tabs = Tab::all();
        tabs[(self.index() + 1) % tabs.len()]
    }

    pub fn previous(&self) -> Tab {
        let tabs = Tab::all();
        tabs[(self.index() + tabs.len() - 1) % tabs.len()]
    }
}

/// Main application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Splash,
    Running,
}

/// Text inputs that can be edited in place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    MinAge,
    Sex,
}

impl InputField {
    pub fn label(&self) -> &str {
        match self {
            InputField::MinAge => "Minimum age",
            InputField::Sex => "Sex [female OR male]",
        }
    }

    /// Whether a typed character is allowed in this field
    pub fn accepts(&self, c: char) -> bool {
        match self {
            InputField::MinAge => c.is_ascii_digit() || c == '.' || c == '-',
            InputField::Sex => !c.is_control(),
        }
    }
}

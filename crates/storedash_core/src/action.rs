use std::fmt;

/// Label of the operation a failure message is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Load,
    Create,
    Refresh,
    Delete,
}

impl Action {
    /// Formats the user-facing failure line, e.g. `Delete failed: not found`.
    pub fn failure(&self, detail: impl fmt::Display) -> String {
        format!("{self} failed: {detail}")
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Load => write!(f, "Load"),
            Action::Create => write!(f, "Create"),
            Action::Refresh => write!(f, "Refresh"),
            Action::Delete => write!(f, "Delete"),
        }
    }
}

//! Worker lifecycle state and handler reports.

use std::fmt;

/// Lifecycle state of the router's app version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkerState {
    /// Constructed, install not yet run.
    #[default]
    Parsed,
    Installing,
    /// Precache complete; eligible to activate.
    Installed,
    Activating,
    /// Stale generations removed; controlling clients.
    Activated,
    /// Install failed; this version never becomes ready.
    Redundant,
}

impl WorkerState {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkerState::Parsed => "parsed",
            WorkerState::Installing => "installing",
            WorkerState::Installed => "installed",
            WorkerState::Activating => "activating",
            WorkerState::Activated => "activated",
            WorkerState::Redundant => "redundant",
        }
    }

    /// Activation requires a completed install. Re-activating is allowed.
    pub fn can_activate(self) -> bool {
        matches!(self, WorkerState::Installed | WorkerState::Activated)
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a successful install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub generation: String,
    /// Number of static assets stored.
    pub cached: usize,
    /// The new version does not wait for old pages to close.
    pub skip_waiting: bool,
}

/// Result of a successful activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivateReport {
    pub generation: String,
    /// Stale generations removed, in creation order.
    pub deleted: Vec<String>,
    /// Open pages are taken over without a reload.
    pub claim_clients: bool,
}

//! Dashboard tabs and the role gate in front of them.

use crate::core::storage::{ACTIVE_TAB_KEY, LocalStorage};
use crate::core::visibility::can_manage_employees;
use crate::errors::{AppError, AppResult};
use crate::models::Employee;
use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Tab {
    Home,
    Employees,
    Vacations,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Home, Tab::Employees, Tab::Vacations, Tab::Profile];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Home => "home",
            Tab::Employees => "employees",
            Tab::Vacations => "vacations",
            Tab::Profile => "profile",
        }
    }

    /// Tab shown right after the first profile load.
    pub fn default_for(user: &Employee) -> Tab {
        if can_manage_employees(user) {
            Tab::Home
        } else {
            Tab::Vacations
        }
    }

    pub fn permitted(&self, user: &Employee) -> bool {
        match self {
            Tab::Home | Tab::Employees => can_manage_employees(user),
            Tab::Vacations | Tab::Profile => true,
        }
    }

    /// The requested tab, or vacations when the user may not open it.
    pub fn resolve(self, user: &Employee) -> Tab {
        if self.permitted(user) {
            self
        } else {
            Tab::Vacations
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::InvalidTab(s.to_string()))
    }
}

/// Active tab, persisted under `activeTab`.
pub struct Navigator<'a> {
    storage: &'a mut LocalStorage,
}

impl<'a> Navigator<'a> {
    pub fn new(storage: &'a mut LocalStorage) -> Self {
        Self { storage }
    }

    /// Last persisted tab; unknown values are ignored.
    pub fn persisted(&self) -> Option<Tab> {
        self.storage.get(ACTIVE_TAB_KEY)?.parse().ok()
    }

    /// Pick the tab to render: the requested one, else the persisted one,
    /// else the role default. Non-admins asking for an admin tab land on
    /// vacations. The outcome is persisted.
    pub fn open(&mut self, user: &Employee, requested: Option<Tab>) -> AppResult<Tab> {
        let wanted = requested
            .or_else(|| self.persisted())
            .unwrap_or_else(|| Tab::default_for(user));
        let tab = wanted.resolve(user);
        if tab != wanted {
            debug!(requested = %wanted, resolved = %tab, "tab redirected");
        }
        self.storage.set(ACTIVE_TAB_KEY, tab.as_str())?;
        Ok(tab)
    }
}

//! View-state controllers for the vacation and employee lists.

pub mod employees;
pub mod forms;
pub mod guard;
pub mod modal;
pub mod vacations;

pub use employees::{EmployeeFilters, EmployeesController};
pub use forms::{DecisionForm, EmployeeForm, VacationForm};
pub use guard::MountGuard;
pub use modal::Modal;
pub use vacations::{VacationFilters, VacationsController};

/// Paging and load status of a list view. `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    pub page: u32,
    pub total_pages: u32,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            page: 1,
            total_pages: 1,
            loading: false,
            error: None,
        }
    }
}

impl ListState {
    /// Zero-based page index sent to the backend.
    pub fn server_page(&self) -> u32 {
        self.page.saturating_sub(1)
    }

    pub fn start_loading(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn finish(&mut self, error: Option<String>) {
        self.loading = false;
        self.error = error;
    }
}

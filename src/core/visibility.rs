//! Role-based visibility rules.
//!
//! Pure functions of (user, vacation or collection, direct reports).

use crate::models::{Employee, Role, VacationRequest};
use std::collections::HashSet;

/// Ids of a manager's direct reports (one level, non-transitive).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectReports(HashSet<i64>);

impl DirectReports {
    pub fn from_employees(reports: &[Employee]) -> Self {
        Self(reports.iter().map(|e| e.id).collect())
    }

    /// Every employee in `all` whose manager is `manager_id`.
    pub fn of(manager_id: i64, all: &[Employee]) -> Self {
        Self(
            all.iter()
                .filter(|e| e.reports_to(manager_id))
                .map(|e| e.id)
                .collect(),
        )
    }

    pub fn contains(&self, employee_id: i64) -> bool {
        self.0.contains(&employee_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<i64> for DirectReports {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

pub fn is_visible(user: &Employee, vacation: &VacationRequest, reports: &DirectReports) -> bool {
    match user.role {
        Role::Admin => true,
        Role::Manager => vacation.employee_id == user.id || reports.contains(vacation.employee_id),
        Role::Employee => vacation.employee_id == user.id,
    }
}

/// The subset of `all` the user may see, in input order.
pub fn visible_vacations(
    user: &Employee,
    all: &[VacationRequest],
    reports: &DirectReports,
) -> Vec<VacationRequest> {
    all.iter()
        .filter(|v| is_visible(user, v, reports))
        .cloned()
        .collect()
}

/// Whether the user may approve or reject the request.
///
/// Nobody evaluates their own request; managers only evaluate direct reports.
pub fn can_evaluate(user: &Employee, vacation: &VacationRequest, reports: &DirectReports) -> bool {
    match user.role {
        Role::Employee => false,
        Role::Admin => vacation.employee_id != user.id,
        Role::Manager => vacation.employee_id != user.id && reports.contains(vacation.employee_id),
    }
}

pub fn can_delete(user: &Employee, vacation: &VacationRequest) -> bool {
    match user.role {
        Role::Admin => true,
        Role::Manager | Role::Employee => vacation.employee_id == user.id,
    }
}

/// Employee administration and the home dashboard are admin-only.
pub fn can_manage_employees(user: &Employee) -> bool {
    user.role == Role::Admin
}

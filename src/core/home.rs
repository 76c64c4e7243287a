//! Home dashboard loader (admin only).

use crate::api::Backend;
use crate::core::pagination::collect_all;
use crate::core::session::Session;
use crate::core::stats::{self, DashboardStats, StatsOptions};
use crate::core::visibility::can_manage_employees;
use crate::errors::{AppError, AppResult};
use crate::models::{Employee, VacationRequest};
use chrono::NaiveDate;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct HomeData {
    pub employees: Vec<Employee>,
    pub vacations: Vec<VacationRequest>,
    pub stats: DashboardStats,
}

impl HomeData {
    /// Most recent requests first (by creation time, then id).
    pub fn recent_requests(&self, limit: usize) -> Vec<&VacationRequest> {
        let mut recent: Vec<&VacationRequest> = self.vacations.iter().collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        recent.truncate(limit);
        recent
    }

    pub fn employee_name(&self, id: i64) -> Option<String> {
        self.employees
            .iter()
            .find(|e| e.id == id)
            .map(Employee::full_name)
    }
}

/// Fetch both collections concurrently and derive the dashboard.
pub async fn load<B: Backend>(
    backend: &B,
    session: &Session,
    today: NaiveDate,
    options: StatsOptions,
) -> AppResult<HomeData> {
    if !can_manage_employees(&session.user) {
        return Err(AppError::Forbidden(
            "the home dashboard is reserved to administrators".to_string(),
        ));
    }

    let token = session.token.as_str();
    let (employees, vacations) = futures::try_join!(
        collect_all(|page| backend.employees(token, page, None)),
        collect_all(|page| backend.vacations(token, page)),
    )?;

    debug!(
        employees = employees.len(),
        vacations = vacations.len(),
        "home data collected"
    );

    let stats = stats::compute(&employees, &vacations, today, options);
    Ok(HomeData {
        employees,
        vacations,
        stats,
    })
}

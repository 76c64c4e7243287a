//! Profile page: own requests plus, for leads, the team's.

use crate::api::Backend;
use crate::core::pagination::collect_all;
use crate::core::session::Session;
use crate::core::stats::{StatusCounts, total_days_used};
use crate::errors::AppResult;
use crate::models::{Employee, Role, VacationRequest};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSummary {
    pub user: Employee,
    /// Only resolved for admins, who can list every employee.
    pub manager: Option<Employee>,
    pub own_vacations: Vec<VacationRequest>,
    pub own_counts: StatusCounts,
    pub days_used: i64,
    pub reports: Vec<Employee>,
    pub team_vacations: Vec<VacationRequest>,
}

impl ProfileSummary {
    pub fn pending_team_requests(&self) -> usize {
        self.team_vacations.iter().filter(|v| v.is_pending()).count()
    }
}

pub async fn load<B: Backend>(backend: &B, session: &Session) -> AppResult<ProfileSummary> {
    let user = session.user.clone();
    let token = session.token.as_str();

    let all = collect_all(|page| backend.vacations(token, page)).await?;

    let own_vacations: Vec<VacationRequest> = all
        .iter()
        .filter(|v| v.employee_id == user.id)
        .cloned()
        .collect();

    let reports = if user.role.can_lead() {
        backend.direct_reports(token).await?
    } else {
        Vec::new()
    };

    let team_vacations: Vec<VacationRequest> = all
        .iter()
        .filter(|v| reports.iter().any(|r| r.id == v.employee_id))
        .cloned()
        .collect();

    let manager = match (user.role, user.manager_id) {
        (Role::Admin, Some(mid)) => {
            let everyone = collect_all(|page| backend.employees(token, page, None)).await?;
            everyone.into_iter().find(|e| e.id == mid)
        }
        _ => None,
    };

    debug!(
        own = own_vacations.len(),
        reports = reports.len(),
        team = team_vacations.len(),
        "profile loaded"
    );

    Ok(ProfileSummary {
        own_counts: own_vacations.iter().collect(),
        days_used: total_days_used(&own_vacations),
        user,
        manager,
        own_vacations,
        reports,
        team_vacations,
    })
}

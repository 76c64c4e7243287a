//! Statistics derived from the employee and vacation snapshots.
//!
//! Everything here is a full recomputation from the two input lists.

use crate::models::{Employee, Role, VacationRequest, VacationStatus};
use crate::utils::date::{all_days_of_month, month_label};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub const UNKNOWN_MANAGER: &str = "Unknown";

#[derive(Debug, Clone, Copy)]
pub struct StatsOptions {
    /// Maximum entries in the upcoming-vacations preview.
    pub upcoming_limit: usize,
    /// Maximum number of monthly buckets in the trend.
    pub trend_months: usize,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            upcoming_limit: 5,
            trend_months: 6,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: VacationStatus) {
        match status {
            VacationStatus::Pending => self.pending += 1,
            VacationStatus::Approved => self.approved += 1,
            VacationStatus::Rejected => self.rejected += 1,
        }
    }

    pub fn get(&self, status: VacationStatus) -> usize {
        match status {
            VacationStatus::Pending => self.pending,
            VacationStatus::Approved => self.approved,
            VacationStatus::Rejected => self.rejected,
        }
    }

    pub fn total(&self) -> usize {
        self.pending + self.approved + self.rejected
    }

    /// Case-normalised map ("pending" → n, ...).
    pub fn as_map(&self) -> BTreeMap<&'static str, usize> {
        [
            VacationStatus::Pending,
            VacationStatus::Approved,
            VacationStatus::Rejected,
        ]
        .into_iter()
        .map(|s| (s.key(), self.get(s)))
        .collect()
    }
}

impl<'a> FromIterator<&'a VacationRequest> for StatusCounts {
    fn from_iter<I: IntoIterator<Item = &'a VacationRequest>>(iter: I) -> Self {
        let mut counts = StatusCounts::default();
        for v in iter {
            counts.record(v.status);
        }
        counts
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendBucket {
    pub year: i32,
    pub month: u32,
    /// "Jan 2025"
    pub label: String,
    pub approved: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_employees: usize,
    pub by_role: BTreeMap<Role, usize>,
    /// Manager display name → number of direct reports.
    pub by_manager: BTreeMap<String, usize>,
    pub vacation_counts: StatusCounts,
    pub upcoming: Vec<VacationRequest>,
    pub monthly_trend: Vec<TrendBucket>,
    pub total_days_used: i64,
    /// Manager display name → status breakdown of their reports' requests.
    pub by_manager_status: BTreeMap<String, StatusCounts>,
    pub average_team_size: usize,
}

pub fn compute(
    employees: &[Employee],
    vacations: &[VacationRequest],
    today: NaiveDate,
    options: StatsOptions,
) -> DashboardStats {
    let by_manager = team_sizes(employees);
    let average_team_size = average_team_size(employees.len(), by_manager.len());

    DashboardStats {
        total_employees: employees.len(),
        by_role: counts_by_role(employees),
        by_manager_status: status_by_manager(employees, vacations),
        by_manager,
        vacation_counts: vacations.iter().collect(),
        upcoming: upcoming_approved(vacations, today, options.upcoming_limit),
        monthly_trend: monthly_trend(vacations, options.trend_months),
        total_days_used: total_days_used(vacations),
        average_team_size,
    }
}

pub fn counts_by_role(employees: &[Employee]) -> BTreeMap<Role, usize> {
    let mut out = BTreeMap::new();
    for e in employees {
        *out.entry(e.role).or_insert(0) += 1;
    }
    out
}

fn manager_name(id: i64, by_id: &HashMap<i64, &Employee>) -> String {
    by_id
        .get(&id)
        .map(|m| m.full_name())
        .unwrap_or_else(|| UNKNOWN_MANAGER.to_string())
}

/// Manager display name → number of direct reports.
pub fn team_sizes(employees: &[Employee]) -> BTreeMap<String, usize> {
    let by_id: HashMap<i64, &Employee> = employees.iter().map(|e| (e.id, e)).collect();
    let mut out = BTreeMap::new();
    for e in employees {
        if let Some(mid) = e.manager_id {
            *out.entry(manager_name(mid, &by_id)).or_insert(0) += 1;
        }
    }
    out
}

/// Requests of each manager's reports, broken down by status.
pub fn status_by_manager(
    employees: &[Employee],
    vacations: &[VacationRequest],
) -> BTreeMap<String, StatusCounts> {
    let by_id: HashMap<i64, &Employee> = employees.iter().map(|e| (e.id, e)).collect();
    let mut out: BTreeMap<String, StatusCounts> = BTreeMap::new();
    for v in vacations {
        let Some(mid) = by_id.get(&v.employee_id).and_then(|e| e.manager_id) else {
            continue;
        };
        out.entry(manager_name(mid, &by_id))
            .or_default()
            .record(v.status);
    }
    out
}

pub fn average_team_size(total_employees: usize, managers: usize) -> usize {
    let managers = managers.max(1);
    (total_employees as f64 / managers as f64).round() as usize
}

/// Approved requests starting today or later, earliest first.
pub fn upcoming_approved(
    vacations: &[VacationRequest],
    today: NaiveDate,
    limit: usize,
) -> Vec<VacationRequest> {
    let mut out: Vec<VacationRequest> = vacations
        .iter()
        .filter(|v| v.is_approved() && v.start_date >= today)
        .cloned()
        .collect();
    out.sort_by_key(|v| v.start_date);
    out.truncate(limit);
    out
}

/// Approved requests per calendar month of their start date: the most
/// recent `months` buckets, oldest first.
pub fn monthly_trend(vacations: &[VacationRequest], months: usize) -> Vec<TrendBucket> {
    let mut buckets: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for v in vacations.iter().filter(|v| v.is_approved()) {
        *buckets
            .entry((v.start_date.year(), v.start_date.month()))
            .or_insert(0) += 1;
    }

    let skip = buckets.len().saturating_sub(months);
    buckets
        .into_iter()
        .skip(skip)
        .map(|((year, month), approved)| TrendBucket {
            year,
            month,
            label: month_label(year, month),
            approved,
        })
        .collect()
}

/// Inclusive days over every approved request.
pub fn total_days_used(vacations: &[VacationRequest]) -> i64 {
    vacations
        .iter()
        .filter(|v| v.is_approved())
        .map(VacationRequest::days)
        .sum()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay<'a> {
    pub date: NaiveDate,
    pub vacations: Vec<&'a VacationRequest>,
}

/// Each day of the month with the approved requests covering it.
pub fn calendar_month(vacations: &[VacationRequest], year: i32, month: u32) -> Vec<CalendarDay<'_>> {
    all_days_of_month(year, month)
        .into_iter()
        .map(|date| CalendarDay {
            date,
            vacations: vacations
                .iter()
                .filter(|v| v.is_approved() && v.covers(date))
                .collect(),
        })
        .collect()
}

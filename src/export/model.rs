// src/export/model.rs

use crate::models::VacationRequest;
use serde::Serialize;
use std::collections::HashMap;

/// Flat row written by the CSV and JSON exports.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct VacationExport {
    pub id: i64,
    pub employee_id: i64,
    pub requester: String,
    pub start_date: String,
    pub end_date: String,
    pub days: i64,
    pub status: String,
    pub reason: String,
    pub created_at: String,
    pub decided_at: String,
    pub decided_by: String,
    pub decision_comment: String,
}

impl VacationExport {
    /// Requester and decider ids are resolved through `names` when known.
    pub fn from_request(v: &VacationRequest, names: &HashMap<i64, String>) -> Self {
        let name_of = |id: i64| names.get(&id).cloned().unwrap_or_else(|| id.to_string());
        let stamp = |dt: Option<chrono::NaiveDateTime>| {
            dt.map(|d| d.format("%Y-%m-%dT%H:%M:%S").to_string())
                .unwrap_or_default()
        };

        Self {
            id: v.id,
            employee_id: v.employee_id,
            requester: name_of(v.employee_id),
            start_date: v.start_date.format("%Y-%m-%d").to_string(),
            end_date: v.end_date.format("%Y-%m-%d").to_string(),
            days: v.days(),
            status: v.status.as_str().to_string(),
            reason: v.request_reason.clone().unwrap_or_default(),
            created_at: stamp(v.created_at),
            decided_at: stamp(v.decided_at),
            decided_by: v.decided_by.map(name_of).unwrap_or_default(),
            decision_comment: v.decision_comment().unwrap_or_default().to_string(),
        }
    }
}

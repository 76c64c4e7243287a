use crate::utils::date::flexible_datetime;
use chrono::{NaiveDate, NaiveDateTime};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum VacationStatus {
    Pending,
    Approved,
    Rejected,
}

impl VacationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VacationStatus::Pending => "PENDING",
            VacationStatus::Approved => "APPROVED",
            VacationStatus::Rejected => "REJECTED",
        }
    }

    /// Case-normalised key used by the statistics ("pending", ...).
    pub fn key(&self) -> &'static str {
        match self {
            VacationStatus::Pending => "pending",
            VacationStatus::Approved => "approved",
            VacationStatus::Rejected => "rejected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VacationStatus::Pending => "Pending",
            VacationStatus::Approved => "Approved",
            VacationStatus::Rejected => "Rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacationRequest {
    pub id: i64,
    pub employee_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: VacationStatus,
    #[serde(default)]
    pub request_reason: Option<String>,
    #[serde(default, with = "flexible_datetime")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "flexible_datetime")]
    pub decided_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub decided_by: Option<i64>,
    #[serde(default)]
    pub approval_comment: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

impl VacationRequest {
    /// Inclusive day count: a single-day vacation counts as 1.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    pub fn is_pending(&self) -> bool {
        self.status == VacationStatus::Pending
    }

    pub fn is_approved(&self) -> bool {
        self.status == VacationStatus::Approved
    }

    pub fn covers(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }

    /// Comment left by the decider, whatever the outcome.
    pub fn decision_comment(&self) -> Option<&str> {
        self.approval_comment
            .as_deref()
            .or(self.rejection_reason.as_deref())
    }
}

/// Body of `POST /vacations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVacation {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub request_reason: String,
}

/// Body of `PATCH /vacations/{id}/decision`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub approved: bool,
    pub comment: String,
}

/// Alternative range proposed by the backend when a request overlaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateSuggestion {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Per-field validation failure returned with a 400.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

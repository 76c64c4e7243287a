//! Form state behind the create/decide/edit dialogs.

use crate::api::{ApiError, ErrorKind};
use crate::errors::{AppError, AppResult};
use crate::models::{
    DateSuggestion, Decision, Employee, EmployeePayload, NewVacation, Role, VacationRequest,
};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

pub const MIN_PASSWORD_LEN: usize = 8;

const PASSWORD_REQUIRED: &str = "Password is required";
const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters long";
const PASSWORD_TOO_WEAK: &str = "Password must contain at least one uppercase letter, one lowercase letter, one number and one special character";
const PASSWORD_MISMATCH: &str = "Passwords do not match";

static UPPER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z]").expect("valid regex"));
static LOWER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z]").expect("valid regex"));
static DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]").expect("valid regex"));
static SPECIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[!@#$%^&*(),.?":{}|<>]"#).expect("valid regex"));

/// Check a new password against the policy, returning the message to show.
pub fn validate_password(pwd: &str) -> Result<(), &'static str> {
    if pwd.is_empty() {
        return Err(PASSWORD_REQUIRED);
    }
    if pwd.chars().count() < MIN_PASSWORD_LEN {
        return Err(PASSWORD_TOO_SHORT);
    }
    let classes = [&*UPPER, &*LOWER, &*DIGIT, &*SPECIAL];
    if !classes.iter().all(|re| re.is_match(pwd)) {
        return Err(PASSWORD_TOO_WEAK);
    }
    Ok(())
}

// ---------------------------
// Vacation request
// ---------------------------

/// The "new vacation" dialog, including the outcome of the last failed submit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacationForm {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub reason: String,
    #[serde(default)]
    pub field_errors: BTreeMap<String, String>,
    #[serde(default)]
    pub suggestions: Vec<DateSuggestion>,
    #[serde(default)]
    pub overlap_message: Option<String>,
}

impl VacationForm {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>, reason: impl Into<String>) -> Self {
        Self {
            start_date: start,
            end_date: end,
            reason: reason.into(),
            ..Self::default()
        }
    }

    /// Forget the outcome of the previous submit.
    pub fn clear_feedback(&mut self) {
        self.field_errors.clear();
        self.suggestions.clear();
        self.overlap_message = None;
    }

    pub fn has_suggestions(&self) -> bool {
        !self.suggestions.is_empty()
    }

    /// Record a failed submit so the dialog can show it.
    pub fn absorb(&mut self, err: &ApiError) {
        self.clear_feedback();
        match err.kind() {
            ErrorKind::Validation => {
                self.field_errors = err
                    .field_errors
                    .iter()
                    .map(|f| (f.field.clone(), f.message.clone()))
                    .collect();
            }
            ErrorKind::Conflict => {
                self.overlap_message = Some(err.message.clone());
                self.suggestions = err.suggestions.clone();
            }
            ErrorKind::Unauthorized | ErrorKind::Other => {}
        }
    }

    /// Adopt the n-th suggestion (1-based) as the requested range.
    pub fn apply_suggestion(&mut self, n: usize) -> AppResult<()> {
        let s = n
            .checked_sub(1)
            .and_then(|i| self.suggestions.get(i))
            .cloned()
            .ok_or(AppError::InvalidSuggestion(n))?;
        self.start_date = Some(s.start_date);
        self.end_date = Some(s.end_date);
        self.suggestions.clear();
        self.overlap_message = None;
        Ok(())
    }

    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.field_errors.get(field).map(String::as_str)
    }

    pub fn to_payload(&self) -> AppResult<NewVacation> {
        let (Some(start), Some(end)) = (self.start_date, self.end_date) else {
            return Err(AppError::InvalidForm(
                "start and end dates are required".to_string(),
            ));
        };
        Ok(NewVacation {
            start_date: start,
            end_date: end,
            request_reason: self.reason.clone(),
        })
    }
}

// ---------------------------
// Decision
// ---------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecisionForm {
    pub comment: String,
}

impl DecisionForm {
    /// Prefilled with whatever the decider already wrote.
    pub fn for_vacation(v: &VacationRequest) -> Self {
        Self {
            comment: v.decision_comment().unwrap_or_default().to_string(),
        }
    }

    pub fn to_decision(&self, approved: bool) -> Decision {
        Decision {
            approved,
            comment: self.comment.clone(),
        }
    }
}

// ---------------------------
// Employee
// ---------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub manager_id: Option<i64>,
    /// Only used when creating.
    pub password: String,
    pub confirm_password: String,
    editing: bool,
}

impl Default for EmployeeForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            role: Role::Employee,
            manager_id: None,
            password: String::new(),
            confirm_password: String::new(),
            editing: false,
        }
    }
}

impl EmployeeForm {
    pub fn for_create() -> Self {
        Self::default()
    }

    pub fn for_edit(e: &Employee) -> Self {
        Self {
            first_name: e.first_name.clone(),
            last_name: e.last_name.clone(),
            email: e.email.clone(),
            role: e.role,
            manager_id: e.manager_id,
            editing: true,
            ..Self::default()
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Password rules apply to creation only.
    pub fn validate(&self) -> AppResult<()> {
        if self.editing {
            return Ok(());
        }
        validate_password(&self.password).map_err(|m| AppError::PasswordPolicy(m.to_string()))?;
        if self.password != self.confirm_password {
            return Err(AppError::PasswordPolicy(PASSWORD_MISMATCH.to_string()));
        }
        Ok(())
    }

    pub fn to_payload(&self) -> AppResult<EmployeePayload> {
        self.validate()?;
        Ok(EmployeePayload {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            role: self.role,
            manager_id: self.manager_id,
            password: (!self.editing).then(|| self.password.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_policy_messages() {
        assert_eq!(validate_password(""), Err(PASSWORD_REQUIRED));
        assert_eq!(validate_password("Ab1!"), Err(PASSWORD_TOO_SHORT));
        assert_eq!(validate_password("abcdefgh1!"), Err(PASSWORD_TOO_WEAK));
        assert_eq!(validate_password("Abcdefgh1"), Err(PASSWORD_TOO_WEAK));
        assert!(validate_password("Abcdefg1!").is_ok());
    }

    #[test]
    fn each_character_class_is_required() {
        assert_eq!(validate_password("abcdefg1!"), Err(PASSWORD_TOO_WEAK));
        assert_eq!(validate_password("ABCDEFG1!"), Err(PASSWORD_TOO_WEAK));
        assert_eq!(validate_password("Abcdefgh!"), Err(PASSWORD_TOO_WEAK));
        assert!(SPECIAL.is_match("?") && !SPECIAL.is_match("_"));
    }

    #[test]
    fn edit_form_skips_password() {
        let e = Employee {
            id: 4,
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            email: "ann@x.io".into(),
            role: Role::Manager,
            manager_id: Some(1),
        };
        let payload = EmployeeForm::for_edit(&e).to_payload().expect("payload");
        assert!(payload.password.is_none());
        assert_eq!(payload.manager_id, Some(1));
    }

    #[test]
    fn mismatched_confirmation_is_rejected() {
        let form = EmployeeForm {
            password: "Abcdefg1!".into(),
            confirm_password: "Abcdefg1?".into(),
            ..EmployeeForm::for_create()
        };
        assert!(matches!(form.validate(), Err(AppError::PasswordPolicy(_))));
    }
}

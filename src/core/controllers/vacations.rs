//! Vacation list: loading, filters, decision, creation and deletion.

use crate::api::Backend;
use crate::core::controllers::forms::{DecisionForm, VacationForm};
use crate::core::controllers::guard::MountGuard;
use crate::core::controllers::modal::Modal;
use crate::core::controllers::ListState;
use crate::core::pagination::collect_all;
use crate::core::session::Session;
use crate::core::visibility::{DirectReports, can_delete, can_evaluate, visible_vacations};
use crate::errors::{AppError, AppResult};
use crate::models::{Employee, Role, VacationRequest, VacationStatus};
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Client-side filters. Any active filter switches the list to the full
/// collection on a single page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VacationFilters {
    pub status: Option<VacationStatus>,
    pub requester: Option<i64>,
    /// Keep requests starting on or after this day.
    pub from: Option<NaiveDate>,
    /// Keep requests ending on or before this day.
    pub to: Option<NaiveDate>,
}

impl VacationFilters {
    pub fn is_active(&self) -> bool {
        self.status.is_some() || self.requester.is_some() || self.from.is_some() || self.to.is_some()
    }

    pub fn matches(&self, v: &VacationRequest) -> bool {
        self.status.is_none_or(|s| v.status == s)
            && self.requester.is_none_or(|id| v.employee_id == id)
            && self.from.is_none_or(|d| v.start_date >= d)
            && self.to.is_none_or(|d| v.end_date <= d)
    }
}

pub type VacationModal = Modal<VacationRequest, VacationForm, DecisionForm>;

pub struct VacationsController<'a, B: Backend> {
    backend: &'a B,
    session: Session,
    guard: MountGuard,
    employees: Vec<Employee>,
    reports: Vec<Employee>,
    direct: DirectReports,
    rows: Vec<VacationRequest>,
    filters: VacationFilters,
    list: ListState,
    modal: VacationModal,
}

impl<'a, B: Backend> VacationsController<'a, B> {
    pub fn new(backend: &'a B, session: Session) -> Self {
        Self {
            backend,
            session,
            guard: MountGuard::new(),
            employees: Vec::new(),
            reports: Vec::new(),
            direct: DirectReports::default(),
            rows: Vec::new(),
            filters: VacationFilters::default(),
            list: ListState::default(),
            modal: Modal::Closed,
        }
    }

    pub fn guard(&self) -> MountGuard {
        self.guard.clone()
    }

    pub fn unmount(&self) {
        self.guard.unmount();
    }

    pub fn user(&self) -> &Employee {
        &self.session.user
    }

    pub fn rows(&self) -> &[VacationRequest] {
        &self.rows
    }

    pub fn list(&self) -> &ListState {
        &self.list
    }

    pub fn filters(&self) -> &VacationFilters {
        &self.filters
    }

    pub fn modal(&self) -> &VacationModal {
        &self.modal
    }

    pub fn modal_mut(&mut self) -> &mut VacationModal {
        &mut self.modal
    }

    pub fn direct_reports(&self) -> &DirectReports {
        &self.direct
    }

    /// Admins see everyone, managers their direct reports.
    pub async fn load_people(&mut self) -> AppResult<()> {
        let backend = self.backend;
        let token = self.session.token.as_str();

        match self.session.user.role {
            Role::Admin => {
                let all = collect_all(|page| backend.employees(token, page, None)).await?;
                if !self.guard.is_mounted() {
                    return Ok(());
                }
                self.employees = all;
            }
            Role::Manager => {
                let reports = backend.direct_reports(token).await?;
                if !self.guard.is_mounted() {
                    return Ok(());
                }
                self.direct = DirectReports::from_employees(&reports);
                self.reports = reports;
            }
            Role::Employee => {}
        }
        debug!(
            employees = self.employees.len(),
            reports = self.reports.len(),
            "people loaded"
        );
        Ok(())
    }

    /// Current page, or every page when a filter is active.
    pub async fn load(&mut self) -> AppResult<()> {
        if self.filters.is_active() {
            return self.load_all().await;
        }

        self.list.start_loading();
        let page = self
            .backend
            .vacations(&self.session.token, self.list.server_page())
            .await;
        if !self.guard.is_mounted() {
            debug!("vacations page dropped after unmount");
            return Ok(());
        }

        match page {
            Ok(page) => {
                self.list.total_pages = page.total_pages_or_one();
                self.apply(page.items);
                Ok(())
            }
            Err(e) => {
                self.list.finish(Some(e.to_string()));
                Err(e)
            }
        }
    }

    /// Every page at once, shown as a single page.
    pub async fn load_all(&mut self) -> AppResult<()> {
        self.list.start_loading();
        let backend = self.backend;
        let token = self.session.token.as_str();
        let all = collect_all(|page| backend.vacations(token, page)).await;
        if !self.guard.is_mounted() {
            debug!("vacations dropped after unmount");
            return Ok(());
        }

        match all {
            Ok(all) => {
                self.list.total_pages = 1;
                self.apply(all);
                Ok(())
            }
            Err(e) => {
                self.list.finish(Some(e.to_string()));
                Err(e)
            }
        }
    }

    fn apply(&mut self, fetched: Vec<VacationRequest>) {
        self.rows = visible_vacations(&self.session.user, &fetched, &self.direct);
        self.list.finish(None);
    }

    /// Changing filters goes back to the first page and reloads.
    pub async fn set_filters(&mut self, filters: VacationFilters) -> AppResult<()> {
        self.filters = filters;
        self.list.page = 1;
        self.load().await
    }

    pub async fn set_page(&mut self, page: u32) -> AppResult<()> {
        self.list.page = page.max(1);
        self.load().await
    }

    /// Loaded rows matching the filters, in display order.
    pub fn filtered(&self) -> Vec<&VacationRequest> {
        self.rows.iter().filter(|v| self.filters.matches(v)).collect()
    }

    /// Every name this view knows: loaded employees, reports and self.
    pub fn employee_names(&self) -> HashMap<i64, String> {
        let mut names: HashMap<i64, String> = self
            .employees
            .iter()
            .chain(self.reports.iter())
            .map(|e| (e.id, e.full_name()))
            .collect();
        names.insert(self.session.user.id, self.session.user.full_name());
        names
    }

    pub fn find(&self, id: i64) -> AppResult<&VacationRequest> {
        self.rows
            .iter()
            .find(|v| v.id == id)
            .ok_or(AppError::VacationNotFound(id))
    }

    pub fn can_evaluate(&self, v: &VacationRequest) -> bool {
        can_evaluate(&self.session.user, v, &self.direct)
    }

    pub fn can_delete(&self, v: &VacationRequest) -> bool {
        can_delete(&self.session.user, v)
    }

    /// Editable decision for pending requests the user may evaluate,
    /// read-only view otherwise.
    pub fn open_decision(&mut self, id: i64) -> AppResult<&VacationModal> {
        let v = self.find(id)?.clone();
        self.modal = if self.can_evaluate(&v) && v.is_pending() {
            let form = DecisionForm::for_vacation(&v);
            Modal::Editing(v, form)
        } else {
            Modal::Viewing(v)
        };
        debug!(id, modal = self.modal.kind(), "decision dialog opened");
        Ok(&self.modal)
    }

    /// Submit the open decision, then reload the list.
    ///
    /// The decision is recorded once the backend accepts it; a failed
    /// reload is left in `list().error` and does not fail the call.
    pub async fn decide(&mut self, approved: bool) -> AppResult<VacationRequest> {
        let Modal::Editing(v, form) = &self.modal else {
            return Err(AppError::Forbidden(
                "this request cannot be evaluated".to_string(),
            ));
        };
        let decision = form.to_decision(approved);
        let id = v.id;

        let updated = self
            .backend
            .decide_vacation(&self.session.token, id, &decision)
            .await?;
        info!(id, approved, "vacation decided");

        if self.guard.is_mounted() {
            self.modal.close();
            if let Err(e) = self.load().await {
                warn!(id, error = %e, "reload after decision failed");
            }
        }
        Ok(updated)
    }

    pub fn open_create(&mut self, form: VacationForm) {
        self.modal = Modal::Creating(form);
    }

    /// Submit the creation form.
    ///
    /// On success the new request is prepended and the dialog closes; on
    /// failure the dialog stays open carrying field errors or suggestions.
    pub async fn submit_create(&mut self) -> AppResult<VacationRequest> {
        let backend = self.backend;
        let token = self.session.token.as_str();
        let Modal::Creating(form) = &mut self.modal else {
            return Err(AppError::InvalidForm("no request is being created".to_string()));
        };

        form.clear_feedback();
        let payload = form.to_payload()?;
        match backend.create_vacation(token, &payload).await {
            Ok(created) => {
                info!(id = created.id, "vacation requested");
                if self.guard.is_mounted() {
                    self.rows.insert(0, created.clone());
                    self.modal.close();
                }
                Ok(created)
            }
            Err(e) => {
                if let Some(api) = e.api() {
                    form.absorb(api);
                }
                Err(e)
            }
        }
    }

    /// Ask for confirmation before deleting.
    pub fn request_delete(&mut self, id: i64) -> AppResult<()> {
        let v = self.find(id)?.clone();
        if !self.can_delete(&v) {
            return Err(AppError::Forbidden(format!(
                "you cannot delete vacation request {id}"
            )));
        }
        self.modal = Modal::ConfirmDelete(v);
        Ok(())
    }

    /// Delete the confirmed request and drop it from the list.
    pub async fn confirm_delete(&mut self) -> AppResult<Option<String>> {
        let Modal::ConfirmDelete(v) = &self.modal else {
            return Err(AppError::InvalidForm("nothing to delete".to_string()));
        };
        let id = v.id;

        let message = self
            .backend
            .delete_vacation(&self.session.token, id)
            .await?;
        info!(id, "vacation deleted");

        if self.guard.is_mounted() {
            self.rows.retain(|r| r.id != id);
            self.modal.close();
        }
        Ok(message)
    }

    pub fn cancel(&mut self) {
        self.modal.close();
    }
}

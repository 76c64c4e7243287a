//! Employee administration list (admin only).

use crate::api::Backend;
use crate::core::controllers::ListState;
use crate::core::controllers::forms::EmployeeForm;
use crate::core::controllers::guard::MountGuard;
use crate::core::controllers::modal::Modal;
use crate::core::pagination::collect_all;
use crate::core::session::Session;
use crate::core::visibility::can_manage_employees;
use crate::errors::{AppError, AppResult};
use crate::models::{Employee, Role};
use std::collections::HashMap;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilters {
    pub role: Option<Role>,
    pub manager: Option<i64>,
}

impl EmployeeFilters {
    pub fn matches(&self, e: &Employee) -> bool {
        self.role.is_none_or(|r| e.role == r) && self.manager.is_none_or(|m| e.reports_to(m))
    }
}

pub type EmployeeModal = Modal<Employee, EmployeeForm>;

pub struct EmployeesController<'a, B: Backend> {
    backend: &'a B,
    session: Session,
    guard: MountGuard,
    /// Every employee, used for names and the manager picker.
    all: Vec<Employee>,
    managers: Vec<Employee>,
    /// The current server page (or search result page).
    rows: Vec<Employee>,
    search: Option<String>,
    filters: EmployeeFilters,
    list: ListState,
    modal: EmployeeModal,
}

impl<'a, B: Backend> EmployeesController<'a, B> {
    pub fn new(backend: &'a B, session: Session) -> AppResult<Self> {
        if !can_manage_employees(&session.user) {
            return Err(AppError::Forbidden(
                "employee administration is reserved to administrators".to_string(),
            ));
        }
        Ok(Self {
            backend,
            session,
            guard: MountGuard::new(),
            all: Vec::new(),
            managers: Vec::new(),
            rows: Vec::new(),
            search: None,
            filters: EmployeeFilters::default(),
            list: ListState::default(),
            modal: Modal::Closed,
        })
    }

    pub fn guard(&self) -> MountGuard {
        self.guard.clone()
    }

    pub fn unmount(&self) {
        self.guard.unmount();
    }

    pub fn all(&self) -> &[Employee] {
        &self.all
    }

    pub fn managers(&self) -> &[Employee] {
        &self.managers
    }

    pub fn rows(&self) -> &[Employee] {
        &self.rows
    }

    pub fn list(&self) -> &ListState {
        &self.list
    }

    pub fn modal(&self) -> &EmployeeModal {
        &self.modal
    }

    pub fn modal_mut(&mut self) -> &mut EmployeeModal {
        &mut self.modal
    }

    pub fn search_query(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Full collection, feeding the name map and manager candidates.
    pub async fn load_all(&mut self) -> AppResult<()> {
        let backend = self.backend;
        let token = self.session.token.as_str();
        let all = collect_all(|page| backend.employees(token, page, None)).await?;
        if !self.guard.is_mounted() {
            return Ok(());
        }
        self.managers = all
            .iter()
            .filter(|e| e.is_manager_candidate())
            .cloned()
            .collect();
        self.all = all;
        debug!(
            employees = self.all.len(),
            managers = self.managers.len(),
            "employee directory loaded"
        );
        Ok(())
    }

    /// One server page, filtered by the first-name search when set.
    pub async fn load(&mut self) -> AppResult<()> {
        self.list.start_loading();
        let page = self
            .backend
            .employees(
                &self.session.token,
                self.list.server_page(),
                self.search.as_deref(),
            )
            .await;
        if !self.guard.is_mounted() {
            return Ok(());
        }

        match page {
            Ok(page) => {
                self.list.total_pages = page.total_pages_or_one();
                self.rows = page.items;
                self.list.finish(None);
                Ok(())
            }
            Err(e) => {
                self.list.finish(Some(e.to_string()));
                Err(e)
            }
        }
    }

    /// New search from the first page; an empty query clears it.
    pub async fn search(&mut self, query: &str) -> AppResult<()> {
        let query = query.trim();
        self.search = (!query.is_empty()).then(|| query.to_string());
        self.list.page = 1;
        self.load().await
    }

    pub async fn set_page(&mut self, page: u32) -> AppResult<()> {
        self.list.page = page.max(1);
        self.load().await
    }

    pub fn set_filters(&mut self, filters: EmployeeFilters) {
        self.filters = filters;
    }

    pub fn filtered(&self) -> Vec<&Employee> {
        self.rows.iter().filter(|e| self.filters.matches(e)).collect()
    }

    pub fn names(&self) -> HashMap<i64, String> {
        self.all.iter().map(|e| (e.id, e.full_name())).collect()
    }

    /// Display name of the employee's manager, if known.
    pub fn manager_name(&self, e: &Employee) -> Option<String> {
        let mid = e.manager_id?;
        self.all.iter().find(|m| m.id == mid).map(Employee::full_name)
    }

    fn find(&self, id: i64) -> AppResult<&Employee> {
        self.rows
            .iter()
            .chain(self.all.iter())
            .find(|e| e.id == id)
            .ok_or(AppError::EmployeeNotFound(id))
    }

    pub fn open_create(&mut self, form: EmployeeForm) {
        self.modal = Modal::Creating(form);
    }

    pub fn open_edit(&mut self, id: i64) -> AppResult<&mut EmployeeForm> {
        let e = self.find(id)?.clone();
        let form = EmployeeForm::for_edit(&e);
        self.modal = Modal::Editing(e, form);
        match &mut self.modal {
            Modal::Editing(_, form) => Ok(form),
            _ => Err(AppError::Other("edit dialog not open".to_string())),
        }
    }

    /// Submit the open create or edit dialog.
    pub async fn submit(&mut self) -> AppResult<Employee> {
        let (payload, editing) = match &self.modal {
            Modal::Creating(form) => (form.to_payload()?, None),
            Modal::Editing(current, form) => (form.to_payload()?, Some(current.id)),
            _ => return Err(AppError::InvalidForm("no employee form is open".to_string())),
        };

        let token = self.session.token.as_str();
        let saved = match editing {
            None => {
                let created = self.backend.create_employee(token, &payload).await?;
                info!(id = created.id, "employee created");
                if self.guard.is_mounted() {
                    self.apply_created(created.clone());
                    self.modal.close();
                }
                created
            }
            Some(id) => {
                let updated = self.backend.update_employee(token, id, &payload).await?;
                info!(id, "employee updated");
                if self.guard.is_mounted() {
                    self.apply_updated(updated.clone());
                    self.modal.close();
                }
                updated
            }
        };

        Ok(saved)
    }

    fn apply_created(&mut self, created: Employee) {
        self.rows.insert(0, created.clone());
        if created.is_manager_candidate() {
            self.managers.push(created.clone());
        }
        self.all.push(created);
    }

    /// Replace everywhere; manager membership follows the new role.
    fn apply_updated(&mut self, updated: Employee) {
        for list in [&mut self.rows, &mut self.all] {
            if let Some(slot) = list.iter_mut().find(|e| e.id == updated.id) {
                *slot = updated.clone();
            }
        }

        let listed = self.managers.iter().position(|m| m.id == updated.id);
        match (updated.is_manager_candidate(), listed) {
            (true, Some(i)) => self.managers[i] = updated,
            (true, None) => self.managers.push(updated),
            (false, Some(i)) => {
                self.managers.remove(i);
            }
            (false, None) => {}
        }
    }

    pub fn request_delete(&mut self, id: i64) -> AppResult<()> {
        let e = self.find(id)?.clone();
        self.modal = Modal::ConfirmDelete(e);
        Ok(())
    }

    pub async fn confirm_delete(&mut self) -> AppResult<Option<String>> {
        let Modal::ConfirmDelete(e) = &self.modal else {
            return Err(AppError::InvalidForm("nothing to delete".to_string()));
        };
        let id = e.id;

        let message = self
            .backend
            .delete_employee(&self.session.token, id)
            .await?;
        info!(id, "employee deleted");

        if self.guard.is_mounted() {
            self.rows.retain(|e| e.id != id);
            self.all.retain(|e| e.id != id);
            self.managers.retain(|m| m.id != id);
            self.modal.close();
        }
        Ok(message)
    }

    pub fn cancel(&mut self) {
        self.modal.close();
    }
}

//! Backend REST contract.
//!
//! `Backend` is the seam every loader and controller is generic over;
//! `ApiClient` is the HTTP implementation.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::{ApiError, ErrorKind};

use crate::errors::AppResult;
use crate::models::{
    Decision, Employee, EmployeePayload, NewVacation, Page, VacationRequest,
};
use std::future::Future;

/// Result of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    pub token: String,
    pub user: Option<Employee>,
}

/// One operation per backend endpoint. Authenticated operations take the
/// bearer token of the current session.
pub trait Backend {
    fn login(&self, email: &str, password: &str) -> impl Future<Output = AppResult<LoginResponse>>;

    fn my_profile(&self, token: &str) -> impl Future<Output = AppResult<Employee>>;

    /// `GET /employees?page=N`, or the first-name search when `first_name` is set.
    fn employees(
        &self,
        token: &str,
        page: u32,
        first_name: Option<&str>,
    ) -> impl Future<Output = AppResult<Page<Employee>>>;

    /// Employees with role ADMIN or MANAGER.
    fn managers(&self, token: &str) -> impl Future<Output = AppResult<Vec<Employee>>>;

    /// Direct reports of the caller.
    fn direct_reports(&self, token: &str) -> impl Future<Output = AppResult<Vec<Employee>>>;

    fn create_employee(
        &self,
        token: &str,
        payload: &EmployeePayload,
    ) -> impl Future<Output = AppResult<Employee>>;

    fn update_employee(
        &self,
        token: &str,
        id: i64,
        payload: &EmployeePayload,
    ) -> impl Future<Output = AppResult<Employee>>;

    /// Returns the backend's confirmation message, if any.
    fn delete_employee(&self, token: &str, id: i64)
    -> impl Future<Output = AppResult<Option<String>>>;

    fn vacations(
        &self,
        token: &str,
        page: u32,
    ) -> impl Future<Output = AppResult<Page<VacationRequest>>>;

    fn create_vacation(
        &self,
        token: &str,
        request: &NewVacation,
    ) -> impl Future<Output = AppResult<VacationRequest>>;

    fn decide_vacation(
        &self,
        token: &str,
        id: i64,
        decision: &Decision,
    ) -> impl Future<Output = AppResult<VacationRequest>>;

    fn delete_vacation(&self, token: &str, id: i64)
    -> impl Future<Output = AppResult<Option<String>>>;
}

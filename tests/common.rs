#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use axum::extract::{Path as UrlPath, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rtaskflow::api::{ApiError, Backend, LoginResponse};
use rtaskflow::core::controllers::MountGuard;
use rtaskflow::core::session::Session;
use rtaskflow::errors::AppResult;
use rtaskflow::models::{
    DateSuggestion, Decision, Employee, EmployeePayload, FieldError, NewVacation, Page, Role,
    VacationRequest, VacationStatus,
};
use serde::Serialize;
use serde_json::{Value, json};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Password accepted for every seeded account.
pub const PASSWORD: &str = "Secret1!";
/// Both fakes page their collections two items at a time.
pub const PAGE_SIZE: usize = 2;

pub fn rtf() -> Command {
    cargo_bin_cmd!("rtaskflow")
}

/// Create a fresh home directory so config and session state stay per test
pub fn temp_home(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtaskflow_home", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp home");
    path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// The binary, isolated in `home` and pointed at `api_url`.
pub fn rtf_at(home: &Path, api_url: &str) -> Command {
    let mut cmd = rtf();
    cmd.env("HOME", home)
        .env("APPDATA", home)
        .env("RTASKFLOW_API_URL", api_url)
        .env_remove("RUST_LOG")
        .env_remove("RTASKFLOW_PASSWORD");
    cmd
}

pub fn login_as(home: &Path, api_url: &str, email: &str) {
    rtf_at(home, api_url)
        .args(["login", "--email", email, "--password", PASSWORD])
        .assert()
        .success();
}

pub fn state_file(home: &Path) -> PathBuf {
    home.join(".rtaskflow").join("state.json")
}

pub fn read_state(home: &Path) -> Value {
    fs::read_to_string(state_file(home))
        .ok()
        .and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or_else(|| json!({}))
}

// ---------------------------
// Fixtures
// ---------------------------

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("fixture date")
}

fn stamp(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").expect("fixture timestamp")
}

pub fn employee(id: i64, first: &str, last: &str, role: Role, manager: Option<i64>) -> Employee {
    Employee {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}@taskflow.test", first.to_lowercase()),
        role,
        manager_id: manager,
    }
}

pub fn vacation(
    id: i64,
    employee_id: i64,
    start: &str,
    end: &str,
    status: VacationStatus,
) -> VacationRequest {
    VacationRequest {
        id,
        employee_id,
        start_date: date(start),
        end_date: date(end),
        status,
        request_reason: Some(format!("Trip #{id}")),
        created_at: None,
        decided_at: None,
        decided_by: None,
        approval_comment: None,
        rejection_reason: None,
    }
}

/// Alice runs the company, Mark leads Eve and Nina, Otto reports to Alice.
pub fn seed_employees() -> Vec<Employee> {
    vec![
        employee(1, "Alice", "Admin", Role::Admin, None),
        employee(2, "Mark", "Manager", Role::Manager, Some(1)),
        employee(3, "Eve", "Employee", Role::Employee, Some(2)),
        employee(4, "Otto", "Other", Role::Employee, Some(1)),
        employee(5, "Nina", "New", Role::Employee, Some(2)),
    ]
}

pub fn seed_vacations() -> Vec<VacationRequest> {
    let mut v10 = vacation(10, 3, "2025-07-01", "2025-07-05", VacationStatus::Approved);
    v10.created_at = Some(stamp("2025-06-01T09:00:00"));
    v10.decided_by = Some(2);
    v10.approval_comment = Some("Enjoy".to_string());

    let mut v11 = vacation(11, 3, "2030-08-10", "2030-08-12", VacationStatus::Pending);
    v11.created_at = Some(stamp("2025-06-02T09:00:00"));

    let mut v12 = vacation(12, 4, "2030-09-01", "2030-09-03", VacationStatus::Pending);
    v12.created_at = Some(stamp("2025-06-03T09:00:00"));

    let mut v13 = vacation(13, 2, "2025-05-05", "2025-05-06", VacationStatus::Rejected);
    v13.created_at = Some(stamp("2025-04-20T09:00:00"));
    v13.decided_by = Some(1);
    v13.rejection_reason = Some("Busy week".to_string());

    let mut v14 = vacation(14, 5, "2030-07-01", "2030-07-02", VacationStatus::Approved);
    v14.created_at = Some(stamp("2025-06-04T09:00:00"));
    v14.decided_by = Some(2);

    vec![v10, v11, v12, v13, v14]
}

pub fn session_for(id: i64) -> Session {
    let user = seed_employees()
        .into_iter()
        .find(|e| e.id == id)
        .expect("seeded employee");
    Session {
        token: format!("token-{id}"),
        user,
    }
}

fn user_id_from_token(token: &str) -> Option<i64> {
    token.strip_prefix("token-")?.parse().ok()
}

/// Alternatives offered when `start..=end` collides with a live request:
/// right after it, or right before it.
pub fn overlap_suggestions(
    existing: &[VacationRequest],
    employee_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> Option<Vec<DateSuggestion>> {
    let clash = existing.iter().find(|v| {
        v.employee_id == employee_id
            && v.status != VacationStatus::Rejected
            && v.start_date <= end
            && start <= v.end_date
    })?;
    let len = (end - start).num_days();
    Some(vec![
        DateSuggestion {
            start_date: clash.end_date + Duration::days(1),
            end_date: clash.end_date + Duration::days(1 + len),
        },
        DateSuggestion {
            start_date: clash.start_date - Duration::days(1 + len),
            end_date: clash.start_date - Duration::days(1),
        },
    ])
}

fn page_of<T: Clone>(items: &[T], page: u32) -> Page<T> {
    let total_pages = items.len().div_ceil(PAGE_SIZE).max(1) as u32;
    Page {
        items: items
            .iter()
            .skip(page as usize * PAGE_SIZE)
            .take(PAGE_SIZE)
            .cloned()
            .collect(),
        page: Some(page),
        total_pages: Some(total_pages),
        total: Some(items.len() as u64),
    }
}

// ---------------------------
// In-memory backend
// ---------------------------

/// `Backend` over plain vectors; records every call as "op:arg".
pub struct MemoryBackend {
    pub employees: RefCell<Vec<Employee>>,
    pub vacations: RefCell<Vec<VacationRequest>>,
    pub calls: RefCell<Vec<String>>,
    /// Returned (once) by the next call instead of doing the work.
    pub fail_next: RefCell<Option<ApiError>>,
    /// Unmounted as soon as a vacation page is requested.
    pub unmount_on_fetch: RefCell<Option<MountGuard>>,
    /// Armed as `fail_next` once a decision has been stored.
    pub fail_after_decide: RefCell<Option<ApiError>>,
    next_id: Cell<i64>,
}

impl MemoryBackend {
    pub fn seeded() -> Self {
        Self {
            employees: RefCell::new(seed_employees()),
            vacations: RefCell::new(seed_vacations()),
            calls: RefCell::new(Vec::new()),
            fail_next: RefCell::new(None),
            unmount_on_fetch: RefCell::new(None),
            fail_after_decide: RefCell::new(None),
            next_id: Cell::new(100),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    pub fn fail_with(&self, err: ApiError) {
        *self.fail_next.borrow_mut() = Some(err);
    }

    fn record(&self, call: String) -> AppResult<()> {
        self.calls.borrow_mut().push(call);
        match self.fail_next.borrow_mut().take() {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    fn user(&self, token: &str) -> AppResult<Employee> {
        user_id_from_token(token)
            .and_then(|id| self.employees.borrow().iter().find(|e| e.id == id).cloned())
            .ok_or_else(|| ApiError::new(401, "Unauthorized").into())
    }

    fn next_id(&self) -> i64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}

impl Backend for MemoryBackend {
    async fn login(&self, email: &str, password: &str) -> AppResult<LoginResponse> {
        self.record(format!("login:{email}"))?;
        let found = self
            .employees
            .borrow()
            .iter()
            .find(|e| e.email == email)
            .cloned();
        match found {
            Some(e) if password == PASSWORD => Ok(LoginResponse {
                token: format!("token-{}", e.id),
                user: None,
            }),
            _ => Err(ApiError::new(401, "Invalid email or password").into()),
        }
    }

    async fn my_profile(&self, token: &str) -> AppResult<Employee> {
        self.record("me".to_string())?;
        self.user(token)
    }

    async fn employees(
        &self,
        token: &str,
        page: u32,
        first_name: Option<&str>,
    ) -> AppResult<Page<Employee>> {
        self.record(format!("employees:{page}:{}", first_name.unwrap_or("")))?;
        self.user(token)?;
        let all = self.employees.borrow();
        let matching: Vec<Employee> = all
            .iter()
            .filter(|e| {
                first_name.is_none_or(|n| e.first_name.to_lowercase().contains(&n.to_lowercase()))
            })
            .cloned()
            .collect();
        Ok(page_of(&matching, page))
    }

    async fn managers(&self, token: &str) -> AppResult<Vec<Employee>> {
        self.record("managers".to_string())?;
        self.user(token)?;
        Ok(self
            .employees
            .borrow()
            .iter()
            .filter(|e| e.role.can_lead())
            .cloned()
            .collect())
    }

    async fn direct_reports(&self, token: &str) -> AppResult<Vec<Employee>> {
        self.record("reports".to_string())?;
        let me = self.user(token)?;
        Ok(self
            .employees
            .borrow()
            .iter()
            .filter(|e| e.reports_to(me.id))
            .cloned()
            .collect())
    }

    async fn create_employee(&self, token: &str, payload: &EmployeePayload) -> AppResult<Employee> {
        self.record(format!("create_employee:{}", payload.email))?;
        self.user(token)?;
        if self.employees.borrow().iter().any(|e| e.email == payload.email) {
            let mut err = ApiError::new(400, "Validation failed");
            err.field_errors.push(FieldError {
                field: "email".to_string(),
                message: "Email already in use".to_string(),
            });
            return Err(err.into());
        }
        let created = Employee {
            id: self.next_id(),
            first_name: payload.first_name.clone(),
            last_name: payload.last_name.clone(),
            email: payload.email.clone(),
            role: payload.role,
            manager_id: payload.manager_id,
        };
        self.employees.borrow_mut().push(created.clone());
        Ok(created)
    }

    async fn update_employee(
        &self,
        token: &str,
        id: i64,
        payload: &EmployeePayload,
    ) -> AppResult<Employee> {
        self.record(format!("update_employee:{id}"))?;
        self.user(token)?;
        let mut all = self.employees.borrow_mut();
        let slot = all
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| ApiError::new(404, "Employee not found"))?;
        slot.first_name = payload.first_name.clone();
        slot.last_name = payload.last_name.clone();
        slot.email = payload.email.clone();
        slot.role = payload.role;
        slot.manager_id = payload.manager_id;
        Ok(slot.clone())
    }

    async fn delete_employee(&self, token: &str, id: i64) -> AppResult<Option<String>> {
        self.record(format!("delete_employee:{id}"))?;
        self.user(token)?;
        self.employees.borrow_mut().retain(|e| e.id != id);
        Ok(Some("Employee deleted".to_string()))
    }

    async fn vacations(&self, token: &str, page: u32) -> AppResult<Page<VacationRequest>> {
        self.record(format!("vacations:{page}"))?;
        self.user(token)?;
        if let Some(guard) = self.unmount_on_fetch.borrow().as_ref() {
            guard.unmount();
        }
        Ok(page_of(&self.vacations.borrow(), page))
    }

    async fn create_vacation(
        &self,
        token: &str,
        request: &NewVacation,
    ) -> AppResult<VacationRequest> {
        self.record("create_vacation".to_string())?;
        let me = self.user(token)?;
        if request.start_date > request.end_date {
            let mut err = ApiError::new(400, "Validation failed");
            err.field_errors.push(FieldError {
                field: "endDate".to_string(),
                message: "End date must be after start date".to_string(),
            });
            return Err(err.into());
        }
        if let Some(suggestions) = overlap_suggestions(
            &self.vacations.borrow(),
            me.id,
            request.start_date,
            request.end_date,
        ) {
            let mut err = ApiError::new(400, "Vacation overlaps with an existing request");
            err.suggestions = suggestions;
            return Err(err.into());
        }

        let created = VacationRequest {
            id: self.next_id(),
            employee_id: me.id,
            start_date: request.start_date,
            end_date: request.end_date,
            status: VacationStatus::Pending,
            request_reason: Some(request.request_reason.clone()),
            created_at: None,
            decided_at: None,
            decided_by: None,
            approval_comment: None,
            rejection_reason: None,
        };
        self.vacations.borrow_mut().push(created.clone());
        Ok(created)
    }

    async fn decide_vacation(
        &self,
        token: &str,
        id: i64,
        decision: &Decision,
    ) -> AppResult<VacationRequest> {
        self.record(format!("decide:{id}:{}", decision.approved))?;
        let me = self.user(token)?;
        let mut all = self.vacations.borrow_mut();
        let v = all
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| ApiError::new(404, "Vacation not found"))?;
        if decision.approved {
            v.status = VacationStatus::Approved;
            v.approval_comment = Some(decision.comment.clone());
        } else {
            v.status = VacationStatus::Rejected;
            v.rejection_reason = Some(decision.comment.clone());
        }
        v.decided_by = Some(me.id);
        if let Some(err) = self.fail_after_decide.borrow_mut().take() {
            self.fail_with(err);
        }
        Ok(v.clone())
    }

    async fn delete_vacation(&self, token: &str, id: i64) -> AppResult<Option<String>> {
        self.record(format!("delete_vacation:{id}"))?;
        self.user(token)?;
        self.vacations.borrow_mut().retain(|v| v.id != id);
        Ok(Some("Vacation deleted".to_string()))
    }
}

// ---------------------------
// HTTP backend
// ---------------------------

pub struct FakeState {
    pub employees: Vec<Employee>,
    pub vacations: Vec<VacationRequest>,
    /// When set, every authenticated route answers 401.
    pub revoked: bool,
    /// "METHOD /path?page=N" of every request, in arrival order.
    pub requests: Vec<String>,
    next_id: i64,
}

type Shared = Arc<Mutex<FakeState>>;

/// A REST backend on 127.0.0.1, serving the seed data.
pub struct FakeServer {
    pub url: String,
    state: Shared,
}

impl FakeServer {
    pub fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(FakeState {
            employees: seed_employees(),
            vacations: seed_vacations(),
            revoked: false,
            requests: Vec::new(),
            next_id: 100,
        }));

        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind fake backend");
        listener.set_nonblocking(true).expect("non-blocking listener");
        let addr = listener.local_addr().expect("local addr");
        let app = router(state.clone());

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("fake backend runtime");
            rt.block_on(async move {
                let listener =
                    tokio::net::TcpListener::from_std(listener).expect("tokio listener");
                axum::serve(listener, app).await.expect("fake backend");
            });
        });

        Self {
            url: format!("http://{addr}"),
            state,
        }
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake backend state")
    }

    pub fn revoke_tokens(&self) {
        self.state().revoked = true;
    }

    pub fn requests(&self) -> Vec<String> {
        self.state().requests.clone()
    }

    pub fn vacation(&self, id: i64) -> Option<VacationRequest> {
        self.state().vacations.iter().find(|v| v.id == id).cloned()
    }

    pub fn employee(&self, id: i64) -> Option<Employee> {
        self.state().employees.iter().find(|e| e.id == id).cloned()
    }
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/employees", get(list_employees).post(create_employee))
        .route("/employees/me", get(me))
        .route("/employees/managers", get(managers))
        .route("/employees/by-manager", get(by_manager))
        .route("/employees/by-first-name/{name}", get(by_first_name))
        .route(
            "/employees/{id}",
            patch(update_employee).delete(delete_employee),
        )
        .route("/vacations", get(list_vacations).post(create_vacation))
        .route("/vacations/{id}", axum::routing::delete(delete_vacation))
        .route("/vacations/{id}/decision", patch(decide_vacation))
        .with_state(state)
}

fn reply(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).expect("serializable fixture")
}

fn page_json<T: Serialize + Clone>(items: &[T], page: u32, list_key: &str) -> Value {
    let p = page_of(items, page);
    json!({
        list_key: to_json(&p.items),
        "page": page,
        "totalPages": p.total_pages,
        "totalElements": items.len(),
    })
}

fn page_param(q: &HashMap<String, String>) -> u32 {
    q.get("page").and_then(|p| p.parse().ok()).unwrap_or(0)
}

/// The caller behind the bearer token, or the 401 to send back.
fn caller(state: &FakeState, headers: &HeaderMap) -> Result<Employee, Response> {
    let unauthorized = || reply(StatusCode::UNAUTHORIZED, json!({ "message": "Unauthorized" }));
    if state.revoked {
        return Err(unauthorized());
    }
    headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .and_then(user_id_from_token)
        .and_then(|id| state.employees.iter().find(|e| e.id == id).cloned())
        .ok_or_else(unauthorized)
}

fn validation(field: &str, message: &str) -> Response {
    reply(
        StatusCode::BAD_REQUEST,
        json!({
            "message": "Validation failed",
            "errors": [{ "field": field, "message": message }],
        }),
    )
}

async fn login(State(s): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut st = s.lock().expect("state");
    st.requests.push("POST /auth/login".to_string());
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    match st.employees.iter().find(|e| e.email == email) {
        Some(e) if password == PASSWORD => reply(
            StatusCode::OK,
            json!({ "data": { "token": format!("token-{}", e.id) } }),
        ),
        _ => reply(
            StatusCode::UNAUTHORIZED,
            json!({ "message": "Invalid email or password" }),
        ),
    }
}

async fn me(State(s): State<Shared>, headers: HeaderMap) -> Response {
    let mut st = s.lock().expect("state");
    st.requests.push("GET /employees/me".to_string());
    match caller(&st, &headers) {
        Ok(user) => reply(StatusCode::OK, json!({ "data": to_json(&user) })),
        Err(r) => r,
    }
}

async fn list_employees(
    State(s): State<Shared>,
    headers: HeaderMap,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    let mut st = s.lock().expect("state");
    let page = page_param(&q);
    st.requests.push(format!("GET /employees?page={page}"));
    if let Err(r) = caller(&st, &headers) {
        return r;
    }
    reply(
        StatusCode::OK,
        json!({ "data": page_json(&st.employees, page, "items") }),
    )
}

async fn by_first_name(
    State(s): State<Shared>,
    headers: HeaderMap,
    UrlPath(name): UrlPath<String>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    let mut st = s.lock().expect("state");
    let page = page_param(&q);
    st.requests
        .push(format!("GET /employees/by-first-name/{name}?page={page}"));
    if let Err(r) = caller(&st, &headers) {
        return r;
    }
    let needle = name.to_lowercase();
    let matching: Vec<Employee> = st
        .employees
        .iter()
        .filter(|e| e.first_name.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    reply(StatusCode::OK, page_json(&matching, page, "content"))
}

async fn managers(State(s): State<Shared>, headers: HeaderMap) -> Response {
    let mut st = s.lock().expect("state");
    st.requests.push("GET /employees/managers".to_string());
    if let Err(r) = caller(&st, &headers) {
        return r;
    }
    let leads: Vec<&Employee> = st.employees.iter().filter(|e| e.role.can_lead()).collect();
    reply(StatusCode::OK, to_json(&leads))
}

async fn by_manager(State(s): State<Shared>, headers: HeaderMap) -> Response {
    let mut st = s.lock().expect("state");
    st.requests.push("GET /employees/by-manager".to_string());
    let me = match caller(&st, &headers) {
        Ok(me) => me,
        Err(r) => return r,
    };
    let reports: Vec<&Employee> = st.employees.iter().filter(|e| e.reports_to(me.id)).collect();
    reply(StatusCode::OK, json!({ "data": to_json(&reports) }))
}

fn employee_from_body(id: i64, body: &Value) -> Option<Employee> {
    Some(Employee {
        id,
        first_name: body["firstName"].as_str()?.to_string(),
        last_name: body["lastName"].as_str()?.to_string(),
        email: body["email"].as_str()?.to_string(),
        role: Role::from_code(body["role"].as_str()?)?,
        manager_id: body["managerId"].as_i64(),
    })
}

async fn create_employee(
    State(s): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut st = s.lock().expect("state");
    st.requests.push("POST /employees".to_string());
    let me = match caller(&st, &headers) {
        Ok(me) => me,
        Err(r) => return r,
    };
    if me.role != Role::Admin {
        return reply(StatusCode::FORBIDDEN, json!({ "message": "Access denied" }));
    }
    let id = st.next_id;
    let Some(created) = employee_from_body(id, &body) else {
        return validation("firstName", "All fields are required");
    };
    if st.employees.iter().any(|e| e.email == created.email) {
        return validation("email", "Email already in use");
    }
    st.next_id += 1;
    st.employees.push(created.clone());
    reply(
        StatusCode::CREATED,
        json!({ "data": to_json(&created), "message": "Employee created" }),
    )
}

async fn update_employee(
    State(s): State<Shared>,
    headers: HeaderMap,
    UrlPath(id): UrlPath<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut st = s.lock().expect("state");
    st.requests.push(format!("PATCH /employees/{id}"));
    if let Err(r) = caller(&st, &headers) {
        return r;
    }
    let Some(updated) = employee_from_body(id, &body) else {
        return validation("firstName", "All fields are required");
    };
    match st.employees.iter_mut().find(|e| e.id == id) {
        Some(slot) => {
            *slot = updated.clone();
            reply(StatusCode::OK, json!({ "data": to_json(&updated) }))
        }
        None => reply(
            StatusCode::NOT_FOUND,
            json!({ "message": "Employee not found" }),
        ),
    }
}

async fn delete_employee(
    State(s): State<Shared>,
    headers: HeaderMap,
    UrlPath(id): UrlPath<i64>,
) -> Response {
    let mut st = s.lock().expect("state");
    st.requests.push(format!("DELETE /employees/{id}"));
    if let Err(r) = caller(&st, &headers) {
        return r;
    }
    st.employees.retain(|e| e.id != id);
    reply(StatusCode::OK, json!({ "message": "Employee deleted" }))
}

async fn list_vacations(
    State(s): State<Shared>,
    headers: HeaderMap,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    let mut st = s.lock().expect("state");
    let page = page_param(&q);
    st.requests.push(format!("GET /vacations?page={page}"));
    if let Err(r) = caller(&st, &headers) {
        return r;
    }
    reply(StatusCode::OK, page_json(&st.vacations, page, "content"))
}

async fn create_vacation(
    State(s): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut st = s.lock().expect("state");
    st.requests.push("POST /vacations".to_string());
    let me = match caller(&st, &headers) {
        Ok(me) => me,
        Err(r) => return r,
    };

    let day = |key: &str| {
        body[key]
            .as_str()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
    };
    let (Some(start), Some(end)) = (day("startDate"), day("endDate")) else {
        return validation("startDate", "Start and end dates are required");
    };
    if start > end {
        return validation("endDate", "End date must be after start date");
    }
    if let Some(suggestions) = overlap_suggestions(&st.vacations, me.id, start, end) {
        return reply(
            StatusCode::BAD_REQUEST,
            json!({
                "message": "Vacation overlaps with an existing request",
                "data": { "suggestions": to_json(&suggestions) },
            }),
        );
    }

    let created = VacationRequest {
        id: st.next_id,
        employee_id: me.id,
        start_date: start,
        end_date: end,
        status: VacationStatus::Pending,
        request_reason: body["requestReason"].as_str().map(str::to_string),
        created_at: Some(stamp("2026-01-15T08:30:00")),
        decided_at: None,
        decided_by: None,
        approval_comment: None,
        rejection_reason: None,
    };
    st.next_id += 1;
    st.vacations.push(created.clone());
    reply(
        StatusCode::CREATED,
        json!({ "data": to_json(&created), "message": "Vacation requested" }),
    )
}

async fn decide_vacation(
    State(s): State<Shared>,
    headers: HeaderMap,
    UrlPath(id): UrlPath<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut st = s.lock().expect("state");
    st.requests.push(format!("PATCH /vacations/{id}/decision"));
    let me = match caller(&st, &headers) {
        Ok(me) => me,
        Err(r) => return r,
    };
    let approved = body["approved"].as_bool().unwrap_or(false);
    let comment = body["comment"].as_str().unwrap_or_default().to_string();

    let Some(v) = st.vacations.iter_mut().find(|v| v.id == id) else {
        return reply(
            StatusCode::NOT_FOUND,
            json!({ "message": "Vacation not found" }),
        );
    };
    if v.status != VacationStatus::Pending {
        return reply(
            StatusCode::BAD_REQUEST,
            json!({ "message": "Vacation already decided" }),
        );
    }
    if approved {
        v.status = VacationStatus::Approved;
        v.approval_comment = Some(comment);
    } else {
        v.status = VacationStatus::Rejected;
        v.rejection_reason = Some(comment);
    }
    v.decided_by = Some(me.id);
    v.decided_at = Some(stamp("2026-01-16T10:00:00"));
    let updated = v.clone();
    reply(StatusCode::OK, json!({ "data": to_json(&updated) }))
}

async fn delete_vacation(
    State(s): State<Shared>,
    headers: HeaderMap,
    UrlPath(id): UrlPath<i64>,
) -> Response {
    let mut st = s.lock().expect("state");
    st.requests.push(format!("DELETE /vacations/{id}"));
    if let Err(r) = caller(&st, &headers) {
        return r;
    }
    st.vacations.retain(|v| v.id != id);
    reply(StatusCode::OK, json!({ "message": "Vacation deleted" }))
}

//! HTTP implementation of the backend contract.

use crate::api::error::ApiError;
use crate::api::{Backend, LoginResponse};
use crate::errors::{AppError, AppResult};
use crate::models::{
    Decision, Employee, EmployeePayload, ListPayload, NewVacation, Page, VacationRequest,
};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, warn};

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("rtaskflow/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base_url = base_url.trim().trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| AppError::Config(format!("invalid API url '{base_url}': {e}")))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> AppResult<Url> {
        Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| AppError::Config(format!("invalid API url: {e}")))
    }

    fn request(&self, method: Method, url: Url, token: Option<&str>) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match token {
            Some(t) => builder.bearer_auth(t),
            None => builder,
        }
    }

    /// Send and return the raw (still enveloped) JSON body.
    async fn send_raw(&self, builder: RequestBuilder) -> AppResult<Value> {
        let request = builder.build()?;
        debug!(method = %request.method(), url = %request.url(), "backend request");
        let response = self.http.execute(request).await?;
        handle_response(response).await
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AppResult<T> {
        let raw = self.send_raw(builder).await?;
        Ok(serde_json::from_value(unwrap_envelope(raw))?)
    }
}

/// Read the body and turn non-success statuses into `ApiError`.
///
/// A success body that is empty or not JSON becomes `{}`.
pub async fn handle_response(response: Response) -> AppResult<Value> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        let err = ApiError::from_body(status.as_u16(), status.canonical_reason(), &text);
        warn!(status = err.status, message = %err.message, "backend returned an error");
        return Err(err.into());
    }

    Ok(serde_json::from_str(&text).unwrap_or_else(|_| json!({})))
}

/// Strip `{"data": ...}` wrappers, however deep.
pub fn unwrap_envelope(mut value: Value) -> Value {
    loop {
        let inner = match &mut value {
            Value::Object(map) => match map.remove("data") {
                Some(inner) if !inner.is_null() => inner,
                _ => break,
            },
            _ => break,
        };
        value = inner;
    }
    value
}

fn message_of(raw: &Value) -> Option<String> {
    raw.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[derive(Deserialize)]
struct LoginBody {
    token: Option<String>,
    #[serde(default)]
    user: Option<Employee>,
}

fn parse_login(value: Value) -> AppResult<LoginResponse> {
    if let Value::String(token) = value {
        return Ok(LoginResponse { token, user: None });
    }

    let body: LoginBody = serde_json::from_value(value)?;
    match body.token {
        Some(token) if !token.is_empty() => Ok(LoginResponse {
            token,
            user: body.user,
        }),
        _ => Err(AppError::LoginFailed(
            "the server did not return a token".to_string(),
        )),
    }
}

impl Backend for ApiClient {
    async fn login(&self, email: &str, password: &str) -> AppResult<LoginResponse> {
        let url = self.endpoint("/auth/login")?;
        let builder = self
            .request(Method::POST, url, None)
            .json(&json!({ "email": email, "password": password }));
        let raw = self.send_raw(builder).await?;
        parse_login(unwrap_envelope(raw))
    }

    async fn my_profile(&self, token: &str) -> AppResult<Employee> {
        let url = self.endpoint("/employees/me")?;
        self.send(self.request(Method::GET, url, Some(token))).await
    }

    async fn employees(
        &self,
        token: &str,
        page: u32,
        first_name: Option<&str>,
    ) -> AppResult<Page<Employee>> {
        let url = match first_name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => {
                let mut url = self.endpoint("/employees/by-first-name")?;
                url.path_segments_mut()
                    .map_err(|_| AppError::Config("API url cannot be a base".to_string()))?
                    .push(name);
                url
            }
            None => self.endpoint("/employees")?,
        };

        let builder = self
            .request(Method::GET, url, Some(token))
            .query(&[("page", page)]);
        self.send(builder).await
    }

    async fn managers(&self, token: &str) -> AppResult<Vec<Employee>> {
        let url = self.endpoint("/employees/managers")?;
        let list: ListPayload<Employee> = self.send(self.request(Method::GET, url, Some(token))).await?;
        Ok(list.into_vec())
    }

    async fn direct_reports(&self, token: &str) -> AppResult<Vec<Employee>> {
        let url = self.endpoint("/employees/by-manager")?;
        let list: ListPayload<Employee> = self.send(self.request(Method::GET, url, Some(token))).await?;
        Ok(list.into_vec())
    }

    async fn create_employee(&self, token: &str, payload: &EmployeePayload) -> AppResult<Employee> {
        let url = self.endpoint("/employees")?;
        self.send(self.request(Method::POST, url, Some(token)).json(payload))
            .await
    }

    async fn update_employee(
        &self,
        token: &str,
        id: i64,
        payload: &EmployeePayload,
    ) -> AppResult<Employee> {
        let url = self.endpoint(&format!("/employees/{id}"))?;
        self.send(self.request(Method::PATCH, url, Some(token)).json(payload))
            .await
    }

    async fn delete_employee(&self, token: &str, id: i64) -> AppResult<Option<String>> {
        let url = self.endpoint(&format!("/employees/{id}"))?;
        let raw = self
            .send_raw(self.request(Method::DELETE, url, Some(token)))
            .await?;
        Ok(message_of(&raw))
    }

    async fn vacations(&self, token: &str, page: u32) -> AppResult<Page<VacationRequest>> {
        let url = self.endpoint("/vacations")?;
        let builder = self
            .request(Method::GET, url, Some(token))
            .query(&[("page", page)]);
        self.send(builder).await
    }

    async fn create_vacation(
        &self,
        token: &str,
        request: &NewVacation,
    ) -> AppResult<VacationRequest> {
        let url = self.endpoint("/vacations")?;
        self.send(self.request(Method::POST, url, Some(token)).json(request))
            .await
    }

    async fn decide_vacation(
        &self,
        token: &str,
        id: i64,
        decision: &Decision,
    ) -> AppResult<VacationRequest> {
        let url = self.endpoint(&format!("/vacations/{id}/decision"))?;
        self.send(self.request(Method::PATCH, url, Some(token)).json(decision))
            .await
    }

    async fn delete_vacation(&self, token: &str, id: i64) -> AppResult<Option<String>> {
        let url = self.endpoint(&format!("/vacations/{id}"))?;
        let raw = self
            .send_raw(self.request(Method::DELETE, url, Some(token)))
            .await?;
        Ok(message_of(&raw))
    }
}

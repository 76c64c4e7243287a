//! Session store: the only writer of the credential.
//!
//! The token is the sole durable credential. The user profile lives in memory
//! only and is fetched lazily after login (`refresh_profile`).

use crate::api::Backend;
use crate::core::storage::{ACTIVE_TAB_KEY, LocalStorage, TOKEN_KEY, VACATION_DRAFT_KEY};
use crate::errors::{AppError, AppResult};
use crate::models::Employee;
use tracing::{debug, info, warn};

/// Authenticated context handed to every API-calling component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: Employee,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub token: Option<String>,
    pub user: Option<Employee>,
    pub loading: bool,
    pub error: Option<String>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

pub struct SessionStore {
    state: SessionState,
    storage: LocalStorage,
}

impl SessionStore {
    /// Rebuild the in-memory state from durable storage.
    pub fn restore(storage: LocalStorage) -> Self {
        let token = storage
            .get(TOKEN_KEY)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        Self {
            state: SessionState {
                token,
                ..SessionState::default()
            },
            storage,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn token(&self) -> Option<&str> {
        self.state.token.as_deref()
    }

    pub fn user(&self) -> Option<&Employee> {
        self.state.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut LocalStorage {
        &mut self.storage
    }

    /// The authenticated context, once both token and profile are known.
    pub fn session(&self) -> Option<Session> {
        Some(Session {
            token: self.state.token.clone()?,
            user: self.state.user.clone()?,
        })
    }

    pub fn login_start(&mut self) {
        self.state.loading = true;
        self.state.error = None;
    }

    pub fn login_success(&mut self, token: String, user: Option<Employee>) -> AppResult<()> {
        self.storage.set(TOKEN_KEY, token.clone())?;
        self.state.loading = false;
        self.state.token = Some(token);
        self.state.user = user;
        Ok(())
    }

    pub fn login_failure(&mut self, message: impl Into<String>) {
        self.state.loading = false;
        self.state.error = Some(message.into());
    }

    /// Drop the credential and every piece of per-user durable state.
    pub fn logout(&mut self) -> AppResult<()> {
        self.state.token = None;
        self.state.user = None;
        self.state.loading = false;
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(ACTIVE_TAB_KEY)?;
        self.storage.remove(VACATION_DRAFT_KEY)?;
        info!("session closed");
        Ok(())
    }

    pub fn set_user(&mut self, user: Employee) {
        self.state.user = Some(user);
    }

    /// Drive the full login lifecycle against the backend.
    pub async fn login<B: Backend>(
        &mut self,
        backend: &B,
        email: &str,
        password: &str,
    ) -> AppResult<()> {
        self.login_start();
        match backend.login(email, password).await {
            Ok(resp) => {
                debug!(email, "login accepted");
                self.login_success(resp.token, resp.user)
            }
            Err(e) => {
                let message = match e.api() {
                    Some(api) => api.message.clone(),
                    None => e.to_string(),
                };
                self.login_failure(message.clone());
                Err(AppError::LoginFailed(message))
            }
        }
    }

    /// Fetch the profile when it is not cached yet.
    ///
    /// A 401 tears the session down.
    pub async fn refresh_profile<B: Backend>(&mut self, backend: &B) -> AppResult<Employee> {
        if let Some(user) = &self.state.user {
            return Ok(user.clone());
        }

        let token = self.token().ok_or(AppError::NotAuthenticated)?.to_string();
        match backend.my_profile(&token).await {
            Ok(user) => {
                self.set_user(user.clone());
                Ok(user)
            }
            Err(e) if e.is_unauthorized() => {
                warn!("profile refresh rejected, logging out");
                self.logout()?;
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Token plus freshly loaded profile, or `NotAuthenticated`.
    pub async fn require_session<B: Backend>(&mut self, backend: &B) -> AppResult<Session> {
        if !self.is_authenticated() {
            return Err(AppError::NotAuthenticated);
        }
        self.refresh_profile(backend).await?;
        self.session().ok_or(AppError::NotAuthenticated)
    }
}

pub mod config;
pub mod employees;
pub mod export;
pub mod home;
pub mod login;
pub mod logout;
pub mod open;
pub mod profile;
pub mod vacations;
pub mod whoami;

use crate::api::ApiClient;
use crate::config::Config;
use crate::core::session::{Session, SessionStore};
use crate::core::storage::LocalStorage;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use std::io::{self, Write};

/// Everything a backend-facing command needs.
pub struct Context {
    pub cfg: Config,
    pub client: ApiClient,
    pub session: SessionStore,
}

impl Context {
    pub fn new(cfg: Config, api_url: Option<&str>) -> AppResult<Self> {
        let client = ApiClient::new(api_url.unwrap_or(&cfg.api_url))?;
        let storage = LocalStorage::open(Config::state_file())?;
        Ok(Self {
            cfg,
            client,
            session: SessionStore::restore(storage),
        })
    }

    /// Token plus profile, fetching the profile when needed.
    pub async fn require_session(&mut self) -> AppResult<Session> {
        self.session.require_session(&self.client).await
    }
}

/// Ask a yes/no question on stdin; anything but "y"/"yes" is a no.
pub(crate) fn confirm(question: &str) -> AppResult<bool> {
    warning(question);
    print!("Continue? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let ans = answer.trim().to_ascii_lowercase();
    Ok(ans == "y" || ans == "yes")
}

use crate::cli::commands::Context;
use crate::cli::parser::Commands;
use crate::core::navigation::Navigator;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use std::env;
use std::io::{self, Write};

pub const PASSWORD_ENV: &str = "RTASKFLOW_PASSWORD";

/// Handle the `login` command
pub async fn handle(cmd: &Commands, ctx: &mut Context) -> AppResult<()> {
    if let Commands::Login { email, password } = cmd {
        let password = resolve_password(password.as_deref())?;

        ctx.session.login(&ctx.client, email, &password).await?;
        let user = ctx.session.refresh_profile(&ctx.client).await?;
        let tab = Navigator::new(ctx.session.storage_mut()).open(&user, None)?;

        success(format!(
            "Logged in as {} ({})",
            user.full_name(),
            user.role.label()
        ));
        info(format!("Current view: {tab} (rtaskflow open)"));
    }
    Ok(())
}

/// Flag first, then the environment, then an interactive prompt.
fn resolve_password(flag: Option<&str>) -> AppResult<String> {
    if let Some(p) = flag {
        return Ok(p.to_string());
    }
    if let Ok(p) = env::var(PASSWORD_ENV)
        && !p.is_empty()
    {
        return Ok(p);
    }

    print!("Password: ");
    io::stdout().flush().ok();
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let line = line.trim_end_matches(['\r', '\n']).to_string();
    if line.is_empty() {
        return Err(AppError::LoginFailed("a password is required".to_string()));
    }
    Ok(line)
}

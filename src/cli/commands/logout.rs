use crate::cli::commands::Context;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `logout` command
pub fn handle(ctx: &mut Context) -> AppResult<()> {
    if !ctx.session.is_authenticated() {
        info("No active session.");
        return Ok(());
    }
    ctx.session.logout()?;
    success("Logged out.");
    Ok(())
}

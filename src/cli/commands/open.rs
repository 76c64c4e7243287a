use crate::cli::commands::{Context, employees, home, profile, vacations};
use crate::cli::parser::Commands;
use crate::core::navigation::{Navigator, Tab};
use crate::errors::AppResult;
use crate::ui::messages::info;

/// Handle the `open` command: resolve the tab, remember it, render it.
pub async fn handle(cmd: &Commands, ctx: &mut Context) -> AppResult<()> {
    if let Commands::Open { tab } = cmd {
        let session = ctx.require_session().await?;
        let resolved = Navigator::new(ctx.session.storage_mut()).open(&session.user, *tab)?;

        if let Some(requested) = tab
            && *requested != resolved
        {
            info(format!(
                "The {requested} view is reserved to administrators, showing {resolved}."
            ));
        }

        match resolved {
            Tab::Home => home::show(ctx, &session).await?,
            Tab::Employees => employees::show_page(ctx, &session, 1).await?,
            Tab::Vacations => vacations::show_list(ctx, &session, 1, Default::default()).await?,
            Tab::Profile => profile::show(ctx, &session).await?,
        }
    }
    Ok(())
}

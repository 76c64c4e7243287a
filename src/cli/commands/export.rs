use crate::cli::commands::Context;
use crate::cli::parser::Commands;
use crate::core::controllers::VacationsController;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::models::VacationRequest;

/// Handle the `export` command: every visible request matching the filters.
pub async fn handle(cmd: &Commands, ctx: &mut Context) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        filters,
        force,
    } = cmd
    {
        let session = ctx.require_session().await?;
        let mut ctrl = VacationsController::new(&ctx.client, session);
        ctrl.load_people().await?;
        ctrl.load_all().await?;

        let filters = filters.to_filters();
        let rows: Vec<&VacationRequest> =
            ctrl.rows().iter().filter(|v| filters.matches(v)).collect();

        ExportLogic::export(&rows, &ctrl.employee_names(), *format, file, *force)?;
    }
    Ok(())
}

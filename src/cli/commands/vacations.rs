use crate::api::ApiClient;
use crate::cli::commands::{Context, confirm};
use crate::cli::parser::{Commands, VacationCommands};
use crate::core::controllers::{Modal, VacationFilters, VacationForm, VacationsController};
use crate::core::session::Session;
use crate::core::stats::calendar_month;
use crate::core::storage::VACATION_DRAFT_KEY;
use crate::errors::{AppError, AppResult};
use crate::models::VacationRequest;
use crate::ui::messages::{header, info, success, warning};
use crate::utils::colors::{GREY, RESET};
use crate::utils::date::{format_day, format_period, parse_period, today};
use crate::utils::formatting::{colorize_status, days_label, or_dash, separator, wrap_text};
use crate::utils::table::{Column, Table};
use chrono::Datelike;
use std::collections::HashMap;

/// Handle the `vacations` command family
pub async fn handle(cmd: &Commands, ctx: &mut Context) -> AppResult<()> {
    let Commands::Vacations { action } = cmd else {
        return Ok(());
    };
    let session = ctx.require_session().await?;

    match action {
        VacationCommands::List { page, filters } => {
            show_list(ctx, &session, *page, filters.to_filters()).await
        }
        VacationCommands::Show { id } => show_one(ctx, &session, *id).await,
        VacationCommands::Request {
            from,
            to,
            reason,
            use_suggestion,
        } => {
            let form = match use_suggestion {
                Some(n) => {
                    let mut draft = load_draft(ctx)?;
                    draft.apply_suggestion(*n)?;
                    if let Some(r) = reason {
                        draft.reason = r.clone();
                    }
                    draft
                }
                None => VacationForm::new(*from, *to, reason.clone().unwrap_or_default()),
            };
            request(ctx, &session, form).await
        }
        VacationCommands::Approve { id, comment } => {
            decide(ctx, &session, *id, true, comment.as_deref()).await
        }
        VacationCommands::Reject { id, comment } => {
            decide(ctx, &session, *id, false, comment.as_deref()).await
        }
        VacationCommands::Delete { id, yes } => delete(ctx, &session, *id, *yes).await,
        VacationCommands::Calendar { month } => calendar(ctx, &session, month.as_deref()).await,
    }
}

/// Table of vacation requests with requester names resolved.
pub(crate) fn vacation_table(rows: &[&VacationRequest], names: &HashMap<i64, String>) -> Table {
    let mut table = Table::new(vec![
        Column::new("ID", 6),
        Column::new("Created", 14),
        Column::new("Requester", 22),
        Column::new("Period", 28),
        Column::new("Days", 8),
        Column::new("Status", 10),
        Column::new("Reason", 0),
    ]);

    for v in rows {
        table.add_row(vec![
            v.id.to_string(),
            v.created_at
                .map(|d| format_day(d.date()))
                .unwrap_or_else(|| or_dash(None)),
            names
                .get(&v.employee_id)
                .cloned()
                .unwrap_or_else(|| or_dash(None)),
            format_period(v.start_date, v.end_date),
            days_label(v.days()),
            colorize_status(v.status),
            or_dash(v.request_reason.as_deref()),
        ]);
    }
    table
}

async fn prepare<'a>(
    ctx: &'a Context,
    session: &Session,
) -> AppResult<VacationsController<'a, ApiClient>> {
    let mut ctrl = VacationsController::new(&ctx.client, session.clone());
    ctrl.load_people().await?;
    Ok(ctrl)
}

pub(crate) async fn show_list(
    ctx: &mut Context,
    session: &Session,
    page: u32,
    filters: VacationFilters,
) -> AppResult<()> {
    let mut ctrl = prepare(ctx, session).await?;
    if filters.is_active() {
        ctrl.set_filters(filters).await?;
    } else {
        ctrl.set_page(page).await?;
    }

    let rows = ctrl.filtered();
    header("Vacations");
    if rows.is_empty() {
        info("No vacation requests found.");
        return Ok(());
    }

    print!("{}", vacation_table(&rows, &ctrl.employee_names()).render());
    let list = ctrl.list();
    println!(
        "{GREY}Page {}/{} · {} shown{RESET}",
        list.page,
        list.total_pages,
        rows.len()
    );
    Ok(())
}

async fn show_one(ctx: &mut Context, session: &Session, id: i64) -> AppResult<()> {
    let sep = separator(&ctx.cfg.separator_char, 40);
    let mut ctrl = prepare(ctx, session).await?;
    ctrl.load_all().await?;
    let names = ctrl.employee_names();

    let (v, pending_decision) = match ctrl.open_decision(id)? {
        Modal::Editing(v, _) => (v.clone(), true),
        Modal::Viewing(v) => (v.clone(), false),
        _ => return Err(AppError::VacationNotFound(id)),
    };
    let name = |id: i64| names.get(&id).cloned().unwrap_or_else(|| format!("#{id}"));

    header(format!("Vacation request #{}", v.id));
    println!("Requester:  {}", name(v.employee_id));
    println!(
        "Period:     {} ({})",
        format_period(v.start_date, v.end_date),
        days_label(v.days())
    );
    println!("Status:     {}", colorize_status(v.status));
    println!(
        "Created at: {}",
        v.created_at
            .map(|d| format_day(d.date()))
            .unwrap_or_else(|| or_dash(None))
    );
    println!("Reason:");
    println!("{}", wrap_text(v.request_reason.as_deref().unwrap_or("-"), 60));

    if !v.is_pending() {
        println!("{sep}");
        println!(
            "Decided at: {}",
            v.decided_at
                .map(|d| format_day(d.date()))
                .unwrap_or_else(|| or_dash(None))
        );
        println!(
            "Decided by: {}",
            v.decided_by.map(name).unwrap_or_else(|| or_dash(None))
        );
        println!("Comment:    {}", or_dash(v.decision_comment()));
    }

    if pending_decision {
        println!("{sep}");
        info(format!(
            "Awaiting your decision: rtaskflow vacations approve|reject {}",
            v.id
        ));
    }
    Ok(())
}

fn load_draft(ctx: &Context) -> AppResult<VacationForm> {
    let raw = ctx
        .session
        .storage()
        .get(VACATION_DRAFT_KEY)
        .ok_or_else(|| {
            AppError::InvalidForm("there is no rejected request to retry".to_string())
        })?;
    Ok(serde_json::from_str(raw)?)
}

async fn request(ctx: &mut Context, session: &Session, form: VacationForm) -> AppResult<()> {
    let mut ctrl = VacationsController::new(&ctx.client, session.clone());
    ctrl.open_create(form);

    match ctrl.submit_create().await {
        Ok(created) => {
            ctx.session.storage_mut().remove(VACATION_DRAFT_KEY)?;
            success(format!(
                "Vacation request #{} created: {} ({})",
                created.id,
                format_period(created.start_date, created.end_date),
                days_label(created.days())
            ));
            Ok(())
        }
        Err(e) => {
            if let Modal::Creating(form) = ctrl.modal()
                && form.has_suggestions()
            {
                let draft = serde_json::to_string(form)?;
                ctx.session.storage_mut().set(VACATION_DRAFT_KEY, draft)?;
                warning("Retry with: rtaskflow vacations request --use-suggestion N");
            }
            Err(e)
        }
    }
}

async fn decide(
    ctx: &mut Context,
    session: &Session,
    id: i64,
    approved: bool,
    comment: Option<&str>,
) -> AppResult<()> {
    let mut ctrl = prepare(ctx, session).await?;
    ctrl.load_all().await?;
    ctrl.open_decision(id)?;

    match ctrl.modal_mut() {
        Modal::Editing(_, form) => {
            if let Some(c) = comment {
                form.comment = c.to_string();
            }
        }
        _ => {
            return Err(AppError::Forbidden(format!(
                "vacation request {id} is not pending or not yours to evaluate"
            )));
        }
    }

    let updated = ctrl.decide(approved).await?;
    success(format!(
        "Vacation request #{} {}",
        updated.id,
        updated.status.label().to_lowercase()
    ));
    if let Some(err) = &ctrl.list().error {
        warning(format!("Could not refresh the vacation list: {err}"));
    }
    Ok(())
}

async fn delete(ctx: &mut Context, session: &Session, id: i64, yes: bool) -> AppResult<()> {
    let mut ctrl = prepare(ctx, session).await?;
    ctrl.load_all().await?;
    ctrl.request_delete(id)?;

    if !yes && !confirm(&format!("Vacation request #{id} will be deleted."))? {
        ctrl.cancel();
        info("Deletion cancelled.");
        return Ok(());
    }

    let message = ctrl.confirm_delete().await?;
    success(message.unwrap_or_else(|| "Vacation deleted successfully".to_string()));
    Ok(())
}

async fn calendar(ctx: &mut Context, session: &Session, month: Option<&str>) -> AppResult<()> {
    let first = match month {
        Some(m) => parse_period(m)?.0,
        None => today().with_day(1).unwrap_or_else(today),
    };

    let mut ctrl = prepare(ctx, session).await?;
    ctrl.load_all().await?;
    let names = ctrl.employee_names();
    let days = calendar_month(ctrl.rows(), first.year(), first.month());

    header(first.format("%B %Y").to_string());
    let mut any = false;
    for day in days.iter().filter(|d| !d.vacations.is_empty()) {
        any = true;
        let who: Vec<String> = day
            .vacations
            .iter()
            .map(|v| {
                names
                    .get(&v.employee_id)
                    .cloned()
                    .unwrap_or_else(|| format!("#{}", v.employee_id))
            })
            .collect();
        println!("{} {}", day.date.format("%a %d"), who.join(", "));
    }
    if !any {
        info("No approved absences this month.");
    }
    Ok(())
}

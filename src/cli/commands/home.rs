use crate::cli::commands::Context;
use crate::cli::commands::vacations::vacation_table;
use crate::core::home;
use crate::core::session::Session;
use crate::errors::AppResult;
use crate::models::{Role, VacationRequest};
use crate::ui::messages::{header, info};
use crate::utils::colors::{CYAN, GREEN, GREY, RED, RESET, YELLOW, color_for_role};
use crate::utils::date::{format_period, today};
use crate::utils::formatting::{bold, days_label, pad_right, separator};
use crate::utils::table::{Column, Table};
use std::collections::HashMap;

const RECENT_REQUESTS: usize = 5;
const BAR_WIDTH: usize = 30;

/// Handle the `home` command
pub async fn handle(ctx: &mut Context) -> AppResult<()> {
    let session = ctx.require_session().await?;
    show(ctx, &session).await
}

pub(crate) async fn show(ctx: &mut Context, session: &Session) -> AppResult<()> {
    let data = home::load(&ctx.client, session, today(), ctx.cfg.stats_options()).await?;
    let stats = &data.stats;
    let sep = separator(&ctx.cfg.separator_char, 60);

    header("Dashboard");

    // Headline numbers
    let roles: Vec<String> = [Role::Admin, Role::Manager, Role::Employee]
        .into_iter()
        .map(|r| {
            format!(
                "{}{}{} {}",
                color_for_role(r),
                r.label(),
                RESET,
                stats.by_role.get(&r).copied().unwrap_or(0)
            )
        })
        .collect();
    println!(
        "{} {}   ({})",
        bold("Employees:"),
        stats.total_employees,
        roles.join(" · ")
    );

    let c = &stats.vacation_counts;
    println!(
        "{} {}   ({YELLOW}Pending{RESET} {} · {GREEN}Approved{RESET} {} · {RED}Rejected{RESET} {})",
        bold("Requests:"),
        c.total(),
        c.pending,
        c.approved,
        c.rejected
    );
    println!(
        "{} {}   {} {}",
        bold("Days used:"),
        stats.total_days_used,
        bold("Average team size:"),
        stats.average_team_size
    );
    println!("{sep}");

    // Teams
    println!("{}", bold("Teams"));
    if stats.by_manager.is_empty() {
        println!("{GREY}  no reporting lines{RESET}");
    }
    for (manager, size) in &stats.by_manager {
        let status = stats.by_manager_status.get(manager).copied().unwrap_or_default();
        println!(
            "  {} {:>3} reports   {GREY}{}/{}/{} pending/approved/rejected{RESET}",
            pad_right(manager, 24),
            size,
            status.pending,
            status.approved,
            status.rejected
        );
    }
    println!("{sep}");

    let names: HashMap<i64, String> = data
        .employees
        .iter()
        .map(|e| (e.id, e.full_name()))
        .collect();

    // Upcoming
    println!("{}", bold("Upcoming vacations"));
    if stats.upcoming.is_empty() {
        println!("{GREY}  none scheduled{RESET}");
    } else {
        let mut table = Table::new(vec![
            Column::new("Employee", 24),
            Column::new("Period", 28),
            Column::new("Days", 0),
        ]);
        for v in &stats.upcoming {
            table.add_row(vec![
                names
                    .get(&v.employee_id)
                    .cloned()
                    .unwrap_or_else(|| format!("#{}", v.employee_id)),
                format_period(v.start_date, v.end_date),
                days_label(v.days()),
            ]);
        }
        print!("{}", table.render());
    }
    println!("{sep}");

    // Monthly trend
    println!("{}", bold("Approved vacations per month"));
    let peak = stats
        .monthly_trend
        .iter()
        .map(|b| b.approved)
        .max()
        .unwrap_or(0)
        .max(1);
    for bucket in &stats.monthly_trend {
        let len = bucket.approved * BAR_WIDTH / peak;
        println!(
            "  {} {CYAN}{}{RESET} {}",
            pad_right(&bucket.label, 9),
            "█".repeat(len.max(1)),
            bucket.approved
        );
    }
    if stats.monthly_trend.is_empty() {
        println!("{GREY}  no approved vacations yet{RESET}");
    }
    println!("{sep}");

    // Recent requests
    println!("{}", bold("Recent vacation requests"));
    let recent: Vec<&VacationRequest> = data.recent_requests(RECENT_REQUESTS);
    if recent.is_empty() {
        info("No vacation requests yet.");
    } else {
        print!("{}", vacation_table(&recent, &names).render());
    }
    Ok(())
}

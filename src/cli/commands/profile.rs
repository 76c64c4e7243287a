use crate::cli::commands::Context;
use crate::cli::commands::vacations::vacation_table;
use crate::core::profile;
use crate::core::session::Session;
use crate::errors::AppResult;
use crate::models::VacationRequest;
use crate::ui::messages::{header, info};
use crate::utils::colors::{GREEN, RED, RESET, YELLOW, color_for_role};
use crate::utils::formatting::{bold, separator};
use std::collections::HashMap;

/// Handle the `profile` command
pub async fn handle(ctx: &mut Context) -> AppResult<()> {
    let session = ctx.require_session().await?;
    show(ctx, &session).await
}

pub(crate) async fn show(ctx: &mut Context, session: &Session) -> AppResult<()> {
    let summary = profile::load(&ctx.client, session).await?;
    let user = &summary.user;
    let sep = separator(&ctx.cfg.separator_char, 60);

    header("Profile");
    println!("{}", bold(&user.full_name()));
    println!("  Email:   {}", user.email);
    println!(
        "  Role:    {}{}{}",
        color_for_role(user.role),
        user.role.label(),
        RESET
    );
    match (&summary.manager, user.manager_id) {
        (Some(m), _) => println!("  Manager: {}", m.full_name()),
        (None, Some(mid)) => println!("  Manager: #{mid}"),
        (None, None) => {}
    }
    println!("{sep}");

    let c = &summary.own_counts;
    println!(
        "{} {}   ({YELLOW}Pending{RESET} {} · {GREEN}Approved{RESET} {} · {RED}Rejected{RESET} {})   {} {}",
        bold("My requests:"),
        c.total(),
        c.pending,
        c.approved,
        c.rejected,
        bold("Days used:"),
        summary.days_used
    );

    let mut names: HashMap<i64, String> = summary
        .reports
        .iter()
        .map(|e| (e.id, e.full_name()))
        .collect();
    names.insert(user.id, user.full_name());

    let own: Vec<&VacationRequest> = summary.own_vacations.iter().collect();
    if own.is_empty() {
        info("You have not requested any vacation yet.");
    } else {
        print!("{}", vacation_table(&own, &names).render());
    }

    if user.role.can_lead() {
        println!("{sep}");
        println!(
            "{} {}   {} {}",
            bold("Direct reports:"),
            summary.reports.len(),
            bold("Pending team requests:"),
            summary.pending_team_requests()
        );
        for r in &summary.reports {
            println!("  - {} <{}>", r.full_name(), r.email);
        }
        let team: Vec<&VacationRequest> = summary.team_vacations.iter().collect();
        if !team.is_empty() {
            print!("{}", vacation_table(&team, &names).render());
        }
    }
    Ok(())
}

use crate::cli::commands::Context;
use crate::errors::AppResult;
use crate::utils::colors::{RESET, color_for_role};
use crate::utils::formatting::bold;

/// Handle the `whoami` command
pub async fn handle(ctx: &mut Context) -> AppResult<()> {
    let session = ctx.require_session().await?;
    let user = &session.user;

    println!("{}", bold(&user.full_name()));
    println!("  Id:      {}", user.id);
    println!("  Email:   {}", user.email);
    println!(
        "  Role:    {}{}{}",
        color_for_role(user.role),
        user.role.label(),
        RESET
    );
    if let Some(mid) = user.manager_id {
        println!("  Manager: #{mid}");
    }
    println!("  Backend: {}", ctx.client.base_url());
    Ok(())
}

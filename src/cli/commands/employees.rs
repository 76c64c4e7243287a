use crate::api::{ApiClient, Backend};
use crate::cli::commands::{Context, confirm};
use crate::cli::parser::{Commands, EmployeeCommands};
use crate::core::controllers::{EmployeeFilters, EmployeeForm, EmployeesController};
use crate::core::session::Session;
use crate::errors::AppResult;
use crate::models::Employee;
use crate::ui::messages::{header, info, success};
use crate::utils::colors::{GREY, RESET, color_for_role};
use crate::utils::formatting::or_dash;
use crate::utils::table::{Column, Table};

/// Handle the `employees` command family
pub async fn handle(cmd: &Commands, ctx: &mut Context) -> AppResult<()> {
    let Commands::Employees { action } = cmd else {
        return Ok(());
    };
    let session = ctx.require_session().await?;

    match action {
        EmployeeCommands::List {
            page,
            search,
            role,
            manager,
        } => {
            let mut ctrl = prepare(ctx, &session).await?;
            ctrl.set_filters(EmployeeFilters {
                role: *role,
                manager: *manager,
            });
            match search {
                Some(q) => ctrl.search(q).await?,
                None => ctrl.set_page(*page).await?,
            }
            render_page(&ctrl);
            Ok(())
        }
        EmployeeCommands::Managers => {
            let managers = ctx.client.managers(&session.token).await?;
            header("Managers");
            let rows: Vec<&Employee> = managers.iter().collect();
            print!("{}", employee_table(&rows, |_| None).render());
            Ok(())
        }
        EmployeeCommands::Create {
            first_name,
            last_name,
            email,
            role,
            manager,
            password,
            confirm_password,
        } => {
            let mut ctrl = EmployeesController::new(&ctx.client, session.clone())?;
            let mut form = EmployeeForm::for_create();
            form.first_name = first_name.clone();
            form.last_name = last_name.clone();
            form.email = email.clone();
            form.role = *role;
            form.manager_id = *manager;
            form.password = password.clone();
            form.confirm_password = confirm_password.clone().unwrap_or_else(|| password.clone());
            ctrl.open_create(form);
            let created = ctrl.submit().await?;
            success(format!(
                "Employee #{} created: {}",
                created.id,
                created.full_name()
            ));
            Ok(())
        }
        EmployeeCommands::Update {
            id,
            first_name,
            last_name,
            email,
            role,
            manager,
            no_manager,
        } => {
            let mut ctrl = prepare(ctx, &session).await?;
            let form = ctrl.open_edit(*id)?;
            if let Some(v) = first_name {
                form.first_name = v.clone();
            }
            if let Some(v) = last_name {
                form.last_name = v.clone();
            }
            if let Some(v) = email {
                form.email = v.clone();
            }
            if let Some(r) = role {
                form.role = *r;
            }
            if *no_manager {
                form.manager_id = None;
            } else if manager.is_some() {
                form.manager_id = *manager;
            }
            let updated = ctrl.submit().await?;
            success(format!(
                "Employee #{} updated: {} ({})",
                updated.id,
                updated.full_name(),
                updated.role.label()
            ));
            Ok(())
        }
        EmployeeCommands::Delete { id, yes } => {
            let mut ctrl = prepare(ctx, &session).await?;
            ctrl.request_delete(*id)?;
            if !*yes && !confirm(&format!("Employee #{id} will be deleted."))? {
                ctrl.cancel();
                info("Deletion cancelled.");
                return Ok(());
            }
            let message = ctrl.confirm_delete().await?;
            success(message.unwrap_or_else(|| "Employee deleted successfully".to_string()));
            Ok(())
        }
    }
}

async fn prepare<'a>(
    ctx: &'a Context,
    session: &Session,
) -> AppResult<EmployeesController<'a, ApiClient>> {
    let mut ctrl = EmployeesController::new(&ctx.client, session.clone())?;
    ctrl.load_all().await?;
    Ok(ctrl)
}

fn employee_table<F>(rows: &[&Employee], manager_of: F) -> Table
where
    F: Fn(&Employee) -> Option<String>,
{
    let mut table = Table::new(vec![
        Column::new("ID", 6),
        Column::new("Name", 24),
        Column::new("Email", 30),
        Column::new("Role", 10),
        Column::new("Manager", 0),
    ]);
    for e in rows {
        table.add_row(vec![
            e.id.to_string(),
            e.full_name(),
            e.email.clone(),
            format!("{}{}{}", color_for_role(e.role), e.role.label(), RESET),
            or_dash(manager_of(e).as_deref()),
        ]);
    }
    table
}

fn render_page(ctrl: &EmployeesController<'_, ApiClient>) {
    header("Employees");
    let rows = ctrl.filtered();
    if rows.is_empty() {
        info("No employees found.");
        return;
    }
    print!(
        "{}",
        employee_table(&rows, |e| ctrl.manager_name(e)).render()
    );
    let list = ctrl.list();
    println!(
        "{GREY}Page {}/{} · {} shown{RESET}",
        list.page,
        list.total_pages,
        rows.len()
    );
}

/// First page of the employee list (used by `open employees`).
pub(crate) async fn show_page(ctx: &mut Context, session: &Session, page: u32) -> AppResult<()> {
    let mut ctrl = prepare(ctx, session).await?;
    ctrl.set_page(page).await?;
    render_page(&ctrl);
    Ok(())
}

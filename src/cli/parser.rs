use crate::core::controllers::VacationFilters;
use crate::core::navigation::Tab;
use crate::export::ExportFormat;
use crate::models::{Role, VacationStatus};
use crate::utils::date::parse_date;
use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};

/// Command-line interface definition for rTaskflow
/// CLI client for the TaskFlow vacation-management backend
#[derive(Parser)]
#[command(
    name = "rtaskflow",
    version = env!("CARGO_PKG_VERSION"),
    about = "A vacation-management CLI: request time off, approve it and follow team statistics",
    long_about = None
)]
pub struct Cli {
    /// Override the backend URL (also RTASKFLOW_API_URL)
    #[arg(global = true, long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// More diagnostics on stderr (-v info, -vv debug, -vvv trace)
    #[arg(global = true, short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

fn parse_date_value(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).ok_or_else(|| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

/// Filters shared by `vacations list` and `export`.
#[derive(Args, Debug, Clone, Default)]
pub struct VacationFilterArgs {
    #[arg(long, value_enum, help = "Only requests with this status")]
    pub status: Option<VacationStatus>,

    #[arg(long, value_name = "EMPLOYEE_ID", help = "Only requests of this employee")]
    pub requester: Option<i64>,

    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date_value, help = "Only requests starting on or after this day")]
    pub from: Option<NaiveDate>,

    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date_value, help = "Only requests ending on or before this day")]
    pub to: Option<NaiveDate>,
}

impl VacationFilterArgs {
    pub fn to_filters(&self) -> VacationFilters {
        VacationFilters {
            status: self.status,
            requester: self.requester,
            from: self.from,
            to: self.to,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, help = "Password (else RTASKFLOW_PASSWORD, else prompted)")]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Open a dashboard tab (default: last opened, or the role's default)
    Open {
        #[arg(value_enum)]
        tab: Option<Tab>,
    },

    /// Admin dashboard with organisation statistics
    Home,

    /// Your profile, requests and team
    Profile,

    /// Manage employees (admin only)
    Employees {
        #[command(subcommand)]
        action: EmployeeCommands,
    },

    /// List, request and evaluate vacations
    Vacations {
        #[command(subcommand)]
        action: VacationCommands,
    },

    /// Export the visible vacation requests
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[command(flatten)]
        filters: VacationFilterArgs,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their default values")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum EmployeeCommands {
    /// One page of employees
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, help = "Search by first name")]
        search: Option<String>,

        #[arg(long, value_enum)]
        role: Option<Role>,

        #[arg(long, value_name = "MANAGER_ID")]
        manager: Option<i64>,
    },

    /// Employees who can lead a team
    Managers,

    /// Create an employee
    Create {
        #[arg(long = "first-name")]
        first_name: String,

        #[arg(long = "last-name")]
        last_name: String,

        #[arg(long)]
        email: String,

        #[arg(long, value_enum, default_value = "employee")]
        role: Role,

        #[arg(long, value_name = "MANAGER_ID")]
        manager: Option<i64>,

        #[arg(long)]
        password: String,

        #[arg(long = "confirm-password", help = "Defaults to --password")]
        confirm_password: Option<String>,
    },

    /// Update an employee
    Update {
        id: i64,

        #[arg(long = "first-name")]
        first_name: Option<String>,

        #[arg(long = "last-name")]
        last_name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long, value_enum)]
        role: Option<Role>,

        #[arg(long, value_name = "MANAGER_ID", conflicts_with = "no_manager")]
        manager: Option<i64>,

        #[arg(long = "no-manager", help = "Remove the current manager")]
        no_manager: bool,
    },

    /// Delete an employee
    Delete {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum VacationCommands {
    /// Visible vacation requests
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[command(flatten)]
        filters: VacationFilterArgs,
    },

    /// Details of one request
    Show { id: i64 },

    /// Request time off
    Request {
        #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date_value, required_unless_present = "use_suggestion")]
        from: Option<NaiveDate>,

        #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date_value, required_unless_present = "use_suggestion")]
        to: Option<NaiveDate>,

        #[arg(long)]
        reason: Option<String>,

        #[arg(
            long = "use-suggestion",
            value_name = "N",
            conflicts_with_all = ["from", "to"],
            help = "Retry the last rejected request with suggestion N"
        )]
        use_suggestion: Option<usize>,
    },

    /// Approve a pending request
    Approve {
        id: i64,

        #[arg(long)]
        comment: Option<String>,
    },

    /// Reject a pending request
    Reject {
        id: i64,

        #[arg(long)]
        comment: Option<String>,
    },

    /// Delete a request
    Delete {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Approved absences day by day
    Calendar {
        #[arg(long, value_name = "YYYY-MM", help = "Month to show (default: current)")]
        month: Option<String>,
    },
}

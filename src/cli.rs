use std::fmt::Display;
use std::io;
use std::str::FromStr;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use jiff::civil::Date;
use secrecy::SecretString;
use serde_json::{Value, json};

use crate::commands::{
    ResourceCommand, cmd_config_get, cmd_config_set, cmd_config_show, cmd_forgot_password,
    cmd_register,
};
use crate::config::Config;
use crate::display::TableRow;
use crate::error::{OfficeError, Result};
use crate::filter::{
    AttendanceFilter, EmployeeFilter, LeaveFilter, NotificationFilter, PayrollFilter, ReadState,
    Selection, Summarize, TaskFilter, created_on,
};
use crate::model::{
    Attendance, AttendanceDraft, AttendanceStatus, Employee, EmployeeDraft, EmployeeStatus, Leave,
    LeaveDraft, LeaveStatus, LeaveType, Notification, NotificationDraft, NotificationType, Payroll,
    PayrollDraft, PayrollStatus, Resource, Task, TaskDraft, TaskPriority, TaskStatus,
};
use crate::remote::ApiClient;
use crate::session::{Role, Session};

/// How command results are printed.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub json: bool,
}

#[derive(Parser)]
#[command(name = "officehub")]
#[command(about = "Command-line client for the OfficeHub office-management service")]
#[command(version)]
pub struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output(&self) -> OutputOptions {
        OutputOptions { json: self.json }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Employee directory
    #[command(visible_alias = "emp")]
    Employees {
        #[command(subcommand)]
        action: EmployeeAction,
    },

    /// Task assignments
    Tasks {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Leave requests
    Leaves {
        #[command(subcommand)]
        action: LeaveAction,
    },

    /// Daily attendance records
    #[command(visible_alias = "att")]
    Attendance {
        #[command(subcommand)]
        action: AttendanceAction,
    },

    /// Notifications
    #[command(visible_alias = "notif")]
    Notifications {
        #[command(subcommand)]
        action: NotificationAction,
    },

    /// Payroll records
    Payroll {
        #[command(subcommand)]
        action: PayrollAction,
    },

    /// Account registration and password reset
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for [possible values: bash, zsh, fish, powershell, elvish]
        shell: Shell,
    },
}

/// One resource subcommand, independent of the record kind.
#[derive(Debug)]
pub enum ResourceAction<F, D> {
    Ls { filter: F, mine: bool },
    Stats { filter: F, mine: bool },
    Add(D),
    Set(String, D),
    Rm(String),
}

impl<F, D> ResourceAction<F, D> {
    fn mine(&self) -> bool {
        match self {
            ResourceAction::Ls { mine, .. } | ResourceAction::Stats { mine, .. } => *mine,
            _ => false,
        }
    }
}

/// Declares the `ls | stats | add | set | rm` subcommands of one resource.
macro_rules! resource_action {
    ($(#[$meta:meta])* $name:ident, $filter:ty, $fields:ty) => {
        $(#[$meta])*
        #[derive(Subcommand, Debug)]
        pub enum $name {
            /// List records matching the filters
            #[command(visible_alias = "list")]
            Ls {
                #[command(flatten)]
                filter: $filter,

                #[command(flatten)]
                scope: ScopeArgs,
            },

            /// Aggregate statistics of the records matching the filters
            Stats {
                #[command(flatten)]
                filter: $filter,

                #[command(flatten)]
                scope: ScopeArgs,
            },

            /// Create a record, then print the refreshed list
            #[command(visible_alias = "create")]
            Add {
                #[command(flatten)]
                fields: $fields,
            },

            /// Update fields of a record, then print the refreshed list
            #[command(visible_alias = "update")]
            Set {
                /// Record ID
                #[arg(value_parser = parse_id)]
                id: String,

                #[command(flatten)]
                fields: $fields,
            },

            /// Delete a record, then print the refreshed list
            #[command(visible_alias = "remove")]
            Rm {
                /// Record ID
                #[arg(value_parser = parse_id)]
                id: String,
            },
        }

        impl $name {
            pub fn into_action(self) -> ResourceAction<$filter, $fields> {
                match self {
                    $name::Ls { filter, scope } => ResourceAction::Ls { filter, mine: scope.mine },
                    $name::Stats { filter, scope } => {
                        ResourceAction::Stats { filter, mine: scope.mine }
                    }
                    $name::Add { fields } => ResourceAction::Add(fields),
                    $name::Set { id, fields } => ResourceAction::Set(id, fields),
                    $name::Rm { id } => ResourceAction::Rm(id),
                }
            }
        }
    };
}

resource_action!(EmployeeAction, EmployeeFilterArgs, EmployeeFields);
resource_action!(TaskAction, TaskFilterArgs, TaskFields);
resource_action!(LeaveAction, LeaveFilterArgs, LeaveFields);
resource_action!(AttendanceAction, AttendanceFilterArgs, AttendanceFields);
resource_action!(NotificationAction, NotificationFilterArgs, NotificationFields);
resource_action!(PayrollAction, PayrollFilterArgs, PayrollFields);

#[derive(Args, Debug, Clone, Default)]
pub struct ScopeArgs {
    /// Only records owned by the signed-in user
    #[arg(long)]
    pub mine: bool,
}

#[derive(Args, Debug, Clone)]
pub struct EmployeeFilterArgs {
    /// Case-insensitive search over name and email
    #[arg(short, long)]
    pub search: Option<String>,

    /// Department name, or 'all'
    #[arg(long, default_value = "all", value_parser = parse_selection::<String>)]
    pub department: Selection<String>,

    /// Status: active, inactive, or 'all'
    #[arg(long, default_value = "all", value_parser = parse_selection::<EmployeeStatus>)]
    pub status: Selection<EmployeeStatus>,
}

impl From<EmployeeFilterArgs> for EmployeeFilter {
    fn from(args: EmployeeFilterArgs) -> Self {
        EmployeeFilter {
            search: args.search.unwrap_or_default(),
            department: args.department,
            status: args.status,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct TaskFilterArgs {
    /// Case-insensitive search over title and description
    #[arg(short, long)]
    pub search: Option<String>,

    /// Status: pending, in-progress, completed, or 'all'
    #[arg(long, default_value = "all", value_parser = parse_selection::<TaskStatus>)]
    pub status: Selection<TaskStatus>,

    /// Priority: low, medium, high, or 'all'
    #[arg(short, long, default_value = "all", value_parser = parse_selection::<TaskPriority>)]
    pub priority: Selection<TaskPriority>,
}

impl From<TaskFilterArgs> for TaskFilter {
    fn from(args: TaskFilterArgs) -> Self {
        TaskFilter {
            search: args.search.unwrap_or_default(),
            status: args.status,
            priority: args.priority,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct LeaveFilterArgs {
    /// Case-insensitive search over employee name and reason
    #[arg(short, long)]
    pub search: Option<String>,

    /// Status: pending, approved, rejected, or 'all'
    #[arg(long, default_value = "all", value_parser = parse_selection::<LeaveStatus>)]
    pub status: Selection<LeaveStatus>,

    /// Type: sick, vacation, personal, emergency, or 'all'
    #[arg(short = 't', long = "type", default_value = "all", value_parser = parse_selection::<LeaveType>)]
    pub leave_type: Selection<LeaveType>,
}

impl From<LeaveFilterArgs> for LeaveFilter {
    fn from(args: LeaveFilterArgs) -> Self {
        LeaveFilter {
            search: args.search.unwrap_or_default(),
            status: args.status,
            leave_type: args.leave_type,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct AttendanceFilterArgs {
    /// Employee ID, or 'all'
    #[arg(short, long, default_value = "all", value_parser = parse_selection::<String>)]
    pub employee: Selection<String>,

    /// Status: present, absent, late, or 'all'
    #[arg(long, default_value = "all", value_parser = parse_selection::<AttendanceStatus>)]
    pub status: Selection<AttendanceStatus>,

    /// Only records on this day (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_date)]
    pub day: Option<Date>,
}

impl From<AttendanceFilterArgs> for AttendanceFilter {
    fn from(args: AttendanceFilterArgs) -> Self {
        AttendanceFilter {
            employee: args.employee,
            status: args.status,
            day: args.day,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct NotificationFilterArgs {
    /// Case-insensitive search over title and message
    #[arg(short, long)]
    pub search: Option<String>,

    /// Type: info, success, warning, error, or 'all'
    #[arg(short = 't', long = "type", default_value = "all", value_parser = parse_selection::<NotificationType>)]
    pub kind: Selection<NotificationType>,

    /// Read state: read, unread, or 'all'
    #[arg(long, default_value = "all", value_parser = parse_selection::<ReadState>)]
    pub read: Selection<ReadState>,
}

impl From<NotificationFilterArgs> for NotificationFilter {
    fn from(args: NotificationFilterArgs) -> Self {
        NotificationFilter {
            search: args.search.unwrap_or_default(),
            kind: args.kind,
            read: args.read,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct PayrollFilterArgs {
    /// Case-insensitive search over employee name
    #[arg(short, long)]
    pub search: Option<String>,

    /// Status: pending, processed, paid, or 'all'
    #[arg(long, default_value = "all", value_parser = parse_selection::<PayrollStatus>)]
    pub status: Selection<PayrollStatus>,

    /// Pay period (e.g. 2024-01), or 'all'
    #[arg(long, default_value = "all", value_parser = parse_selection::<String>)]
    pub period: Selection<String>,
}

impl From<PayrollFilterArgs> for PayrollFilter {
    fn from(args: PayrollFilterArgs) -> Self {
        PayrollFilter {
            search: args.search.unwrap_or_default(),
            status: args.status,
            period: args.period,
        }
    }
}

/// Field flags that build a partial payload for add and set.
pub trait FieldArgs<R: Resource> {
    fn into_draft(self) -> R::Draft;

    /// Fill ownership fields left unset from the signed-in user. Used on add.
    fn own_defaults(_draft: &mut R::Draft, _session: &Session) {}
}

#[derive(Args, Debug, Clone)]
pub struct EmployeeFields {
    /// Full name
    #[arg(long)]
    pub name: Option<String>,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Department
    #[arg(long)]
    pub department: Option<String>,

    /// Job title
    #[arg(long)]
    pub position: Option<String>,

    /// Annual salary
    #[arg(long)]
    pub salary: Option<f64>,

    /// Join date (YYYY-MM-DD)
    #[arg(long)]
    pub join_date: Option<String>,

    /// Status: active, inactive
    #[arg(long, value_parser = parse_wire::<EmployeeStatus>)]
    pub status: Option<EmployeeStatus>,
}

impl FieldArgs<Employee> for EmployeeFields {
    fn into_draft(self) -> EmployeeDraft {
        EmployeeDraft {
            name: self.name,
            email: self.email,
            department: self.department,
            position: self.position,
            salary: self.salary,
            join_date: self.join_date,
            status: self.status,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct TaskFields {
    /// Task title
    #[arg(long)]
    pub title: Option<String>,

    /// Description text
    #[arg(short, long)]
    pub description: Option<String>,

    /// Employee ID the task is assigned to
    #[arg(long)]
    pub assigned_to: Option<String>,

    /// ID of the assigning user (default on add: the signed-in user)
    #[arg(long)]
    pub assigned_by: Option<String>,

    /// Priority: low, medium, high
    #[arg(short, long, value_parser = parse_wire::<TaskPriority>)]
    pub priority: Option<TaskPriority>,

    /// Status: pending, in-progress, completed
    #[arg(long, value_parser = parse_wire::<TaskStatus>)]
    pub status: Option<TaskStatus>,

    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due_date: Option<String>,
}

impl FieldArgs<Task> for TaskFields {
    fn into_draft(self) -> TaskDraft {
        TaskDraft {
            title: self.title,
            description: self.description,
            assigned_to: self.assigned_to,
            assigned_by: self.assigned_by,
            priority: self.priority,
            status: self.status,
            due_date: self.due_date,
        }
    }

    fn own_defaults(draft: &mut TaskDraft, session: &Session) {
        if draft.assigned_by.is_none() {
            draft.assigned_by = Some(session.user_id.clone());
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct LeaveFields {
    /// Employee ID (default on add: the signed-in user)
    #[arg(long)]
    pub employee_id: Option<String>,

    /// Employee name (default on add: the signed-in user's name)
    #[arg(long)]
    pub employee_name: Option<String>,

    /// Type: sick, vacation, personal, emergency
    #[arg(short = 't', long = "type", value_parser = parse_wire::<LeaveType>)]
    pub leave_type: Option<LeaveType>,

    /// First day of leave (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<String>,

    /// Last day of leave (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<String>,

    /// Reason for the request
    #[arg(long)]
    pub reason: Option<String>,

    /// Status: pending, approved, rejected
    #[arg(long, value_parser = parse_wire::<LeaveStatus>)]
    pub status: Option<LeaveStatus>,
}

impl FieldArgs<Leave> for LeaveFields {
    fn into_draft(self) -> LeaveDraft {
        LeaveDraft {
            employee_id: self.employee_id,
            employee_name: self.employee_name,
            leave_type: self.leave_type,
            start_date: self.start_date,
            end_date: self.end_date,
            reason: self.reason,
            status: self.status,
        }
    }

    fn own_defaults(draft: &mut LeaveDraft, session: &Session) {
        if draft.employee_id.is_none() {
            draft.employee_id = Some(session.user_id.clone());
            if draft.employee_name.is_none() {
                draft.employee_name = session.name.clone();
            }
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct AttendanceFields {
    /// Employee ID (default on add: the signed-in user)
    #[arg(long)]
    pub employee_id: Option<String>,

    /// Day of the record (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Check-in time (HH:MM)
    #[arg(long)]
    pub check_in: Option<String>,

    /// Check-out time (HH:MM)
    #[arg(long)]
    pub check_out: Option<String>,

    /// Status: present, absent, late
    #[arg(long, value_parser = parse_wire::<AttendanceStatus>)]
    pub status: Option<AttendanceStatus>,

    /// Hours worked
    #[arg(long)]
    pub hours: Option<f64>,
}

impl FieldArgs<Attendance> for AttendanceFields {
    fn into_draft(self) -> AttendanceDraft {
        AttendanceDraft {
            employee_id: self.employee_id,
            date: self.date,
            check_in: self.check_in,
            check_out: self.check_out,
            status: self.status,
            hours: self.hours,
        }
    }

    fn own_defaults(draft: &mut AttendanceDraft, session: &Session) {
        if draft.employee_id.is_none() {
            draft.employee_id = Some(session.user_id.clone());
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct NotificationFields {
    /// Notification title
    #[arg(long)]
    pub title: Option<String>,

    /// Message body
    #[arg(short, long)]
    pub message: Option<String>,

    /// Type: info, success, warning, error
    #[arg(short = 't', long = "type", value_parser = parse_wire::<NotificationType>)]
    pub kind: Option<NotificationType>,

    /// Mark as read or unread (true or false)
    #[arg(long, value_parser = parse_bool_strict)]
    pub read: Option<bool>,
}

impl FieldArgs<Notification> for NotificationFields {
    fn into_draft(self) -> NotificationDraft {
        NotificationDraft {
            title: self.title,
            message: self.message,
            kind: self.kind,
            is_read: self.read,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct PayrollFields {
    /// Employee ID
    #[arg(long)]
    pub employee_id: Option<String>,

    /// Employee name
    #[arg(long)]
    pub employee_name: Option<String>,

    /// Basic salary for the period
    #[arg(long)]
    pub basic_salary: Option<f64>,

    /// Allowances for the period
    #[arg(long)]
    pub allowances: Option<f64>,

    /// Deductions for the period
    #[arg(long)]
    pub deductions: Option<f64>,

    /// Net salary (default: basic + allowances - deductions when all three are given)
    #[arg(long)]
    pub net_salary: Option<f64>,

    /// Pay period (e.g. 2024-01)
    #[arg(long)]
    pub pay_period: Option<String>,

    /// Status: pending, processed, paid
    #[arg(long, value_parser = parse_wire::<PayrollStatus>)]
    pub status: Option<PayrollStatus>,
}

impl FieldArgs<Payroll> for PayrollFields {
    fn into_draft(self) -> PayrollDraft {
        PayrollDraft {
            employee_id: self.employee_id,
            employee_name: self.employee_name,
            basic_salary: self.basic_salary,
            allowances: self.allowances,
            deductions: self.deductions,
            net_salary: self.net_salary,
            pay_period: self.pay_period,
            status: self.status,
        }
        .with_computed_net()
    }
}

#[derive(Subcommand, Debug)]
pub enum AuthAction {
    /// Register a new account
    Register {
        /// Account role: admin, employee
        #[arg(long, default_value = "employee", value_parser = parse_wire::<Role>)]
        role: Role,

        /// Full name
        #[arg(long)]
        name: String,

        /// Email address
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,
    },

    /// Send a password reset link
    ForgotPassword {
        /// Account role: admin, employee
        #[arg(long, default_value = "employee", value_parser = parse_wire::<Role>)]
        role: Role,

        /// Email address of the account
        #[arg(long)]
        email: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (api.url, api.timeout, auth.token, session.user_id, session.name, session.role)
        key: String,

        /// Value to set
        value: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
}

impl Commands {
    /// Execute the command, dispatching to the appropriate handler.
    pub async fn run(self, output: OutputOptions) -> Result<()> {
        match self {
            Commands::Employees { action } => {
                run_resource::<Employee, _, _>(action.into_action(), output, no_extra).await
            }
            Commands::Tasks { action } => {
                run_resource::<Task, _, _>(action.into_action(), output, no_extra).await
            }
            Commands::Leaves { action } => {
                run_resource::<Leave, _, _>(action.into_action(), output, no_extra).await
            }
            Commands::Attendance { action } => {
                run_resource::<Attendance, _, _>(action.into_action(), output, no_extra).await
            }
            Commands::Notifications { action } => {
                run_resource::<Notification, _, _>(
                    action.into_action(),
                    output,
                    notification_figures,
                )
                .await
            }
            Commands::Payroll { action } => {
                run_resource::<Payroll, _, _>(action.into_action(), output, no_extra).await
            }

            Commands::Auth { action } => match action {
                AuthAction::Register {
                    role,
                    name,
                    email,
                    password,
                } => cmd_register(role, &name, &email, SecretString::from(password), output).await,
                AuthAction::ForgotPassword { role, email } => {
                    cmd_forgot_password(role, &email, output).await
                }
            },

            Commands::Config { action } => match action {
                ConfigAction::Show => cmd_config_show(output),
                ConfigAction::Set { key, value } => cmd_config_set(&key, &value, output),
                ConfigAction::Get { key } => cmd_config_get(&key, output),
            },

            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
        }
    }
}

type Figures<R> = fn(&[R]) -> Vec<(&'static str, Value)>;

fn no_extra<R>(_items: &[R]) -> Vec<(&'static str, Value)> {
    Vec::new()
}

fn notification_figures(items: &[Notification]) -> Vec<(&'static str, Value)> {
    let now = jiff::Zoned::now();
    vec![(
        "created_today",
        json!(created_on(items, now.date(), now.time_zone())),
    )]
}

/// Decide whose records a command shows. Employees always see their own;
/// admins see everything unless `--mine` is given. A returned session narrows
/// every printed list to the records it owns.
fn resolve_scope(session: Option<Session>, mine: bool) -> Result<Option<Session>> {
    match session {
        Some(session) if mine || !session.is_admin() => Ok(Some(session)),
        Some(_) => Ok(None),
        None if mine => Err(OfficeError::Config(
            "--mine needs a signed-in user. Set one with: officehub config set session.user_id <id>"
                .to_string(),
        )),
        None => Ok(None),
    }
}

async fn run_resource<R, F, D>(
    action: ResourceAction<F, D>,
    output: OutputOptions,
    extra: Figures<R>,
) -> Result<()>
where
    R: Summarize + TableRow,
    F: Into<R::Filter>,
    D: FieldArgs<R>,
{
    let config = Config::load()?;
    let session = config.session();
    let scope = resolve_scope(session.clone(), action.mine())?;
    let client = ApiClient::from_config(&config)?.resource::<R>();
    let command = ResourceCommand::new(client, scope, output);

    match action {
        ResourceAction::Ls { filter, .. } => command.list(&filter.into()).await,
        ResourceAction::Stats { filter, .. } => command.stats(&filter.into(), extra).await,
        ResourceAction::Add(fields) => {
            let mut draft = fields.into_draft();
            if let Some(session) = &session {
                D::own_defaults(&mut draft, session);
            }
            command.create(draft).await
        }
        ResourceAction::Set(id, fields) => command.update(&id, fields.into_draft()).await,
        ResourceAction::Rm(id) => command.remove(&id).await,
    }
}

fn parse_selection<T>(s: &str) -> std::result::Result<Selection<T>, String>
where
    T: FromStr,
    T::Err: Display,
{
    s.parse::<Selection<T>>().map_err(|e| e.to_string())
}

fn parse_wire<T>(s: &str) -> std::result::Result<T, String>
where
    T: FromStr<Err = OfficeError>,
{
    s.parse::<T>().map_err(|e| e.to_string())
}

fn parse_date(s: &str) -> std::result::Result<Date, String> {
    s.trim()
        .parse::<Date>()
        .map_err(|_| format!("Invalid date '{s}'. Expected YYYY-MM-DD"))
}

fn parse_id(s: &str) -> std::result::Result<String, String> {
    if s.is_empty() {
        return Err("ID cannot be empty".to_string());
    }

    if s.chars().all(char::is_whitespace) {
        return Err("ID cannot be only whitespace".to_string());
    }

    Ok(s.trim().to_string())
}

fn parse_bool_strict(s: &str) -> std::result::Result<bool, String> {
    match s.to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(format!(
            "Invalid boolean value '{s}'. Must be 'true' or 'false'"
        )),
    }
}

pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "officehub", &mut io::stdout());
}

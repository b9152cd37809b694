//! Predicate sets for each record kind.
//!
//! Text searches cover one or two fields per kind; enum predicates use the
//! `all` sentinel. An all-default predicate set matches every record.

use jiff::civil::Date;

use crate::model::{
    Attendance, AttendanceStatus, Employee, EmployeeStatus, Leave, LeaveStatus, LeaveType,
    Notification, NotificationType, Payroll, PayrollStatus, Task, TaskPriority, TaskStatus,
};

use super::{Predicate, Selection, matches_text, parse_day};

crate::wire_enum! {
    /// Read state of a notification
    pub enum ReadState("read state") {
        Read => "read",
        Unread => "unread",
    }
}

impl ReadState {
    pub fn of(is_read: bool) -> Self {
        if is_read { ReadState::Read } else { ReadState::Unread }
    }
}

/// Search over name and email; department and status selections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeFilter {
    pub search: String,
    pub department: Selection<String>,
    pub status: Selection<EmployeeStatus>,
}

impl Predicate<Employee> for EmployeeFilter {
    fn matches(&self, employee: &Employee) -> bool {
        matches_text(&self.search, &[&employee.name, &employee.email])
            && self.department.matches(&employee.department)
            && self.status.matches(&employee.status)
    }
}

/// Search over title and description; status and priority selections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub search: String,
    pub status: Selection<TaskStatus>,
    pub priority: Selection<TaskPriority>,
}

impl Predicate<Task> for TaskFilter {
    fn matches(&self, task: &Task) -> bool {
        matches_text(&self.search, &[&task.title, &task.description])
            && self.status.matches(&task.status)
            && self.priority.matches(&task.priority)
    }
}

/// Search over employee name and reason; status and type selections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeaveFilter {
    pub search: String,
    pub status: Selection<LeaveStatus>,
    pub leave_type: Selection<LeaveType>,
}

impl Predicate<Leave> for LeaveFilter {
    fn matches(&self, leave: &Leave) -> bool {
        matches_text(&self.search, &[&leave.employee_name, &leave.reason])
            && self.status.matches(&leave.status)
            && self.leave_type.matches(&leave.leave_type)
    }
}

/// Employee and status selections, plus an optional calendar day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceFilter {
    pub employee: Selection<String>,
    pub status: Selection<AttendanceStatus>,
    pub day: Option<Date>,
}

impl Predicate<Attendance> for AttendanceFilter {
    fn matches(&self, record: &Attendance) -> bool {
        let on_day = match self.day {
            Some(day) => parse_day(&record.date) == Some(day),
            None => true,
        };

        on_day
            && self.employee.matches(&record.employee_id)
            && self.status.matches(&record.status)
    }
}

/// Search over title and message; type and read-state selections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationFilter {
    pub search: String,
    pub kind: Selection<NotificationType>,
    pub read: Selection<ReadState>,
}

impl Predicate<Notification> for NotificationFilter {
    fn matches(&self, notification: &Notification) -> bool {
        matches_text(&self.search, &[&notification.title, &notification.message])
            && self.kind.matches(&notification.kind)
            && self.read.matches(&ReadState::of(notification.is_read))
    }
}

/// Search over employee name; status and pay-period selections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PayrollFilter {
    pub search: String,
    pub status: Selection<PayrollStatus>,
    pub period: Selection<String>,
}

impl Predicate<Payroll> for PayrollFilter {
    fn matches(&self, record: &Payroll) -> bool {
        matches_text(&self.search, &[&record.employee_name])
            && self.status.matches(&record.status)
            && self.period.matches(&record.pay_period)
    }
}

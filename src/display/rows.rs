use tabled::Tabled;

use crate::filter::leave_days;
use crate::model::{Attendance, Employee, Leave, Notification, Payroll, Task};

use super::{TableRow, format_amount, format_date_for_display, truncate_string};

const TITLE_WIDTH: usize = 40;
const MESSAGE_WIDTH: usize = 50;

#[derive(Tabled)]
pub struct EmployeeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Department")]
    department: String,
    #[tabled(rename = "Position")]
    position: String,
    #[tabled(rename = "Salary")]
    salary: String,
    #[tabled(rename = "Joined")]
    joined: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl TableRow for Employee {
    type Row = EmployeeRow;

    fn row(&self) -> EmployeeRow {
        EmployeeRow {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            department: self.department.clone(),
            position: self.position.clone(),
            salary: format_amount(self.salary),
            joined: format_date_for_display(&self.join_date),
            status: self.status.to_string(),
        }
    }
}

#[derive(Tabled)]
pub struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Assignee")]
    assigned_to: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Due")]
    due: String,
}

impl TableRow for Task {
    type Row = TaskRow;

    fn row(&self) -> TaskRow {
        TaskRow {
            id: self.id.clone(),
            title: truncate_string(&self.title, TITLE_WIDTH),
            assigned_to: self.assigned_to.clone(),
            priority: self.priority.to_string(),
            status: self.status.to_string(),
            due: format_date_for_display(&self.due_date),
        }
    }
}

#[derive(Tabled)]
pub struct LeaveRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Employee")]
    employee: String,
    #[tabled(rename = "Type")]
    leave_type: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Days")]
    days: u32,
    #[tabled(rename = "Status")]
    status: String,
}

impl TableRow for Leave {
    type Row = LeaveRow;

    fn row(&self) -> LeaveRow {
        LeaveRow {
            id: self.id.clone(),
            employee: self.employee_name.clone(),
            leave_type: self.leave_type.to_string(),
            from: format_date_for_display(&self.start_date),
            to: format_date_for_display(&self.end_date),
            days: leave_days(&self.start_date, &self.end_date),
            status: self.status.to_string(),
        }
    }
}

#[derive(Tabled)]
pub struct AttendanceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Employee")]
    employee: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "In")]
    check_in: String,
    #[tabled(rename = "Out")]
    check_out: String,
    #[tabled(rename = "Hours")]
    hours: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl TableRow for Attendance {
    type Row = AttendanceRow;

    fn row(&self) -> AttendanceRow {
        AttendanceRow {
            id: self.id.clone(),
            employee: self.employee_id.clone(),
            date: format_date_for_display(&self.date),
            check_in: self.check_in.clone(),
            check_out: self.check_out.clone().unwrap_or_else(|| "-".to_string()),
            hours: self
                .hours
                .map(|h| format!("{h:.1}"))
                .unwrap_or_else(|| "-".to_string()),
            status: self.status.to_string(),
        }
    }
}

#[derive(Tabled)]
pub struct NotificationRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Message")]
    message: String,
    #[tabled(rename = "Read")]
    read: &'static str,
    #[tabled(rename = "Created")]
    created: String,
}

impl TableRow for Notification {
    type Row = NotificationRow;

    fn row(&self) -> NotificationRow {
        NotificationRow {
            id: self.id.clone(),
            kind: self.kind.to_string(),
            title: truncate_string(&self.title, TITLE_WIDTH),
            message: truncate_string(&self.message, MESSAGE_WIDTH),
            read: if self.is_read { "yes" } else { "no" },
            created: format_date_for_display(&self.created_at),
        }
    }
}

#[derive(Tabled)]
pub struct PayrollRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Employee")]
    employee: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Basic")]
    basic: String,
    #[tabled(rename = "Allowances")]
    allowances: String,
    #[tabled(rename = "Deductions")]
    deductions: String,
    #[tabled(rename = "Net")]
    net: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl TableRow for Payroll {
    type Row = PayrollRow;

    fn row(&self) -> PayrollRow {
        PayrollRow {
            id: self.id.clone(),
            employee: self.employee_name.clone(),
            period: self.pay_period.clone(),
            basic: format_amount(self.basic_salary),
            allowances: format_amount(self.allowances),
            deductions: format_amount(self.deductions),
            net: format_amount(self.net_salary),
            status: self.status.to_string(),
        }
    }
}

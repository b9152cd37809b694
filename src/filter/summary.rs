//! Aggregate statistics per record kind.

use std::collections::BTreeMap;

use jiff::civil::Date;
use jiff::tz::TimeZone;
use serde::Serialize;

use crate::model::{
    Attendance, AttendanceStatus, Employee, EmployeeStatus, Leave, LeaveStatus, Notification,
    NotificationType, Payroll, PayrollStatus, Task, TaskPriority, TaskStatus,
};

use super::predicates::{
    AttendanceFilter, EmployeeFilter, LeaveFilter, NotificationFilter, PayrollFilter, TaskFilter,
};
use super::{Summarize, parse_day, parse_day_in};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmployeeStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub total_salary: f64,
    pub by_department: BTreeMap<String, usize>,
}

impl Summarize for Employee {
    type Filter = EmployeeFilter;
    type Stats = EmployeeStats;

    fn stats(items: &[Self]) -> EmployeeStats {
        items.iter().fold(EmployeeStats::default(), |mut acc, e| {
            acc.total += 1;
            match e.status {
                EmployeeStatus::Active => acc.active += 1,
                EmployeeStatus::Inactive => acc.inactive += 1,
            }
            acc.total_salary += e.salary;
            *acc.by_department.entry(e.department.clone()).or_default() += 1;
            acc
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl Summarize for Task {
    type Filter = TaskFilter;
    type Stats = TaskStats;

    fn stats(items: &[Self]) -> TaskStats {
        items.iter().fold(TaskStats::default(), |mut acc, t| {
            acc.total += 1;
            match t.status {
                TaskStatus::Pending => acc.pending += 1,
                TaskStatus::InProgress => acc.in_progress += 1,
                TaskStatus::Completed => acc.completed += 1,
            }
            match t.priority {
                TaskPriority::Low => acc.low += 1,
                TaskPriority::Medium => acc.medium += 1,
                TaskPriority::High => acc.high += 1,
            }
            acc
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LeaveStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub total_days: u64,
}

/// Inclusive day count of a leave span. Zero when either date is unparseable.
pub fn leave_days(start: &str, end: &str) -> u32 {
    let (Some(start), Some(end)) = (parse_day(start), parse_day(end)) else {
        return 0;
    };
    match start.until(end) {
        Ok(span) => span.get_days().unsigned_abs() + 1,
        Err(_) => 0,
    }
}

impl Summarize for Leave {
    type Filter = LeaveFilter;
    type Stats = LeaveStats;

    fn stats(items: &[Self]) -> LeaveStats {
        items.iter().fold(LeaveStats::default(), |mut acc, l| {
            acc.total += 1;
            match l.status {
                LeaveStatus::Pending => acc.pending += 1,
                LeaveStatus::Approved => acc.approved += 1,
                LeaveStatus::Rejected => acc.rejected += 1,
            }
            acc.total_days += u64::from(leave_days(&l.start_date, &l.end_date));
            acc
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AttendanceStats {
    pub total_days: usize,
    pub present_days: usize,
    pub late_days: usize,
    pub absent_days: usize,
    pub total_hours: f64,
}

impl Summarize for Attendance {
    type Filter = AttendanceFilter;
    type Stats = AttendanceStats;

    fn stats(items: &[Self]) -> AttendanceStats {
        items.iter().fold(AttendanceStats::default(), |mut acc, r| {
            acc.total_days += 1;
            match r.status {
                AttendanceStatus::Present => acc.present_days += 1,
                AttendanceStatus::Late => acc.late_days += 1,
                AttendanceStatus::Absent => acc.absent_days += 1,
            }
            acc.total_hours += r.hours.unwrap_or(0.0);
            acc
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NotificationStats {
    pub total: usize,
    pub unread: usize,
    pub info: usize,
    pub success: usize,
    pub warning: usize,
    pub error: usize,
}

impl Summarize for Notification {
    type Filter = NotificationFilter;
    type Stats = NotificationStats;

    fn stats(items: &[Self]) -> NotificationStats {
        items.iter().fold(NotificationStats::default(), |mut acc, n| {
            acc.total += 1;
            if !n.is_read {
                acc.unread += 1;
            }
            match n.kind {
                NotificationType::Info => acc.info += 1,
                NotificationType::Success => acc.success += 1,
                NotificationType::Warning => acc.warning += 1,
                NotificationType::Error => acc.error += 1,
            }
            acc
        })
    }
}

/// Number of notifications created on `day`, with creation timestamps read
/// in `tz`.
pub fn created_on(items: &[Notification], day: Date, tz: &TimeZone) -> usize {
    items
        .iter()
        .filter(|n| parse_day_in(&n.created_at, tz) == Some(day))
        .count()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PayrollStats {
    pub records: usize,
    pub total_payroll: f64,
    pub average_salary: f64,
    pub total_allowances: f64,
    pub total_deductions: f64,
    pub pending: usize,
    pub processed: usize,
    pub paid: usize,
}

impl Summarize for Payroll {
    type Filter = PayrollFilter;
    type Stats = PayrollStats;

    fn stats(items: &[Self]) -> PayrollStats {
        let mut acc = items.iter().fold(PayrollStats::default(), |mut acc, p| {
            acc.records += 1;
            acc.total_payroll += p.net_salary;
            acc.total_allowances += p.allowances;
            acc.total_deductions += p.deductions;
            match p.status {
                PayrollStatus::Pending => acc.pending += 1,
                PayrollStatus::Processed => acc.processed += 1,
                PayrollStatus::Paid => acc.paid += 1,
            }
            acc
        });

        if acc.records > 0 {
            acc.average_salary = acc.total_payroll / acc.records as f64;
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{filtered_view, stats};
    use crate::model::LeaveType;

    fn attendance(id: &str, status: AttendanceStatus, hours: Option<f64>) -> Attendance {
        Attendance {
            id: id.to_string(),
            employee_id: "1".to_string(),
            date: "2024-01-22".to_string(),
            check_in: "09:00".to_string(),
            check_out: None,
            status,
            hours,
        }
    }

    fn payroll(id: &str, net: f64, status: PayrollStatus) -> Payroll {
        Payroll {
            id: id.to_string(),
            employee_id: id.to_string(),
            employee_name: format!("Employee {id}"),
            basic_salary: net,
            allowances: 500.0,
            deductions: 500.0,
            net_salary: net,
            pay_period: "2024-01".to_string(),
            status,
        }
    }

    #[test]
    fn test_attendance_hours_and_partition() {
        let items = vec![
            attendance("1", AttendanceStatus::Present, Some(8.0)),
            attendance("2", AttendanceStatus::Late, Some(7.5)),
            attendance("3", AttendanceStatus::Absent, Some(0.0)),
            attendance("4", AttendanceStatus::Absent, None),
        ];

        let s = stats(&items);
        assert_eq!(s.total_hours, 15.5);
        assert_eq!(s.total_days, 4);
        assert_eq!(s.present_days + s.late_days + s.absent_days, s.total_days);
        assert_eq!(s.absent_days, 2);
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(stats::<Attendance>(&[]), AttendanceStats::default());
        let s = stats::<Payroll>(&[]);
        assert_eq!(s.records, 0);
        assert_eq!(s.average_salary, 0.0);
    }

    #[test]
    fn test_payroll_totals() {
        let items = vec![
            payroll("1", 5500.0, PayrollStatus::Paid),
            payroll("2", 4500.0, PayrollStatus::Pending),
        ];
        let s = stats(&items);
        assert_eq!(s.records, 2);
        assert_eq!(s.total_payroll, 10000.0);
        assert_eq!(s.average_salary, 5000.0);
        assert_eq!(s.total_allowances, 1000.0);
        assert_eq!(s.total_deductions, 1000.0);
        assert_eq!(s.paid + s.pending + s.processed, s.records);
    }

    #[test]
    fn test_employee_by_department() {
        let make = |id: &str, department: &str, status: EmployeeStatus| Employee {
            id: id.to_string(),
            name: format!("Employee {id}"),
            email: format!("e{id}@company.com"),
            department: department.to_string(),
            position: "Staff".to_string(),
            salary: 50000.0,
            join_date: "2023-01-01".to_string(),
            status,
            avatar: None,
        };
        let items = vec![
            make("1", "Engineering", EmployeeStatus::Active),
            make("2", "Engineering", EmployeeStatus::Inactive),
            make("3", "HR", EmployeeStatus::Active),
        ];

        let s = stats(&items);
        assert_eq!(s.total, 3);
        assert_eq!(s.active, 2);
        assert_eq!(s.inactive, 1);
        assert_eq!(s.total_salary, 150000.0);
        assert_eq!(s.by_department.get("Engineering"), Some(&2));
        assert_eq!(s.by_department.get("HR"), Some(&1));
    }

    #[test]
    fn test_task_counts() {
        let make = |status: TaskStatus, priority: TaskPriority| Task {
            id: "t".to_string(),
            title: "Review".to_string(),
            description: String::new(),
            assigned_to: "2".to_string(),
            assigned_by: "1".to_string(),
            priority,
            status,
            due_date: "2024-02-01".to_string(),
            created_at: "2024-01-20".to_string(),
        };
        let items = vec![
            make(TaskStatus::Pending, TaskPriority::High),
            make(TaskStatus::InProgress, TaskPriority::High),
            make(TaskStatus::Completed, TaskPriority::Low),
        ];

        let s = stats(&items);
        assert_eq!(
            s,
            TaskStats {
                total: 3,
                pending: 1,
                in_progress: 1,
                completed: 1,
                low: 1,
                medium: 0,
                high: 2,
            }
        );
    }

    #[test]
    fn test_leave_days_inclusive() {
        assert_eq!(leave_days("2024-01-15", "2024-01-17"), 3);
        assert_eq!(leave_days("2024-01-15", "2024-01-15"), 1);
        assert_eq!(leave_days("2024-02-28", "2024-03-01"), 3);
        assert_eq!(leave_days("soon", "2024-01-15"), 0);
    }

    #[test]
    fn test_leave_stats_over_filtered_view() {
        let make = |id: &str, status: LeaveStatus, start: &str, end: &str| Leave {
            id: id.to_string(),
            employee_id: id.to_string(),
            employee_name: format!("Employee {id}"),
            leave_type: LeaveType::Vacation,
            start_date: start.to_string(),
            end_date: end.to_string(),
            reason: "Family trip".to_string(),
            status,
            applied_at: "2024-01-01".to_string(),
        };
        let items = vec![
            make("1", LeaveStatus::Approved, "2024-01-15", "2024-01-19"),
            make("2", LeaveStatus::Pending, "2024-02-01", "2024-02-02"),
            make("3", LeaveStatus::Approved, "2024-03-04", "2024-03-04"),
        ];

        let approved = LeaveFilter {
            status: crate::filter::Selection::Only(LeaveStatus::Approved),
            ..Default::default()
        };
        let s = stats(&filtered_view(&items, &approved));
        assert_eq!(s.total, 2);
        assert_eq!(s.approved, 2);
        assert_eq!(s.total_days, 6);
    }

    #[test]
    fn test_leave_total_days_exceeds_u32() {
        let span = leave_days("0001-01-01", "9999-12-31");
        let items: Vec<Leave> = (0..1200)
            .map(|i| Leave {
                id: i.to_string(),
                employee_id: "2".to_string(),
                employee_name: "Sarah Johnson".to_string(),
                leave_type: LeaveType::Personal,
                start_date: "0001-01-01".to_string(),
                end_date: "9999-12-31".to_string(),
                reason: "Sabbatical".to_string(),
                status: LeaveStatus::Approved,
                applied_at: "2024-01-01".to_string(),
            })
            .collect();

        let s = stats(&items);
        assert_eq!(s.total_days, 1200 * u64::from(span));
        assert!(s.total_days > u64::from(u32::MAX));
    }

    #[test]
    fn test_notification_counts_and_created_on() {
        let make = |id: &str, kind: NotificationType, is_read: bool, at: &str| Notification {
            id: id.to_string(),
            title: "Update".to_string(),
            message: "Something happened".to_string(),
            kind,
            is_read,
            created_at: at.to_string(),
        };
        let items = vec![
            make("1", NotificationType::Info, false, "2024-01-25T09:00:00Z"),
            make("2", NotificationType::Warning, true, "2024-01-25T17:30:00Z"),
            make("3", NotificationType::Error, false, "2024-01-24T12:00:00Z"),
        ];

        let s = stats(&items);
        assert_eq!(s.total, 3);
        assert_eq!(s.unread, 2);
        assert_eq!(s.info + s.success + s.warning + s.error, s.total);
        assert_eq!(created_on(&items, jiff::civil::date(2024, 1, 25), &TimeZone::UTC), 2);
        assert_eq!(created_on(&items, jiff::civil::date(2024, 1, 1), &TimeZone::UTC), 0);
    }

    #[test]
    fn test_created_on_uses_local_day() {
        let make = |id: &str, at: &str| Notification {
            id: id.to_string(),
            title: "Update".to_string(),
            message: "Something happened".to_string(),
            kind: NotificationType::Info,
            is_read: false,
            created_at: at.to_string(),
        };
        // 00:30 and 23:00 local time at UTC+14, on either side of the UTC date change.
        let items = vec![
            make("1", "2026-10-18T10:30:00Z"),
            make("2", "2026-10-19T09:00:00Z"),
            make("3", "2026-10-18T09:00:00Z"),
        ];
        let kiritimati = TimeZone::fixed(jiff::tz::offset(14));

        assert_eq!(created_on(&items, jiff::civil::date(2026, 10, 19), &kiritimati), 2);
        assert_eq!(created_on(&items, jiff::civil::date(2026, 10, 18), &kiritimati), 1);
        assert_eq!(created_on(&items, jiff::civil::date(2026, 10, 18), &TimeZone::UTC), 2);
    }
}

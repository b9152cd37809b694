//! Resource records served by the office-management API.
//!
//! Every record is a flat struct with a string id, mirrored from the service's
//! camelCase JSON. The service owns the data; the client only holds a cached,
//! possibly-stale copy. Each record kind has a matching draft type used as the
//! partial payload of create and update calls.

mod attendance;
mod employee;
mod leave;
mod notification;
mod payroll;
mod task;

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use attendance::{Attendance, AttendanceDraft, AttendanceStatus};
pub use employee::{Employee, EmployeeDraft, EmployeeStatus};
pub use leave::{Leave, LeaveDraft, LeaveStatus, LeaveType};
pub use notification::{Notification, NotificationDraft, NotificationType};
pub use payroll::{Payroll, PayrollDraft, PayrollStatus};
pub use task::{Task, TaskDraft, TaskPriority, TaskStatus};

/// A record kind exposed by the service as a REST collection.
pub trait Resource: Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static {
    /// Collection path relative to the API origin (e.g. `employees`)
    const PATH: &'static str;

    /// Human-readable plural name used in messages
    const LABEL: &'static str;

    /// Partial payload accepted by create and update
    type Draft: Serialize + fmt::Debug + Send + Sync;

    fn id(&self) -> &str;

    /// Id of the employee this record belongs to, if the kind has an owner.
    fn owner_id(&self) -> Option<&str> {
        None
    }
}

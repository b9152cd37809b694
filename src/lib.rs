#[macro_use]
pub mod macros;

pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod filter;
pub mod model;
pub mod paths;
pub mod remote;
pub mod session;
pub mod store;

#[cfg(test)]
pub(crate) mod test_guards;

pub use config::Config;
pub use error::{OfficeError, Result};
pub use filter::{Selection, filtered_view, stats};
pub use model::{Attendance, Employee, Leave, Notification, Payroll, Resource, Task};
pub use remote::{ApiClient, HttpResource, ResourceClient};
pub use session::{Role, Session};
pub use store::{CollectionState, CollectionStore, Mutation};

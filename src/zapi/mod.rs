//! ZAPI module
//!
//! Client for the Zephyr for Jira REST API: projects, versions, test cycles
//! and executions.

pub mod client;
pub mod cycles;
pub mod dates;
pub mod executions;
pub mod projects;
pub mod status;
pub mod types;

pub use client::ZapiClient;
pub use cycles::group_cycles;
pub use dates::CycleWindow;
pub use status::ExecutionStatus;
pub use types::*;

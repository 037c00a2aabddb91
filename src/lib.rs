//! Zephyr for Jira (ZAPI) client
//!
//! A small async client for the ZAPI test-management REST API, plus the
//! `zapi` command-line tool built on it.
//!
//! ## Features
//!
//! - Resolve project and version names to the ids ZAPI expects
//! - Create, copy, list and delete test cycles
//! - Add executions to cycles and update their status
//! - HTTP Basic authentication, credentials never logged
//! - Configuration via TOML files and environment variables
//!
//! ## Absent results
//!
//! Lookups that find nothing return `Ok(None)` rather than an error.
//! Transport failures and undecodable bodies are errors.
//!
//! ## Example
//!
//! ```no_run
//! use zapi_client::config::load_config;
//! use zapi_client::zapi::{ExecutionStatus, ZapiClient};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = load_config(None)?;
//! let client = ZapiClient::from_config(&config.jira)?;
//!
//! if let Some(cycle_id) = client.create_test_cycle("Nightly", "Web QA", "2.0").await? {
//!     client.add_tests_to_cycle(&["QA-1".to_string()], "Web QA", "2.0", &cycle_id).await?;
//!     for execution in client.cycle_executions(&cycle_id).await? {
//!         client.update_execution_status(&execution.id, ExecutionStatus::Pass).await?;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod util;
pub mod zapi;

// Re-export main types
pub use config::{AppConfig, load_config};
pub use error::{AppError, Result, ZapiError, ZapiResult};
pub use zapi::{ExecutionStatus, ZapiClient};

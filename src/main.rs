//! ZAPI command-line client
//!
//! Every subcommand maps to one client operation and prints its JSON result.
//! An absent result prints `null` and exits with status 1.

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use zapi_client::{
    config::{LogFormat, load_config},
    zapi::{CycleDraft, ExecutionStatus, ZapiClient},
};

/// Zephyr for Jira test-management client
#[derive(Parser, Debug)]
#[command(name = "zapi")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "ZAPI_CONFIG")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error); overrides logging.level
    #[arg(long, env = "ZAPI_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List projects
    Projects,
    /// Resolve a project name to its id
    ProjectId { project: String },
    /// Show the version board of a project
    Versions { project: String },
    /// Resolve an unreleased version name to its id
    VersionId { project: String, version: String },
    /// List the test cycles of a project version
    Cycles { project: String, version: String },
    /// List the executions of a cycle
    CycleExecutions { cycle_id: String },
    /// Find the issue id of an issue key within a cycle
    IssueId { cycle_id: String, issue_key: String },
    /// Create a test cycle running for 30 days from today
    CreateCycle {
        name: String,
        project: String,
        version: String,
        #[command(flatten)]
        details: CycleDetails,
    },
    /// Create a test cycle cloned from an existing one
    CopyCycle {
        source_cycle_id: String,
        name: String,
        project: String,
        version: String,
        #[command(flatten)]
        details: CycleDetails,
    },
    /// Delete a test cycle if it exists
    DeleteCycle { cycle_id: String },
    /// Add one issue to a cycle
    AddExecution {
        project: String,
        version: String,
        cycle_id: String,
        issue_id: String,
    },
    /// Add several issues to a cycle by key
    AddTests {
        project: String,
        version: String,
        cycle_id: String,
        #[arg(required = true)]
        issue_keys: Vec<String>,
    },
    /// Show one execution
    Execution { execution_id: String },
    /// Show every execution of an issue
    IssueExecutions { issue_id: String },
    /// Set an execution's status (PASS, FAIL, WIP, BLOCKED, UNEXECUTED)
    UpdateStatus {
        execution_id: String,
        status: ExecutionStatus,
    },
}

/// Optional cycle fields
#[derive(Args, Debug)]
struct CycleDetails {
    #[arg(long, default_value = "")]
    build: String,
    #[arg(long, default_value = "")]
    environment: String,
    #[arg(long, default_value = "")]
    description: String,
}

impl CycleDetails {
    fn draft(self, name: String) -> CycleDraft {
        CycleDraft::new(name)
            .with_build(self.build)
            .with_environment(self.environment)
            .with_description(self.description)
    }
}

fn init_logging(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

/// Run one subcommand; `None` means the lookup found nothing
async fn run(client: &ZapiClient, command: Command) -> anyhow::Result<Option<Value>> {
    let result = match command {
        Command::Projects => Some(serde_json::to_value(client.list_projects().await?)?),
        Command::ProjectId { project } => client.project_id(&project).await?.map(Value::String),
        Command::Versions { project } => client.list_versions(&project).await?,
        Command::VersionId { project, version } => client
            .version_id(&project, &version)
            .await?
            .map(Value::String),
        Command::Cycles { project, version } => client.list_cycles(&project, &version).await?,
        Command::CycleExecutions { cycle_id } => Some(serde_json::to_value(
            client.cycle_executions(&cycle_id).await?,
        )?),
        Command::IssueId {
            cycle_id,
            issue_key,
        } => client
            .issue_id(&cycle_id, &issue_key)
            .await?
            .map(Value::String),
        Command::CreateCycle {
            name,
            project,
            version,
            details,
        } => client
            .create_cycle(details.draft(name), &project, &version)
            .await?
            .map(Value::String),
        Command::CopyCycle {
            source_cycle_id,
            name,
            project,
            version,
            details,
        } => client
            .create_cycle(
                details.draft(name).cloned_from(source_cycle_id),
                &project,
                &version,
            )
            .await?
            .map(Value::String),
        Command::DeleteCycle { cycle_id } => client.delete_test_cycle(&cycle_id).await?,
        Command::AddExecution {
            project,
            version,
            cycle_id,
            issue_id,
        } => client
            .add_execution(&project, &version, &cycle_id, &issue_id)
            .await?
            .map(Value::String),
        Command::AddTests {
            project,
            version,
            cycle_id,
            issue_keys,
        } => {
            client
                .add_tests_to_cycle(&issue_keys, &project, &version, &cycle_id)
                .await?
        }
        Command::Execution { execution_id } => Some(client.execution(&execution_id).await?),
        Command::IssueExecutions { issue_id } => Some(client.issue_executions(&issue_id).await?),
        Command::UpdateStatus {
            execution_id,
            status,
        } => client
            .update_execution_status(&execution_id, status)
            .await?
            .then(|| Value::String("Success".to_string())),
    };

    Ok(result)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Load configuration
    let config = load_config(cli.config.as_deref())?;

    // Initialize logging
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    init_logging(&level, config.logging.format);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        server = %config.jira.url,
        "Starting ZAPI client"
    );

    // Create ZAPI client
    let client = ZapiClient::from_config(&config.jira)
        .inspect_err(|e| error!(error = %e, "Failed to create ZAPI client"))?;

    let result = run(&client, cli.command)
        .await
        .inspect_err(|e| error!(error = %e, "Command failed"))?;

    match result {
        Some(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("null");
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_update_status() {
        let cli = Cli::try_parse_from(["zapi", "update-status", "77", "blocked"]).unwrap();
        match cli.command {
            Command::UpdateStatus {
                execution_id,
                status,
            } => {
                assert_eq!(execution_id, "77");
                assert_eq!(status, ExecutionStatus::Blocked);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_status() {
        assert!(Cli::try_parse_from(["zapi", "update-status", "77", "skipped"]).is_err());
    }

    #[test]
    fn test_add_tests_requires_keys() {
        assert!(Cli::try_parse_from(["zapi", "add-tests", "Web", "2.0", "5"]).is_err());

        let cli =
            Cli::try_parse_from(["zapi", "add-tests", "Web", "2.0", "5", "QA-1", "QA-2"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::AddTests { ref issue_keys, .. } if issue_keys.len() == 2
        ));
    }

    #[test]
    fn test_copy_cycle_details() {
        let cli = Cli::try_parse_from([
            "zapi",
            "copy-cycle",
            "31",
            "Nightly copy",
            "Web",
            "2.0",
            "--environment",
            "staging",
        ])
        .unwrap();

        let Command::CopyCycle {
            source_cycle_id,
            name,
            details,
            ..
        } = cli.command
        else {
            panic!("expected copy-cycle");
        };
        let draft = details.draft(name).cloned_from(source_cycle_id);
        assert_eq!(draft.cloned_cycle_id.as_deref(), Some("31"));
        assert_eq!(draft.environment, "staging");
        assert_eq!(draft.build, "");
    }
}

//! Execution operations

use crate::error::{ZapiError, ZapiResult};
use crate::zapi::client::ZapiClient;
use crate::zapi::status::ExecutionStatus;
use crate::zapi::types::{AddTestsToCycle, CycleExecutions, Execution, NewExecution, QuickExecute};
use reqwest::StatusCode;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

const EXECUTION: &str = "/execution";
const ADD_TESTS_TO_CYCLE: &str = "/execution/addTestsToCycle";

/// `method` value of addTestsToCycle that adds issues by key
const ADD_BY_ISSUE_KEYS: &str = "1";

impl ZapiClient {
    /// All executions of a cycle; empty when the response has none
    pub async fn cycle_executions(&self, cycle_id: &str) -> ZapiResult<Vec<Execution>> {
        let list: CycleExecutions = self
            .get_with_query(EXECUTION, &[("cycleId", cycle_id)])
            .await?;

        for execution in &list.executions {
            debug!(
                execution_id = %execution.id,
                issue_key = %execution.issue_key,
                "Cycle execution"
            );
        }
        Ok(list.executions)
    }

    /// Find the issue id of `issue_key` among a cycle's executions
    pub async fn issue_id(&self, cycle_id: &str, issue_key: &str) -> ZapiResult<Option<String>> {
        let executions = self.cycle_executions(cycle_id).await?;
        let issue_id = executions
            .into_iter()
            .find(|execution| execution.issue_key == issue_key)
            .map(|execution| execution.issue_id);

        debug!(cycle_id, issue_key, ?issue_id, "Resolved issue");
        Ok(issue_id)
    }

    /// Add one issue to a cycle; returns the new execution id
    ///
    /// ZAPI answers with a map keyed by the new execution id. Anything other
    /// than exactly one key is reported as an invalid response.
    pub async fn add_execution(
        &self,
        project_name: &str,
        version_name: &str,
        cycle_id: &str,
        issue_id: &str,
    ) -> ZapiResult<Option<String>> {
        let Some(scope) = self.resolve_scope(project_name, version_name).await? else {
            return Ok(None);
        };

        let body = NewExecution {
            issue_id: issue_id.to_string(),
            version_id: scope.version_id,
            cycle_id: cycle_id.to_string(),
            project_id: scope.project_id,
        };
        let created: Map<String, Value> = self.post_created(EXECUTION, &body).await?;
        let execution_id = single_key(created)?;

        info!(%execution_id, cycle_id, issue_id, "Added execution");
        Ok(Some(execution_id))
    }

    /// Add several issues to a cycle by key
    pub async fn add_tests_to_cycle(
        &self,
        issue_keys: &[String],
        project_name: &str,
        version_name: &str,
        cycle_id: &str,
    ) -> ZapiResult<Option<Value>> {
        let Some(scope) = self.resolve_scope(project_name, version_name).await? else {
            return Ok(None);
        };

        let body = AddTestsToCycle {
            issues: issue_keys.to_vec(),
            version_id: scope.version_id,
            cycle_id: cycle_id.to_string(),
            project_id: scope.project_id,
            method: ADD_BY_ISSUE_KEYS,
        };
        let response: Value = self.post(ADD_TESTS_TO_CYCLE, &body).await?;

        info!(cycle_id, count = issue_keys.len(), "Added tests to cycle");
        Ok(Some(response))
    }

    /// Fetch a single execution
    pub async fn execution(&self, execution_id: &str) -> ZapiResult<Value> {
        let path = format!("{}/{}", EXECUTION, Self::encode_segment(execution_id));
        self.get(&path).await
    }

    /// Fetch every execution of an issue, across cycles
    pub async fn issue_executions(&self, issue_id: &str) -> ZapiResult<Value> {
        self.get_with_query(&format!("{}/", EXECUTION), &[("issueId", issue_id)])
            .await
    }

    /// Set the status of an execution
    ///
    /// Returns `true` only when ZAPI answers HTTP 200.
    pub async fn update_execution_status(
        &self,
        execution_id: &str,
        status: ExecutionStatus,
    ) -> ZapiResult<bool> {
        let path = format!(
            "{}/{}/quickExecute",
            EXECUTION,
            Self::encode_segment(execution_id)
        );
        let body = QuickExecute {
            status: status.code(),
        };

        let http_status = self.post_for_status(&path, &body).await?;
        if http_status != StatusCode::OK {
            warn!(
                execution_id,
                %status,
                http_status = http_status.as_u16(),
                "Execution status not updated"
            );
            return Ok(false);
        }

        info!(execution_id, %status, "Updated execution status");
        Ok(true)
    }
}

/// The only key of a response map
fn single_key(map: Map<String, Value>) -> ZapiResult<String> {
    if map.len() != 1 {
        return Err(ZapiError::InvalidResponse(format!(
            "expected exactly one execution id in response, got {} keys",
            map.len()
        )));
    }

    map.into_iter()
        .next()
        .map(|(key, _)| key)
        .ok_or_else(|| ZapiError::InvalidResponse("empty response".to_string()))
}

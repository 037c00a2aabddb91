//! Test cycle operations

use crate::error::ZapiResult;
use crate::zapi::client::ZapiClient;
use crate::zapi::dates::CycleWindow;
use crate::zapi::types::{CreatedCycle, CycleDraft, NewCycle, ProjectScope};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, info};

const CYCLE: &str = "/cycle";

impl ZapiClient {
    /// Cycles of a project version, with execution summaries expanded
    ///
    /// The raw payload is returned untouched. `None` when the project or
    /// version does not resolve.
    pub async fn list_cycles(
        &self,
        project_name: &str,
        version_name: &str,
    ) -> ZapiResult<Option<Value>> {
        let Some(scope) = self.resolve_scope(project_name, version_name).await? else {
            return Ok(None);
        };

        let cycles: Value = self
            .get_with_query(
                CYCLE,
                &[
                    ("projectId", scope.project_id.as_str()),
                    ("versionId", scope.version_id.as_str()),
                    ("offset", "0"),
                    ("expand", "executionSummaries"),
                ],
            )
            .await?;

        let grouped = group_cycles(&cycles);
        debug!(cycle_ids = ?grouped.keys().collect::<Vec<_>>(), "Listed test cycles");

        Ok(Some(cycles))
    }

    /// Create a cycle running for the next 30 days; returns the new cycle id
    pub async fn create_test_cycle(
        &self,
        cycle_name: &str,
        project_name: &str,
        version_name: &str,
    ) -> ZapiResult<Option<String>> {
        self.create_cycle(CycleDraft::new(cycle_name), project_name, version_name)
            .await
    }

    /// Create a cycle that clones the executions of `source_cycle_id`
    pub async fn copy_test_cycle(
        &self,
        source_cycle_id: &str,
        cycle_name: &str,
        project_name: &str,
        version_name: &str,
    ) -> ZapiResult<Option<String>> {
        let draft = CycleDraft::new(cycle_name).cloned_from(source_cycle_id);
        self.create_cycle(draft, project_name, version_name).await
    }

    /// Create a cycle from a draft, starting today
    pub async fn create_cycle(
        &self,
        draft: CycleDraft,
        project_name: &str,
        version_name: &str,
    ) -> ZapiResult<Option<String>> {
        let Some(scope) = self.resolve_scope(project_name, version_name).await? else {
            return Ok(None);
        };

        let body = new_cycle_body(draft, scope, CycleWindow::from_today());
        let created: CreatedCycle = self.post_created(CYCLE, &body).await?;

        info!(
            cycle_id = %created.id,
            name = %body.name,
            cloned_from = %body.cloned_cycle_id,
            "Created test cycle"
        );
        Ok(Some(created.id))
    }

    /// Delete a cycle if it exists
    ///
    /// The cycle is read first; when that read answers with an `Error` key
    /// there is nothing to delete and `None` is returned without issuing
    /// the DELETE.
    pub async fn delete_test_cycle(&self, cycle_id: &str) -> ZapiResult<Option<Value>> {
        let path = format!("{}/{}", CYCLE, Self::encode_segment(cycle_id));

        let existing: Value = self.get(&path).await?;
        if existing.get("Error").is_some() {
            debug!(cycle_id, "Cycle not found, nothing to delete");
            return Ok(None);
        }

        let confirmation: Value = self.delete(&path).await?;
        info!(cycle_id, "Deleted test cycle");
        Ok(Some(confirmation))
    }
}

fn new_cycle_body(draft: CycleDraft, scope: ProjectScope, window: CycleWindow) -> NewCycle {
    NewCycle {
        cloned_cycle_id: draft.cloned_cycle_id.unwrap_or_default(),
        name: draft.name,
        build: draft.build,
        environment: draft.environment,
        description: draft.description,
        start_date: window.start_date,
        end_date: window.end_date,
        project_id: scope.project_id,
        version_id: scope.version_id,
    }
}

/// Group the cycle records of a cycle listing by id
///
/// Only all-digit keys are cycle ids, so the ad hoc cycle (`-1`) and
/// bookkeeping keys such as `recordsCount` are left out.
pub fn group_cycles(cycles: &Value) -> BTreeMap<String, Vec<Value>> {
    let Some(entries) = cycles.as_object() else {
        return BTreeMap::new();
    };

    entries
        .iter()
        .filter(|(key, _)| !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()))
        .map(|(key, record)| (key.clone(), vec![record.clone()]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_group_cycles_keeps_numeric_keys() {
        let payload = json!({
            "-1": {"name": "Ad hoc"},
            "12": {"name": "Sprint 12"},
            "7": {"name": "Smoke"},
            "recordsCount": 3
        });

        let grouped = group_cycles(&payload);
        assert_eq!(grouped.keys().collect::<Vec<_>>(), vec!["12", "7"]);
        assert_eq!(grouped["12"], vec![json!({"name": "Sprint 12"})]);
    }

    #[test]
    fn test_group_cycles_non_object() {
        assert!(group_cycles(&json!([1, 2])).is_empty());
    }

    #[test]
    fn test_new_cycle_body_from_draft() {
        let draft = CycleDraft::new("Nightly").cloned_from("31").with_build("b-9");
        let scope = ProjectScope {
            project_id: "10".into(),
            version_id: "200".into(),
        };
        let window = CycleWindow::starting(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());

        let body = new_cycle_body(draft, scope, window);
        assert_eq!(body.cloned_cycle_id, "31");
        assert_eq!(body.name, "Nightly");
        assert_eq!(body.build, "b-9");
        assert_eq!(body.environment, "");
        assert_eq!(body.start_date, "05/Jan/24");
        assert_eq!(body.end_date, "04/Feb/24");
        assert_eq!(body.project_id, "10");
        assert_eq!(body.version_id, "200");
    }

    #[test]
    fn test_new_cycle_body_without_source() {
        let scope = ProjectScope {
            project_id: "1".into(),
            version_id: "2".into(),
        };
        let window = CycleWindow::starting(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        let body = new_cycle_body(CycleDraft::new("Fresh"), scope, window);
        assert_eq!(body.cloned_cycle_id, "");
    }
}

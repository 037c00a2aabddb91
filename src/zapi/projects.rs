//! Project and version lookups
//!
//! ZAPI endpoints take numeric project and version ids; these helpers turn
//! the names people type into those ids. A name that matches nothing
//! resolves to `None`.

use crate::error::{ZapiError, ZapiResult};
use crate::zapi::client::ZapiClient;
use crate::zapi::types::{LabelValue, ProjectList, ProjectScope, VersionBoard};
use serde_json::Value;
use tracing::{debug, warn};

const PROJECT_LIST: &str = "/util/project-list";
const VERSION_BOARD: &str = "/util/versionBoard-list";

impl ZapiClient {
    /// List every project visible to the authenticated user
    pub async fn list_projects(&self) -> ZapiResult<Vec<LabelValue>> {
        let list: ProjectList = self.get(PROJECT_LIST).await?;
        debug!(count = list.options.len(), "Listed projects");
        Ok(list.options)
    }

    /// Resolve a project name to its id
    pub async fn project_id(&self, project_name: &str) -> ZapiResult<Option<String>> {
        let projects = self.list_projects().await?;
        let project_id = LabelValue::find(&projects, project_name).map(str::to_string);
        debug!(project = project_name, ?project_id, "Resolved project");
        Ok(project_id)
    }

    /// Version board of a project, unscheduled versions included, as received
    ///
    /// Returns `None` without querying versions when the project is unknown.
    pub async fn list_versions(&self, project_name: &str) -> ZapiResult<Option<Value>> {
        let Some(project_id) = self.project_id(project_name).await? else {
            warn!(project = project_name, "Project not found");
            return Ok(None);
        };

        self.versions_for_project(&project_id).await.map(Some)
    }

    /// Version board for an already-resolved project id
    pub async fn versions_for_project(&self, project_id: &str) -> ZapiResult<Value> {
        self.get_with_query(
            VERSION_BOARD,
            &[("projectId", project_id), ("showUnscheduled", "true")],
        )
        .await
    }

    fn version_board(payload: &Value) -> ZapiResult<VersionBoard> {
        VersionBoard::from_payload(payload)
            .map_err(|e| ZapiError::InvalidResponse(format!("Malformed version board: {}", e)))
    }

    /// Resolve a version name among the project's unreleased versions
    pub async fn version_id(
        &self,
        project_name: &str,
        version_name: &str,
    ) -> ZapiResult<Option<String>> {
        let Some(payload) = self.list_versions(project_name).await? else {
            return Ok(None);
        };

        let version_id = Self::version_board(&payload)?.unreleased_version_id(version_name);
        debug!(
            project = project_name,
            version = version_name,
            ?version_id,
            "Resolved version"
        );
        Ok(version_id)
    }

    /// Resolve project and version together, looking the project up once
    pub async fn resolve_scope(
        &self,
        project_name: &str,
        version_name: &str,
    ) -> ZapiResult<Option<ProjectScope>> {
        let Some(project_id) = self.project_id(project_name).await? else {
            warn!(project = project_name, "Project not found");
            return Ok(None);
        };

        let payload = self.versions_for_project(&project_id).await?;
        let Some(version_id) = Self::version_board(&payload)?.unreleased_version_id(version_name)
        else {
            warn!(
                project = project_name,
                version = version_name,
                "Unreleased version not found"
            );
            return Ok(None);
        };

        Ok(Some(ProjectScope {
            project_id,
            version_id,
        }))
    }
}

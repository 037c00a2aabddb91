//! ZAPI request and response types
//!
//! ZAPI is inconsistent about id encoding: project and version ids arrive as
//! strings, issue and execution ids as numbers. Every id is normalised to a
//! `String` on decode.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Deserialize an id sent either as a JSON string or a JSON number
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!(
            "expected a string or numeric id, got {}",
            other
        ))),
    }
}

/// Like [`id_string`], but `null` and missing fields become `None`
fn opt_id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string or numeric id, got {}",
            other
        ))),
    }
}

/// A `{label, value}` entry, as used by the project and version pickers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelValue {
    pub label: String,
    #[serde(deserialize_with = "id_string")]
    pub value: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LabelValue {
    /// Linear scan for the first entry whose label matches exactly
    pub fn find<'a>(entries: &'a [LabelValue], label: &str) -> Option<&'a str> {
        entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.value.as_str())
    }
}

/// Response of `util/project-list`
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectList {
    pub options: Vec<LabelValue>,
}

/// Typed view of a `util/versionBoard-list` payload, used for id lookups
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionBoard {
    #[serde(default)]
    pub unreleased_versions: Vec<LabelValue>,

    #[serde(default)]
    pub released_versions: Vec<LabelValue>,
}

impl VersionBoard {
    /// Read the version lists out of a raw board payload
    pub fn from_payload(payload: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(payload)
    }

    /// Resolve a version id; released versions are never considered
    pub fn unreleased_version_id(&self, version_name: &str) -> Option<String> {
        LabelValue::find(&self.unreleased_versions, version_name).map(str::to_string)
    }
}

/// Project and version ids an operation runs against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectScope {
    pub project_id: String,
    pub version_id: String,
}

/// One execution of a test issue inside a cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    #[serde(deserialize_with = "id_string")]
    pub id: String,

    #[serde(deserialize_with = "id_string")]
    pub issue_id: String,

    /// Empty when the server omits it; such entries never match a key lookup
    #[serde(default)]
    pub issue_key: String,

    #[serde(default, deserialize_with = "opt_id_string")]
    pub cycle_id: Option<String>,

    #[serde(default, deserialize_with = "opt_id_string")]
    pub execution_status: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of `execution?cycleId=`
#[derive(Debug, Clone, Deserialize)]
pub struct CycleExecutions {
    #[serde(default)]
    pub executions: Vec<Execution>,
}

/// Caller-facing description of a cycle to create
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleDraft {
    pub name: String,
    /// Cycle to clone executions from
    pub cloned_cycle_id: Option<String>,
    pub build: String,
    pub environment: String,
    pub description: String,
}

impl CycleDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn cloned_from(mut self, cycle_id: impl Into<String>) -> Self {
        self.cloned_cycle_id = Some(cycle_id.into());
        self
    }

    pub fn with_build(mut self, build: impl Into<String>) -> Self {
        self.build = build.into();
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Body of `POST cycle`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCycle {
    /// Empty when the cycle is not a copy
    pub cloned_cycle_id: String,
    pub name: String,
    pub build: String,
    pub environment: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub project_id: String,
    pub version_id: String,
}

/// Response of `POST cycle`
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedCycle {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
}

/// Body of `POST execution`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExecution {
    pub issue_id: String,
    pub version_id: String,
    pub cycle_id: String,
    pub project_id: String,
}

/// Body of `POST execution/addTestsToCycle`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTestsToCycle {
    pub issues: Vec<String>,
    pub version_id: String,
    pub cycle_id: String,
    pub project_id: String,
    /// "1" adds the issues listed in `issues`
    pub method: &'static str,
}

/// Body of `POST execution/<id>/quickExecute`
#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuickExecute {
    pub status: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_label_value_accepts_numeric_value() {
        let entry: LabelValue = serde_json::from_value(json!({"label": "P", "value": 10})).unwrap();
        assert_eq!(entry.value, "10");

        let entry: LabelValue =
            serde_json::from_value(json!({"label": "P", "value": "10"})).unwrap();
        assert_eq!(entry.value, "10");
    }

    #[test]
    fn test_label_value_rejects_object_value() {
        let result: Result<LabelValue, _> =
            serde_json::from_value(json!({"label": "P", "value": {"id": 1}}));
        assert!(result.is_err());
    }

    #[test]
    fn test_find_returns_first_match() {
        let entries = vec![
            LabelValue {
                label: "Alpha".into(),
                value: "1".into(),
                ..Default::default()
            },
            LabelValue {
                label: "Beta".into(),
                value: "2".into(),
                ..Default::default()
            },
            LabelValue {
                label: "Beta".into(),
                value: "3".into(),
                ..Default::default()
            },
        ];
        assert_eq!(LabelValue::find(&entries, "Beta"), Some("2"));
        assert_eq!(LabelValue::find(&entries, "beta"), None);
    }

    #[test]
    fn test_version_board_ignores_released() {
        let payload = json!({
            "unreleasedVersions": [{"label": "2.0", "value": "200", "archived": false}],
            "releasedVersions": [{"label": "1.0", "value": "100", "archived": false}],
            "type": "version"
        });
        let board = VersionBoard::from_payload(&payload).unwrap();

        assert_eq!(board.unreleased_version_id("2.0"), Some("200".to_string()));
        assert_eq!(board.unreleased_version_id("1.0"), None);
        assert_eq!(board.unreleased_versions[0].extra["archived"], false);
    }

    #[test]
    fn test_label_value_keeps_extra_fields() {
        let entry: LabelValue = serde_json::from_value(json!({
            "label": "Web QA",
            "value": "11",
            "type": "software"
        }))
        .unwrap();

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({"label": "Web QA", "value": "11", "type": "software"})
        );
    }

    #[test]
    fn test_execution_without_issue_key() {
        let execution: Execution =
            serde_json::from_value(json!({"id": 7, "issueId": 70})).unwrap();
        assert_eq!(execution.issue_key, "");
    }

    #[test]
    fn test_execution_keeps_unknown_fields() {
        let execution: Execution = serde_json::from_value(json!({
            "id": 501,
            "issueId": 10000,
            "issueKey": "QA-1",
            "cycleId": 7,
            "executionStatus": "1",
            "summary": "Login works"
        }))
        .unwrap();

        assert_eq!(execution.id, "501");
        assert_eq!(execution.issue_id, "10000");
        assert_eq!(execution.cycle_id.as_deref(), Some("7"));
        assert_eq!(execution.execution_status.as_deref(), Some("1"));
        assert_eq!(execution.extra["summary"], "Login works");
    }

    #[test]
    fn test_cycle_executions_default_empty() {
        let list: CycleExecutions = serde_json::from_value(json!({"status": {}})).unwrap();
        assert!(list.executions.is_empty());
    }

    #[test]
    fn test_new_cycle_wire_names() {
        let body = NewCycle {
            cloned_cycle_id: String::new(),
            name: "Sprint 1".into(),
            build: String::new(),
            environment: String::new(),
            description: String::new(),
            start_date: "05/Jan/24".into(),
            end_date: "04/Feb/24".into(),
            project_id: "10".into(),
            version_id: "200".into(),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["clonedCycleId"], "");
        assert_eq!(value["startDate"], "05/Jan/24");
        assert_eq!(value["projectId"], "10");
        assert_eq!(value["versionId"], "200");
    }

    #[test]
    fn test_cycle_draft_builder() {
        let draft = CycleDraft::new("Regression")
            .cloned_from("42")
            .with_build("b-17")
            .with_environment("staging")
            .with_description("nightly");
        assert_eq!(draft.name, "Regression");
        assert_eq!(draft.cloned_cycle_id.as_deref(), Some("42"));
        assert_eq!(draft.build, "b-17");
        assert_eq!(draft.environment, "staging");
        assert_eq!(draft.description, "nightly");
    }
}

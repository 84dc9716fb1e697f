//! Serde mirrors of the JSON payloads exchanged with the backend.
//!
//! The backend owns these shapes. Fields it may leave out are optional and
//! unknown fields are ignored.

use chrono::NaiveDateTime;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

pub type RepositoryId = i64;
pub type TestCaseId = i64;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RepositoryStatus {
    #[default]
    Created,
    Cloning,
    Updating,
    Ready,
    Error,
    #[serde(other)]
    Unknown,
}

impl RepositoryStatus {
    /// Browsing and analysis are only accepted by the backend in this state.
    pub fn is_ready(self) -> bool {
        self == RepositoryStatus::Ready
    }

    pub fn is_busy(self) -> bool {
        matches!(self, RepositoryStatus::Cloning | RepositoryStatus::Updating)
    }

    pub fn css_class(self) -> &'static str {
        match self {
            RepositoryStatus::Created => "status-created",
            RepositoryStatus::Cloning | RepositoryStatus::Updating => "status-busy",
            RepositoryStatus::Ready => "status-ready",
            RepositoryStatus::Error => "status-error",
            RepositoryStatus::Unknown => "status-unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub id: RepositoryId,
    pub name: String,
    pub git_url: String,
    #[serde(default)]
    pub local_path: Option<String>,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub last_commit_id: Option<String>,
    #[serde(default)]
    pub status: RepositoryStatus,
    #[serde(default)]
    pub created_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_time: Option<NaiveDateTime>,
}

/// Body of the "create repository" call.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRepository {
    pub name: String,
    pub git_url: String,
    /// The backend defaults to `main` when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TestCaseId>,
    pub repository_id: RepositoryId,
    pub case_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_name: Option<String>,
    /// Comma separated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub covered_modules: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_time: Option<NaiveDateTime>,
}

impl TestCase {
    pub fn tag_list(&self) -> Vec<&str> {
        split_list(self.tags.as_deref())
    }

    /// `Class#method` when both are known.
    pub fn qualified_method(&self) -> Option<String> {
        match (self.class_name.as_deref(), self.method_name.as_deref()) {
            (Some(class), Some(method)) => Some(format!("{class}#{method}")),
            (Some(class), None) => Some(class.to_string()),
            (None, Some(method)) => Some(method.to_string()),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeChange {
    #[serde(default)]
    pub id: Option<i64>,
    pub repository_id: RepositoryId,
    pub commit_id: String,
    pub file_path: String,
    /// Git diff entry kind: `ADD`, `MODIFY`, `DELETE`, `RENAME` or `COPY`.
    pub change_type: String,
    #[serde(default)]
    pub changed_methods: Option<String>,
    #[serde(default)]
    pub changed_classes: Option<String>,
    #[serde(default)]
    pub module_path: Option<String>,
    #[serde(default)]
    pub lines_added: Option<i32>,
    #[serde(default)]
    pub lines_deleted: Option<i32>,
    #[serde(default)]
    pub created_time: Option<NaiveDateTime>,
}

impl CodeChange {
    pub fn method_list(&self) -> Vec<&str> {
        split_list(self.changed_methods.as_deref())
    }

    pub fn class_list(&self) -> Vec<&str> {
        split_list(self.changed_classes.as_deref())
    }
}

/// Commit range submitted for analysis and recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRange {
    pub repository_id: RepositoryId,
    pub from_commit: String,
    pub to_commit: String,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ImpactLevel {
    High,
    Medium,
    Low,
}

impl ImpactLevel {
    pub fn css_class(self) -> &'static str {
        match self {
            ImpactLevel::High => "impact-high",
            ImpactLevel::Medium => "impact-medium",
            ImpactLevel::Low => "impact-low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseRecommendation {
    pub test_case: TestCase,
    /// Between 0.0 and 1.0.
    #[serde(default)]
    pub match_score: Option<f64>,
    #[serde(default)]
    pub match_reason: Option<String>,
    #[serde(default)]
    pub impact_level: Option<ImpactLevel>,
}

impl TestCaseRecommendation {
    /// Individual reasons; the backend joins them with `; `.
    pub fn reasons(&self) -> Vec<&str> {
        self.match_reason
            .as_deref()
            .map(|reason| {
                reason
                    .split(';')
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn score_percent(&self) -> Option<u32> {
        self.match_score
            .map(|score| (score.clamp(0.0, 1.0) * 100.0).round() as u32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    File,
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    /// Relative to the repository root.
    pub path: String,
    #[serde(default)]
    pub size: u64,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub last_modified: i64,
    #[serde(default)]
    pub extension: Option<String>,
    #[serde(default)]
    pub is_code_file: Option<bool>,
}

impl FileEntry {
    /// The `..` entry the backend prepends outside of the repository root.
    pub fn is_parent_link(&self) -> bool {
        self.name == ".."
    }

    pub fn is_directory(&self) -> bool {
        self.kind == FileKind::Directory
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryListing {
    #[serde(default)]
    pub current_path: String,
    #[serde(default)]
    pub repository_name: String,
    #[serde(default)]
    pub items: Vec<FileEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileContent {
    pub file_path: String,
    pub file_name: String,
    pub content: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub last_modified: i64,
    #[serde(default)]
    pub extension: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryStats {
    pub total_files: u64,
    pub total_directories: u64,
    pub code_files: u64,
    pub total_size: u64,
    #[serde(default)]
    pub repository_path: String,
    /// Extension (or `no-extension`) to number of files.
    #[serde(default)]
    pub file_types: HashMap<String, u64>,
}

impl RepositoryStats {
    /// File types ordered by descending count, then by name.
    pub fn sorted_file_types(&self) -> Vec<(&str, u64)> {
        let mut types: Vec<_> = self
            .file_types
            .iter()
            .map(|(ext, count)| (ext.as_str(), *count))
            .collect();
        types.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        types
    }
}

fn split_list(value: Option<&str>) -> Vec<&str> {
    value
        .map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

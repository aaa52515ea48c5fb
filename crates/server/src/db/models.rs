use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub username: String,
    pub password_hash: String,
    pub created_at: String,
}

/// A project owned by a registered user, referenced by username.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub project_path: Option<String>,
    pub total_coding_time: i64,
    pub total_open_time: i64,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub id: i64,
    pub project_path: Option<String>,
    pub total_coding_time: i64,
    pub total_open_time: i64,
    pub user_email: String,
    #[sqlx(skip)]
    pub files: Vec<FileStats>,
    #[sqlx(skip)]
    pub daily_stats: Vec<DailyStats>,
    #[sqlx(skip)]
    pub git_hub_badge: Option<GitHubBadge>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FileStats {
    pub id: i64,
    pub file_path: Option<String>,
    pub open_time: i64,
    pub coding_time: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: Option<String>,
    pub project_id: Option<i64>,
    #[sqlx(skip)]
    pub daily_stats: Vec<DailyStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub id: i64,
    pub date: String,
    pub coding_time: i64,
    pub open_time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GitHubBadge {
    pub id: i64,
    pub is_public: bool,
    pub total_coding_time: i64,
    pub project_id: i64,
}

// Incoming payloads. None of them carries an owner: ownership always comes
// from the authenticated caller.

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub id: Option<String>,
    pub project_path: Option<String>,
    #[serde(default)]
    pub total_coding_time: i64,
    #[serde(default)]
    pub total_open_time: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProjectStats {
    pub project_path: Option<String>,
    #[serde(default)]
    pub total_coding_time: i64,
    #[serde(default)]
    pub total_open_time: i64,
    pub files: Option<Vec<NewFileStats>>,
    pub daily_stats: Option<Vec<NewDailyStats>>,
    pub git_hub_badge: Option<NewGitHubBadge>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFileStats {
    pub file_path: Option<String>,
    #[serde(default)]
    pub open_time: i64,
    #[serde(default)]
    pub coding_time: i64,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub project_id: Option<i64>,
    pub daily_stats: Option<Vec<NewDailyStats>>,
}

/// One day of accumulated time, not yet persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDailyStats {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub coding_time: i64,
    #[serde(default)]
    pub open_time: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGitHubBadge {
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub total_coding_time: i64,
}

//! Tournament data supplied by the server export.
//!
//! Everything in here is read-only for the page controllers.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A selectable item: an identifier plus the label shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: String,
    pub label: String,
}

impl Choice {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self { id: id.into(), label: label.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
    #[serde(default)]
    pub min: i64,
    pub max: i64,
}

fn default_multiplier() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub goals: Vec<Goal>,
}

impl Category {
    pub fn choice(&self) -> Choice {
        Choice::new(&self.name, &self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judge {
    pub id: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    #[serde(rename = "teamNumber", alias = "number")]
    pub number: u32,
    #[serde(rename = "teamName", alias = "name")]
    pub name: String,
    #[serde(default)]
    pub organization: String,
    #[serde(rename = "judgingGroup", alias = "group", default)]
    pub judging_group: String,
}

/// One admin dropdown and the header it should be set to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub select: String,
    pub header: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringData {
    #[serde(rename = "judgingGroups", default)]
    pub judging_groups: Vec<String>,

    #[serde(default)]
    pub categories: Vec<Category>,

    #[serde(default)]
    pub judges: Vec<Judge>,

    #[serde(default)]
    pub teams: Vec<Team>,

    /// Headers found in the uploaded team spreadsheet
    #[serde(rename = "uploadColumns", default)]
    pub upload_columns: Vec<String>,

    /// Which dropdown maps to which header, in display order
    #[serde(rename = "columnMappings", default)]
    pub column_mappings: Vec<ColumnMapping>,
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read data file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse data file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ScoringData {
    pub async fn load(path: &Path) -> Result<Self, DataError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| DataError::Read { path: path.to_path_buf(), source })?;
        let data: ScoringData = serde_json::from_str(&content)
            .map_err(|source| DataError::Parse { path: path.to_path_buf(), source })?;

        tracing::info!(
            groups = data.judging_groups.len(),
            categories = data.categories.len(),
            teams = data.teams.len(),
            "Loaded scoring data from {}",
            path.display()
        );
        Ok(data)
    }

    pub fn judging_group_choices(&self) -> Vec<Choice> {
        self.judging_groups.iter().map(|g| Choice::new(g, g)).collect()
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn team(&self, number: u32) -> Option<&Team> {
        self.teams.iter().find(|t| t.number == number)
    }

    /// Teams judged in the given group, in data order
    pub fn teams_in_group<'a>(&'a self, group: &'a str) -> impl Iterator<Item = &'a Team> + 'a {
        self.teams.iter().filter(move |t| t.judging_group == group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_server_export() {
        let json = r#"{
            "judgingGroups": ["Group A", "Group B"],
            "categories": [
                {"name": "teamwork", "title": "Teamwork",
                 "goals": [{"name": "inspiration", "title": "Inspiration", "multiplier": 2, "min": 1, "max": 4}]}
            ],
            "teams": [
                {"teamNumber": 101, "teamName": "Bricks", "organization": "School", "judgingGroup": "Group A"}
            ],
            "columnMappings": [{"select": "teamNumber", "header": "TeamNumber"}]
        }"#;

        let data: ScoringData = serde_json::from_str(json).unwrap();

        assert_eq!(data.judging_group_choices()[1], Choice::new("Group B", "Group B"));
        let goal = &data.category("teamwork").unwrap().goals[0];
        assert_eq!(goal.multiplier, 2.0);
        assert_eq!((goal.min, goal.max), (1, 4));
        assert_eq!(data.teams_in_group("Group A").count(), 1);
        assert_eq!(data.teams_in_group("Group B").count(), 0);
        assert!(data.judges.is_empty());
    }

    #[tokio::test]
    async fn test_load_reports_missing_file() {
        let err = ScoringData::load(Path::new("/nonexistent/scorekeep.json")).await.unwrap_err();
        assert!(matches!(err, DataError::Read { .. }));
    }
}

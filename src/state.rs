//! Shared selection state for the page controllers.
//!
//! A single [`Context`] is created per run and cloned into every page
//! controller when it is constructed. Dispatch is single threaded, so the
//! state lives in an `Rc<RefCell<_>>` and every write simply overwrites.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

use crate::data::{Category, Judge, ScoringData, Team};

/// Which piece of the selection a handler writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    JudgingGroup,
    Category,
    Judge,
    Team,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("'{0}' is not a team number")]
    NotATeamNumber(String),
}

/// Current selections; at most one value per slot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judging_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<u32>,
}

impl Selection {
    pub fn get(&self, slot: Slot) -> Option<String> {
        match slot {
            Slot::JudgingGroup => self.judging_group.clone(),
            Slot::Category => self.category.clone(),
            Slot::Judge => self.judge.clone(),
            Slot::Team => self.team.map(|t| t.to_string()),
        }
    }

    /// Team ids are team numbers; anything else is rejected and the slot keeps
    /// its previous value.
    pub fn set(&mut self, slot: Slot, value: &str) -> Result<(), SelectionError> {
        match slot {
            Slot::JudgingGroup => self.judging_group = Some(value.to_string()),
            Slot::Category => self.category = Some(value.to_string()),
            Slot::Judge => self.judge = Some(value.to_string()),
            Slot::Team => {
                let number = value
                    .parse()
                    .map_err(|_| SelectionError::NotATeamNumber(value.to_string()))?;
                self.team = Some(number);
            }
        }
        Ok(())
    }
}

/// A subjective score entered on this device
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub team: u32,
    pub category: String,
    pub judge: String,
    #[serde(default)]
    pub sub_scores: Vec<(String, i64)>,
    #[serde(default)]
    pub no_show: bool,
    #[serde(default)]
    pub deleted: bool,
}

impl ScoreRecord {
    /// Weighted total over the category's goals, `None` for no-shows and deletions
    pub fn total(&self, category: &Category) -> Option<f64> {
        if self.no_show || self.deleted {
            return None;
        }
        let total = category
            .goals
            .iter()
            .map(|goal| {
                let value = self
                    .sub_scores
                    .iter()
                    .find(|(name, _)| *name == goal.name)
                    .map(|(_, v)| *v)
                    .unwrap_or(0);
                value as f64 * goal.multiplier
            })
            .sum();
        Some(total)
    }

    pub fn sub_score(&self, goal: &str) -> Option<i64> {
        self.sub_scores.iter().find(|(name, _)| name == goal).map(|(_, v)| *v)
    }
}

/// Everything that survives a page change
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub selection: Selection,
    /// Judges created on this device
    #[serde(default)]
    pub new_judges: Vec<Judge>,
    #[serde(default)]
    pub scores: Vec<ScoreRecord>,
    #[serde(default)]
    pub users: Vec<String>,
}

impl SessionState {
    fn session_path() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("scorekeep");
        std::fs::create_dir_all(&dir)?;
        Ok(dir.join("session.toml"))
    }

    pub fn load_default() -> Result<Self> {
        Self::load_from(&Self::session_path()?)
    }

    pub fn save_default(&self) -> Result<()> {
        self.save_to(&Self::session_path()?)
    }

    pub fn clear_default() -> Result<()> {
        let path = Self::session_path()?;
        if path.exists() {
            std::fs::remove_file(&path)?;
            tracing::info!("Removed stored session {}", path.display());
        }
        Ok(())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        match toml::from_str(&content) {
            Ok(state) => Ok(state),
            Err(e) => {
                tracing::warn!("Failed to parse stored session: {}", e);
                Ok(Self::default())
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Handle to the shared state plus the read-only tournament data
#[derive(Debug, Clone)]
pub struct Context {
    data: Rc<ScoringData>,
    state: Rc<RefCell<SessionState>>,
}

impl Context {
    pub fn new(data: ScoringData, state: SessionState) -> Self {
        Self {
            data: Rc::new(data),
            state: Rc::new(RefCell::new(state)),
        }
    }

    pub fn data(&self) -> &ScoringData {
        &self.data
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn get(&self, slot: Slot) -> Option<String> {
        self.state.borrow().selection.get(slot)
    }

    pub fn set(&self, slot: Slot, value: &str) -> Result<(), SelectionError> {
        self.state.borrow_mut().selection.set(slot, value)?;
        tracing::debug!(?slot, value, "Selection changed");
        Ok(())
    }

    pub fn current_category(&self) -> Option<Category> {
        let name = self.get(Slot::Category)?;
        self.data.category(&name).cloned()
    }

    pub fn current_team(&self) -> Option<Team> {
        let number = self.state.borrow().selection.team?;
        self.data.team(number).cloned()
    }

    /// Judges from the data file plus the ones added here
    pub fn judges(&self) -> Vec<Judge> {
        let mut judges = self.data.judges.clone();
        judges.extend(self.state.borrow().new_judges.iter().cloned());
        judges
    }

    pub fn add_judge(&self, judge: Judge) {
        let mut state = self.state.borrow_mut();
        if !state.new_judges.iter().any(|j| j.id == judge.id) {
            state.new_judges.push(judge);
        }
    }

    pub fn add_user(&self, user: &str) {
        self.state.borrow_mut().users.push(user.to_string());
    }

    pub fn score(&self, team: u32, category: &str) -> Option<ScoreRecord> {
        self.state
            .borrow()
            .scores
            .iter()
            .find(|s| s.team == team && s.category == category)
            .cloned()
    }

    /// Insert or replace the score for the record's team and category
    pub fn save_score(&self, record: ScoreRecord) {
        let mut state = self.state.borrow_mut();
        match state
            .scores
            .iter_mut()
            .find(|s| s.team == record.team && s.category == record.category)
        {
            Some(existing) => *existing = record,
            None => state.scores.push(record),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Goal;

    #[test]
    fn test_last_write_wins() {
        let ctx = Context::new(ScoringData::default(), SessionState::default());
        let other = ctx.clone();

        ctx.set(Slot::JudgingGroup, "Group A").unwrap();
        assert_eq!(other.get(Slot::JudgingGroup).as_deref(), Some("Group A"));

        other.set(Slot::JudgingGroup, "Group B").unwrap();
        assert_eq!(ctx.get(Slot::JudgingGroup).as_deref(), Some("Group B"));
        assert_eq!(ctx.get(Slot::Category), None);
    }

    #[test]
    fn test_team_slot_requires_a_number() {
        let mut selection = Selection::default();
        selection.set(Slot::Team, "42").unwrap();
        assert_eq!(
            selection.set(Slot::Team, "forty-two"),
            Err(SelectionError::NotATeamNumber("forty-two".to_string()))
        );
        assert_eq!(selection.team, Some(42));
    }

    #[test]
    fn test_score_total_uses_multipliers() {
        let category = Category {
            name: "design".to_string(),
            title: "Robot Design".to_string(),
            goals: vec![
                Goal { name: "a".into(), title: "A".into(), category: String::new(), multiplier: 2.0, min: 0, max: 5 },
                Goal { name: "b".into(), title: "B".into(), category: String::new(), multiplier: 1.5, min: 0, max: 5 },
            ],
        };
        let mut record = ScoreRecord {
            team: 1,
            category: "design".into(),
            sub_scores: vec![("a".into(), 3), ("b".into(), 2)],
            ..Default::default()
        };
        assert_eq!(record.total(&category), Some(9.0));

        record.no_show = true;
        assert_eq!(record.total(&category), None);
    }

    #[test]
    fn test_save_score_replaces_existing() {
        let ctx = Context::new(ScoringData::default(), SessionState::default());
        ctx.save_score(ScoreRecord { team: 7, category: "c".into(), ..Default::default() });
        ctx.save_score(ScoreRecord { team: 7, category: "c".into(), no_show: true, ..Default::default() });

        assert_eq!(ctx.snapshot().scores.len(), 1);
        assert!(ctx.score(7, "c").unwrap().no_show);
    }

    #[test]
    fn test_session_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");

        let mut state = SessionState::default();
        state.selection.judging_group = Some("Group A".to_string());
        state.selection.team = Some(12);
        state.scores.push(ScoreRecord {
            team: 12,
            category: "teamwork".into(),
            judge: "ALICE".into(),
            sub_scores: vec![("inspiration".into(), 3)],
            ..Default::default()
        });
        state.save_to(&path).unwrap();

        let loaded = SessionState::load_from(&path).unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_missing_session_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = SessionState::load_from(&dir.path().join("none.toml")).unwrap();
        assert_eq!(loaded, SessionState::default());
    }
}

//! Grade reports with JSON persistence and attempt-to-attempt comparison.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::attempt::Attempt;
use crate::grading::{Grade, QuestionResult, Tier};
use crate::model::{Locale, Topic};

/// A persisted record of one graded attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeReport {
    /// The attempt that was graded.
    pub attempt_id: Uuid,
    pub topic_id: String,
    pub locale: Locale,
    pub graded_at: DateTime<Utc>,
    pub results: Vec<QuestionResult>,
    pub score: usize,
    pub total: usize,
    pub percent: u32,
    pub tier: Tier,
}

impl GradeReport {
    pub fn new(topic: &Topic, locale: Locale, attempt: &Attempt, grade: &Grade) -> Self {
        Self {
            attempt_id: attempt.id(),
            topic_id: topic.id.clone(),
            locale,
            graded_at: Utc::now(),
            results: grade.results.clone(),
            score: grade.score,
            total: grade.total,
            percent: grade.percent,
            tier: grade.tier,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: GradeReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Compare this attempt against an earlier one on the same topic.
    ///
    /// Questions are matched by index; questions present in only one of the
    /// two reports are ignored.
    pub fn compare(&self, baseline: &GradeReport) -> ProgressReport {
        let mut improved = Vec::new();
        let mut regressed = Vec::new();
        let mut unchanged = 0usize;

        for current in &self.results {
            let Some(before) = baseline.results.iter().find(|r| r.index == current.index) else {
                continue;
            };
            match (before.is_correct, current.is_correct) {
                (false, true) => improved.push(current.index),
                (true, false) => regressed.push(current.index),
                _ => unchanged += 1,
            }
        }

        ProgressReport {
            same_topic: self.topic_id == baseline.topic_id,
            baseline_percent: baseline.percent,
            current_percent: self.percent,
            delta: i64::from(self.percent) - i64::from(baseline.percent),
            improved,
            regressed,
            unchanged,
        }
    }
}

/// Result of comparing two grade reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressReport {
    /// Whether both reports were for the same topic.
    pub same_topic: bool,
    pub baseline_percent: u32,
    pub current_percent: u32,
    /// Percentage-point change.
    pub delta: i64,
    /// Questions wrong before and right now (zero-based).
    pub improved: Vec<usize>,
    /// Questions right before and wrong now (zero-based).
    pub regressed: Vec<usize>,
    pub unchanged: usize,
}

impl ProgressReport {
    /// Format the comparison as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Progress:** {}% → {}% ({:+} points)\n\n",
            self.baseline_percent, self.current_percent, self.delta
        ));
        if !self.same_topic {
            md.push_str("_Reports are for different topics._\n\n");
        }

        let ordinals = |indices: &[usize]| {
            indices
                .iter()
                .map(|i| (i + 1).to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        if !self.improved.is_empty() {
            md.push_str(&format!("- Now correct: {}\n", ordinals(&self.improved)));
        }
        if !self.regressed.is_empty() {
            md.push_str(&format!("- Now incorrect: {}\n", ordinals(&self.regressed)));
        }
        md.push_str(&format!("- Unchanged: {}\n", self.unchanged));

        md
    }

    pub fn has_regressions(&self) -> bool {
        !self.regressed.is_empty()
    }
}

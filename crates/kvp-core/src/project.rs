use crate::progress;
use crate::task::Task;
use crate::types::{ProjectStatus, TaskStatus};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// MetricPair
// ---------------------------------------------------------------------------

/// Before/after measurement for the Check phase. `improvement_percentage`
/// is derived from the other two fields and recomputed whenever they change;
/// it is never trusted from imported data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricPair {
    pub before: f64,
    pub after: f64,
    pub improvement_percentage: f64,
}

impl MetricPair {
    pub fn new(before: f64, after: f64) -> Self {
        Self {
            before,
            after,
            improvement_percentage: progress::improvement(before, after),
        }
    }

    pub fn set_values(&mut self, before: f64, after: f64) {
        self.before = before;
        self.after = after;
        self.recompute();
    }

    pub fn recompute(&mut self) {
        self.improvement_percentage = progress::improvement(self.before, self.after);
    }
}

// ---------------------------------------------------------------------------
// Phase sub-records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_cause: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub measures: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Do {
    #[serde(default)]
    pub implementation_steps: Vec<Task>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Check {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricPair>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Act {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standardization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lessons_learned: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_steps: Option<String>,
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

/// One continuous-improvement project, organized into the four PDCA phases.
///
/// The id is assigned at creation and never changes. Everything else is
/// mutated in place by the host as the user edits fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_date: NaiveDate,
    pub status: ProjectStatus,
    #[serde(default)]
    pub plan: Plan,
    #[serde(default, rename = "do")]
    pub do_phase: Do,
    #[serde(default)]
    pub check: Check,
    #[serde(default)]
    pub act: Act,
}

impl Project {
    /// Create an empty draft project dated today.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            created_date: Utc::now().date_naive(),
            status: ProjectStatus::Draft,
            plan: Plan::default(),
            do_phase: Do::default(),
            check: Check::default(),
            act: Act::default(),
        }
    }

    pub fn with_description(name: impl Into<String>, description: impl Into<String>) -> Self {
        let mut project = Self::new(name);
        project.description = description.into();
        project
    }

    /// The pre-populated example project: a production wait-time reduction
    /// with all four phases filled in.
    pub fn sample() -> Self {
        let mut project =
            Self::with_description("Example: Wait time reduction", "Reduce production wait times by 30%");
        project.status = ProjectStatus::InProgress;

        project.plan = Plan {
            problem: Some("Long wait times between production steps".to_string()),
            goal: Some("Reduce wait times by 30%".to_string()),
            root_cause: Some("Unbalanced machine capacities".to_string()),
            measures: vec![
                "Machine utilization analysis".to_string(),
                "Process optimization".to_string(),
                "Training".to_string(),
            ],
        };

        let steps = vec![
            sample_task("Analyze machine utilization", "Marie Dupont", "2024-07-15", TaskStatus::Done),
            sample_task("Identify bottlenecks", "Pierre Martin", "2024-07-20", TaskStatus::InProgress),
            sample_task("Implement optimization measures", "Sophie Bernard", "2024-07-30", TaskStatus::Open),
        ];
        project.do_phase = Do {
            implementation_steps: steps,
        };

        project.check = Check {
            metrics: Some(MetricPair::new(45.0, 32.0)),
            results: Some("Wait times were reduced by 28.9%".to_string()),
        };

        project.act = Act {
            standardization: Some("New work instructions created".to_string()),
            lessons_learned: Some("Regular capacity analysis is essential".to_string()),
            next_steps: Some("Roll out to other production lines".to_string()),
        };

        project
    }

    // ---------------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------------

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_status(&mut self, status: ProjectStatus) {
        self.status = status;
    }

    /// Replace before/after metrics, recomputing the derived improvement.
    pub fn set_metrics(&mut self, before: f64, after: f64) {
        match self.check.metrics.as_mut() {
            Some(m) => m.set_values(before, after),
            None => self.check.metrics = Some(MetricPair::new(before, after)),
        }
    }
}

fn sample_task(description: &str, responsible: &str, due: &str, status: TaskStatus) -> Task {
    let mut task = Task::new(
        description,
        responsible,
        due.parse().expect("sample due date is valid"),
    );
    task.status = status;
    task
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_project_is_empty_draft() {
        let p = Project::new("Reduce scrap rate");
        assert_eq!(p.status, ProjectStatus::Draft);
        assert!(p.plan.problem.is_none());
        assert!(p.do_phase.implementation_steps.is_empty());
        assert!(p.check.metrics.is_none());
        assert!(p.act.standardization.is_none());
    }

    #[test]
    fn ids_are_unique() {
        let a = Project::new("a");
        let b = Project::new("b");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn sample_has_all_phases_filled() {
        let p = Project::sample();
        assert_eq!(p.status, ProjectStatus::InProgress);
        assert_eq!(p.plan.measures.len(), 3);
        assert_eq!(p.do_phase.implementation_steps.len(), 3);
        assert!(p.check.results.is_some());
        assert!(p.act.next_steps.is_some());
    }

    #[test]
    fn sample_metrics_are_derived() {
        let p = Project::sample();
        let metrics = p.check.metrics.unwrap();
        assert_eq!(metrics.before, 45.0);
        assert_eq!(metrics.after, 32.0);
        assert!((metrics.improvement_percentage - 28.888888888888886).abs() < 1e-9);
    }

    #[test]
    fn set_metrics_creates_and_updates() {
        let mut p = Project::new("p");
        p.set_metrics(10.0, 5.0);
        assert_eq!(
            p.check.metrics.as_ref().unwrap().improvement_percentage,
            50.0
        );

        p.set_metrics(10.0, 12.0);
        assert_eq!(
            p.check.metrics.as_ref().unwrap().improvement_percentage,
            -20.0
        );
    }

    #[test]
    fn serde_nests_one_level_per_phase() {
        let p = Project::sample();
        let value = serde_json::to_value(&p).unwrap();
        assert!(value.get("plan").is_some());
        assert!(value.get("do").is_some(), "Do phase serializes as 'do'");
        assert!(value.get("check").is_some());
        assert!(value.get("act").is_some());
        assert!(
            value["do"]["implementation_steps"].is_array(),
            "steps nested under the do phase"
        );
    }

    #[test]
    fn empty_optional_fields_are_omitted() {
        let p = Project::new("p");
        let value = serde_json::to_value(&p).unwrap();
        assert!(value["plan"].get("problem").is_none());
        assert!(value["plan"].get("measures").is_none());
    }
}

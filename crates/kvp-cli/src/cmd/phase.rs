use crate::cmd::require_edit;
use crate::output::print_json;
use clap::Subcommand;
use kvp_core::store::ProjectStore;
use std::path::Path;

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum PlanSubcommand {
    /// Set Plan fields; only the given flags change
    Set {
        /// Problem statement
        #[arg(long)]
        problem: Option<String>,
        /// Goal definition
        #[arg(long)]
        goal: Option<String>,
        /// Root-cause analysis
        #[arg(long = "root-cause")]
        root_cause: Option<String>,
        /// Planned measure (repeatable; replaces the whole list)
        #[arg(long = "measure")]
        measures: Vec<String>,
    },
    /// Show the Plan phase
    Show,
}

pub fn run_plan(file: &Path, subcmd: PlanSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        PlanSubcommand::Set {
            problem,
            goal,
            root_cause,
            measures,
        } => {
            let mut store = ProjectStore::load(file)?;
            require_edit(&store)?;

            let plan = &mut store.active_mut()?.plan;
            if let Some(p) = problem {
                plan.problem = Some(p);
            }
            if let Some(g) = goal {
                plan.goal = Some(g);
            }
            if let Some(r) = root_cause {
                plan.root_cause = Some(r);
            }
            if !measures.is_empty() {
                plan.measures = measures;
            }
            store.save(file)?;
            println!("Updated plan");
            Ok(())
        }
        PlanSubcommand::Show => {
            let store = ProjectStore::load(file)?;
            let plan = &store.active()?.plan;

            if json {
                return print_json(plan);
            }

            println!("Problem:    {}", plan.problem.as_deref().unwrap_or("(none)"));
            println!("Goal:       {}", plan.goal.as_deref().unwrap_or("(none)"));
            println!(
                "Root cause: {}",
                plan.root_cause.as_deref().unwrap_or("(none)")
            );
            if plan.measures.is_empty() {
                println!("Measures:   (none)");
            } else {
                println!("Measures:");
                for measure in &plan.measures {
                    println!("  - {measure}");
                }
            }
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Check
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum CheckSubcommand {
    /// Set Check fields; improvement is recomputed from before/after
    Set {
        /// Metric value before the improvement
        #[arg(long)]
        before: Option<f64>,
        /// Metric value after the improvement
        #[arg(long)]
        after: Option<f64>,
        /// Evaluation of the results
        #[arg(long)]
        results: Option<String>,
    },
    /// Show the Check phase
    Show,
}

pub fn run_check(file: &Path, subcmd: CheckSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        CheckSubcommand::Set {
            before,
            after,
            results,
        } => {
            let mut store = ProjectStore::load(file)?;
            require_edit(&store)?;

            let project = store.active_mut()?;
            if before.is_some() || after.is_some() {
                let (b, a) = project
                    .check
                    .metrics
                    .as_ref()
                    .map(|m| (m.before, m.after))
                    .unwrap_or((0.0, 0.0));
                project.set_metrics(before.unwrap_or(b), after.unwrap_or(a));
            }
            if let Some(r) = results {
                project.check.results = Some(r);
            }

            let improvement = project
                .check
                .metrics
                .as_ref()
                .map(|m| m.improvement_percentage);
            store.save(file)?;

            match improvement {
                Some(value) => println!("Updated check (improvement: {value:.1}%)"),
                None => println!("Updated check"),
            }
            Ok(())
        }
        CheckSubcommand::Show => {
            let store = ProjectStore::load(file)?;
            let check = &store.active()?.check;

            if json {
                return print_json(check);
            }

            match &check.metrics {
                Some(m) => {
                    println!("Before:      {}", m.before);
                    println!("After:       {}", m.after);
                    let tag = if m.improvement_percentage < 0.0 {
                        " (regression)"
                    } else {
                        ""
                    };
                    println!("Improvement: {:.1}%{tag}", m.improvement_percentage);
                }
                None => println!("Metrics:     (none)"),
            }
            println!(
                "Results:     {}",
                check.results.as_deref().unwrap_or("(none)")
            );
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Act
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ActSubcommand {
    /// Set Act fields; only the given flags change
    Set {
        /// How the improvement is anchored permanently
        #[arg(long)]
        standardization: Option<String>,
        /// Lessons learned
        #[arg(long)]
        lessons: Option<String>,
        /// Planned follow-up measures
        #[arg(long = "next-steps")]
        next_steps: Option<String>,
    },
    /// Show the Act phase
    Show,
}

pub fn run_act(file: &Path, subcmd: ActSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ActSubcommand::Set {
            standardization,
            lessons,
            next_steps,
        } => {
            let mut store = ProjectStore::load(file)?;
            require_edit(&store)?;

            let act = &mut store.active_mut()?.act;
            if let Some(s) = standardization {
                act.standardization = Some(s);
            }
            if let Some(l) = lessons {
                act.lessons_learned = Some(l);
            }
            if let Some(n) = next_steps {
                act.next_steps = Some(n);
            }
            store.save(file)?;
            println!("Updated act");
            Ok(())
        }
        ActSubcommand::Show => {
            let store = ProjectStore::load(file)?;
            let act = &store.active()?.act;

            if json {
                return print_json(act);
            }

            println!(
                "Standardization: {}",
                act.standardization.as_deref().unwrap_or("(none)")
            );
            println!(
                "Lessons:         {}",
                act.lessons_learned.as_deref().unwrap_or("(none)")
            );
            println!(
                "Next steps:      {}",
                act.next_steps.as_deref().unwrap_or("(none)")
            );
            Ok(())
        }
    }
}

use crate::project::Project;
use crate::types::Phase;

// ---------------------------------------------------------------------------
// Completion progress
// ---------------------------------------------------------------------------

/// True when the optional text holds something other than whitespace.
/// This is the single definition of "present" used by every gate below.
fn present(value: Option<&str>) -> bool {
    value.is_some_and(|s| !s.trim().is_empty())
}

/// Whether a phase counts as complete for progress purposes.
///
/// Each phase is gated by exactly one field: Plan on the problem statement,
/// Do on a non-empty step list, Check on the results text, Act on the
/// standardization text. Filling a phase's other fields earns nothing.
pub fn phase_complete(project: &Project, phase: Phase) -> bool {
    match phase {
        Phase::Plan => present(project.plan.problem.as_deref()),
        Phase::Do => !project.do_phase.implementation_steps.is_empty(),
        Phase::Check => present(project.check.results.as_deref()),
        Phase::Act => present(project.act.standardization.as_deref()),
    }
}

/// Completion percentage: 25 points per complete phase, capped at 100.
pub fn progress(project: &Project) -> u8 {
    let complete = Phase::all()
        .iter()
        .filter(|&&phase| phase_complete(project, phase))
        .count() as u8;
    (complete * 25).min(100)
}

// ---------------------------------------------------------------------------
// Improvement percentage
// ---------------------------------------------------------------------------

/// Relative improvement of `after` over the `before` baseline, in percent.
///
/// A non-positive baseline yields 0 rather than an error. The sign is kept:
/// `after > before` comes back negative and means regression.
pub fn improvement(before: f64, after: f64) -> f64 {
    if before <= 0.0 {
        return 0.0;
    }
    (before - after) / before * 100.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

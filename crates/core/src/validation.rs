//! Content validation rules for report tasks and text fields.
//!
//! The predicates are pure. The `validate_*` functions compose them into the
//! single pass used by report create and task-list update; the first failure
//! short-circuits with a [`CoreError::Validation`].

use crate::error::{CoreError, CoreResult};
use crate::report::TaskInput;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Upper bound for a single task and for the sum over a day.
pub const MAX_DAILY_HOURS: f64 = 24.0;

pub const MAX_PROGRESS: i32 = 100;

/* --------------------------------------------------------------------------
Predicates
-------------------------------------------------------------------------- */

pub fn is_valid_work_hours(hours: f64) -> bool {
    (0.0..=MAX_DAILY_HOURS).contains(&hours)
}

pub fn is_valid_progress(progress: i32) -> bool {
    (0..=MAX_PROGRESS).contains(&progress)
}

/// A day cannot hold more than 24 recorded hours across all tasks.
pub fn is_valid_total_work_hours(tasks: &[TaskInput]) -> bool {
    let total: f64 = tasks.iter().map(|t| t.hours_spent).sum();
    total <= MAX_DAILY_HOURS
}

pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/* --------------------------------------------------------------------------
Validation passes
-------------------------------------------------------------------------- */

/// Validate a task list without touching any collaborator.
///
/// Project existence is checked separately by the workflow.
pub fn validate_tasks(tasks: &[TaskInput]) -> CoreResult<()> {
    if tasks.is_empty() {
        return Err(CoreError::validation_field(
            "At least one task is required",
            "tasks",
        ));
    }

    for (i, task) in tasks.iter().enumerate() {
        if !is_valid_work_hours(task.hours_spent) {
            return Err(CoreError::validation_field(
                format!("Hours spent must be between 0 and {MAX_DAILY_HOURS}"),
                format!("tasks[{i}].hours_spent"),
            ));
        }
        if !is_valid_progress(task.progress) {
            return Err(CoreError::validation_field(
                format!("Progress must be between 0 and {MAX_PROGRESS}"),
                format!("tasks[{i}].progress"),
            ));
        }
        if is_blank(&task.description) {
            return Err(CoreError::validation_field(
                "Task description is required",
                format!("tasks[{i}].description"),
            ));
        }
    }

    if !is_valid_total_work_hours(tasks) {
        return Err(CoreError::validation_field(
            format!("Total hours for a day cannot exceed {MAX_DAILY_HOURS}"),
            "tasks",
        ));
    }

    Ok(())
}

/// Reject an empty or whitespace-only text field.
pub fn validate_required_text(value: &str, field: &str, label: &str) -> CoreResult<()> {
    if is_blank(value) {
        return Err(CoreError::validation_field(format!("{label} is required"), field));
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

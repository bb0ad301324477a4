//! Nutrition status recalculation and persistence.
//!
//! # Responsibility
//! - Load students and BMI history, plan status changes with
//!   `classify::recalculate`.
//! - Apply the planned changes in bounded groups and report per-write
//!   outcomes.
//!
//! # Invariants
//! - One failed write never blocks its siblings; failures are collected with
//!   their ids and reasons.
//! - Cancellation is only observed between groups; groups already written stay
//!   written.
//! - The service stays storage-agnostic.

use crate::classify::{recalculate, RecalcPlan, StatusUpdate};
use crate::model::nutrition::{BmiRecordId, StudentId};
use crate::repo::bmi_repo::BmiRepository;
use crate::repo::student_repo::StudentRepository;
use crate::service::ServiceError;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Default number of writes issued per group.
pub const DEFAULT_BATCH_SIZE: usize = 20;

/// Options for applying planned updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Upper bound on writes per group; `0` is treated as `1`.
    pub batch_size: usize,
    /// Plan and report without writing.
    pub dry_run: bool,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            dry_run: false,
        }
    }
}

/// Progress snapshot handed to the cancellation callback between groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    pub completed_groups: usize,
    pub total_groups: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// One write that did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedUpdate {
    pub student_id: StudentId,
    pub record_id: BmiRecordId,
    pub reason: String,
}

/// Aggregate outcome of a recalculation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecalcReport {
    pub planned: usize,
    pub succeeded: usize,
    pub failed: Vec<FailedUpdate>,
    /// Groups never started because the caller abandoned the run.
    pub cancelled: bool,
    pub dry_run: bool,
}

impl RecalcReport {
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// Planned updates neither written nor failed (dry run or cancellation).
    pub fn skipped(&self) -> usize {
        self.planned
            .saturating_sub(self.succeeded)
            .saturating_sub(self.failed.len())
    }

    pub fn is_complete(&self) -> bool {
        !self.dry_run && !self.cancelled && self.failed.is_empty()
    }
}

/// Recalculation service over student and BMI repositories.
pub struct NutritionService<S: StudentRepository, B: BmiRepository> {
    students: S,
    bmi: B,
}

impl<S: StudentRepository, B: BmiRepository> NutritionService<S, B> {
    pub fn new(students: S, bmi: B) -> Self {
        Self { students, bmi }
    }

    /// Loads current statuses and history and plans the needed updates.
    pub fn plan_recalculation(&self) -> Result<RecalcPlan, ServiceError> {
        let statuses = self.students.list_student_statuses()?;
        let history = self.bmi.list_bmi_records()?;
        let plan = recalculate(&statuses, &history);

        info!(
            "event=nutrition_plan module=service status=ok students={} records={} updates={} without_history={} unclassifiable={}",
            plan.scanned,
            history.len(),
            plan.updates.len(),
            plan.without_history,
            plan.unclassifiable
        );
        Ok(plan)
    }

    /// Writes `updates` in groups of at most `options.batch_size`.
    ///
    /// `should_continue` runs after each group that is followed by another;
    /// returning `false` abandons the remaining groups.
    pub fn apply_updates(
        &self,
        updates: &[StatusUpdate],
        options: &ApplyOptions,
        mut should_continue: impl FnMut(&BatchProgress) -> bool,
    ) -> RecalcReport {
        let mut report = RecalcReport {
            planned: updates.len(),
            dry_run: options.dry_run,
            ..RecalcReport::default()
        };
        if options.dry_run || updates.is_empty() {
            return report;
        }

        let started_at = Instant::now();
        let batch_size = options.batch_size.max(1);
        let total_groups = updates.len().div_ceil(batch_size);

        for (group_index, group) in updates.chunks(batch_size).enumerate() {
            if group_index > 0 {
                let progress = BatchProgress {
                    completed_groups: group_index,
                    total_groups,
                    succeeded: report.succeeded,
                    failed: report.failed.len(),
                };
                if !should_continue(&progress) {
                    report.cancelled = true;
                    info!(
                        "event=nutrition_apply module=service status=cancelled completed_groups={group_index} total_groups={total_groups}"
                    );
                    break;
                }
            }

            for update in group {
                match self.bmi.apply_status_update(update) {
                    Ok(()) => report.succeeded += 1,
                    Err(err) => {
                        warn!(
                            "event=nutrition_write module=service status=error record_id={} student_id={} error={err}",
                            update.record_id, update.student_id
                        );
                        report.failed.push(FailedUpdate {
                            student_id: update.student_id,
                            record_id: update.record_id,
                            reason: err.to_string(),
                        });
                    }
                }
            }
        }

        info!(
            "event=nutrition_apply module=service status=ok planned={} succeeded={} failed={} cancelled={} duration_ms={}",
            report.planned,
            report.succeeded,
            report.failed.len(),
            report.cancelled,
            started_at.elapsed().as_millis()
        );
        report
    }

    /// Plans and applies in one call, running every group.
    pub fn recalculate_and_apply(&self, options: &ApplyOptions) -> Result<RecalcReport, ServiceError> {
        let plan = self.plan_recalculation()?;
        Ok(self.apply_updates(&plan.updates, options, |_| true))
    }
}

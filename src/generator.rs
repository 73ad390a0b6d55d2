use crate::assignment::{AssignmentRow, AssignmentSlot, DrawSchedule};
use crate::bucket::BucketStore;
use crate::calendar::WeekRange;
use crate::draw_source::{DrawSource, RngSource};
use crate::eligibility::EligibilityEvaluator;
use crate::roster::Roster;
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::{debug, info};

/// Runs the weekly draw over a date range.
///
/// # Algorithm
/// 1. Snap `start` back to its Monday and walk weeks through `end` inclusive.
/// 2. For each week, visit tasks in roster order with an empty "picked this week" set.
/// 3. Tasks nobody is eligible for get [`AssignmentSlot::NoCandidate`] and leave
///    their bucket alone; others draw from their bucket, preferring people not
///    yet picked this week.
///
/// Buckets start empty on every call to [`DrawGenerator::generate`] and carry
/// over from week to week within that run.
#[derive(Debug)]
pub struct DrawGenerator<S = RngSource> {
    buckets: BucketStore,
    source: S,
}

impl DrawGenerator<RngSource> {
    /// Generator with an OS-seeded source.
    pub fn new() -> Self {
        Self::with_source(RngSource::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_source(RngSource::seeded(seed))
    }
}

impl Default for DrawGenerator<RngSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DrawSource> DrawGenerator<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            buckets: BucketStore::new(),
            source,
        }
    }

    pub fn buckets(&self) -> &BucketStore {
        &self.buckets
    }

    /// Drops the buckets left over from the last run.
    pub fn reset(&mut self) {
        self.buckets.clear();
    }

    /// Builds one row per week from `start` to `end`.
    ///
    /// An `end` earlier than `start` yields an empty schedule.
    pub fn generate(&mut self, roster: &Roster, start: NaiveDate, end: NaiveDate) -> DrawSchedule {
        self.buckets.clear();
        let task_labels = roster.task_labels();
        let mut schedule = DrawSchedule::new(task_labels.clone());
        if end < start {
            debug!(%start, %end, "date range is inverted; nothing to draw");
            return schedule;
        }

        let evaluator = EligibilityEvaluator::new(roster);
        for week in WeekRange::new(start, end) {
            let mut picked_this_week: HashSet<String> = HashSet::new();
            let mut slots = Vec::with_capacity(task_labels.len());

            for task in &task_labels {
                let eligible = evaluator.eligible(task, week.anchor());
                if eligible.is_empty() {
                    debug!(week = %week, task = task.as_str(), "no eligible candidate");
                    slots.push(AssignmentSlot::NoCandidate);
                    continue;
                }

                let drawn = self
                    .buckets
                    .draw(task, &eligible, &picked_this_week, &mut self.source);
                slots.push(match drawn {
                    Some(winner) => {
                        picked_this_week.insert(winner.clone());
                        AssignmentSlot::Assigned(winner)
                    }
                    None => AssignmentSlot::NoCandidate,
                });
            }

            schedule.push_row(AssignmentRow { week, slots });
        }

        let summary = schedule.summary();
        info!(
            weeks = summary.week_count,
            filled = summary.filled_count,
            unfilled = summary.unfilled_count,
            "generated draw schedule"
        );
        schedule
    }
}

/// One-shot convenience: fresh buckets, caller-provided randomness.
pub fn generate<S: DrawSource>(
    roster: &Roster,
    start: NaiveDate,
    end: NaiveDate,
    source: S,
) -> DrawSchedule {
    DrawGenerator::with_source(source).generate(roster, start, end)
}

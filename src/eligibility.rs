use crate::roster::Roster;
use chrono::NaiveDate;

/// Answers "who may be drawn for this task on this week?" against a roster snapshot.
#[derive(Debug, Clone, Copy)]
pub struct EligibilityEvaluator<'a> {
    roster: &'a Roster,
}

impl<'a> EligibilityEvaluator<'a> {
    pub fn new(roster: &'a Roster) -> Self {
        Self { roster }
    }

    /// People opted in to `task_label` whose contract is still running on `week_anchor`.
    ///
    /// Names come back in roster order, each at most once.
    pub fn eligible(&self, task_label: &str, week_anchor: NaiveDate) -> Vec<String> {
        self.roster
            .entries()
            .iter()
            .filter(|entry| entry.is_opted_in(task_label) && entry.is_active_on(week_anchor))
            .map(|entry| entry.name.clone())
            .collect()
    }

    pub fn is_eligible(&self, person: &str, task_label: &str, week_anchor: NaiveDate) -> bool {
        self.roster
            .entry(person)
            .is_some_and(|e| e.is_opted_in(task_label) && e.is_active_on(week_anchor))
    }
}

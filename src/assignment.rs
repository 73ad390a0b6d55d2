use crate::calendar::Week;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "person")]
pub enum AssignmentSlot {
    Assigned(String),
    NoCandidate,
}

impl AssignmentSlot {
    pub fn person(&self) -> Option<&str> {
        match self {
            AssignmentSlot::Assigned(name) => Some(name),
            AssignmentSlot::NoCandidate => None,
        }
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, AssignmentSlot::Assigned(_))
    }

    /// Cell text, with `marker` standing in for an unfilled slot.
    pub fn display_with<'a>(&'a self, marker: &'a str) -> &'a str {
        self.person().unwrap_or(marker)
    }
}

/// One generated week: a slot per task, in task order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRow {
    pub week: Week,
    pub slots: Vec<AssignmentSlot>,
}

impl AssignmentRow {
    pub fn week_label(&self) -> String {
        self.week.label()
    }

    pub fn people(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().filter_map(AssignmentSlot::person)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub week_count: usize,
    pub filled_count: usize,
    pub unfilled_count: usize,
    pub people_count: usize,
}

impl ScheduleSummary {
    pub fn to_cli_summary(&self) -> String {
        format!(
            "weeks={}, filled={}, unfilled={}, people={}",
            self.week_count, self.filled_count, self.unfilled_count, self.people_count
        )
    }
}

/// Generated rows in week order, with the task columns they were drawn for.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DrawSchedule {
    tasks: Vec<String>,
    rows: Vec<AssignmentRow>,
}

impl DrawSchedule {
    pub fn new(tasks: Vec<String>) -> Self {
        Self {
            tasks,
            rows: Vec::new(),
        }
    }

    pub(crate) fn push_row(&mut self, row: AssignmentRow) {
        debug_assert_eq!(row.slots.len(), self.tasks.len());
        self.rows.push(row);
    }

    pub fn tasks(&self) -> &[String] {
        &self.tasks
    }

    pub fn rows(&self) -> &[AssignmentRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn task_index(&self, task_label: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t == task_label)
    }

    /// Slots of one task column, in week order.
    pub fn column(&self, task_label: &str) -> Option<Vec<&AssignmentSlot>> {
        let idx = self.task_index(task_label)?;
        Some(self.rows.iter().map(|row| &row.slots[idx]).collect())
    }

    pub fn slot(&self, week_idx: usize, task_label: &str) -> Option<&AssignmentSlot> {
        let idx = self.task_index(task_label)?;
        self.rows.get(week_idx).map(|row| &row.slots[idx])
    }

    pub fn assignment_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for person in self.rows.iter().flat_map(AssignmentRow::people) {
            *counts.entry(person.to_string()).or_insert(0) += 1;
        }
        counts
    }

    pub fn summary(&self) -> ScheduleSummary {
        let filled_count = self
            .rows
            .iter()
            .flat_map(|row| row.slots.iter())
            .filter(|slot| slot.is_filled())
            .count();
        let total = self.rows.len() * self.tasks.len();
        ScheduleSummary {
            week_count: self.rows.len(),
            filled_count,
            unfilled_count: total - filled_count,
            people_count: self.assignment_counts().len(),
        }
    }
}

use crate::expiry::ContractExpiry;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// Task column identified by its area and task name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskLabel {
    pub category: String,
    pub name: Option<String>,
}

impl TaskLabel {
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            name: Some(name.into()),
        }
    }

    pub fn category_only(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            name: None,
        }
    }

    /// Flattened `"Category - Task"` label used as the column key.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => format!("{} - {}", self.category, name),
            None => self.category.clone(),
        }
    }
}

impl fmt::Display for TaskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub expiry: ContractExpiry,
    pub opt_ins: BTreeSet<String>,
}

impl RosterEntry {
    pub fn new(name: impl Into<String>, expiry: ContractExpiry) -> Self {
        Self {
            name: name.into(),
            expiry,
            opt_ins: BTreeSet::new(),
        }
    }

    pub fn with_opt_in(mut self, task_label: impl Into<String>) -> Self {
        self.opt_ins.insert(task_label.into());
        self
    }

    pub fn is_opted_in(&self, task_label: &str) -> bool {
        self.opt_ins.contains(task_label)
    }

    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.expiry.is_active_on(date)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    NoTasks,
    EmptyName { row: usize },
    DuplicateName(String),
    DuplicateTask(String),
    UnknownTask { person: String, task: String },
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::NoTasks => write!(f, "roster declares no tasks"),
            RosterError::EmptyName { row } => write!(f, "roster entry {row} has an empty name"),
            RosterError::DuplicateName(name) => {
                write!(f, "person '{name}' appears more than once in the roster")
            }
            RosterError::DuplicateTask(label) => write!(f, "task '{label}' is declared twice"),
            RosterError::UnknownTask { person, task } => {
                write!(f, "person '{person}' is opted in to undeclared task '{task}'")
            }
        }
    }
}

impl std::error::Error for RosterError {}

/// Validated roster snapshot: ordered tasks plus one entry per person.
///
/// Task order decides same-week precedence, entry order decides the order of
/// eligible sets handed to the draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    tasks: Vec<TaskLabel>,
    entries: Vec<RosterEntry>,
}

impl Roster {
    pub fn new(tasks: Vec<TaskLabel>, entries: Vec<RosterEntry>) -> Result<Self, RosterError> {
        if tasks.is_empty() {
            return Err(RosterError::NoTasks);
        }

        let mut labels = HashSet::with_capacity(tasks.len());
        for task in &tasks {
            let label = task.label();
            if !labels.insert(label.clone()) {
                return Err(RosterError::DuplicateTask(label));
            }
        }

        let mut names = HashSet::with_capacity(entries.len());
        for (row, entry) in entries.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(RosterError::EmptyName { row });
            }
            if !names.insert(entry.name.as_str()) {
                return Err(RosterError::DuplicateName(entry.name.clone()));
            }
            if let Some(unknown) = entry.opt_ins.iter().find(|t| !labels.contains(*t)) {
                return Err(RosterError::UnknownTask {
                    person: entry.name.clone(),
                    task: unknown.clone(),
                });
            }
        }

        Ok(Self { tasks, entries })
    }

    pub fn tasks(&self) -> &[TaskLabel] {
        &self.tasks
    }

    pub fn task_labels(&self) -> Vec<String> {
        self.tasks.iter().map(TaskLabel::label).collect()
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn entry(&self, name: &str) -> Option<&RosterEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t1() -> TaskLabel {
        TaskLabel::new("RDC", "Autoclave")
    }

    #[test]
    fn label_flattens_two_levels() {
        assert_eq!(t1().label(), "RDC - Autoclave");
        assert_eq!(TaskLabel::category_only("Waste").label(), "Waste");
    }

    #[test]
    fn rejects_duplicate_people_and_unknown_tasks() {
        let alice = RosterEntry::new("Alice", ContractExpiry::NeverExpires)
            .with_opt_in("RDC - Autoclave");
        let err = Roster::new(vec![t1()], vec![alice.clone(), alice.clone()]).unwrap_err();
        assert_eq!(err, RosterError::DuplicateName("Alice".into()));

        let stray = RosterEntry::new("Bob", ContractExpiry::NeverExpires).with_opt_in("Nope");
        let err = Roster::new(vec![t1()], vec![alice, stray]).unwrap_err();
        assert!(matches!(err, RosterError::UnknownTask { .. }));
    }

    #[test]
    fn rejects_empty_task_list_and_blank_names() {
        assert_eq!(Roster::new(vec![], vec![]).unwrap_err(), RosterError::NoTasks);
        let blank = RosterEntry::new("  ", ContractExpiry::NeverExpires);
        assert_eq!(
            Roster::new(vec![t1()], vec![blank]).unwrap_err(),
            RosterError::EmptyName { row: 0 }
        );
    }
}

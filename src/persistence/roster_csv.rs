use super::{PersistenceError, PersistenceResult};
use crate::config::RosterLayout;
use crate::expiry::{ContractExpiry, ExpiryParse};
use crate::roster::{Roster, RosterEntry, TaskLabel};
use csv::StringRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

pub fn load_roster_from_csv<P: AsRef<Path>>(
    path: P,
    layout: &RosterLayout,
) -> PersistenceResult<Roster> {
    let file = File::open(path)?;
    read_roster_csv(file, layout)
}

/// Reads a roster sheet with a category header row over a task header row.
pub fn read_roster_csv<R: Read>(reader: R, layout: &RosterLayout) -> PersistenceResult<Roster> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = reader.records();

    let categories = records
        .next()
        .transpose()?
        .ok_or_else(|| PersistenceError::InvalidData("roster is empty".into()))?;
    let task_names = records.next().transpose()?.ok_or_else(|| {
        PersistenceError::InvalidData("roster is missing the task header row".into())
    })?;

    let tasks = flatten_task_headers(&categories, &task_names, layout)?;
    let labels: Vec<String> = tasks.iter().map(TaskLabel::label).collect();

    let mut entries = Vec::new();
    for record in records {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        entries.push(read_entry(&record, line, layout, &labels)?);
    }

    debug!(
        tasks = labels.len(),
        people = entries.len(),
        "loaded roster sheet"
    );
    Ok(Roster::new(tasks, entries)?)
}

fn flatten_task_headers(
    categories: &StringRecord,
    task_names: &StringRecord,
    layout: &RosterLayout,
) -> PersistenceResult<Vec<TaskLabel>> {
    let width = categories.len().max(task_names.len());
    let required = layout.name_column.max(layout.expiry_column) + 1;
    if width < required {
        return Err(PersistenceError::InvalidData(format!(
            "roster has {width} columns but the name and expiry columns need at least {required}"
        )));
    }
    if width <= layout.first_task_column {
        return Err(PersistenceError::InvalidData(format!(
            "roster has no task columns (expected tasks from column {})",
            layout.first_task_column + 1
        )));
    }

    let mut current_category: Option<&str> = None;
    let mut tasks = Vec::with_capacity(width - layout.first_task_column);
    for idx in 0..width {
        if let Some(category) = categories.get(idx).filter(|c| !c.is_empty()) {
            current_category = Some(category);
        }
        if idx < layout.first_task_column {
            continue;
        }
        let category = current_category.ok_or_else(|| {
            PersistenceError::InvalidData(format!("task column {} has no category", idx + 1))
        })?;
        let task = match task_names.get(idx).filter(|t| !t.is_empty()) {
            Some(name) => TaskLabel::new(category, name),
            None => TaskLabel::category_only(category),
        };
        tasks.push(task);
    }
    Ok(tasks)
}

fn read_entry(
    record: &StringRecord,
    line: u64,
    layout: &RosterLayout,
    labels: &[String],
) -> PersistenceResult<RosterEntry> {
    let name = record.get(layout.name_column).unwrap_or_default();
    if name.is_empty() {
        return Err(PersistenceError::InvalidData(format!(
            "roster line {line} has no name"
        )));
    }

    let raw_expiry = record.get(layout.expiry_column).unwrap_or_default();
    let parsed = ContractExpiry::parse(raw_expiry);
    if parsed == ExpiryParse::Unreadable {
        warn!(
            person = name,
            value = raw_expiry,
            "unreadable contract expiry; treating as never expiring"
        );
    }

    let mut entry = RosterEntry::new(name, parsed.into_expiry());
    for (offset, label) in labels.iter().enumerate() {
        let cell = record
            .get(layout.first_task_column + offset)
            .unwrap_or_default();
        if is_opt_in(cell) {
            entry.opt_ins.insert(label.clone());
        }
    }
    Ok(entry)
}

/// Blank, `false` and `0` decline a task; anything else opts in.
pub fn is_opt_in(cell: &str) -> bool {
    let cell = cell.trim();
    !(cell.is_empty() || cell == "0" || cell.eq_ignore_ascii_case("false"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opt_in_cell_values() {
        for yes in ["x", "X", "true", "1", "yes", "TRUE"] {
            assert!(is_opt_in(yes), "{yes} should opt in");
        }
        for no in ["", "  ", "0", "false", "FALSE", "False"] {
            assert!(!is_opt_in(no), "{no:?} should not opt in");
        }
    }
}

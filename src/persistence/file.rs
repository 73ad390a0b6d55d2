use super::PersistenceResult;
use crate::assignment::DrawSchedule;
use crate::render::WEEK_COLUMN;
use chrono::NaiveDate;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Serialize)]
struct ScheduleSnapshot<'a> {
    tasks: &'a [String],
    weeks: Vec<WeekSnapshot<'a>>,
}

#[derive(Serialize)]
struct WeekSnapshot<'a> {
    week: String,
    anchor: NaiveDate,
    assignments: Vec<SlotSnapshot<'a>>,
}

#[derive(Serialize)]
struct SlotSnapshot<'a> {
    task: &'a str,
    person: Option<&'a str>,
}

impl<'a> ScheduleSnapshot<'a> {
    fn from_schedule(schedule: &'a DrawSchedule) -> Self {
        let weeks = schedule
            .rows()
            .iter()
            .map(|row| WeekSnapshot {
                week: row.week_label(),
                anchor: row.week.anchor(),
                assignments: schedule
                    .tasks()
                    .iter()
                    .zip(&row.slots)
                    .map(|(task, slot)| SlotSnapshot {
                        task,
                        person: slot.person(),
                    })
                    .collect(),
            })
            .collect();
        Self {
            tasks: schedule.tasks(),
            weeks,
        }
    }
}

pub fn save_schedule_to_json<P: AsRef<Path>>(
    schedule: &DrawSchedule,
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &ScheduleSnapshot::from_schedule(schedule))?;
    Ok(())
}

pub fn save_schedule_to_csv<P: AsRef<Path>>(
    schedule: &DrawSchedule,
    path: P,
    marker: &str,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    write_schedule_csv(schedule, file, marker)
}

/// `Week` then one column per task; unfilled slots are written as `marker`.
pub fn write_schedule_csv<W: Write>(
    schedule: &DrawSchedule,
    writer: W,
    marker: &str,
) -> PersistenceResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    let mut header = Vec::with_capacity(schedule.tasks().len() + 1);
    header.push(WEEK_COLUMN);
    header.extend(schedule.tasks().iter().map(String::as_str));
    writer.write_record(&header)?;

    for row in schedule.rows() {
        let label = row.week_label();
        let mut record = Vec::with_capacity(header.len());
        record.push(label.as_str());
        record.extend(row.slots.iter().map(|slot| slot.display_with(marker)));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

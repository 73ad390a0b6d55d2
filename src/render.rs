use crate::assignment::DrawSchedule;
use polars::prelude::PlSmallStr;
use polars::prelude::*;

pub const WEEK_COLUMN: &str = "Week";

impl DrawSchedule {
    /// `Week` column followed by one string column per task.
    pub fn to_dataframe(&self, marker: &str) -> PolarsResult<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(self.tasks().len() + 1);

        let weeks: Vec<String> = self.rows().iter().map(|row| row.week_label()).collect();
        columns.push(Series::new(PlSmallStr::from_static(WEEK_COLUMN), weeks).into_column());

        for (idx, task) in self.tasks().iter().enumerate() {
            let cells: Vec<&str> = self
                .rows()
                .iter()
                .map(|row| row.slots[idx].display_with(marker))
                .collect();
            columns.push(Series::new(PlSmallStr::from(task.as_str()), cells).into_column());
        }

        DataFrame::new(columns)
    }
}

fn cell_text(col: &Column, row_idx: usize) -> String {
    match col.get(row_idx) {
        Ok(AnyValue::Null) | Err(_) => String::new(),
        Ok(AnyValue::String(s)) => s.to_string(),
        Ok(AnyValue::StringOwned(s)) => s.to_string(),
        Ok(av) => av
            .get_str()
            .map(str::to_string)
            .unwrap_or_else(|| av.to_string()),
    }
}

/// Boxed plain-text rendering of a frame, one line per row.
pub fn render_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();
    let cells: Vec<Vec<String>> = (0..df.height())
        .map(|row_idx| columns.iter().map(|col| cell_text(col, row_idx)).collect())
        .collect();

    let mut widths: Vec<usize> = col_names.iter().map(|n| n.chars().count()).collect();
    for row in &cells {
        for (ci, s) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(s.chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    push_line(&mut out, &col_names, &widths);
    out.push_str(&sep);
    out.push('\n');
    for row in &cells {
        push_line(&mut out, row, &widths);
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn push_line(out: &mut String, values: &[String], widths: &[usize]) {
    out.push('|');
    for (value, width) in values.iter().zip(widths) {
        out.push(' ');
        out.push_str(value);
        out.push_str(&" ".repeat(width.saturating_sub(value.chars().count())));
        out.push_str(" |");
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::{AssignmentRow, AssignmentSlot};
    use crate::calendar::Week;
    use chrono::NaiveDate;

    fn sample() -> DrawSchedule {
        let mut schedule = DrawSchedule::new(vec!["RDC - Autoclave".into(), "Waste".into()]);
        schedule.push_row(AssignmentRow {
            week: Week::containing(NaiveDate::from_ymd_opt(2024, 2, 5).unwrap()),
            slots: vec![
                AssignmentSlot::Assigned("Chloé".into()),
                AssignmentSlot::NoCandidate,
            ],
        });
        schedule
    }

    #[test]
    fn dataframe_has_week_and_task_columns() {
        let df = sample().to_dataframe("N/A").unwrap();
        assert_eq!(df.height(), 1);
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, vec!["Week", "RDC - Autoclave", "Waste"]);
        let waste = df.column("Waste").unwrap().str().unwrap().get(0).unwrap();
        assert_eq!(waste, "N/A");
    }

    #[test]
    fn text_table_aligns_multibyte_names() {
        let df = sample().to_dataframe("-").unwrap();
        let table = render_text_table(&df);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[3].contains("| W6 (05/02/2024) | Chloé           | -     |"));
        let widths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|w| *w == widths[0]));
    }
}

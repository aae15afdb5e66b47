use crate::calc::date_provider::DateProvider;
use crate::data::{TagDetail, TagIndex};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

pub const GRID_ROWS: usize = 6;
pub const GRID_DAYS: usize = 7;
pub const GRID_CELLS: usize = GRID_ROWS * GRID_DAYS;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MonthRelation {
    Previous,
    Current,
    Next,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub day_of_month: u32,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_weekend: bool,
    pub month_relation: MonthRelation,
    pub tags: Vec<TagDetail>,
    pub selectable: bool,
}

/// Lays the month containing `displayed` onto a fixed 6x7 grid.
///
/// The grid starts on the first day of the week holding the 1st of the month
/// and always holds exactly [`GRID_CELLS`] consecutive days, padding with days
/// from the following month. Each run is capped at [`GRID_CELLS`], so a
/// provider that stops advancing at the edge of its range still yields a
/// full grid.
pub fn project<P: DateProvider + ?Sized>(
    provider: &P,
    displayed: NaiveDate,
    selected: Option<NaiveDate>,
    tags: &TagIndex,
) -> Vec<DayCell> {
    let today = provider.today();
    let make = |date: NaiveDate, relation: MonthRelation| {
        let day_tags = tags.lookup(date).to_vec();
        let selectable = !day_tags.iter().any(|t| !t.selectable);
        DayCell {
            date,
            day_of_month: date.day(),
            is_today: date == today,
            is_selected: selected == Some(date),
            is_weekend: date.weekday().number_from_monday() > 5,
            month_relation: relation,
            tags: day_tags,
            selectable,
        }
    };

    let mut cells = Vec::with_capacity(GRID_CELLS);
    let mut cursor = provider.start_of_week(provider.start_of_month(displayed));

    while cursor.day() != 1 && cells.len() < GRID_CELLS {
        cells.push(make(cursor, MonthRelation::Previous));
        cursor = provider.add_days(cursor, 1);
    }

    // At least one pass: the cursor sits on the 1st when the loop begins.
    loop {
        cells.push(make(cursor, MonthRelation::Current));
        cursor = provider.add_days(cursor, 1);
        if cursor.day() == 1 || cells.len() == GRID_CELLS {
            break;
        }
    }

    while cells.len() < GRID_CELLS {
        cells.push(make(cursor, MonthRelation::Next));
        cursor = provider.add_days(cursor, 1);
    }

    cells
}

use anyhow::{bail, Result};
use chrono::NaiveDate;
use popcal::calc::{project, ChronoProvider, DateProvider, DayCell, MonthRelation, GRID_DAYS};
use popcal::data::{AppSettings, Persistable, TagData, TagIndex};
use popcal::picker::{render::legend, Header, LegendEntry};
use serde::Serialize;

pub fn run(date: Option<&str>, json: bool) -> Result<()> {
    let settings = AppSettings::load()?;
    let tag_data = TagData::load()?;
    let provider = ChronoProvider::from_settings(&settings);
    let date = resolve_date(&provider, date.or(settings.seed()))?;
    let report = GridReport::build(&provider, date, &tag_data);
    let mut out = std::io::stdout();
    if json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        println!();
        Ok(())
    } else {
        write_grid(&report, &mut out)
    }
}

fn resolve_date(provider: &ChronoProvider, text: Option<&str>) -> Result<NaiveDate> {
    let Some(text) = text else {
        return Ok(provider.today());
    };
    let format = provider.long_date_format();
    match provider.parse(text, format) {
        Some(date) => Ok(date),
        None => bail!("'{text}' is not a valid date (expected {format})"),
    }
}

#[derive(Serialize)]
pub(crate) struct GridReport {
    header: Header,
    weekdays: Vec<String>,
    cells: Vec<DayCell>,
    legend: Vec<LegendEntry>,
}

impl GridReport {
    pub(crate) fn build<P: DateProvider>(provider: &P, date: NaiveDate, tag_data: &TagData) -> Self {
        let index = TagIndex::build(&tag_data.tags);
        GridReport {
            header: Header::for_month(provider, date),
            weekdays: provider.weekday_names(),
            cells: project(provider, date, Some(date), &index),
            legend: legend(&tag_data.tags),
        }
    }
}

/// One cell as four columns: `[15]` selected, `<20>` today, `·26` outside
/// the month, with `x` for disabled and `*` for tagged days.
fn cell_text(cell: &DayCell) -> String {
    let (left, right) = if cell.is_selected {
        ('[', ']')
    } else if cell.is_today {
        ('<', '>')
    } else {
        let left = match cell.month_relation {
            MonthRelation::Current => ' ',
            _ => '·',
        };
        let right = if !cell.selectable {
            'x'
        } else if !cell.tags.is_empty() {
            '*'
        } else {
            ' '
        };
        (left, right)
    };
    format!("{left}{:>2}{right}", cell.day_of_month)
}

pub(crate) fn write_grid<W: std::io::Write>(report: &GridReport, out: &mut W) -> Result<()> {
    let width = GRID_DAYS * 4;
    let title = format!("{} {}", report.header.month, report.header.year);
    writeln!(out, "{title:^width$}")?;
    let headings: Vec<String> = report
        .weekdays
        .iter()
        .map(|w| format!(" {:>2} ", w.chars().take(2).collect::<String>()))
        .collect();
    writeln!(out, "{}", headings.concat())?;
    for week in report.cells.chunks(GRID_DAYS) {
        let row: Vec<String> = week.iter().map(cell_text).collect();
        writeln!(out, "{}", row.concat().trim_end())?;
    }
    if !report.legend.is_empty() {
        writeln!(out, "---")?;
        for entry in &report.legend {
            writeln!(out, "  {:<10} {}", entry.color, entry.label)?;
        }
    }
    Ok(())
}

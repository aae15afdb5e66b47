use crate::calc::date_provider::DateProvider;
use crate::calc::grid::{DayCell, MonthRelation};
use crate::data::Tag;
use crate::picker::state::ViewMode;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CellClass {
    PreviousMonth,
    NextMonth,
    Weekend,
    Today,
    Selected,
    Disabled,
}

/// What a render target needs to draw one day cell.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CellRender {
    pub day: u32,
    pub classes: Vec<CellClass>,
    pub swatches: Vec<String>,
    pub click_enabled: bool,
    /// The date in the display format. Only present on clickable cells.
    pub date_attr: Option<String>,
}

impl CellRender {
    pub fn has(&self, class: CellClass) -> bool {
        self.classes.contains(&class)
    }

    fn from_cell<P: DateProvider + ?Sized>(provider: &P, cell: &DayCell) -> Self {
        let mut classes = Vec::new();
        match cell.month_relation {
            MonthRelation::Previous => classes.push(CellClass::PreviousMonth),
            MonthRelation::Next => classes.push(CellClass::NextMonth),
            MonthRelation::Current => {}
        }
        if cell.is_weekend {
            classes.push(CellClass::Weekend);
        }
        if cell.is_today {
            classes.push(CellClass::Today);
        }
        if cell.is_selected {
            classes.push(CellClass::Selected);
        }
        if !cell.selectable {
            classes.push(CellClass::Disabled);
        }
        CellRender {
            day: cell.day_of_month,
            classes,
            swatches: cell.tags.iter().map(|t| t.color.clone()).collect(),
            click_enabled: cell.selectable,
            date_attr: cell
                .selectable
                .then(|| provider.format(cell.date, provider.long_date_format())),
        }
    }
}

pub fn cell_instructions<P: DateProvider + ?Sized>(provider: &P, cells: &[DayCell]) -> Vec<CellRender> {
    cells.iter().map(|c| CellRender::from_cell(provider, c)).collect()
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct Header {
    pub month: String,
    pub year: String,
}

impl Header {
    pub fn for_month<P: DateProvider + ?Sized>(provider: &P, month: NaiveDate) -> Self {
        Header {
            month: provider.format(month, "%B"),
            year: provider.format(month, "%Y"),
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct LegendEntry {
    pub color: String,
    pub label: String,
}

pub fn legend(tags: &[Tag]) -> Vec<LegendEntry> {
    tags.iter()
        .enumerate()
        .map(|(i, t)| LegendEntry {
            color: t.color.clone(),
            label: t.legend_label(i),
        })
        .collect()
}

/// Receives draw commands for one popout.
pub trait RenderTarget {
    fn set_labels(&mut self, weekdays: &[String], months: &[String]);
    fn set_legend(&mut self, legend: &[LegendEntry]);
    /// Always a full frame: the header and every cell.
    fn render(&mut self, header: &Header, cells: &[CellRender]);
    fn set_view_mode(&mut self, mode: ViewMode);
    fn set_visible(&mut self, visible: bool);
}

/// A render target that keeps the last frame in memory for a host to draw.
#[derive(Clone, Debug, Default)]
pub struct PopoutModel {
    pub weekdays: Vec<String>,
    pub months: Vec<String>,
    pub legend: Vec<LegendEntry>,
    pub header: Header,
    pub cells: Vec<CellRender>,
    pub view_mode: ViewMode,
    pub visible: bool,
    pub frames: usize,
}

impl RenderTarget for PopoutModel {
    fn set_labels(&mut self, weekdays: &[String], months: &[String]) {
        self.weekdays = weekdays.to_vec();
        self.months = months.to_vec();
    }

    fn set_legend(&mut self, legend: &[LegendEntry]) {
        self.legend = legend.to_vec();
    }

    fn render(&mut self, header: &Header, cells: &[CellRender]) {
        self.header = header.clone();
        self.cells = cells.to_vec();
        self.frames += 1;
    }

    fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

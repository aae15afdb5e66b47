use crate::calc::date_provider::DateProvider;
use crate::data::{Tag, TagIndex};
use chrono::{Datelike, NaiveDate};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    DaySelection,
    MonthSelection,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::DaySelection => ViewMode::MonthSelection,
            ViewMode::MonthSelection => ViewMode::DaySelection,
        }
    }
}

/// Per-widget calendar state.
///
/// `displayed_month` is the month cursor; only its year and month matter to
/// the grid. Dates are `Copy` values, so the selection can never alias it.
#[derive(Clone, Debug)]
pub struct CalendarState {
    displayed_month: NaiveDate,
    selected_date: Option<NaiveDate>,
    tags: Vec<Tag>,
    tag_index: TagIndex,
    pub view_mode: ViewMode,
}

impl CalendarState {
    pub fn create(seed: NaiveDate, tags: Vec<Tag>) -> Self {
        let tag_index = TagIndex::build(&tags);
        CalendarState {
            displayed_month: seed,
            selected_date: Some(seed),
            tags,
            tag_index,
            view_mode: ViewMode::DaySelection,
        }
    }

    pub fn displayed_month(&self) -> NaiveDate {
        self.displayed_month
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn tag_index(&self) -> &TagIndex {
        &self.tag_index
    }

    /// Commits a concrete date: both the cursor and the selection move to it.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.displayed_month = date;
        self.selected_date = Some(date);
    }

    pub fn shift_month<P: DateProvider + ?Sized>(&mut self, provider: &P, delta: i32) {
        self.displayed_month = provider.add_months(self.displayed_month, delta);
    }

    pub fn set_month<P: DateProvider + ?Sized>(&mut self, provider: &P, month0: u32) {
        self.displayed_month = provider.with_month(self.displayed_month, month0);
    }

    pub fn set_tags(&mut self, tags: Vec<Tag>) {
        self.tag_index = TagIndex::build(&tags);
        self.tags = tags;
    }

    pub fn clear_selection(&mut self) {
        self.selected_date = None;
    }

    pub fn displayed_year_month(&self) -> (i32, u32) {
        (self.displayed_month.year(), self.displayed_month.month())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::date_provider::ChronoProvider;
    use chrono::Weekday;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn provider() -> ChronoProvider {
        ChronoProvider::new("%d/%m/%Y", Weekday::Mon)
    }

    #[test]
    fn test_create_seeds_both_dates() {
        let state = CalendarState::create(d(2024, 3, 15), vec![]);
        assert_eq!(state.displayed_month(), d(2024, 3, 15));
        assert_eq!(state.selected_date(), Some(d(2024, 3, 15)));
        assert_eq!(state.view_mode, ViewMode::DaySelection);
        assert!(state.tag_index().is_empty());
    }

    #[test]
    fn test_shift_month_leaves_selection() {
        let mut state = CalendarState::create(d(2024, 3, 15), vec![]);
        state.shift_month(&provider(), 1);
        assert_eq!(state.displayed_year_month(), (2024, 4));
        assert_eq!(state.selected_date(), Some(d(2024, 3, 15)));
        state.shift_month(&provider(), -2);
        assert_eq!(state.displayed_year_month(), (2024, 2));
        assert_eq!(state.selected_date(), Some(d(2024, 3, 15)));
    }

    #[test]
    fn test_set_date_moves_cursor_and_selection() {
        let mut state = CalendarState::create(d(2024, 3, 15), vec![]);
        state.shift_month(&provider(), 5);
        state.set_date(d(2025, 1, 2));
        assert_eq!(state.displayed_month(), d(2025, 1, 2));
        assert_eq!(state.selected_date(), Some(d(2025, 1, 2)));
        state.shift_month(&provider(), 1);
        assert_eq!(state.selected_date(), Some(d(2025, 1, 2)));
    }

    #[test]
    fn test_set_month_keeps_year() {
        let mut state = CalendarState::create(d(2024, 3, 31), vec![]);
        state.set_month(&provider(), 1);
        assert_eq!(state.displayed_month(), d(2024, 2, 29));
        assert_eq!(state.selected_date(), Some(d(2024, 3, 31)));
    }

    #[test]
    fn test_set_tags_rebuilds_index() {
        let mut state = CalendarState::create(d(2024, 3, 15), vec![]);
        state.set_tags(vec![Tag::new("#f00", "Busy", false, &["15/03/2024"])]);
        assert_eq!(state.tags().len(), 1);
        assert_eq!(state.tag_index().lookup(d(2024, 3, 15)).len(), 1);
        state.set_tags(vec![]);
        assert!(state.tag_index().is_empty());
    }

    #[test]
    fn test_clear_selection() {
        let mut state = CalendarState::create(d(2024, 3, 15), vec![]);
        state.clear_selection();
        assert_eq!(state.selected_date(), None);
        assert_eq!(state.displayed_month(), d(2024, 3, 15));
    }

    #[test]
    fn test_view_mode_toggle() {
        assert_eq!(ViewMode::DaySelection.toggled(), ViewMode::MonthSelection);
        assert_eq!(ViewMode::MonthSelection.toggled(), ViewMode::DaySelection);
    }
}

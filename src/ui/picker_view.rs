use crate::ui::position::place_popout;
use anyhow::Result;
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEventKind, KeyModifiers};
use popcal::calc::{ChronoProvider, DateProvider, GRID_CELLS, GRID_DAYS};
use popcal::picker::{
    CalendarManager, CellClass, CellRender, ChangeNotification, GlobalEvent, InputField,
    PickerEvent, PopoutModel, ViewMode, WidgetId,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame, Terminal,
};
use std::io::Stdout;
use std::time::Duration as StdDuration;

pub type Manager = CalendarManager<ChronoProvider, PopoutModel>;

const POPOUT_WIDTH: u16 = 25;
const MONTHS_PER_ROW: usize = 3;
const FIELD_HEIGHT: u16 = 3;
const FIELD_WIDTH: u16 = 32;

pub struct App {
    manager: Manager,
    focus: usize,
    cell_cursor: usize,
    month_cursor: usize,
    /// Change notifications observed on the host inputs, oldest first.
    changes: Vec<ChangeNotification>,
    /// Transient message for the status line. Cleared on next keypress.
    status: Option<(String, Color)>,
}

impl App {
    pub fn new(manager: Manager) -> Self {
        App {
            manager,
            focus: 0,
            cell_cursor: 0,
            month_cursor: 0,
            changes: Vec::new(),
            status: None,
        }
    }

    pub fn manager(&self) -> &Manager {
        &self.manager
    }

    fn focused_field(&self) -> Option<&InputField> {
        self.manager.form().fields().get(self.focus)
    }

    fn focused_widget(&self) -> Option<WidgetId> {
        let field = self.focused_field()?;
        self.manager.widget_for_input(&field.id)
    }

    fn open_widget(&self) -> Option<WidgetId> {
        self.manager
            .widget_ids()
            .find(|id| self.manager.is_open(id))
            .cloned()
    }

    /// Returns true if the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        self.status = None;

        if let Some(id) = self.open_widget() {
            let mode = self
                .manager
                .state(&id)
                .map(|s| s.view_mode)
                .unwrap_or_default();
            match mode {
                ViewMode::DaySelection => self.handle_day_key(&id, code),
                ViewMode::MonthSelection => self.handle_month_key(&id, code),
            }
            return false;
        }
        self.handle_form_key(code)
    }

    pub fn handle_resize(&mut self) {
        self.manager.dispatch_global(GlobalEvent::Resize);
    }

    fn handle_form_key(&mut self, code: KeyCode) -> bool {
        let field_count = self.manager.form().fields().len();
        match code {
            KeyCode::Esc => return true,
            KeyCode::Tab if field_count > 0 => {
                self.commit_focused();
                self.focus = (self.focus + 1) % field_count;
            }
            KeyCode::BackTab if field_count > 0 => {
                self.commit_focused();
                self.focus = (self.focus + field_count - 1) % field_count;
            }
            KeyCode::Enter => self.commit_focused(),
            KeyCode::F(2) | KeyCode::Down => self.open_focused(),
            KeyCode::Backspace => {
                if let Some(field) = self.focused_field_mut() {
                    field.value.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.focused_field_mut() {
                    field.value.push(c);
                }
            }
            _ => {}
        }
        false
    }

    fn focused_field_mut(&mut self) -> Option<&mut InputField> {
        let id = self.focused_field()?.id.clone();
        self.manager.form_mut().get_mut(&id)
    }

    /// Fires the input's change handling, as leaving or submitting the field would.
    fn commit_focused(&mut self) {
        let Some(id) = self.focused_widget() else {
            return;
        };
        let Some(text) = self.focused_field().map(|f| f.value.clone()) else {
            return;
        };
        self.manager.dispatch(&id, PickerEvent::TextCommitted(text));
        if self.focused_field().is_some_and(|f| f.invalid) {
            let format = self.manager.provider().long_date_format().to_string();
            self.status = Some((format!("Invalid date, expected {format}"), Color::Red));
        }
    }

    fn open_focused(&mut self) {
        let Some(id) = self.focused_widget() else {
            self.status = Some(("No calendar on this field".to_string(), Color::DarkGray));
            return;
        };
        self.manager.dispatch(&id, PickerEvent::Open);
        self.reset_cursors(&id);
    }

    fn reset_cursors(&mut self, id: &WidgetId) {
        if let Some(model) = self.manager.target(id) {
            self.cell_cursor = initial_cell_cursor(&model.cells);
        }
        if let Some(state) = self.manager.state(id) {
            self.month_cursor = state.displayed_year_month().1 as usize - 1;
        }
    }

    fn handle_day_key(&mut self, id: &WidgetId, code: KeyCode) {
        match code {
            KeyCode::Esc => self.manager.dispatch_global(GlobalEvent::OutsideClick),
            KeyCode::Left => self.cell_cursor = self.cell_cursor.saturating_sub(1),
            KeyCode::Right => self.cell_cursor = (self.cell_cursor + 1).min(GRID_CELLS - 1),
            KeyCode::Up => self.cell_cursor = self.cell_cursor.saturating_sub(GRID_DAYS),
            KeyCode::Down => {
                if self.cell_cursor + GRID_DAYS < GRID_CELLS {
                    self.cell_cursor += GRID_DAYS;
                }
            }
            KeyCode::PageUp | KeyCode::Char('<') | KeyCode::Char('p') => {
                self.manager.dispatch(id, PickerEvent::PrevMonth);
            }
            KeyCode::PageDown | KeyCode::Char('>') | KeyCode::Char('n') => {
                self.manager.dispatch(id, PickerEvent::NextMonth);
            }
            KeyCode::Char('t') => {
                self.manager.dispatch(id, PickerEvent::Today);
                self.status = Some(("Today's date selected".to_string(), Color::Cyan));
            }
            KeyCode::Char('m') => {
                self.manager.dispatch(id, PickerEvent::ToggleView);
                self.reset_cursors(id);
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.click_cell(id),
            _ => {}
        }
    }

    /// Disabled cells have no date attribute, so clicking them does nothing.
    fn click_cell(&mut self, id: &WidgetId) {
        let attr = self
            .manager
            .target(id)
            .and_then(|m| m.cells.get(self.cell_cursor))
            .filter(|c| c.click_enabled)
            .and_then(|c| c.date_attr.clone());
        let Some(attr) = attr else {
            self.status = Some(("That day is not available".to_string(), Color::DarkGray));
            return;
        };
        if let Some(change) = self.manager.dispatch(id, PickerEvent::DayClicked(attr)) {
            self.status = Some((
                format!("{} changed to {}", change.input_id, change.value),
                Color::Green,
            ));
            self.changes.push(change);
        }
    }

    fn handle_month_key(&mut self, id: &WidgetId, code: KeyCode) {
        let last = 11;
        match code {
            KeyCode::Esc => self.manager.dispatch_global(GlobalEvent::OutsideClick),
            KeyCode::Left => self.month_cursor = self.month_cursor.saturating_sub(1),
            KeyCode::Right => self.month_cursor = (self.month_cursor + 1).min(last),
            KeyCode::Up => self.month_cursor = self.month_cursor.saturating_sub(MONTHS_PER_ROW),
            KeyCode::Down => {
                if self.month_cursor + MONTHS_PER_ROW <= last {
                    self.month_cursor += MONTHS_PER_ROW;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.manager
                    .dispatch(id, PickerEvent::MonthPicked(self.month_cursor as u32));
                self.reset_cursors(id);
            }
            KeyCode::Char('m') => {
                self.manager.dispatch(id, PickerEvent::ToggleView);
                self.reset_cursors(id);
            }
            _ => {}
        }
    }

    pub fn render(&self, f: &mut Frame) {
        let size = f.area();
        let form_height = FIELD_HEIGHT * self.manager.form().fields().len() as u16;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),           // help
                Constraint::Length(form_height), // fields
                Constraint::Min(3),              // change log
                Constraint::Length(1),           // status
            ])
            .split(size);

        f.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(
                    "popcal",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "Tab next field · Enter commit · F2/↓ open calendar · Esc quit",
                    Style::default().fg(Color::DarkGray),
                )),
            ]),
            chunks[0],
        );

        let field_rects = self.render_fields(f, chunks[1]);
        self.render_changes(f, chunks[2]);

        if let Some((msg, color)) = &self.status {
            f.render_widget(
                Paragraph::new(Span::styled(msg.clone(), Style::default().fg(*color))),
                chunks[3],
            );
        }

        if let Some(id) = self.open_widget() {
            let anchor = self
                .manager
                .input_id(&id)
                .and_then(|input| {
                    self.manager
                        .form()
                        .fields()
                        .iter()
                        .position(|field| field.id == input)
                })
                .and_then(|i| field_rects.get(i).copied());
            if let (Some(anchor), Some(model)) = (anchor, self.manager.target(&id)) {
                let area = place_popout(anchor, POPOUT_WIDTH, popout_height(model), size);
                self.render_popout(f, model, area);
            }
        }
    }

    fn render_fields(&self, f: &mut Frame, area: Rect) -> Vec<Rect> {
        let mut rects = Vec::new();
        for (i, field) in self.manager.form().fields().iter().enumerate() {
            let rect = Rect::new(
                area.x,
                area.y + i as u16 * FIELD_HEIGHT,
                FIELD_WIDTH.min(area.width),
                FIELD_HEIGHT,
            );
            if rect.bottom() > area.bottom() {
                break;
            }
            let border = if field.invalid {
                Color::Red
            } else if i == self.focus {
                Color::Yellow
            } else {
                Color::Gray
            };
            let has_picker = self.manager.widget_for_input(&field.id).is_some();
            let mut spans = if field.value.is_empty() {
                vec![Span::styled(
                    field.placeholder.clone(),
                    Style::default().fg(Color::DarkGray),
                )]
            } else {
                vec![Span::raw(field.value.clone())]
            };
            if has_picker {
                let pad = (FIELD_WIDTH as usize)
                    .saturating_sub(4)
                    .saturating_sub(spans[0].content.chars().count());
                spans.push(Span::raw(" ".repeat(pad)));
                spans.push(Span::styled("▾", Style::default().fg(Color::Cyan)));
            }
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(field.label.clone());
            f.render_widget(Paragraph::new(Line::from(spans)).block(block), rect);
            rects.push(rect);
        }
        rects
    }

    fn render_changes(&self, f: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .changes
            .iter()
            .rev()
            .map(|c| ListItem::new(format!("change  #{}  {}", c.input_id, c.value)))
            .collect();
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::TOP)
                .title("Change events"),
        );
        f.render_widget(list, area);
    }

    fn render_popout(&self, f: &mut Frame, model: &PopoutModel, area: Rect) {
        let title = format!(" ◂ {} {} ▸ ", model.header.month, model.header.year);
        let block = Block::default().borders(Borders::ALL).title(title);
        let lines = match model.view_mode {
            ViewMode::DaySelection => day_view_lines(model, self.cell_cursor),
            ViewMode::MonthSelection => month_view_lines(model, self.month_cursor),
        };
        f.render_widget(Clear, area);
        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}

fn popout_height(model: &PopoutModel) -> u16 {
    // borders + weekdays + six weeks + today link
    let base = 2 + 1 + 6 + 1;
    let legend = if model.legend.is_empty() {
        0
    } else {
        1 + model.legend.len()
    };
    (base + legend) as u16
}

fn initial_cell_cursor(cells: &[CellRender]) -> usize {
    cells
        .iter()
        .position(|c| c.has(CellClass::Selected))
        .or_else(|| cells.iter().position(|c| !c.has(CellClass::PreviousMonth)))
        .unwrap_or(0)
}

fn day_view_lines(model: &PopoutModel, cursor: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let headings: Vec<Span> = model
        .weekdays
        .iter()
        .map(|w| {
            let short: String = w.chars().take(2).collect();
            Span::styled(format!("{short:>2} "), Style::default().add_modifier(Modifier::BOLD))
        })
        .collect();
    lines.push(Line::from(headings));

    for (row, week) in model.cells.chunks(GRID_DAYS).enumerate() {
        let mut spans = Vec::new();
        for (col, cell) in week.iter().enumerate() {
            spans.push(Span::styled(
                format!("{:>2}", cell.day),
                cell_style(cell, row * GRID_DAYS + col == cursor),
            ));
            spans.push(match cell.swatches.first() {
                Some(color) => Span::styled("•", Style::default().fg(swatch_color(color))),
                None => Span::raw(" "),
            });
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(Span::styled(
        "[t] Select today's date",
        Style::default().fg(Color::Cyan),
    )));
    if !model.legend.is_empty() {
        lines.push(Line::from("Legend:"));
        for entry in &model.legend {
            lines.push(Line::from(vec![
                Span::styled("● ", Style::default().fg(swatch_color(&entry.color))),
                Span::raw(entry.label.clone()),
            ]));
        }
    }
    lines
}

fn month_view_lines(model: &PopoutModel, cursor: usize) -> Vec<Line<'static>> {
    model
        .months
        .chunks(MONTHS_PER_ROW)
        .enumerate()
        .map(|(row, months)| {
            let spans: Vec<Span> = months
                .iter()
                .enumerate()
                .map(|(col, name)| {
                    let style = if row * MONTHS_PER_ROW + col == cursor {
                        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    Span::styled(format!(" {name:<5} "), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// Determines the ratatui `Style` for a day cell from its render classes.
pub(crate) fn cell_style(cell: &CellRender, is_cursor: bool) -> Style {
    let mut style = if cell.has(CellClass::Selected) {
        Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else if cell.has(CellClass::Disabled) {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else if cell.has(CellClass::Today) {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else if cell.has(CellClass::PreviousMonth) || cell.has(CellClass::NextMonth) {
        Style::default().fg(Color::DarkGray)
    } else if cell.has(CellClass::Weekend) {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default()
    };
    if is_cursor {
        style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
    }
    style
}

/// Maps a tag colour (`#rgb`, `#rrggbb` or a colour name) to a terminal colour.
pub(crate) fn swatch_color(raw: &str) -> Color {
    let raw = raw.trim();
    if let Some(hex) = raw.strip_prefix('#') {
        if hex.len() == 3 {
            let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
            if let Ok(color) = format!("#{expanded}").parse() {
                return color;
            }
        }
    }
    raw.parse().unwrap_or(Color::Magenta)
}

// ── App event loop ────────────────────────────────────────────────────────────

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;
        if event::poll(StdDuration::from_millis(16))? {
            match event::read()? {
                CEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key.code, key.modifiers) {
                        break;
                    }
                }
                CEvent::Resize(_, _) => app.handle_resize(),
                _ => {}
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Weekday};
    use popcal::data::Tag;
    use popcal::picker::{AttachOptions, Form, InputKind};
    use ratatui::{backend::TestBackend, Terminal};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn make_app(tags: Vec<Tag>) -> App {
        let form = Form::new(vec![
            InputField::new("start", "Start", InputKind::Text).with_value("15/03/2024"),
            InputField::new("note", "Note", InputKind::Label),
        ]);
        let provider = ChronoProvider::new("%d/%m/%Y", Weekday::Mon).with_today(d(2024, 3, 20));
        let mut manager = Manager::new(provider, form);
        manager.attach("#start", AttachOptions { date: None, tags });
        App::new(manager)
    }

    fn start_id(app: &App) -> WidgetId {
        app.manager().widget_for_input("start").unwrap()
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(code, KeyModifiers::NONE)
    }

    fn cell(day: u32, classes: Vec<CellClass>) -> CellRender {
        CellRender {
            day,
            classes,
            swatches: vec![],
            click_enabled: true,
            date_attr: None,
        }
    }

    // ── cell_style / swatch_color ─────────────────────────────────────────────

    #[test]
    fn test_style_selected_wins() {
        let s = cell_style(&cell(1, vec![CellClass::Selected, CellClass::Today]), false);
        assert_eq!(s, Style::default().fg(Color::Black).bg(Color::White).add_modifier(Modifier::BOLD));
    }

    #[test]
    fn test_style_disabled() {
        let s = cell_style(&cell(1, vec![CellClass::Disabled, CellClass::Weekend]), false);
        assert_eq!(s, Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT));
    }

    #[test]
    fn test_style_other_month_and_weekend() {
        let s = cell_style(&cell(1, vec![CellClass::NextMonth]), false);
        assert_eq!(s, Style::default().fg(Color::DarkGray));
        let s = cell_style(&cell(1, vec![CellClass::Weekend]), false);
        assert_eq!(s, Style::default().add_modifier(Modifier::DIM));
    }

    #[test]
    fn test_style_cursor_underlines() {
        let s = cell_style(&cell(1, vec![]), true);
        assert_eq!(s, Style::default().add_modifier(Modifier::UNDERLINED | Modifier::BOLD));
    }

    #[test]
    fn test_swatch_color_forms() {
        assert_eq!(swatch_color("#f00"), Color::Rgb(255, 0, 0));
        assert_eq!(swatch_color("#00ff80"), Color::Rgb(0, 255, 128));
        assert_eq!(swatch_color("blue"), Color::Blue);
        assert_eq!(swatch_color("not-a-colour"), Color::Magenta);
    }

    // ── key handling ──────────────────────────────────────────────────────────

    #[test]
    fn test_open_puts_cursor_on_selected_day() {
        let mut app = make_app(vec![]);
        press(&mut app, KeyCode::F(2));
        assert!(app.manager().is_open(&start_id(&app)));
        // 15/03/2024 sits at index 18 of a Monday-first grid
        assert_eq!(app.cell_cursor, 18);
        assert_eq!(app.month_cursor, 2);
    }

    #[test]
    fn test_pick_day_with_keys_records_change() {
        let mut app = make_app(vec![]);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        let id = start_id(&app);
        assert!(!app.manager().is_open(&id));
        assert_eq!(app.manager().form().get("start").unwrap().value, "16/03/2024");
        assert_eq!(app.changes.len(), 1);
        assert_eq!(app.changes[0].value, "16/03/2024");
    }

    #[test]
    fn test_disabled_day_click_is_inert() {
        let mut app = make_app(vec![Tag::new("#f00", "Busy", false, &["16/03/2024"])]);
        press(&mut app, KeyCode::F(2));
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        let id = start_id(&app);
        assert!(app.manager().is_open(&id));
        assert!(app.changes.is_empty());
        assert_eq!(app.manager().form().get("start").unwrap().value, "15/03/2024");
    }

    #[test]
    fn test_month_navigation_keys() {
        let mut app = make_app(vec![]);
        press(&mut app, KeyCode::F(2));
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::PageDown);
        let id = start_id(&app);
        assert_eq!(app.manager().state(&id).unwrap().displayed_year_month(), (2024, 5));
        press(&mut app, KeyCode::Char('<'));
        assert_eq!(app.manager().state(&id).unwrap().displayed_year_month(), (2024, 4));
    }

    #[test]
    fn test_month_view_pick() {
        let mut app = make_app(vec![]);
        press(&mut app, KeyCode::F(2));
        press(&mut app, KeyCode::Char('m'));
        let id = start_id(&app);
        assert_eq!(app.manager().state(&id).unwrap().view_mode, ViewMode::MonthSelection);
        press(&mut app, KeyCode::Down); // Mar -> Jun
        press(&mut app, KeyCode::Right); // Jun -> Jul
        press(&mut app, KeyCode::Enter);
        let state = app.manager().state(&id).unwrap();
        assert_eq!(state.view_mode, ViewMode::DaySelection);
        assert_eq!(state.displayed_year_month(), (2024, 7));
        assert!(app.manager().is_open(&id));
    }

    #[test]
    fn test_today_key_closes_popout() {
        let mut app = make_app(vec![]);
        press(&mut app, KeyCode::F(2));
        press(&mut app, KeyCode::Char('t'));
        let id = start_id(&app);
        assert!(!app.manager().is_open(&id));
        assert_eq!(app.manager().form().get("start").unwrap().value, "20/03/2024");
    }

    #[test]
    fn test_esc_dismisses_then_quits() {
        let mut app = make_app(vec![]);
        press(&mut app, KeyCode::F(2));
        press(&mut app, KeyCode::Char('m'));
        assert!(!press(&mut app, KeyCode::Esc));
        let id = start_id(&app);
        assert!(!app.manager().is_open(&id));
        assert_eq!(app.manager().state(&id).unwrap().view_mode, ViewMode::DaySelection);
        assert!(press(&mut app, KeyCode::Esc));
    }

    #[test]
    fn test_resize_closes_popout() {
        let mut app = make_app(vec![]);
        press(&mut app, KeyCode::F(2));
        app.handle_resize();
        assert!(!app.manager().is_open(&start_id(&app)));
    }

    #[test]
    fn test_typing_and_commit_marks_invalid() {
        let mut app = make_app(vec![]);
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Enter);
        assert!(app.manager().form().get("start").unwrap().invalid);
        assert!(app.status.is_some());

        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Tab);
        let field = app.manager().form().get("start").unwrap();
        assert!(!field.invalid);
        assert_eq!(app.focus, 1);
    }

    #[test]
    fn test_commit_typed_date_moves_calendar() {
        let mut app = make_app(vec![]);
        for _ in 0..10 {
            press(&mut app, KeyCode::Backspace);
        }
        for c in "01/12/2025".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        let id = start_id(&app);
        assert_eq!(app.manager().state(&id).unwrap().selected_date(), Some(d(2025, 12, 1)));
    }

    #[test]
    fn test_open_on_plain_field_reports() {
        let mut app = make_app(vec![]);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::F(2));
        assert!(app.manager().widget_ids().all(|id| !app.manager().is_open(id)));
        assert!(app.status.is_some());
    }

    #[test]
    fn test_ctrl_c_returns_true() {
        let mut app = make_app(vec![]);
        assert!(app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL));
    }

    #[test]
    fn test_render_draws_open_popout() {
        let mut app = make_app(vec![Tag::new("#f00", "Busy", false, &["16/03/2024"])]);
        press(&mut app, KeyCode::F(2));
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("March 2024"));
        assert!(text.contains("Legend:"));
        assert!(text.contains("Busy"));
    }
}

use crate::calc::date_provider::DateProvider;
use crate::calc::grid::project;
use crate::data::Tag;
use crate::picker::host::{Form, InputKind};
use crate::picker::render::{cell_instructions, legend, Header, RenderTarget};
use crate::picker::state::{CalendarState, ViewMode};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AttachError {
    #[error("could not attach a picker to {0}: no such input")]
    NotFound(String),
    #[error("could not attach a picker to {0}: not a text input")]
    NotTextInput(String),
}

/// Identifies one picker. Derived from its input's id and used only for lookup.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(String);

impl WidgetId {
    fn for_input(input_id: &str) -> Self {
        WidgetId(format!("{input_id}-popout"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, Default)]
pub struct AttachOptions {
    /// Seed date text in the display format.
    pub date: Option<String>,
    pub tags: Vec<Tag>,
}

/// Input events routed to a single picker.
#[derive(Clone, Debug, PartialEq)]
pub enum PickerEvent {
    /// The user finished typing into the input.
    TextCommitted(String),
    /// A day cell was clicked; carries the cell's date attribute.
    DayClicked(String),
    PrevMonth,
    NextMonth,
    Today,
    /// A month was picked in month view (0-based).
    MonthPicked(u32),
    ToggleView,
    Open,
}

/// Events that affect every picker at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlobalEvent {
    OutsideClick,
    Resize,
}

/// Emitted when a picked date is written into the host input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeNotification {
    pub input_id: String,
    pub value: String,
}

struct Widget<T> {
    input_id: String,
    state: CalendarState,
    target: T,
    visible: bool,
}

/// Owns the host form and the registry of pickers attached to it.
pub struct CalendarManager<P, T> {
    provider: P,
    form: Form,
    widgets: BTreeMap<WidgetId, Widget<T>>,
}

impl<P: DateProvider, T: RenderTarget + Default> CalendarManager<P, T> {
    pub fn new(provider: P, form: Form) -> Self {
        CalendarManager {
            provider,
            form,
            widgets: BTreeMap::new(),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    pub fn widget_ids(&self) -> impl Iterator<Item = &WidgetId> {
        self.widgets.keys()
    }

    pub fn widget_for_input(&self, input_id: &str) -> Option<WidgetId> {
        let id = WidgetId::for_input(input_id);
        self.widgets.contains_key(&id).then_some(id)
    }

    pub fn state(&self, id: &WidgetId) -> Option<&CalendarState> {
        self.widgets.get(id).map(|w| &w.state)
    }

    pub fn target(&self, id: &WidgetId) -> Option<&T> {
        self.widgets.get(id).map(|w| &w.target)
    }

    pub fn input_id(&self, id: &WidgetId) -> Option<&str> {
        self.widgets.get(id).map(|w| w.input_id.as_str())
    }

    pub fn is_open(&self, id: &WidgetId) -> bool {
        self.widgets.get(id).is_some_and(|w| w.visible)
    }

    /// Attaches a picker, logging and returning `None` on setup errors.
    pub fn attach(&mut self, selector: &str, options: AttachOptions) -> Option<WidgetId> {
        match self.try_attach(selector, options) {
            Ok(id) => Some(id),
            Err(e) => {
                warn!("{e}");
                None
            }
        }
    }

    pub fn try_attach(&mut self, selector: &str, options: AttachOptions) -> Result<WidgetId, AttachError> {
        let field = self
            .form
            .select(selector)
            .ok_or_else(|| AttachError::NotFound(selector.to_string()))?;
        if !field.is_text_like() {
            return Err(AttachError::NotTextInput(selector.to_string()));
        }
        let input_id = field.id.clone();
        let id = WidgetId::for_input(&input_id);
        if self.widgets.contains_key(&id) {
            warn!("input {input_id} already has a picker; keeping it");
            return Ok(id);
        }

        let format = self.provider.long_date_format().to_string();
        let seed = self.seed_date(options.date.as_deref(), &field.value, &format);

        if let Some(field) = self.form.get_mut(&input_id) {
            if field.placeholder.is_empty() {
                field.placeholder = format.clone();
            }
            field.title = format;
            field.kind = InputKind::Text;
        }

        let mut target = T::default();
        target.set_labels(&self.provider.weekday_names(), &self.provider.month_names());
        target.set_view_mode(ViewMode::DaySelection);
        target.set_visible(false);

        let widget = Widget {
            input_id: input_id.clone(),
            state: CalendarState::create(seed, options.tags),
            target,
            visible: false,
        };
        self.widgets.insert(id.clone(), widget);
        self.refresh_legend(&id);
        self.rerender(&id);
        info!("attached picker {} to input {input_id} seeded at {seed}", id.as_str());
        Ok(id)
    }

    /// Option text first, then the input's current text, then today.
    fn seed_date(&self, option: Option<&str>, value: &str, format: &str) -> NaiveDate {
        option
            .and_then(|text| self.provider.parse(text, format))
            .or_else(|| self.provider.parse(value, format))
            .unwrap_or_else(|| self.provider.today())
    }

    pub fn set_tags(&mut self, id: &WidgetId, tags: Vec<Tag>) {
        let Some(widget) = self.widgets.get_mut(id) else {
            warn!("no picker {}", id.as_str());
            return;
        };
        widget.state.set_tags(tags);
        self.refresh_legend(id);
        self.rerender(id);
    }

    pub fn dispatch(&mut self, id: &WidgetId, event: PickerEvent) -> Option<ChangeNotification> {
        if !self.widgets.contains_key(id) {
            warn!("event {event:?} for unknown picker {}", id.as_str());
            return None;
        }
        debug!("picker {} <- {event:?}", id.as_str());
        match event {
            PickerEvent::TextCommitted(text) => {
                self.commit_text(id, &text);
                None
            }
            PickerEvent::DayClicked(attr) => self.pick_day(id, &attr),
            PickerEvent::PrevMonth => {
                self.with_state(id, |p, s| s.shift_month(p, -1));
                self.rerender(id);
                None
            }
            PickerEvent::NextMonth => {
                self.with_state(id, |p, s| s.shift_month(p, 1));
                self.rerender(id);
                None
            }
            PickerEvent::Today => {
                self.select_today(id);
                None
            }
            PickerEvent::MonthPicked(month0) => {
                self.with_state(id, |p, s| s.set_month(p, month0));
                self.rerender(id);
                self.set_view(id, ViewMode::DaySelection);
                None
            }
            PickerEvent::ToggleView => {
                let mode = self.state(id).map(|s| s.view_mode.toggled()).unwrap_or_default();
                self.set_view(id, mode);
                None
            }
            PickerEvent::Open => {
                self.set_visible(id, true);
                None
            }
        }
    }

    /// Dismisses every picker: back to day view and hidden.
    pub fn dispatch_global(&mut self, event: GlobalEvent) {
        debug!("global {event:?}, closing {} picker(s)", self.widgets.len());
        for widget in self.widgets.values_mut() {
            widget.state.view_mode = ViewMode::DaySelection;
            widget.target.set_view_mode(ViewMode::DaySelection);
            widget.visible = false;
            widget.target.set_visible(false);
        }
    }

    fn commit_text(&mut self, id: &WidgetId, text: &str) {
        let format = self.provider.long_date_format().to_string();
        let parsed = self.provider.parse(text, &format);
        let Some(input_id) = self.input_id(id).map(str::to_string) else {
            return;
        };
        if let Some(field) = self.form.get_mut(&input_id) {
            field.value = text.to_string();
            field.invalid = parsed.is_none();
        }
        match parsed {
            Some(date) => {
                self.with_state(id, |_, s| s.set_date(date));
                self.rerender(id);
            }
            None => debug!("input {input_id}: '{text}' is not a {format} date"),
        }
    }

    fn pick_day(&mut self, id: &WidgetId, attr: &str) -> Option<ChangeNotification> {
        let format = self.provider.long_date_format().to_string();
        let Some(date) = self.provider.parse(attr, &format) else {
            warn!("picker {}: bad date attribute '{attr}'", id.as_str());
            return None;
        };
        let blocked = self
            .state(id)
            .is_some_and(|s| s.tag_index().lookup(date).iter().any(|t| !t.selectable));
        if blocked {
            debug!("picker {}: {date} is not selectable", id.as_str());
            return None;
        }

        let value = self.provider.format(date, &format);
        let input_id = self.write_input(id, date, &value)?;
        self.set_view(id, ViewMode::DaySelection);
        self.set_visible(id, false);
        info!("input {input_id} changed to {value}");
        Some(ChangeNotification { input_id, value })
    }

    fn select_today(&mut self, id: &WidgetId) {
        let today = self.provider.today();
        let value = self.provider.format(today, self.provider.long_date_format());
        if self.write_input(id, today, &value).is_none() {
            return;
        }
        self.set_view(id, ViewMode::DaySelection);
        self.set_visible(id, false);
    }

    /// Commits `date` to the state and the input text, then re-renders.
    fn write_input(&mut self, id: &WidgetId, date: NaiveDate, value: &str) -> Option<String> {
        let input_id = self.input_id(id)?.to_string();
        self.with_state(id, |_, s| s.set_date(date));
        if let Some(field) = self.form.get_mut(&input_id) {
            field.value = value.to_string();
            field.invalid = false;
        }
        self.rerender(id);
        Some(input_id)
    }

    fn with_state(&mut self, id: &WidgetId, f: impl FnOnce(&P, &mut CalendarState)) {
        if let Some(widget) = self.widgets.get_mut(id) {
            f(&self.provider, &mut widget.state);
        }
    }

    fn set_view(&mut self, id: &WidgetId, mode: ViewMode) {
        if let Some(widget) = self.widgets.get_mut(id) {
            widget.state.view_mode = mode;
            widget.target.set_view_mode(mode);
        }
    }

    fn set_visible(&mut self, id: &WidgetId, visible: bool) {
        if let Some(widget) = self.widgets.get_mut(id) {
            widget.visible = visible;
            widget.target.set_visible(visible);
        }
    }

    fn refresh_legend(&mut self, id: &WidgetId) {
        if let Some(widget) = self.widgets.get_mut(id) {
            widget.target.set_legend(&legend(widget.state.tags()));
        }
    }

    /// Projects the grid from scratch and pushes a full frame.
    fn rerender(&mut self, id: &WidgetId) {
        let Some(widget) = self.widgets.get_mut(id) else {
            return;
        };
        let state = &widget.state;
        let cells = project(
            &self.provider,
            state.displayed_month(),
            state.selected_date(),
            state.tag_index(),
        );
        let header = Header::for_month(&self.provider, state.displayed_month());
        widget
            .target
            .render(&header, &cell_instructions(&self.provider, &cells));
    }
}

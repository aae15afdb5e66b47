use crate::ui::picker_view::{run_app, App, Manager};
use crate::ui::{restore_terminal, setup_terminal};
use anyhow::Result;
use popcal::calc::ChronoProvider;
use popcal::data::{AppSettings, Persistable, TagData};
use popcal::picker::{AttachOptions, Form, InputField, InputKind};
use tracing::info;

pub fn run() -> Result<()> {
    let settings = AppSettings::load()?;
    let tag_data = TagData::load()?;
    let manager = build_manager(&settings, tag_data);

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen
        );
        original_hook(info);
    }));

    let mut terminal = setup_terminal()?;
    let mut app = App::new(manager);
    let result = run_app(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;

    for field in app.manager().form().fields() {
        info!("final value of {}: '{}'", field.id, field.value);
    }
    result
}

/// The demo form: two date inputs with pickers and a plain text note.
pub(crate) fn build_manager(settings: &AppSettings, tag_data: TagData) -> Manager {
    let form = Form::new(vec![
        InputField::new("start", "Start date", InputKind::Date),
        InputField::new("end", "End date", InputKind::Date),
        InputField::new("note", "Note", InputKind::Label),
    ]);
    let mut manager = Manager::new(ChronoProvider::from_settings(settings), form);
    manager.attach(
        "#start",
        AttachOptions {
            date: settings.seed().map(str::to_string),
            tags: tag_data.tags.clone(),
        },
    );
    manager.attach(
        "#end",
        AttachOptions {
            date: None,
            tags: tag_data.tags,
        },
    );
    manager
}

pub mod controller;
pub mod host;
pub mod render;
pub mod state;

pub use controller::{
    AttachError, AttachOptions, CalendarManager, ChangeNotification, GlobalEvent, PickerEvent,
    WidgetId,
};
pub use host::{Form, InputField, InputKind};
pub use render::{CellClass, CellRender, Header, LegendEntry, PopoutModel, RenderTarget};
pub use state::{CalendarState, ViewMode};

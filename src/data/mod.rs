pub mod app_settings;
pub mod persistence;
pub mod tag;

pub use app_settings::{AppSettings, WeekStart};
pub use persistence::Persistable;
pub use tag::{DateKey, Tag, TagData, TagDetail, TagIndex, TAG_DATE_FORMAT};

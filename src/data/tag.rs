use crate::data::persistence::Persistable;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Fixed key format for tag lookup. Independent of the display format.
pub const TAG_DATE_FORMAT: &str = "%d/%m/%Y";

/// A calendar day encoded as `DD/MM/YYYY`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct DateKey(String);

impl DateKey {
    pub fn new(raw: impl Into<String>) -> Self {
        DateKey(raw.into())
    }

    pub fn from_date(date: NaiveDate) -> Self {
        DateKey(date.format(TAG_DATE_FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// None when the key is not a real `DD/MM/YYYY` date. Such keys never match a cell.
    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, TAG_DATE_FORMAT).ok()
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn default_selectable() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Tag {
    pub color: String,
    #[serde(default)]
    pub label: String,
    #[serde(default = "default_selectable")]
    pub selectable: bool,
    #[serde(default)]
    pub dates: BTreeSet<DateKey>,
}

impl Tag {
    pub fn new(color: &str, label: &str, selectable: bool, dates: &[&str]) -> Self {
        Tag {
            color: color.to_string(),
            label: label.to_string(),
            selectable,
            dates: dates.iter().map(|d| DateKey::new(*d)).collect(),
        }
    }

    pub fn detail(&self) -> TagDetail {
        TagDetail {
            color: self.color.clone(),
            label: self.label.clone(),
            selectable: self.selectable,
        }
    }

    /// Label shown in the legend; unlabeled tags fall back to their position.
    pub fn legend_label(&self, index: usize) -> String {
        if self.label.is_empty() {
            format!("Tag #{index}")
        } else {
            self.label.clone()
        }
    }

    pub fn malformed_dates(&self) -> Vec<&DateKey> {
        self.dates.iter().filter(|k| k.to_date().is_none()).collect()
    }
}

/// A tag with its dates stripped, as attached to a single day.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TagDetail {
    pub color: String,
    pub label: String,
    pub selectable: bool,
}

/// Tags grouped by day. Derived from a tag list and rebuilt wholesale, never edited.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TagIndex {
    by_date: HashMap<DateKey, Vec<TagDetail>>,
}

impl TagIndex {
    pub fn build(tags: &[Tag]) -> Self {
        let mut by_date: HashMap<DateKey, Vec<TagDetail>> = HashMap::new();
        for tag in tags {
            for key in &tag.dates {
                by_date.entry(key.clone()).or_default().push(tag.detail());
            }
        }
        TagIndex { by_date }
    }

    pub fn lookup(&self, date: NaiveDate) -> &[TagDetail] {
        self.by_date
            .get(&DateKey::from_date(date))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}

#[derive(Serialize, Deserialize, Default, Debug)]
pub struct TagData {
    pub tags: Vec<Tag>,
}

impl Persistable for TagData {
    fn filename() -> &'static str {
        "tags.yaml"
    }
    fn is_json() -> bool {
        false
    }
}

impl TagData {
    pub fn add(&mut self, tag: Tag) {
        self.tags.push(tag);
    }
}

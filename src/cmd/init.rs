use anyhow::Result;
use chrono::{Days, Local, NaiveDate};
use popcal::data::{AppSettings, DateKey, Persistable, Tag, TagData};
use std::fs;
use std::path::Path;

pub fn run() -> Result<()> {
    let dir = popcal::data::persistence::get_data_dir()?;
    fs::create_dir_all(&dir)?;
    run_in_dir(&dir, Local::now().date_naive())?;
    println!("Data files initialized in {}.", dir.display());
    Ok(())
}

/// Writes the default config and sample tags around `today` into `dir`.
pub(crate) fn run_in_dir(dir: &Path, today: NaiveDate) -> Result<()> {
    AppSettings::default().save_to(dir)?;
    sample_tags(today).save_to(dir)?;
    Ok(())
}

fn key_after(today: NaiveDate, days: u64) -> DateKey {
    DateKey::from_date(today.checked_add_days(Days::new(days)).unwrap_or(today))
}

fn sample_tags(today: NaiveDate) -> TagData {
    let mut data = TagData::default();
    data.add(Tag {
        color: "#e5484d".to_string(),
        label: "Fully booked".to_string(),
        selectable: false,
        dates: [3, 4].into_iter().map(|n| key_after(today, n)).collect(),
    });
    data.add(Tag {
        color: "#30a46c".to_string(),
        label: "Offer".to_string(),
        selectable: true,
        dates: [1, 8, 9].into_iter().map(|n| key_after(today, n)).collect(),
    });
    data
}

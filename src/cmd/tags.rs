use anyhow::Result;
use popcal::data::{Persistable, TagData};

pub fn run() -> Result<()> {
    let tag_data = TagData::load()?;
    write_tags(&tag_data, &mut std::io::stdout())
}

pub(crate) fn write_tags<W: std::io::Write>(data: &TagData, out: &mut W) -> Result<()> {
    writeln!(out, "Tags")?;
    writeln!(out, "---")?;
    writeln!(out, "  {:<10} {:<11} {:<16} {}", "Color", "Selectable", "Label", "Dates")?;
    for (i, tag) in data.tags.iter().enumerate() {
        let dates: Vec<&str> = tag.dates.iter().map(|k| k.as_str()).collect();
        writeln!(
            out,
            "  {:<10} {:<11} {:<16} {}",
            tag.color,
            if tag.selectable { "yes" } else { "no" },
            tag.legend_label(i),
            dates.join(", ")
        )?;
        for bad in tag.malformed_dates() {
            writeln!(out, "  warning: '{bad}' is not a DD/MM/YYYY date and will never match")?;
        }
    }
    writeln!(out, "---")?;
    writeln!(out, "Total: {} tag(s)", data.tags.len())?;
    Ok(())
}

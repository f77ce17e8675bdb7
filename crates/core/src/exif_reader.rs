use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use exif::{In, Reader, Tag};
use log::debug;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const DATE_TAGS: [Tag; 3] = [Tag::DateTimeOriginal, Tag::DateTimeDigitized, Tag::DateTime];

pub fn read_exif_date(path: &Path) -> Option<DateTime<Local>> {
    match try_read_exif_date(path) {
        Ok(Some(date)) => Some(date),
        Ok(None) => {
            debug!("no EXIF date tag in {}", path.display());
            None
        }
        Err(err) => {
            debug!("{err:#}");
            None
        }
    }
}

fn try_read_exif_date(path: &Path) -> Result<Option<DateTime<Local>>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open for EXIF: {}", path.display()))?;
    let mut buf = BufReader::new(file);
    let exif = Reader::new()
        .read_from_container(&mut buf)
        .with_context(|| format!("failed to decode EXIF: {}", path.display()))?;

    Ok(DATE_TAGS.iter().find_map(|tag| {
        let field = exif.get_field(*tag, In::PRIMARY)?;
        parse_date(&field.display_value().to_string())
    }))
}

const NAIVE_FORMATS: [&str; 4] = [
    "%Y:%m:%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%:z", "%Y-%m-%dT%H:%M:%S%.f%:z"];

fn parse_date(input: &str) -> Option<DateTime<Local>> {
    // kamadak-exif displays ASCII values it cannot read as a date in quotes.
    let value = input.trim().trim_matches('"');

    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(value, fmt).ok())
    {
        return Some(dt.with_timezone(&Local));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())?;
    Local.from_local_datetime(&naive).single()
}

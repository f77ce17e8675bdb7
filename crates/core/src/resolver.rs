use crate::exif_reader::read_exif_date;
use crate::media::MediaKind;
use crate::mp4_reader::read_mp4_date;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DateSource {
    Exif,
    Mp4,
    FileModified,
    Now,
}

impl DateSource {
    pub fn is_metadata(self) -> bool {
        matches!(self, Self::Exif | Self::Mp4)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolvedDate {
    pub date: DateTime<Local>,
    pub source: DateSource,
}

pub fn resolve_date(path: &Path, metadata_only: bool) -> Option<ResolvedDate> {
    if let Some(found) = metadata_date(path) {
        return Some(found);
    }

    if metadata_only {
        return None;
    }

    Some(match file_modified_to_local(path) {
        Some(date) => ResolvedDate {
            date,
            source: DateSource::FileModified,
        },
        None => ResolvedDate {
            date: Local::now(),
            source: DateSource::Now,
        },
    })
}

fn metadata_date(path: &Path) -> Option<ResolvedDate> {
    match MediaKind::from_path(path)? {
        MediaKind::Jpeg => read_exif_date(path).map(|date| ResolvedDate {
            date,
            source: DateSource::Exif,
        }),
        MediaKind::Mp4 => read_mp4_date(path).map(|date| ResolvedDate {
            date,
            source: DateSource::Mp4,
        }),
    }
}

fn file_modified_to_local(path: &Path) -> Option<DateTime<Local>> {
    let time = fs::metadata(path).ok()?.modified().ok()?;
    Some(DateTime::from(time))
}

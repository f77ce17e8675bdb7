use chrono::{DateTime, Local};
use log::debug;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

pub const MP4_TO_UNIX_EPOCH_OFFSET: i64 = 2_082_844_800; // 1904-01-01 -> 1970-01-01
pub const MAX_SCAN_BYTES: u64 = 1024 * 1024;

const CHUNK_SIZE: usize = 4096;
const MVHD_TAG: &[u8; 4] = b"mvhd";
const MIN_MVHD_SIZE: u32 = 32;
const CREATION_TIME_OFFSET: usize = 16;
const MATCH_WINDOW: usize = CREATION_TIME_OFFSET + 4;
// Carried into the next read so a box split by a chunk boundary is seen whole.
const CHUNK_OVERLAP: usize = MATCH_WINDOW - 1;

pub fn read_mp4_date(path: &Path) -> Option<DateTime<Local>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            debug!("failed to open for MP4 scan: {}: {err}", path.display());
            return None;
        }
    };

    let Some(mp4_seconds) = scan_for_creation_time(file.take(MAX_SCAN_BYTES)) else {
        debug!("no mvhd box in the first {MAX_SCAN_BYTES} bytes of {}", path.display());
        return None;
    };

    let date = mp4_time_to_local(mp4_seconds);
    if date.is_none() {
        debug!("mvhd creation time {mp4_seconds} predates the Unix epoch in {}", path.display());
    }
    date
}

pub fn mp4_time_to_local(mp4_seconds: u32) -> Option<DateTime<Local>> {
    let unix_seconds = i64::from(mp4_seconds) - MP4_TO_UNIX_EPOCH_OFFSET;
    if unix_seconds <= 0 {
        return None;
    }
    DateTime::from_timestamp(unix_seconds, 0).map(|utc| utc.with_timezone(&Local))
}

/// Only candidates whose whole match window lies in `buf` are considered.
pub fn find_mvhd_creation_time(buf: &[u8]) -> Option<u32> {
    buf.windows(MATCH_WINDOW).find_map(|window| {
        if &window[4..8] != MVHD_TAG {
            return None;
        }
        let size = read_be_u32(window, 0)?;
        if size < MIN_MVHD_SIZE {
            return None;
        }
        read_be_u32(window, CREATION_TIME_OFFSET)
    })
}

fn scan_for_creation_time<R: Read>(mut reader: R) -> Option<u32> {
    let mut chunk = [0u8; CHUNK_SIZE];
    let mut window = Vec::with_capacity(CHUNK_OVERLAP + CHUNK_SIZE);

    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => return None,
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => {
                debug!("MP4 read failed: {err}");
                return None;
            }
        };
        window.extend_from_slice(&chunk[..n]);

        if let Some(found) = find_mvhd_creation_time(&window) {
            return Some(found);
        }

        let keep = window.len().min(CHUNK_OVERLAP);
        window.drain(..window.len() - keep);
    }
}

fn read_be_u32(buf: &[u8], offset: usize) -> Option<u32> {
    let bytes = buf.get(offset..offset + 4)?;
    Some(u32::from_be_bytes(bytes.try_into().ok()?))
}

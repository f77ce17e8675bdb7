mod exif_reader;
mod media;
mod mp4_reader;
mod organizer;
mod resolver;
mod unique;
mod validate;

#[cfg(test)]
mod test_support;

pub use exif_reader::read_exif_date;
pub use media::{is_media, MediaKind};
pub use mp4_reader::{
    find_mvhd_creation_time, mp4_time_to_local, read_mp4_date, MAX_SCAN_BYTES,
    MP4_TO_UNIX_EPOCH_OFFSET,
};
pub use organizer::{
    date_directory, organize, organize_with_options, FailedFile, MovedFile, OrganizeOptions,
    OrganizeReport, OrganizeStats,
};
pub use resolver::{resolve_date, DateSource, ResolvedDate};
pub use unique::{unique_name, unique_name_with_reserved};
pub use validate::{normalize, validate_paths, PathError, ValidatedPaths};

use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// First name in `dir` that is not taken: `name` itself, else `stem1.ext`,
/// `stem2.ext`, ...
///
/// This only checks the filesystem at call time; a concurrent writer can still
/// claim the returned name before the caller uses it.
pub fn unique_name(dir: &Path, name: &OsStr) -> OsString {
    unique_name_with_reserved(dir, name, &HashSet::new())
}

pub fn unique_name_with_reserved(
    dir: &Path,
    name: &OsStr,
    reserved: &HashSet<PathBuf>,
) -> OsString {
    let is_free = |candidate: &OsStr| {
        let path = dir.join(candidate);
        !reserved.contains(&path) && !path.exists()
    };

    if is_free(name) {
        return name.to_os_string();
    }

    // `file_stem` keeps a leading dot with the stem, so `.profile` has no extension.
    let as_path = Path::new(name);
    let (stem, ext) = match (as_path.file_stem(), as_path.extension()) {
        (Some(stem), Some(ext)) => (stem, Some(ext)),
        _ => (name, None),
    };

    let mut n = 1usize;
    loop {
        let mut candidate = stem.to_os_string();
        candidate.push(n.to_string());
        if let Some(ext) = ext {
            candidate.push(".");
            candidate.push(ext);
        }
        if is_free(candidate.as_os_str()) {
            return candidate;
        }
        n += 1;
    }
}

use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathError {
    #[error("{0} directory path is empty")]
    Empty(&'static str),
    #[error("path traversal not allowed: {}", .0.display())]
    Traversal(PathBuf),
    #[error("source directory does not exist: {}", .0.display())]
    SourceMissing(PathBuf),
    #[error("source path is not a directory: {}", .0.display())]
    SourceNotDirectory(PathBuf),
    #[error("cannot resolve the current directory")]
    CurrentDir(#[source] io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPaths {
    pub source: PathBuf,
    pub output: PathBuf,
}

/// Any `..` component is rejected rather than resolved. Symlinks are not
/// followed, so this is a coarse guard.
pub fn validate_paths(source: &Path, output: &Path) -> Result<ValidatedPaths, PathError> {
    let source = checked_absolute(source, "source")?;
    let output = checked_absolute(output, "output")?;

    if !source.exists() {
        return Err(PathError::SourceMissing(source));
    }
    if !source.is_dir() {
        return Err(PathError::SourceNotDirectory(source));
    }

    Ok(ValidatedPaths { source, output })
}

fn checked_absolute(path: &Path, role: &'static str) -> Result<PathBuf, PathError> {
    if path.as_os_str().is_empty() {
        return Err(PathError::Empty(role));
    }
    if path.components().any(|c| c == Component::ParentDir) {
        return Err(PathError::Traversal(path.to_path_buf()));
    }

    let normalized = normalize(path);
    if normalized.is_absolute() {
        Ok(normalized)
    } else {
        let cwd = std::env::current_dir().map_err(PathError::CurrentDir)?;
        Ok(normalize(&cwd.join(normalized)))
    }
}

pub fn normalize(path: &Path) -> PathBuf {
    let cleaned: PathBuf = path
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();
    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}

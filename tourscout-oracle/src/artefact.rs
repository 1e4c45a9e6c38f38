//! Capability-based access to on-disk artefacts.

use std::io;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};

/// Open an artefact for reading using ambient authority.
///
/// # Errors
/// Returns the underlying I/O error when the file cannot be opened.
pub fn open_artefact(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Return whether `path` exists and is a regular file.
///
/// # Errors
/// Returns `NotFound` when the path or its parent is missing, and other I/O
/// errors when the metadata cannot be read.
pub fn artefact_is_file(path: &Utf8Path) -> io::Result<bool> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_str().is_empty() => dir,
        _ => Utf8Path::new("."),
    };
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "path has no file name"))?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.metadata(name).map(|meta| meta.is_file())
}

//! Shared filesystem helpers built on `cap-std` and `camino`.
//!
//! Catalog files, seed documents and proposal records all pass through these
//! helpers so that whole-file replacement stays atomic: readers observe either
//! the previous document or the new one, never a partial write.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use std::io::{self, Write};
use std::path::Component;

/// Resolve an ambient directory for the given path and return the directory with the file name.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("target should include a file name"))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Ensure the parent directory for `path` exists, handling absolute paths safely for cap-std.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    ensure_dir(parent)
}

/// Ensure `dir` exists, creating intermediate directories as needed.
pub fn ensure_dir(dir: &Utf8Path) -> io::Result<()> {
    if dir.as_os_str().is_empty() || dir == Utf8Path::new("/") {
        return Ok(());
    }

    let (base_dir, relative) = split_ambient_base(dir)?;
    if relative.as_os_str().is_empty() {
        return Ok(());
    }
    base_dir.create_dir_all(&relative)?;
    Ok(())
}

/// Read a whole file as UTF-8, returning `None` when it does not exist.
pub fn read_to_string_if_exists(path: &Utf8Path) -> io::Result<Option<String>> {
    let (dir, name) = match open_dir_and_file(path) {
        Ok(found) => found,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err),
    };
    match dir.read_to_string(name.as_str()) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

/// Replace the file at `path` with `contents` in a single atomic step.
///
/// The bytes are written and synced to a hidden sibling file, which is then
/// renamed over the target. The parent directory is created when missing.
/// Concurrent writers to the same path must be serialised by the caller, as
/// they share the temporary file name.
pub fn replace_file_atomically(path: &Utf8Path, contents: &[u8]) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let (dir, name) = open_dir_and_file(path)?;
    let temp_name = format!(".{name}.tmp-{}", std::process::id());

    let write_result = (|| {
        let mut file = dir.create(temp_name.as_str())?;
        file.write_all(contents)?;
        file.sync_all()
    })();
    if let Err(err) = write_result {
        let _ = dir.remove_file(temp_name.as_str());
        return Err(err);
    }

    dir.rename(temp_name.as_str(), &dir, name.as_str())
        .inspect_err(|_| {
            let _ = dir.remove_file(temp_name.as_str());
        })
}

/// Open the root (or drive, or current directory) that `dir` hangs off and
/// return it with the remaining relative path, since cap-std cannot create
/// absolute paths directly.
fn split_ambient_base(dir: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_parent = dir.as_std_path();

    let (base, relative) = match std_parent.components().next() {
        // Windows absolute path with a drive or UNC prefix.
        Some(Component::Prefix(prefix)) => {
            let prefix_str = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;

            let base = Utf8PathBuf::from(prefix_str).join(std::path::MAIN_SEPARATOR.to_string());
            let relative = std_parent
                .strip_prefix(base.as_std_path())
                .or_else(|_| std_parent.strip_prefix(prefix.as_os_str()))
                .map_err(|_| io::Error::other("failed to strip prefix from parent path"))?
                .to_path_buf();
            (base, relative)
        }
        // Unix-style absolute path.
        Some(Component::RootDir) => {
            let base = Utf8PathBuf::from(std::path::MAIN_SEPARATOR.to_string());
            let relative = std_parent
                .strip_prefix(base.as_std_path())
                .map_err(|_| io::Error::other("failed to strip root from absolute path"))?
                .to_path_buf();
            (base, relative)
        }
        // Relative path: resolve from the current directory.
        _ => (Utf8PathBuf::from("."), std_parent.to_path_buf()),
    };

    let dir = fs_utf8::Dir::open_ambient_dir(&base, ambient_authority())?;
    let relative = Utf8PathBuf::from_path_buf(relative)
        .map_err(|_| io::Error::other("non-UTF-8 directory path"))?;

    Ok((dir, relative))
}

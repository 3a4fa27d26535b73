//! Capability-style filesystem helpers shared by the importer and the CLI.
//!
//! Paths are UTF-8 (`camino`) and every operation goes through a `cap-std`
//! directory handle opened with ambient authority, so callers never touch
//! `std::fs` directly.

#![forbid(unsafe_code)]

use std::io;
use std::path::{Component, MAIN_SEPARATOR};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// Open an existing file for reading.
///
/// # Errors
/// Propagates the I/O error when the file is missing or unreadable.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Report whether `path` names an existing regular file.
///
/// Missing files report `Ok(false)`; a missing parent directory is an error.
///
/// # Errors
/// Returns an I/O error when the parent directory cannot be opened.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_parent_dir(path)?;
    match dir.metadata(name.as_str()) {
        Ok(meta) => Ok(meta.is_file()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Create every missing directory above `path`.
///
/// Bare file names and paths directly under the root need no work.
///
/// # Errors
/// Returns an I/O error when a directory cannot be created.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() {
        return Ok(());
    }
    let (anchor, relative) = anchor_and_relative(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    anchor.create_dir_all(&relative)
}

/// Split `path` into a directory handle for its anchor (root, drive prefix or
/// the working directory) and the remaining relative path.
///
/// # Errors
/// Returns an I/O error for non-UTF-8 prefixes or when the anchor cannot be
/// opened.
pub fn anchor_and_relative(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let std_path = path.as_std_path();
    let anchor = match std_path.components().next() {
        Some(Component::Prefix(prefix)) => {
            let text = prefix
                .as_os_str()
                .to_str()
                .ok_or_else(|| io::Error::other("non-UTF-8 path prefix"))?;
            Utf8PathBuf::from(format!("{text}{MAIN_SEPARATOR}"))
        }
        Some(Component::RootDir) => Utf8PathBuf::from(MAIN_SEPARATOR.to_string()),
        _ => Utf8PathBuf::from("."),
    };
    let relative = if anchor.as_str() == "." {
        path.to_path_buf()
    } else {
        path.strip_prefix(&anchor)
            .map_err(|_| io::Error::other(format!("cannot strip {anchor} from {path}")))?
            .to_path_buf()
    };
    let dir = fs_utf8::Dir::open_ambient_dir(&anchor, ambient_authority())?;
    Ok((dir, relative))
}

fn open_parent_dir(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?
        .to_owned();
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::io::Read;
    use tempfile::TempDir;

    #[fixture]
    fn temp_dir() -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8 temp dir");
        (dir, root)
    }

    #[rstest]
    fn creates_nested_parent_dirs(#[from(temp_dir)] (_dir, root): (TempDir, Utf8PathBuf)) {
        let target = root.join("a/b/catalog.db");
        ensure_parent_dir(&target).expect("create parents");
        assert!(root.join("a/b").is_dir());
        assert!(!target.exists());
    }

    #[rstest]
    #[case("catalog.db")]
    #[case("/catalog.db")]
    fn bare_names_need_no_parent(#[case] path: &str) {
        ensure_parent_dir(Utf8Path::new(path)).expect("nothing to create");
    }

    #[rstest]
    fn distinguishes_files_from_dirs_and_missing(
        #[from(temp_dir)] (_dir, root): (TempDir, Utf8PathBuf),
    ) {
        let file = root.join("drinks.json");
        std::fs::write(&file, "{}").expect("write file");
        assert!(file_is_file(&file).expect("probe file"));
        assert!(!file_is_file(&root.join("missing.json")).expect("probe missing"));
        std::fs::create_dir(root.join("nested")).expect("create dir");
        assert!(!file_is_file(&root.join("nested")).expect("probe dir"));
    }

    #[rstest]
    fn opens_files_for_reading(#[from(temp_dir)] (_dir, root): (TempDir, Utf8PathBuf)) {
        let file = root.join("drinks.json");
        std::fs::write(&file, "{\"drinks\":[]}").expect("write file");
        let mut contents = String::new();
        open_utf8_file(&file)
            .expect("open file")
            .read_to_string(&mut contents)
            .expect("read file");
        assert_eq!(contents, "{\"drinks\":[]}");
    }

    #[rstest]
    fn absolute_paths_anchor_at_root(#[from(temp_dir)] (_dir, root): (TempDir, Utf8PathBuf)) {
        let (_anchor, relative) = anchor_and_relative(&root).expect("split path");
        assert!(relative.is_relative());
        assert!(root.ends_with(&relative));
    }
}

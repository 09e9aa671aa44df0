//! Capability-based file access for request inputs.

use std::io;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};

/// Open a UTF-8 file path using ambient authority.
pub(crate) fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Return whether `path` exists and is a regular file.
///
/// Fails with [`io::ErrorKind::NotFound`] when the path or its parent is
/// missing.
pub(crate) fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "path has no file name"))?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.metadata(name).map(|meta| meta.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rstest::rstest;
    use tempfile::TempDir;

    fn workspace() -> (TempDir, Utf8PathBuf) {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        (tmp, root)
    }

    #[rstest]
    fn distinguishes_files_and_directories() {
        let (_tmp, root) = workspace();
        let file = root.join("request.json");
        std::fs::write(&file, b"{}").expect("write file");
        assert!(file_is_file(&file).expect("inspect file"));
        assert!(!file_is_file(&root).expect("inspect directory"));
    }

    #[rstest]
    fn missing_paths_are_not_found() {
        let (_tmp, root) = workspace();
        let err = file_is_file(&root.join("absent.json")).expect_err("missing file");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        let nested = file_is_file(&root.join("absent").join("request.json"))
            .expect_err("missing parent");
        assert_eq!(nested.kind(), io::ErrorKind::NotFound);
    }

    #[rstest]
    fn opens_existing_files() {
        let (_tmp, root) = workspace();
        let file = root.join("request.json");
        std::fs::write(&file, b"{}").expect("write file");
        assert!(open_utf8_file(&file).is_ok());
    }
}

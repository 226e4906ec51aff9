use camino::Utf8PathBuf;
use std::fs;
use tempfile::TempDir;

/// Price sheet written to a temporary directory.
///
/// The directory is removed when the value is dropped.
pub struct TempSheet {
    _dir: TempDir,
    pub path: Utf8PathBuf,
}

/// Write `contents` to `prices.csv` in a fresh temporary directory.
pub fn write_sheet(contents: &str) -> TempSheet {
    let dir = TempDir::new().unwrap_or_else(|err| panic!("failed to create temp dir: {err}"));
    let path = Utf8PathBuf::from_path_buf(dir.path().join("prices.csv"))
        .unwrap_or_else(|path| panic!("temporary path {path:?} is not UTF-8"));
    fs::write(&path, contents).unwrap_or_else(|err| panic!("failed to write {path}: {err}"));
    TempSheet { _dir: dir, path }
}

//! Test helpers for writing request files into temporary workspaces.

use super::*;
use camino::{Utf8Path, Utf8PathBuf};
use routewise_core::test_support::{square_coordinates, square_stops};
use tempfile::TempDir;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write test file");
}

/// A temporary directory holding `request.json`.
pub(super) fn workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    let request_path = root.join("request.json");
    (tmp, request_path)
}

pub(super) fn square_request() -> OptimizeRequest {
    OptimizeRequest {
        stops: square_stops(),
        coordinates: square_coordinates(),
    }
}

pub(super) fn write_request(path: &Utf8Path, request: &OptimizeRequest) {
    let payload = serde_json::to_string_pretty(request).expect("serialize request");
    write_utf8(path, payload.as_bytes());
}

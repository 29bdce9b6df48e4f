use std::fs;
use std::io;
use tempfile::tempdir;

use nzb_move::fs_ops::{FileAction, copy_shared, execute, execute_with_rename};
use nzb_move::{NzbMoveError, TransferRequest};
use nzb_move::Config;

fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

#[test]
fn move_preserves_bytes_and_consumes_source() {
    let td = tempdir().unwrap();
    let src = td.path().join("src.nzb");
    let dst = td.path().join("dst.nzb");
    let data = payload(200_000);
    fs::write(&src, &data).unwrap();

    let report = execute(&src, &dst, FileAction::Move).unwrap();
    assert_eq!(report.performed, FileAction::Move);
    assert_eq!(report.bytes, None);
    assert!(!src.exists());
    assert_eq!(fs::read(&dst).unwrap(), data);
}

#[test]
fn copy_preserves_bytes_and_keeps_source() {
    let td = tempdir().unwrap();
    let src = td.path().join("src.nzb");
    let dst = td.path().join("dst.nzb");
    let data = payload(200_000);
    fs::write(&src, &data).unwrap();

    let report = execute(&src, &dst, FileAction::Copy).unwrap();
    assert_eq!(report.performed, FileAction::Copy);
    assert_eq!(report.bytes, Some(data.len() as u64));
    assert!(!report.fell_back(FileAction::Copy));
    assert_eq!(fs::read(&src).unwrap(), data);
    assert_eq!(fs::read(&dst).unwrap(), data);
}

#[test]
fn failed_move_reports_copy_and_keeps_source() {
    let td = tempdir().unwrap();
    let src = td.path().join("src.nzb");
    let dst = td.path().join("dst.nzb");
    fs::write(&src, b"contents").unwrap();

    let report = execute_with_rename(&src, &dst, FileAction::Move, |_, _| {
        Err(io::Error::other("rename refused"))
    })
    .unwrap();

    assert_eq!(report.performed, FileAction::Copy);
    assert!(report.fell_back(FileAction::Move));
    assert!(src.exists(), "fallback copy leaves the source in place");
    assert_eq!(fs::read(&dst).unwrap(), b"contents");
}

#[test]
fn copy_with_missing_source_is_a_transfer_error() {
    let td = tempdir().unwrap();
    let err = copy_shared(&td.path().join("gone"), &td.path().join("out")).unwrap_err();
    assert!(matches!(err, NzbMoveError::Transfer { op: "open source", .. }));
    assert_eq!(err.code(), 5);
    assert!(!td.path().join("out").exists());
}

#[test]
fn copy_into_missing_directory_fails_on_create() {
    let td = tempdir().unwrap();
    let src = td.path().join("src.nzb");
    fs::write(&src, b"x").unwrap();
    let err = execute(&src, &td.path().join("no/such/dir/out.nzb"), FileAction::Copy).unwrap_err();
    assert!(matches!(err, NzbMoveError::Transfer { op: "create destination", .. }));
    assert!(src.exists());
}

#[test]
fn request_end_to_end_numbers_duplicate() {
    let td = tempdir().unwrap();
    let target = td.path().join("watch");
    fs::create_dir(&target).unwrap();
    fs::write(target.join("Show.nzb"), b"old").unwrap();
    let src = td.path().join("Show.nzb");
    fs::write(&src, b"new").unwrap();

    let cfg = Config::new(&target);
    let req = TransferRequest::from_source(&src, &cfg, None).unwrap();
    let dst = req.target_path().unwrap();
    execute(&req.source_path, &dst, req.action).unwrap();

    assert_eq!(dst, target.join("1 - Show.nzb"));
    assert_eq!(fs::read(target.join("Show.nzb")).unwrap(), b"old");
    assert_eq!(fs::read(&dst).unwrap(), b"new");
}

// A directory opens for reading on unix but fails the first read, after the
// destination has been created.
#[cfg(unix)]
#[test]
fn failed_read_removes_partial_destination() {
    let td = tempdir().unwrap();
    let src = td.path().join("folder.nzb");
    let dst = td.path().join("out.nzb");
    fs::create_dir(&src).unwrap();

    let err = execute(&src, &dst, FileAction::Copy).unwrap_err();
    assert!(matches!(err, NzbMoveError::Transfer { op: "read source", .. }), "{err:?}");
    assert!(!dst.exists(), "partial destination must be removed");
    assert!(src.is_dir());
}

#[cfg(unix)]
#[test]
fn failed_fallback_copy_removes_destination_and_keeps_source() {
    let td = tempdir().unwrap();
    let src = td.path().join("folder.nzb");
    let dst = td.path().join("out.nzb");
    fs::create_dir(&src).unwrap();
    fs::write(src.join("inner.txt"), b"keep").unwrap();

    let err = execute_with_rename(&src, &dst, FileAction::Move, |_, _| {
        Err(io::Error::other("rename refused"))
    })
    .unwrap_err();

    assert!(matches!(err, NzbMoveError::Transfer { op: "read source", .. }), "{err:?}");
    assert!(!dst.exists());
    assert_eq!(fs::read(src.join("inner.txt")).unwrap(), b"keep");
}

#[test]
fn failed_create_leaves_existing_entry_alone() {
    let td = tempdir().unwrap();
    let src = td.path().join("src.nzb");
    let dst = td.path().join("taken");
    fs::write(&src, b"x").unwrap();
    fs::create_dir(&dst).unwrap();
    fs::write(dst.join("other.txt"), b"theirs").unwrap();

    let err = execute(&src, &dst, FileAction::Copy).unwrap_err();
    assert!(matches!(err, NzbMoveError::Transfer { op: "create destination", .. }));
    assert_eq!(fs::read(dst.join("other.txt")).unwrap(), b"theirs");
}

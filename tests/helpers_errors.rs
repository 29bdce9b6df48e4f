use std::io;
use std::path::Path;

use nzb_move::NzbMoveError;
use nzb_move::fs_ops::{hint_for, io_error_with_help, io_error_with_help_io};

#[test]
fn notfound_fallback_hint_includes_path() {
    let p = Path::new("/nonexistent/path/for/test");
    let err = io_error_with_help("open", p)(io::Error::from(io::ErrorKind::NotFound));
    let msg = err.to_string();
    assert!(msg.contains("open"));
    assert!(msg.contains(p.to_string_lossy().as_ref()));
    assert!(msg.contains("path not found"));
}

#[cfg(unix)]
#[test]
fn raw_os_codes_get_hints_and_code() {
    let p = Path::new("/tmp");
    let msg = io_error_with_help("write", p)(io::Error::from_raw_os_error(libc::ENOSPC)).to_string();
    assert!(msg.contains("insufficient space"), "msg was: {msg}");
    assert!(msg.contains("os code"), "should include os code in message");

    let exdev = io::Error::from_raw_os_error(libc::EXDEV);
    assert!(hint_for(&exdev).unwrap().contains("cross-filesystem"));
    let long = io::Error::from_raw_os_error(libc::ENAMETOOLONG);
    assert!(hint_for(&long).unwrap().contains("file_name_max_length"));
}

#[test]
fn io_adapter_preserves_kind() {
    let p = Path::new("/tmp/test.txt");
    let wrapped = io_error_with_help_io("create", p)(io::Error::from(io::ErrorKind::AlreadyExists));
    assert_eq!(wrapped.kind(), io::ErrorKind::AlreadyExists);
    assert!(wrapped.to_string().contains("already exists"));
}

#[test]
fn unknown_errors_have_no_hint() {
    assert_eq!(hint_for(&io::Error::other("odd")), None);
}

#[test]
fn exit_codes_are_distinct_per_failure() {
    let codes = [
        NzbMoveError::ConfigMissing("/x".into()).code(),
        NzbMoveError::NoSourceGiven.code(),
        NzbMoveError::AlreadyExists {
            name: "a.nzb".into(),
            path: "/x/a.nzb".into(),
        }
        .code(),
        NzbMoveError::Transfer {
            op: "read source",
            path: "/x".into(),
            source: io::Error::other("boom"),
        }
        .code(),
        NzbMoveError::Interrupted.code(),
    ];
    assert_eq!(codes, [2, 3, 4, 5, 130]);
}

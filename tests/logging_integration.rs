use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use nzb_move::fs_ops::{FileAction, execute_with_rename};
use nzb_move::platform::open_log_file_secure_append;
use std::path::PathBuf;
use tempfile::tempdir;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt as tsfmt, registry};

/// Appends written bytes into a shared Vec<u8> so tests can inspect log output.
#[derive(Clone)]
struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn captured(buf: &Arc<Mutex<Vec<u8>>>) -> String {
    String::from_utf8_lossy(&buf.lock().unwrap()[..]).to_string()
}

#[test]
fn move_fallback_is_logged_as_warning() {
    let td = tempdir().unwrap();
    let src = td.path().join("show.nzb");
    let dst = td.path().join("out.nzb");
    std::fs::write(&src, b"<nzb/>").unwrap();

    let buf = Arc::new(Mutex::new(Vec::new()));
    let make_writer = {
        let buf = buf.clone();
        move || BufferWriter(buf.clone())
    };
    let layer = tsfmt::layer()
        .with_writer(make_writer)
        .with_target(false)
        .with_ansi(false)
        .compact();
    let subscriber = registry().with(EnvFilter::new("info")).with(layer);

    // Scoped dispatcher: no global subscriber is installed.
    let dispatch = tracing::Dispatch::new(subscriber);
    let report = tracing::dispatcher::with_default(&dispatch, || {
        execute_with_rename(&src, &dst, FileAction::Move, |_, _| {
            Err(io::Error::from(io::ErrorKind::PermissionDenied))
        })
        .unwrap()
    });

    assert_eq!(report.performed, FileAction::Copy);
    let contents = captured(&buf);
    assert!(contents.contains("WARN"), "contents={contents}");
    assert!(contents.contains("Move failed, copying instead"), "contents={contents}");
    assert!(contents.contains("Copied file"), "contents={contents}");
}

#[test]
fn file_logging_writes_to_custom_path() {
    let td = tempdir().expect("tempdir");
    let log_path: PathBuf = td.path().join("nzb_move_test.log");

    // The production logger refuses symlinked ancestors (e.g. /var -> /private/var on macOS).
    if nzb_move::path_has_symlink_ancestor(&log_path).unwrap() {
        eprintln!(
            "Skipping file logging test: path has symlink ancestor: {}",
            log_path.display()
        );
        return;
    }

    let file = open_log_file_secure_append(&log_path).expect("open_log_file_secure_append");
    let (writer, guard): (tracing_appender::non_blocking::NonBlocking, WorkerGuard) =
        tracing_appender::non_blocking(file);

    let file_layer = tsfmt::layer()
        .with_writer(move || writer.clone())
        .with_target(false)
        .with_ansi(false)
        .compact();
    let subscriber = registry().with(EnvFilter::new("debug")).with(file_layer);
    let dispatch = tracing::Dispatch::new(subscriber);

    tracing::dispatcher::with_default(&dispatch, || {
        let name = nzb_move::fs_ops::build_target_file_name("a-very-long-release-name", Some(6), None);
        assert_eq!(name, "a-very");
    });

    // Dropping the guard flushes the non-blocking worker
    drop(guard);

    let contents = std::fs::read_to_string(&log_path).expect("read log file");
    assert!(
        contents.contains("Truncating target name"),
        "log file did not contain expected text; contents={}",
        contents
    );
}

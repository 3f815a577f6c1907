use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use file_dispatch::platform::open_log_file_secure_append;
use file_dispatch::{CancelToken, DispatchOutcome, DispatchRequest, run_dispatch};
use tempfile::tempdir;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt as tsfmt, registry};

/// Appends written bytes to a shared in-memory buffer.
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
    String::from_utf8_lossy(&buf.lock().unwrap()).to_string()
}

#[test]
fn dispatch_logs_start_moves_and_rejections() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("Report_2024.pdf"), b"x").unwrap();
    fs::write(td.path().join("Notes.pdf"), b"x").unwrap();

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
    let dispatch = tracing::Dispatch::new(registry().with(EnvFilter::new("info")).with(layer));

    let request = DispatchRequest::new(td.path(), r"^(?<name>Report_\d+)").unwrap();
    let outcome = tracing::dispatcher::with_default(&dispatch, || {
        run_dispatch(&request, &CancelToken::new(), |_| {})
    });
    assert_eq!(outcome, DispatchOutcome::Ok);

    let contents = captured(&buf);
    assert!(contents.contains("Starting dispatch"), "contents={contents}");
    assert!(contents.contains("Moved file into sub-folder"), "contents={contents}");
    assert!(contents.contains("Notes.pdf"), "contents={contents}");
    assert!(contents.contains("Dispatch finished"), "contents={contents}");
    // Debug events stay filtered at info.
    assert!(!contents.contains("Dispatching file"), "contents={contents}");
}

#[test]
fn file_logging_writes_to_custom_path() {
    let td = tempdir().expect("tempdir");
    let log_path: PathBuf = td.path().join("logs").join("file_dispatch_test.log");

    // Production refuses file logging below a symlink (e.g. /tmp on macOS).
    if file_dispatch::path_has_symlink_ancestor(&log_path).unwrap() {
        eprintln!("Skipping: path has symlink ancestor: {}", log_path.display());
        return;
    }

    let file = open_log_file_secure_append(&log_path).expect("open_log_file_secure_append");
    let (writer, guard): (tracing_appender::non_blocking::NonBlocking, WorkerGuard) =
        tracing_appender::non_blocking(file);
    let file_layer = tsfmt::layer()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .compact();
    let dispatch = tracing::Dispatch::new(registry().with(EnvFilter::new("info")).with(file_layer));

    let empty = tempdir().unwrap();
    let request = DispatchRequest::new(empty.path(), r"(?<name>.+)").unwrap();
    let outcome = tracing::dispatcher::with_default(&dispatch, || {
        run_dispatch(&request, &CancelToken::new(), |_| {})
    });
    assert_eq!(outcome, DispatchOutcome::ErrorInput);

    drop(guard);

    let contents = fs::read_to_string(&log_path).expect("read log file");
    assert!(contents.contains("No files to dispatch"), "contents={contents}");
}

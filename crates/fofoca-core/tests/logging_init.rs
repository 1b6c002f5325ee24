//! Global subscriber installation. Kept in its own test binary because a
//! process can only install one subscriber.

#![cfg(feature = "runtime")]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use fofoca_core::logging::{self, LoggingConfig, LoggingError};
use tracing::Level;

#[test]
fn test_init_creates_log_directory_and_rejects_second_install() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let log_dir = temp.path().join("nested").join("logs");
    assert!(!log_dir.exists());

    let config = LoggingConfig::development()
        .with_log_directory(log_dir.clone())
        .with_console_level(Level::WARN);
    let guard = logging::init(&config).expect("first install succeeds");
    assert!(log_dir.is_dir());

    tracing::info!(target: "fofoca_core", "badge updated");
    drop(guard);

    let files = std::fs::read_dir(&log_dir)
        .expect("read log dir")
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().starts_with("fofoca"))
        .count();
    assert!(files >= 1);

    let second = logging::init(&LoggingConfig::development());
    assert!(matches!(second, Err(LoggingError::AlreadyInitialized(_))));
}

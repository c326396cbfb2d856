#[cfg(debug_assertions)]
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use simplelog::{CombinedLogger, ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::OpenOptions;
use std::path::Path;

use quill_platform::AppPaths;

const MAX_LOG_SIZE: u64 = 512 * 1024;

/// Keep one previous generation of the log instead of growing forever; the
/// launcher process is short-lived, so rotation at startup is enough.
fn rotate_log_if_oversized(log_path: &Path, max_size: u64) {
    let Ok(metadata) = std::fs::metadata(log_path) else {
        return;
    };
    if metadata.len() <= max_size {
        return;
    }
    let _ = std::fs::rename(log_path, log_path.with_extension("log.1"));
}

/// Initialize logging to the launcher log file, plus the terminal in debug
/// builds. Failures are swallowed; the launcher works without a log.
pub fn init_logging() {
    let Ok(paths) = AppPaths::new() else {
        return;
    };
    let _ = paths.ensure_dirs();
    let log_path = paths.log_file();

    rotate_log_if_oversized(&log_path, MAX_LOG_SIZE);

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str("quill")
        .build();

    let file_logger = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok()
        .map(|file| WriteLogger::new(LevelFilter::Debug, config.clone(), file));

    #[cfg(debug_assertions)]
    {
        let term_logger = TermLogger::new(
            LevelFilter::Debug,
            config,
            TerminalMode::Mixed,
            ColorChoice::Auto,
        );

        if let Some(file_logger) = file_logger {
            let _ = CombinedLogger::init(vec![term_logger, file_logger]);
        } else {
            let _ = CombinedLogger::init(vec![term_logger]);
        }
    }

    #[cfg(not(debug_assertions))]
    {
        if let Some(file_logger) = file_logger {
            let _ = CombinedLogger::init(vec![file_logger]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::rotate_log_if_oversized;

    #[test]
    fn small_logs_are_left_in_place() {
        let temp = tempfile::tempdir().expect("tempdir should be created");
        let log_path = temp.path().join("launcher.log");
        std::fs::write(&log_path, "short\n").expect("log file should be written");

        rotate_log_if_oversized(&log_path, 1024);

        assert!(log_path.exists());
        assert!(!temp.path().join("launcher.log.1").exists());
    }

    #[test]
    fn oversized_logs_rotate_to_the_previous_generation() {
        let temp = tempfile::tempdir().expect("tempdir should be created");
        let log_path = temp.path().join("launcher.log");
        std::fs::write(&log_path, "0123456789").expect("log file should be written");

        rotate_log_if_oversized(&log_path, 4);

        assert!(!log_path.exists());
        let rotated = std::fs::read_to_string(temp.path().join("launcher.log.1"))
            .expect("rotated log should exist");
        assert_eq!(rotated, "0123456789");
    }

    #[test]
    fn missing_log_is_a_no_op() {
        let temp = tempfile::tempdir().expect("tempdir should be created");
        rotate_log_if_oversized(&temp.path().join("launcher.log"), 4);
        assert!(!temp.path().join("launcher.log.1").exists());
    }
}

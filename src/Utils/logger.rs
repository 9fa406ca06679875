use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

// set once the first call has gone through
static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Initialize the logger: terminal output at `level`, plus a log file when `log_file` is set.
///
/// Only the first call in a process installs a logger; later calls return at once and
/// leave an existing log file untouched.
/// An error is returned only when the log file cannot be created.
pub fn init_logger(level: LevelFilter, log_file: Option<&Path>) -> io::Result<()> {
    if INSTALLED.load(Ordering::Acquire) {
        return Ok(());
    }
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    // Console logger
    loggers.push(TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ));

    // File logger
    if let Some(path) = log_file {
        let file = File::create(path)?;
        loggers.push(WriteLogger::new(level, Config::default(), file));
    }

    // a logger installed elsewhere stays in place
    let _ = CombinedLogger::init(loggers);
    INSTALLED.store(true, Ordering::Release);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::info;
    use std::fs;

    // a single test, the logger is global to the test process
    #[test]
    fn test_init_logger_sequence() {
        let dir = tempfile::tempdir().unwrap();

        let unwritable = dir.path().join("missing").join("calculator.log");
        assert!(init_logger(LevelFilter::Info, Some(&unwritable)).is_err());

        let path = dir.path().join("calculator.log");
        init_logger(LevelFilter::Info, Some(&path)).unwrap();
        info!("integral of x^2 over [0, 1]");

        // later calls neither fail nor truncate the file
        init_logger(LevelFilter::Debug, Some(&path)).unwrap();
        init_logger(LevelFilter::Debug, Some(&unwritable)).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("integral of x^2 over [0, 1]"));
        assert!(!unwritable.exists());
    }
}

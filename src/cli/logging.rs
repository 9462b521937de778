//! Logging initialization

use std::path::PathBuf;

/// Initialize logging based on debug flag
/// Returns the log file path if debug logging is enabled
pub fn init_logging(debug: bool) -> Option<PathBuf> {
    if !debug {
        // No logging by default (silent operation)
        return None;
    }

    // Log to a temp file so stdout stays clean for dumped JSON.
    let temp_file = tempfile::Builder::new()
        .prefix("topograph-")
        .suffix(".log")
        .tempfile()
        .map(|f| {
            let path = f.path().to_path_buf();
            // Keep the file alive by leaking it; the OS temp cleaner
            // takes care of it eventually.
            std::mem::forget(f);
            path
        })
        .unwrap_or_else(|_| {
            std::env::temp_dir().join(format!("topograph-{}.log", std::process::id()))
        });

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&temp_file)
    {
        Ok(file) => file,
        Err(_) => return None,
    };

    tracing_subscriber::fmt()
        .with_writer(file)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_ansi(false) // No ANSI codes in log file
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    Some(temp_file)
}

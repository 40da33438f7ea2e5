// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;

/// Appends log lines to `path`. The terminal is owned by the TUI, so
/// nothing goes to stderr.
pub fn init(path: &Path, level: LevelFilter) -> Result<()> {
    let file = open_log_file(path)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_max_level(level)
        .try_init()
        .map_err(|error| {
            anyhow!(
                "failed to initialize logging to {}: {}",
                path.display(),
                error
            )
        })
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::{init, open_log_file};
    use anyhow::Result;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn open_log_file_creates_parent_directories() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("nested/dir/roster.log");
        open_log_file(&path)?;
        assert!(path.exists());
        Ok(())
    }

    #[test]
    fn init_writes_events_at_or_above_level() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("roster.log");
        init(&path, LevelFilter::INFO)?;

        tracing::info!(users = 3, "directory loaded");
        tracing::debug!("below threshold");

        let contents = std::fs::read_to_string(&path)?;
        assert!(contents.contains("directory loaded"), "{contents}");
        assert!(contents.contains("users=3"), "{contents}");
        assert!(!contents.contains("below threshold"), "{contents}");
        Ok(())
    }
}

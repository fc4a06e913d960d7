//! Debounced re-runs of a batch when files under the input directory change.

use std::path::Path;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{info, warn};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use umaf_config::Config;

/// Blocks forever, calling `on_change` once per debounced burst of relevant
/// events. Returns only when the watcher itself fails.
pub fn watch<F>(
    input_dir: &Path,
    output_dir: &Path,
    config: &Config,
    mut on_change: F,
) -> Result<()>
where
    F: FnMut() -> Result<bool>,
{
    let debounce = Duration::from_millis(config.watch_debounce_ms);
    let (sender, receiver) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = notify::recommended_watcher(move |res| {
        let _ = sender.send(res);
    })
    .context("Failed to create file watcher")?;
    watcher
        .watch(input_dir, RecursiveMode::Recursive)
        .with_context(|| format!("Failed to watch {}", input_dir.display()))?;

    info!("watching {} for changes", input_dir.display());

    loop {
        let first = receiver
            .recv()
            .context("File watcher stopped unexpectedly")?;
        let mut relevant = is_relevant_result(first, output_dir, config);

        let start = Instant::now();
        while start.elapsed() < debounce {
            let timeout = debounce.saturating_sub(start.elapsed());
            match receiver.recv_timeout(timeout) {
                Ok(event) => relevant |= is_relevant_result(event, output_dir, config),
                Err(mpsc::RecvTimeoutError::Timeout) => break,
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    anyhow::bail!("File watcher stopped unexpectedly")
                }
            }
        }

        if !relevant {
            continue;
        }
        match on_change() {
            Ok(true) => info!("rebuild finished"),
            Ok(false) => warn!("rebuild finished with failures"),
            Err(err) => warn!("rebuild failed: {err:#}"),
        }
    }
}

fn is_relevant_result(event: notify::Result<Event>, output_dir: &Path, config: &Config) -> bool {
    match event {
        Ok(event) => is_relevant(&event, output_dir, config),
        Err(err) => {
            warn!("watch error: {err}");
            false
        }
    }
}

/// A change matters when it touches an accepted input file outside the
/// output directory. Reads do not count.
pub fn is_relevant(event: &Event, output_dir: &Path, config: &Config) -> bool {
    if matches!(event.kind, EventKind::Access(_)) {
        return false;
    }
    event
        .paths
        .iter()
        .any(|path| !path.starts_with(output_dir) && config.accepts(path))
}

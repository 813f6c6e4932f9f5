//! Generate static files

use anyhow::Result;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::generator::{GenerateReport, Generator};
use crate::Folio;

/// Generate the whole site
pub fn run(folio: &Folio) -> Result<GenerateReport> {
    let start = Instant::now();

    let report = Generator::new(folio)?.generate()?;

    tracing::info!(
        "Generated {} articles and copied {} assets in {:.2}s",
        report.articles,
        report.assets,
        start.elapsed().as_secs_f64()
    );

    Ok(report)
}

/// Watch the content store, static assets and config; rebuild on change.
///
/// Blocks until the watcher channel closes.
pub fn watch(folio: &Folio) -> Result<()> {
    let (tx, rx) = channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    for dir in [&folio.content_dir, &folio.static_dir] {
        if dir.exists() {
            debouncer.watcher().watch(dir, RecursiveMode::Recursive)?;
            tracing::debug!("Watching: {:?}", dir);
        }
    }

    let config_path = folio.config_path();
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    for result in rx {
        match result {
            Ok(events) => {
                let changed: Vec<_> = events
                    .iter()
                    .filter(|e| is_relevant(&e.path, &folio.public_dir))
                    .collect();
                if changed.is_empty() {
                    continue;
                }

                for event in &changed {
                    tracing::info!("File changed: {}", event.path.display());
                }

                // Reload so config edits take effect
                let rebuilt = Folio::new(&folio.base_dir).and_then(|folio| run(&folio));
                if let Err(e) = rebuilt {
                    tracing::error!("Generation failed: {:#}", e);
                }
            }
            Err(e) => tracing::error!("Watch error: {:?}", e),
        }
    }

    Ok(())
}

fn is_relevant(path: &Path, public_dir: &Path) -> bool {
    if path.starts_with(public_dir) {
        return false;
    }
    let path_str = path.to_string_lossy();
    !path_str.contains(".git") && !path_str.contains(".DS_Store") && !path_str.ends_with('~')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_run_reports_counts() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        fs::create_dir_all(&folio.content_dir).unwrap();
        fs::write(folio.content_dir.join("a.md"), "---\ntitle: A\n---\n").unwrap();

        let report = run(&folio).unwrap();
        assert_eq!(report.articles, 1);
        assert_eq!(report.assets, 0);
    }

    #[test]
    fn test_is_relevant() {
        let public = Path::new("/site/public");
        assert!(is_relevant(Path::new("/site/src/contents/articles/a.md"), public));
        assert!(!is_relevant(Path::new("/site/public/articles/index.html"), public));
        assert!(!is_relevant(Path::new("/site/src/contents/articles/a.md~"), public));
        assert!(!is_relevant(Path::new("/site/.git/index"), public));
    }
}

//! Generate static files

use anyhow::Result;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode, DebounceEventResult};
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::content::ContentLoader;
use crate::generator::Generator;
use crate::Site;

/// Quiet period before a burst of changes triggers a rebuild
const DEBOUNCE: Duration = Duration::from_millis(500);

/// Generate the static site
pub fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();

    let export = ContentLoader::new(site).load()?;

    tracing::info!(
        "Loaded {} posts and {} pages",
        export.posts.as_ref().map_or(0, Vec::len),
        export.pages.as_ref().map_or(0, Vec::len)
    );

    let generator = Generator::new(site)?;
    generator.generate(&export)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Watch for changes to the export, static files or config and regenerate
pub async fn watch(site: &Site) -> Result<()> {
    let site = site.clone();
    tokio::task::spawn_blocking(move || watch_blocking(&site, || {})).await?
}

/// Debounced watch loop shared by `generate --watch` and the dev server.
///
/// Blocks the calling thread until the watcher shuts down. `on_regenerated`
/// runs after every successful rebuild.
pub fn watch_blocking<F: FnMut()>(site: &Site, mut on_regenerated: F) -> Result<()> {
    let (tx, rx) = channel::<DebounceEventResult>();
    let mut debouncer = new_debouncer(DEBOUNCE, tx)?;

    let config_path = site.base_dir.join("_config.yml");
    let watched = [
        (&site.data_path, RecursiveMode::NonRecursive),
        (&site.static_dir, RecursiveMode::Recursive),
        (&config_path, RecursiveMode::NonRecursive),
    ];
    for (path, mode) in watched {
        if path.exists() {
            debouncer.watcher().watch(path, mode)?;
            tracing::debug!("Watching: {:?}", path);
        }
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    for result in rx {
        let events = match result {
            Ok(events) => events,
            Err(e) => {
                tracing::error!("Watch error: {:?}", e);
                continue;
            }
        };

        let changed: Vec<_> = events
            .iter()
            .filter(|e| is_relevant_change(&e.path))
            .collect();
        if changed.is_empty() {
            continue;
        }
        for event in &changed {
            tracing::info!("File changed: {}", event.path.display());
        }

        match run(site) {
            Ok(()) => on_regenerated(),
            Err(e) => tracing::error!("Generation failed: {}", e),
        }
    }

    Ok(())
}

/// Editor swap files and VCS or package directories never trigger a rebuild
fn is_relevant_change(path: &Path) -> bool {
    let path = path.to_string_lossy();
    !path.contains(".git")
        && !path.contains(".DS_Store")
        && !path.contains("node_modules")
        && !path.ends_with('~')
}

use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc::channel;

use crate::engine::IndexEngine;

/// Watch `root` recursively and keep `engine` current: create and modify
/// events re-extract the touched file, remove events drop its entries.
/// Watching stops when the returned handle is dropped.
pub fn watch_root(engine: Arc<IndexEngine>, root: &Path) -> notify::Result<RecommendedWatcher> {
    let (tx, rx) = channel();
    let mut watcher = notify::recommended_watcher(move |res| {
        let _ = tx.send(res);
    })?;
    watcher.watch(root, RecursiveMode::Recursive)?;
    std::thread::spawn(move || {
        for res in rx {
            match res {
                Ok(event) => handle_event(&engine, &event),
                Err(err) => tracing::warn!("watch error: {}", err),
            }
        }
    });
    Ok(watcher)
}

fn handle_event(engine: &IndexEngine, event: &notify::Event) {
    for path in &event.paths {
        match event.kind {
            EventKind::Create(_) | EventKind::Modify(_) => engine.update_file(path),
            EventKind::Remove(_) => engine.remove_file(path),
            _ => {}
        }
    }
}

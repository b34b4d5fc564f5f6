use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use cronidx::engine::IndexEngine;
use cronidx::{config, fs, logging, metrics};

#[tokio::main]
async fn main() {
    logging::init();
    metrics::init();

    let mut root = PathBuf::from(".");
    let mut watch_mode = false;
    let mut snapshot: Option<PathBuf> = None;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--watch" => watch_mode = true,
            "--snapshot" => snapshot = args.next().map(PathBuf::from),
            other => root = PathBuf::from(other),
        }
    }

    let cfg = match config::load_config(&root) {
        Ok(cfg) => cfg,
        Err(err) => {
            tracing::warn!("invalid .cronidxrc, using defaults: {}", err);
            config::Config::default()
        }
    };

    let engine = Arc::new(IndexEngine::new(&cfg));
    if let Some(path) = &snapshot {
        if engine.load_snapshot(path) {
            tracing::info!("loaded snapshot from {}", path.display());
        }
    }

    let indexed = engine.scan(&root);
    let ids = engine.index().group_ids();
    tracing::info!("indexed {} files, {} group ids", indexed, ids.len());

    for id in &ids {
        println!("{}", id);
    }

    if let Some(path) = &snapshot {
        if let Err(err) = engine.save_snapshot(path) {
            tracing::warn!("failed to write snapshot {}: {}", path.display(), err);
        }
    }

    if watch_mode {
        let watcher = fs::watch_root(engine.clone(), &root);
        match watcher {
            Ok(_watcher) => {
                tracing::info!("watching {} for changes", root.display());
                let _ = tokio::signal::ctrl_c().await;
            }
            Err(err) => tracing::error!("failed to watch {}: {}", root.display(), err),
        }
    }
}

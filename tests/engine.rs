use std::fs;
use std::path::{Path, PathBuf};

use tempfile::tempdir;

use cronidx::config::Config;
use cronidx::engine::IndexEngine;

fn write_module(root: &Path, module: &str, body: &str) -> PathBuf {
    let etc = root.join("app/code").join(module).join("etc");
    fs::create_dir_all(&etc).unwrap();
    let path = etc.join("cron_groups.xml");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn scan_collects_groups_across_modules() {
    let dir = tempdir().unwrap();
    write_module(
        dir.path(),
        "Acme/Billing",
        r#"<config><group id="billing"/></config>"#,
    );
    write_module(
        dir.path(),
        "Acme/Export",
        r#"<config><group id="export"/><group id="cleanup"/></config>"#,
    );
    // wrong file name, must never be parsed
    fs::write(
        dir.path().join("app/code/readme.xml"),
        r#"<config><group id="nope"/></config>"#,
    )
    .unwrap();

    let engine = IndexEngine::new(&Config::default());
    let indexed = engine.scan(dir.path());

    assert_eq!(indexed, 2);
    assert_eq!(
        engine.index().group_ids(),
        vec!["billing", "cleanup", "export"]
    );
    assert!(engine.index().lookup("nope").is_none());
    assert!(
        engine
            .index()
            .lookup("billing")
            .unwrap()
            .ends_with("Acme/Billing/etc/cron_groups.xml")
    );
}

#[test]
fn disabled_project_indexes_nothing() {
    let dir = tempdir().unwrap();
    write_module(
        dir.path(),
        "Acme/Billing",
        r#"<config><group id="billing"/></config>"#,
    );

    let cfg = Config {
        enable_cron_groups: false,
    };
    let engine = IndexEngine::new(&cfg);
    engine.scan(dir.path());

    assert!(engine.index().is_empty());
    assert_eq!(engine.index().file_count(), 0);
}

#[test]
fn update_file_replaces_stale_entries() {
    let dir = tempdir().unwrap();
    let path = write_module(
        dir.path(),
        "Acme/Billing",
        r#"<config><group id="old"/></config>"#,
    );

    let engine = IndexEngine::new(&Config::default());
    engine.scan(dir.path());
    assert!(engine.index().lookup("old").is_some());

    fs::write(&path, r#"<config><group id="new"/></config>"#).unwrap();
    engine.update_file(&path);

    assert!(engine.index().lookup("old").is_none());
    assert!(engine.index().lookup("new").is_some());
}

#[test]
fn malformed_rewrite_clears_previous_entries() {
    let dir = tempdir().unwrap();
    let path = write_module(
        dir.path(),
        "Acme/Billing",
        r#"<config><group id="billing"/></config>"#,
    );

    let engine = IndexEngine::new(&Config::default());
    engine.scan(dir.path());
    assert!(engine.index().lookup("billing").is_some());

    // half-written file mid-edit: degrade to no entries, not an error
    fs::write(&path, r#"<config><group id="bill"#).unwrap();
    engine.update_file(&path);

    assert!(engine.index().is_empty());
}

#[test]
fn remove_file_drops_entries() {
    let dir = tempdir().unwrap();
    let path = write_module(
        dir.path(),
        "Acme/Billing",
        r#"<config><group id="billing"/></config>"#,
    );

    let engine = IndexEngine::new(&Config::default());
    engine.scan(dir.path());
    assert_eq!(engine.index().file_count(), 1);

    fs::remove_file(&path).unwrap();
    engine.remove_file(&path);

    assert!(engine.index().is_empty());
    assert_eq!(engine.index().file_count(), 0);
}

#[test]
fn rescan_is_idempotent() {
    let dir = tempdir().unwrap();
    write_module(
        dir.path(),
        "Acme/Billing",
        r#"<config><group id="billing"/></config>"#,
    );

    let engine = IndexEngine::new(&Config::default());
    engine.scan(dir.path());
    let first = engine.index().group_ids();
    engine.scan(dir.path());

    assert_eq!(engine.index().group_ids(), first);
    assert_eq!(engine.index().file_count(), 1);
}

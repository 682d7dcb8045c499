//! End-to-end lifecycle: entries written through the library, swept through
//! the maintenance command line, and read back through the library.

use std::{
    fs,
    path::Path,
    time::{Duration, SystemTime},
};

use clap::Parser;
use flatcache::{CacheConfig, FlatFileCache};
use flatcache_cli::{run, Cli, CommandStatus};
use serde_json::json;
use tempfile::TempDir;

fn backdate(path: &Path, age: Duration) {
    let file = fs::OpenOptions::new().write(true).open(path).unwrap();
    file.set_modified(SystemTime::now() - age).unwrap();
}

fn run_cli(args: &[&str]) -> (CommandStatus, String) {
    let cli = Cli::try_parse_from(std::iter::once("flatcache").chain(args.iter().copied()))
        .expect("arguments parse");
    let mut out = Vec::new();
    let status = run(&cli, &mut out).expect("command succeeds");
    (status, String::from_utf8(out).unwrap())
}

#[test]
fn test_library_writes_cli_sweeps() {
    let dir = TempDir::new().unwrap();
    let cache_dir = dir.path().join("cache");
    let cache = FlatFileCache::open(CacheConfig::with_directory(&cache_dir)).unwrap();

    cache.put("session_42", &json!({ "user": "alice" })).unwrap();
    cache.put("stale", &json!([1, 2, 3])).unwrap();
    backdate(&cache_dir.join("stale"), Duration::from_secs(2 * 86_400));

    let dir_arg = cache_dir.to_str().unwrap();
    let (status, out) = run_cli(&["--dir", dir_arg, "clear-old"]);
    assert_eq!(status, CommandStatus::Success);
    assert_eq!(out.trim(), "Removed expired 1 of 2 entries (0 failed)");

    assert_eq!(cache.get("session_42"), Some(json!({ "user": "alice" })));
    assert!(!cache.contains("stale"));

    run_cli(&["--dir", dir_arg, "clear"]);
    assert_eq!(cache.get("session_42"), None);
    assert_eq!(cache.stats(None).unwrap().entries, 0);
}

#[test]
fn test_cli_writes_library_reads() {
    let dir = TempDir::new().unwrap();
    let dir_arg = dir.path().to_str().unwrap();

    run_cli(&["--dir", dir_arg, "put", "flags", r#"{"beta":true}"#]);

    let cache = FlatFileCache::new(CacheConfig::with_directory(dir.path()));
    assert_eq!(cache.get("flags"), Some(json!({ "beta": true })));

    backdate(&dir.path().join("flags"), Duration::from_secs(15));
    assert_eq!(cache.get_with_ttl("flags", Duration::from_secs(10)), None);
    let (status, _) = run_cli(&["--dir", dir_arg, "get", "flags", "--ttl", "10"]);
    assert_eq!(status, CommandStatus::NotFound);
}

#[test]
fn test_sweep_against_explicit_directory() {
    let own = TempDir::new().unwrap();
    let maintenance = TempDir::new().unwrap();
    let cache = FlatFileCache::open(CacheConfig::with_directory(own.path())).unwrap();

    fs::write(maintenance.path().join("a"), "1").unwrap();
    fs::write(maintenance.path().join("b"), "2").unwrap();
    backdate(&maintenance.path().join("a"), Duration::from_secs(500));

    let report = cache
        .remove_expired(Some(maintenance.path()), Duration::from_secs(100))
        .unwrap();
    assert_eq!(report.removed, 1);
    assert!(maintenance.path().join("b").exists());

    let report = cache.remove_all(Some(maintenance.path())).unwrap();
    assert_eq!(report.removed, 1);
    assert_eq!(fs::read_dir(maintenance.path()).unwrap().count(), 0);
}

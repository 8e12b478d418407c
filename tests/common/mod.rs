#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::NaiveDate;
use finview::{
    finview_config::{Config, ConfigManager},
    finview_core::FixedClock,
    session_from_config, Snapshot, ViewModelEngine,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Reference day the fixture was written against.
pub fn fixture_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 15).expect("valid date")
}

pub fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/snapshot.json")
}

pub fn fixture_snapshot() -> Snapshot {
    Snapshot::load(&fixture_path()).expect("load fixture snapshot")
}

/// Engine over the fixture for `user`, anchored at [`fixture_today`].
pub fn fixture_engine(user: i64) -> ViewModelEngine {
    let session = session_from_config(&Config::default(), Some(user));
    ViewModelEngine::load(session, Box::new(FixedClock::new(fixture_today())), &fixture_snapshot())
        .expect("fixture engine")
}

/// Writes `config` into an isolated directory and returns the config file path.
pub fn write_config(config: &Config) -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("config manager");
    manager.save(config).expect("save config");
    let path = manager.config_path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

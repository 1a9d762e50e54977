//! Data-directory resolution for `DataStore::for_app`.
//!
//! These tests mutate `LUNEKIT_DATA_DIR`, so they live in their own test
//! binary and serialize on a mutex.

use std::path::PathBuf;
use std::sync::Mutex;

use lunekit::persist::ENV_DATA_DIR;
use lunekit::{DataStore, PersistError};

// Mutex to prevent parallel tests from interfering with each other's env vars
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn set_env(value: Option<&str>) {
    // SAFETY: every test touching the environment holds ENV_MUTEX, and no
    // other thread in this binary reads it concurrently.
    unsafe {
        match value {
            Some(v) => std::env::set_var(ENV_DATA_DIR, v),
            None => std::env::remove_var(ENV_DATA_DIR),
        }
    }
}

#[test]
fn env_var_wins_when_set() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempfile::tempdir().unwrap();
    set_env(dir.path().to_str());

    let store = DataStore::for_app("LuneGame").unwrap();
    assert_eq!(store.root(), dir.path());

    store.save("score.dat", &99u32).unwrap();
    assert!(dir.path().join("score.dat").is_file());
    set_env(None);
}

#[test]
fn empty_env_var_falls_back_to_platform_dir() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    set_env(Some(""));

    match DataStore::for_app("LuneGame") {
        Ok(store) => {
            assert!(store.root().ends_with("LuneGame"), "{}", store.root().display());
            let expected = dirs::data_dir().map(|d| d.join("LuneGame"));
            assert_eq!(Some(store.root().to_path_buf()), expected);
        }
        Err(PersistError::NoDataDir) => assert!(dirs::data_dir().is_none()),
        Err(e) => panic!("unexpected error: {e}"),
    }
    set_env(None);
}

#[test]
fn override_beats_env_var() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let dir = tempfile::tempdir().unwrap();
    set_env(dir.path().to_str());

    let over = PathBuf::from("/srv/lune");
    let store = DataStore::for_app_with_override("LuneGame", Some(over.clone())).unwrap();
    assert_eq!(store.root(), over);
    set_env(None);
}

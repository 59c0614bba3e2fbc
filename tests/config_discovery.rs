// tests/config_discovery.rs

// Changes the process working directory, so it lives in its own test binary
// and holds a single test.

use std::fs;
use std::path::PathBuf;

use ansible_exec::config::{default_config_path, load_optional};
use ansible_exec::CommonConfig;

#[test]
fn default_config_is_picked_up_from_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    let cfg = load_optional(None).expect("absent default file is not an error");
    assert_eq!(*cfg.defaults(), CommonConfig::default());
    assert_eq!(cfg.exec_options().cwd, None);

    fs::write(
        dir.path().join(default_config_path()),
        "[defaults]\ninventory = \"hosts.ini\"\n\n[exec]\ncwd = \"infra\"\n",
    )
    .unwrap();

    let cfg = load_optional(None).expect("default file should load");
    assert_eq!(cfg.defaults().inventory.as_deref(), Some("hosts.ini"));
    assert_eq!(cfg.exec_options().cwd, Some(PathBuf::from("infra")));

    fs::write(dir.path().join(default_config_path()), "[defaults]\nforks = 0\n").unwrap();
    assert!(load_optional(None).is_err());
}

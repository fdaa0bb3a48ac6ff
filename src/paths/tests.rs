use super::*;
use std::env;
use std::sync::Mutex;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn config_dir_prefers_xdg_config_home_when_set() {
    let _guard = ENV_MUTEX
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let tmp = tempfile::tempdir().unwrap();
    let prev_home = env::var_os("HOME");
    let prev_userprofile = env::var_os("USERPROFILE");
    let prev_xdg = env::var_os("XDG_CONFIG_HOME");

    unsafe {
        env::set_var("XDG_CONFIG_HOME", tmp.path());
        env::remove_var("HOME");
        env::remove_var("USERPROFILE");
    }

    let dir = config_dir().expect("config_dir should resolve from XDG_CONFIG_HOME");
    assert_eq!(dir, tmp.path());

    match prev_xdg {
        Some(v) => unsafe { env::set_var("XDG_CONFIG_HOME", v) },
        None => unsafe { env::remove_var("XDG_CONFIG_HOME") },
    }
    match prev_home {
        Some(v) => unsafe { env::set_var("HOME", v) },
        None => unsafe { env::remove_var("HOME") },
    }
    match prev_userprofile {
        Some(v) => unsafe { env::set_var("USERPROFILE", v) },
        None => unsafe { env::remove_var("USERPROFILE") },
    }
}

#[test]
fn config_dir_falls_back_to_home_config() {
    let _guard = ENV_MUTEX
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let tmp = tempfile::tempdir().unwrap();
    let prev_home = env::var_os("HOME");
    let prev_userprofile = env::var_os("USERPROFILE");
    let prev_xdg = env::var_os("XDG_CONFIG_HOME");

    unsafe {
        env::set_var("HOME", tmp.path());
        env::remove_var("USERPROFILE");
        env::remove_var("XDG_CONFIG_HOME");
    }

    let dir = config_dir().expect("config_dir should resolve from HOME");
    assert_eq!(dir, tmp.path().join(".config"));

    match prev_xdg {
        Some(v) => unsafe { env::set_var("XDG_CONFIG_HOME", v) },
        None => unsafe { env::remove_var("XDG_CONFIG_HOME") },
    }
    match prev_home {
        Some(v) => unsafe { env::set_var("HOME", v) },
        None => unsafe { env::remove_var("HOME") },
    }
    match prev_userprofile {
        Some(v) => unsafe { env::set_var("USERPROFILE", v) },
        None => unsafe { env::remove_var("USERPROFILE") },
    }
}

#[test]
fn data_dir_prefers_xdg_data_home_when_set() {
    let _guard = ENV_MUTEX
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let tmp = tempfile::tempdir().unwrap();
    let prev_home = env::var_os("HOME");
    let prev_userprofile = env::var_os("USERPROFILE");
    let prev_xdg = env::var_os("XDG_DATA_HOME");

    unsafe {
        env::set_var("XDG_DATA_HOME", tmp.path());
        env::remove_var("HOME");
        env::remove_var("USERPROFILE");
    }

    let dir = data_dir().expect("data_dir should resolve from XDG_DATA_HOME");
    assert_eq!(dir, tmp.path());

    match prev_xdg {
        Some(v) => unsafe { env::set_var("XDG_DATA_HOME", v) },
        None => unsafe { env::remove_var("XDG_DATA_HOME") },
    }
    match prev_home {
        Some(v) => unsafe { env::set_var("HOME", v) },
        None => unsafe { env::remove_var("HOME") },
    }
    match prev_userprofile {
        Some(v) => unsafe { env::set_var("USERPROFILE", v) },
        None => unsafe { env::remove_var("USERPROFILE") },
    }
}

#[test]
fn data_dir_falls_back_to_home_share() {
    let _guard = ENV_MUTEX
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let tmp = tempfile::tempdir().unwrap();
    let prev_home = env::var_os("HOME");
    let prev_userprofile = env::var_os("USERPROFILE");
    let prev_xdg = env::var_os("XDG_DATA_HOME");

    unsafe {
        env::set_var("HOME", tmp.path());
        env::remove_var("USERPROFILE");
        env::remove_var("XDG_DATA_HOME");
    }

    let dir = data_dir().expect("data_dir should resolve from HOME");
    assert_eq!(dir, tmp.path().join(".local").join("share"));

    match prev_xdg {
        Some(v) => unsafe { env::set_var("XDG_DATA_HOME", v) },
        None => unsafe { env::remove_var("XDG_DATA_HOME") },
    }
    match prev_home {
        Some(v) => unsafe { env::set_var("HOME", v) },
        None => unsafe { env::remove_var("HOME") },
    }
    match prev_userprofile {
        Some(v) => unsafe { env::set_var("USERPROFILE", v) },
        None => unsafe { env::remove_var("USERPROFILE") },
    }
}

#[test]
fn expand_tilde_replaces_home() {
    let _guard = ENV_MUTEX
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    let tmp = tempfile::tempdir().unwrap();
    let prev_home = env::var_os("HOME");

    unsafe {
        env::set_var("HOME", tmp.path());
    }

    let path = expand_tilde("~/test");
    assert_eq!(path, tmp.path().join("test"));

    match prev_home {
        Some(v) => unsafe { env::set_var("HOME", v) },
        None => unsafe { env::remove_var("HOME") },
    }
}

#[test]
fn app_config_dir_nests_under_config_dir() {
    let _guard = ENV_MUTEX
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let tmp = tempfile::tempdir().unwrap();
    let prev_xdg = env::var_os("XDG_CONFIG_HOME");
    unsafe {
        env::set_var("XDG_CONFIG_HOME", tmp.path());
    }

    assert_eq!(app_config_dir().unwrap(), tmp.path().join("slidebound"));

    match prev_xdg {
        Some(v) => unsafe { env::set_var("XDG_CONFIG_HOME", v) },
        None => unsafe { env::remove_var("XDG_CONFIG_HOME") },
    }
}

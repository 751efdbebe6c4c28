use super::load::{default_catalog_path, default_config_path, language_from_env, resolve_config_path};
use super::schema::*;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_mediadesc_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("MEDIADESC_CONFIG_PATH", "/tmp/mediadesc-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/mediadesc-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        PathBuf::from("/tmp/xdg-config-home")
            .join("mediadesc")
            .join("config.toml")
    );
}

#[test]
fn default_paths_fall_back_to_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::remove("XDG_DATA_HOME");
    let _g3 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/home-dir/.config/mediadesc/config.toml")
    );
    assert_eq!(
        default_catalog_path().unwrap(),
        PathBuf::from("/tmp/home-dir/.local/share/mediadesc/catalog.db")
    );
}

#[test]
fn language_from_env_strips_encoding_and_skips_c_locale() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("LC_ALL");
    let _g2 = EnvGuard::set("LC_MESSAGES", "C");
    let _g3 = EnvGuard::set("LANG", "fr_FR.UTF-8");

    assert_eq!(language_from_env().as_deref(), Some("fr_FR"));
}

#[test]
fn defaults_carry_known_extensions_and_excluded_directories() {
    let s = LibrarySettings::default();
    assert!(s.extensions.contains(&".mp3".to_string()));
    assert!(s.extensions.contains(&".mkv".to_string()));
    assert!(s.extensions.contains(&".f4v".to_string()));
    assert!(s.extensions.iter().all(|e| e.starts_with('.')));
    assert!(s.video_extensions.contains(&".mkv".to_string()));
    assert!(!s.video_extensions.contains(&".ogg".to_string()));
    assert!(
        s.excluded_directories
            .contains(&PathBuf::from("/sdcard/media/audio/ringtones"))
    );
}

#[test]
fn validate_rejects_undotted_and_uppercase_extensions() {
    let mut s = Settings::default();
    s.locale.language = "en".into();
    assert!(s.validate().is_ok());

    s.library.extensions = vec!["mp3".into()];
    assert!(s.validate().is_err());

    s.library.extensions = vec![".MP3".into()];
    assert!(s.validate().is_err());

    s.library.extensions = Vec::new();
    assert!(s.validate().is_err());
}

#[test]
fn validate_rejects_relative_excluded_directory() {
    let mut s = Settings::default();
    s.locale.language = "en".into();
    s.library.excluded_directories = vec![PathBuf::from("ringtones")];
    assert!(s.validate().is_err());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[library]
extensions = [".mp3", ".mkv"]
video_extensions = [".mkv"]
excluded_directories = ["/music/ringtones"]
recursive = false
include_hidden = true
follow_links = false
max_depth = 3

[catalog]
enabled = false
path = "/tmp/mediadesc-test.db"

[locale]
language = "de"

[listing]
fields = ["artist", "title", "file-name"]
separator = " | "
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("MEDIADESC_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("MEDIADESC__LOCALE__LANGUAGE");

    let s = Settings::load().unwrap();
    assert_eq!(s.library.extensions, vec![".mp3".to_string(), ".mkv".to_string()]);
    assert_eq!(s.library.video_extensions, vec![".mkv".to_string()]);
    assert_eq!(
        s.library.excluded_directories,
        vec![PathBuf::from("/music/ringtones")]
    );
    assert!(!s.library.recursive);
    assert!(s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(s.library.max_depth, Some(3));
    assert!(!s.catalog.enabled);
    assert_eq!(
        s.catalog_path(),
        Some(PathBuf::from("/tmp/mediadesc-test.db"))
    );
    assert_eq!(s.locale.language, "de");
    assert_eq!(
        s.listing.fields,
        vec![ListingField::Artist, ListingField::Title, ListingField::FileName]
    );
    assert_eq!(s.listing.separator, " | ");
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[locale]
language = "de"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("MEDIADESC_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("MEDIADESC__LOCALE__LANGUAGE", "es");

    let s = Settings::load().unwrap();
    assert_eq!(s.locale.language, "es");
}

#[test]
fn to_toml_round_trips_through_the_config_loader() {
    let _lock = env_lock();

    let mut original = Settings::default();
    original.locale.language = "it".into();
    original.listing.separator = " :: ".into();
    let rendered = original.to_toml().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(&cfg_path, rendered).unwrap();

    let _g1 = EnvGuard::set("MEDIADESC_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("MEDIADESC__LOCALE__LANGUAGE");

    let s = Settings::load().unwrap();
    assert_eq!(s.locale.language, "it");
    assert_eq!(s.listing.separator, " :: ");
    assert_eq!(s.library.extensions, original.library.extensions);
}

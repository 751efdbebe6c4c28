use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `MEDIADESC__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("MEDIADESC")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.library.extensions.is_empty() {
            return Err("library.extensions must not be empty".to_string());
        }
        let all = self
            .library
            .extensions
            .iter()
            .chain(&self.library.video_extensions);
        for ext in all {
            if !ext.starts_with('.') || ext.len() < 2 {
                return Err(format!("extension {ext:?} must be dot-prefixed, e.g. \".mp3\""));
            }
            if ext.chars().any(|c| c.is_ascii_uppercase()) {
                return Err(format!("extension {ext:?} must be lowercase"));
            }
        }
        if let Some(dir) = self
            .library
            .excluded_directories
            .iter()
            .find(|d| !d.is_absolute())
        {
            return Err(format!(
                "library.excluded_directories entry {} must be absolute",
                dir.display()
            ));
        }
        if self.locale.language.trim().is_empty() {
            return Err("locale.language must not be empty".to_string());
        }
        Ok(())
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Catalog database path: the configured one, or the XDG data default.
    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog.path.clone().or_else(default_catalog_path)
    }
}

/// Resolve the config path from `MEDIADESC_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("MEDIADESC_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/mediadesc/config.toml`
/// or `~/.config/mediadesc/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("mediadesc").join("config.toml"))
}

/// `$XDG_DATA_HOME/mediadesc/catalog.db` or `~/.local/share/mediadesc/catalog.db`.
pub fn default_catalog_path() -> Option<PathBuf> {
    xdg_dir("XDG_DATA_HOME", ".local/share").map(|d| d.join("mediadesc").join("catalog.db"))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(var) {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}

/// Language tag from `LC_ALL`, `LC_MESSAGES` or `LANG`, e.g. `fr_FR.UTF-8` -> `fr_FR`.
pub fn language_from_env() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| env::var(var).ok())
        .map(|v| v.split(['.', '@']).next().unwrap_or_default().to_string())
        .find(|v| !v.is_empty() && v != "C" && v != "POSIX")
}

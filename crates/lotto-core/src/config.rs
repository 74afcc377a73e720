// Configuration loading and validation (config/lotto.toml).

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::page::ElementId;

/// Shipped defaults, used when neither `config/` nor `defaults/` has a file.
pub const DEFAULT_CONFIG: &str = include_str!("../../../defaults/lotto.toml");

const CONFIG_FILE: &str = "lotto.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// lotto.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub draw: DrawConfig,
    pub form: FormConfig,
    #[serde(default)]
    pub page: PageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DrawConfig {
    /// Delay between consecutive ball reveals, in milliseconds.
    #[serde(default = "default_stagger_ms")]
    pub stagger_ms: u64,
    /// Fixed RNG seed. `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl DrawConfig {
    pub fn stagger(&self) -> Duration {
        Duration::from_millis(self.stagger_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormConfig {
    /// Submission endpoint. May still hold the placeholder; that is checked
    /// at submit time, not at load time.
    #[serde(default)]
    pub action: String,
    #[serde(default = "default_fields")]
    pub fields: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl FormConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageConfig {
    /// Element ids left off the page.
    #[serde(default)]
    pub omit: Vec<String>,
}

impl PageConfig {
    /// Omitted elements. Unknown ids are rejected by `validate`, so they are
    /// simply skipped here.
    pub fn omitted(&self) -> Vec<ElementId> {
        self.omit.iter().filter_map(|s| s.parse().ok()).collect()
    }
}

fn default_stagger_ms() -> u64 {
    120
}

fn default_fields() -> Vec<String> {
    ["name", "email", "company", "message"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_timeout_secs() -> u64 {
    15
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/lotto.toml` relative to `base_dir`.
///
/// Does not create anything; see `load_config()` for the variant that seeds
/// missing files from defaults.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let config = parse_config(&text).map_err(|e| match e {
        ConfigError::ParseError { source, .. } => ConfigError::ParseError {
            path: path.clone(),
            source,
        },
        other => other,
    })?;
    Ok(config)
}

/// Parse and validate config text.
pub fn parse_config(text: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: PathBuf::from(CONFIG_FILE),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Make sure `config/lotto.toml` exists under `base_dir`.
///
/// Copies `defaults/lotto.toml` when present, otherwise writes the built-in
/// defaults. Returns the path written, or `None` if the file already existed.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let config_dir = base_dir.join("config");
    let target = config_dir.join(CONFIG_FILE);
    if target.exists() {
        return Ok(None);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let source = base_dir.join("defaults").join(CONFIG_FILE);
    let content = if source.is_file() {
        std::fs::read_to_string(&source).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read {}: {e}", source.display()),
        })?
    } else {
        DEFAULT_CONFIG.to_string()
    };

    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
    {
        Ok(mut dest) => {
            std::io::Write::write_all(&mut dest, content.as_bytes()).map_err(|e| {
                ConfigError::DefaultsCopyError {
                    message: format!("failed to write {}: {e}", target.display()),
                }
            })?;
            Ok(Some(target))
        }
        // Another process won the race; use theirs.
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(None),
        Err(e) => Err(ConfigError::DefaultsCopyError {
            message: format!("failed to create {}: {e}", target.display()),
        }),
    }
}

/// Directory that holds `config/` and `defaults/`.
///
/// The working directory when it looks like a project checkout, otherwise
/// the per-user config directory.
pub fn resolve_base_dir() -> Result<PathBuf, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    if cwd.join("config").is_dir() || cwd.join("defaults").is_dir() {
        return Ok(cwd);
    }
    match directories::ProjectDirs::from("", "", "lotto") {
        Some(dirs) => Ok(dirs.config_dir().to_path_buf()),
        None => Ok(cwd),
    }
}

/// Resolve the base directory, seed missing config, then load it.
pub fn load_config() -> Result<Config, ConfigError> {
    let base = resolve_base_dir()?;
    ensure_config_file(&base)?;
    load_config_from(&base)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.draw.stagger_ms == 0 {
        return Err(ConfigError::ValidationError {
            field: "draw.stagger_ms".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.form.fields.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "form.fields".into(),
            message: "must list at least one field".into(),
        });
    }

    let mut seen = HashSet::new();
    for name in &config.form.fields {
        if name.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "form.fields".into(),
                message: "field names must not be empty".into(),
            });
        }
        if !seen.insert(name.as_str()) {
            return Err(ConfigError::ValidationError {
                field: "form.fields".into(),
                message: format!("duplicate field `{name}`"),
            });
        }
    }

    if config.form.timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "form.timeout_secs".into(),
            message: "must be greater than 0".into(),
        });
    }

    for id in &config.page.omit {
        if let Err(message) = id.parse::<ElementId>() {
            return Err(ConfigError::ValidationError {
                field: "page.omit".into(),
                message,
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Workspace root: the nearest ancestor of this crate holding `defaults/`.
    fn project_root() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .ancestors()
            .find(|p| p.join("defaults").is_dir())
            .map(Path::to_path_buf)
            .expect("cannot locate defaults/ directory")
    }

    fn expect_validation_field(text: &str, expected: &str) {
        match parse_config(text) {
            Err(ConfigError::ValidationError { field, .. }) => assert_eq!(field, expected),
            other => panic!("expected ValidationError for {expected}, got {other:?}"),
        }
    }

    #[test]
    fn shipped_defaults_parse() {
        let root = project_root();
        let text = fs::read_to_string(root.join("defaults/lotto.toml")).unwrap();
        let config = parse_config(&text).expect("defaults should be valid");

        assert_eq!(config.draw.stagger_ms, 120);
        assert_eq!(config.draw.stagger(), Duration::from_millis(120));
        assert!(config.draw.seed.is_none());
        assert_eq!(config.form.action, "https://formspree.io/f/YOUR_FORM_ID");
        assert_eq!(config.form.fields, vec!["name", "email", "company", "message"]);
        assert_eq!(config.form.timeout(), Duration::from_secs(15));
        assert!(config.page.omit.is_empty());
    }

    #[test]
    fn embedded_defaults_match_file() {
        let root = project_root();
        let text = fs::read_to_string(root.join("defaults/lotto.toml")).unwrap();
        assert_eq!(text, DEFAULT_CONFIG);
    }

    #[test]
    fn minimal_config_fills_defaults() {
        let config = parse_config("[draw]\n[form]\naction = \"https://x.test/f\"\n").unwrap();
        assert_eq!(config.draw.stagger_ms, 120);
        assert_eq!(config.form.fields.len(), 4);
        assert_eq!(config.form.timeout_secs, 15);
        assert!(config.page.omitted().is_empty());
    }

    #[test]
    fn omit_parses_element_ids() {
        let config = parse_config(
            "[draw]\n[form]\n[page]\nomit = [\"roundNote\", \"updatedAt\"]\n",
        )
        .unwrap();
        assert_eq!(
            config.page.omitted(),
            vec![ElementId::RoundNote, ElementId::UpdatedAt]
        );
    }

    #[test]
    fn rejects_zero_stagger() {
        expect_validation_field("[draw]\nstagger_ms = 0\n[form]\n", "draw.stagger_ms");
    }

    #[test]
    fn rejects_empty_fields() {
        expect_validation_field("[draw]\n[form]\nfields = []\n", "form.fields");
    }

    #[test]
    fn rejects_duplicate_fields() {
        expect_validation_field(
            "[draw]\n[form]\nfields = [\"email\", \"email\"]\n",
            "form.fields",
        );
    }

    #[test]
    fn rejects_zero_timeout() {
        expect_validation_field("[draw]\n[form]\ntimeout_secs = 0\n", "form.timeout_secs");
    }

    #[test]
    fn rejects_unknown_omitted_element() {
        expect_validation_field("[draw]\n[form]\n[page]\nomit = [\"footer\"]\n", "page.omit");
    }

    #[test]
    fn parse_error_on_bad_toml() {
        assert!(matches!(
            parse_config("[draw\n"),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let tmp = std::env::temp_dir().join("lotto_config_test_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        match load_config_from(&tmp) {
            Err(ConfigError::FileNotFound { path }) => {
                assert!(path.ends_with("config/lotto.toml"));
            }
            other => panic!("expected FileNotFound, got {other:?}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_file_copies_defaults_once() {
        let tmp = std::env::temp_dir().join("lotto_config_test_copy");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::write(
            tmp.join("defaults/lotto.toml"),
            "[draw]\nstagger_ms = 77\n[form]\n",
        )
        .unwrap();

        let written = ensure_config_file(&tmp).unwrap();
        assert_eq!(written, Some(tmp.join("config/lotto.toml")));
        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.draw.stagger_ms, 77);

        // Second call leaves the existing file alone.
        fs::write(tmp.join("config/lotto.toml"), "[draw]\nstagger_ms = 5\n[form]\n").unwrap();
        assert_eq!(ensure_config_file(&tmp).unwrap(), None);
        assert_eq!(load_config_from(&tmp).unwrap().draw.stagger_ms, 5);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn ensure_config_file_falls_back_to_embedded_defaults() {
        let tmp = std::env::temp_dir().join("lotto_config_test_embedded");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        ensure_config_file(&tmp).unwrap();
        let config = load_config_from(&tmp).unwrap();
        assert!(config.form.action.contains("YOUR_FORM_ID"));

        let _ = fs::remove_dir_all(&tmp);
    }
}
